//! PDK bindings CLI entry point.
//!
//! Runs the plugin's exports against the in-process emulated host.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pdk_bindings_common::{ConfigFile, ExportStatus, LogLevel};
use pdk_bindings_host::MemoryHost;
use pdk_bindings_plugin::{Stubs, exports};

#[derive(Debug, Parser)]
#[command(name = "pdk-bindings", version, about)]
struct Cli {
    /// Host fixture file (TOML).
    #[arg(long, env = "PDK_BINDINGS_CONFIG")]
    config: Option<PathBuf>,

    /// Minimum guest log level to capture; overrides the config file.
    #[arg(long, env = "PDK_BINDINGS_LOG_LEVEL")]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Call an export once and print its result.
    Call {
        /// Export name, e.g. `referenceTypes`.
        export: String,

        /// JSON input for the call.
        #[arg(long, default_value = "")]
        input: String,
    },
    /// List the available exports.
    Exports,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pdk_bindings=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Exports => {
            for name in exports::EXPORTS {
                println!("{name}");
            }
            Ok(())
        }
        Command::Call { export, input } => {
            let config = load_config(cli.config.as_deref(), cli.log_level)?;
            call(&config, &export, &input)
        }
    }
}

fn load_config(path: Option<&Path>, log_level: Option<LogLevel>) -> anyhow::Result<ConfigFile> {
    let mut config = match path {
        Some(path) => ConfigFile::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ConfigFile::default(),
    };
    if let Some(level) = log_level {
        config.host.log_level = level;
    }
    Ok(config)
}

fn call(config: &ConfigFile, export: &str, input: &str) -> anyhow::Result<()> {
    if !exports::EXPORTS.contains(&export) {
        anyhow::bail!(
            "Unknown export '{export}'. Available: {}",
            exports::EXPORTS.join(", ")
        );
    }
    info!(
        export,
        pantry = config.pantry.len(),
        kv = config.kv.len(),
        log_level = %config.host.log_level,
        "Configuration loaded"
    );

    let host = MemoryHost::from_config_file(config);
    let outcome = host.invoke(input.as_bytes(), |host| {
        exports::dispatch(export, host, &Stubs).unwrap_or(ExportStatus::NoResult.code())
    });

    for entry in &outcome.logs {
        eprintln!("[{}] {}", entry.level, entry.message);
    }
    if let Some(output) = &outcome.output {
        match serde_json::from_slice::<serde_json::Value>(output) {
            Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
            Err(_) => println!("{}", String::from_utf8_lossy(output)),
        }
    }

    let status = outcome
        .export_status()
        .map_or_else(|| outcome.status.to_string(), |s| s.to_string());
    if !outcome.is_success() {
        anyhow::bail!(
            "{export} failed with status {status}: {}",
            outcome.error.as_deref().unwrap_or("no error message")
        );
    }
    info!(export, status = %status, "Export succeeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_flag_overrides_config() {
        let cli = Cli::try_parse_from(["pdk-bindings", "--log-level", "warn", "exports"]).unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Warn));

        let config = load_config(None, cli.log_level).unwrap();
        assert_eq!(config.host.log_level, LogLevel::Warn);
        assert_eq!(load_config(None, None).unwrap().host.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_bad_log_level_is_rejected() {
        assert!(Cli::try_parse_from(["pdk-bindings", "--log-level", "loud", "exports"]).is_err());
    }

    #[test]
    fn test_unknown_export_is_rejected_before_running() {
        let err = call(&ConfigFile::default(), "missing", "").unwrap_err();
        assert!(err.to_string().starts_with("Unknown export 'missing'"));
    }

    #[test]
    fn test_call_known_export() {
        assert!(call(&ConfigFile::default(), "topLevelPrimitives", r#""hello""#).is_ok());
        assert!(call(&ConfigFile::default(), "referenceTypes", "").is_err());
    }
}

//! Common types, errors, and configuration for pdk-bindings.
//!
//! This crate provides shared functionality used across the pdk-bindings workspace:
//! - Error types using `thiserror` for both directions of the plugin boundary
//! - Stable export status codes understood by the host
//! - Log levels for the guest diagnostics channel
//! - Configuration structures for the emulated host

pub mod config;
pub mod config_file;
pub mod error;
pub mod log;
pub mod status;

pub use config::HostConfig;
pub use config_file::{ConfigFile, ConfigFileError};
pub use error::{CodecError, ExportError, HostError, ImportError};
pub use log::LogLevel;
pub use status::ExportStatus;

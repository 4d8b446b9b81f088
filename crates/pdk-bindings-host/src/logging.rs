//! Guest log capture.
//!
//! Messages arriving on the diagnostics channel are kept on the current
//! [`CallContext`] so tests and the CLI can inspect them after the call, and
//! are mirrored to `tracing` tagged with the call id.

use tracing::{debug, error, info, warn};

use pdk_bindings_common::LogLevel;

use crate::context::CallContext;

/// Diagnostics channel of the emulated host.
///
/// Level filtering happens before this point, against
/// [`HostConfig::log_level`](pdk_bindings_common::HostConfig::log_level).
pub struct LoggingHost;

impl LoggingHost {
    /// Record `message` on `ctx` and forward it to `tracing` under the
    /// matching level, with `guest_log = true` so subscribers can route
    /// guest output separately from host events.
    pub fn log(ctx: &mut CallContext, level: LogLevel, message: &str) {
        ctx.log(level, message.to_string());

        let call_id = ctx.call_id.as_str();
        match level {
            LogLevel::Debug => debug!(call_id, guest_log = true, "{message}"),
            LogLevel::Info => info!(call_id, guest_log = true, "{message}"),
            LogLevel::Warn => warn!(call_id, guest_log = true, "{message}"),
            LogLevel::Error => error!(call_id, guest_log = true, "{message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_keep_order_and_level() {
        let mut ctx = CallContext::new("call-7".into(), Vec::new());

        LoggingHost::log(&mut ctx, LogLevel::Warn, "low on apples");
        LoggingHost::log(&mut ctx, LogLevel::Debug, "referenceTypes: returning");

        assert_eq!(
            ctx.logs.iter().map(|e| e.level).collect::<Vec<_>>(),
            [LogLevel::Warn, LogLevel::Debug]
        );
        assert_eq!(ctx.logs[1].message, "referenceTypes: returning");
        assert!(ctx.logs[0].timestamp <= ctx.logs[1].timestamp);
    }
}

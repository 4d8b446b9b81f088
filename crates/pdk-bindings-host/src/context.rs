//! Per-call execution context.
//!
//! This module provides:
//! - [`CallContext`]: State of the export call currently being served
//! - [`LogEntry`]: A captured guest log line
//! - [`CallOutcome`]: What the host observed once the export returned

use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;

use pdk_bindings_common::{CodecError, ExportStatus, LogLevel};
use pdk_bindings_core::codec;

/// State of a single export call.
///
/// Created when the host invokes an export and consumed into a
/// [`CallOutcome`] when the export returns.
#[derive(Debug)]
pub struct CallContext {
    /// Unique call identifier for tracing.
    pub call_id: String,

    /// Input bytes exposed to the guest.
    pub input: Vec<u8>,

    /// Output handed over by the guest, if any.
    pub output: Option<Vec<u8>>,

    /// Error message attached by the guest, if any.
    pub error: Option<String>,

    /// Logs collected from guest code.
    pub logs: Vec<LogEntry>,

    /// Call start time.
    start_time: Instant,
}

/// A guest message that passed the host's minimum level.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: LogLevel,

    /// Message as the guest sent it, without the call id.
    pub message: String,

    /// When the host received the message.
    pub timestamp: Instant,
}

impl CallContext {
    /// Create a new call context with the given call ID and input.
    pub fn new(call_id: String, input: Vec<u8>) -> Self {
        Self {
            call_id,
            input,
            output: None,
            error: None,
            logs: Vec::new(),
            start_time: Instant::now(),
        }
    }

    /// Add a log entry.
    pub fn log(&mut self, level: LogLevel, message: String) {
        self.logs.push(LogEntry {
            level,
            message,
            timestamp: Instant::now(),
        });
    }

    /// Get elapsed time since the call started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Close the call with the status the export returned.
    ///
    /// The output is only kept for a zero status; for any other status the
    /// output handle is not meaningful and is discarded unread.
    pub fn finish(self, status: i32) -> CallOutcome {
        let duration = self.elapsed();
        CallOutcome {
            call_id: self.call_id,
            status,
            output: if status == 0 { self.output } else { None },
            error: self.error,
            logs: self.logs,
            duration,
        }
    }
}

/// Result of an export call, as observed by the host.
#[derive(Debug, Clone)]
pub struct CallOutcome {
    /// Identifier of the call.
    pub call_id: String,

    /// Raw status code returned by the export.
    pub status: i32,

    /// Output bytes; always `None` when `status` is non-zero.
    pub output: Option<Vec<u8>>,

    /// Error message the guest attached.
    pub error: Option<String>,

    /// Logs the guest emitted.
    pub logs: Vec<LogEntry>,

    /// Wall-clock duration of the call.
    pub duration: Duration,
}

impl CallOutcome {
    /// The status as a known [`ExportStatus`], if it is one.
    pub fn export_status(&self) -> Option<ExportStatus> {
        ExportStatus::from_code(self.status)
    }

    /// Returns `true` if the export reported success.
    pub fn is_success(&self) -> bool {
        self.export_status().is_some_and(ExportStatus::is_success)
    }

    /// Decode the output as JSON.
    ///
    /// Returns `None` if there is no output.
    pub fn output_json<T: DeserializeOwned>(&self) -> Option<Result<T, CodecError>> {
        self.output.as_deref().map(codec::decode)
    }

    /// Messages of all captured log entries, in order.
    pub fn log_messages(&self) -> Vec<&str> {
        self.logs.iter().map(|l| l.message.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_context_creation() {
        let ctx = CallContext::new("call-123".into(), b"{}".to_vec());

        assert_eq!(ctx.call_id, "call-123");
        assert_eq!(ctx.input, b"{}");
        assert!(ctx.logs.is_empty());
        assert!(ctx.output.is_none());
        assert!(ctx.error.is_none());
    }

    #[test]
    fn test_call_context_logging() {
        let mut ctx = CallContext::new("test".into(), Vec::new());

        ctx.log(LogLevel::Info, "Hello".into());
        ctx.log(LogLevel::Error, "World".into());

        assert_eq!(ctx.logs.len(), 2);
        assert_eq!(ctx.logs[0].level, LogLevel::Info);
        assert_eq!(ctx.logs[0].message, "Hello");
        assert_eq!(ctx.logs[1].level, LogLevel::Error);
    }

    #[test]
    fn test_finish_success_keeps_output() {
        let mut ctx = CallContext::new("ok".into(), Vec::new());
        ctx.output = Some(b"true".to_vec());

        let outcome = ctx.finish(0);
        assert!(outcome.is_success());
        assert_eq!(outcome.export_status(), Some(ExportStatus::Success));
        assert!(outcome.output_json::<bool>().unwrap().unwrap());
    }

    #[test]
    fn test_finish_failure_discards_output() {
        let mut ctx = CallContext::new("bad".into(), Vec::new());
        ctx.output = Some(b"true".to_vec());
        ctx.error = Some("nope".into());

        let outcome = ctx.finish(-2);
        assert!(!outcome.is_success());
        assert_eq!(outcome.export_status(), Some(ExportStatus::NoResult));
        assert!(outcome.output.is_none());
        assert_eq!(outcome.error.as_deref(), Some("nope"));
    }

    #[test]
    fn test_unknown_status() {
        let outcome = CallContext::new("odd".into(), Vec::new()).finish(7);
        assert_eq!(outcome.export_status(), None);
        assert!(!outcome.is_success());
    }
}

//! Configuration structures for the emulated host.
//!
//! [`HostConfig`] bounds the resources a guest may hold across the boundary
//! during a call and sets the minimum level of guest logs that are captured.

use serde::{Deserialize, Serialize};

use crate::LogLevel;

/// Emulated host configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HostConfig {
    /// Largest buffer, in bytes, the host will allocate for a handle.
    ///
    /// Staging a bigger argument or output fails with a boundary error.
    #[serde(default = "defaults::max_buffer_bytes")]
    pub max_buffer_bytes: usize,

    /// Maximum number of handles that may be alive at the same time.
    #[serde(default = "defaults::max_live_handles")]
    pub max_live_handles: usize,

    /// Minimum level of guest log messages that are captured.
    #[serde(default = "defaults::log_level")]
    pub log_level: LogLevel,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            max_buffer_bytes: defaults::max_buffer_bytes(),
            max_live_handles: defaults::max_live_handles(),
            log_level: defaults::log_level(),
        }
    }
}

impl HostConfig {
    /// Returns `true` if a guest message at `level` should be captured.
    pub fn captures(&self, level: LogLevel) -> bool {
        level >= self.log_level
    }
}

/// Default value functions for serde.
mod defaults {
    use crate::LogLevel;

    pub const fn max_buffer_bytes() -> usize {
        1024 * 1024
    }

    pub const fn max_live_handles() -> usize {
        1024
    }

    pub const fn log_level() -> LogLevel {
        LogLevel::Debug
    }
}

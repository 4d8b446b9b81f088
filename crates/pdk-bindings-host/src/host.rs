//! The emulated host.

use std::fmt;

use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use pdk_bindings_common::{ConfigFile, HostConfig, HostError, LogLevel};
use pdk_bindings_core::{Handle, Host};

use crate::context::{CallContext, CallOutcome};
use crate::functions::{self, HostFunctions, HostState};
use crate::logging::LoggingHost;
use crate::memory::HandleTable;

/// An in-process host for plugin bindings.
///
/// `MemoryHost` plays the role a WebAssembly runtime plays for a real guest:
/// it owns the handle table, exposes the call input, receives the output and
/// error, captures logs, and serves host functions by name.
///
/// # Example
///
/// ```
/// use pdk_bindings_common::HostConfig;
/// use pdk_bindings_core::export::export_total;
/// use pdk_bindings_host::MemoryHost;
///
/// let host = MemoryHost::new(HostConfig::default());
/// let outcome = host.invoke(br#""abc""#, |host| {
///     export_total(host, "len", |s: String| s.len())
/// });
///
/// assert!(outcome.is_success());
/// assert_eq!(outcome.output.as_deref(), Some(&b"3"[..]));
/// ```
pub struct MemoryHost {
    config: HostConfig,
    functions: HostFunctions,
    inner: Mutex<Inner>,
}

struct Inner {
    memory: HandleTable,
    call: Option<CallContext>,
    state: HostState,
}

impl MemoryHost {
    /// Create a host with no host functions and empty state.
    pub fn new(config: HostConfig) -> Self {
        Self::with_state(config, HostFunctions::new(), HostState::default())
    }

    /// Create a host from explicit parts.
    pub fn with_state(config: HostConfig, functions: HostFunctions, state: HostState) -> Self {
        let memory = HandleTable::new(&config);
        Self {
            config,
            functions,
            inner: Mutex::new(Inner {
                memory,
                call: None,
                state,
            }),
        }
    }

    /// Create a host with the standard host functions, seeded from `config`.
    pub fn from_config_file(config: &ConfigFile) -> Self {
        let mut functions = HostFunctions::new();
        functions::register_all(&mut functions);
        Self::with_state(config.host.clone(), functions, HostState::from_config(config))
    }

    /// The host configuration.
    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Mutable access to the host function registry.
    pub fn functions_mut(&mut self) -> &mut HostFunctions {
        &mut self.functions
    }

    /// Run `export` as one call with `input` as the call input.
    ///
    /// The export receives this host and returns its status code. The host
    /// lock is not held while the export runs.
    #[instrument(skip(self, input, export), fields(input_len = input.len()))]
    pub fn invoke<F>(&self, input: &[u8], export: F) -> CallOutcome
    where
        F: FnOnce(&Self) -> i32,
    {
        let call_id = Uuid::new_v4().to_string();
        debug!(call_id = %call_id, "Starting call");
        {
            let mut inner = self.inner.lock();
            if inner.call.is_some() {
                warn!(call_id = %call_id, "Replacing an unfinished call");
            }
            inner.call = Some(CallContext::new(call_id.clone(), input.to_vec()));
        }

        let status = export(self);

        let (ctx, live_handles, live_bytes) = {
            let mut inner = self.inner.lock();
            let ctx = inner
                .call
                .take()
                .unwrap_or_else(|| CallContext::new(call_id, Vec::new()));
            (ctx, inner.memory.live(), inner.memory.live_bytes())
        };
        let outcome = ctx.finish(status);

        if live_handles > 0 {
            warn!(
                call_id = %outcome.call_id,
                live_handles,
                live_bytes,
                "Guest left buffers allocated"
            );
        }
        info!(
            call_id = %outcome.call_id,
            status = outcome.status,
            duration_us = outcome.duration.as_micros(),
            log_count = outcome.logs.len(),
            live_bytes,
            "Call completed"
        );
        outcome
    }

    /// Number of buffers currently alive in the handle table.
    pub fn live_handles(&self) -> usize {
        self.inner.lock().memory.live()
    }

    /// Read a value from the key/value store.
    pub fn kv_get(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.lock().state.kv.get(key).cloned()
    }

    /// Write a value to the key/value store.
    pub fn kv_set(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.inner.lock().state.kv.insert(key.into(), value.into());
    }

    /// Fruits remaining in the pantry.
    pub fn pantry(&self) -> Vec<String> {
        self.inner.lock().state.pantry.clone()
    }

    fn dispatch(&self, function: &str, input: Handle) -> Option<Vec<u8>> {
        let mut inner = self.inner.lock();
        let argument = match inner.memory.load(input) {
            Ok(argument) => argument,
            Err(e) => {
                warn!(function, error = %e, "Host function called with an invalid handle");
                return None;
            }
        };
        let Some(f) = self.functions.get(function) else {
            warn!(function, "Host function not found");
            return None;
        };
        f(&mut inner.state, &argument)
    }
}

impl Host for MemoryHost {
    fn input(&self) -> Vec<u8> {
        self.inner
            .lock()
            .call
            .as_ref()
            .map(|c| c.input.clone())
            .unwrap_or_default()
    }

    fn alloc(&self, bytes: &[u8]) -> Result<Handle, HostError> {
        self.inner.lock().memory.alloc(bytes)
    }

    fn load(&self, handle: Handle) -> Result<Vec<u8>, HostError> {
        self.inner.lock().memory.load(handle)
    }

    fn free(&self, handle: Handle) {
        if handle.is_null() {
            return;
        }
        if !self.inner.lock().memory.free(handle) {
            warn!(handle = %handle, "Freeing unknown handle");
        }
    }

    fn set_output(&self, handle: Handle) -> Result<(), HostError> {
        let mut inner = self.inner.lock();
        if inner.call.is_none() {
            return Err(HostError::OutputRejected {
                reason: "no call in progress".into(),
            });
        }
        let bytes = inner.memory.take(handle)?;
        if let Some(call) = inner.call.as_mut() {
            call.output = Some(bytes);
        }
        Ok(())
    }

    fn set_error(&self, message: &str) {
        if let Some(call) = self.inner.lock().call.as_mut() {
            call.error = Some(message.to_string());
        }
    }

    fn log(&self, level: LogLevel, message: &str) {
        if !self.config.captures(level) {
            return;
        }
        if let Some(call) = self.inner.lock().call.as_mut() {
            LoggingHost::log(call, level, message);
        }
    }

    fn call(&self, function: &str, input: Handle) -> Handle {
        let Some(result) = self.dispatch(function, input) else {
            return Handle::NULL;
        };
        match self.alloc(&result) {
            Ok(handle) => handle,
            Err(e) => {
                warn!(function, error = %e, "Could not allocate host function result");
                Handle::NULL
            }
        }
    }

    fn call_void(&self, function: &str, input: Handle) {
        if let Some(result) = self.dispatch(function, input) {
            debug!(function, bytes = result.len(), "Discarding result of void host function");
        }
    }
}

impl fmt::Debug for MemoryHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryHost")
            .field("config", &self.config)
            .field("functions", &self.functions)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdk_bindings_core::{ImportProxy, OwnedHandle};

    fn host() -> MemoryHost {
        MemoryHost::from_config_file(&ConfigFile::default())
    }

    #[test]
    fn test_input_outside_call_is_empty() {
        assert!(host().input().is_empty());
    }

    #[test]
    fn test_invoke_exposes_input_and_collects_output() {
        let host = host();
        let outcome = host.invoke(b"in", |h| {
            assert_eq!(h.input(), b"in");
            OwnedHandle::stage(h, b"out").unwrap().into_output().unwrap();
            0
        });

        assert_eq!(outcome.status, 0);
        assert_eq!(outcome.output.as_deref(), Some(&b"out"[..]));
        assert_eq!(host.live_handles(), 0);
        assert!(host.input().is_empty());
    }

    #[test]
    fn test_failed_call_hides_output() {
        let host = host();
        let outcome = host.invoke(b"", |h| {
            OwnedHandle::stage(h, b"out").unwrap().into_output().unwrap();
            h.set_error("boom");
            -3
        });

        assert!(outcome.output.is_none());
        assert_eq!(outcome.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_set_output_outside_call() {
        let host = host();
        let handle = host.alloc(b"x").unwrap();
        assert!(matches!(
            host.set_output(handle),
            Err(HostError::OutputRejected { .. })
        ));
    }

    #[test]
    fn test_logs_respect_minimum_level() {
        let config = ConfigFile {
            host: HostConfig {
                log_level: LogLevel::Info,
                ..Default::default()
            },
            ..Default::default()
        };
        let host = MemoryHost::from_config_file(&config);
        let outcome = host.invoke(b"", |h| {
            h.log(LogLevel::Debug, "hidden");
            h.log(LogLevel::Info, "shown");
            0
        });

        assert_eq!(outcome.log_messages(), ["shown"]);
    }

    #[test]
    fn test_buffers_left_by_guest_stay_live() {
        let host = host();
        let outcome = host.invoke(b"", |h| {
            h.alloc(b"forgotten").unwrap();
            0
        });

        assert!(outcome.is_success());
        assert_eq!(host.live_handles(), 1);
    }

    #[test]
    fn test_unknown_function_returns_null() {
        let host = host();
        let input = host.alloc(b"x").unwrap();
        assert!(host.call("nope", input).is_null());
    }

    #[test]
    fn test_import_through_proxy() {
        let host = host();
        host.kv_set("k", b"v".to_vec());

        let outcome = host.invoke(b"", |h| {
            let proxy = ImportProxy::new(h);
            assert_eq!(proxy.call_bytes("kv_read", b"k").unwrap(), b"v");
            assert!(proxy.call_bytes("kv_read", b"missing").unwrap_err().is_nothing());
            0
        });

        assert!(outcome.is_success());
        assert_eq!(host.live_handles(), 0);
    }

    #[test]
    fn test_result_allocation_failure_returns_null() {
        let config = ConfigFile {
            host: HostConfig {
                max_buffer_bytes: 4,
                ..Default::default()
            },
            ..Default::default()
        };
        let host = MemoryHost::from_config_file(&config);
        host.kv_set("big", b"0123456789".to_vec());

        let input = host.alloc(b"big").unwrap();
        assert!(host.call("kv_read", input).is_null());
    }

    #[test]
    fn test_custom_function() {
        let mut host = MemoryHost::new(HostConfig::default());
        host.functions_mut()
            .register("shout", |_, arg| Some(arg.to_ascii_uppercase()));

        let proxy = ImportProxy::new(&host);
        assert_eq!(proxy.call_bytes("shout", b"hi").unwrap(), b"HI");
    }
}

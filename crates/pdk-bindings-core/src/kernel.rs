//! Extism kernel bindings for `wasm32` guests.
//!
//! Kernel memory blocks are addressed by offset, and an offset is exactly a
//! [`Handle`]. [`Kernel`] implements [`Host`] on top of `extism_pdk`, and
//! routes named host-function calls to a [`UserImports`] table supplied by
//! the generated bindings, since wasm imports are resolved statically.

use extism_pdk::Memory;

use pdk_bindings_common::{HostError, LogLevel};

use crate::{Handle, Host};

/// Statically linked host functions, dispatched by name.
pub trait UserImports {
    /// Call a host function returning bytes.
    ///
    /// `None` for unknown names and for host calls that failed.
    fn call(&self, function: &str, input: Vec<u8>) -> Option<Vec<u8>>;

    /// Call a host function returning nothing; unknown names are ignored.
    fn call_void(&self, function: &str, input: Vec<u8>);
}

/// [`Host`] backed by the Extism kernel.
#[derive(Debug, Default, Clone, Copy)]
pub struct Kernel<U> {
    imports: U,
}

impl<U: UserImports> Kernel<U> {
    /// Create a kernel host using `imports` for named calls.
    pub const fn new(imports: U) -> Self {
        Self { imports }
    }

    fn block(handle: Handle) -> Result<Memory, HostError> {
        Memory::find(handle.raw()).ok_or(HostError::UnknownHandle {
            handle: handle.raw(),
        })
    }

    fn argument(handle: Handle) -> Vec<u8> {
        Memory::find(handle.raw())
            .map(|memory| memory.to_vec())
            .unwrap_or_default()
    }
}

impl<U: UserImports> Host for Kernel<U> {
    fn input(&self) -> Vec<u8> {
        extism_pdk::input::<Vec<u8>>().unwrap_or_default()
    }

    fn alloc(&self, bytes: &[u8]) -> Result<Handle, HostError> {
        Memory::from_bytes(bytes)
            .map(|memory| Handle::from_raw(memory.offset()))
            .map_err(|_| HostError::AllocationFailed {
                requested: bytes.len(),
            })
    }

    fn load(&self, handle: Handle) -> Result<Vec<u8>, HostError> {
        Self::block(handle).map(|memory| memory.to_vec())
    }

    fn free(&self, handle: Handle) {
        if let Some(memory) = Memory::find(handle.raw()) {
            memory.free();
        }
    }

    fn set_output(&self, handle: Handle) -> Result<(), HostError> {
        Self::block(handle)?.set_output();
        Ok(())
    }

    #[allow(unsafe_code)]
    fn set_error(&self, message: &str) {
        // The kernel reads the message after the export returns, so the block
        // stays allocated.
        if let Ok(memory) = Memory::from_bytes(message) {
            // SAFETY: `memory` is a live block holding the message.
            unsafe { extism_pdk::extism::error_set(memory.offset()) }
        }
    }

    fn log(&self, level: LogLevel, message: &str) {
        let level = match level {
            LogLevel::Debug => extism_pdk::LogLevel::Debug,
            LogLevel::Info => extism_pdk::LogLevel::Info,
            LogLevel::Warn => extism_pdk::LogLevel::Warn,
            LogLevel::Error => extism_pdk::LogLevel::Error,
        };
        extism_pdk::log!(level, "{message}");
    }

    fn call(&self, function: &str, input: Handle) -> Handle {
        // The kernel has no zero-length blocks: an empty result and no result
        // both arrive as offset 0.
        self.imports
            .call(function, Self::argument(input))
            .filter(|bytes| !bytes.is_empty())
            .and_then(|bytes| self.alloc(&bytes).ok())
            .unwrap_or(Handle::NULL)
    }

    fn call_void(&self, function: &str, input: Handle) {
        self.imports.call_void(function, Self::argument(input));
    }
}

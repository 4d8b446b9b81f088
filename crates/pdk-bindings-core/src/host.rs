//! The host side of the plugin boundary, as seen from the guest.
//!
//! A [`Host`] supplies the primitives generated bindings are built on:
//! reading the current call's input, allocating and reading buffers behind
//! opaque [`Handle`]s, handing the output over, reporting errors and logs,
//! and invoking host functions by name.
//!
//! Two implementations exist: the Extism kernel imports when compiled for
//! `wasm32` (see `kernel`), and the in-process emulator in
//! `pdk-bindings-host` used for tests and the CLI harness.

use pdk_bindings_common::{HostError, LogLevel};

use crate::Handle;

/// Primitives the host provides to the guest.
///
/// All methods take `&self`: calls are strictly sequential within an
/// invocation, and implementations keep whatever state they need behind
/// interior mutability.
pub trait Host {
    /// Bytes of the current call's input.
    ///
    /// Empty when the host passed no input.
    fn input(&self) -> Vec<u8>;

    /// Allocate a host buffer holding `bytes` and return its handle.
    ///
    /// The caller owns the returned handle and must either [`free`](Host::free)
    /// it or transfer it with [`set_output`](Host::set_output).
    fn alloc(&self, bytes: &[u8]) -> Result<Handle, HostError>;

    /// Copy the contents of the buffer behind `handle`.
    fn load(&self, handle: Handle) -> Result<Vec<u8>, HostError>;

    /// Release the buffer behind `handle`.
    ///
    /// Freeing the null handle or an unknown handle is a no-op.
    fn free(&self, handle: Handle);

    /// Hand the buffer behind `handle` to the host as the call's output.
    ///
    /// On success the host owns the handle. On failure ownership stays with
    /// the caller.
    fn set_output(&self, handle: Handle) -> Result<(), HostError>;

    /// Attach a human-readable error message to the current call.
    fn set_error(&self, message: &str);

    /// Emit a message on the host's diagnostics channel.
    fn log(&self, level: LogLevel, message: &str);

    /// Invoke the host function `function` with the buffer behind `input`.
    ///
    /// Returns the handle of the host-allocated result, owned by the caller,
    /// or [`Handle::NULL`] if the host produced nothing.
    fn call(&self, function: &str, input: Handle) -> Handle;

    /// Invoke a host function that returns nothing.
    fn call_void(&self, function: &str, input: Handle);
}

impl<H: Host + ?Sized> Host for &H {
    fn input(&self) -> Vec<u8> {
        (**self).input()
    }

    fn alloc(&self, bytes: &[u8]) -> Result<Handle, HostError> {
        (**self).alloc(bytes)
    }

    fn load(&self, handle: Handle) -> Result<Vec<u8>, HostError> {
        (**self).load(handle)
    }

    fn free(&self, handle: Handle) {
        (**self).free(handle);
    }

    fn set_output(&self, handle: Handle) -> Result<(), HostError> {
        (**self).set_output(handle)
    }

    fn set_error(&self, message: &str) {
        (**self).set_error(message);
    }

    fn log(&self, level: LogLevel, message: &str) {
        (**self).log(level, message);
    }

    fn call(&self, function: &str, input: Handle) -> Handle {
        (**self).call(function, input)
    }

    fn call_void(&self, function: &str, input: Handle) {
        (**self).call_void(function, input);
    }
}

//! Export dispatcher.
//!
//! Wraps a typed implementation function so the host can call it through the
//! `() -> i32` export ABI. Each phase is bracketed by a debug line on the
//! host's diagnostics channel, and every failure is written to the host's
//! error channel before its status code is returned.
//!
//! The three helpers cover the shapes generated bindings need:
//! - [`export_fallible`]: `fn(I) -> Option<O>`
//! - [`export_total`]: `fn(I) -> O`
//! - [`export_unit`]: `fn()`

use serde::Serialize;
use serde::de::DeserializeOwned;

use pdk_bindings_common::{ExportError, ExportStatus, LogLevel};

use crate::{Host, OwnedHandle, codec};

/// A single in-flight export call.
pub struct ExportCall<'h, H: Host + ?Sized> {
    host: &'h H,
    name: &'static str,
}

impl<'h, H: Host + ?Sized> ExportCall<'h, H> {
    /// Begin serving the export `name`.
    pub fn new(host: &'h H, name: &'static str) -> Self {
        Self { host, name }
    }

    fn debug(&self, phase: &str) {
        self.host
            .log(LogLevel::Debug, &format!("{}: {phase}", self.name));
    }

    /// Read and decode the call's input.
    ///
    /// An empty input is rejected before any decoding is attempted.
    pub fn input<T: DeserializeOwned>(&self) -> Result<T, ExportError> {
        self.debug("getting JSON input");
        let bytes = self.host.input();
        if bytes.is_empty() {
            return Err(ExportError::EmptyInput);
        }
        codec::decode(&bytes).map_err(ExportError::Decode)
    }

    /// Run the implementation function.
    pub fn invoke<R>(&self, f: impl FnOnce() -> R) -> R {
        self.debug("calling implementation function");
        f()
    }

    /// Encode `value` and hand it to the host as the call's output.
    pub fn output<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), ExportError> {
        self.debug("setting JSON output");
        let bytes = codec::encode(value).map_err(ExportError::Encode)?;
        OwnedHandle::stage(self.host, &bytes)?.into_output()?;
        Ok(())
    }

    /// Report the outcome to the host and produce the status code.
    pub fn finish(self, result: Result<(), ExportError>) -> i32 {
        let status = match result {
            Ok(()) => ExportStatus::Success,
            Err(err) => {
                self.host.set_error(&err.to_string());
                err.status()
            }
        };
        self.debug("returning");
        status.code()
    }
}

/// Serve an export whose implementation may produce no result.
pub fn export_fallible<H, I, O, F>(host: &H, name: &'static str, f: F) -> i32
where
    H: Host + ?Sized,
    I: DeserializeOwned,
    O: Serialize,
    F: FnOnce(I) -> Option<O>,
{
    let call = ExportCall::new(host, name);
    let result = run_fallible(&call, f);
    call.finish(result)
}

fn run_fallible<H, I, O, F>(call: &ExportCall<'_, H>, f: F) -> Result<(), ExportError>
where
    H: Host + ?Sized,
    I: DeserializeOwned,
    O: Serialize,
    F: FnOnce(I) -> Option<O>,
{
    let input = call.input::<I>()?;
    let output = call.invoke(|| f(input)).ok_or(ExportError::NoResult)?;
    call.output(&output)
}

/// Serve an export whose implementation always produces a result.
pub fn export_total<H, I, O, F>(host: &H, name: &'static str, f: F) -> i32
where
    H: Host + ?Sized,
    I: DeserializeOwned,
    O: Serialize,
    F: FnOnce(I) -> O,
{
    export_fallible(host, name, |input| Some(f(input)))
}

/// Serve an export that takes no input and returns nothing.
pub fn export_unit<H, F>(host: &H, name: &'static str, f: F) -> i32
where
    H: Host + ?Sized,
    F: FnOnce(),
{
    let call = ExportCall::new(host, name);
    call.invoke(f);
    call.finish(Ok(()))
}

//! In-process emulated host for exercising plugin bindings.
//!
//! This crate provides a [`MemoryHost`] that implements the guest-facing
//! [`Host`](pdk_bindings_core::Host) trait without a WebAssembly runtime, so
//! generated exports can be driven directly from tests and the CLI harness.
//!
//! # Components
//!
//! - [`memory`]: Handle table with size and count limits
//! - [`context`]: Per-call state (input, output, error, captured logs)
//! - [`functions`]: Registry of host functions callable by name
//! - [`logging`]: Guest log capture, re-emitted through `tracing`

pub mod context;
pub mod functions;
pub mod logging;
pub mod memory;

mod host;

pub use context::{CallContext, CallOutcome, LogEntry};
pub use functions::{HostFunctions, HostState};
pub use host::MemoryHost;
pub use logging::LoggingHost;
pub use memory::HandleTable;

//! Marshalling layer for plugin exports and host imports.
//!
//! This crate provides everything generated bindings need to cross the
//! guest/host boundary:
//! - [`Host`]: Memory, handle, diagnostics and import primitives supplied by the host
//! - [`Handle`] / [`OwnedHandle`]: Opaque buffer references with release-on-drop
//! - [`codec`]: JSON wire encoding
//! - [`WireEnum`] / [`wire_enum!`]: Enum name tables checked at compile time
//! - [`export`]: Export dispatcher mapping failures to status codes
//! - [`ImportProxy`]: Typed calls into host functions
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                        Host                             │
//! │  input / output / error / log / call-by-name            │
//! └─────────────────────────────────────────────────────────┘
//!            │ export call                 ▲ import call
//!            ▼                             │
//! ┌──────────────────────────┐  ┌──────────────────────────┐
//! │       ExportCall         │  │       ImportProxy        │
//! │  decode → impl → encode  │  │  stage → call → decode   │
//! └──────────────────────────┘  └──────────────────────────┘
//!            │                             ▲
//!            ▼                             │
//! ┌─────────────────────────────────────────────────────────┐
//! │                 Implementation layer                    │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod codec;
pub mod export;
pub mod handle;
pub mod host;
pub mod import;
#[cfg(target_arch = "wasm32")]
pub mod kernel;
pub mod wire_enum;

pub use export::ExportCall;
pub use handle::{Handle, OwnedHandle};
pub use host::Host;
pub use import::ImportProxy;
pub use wire_enum::{UnknownVariant, WireEnum};

#[doc(hidden)]
pub mod __private {
    pub use serde;
}

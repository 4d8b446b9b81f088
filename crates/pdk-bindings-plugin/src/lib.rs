//! Generated bindings and stub implementation for the test plugin schema.
//!
//! The schema declares three exports and three host imports:
//!
//! | Export | Input | Output |
//! |---|---|---|
//! | `referenceTypes` | [`Fruit`] | [`ComplexObject`] |
//! | `topLevelPrimitives` | string | `[bool; 2]` |
//! | `voidFunc` | none | none |
//!
//! | Import | Argument | Result |
//! |---|---|---|
//! | `eatAFruit` | [`Fruit`] (bare name) | bool |
//! | `kv_read` | key (raw string) | raw bytes |
//! | `kv_write` | [`WriteParams`] | none |
//!
//! [`exports`] and [`imports`] are the marshalling layer; [`Plugin`] is the
//! implementation layer, with [`Stubs`] as the hand-written implementation.

pub mod exports;
pub mod imports;
pub mod plugin;
pub mod types;
#[cfg(target_arch = "wasm32")]
mod wasm;

pub use imports::Imports;
pub use plugin::{Plugin, Stubs};
pub use types::{ComplexObject, Fruit, GhostGang, WriteParams};

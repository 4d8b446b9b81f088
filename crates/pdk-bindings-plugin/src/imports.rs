//! Typed wrappers around the host functions the schema imports.

use pdk_bindings_common::ImportError;
use pdk_bindings_core::import::{enum_argument, json_argument};
use pdk_bindings_core::{Host, ImportProxy};

use crate::types::{Fruit, WriteParams};

/// Import names, as resolved by the host.
pub mod names {
    pub const EAT_A_FRUIT: &str = "eatAFruit";
    pub const KV_READ: &str = "kv_read";
    pub const KV_WRITE: &str = "kv_write";
}

/// Host functions available to the implementation layer.
pub struct Imports<'h, H: Host + ?Sized> {
    proxy: ImportProxy<'h, H>,
}

impl<'h, H: Host + ?Sized> Imports<'h, H> {
    /// Bind the imports to `host`.
    pub fn new(host: &'h H) -> Self {
        Self {
            proxy: ImportProxy::new(host),
        }
    }

    /// Eat a fruit.
    ///
    /// Host functions only take and return a single handle; the fruit is
    /// sent as its bare name and the answer comes back as a JSON `bool`.
    pub fn eat_a_fruit(&self, input: Fruit) -> Result<bool, ImportError> {
        self.proxy.call_json(names::EAT_A_FRUIT, enum_argument(input))
    }

    /// Read the raw bytes stored at `key`.
    pub fn kv_read(&self, key: &str) -> Result<Vec<u8>, ImportError> {
        self.proxy.call_bytes(names::KV_READ, key.as_bytes())
    }

    /// Write a value to the kv store.
    pub fn kv_write(&self, input: &WriteParams) -> Result<(), ImportError> {
        let argument = json_argument(names::KV_WRITE, input)?;
        self.proxy.call_void(names::KV_WRITE, &argument)
    }
}

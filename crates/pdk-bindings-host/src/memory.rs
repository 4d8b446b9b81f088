//! Handle table backing the emulated host's memory.
//!
//! Buffers live in a map keyed by handle. Handle values start at 1 and are
//! never reused within a table, so a stale handle can never alias a newer
//! buffer.

use std::collections::HashMap;

use pdk_bindings_common::{HostConfig, HostError};
use pdk_bindings_core::Handle;

/// Live buffers, keyed by handle.
#[derive(Debug)]
pub struct HandleTable {
    buffers: HashMap<u64, Vec<u8>>,
    next: u64,
    max_buffer_bytes: usize,
    max_live_handles: usize,
}

impl HandleTable {
    /// Create an empty table with the limits from `config`.
    pub fn new(config: &HostConfig) -> Self {
        Self {
            buffers: HashMap::new(),
            next: 1,
            max_buffer_bytes: config.max_buffer_bytes,
            max_live_handles: config.max_live_handles,
        }
    }

    /// Store a copy of `bytes` and return its handle.
    pub fn alloc(&mut self, bytes: &[u8]) -> Result<Handle, HostError> {
        if bytes.len() > self.max_buffer_bytes {
            return Err(HostError::BufferTooLarge {
                requested: bytes.len(),
                limit: self.max_buffer_bytes,
            });
        }
        if self.buffers.len() >= self.max_live_handles {
            return Err(HostError::HandleLimit {
                limit: self.max_live_handles,
            });
        }

        let raw = self.next;
        self.next += 1;
        self.buffers.insert(raw, bytes.to_vec());
        Ok(Handle::from_raw(raw))
    }

    /// Copy the buffer behind `handle`.
    pub fn load(&self, handle: Handle) -> Result<Vec<u8>, HostError> {
        self.buffers
            .get(&handle.raw())
            .cloned()
            .ok_or(HostError::UnknownHandle {
                handle: handle.raw(),
            })
    }

    /// Remove and return the buffer behind `handle`.
    pub fn take(&mut self, handle: Handle) -> Result<Vec<u8>, HostError> {
        self.buffers
            .remove(&handle.raw())
            .ok_or(HostError::UnknownHandle {
                handle: handle.raw(),
            })
    }

    /// Release the buffer behind `handle`; returns `false` if it was not live.
    pub fn free(&mut self, handle: Handle) -> bool {
        self.buffers.remove(&handle.raw()).is_some()
    }

    /// Number of live buffers.
    pub fn live(&self) -> usize {
        self.buffers.len()
    }

    /// Total bytes held by live buffers.
    pub fn live_bytes(&self) -> usize {
        self.buffers.values().map(Vec::len).sum()
    }
}

//! Opaque buffer handles.
//!
//! A [`Handle`] is an integer key into host-owned memory, never a native
//! pointer. [`OwnedHandle`] ties a handle to the host that issued it and
//! releases the buffer when dropped, so every exit path, including early
//! returns on error, frees what was allocated.

use std::fmt;
use std::mem::ManuallyDrop;

use pdk_bindings_common::HostError;

use crate::Host;

/// Opaque reference to a host buffer.
///
/// The zero value is the null handle, used by the host to signal "nothing".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Handle(u64);

impl Handle {
    /// The null handle.
    pub const NULL: Handle = Handle(0);

    /// Wrap a raw value received across the boundary.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw value passed across the boundary.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Returns `true` for the null handle.
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<Handle> for u64 {
    fn from(handle: Handle) -> Self {
        handle.0
    }
}

/// A handle the guest exclusively owns.
///
/// Dropping it frees the buffer. Ownership leaves the guest only through
/// [`into_output`](OwnedHandle::into_output) or [`into_raw`](OwnedHandle::into_raw).
pub struct OwnedHandle<'h, H: Host + ?Sized> {
    host: &'h H,
    handle: Handle,
}

impl<'h, H: Host + ?Sized> OwnedHandle<'h, H> {
    /// Allocate a host buffer holding `bytes`.
    pub fn stage(host: &'h H, bytes: &[u8]) -> Result<Self, HostError> {
        let handle = host.alloc(bytes)?;
        Ok(Self { host, handle })
    }

    /// Take ownership of a handle the host returned.
    ///
    /// Returns `None` for the null handle.
    pub fn adopt(host: &'h H, handle: Handle) -> Option<Self> {
        (!handle.is_null()).then_some(Self { host, handle })
    }

    /// The underlying handle, still owned by `self`.
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Copy the buffer contents.
    pub fn bytes(&self) -> Result<Vec<u8>, HostError> {
        self.host.load(self.handle)
    }

    /// Hand the buffer to the host as the call's output.
    ///
    /// If the host rejects it, the buffer is freed before returning.
    pub fn into_output(self) -> Result<(), HostError> {
        self.host.set_output(self.handle)?;
        self.into_raw();
        Ok(())
    }

    /// Give up ownership without freeing.
    pub fn into_raw(self) -> Handle {
        ManuallyDrop::new(self).handle
    }
}

impl<H: Host + ?Sized> Drop for OwnedHandle<'_, H> {
    fn drop(&mut self) {
        self.host.free(self.handle);
    }
}

impl<H: Host + ?Sized> fmt::Debug for OwnedHandle<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OwnedHandle").field(&self.handle).finish()
    }
}

//! Import proxy.
//!
//! Typed calls from implementation code into host functions. The proxy stages
//! the argument in a guest-owned buffer, calls the host by name, and turns the
//! three possible host behaviors into distinct results:
//!
//! | Host returns | Result |
//! |---|---|
//! | non-null handle, decodable payload | `Ok(value)` |
//! | null handle | [`ImportError::HostReturnedNothing`] |
//! | non-null handle, empty or undecodable payload | [`ImportError::HostReturnedUnparseable`] |
//!
//! Staging failures surface as [`ImportError::Boundary`] and the host is not
//! called at all.

use serde::Serialize;
use serde::de::DeserializeOwned;

use pdk_bindings_common::{CodecError, ImportError};

use crate::{Host, OwnedHandle, WireEnum, codec};

/// Typed access to host functions.
pub struct ImportProxy<'h, H: Host + ?Sized> {
    host: &'h H,
}

impl<'h, H: Host + ?Sized> ImportProxy<'h, H> {
    /// Create a proxy over `host`.
    pub fn new(host: &'h H) -> Self {
        Self { host }
    }

    fn stage(&self, function: &str, argument: &[u8]) -> Result<OwnedHandle<'h, H>, ImportError> {
        OwnedHandle::stage(self.host, argument).map_err(|e| ImportError::boundary(function, e))
    }

    /// Call `function` and return its raw result bytes.
    ///
    /// The payload is returned as-is; an empty payload is not an error here.
    pub fn call_bytes(&self, function: &str, argument: &[u8]) -> Result<Vec<u8>, ImportError> {
        let input = self.stage(function, argument)?;
        let raw = self.host.call(function, input.handle());
        drop(input);

        let output = OwnedHandle::adopt(self.host, raw)
            .ok_or_else(|| ImportError::host_returned_nothing(function))?;
        output.bytes().map_err(|e| {
            ImportError::host_returned_unparseable(function, CodecError::malformed(e.to_string()))
        })
    }

    /// Call `function` and decode its JSON result.
    pub fn call_json<T: DeserializeOwned>(
        &self,
        function: &str,
        argument: &[u8],
    ) -> Result<T, ImportError> {
        let bytes = self.call_bytes(function, argument)?;
        codec::decode(&bytes).map_err(|e| ImportError::host_returned_unparseable(function, e))
    }

    /// Call a host function that returns nothing.
    ///
    /// Only staging can fail; the host call itself is fire-and-forget.
    pub fn call_void(&self, function: &str, argument: &[u8]) -> Result<(), ImportError> {
        let input = self.stage(function, argument)?;
        self.host.call_void(function, input.handle());
        Ok(())
    }
}

/// Encode a record argument as JSON.
///
/// A serialization failure is a staging failure: the host is never called.
pub fn json_argument<T: Serialize + ?Sized>(
    function: &str,
    value: &T,
) -> Result<Vec<u8>, ImportError> {
    codec::encode(value).map_err(|e| ImportError::Encode {
        function: function.to_string(),
        source: e,
    })
}

/// Encode an enum argument as its bare wire name.
pub fn enum_argument<E: WireEnum>(value: E) -> &'static [u8] {
    value.name().as_bytes()
}

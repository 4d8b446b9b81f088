//! Error types for pdk-bindings.
//!
//! This module defines the error taxonomy of the plugin boundary using `thiserror`:
//! - [`ExportError`]: Failures of an exported function, each mapped to a status code
//! - [`ImportError`]: Failures of a guest call into a host function
//! - [`HostError`]: Failures of the host's memory and handle primitives
//! - [`CodecError`]: JSON encode/decode failures

use thiserror::Error;

use crate::ExportStatus;

/// Errors raised while serving an exported function.
///
/// None of these are retried. The dispatcher writes the message to the
/// host's error channel and returns [`ExportError::status`].
#[derive(Error, Debug)]
pub enum ExportError {
    /// The function expects input but none was provided.
    #[error("0 length input cannot be json")]
    EmptyInput,

    /// The input did not decode as the expected type.
    #[error("failed to decode input: {0}")]
    Decode(#[source] CodecError),

    /// The implementation returned no value.
    #[error("implementation returned no result")]
    NoResult,

    /// The result could not be serialized.
    #[error("failed to encode output: {0}")]
    Encode(#[source] CodecError),

    /// The serialized result could not be handed to the host.
    #[error("outputting failed: {0}")]
    OutputTransfer(#[from] HostError),
}

impl ExportError {
    /// The status code reported to the host for this error.
    pub fn status(&self) -> ExportStatus {
        match self {
            Self::EmptyInput => ExportStatus::EmptyInput,
            Self::Decode(_) => ExportStatus::DecodeFailure,
            Self::NoResult => ExportStatus::NoResult,
            Self::Encode(_) | Self::OutputTransfer(_) => ExportStatus::OutputFailure,
        }
    }
}

/// Errors returned to implementation code calling a host function.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The argument could not be staged for transfer; the host was not called.
    #[error("failed to stage argument for '{function}': {source}")]
    Boundary {
        /// Name of the host function.
        function: String,
        /// The underlying primitive failure.
        #[source]
        source: HostError,
    },

    /// The argument could not be serialized; the host was not called.
    #[error("failed to encode argument for '{function}': {source}")]
    Encode {
        /// Name of the host function.
        function: String,
        /// The serializer failure.
        #[source]
        source: CodecError,
    },

    /// The host function returned a null handle.
    #[error("host function '{function}' returned nothing")]
    HostReturnedNothing {
        /// Name of the host function.
        function: String,
    },

    /// The host function returned a payload that is empty or does not decode.
    #[error("host function '{function}' returned an unparseable result: {source}")]
    HostReturnedUnparseable {
        /// Name of the host function.
        function: String,
        /// Why decoding failed.
        #[source]
        source: CodecError,
    },
}

impl ImportError {
    /// Create a new `Boundary` error.
    pub fn boundary(function: impl Into<String>, source: HostError) -> Self {
        Self::Boundary {
            function: function.into(),
            source,
        }
    }

    /// Create a new `HostReturnedNothing` error.
    pub fn host_returned_nothing(function: impl Into<String>) -> Self {
        Self::HostReturnedNothing {
            function: function.into(),
        }
    }

    /// Create a new `HostReturnedUnparseable` error.
    pub fn host_returned_unparseable(function: impl Into<String>, source: CodecError) -> Self {
        Self::HostReturnedUnparseable {
            function: function.into(),
            source,
        }
    }

    /// Name of the host function that failed.
    pub fn function(&self) -> &str {
        match self {
            Self::Boundary { function, .. }
            | Self::Encode { function, .. }
            | Self::HostReturnedNothing { function }
            | Self::HostReturnedUnparseable { function, .. } => function,
        }
    }

    /// Returns `true` if the failure happened before the boundary was crossed.
    pub fn is_boundary(&self) -> bool {
        matches!(self, Self::Boundary { .. } | Self::Encode { .. })
    }

    /// Returns `true` if the host returned a null handle.
    pub fn is_nothing(&self) -> bool {
        matches!(self, Self::HostReturnedNothing { .. })
    }

    /// Returns `true` if the host returned something that did not decode.
    pub fn is_unparseable(&self) -> bool {
        matches!(self, Self::HostReturnedUnparseable { .. })
    }
}

/// Failures of the host's memory and handle primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The host could not allocate a buffer.
    #[error("allocation of {requested} bytes failed")]
    AllocationFailed {
        /// Size of the requested buffer.
        requested: usize,
    },

    /// The buffer exceeds the configured size limit.
    #[error("buffer of {requested} bytes exceeds limit of {limit} bytes")]
    BufferTooLarge {
        /// Size of the requested buffer.
        requested: usize,
        /// Configured limit in bytes.
        limit: usize,
    },

    /// Too many buffers are alive at once.
    #[error("live handle limit of {limit} reached")]
    HandleLimit {
        /// Configured limit on live handles.
        limit: usize,
    },

    /// The handle does not refer to a live buffer.
    #[error("unknown handle: {handle:#x}")]
    UnknownHandle {
        /// The raw handle value.
        handle: u64,
    },

    /// The host refused to take the output buffer.
    #[error("output rejected: {reason}")]
    OutputRejected {
        /// Description of why the output was rejected.
        reason: String,
    },
}

/// JSON encode/decode failures.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The buffer was empty, so it cannot hold a JSON value.
    #[error("empty buffer")]
    Empty,

    /// The buffer is not valid JSON for the expected type.
    #[error("malformed payload: {reason}")]
    Malformed {
        /// Parser message.
        reason: String,
    },

    /// The value could not be serialized.
    #[error("serialization failed: {reason}")]
    Serialize {
        /// Serializer message.
        reason: String,
    },
}

impl CodecError {
    /// Create a new `Malformed` error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }

    /// Create a new `Serialize` error.
    pub fn serialize(reason: impl Into<String>) -> Self {
        Self::Serialize {
            reason: reason.into(),
        }
    }
}

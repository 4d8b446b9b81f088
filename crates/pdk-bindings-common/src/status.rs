//! Status codes returned by exported functions.
//!
//! Every exported function returns an `i32` to the host. Zero means the output
//! handle (if the function has a return type) is populated; every failure kind
//! has its own stable negative code so the host can tell causes apart without
//! parsing the error message.

use std::fmt;

/// Status reported by an exported function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ExportStatus {
    /// The call completed and the output, if any, was handed to the host.
    Success = 0,
    /// The function expects input but the input buffer was empty.
    EmptyInput = -1,
    /// The implementation produced no result.
    NoResult = -2,
    /// The result could not be encoded or handed to the host.
    OutputFailure = -3,
    /// The input buffer did not decode as the expected type.
    DecodeFailure = -4,
}

impl ExportStatus {
    /// All status values, in code order from success downwards.
    pub const ALL: [ExportStatus; 5] = [
        ExportStatus::Success,
        ExportStatus::EmptyInput,
        ExportStatus::NoResult,
        ExportStatus::OutputFailure,
        ExportStatus::DecodeFailure,
    ];

    /// The raw code passed across the boundary.
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Map a raw code back to a status, if it is one we define.
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }

    /// Returns `true` for [`ExportStatus::Success`].
    pub const fn is_success(self) -> bool {
        matches!(self, ExportStatus::Success)
    }

    /// Short stable name, used in logs and by the CLI.
    pub const fn as_str(self) -> &'static str {
        match self {
            ExportStatus::Success => "success",
            ExportStatus::EmptyInput => "empty-input",
            ExportStatus::NoResult => "no-result",
            ExportStatus::OutputFailure => "output-failure",
            ExportStatus::DecodeFailure => "decode-failure",
        }
    }
}

impl fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.code())
    }
}

impl From<ExportStatus> for i32 {
    fn from(status: ExportStatus) -> Self {
        status.code()
    }
}

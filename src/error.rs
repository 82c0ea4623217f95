// src/error.rs

use std::fmt;

/// Custom `Error` type for buffer storage and configuration failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The allocation strategy could not provide a block of `requested` elements.
    OutOfMemory { requested: usize },
    /// A capacity computation overflowed or exceeded the strategy's element limit.
    CapacityOverflow,
    /// Configuration could not be read, parsed or validated.
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfMemory { requested } => {
                write!(f, "Out of memory allocating {} elements", requested)
            }
            Error::CapacityOverflow => write!(f, "Capacity overflow"),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::collections::TryReserveError> for Error {
    fn from(_: std::collections::TryReserveError) -> Self {
        Error::CapacityOverflow
    }
}

impl Error {
    /// Maps the `Error` to a stable numeric code.
    pub fn kind_code(&self) -> u32 {
        match self {
            Error::OutOfMemory { .. } => 1,
            Error::CapacityOverflow => 2,
            Error::Config(_) => 3,
        }
    }

    pub fn is_out_of_memory(&self) -> bool {
        matches!(self, Error::OutOfMemory { .. })
    }
}

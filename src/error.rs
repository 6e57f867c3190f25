//! Unified error type for the LED driver.
//!
//! One `Error` enum that every layer funnels into. All variants are `Copy`
//! so they can be handed back through the front-ends without allocation.
//!
//! Propagation:
//! - [`Error::UnknownColorLabel`] is local to one LED node; sibling nodes
//!   still attach.
//! - [`Error::RegionUnavailable`] aborts the whole driver instance.
//! - [`Error::InvalidCommand`] and [`Error::TransferFault`] are per call and
//!   leave the LED state untouched.

use core::fmt;

use crate::config::ConfigError;

// ---------------------------------------------------------------------------
// Top-level driver error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A node's label names a colour outside the fixed red/green/blue set.
    UnknownColorLabel,
    /// The GPIO register block could not be mapped (carries errno, or 0
    /// when the region is too small to hold the LED registers).
    RegionUnavailable(i32),
    /// Text protocol input was neither `on` nor `off`.
    InvalidCommand,
    /// Bytes could not be moved to or from the caller's buffer.
    TransferFault,
    /// Board description or trigger name is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownColorLabel => write!(f, "unknown colour label"),
            Self::RegionUnavailable(0) => write!(f, "register region unavailable"),
            Self::RegionUnavailable(errno) => {
                write!(f, "register region unavailable (errno={})", errno)
            }
            Self::InvalidCommand => write!(f, "invalid command"),
            Self::TransferFault => write!(f, "transfer fault"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Parse => Self::Config("board description could not be parsed"),
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
        }
    }
}

impl From<Error> for std::io::Error {
    fn from(e: Error) -> Self {
        let kind = match e {
            Error::InvalidCommand | Error::UnknownColorLabel | Error::Config(_) => {
                std::io::ErrorKind::InvalidInput
            }
            Error::RegionUnavailable(errno) if errno != 0 => {
                return std::io::Error::from_raw_os_error(errno);
            }
            Error::RegionUnavailable(_) | Error::TransferFault => std::io::ErrorKind::Other,
        };
        std::io::Error::new(kind, e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

//! Error types for diettrack.
//!
//! Every crate in the workspace reports failures through the single
//! `thiserror`-derived [`Error`] enum defined here.  Argument checks use the
//! [`ensure!`](crate::ensure) and [`fail!`](crate::fail) macros.
//!
//! "Not enough data to compare" is not an error: pattern
//! detectors report it as an undetected result carrying a reason.

use thiserror::Error;

/// The top-level error type used throughout diettrack.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// General runtime error (see [`fail!`](crate::fail)).
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated (see [`ensure!`](crate::ensure)).
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// A malformed or missing field in an input record.
    #[error("invalid record at position {index}: {message}")]
    Validation {
        /// Zero-based position of the offending record in its input sequence.
        index: usize,
        /// What is wrong with the record.
        message: String,
    },

    /// A value (typically a calendar year) lies outside the supported span.
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// Date construction, parsing or arithmetic error.
    #[error("date error: {0}")]
    Date(String),

    /// Invalid numeric argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A second record was offered for a date that already has one.
    #[error("duplicate record: {0}")]
    DuplicateRecord(String),

    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build a [`Error::Validation`] for the record at `index`.
    pub fn validation(index: usize, message: impl Into<String>) -> Self {
        Error::Validation {
            index,
            message: message.into(),
        }
    }
}

/// Shorthand `Result` type used throughout diettrack.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use dt_core::{ensure, errors::Error};
/// fn lookback(days: u32) -> dt_core::errors::Result<u32> {
///     ensure!(days > 0, "lookback must be at least one day, got {days}");
///     Ok(days)
/// }
/// assert!(lookback(30).is_ok());
/// assert!(matches!(lookback(0), Err(Error::Precondition(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use dt_core::{fail, errors::Error};
/// fn always_err() -> dt_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}

//! Connection errors.
//!
//! Embedded network stacks usually report the outcome of `connect` as a small integer: `1` on
//! success, `0` for an unspecified failure and a negative code for the well-known ones.
//! [`ConnectError`] gives those codes names while keeping the raw value reachable through
//! [`ConnectError::code`], so a driver can map its status with [`ConnectError::from_status`] and
//! a caller that logs numeric codes still gets the original number back.

use thiserror::Error;

/// Reasons a [`Client::connect`](crate::Client::connect) call can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectError {
    /// The transport refused or failed without giving a reason (status `0`).
    #[error("connection failed")]
    Failed,

    /// The remote end did not answer in time (status `-1`).
    #[error("connection timed out")]
    TimedOut,

    /// The host could not be resolved or is not a valid server (status `-2`).
    #[error("invalid server")]
    InvalidServer,

    /// The exchange was cut short (status `-3`).
    #[error("connection truncated")]
    Truncated,

    /// The remote end answered with something unexpected (status `-4`).
    #[error("invalid response")]
    InvalidResponse,

    /// A transport-specific negative status with no well-known meaning.
    #[error("connection failed with status {0}")]
    Other(i32),
}

impl ConnectError {
    /// Maps a raw connect status to a result.
    ///
    /// Any positive status is success.
    ///
    /// # Examples
    ///
    /// ```
    /// # use stream_adapters::ConnectError;
    /// assert_eq!(ConnectError::from_status(1), Ok(()));
    /// assert_eq!(ConnectError::from_status(-1), Err(ConnectError::TimedOut));
    /// assert_eq!(ConnectError::from_status(-42), Err(ConnectError::Other(-42)));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns the matching [`ConnectError`] when `status` is zero or negative.
    pub const fn from_status(status: i32) -> Result<(), Self> {
        match status {
            1.. => Ok(()),
            0 => Err(Self::Failed),
            -1 => Err(Self::TimedOut),
            -2 => Err(Self::InvalidServer),
            -3 => Err(Self::Truncated),
            -4 => Err(Self::InvalidResponse),
            other => Err(Self::Other(other)),
        }
    }

    /// Returns the raw status code this error stands for.
    ///
    /// ```
    /// # use stream_adapters::ConnectError;
    /// assert_eq!(ConnectError::Truncated.code(), -3);
    /// assert_eq!(ConnectError::Other(-7).code(), -7);
    /// ```
    pub const fn code(&self) -> i32 {
        match self {
            Self::Failed => 0,
            Self::TimedOut => -1,
            Self::InvalidServer => -2,
            Self::Truncated => -3,
            Self::InvalidResponse => -4,
            Self::Other(code) => *code,
        }
    }
}

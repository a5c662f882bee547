//! Error type shared by destructors, closers and reapers
//!
//! Every fallible operation in this crate reports an [`Error`]. Construction-time
//! failures (`InvalidArgument`, `IllegalState`, `NilReceiver`) come back to the
//! immediate caller. Failures raised while running destructors are never dropped:
//! they are folded into an [`AggregateError`](crate::AggregateError), and a panic
//! caught at a reaping boundary becomes a [`PanicError`](crate::PanicError).
//!
//! # Examples
//!
//! ```
//! use ebb::{Error, ErrorKind};
//!
//! let err = Error::msg("connection reset");
//! assert_eq!(err.kind(), ErrorKind::Custom);
//! assert_eq!(err.to_string(), "connection reset");
//!
//! let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
//! let err = Error::from(io);
//! assert_eq!(err.kind(), ErrorKind::Custom);
//! ```

use std::error::Error as StdError;
use std::fmt;

use crate::aggregate::AggregateError;
use crate::fatal::PanicError;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Classification of an [`Error`], independent of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An empty destructor was offered to a reaper.
    InvalidArgument,
    /// A reaper was used after its one-shot transition.
    IllegalState,
    /// A mutating operation was invoked on an absent reaper.
    NilReceiver,
    /// One or more destructors failed while reaping.
    Aggregate,
    /// A panic was caught and converted into an error.
    Panicked,
    /// A failure reported by a collaborator's own cleanup action.
    Custom,
}

/// Errors reported by destructors and reapers.
#[derive(Debug)]
pub enum Error {
    /// An empty destructor was offered to [`Reaper::assume_boxed`](crate::Reaper::assume_boxed).
    InvalidArgument(String),
    /// The reaper has already been released or finalized.
    IllegalState(String),
    /// The named operation was invoked on an absent reaper.
    NilReceiver(&'static str),
    /// Failures collected while running a sequence of destructors.
    Aggregate(AggregateError),
    /// A panic caught at a reaping boundary.
    Panicked(PanicError),
    /// A collaborator's own failure.
    Custom(Box<dyn StdError + Send + Sync + 'static>),
}

impl Error {
    /// Create an error from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Error::Custom(message.into().into())
    }

    /// Wrap any error produced by a cleanup action.
    pub fn custom<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Error::Custom(Box::new(error))
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    pub(crate) fn illegal_state(message: impl Into<String>) -> Self {
        Error::IllegalState(message.into())
    }

    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::IllegalState(_) => ErrorKind::IllegalState,
            Error::NilReceiver(_) => ErrorKind::NilReceiver,
            Error::Aggregate(_) => ErrorKind::Aggregate,
            Error::Panicked(_) => ErrorKind::Panicked,
            Error::Custom(_) => ErrorKind::Custom,
        }
    }

    /// Returns the aggregate, if this error came out of reaping.
    pub fn as_aggregate(&self) -> Option<&AggregateError> {
        match self {
            Error::Aggregate(aggregate) => Some(aggregate),
            _ => None,
        }
    }

    /// Returns the caught panic, if this error is one.
    pub fn as_panic(&self) -> Option<&PanicError> {
        match self {
            Error::Panicked(panic) => Some(panic),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(message) => write!(f, "invalid argument: {}", message),
            Error::IllegalState(message) => write!(f, "illegal state: {}", message),
            Error::NilReceiver(operation) => write!(f, "{} called on an absent reaper", operation),
            Error::Aggregate(aggregate) => write!(f, "{}", aggregate),
            Error::Panicked(panic) => write!(f, "{}", panic),
            Error::Custom(error) => write!(f, "{}", error),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Aggregate(aggregate) => aggregate.source(),
            Error::Panicked(panic) => panic.source(),
            Error::Custom(error) => error.source(),
            _ => None,
        }
    }
}

impl From<AggregateError> for Error {
    fn from(aggregate: AggregateError) -> Self {
        Error::Aggregate(aggregate)
    }
}

impl From<PanicError> for Error {
    fn from(panic: PanicError) -> Self {
        Error::Panicked(panic)
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::custom(error)
    }
}

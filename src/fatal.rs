//! Fatal signals and the boundary that converts them back into errors
//!
//! The `must_*` variants in this crate have no error channel, so they raise a
//! panic whose payload is the original [`Error`]. [`catch`] is the matching
//! boundary: it runs a closure and turns any panic into [`Error::Panicked`],
//! keeping the original `Error` when the panic carried one.
//!
//! Catching relies on unwinding; under `panic = "abort"` a fatal signal ends the
//! process.
//!
//! # Examples
//!
//! ```
//! use ebb::{catch, fatal, Error, ErrorKind};
//!
//! let result = catch(|| fatal(Error::msg("lost the lock")));
//!
//! let err = result.unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Panicked);
//! let panic = err.as_panic().unwrap();
//! assert_eq!(panic.error().map(Error::kind), Some(ErrorKind::Custom));
//! assert_eq!(panic.message(), "lost the lock");
//! ```

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::error::Error;

/// A panic caught at a [`catch`] boundary.
#[derive(Debug)]
pub struct PanicError {
    message: String,
    error: Option<Box<Error>>,
}

impl PanicError {
    /// Convert a panic payload.
    ///
    /// An [`Error`] payload (as raised by [`fatal`]) is kept intact; string
    /// payloads become the message.
    pub fn from_payload(payload: Box<dyn Any + Send + 'static>) -> Self {
        let payload = match payload.downcast::<Error>() {
            Ok(error) => {
                return PanicError {
                    message: error.to_string(),
                    error: Some(error),
                }
            }
            Err(payload) => payload,
        };

        let message = if let Some(message) = payload.downcast_ref::<&'static str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            String::from("panic with a non-string payload")
        };

        PanicError {
            message,
            error: None,
        }
    }

    /// The panic message, or the rendered error for an `Error` payload.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The error the panic carried, if it was raised by [`fatal`].
    pub fn error(&self) -> Option<&Error> {
        self.error.as_deref()
    }

    /// Consume the panic and return the error it carried.
    pub fn into_error(self) -> Option<Error> {
        self.error.map(|error| *error)
    }
}

impl fmt::Display for PanicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panicked: {}", self.message)
    }
}

impl StdError for PanicError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.error
            .as_deref()
            .map(|error| error as &(dyn StdError + 'static))
    }
}

/// Raise a fatal signal carrying `error` as the panic payload.
pub fn fatal(error: Error) -> ! {
    panic::panic_any(error)
}

/// Run `f`, converting a panic into [`Error::Panicked`].
pub fn catch<F>(f: F) -> Result<(), Error>
where
    F: FnOnce() -> Result<(), Error>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => Err(Error::Panicked(PanicError::from_payload(payload))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_catch_passes_through_success() {
        assert!(catch(|| Ok(())).is_ok());
    }

    #[test]
    fn test_catch_passes_through_error() {
        let err = catch(|| Err(Error::msg("plain failure"))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Custom);
    }

    #[test]
    fn test_catch_str_panic() {
        let err = catch(|| panic!("boom")).unwrap_err();
        let panic = err.as_panic().unwrap();
        assert_eq!(panic.message(), "boom");
        assert!(panic.error().is_none());
        assert_eq!(err.to_string(), "panicked: boom");
    }

    #[test]
    fn test_catch_formatted_panic() {
        let id = 7;
        let err = catch(|| panic!("destructor {} exploded", id)).unwrap_err();
        assert_eq!(err.as_panic().unwrap().message(), "destructor 7 exploded");
    }

    #[test]
    fn test_catch_fatal_keeps_error() {
        let err = catch(|| fatal(Error::illegal_state("already released"))).unwrap_err();
        let panic = match err {
            Error::Panicked(panic) => panic,
            other => panic!("Expected panicked error, got {:?}", other),
        };
        assert_eq!(panic.error().map(Error::kind), Some(ErrorKind::IllegalState));
        assert!(panic.source().is_some());

        let inner = panic.into_error().unwrap();
        assert_eq!(inner.to_string(), "illegal state: already released");
    }

    #[test]
    fn test_non_string_payload() {
        let err = catch(|| std::panic::panic_any(42_u32)).unwrap_err();
        assert_eq!(
            err.as_panic().unwrap().message(),
            "panic with a non-string payload"
        );
    }
}

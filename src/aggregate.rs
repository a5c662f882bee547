//! Error aggregation for reaping
//!
//! Running a sequence of destructors never stops at the first failure. Each
//! failure is appended to an [`ErrorCollector`], and once every destructor has
//! run the collector either reports success (nothing collected) or hands back a
//! single [`AggregateError`] listing the failures in the order they happened.
//!
//! # Examples
//!
//! ```
//! use ebb::{Error, ErrorCollector};
//!
//! let mut collector = ErrorCollector::new();
//! collector.collect(Ok(()));
//! collector.collect(Err(Error::msg("close failed")));
//! collector.collect(Ok(()));
//!
//! let aggregate = collector.into_result().unwrap_err();
//! assert_eq!(aggregate.len(), 1);
//! assert_eq!(aggregate.errors()[0].to_string(), "close failed");
//! ```

use std::error::Error as StdError;
use std::fmt;

use crate::error::Error;
use crate::semigroup::Semigroup;

/// Zero or more destructor failures collected into one error value.
///
/// Errors keep the order in which they were collected, which for a reaper is
/// the order the destructors ran: last acquired first.
#[derive(Debug, Default)]
pub struct AggregateError {
    errors: Vec<Error>,
}

impl AggregateError {
    /// Create an empty aggregate.
    pub fn new() -> Self {
        AggregateError { errors: Vec::new() }
    }

    /// Append one more failure.
    pub fn push(&mut self, error: Error) {
        self.errors.push(error);
    }

    /// The collected failures.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Number of collected failures.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether nothing has been collected.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterate over the collected failures.
    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.errors.iter()
    }

    /// Consume the aggregate and return the underlying failures.
    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.len() {
            0 => write!(f, "no destructor failed"),
            1 => write!(f, "1 destructor failed: {}", self.errors[0]),
            n => {
                write!(f, "{} destructors failed", n)?;
                for error in &self.errors {
                    write!(f, "\n  -> {}", error)?;
                }
                Ok(())
            }
        }
    }
}

impl StdError for AggregateError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.errors.first().map(|error| error as &(dyn StdError + 'static))
    }
}

impl Semigroup for AggregateError {
    fn combine(mut self, other: Self) -> Self {
        self.errors.extend(other.errors);
        self
    }
}

impl IntoIterator for AggregateError {
    type Item = Error;
    type IntoIter = std::vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a AggregateError {
    type Item = &'a Error;
    type IntoIter = std::slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Growable collector where "nothing collected" means success.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    collected: AggregateError,
}

impl ErrorCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        ErrorCollector {
            collected: AggregateError::new(),
        }
    }

    /// Record the outcome of one step; successes are ignored.
    pub fn collect(&mut self, result: Result<(), Error>) {
        if let Err(error) = result {
            self.collected.push(error);
        }
    }

    /// Whether no failure has been recorded.
    pub fn is_empty(&self) -> bool {
        self.collected.is_empty()
    }

    /// Number of recorded failures.
    pub fn len(&self) -> usize {
        self.collected.len()
    }

    /// Success when nothing was collected, the aggregate otherwise.
    pub fn into_result(self) -> Result<(), AggregateError> {
        if self.collected.is_empty() {
            Ok(())
        } else {
            Err(self.collected)
        }
    }
}

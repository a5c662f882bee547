//! Semigroup trait for merging failure reports
//!
//! Cleanup failures pile up: a composite destructor may fail in several places,
//! and a caller may merge reports from several composites. A Semigroup is a type
//! with an associative `combine`, which is exactly what merging those reports
//! needs.
//!
//! # Laws
//!
//! ```text
//! a.combine(b).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! # Examples
//!
//! ```
//! use ebb::{AggregateError, Error, Semigroup};
//!
//! let mut first = AggregateError::new();
//! first.push(Error::msg("close socket"));
//! let mut second = AggregateError::new();
//! second.push(Error::msg("unlock file"));
//!
//! let merged = first.combine(second);
//! assert_eq!(merged.len(), 2);
//! ```

/// A type that supports an associative binary operation
///
/// `combine` takes both values by value; clone first if the originals are
/// still needed.
pub trait Semigroup: Sized {
    /// Combine this value with another value associatively
    fn combine(self, other: Self) -> Self;
}

impl<T> Semigroup for Vec<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

//! # Ebb
//!
//! > *"What the tide brings in, it carries back out"*
//!
//! A Rust library for deferred, ordered, fault-tolerant cleanup of composite
//! objects.
//!
//! ## Philosophy
//!
//! A constructor that acquires several resources has two ways to end:
//! - **Ebb** = a step fails, and everything acquired so far flows back out, last in first out
//! - **Flow** = every step succeeds, and the caller receives one destructor for the whole object
//!
//! Either way no cleanup failure is lost: every destructor runs, and every
//! failure (panics included) lands in one [`AggregateError`].
//!
//! ## Quick Example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use ebb::{destructor_fn, BoxDestructor, Destructor, Error, Reaper};
//!
//! fn resource(counter: &Rc<Cell<i32>>, value: i32) -> Result<impl Destructor, Error> {
//!     let counter = counter.clone();
//!     Ok(destructor_fn(move || {
//!         counter.set(counter.get() - value);
//!         Ok(())
//!     }))
//! }
//!
//! fn composite(counter: &Rc<Cell<i32>>, fail_at: Option<i32>) -> Result<BoxDestructor, Error> {
//!     let mut reaper = Reaper::new();
//!     for value in 1..=3 {
//!         if fail_at == Some(value) {
//!             reaper.finalize()?;
//!             return Err(Error::msg("acquisition failed"));
//!         }
//!         reaper.assume(resource(counter, value)?)?;
//!     }
//!     reaper.release()
//! }
//!
//! // Success: nothing runs until the caller destroys the composite.
//! let counter = Rc::new(Cell::new(0));
//! let mut dtor = composite(&counter, None).unwrap();
//! assert_eq!(counter.get(), 0);
//! dtor.destroy().unwrap();
//! assert_eq!(counter.get(), -6);
//!
//! // Failure: the first two resources are cleaned up before the error returns.
//! let counter = Rc::new(Cell::new(0));
//! assert!(composite(&counter, Some(3)).is_err());
//! assert_eq!(counter.get(), -3);
//! ```
//!
//! ## Features
//!
//! - `tracing`: structured logs for reaper transitions and destructor failures
//! - `proptest`: `Arbitrary` for [`testing::Outcome`]

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod aggregate;
pub mod closer;
pub mod destructor;
pub mod error;
pub mod fatal;
pub mod reaper;
pub mod semigroup;
pub mod testing;

// Re-exports
pub use aggregate::{AggregateError, ErrorCollector};
pub use closer::{closable, closer_fn, from_closer, Closable, Close, CloserFn, FromCloser};
pub use destructor::{destructor_fn, noop, BoxDestructor, Destructor, DestructorFn, Noop, NOOP};
pub use error::{Error, ErrorKind, Result};
pub use fatal::{catch, fatal, PanicError};
pub use reaper::{MaybeReaper, Reaper, ReaperState};
pub use semigroup::Semigroup;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::aggregate::AggregateError;
    pub use crate::closer::{closable, from_closer, Close};
    pub use crate::destructor::{destructor_fn, BoxDestructor, Destructor, NOOP};
    pub use crate::error::{Error, ErrorKind};
    pub use crate::reaper::{MaybeReaper, Reaper};
}

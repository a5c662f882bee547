//! Deferred, ordered cleanup of composite objects.
//!
//! A [`Reaper`] collects the destructors of the sub-resources a constructor
//! acquires. When construction succeeds the constructor [`release`]s the reaper
//! and hands its caller one combined destructor; when a step fails it
//! [`finalize`]s the reaper, which runs everything assumed so far. Either way
//! destructors run last acquired first, and every failure, panics included,
//! ends up in one [`AggregateError`](crate::AggregateError).
//!
//! [`release`]: Reaper::release
//! [`finalize`]: Reaper::finalize
//!
//! # Lifecycle
//!
//! ```text
//! Accumulating --release()--> Released
//!      |
//!      +-------finalize()---> Finalized
//! ```
//!
//! Both transitions are one-shot. After either one, `assume` and `release`
//! fail with [`Error::IllegalState`]. `finalize` fails only after a previous
//! `finalize`; after `release` it is a no-op, so it can run unconditionally at
//! scope exit.
//!
//! # Examples
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use ebb::{destructor_fn, BoxDestructor, Destructor, Error, Reaper};
//!
//! fn open(log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> impl Destructor {
//!     let log = log.clone();
//!     destructor_fn(move || {
//!         log.borrow_mut().push(name);
//!         Ok(())
//!     })
//! }
//!
//! fn connect(log: &Rc<RefCell<Vec<&'static str>>>) -> Result<BoxDestructor, Error> {
//!     let mut reaper = Reaper::new();
//!     reaper.assume(open(log, "socket"))?;
//!     reaper.assume(open(log, "session"))?;
//!     reaper.release()
//! }
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let mut dtor = connect(&log).unwrap();
//! assert!(log.borrow().is_empty());
//!
//! dtor.destroy().unwrap();
//! assert_eq!(*log.borrow(), vec!["session", "socket"]);
//! ```

mod maybe;
mod reap;

pub use maybe::MaybeReaper;
pub use reap::reap;

use std::fmt;

use crate::destructor::{BoxDestructor, Destructor};
use crate::error::Error;
use crate::fatal::fatal;
use reap::Composite;

const RELEASED: &str = "reaper was already released from responsibility for calling destructors";
const FINALIZED: &str = "reaper has already called destructors";

/// Lifecycle state of a [`Reaper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReaperState {
    /// Destructors may still be assumed.
    Accumulating,
    /// Responsibility was handed to a combined destructor.
    Released,
    /// The reaper ran its destructors itself.
    Finalized,
}

/// Ordered collector of destructors with one-shot release or finalize.
///
/// A reaper dropped while still accumulating finalizes itself. Failures at that
/// point have nowhere to go and are logged, so call [`finalize`](Reaper::finalize)
/// explicitly when the outcome matters. A destructor that panics while the
/// thread is already unwinding aborts the process.
pub struct Reaper {
    destructors: Vec<BoxDestructor>,
    released: bool,
    finalized: bool,
}

impl Reaper {
    /// Create an empty, accumulating reaper.
    pub fn new() -> Self {
        Reaper {
            destructors: Vec::new(),
            released: false,
            finalized: false,
        }
    }

    /// Take responsibility for calling `dtor`.
    pub fn assume<D>(&mut self, dtor: D) -> Result<(), Error>
    where
        D: Destructor + 'static,
    {
        let dtor: BoxDestructor = Box::new(dtor);
        self.assume_boxed(Some(dtor))
    }

    /// Take responsibility for calling an optional destructor.
    ///
    /// `None` is rejected with [`Error::InvalidArgument`] whatever the state of
    /// the reaper. Otherwise fails with [`Error::IllegalState`] once the reaper
    /// has been released or finalized.
    pub fn assume_boxed(&mut self, dtor: Option<BoxDestructor>) -> Result<(), Error> {
        let dtor = dtor.ok_or_else(|| {
            Error::invalid_argument(
                "reaper cannot assume responsibility for calling an empty destructor",
            )
        })?;
        self.ensure_accumulating()?;
        self.destructors.push(dtor);

        #[cfg(feature = "tracing")]
        tracing::trace!(assumed = self.destructors.len(), "reaper assumed destructor");

        Ok(())
    }

    /// Variant of [`assume`](Reaper::assume) that raises a fatal signal on error.
    pub fn must_assume<D>(&mut self, dtor: D)
    where
        D: Destructor + 'static,
    {
        if let Err(err) = self.assume(dtor) {
            fatal(err)
        }
    }

    /// Hand responsibility for the assumed destructors to the caller.
    ///
    /// The returned destructor runs them in reverse order and aggregates their
    /// failures. Nothing runs now.
    pub fn release(&mut self) -> Result<BoxDestructor, Error> {
        self.ensure_accumulating()?;
        let destructors = std::mem::take(&mut self.destructors);
        self.released = true;

        #[cfg(feature = "tracing")]
        tracing::debug!(destructors = destructors.len(), "reaper released");

        Ok(Box::new(Composite::new(destructors)))
    }

    /// Variant of [`release`](Reaper::release) that raises a fatal signal on error.
    pub fn must_release(&mut self) -> BoxDestructor {
        match self.release() {
            Ok(dtor) => dtor,
            Err(err) => fatal(err),
        }
    }

    /// Run the assumed destructors now, in reverse order.
    ///
    /// A released reaper has nothing left to do and reports success. Fails with
    /// [`Error::IllegalState`] if the reaper was already finalized, and with
    /// [`Error::Aggregate`] if any destructor failed; every destructor runs
    /// regardless.
    pub fn finalize(&mut self) -> Result<(), Error> {
        if self.released {
            return Ok(());
        }
        if self.finalized {
            return Err(Error::illegal_state(FINALIZED));
        }
        let mut destructors = std::mem::take(&mut self.destructors);
        self.finalized = true;

        #[cfg(feature = "tracing")]
        tracing::debug!(destructors = destructors.len(), "reaper finalizing");

        reap(&mut destructors).map_err(Error::Aggregate)
    }

    /// Variant of [`finalize`](Reaper::finalize) that raises a fatal signal on error.
    pub fn must_finalize(&mut self) {
        if let Err(err) = self.finalize() {
            fatal(err)
        }
    }

    /// Whether responsibility was handed out by [`release`](Reaper::release).
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Whether [`finalize`](Reaper::finalize) ran the destructors.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ReaperState {
        if self.released {
            ReaperState::Released
        } else if self.finalized {
            ReaperState::Finalized
        } else {
            ReaperState::Accumulating
        }
    }

    /// Number of destructors this reaper is still responsible for.
    pub fn len(&self) -> usize {
        self.destructors.len()
    }

    /// Whether this reaper is responsible for no destructors.
    pub fn is_empty(&self) -> bool {
        self.destructors.is_empty()
    }

    fn ensure_accumulating(&self) -> Result<(), Error> {
        if self.released {
            return Err(Error::illegal_state(RELEASED));
        }
        if self.finalized {
            return Err(Error::illegal_state(FINALIZED));
        }
        Ok(())
    }
}

impl Default for Reaper {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Reaper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reaper")
            .field("state", &self.state())
            .field("destructors", &self.destructors.len())
            .finish()
    }
}

impl Drop for Reaper {
    fn drop(&mut self) {
        if self.state() != ReaperState::Accumulating || self.destructors.is_empty() {
            return;
        }
        if let Err(err) = self.finalize() {
            #[cfg(feature = "tracing")]
            tracing::warn!("Reaper cleanup on drop failed: {}", err);
            #[cfg(not(feature = "tracing"))]
            eprintln!("Reaper cleanup on drop failed: {}", err);
        }
    }
}


#[cfg(all(test, feature = "tracing"))]
mod tracing_tests {
    use super::*;
    use crate::testing::{Journal, Outcome};
    use tracing_test::traced_test;

    #[test]
    #[traced_test]
    fn finalize_logs_failed_destructor() {
        let journal = Journal::new();
        let mut reaper = Reaper::new();
        reaper.assume(journal.destructor(0)).unwrap();
        reaper.assume(journal.scripted(1, Outcome::Fail)).unwrap();

        assert!(reaper.finalize().is_err());
        assert!(logs_contain("reaper finalizing"));
        assert!(logs_contain("destructor failed"));
        assert!(logs_contain("destructor 1 failed"));
    }

    #[test]
    #[traced_test]
    fn release_logs_transition() {
        let mut reaper = Reaper::new();
        reaper.assume(crate::destructor::NOOP).unwrap();
        let mut dtor = reaper.release().unwrap();
        assert!(logs_contain("reaper released"));

        dtor.destroy().unwrap();
        assert!(logs_contain("running released destructors"));
    }

    #[test]
    #[traced_test]
    fn drop_logs_cleanup_failure() {
        let journal = Journal::new();
        {
            let mut reaper = Reaper::new();
            reaper.assume(journal.scripted(7, Outcome::Fail)).unwrap();
        }
        assert_eq!(journal.runs(), vec![7]);
        assert!(logs_contain("Reaper cleanup on drop failed"));
    }
}

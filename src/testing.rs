//! Testing utilities for code built on reapers
//!
//! Constructors that use a [`Reaper`](crate::Reaper) are easiest to test with
//! destructors that record when they run. [`Journal`] hands out such
//! destructors and remembers the order they ran in; [`Outcome`] scripts whether
//! each one succeeds, fails, or panics.
//!
//! # Examples
//!
//! ```rust
//! use ebb::testing::{Journal, Outcome};
//! use ebb::{assert_error_kind, ErrorKind, Reaper};
//!
//! let journal = Journal::new();
//! let mut reaper = Reaper::new();
//! reaper.assume(journal.destructor(1)).unwrap();
//! reaper.assume(journal.scripted(2, Outcome::Fail)).unwrap();
//! reaper.assume(journal.destructor(3)).unwrap();
//!
//! assert_error_kind!(reaper.finalize(), ErrorKind::Aggregate);
//! assert_eq!(journal.runs(), vec![3, 2, 1]);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::destructor::{destructor_fn, Destructor};
use crate::error::Error;

/// What a scripted destructor does when it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Return `Ok(())`.
    Succeed,
    /// Return an error naming the destructor.
    Fail,
    /// Panic with a message naming the destructor.
    Panic,
}

/// Shared record of which destructors ran, in order.
///
/// Clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    runs: Rc<RefCell<Vec<usize>>>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// A destructor that records `id` and succeeds.
    pub fn destructor(&self, id: usize) -> impl Destructor + 'static {
        self.scripted(id, Outcome::Succeed)
    }

    /// A destructor that records `id` and then behaves as `outcome` says.
    ///
    /// The id is recorded before failing or panicking, so the journal shows
    /// every destructor that was invoked.
    pub fn scripted(&self, id: usize, outcome: Outcome) -> impl Destructor + 'static {
        let runs = self.runs.clone();
        destructor_fn(move || {
            runs.borrow_mut().push(id);
            match outcome {
                Outcome::Succeed => Ok(()),
                Outcome::Fail => Err(Error::msg(format!("destructor {} failed", id))),
                Outcome::Panic => panic!("destructor {} panicked", id),
            }
        })
    }

    /// Ids of the destructors that ran, in the order they ran.
    pub fn runs(&self) -> Vec<usize> {
        self.runs.borrow().clone()
    }

    /// Number of recorded runs.
    pub fn len(&self) -> usize {
        self.runs.borrow().len()
    }

    /// Whether nothing ran yet.
    pub fn is_empty(&self) -> bool {
        self.runs.borrow().is_empty()
    }
}

/// Assert that a result failed with a specific [`ErrorKind`](crate::ErrorKind).
///
/// # Example
///
/// ```rust
/// use ebb::{assert_error_kind, ErrorKind, Reaper};
///
/// let mut reaper = Reaper::new();
/// reaper.finalize().unwrap();
/// assert_error_kind!(reaper.finalize(), ErrorKind::IllegalState);
/// ```
#[macro_export]
macro_rules! assert_error_kind {
    ($result:expr, $kind:expr) => {
        match $result {
            Ok(_) => panic!("Expected error of kind {:?}, got Ok", $kind),
            Err(err) => {
                let expected: $crate::ErrorKind = $kind;
                let actual = $crate::Error::kind(&err);
                if actual != expected {
                    panic!(
                        "Expected error of kind {:?}, got {:?}: {}",
                        expected, actual, err
                    );
                }
            }
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl Arbitrary for Outcome {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            Just(Outcome::Succeed),
            Just(Outcome::Fail),
            Just(Outcome::Panic),
        ]
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::fatal::catch;

    #[test]
    fn journal_records_runs() {
        let journal = Journal::new();
        let mut first = journal.destructor(1);
        let mut second = journal.destructor(2);

        second.destroy().unwrap();
        first.destroy().unwrap();
        assert_eq!(journal.runs(), vec![2, 1]);
        assert_eq!(journal.len(), 2);
    }

    #[test]
    fn journal_clones_share_record() {
        let journal = Journal::new();
        let clone = journal.clone();
        clone.destructor(5).destroy().unwrap();
        assert_eq!(journal.runs(), vec![5]);
    }

    #[test]
    fn scripted_fail() {
        let journal = Journal::new();
        let err = journal.scripted(4, Outcome::Fail).destroy().unwrap_err();
        assert_eq!(err.to_string(), "destructor 4 failed");
        assert_eq!(journal.runs(), vec![4]);
    }

    #[test]
    fn scripted_panic() {
        let journal = Journal::new();
        let mut dtor = journal.scripted(9, Outcome::Panic);
        let err = catch(|| dtor.destroy()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Panicked);
        assert_eq!(err.as_panic().unwrap().message(), "destructor 9 panicked");
        assert_eq!(journal.runs(), vec![9]);
    }

    #[test]
    fn assert_error_kind_macro() {
        let result: Result<(), Error> = Err(Error::NilReceiver("assume"));
        assert_error_kind!(result, ErrorKind::NilReceiver);
    }

    #[test]
    #[should_panic(expected = "Expected error of kind IllegalState, got Ok")]
    fn assert_error_kind_panics_on_ok() {
        let result: Result<(), Error> = Ok(());
        assert_error_kind!(result, ErrorKind::IllegalState);
    }

    #[test]
    #[should_panic(expected = "Expected error of kind IllegalState, got Custom")]
    fn assert_error_kind_panics_on_other_kind() {
        let result: Result<(), Error> = Err(Error::msg("boom"));
        assert_error_kind!(result, ErrorKind::IllegalState);
    }

    #[cfg(feature = "proptest")]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn outcome_arbitrary_drives_scripted_destructor(outcome in any::<Outcome>()) {
                let journal = Journal::new();
                let mut dtor = journal.scripted(0, outcome);
                let result = catch(|| dtor.destroy());
                let kind = result.err().map(|err| err.kind());
                match outcome {
                    Outcome::Succeed => {
                        prop_assert_eq!(kind, None);
                    }
                    Outcome::Fail => {
                        prop_assert_eq!(kind, Some(ErrorKind::Custom));
                    }
                    Outcome::Panic => {
                        prop_assert_eq!(kind, Some(ErrorKind::Panicked));
                    }
                }
                prop_assert_eq!(journal.runs(), vec![0]);
            }
        }
    }
}

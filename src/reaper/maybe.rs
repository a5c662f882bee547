//! Operations on a reaper that may not exist.
//!
//! Code often holds an optional reaper and wants to clean up at scope exit
//! without checking whether one was ever built. Releasing, finalizing and
//! querying an absent reaper therefore succeed trivially. Assuming into one
//! does not: handing a destructor to nothing would leak it, so that is reported
//! as [`Error::NilReceiver`].

use super::Reaper;
use crate::destructor::{BoxDestructor, Destructor, NOOP};
use crate::error::Error;
use crate::fatal::fatal;

/// Reaper operations on an optional reaper.
///
/// | Operation | Absent reaper |
/// |-----------|---------------|
/// | `assume` | [`Error::NilReceiver`] |
/// | `release` | the no-op destructor |
/// | `finalize` | `Ok(())` |
/// | `is_released`, `is_finalized` | `false` |
///
/// # Examples
///
/// ```
/// use ebb::{ErrorKind, MaybeReaper, Reaper};
///
/// let mut absent: Option<Reaper> = None;
/// assert!(absent.finalize().is_ok());
/// assert!(!absent.is_finalized());
/// assert_eq!(absent.assume(ebb::NOOP).unwrap_err().kind(), ErrorKind::NilReceiver);
///
/// let mut present = Some(Reaper::new());
/// present.assume(ebb::NOOP).unwrap();
/// assert!(present.finalize().is_ok());
/// assert!(present.is_finalized());
/// ```
pub trait MaybeReaper {
    /// The reaper, if present.
    fn reaper(&self) -> Option<&Reaper>;

    /// The reaper, if present, mutably.
    fn reaper_mut(&mut self) -> Option<&mut Reaper>;

    /// See [`Reaper::assume`].
    fn assume<D>(&mut self, dtor: D) -> Result<(), Error>
    where
        D: Destructor + 'static,
    {
        let dtor: BoxDestructor = Box::new(dtor);
        self.assume_boxed(Some(dtor))
    }

    /// See [`Reaper::assume_boxed`].
    fn assume_boxed(&mut self, dtor: Option<BoxDestructor>) -> Result<(), Error> {
        match self.reaper_mut() {
            Some(reaper) => reaper.assume_boxed(dtor),
            None => Err(Error::NilReceiver("assume")),
        }
    }

    /// See [`Reaper::must_assume`].
    fn must_assume<D>(&mut self, dtor: D)
    where
        D: Destructor + 'static,
    {
        if let Err(err) = self.assume(dtor) {
            fatal(err)
        }
    }

    /// See [`Reaper::release`].
    fn release(&mut self) -> Result<BoxDestructor, Error> {
        match self.reaper_mut() {
            Some(reaper) => reaper.release(),
            None => Ok(Box::new(NOOP)),
        }
    }

    /// See [`Reaper::must_release`].
    fn must_release(&mut self) -> BoxDestructor {
        match self.release() {
            Ok(dtor) => dtor,
            Err(err) => fatal(err),
        }
    }

    /// See [`Reaper::finalize`].
    fn finalize(&mut self) -> Result<(), Error> {
        match self.reaper_mut() {
            Some(reaper) => reaper.finalize(),
            None => Ok(()),
        }
    }

    /// See [`Reaper::must_finalize`].
    fn must_finalize(&mut self) {
        if let Err(err) = self.finalize() {
            fatal(err)
        }
    }

    /// See [`Reaper::is_released`].
    fn is_released(&self) -> bool {
        self.reaper().is_some_and(Reaper::is_released)
    }

    /// See [`Reaper::is_finalized`].
    fn is_finalized(&self) -> bool {
        self.reaper().is_some_and(Reaper::is_finalized)
    }
}

impl MaybeReaper for Option<Reaper> {
    fn reaper(&self) -> Option<&Reaper> {
        self.as_ref()
    }

    fn reaper_mut(&mut self) -> Option<&mut Reaper> {
        self.as_mut()
    }
}

impl MaybeReaper for Option<&mut Reaper> {
    fn reaper(&self) -> Option<&Reaper> {
        self.as_deref()
    }

    fn reaper_mut(&mut self) -> Option<&mut Reaper> {
        self.as_deref_mut()
    }
}

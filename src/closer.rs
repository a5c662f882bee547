//! Adapters between [`Destructor`] and a generic `close` interface
//!
//! Some APIs hand around "something that can be closed" rather than a
//! destructor. [`closable`] presents a destructor through [`Close`], and
//! [`from_closer`] goes the other way. Both only forward the call.
//!
//! # Examples
//!
//! ```
//! use ebb::{closable, Close, Reaper};
//!
//! let mut reaper = Reaper::new();
//! reaper.assume(ebb::noop()).unwrap();
//!
//! let mut closer = closable(reaper.release().unwrap());
//! assert!(closer.close().is_ok());
//! ```

use std::fmt;

use crate::destructor::Destructor;
use crate::error::Error;

/// Something that can be closed.
pub trait Close {
    /// Close the underlying resource.
    fn close(&mut self) -> Result<(), Error>;
}

impl<C: Close + ?Sized> Close for Box<C> {
    fn close(&mut self) -> Result<(), Error> {
        (**self).close()
    }
}

/// [`Close`] backed by a closure.
pub struct CloserFn<F> {
    f: F,
}

impl<F> Close for CloserFn<F>
where
    F: FnMut() -> Result<(), Error>,
{
    fn close(&mut self) -> Result<(), Error> {
        (self.f)()
    }
}

impl<F> fmt::Debug for CloserFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloserFn").field("f", &"<function>").finish()
    }
}

/// Create a [`Close`] from a closure.
pub fn closer_fn<F>(f: F) -> CloserFn<F>
where
    F: FnMut() -> Result<(), Error>,
{
    CloserFn { f }
}

/// A destructor seen through [`Close`].
///
/// Created by [`closable`].
#[derive(Debug)]
pub struct Closable<D> {
    dtor: D,
}

impl<D> Closable<D> {
    /// Unwrap the destructor.
    pub fn into_inner(self) -> D {
        self.dtor
    }
}

impl<D: Destructor> Close for Closable<D> {
    fn close(&mut self) -> Result<(), Error> {
        self.dtor.destroy()
    }
}

/// Present a destructor as a [`Close`].
pub fn closable<D: Destructor>(dtor: D) -> Closable<D> {
    Closable { dtor }
}

/// A [`Close`] seen through [`Destructor`].
///
/// Created by [`from_closer`].
#[derive(Debug)]
pub struct FromCloser<C> {
    closer: C,
}

impl<C> FromCloser<C> {
    /// Unwrap the closer.
    pub fn into_inner(self) -> C {
        self.closer
    }
}

impl<C: Close> Destructor for FromCloser<C> {
    fn destroy(&mut self) -> Result<(), Error> {
        self.closer.close()
    }
}

/// Present a [`Close`] as a destructor.
pub fn from_closer<C: Close>(closer: C) -> FromCloser<C> {
    FromCloser { closer }
}

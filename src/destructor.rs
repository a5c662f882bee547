//! The destructor capability
//!
//! A [`Destructor`] is one cleanup action for one previously acquired
//! resource. It carries no state of its own beyond what the action captures.
//!
//! Destructors are not guarded against repeated invocation: running one twice
//! is the caller's mistake to avoid.
//!
//! # Examples
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use ebb::{destructor_fn, Destructor};
//!
//! let open = Rc::new(Cell::new(true));
//! let handle = open.clone();
//! let mut dtor = destructor_fn(move || {
//!     handle.set(false);
//!     Ok(())
//! });
//!
//! dtor.destroy().unwrap();
//! assert!(!open.get());
//! ```

use std::fmt;

use crate::error::Error;
use crate::fatal::fatal;

/// An object destructor.
pub trait Destructor {
    /// Run the cleanup action.
    fn destroy(&mut self) -> Result<(), Error>;

    /// Variant of [`destroy`](Destructor::destroy) that raises a fatal signal
    /// carrying the error on failure.
    ///
    /// Meant for call sites with no error channel, such as `Drop` impls.
    fn must_destroy(&mut self) {
        if let Err(err) = self.destroy() {
            fatal(err)
        }
    }
}

/// An owned, type-erased destructor.
pub type BoxDestructor = Box<dyn Destructor>;

impl fmt::Debug for dyn Destructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<destructor>")
    }
}

impl<D: Destructor + ?Sized> Destructor for Box<D> {
    fn destroy(&mut self) -> Result<(), Error> {
        (**self).destroy()
    }
}

impl<D: Destructor + ?Sized> Destructor for &mut D {
    fn destroy(&mut self) -> Result<(), Error> {
        (**self).destroy()
    }
}

/// Destructor backed by a closure.
///
/// Created by [`destructor_fn`].
pub struct DestructorFn<F> {
    f: F,
}

impl<F> DestructorFn<F>
where
    F: FnMut() -> Result<(), Error>,
{
    /// Wrap a cleanup closure.
    pub fn new(f: F) -> Self {
        DestructorFn { f }
    }
}

impl<F> Destructor for DestructorFn<F>
where
    F: FnMut() -> Result<(), Error>,
{
    fn destroy(&mut self) -> Result<(), Error> {
        (self.f)()
    }
}

impl<F> fmt::Debug for DestructorFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DestructorFn")
            .field("f", &"<function>")
            .finish()
    }
}

/// Create a destructor from a cleanup closure.
pub fn destructor_fn<F>(f: F) -> DestructorFn<F>
where
    F: FnMut() -> Result<(), Error>,
{
    DestructorFn::new(f)
}

/// Destructor that does nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Noop;

impl Destructor for Noop {
    fn destroy(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

/// The no-op destructor.
pub const NOOP: Noop = Noop;

/// Returns the no-op destructor.
pub fn noop() -> Noop {
    NOOP
}

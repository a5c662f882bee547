//! Reverse-order reaping with failure aggregation.

use crate::aggregate::{AggregateError, ErrorCollector};
use crate::destructor::{BoxDestructor, Destructor};
use crate::error::Error;
use crate::fatal::catch;

/// Run `destructors` last to first, collecting every failure.
///
/// Each destructor runs behind a [`catch`] boundary, so one that panics is
/// recorded like one that returns an error and its siblings still run.
///
/// # Examples
///
/// ```
/// use ebb::reaper::reap;
/// use ebb::{destructor_fn, BoxDestructor, Error};
///
/// let mut destructors: Vec<BoxDestructor> = vec![
///     Box::new(destructor_fn(|| Ok(()))),
///     Box::new(destructor_fn(|| Err(Error::msg("second failed")))),
/// ];
///
/// let aggregate = reap(&mut destructors).unwrap_err();
/// assert_eq!(aggregate.len(), 1);
/// ```
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
pub fn reap(destructors: &mut [BoxDestructor]) -> Result<(), AggregateError> {
    let mut collector = ErrorCollector::new();
    for (position, dtor) in destructors.iter_mut().enumerate().rev() {
        let result = catch(|| dtor.destroy());
        #[cfg(feature = "tracing")]
        if let Err(ref err) = result {
            tracing::warn!(position, error = %err, "destructor failed");
        }
        collector.collect(result);
    }
    collector.into_result()
}

/// The destructor handed out by [`Reaper::release`](super::Reaper::release).
pub(crate) struct Composite {
    destructors: Vec<BoxDestructor>,
}

impl Composite {
    pub(crate) fn new(destructors: Vec<BoxDestructor>) -> Self {
        Composite { destructors }
    }
}

impl Destructor for Composite {
    fn destroy(&mut self) -> Result<(), Error> {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            destructors = self.destructors.len(),
            "running released destructors"
        );
        reap(&mut self.destructors).map_err(Error::Aggregate)
    }
}

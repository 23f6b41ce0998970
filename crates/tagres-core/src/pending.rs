//! Deferred payloads.
//!
//! A payload is pending exactly when its type is `Pending<F>`. There is no
//! separate state flag: the type says it, and constructing an instance
//! around a `Pending` never polls it.

use std::fmt;
use std::future::{Future, IntoFuture, Ready};

/// A computation that has not produced its value yet.
///
/// Wrap any future with [`pending`] (or `Pending::new`) before handing it
/// to `ok`/`err`. The wrapper is inert; it is driven only when a consumer
/// awaits it, either directly (`Pending: IntoFuture`) or through the
/// `settle_*` operations.
///
/// Repeated resolution needs a cloneable future; each clone attaches
/// independently and nothing is cached here.
#[must_use = "a pending payload does nothing until awaited"]
#[derive(Clone)]
pub struct Pending<F> {
    fut: F,
}

impl<F: Future> Pending<F> {
    #[inline]
    pub fn new(fut: F) -> Self {
        Self { fut }
    }

    #[inline]
    pub fn into_inner(self) -> F {
        self.fut
    }
}

impl<T> Pending<Ready<T>> {
    /// A pending handle that is already settled with `value`.
    #[inline]
    pub fn ready(value: T) -> Self {
        Self::new(std::future::ready(value))
    }
}

impl<F: Future> IntoFuture for Pending<F> {
    type Output = F::Output;
    type IntoFuture = F;

    #[inline]
    fn into_future(self) -> F {
        self.fut
    }
}

impl<F> fmt::Debug for Pending<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pending(..)")
    }
}

/// Mark `fut` as a deferred payload.
///
/// ```
/// use tagres_core::pending;
/// let later = pending(async { 6 * 7 });
/// # let _ = later;
/// ```
#[inline]
pub fn pending<F: IntoFuture>(fut: F) -> Pending<F::IntoFuture> {
    Pending::new(fut.into_future())
}

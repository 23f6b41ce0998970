//! The operation set every instance exposes.

use crate::Tag;

/// Shared instance contract of a success, a failure, or either.
///
/// Implemented by the two variant types and by the two-case union over
/// them, so consumers never need to know which constructor produced the
/// instance they hold.
///
/// None of the operations can fail. `match_with` and `pair` hand the
/// payload over exactly as stored: a deferred payload arrives as its
/// pending handle. Awaiting it is an explicit step (`settle_*` in
/// `tagres`), so a resolved instance never picks up an async wrapper.
pub trait Contract: Sized {
    /// Success payload type. `Infallible` for a bare failure.
    type Value;
    /// Failure payload type. `Infallible` for a bare success.
    type Error;

    fn is_ok(&self) -> bool;

    #[inline]
    fn is_err(&self) -> bool {
        !self.is_ok()
    }

    fn tag(&self) -> &Tag;

    /// Invoke exactly one handler with the payload.
    fn match_with<R, F, G>(self, on_ok: F, on_err: G) -> R
    where
        F: FnOnce(Self::Value) -> R,
        G: FnOnce(Self::Error) -> R;

    /// `(Some(value), None)` or `(None, Some(error))`.
    #[inline]
    fn pair(self) -> (Option<Self::Value>, Option<Self::Error>) {
        self.match_with(|value| (Some(value), None), |error| (None, Some(error)))
    }

    /// The raw payload. Never panics, never awaits.
    #[inline]
    fn unwrap(self) -> Result<Self::Value, Self::Error> {
        self.match_with(Ok, Err)
    }
}

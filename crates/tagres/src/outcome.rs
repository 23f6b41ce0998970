//! Success and failure instances, and the two-case union over them.

use std::any::type_name;
use std::convert::Infallible;
use std::fmt;
use std::future::IntoFuture;

use tagres_core::{Contract, Tag};

use crate::config;

// ── Variants ──────────────────────────────────────────────────────

/// A success: a value and a tag (default `"Ok"`).
///
/// Immutable once built; the payload is reached through the contract or
/// the accessors below, never through a mutable field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Success<T> {
    value: T,
    tag: Tag,
}

/// A failure: an error value and a tag (default `"Err"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Failure<E> {
    error: E,
    tag: Tag,
}

/// Build a success with the default tag.
///
/// ```
/// use tagres::{ok, Contract};
/// let hit = ok(42);
/// assert!(hit.is_ok());
/// assert_eq!(hit.tag(), "Ok");
/// assert_eq!(hit.unwrap(), Ok(42));
/// ```
#[inline]
pub fn ok<T>(value: T) -> Success<T> {
    Success { value, tag: Tag::OK }
}

#[inline]
pub fn ok_tagged<T>(value: T, tag: impl Into<Tag>) -> Success<T> {
    Success { value, tag: tag.into() }
}

/// Build a failure with the default tag.
///
/// ```
/// use tagres::{err, Contract};
/// let miss = err("not found");
/// assert!(miss.is_err());
/// assert_eq!(miss.tag(), "Err");
/// ```
#[inline]
pub fn err<E>(error: E) -> Failure<E> {
    Failure { error, tag: Tag::ERR }
}

#[inline]
pub fn err_tagged<E>(error: E, tag: impl Into<Tag>) -> Failure<E> {
    Failure { error, tag: tag.into() }
}

impl<T> Success<T> {
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    #[inline]
    pub fn into_value(self) -> T {
        self.value
    }

    /// Replace the tag; nothing else changes.
    #[inline]
    pub fn tagged(self, tag: impl Into<Tag>) -> Self {
        Success { value: self.value, tag: tag.into() }
    }

    #[inline]
    pub fn as_ref(&self) -> Success<&T> {
        Success { value: &self.value, tag: self.tag.clone() }
    }

    pub fn into_parts(self) -> (T, Tag) {
        (self.value, self.tag)
    }
}

impl<E> Failure<E> {
    #[inline]
    pub fn error(&self) -> &E {
        &self.error
    }

    #[inline]
    pub fn into_error(self) -> E {
        self.error
    }

    /// Replace the tag; nothing else changes.
    #[inline]
    pub fn tagged(self, tag: impl Into<Tag>) -> Self {
        Failure { error: self.error, tag: tag.into() }
    }

    #[inline]
    pub fn as_ref(&self) -> Failure<&E> {
        Failure { error: &self.error, tag: self.tag.clone() }
    }

    pub fn into_parts(self) -> (E, Tag) {
        (self.error, self.tag)
    }
}

impl<T> Contract for Success<T> {
    type Value = T;
    type Error = Infallible;

    #[inline]
    fn is_ok(&self) -> bool {
        true
    }

    #[inline]
    fn tag(&self) -> &Tag {
        &self.tag
    }

    #[inline]
    fn match_with<R, F, G>(self, on_ok: F, _on_err: G) -> R
    where
        F: FnOnce(Self::Value) -> R,
        G: FnOnce(Self::Error) -> R,
    {
        on_ok(self.value)
    }
}

impl<E> Contract for Failure<E> {
    type Value = Infallible;
    type Error = E;

    #[inline]
    fn is_ok(&self) -> bool {
        false
    }

    #[inline]
    fn tag(&self) -> &Tag {
        &self.tag
    }

    #[inline]
    fn match_with<R, F, G>(self, _on_ok: F, on_err: G) -> R
    where
        F: FnOnce(Self::Value) -> R,
        G: FnOnce(Self::Error) -> R,
    {
        on_err(self.error)
    }
}

// ── Union ─────────────────────────────────────────────────────────

/// Either a [`Success`] or a [`Failure`].
///
/// The representation is private: an `Outcome` is only ever formed through
/// `From<Success<T>>`, `From<Failure<E>>` or `From<Result<T, E>>`, and each
/// of those checks that `T` and `E` are different types. Rust cannot state
/// that bound, so the check runs at construction and panics on an
/// `Outcome<T, T>`. It is on by default in every build profile; turning it
/// off (`TAGRES_STRICT_TYPES=0` or `Config::strict_types(false)`) makes such
/// an instance constructible, but its behaviour is then unspecified.
///
/// Branch on it with [`Contract::match_with`], or narrow it with
/// [`Outcome::into_variant`], [`Outcome::ok_ref`] and [`Outcome::err_ref`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Outcome<T, E>(Repr<T, E>);

#[derive(Clone, PartialEq, Eq, Hash)]
enum Repr<T, E> {
    Ok(Success<T>),
    Err(Failure<E>),
}

#[inline]
fn check_distinct<T: ?Sized, E: ?Sized>() {
    if config::strict_types() {
        let (t, e) = (type_name::<T>(), type_name::<E>());
        assert!(t != e, "Outcome<{t}, {e}>: success and failure types must differ");
    }
}

impl<T, E> Outcome<T, E> {
    // Unchecked: only for instances derived from one that passed the check,
    // whose branch is already decided.
    #[inline]
    fn derived_ok(success: Success<T>) -> Self {
        Outcome(Repr::Ok(success))
    }

    #[inline]
    fn derived_err(failure: Failure<E>) -> Self {
        Outcome(Repr::Err(failure))
    }
}

impl<T, E> From<Success<T>> for Outcome<T, E> {
    fn from(success: Success<T>) -> Self {
        check_distinct::<T, E>();
        Self::derived_ok(success)
    }
}

impl<T, E> From<Failure<E>> for Outcome<T, E> {
    fn from(failure: Failure<E>) -> Self {
        check_distinct::<T, E>();
        Self::derived_err(failure)
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => ok(value).into(),
            Err(error) => err(error).into(),
        }
    }
}

impl<T, E> From<Outcome<T, E>> for Result<T, E> {
    fn from(outcome: Outcome<T, E>) -> Self {
        outcome.unwrap()
    }
}

impl<T: fmt::Debug, E: fmt::Debug> fmt::Debug for Outcome<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Ok(s) => f.debug_tuple("Ok").field(s).finish(),
            Repr::Err(e) => f.debug_tuple("Err").field(e).finish(),
        }
    }
}

impl<T, E> Outcome<T, E> {
    /// Replace the tag of whichever variant this is.
    pub fn tagged(self, tag: impl Into<Tag>) -> Self {
        match self.0 {
            Repr::Ok(s) => Self::derived_ok(s.tagged(tag)),
            Repr::Err(f) => Self::derived_err(f.tagged(tag)),
        }
    }

    /// Narrow to the success, if this is one.
    #[inline]
    pub fn ok_ref(&self) -> Option<&Success<T>> {
        match &self.0 {
            Repr::Ok(s) => Some(s),
            Repr::Err(_) => None,
        }
    }

    /// Narrow to the failure, if this is one.
    #[inline]
    pub fn err_ref(&self) -> Option<&Failure<E>> {
        match &self.0 {
            Repr::Ok(_) => None,
            Repr::Err(f) => Some(f),
        }
    }

    /// Split into the concrete variant.
    pub fn into_variant(self) -> Result<Success<T>, Failure<E>> {
        match self.0 {
            Repr::Ok(s) => Ok(s),
            Repr::Err(f) => Err(f),
        }
    }

    /// Borrow the payload, so the contract can be run more than once.
    pub fn as_ref(&self) -> Outcome<&T, &E> {
        match &self.0 {
            Repr::Ok(s) => Outcome::derived_ok(s.as_ref()),
            Repr::Err(f) => Outcome::derived_err(f.as_ref()),
        }
    }
}

impl<T, E> Contract for Outcome<T, E> {
    type Value = T;
    type Error = E;

    #[inline]
    fn is_ok(&self) -> bool {
        matches!(self.0, Repr::Ok(_))
    }

    #[inline]
    fn tag(&self) -> &Tag {
        match &self.0 {
            Repr::Ok(s) => &s.tag,
            Repr::Err(f) => &f.tag,
        }
    }

    #[inline]
    fn match_with<R, F, G>(self, on_ok: F, on_err: G) -> R
    where
        F: FnOnce(Self::Value) -> R,
        G: FnOnce(Self::Error) -> R,
    {
        match self.0 {
            Repr::Ok(s) => on_ok(s.value),
            Repr::Err(f) => on_err(f.error),
        }
    }
}

// ── Deferred payloads ─────────────────────────────────────────────
//
// `match_with`/`pair` never await. Each `settle*` below is the explicit
// opt-in for a payload that is still pending; the tag rides along.
// Settled outcomes keep the branch of the pending one, so they are not
// re-checked even when both resolved types coincide.

impl<T: IntoFuture> Success<T> {
    /// Await the value.
    pub async fn settle(self) -> Success<T::Output> {
        Success { value: self.value.await, tag: self.tag }
    }

    pub async fn settle_with<R, F, G>(self, on_ok: F, on_err: G) -> R
    where
        F: FnOnce(T::Output) -> R,
        G: FnOnce(Infallible) -> R,
    {
        self.settle().await.match_with(on_ok, on_err)
    }

    pub async fn settle_pair(self) -> (Option<T::Output>, Option<Infallible>) {
        self.settle().await.pair()
    }
}

impl<E: IntoFuture> Failure<E> {
    /// Await the error.
    pub async fn settle(self) -> Failure<E::Output> {
        Failure { error: self.error.await, tag: self.tag }
    }

    pub async fn settle_with<R, F, G>(self, on_ok: F, on_err: G) -> R
    where
        F: FnOnce(Infallible) -> R,
        G: FnOnce(E::Output) -> R,
    {
        self.settle().await.match_with(on_ok, on_err)
    }

    pub async fn settle_pair(self) -> (Option<Infallible>, Option<E::Output>) {
        self.settle().await.pair()
    }
}

impl<T: IntoFuture, E: IntoFuture> Outcome<T, E> {
    /// Await whichever payload is present.
    pub async fn settle(self) -> Outcome<T::Output, E::Output> {
        match self.0 {
            Repr::Ok(s) => Outcome::derived_ok(s.settle().await),
            Repr::Err(f) => Outcome::derived_err(f.settle().await),
        }
    }

    /// Await the payload, then run exactly one handler on it.
    pub async fn settle_with<R, F, G>(self, on_ok: F, on_err: G) -> R
    where
        F: FnOnce(T::Output) -> R,
        G: FnOnce(E::Output) -> R,
    {
        match self.0 {
            Repr::Ok(s) => on_ok(s.value.await),
            Repr::Err(f) => on_err(f.error.await),
        }
    }

    pub async fn settle_pair(self) -> (Option<T::Output>, Option<E::Output>) {
        self.settle_with(|value| (Some(value), None), |error| (None, Some(error)))
            .await
    }
}

impl<T: IntoFuture, E> Outcome<T, E> {
    /// Await the value if this is a success; a failure passes through.
    pub async fn settle_ok(self) -> Outcome<T::Output, E> {
        match self.0 {
            Repr::Ok(s) => Outcome::derived_ok(s.settle().await),
            Repr::Err(f) => Outcome::derived_err(f),
        }
    }
}

impl<T, E: IntoFuture> Outcome<T, E> {
    /// Await the error if this is a failure; a success passes through.
    pub async fn settle_err(self) -> Outcome<T, E::Output> {
        match self.0 {
            Repr::Ok(s) => Outcome::derived_ok(s),
            Repr::Err(f) => Outcome::derived_err(f.settle().await),
        }
    }
}

//! Turning an ambiguous value into an `Outcome`.
//!
//! Some values carry either a usable result or a fault in one type: a
//! sensor reading that may be an error code, a boxed `Any` that may hold a
//! `Fault`. [`Ambiguous`] describes how to split such a type, and
//! [`Discriminator`] applies a predicate (by default [`Ambiguous::is_fault`])
//! to pick the branch.

use std::any::Any;
use std::error::Error;
use std::io;

use gfault::Fault;
use tagres_core::{ktrace, Contract, Tag};

use crate::outcome::{err, ok, Outcome};

/// A value that is either a result or a fault, decided at runtime.
///
/// The discriminator calls exactly one projection, chosen by the predicate,
/// and a custom predicate may send a value down the branch `is_fault` would
/// not have picked. `into_error` is total. `into_value` may hand back an
/// error when the value has no success form (an `Err` forced onto the
/// success branch); the outcome is then a failure.
pub trait Ambiguous {
    type Value;
    type Error;

    /// The default predicate.
    fn is_fault(&self) -> bool;

    fn into_value(self) -> Result<Self::Value, Self::Error>;

    fn into_error(self) -> Self::Error;
}

/// A type-erased value is a fault when it holds a `Fault`, an
/// `io::Error` or a boxed `dyn Error`.
impl Ambiguous for Box<dyn Any + Send> {
    type Value = Box<dyn Any + Send>;
    type Error = Fault;

    fn is_fault(&self) -> bool {
        let inner = &**self;
        inner.is::<Fault>() || inner.is::<io::Error>() || inner.is::<Box<dyn Error + Send + Sync>>()
    }

    fn into_value(self) -> Result<Self::Value, Fault> {
        Ok(self)
    }

    fn into_error(self) -> Fault {
        let other = match self.downcast::<io::Error>() {
            Ok(e) => return Fault::from(*e),
            Err(other) => other,
        };
        match other.downcast::<Box<dyn Error + Send + Sync>>() {
            Ok(e) => Fault::from_boxed(*e),
            Err(other) => Fault::opaque(other),
        }
    }
}

/// `Ok` is a value, `Err` a fault. An `Ok` forced onto the error branch is
/// kept as an opaque payload.
impl<T, E> Ambiguous for Result<T, E>
where
    T: Any + Send,
    E: Into<Fault>,
{
    type Value = T;
    type Error = Fault;

    fn is_fault(&self) -> bool {
        self.is_err()
    }

    fn into_value(self) -> Result<T, Fault> {
        self.map_err(Into::into)
    }

    fn into_error(self) -> Fault {
        match self {
            Ok(v) => Fault::opaque(Box::new(v)),
            Err(e) => e.into(),
        }
    }
}

// Scalars and strings are never faults by default.
macro_rules! plain_values {
    ($($ty:ty),* $(,)?) => {$(
        impl Ambiguous for $ty {
            type Value = $ty;
            type Error = Fault;

            fn is_fault(&self) -> bool {
                false
            }

            fn into_value(self) -> Result<$ty, Fault> {
                Ok(self)
            }

            fn into_error(self) -> Fault {
                Fault::opaque(Box::new(self))
            }
        }
    )*};
}

plain_values!(
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    f32, f64, bool, char, String, &'static str,
);

/// Configurable classifier. With no options it behaves like [`result`].
///
/// ```
/// use tagres::{Contract, Discriminator};
/// use std::any::Any;
///
/// let value: Box<dyn Any + Send> = Box::new(42_i32);
/// let outcome = Discriminator::new().tag_ok("Computed").classify(value);
/// assert!(outcome.is_ok());
/// assert_eq!(outcome.tag(), "Computed");
/// ```
#[must_use]
pub struct Discriminator<P = ()> {
    predicate: P,
    tag_ok: Option<Tag>,
    tag_err: Option<Tag>,
}

impl Discriminator {
    pub fn new() -> Self {
        Self {
            predicate: (),
            tag_ok: None,
            tag_err: None,
        }
    }
}

impl Default for Discriminator {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Discriminator<P> {
    /// Replace the default predicate. A panic inside `predicate`
    /// propagates to the caller of `classify`.
    pub fn is_error<Q>(self, predicate: Q) -> Discriminator<Q> {
        Discriminator {
            predicate,
            tag_ok: self.tag_ok,
            tag_err: self.tag_err,
        }
    }

    pub fn tag_ok(mut self, tag: impl Into<Tag>) -> Self {
        self.tag_ok = Some(tag.into());
        self
    }

    pub fn tag_err(mut self, tag: impl Into<Tag>) -> Self {
        self.tag_err = Some(tag.into());
        self
    }

    fn split<V: Ambiguous>(self, value: V, is_error: bool) -> Outcome<V::Value, V::Error> {
        let projected = if is_error {
            Err(value.into_error())
        } else {
            let projected = value.into_value();
            if projected.is_err() {
                ktrace!("discriminator: value has no success form, kept as failure");
            }
            projected
        };
        let outcome: Outcome<V::Value, V::Error> = match projected {
            Ok(v) => match self.tag_ok {
                Some(tag) => ok(v).tagged(tag).into(),
                None => ok(v).into(),
            },
            Err(e) => match self.tag_err {
                Some(tag) => err(e).tagged(tag).into(),
                None => err(e).into(),
            },
        };
        if !outcome.tag().is_default() {
            ktrace!("discriminator: tagged {}", outcome.tag());
        }
        outcome
    }
}

impl Discriminator {
    /// Classify with [`Ambiguous::is_fault`].
    pub fn classify<V: Ambiguous>(self, value: V) -> Outcome<V::Value, V::Error> {
        let is_error = value.is_fault();
        ktrace!("discriminator: default predicate says is_error={}", is_error);
        self.split(value, is_error)
    }
}

impl<P> Discriminator<P> {
    /// Classify with the predicate installed by [`Discriminator::is_error`].
    pub fn classify_with<V>(self, value: V) -> Outcome<V::Value, V::Error>
    where
        V: Ambiguous,
        P: FnOnce(&V) -> bool,
    {
        let Discriminator { predicate, tag_ok, tag_err } = self;
        let is_error = predicate(&value);
        ktrace!("discriminator: custom predicate says is_error={}", is_error);
        Discriminator { predicate: (), tag_ok, tag_err }.split(value, is_error)
    }
}

/// Classify `value` with its default predicate and the default tags.
///
/// ```
/// use tagres::{result, Contract};
///
/// assert_eq!(result(42).unwrap().ok(), Some(42));
/// ```
pub fn result<V: Ambiguous>(value: V) -> Outcome<V::Value, V::Error> {
    Discriminator::new().classify(value)
}

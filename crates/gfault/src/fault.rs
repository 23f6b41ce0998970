use std::any::Any;
use std::error::Error;
use std::fmt;

use crate::code::{DOMAIN_OPAQUE, DOMAIN_PANIC, DOMAIN_STD};
use crate::context::FaultContext;
use crate::FaultCode;

/// Generic Fault: the catch-all error value.
///
/// Two internal representations, same external API:
///
/// - **Simple**: two `FaultCode`s on the stack. Zero heap allocation.
///   Use where the classifier alone says enough.
///
/// - **Full**: boxed `FaultContext` with message, source chain, metadata
///   and an optional foreign payload. Use for anything a human will read.
///
/// Callers never see `Repr`; they go through `.domain()`, `.code()`,
/// `.message()` and friends.
pub struct Fault {
    repr: Repr,
}

enum Repr {
    Simple {
        domain: FaultCode,
        code:   FaultCode,
    },
    Full(Box<FaultContext>),
}

// ── Constructors ──────────────────────────────────────────────────

impl Fault {
    /// Create a zero-allocation fault from its two codes.
    ///
    /// ```
    /// use gfault::{Fault, FaultCode};
    /// const DOMAIN_BILLING: FaultCode = FaultCode::new("billing", 1000);
    /// const CODE_DECLINED: FaultCode = FaultCode::new("declined", 1001);
    ///
    /// let fault = Fault::simple(DOMAIN_BILLING, CODE_DECLINED);
    /// assert!(fault.is_simple());
    /// ```
    #[inline]
    pub fn simple(domain: FaultCode, code: FaultCode) -> Self {
        Self {
            repr: Repr::Simple { domain, code },
        }
    }

    /// Create a full diagnostic fault from a pre-built context.
    ///
    /// Prefer the `fault!` macro, which also records the call site.
    pub fn full(ctx: FaultContext) -> Self {
        Self {
            repr: Repr::Full(Box::new(ctx)),
        }
    }

    /// A plain message fault with unset codes.
    ///
    /// ```
    /// use gfault::Fault;
    /// let fault = Fault::msg("disk full");
    /// # #[cfg(not(feature = "production"))]
    /// assert_eq!(fault.message(), "disk full");
    /// ```
    pub fn msg(message: impl Into<String>) -> Self {
        Self::full(FaultContext::default().with_message(message))
    }

    /// Convert any `std::error::Error` into a `Fault`, keeping it as source.
    pub fn from_std<E>(err: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        let ctx = FaultContext::new(DOMAIN_STD, FaultCode::UNSET)
            .with_message(err.to_string())
            .with_source(err);
        Self::full(ctx)
    }

    /// Like [`Fault::from_std`] for an already boxed error.
    pub fn from_boxed(err: Box<dyn Error + Send + Sync>) -> Self {
        let mut ctx = FaultContext::new(DOMAIN_STD, FaultCode::UNSET).with_message(err.to_string());
        ctx.source = Some(err);
        Self::full(ctx)
    }

    /// Convert a panic payload (as returned by `catch_unwind`) into a fault.
    ///
    /// A `Fault` raised with `panic_any` comes back unchanged. String
    /// payloads become the message. Anything else is kept as payload.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let payload = match payload.downcast::<Fault>() {
            Ok(fault) => return *fault,
            Err(other) => other,
        };
        let ctx = FaultContext::new(DOMAIN_PANIC, FaultCode::UNSET);
        if let Some(s) = payload.downcast_ref::<&'static str>() {
            return Self::full(ctx.with_message(*s));
        }
        match payload.downcast::<String>() {
            Ok(s) => Self::full(ctx.with_message(*s)),
            Err(other) => Self::full(ctx.with_message("non-string panic payload").with_payload(other)),
        }
    }

    /// Classify an arbitrary value as a fault.
    ///
    /// If the value already is a `Fault` it is returned as is; otherwise it
    /// is kept as payload under `DOMAIN_OPAQUE`.
    pub fn opaque(value: Box<dyn Any + Send>) -> Self {
        match value.downcast::<Fault>() {
            Ok(fault) => *fault,
            Err(other) => Self::full(
                FaultContext::new(DOMAIN_OPAQUE, FaultCode::UNSET).with_payload(other),
            ),
        }
    }
}

// ── Accessors ─────────────────────────────────────────────────────

impl Fault {
    #[inline]
    pub fn domain(&self) -> &FaultCode {
        match &self.repr {
            Repr::Simple { domain, .. } => domain,
            Repr::Full(ctx) => &ctx.domain,
        }
    }

    #[inline]
    pub fn code(&self) -> &FaultCode {
        match &self.repr {
            Repr::Simple { code, .. } => code,
            Repr::Full(ctx) => &ctx.code,
        }
    }

    /// The human-readable message. Empty for Simple faults and in
    /// production builds.
    pub fn message(&self) -> &str {
        match &self.repr {
            Repr::Simple { .. } => "",
            Repr::Full(ctx) => ctx.message(),
        }
    }

    #[inline]
    pub fn is_simple(&self) -> bool {
        matches!(&self.repr, Repr::Simple { .. })
    }

    pub fn context(&self) -> Option<&FaultContext> {
        match &self.repr {
            Repr::Simple { .. } => None,
            Repr::Full(ctx) => Some(ctx),
        }
    }

    /// Consume the fault and return its context, building a minimal one
    /// for Simple faults.
    pub fn into_context(self) -> FaultContext {
        match self.repr {
            Repr::Simple { domain, code } => FaultContext::new(domain, code),
            Repr::Full(ctx) => *ctx,
        }
    }

    /// Attempt to downcast the source error to a concrete type.
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        match &self.repr {
            Repr::Simple { .. } => None,
            Repr::Full(ctx) => ctx.source.as_ref()?.downcast_ref::<E>(),
        }
    }

    pub fn has_payload(&self) -> bool {
        matches!(&self.repr, Repr::Full(ctx) if ctx.payload.is_some())
    }

    /// True if the foreign payload is a `T`.
    pub fn payload_is<T: Any>(&self) -> bool {
        match &self.repr {
            Repr::Full(ctx) => match &ctx.payload {
                Some(slot) => {
                    let guard = slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                    (**guard).is::<T>()
                }
                None => false,
            },
            Repr::Simple { .. } => false,
        }
    }

    /// Take the foreign payload out as a `T`. Gives the fault back
    /// untouched if there is no payload or it has another type.
    pub fn into_payload<T: Any>(self) -> Result<T, Fault> {
        let mut ctx = match self.repr {
            Repr::Full(ctx) => ctx,
            simple @ Repr::Simple { .. } => return Err(Fault { repr: simple }),
        };
        let Some(slot) = ctx.payload.take() else {
            return Err(Fault::full(*ctx));
        };
        let boxed = slot.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner());
        match boxed.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(boxed) => {
                ctx.payload = Some(std::sync::Mutex::new(boxed));
                Err(Fault::full(*ctx))
            }
        }
    }

    /// Re-classify this fault at a higher layer, keeping it as source.
    pub fn wrap(self, domain: FaultCode, code: FaultCode) -> Self {
        let message = self.to_string();
        Self::full(FaultContext::new(domain, code).with_message(message).with_source(self))
    }
}

// ── std::error::Error ─────────────────────────────────────────────

impl Error for Fault {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.repr {
            Repr::Simple { .. } => None,
            Repr::Full(ctx) => ctx.source.as_ref().map(|e| e.as_ref() as &(dyn Error + 'static)),
        }
    }
}

// ── Display ───────────────────────────────────────────────────────

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Simple { domain, code } => write!(f, "[{}/{}]", domain, code),
            Repr::Full(ctx) => {
                write!(f, "[{}/{}]", ctx.domain, ctx.code)?;

                if !ctx.message().is_empty() {
                    write!(f, " {}", ctx.message())?;
                }

                if let Some(src) = &ctx.source {
                    write!(f, " (caused by: {})", src)?;
                }

                if let Some((file, line)) = ctx.location() {
                    write!(f, " at {}:{}", file, line)?;
                }

                Ok(())
            }
        }
    }
}

// ── Debug ─────────────────────────────────────────────────────────

impl fmt::Debug for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Simple { domain, code } => f
                .debug_struct("Fault::Simple")
                .field("domain", domain)
                .field("code", code)
                .finish(),
            Repr::Full(ctx) => f.debug_struct("Fault::Full").field("context", ctx).finish(),
        }
    }
}

use std::any::Any;
#[cfg(not(feature = "production"))]
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::sync::Mutex;

use crate::FaultCode;

/// Human-facing details. Compiled out entirely in production builds.
#[cfg(not(feature = "production"))]
#[derive(Debug, Default)]
struct Diagnostics {
    message: String,
    location: Option<(&'static str, u32)>,
    metadata: BTreeMap<String, String>,
}

/// Full fault context: heap-allocated, carried by diagnostic faults.
///
/// The codes, the `source` chain and any foreign `payload` are always kept.
/// Message, location and metadata are readable through accessors that
/// return empty values in production builds, so callers need no `cfg`.
#[derive(Default)]
pub struct FaultContext {
    pub domain: FaultCode,
    pub code: FaultCode,

    pub source: Option<Box<dyn Error + Send + Sync>>,

    /// A value that was classified as a fault without being one, such as
    /// a non-string panic payload. Behind a mutex so `Fault` stays `Sync`.
    pub payload: Option<Mutex<Box<dyn Any + Send>>>,

    #[cfg(not(feature = "production"))]
    diag: Diagnostics,

    #[cfg(feature = "backtrace")]
    backtrace: Option<String>,
}

impl FaultContext {
    pub fn new(domain: FaultCode, code: FaultCode) -> Self {
        Self { domain, code, ..Default::default() }
    }

    pub fn with_source<E>(mut self, error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(error));
        self
    }

    pub fn with_payload(mut self, payload: Box<dyn Any + Send>) -> Self {
        self.payload = Some(Mutex::new(payload));
        self
    }

    #[allow(unused_mut)]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        #[cfg(not(feature = "production"))]
        {
            self.diag.message = message.into();
        }
        #[cfg(feature = "production")]
        let _ = message;
        self
    }

    #[allow(unused_mut)]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        #[cfg(not(feature = "production"))]
        {
            self.diag.metadata.insert(key.into(), value.into());
        }
        #[cfg(feature = "production")]
        let _ = (key, value);
        self
    }

    #[allow(unused_mut)]
    pub fn with_location(mut self, file: &'static str, line: u32) -> Self {
        #[cfg(not(feature = "production"))]
        {
            self.diag.location = Some((file, line));
        }
        #[cfg(feature = "production")]
        let _ = (file, line);
        self
    }

    /// No-op unless the `backtrace` feature is on.
    #[inline]
    pub fn capture_backtrace(&mut self) {
        #[cfg(feature = "backtrace")]
        if self.backtrace.is_none() {
            self.backtrace = Some(std::backtrace::Backtrace::capture().to_string());
        }
    }

    pub fn message(&self) -> &str {
        #[cfg(not(feature = "production"))]
        return &self.diag.message;
        #[cfg(feature = "production")]
        return "";
    }

    /// `file!()`/`line!()` of the `fault!` call that built this context.
    pub fn location(&self) -> Option<(&'static str, u32)> {
        #[cfg(not(feature = "production"))]
        return self.diag.location;
        #[cfg(feature = "production")]
        return None;
    }

    pub fn meta(&self, key: &str) -> Option<&str> {
        #[cfg(not(feature = "production"))]
        return self.diag.metadata.get(key).map(String::as_str);
        #[cfg(feature = "production")]
        let _ = key;
        #[cfg(feature = "production")]
        return None;
    }

    pub fn backtrace(&self) -> Option<&str> {
        #[cfg(feature = "backtrace")]
        return self.backtrace.as_deref();
        #[cfg(not(feature = "backtrace"))]
        return None;
    }
}

impl fmt::Debug for FaultContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("FaultContext");
        d.field("domain", &self.domain).field("code", &self.code);

        if !self.message().is_empty() {
            d.field("message", &self.message());
        }
        if let Some((file, line)) = self.location() {
            d.field("location", &format_args!("{}:{}", file, line));
        }
        #[cfg(not(feature = "production"))]
        if !self.diag.metadata.is_empty() {
            d.field("metadata", &self.diag.metadata);
        }
        if let Some(src) = &self.source {
            d.field("source", &format_args!("{}", src));
        }
        if self.payload.is_some() {
            d.field("payload", &"<opaque>");
        }
        if self.backtrace().is_some() {
            d.field("backtrace", &"<captured>");
        }
        d.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN_TEST: FaultCode = FaultCode::new("test", 1000);

    #[test]
    fn builder_fills_diagnostics() {
        let ctx = FaultContext::new(DOMAIN_TEST, FaultCode::UNSET)
            .with_message("bad tag")
            .with_meta("tag", "Retry")
            .with_location("lib.rs", 7);
        assert_eq!(ctx.domain, DOMAIN_TEST);
        if cfg!(feature = "production") {
            assert_eq!(ctx.message(), "");
            assert_eq!(ctx.meta("tag"), None);
            assert_eq!(ctx.location(), None);
        } else {
            assert_eq!(ctx.message(), "bad tag");
            assert_eq!(ctx.meta("tag"), Some("Retry"));
            assert_eq!(ctx.location(), Some(("lib.rs", 7)));
        }
    }

    #[test]
    fn debug_hides_payload() {
        let ctx = FaultContext::default().with_payload(Box::new(5_u8));
        let rendered = format!("{:?}", ctx);
        assert!(rendered.contains("<opaque>"), "{rendered}");
    }
}

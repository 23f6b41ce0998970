/// A numeric classifier for faults, with a human-readable name in
/// development builds.
///
/// With `--features production` the `name` is stripped and only the `u64`
/// survives. Equality and hashing look at the number only.
///
/// # Code ranges
///
/// | Range         | Owner                          |
/// |---------------|--------------------------------|
/// | `0`           | `UNSET`                        |
/// | `1 - 99`      | gfault well-known domains      |
/// | `100 - 199`   | `std::io::ErrorKind` mapping   |
/// | `1000+`       | Application space              |
#[derive(Clone, Copy)]
pub struct FaultCode {
    #[cfg(not(feature = "production"))]
    pub name: &'static str,
    pub code: u64,
}

impl FaultCode {
    /// ```
    /// use gfault::FaultCode;
    /// const DOMAIN_BILLING: FaultCode = FaultCode::new("billing", 1000);
    /// ```
    #[cfg(not(feature = "production"))]
    pub const fn new(name: &'static str, code: u64) -> Self {
        Self { name, code }
    }

    #[cfg(feature = "production")]
    pub const fn new(_name: &'static str, code: u64) -> Self {
        Self { code }
    }

    /// Sentinel for unset / don't-care fields.
    pub const UNSET: FaultCode = FaultCode::new("unset", 0);

    #[inline]
    pub const fn is_unset(&self) -> bool {
        self.code == 0
    }
}

impl Default for FaultCode {
    fn default() -> Self {
        Self::UNSET
    }
}

// ── Well-known domains ────────────────────────────────────────────

/// Faults raised by unwinding panics.
pub const DOMAIN_PANIC: FaultCode = FaultCode::new("panic", 1);
/// Faults converted from `std::io::Error`.
pub const DOMAIN_IO: FaultCode = FaultCode::new("io", 2);
/// Faults wrapping some other `std::error::Error`.
pub const DOMAIN_STD: FaultCode = FaultCode::new("std", 3);
/// Faults wrapping a value of a type that is not an error at all.
pub const DOMAIN_OPAQUE: FaultCode = FaultCode::new("opaque", 4);

impl PartialEq for FaultCode {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for FaultCode {}

impl core::hash::Hash for FaultCode {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl core::fmt::Debug for FaultCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        #[cfg(not(feature = "production"))]
        {
            write!(f, "{}({})", self.name, self.code)
        }
        #[cfg(feature = "production")]
        {
            write!(f, "{}", self.code)
        }
    }
}

impl core::fmt::Display for FaultCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        #[cfg(not(feature = "production"))]
        {
            write!(f, "{}", self.name)
        }
        #[cfg(feature = "production")]
        {
            write!(f, "{}", self.code)
        }
    }
}

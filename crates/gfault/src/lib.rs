//! # gfault - Generic Fault
//!
//! A zero-dependency, structured fault value. It plays the role of "the
//! generic error" for `tagres`: panics caught by `tcf` become a `Fault`,
//! and the default discriminator predicate asks "is this a `Fault`?".
//!
//! ## Design
//!
//! `Fault` has two internal representations:
//!
//! - **Simple** (zero heap allocation): a domain `FaultCode` and a specific
//!   `FaultCode`.
//! - **Full** (boxed `FaultContext`): message, source chain, metadata,
//!   location, optional foreign payload, backtrace.
//!
//! ## Quick Start
//!
//! ```rust
//! use gfault::{fault, Fault, FaultCode};
//!
//! const DOMAIN_BILLING: FaultCode = FaultCode::new("billing", 1000);
//! const CODE_DECLINED: FaultCode = FaultCode::new("declined", 1001);
//!
//! fn charge(cents: u64) -> Result<u64, Fault> {
//!     if cents > 50_000 {
//!         return Err(fault!(DOMAIN_BILLING, CODE_DECLINED, "over card limit"));
//!     }
//!     Ok(cents)
//! }
//!
//! let fault = charge(99_999).unwrap_err();
//! assert_eq!(fault.code(), &CODE_DECLINED);
//! ```
//!
//! ## Feature Flags
//!
//! | Flag         | Effect |
//! |--------------|--------|
//! | `production` | Strips `message`, `file`, `line`, `metadata` at compile time |
//! | `backtrace`  | Captures `std::backtrace::Backtrace` in `fault!` |

mod code;
mod context;
mod fault;
#[macro_use]
mod macros;
mod convert;

// ── Public API ────────────────────────────────────────────────────

pub use code::{FaultCode, DOMAIN_IO, DOMAIN_OPAQUE, DOMAIN_PANIC, DOMAIN_STD};
pub use context::FaultContext;
pub use fault::Fault;
pub use convert::ResultExt;

/// Convenience Result alias.
pub type FaultResult<T> = Result<T, Fault>;

//! # tagres - Tagged Results
//!
//! Failure as a value: every fallible step hands back either a success or a
//! failure, each carrying a string tag, and callers branch on it instead of
//! unwinding.
//!
//! ## Features
//!
//! - **Two variants, one contract**: `Success<T>`, `Failure<E>` and the
//!   closed `Outcome<T, E>` all implement [`Contract`]
//!   (`is_ok`, `is_err`, `tag`, `match_with`, `pair`, `unwrap`)
//! - **Tags**: `"Ok"` / `"Err"` by default, replaceable without touching
//!   the payload
//! - **Deferred payloads**: wrap a future in [`Pending`]; construction never
//!   polls it and the `settle*` family awaits it on request
//! - **tcf**: try/catch/finally where the caught fault (returned `Err` or
//!   panic) is turned into the failure payload
//! - **Discriminator**: [`result`] splits a value-or-fault into an `Outcome`
//!   with a pluggable predicate
//!
//! ## Quick Start
//!
//! ```
//! use tagres::{err, ok, Contract, Outcome};
//!
//! fn lookup(id: u32) -> Outcome<&'static str, String> {
//!     match id {
//!         1 => ok("alice").into(),
//!         _ => err(format!("no user {id}")).tagged("NotFound").into(),
//!     }
//! }
//!
//! let hit = lookup(1);
//! assert!(hit.is_ok());
//! assert_eq!(hit.tag(), "Ok");
//!
//! let miss = lookup(7);
//! assert_eq!(miss.tag(), "NotFound");
//! assert_eq!(miss.pair(), (None, Some("no user 7".to_string())));
//! ```
//!
//! Deferred payloads are resolved explicitly:
//!
//! ```
//! use tagres::{ok, pending};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let later = ok(pending(async { 6 * 7 }));
//! let doubled = later.settle_with(|v| v * 2, |never| match never {}).await;
//! assert_eq!(doubled, 84);
//! # }
//! ```
//!
//! ## Environment Variables
//!
//! - `TAGRES_LOG_LEVEL` - off, error, warn, info, debug, trace (default: warn)
//! - `TAGRES_FLUSH_EPRINT=1` - flush stderr after every log line
//! - `TAGRES_STRICT_TYPES` - reject `Outcome<T, T>` (default: on)

pub mod config;
mod outcome;
pub mod tcf;
mod discriminate;

pub use outcome::{err, err_tagged, ok, ok_tagged, Failure, Outcome, Success};
pub use tcf::{tcf, Raised, Tcf};
pub use discriminate::{result, Ambiguous, Discriminator};
pub use config::{configure, strict_types, Config};

// Re-export core types
pub use tagres_core::{pending, Contract, Pending, Tag};

// Re-export kprint macros for debug logging
pub use tagres_core::{kprint, kprintln, kerror, kwarn, kinfo, kdebug, ktrace};
pub use tagres_core::kprint::{LogLevel, set_log_level, set_flush_enabled};

// Re-export env utilities
pub use tagres_core::{env_get, env_get_bool, env_get_opt, env_get_str, env_is_set};

// Re-export the fault type
pub use gfault::{fault, Fault, FaultCode};

//! # tagres-core
//!
//! Core types and traits for tagres (tagged results).
//!
//! This crate holds the pieces that do not depend on a concrete instance
//! representation. The constructors, `tcf` and the discriminator live in
//! `tagres`.
//!
//! ## Modules
//!
//! - `tag` - `Tag`, the string classifier, and the two default tags
//! - `contract` - `Contract`, the operation set shared by every instance
//! - `pending` - `Pending`, the deferred-payload marker
//! - `kprint` - Kernel-style leveled logging macros
//! - `env` - Environment variable utilities

pub mod tag;
pub mod contract;
pub mod pending;
pub mod kprint;
pub mod env;

pub use tag::Tag;
pub use contract::Contract;
pub use pending::{pending, Pending};
pub use kprint::{set_flush_enabled, set_log_level, LogLevel};
pub use env::{env_get, env_get_bool, env_get_opt, env_get_str, env_is_set};

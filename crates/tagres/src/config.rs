//! Process-wide configuration
//!
//! Nothing here changes what an instance means. The knobs cover the two
//! ambient concerns: how loudly the fault-handling seams log, and whether
//! ambiguous `Outcome<T, T>` constructions are rejected at runtime.
//!
//! # Environment Variables
//!
//! - `TAGRES_STRICT_TYPES` - reject `Outcome<T, E>` with `T == E`
//!   (default: on; off makes such instances constructible but unspecified)
//! - `TAGRES_LOG_LEVEL` / `TAGRES_FLUSH_EPRINT` - see `tagres_core::kprint`

use std::sync::atomic::{AtomicU8, Ordering};

use tagres_core::env::{env_get, env_get_bool};
use tagres_core::kprint::{self, ENV_FLUSH_EPRINT, ENV_LOG_LEVEL};
use tagres_core::LogLevel;

pub const ENV_STRICT_TYPES: &str = "TAGRES_STRICT_TYPES";

const STRICT_UNSET: u8 = 0;
const STRICT_OFF: u8 = 1;
const STRICT_ON: u8 = 2;

static STRICT_TYPES: AtomicU8 = AtomicU8::new(STRICT_UNSET);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Panic when an `Outcome` is formed whose success and failure types
    /// are the same type. Off is unsupported outside benchmarks.
    pub strict_types: bool,

    /// Level for the `k*!` log macros.
    pub log_level: LogLevel,

    /// Flush stderr after every log line.
    pub flush_eprint: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict_types: true,
            log_level: LogLevel::Warn,
            flush_eprint: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by whatever the environment sets.
    pub fn from_env() -> Self {
        let base = Self::default();
        Self {
            strict_types: env_get_bool(ENV_STRICT_TYPES, base.strict_types),
            log_level: env_get(ENV_LOG_LEVEL, base.log_level),
            flush_eprint: env_get_bool(ENV_FLUSH_EPRINT, base.flush_eprint),
        }
    }

    pub fn strict_types(mut self, enable: bool) -> Self {
        self.strict_types = enable;
        self
    }

    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    pub fn flush_eprint(mut self, enable: bool) -> Self {
        self.flush_eprint = enable;
        self
    }
}

/// Install `config` for the whole process.
///
/// Without a call to `configure`, each setting is read from the
/// environment the first time it is needed.
pub fn configure(config: Config) {
    let strict = if config.strict_types { STRICT_ON } else { STRICT_OFF };
    STRICT_TYPES.store(strict, Ordering::Relaxed);
    kprint::set_log_level(config.log_level);
    kprint::set_flush_enabled(config.flush_eprint);
}

/// Whether ambiguous `Outcome<T, T>` constructions are rejected.
pub fn strict_types() -> bool {
    match STRICT_TYPES.load(Ordering::Relaxed) {
        STRICT_ON => true,
        STRICT_OFF => false,
        _ => {
            let strict = env_get_bool(ENV_STRICT_TYPES, Config::default().strict_types);
            let flag = if strict { STRICT_ON } else { STRICT_OFF };
            // A concurrent `configure` wins over the lazy env read.
            let _ = STRICT_TYPES.compare_exchange(STRICT_UNSET, flag, Ordering::Relaxed, Ordering::Relaxed);
            STRICT_TYPES.load(Ordering::Relaxed) == STRICT_ON
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_strict() {
        let config = Config::default();
        assert!(config.strict_types);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert!(!config.flush_eprint);
    }

    #[test]
    fn builder_overrides() {
        let config = Config::new()
            .strict_types(false)
            .log_level(LogLevel::Trace)
            .flush_eprint(true);
        assert!(!config.strict_types);
        assert_eq!(config.log_level, LogLevel::Trace);
        assert!(config.flush_eprint);
    }

    #[test]
    fn from_env_without_overrides_is_default() {
        if std::env::var_os(ENV_STRICT_TYPES).is_none()
            && std::env::var_os(ENV_LOG_LEVEL).is_none()
            && std::env::var_os(ENV_FLUSH_EPRINT).is_none()
        {
            assert_eq!(Config::from_env(), Config::default());
        }
    }
}

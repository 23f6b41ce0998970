//! Kernel-style print macros for tagres
//!
//! Leveled, line-atomic output on stderr. The library only logs at its
//! fault-handling seams (`tcf`, the discriminator); nothing is printed on
//! the `ok`/`err`/`match_with` paths.
//!
//! # Environment Variables
//!
//! - `TAGRES_FLUSH_EPRINT=1` - Flush stderr after each line
//! - `TAGRES_LOG_LEVEL=<level>` - off, error, warn, info, debug, trace (or 0-5).
//!   Default: warn.
//!
//! # Usage
//!
//! ```ignore
//! use tagres_core::{kdebug, kwarn};
//!
//! kdebug!("classified as {}", tag);
//! kwarn!("panic caught in try: {}", fault);
//! ```

use std::fmt;
use std::io::Write;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Once;

use crate::env::{env_get_bool, env_get_opt};

pub const ENV_LOG_LEVEL: &str = "TAGRES_LOG_LEVEL";
pub const ENV_FLUSH_EPRINT: &str = "TAGRES_FLUSH_EPRINT";

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Off = 0,
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

cfg_if::cfg_if! {
    if #[cfg(feature = "quiet")] {
        /// Compile-time ceiling; anything above it never reaches stderr.
        pub const MAX_LEVEL: LogLevel = LogLevel::Error;
    } else {
        /// Compile-time ceiling; anything above it never reaches stderr.
        pub const MAX_LEVEL: LogLevel = LogLevel::Trace;
    }
}

impl LogLevel {
    const ALL: [LogLevel; 6] = [
        LogLevel::Off,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ];

    /// Out-of-range values saturate to `Trace`.
    pub fn from_u8(v: u8) -> Self {
        Self::ALL[usize::from(v.min(5))]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Line prefix, padded so messages line up.
    pub fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Off => "",
            LogLevel::Error => "[tagres ERROR]",
            LogLevel::Warn => "[tagres WARN] ",
            LogLevel::Info => "[tagres INFO] ",
            LogLevel::Debug => "[tagres DEBUG]",
            LogLevel::Trace => "[tagres TRACE]",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ();

    /// Accepts the level name in any case, or its number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u8>() {
            return if n <= 5 { Ok(Self::from_u8(n)) } else { Err(()) };
        }
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

// Low three bits: level. Bit 3: flush.
const LEVEL_MASK: u8 = 0b0111;
const FLUSH_BIT: u8 = 0b1000;

static STATE: AtomicU8 = AtomicU8::new(LogLevel::Warn as u8);
static ENV_READ: Once = Once::new();

/// Read `TAGRES_LOG_LEVEL` and `TAGRES_FLUSH_EPRINT` into the global state.
///
/// Runs at most once. The first log call triggers it; a `set_*` call marks
/// it done so the environment can no longer override a programmatic choice.
pub fn init() {
    ENV_READ.call_once(|| {
        if let Some(level) = env_get_opt::<LogLevel>(ENV_LOG_LEVEL) {
            store_level(level);
        }
        store_flush(env_get_bool(ENV_FLUSH_EPRINT, false));
    });
}

fn store_level(level: LogLevel) {
    let _ = STATE.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |s| {
        Some((s & !LEVEL_MASK) | level as u8)
    });
}

fn store_flush(enabled: bool) {
    if enabled {
        STATE.fetch_or(FLUSH_BIT, Ordering::Relaxed);
    } else {
        STATE.fetch_and(!FLUSH_BIT, Ordering::Relaxed);
    }
}

#[inline]
fn state() -> u8 {
    init();
    STATE.load(Ordering::Relaxed)
}

#[inline]
pub fn flush_enabled() -> bool {
    state() & FLUSH_BIT != 0
}

#[inline]
pub fn log_level() -> LogLevel {
    LogLevel::from_u8(state() & LEVEL_MASK)
}

pub fn set_log_level(level: LogLevel) {
    ENV_READ.call_once(|| {});
    store_level(level);
}

pub fn set_flush_enabled(enabled: bool) {
    ENV_READ.call_once(|| {});
    store_flush(enabled);
}

#[inline]
pub fn level_enabled(level: LogLevel) -> bool {
    level != LogLevel::Off && level <= MAX_LEVEL && level <= log_level()
}

fn emit(prefix: Option<&str>, args: fmt::Arguments<'_>) {
    let mut err = std::io::stderr().lock();
    if let Some(prefix) = prefix {
        let _ = write!(err, "{} ", prefix);
    }
    let _ = writeln!(err, "{}", args);
    if flush_enabled() {
        let _ = err.flush();
    }
}

#[doc(hidden)]
pub fn _kprintln_impl(args: fmt::Arguments<'_>) {
    emit(None, args);
}

#[doc(hidden)]
pub fn _klog_impl(level: LogLevel, args: fmt::Arguments<'_>) {
    if level_enabled(level) {
        emit(Some(level.prefix()), args);
    }
}

// ============================================================================
// Public Macros
// ============================================================================

/// Print a line to stderr, ignoring the level filter.
#[macro_export]
macro_rules! kprintln {
    () => {
        $crate::kprint::_kprintln_impl(format_args!(""))
    };
    ($($arg:tt)*) => {
        $crate::kprint::_kprintln_impl(format_args!($($arg)*))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __klog {
    ($level:ident, $($arg:tt)*) => {
        $crate::kprint::_klog_impl($crate::kprint::LogLevel::$level, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! kerror {
    ($($arg:tt)*) => { $crate::__klog!(Error, $($arg)*) };
}

#[macro_export]
macro_rules! kwarn {
    ($($arg:tt)*) => { $crate::__klog!(Warn, $($arg)*) };
}

#[macro_export]
macro_rules! kinfo {
    ($($arg:tt)*) => { $crate::__klog!(Info, $($arg)*) };
}

#[macro_export]
macro_rules! kdebug {
    ($($arg:tt)*) => { $crate::__klog!(Debug, $($arg)*) };
}

#[macro_export]
macro_rules! ktrace {
    ($($arg:tt)*) => { $crate::__klog!(Trace, $($arg)*) };
}

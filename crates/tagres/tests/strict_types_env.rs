//! The lazy `TAGRES_STRICT_TYPES` read when `configure` is never called.
//!
//! Own test binary: the variable is read once per process.
//!
//! Run with: cargo test -p tagres --test strict_types_env

use tagres::config::ENV_STRICT_TYPES;
use tagres::{ok, strict_types, Contract, Outcome};

#[test]
fn env_switch_is_read_once_on_first_use() {
    std::env::set_var(ENV_STRICT_TYPES, "0");
    assert!(!strict_types());

    let outcome: Outcome<u32, u32> = ok(5_u32).into();
    assert_eq!(outcome.unwrap(), Ok(5));

    // Cached after the first read.
    std::env::set_var(ENV_STRICT_TYPES, "1");
    assert!(!strict_types());
}

//! `configure` switching the same-type check at runtime.
//!
//! Own test binary: the setting is process-wide, so everything that
//! touches it lives in one test.
//!
//! Run with: cargo test -p tagres --test strict_types

use std::panic;

use tagres::{configure, err, ok, strict_types, Config, Contract, Outcome};

fn same_types() -> Outcome<String, String> {
    ok(String::from("left")).into()
}

#[test]
fn configure_toggles_the_same_type_check() {
    configure(Config::new().strict_types(false));
    assert!(!strict_types());
    let outcome = same_types();
    assert!(outcome.is_ok());
    assert_eq!(outcome.unwrap(), Ok(String::from("left")));

    configure(Config::new().strict_types(true));
    assert!(strict_types());
    assert!(panic::catch_unwind(same_types).is_err());
    let failed = panic::catch_unwind(|| -> Outcome<u8, u8> { err(1_u8).into() });
    assert!(failed.is_err());

    let distinct: Outcome<u8, String> = err(String::from("still fine")).into();
    assert!(distinct.is_err());
}

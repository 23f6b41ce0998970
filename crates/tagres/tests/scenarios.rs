//! End-to-end scenarios across the three entry points.
//!
//! Run with: cargo test -p tagres --test scenarios

use std::any::Any;
use std::cell::Cell;
use std::fmt;

use tagres::{
    err, err_tagged, fault, ok, ok_tagged, pending, result, tcf, Contract, Discriminator, Fault,
    FaultCode, Outcome, Raised, Tcf,
};

const DOMAIN_STORE: FaultCode = FaultCode::new("store", 3000);
const CODE_MISSING: FaultCode = FaultCode::new("missing", 3001);

#[derive(Debug, PartialEq)]
struct CustomError(String);

impl fmt::Display for CustomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "custom: {}", self.0)
    }
}

impl std::error::Error for CustomError {}

#[derive(Debug, PartialEq)]
struct HandledError {
    message: String,
}

fn load(key: &str) -> Result<u64, CustomError> {
    match key {
        "answer" => Ok(42),
        other => Err(CustomError(format!("{other} not stored"))),
    }
}

// ── Contract laws ────────────────────────────────────────────────

#[test]
fn contract_laws_hold_for_both_variants() {
    let success: Outcome<u64, CustomError> = ok(5).into();
    assert!(success.is_ok() && !success.is_err());
    assert_eq!(success.as_ref().pair(), (Some(&5), None));
    assert_eq!(success.as_ref().match_with(|v| v + 1, |_| 0), 6);
    assert_eq!(success.unwrap(), Ok(5));

    let failure: Outcome<u64, CustomError> = err(CustomError("x".into())).into();
    assert!(failure.is_err() && !failure.is_ok());
    assert_eq!(failure.as_ref().pair(), (None, Some(&CustomError("x".into()))));
    assert_eq!(failure.as_ref().match_with(|_| "ok", |_| "err"), "err");
    assert_eq!(failure.unwrap(), Err(CustomError("x".into())));
}

#[test]
fn exactly_one_handler_runs() {
    let ok_calls = Cell::new(0);
    let err_calls = Cell::new(0);
    let outcomes: Vec<Outcome<u8, &str>> = vec![ok(1).into(), err("no").into(), ok(2).into()];
    for outcome in outcomes {
        outcome.match_with(|_| ok_calls.set(ok_calls.get() + 1), |_| err_calls.set(err_calls.get() + 1));
    }
    assert_eq!((ok_calls.get(), err_calls.get()), (2, 1));
}

#[test]
fn tags_are_independent_of_branch() {
    let odd: Outcome<u8, String> = ok_tagged(3, "Odd").into();
    let shouting: Outcome<u8, String> = err_tagged("LOUD".to_string(), "Ok").into();
    assert_eq!(odd.tag(), "Odd");
    // A failure may carry the "Ok" tag; the branch is decided by the variant.
    assert!(shouting.is_err());
    assert_eq!(shouting.tag(), "Ok");
}

#[test]
fn result_interop() {
    let from_std: Outcome<u64, CustomError> = load("answer").into();
    assert_eq!(from_std.tag(), "Ok");

    let back: Result<u64, CustomError> = Outcome::from(load("nope")).into();
    assert_eq!(back, Err(CustomError("nope not stored".into())));
}

// ── tcf ──────────────────────────────────────────────────────────

#[test]
fn failing_try_becomes_tagged_failure() {
    let cleanups = Cell::new(0);
    let outcome = Tcf::new(
        || load("boom").map(|_| ()),
        |raised: Raised<CustomError>| HandledError {
            message: match raised {
                Raised::Error(e) => e.0,
                Raised::Panic(fault) => fault.to_string(),
            },
        },
    )
    .finally(|| cleanups.set(cleanups.get() + 1))
    .tag_err("FAILED")
    .run();

    assert_eq!(outcome.tag(), "FAILED");
    assert_eq!(cleanups.get(), 1);
    assert_eq!(outcome.unwrap(), Err(HandledError { message: "boom not stored".into() }));
}

#[test]
fn panics_become_faults() {
    let outcome = tcf(
        || -> Result<u64, CustomError> { std::panic::panic_any(fault!(DOMAIN_STORE, CODE_MISSING, "gone")) },
        |raised: Raised<CustomError>| match raised {
            Raised::Panic(fault) => fault,
            Raised::Error(e) => Fault::from_std(e),
        },
    );
    let fault = outcome.unwrap().err();
    assert_eq!(fault.as_ref().map(Fault::code), Some(&CODE_MISSING));
}

#[tokio::test]
async fn deferred_value_survives_tcf_and_settles_later() {
    let outcome = Tcf::new(
        || Ok::<_, CustomError>(pending(async { load("answer") })),
        |raised: Raised<CustomError>| raised.to_string(),
    )
    .tag_ok("Scheduled")
    .run();

    assert!(outcome.is_ok());
    assert_eq!(outcome.tag(), "Scheduled");
    let settled = outcome.settle_ok().await;
    assert_eq!(settled.tag(), "Scheduled");
    assert_eq!(settled.unwrap(), Ok(Ok(42)));
}

#[tokio::test]
async fn run_async_sees_rejections() {
    let outcome = Tcf::new(
        || async { load("later") },
        |raised: Raised<CustomError>| raised.to_string(),
    )
    .run_async()
    .await;
    assert_eq!(outcome.unwrap(), Err("custom: later not stored".to_string()));
}

// ── Discriminator ────────────────────────────────────────────────

#[test]
fn discriminator_over_type_erased_values() {
    let values: Vec<Box<dyn Any + Send>> = vec![
        Box::new(1_u8),
        Box::new(fault!(DOMAIN_STORE, CODE_MISSING, "no row")),
        Box::new("text"),
    ];
    let kinds: Vec<bool> = values.into_iter().map(|v| result(v).is_ok()).collect();
    assert_eq!(kinds, vec![true, false, true]);
}

#[test]
fn discriminator_tags_pass_through() {
    let value: Box<dyn Any + Send> = Box::new(Fault::msg("bad"));
    let outcome = Discriminator::new().tag_ok("Fine").tag_err("Broken").classify(value);
    assert!(outcome.is_err());
    assert_eq!(outcome.tag(), "Broken");
}

//! try/catch/finally as data.
//!
//! `tcf` is the one place where tagres intercepts faults. A fault raised by
//! the `try` step (an `Err` it returns, or a panic unwinding out of it) is
//! handed to the `catch` step, and whatever `catch` returns becomes the
//! failure payload. The raw fault never reaches the `Outcome`.
//!
//! ```
//! use tagres::{Contract, Raised, Tcf};
//!
//! let parsed = Tcf::new(|| "42".parse::<u32>(), |raised: Raised<_>| raised.to_string())
//!     .tag_err("BadInput")
//!     .run();
//! assert_eq!(parsed.unwrap(), Ok(42));
//! ```

use std::fmt;
use std::future::IntoFuture;
use std::panic::{self, AssertUnwindSafe};

use gfault::Fault;
use tagres_core::{kdebug, ktrace, kwarn, Tag};

use crate::outcome::{err, ok, Outcome};

/// What the `try` step raised.
#[derive(Debug)]
pub enum Raised<X> {
    /// The `try` step returned `Err(X)`.
    Error(X),
    /// The `try` step panicked; the payload converted to a `Fault`.
    Panic(Fault),
}

impl<X> Raised<X> {
    pub fn is_panic(&self) -> bool {
        matches!(self, Raised::Panic(_))
    }

    /// The returned error, if the `try` step did not panic.
    pub fn into_error(self) -> Option<X> {
        match self {
            Raised::Error(x) => Some(x),
            Raised::Panic(_) => None,
        }
    }

    /// Collapse both cases into a `Fault`.
    pub fn into_fault(self) -> Fault
    where
        X: Into<Fault>,
    {
        match self {
            Raised::Error(x) => x.into(),
            Raised::Panic(fault) => fault,
        }
    }
}

impl<X: fmt::Display> fmt::Display for Raised<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Raised::Error(x) => fmt::Display::fmt(x, f),
            Raised::Panic(fault) => write!(f, "panic: {}", fault),
        }
    }
}

/// Runs the finally step when dropped: after either branch, on unwind out
/// of `catch`, and when a `run_async` future is dropped mid-flight.
struct FinallyGuard<Fin: FnOnce()>(Option<Fin>);

impl<Fin: FnOnce()> Drop for FinallyGuard<Fin> {
    fn drop(&mut self) {
        if let Some(finally_fn) = self.0.take() {
            ktrace!("tcf: running finally");
            finally_fn();
        }
    }
}

/// Builder for one try/catch/finally run.
///
/// The `finally` step, when given, runs exactly once per `run`. If it
/// panics while a panic from `catch` is already unwinding, the process
/// aborts.
///
/// A panic caught in `try` still goes through the process panic hook
/// before it reaches `catch`, so the default hook prints its message to
/// stderr. Install a quiet hook with [`std::panic::set_hook`] to silence it.
#[must_use = "nothing runs until `run` or `run_async` is called"]
pub struct Tcf<Try, Catch, Fin = fn()> {
    try_fn: Try,
    catch_fn: Catch,
    finally_fn: Option<Fin>,
    tag_ok: Option<Tag>,
    tag_err: Option<Tag>,
}

impl<Try, Catch> Tcf<Try, Catch> {
    pub fn new(try_fn: Try, catch_fn: Catch) -> Self {
        Self {
            try_fn,
            catch_fn,
            finally_fn: None,
            tag_ok: None,
            tag_err: None,
        }
    }
}

impl<Try, Catch, Fin> Tcf<Try, Catch, Fin> {
    pub fn finally<F>(self, finally_fn: F) -> Tcf<Try, Catch, F>
    where
        F: FnOnce(),
    {
        Tcf {
            try_fn: self.try_fn,
            catch_fn: self.catch_fn,
            finally_fn: Some(finally_fn),
            tag_ok: self.tag_ok,
            tag_err: self.tag_err,
        }
    }

    /// Tag attached to the success, if `try` succeeds.
    pub fn tag_ok(mut self, tag: impl Into<Tag>) -> Self {
        self.tag_ok = Some(tag.into());
        self
    }

    /// Tag attached to the failure, if `try` raises.
    pub fn tag_err(mut self, tag: impl Into<Tag>) -> Self {
        self.tag_err = Some(tag.into());
        self
    }

    /// Run synchronously.
    ///
    /// A `try` step returning a deferred value (`Pending`) counts as a
    /// success as soon as it returns; a later failure of that computation
    /// is not routed to `catch`. Use [`Tcf::run_async`] for that.
    pub fn run<T, X, E>(self) -> Outcome<T, E>
    where
        Try: FnOnce() -> Result<T, X>,
        Catch: FnOnce(Raised<X>) -> E,
        Fin: FnOnce(),
    {
        let Tcf { try_fn, catch_fn, finally_fn, tag_ok, tag_err } = self;
        let _finally = FinallyGuard(finally_fn);

        let raised = match panic::catch_unwind(AssertUnwindSafe(try_fn)) {
            Ok(Ok(value)) => return succeed(value, tag_ok),
            Ok(Err(error)) => {
                kdebug!("tcf: try returned an error, handing it to catch");
                Raised::Error(error)
            }
            Err(payload) => {
                let fault = Fault::from_panic(payload);
                kwarn!("tcf: panic caught in try: {}", fault);
                Raised::Panic(fault)
            }
        };

        fail(catch_fn(raised), tag_err)
    }

    /// Run a `try` step that produces a future, awaiting it before
    /// deciding the branch. An `Err` the future resolves to goes to
    /// `catch`, as does a panic while *creating* the future. A panic while
    /// polling it propagates to the caller; `finally` still runs once.
    pub async fn run_async<Fut, T, X, E>(self) -> Outcome<T, E>
    where
        Try: FnOnce() -> Fut,
        Fut: IntoFuture<Output = Result<T, X>>,
        Catch: FnOnce(Raised<X>) -> E,
        Fin: FnOnce(),
    {
        let Tcf { try_fn, catch_fn, finally_fn, tag_ok, tag_err } = self;
        let _finally = FinallyGuard(finally_fn);

        let raised = match panic::catch_unwind(AssertUnwindSafe(try_fn)) {
            Ok(fut) => match fut.await {
                Ok(value) => return succeed(value, tag_ok),
                Err(error) => {
                    kdebug!("tcf: awaited try resolved to an error, handing it to catch");
                    Raised::Error(error)
                }
            },
            Err(payload) => {
                let fault = Fault::from_panic(payload);
                kwarn!("tcf: panic caught while starting try: {}", fault);
                Raised::Panic(fault)
            }
        };

        fail(catch_fn(raised), tag_err)
    }
}

fn succeed<T, E>(value: T, tag: Option<Tag>) -> Outcome<T, E> {
    match tag {
        Some(tag) => ok(value).tagged(tag).into(),
        None => ok(value).into(),
    }
}

fn fail<T, E>(error: E, tag: Option<Tag>) -> Outcome<T, E> {
    match tag {
        Some(tag) => err(error).tagged(tag).into(),
        None => err(error).into(),
    }
}

/// Short form of `Tcf::new(try_fn, catch_fn).run()`.
pub fn tcf<T, X, E, Try, Catch>(try_fn: Try, catch_fn: Catch) -> Outcome<T, E>
where
    Try: FnOnce() -> Result<T, X>,
    Catch: FnOnce(Raised<X>) -> E,
{
    Tcf::new(try_fn, catch_fn).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::convert::Infallible;
    use std::future::Ready;
    use tagres_core::{pending, Contract, Pending};

    #[derive(Debug, PartialEq)]
    struct CustomError(String);

    impl fmt::Display for CustomError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    #[derive(Debug, PartialEq)]
    struct HandledError {
        message: String,
    }

    #[test]
    fn try_success_runs_finally_once_and_skips_catch() {
        let finally_runs = Cell::new(0);
        let catch_runs = Cell::new(0);
        let outcome = Tcf::new(
            || Ok::<_, CustomError>("x"),
            |_: Raised<CustomError>| {
                catch_runs.set(catch_runs.get() + 1);
                HandledError { message: String::new() }
            },
        )
        .finally(|| finally_runs.set(finally_runs.get() + 1))
        .run();

        assert_eq!(outcome.unwrap(), Ok("x"));
        assert_eq!(catch_runs.get(), 0);
        assert_eq!(finally_runs.get(), 1);
    }

    #[test]
    fn try_error_goes_through_catch() {
        let finally_runs = Cell::new(0);
        let outcome = Tcf::new(
            || Err::<u32, _>(CustomError("F".into())),
            |raised: Raised<CustomError>| HandledError {
                message: format!("wrapped {}", raised.into_error().map(|e| e.0).unwrap_or_default()),
            },
        )
        .finally(|| finally_runs.set(finally_runs.get() + 1))
        .run();

        assert!(outcome.is_err());
        assert_eq!(outcome.tag(), "Err");
        assert_eq!(outcome.unwrap(), Err(HandledError { message: "wrapped F".into() }));
        assert_eq!(finally_runs.get(), 1);
    }

    #[test]
    fn panic_in_try_is_caught() {
        let finally_runs = Cell::new(0);
        let outcome = Tcf::new(
            || -> Result<u32, CustomError> { panic!("exploded") },
            |raised: Raised<CustomError>| {
                assert!(raised.is_panic());
                raised.to_string()
            },
        )
        .finally(|| finally_runs.set(finally_runs.get() + 1))
        .run();

        let message = outcome.unwrap().unwrap_err();
        assert!(message.starts_with("panic:"));
        #[cfg(not(feature = "production"))]
        assert!(message.contains("exploded"), "{message}");
        assert_eq!(finally_runs.get(), 1);
    }

    #[test]
    fn raised_error_displays_as_the_error() {
        let raised: Raised<CustomError> = Raised::Error(CustomError("F".into()));
        assert_eq!(raised.to_string(), "F");
    }

    #[test]
    fn finally_runs_when_catch_panics() {
        let finally_runs = Cell::new(0);
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            Tcf::new(
                || Err::<u8, _>(CustomError("bad".into())),
                |_: Raised<CustomError>| -> HandledError { panic!("catch blew up") },
            )
            .finally(|| finally_runs.set(finally_runs.get() + 1))
            .run()
        }));
        assert!(result.is_err());
        assert_eq!(finally_runs.get(), 1);
    }

    #[test]
    fn finally_runs_after_try_and_catch() {
        let steps = RefCell::new(Vec::new());
        let _ = Tcf::new(
            || {
                steps.borrow_mut().push("try");
                Err::<u8, _>(CustomError("x".into()))
            },
            |_: Raised<CustomError>| {
                steps.borrow_mut().push("catch");
                HandledError { message: "x".into() }
            },
        )
        .finally(|| steps.borrow_mut().push("finally"))
        .run();
        assert_eq!(*steps.borrow(), vec!["try", "catch", "finally"]);
    }

    #[test]
    fn tags_follow_the_branch() {
        let good = Tcf::new(|| Ok::<_, CustomError>(1u8), |_: Raised<CustomError>| HandledError { message: String::new() })
            .tag_ok("Fresh")
            .tag_err("Stale")
            .run();
        assert_eq!(good.tag(), "Fresh");

        let bad = Tcf::new(
            || Err::<u8, _>(CustomError("boom".into())),
            |_: Raised<CustomError>| HandledError { message: String::new() },
        )
        .tag_ok("Fresh")
        .tag_err("Stale")
        .run();
        assert_eq!(bad.tag(), "Stale");
    }

    #[test]
    fn boom_scenario() {
        let outcome = Tcf::new(
            || Err::<(), _>(CustomError("boom".into())),
            |raised: Raised<CustomError>| HandledError {
                message: raised.into_error().map(|e| e.0).unwrap_or_default(),
            },
        )
        .tag_err("FAILED")
        .run();

        assert!(outcome.is_err());
        assert_eq!(outcome.tag(), "FAILED");
        let handled = outcome.err_ref().map(|f| f.error().message.clone());
        assert_eq!(handled.as_deref(), Some("boom"));
    }

    #[test]
    fn short_form() {
        let outcome = tcf(|| "7".parse::<i64>(), |raised| raised.to_string());
        assert_eq!(outcome.unwrap(), Ok(7));

        let outcome = tcf(|| "seven".parse::<i64>(), |raised| raised.to_string());
        assert!(outcome.is_err());
    }

    #[tokio::test]
    async fn pending_try_value_is_wrapped_unawaited() {
        let outcome = Tcf::new(
            || Ok::<_, CustomError>(pending(async { 5u8 })),
            |_: Raised<CustomError>| Pending::ready(HandledError { message: String::new() }),
        )
        .run();
        assert!(outcome.is_ok());
        assert_eq!(outcome.settle_pair().await, (Some(5), None));
    }

    #[tokio::test]
    async fn pending_catch_value_is_wrapped_unawaited() {
        let outcome: Outcome<u8, Pending<Ready<HandledError>>> = Tcf::new(
            || Err(CustomError("later".into())),
            |raised: Raised<CustomError>| {
                Pending::ready(HandledError { message: raised.into_error().map(|e| e.0).unwrap_or_default() })
            },
        )
        .run();
        let settled = outcome.settle_err().await;
        assert_eq!(settled.unwrap(), Err(HandledError { message: "later".into() }));
    }

    #[tokio::test]
    async fn run_async_routes_resolved_error_to_catch() {
        let finally_runs = Cell::new(0);
        let outcome = Tcf::new(
            || async { Err::<u8, _>(CustomError("rejected".into())) },
            |raised: Raised<CustomError>| HandledError {
                message: raised.into_error().map(|e| e.0).unwrap_or_default(),
            },
        )
        .finally(|| finally_runs.set(finally_runs.get() + 1))
        .tag_err("Rejected")
        .run_async()
        .await;

        assert_eq!(outcome.tag(), "Rejected");
        assert_eq!(outcome.unwrap(), Err(HandledError { message: "rejected".into() }));
        assert_eq!(finally_runs.get(), 1);
    }

    #[tokio::test]
    async fn run_async_success() {
        let outcome = Tcf::new(
            || async { Ok::<_, Infallible>(String::from("done")) },
            |_: Raised<Infallible>| HandledError { message: String::new() },
        )
        .run_async()
        .await;
        assert_eq!(outcome.unwrap(), Ok(String::from("done")));
    }

    #[test]
    fn raised_into_fault() {
        let raised: Raised<std::io::Error> = Raised::Error(std::io::Error::new(std::io::ErrorKind::Other, "io"));
        assert_eq!(raised.into_fault().domain(), &gfault::DOMAIN_IO);

        let raised: Raised<std::io::Error> = Raised::Panic(Fault::msg("p"));
        assert!(raised.into_fault().domain().is_unset());
    }
}

//! Basic tagres walkthrough
//!
//! Touches every entry point once: constructors, tags, tcf, the
//! discriminator and deferred payloads.
//!
//! # Environment Variables
//!
//! - `TAGRES_FLUSH_EPRINT=1` - Flush log output immediately
//! - `TAGRES_LOG_LEVEL=trace` - Set log level (off, error, warn, info, debug, trace)
//! - `TAGRES_STRICT_TYPES=0` - Stop rejecting `Outcome<T, T>` (unsupported)

use std::any::Any;
use std::time::Duration;

use tagres::{
    configure, err, fault, ok, ok_tagged, pending, result, Config, Contract, Discriminator, Fault,
    FaultCode, Outcome, Raised, Tcf,
};
use tagres::{kdebug, kinfo};

const DOMAIN_INVENTORY: FaultCode = FaultCode::new("inventory", 100);
const CODE_OUT_OF_STOCK: FaultCode = FaultCode::new("out_of_stock", 101);

#[derive(Debug)]
struct Shortage {
    sku: &'static str,
    missing: u32,
}

fn reserve(sku: &'static str, wanted: u32, on_hand: u32) -> Outcome<u32, Shortage> {
    if wanted <= on_hand {
        ok_tagged(on_hand - wanted, "Reserved").into()
    } else {
        err(Shortage { sku, missing: wanted - on_hand }).tagged("Backorder").into()
    }
}

// TAGRES_LOG_LEVEL=trace TAGRES_FLUSH_EPRINT=1 cargo run -p tagres-basic
#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("=== tagres Basic Example ===\n");

    // Reads TAGRES_* from the environment; builder calls override.
    configure(Config::from_env());

    // ── Constructors and tags ──
    for (sku, wanted) in [("widget", 3), ("gadget", 12)] {
        let outcome = reserve(sku, wanted, 10);
        let line = outcome.as_ref().match_with(
            |left| format!("{} left", left),
            |s| format!("{} short by {}", s.sku, s.missing),
        );
        println!("reserve {:>6} x{:<2} -> [{}] {}", sku, wanted, outcome.tag(), line);
    }

    // ── tcf ──
    let parsed = Tcf::new(
        || "12x".parse::<u32>(),
        |raised: Raised<_>| format!("could not parse quantity: {}", raised),
    )
    .finally(|| kdebug!("parse step done"))
    .tag_err("BadInput")
    .run();
    println!("\ntcf parse          -> [{}] {:?}", parsed.tag(), parsed.as_ref().unwrap());

    let guarded = Tcf::new(
        || -> Result<u32, Fault> { std::panic::panic_any(fault!(DOMAIN_INVENTORY, CODE_OUT_OF_STOCK, "bin empty")) },
        |raised: Raised<Fault>| raised.into_fault(),
    )
    .run();
    if let Some(failure) = guarded.err_ref() {
        println!("tcf panic          -> [{}] {}", failure.tag(), failure.error());
    }

    // ── Discriminator ──
    let payloads: Vec<Box<dyn Any + Send>> = vec![
        Box::new(7_u32),
        Box::new(fault!(DOMAIN_INVENTORY, CODE_OUT_OF_STOCK, "sku retired")),
    ];
    for payload in payloads {
        println!("result()           -> {}", result(payload).tag());
    }
    let strict = Discriminator::new()
        .is_error(|v: &Box<dyn Any + Send>| !v.is::<u32>())
        .tag_err("Unexpected")
        .classify_with(Box::new("a string") as Box<dyn Any + Send>);
    println!("custom predicate   -> {}", strict.tag());

    // ── Deferred payloads ──
    let restock = ok(pending(async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        40_u32
    }));
    kinfo!("restock scheduled, not awaited yet");
    let (arrived, _) = restock.settle_pair().await;
    println!("\nrestock settled    -> {:?}", arrived);

    println!("\n=== Example Complete ===");
}

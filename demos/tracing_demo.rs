//! Demonstrates tracing integration with reapers
//!
//! Run with: cargo run --example tracing_demo --features tracing

use ebb::testing::{Journal, Outcome};
use ebb::{Destructor, Reaper};

fn main() {
    // Set up tracing subscriber
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    tracing::info!("Starting tracing demo");

    let journal = Journal::new();

    // Released composite: transitions logged at debug, assumes at trace
    let mut reaper = Reaper::new();
    for id in 0..3 {
        if let Err(err) = reaper.assume(journal.destructor(id)) {
            tracing::error!("assume failed: {}", err);
        }
    }
    match reaper.release() {
        Ok(mut dtor) => {
            if let Err(err) = dtor.destroy() {
                tracing::error!("shutdown failed: {}", err);
            }
        }
        Err(err) => tracing::error!("release failed: {}", err),
    }

    // Finalized with failures: each failing destructor logged at warn
    let mut reaper = Reaper::new();
    let steps = [Outcome::Succeed, Outcome::Fail, Outcome::Panic];
    for (id, outcome) in steps.into_iter().enumerate() {
        if let Err(err) = reaper.assume(journal.scripted(10 + id, outcome)) {
            tracing::error!("assume failed: {}", err);
        }
    }
    if let Err(err) = reaper.finalize() {
        tracing::error!("cleanup failed: {}", err);
    }

    // Dropped while accumulating: failure logged from drop
    {
        let mut reaper = Reaper::new();
        if let Err(err) = reaper.assume(journal.scripted(20, Outcome::Fail)) {
            tracing::error!("assume failed: {}", err);
        }
    }

    tracing::info!("Destructors ran in order {:?}", journal.runs());
}

//! Composite Construction Example
//!
//! Builds a `Service` out of three sub-resources with a reaper.
//!
//! Shows practical patterns including:
//! - Releasing the reaper into one destructor when construction succeeds
//! - Finalizing it when a step fails, cleaning up what was acquired so far
//! - Aggregated reporting when several destructors fail
//! - Nesting one composite inside another

use std::cell::RefCell;
use std::rc::Rc;

use ebb::prelude::*;

/// Log shared by every resource so the cleanup order is visible.
type Log = Rc<RefCell<Vec<String>>>;

struct Resource {
    name: &'static str,
}

fn acquire(
    log: &Log,
    name: &'static str,
    fail_acquire: bool,
    fail_release: bool,
) -> Result<(Resource, impl Destructor), Error> {
    if fail_acquire {
        return Err(Error::msg(format!("could not acquire {}", name)));
    }
    println!("  acquired {}", name);
    let log = log.clone();
    let dtor = destructor_fn(move || {
        log.borrow_mut().push(name.to_string());
        println!("  released {}", name);
        if fail_release {
            Err(Error::msg(format!("{} refused to close", name)))
        } else {
            Ok(())
        }
    });
    Ok((Resource { name }, dtor))
}

struct Service {
    parts: Vec<&'static str>,
}

/// Acquire `names` in order; the step at `fail_at` fails to acquire.
fn new_service(
    log: &Log,
    names: &[&'static str],
    fail_at: Option<usize>,
    failing_release: &[&'static str],
) -> Result<(Service, BoxDestructor), Error> {
    let mut reaper = Reaper::new();
    let mut parts = Vec::new();

    for (i, &name) in names.iter().enumerate() {
        match acquire(log, name, fail_at == Some(i), failing_release.contains(&name)) {
            Ok((resource, dtor)) => {
                reaper.assume(dtor)?;
                parts.push(resource.name);
            }
            Err(err) => {
                println!("  step {} failed: {}", i, err);
                if let Err(cleanup) = reaper.finalize() {
                    println!("  cleanup also failed: {}", cleanup);
                }
                return Err(err);
            }
        }
    }

    Ok((Service { parts }, reaper.release()?))
}

// ==================== Success ====================

fn example_success() {
    println!("\n=== Example 1: Successful Construction ===");
    let log: Log = Rc::default();

    match new_service(&log, &["config", "socket", "session"], None, &[]) {
        Ok((service, mut dtor)) => {
            println!("  service ready with {:?}", service.parts);
            println!("  nothing released yet: {:?}", log.borrow());
            if let Err(err) = dtor.destroy() {
                println!("  shutdown failed: {}", err);
            }
            println!("  release order: {:?}", log.borrow());
        }
        Err(err) => println!("  unexpected failure: {}", err),
    }
}

// ==================== Failure mid-construction ====================

fn example_failed_step() {
    println!("\n=== Example 2: Failure Mid-Construction ===");
    let log: Log = Rc::default();

    let result = new_service(&log, &["config", "socket", "session"], Some(2), &[]);
    println!("  construction result ok: {}", result.is_ok());
    println!("  cleaned up: {:?}", log.borrow());
}

// ==================== Aggregated failures ====================

fn example_aggregated_failures() {
    println!("\n=== Example 3: Aggregated Cleanup Failures ===");
    let log: Log = Rc::default();

    let (_, mut dtor) = match new_service(
        &log,
        &["config", "socket", "session"],
        None,
        &["config", "session"],
    ) {
        Ok(built) => built,
        Err(err) => {
            println!("  unexpected failure: {}", err);
            return;
        }
    };

    match dtor.destroy() {
        Ok(()) => println!("  shutdown succeeded"),
        Err(err) => {
            println!("  {}", err);
            if let Some(aggregate) = err.as_aggregate() {
                println!("  {} failures, every resource still released", aggregate.len());
            }
        }
    }
    println!("  release order: {:?}", log.borrow());
}

// ==================== Nesting ====================

fn example_nested() -> Result<(), Error> {
    println!("\n=== Example 4: Nested Composites ===");
    let log: Log = Rc::default();

    let (_, pool) = new_service(&log, &["conn-a", "conn-b"], None, &[])?;

    let mut outer = Reaper::new();
    let (_, config) = acquire(&log, "config", false, false)?;
    outer.assume(config)?;
    outer.assume(pool)?;
    let (_, cache) = acquire(&log, "cache", false, false)?;
    outer.assume(cache)?;

    let mut app = closable(outer.release()?);
    app.close()?;
    println!("  release order: {:?}", log.borrow());
    Ok(())
}

fn main() {
    println!("Ebb: composite construction");

    example_success();
    example_failed_step();
    example_aggregated_failures();
    if let Err(err) = example_nested() {
        println!("  nested example failed: {}", err);
    }
}

//! Profiling binary for battle execution
//!
//! Runs battles in a tight loop for profiling with cargo-flamegraph.
//! Unlike the Criterion benchmarks, this has minimal overhead and produces
//! cleaner flamegraphs.
//!
//! Usage:
//!   cargo flamegraph --bin profile --no-default-features

use card_battle_sim::{BalanceConfig, Simulation};

fn main() -> card_battle_sim::Result<()> {
    // Allow overriding iterations via environment variable
    let iterations = std::env::var("PROFILE_ITERATIONS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(100_000usize);

    println!("Profiling battle execution...");
    println!("Running {} battles with seed 42", iterations);
    println!();

    let simulation = Simulation::new(BalanceConfig::default())?.with_seed(42);
    let stats = simulation.run_with_progress(iterations, 10_000, |done| {
        println!("Completed {} battles", done);
    });

    println!();
    println!("Profiling complete! {} battles executed.", stats.total_battles);
    Ok(())
}

//! Advent of Code puzzle solutions with automatic registration
//!
//! Solutions are organized by year. Each one uses the `AutoRegisterSolver`
//! derive macro, so linking this crate is enough for the runner to find
//! them through the plugin registry.

pub mod utils;

#[cfg(feature = "my-solutions")]
pub mod my_solutions;

use aoc_solver::SolverPlugin;

/// Plugins contributed by this crate.
///
/// Calling this from a binary also keeps the crate (and its `inventory`
/// submissions) from being dropped by the linker.
pub fn solution_plugins() -> impl Iterator<Item = &'static SolverPlugin> {
    const CRATE_YEARS: [u16; 1] = [2023];
    aoc_solver::plugins().filter(|plugin| CRATE_YEARS.contains(&plugin.year))
}

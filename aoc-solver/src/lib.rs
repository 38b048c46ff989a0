//! Advent of Code Solver Library
//!
//! A small framework for writing Advent of Code solvers that share one
//! parsed input between parts and can be discovered at link time.
//!
//! # Overview
//!
//! - [`AocParser`] parses puzzle text into a solver-defined `SharedData`
//! - [`PartSolver<N>`] solves part `N`; `#[derive(AocSolver)]` turns a set
//!   of part impls into a [`Solver`]
//! - [`SolverOptions`] carries runner settings (worker counts, scale
//!   factors) into parsing
//! - [`SolverRegistry`] creates type-erased [`DynSolver`] instances by
//!   year and day; `#[derive(AutoRegisterSolver)]` submits a
//!   [`SolverPlugin`] so the registry can find solvers on its own
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct Sums;
//!
//! impl AocParser for Sums {
//!     type SharedData<'a> = Vec<i64>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|l| l.trim().parse().map_err(|_| ParseError::InvalidFormat(l.to_string())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Sums {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().sum::<i64>().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Sums {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().product::<i64>().to_string())
//!     }
//! }
//!
//! let registry = SolverRegistryBuilder::new()
//!     .register_solver::<Sums>(2023, 1)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2023, 1, "2\n3\n4").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "9");
//! assert_eq!(solver.solve(2).unwrap().answer, "24");
//! ```
//!
//! # Part Dependencies
//!
//! Parts get `&mut SharedData`. A part can stash intermediate results in
//! there (an `Option` field is the usual shape) and later parts reuse them
//! when they run on the same instance.

mod error;
mod instance;
mod options;
mod registry;
mod solver;

// Re-export public API
pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance, Timing};
pub use options::SolverOptions;
pub use registry::{
    plugins, FactoryInfo, RegisterableSolver, SolverFactory, SolverFactoryStorage, SolverPlugin,
    SolverRegistry, SolverRegistryBuilder, BASE_YEAR, CAPACITY, DAYS_PER_YEAR, MAX_YEARS,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Re-export inventory for use by the derive macros
pub use inventory;

// Re-export the derive macros
pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

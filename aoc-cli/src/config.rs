//! Configuration resolution from CLI args

use crate::cli::{Args, ParallelizeBy};
use crate::error::CliError;
use aoc_solver::SolverOptions;

/// Resolved runtime configuration
#[derive(Debug)]
pub struct Config {
    pub year: u16,
    pub day: u8,
    /// Part filter (None = all parts)
    pub part_filter: Option<u8>,
    /// Tags every selected solver must carry
    pub tags: Vec<String>,
    /// Settings handed to the solver at parse time
    pub options: SolverOptions,
    /// Number of threads for part-level parallelism
    pub thread_count: usize,
    pub parallelize_by: ParallelizeBy,
    pub quiet: bool,
}

impl Config {
    /// Build config from CLI args.
    ///
    /// Dedicated flags win over the same key given through `--option`.
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let mut options: SolverOptions = args.options.into_iter().collect();

        if let Some(batch_size) = args.batch_size {
            options.set("batch_size", positive("--batch-size", batch_size)?.to_string());
        }
        if let Some(num_workers) = args.num_workers {
            options.set(
                "num_workers",
                positive("--num-workers", num_workers as u64)?.to_string(),
            );
        }
        if let Some(factor) = args.expansion_factor {
            options.set(
                "expansion_factor",
                positive("--expansion-factor", factor)?.to_string(),
            );
        }

        if args.viz {
            options.set("viz", "true");
        }

        let thread_count = match args.threads {
            Some(0) => return Err(CliError::Config("--threads must be at least 1".into())),
            Some(n) => n,
            None => num_cpus(),
        };

        Ok(Config {
            year: args.year,
            day: args.day,
            part_filter: args.part,
            tags: args.tags,
            options,
            thread_count,
            parallelize_by: args.parallelize_by,
            quiet: args.quiet,
        })
    }
}

fn positive(flag: &str, value: u64) -> Result<u64, CliError> {
    if value == 0 {
        return Err(CliError::Config(format!("{flag} must be greater than zero")));
    }
    Ok(value)
}

/// Get number of CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

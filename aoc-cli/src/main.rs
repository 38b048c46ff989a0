//! AOC CLI - runs one Advent of Code solver on the puzzle input read from stdin

mod aggregator;
mod cli;
mod config;
mod error;
mod executor;
mod output;
mod telemetry;

use aggregator::{ResultAggregator, ResultKey};
use aoc_solver::{SolverError, SolverRegistryBuilder};
use clap::Parser;
use cli::Args;
use config::Config;
use error::{ArcExecutorError, CliError};
use executor::Executor;
use output::OutputFormatter;
use std::io::{self, Read};
use tracing::{debug, info, warn};

fn main() {
    let args = Args::parse();
    telemetry::init(args.verbose, args.quiet);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    debug!(?config, "resolved configuration");

    let registry = build_registry(&config.tags)?;
    let (year, day) = (config.year, config.day);
    if !registry.storage().contains(year, day) {
        return Err(SolverError::NotFound(year, day).into());
    }

    let executor = Executor::new(registry, &config).map_err(ArcExecutorError::from)?;
    let work = executor.work_item(year, day).ok_or_else(|| {
        CliError::Config(format!(
            "{year}/{day:02} has no part {}",
            config.part_filter.unwrap_or_default()
        ))
    })?;

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    debug!(bytes = input.len(), "read puzzle input");

    let formatter = OutputFormatter::new(config.quiet);
    let mut aggregator = ResultAggregator::new(ResultKey::for_work(&work));
    let mut results = Vec::new();
    let (tx, rx) = std::sync::mpsc::channel();

    info!(year, day, parts = ?work.parts, mode = ?config.parallelize_by, "running");
    std::thread::scope(|s| -> Result<(), CliError> {
        let handle = s.spawn(|| executor.execute(&work, &input, tx));

        for result in rx {
            for ready in aggregator.add(result) {
                formatter.print_result(&ready)?;
                results.push(ready);
            }
        }
        for key in aggregator.missing() {
            warn!(?key, "no result received");
        }
        for ready in aggregator.drain() {
            formatter.print_result(&ready)?;
            results.push(ready);
        }

        handle
            .join()
            .map_err(|_| CliError::Config("Executor thread panicked".to_string()))?
            .map_err(CliError::Executor)
    })?;

    formatter.print_summary(&results);

    let failed = results.iter().filter(|r| r.answer.is_err()).count();
    if failed > 0 {
        return Err(CliError::PartsFailed {
            failed,
            total: results.len(),
        });
    }
    Ok(())
}

/// Build registry with tag filtering
fn build_registry(tags: &[String]) -> Result<aoc_solver::SolverRegistry, CliError> {
    debug!(
        linked = aoc_solutions::solution_plugins().count(),
        "solution plugins"
    );
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}

//! CLI argument parsing using clap

use clap::{Parser, ValueEnum};

/// How the requested parts of one puzzle are executed
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// One instance, parts in order; later parts can reuse cached work (default)
    #[default]
    Sequential,
    /// One instance per part, parts run concurrently on the thread pool
    Part,
}

/// Advent of Code solver runner
///
/// Reads the puzzle input from standard input.
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solvers on stdin", version)]
pub struct Args {
    /// Puzzle year
    #[arg(short, long, default_value_t = 2023)]
    pub year: u16,

    /// Puzzle day
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: u8,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Tags the solver must carry (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Log at debug level
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,

    /// Identifiers per batch for range searches
    #[arg(long)]
    pub batch_size: Option<u64>,

    /// Worker threads for range searches
    #[arg(long)]
    pub num_workers: Option<usize>,

    /// Growth factor for empty rows and columns
    #[arg(long)]
    pub expansion_factor: Option<u64>,

    /// Log a Graphviz digraph of the node walks (day 8)
    #[arg(long)]
    pub viz: bool,

    /// Extra solver option, repeatable
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub options: Vec<(String, String)>,

    /// Execution mode for the requested parts
    #[arg(long, value_enum, default_value = "sequential")]
    pub parallelize_by: ParallelizeBy,

    /// Number of threads used when parallelizing by part
    #[arg(long)]
    pub threads: Option<usize>,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty option key in '{raw}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

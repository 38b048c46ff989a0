//! Seed almanac: remap seeds through category stages to locations

pub mod dispatch;
pub mod remap;

use crate::utils::{parse_fields, strip_label};
use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError, SolverOptions};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use dispatch::{BatchDispatcher, DEFAULT_BATCH_SIZE, DEFAULT_NUM_WORKERS, DispatchError};
use remap::{Interval, Stage, StageChain};
use itertools::Itertools;
use std::ops::Range;
use tracing::{debug, enabled, info, Level};

pub const START_CATEGORY: &str = "seed";

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 5, tags = ["2023", "parallel"])]
pub struct Solver;

#[derive(Debug)]
pub struct Almanac {
    pub seeds: Vec<u64>,
    pub chain: StageChain,
    pub dispatcher: BatchDispatcher,
}

impl Almanac {
    fn resolve(&self, seed: u64) -> u64 {
        self.chain.resolve(seed, START_CATEGORY)
    }

    /// Seed list read as `(start, length)` pairs
    fn seed_ranges(&self) -> Result<Vec<Range<u64>>, SolveError> {
        if self.seeds.len() % 2 != 0 {
            return Err(SolveError::failed(format!(
                "unbalanced seed count: must be even, got {}",
                self.seeds.len()
            )));
        }
        self.seeds
            .chunks_exact(2)
            .map(|pair| {
                let end = pair[0].checked_add(pair[1]).ok_or_else(|| {
                    SolveError::failed(format!("seed range {}+{} overflows", pair[0], pair[1]))
                })?;
                Ok(pair[0]..end)
            })
            .collect()
    }

    /// Column-per-category table of every seed's path, for debug logging
    fn path_table(&self) -> String {
        let header = self
            .chain
            .categories(START_CATEGORY)
            .into_iter()
            .map(|category| format!("{category:>15}"));
        let rows = self.seeds.iter().map(|&seed| {
            self.chain
                .path(seed, START_CATEGORY)
                .into_iter()
                .map(|(_, id)| format!("{id:>15}"))
                .collect::<String>()
        });
        std::iter::once(header.collect::<String>())
            .chain(rows)
            .join("\n")
    }
}

fn parse_header(line: &str) -> anyhow::Result<(&str, &str)> {
    let name = line
        .strip_suffix("map:")
        .map(str::trim)
        .ok_or_else(|| anyhow!("expected '<from>-to-<to> map:'"))?;
    match name.split('-').collect::<Vec<_>>().as_slice() {
        [from, "to", to] if !from.is_empty() && !to.is_empty() => Ok((*from, *to)),
        _ => bail!("unexpected map name {name:?}"),
    }
}

fn parse_interval(line: &str) -> anyhow::Result<Interval> {
    match parse_fields::<u64>(line)?.as_slice() {
        &[dest, source, length] => Ok(Interval::new(source, dest, length)?),
        other => bail!("expected 'dest source length', got {} fields", other.len()),
    }
}

fn parse_almanac(input: &str) -> anyhow::Result<(Vec<u64>, Vec<Stage>)> {
    let mut lines = input
        .lines()
        .map(str::trim)
        .enumerate()
        .skip_while(|(_, l)| l.is_empty());

    let (first_idx, first) = lines.next().ok_or_else(|| anyhow!("empty almanac"))?;
    let seeds = strip_label(first, "seeds:")
        .and_then(parse_fields::<u64>)
        .with_context(|| format!("line {}", first_idx + 1))?;

    let mut stages = Vec::new();
    let mut current: Option<(&str, &str, Vec<Interval>)> = None;
    for (idx, line) in lines.filter(|(_, l)| !l.is_empty()) {
        let line_no = idx + 1;
        if line.ends_with("map:") {
            let (from, to) = parse_header(line).with_context(|| format!("line {line_no}"))?;
            if let Some((from, to, intervals)) = current.replace((from, to, Vec::new())) {
                stages.push(Stage::new(from, to, intervals));
            }
        } else {
            let (_, _, intervals) = current
                .as_mut()
                .ok_or_else(|| anyhow!("line {line_no}: interval before any map header"))?;
            intervals.push(parse_interval(line).with_context(|| format!("line {line_no}"))?);
        }
    }
    stages.extend(current.map(|(from, to, intervals)| Stage::new(from, to, intervals)));
    Ok((seeds, stages))
}

fn invalid_option(key: &str, value: impl ToString, err: DispatchError) -> ParseError {
    ParseError::InvalidOption {
        key: key.to_string(),
        value: value.to_string(),
        reason: err.to_string(),
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Almanac;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Self::parse_with_options(input, &SolverOptions::default())
    }

    fn parse_with_options<'a>(
        input: &'a str,
        options: &SolverOptions,
    ) -> Result<Self::SharedData<'a>, ParseError> {
        let batch_size = options.get_or("batch_size", DEFAULT_BATCH_SIZE)?;
        let num_workers = options.get_or("num_workers", DEFAULT_NUM_WORKERS)?;
        let dispatcher = BatchDispatcher::new(batch_size, num_workers).map_err(|e| match e {
            DispatchError::ZeroBatchSize => invalid_option("batch_size", batch_size, e),
            _ => invalid_option("num_workers", num_workers, e),
        })?;

        let (seeds, stages) =
            parse_almanac(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))?;
        if seeds.is_empty() {
            return Err(ParseError::MissingData("no seeds listed".into()));
        }
        for stage in &stages {
            debug!("{}-to-{}", stage.source(), stage.destination());
            for interval in stage.intervals() {
                debug!("\t{interval}");
            }
        }
        let chain =
            StageChain::from_stages(stages).map_err(|e| ParseError::InvalidFormat(e.to_string()))?;

        Ok(Almanac {
            seeds,
            chain,
            dispatcher,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        debug!(seeds = ?shared.seeds);
        if enabled!(Level::DEBUG) {
            debug!("\n{}", shared.path_table());
        }
        let terminal = shared.chain.terminal(START_CATEGORY);
        let min = shared
            .seeds
            .iter()
            .map(|&seed| shared.resolve(seed))
            .min()
            .ok_or_else(|| SolveError::failed("no seeds to resolve"))?;
        info!(category = terminal, min, "minimum over listed seeds");
        Ok(min.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let ranges = shared.seed_ranges()?;
        let almanac = &*shared;
        almanac
            .dispatcher
            .min_over(&ranges, |seed| almanac.resolve(seed))
            .map_err(SolveError::failed)?
            .map(|min| min.to_string())
            .ok_or_else(|| SolveError::failed("seed ranges are empty"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const SAMPLE: &str = indoc! {"
        seeds: 79 14 55 13

        seed-to-soil map:
        50 98 2
        52 50 48

        soil-to-fertilizer map:
        0 15 37
        37 52 2
        39 0 15

        fertilizer-to-water map:
        49 53 8
        0 11 42
        42 0 7
        57 7 4

        water-to-light map:
        88 18 7
        18 25 70

        light-to-temperature map:
        45 77 23
        81 45 19
        68 64 13

        temperature-to-humidity map:
        0 69 1
        1 0 69

        humidity-to-location map:
        60 56 37
        56 93 4
    "};

    #[test]
    fn test_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(shared.chain.len(), 7);
        assert_eq!(shared.chain.terminal(START_CATEGORY), "location");
        assert_eq!(
            shared.seeds.iter().map(|&s| shared.resolve(s)).collect::<Vec<_>>(),
            vec![82, 43, 86, 35]
        );
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "35");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "46");
    }

    #[test]
    fn test_path_table_columns() {
        let shared = Solver::parse(SAMPLE).unwrap();
        let table = shared.path_table();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 1 + shared.seeds.len());
        assert!(lines.iter().all(|l| l.len() == 8 * 15));
        assert!(lines[0].starts_with(&format!("{:>15}", "seed")));
        assert!(lines[0].ends_with("location"));
        assert!(lines[1].starts_with(&format!("{:>15}", 79)));
        assert!(lines[1].ends_with("82"));
    }

    #[test]
    fn test_options_shape_dispatcher() {
        let options = SolverOptions::new()
            .with("batch_size", "3")
            .with("num_workers", "4");
        let mut shared = Solver::parse_with_options(SAMPLE, &options).unwrap();
        assert_eq!(shared.dispatcher.batch_size(), 3);
        assert_eq!(shared.dispatcher.num_workers(), 4);
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "46");
    }

    #[test]
    fn test_zero_workers_is_option_error() {
        let options = SolverOptions::new().with("num_workers", "0");
        match Solver::parse_with_options(SAMPLE, &options) {
            Err(ParseError::InvalidOption { key, value, .. }) => {
                assert_eq!(key, "num_workers");
                assert_eq!(value, "0");
            }
            other => panic!("expected InvalidOption, got {other:?}"),
        }
    }

    #[test]
    fn test_odd_seed_count_fails_part2() {
        let mut shared = Solver::parse("seeds: 1 2 3\n").unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "1");
        assert!(matches!(
            <Solver as PartSolver<2>>::solve(&mut shared),
            Err(SolveError::SolveFailed(_))
        ));
    }

    #[test]
    fn test_zero_length_seed_ranges_fail_part2() {
        let mut shared = Solver::parse("seeds: 5 0\n").unwrap();
        assert!(<Solver as PartSolver<2>>::solve(&mut shared).is_err());
    }

    #[test]
    fn test_malformed_almanac() {
        let bad_header = "seeds: 1\n\nseed-soil map:\n1 2 3\n";
        assert!(matches!(
            Solver::parse(bad_header),
            Err(ParseError::InvalidFormat(msg)) if msg.contains("line 3")
        ));

        let zero_length = "seeds: 1\n\nseed-to-soil map:\n1 2 0\n";
        assert!(matches!(
            Solver::parse(zero_length),
            Err(ParseError::InvalidFormat(msg)) if msg.contains("zero length")
        ));

        let orphan = "seeds: 1\n5 6 7\n";
        assert!(Solver::parse(orphan).is_err());

        let duplicate = "seeds: 1\n\na-to-b map:\n\na-to-c map:\n";
        assert!(matches!(
            Solver::parse(duplicate),
            Err(ParseError::InvalidFormat(msg)) if msg.contains("more than one")
        ));
    }
}

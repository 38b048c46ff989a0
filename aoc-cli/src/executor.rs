//! Executor for running the requested parts of one puzzle

use crate::cli::ParallelizeBy;
use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use aoc_solver::{DynSolver, SolveError, SolverError, SolverOptions, SolverRegistry};
use chrono::TimeDelta;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;
use tracing::{debug, info_span};

/// Result from a single part
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, SolverError>,
    /// Set on the result of the part that paid for parsing
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

/// The puzzle and parts to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Executor for one puzzle
pub struct Executor {
    registry: SolverRegistry,
    options: SolverOptions,
    parallelize_by: ParallelizeBy,
    part_filter: Option<u8>,
    thread_pool: rayon::ThreadPool,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.thread_count)
            .build()?;

        Ok(Self {
            registry,
            options: config.options.clone(),
            parallelize_by: config.parallelize_by,
            part_filter: config.part_filter,
            thread_pool,
        })
    }

    /// Work for `year`/`day`, or `None` when no registered solver has the
    /// requested parts
    pub fn work_item(&self, year: u16, day: u8) -> Option<WorkItem> {
        let info = self.registry.storage().get_info(year, day)?;
        debug!(year, day, parts = info.parts, tags = ?info.tags, "selected solver");
        let parts = match self.part_filter {
            Some(p) if p <= info.parts => p..=p,
            Some(_) => return None,
            None => 1..=info.parts,
        };
        Some(WorkItem { year, day, parts })
    }

    /// Execute `work` on `input` and send one result per part to `tx`
    pub fn execute(
        &self,
        work: &WorkItem,
        input: &str,
        tx: Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let _span = info_span!("puzzle", year = work.year, day = work.day).entered();
        match self.parallelize_by {
            ParallelizeBy::Sequential => self.run_sequential(work, input, &tx),
            ParallelizeBy::Part => self.run_parts_parallel(work, input, tx),
        }
    }

    /// One instance, parts in order so later parts see earlier cached work
    fn run_sequential(
        &self,
        work: &WorkItem,
        input: &str,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let (year, day) = (work.year, work.day);
        let mut solver =
            match self
                .registry
                .create_solver_with_options(year, day, input, &self.options)
            {
                Ok(solver) => solver,
                Err(e) => {
                    for part in work.parts.clone() {
                        send(tx, error_result(year, day, part, &e))?;
                    }
                    return Ok(());
                }
            };
        debug!(parse = %solver.parse_duration(), "parsed");

        let mut parse_duration = Some(solver.parse_duration());
        for part in work.parts.clone() {
            let mut result = solve_part(year, day, part, &mut *solver);
            result.parse_duration = parse_duration.take();
            send(tx, result)?;
        }
        Ok(())
    }

    /// One instance per part on the thread pool
    fn run_parts_parallel(
        &self,
        work: &WorkItem,
        input: &str,
        tx: Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let (year, day) = (work.year, work.day);
        self.thread_pool.install(|| {
            work.parts
                .clone()
                .into_par_iter()
                .map_with(tx, |tx, part| {
                    let result = match self
                        .registry
                        .create_solver_with_options(year, day, input, &self.options)
                    {
                        Ok(mut solver) => {
                            let mut result = solve_part(year, day, part, &mut *solver);
                            result.parse_duration = Some(solver.parse_duration());
                            result
                        }
                        Err(e) => error_result(year, day, part, &e),
                    };
                    send(tx, result).err()
                })
                .reduce_with(|err1, err2| match (err1, err2) {
                    (Some(e1), e2) => Some(ArcExecutorError::combine_opt(e2, e1)),
                    (None, e2) => e2,
                })
                .flatten()
                .map_or(Ok(()), Err)
        })
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

/// Solve a single part, timing it
fn solve_part(year: u16, day: u8, part: u8, solver: &mut dyn DynSolver) -> SolverResult {
    let _span = info_span!("part", part).entered();
    let (answer, solve_duration) = match solver.solve(part) {
        Ok(solved) => {
            let duration = solved.duration();
            (Ok(solved.answer), duration)
        }
        Err(e) => (Err(SolverError::from(e)), TimeDelta::zero()),
    };
    SolverResult {
        year,
        day,
        part,
        answer,
        parse_duration: None,
        solve_duration,
    }
}

/// Per-part copy of an error raised before any part could run
fn error_result(year: u16, day: u8, part: u8, err: &SolverError) -> SolverResult {
    let answer = match err {
        SolverError::ParseError(e) => SolverError::ParseError(e.clone()),
        SolverError::NotFound(y, d) => SolverError::NotFound(*y, *d),
        SolverError::InvalidYearDay(y, d) => SolverError::InvalidYearDay(*y, *d),
        SolverError::SolveError(e) => SolverError::SolveError(SolveError::failed(e.to_string())),
    };
    SolverResult {
        year,
        day,
        part,
        answer: Err(answer),
        parse_duration: None,
        solve_duration: TimeDelta::zero(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::{
        AocParser, AocSolver, ParseError, PartSolver, SolverRegistryBuilder,
    };
    use std::sync::mpsc;

    /// Counts how many parts ran before it on the same instance
    #[derive(AocSolver)]
    #[aoc_solver(max_parts = 2)]
    struct Counter;

    impl AocParser for Counter {
        type SharedData<'a> = (u64, u32);

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            let n = input
                .trim()
                .parse()
                .map_err(|_| ParseError::InvalidFormat(input.to_string()))?;
            Ok((n, 0))
        }
    }

    impl PartSolver<1> for Counter {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            shared.1 += 1;
            Ok(format!("{}:{}", shared.0, shared.1))
        }
    }

    impl PartSolver<2> for Counter {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            shared.1 += 1;
            Ok(format!("{}:{}", shared.0 * 2, shared.1))
        }
    }

    fn executor(parallelize_by: ParallelizeBy, part_filter: Option<u8>) -> Executor {
        let registry = SolverRegistryBuilder::new()
            .register_solver::<Counter>(2023, 1)
            .unwrap()
            .build();
        let config = Config {
            year: 2023,
            day: 1,
            part_filter,
            tags: Vec::new(),
            options: SolverOptions::new(),
            thread_count: 2,
            parallelize_by,
            quiet: false,
        };
        Executor::new(registry, &config).unwrap()
    }

    fn run(executor: &Executor, input: &str) -> Vec<SolverResult> {
        let work = executor.work_item(2023, 1).unwrap();
        let (tx, rx) = mpsc::channel();
        executor.execute(&work, input, tx).unwrap();
        let mut results: Vec<_> = rx.into_iter().collect();
        results.sort_by_key(|r| r.part);
        results
    }

    #[test]
    fn test_work_item_respects_part_filter() {
        let all = executor(ParallelizeBy::Sequential, None);
        assert_eq!(all.work_item(2023, 1).unwrap().parts, 1..=2);
        assert!(all.work_item(2023, 2).is_none());

        let second = executor(ParallelizeBy::Sequential, Some(2));
        assert_eq!(second.work_item(2023, 1).unwrap().parts, 2..=2);
    }

    #[test]
    fn test_sequential_shares_one_instance() {
        let results = run(&executor(ParallelizeBy::Sequential, None), "21");
        let answers: Vec<_> = results.iter().map(|r| r.answer.as_ref().unwrap().as_str()).collect();
        assert_eq!(answers, ["21:1", "42:2"]);
        assert!(results[0].parse_duration.is_some());
        assert!(results[1].parse_duration.is_none());
    }

    #[test]
    fn test_parallel_uses_instance_per_part() {
        let results = run(&executor(ParallelizeBy::Part, None), "21");
        let answers: Vec<_> = results.iter().map(|r| r.answer.as_ref().unwrap().as_str()).collect();
        assert_eq!(answers, ["21:1", "42:1"]);
        assert!(results.iter().all(|r| r.parse_duration.is_some()));
    }

    #[test]
    fn test_parse_error_reported_per_part() {
        for mode in [ParallelizeBy::Sequential, ParallelizeBy::Part] {
            let results = run(&executor(mode, None), "not a number");
            assert_eq!(results.len(), 2);
            assert!(results.iter().all(|r| matches!(
                r.answer,
                Err(SolverError::ParseError(ParseError::InvalidFormat(_)))
            )));
        }
    }
}

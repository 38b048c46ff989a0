use crate::utils::{parse_fields, parse_lines};
use anyhow::bail;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use tracing::trace;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 9, tags = ["2023"])]
pub struct Solver;

/// Rows of successive differences, stopping at the first all-zero row.
///
/// `rows[0]` is the original history.
pub fn difference_table(history: &[i64]) -> Vec<Vec<i64>> {
    let mut rows = vec![history.to_vec()];
    while let Some(last) = rows.last() {
        if last.iter().all(|&v| v == 0) || last.len() < 2 {
            break;
        }
        let next: Vec<i64> = last.iter().tuple_windows().map(|(a, b)| b - a).collect();
        rows.push(next);
    }
    for (depth, row) in rows.iter().enumerate() {
        trace!("{}{}", "   ".repeat(depth), row.iter().map(|v| format!("{v:>3}")).join("   "));
    }
    rows
}

/// Next value after the history
pub fn extrapolate(history: &[i64]) -> i64 {
    difference_table(history)
        .iter()
        .rev()
        .fold(0, |below, row| row.last().copied().unwrap_or(0) + below)
}

/// Value before the first one of the history
pub fn extrapolate_back(history: &[i64]) -> i64 {
    difference_table(history)
        .iter()
        .rev()
        .fold(0, |below, row| row.first().copied().unwrap_or(0) - below)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<i64>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_lines(input, |line| {
            let history = parse_fields::<i64>(line)?;
            if history.is_empty() {
                bail!("empty history");
            }
            Ok(history)
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .map(|h| extrapolate(h))
            .sum::<i64>()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .map(|h| extrapolate_back(h))
            .sum::<i64>()
            .to_string())
    }
}

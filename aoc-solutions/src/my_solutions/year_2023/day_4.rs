use crate::utils::{parse_fields, parse_lines};
use anyhow::anyhow;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashSet;
use tracing::{debug, trace};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 4, tags = ["2023"])]
pub struct Solver;

/// Matching-number count per card, in card order
#[derive(Debug)]
pub struct Cards {
    pub matches: Vec<usize>,
}

fn count_matches(line: &str) -> anyhow::Result<usize> {
    let (_, numbers) = line
        .split_once(':')
        .ok_or_else(|| anyhow!("missing ':' after card name"))?;
    let (winning, picked) = numbers
        .split_once('|')
        .ok_or_else(|| anyhow!("missing '|' between number lists"))?;

    let winning: HashSet<u32> = parse_fields::<u32>(winning)?.into_iter().collect();
    let picked = parse_fields::<u32>(picked)?;
    Ok(picked.iter().filter(|n| winning.contains(n)).count())
}

impl AocParser for Solver {
    type SharedData<'a> = Cards;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(Cards {
            matches: parse_lines(input, count_matches)?,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let points: u64 = shared
            .matches
            .iter()
            .filter(|&&m| m > 0)
            .map(|&m| 1u64 << (m - 1))
            .sum();
        Ok(points.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let matches = &shared.matches;
        let mut copies = vec![1u64; matches.len()];

        for (card, &won) in matches.iter().enumerate() {
            trace!(card = card + 1, copies = copies[card], matches = won);
            let end = (card + 1 + won).min(copies.len());
            for next in card + 1..end {
                copies[next] += copies[card];
            }
        }

        debug!(?copies, "card counts");
        Ok(copies.iter().sum::<u64>().to_string())
    }
}

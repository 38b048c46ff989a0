use crate::utils::{ExtractedNumber, extract_numbers};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::{debug, trace};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 3, tags = ["2023", "grid"])]
pub struct Solver;

#[derive(Debug, Clone, Copy)]
pub struct PartNumber {
    pub row: usize,
    pub number: ExtractedNumber,
}

impl PartNumber {
    /// True when `(x, y)` touches the number, diagonals included
    fn is_adjacent(&self, x: usize, y: usize) -> bool {
        self.row.abs_diff(y) <= 1
            && x + 1 >= self.number.offset
            && x <= self.number.end()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Symbol {
    pub glyph: u8,
    pub x: usize,
    pub y: usize,
}

#[derive(Debug)]
pub struct Schematic {
    pub numbers: Vec<PartNumber>,
    pub symbols: Vec<Symbol>,
}

impl Schematic {
    fn neighbours<'s>(&'s self, symbol: &'s Symbol) -> impl Iterator<Item = &'s PartNumber> + 's {
        self.numbers
            .iter()
            .filter(move |n| n.is_adjacent(symbol.x, symbol.y))
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Schematic;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut numbers = Vec::new();
        let mut symbols = Vec::new();

        for (y, line) in input.lines().map(str::trim_end).enumerate() {
            numbers.extend(
                extract_numbers(line)?
                    .into_iter()
                    .map(|number| PartNumber { row: y, number }),
            );
            symbols.extend(
                line.bytes()
                    .enumerate()
                    .filter(|(_, b)| !b.is_ascii_digit() && *b != b'.' && !b.is_ascii_whitespace())
                    .map(|(x, glyph)| Symbol { glyph, x, y }),
            );
        }

        if numbers.is_empty() {
            return Err(ParseError::MissingData("no part numbers in schematic".into()));
        }
        debug!(numbers = numbers.len(), symbols = symbols.len(), "loaded schematic");
        Ok(Schematic { numbers, symbols })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut used = vec![false; shared.numbers.len()];
        for symbol in &shared.symbols {
            for (i, n) in shared.numbers.iter().enumerate() {
                if n.is_adjacent(symbol.x, symbol.y) {
                    trace!(
                        symbol = %char::from(symbol.glyph),
                        x = symbol.x,
                        y = symbol.y,
                        value = n.number.value,
                        "uses part number"
                    );
                    used[i] = true;
                }
            }
        }

        let orphaned = used.iter().filter(|u| !**u).count();
        debug!(orphaned, "orphaned part numbers");

        Ok(shared
            .numbers
            .iter()
            .zip(&used)
            .filter(|(_, used)| **used)
            .map(|(n, _)| n.number.value)
            .sum::<u64>()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u64 = shared
            .symbols
            .iter()
            .filter(|s| s.glyph == b'*')
            .filter_map(|gear| {
                let adjacent: Vec<u64> = shared.neighbours(gear).map(|n| n.number.value).collect();
                match adjacent.as_slice() {
                    [a, b] => Some(a * b),
                    _ => None,
                }
            })
            .sum();
        Ok(sum.to_string())
    }
}

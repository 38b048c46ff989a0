use crate::utils::text::digit_at;
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 1, tags = ["2023", "text"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<&'a str>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let lines: Vec<&str> = input
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.is_empty() {
            return Err(ParseError::MissingData("no calibration lines".into()));
        }
        Ok(lines)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        calibration_sum(shared, false).map(|sum| sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        calibration_sum(shared, true).map(|sum| sum.to_string())
    }
}

fn calibration_sum(lines: &[&str], spelled: bool) -> Result<u32, SolveError> {
    lines.iter().enumerate().try_fold(0, |sum, (idx, line)| {
        let value = calibration_value(line, spelled).ok_or_else(|| {
            SolveError::failed(format!("line {} has no digit: {:?}", idx + 1, line))
        })?;
        debug!(line, value);
        Ok(sum + value)
    })
}

/// First digit times ten plus last digit
fn calibration_value(line: &str, spelled: bool) -> Option<u32> {
    let bytes = line.as_bytes();
    let first = (0..bytes.len()).find_map(|i| digit_at(bytes, i, spelled))?;
    let last = (0..bytes.len()).rev().find_map(|i| digit_at(bytes, i, spelled))?;
    Some(first * 10 + last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_part1_sample() {
        let input = indoc! {"
            1abc2
            pqr3stu8vwx
            a1b2c3d4e5f
            treb7uchet
        "};
        let mut shared = Solver::parse(input).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "142");
    }

    #[test]
    fn test_part2_sample() {
        let input = indoc! {"
            two1nine
            eightwothree
            abcone2threexyz
            xtwone3four
            4nineeightseven2
            zoneight234
            7pqrstsixteen
        "};
        let mut shared = Solver::parse(input).unwrap();
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "281");
    }

    #[test]
    fn test_overlapping_words_at_the_end() {
        assert_eq!(calibration_value("eightwo", true), Some(82));
        assert_eq!(calibration_value("eightwo", false), None);
    }

    #[test]
    fn test_line_without_digit_fails() {
        let mut shared = Solver::parse("abc\n").unwrap();
        assert!(matches!(
            <Solver as PartSolver<1>>::solve(&mut shared),
            Err(SolveError::SolveFailed(_))
        ));
    }
}

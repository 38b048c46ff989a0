use crate::utils::math::manhattan;
use crate::utils::{Grid, Pos};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError, SolverOptions};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use tracing::{debug, trace};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 11, tags = ["2023", "grid"])]
pub struct Solver;

pub const DEFAULT_EXPANSION_FACTOR: u64 = 1_000_000;

const GALAXY: u8 = b'#';

#[derive(Debug)]
pub struct Image {
    galaxies: Vec<Pos>,
    empty_rows: Vec<usize>,
    empty_cols: Vec<usize>,
    /// Expansion applied by part 2
    expansion_factor: u64,
}

impl Image {
    /// Galaxy coordinates after each empty row and column grows to `factor`
    fn expanded(&self, factor: u64) -> Result<Vec<(i64, i64)>, SolveError> {
        let grow = |coord: usize, empty: &[usize]| {
            let before = empty.partition_point(|&e| e < coord) as u64;
            before
                .checked_mul(factor - 1)
                .and_then(|extra| extra.checked_add(coord as u64))
                .and_then(|c| i64::try_from(c).ok())
                .ok_or_else(|| {
                    SolveError::failed(format!(
                        "coordinate {coord} overflows with expansion factor {factor}"
                    ))
                })
        };
        self.galaxies
            .iter()
            .map(|&(x, y)| Ok((grow(x, &self.empty_cols)?, grow(y, &self.empty_rows)?)))
            .collect()
    }

    /// Sum of distances over every unordered galaxy pair
    fn distance_sum(&self, factor: u64) -> Result<u64, SolveError> {
        self.expanded(factor)?
            .iter()
            .tuple_combinations()
            .try_fold(0u64, |sum, (a, b)| {
                let d = manhattan(*a, *b);
                trace!(?a, ?b, d, "distance");
                sum.checked_add(d)
                    .ok_or_else(|| SolveError::failed("distance sum overflows u64"))
            })
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Image;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Self::parse_with_options(input, &SolverOptions::default())
    }

    fn parse_with_options<'a>(
        input: &'a str,
        options: &SolverOptions,
    ) -> Result<Self::SharedData<'a>, ParseError> {
        let expansion_factor = options.get_or("expansion_factor", DEFAULT_EXPANSION_FACTOR)?;
        if expansion_factor == 0 {
            return Err(ParseError::InvalidOption {
                key: "expansion_factor".into(),
                value: expansion_factor.to_string(),
                reason: "must be at least 1".into(),
            });
        }

        let grid = Grid::parse(input)?;
        let galaxies: Vec<Pos> = grid
            .cells()
            .filter(|&(_, b)| b == GALAXY)
            .map(|(pos, _)| pos)
            .collect();
        let empty_rows = (0..grid.height())
            .filter(|&y| !grid.row(y).contains(&GALAXY))
            .collect();
        let empty_cols = (0..grid.width())
            .filter(|&x| galaxies.iter().all(|&(gx, _)| gx != x))
            .collect();

        let image = Image {
            galaxies,
            empty_rows,
            empty_cols,
            expansion_factor,
        };
        debug!(
            galaxies = image.galaxies.len(),
            empty_rows = ?image.empty_rows,
            empty_cols = ?image.empty_cols,
            "grid:\n{grid}"
        );
        Ok(image)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.distance_sum(2)?.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.distance_sum(shared.expansion_factor)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const SAMPLE: &str = indoc! {"
        ...#......
        .......#..
        #.........
        ..........
        ......#...
        .#........
        .........#
        ..........
        .......#..
        #...#.....
    "};

    #[test]
    fn test_part1_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(shared.empty_rows, vec![3, 7]);
        assert_eq!(shared.empty_cols, vec![2, 5, 8]);
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "374");
    }

    #[test]
    fn test_expansion_factor_option() {
        for (factor, expected) in [("10", "1030"), ("100", "8410"), ("1", "292")] {
            let options = SolverOptions::new().with("expansion_factor", factor);
            let mut shared = Solver::parse_with_options(SAMPLE, &options).unwrap();
            assert_eq!(
                <Solver as PartSolver<2>>::solve(&mut shared).unwrap(),
                expected,
                "factor {factor}"
            );
        }
    }

    #[test]
    fn test_default_factor() {
        let shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(shared.expansion_factor, DEFAULT_EXPANSION_FACTOR);
    }

    #[test]
    fn test_huge_factor_fails_instead_of_wrapping() {
        let options = SolverOptions::new().with("expansion_factor", u64::MAX.to_string());
        let mut shared = Solver::parse_with_options(SAMPLE, &options).unwrap();
        assert!(matches!(
            <Solver as PartSolver<2>>::solve(&mut shared),
            Err(SolveError::SolveFailed(_))
        ));

        // coordinates fit in i64 but pair distances do not
        let options = SolverOptions::new().with("expansion_factor", (1u64 << 61).to_string());
        let mut shared = Solver::parse_with_options(SAMPLE, &options).unwrap();
        assert!(<Solver as PartSolver<2>>::solve(&mut shared).is_err());
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "374");
    }

    #[test]
    fn test_zero_factor_rejected() {
        let options = SolverOptions::new().with("expansion_factor", "0");
        assert!(matches!(
            Solver::parse_with_options(SAMPLE, &options),
            Err(ParseError::InvalidOption { .. })
        ));
    }
}

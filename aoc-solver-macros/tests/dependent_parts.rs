use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};

#[derive(Debug, Clone)]
struct Readings {
    values: Vec<i64>,
    deltas: Option<Vec<i64>>,
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct DeltaSolver;

impl AocParser for DeltaSolver {
    type SharedData<'a> = Readings;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let values = input
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<i64>()
                    .map_err(|_| ParseError::InvalidFormat(format!("not a number: {token}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Readings {
            values,
            deltas: None,
        })
    }
}

fn deltas(shared: &mut Readings) -> &[i64] {
    shared
        .deltas
        .get_or_insert_with(|| shared.values.windows(2).map(|w| w[1] - w[0]).collect())
}

impl PartSolver<1> for DeltaSolver {
    fn solve(shared: &mut Readings) -> Result<String, SolveError> {
        Ok(deltas(shared).iter().filter(|d| **d > 0).count().to_string())
    }
}

impl PartSolver<2> for DeltaSolver {
    fn solve(shared: &mut Readings) -> Result<String, SolveError> {
        deltas(shared)
            .iter()
            .max()
            .map(|d| d.to_string())
            .ok_or_else(|| SolveError::failed("need at least two readings"))
    }
}

#[test]
fn test_parts_count_is_generated() {
    assert_eq!(<DeltaSolver as Solver>::PARTS, 2);
}

#[test]
fn test_part1_caches_deltas() {
    let mut shared = DeltaSolver::parse("1 4 2 9").unwrap();
    assert!(shared.deltas.is_none());

    let answer = <DeltaSolver as Solver>::solve_part(&mut shared, 1).unwrap();
    assert_eq!(answer, "2");
    assert_eq!(shared.deltas, Some(vec![3, -2, 7]));
}

#[test]
fn test_part2_reuses_or_computes_deltas() {
    let mut fresh = DeltaSolver::parse("1 4 2 9").unwrap();
    assert_eq!(<DeltaSolver as Solver>::solve_part(&mut fresh, 2).unwrap(), "7");

    let mut warmed = DeltaSolver::parse("1 4 2 9").unwrap();
    <DeltaSolver as Solver>::solve_part(&mut warmed, 1).unwrap();
    assert_eq!(<DeltaSolver as Solver>::solve_part(&mut warmed, 2).unwrap(), "7");
}

#[test]
fn test_part_errors_propagate() {
    let mut shared = DeltaSolver::parse("5").unwrap();
    let result = <DeltaSolver as Solver>::solve_part(&mut shared, 2);
    assert!(matches!(result, Err(SolveError::SolveFailed(_))));
}

#[test]
fn test_unknown_part_not_implemented() {
    let mut shared = DeltaSolver::parse("1 2").unwrap();
    for part in [0u8, 3, 200] {
        let result = <DeltaSolver as Solver>::solve_part(&mut shared, part);
        assert!(matches!(result, Err(SolveError::PartNotImplemented(p)) if p == part));
    }
}

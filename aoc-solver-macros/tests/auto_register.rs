use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError, SolverOptions,
    SolverRegistryBuilder,
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2019, day = 24, tags = ["test", "scaled"])]
struct ScaledSum;

struct Scaled {
    values: Vec<u64>,
    factor: u64,
}

impl AocParser for ScaledSum {
    type SharedData<'a> = Scaled;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Self::parse_with_options(input, &SolverOptions::default())
    }

    fn parse_with_options<'a>(
        input: &'a str,
        options: &SolverOptions,
    ) -> Result<Self::SharedData<'a>, ParseError> {
        let values = input
            .lines()
            .map(|l| l.trim().parse().map_err(|_| ParseError::InvalidFormat(l.into())))
            .collect::<Result<_, _>>()?;
        Ok(Scaled {
            values,
            factor: options.get_or("factor", 1)?,
        })
    }
}

impl PartSolver<1> for ScaledSum {
    fn solve(shared: &mut Scaled) -> Result<String, SolveError> {
        Ok((shared.values.iter().sum::<u64>() * shared.factor).to_string())
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2019, day = 25)]
struct Untagged;

impl AocParser for Untagged {
    type SharedData<'a> = &'a str;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input)
    }
}

impl PartSolver<1> for Untagged {
    fn solve(shared: &mut &str) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

impl PartSolver<2> for Untagged {
    fn solve(shared: &mut &str) -> Result<String, SolveError> {
        Ok(shared.chars().rev().collect())
    }
}

#[test]
fn test_plugins_are_collected() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.year == 2019)
        .expect("plugins should not collide")
        .build();

    let info = registry.storage().get_info(2019, 24).expect("day 24 registered");
    assert_eq!(info.parts, 1);
    assert_eq!(info.tags, &["test", "scaled"]);
    let info = registry.storage().get_info(2019, 25).expect("day 25 registered");
    assert_eq!(info.parts, 2);
    assert!(info.tags.is_empty());
}

#[test]
fn test_tag_filter_selects_subset() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"scaled"))
        .unwrap()
        .build();

    assert!(registry.storage().contains(2019, 24));
    assert!(!registry.storage().contains(2019, 25));
}

#[test]
fn test_options_reach_parser() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.year == 2019)
        .unwrap()
        .build();

    let options = SolverOptions::new().with("factor", "10");
    let mut solver = registry
        .create_solver_with_options(2019, 24, "1\n2\n3", &options)
        .unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "60");

    let mut solver = registry.create_solver(2019, 24, "1\n2\n3").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "6");
}

#[test]
fn test_borrowed_shared_data() {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.year == 2019 && plugin.day == 25)
        .unwrap()
        .build();

    let mut solver = registry.create_solver(2019, 25, "abc").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "3");
    assert_eq!(solver.solve(2).unwrap().answer, "cba");
}

//! Example: a plugin solver that reads a runner option at parse time
//!
//! Run with: cargo run --example solver_options

use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError, SolverOptions,
    SolverRegistryBuilder,
};

/// Sums the input numbers, weighted by the `weight` option
#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 25, tags = ["example"])]
pub struct WeightedSum;

pub struct Numbers {
    values: Vec<u64>,
    weight: u64,
}

impl AocParser for WeightedSum {
    type SharedData<'a> = Numbers;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Self::parse_with_options(input, &SolverOptions::default())
    }

    fn parse_with_options<'a>(
        input: &'a str,
        options: &SolverOptions,
    ) -> Result<Self::SharedData<'a>, ParseError> {
        let values = input
            .split_whitespace()
            .map(|v| {
                v.parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("not a number: {v}")))
            })
            .collect::<Result<_, _>>()?;
        Ok(Numbers {
            values,
            weight: options.get_or("weight", 1)?,
        })
    }
}

impl PartSolver<1> for WeightedSum {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.values.iter().sum::<u64>().to_string())
    }
}

impl PartSolver<2> for WeightedSum {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u64 = shared.values.iter().sum();
        sum.checked_mul(shared.weight)
            .map(|v| v.to_string())
            .ok_or_else(|| SolveError::failed("weighted sum overflows u64"))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let registry = SolverRegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"example"))?
        .build();

    let options = SolverOptions::new().with("weight", "10");
    let mut solver = registry.create_solver_with_options(2023, 25, "1 2 3", &options)?;
    for part in 1..=solver.parts() {
        let result = solver.solve(part)?;
        println!("Part {part}: {} ({})", result.answer, result.duration());
    }
    println!("parse took {}", solver.parse_duration());
    Ok(())
}

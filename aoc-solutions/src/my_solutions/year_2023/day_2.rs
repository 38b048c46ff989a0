use crate::utils::parse_lines;
use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::debug;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 2, tags = ["2023"])]
pub struct Solver;

/// Cubes revealed in one handful
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CubeSet {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
}

impl CubeSet {
    fn union_max(self, other: CubeSet) -> CubeSet {
        CubeSet {
            red: self.red.max(other.red),
            green: self.green.max(other.green),
            blue: self.blue.max(other.blue),
        }
    }

    fn fits_within(&self, bag: &CubeSet) -> bool {
        self.red <= bag.red && self.green <= bag.green && self.blue <= bag.blue
    }

    fn power(&self) -> u32 {
        self.red * self.green * self.blue
    }
}

#[derive(Debug)]
pub struct Game {
    pub id: u32,
    pub rounds: Vec<CubeSet>,
}

impl Game {
    /// Fewest cubes of each colour that make every round possible
    fn minimum_set(&self) -> CubeSet {
        self.rounds
            .iter()
            .fold(CubeSet::default(), |acc, r| acc.union_max(*r))
    }
}

const BAG: CubeSet = CubeSet {
    red: 12,
    green: 13,
    blue: 14,
};

fn parse_game(line: &str) -> anyhow::Result<Game> {
    let (name, rounds) = line
        .split_once(':')
        .ok_or_else(|| anyhow!("missing ':' after game name"))?;
    let id = name
        .trim()
        .strip_prefix("Game ")
        .ok_or_else(|| anyhow!("game does not start with 'Game '"))?
        .parse()
        .context("bad game id")?;

    let rounds = rounds
        .split(';')
        .map(parse_round)
        .collect::<anyhow::Result<_>>()?;
    Ok(Game { id, rounds })
}

fn parse_round(round: &str) -> anyhow::Result<CubeSet> {
    let mut set = CubeSet::default();
    for draw in round.split(',') {
        let (count, colour) = draw
            .trim()
            .split_once(' ')
            .ok_or_else(|| anyhow!("expected '<count> <colour>', got {draw:?}"))?;
        let count: u32 = count.parse().with_context(|| format!("bad count {count:?}"))?;
        match colour.trim().to_ascii_lowercase().as_str() {
            "red" => set.red = count,
            "green" => set.green = count,
            "blue" => set.blue = count,
            other => bail!("unknown colour {other:?}"),
        }
    }
    Ok(set)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Game>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let games = parse_lines(input, parse_game)?;
        for game in &games {
            debug!(?game);
        }
        Ok(games)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .filter(|game| game.rounds.iter().all(|round| round.fits_within(&BAG)))
            .map(|game| game.id)
            .sum::<u32>()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .map(|game| game.minimum_set().power())
            .sum::<u32>()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const SAMPLE: &str = indoc! {"
        Game 1: 3 blue, 4 red; 1 red, 2 green, 6 blue; 2 green
        Game 2: 1 blue, 2 green; 3 green, 4 blue, 1 red; 1 green, 1 blue
        Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green; 5 green, 1 red
        Game 4: 1 green, 3 red, 6 blue; 3 green, 6 red; 3 green, 15 blue, 14 red
        Game 5: 6 red, 1 blue, 3 green; 2 blue, 1 red, 2 green
    "};

    #[test]
    fn test_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "8");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "2286");
    }

    #[test]
    fn test_minimum_set() {
        let game = parse_game("Game 1: 3 blue, 4 red; 1 red, 2 green, 6 blue; 2 green").unwrap();
        assert_eq!(
            game.minimum_set(),
            CubeSet {
                red: 4,
                green: 2,
                blue: 6
            }
        );
    }

    #[test]
    fn test_unknown_colour_rejected() {
        let err = Solver::parse("Game 1: 3 purple").unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(msg) if msg.contains("purple")));
    }
}

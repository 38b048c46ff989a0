use crate::utils::{parse_fields, strip_label};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use tracing::{debug, warn};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 6, tags = ["2023", "math"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Race {
    pub time: u64,
    pub record: u64,
}

impl Race {
    /// Number of hold times that travel strictly further than the record.
    ///
    /// Distance for hold `h` is `h * (time - h)`, symmetric around
    /// `time / 2`, so only the smallest winning hold is searched for.
    pub fn ways_to_win(&self) -> u64 {
        let (t, d) = (u128::from(self.time), u128::from(self.record));
        let beats = |h: u128| h * (t - h) > d;

        let Some(disc) = (t * t).checked_sub(4 * d) else {
            return 0;
        };
        let root = disc.isqrt().min(t);

        // the float-free root can be off by one either way
        let mut lo = (t - root) / 2;
        while lo > 0 && beats(lo - 1) {
            lo -= 1;
        }
        while lo <= t / 2 && !beats(lo) {
            lo += 1;
        }
        if lo > t / 2 {
            return 0;
        }
        (t - 2 * lo + 1) as u64
    }
}

#[derive(Debug)]
pub struct RaceSheet<'a> {
    times: &'a str,
    records: &'a str,
}

impl RaceSheet<'_> {
    fn races(&self) -> Result<Vec<Race>, ParseError> {
        let times = parse_fields::<u64>(self.times)?;
        let records = parse_fields::<u64>(self.records)?;
        if times.len() != records.len() {
            return Err(ParseError::InvalidFormat(format!(
                "{} times but {} distances",
                times.len(),
                records.len()
            )));
        }
        Ok(times
            .into_iter()
            .zip(records)
            .map(|(time, record)| Race { time, record })
            .collect())
    }

    /// The sheet read as one race with the spaces removed
    fn single_race(&self) -> Result<Race, ParseError> {
        let join = |s: &str| -> Result<u64, ParseError> {
            let digits: String = s.split_whitespace().collect();
            digits
                .parse()
                .map_err(|e| ParseError::InvalidFormat(format!("bad number {digits:?}: {e}")))
        };
        Ok(Race {
            time: join(self.times)?,
            record: join(self.records)?,
        })
    }
}

impl AocParser for Solver {
    type SharedData<'a> = RaceSheet<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let mut lines = input.lines().filter(|l| !l.trim().is_empty());
        let (Some(times), Some(records)) = (lines.next(), lines.next()) else {
            return Err(ParseError::MissingData(
                "expected a Time line and a Distance line".into(),
            ));
        };
        debug!(times, records);
        let sheet = RaceSheet {
            times: strip_label(times, "Time:")?,
            records: strip_label(records, "Distance:")?,
        };
        sheet.races()?;
        Ok(sheet)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let races = shared.races().map_err(SolveError::failed)?;
        let mut margin = 1u64;
        for (i, race) in races.iter().enumerate() {
            let ways = race.ways_to_win();
            debug!(race = i, ways, "ways to win");
            if ways == 0 {
                warn!(race = i, "cannot win");
            }
            margin *= ways;
        }
        Ok(margin.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let race = shared.single_race().map_err(SolveError::failed)?;
        debug!(?race, "kerned race");
        Ok(race.ways_to_win().to_string())
    }
}

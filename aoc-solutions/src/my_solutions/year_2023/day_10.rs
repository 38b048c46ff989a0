use crate::utils::math::to_base62;
use crate::utils::{Grid, Pos};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;
use tracing::{debug, enabled, Level};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 10, tags = ["2023", "grid"])]
pub struct Solver;

type Dir = (isize, isize);

const UP: Dir = (0, -1);
const DOWN: Dir = (0, 1);
const LEFT: Dir = (-1, 0);
const RIGHT: Dir = (1, 0);

/// Directions a pipe tile opens towards
fn openings(tile: u8) -> &'static [Dir] {
    match tile {
        b'|' => &[UP, DOWN],
        b'-' => &[LEFT, RIGHT],
        b'L' => &[UP, RIGHT],
        b'J' => &[UP, LEFT],
        b'7' => &[DOWN, LEFT],
        b'F' => &[DOWN, RIGHT],
        _ => &[],
    }
}

fn reverse((dx, dy): Dir) -> Dir {
    (-dx, -dy)
}

#[derive(Debug)]
pub struct PipeMaze {
    grid: Grid,
    start: Pos,
    /// The two directions the start tile must open towards
    start_exits: [Dir; 2],
    /// Loop tiles in walking order, starting at `start`
    loop_tiles: Option<Vec<Pos>>,
}

/// Follow pipes from `start` leaving towards `heading` until the walk is
/// back at `start`. Returns the tiles in walking order and the direction of
/// the final step into `start`.
fn trace_loop(grid: &Grid, start: Pos, mut heading: Dir) -> Result<(Vec<Pos>, Dir), String> {
    let mut tiles = vec![start];
    let mut pos = start;

    loop {
        pos = grid
            .offset(pos, heading)
            .ok_or_else(|| format!("pipe at {pos:?} leads off the grid"))?;
        if pos == start {
            return Ok((tiles, heading));
        }
        if tiles.len() > grid.width() * grid.height() {
            return Err("loop walk did not return to start".into());
        }
        let tile = grid.get(pos).unwrap_or(b'.');
        let came_from = reverse(heading);
        let exits = openings(tile);
        if !exits.contains(&came_from) {
            return Err(format!(
                "tile {:?} at {pos:?} does not connect back",
                char::from(tile)
            ));
        }
        heading = exits
            .iter()
            .copied()
            .find(|&d| d != came_from)
            .unwrap_or(came_from);
        tiles.push(pos);
    }
}

impl PipeMaze {
    fn walk_loop(&self) -> Result<Vec<Pos>, SolveError> {
        trace_loop(&self.grid, self.start, self.start_exits[0])
            .map(|(tiles, _)| tiles)
            .map_err(SolveError::failed)
    }

    fn loop_tiles(&mut self) -> Result<&[Pos], SolveError> {
        if self.loop_tiles.is_none() {
            let tiles = self.walk_loop()?;
            debug!(length = tiles.len(), "found loop");
            if enabled!(Level::DEBUG) {
                debug!("distances:\n{}", self.render_distances(&tiles));
            }
            self.loop_tiles = Some(tiles);
        }
        Ok(self.loop_tiles.as_deref().unwrap_or_default())
    }

    /// Grid with each loop tile replaced by its base-62 distance from start
    fn render_distances(&self, tiles: &[Pos]) -> String {
        let n = tiles.len();
        let dist: HashMap<Pos, usize> = tiles
            .iter()
            .enumerate()
            .map(|(i, &p)| (p, i.min(n - i)))
            .collect();
        self.grid.render_with(|pos, tile| match dist.get(&pos) {
            Some(&d) => to_base62(d as u64).chars().last().unwrap_or('?'),
            None if tile == b'.' => '.',
            None => ' ',
        })
    }
}

/// Exits of `S`: the two neighbours that open back towards it and are
/// joined to each other by the loop. Other connecting pipes dead-end.
fn start_exits(grid: &Grid, start: Pos) -> Result<[Dir; 2], ParseError> {
    let candidates: Vec<Dir> = [UP, DOWN, LEFT, RIGHT]
        .into_iter()
        .filter(|&dir| {
            grid.offset(start, dir)
                .and_then(|p| grid.get(p))
                .is_some_and(|tile| openings(tile).contains(&reverse(dir)))
        })
        .collect();

    for &first in &candidates {
        match trace_loop(grid, start, first) {
            Ok((_, arrival)) if reverse(arrival) != first => {
                return Ok([first, reverse(arrival)]);
            }
            Ok(_) => {}
            Err(reason) => debug!(?first, %reason, "start exit is not on the loop"),
        }
    }
    Err(ParseError::InvalidFormat(format!(
        "no loop through the start tile ({} connecting neighbours)",
        candidates.len()
    )))
}

impl AocParser for Solver {
    type SharedData<'a> = PipeMaze;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input)?;
        if let Some((pos, tile)) = grid
            .cells()
            .find(|&(_, t)| !matches!(t, b'.' | b'S') && openings(t).is_empty())
        {
            return Err(ParseError::InvalidFormat(format!(
                "unknown grid element {:?} at {pos:?}",
                char::from(tile)
            )));
        }
        let start = grid
            .find(b'S')
            .ok_or_else(|| ParseError::MissingData("no starting position 'S'".into()))?;
        let start_exits = start_exits(&grid, start)?;
        debug!(?start, ?start_exits, "grid:\n{grid}");

        Ok(PipeMaze {
            grid,
            start,
            start_exits,
            loop_tiles: None,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let tiles = shared.loop_tiles()?;
        Ok((tiles.len() / 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let tiles = shared.loop_tiles()?;

        // shoelace gives twice the polygon area, Pick's theorem the interior
        let twice_area: i64 = tiles
            .iter()
            .zip(tiles.iter().cycle().skip(1))
            .map(|(&(x0, y0), &(x1, y1))| x0 as i64 * y1 as i64 - x1 as i64 * y0 as i64)
            .sum();
        let interior = twice_area.abs() / 2 - tiles.len() as i64 / 2 + 1;
        Ok(interior.to_string())
    }
}

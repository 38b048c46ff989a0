//! Rectangular byte grids parsed from puzzle text

use aoc_solver::ParseError;
use std::fmt;

/// Grid position as `(x, y)`, origin top-left
pub type Pos = (usize, usize);

/// A rectangular grid of ASCII bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Parse non-blank lines into a grid. Every row must have the same width.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut width = None;
        let mut cells = Vec::new();
        let mut height = 0;

        for line in input.lines().map(str::trim_end).filter(|l| !l.is_empty()) {
            let row = line.as_bytes();
            match width {
                None => width = Some(row.len()),
                Some(w) if w != row.len() => {
                    return Err(ParseError::InvalidFormat(format!(
                        "row {} has width {}, expected {}",
                        height + 1,
                        row.len(),
                        w
                    )));
                }
                Some(_) => {}
            }
            cells.extend_from_slice(row);
            height += 1;
        }

        let width = width.ok_or_else(|| ParseError::MissingData("empty grid".into()))?;
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Byte at `pos`, `None` when outside the grid
    pub fn get(&self, (x, y): Pos) -> Option<u8> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x])
    }

    /// Move from `pos` by `(dx, dy)`, `None` when the result leaves the grid
    pub fn offset(&self, (x, y): Pos, (dx, dy): (isize, isize)) -> Option<Pos> {
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        (nx < self.width && ny < self.height).then_some((nx, ny))
    }

    /// First position holding `byte`, in row-major order
    pub fn find(&self, byte: u8) -> Option<Pos> {
        self.cells
            .iter()
            .position(|&b| b == byte)
            .map(|i| (i % self.width, i / self.width))
    }

    pub fn row(&self, y: usize) -> &[u8] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.width)
    }

    /// Every cell with its position, row-major
    pub fn cells(&self) -> impl Iterator<Item = (Pos, u8)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &b)| ((i % self.width, i / self.width), b))
    }

    /// Row-wise text of `f(pos, byte)` for each cell, for debug logging
    pub fn render_with<F>(&self, mut f: F) -> String
    where
        F: FnMut(Pos, u8) -> char,
    {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(f((x, y), self.cells[y * self.width + x]));
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{}", String::from_utf8_lossy(row))?;
        }
        Ok(())
    }
}

//! Helpers shared by several puzzle solvers

pub mod grid;
pub mod math;
pub mod text;

pub use grid::{Grid, Pos};
pub use text::{ExtractedNumber, extract_numbers, parse_fields, parse_lines, strip_label};

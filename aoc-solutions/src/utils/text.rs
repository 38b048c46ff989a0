//! Line and token helpers shared by the puzzle parsers

use anyhow::Context;
use aoc_solver::ParseError;
use std::fmt::Display;
use std::str::FromStr;

/// A run of ASCII digits found in a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractedNumber {
    /// Numeric value of the run
    pub value: u64,
    /// Length of the run in digits
    pub digits: usize,
    /// Byte offset of the first digit
    pub offset: usize,
}

impl ExtractedNumber {
    /// Byte offset one past the last digit
    pub fn end(&self) -> usize {
        self.offset + self.digits
    }
}

/// Find every run of ASCII digits in `line`, including one that ends the line.
///
/// Fails when a run does not fit in a `u64`.
pub fn extract_numbers(line: &str) -> Result<Vec<ExtractedNumber>, ParseError> {
    let mut found = Vec::new();
    let mut current: Option<ExtractedNumber> = None;

    for (i, b) in line.bytes().enumerate() {
        if b.is_ascii_digit() {
            let digit = u64::from(b - b'0');
            let run = current.get_or_insert(ExtractedNumber {
                value: 0,
                digits: 0,
                offset: i,
            });
            run.value = run
                .value
                .checked_mul(10)
                .and_then(|v| v.checked_add(digit))
                .ok_or_else(|| {
                    ParseError::InvalidFormat(format!("number at offset {} overflows u64", run.offset))
                })?;
            run.digits += 1;
        } else if let Some(run) = current.take() {
            found.push(run);
        }
    }
    found.extend(current);
    Ok(found)
}

/// Parse whitespace-separated fields into `T`.
pub fn parse_fields<T>(s: &str) -> Result<Vec<T>, ParseError>
where
    T: FromStr,
    T::Err: Display,
{
    s.split_whitespace()
        .map(|field| {
            field
                .parse::<T>()
                .map_err(|e| ParseError::InvalidFormat(format!("bad field {field:?}: {e}")))
        })
        .collect()
}

/// Strip a leading `label` (e.g. `"Time:"`) and return the rest of the line.
pub fn strip_label<'a>(line: &'a str, label: &str) -> Result<&'a str, ParseError> {
    line.trim_start()
        .strip_prefix(label)
        .ok_or_else(|| ParseError::InvalidFormat(format!("expected {label:?} in {line:?}")))
}

/// Parse every non-blank line with `parse_line`, tagging failures with the
/// 1-based line number.
pub fn parse_lines<'a, T, F>(input: &'a str, mut parse_line: F) -> Result<Vec<T>, ParseError>
where
    F: FnMut(&'a str) -> anyhow::Result<T>,
{
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            parse_line(line.trim_end()).with_context(|| format!("line {}: {:?}", idx + 1, line))
        })
        .collect::<anyhow::Result<Vec<T>>>()
        .map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
}

const SPELLED_DIGITS: [&[u8]; 9] = [
    b"one", b"two", b"three", b"four", b"five", b"six", b"seven", b"eight", b"nine",
];

/// Digit starting at byte `index` of `line`.
///
/// With `spelled`, the words `one`..`nine` count too. Words may overlap
/// (`"twone"` has a 2 at 0 and a 1 at 2).
pub fn digit_at(line: &[u8], index: usize, spelled: bool) -> Option<u32> {
    let b = *line.get(index)?;
    if b.is_ascii_digit() {
        return Some(u32::from(b - b'0'));
    }
    if !spelled {
        return None;
    }
    let rest = &line[index..];
    SPELLED_DIGITS
        .iter()
        .position(|word| rest.starts_with(word))
        .map(|pos| pos as u32 + 1)
}

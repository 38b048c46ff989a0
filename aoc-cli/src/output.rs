//! Output formatting for solver results
//!
//! Answers go to stdout. Timing, failures and the summary are logged.

use crate::executor::SolverResult;
use chrono::TimeDelta;
use std::io::{self, Write};
use tracing::{error, info};

/// Output formatter for solver results
pub struct OutputFormatter {
    quiet: bool,
    start_time: std::time::Instant,
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: std::time::Instant::now(),
        }
    }

    /// Print one result to stdout
    pub fn print_result(&self, result: &SolverResult) -> io::Result<()> {
        self.write_result(&mut io::stdout().lock(), result)
    }

    fn write_result(&self, out: &mut impl Write, result: &SolverResult) -> io::Result<()> {
        match &result.answer {
            Ok(answer) => {
                if self.quiet {
                    writeln!(out, "{answer}")?;
                } else {
                    writeln!(out, "Part {}: {answer}", result.part)?;
                }
                info!(
                    year = result.year,
                    day = result.day,
                    part = result.part,
                    parse = %result
                        .parse_duration
                        .map_or_else(|| "-".to_string(), format_duration),
                    solve = %format_duration(result.solve_duration),
                    "solved"
                );
            }
            Err(e) => {
                error!(
                    year = result.year,
                    day = result.day,
                    part = result.part,
                    "{e}"
                );
            }
        }
        Ok(())
    }

    /// Log a summary after all results
    pub fn print_summary(&self, results: &[SolverResult]) {
        let total = results.len();
        let successes = results.iter().filter(|r| r.answer.is_ok()).count();

        let total_parse_time: TimeDelta = results.iter().filter_map(|r| r.parse_duration).sum();
        let total_solve_time: TimeDelta = results.iter().map(|r| r.solve_duration).sum();

        info!(
            solved = successes,
            failed = total - successes,
            parse = %format_duration(total_parse_time),
            solve = %format_duration(total_solve_time),
            elapsed = %format_std_duration(self.start_time.elapsed()),
            "summary"
        );
    }
}

/// Format a TimeDelta for display
pub fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Wall-clock variant of [`format_duration`]
fn format_std_duration(d: std::time::Duration) -> String {
    TimeDelta::from_std(d).map_or_else(|_| "N/A".to_string(), format_duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::{SolveError, SolverError};

    fn result(answer: Result<String, SolverError>) -> SolverResult {
        SolverResult {
            year: 2023,
            day: 5,
            part: 2,
            answer,
            parse_duration: None,
            solve_duration: TimeDelta::milliseconds(3),
        }
    }

    fn render(quiet: bool, result: &SolverResult) -> String {
        let mut out = Vec::new();
        OutputFormatter::new(quiet)
            .write_result(&mut out, result)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_answer_lines() {
        let ok = result(Ok("46".into()));
        assert_eq!(render(false, &ok), "Part 2: 46\n");
        assert_eq!(render(true, &ok), "46\n");
    }

    #[test]
    fn test_failures_print_nothing_to_stdout() {
        let failed = result(Err(SolveError::PartOutOfRange(2).into()));
        assert_eq!(render(false, &failed), "");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(TimeDelta::microseconds(999)), "999µs");
        assert_eq!(format_duration(TimeDelta::microseconds(1500)), "1.50ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(2500)), "2.50s");
        assert_eq!(format_duration(TimeDelta::microseconds(-20)), "-20µs");
        assert_eq!(
            format_std_duration(std::time::Duration::from_millis(12)),
            "12.00ms"
        );
    }
}

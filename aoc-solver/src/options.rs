//! Runtime options handed from the runner to a solver at parse time

use crate::error::ParseError;
use std::collections::BTreeMap;
use std::str::FromStr;

/// String key/value settings for a solver run
///
/// Options are free-form so the framework stays unaware of any single
/// puzzle. A solver reads the keys it understands in
/// [`AocParser::parse_with_options`](crate::AocParser::parse_with_options)
/// and ignores the rest.
///
/// # Example
///
/// ```
/// use aoc_solver::SolverOptions;
///
/// let options = SolverOptions::new().with("num_workers", "4");
/// assert_eq!(options.get::<usize>("num_workers").unwrap(), Some(4));
/// assert_eq!(options.get_or("batch_size", 100usize).unwrap(), 100);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverOptions {
    values: BTreeMap<String, String>,
}

impl SolverOptions {
    /// Create an empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or replace an option
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Raw string value for a key
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Parse the value for `key`, `Ok(None)` when the key is absent
    pub fn get<T>(&self, key: &str) -> Result<Option<T>, ParseError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get_str(key)
            .map(|value| {
                value.parse::<T>().map_err(|e| ParseError::InvalidOption {
                    key: key.to_string(),
                    value: value.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    }

    /// Parse the value for `key`, falling back to `default` when absent
    pub fn get_or<T>(&self, key: &str, default: T) -> Result<T, ParseError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Iterate options in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for SolverOptions
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = SolverOptions::new();
        for (k, v) in iter {
            options.set(k, v);
        }
        options
    }
}

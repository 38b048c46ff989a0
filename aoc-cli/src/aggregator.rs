//! Re-orders results that may arrive out of order
//!
//! Parts solved on the thread pool finish in any order; output is always
//! by (year, day, part).

use crate::executor::{SolverResult, WorkItem};
use std::collections::{BTreeMap, VecDeque};

/// Key for ordering results, ascending
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

impl ResultKey {
    /// Every key a work item will report
    pub fn for_work(work: &WorkItem) -> impl Iterator<Item = ResultKey> + '_ {
        work.parts.clone().map(|part| ResultKey {
            year: work.year,
            day: work.day,
            part,
        })
    }
}

/// Buffers results until every earlier expected key has been emitted
pub struct ResultAggregator {
    /// Keys still to emit, smallest first
    expected: VecDeque<ResultKey>,
    pending: BTreeMap<ResultKey, SolverResult>,
}

impl ResultAggregator {
    pub fn new(expected_keys: impl IntoIterator<Item = ResultKey>) -> Self {
        let mut expected: Vec<_> = expected_keys.into_iter().collect();
        expected.sort_unstable();
        expected.dedup();
        Self {
            expected: expected.into(),
            pending: BTreeMap::new(),
        }
    }

    /// Add a result and return the results now ready for output, in order
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.insert(ResultKey::from(&result), result);

        let mut ready = Vec::new();
        while let Some(next) = self.expected.front() {
            let Some(result) = self.pending.remove(next) else {
                break;
            };
            self.expected.pop_front();
            ready.push(result);
        }
        ready
    }

    /// Remaining buffered results in key order
    pub fn drain(&mut self) -> Vec<SolverResult> {
        std::mem::take(&mut self.pending).into_values().collect()
    }

    /// Keys that never arrived
    pub fn missing(&self) -> impl Iterator<Item = &ResultKey> {
        self.expected
            .iter()
            .filter(|key| !self.pending.contains_key(key))
    }

    /// Check if all expected results have been received
    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use proptest::prelude::*;

    fn make_result(day: u8, part: u8) -> SolverResult {
        SolverResult {
            year: 2023,
            day,
            part,
            answer: Ok(format!("{day}_{part}")),
            parse_duration: Some(TimeDelta::milliseconds(5)),
            solve_duration: TimeDelta::milliseconds(10),
        }
    }

    fn key(day: u8, part: u8) -> ResultKey {
        ResultKey {
            year: 2023,
            day,
            part,
        }
    }

    #[test]
    fn test_in_order_results() {
        let mut agg = ResultAggregator::new([key(5, 1), key(5, 2)]);

        let ready = agg.add(make_result(5, 1));
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].part, 1);

        let ready = agg.add(make_result(5, 2));
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].part, 2);

        assert!(agg.is_complete());
    }

    #[test]
    fn test_out_of_order_results() {
        let mut agg = ResultAggregator::new([key(6, 1), key(5, 2), key(5, 1)]);

        assert!(agg.add(make_result(5, 2)).is_empty());
        assert!(agg.add(make_result(6, 1)).is_empty());

        let ready: Vec<_> = agg
            .add(make_result(5, 1))
            .iter()
            .map(ResultKey::from)
            .collect();
        assert_eq!(ready, vec![key(5, 1), key(5, 2), key(6, 1)]);
        assert!(agg.is_complete());
    }

    #[test]
    fn test_drain_and_missing() {
        let mut agg = ResultAggregator::new([key(5, 1), key(5, 2)]);
        agg.add(make_result(5, 2));

        assert_eq!(agg.missing().copied().collect::<Vec<_>>(), vec![key(5, 1)]);
        let remaining = agg.drain();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].part, 2);
        assert!(!agg.is_complete());
    }

    #[test]
    fn test_keys_for_work() {
        let work = WorkItem {
            year: 2023,
            day: 11,
            parts: 1..=2,
        };
        let keys: Vec<_> = ResultKey::for_work(&work).collect();
        assert_eq!(keys, vec![key(11, 1), key(11, 2)]);
    }

    proptest! {
        #[test]
        fn prop_any_arrival_order_emits_sorted(order in Just((1u8..=25).collect::<Vec<_>>()).prop_shuffle()) {
            let mut agg = ResultAggregator::new((1u8..=25).map(|d| key(d, 1)));
            let mut emitted = Vec::new();
            for day in order {
                emitted.extend(agg.add(make_result(day, 1)).iter().map(|r| r.day));
            }
            prop_assert!(agg.is_complete());
            prop_assert_eq!(emitted, (1u8..=25).collect::<Vec<_>>());
        }
    }
}

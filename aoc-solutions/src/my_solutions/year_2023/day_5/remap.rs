//! Interval remapping through a chain of category stages

use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemapError {
    #[error("interval starting at source {source_start} has zero length")]
    EmptyInterval { source_start: u64 },
    #[error("interval {source_start}/{dest_start} with length {length} overflows u64")]
    Overflow {
        source_start: u64,
        dest_start: u64,
        length: u64,
    },
    #[error("category {0:?} has more than one outgoing stage")]
    DuplicateStage(String),
    #[error("stage chain loops back to category {0:?}")]
    Cycle(String),
}

/// Maps `[source_start, source_start + length)` onto
/// `[dest_start, dest_start + length)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    source_start: u64,
    dest_start: u64,
    length: u64,
}

impl Interval {
    pub fn new(source_start: u64, dest_start: u64, length: u64) -> Result<Self, RemapError> {
        if length == 0 {
            return Err(RemapError::EmptyInterval { source_start });
        }
        if source_start.checked_add(length).is_none() || dest_start.checked_add(length).is_none()
        {
            return Err(RemapError::Overflow {
                source_start,
                dest_start,
                length,
            });
        }
        Ok(Self {
            source_start,
            dest_start,
            length,
        })
    }

    pub fn source_start(&self) -> u64 {
        self.source_start
    }

    /// One past the last covered source id
    pub fn source_end(&self) -> u64 {
        self.source_start + self.length
    }

    pub fn contains(&self, id: u64) -> bool {
        (self.source_start..self.source_end()).contains(&id)
    }

    /// Mapped id, or `None` when `id` is outside the source range
    pub fn map(&self, id: u64) -> Option<u64> {
        self.contains(id)
            .then(|| self.dest_start + (id - self.source_start))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "src [{}-{}] => dst [{}-{}]",
            self.source_start,
            self.source_end() - 1,
            self.dest_start,
            self.dest_start + self.length - 1
        )
    }
}

/// One category-to-category mapping step.
///
/// Intervals are sorted by source start once at construction; ids not
/// covered by any interval map to themselves.
#[derive(Debug, Clone)]
pub struct Stage {
    source: String,
    destination: String,
    intervals: Vec<Interval>,
}

impl Stage {
    pub fn new(
        source: impl Into<String>,
        destination: impl Into<String>,
        mut intervals: Vec<Interval>,
    ) -> Self {
        intervals.sort_by_key(Interval::source_start);
        Self {
            source: source.into(),
            destination: destination.into(),
            intervals,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn map(&self, id: u64) -> u64 {
        // first interval that ends past `id` is the only one that can hold it
        let idx = self.intervals.partition_point(|iv| iv.source_end() <= id);
        self.intervals
            .get(idx)
            .and_then(|iv| iv.map(id))
            .unwrap_or(id)
    }
}

/// Stages keyed by source category, forming acyclic chains
#[derive(Debug, Clone, Default)]
pub struct StageChain {
    stages: HashMap<String, Stage>,
}

impl StageChain {
    /// Build a chain, rejecting a category with two outgoing stages and any
    /// loop between categories.
    pub fn from_stages(stages: impl IntoIterator<Item = Stage>) -> Result<Self, RemapError> {
        let mut by_source = HashMap::new();
        for stage in stages {
            if by_source.contains_key(stage.source()) {
                return Err(RemapError::DuplicateStage(stage.source.clone()));
            }
            by_source.insert(stage.source.clone(), stage);
        }

        let chain = Self { stages: by_source };
        for start in chain.stages.keys() {
            let mut seen = HashSet::new();
            let mut current = start.as_str();
            while let Some(stage) = chain.stages.get(current) {
                if !seen.insert(current) {
                    return Err(RemapError::Cycle(current.to_string()));
                }
                current = stage.destination();
            }
        }
        Ok(chain)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn stage(&self, source: &str) -> Option<&Stage> {
        self.stages.get(source)
    }

    /// Stages visited from `start`, in order
    pub fn walk<'c>(&'c self, start: &'c str) -> impl Iterator<Item = &'c Stage> + 'c {
        std::iter::successors(self.stages.get(start), move |stage| {
            self.stages.get(stage.destination())
        })
    }

    /// Category names from `start` to the end of its chain
    pub fn categories<'c>(&'c self, start: &'c str) -> Vec<&'c str> {
        std::iter::once(start)
            .chain(self.walk(start).map(Stage::destination))
            .collect()
    }

    /// Final category reached from `start`
    pub fn terminal<'c>(&'c self, start: &'c str) -> &'c str {
        self.walk(start).last().map_or(start, Stage::destination)
    }

    /// Push `id` through every stage reachable from `start`.
    pub fn resolve(&self, id: u64, start: &str) -> u64 {
        self.walk(start).fold(id, |id, stage| stage.map(id))
    }

    /// Like [`StageChain::resolve`] but keeps every intermediate id,
    /// starting with `(start, id)`.
    pub fn path<'c>(&'c self, id: u64, start: &'c str) -> Vec<(&'c str, u64)> {
        let mut path = vec![(start, id)];
        let mut current = id;
        for stage in self.walk(start) {
            current = stage.map(current);
            path.push((stage.destination(), current));
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn seed_to_soil() -> StageChain {
        let stage = Stage::new(
            "seed",
            "soil",
            vec![
                Interval::new(98, 50, 2).unwrap(),
                Interval::new(50, 52, 48).unwrap(),
            ],
        );
        StageChain::from_stages([stage]).unwrap()
    }

    #[test]
    fn test_seed_to_soil_example() {
        let chain = seed_to_soil();
        assert_eq!(chain.resolve(79, "seed"), 81);
        assert_eq!(chain.resolve(14, "seed"), 14);
        assert_eq!(chain.resolve(98, "seed"), 50);
        assert_eq!(chain.resolve(99, "seed"), 51);
        assert_eq!(chain.resolve(100, "seed"), 100);
        assert_eq!(chain.path(79, "seed"), vec![("seed", 79), ("soil", 81)]);
        assert_eq!(chain.terminal("seed"), "soil");
    }

    #[test]
    fn test_unknown_start_is_identity() {
        let chain = seed_to_soil();
        assert_eq!(chain.resolve(7, "water"), 7);
        assert_eq!(chain.categories("water"), vec!["water"]);
        assert_eq!(chain.terminal("water"), "water");
    }

    #[test]
    fn test_multi_stage_chain_follows_destinations() {
        let chain = StageChain::from_stages([
            Stage::new("b", "c", vec![Interval::new(0, 100, 10).unwrap()]),
            Stage::new("a", "b", vec![Interval::new(5, 0, 5).unwrap()]),
        ])
        .unwrap();
        assert_eq!(chain.categories("a"), vec!["a", "b", "c"]);
        assert_eq!(chain.resolve(7, "a"), 102);
        assert_eq!(chain.resolve(20, "a"), 20);
    }

    #[test]
    fn test_invalid_intervals() {
        assert_eq!(
            Interval::new(3, 4, 0),
            Err(RemapError::EmptyInterval { source_start: 3 })
        );
        assert!(matches!(
            Interval::new(u64::MAX, 0, 2),
            Err(RemapError::Overflow { .. })
        ));
    }

    #[test]
    fn test_chain_validation() {
        let dup = StageChain::from_stages([
            Stage::new("a", "b", vec![]),
            Stage::new("a", "c", vec![]),
        ]);
        assert_eq!(dup.unwrap_err(), RemapError::DuplicateStage("a".into()));

        let cycle = StageChain::from_stages([
            Stage::new("a", "b", vec![]),
            Stage::new("b", "a", vec![]),
        ]);
        assert!(matches!(cycle, Err(RemapError::Cycle(_))));
    }

    /// Disjoint intervals laid out left to right from `(gap, length, dest)`
    fn disjoint_intervals() -> impl Strategy<Value = Vec<Interval>> {
        prop::collection::vec((0u64..50, 1u64..50, 0u64..10_000), 0..8).prop_map(|triples| {
            let mut next = 0;
            triples
                .into_iter()
                .map(|(gap, length, dest)| {
                    let start = next + gap;
                    next = start + length;
                    Interval::new(start, dest, length).unwrap()
                })
                .collect()
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        /// Ids outside every interval map to themselves
        #[test]
        fn prop_uncovered_is_identity(intervals in disjoint_intervals(), id in 0u64..1_000) {
            prop_assume!(intervals.iter().all(|iv| !iv.contains(id)));
            let stage = Stage::new("x", "y", intervals);
            prop_assert_eq!(stage.map(id), id);
        }

        /// Ids inside an interval are shifted by its offset
        #[test]
        fn prop_covered_is_affine(
            intervals in disjoint_intervals(),
            pick in any::<prop::sample::Index>(),
            offset in any::<prop::sample::Index>(),
        ) {
            prop_assume!(!intervals.is_empty());
            let iv = *pick.get(&intervals);
            let id = iv.source_start() + offset.index(iv.length as usize) as u64;

            let mut shuffled = intervals.clone();
            shuffled.reverse();
            let stage = Stage::new("x", "y", shuffled);
            prop_assert_eq!(stage.map(id), iv.dest_start + (id - iv.source_start()));
        }

        /// Resolving twice gives the same answer
        #[test]
        fn prop_resolve_is_deterministic(
            first in disjoint_intervals(),
            second in disjoint_intervals(),
            id in 0u64..1_000,
        ) {
            let chain = StageChain::from_stages([
                Stage::new("seed", "soil", first),
                Stage::new("soil", "location", second),
            ])
            .unwrap();
            let once = chain.resolve(id, "seed");
            prop_assert_eq!(once, chain.resolve(id, "seed"));
            prop_assert_eq!(chain.path(id, "seed").last().copied(), Some(("location", once)));
        }
    }
}

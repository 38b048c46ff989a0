//! Batched parallel minimum over large id ranges

use rayon::prelude::*;
use std::num::{NonZeroU64, NonZeroUsize};
use std::ops::Range;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_BATCH_SIZE: u64 = 10_000_000;
pub const DEFAULT_NUM_WORKERS: usize = 20;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("batch size must be greater than zero")]
    ZeroBatchSize,
    #[error("worker count must be greater than zero")]
    ZeroWorkers,
    #[error("failed to start worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Half-open id range `[start, end)` handled by a single worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch {
    pub start: u64,
    pub end: u64,
}

impl Batch {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn ids(&self) -> Range<u64> {
        self.start..self.end
    }
}

/// Split `[lo, hi)` into consecutive batches of `size`, the last one clipped
/// to `hi`.
pub fn batches(lo: u64, hi: u64, size: NonZeroU64) -> impl Iterator<Item = Batch> {
    let size = size.get();
    std::iter::successors((lo < hi).then_some(lo), move |&start| {
        start.checked_add(size).filter(|&next| next < hi)
    })
    .map(move |start| Batch {
        start,
        end: start.saturating_add(size).min(hi),
    })
}

/// Fans batches out over a fixed-size worker pool and reduces their minima
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchDispatcher {
    batch_size: NonZeroU64,
    num_workers: NonZeroUsize,
}

impl Default for BatchDispatcher {
    fn default() -> Self {
        const BATCH_SIZE: NonZeroU64 = NonZeroU64::new(DEFAULT_BATCH_SIZE).unwrap();
        const NUM_WORKERS: NonZeroUsize = NonZeroUsize::new(DEFAULT_NUM_WORKERS).unwrap();
        Self {
            batch_size: BATCH_SIZE,
            num_workers: NUM_WORKERS,
        }
    }
}

impl BatchDispatcher {
    pub fn new(batch_size: u64, num_workers: usize) -> Result<Self, DispatchError> {
        Ok(Self {
            batch_size: NonZeroU64::new(batch_size).ok_or(DispatchError::ZeroBatchSize)?,
            num_workers: NonZeroUsize::new(num_workers).ok_or(DispatchError::ZeroWorkers)?,
        })
    }

    pub fn batch_size(&self) -> u64 {
        self.batch_size.get()
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers.get()
    }

    /// All batches for the given `[lo, hi)` ranges, in input order
    pub fn plan(&self, ranges: &[Range<u64>]) -> Vec<Batch> {
        ranges
            .iter()
            .flat_map(|r| batches(r.start, r.end, self.batch_size))
            .collect()
    }

    /// Minimum of `f(id)` over every id of every range.
    ///
    /// Each worker reduces its own batches to a local minimum and the pool
    /// folds those together, so nothing is shared between workers except
    /// `f`. Returns `Ok(None)` when the ranges hold no ids.
    pub fn min_over<F>(&self, ranges: &[Range<u64>], f: F) -> Result<Option<u64>, DispatchError>
    where
        F: Fn(u64) -> u64 + Sync,
    {
        let plan = self.plan(ranges);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.num_workers())
            .thread_name(|i| format!("remap-worker-{i}"))
            .build()?;

        info!(
            batches = plan.len(),
            workers = self.num_workers(),
            "launching batches"
        );
        let started = Instant::now();

        let min = pool.install(|| {
            plan.par_iter()
                .filter_map(|batch| {
                    let batch_started = Instant::now();
                    let local = batch.ids().map(&f).min();
                    debug!(
                        start = batch.start,
                        end = batch.end - 1,
                        len = batch.len(),
                        elapsed = ?batch_started.elapsed(),
                        "batch done"
                    );
                    local
                })
                .reduce_with(u64::min)
        });

        info!(elapsed = ?started.elapsed(), ?min, "all batches drained");
        Ok(min)
    }
}

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vstab_frame::PlaneMut;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),
}

/// Controls how the rows of a plane are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    /// Run sequentially on the calling thread.
    ///
    /// Useful for small frames, debugging, or when the caller already runs
    /// one transform per thread.
    Serial,

    /// Split the rows over a local Rayon thread pool.
    ///
    /// The pool is created once per transform call and shared by all planes.
    #[default]
    Parallel,
}

/// Number of worker threads used when none is configured.
///
/// Half of the available parallelism, at least one.
pub fn default_thread_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get() / 2)
        .unwrap_or(1)
        .max(1)
}

/// Resolve a configured thread count, `0` meaning [`default_thread_count`].
pub fn resolve_thread_count(threads: usize) -> usize {
    if threads == 0 {
        default_thread_count()
    } else {
        threads
    }
}

/// Runs a row function over every row of a destination plane.
///
/// Rows are disjoint `&mut` slices, so the row function only needs shared
/// access to everything else (the source plane, the mapper). The thread pool
/// is created once with the executor and serves every later call.
pub struct RowExecutor {
    pool: Option<rayon::ThreadPool>,
}

impl RowExecutor {
    /// Create an executor for the given strategy.
    ///
    /// # Arguments
    ///
    /// * `strategy` - Serial or parallel execution.
    /// * `threads` - Number of worker threads, `0` for [`default_thread_count`].
    ///
    /// # Errors
    ///
    /// Returns [`ParallelError::BuildError`] if the thread pool cannot be built.
    pub fn new(strategy: ExecutionStrategy, threads: usize) -> Result<Self, ParallelError> {
        let threads = resolve_thread_count(threads);
        let pool = match strategy {
            ExecutionStrategy::Parallel if threads > 1 => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| ParallelError::BuildError(e.to_string()))?,
            ),
            _ => None,
        };
        log::debug!(
            "row executor: {:?}, {} thread(s)",
            strategy,
            pool.as_ref().map_or(1, |p| p.current_num_threads())
        );
        Ok(Self { pool })
    }

    /// A serial executor.
    pub fn serial() -> Self {
        Self { pool: None }
    }

    /// Number of threads rows are spread over.
    pub fn threads(&self) -> usize {
        self.pool.as_ref().map_or(1, |p| p.current_num_threads())
    }

    /// Apply `f(y, row)` to every row of `dst`.
    ///
    /// `row` is trimmed to the meaningful bytes of the row; stride padding is
    /// never touched. Returns once every row has been processed.
    pub fn for_each_row<F>(&self, dst: &mut PlaneMut<'_>, f: F)
    where
        F: Fn(usize, &mut [u8]) + Send + Sync,
    {
        let stride = dst.stride();
        let height = dst.height();
        let row_bytes = dst.row_bytes();
        let data = dst.as_slice_mut();

        match &self.pool {
            Some(pool) => pool.install(|| {
                data.par_chunks_mut(stride)
                    .take(height)
                    .enumerate()
                    .for_each(|(y, row)| f(y, &mut row[..row_bytes]));
            }),
            None => data
                .chunks_mut(stride)
                .take(height)
                .enumerate()
                .for_each(|(y, row)| f(y, &mut row[..row_bytes])),
        }
    }
}

impl std::fmt::Debug for RowExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("RowExecutor")
            .field("threads", &self.threads())
            .finish()
    }
}

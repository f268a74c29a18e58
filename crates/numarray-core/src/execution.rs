//! Execution context for column-parallel kernels
//!
//! Elementwise kernels are embarrassingly parallel over columns. The
//! [`ExecutionContext`] decides, per call, whether a batch of independent
//! column jobs runs sequentially or on Rayon's pool, and always returns the
//! results in job order so output assembly is deterministic.
//!
//! Parallel execution needs the `parallel` feature; without it every strategy
//! runs sequentially.

#[cfg(feature = "parallel")]
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Execution strategy for batch operations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    /// Process jobs sequentially
    Sequential,
    /// Process jobs in parallel
    Parallel,
    /// Go parallel once the work exceeds the context's threshold
    #[default]
    Auto,
}

/// Default element count above which `Auto` goes parallel
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1 << 16;

/// How kernels schedule independent per-column work
#[derive(Clone, Debug)]
pub struct ExecutionContext {
    strategy: ExecutionStrategy,
    parallel_threshold: usize,
    #[cfg(feature = "parallel")]
    thread_pool: Option<std::sync::Arc<rayon::ThreadPool>>,
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new(ExecutionStrategy::Auto, DEFAULT_PARALLEL_THRESHOLD)
    }
}

impl ExecutionContext {
    pub fn new(strategy: ExecutionStrategy, parallel_threshold: usize) -> Self {
        Self {
            strategy,
            parallel_threshold,
            #[cfg(feature = "parallel")]
            thread_pool: None,
        }
    }

    /// Context that never spawns work on other threads
    pub fn sequential() -> Self {
        Self::new(ExecutionStrategy::Sequential, usize::MAX)
    }

    /// Create with a dedicated pool of `num_threads` workers
    #[cfg(feature = "parallel")]
    pub fn with_num_threads(
        strategy: ExecutionStrategy,
        parallel_threshold: usize,
        num_threads: usize,
    ) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to create thread pool: {e}")))?;
        Ok(Self {
            strategy,
            parallel_threshold,
            thread_pool: Some(std::sync::Arc::new(pool)),
        })
    }

    pub fn strategy(&self) -> ExecutionStrategy {
        self.strategy
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Whether a job batch touching `work` elements would run in parallel
    pub fn is_parallel_for(&self, work: usize) -> bool {
        if !cfg!(feature = "parallel") {
            return false;
        }
        match self.strategy {
            ExecutionStrategy::Sequential => false,
            ExecutionStrategy::Parallel => true,
            ExecutionStrategy::Auto => work >= self.parallel_threshold,
        }
    }

    /// Run `count` independent jobs, returning results in job order
    ///
    /// `work` is the total number of elements the jobs touch and feeds the
    /// `Auto` decision.
    pub fn execute_batch<F, R>(&self, count: usize, work: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        #[cfg(feature = "parallel")]
        {
            if self.is_parallel_for(work) && count > 1 {
                use rayon::prelude::*;

                return match &self.thread_pool {
                    Some(pool) => pool.install(|| (0..count).into_par_iter().map(&f).collect()),
                    None => (0..count).into_par_iter().map(&f).collect(),
                };
            }
        }
        #[cfg(not(feature = "parallel"))]
        let _ = work;

        (0..count).map(f).collect()
    }

    /// Get the number of threads available
    pub fn num_threads(&self) -> usize {
        #[cfg(feature = "parallel")]
        {
            if self.strategy != ExecutionStrategy::Sequential {
                return match &self.thread_pool {
                    Some(pool) => pool.current_num_threads(),
                    None => rayon::current_num_threads(),
                };
            }
        }
        1
    }
}

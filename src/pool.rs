//! Where independent work items run.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::error::Result;

/// A worker pool for independent items with no communication between them.
///
/// Results come back in input order, but callers that race on shared state
/// (region finding) make no promise about which item wins.
#[derive(Debug, Default)]
pub enum WorkerPool {
    /// Run everything on the calling thread.
    Sequential,
    /// Rayon's global pool.
    #[default]
    Global,
    Dedicated(ThreadPool),
}

impl WorkerPool {
    /// A dedicated pool with `threads` workers. One thread means sequential.
    pub fn with_threads(threads: usize) -> Result<Self> {
        if threads <= 1 {
            return Ok(WorkerPool::Sequential);
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("aoc-worker-{i}"))
            .build()?;
        debug!(threads, "built dedicated worker pool");
        Ok(WorkerPool::Dedicated(pool))
    }

    pub fn is_sequential(&self) -> bool {
        matches!(self, WorkerPool::Sequential)
    }

    pub fn map<I, R, F>(&self, items: &[I], f: F) -> Vec<R>
    where
        I: Sync,
        R: Send,
        F: Fn(&I) -> R + Sync + Send,
    {
        match self {
            WorkerPool::Sequential => items.iter().map(f).collect(),
            WorkerPool::Global => items.par_iter().map(f).collect(),
            WorkerPool::Dedicated(pool) => pool.install(|| items.par_iter().map(&f).collect()),
        }
    }

    pub fn filter_map<I, R, F>(&self, items: &[I], f: F) -> Vec<R>
    where
        I: Sync,
        R: Send,
        F: Fn(&I) -> Option<R> + Sync + Send,
    {
        match self {
            WorkerPool::Sequential => items.iter().filter_map(f).collect(),
            WorkerPool::Global => items.par_iter().filter_map(f).collect(),
            WorkerPool::Dedicated(pool) => {
                pool.install(|| items.par_iter().filter_map(&f).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pool_kind_keeps_input_order() {
        let items: Vec<u32> = (0..100).collect();
        let expected: Vec<u32> = items.iter().map(|x| x * 2).collect();
        for pool in [
            WorkerPool::Sequential,
            WorkerPool::Global,
            WorkerPool::with_threads(3).unwrap(),
        ] {
            assert_eq!(pool.map(&items, |x| x * 2), expected);
            let odd = pool.filter_map(&items, |&x| (x % 2 == 1).then_some(x));
            assert_eq!(odd.len(), 50);
            assert_eq!(odd[0], 1);
        }
    }

    #[test]
    fn single_thread_falls_back_to_sequential() {
        assert!(WorkerPool::with_threads(1).unwrap().is_sequential());
        assert!(WorkerPool::with_threads(0).unwrap().is_sequential());
        assert!(!WorkerPool::with_threads(2).unwrap().is_sequential());
    }
}

//! Parallel execution strategy

use crate::{
    error::{EngineError, Result},
    executor::{ExecutionMode, Executor},
};
use rayon::prelude::*;

/// Parallel executor, one document per rayon task
#[derive(Debug, Clone, Default)]
pub struct ParallelExecutor {
    threads: Option<usize>,
}

impl ParallelExecutor {
    /// Use a dedicated pool of `threads` workers, or the global pool for `None`
    pub fn new(threads: Option<usize>) -> Self {
        Self { threads }
    }
}

impl Executor for ParallelExecutor {
    fn execute<T, R, F>(&self, items: Vec<T>, job: F) -> Result<Vec<R>>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Send + Sync,
    {
        match self.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| EngineError::ParallelError(e.to_string()))?;
                Ok(pool.install(|| items.into_par_iter().map(&job).collect()))
            }
            None => Ok(items.into_par_iter().map(job).collect()),
        }
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Parallel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_input_order() {
        let items: Vec<usize> = (0..500).collect();
        let doubled = ParallelExecutor::new(Some(4))
            .execute(items, |n| n * 2)
            .unwrap();
        assert_eq!(doubled, (0..500).map(|n| n * 2).collect::<Vec<_>>());
    }
}

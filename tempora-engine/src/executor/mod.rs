//! Execution strategies for document batches

use crate::error::Result;

#[cfg(feature = "parallel")]
pub mod parallel;
pub mod sequential;

#[cfg(feature = "parallel")]
pub use parallel::ParallelExecutor;
pub use sequential::SequentialExecutor;

/// Execution mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// One document after another on the calling thread
    Sequential,
    /// Documents spread over a rayon pool
    Parallel,
    /// Pick by batch size
    #[default]
    Adaptive,
}

impl ExecutionMode {
    /// Configuration name of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Sequential => "sequential",
            ExecutionMode::Parallel => "parallel",
            ExecutionMode::Adaptive => "adaptive",
        }
    }
}

impl std::str::FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "sequential" => Ok(ExecutionMode::Sequential),
            "parallel" => Ok(ExecutionMode::Parallel),
            "adaptive" => Ok(ExecutionMode::Adaptive),
            other => Err(format!("unknown execution mode: {other}")),
        }
    }
}

/// Runs one job per item and keeps input order
pub trait Executor: Send + Sync {
    /// Apply `job` to every item
    fn execute<T, R, F>(&self, items: Vec<T>, job: F) -> Result<Vec<R>>
    where
        T: Send,
        R: Send,
        F: Fn(T) -> R + Send + Sync;

    /// Mode this executor implements
    fn mode(&self) -> ExecutionMode;
}

/// Resolve [`ExecutionMode::Adaptive`] for a batch
pub fn auto_select(batch_len: usize, threshold: usize) -> ExecutionMode {
    if batch_len < 2 || batch_len < threshold {
        ExecutionMode::Sequential
    } else {
        #[cfg(feature = "parallel")]
        return ExecutionMode::Parallel;

        #[cfg(not(feature = "parallel"))]
        ExecutionMode::Sequential
    }
}

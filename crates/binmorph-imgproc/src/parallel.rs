use rayon::prelude::*;
use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The row length must be positive for a non-empty buffer.
    #[error("row length must be > 0, got {0}")]
    InvalidRowStride(usize),
}

/// Controls how row-wise operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process rows in parallel.
    #[default]
    ParallelRows,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

/// Trait to execute a row-wise operation over a mutable buffer with a given strategy.
pub trait ExecuteRowsExt<T> {
    /// Split the buffer into rows of `row_len` elements and run `op` on each.
    ///
    /// # Arguments
    ///
    /// * `strategy` - The execution strategy.
    /// * `row_len` - The number of elements per row.
    /// * `op` - The operation, called with the row index and the row slice.
    ///
    /// # Returns
    ///
    /// A result indicating success or failure.
    fn execute_rows_with<F>(
        &mut self,
        strategy: ExecutionStrategy,
        row_len: usize,
        op: F,
    ) -> Result<(), ParallelError>
    where
        F: Fn(usize, &mut [T]) + Sync + Send;
}

impl<T: Send> ExecuteRowsExt<T> for [T] {
    fn execute_rows_with<F>(
        &mut self,
        strategy: ExecutionStrategy,
        row_len: usize,
        op: F,
    ) -> Result<(), ParallelError>
    where
        F: Fn(usize, &mut [T]) + Sync + Send,
    {
        if self.is_empty() {
            return Ok(());
        }
        if row_len == 0 {
            return Err(ParallelError::InvalidRowStride(row_len));
        }

        match strategy {
            ExecutionStrategy::Serial => {
                self.chunks_mut(row_len)
                    .enumerate()
                    .for_each(|(row, chunk)| op(row, chunk));
            }
            ExecutionStrategy::ParallelRows => {
                self.par_chunks_mut(row_len)
                    .enumerate()
                    .for_each(|(row, chunk)| op(row, chunk));
            }
            ExecutionStrategy::Fixed(n) => {
                if n == 0 {
                    return Err(ParallelError::InvalidThreadCount(n));
                }
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| ParallelError::BuildError(e.to_string()))?;

                pool.install(|| {
                    self.par_chunks_mut(row_len)
                        .enumerate()
                        .for_each(|(row, chunk)| op(row, chunk));
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_with_row_index(strategy: ExecutionStrategy) -> Result<Vec<usize>, ParallelError> {
        let mut dst = vec![0usize; 6];
        dst.as_mut_slice()
            .execute_rows_with(strategy, 2, |row, chunk| {
                chunk.iter_mut().for_each(|v| *v = row);
            })?;
        Ok(dst)
    }

    #[test]
    fn test_execute_serial() -> Result<(), ParallelError> {
        assert_eq!(fill_with_row_index(ExecutionStrategy::Serial)?, vec![0, 0, 1, 1, 2, 2]);
        Ok(())
    }

    #[test]
    fn test_execute_parallel_rows() -> Result<(), ParallelError> {
        assert_eq!(
            fill_with_row_index(ExecutionStrategy::ParallelRows)?,
            vec![0, 0, 1, 1, 2, 2]
        );
        Ok(())
    }

    #[test]
    fn test_execute_fixed_success() -> Result<(), ParallelError> {
        assert_eq!(fill_with_row_index(ExecutionStrategy::Fixed(2))?, vec![0, 0, 1, 1, 2, 2]);
        Ok(())
    }

    #[test]
    fn test_execute_fixed_error() {
        let res = fill_with_row_index(ExecutionStrategy::Fixed(0));
        assert_eq!(res, Err(ParallelError::InvalidThreadCount(0)));
    }

    #[test]
    fn test_execute_zero_row_len() {
        let mut dst = vec![0u8; 4];
        let res = dst
            .as_mut_slice()
            .execute_rows_with(ExecutionStrategy::Serial, 0, |_, _| {});
        assert_eq!(res, Err(ParallelError::InvalidRowStride(0)));
    }

    #[test]
    fn test_execute_empty_buffer() -> Result<(), ParallelError> {
        let mut dst: Vec<u8> = Vec::new();
        dst.as_mut_slice()
            .execute_rows_with(ExecutionStrategy::Serial, 0, |_, _| {
                unreachable!("no rows to visit")
            })?;
        Ok(())
    }
}

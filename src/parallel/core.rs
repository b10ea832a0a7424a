use anyhow::{Context, Result};
use crossbeam::channel::{Receiver, Sender, bounded};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// User-facing processing mode, as accepted on the command line and in config
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Always run on the calling thread
    Sequential,
    /// Always fan out over a worker pool
    Parallel,
    /// Choose from the workload size (smart default)
    #[default]
    Auto,
}

/// Generic parallel executor for flat batches of work items.
///
/// Workers pull `(index, item)` pairs from a bounded crossbeam channel; results
/// come back tagged with the same index and are returned in input order.
pub struct ParallelExecutor<T, R> {
    max_workers: usize,
    buffer_size: usize,
    _phantom: std::marker::PhantomData<(T, R)>,
}

/// Context for worker threads to avoid too many function parameters
struct WorkerContext<T, R, F> {
    worker_id: usize,
    work_rx: Receiver<(usize, T)>,
    result_tx: Sender<(usize, R)>,
    processor: Arc<F>,
}

impl<T, R> ParallelExecutor<T, R>
where
    T: Send + Sync,
    R: Send + Sync,
{
    pub fn new(max_workers: usize) -> Self {
        let max_workers = max_workers.max(1);
        Self {
            max_workers,
            buffer_size: max_workers * 2,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Execute work items in parallel using a producer-consumer pattern
    pub fn execute<F>(&self, work_items: Vec<T>, processor: F) -> Result<Vec<R>>
    where
        F: Fn(&T, usize) -> R + Send + Sync, // (item, worker_id)
    {
        if work_items.is_empty() {
            return Ok(Vec::new());
        }

        let total_items = work_items.len();
        let actual_workers = std::cmp::min(self.max_workers, total_items);
        let (work_tx, work_rx) = bounded::<(usize, T)>(self.buffer_size);
        let (result_tx, result_rx) = bounded::<(usize, R)>(self.buffer_size);
        let processor = Arc::new(processor);

        tracing::debug!(
            "Batch of {} items on {} crossbeam workers",
            total_items,
            actual_workers
        );

        let mut indexed = crossbeam::thread::scope(|s| {
            for worker_id in 0..actual_workers {
                let ctx = WorkerContext {
                    worker_id,
                    work_rx: work_rx.clone(),
                    result_tx: result_tx.clone(),
                    processor: processor.clone(),
                };
                s.spawn(move |_| Self::worker_thread(ctx));
            }

            // Producer thread: send work to workers
            let work_tx_clone = work_tx.clone();
            s.spawn(move |_| {
                for item in work_items.into_iter().enumerate() {
                    if work_tx_clone.send(item).is_err() {
                        break; // Workers dropped
                    }
                }
            });

            // Drop senders so receivers know when work is done
            drop(work_tx);
            drop(result_tx);

            Self::collect_results(result_rx, total_items)
        })
        .map_err(|_| anyhow::anyhow!("Thread panic occurred during parallel execution"))?;

        indexed.sort_by_key(|(index, _)| *index);
        Ok(indexed.into_iter().map(|(_, result)| result).collect())
    }

    fn worker_thread<F>(ctx: WorkerContext<T, R, F>)
    where
        F: Fn(&T, usize) -> R,
    {
        while let Ok((index, item)) = ctx.work_rx.recv() {
            let result = (ctx.processor)(&item, ctx.worker_id);
            if ctx.result_tx.send((index, result)).is_err() {
                break; // Receiver dropped
            }
        }
    }

    fn collect_results(result_rx: Receiver<(usize, R)>, total_items: usize) -> Vec<(usize, R)> {
        let mut results = Vec::with_capacity(total_items);
        while let Ok(result) = result_rx.recv() {
            results.push(result);
            if results.len() >= total_items {
                break;
            }
        }
        results
    }
}

/// Sequential execution strategy for comparison/fallback
pub struct SequentialExecutor;

impl SequentialExecutor {
    pub fn execute<T, R, F>(work_items: Vec<T>, processor: F) -> Vec<R>
    where
        F: Fn(&T, usize) -> R,
    {
        // Sequential uses worker_id 0
        work_items.iter().map(|item| processor(item, 0)).collect()
    }
}

/// Execution strategy enum for choosing between parallel and sequential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ExecutionStrategy {
    Sequential,
    Parallel { workers: usize },
}

impl ExecutionStrategy {
    /// Run a flat batch of work items, results in input order
    pub fn execute<T, R, F>(&self, work_items: Vec<T>, processor: F) -> Result<Vec<R>>
    where
        T: Send + Sync,
        R: Send + Sync,
        F: Fn(&T, usize) -> R + Send + Sync,
    {
        match self {
            ExecutionStrategy::Sequential => Ok(SequentialExecutor::execute(work_items, processor)),
            ExecutionStrategy::Parallel { workers } => {
                ParallelExecutor::new(*workers).execute(work_items, processor)
            }
        }
    }

    /// Threshold decision between sequential and parallel execution.
    ///
    /// The caller provides the pre-calculated worker count; this method only
    /// compares the workload against the threshold.
    ///
    /// ```rust
    /// use katas::parallel::ExecutionStrategy;
    ///
    /// let strategy = ExecutionStrategy::auto(8, 12, 4);
    /// assert!(matches!(strategy, ExecutionStrategy::Sequential));
    ///
    /// let strategy = ExecutionStrategy::auto(16, 12, 4);
    /// assert!(matches!(strategy, ExecutionStrategy::Parallel { workers: 4 }));
    /// ```
    pub fn auto(
        work_items_count: usize,
        min_items_for_parallel: usize,
        optimal_workers: usize,
    ) -> Self {
        if work_items_count >= min_items_for_parallel && optimal_workers > 1 {
            ExecutionStrategy::Parallel {
                workers: optimal_workers,
            }
        } else {
            ExecutionStrategy::Sequential
        }
    }

    /// Resolve a user-facing [`ExecutionMode`] into a concrete strategy
    pub fn from_mode(
        mode: ExecutionMode,
        work_items_count: usize,
        min_items_for_parallel: usize,
        optimal_workers: usize,
    ) -> Self {
        match mode {
            ExecutionMode::Sequential => ExecutionStrategy::Sequential,
            ExecutionMode::Parallel => ExecutionStrategy::Parallel {
                workers: optimal_workers.max(1),
            },
            ExecutionMode::Auto => {
                Self::auto(work_items_count, min_items_for_parallel, optimal_workers)
            }
        }
    }

    /// Number of threads this strategy will occupy
    pub fn workers(&self) -> usize {
        match self {
            ExecutionStrategy::Sequential => 1,
            ExecutionStrategy::Parallel { workers } => *workers,
        }
    }

    /// Build a dedicated rayon pool sized for this strategy.
    ///
    /// Each call gets its own pool so that independent searches never share
    /// worker threads or queues.
    pub fn thread_pool(&self) -> Result<rayon::ThreadPool> {
        let workers = self.workers();
        rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("katas-worker-{index}"))
            .build()
            .with_context(|| format!("Failed to build thread pool with {workers} workers"))
    }

    /// Calculate optimal workers based on available system resources and configuration limits
    ///
    /// # Algorithm
    /// ```text
    /// 1. Detect available CPU cores: num_cpus::get()
    /// 2. Apply percentage: cores * thread_percentage / 100
    /// 3. Apply config limit: min(max_threads_config, percentage_result) if max_threads_config > 0
    /// 4. Ensure minimum: max(1, final_result)
    /// ```
    ///
    /// ```rust
    /// use katas::parallel::ExecutionStrategy;
    ///
    /// let workers = ExecutionStrategy::calculate_optimal_workers(0, 75);
    /// assert!(workers >= 1);
    ///
    /// let workers = ExecutionStrategy::calculate_optimal_workers(8, 75);
    /// assert!(workers <= 8);
    /// ```
    pub fn calculate_optimal_workers(max_threads_config: usize, thread_percentage: u8) -> usize {
        let available_cores = num_cpus::get();

        let workers_by_percentage =
            std::cmp::max(1, (available_cores * thread_percentage as usize) / 100);

        // 0 means use percentage calculation only
        if max_threads_config > 0 {
            std::cmp::min(max_threads_config, workers_by_percentage)
        } else {
            workers_by_percentage
        }
    }
}

impl fmt::Display for ExecutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionStrategy::Sequential => write!(f, "sequential"),
            ExecutionStrategy::Parallel { workers } => write!(f, "parallel ({workers} workers)"),
        }
    }
}

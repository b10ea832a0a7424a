//! Generic parallel execution framework
//!
//! This module owns **system resource management** and **execution strategy**
//! for every CPU-bound workload in the crate. It knows nothing about candidate
//! lists, salaries or phrases: callers size their own workloads and hand the
//! final decision to [`ExecutionStrategy`].
//!
//! ## What This Module Does:
//! - **Resource Discovery**: Detects available CPU cores using `num_cpus::get()`
//! - **Resource Calculation**: Applies user configuration (thread percentage, max threads)
//! - **Execution Strategy**: Sequential vs Parallel selection from a workload threshold
//! - **Thread Pools**: Builds dedicated rayon pools for recursive fan-out
//! - **Batch Execution**: Crossbeam channel workers for flat lists of work items
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │   Client        │    │   Parallel       │    │   System        │
//! │   (combos,      │───▶│   Module         │───▶│   Resources     │
//! │    salary)      │    │                  │    │                 │
//! │ • Input size    │    │ • CPU cores      │    │ • Hardware      │
//! │ • Thresholds    │    │ • Thread pools   │    │ • OS limits     │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use katas::parallel::ExecutionStrategy;
//!
//! // Auto strategy selects parallel vs sequential based on workload
//! let strategy = ExecutionStrategy::auto(100, 50, 8);
//! assert!(matches!(strategy, ExecutionStrategy::Parallel { workers: 8 }));
//!
//! // Or force sequential processing
//! let sequential_strategy = ExecutionStrategy::Sequential;
//! assert_eq!(sequential_strategy.workers(), 1);
//! ```

pub mod core;

// Re-export main types for easier access
pub use self::core::{ExecutionMode, ExecutionStrategy, ParallelExecutor, SequentialExecutor};

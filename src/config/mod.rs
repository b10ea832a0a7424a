//! Configuration management for katas
//!
//! Defaults are embedded from `default-config.toml` and layered with figment
//! (see [`KatasConfig`]). The merged result is extracted into [`Settings`].

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::combos::{DEFAULT_MIN_ITEMS_FOR_PARALLEL, DEFAULT_THREAD_PERCENTAGE, DEFAULT_WARN_CANDIDATES_ABOVE};
use crate::parallel::{ExecutionMode, ExecutionStrategy};
use crate::pig_latin::DEFAULT_PHRASE;
use crate::salary::{RateBracket, default_brackets};

mod core;

pub use self::core::KatasConfig;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub combos: CombosSettings,
    pub parallel: ParallelSettings,
    pub salary: SalarySettings,
    pub pig_latin: PigLatinSettings,
}

/// Defaults for the target-sum search
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombosSettings {
    pub candidates: Vec<i64>,
    pub target: i64,
    pub warn_candidates_above: usize,
}

impl Default for CombosSettings {
    fn default() -> Self {
        Self {
            candidates: vec![10, 1, 2, 7, 1, 6, 2, 5],
            target: 8,
            warn_candidates_above: DEFAULT_WARN_CANDIDATES_ABOVE,
        }
    }
}

/// Worker sizing and strategy selection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelSettings {
    pub mode: ExecutionMode,
    /// 0 = no limit beyond `thread_percentage`
    pub max_threads: usize,
    /// Percentage of CPU cores to use (1-100)
    pub thread_percentage: u8,
    /// Work items (candidates, gross amounts) from which auto mode goes parallel
    pub min_items_for_parallel: usize,
}

impl Default for ParallelSettings {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::Auto,
            max_threads: 0,
            thread_percentage: DEFAULT_THREAD_PERCENTAGE,
            min_items_for_parallel: DEFAULT_MIN_ITEMS_FOR_PARALLEL,
        }
    }
}

impl ParallelSettings {
    /// Strategy for a workload of `work_items` under these settings
    pub fn strategy_for(&self, work_items: usize) -> ExecutionStrategy {
        let workers =
            ExecutionStrategy::calculate_optimal_workers(self.max_threads, self.thread_percentage);
        ExecutionStrategy::from_mode(
            self.mode,
            work_items,
            self.min_items_for_parallel,
            workers,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SalarySettings {
    pub gross: Vec<f64>,
    pub brackets: Vec<RateBracket>,
}

impl Default for SalarySettings {
    fn default() -> Self {
        Self {
            gross: vec![10_000.0, 15_000.0, 25_000.0, 50_000.0],
            brackets: default_brackets(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PigLatinSettings {
    pub phrase: String,
}

impl Default for PigLatinSettings {
    fn default() -> Self {
        Self {
            phrase: DEFAULT_PHRASE.to_string(),
        }
    }
}

impl Settings {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.parallel.thread_percentage) {
            anyhow::bail!(
                "parallel.thread_percentage must be between 1 and 100, got {}",
                self.parallel.thread_percentage
            );
        }

        if self.salary.brackets.is_empty() {
            anyhow::bail!("At least one salary bracket must be specified");
        }

        Ok(())
    }
}

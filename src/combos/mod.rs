//! Target-sum combinations
//!
//! Given an ordered list of candidate integers and a target, find every
//! distinct value sequence that can be read off the candidates at strictly
//! increasing positions and that sums exactly to the target.
//!
//! ```text
//! candidates: [10, 1, 2, 7, 1, 6, 2, 5]   target: 8
//! result:     [1, 1, 6] [1, 2, 5] [1, 7] [2, 1, 5] [2, 6] [6, 2] [7, 1]
//! ```
//!
//! The search is split into three parts:
//! - [`enumerator`]: walks every index path, fanning out over a rayon pool
//! - [`filter`]: keeps a path only when its values hit the target exactly
//! - [`collector`]: deduplicates accepted value sequences across threads
//!
//! The walk is exhaustive. Candidates may be negative, so no partial sum says
//! anything about its extensions and nothing is pruned; matching a path does
//! not stop its extensions from being explored either. Cost is `O(n * 2^n)`:
//! beyond roughly 25 candidates a search becomes impractical.

pub mod collector;
pub mod enumerator;
pub mod filter;
pub mod parse;

pub use collector::ResultCollector;
pub use enumerator::IndexPath;
pub use parse::{InputFormatError, parse_candidates, parse_target};

use crate::parallel::ExecutionStrategy;
use anyhow::Result;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Values read off the candidates along one index path
pub type Combination = Vec<i64>;

/// Distinct combinations of one search
pub type ResultSet = HashSet<Combination>;

/// Candidate count from which the automatic strategy fans out over a pool
pub const DEFAULT_MIN_ITEMS_FOR_PARALLEL: usize = 12;

/// Candidate count above which a search is logged as impractical
pub const DEFAULT_WARN_CANDIDATES_ABOVE: usize = 25;

/// Default share of CPU cores used by the automatic strategy
pub const DEFAULT_THREAD_PERCENTAGE: u8 = 75;

/// Counters gathered while searching
#[derive(Debug, Clone, Serialize)]
pub struct SearchStats {
    /// Index paths handed to the filter (always `2^n - 1`)
    pub paths_visited: u64,
    /// Paths whose values hit the target, duplicates included
    pub paths_accepted: u64,
    /// Distinct combinations after deduplication
    pub combinations: usize,
    pub strategy: ExecutionStrategy,
    #[serde(serialize_with = "serialize_millis", rename = "elapsed_ms")]
    pub elapsed: Duration,
}

fn serialize_millis<S: serde::Serializer>(elapsed: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64() * 1000.0)
}

/// Result set plus the statistics of the search that produced it
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub combinations: ResultSet,
    pub stats: SearchStats,
}

/// One search over a fixed candidate list and target
#[derive(Debug, Clone)]
pub struct TargetCandidates<'a> {
    candidates: &'a [i64],
    target: i64,
    strategy: ExecutionStrategy,
    warn_candidates_above: usize,
}

impl<'a> TargetCandidates<'a> {
    pub fn new(candidates: &'a [i64], target: i64) -> Self {
        Self {
            candidates,
            target,
            strategy: auto_strategy(candidates.len()),
            warn_candidates_above: DEFAULT_WARN_CANDIDATES_ABOVE,
        }
    }

    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_warn_candidates_above(mut self, limit: usize) -> Self {
        self.warn_candidates_above = limit;
        self
    }

    /// Run the search to completion.
    ///
    /// Fails only if a worker pool cannot be created for a parallel strategy.
    pub fn search(&self) -> Result<SearchOutcome> {
        let pool = match self.strategy {
            ExecutionStrategy::Sequential => None,
            ExecutionStrategy::Parallel { .. } => Some(self.strategy.thread_pool()?),
        };
        Ok(self.run(pool.as_ref()))
    }

    fn run(&self, pool: Option<&rayon::ThreadPool>) -> SearchOutcome {
        let len = self.candidates.len();
        let strategy = match pool {
            Some(pool) => ExecutionStrategy::Parallel {
                workers: pool.current_num_threads(),
            },
            None => ExecutionStrategy::Sequential,
        };

        if len > self.warn_candidates_above {
            tracing::warn!(
                "{} candidates means {} index paths to visit; this may take a long time",
                len,
                path_count(len)
            );
        }
        tracing::debug!(
            "Searching {} candidates for target {} ({})",
            len,
            self.target,
            strategy
        );

        let start = Instant::now();
        let collector = ResultCollector::new();
        let visited = AtomicU64::new(0);

        enumerator::enumerate(len, pool, &|path: &IndexPath| {
            visited.fetch_add(1, Ordering::Relaxed);
            if filter::accepts(self.candidates, path, self.target) {
                let combination = filter::combination_value(self.candidates, path);
                tracing::trace!("Path {} hits target with {:?}", path, combination);
                collector.insert(combination);
            }
        });

        let paths_accepted = collector.accepted();
        let combinations = collector.into_set();
        let stats = SearchStats {
            paths_visited: visited.into_inner(),
            paths_accepted,
            combinations: combinations.len(),
            strategy,
            elapsed: start.elapsed(),
        };

        tracing::info!(
            "Visited {} paths, {} accepted, {} distinct combinations in {:?}",
            stats.paths_visited,
            stats.paths_accepted,
            stats.combinations,
            stats.elapsed
        );

        SearchOutcome {
            combinations,
            stats,
        }
    }
}

/// Every distinct combination of `candidates` summing to `target`.
///
/// Never fails: when no worker pool can be built the search runs
/// sequentially instead.
///
/// ```rust
/// use katas::combos::generate;
///
/// let result = generate(&[5, 5, 5], 10);
/// assert_eq!(result.len(), 1);
/// assert!(result.contains(&vec![5, 5]));
/// ```
pub fn generate(candidates: &[i64], target: i64) -> ResultSet {
    generate_with(candidates, target, auto_strategy(candidates.len()))
}

/// [`generate`] with an explicit execution strategy
pub fn generate_with(candidates: &[i64], target: i64, strategy: ExecutionStrategy) -> ResultSet {
    let search = TargetCandidates::new(candidates, target).with_strategy(strategy);
    match search.search() {
        Ok(outcome) => outcome.combinations,
        Err(e) => {
            tracing::warn!("{:#}; falling back to sequential search", e);
            search.run(None).combinations
        }
    }
}

/// Combinations in lexicographic order, for stable display
pub fn sorted(combinations: &ResultSet) -> Vec<Combination> {
    let mut sorted: Vec<Combination> = combinations.iter().cloned().collect();
    sorted.sort();
    sorted
}

/// Number of non-empty index paths over `len` candidates, saturating
pub fn path_count(len: usize) -> u128 {
    u32::try_from(len)
        .ok()
        .and_then(|len| 1u128.checked_shl(len))
        .map_or(u128::MAX, |count| count - 1)
}

fn auto_strategy(len: usize) -> ExecutionStrategy {
    ExecutionStrategy::auto(
        len,
        DEFAULT_MIN_ITEMS_FOR_PARALLEL,
        ExecutionStrategy::calculate_optimal_workers(0, DEFAULT_THREAD_PERCENTAGE),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSIC: [i64; 8] = [10, 1, 2, 7, 1, 6, 2, 5];

    fn set(entries: &[&[i64]]) -> ResultSet {
        entries.iter().map(|entry| entry.to_vec()).collect()
    }

    fn is_ordered_subselection(candidates: &[i64], combination: &[i64]) -> bool {
        let mut rest = candidates.iter();
        combination
            .iter()
            .all(|value| rest.by_ref().any(|candidate| candidate == value))
    }

    #[test]
    fn test_classic_example() {
        let expected = set(&[
            &[1, 2, 5],
            &[2, 1, 5],
            &[2, 6],
            &[1, 1, 6],
            &[1, 7],
            &[7, 1],
            &[6, 2],
        ]);
        assert_eq!(generate(&CLASSIC, 8), expected);
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let sequential = generate_with(&CLASSIC, 8, ExecutionStrategy::Sequential);
        let parallel = generate_with(&CLASSIC, 8, ExecutionStrategy::Parallel { workers: 4 });
        assert_eq!(sequential, parallel);

        let candidates: Vec<i64> = (-6..=7).collect();
        for target in [-5, 0, 3, 11] {
            assert_eq!(
                generate_with(&candidates, target, ExecutionStrategy::Sequential),
                generate_with(&candidates, target, ExecutionStrategy::Parallel { workers: 3 }),
            );
        }
    }

    #[test]
    fn test_duplicate_paths_collapse() {
        assert_eq!(generate(&[5, 5], 10), set(&[&[5, 5]]));
        assert_eq!(generate(&[5, 5, 5], 10), set(&[&[5, 5]]));
    }

    #[test]
    fn test_empty_candidates() {
        for target in [-1, 0, 1] {
            assert!(generate(&[], target).is_empty());
        }
    }

    #[test]
    fn test_unreachable_target() {
        assert!(generate(&[1, 2], 100).is_empty());
    }

    #[test]
    fn test_negative_and_zero_candidates_are_not_pruned() {
        assert_eq!(
            generate(&[3, -3, 0], 0),
            set(&[&[3, -3], &[3, -3, 0], &[0]])
        );
        // Overshooting the target early must not stop the walk
        assert_eq!(generate(&[9, -4, 3], 5), set(&[&[9, -4]]));
        assert_eq!(generate(&[9, -4, 3], 8), set(&[&[9, -4, 3]]));
    }

    #[test]
    fn test_longer_matches_after_shorter_prefix_match() {
        // [4] matches, and so does its extension [4, 0]
        assert_eq!(generate(&[4, 0], 4), set(&[&[4], &[4, 0]]));
    }

    #[test]
    fn test_results_sum_to_target_and_respect_order() {
        let candidates = [4, -2, 7, 1, 1, -5, 3, 2, 0, 6];
        for target in -3..=9 {
            for strategy in [
                ExecutionStrategy::Sequential,
                ExecutionStrategy::Parallel { workers: 2 },
            ] {
                for combination in generate_with(&candidates, target, strategy) {
                    assert_eq!(combination.iter().sum::<i64>(), target);
                    assert!(is_ordered_subselection(&candidates, &combination));
                }
            }
        }
    }

    #[test]
    fn test_repeated_calls_are_stable() {
        let first = generate_with(&CLASSIC, 8, ExecutionStrategy::Parallel { workers: 4 });
        for _ in 0..10 {
            assert_eq!(
                generate_with(&CLASSIC, 8, ExecutionStrategy::Parallel { workers: 4 }),
                first
            );
        }
    }

    #[test]
    fn test_concurrent_independent_calls() {
        let results = crossbeam::thread::scope(|s| {
            let classic = s.spawn(|_| generate(&CLASSIC, 8));
            let fives = s.spawn(|_| generate(&[5, 5, 5], 10));
            (classic.join().unwrap(), fives.join().unwrap())
        })
        .unwrap();

        assert_eq!(results.0.len(), 7);
        assert_eq!(results.1, set(&[&[5, 5]]));
    }

    #[test]
    fn test_search_stats() {
        let outcome = TargetCandidates::new(&CLASSIC, 8)
            .with_strategy(ExecutionStrategy::Parallel { workers: 2 })
            .search()
            .unwrap();

        assert_eq!(outcome.stats.paths_visited, 255);
        assert_eq!(outcome.stats.combinations, 7);
        assert!(outcome.stats.paths_accepted >= 7);
        assert_eq!(
            outcome.stats.strategy,
            ExecutionStrategy::Parallel { workers: 2 }
        );
    }

    #[test]
    fn test_sorted_is_lexicographic() {
        let sorted = sorted(&generate(&CLASSIC, 8));
        assert_eq!(sorted.first(), Some(&vec![1, 1, 6]));
        assert_eq!(sorted.last(), Some(&vec![7, 1]));
    }

    #[test]
    fn test_path_count() {
        assert_eq!(path_count(0), 0);
        assert_eq!(path_count(8), 255);
        assert_eq!(path_count(200), u128::MAX);
    }
}

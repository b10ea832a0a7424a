//! Exact-sum filter over index paths

use super::IndexPath;

/// Candidate values at the positions of `path`, in path order
pub fn combination_value(candidates: &[i64], path: &IndexPath) -> Vec<i64> {
    path.indices().iter().map(|&index| candidates[index]).collect()
}

/// Sum of the values named by `path`, widened so no `i64` input can overflow
pub fn path_sum(candidates: &[i64], path: &IndexPath) -> i128 {
    path.indices()
        .iter()
        .map(|&index| i128::from(candidates[index]))
        .sum()
}

/// True iff the values at `path` add up to exactly `target`
pub fn accepts(candidates: &[i64], path: &IndexPath, target: i64) -> bool {
    path_sum(candidates, path) == i128::from(target)
}

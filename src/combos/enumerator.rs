//! Index path enumeration
//!
//! Every non-empty strictly increasing sequence of positions `0..len` is
//! delivered exactly once, and a path is always delivered before any of its
//! extensions. No branch is ever pruned: the whole lattice of `2^len - 1`
//! paths is walked regardless of what the callback does with each path.

use rayon::ThreadPool;
use std::fmt;

/// Strictly increasing sequence of candidate positions.
///
/// Paths are immutable; [`IndexPath::extend`] builds a new, longer path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct IndexPath {
    indices: Vec<usize>,
}

impl IndexPath {
    /// The implicit empty root. Never delivered to a callback.
    pub fn root() -> Self {
        Self::default()
    }

    /// New path with `index` appended. `index` must be past the current last position.
    pub fn extend(&self, index: usize) -> Self {
        debug_assert!(index >= self.next_index(), "index paths must be strictly increasing");
        let mut indices = Vec::with_capacity(self.indices.len() + 1);
        indices.extend_from_slice(&self.indices);
        indices.push(index);
        Self { indices }
    }

    /// First position a child of this path may use
    pub fn next_index(&self) -> usize {
        self.indices.last().map_or(0, |last| last + 1)
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.indices)
    }
}

/// Walk every index path over `len` positions.
///
/// With a pool, children of each node are spawned as independent rayon tasks
/// and the call returns once the whole tree has finished. Without one, the
/// walk runs on the calling thread from an explicit work stack.
pub fn enumerate<F>(len: usize, pool: Option<&ThreadPool>, on_path: &F)
where
    F: Fn(&IndexPath) + Sync,
{
    match pool {
        Some(pool) => enumerate_parallel(len, pool, on_path),
        None => enumerate_sequential(len, on_path),
    }
}

/// Depth-first walk driven by a LIFO stack.
///
/// Children are pushed in reverse so that positions come off the stack in
/// ascending order, which makes the sequential visit order lexicographic.
pub fn enumerate_sequential<F>(len: usize, on_path: &F)
where
    F: Fn(&IndexPath),
{
    let mut stack = Vec::new();
    push_children(&mut stack, &IndexPath::root(), len);

    while let Some(path) = stack.pop() {
        on_path(&path);
        push_children(&mut stack, &path, len);
    }
}

fn push_children(stack: &mut Vec<IndexPath>, path: &IndexPath, len: usize) {
    for index in (path.next_index()..len).rev() {
        stack.push(path.extend(index));
    }
}

/// Recursive fan-out on `pool`; the enclosing scope is the only join point.
pub fn enumerate_parallel<F>(len: usize, pool: &ThreadPool, on_path: &F)
where
    F: Fn(&IndexPath) + Sync,
{
    pool.scope(|scope| fan_out(scope, len, &IndexPath::root(), on_path));
}

fn fan_out<'scope, F>(scope: &rayon::Scope<'scope>, len: usize, path: &IndexPath, on_path: &'scope F)
where
    F: Fn(&IndexPath) + Sync,
{
    for index in path.next_index()..len {
        let child = path.extend(index);
        scope.spawn(move |scope| {
            on_path(&child);
            fan_out(scope, len, &child, on_path);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallel::ExecutionStrategy;
    use std::collections::HashSet;
    use std::sync::Mutex;

    fn collect_sequential(len: usize) -> Vec<Vec<usize>> {
        let seen = Mutex::new(Vec::new());
        enumerate_sequential(len, &|path: &IndexPath| {
            seen.lock().unwrap().push(path.indices().to_vec());
        });
        seen.into_inner().unwrap()
    }

    #[test]
    fn test_empty_input_delivers_nothing() {
        assert!(collect_sequential(0).is_empty());
    }

    #[test]
    fn test_sequential_order_is_lexicographic() {
        let paths = collect_sequential(3);
        assert_eq!(
            paths,
            vec![
                vec![0],
                vec![0, 1],
                vec![0, 1, 2],
                vec![0, 2],
                vec![1],
                vec![1, 2],
                vec![2],
            ]
        );
    }

    #[test]
    fn test_every_path_is_strictly_increasing_and_unique() {
        let paths = collect_sequential(10);
        assert_eq!(paths.len(), (1 << 10) - 1);

        let unique: HashSet<_> = paths.iter().cloned().collect();
        assert_eq!(unique.len(), paths.len());
        assert!(
            paths
                .iter()
                .all(|p| !p.is_empty() && p.windows(2).all(|w| w[0] < w[1]))
        );
    }

    #[test]
    fn test_parallel_covers_the_same_lattice() {
        let pool = ExecutionStrategy::Parallel { workers: 4 }.thread_pool().unwrap();
        let seen = Mutex::new(HashSet::new());
        enumerate_parallel(9, &pool, &|path: &IndexPath| {
            assert!(seen.lock().unwrap().insert(path.indices().to_vec()));
        });

        let expected: HashSet<_> = collect_sequential(9).into_iter().collect();
        assert_eq!(seen.into_inner().unwrap(), expected);
    }

    #[test]
    fn test_prefix_delivered_before_extension() {
        let pool = ExecutionStrategy::Parallel { workers: 4 }.thread_pool().unwrap();
        let seen = Mutex::new(HashSet::new());
        enumerate_parallel(8, &pool, &|path: &IndexPath| {
            let indices = path.indices();
            let mut seen = seen.lock().unwrap();
            if indices.len() > 1 {
                assert!(seen.contains(&indices[..indices.len() - 1].to_vec()));
            }
            seen.insert(indices.to_vec());
        });
    }

    #[test]
    fn test_extend_builds_new_path() {
        let root = IndexPath::root();
        let child = root.extend(2);
        let grandchild = child.extend(5);

        assert!(root.indices().is_empty());
        assert_eq!(child.indices(), &[2]);
        assert_eq!(grandchild.indices(), &[2, 5]);
        assert_eq!(grandchild.next_index(), 6);
        assert_eq!(grandchild.to_string(), "[2, 5]");
    }
}

//! The capability surface shared by all five engines.

use std::num::NonZeroUsize;

use crate::error::UfError;
use crate::ops::Operation;

/// A union-find engine over a fixed universe `[0, len)`.
///
/// All methods take `&self`: concurrent engines are shared across worker
/// threads for the duration of a batch, so mutation happens behind interior
/// mutability (atomics, mutexes, or — for the deliberately `!Sync` sequential
/// engine — a `RefCell`). The trait is object-safe; the benchmark harness
/// dispatches over `Box<dyn Engine>`.
pub trait Engine {
    /// Number of elements in the universe.
    fn len(&self) -> usize;

    /// `true` if the universe is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the representative of the set containing `a`, compressing the
    /// traversed path as a side effect.
    fn find(&self, a: usize) -> Result<usize, UfError>;

    /// Merges the sets containing `a` and `b`. Returns `true` iff a merge
    /// occurred; `false` means the two were already joined.
    fn union(&self, a: usize, b: usize) -> Result<bool, UfError>;

    /// Tests whether `a` and `b` are in the same set, linearized at the point
    /// the final root comparison was evaluated.
    fn same_set(&self, a: usize, b: usize) -> Result<bool, UfError>;

    /// Applies `ops` and writes one result per operation into `out` (resized
    /// to `ops.len()`), using up to `threads` workers. Runs to completion;
    /// per-operation bounds failures are recorded as sentinels and do not
    /// abort the batch.
    fn process(&self, ops: &[Operation], out: &mut Vec<i64>, threads: NonZeroUsize);

    /// Number of distinct sets in the current partition.
    ///
    /// Meaningful in a quiescent state (no concurrent writers); the
    /// correctness harness calls it after `process` returns.
    fn count_sets(&self) -> usize {
        (0..self.len())
            .filter(|&i| matches!(self.find(i), Ok(root) if root == i))
            .count()
    }
}

//! Coarse-grained locking: one mutex in front of the whole forest.
//!
//! Every public operation takes the same lock, so a parallel batch measures
//! scheduling and contention overhead rather than real parallelism — that is
//! the point of this engine in the comparison.

use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::engine::Engine;
use crate::error::{UfError, check_index};
use crate::executor::run_batch;
use crate::forest::Forest;
use crate::ops::Operation;

/// Union-find guarded by a single mutex.
pub struct CoarseUnionFind {
    forest: Mutex<Forest>,
    len: usize,
}

impl CoarseUnionFind {
    /// `n` singleton sets.
    pub fn new(n: usize) -> CoarseUnionFind {
        CoarseUnionFind {
            forest: Mutex::new(Forest::new(n)),
            len: n,
        }
    }

    /// The lock is held only inside a single public call and the forest is
    /// never left torn between field writes, so a poisoned lock (a panicking
    /// peer) is safe to clear.
    fn lock(&self) -> MutexGuard<'_, Forest> {
        self.forest.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Engine for CoarseUnionFind {
    fn len(&self) -> usize {
        self.len
    }

    fn find(&self, a: usize) -> Result<usize, UfError> {
        check_index(a, self.len)?;
        Ok(self.lock().find(a))
    }

    fn union(&self, a: usize, b: usize) -> Result<bool, UfError> {
        check_index(a, self.len)?;
        check_index(b, self.len)?;
        Ok(self.lock().union(a, b))
    }

    fn same_set(&self, a: usize, b: usize) -> Result<bool, UfError> {
        check_index(a, self.len)?;
        check_index(b, self.len)?;
        let mut forest = self.lock();
        let ra = forest.find(a);
        let rb = forest.find(b);
        Ok(ra == rb)
    }

    fn process(&self, ops: &[Operation], out: &mut Vec<i64>, threads: NonZeroUsize) {
        run_batch(self, ops, out, threads);
    }
}

//! Lock-free engine with an immediate-parent-check fast path.
//!
//! Identical protocol to [`crate::lockfree`], plus a short circuit at the
//! top of `union` and `same_set`: if both operands are non-roots with the
//! same immediate parent, they share an ancestor and are therefore already
//! in one set — no traversal needed. The check pays off on workloads where
//! hot elements have just been compressed to a common parent; when it
//! misses, the full protocol runs unchanged.

use std::num::NonZeroUsize;
use std::sync::atomic::Ordering;

use crate::engine::Engine;
use crate::error::{UfError, check_index};
use crate::executor::run_batch;
use crate::ops::Operation;
use crate::packed::{PackedForest, Slot, TiePolicy, try_same_set_once, try_union_once};

/// Union-find with CAS linking, CAS compression, and the immediate-parent
/// short circuit.
pub struct IpcUnionFind {
    forest: PackedForest,
}

/// Equal-rank links make the smaller root index the child — the one policy
/// that differs from the other lock-free engines, kept so the variants stay
/// comparable against their originals.
const TIE: TiePolicy = TiePolicy::SmallerIndexChild;

impl IpcUnionFind {
    /// `n` singleton sets.
    pub fn new(n: usize) -> IpcUnionFind {
        IpcUnionFind {
            forest: PackedForest::new(n),
        }
    }

    fn find_root(&self, a: usize) -> usize {
        let root = self.forest.walk_root(a, Ordering::Acquire);
        self.forest.compress_cas(a, root);
        root
    }

    /// `true` iff both elements are non-roots pointing at the same parent.
    /// Relaxed loads suffice: a hit proves a shared ancestor at some point,
    /// and sets never split.
    fn share_immediate_parent(&self, a: usize, b: usize) -> bool {
        let wa = self.forest.load(a, Ordering::Relaxed);
        let wb = self.forest.load(b, Ordering::Relaxed);
        matches!(
            (Slot::decode(wa), Slot::decode(wb)),
            (Slot::Parent(pa), Slot::Parent(pb)) if pa == pb
        )
    }
}

impl Engine for IpcUnionFind {
    fn len(&self) -> usize {
        self.forest.len()
    }

    fn find(&self, a: usize) -> Result<usize, UfError> {
        check_index(a, self.len())?;
        Ok(self.find_root(a))
    }

    fn union(&self, a: usize, b: usize) -> Result<bool, UfError> {
        check_index(a, self.len())?;
        check_index(b, self.len())?;
        loop {
            if self.share_immediate_parent(a, b) {
                return Ok(false);
            }
            if let Some(merged) = try_union_once(&self.forest, |u| self.find_root(u), TIE, a, b) {
                return Ok(merged);
            }
        }
    }

    fn same_set(&self, a: usize, b: usize) -> Result<bool, UfError> {
        check_index(a, self.len())?;
        check_index(b, self.len())?;
        if a == b {
            return Ok(true);
        }
        loop {
            if self.share_immediate_parent(a, b) {
                return Ok(true);
            }
            if let Some(same) = try_same_set_once(&self.forest, |u| self.find_root(u), a, b) {
                return Ok(same);
            }
        }
    }

    fn process(&self, ops: &[Operation], out: &mut Vec<i64>, threads: NonZeroUsize) {
        run_batch(self, ops, out, threads);
    }
}

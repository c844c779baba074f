//! The sequential baseline engine — the oracle every concurrent engine is
//! checked against.

use std::cell::RefCell;
use std::num::NonZeroUsize;

use crate::engine::Engine;
use crate::error::{UfError, check_index};
use crate::executor::apply;
use crate::forest::Forest;
use crate::ops::Operation;

/// Sequential union-find with full path compression and union by rank.
///
/// The forest sits behind a `RefCell` so the shared-`&self` [`Engine`]
/// surface still works; the type is deliberately `!Sync`, and
/// [`Engine::process`] walks the batch on the calling thread.
pub struct SerialUnionFind {
    forest: RefCell<Forest>,
}

impl SerialUnionFind {
    /// `n` singleton sets.
    pub fn new(n: usize) -> SerialUnionFind {
        SerialUnionFind {
            forest: RefCell::new(Forest::new(n)),
        }
    }
}

impl Engine for SerialUnionFind {
    fn len(&self) -> usize {
        self.forest.borrow().len()
    }

    fn find(&self, a: usize) -> Result<usize, UfError> {
        let mut forest = self.forest.borrow_mut();
        check_index(a, forest.len())?;
        Ok(forest.find(a))
    }

    fn union(&self, a: usize, b: usize) -> Result<bool, UfError> {
        let mut forest = self.forest.borrow_mut();
        check_index(a, forest.len())?;
        check_index(b, forest.len())?;
        Ok(forest.union(a, b))
    }

    fn same_set(&self, a: usize, b: usize) -> Result<bool, UfError> {
        let mut forest = self.forest.borrow_mut();
        check_index(a, forest.len())?;
        check_index(b, forest.len())?;
        let ra = forest.find(a);
        let rb = forest.find(b);
        Ok(ra == rb)
    }

    fn process(&self, ops: &[Operation], out: &mut Vec<i64>, _threads: NonZeroUsize) {
        out.clear();
        out.extend(ops.iter().map(|&op| apply(self, op)));
    }
}

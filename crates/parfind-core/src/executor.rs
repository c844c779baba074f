//! Parallel dispatch of an operation batch across worker threads.

use std::num::NonZeroUsize;
use std::thread;

use crate::engine::Engine;
use crate::error::UfError;
use crate::ops::{OpKind, Operation, RESULT_OUT_OF_BOUNDS};

/// Below this many operations the scoped-thread fan-out costs more than it
/// buys; the batch runs on the calling thread instead.
const PARALLEL_THRESHOLD: usize = 32;

/// Executes one operation and encodes its result.
pub(crate) fn apply(engine: &(impl Engine + ?Sized), op: Operation) -> i64 {
    let outcome = match op.kind {
        OpKind::Union => engine.union(op.a, op.b).map(i64::from),
        OpKind::Find => engine.find(op.a).map(|root| root as i64),
        OpKind::SameSet => engine.same_set(op.a, op.b).map(i64::from),
    };
    match outcome {
        Ok(value) => value,
        Err(UfError::OutOfBounds { .. }) => RESULT_OUT_OF_BOUNDS,
    }
}

/// Applies `ops` to a shared engine and writes one result per operation into
/// `out`, using up to `threads` workers.
///
/// The index space is split into contiguous chunks, one per worker: per-op
/// work is small and roughly uniform, so static chunking is enough and no
/// work stealing is needed. Each worker owns a disjoint `&mut` slice of the
/// result vector, so results need no synchronization beyond the scope join.
///
/// Every operation executes exactly once and every slot is written before
/// this returns. A bounds failure records [`RESULT_OUT_OF_BOUNDS`] in its
/// slot; the batch continues.
pub fn run_batch<E>(engine: &E, ops: &[Operation], out: &mut Vec<i64>, threads: NonZeroUsize)
where
    E: Engine + Sync + ?Sized,
{
    out.clear();
    out.resize(ops.len(), 0);

    let workers = threads.get().min(ops.len().max(1));
    if workers == 1 || ops.len() < PARALLEL_THRESHOLD {
        for (slot, op) in out.iter_mut().zip(ops) {
            *slot = apply(engine, *op);
        }
        return;
    }

    let chunk = ops.len().div_ceil(workers);
    thread::scope(|scope| {
        for (op_chunk, out_chunk) in ops.chunks(chunk).zip(out.chunks_mut(chunk)) {
            scope.spawn(move || {
                for (slot, op) in out_chunk.iter_mut().zip(op_chunk) {
                    *slot = apply(engine, *op);
                }
            });
        }
    });
}

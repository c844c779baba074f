//! Randomized stress replays: a shuffled edge stream is applied through the
//! parallel executor at several thread counts, and the resulting partition
//! is compared element-by-element against the sequential engine's.
#![allow(clippy::expect_used)]

use std::num::NonZeroUsize;

use parfind_core::{
    CoarseUnionFind, Engine, FineUnionFind, IpcUnionFind, LockFreeUnionFind, Operation,
    PlainWriteUnionFind, SerialUnionFind,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Maps each element to the first-seen member of its set, so signatures are
/// comparable across engines with different tie policies.
fn signature(engine: &dyn Engine) -> Vec<usize> {
    let mut canon = std::collections::HashMap::new();
    (0..engine.len())
        .map(|i| {
            let root = engine.find(i).expect("in bounds");
            *canon.entry(root).or_insert(i)
        })
        .collect()
}

fn concurrent_engines(n: usize) -> Vec<(&'static str, Box<dyn Engine>)> {
    vec![
        ("coarse", Box::new(CoarseUnionFind::new(n))),
        ("fine", Box::new(FineUnionFind::new(n))),
        ("lockfree", Box::new(LockFreeUnionFind::new(n))),
        ("lockfree_plain", Box::new(PlainWriteUnionFind::new(n))),
        ("lockfree_ipc", Box::new(IpcUnionFind::new(n))),
    ]
}

#[test]
fn shuffled_edges_reach_the_serial_partition_on_every_thread_count() {
    let n = 200;
    let mut rng = StdRng::seed_from_u64(0xDA7A);

    // A spanning chain over half the universe plus random extra edges, then
    // shuffled so chunked workers see unrelated regions of the forest.
    let mut edges: Vec<(usize, usize)> = (0..n / 2 - 1).map(|i| (i, i + 1)).collect();
    for _ in 0..3 * n {
        let a = rng.gen_range(0..n);
        let mut b = rng.gen_range(0..n);
        while a == b {
            b = rng.gen_range(0..n);
        }
        edges.push((a, b));
    }
    edges.shuffle(&mut rng);
    let ops: Vec<Operation> = edges.iter().map(|&(a, b)| Operation::union(a, b)).collect();

    let oracle = SerialUnionFind::new(n);
    let mut results = Vec::new();
    oracle.process(&ops, &mut results, NonZeroUsize::MIN);
    let expected = signature(&oracle);

    for threads in [1usize, 2, 4, 8] {
        let threads = NonZeroUsize::new(threads).expect("nonzero");
        for (name, engine) in concurrent_engines(n) {
            engine.process(&ops, &mut results, threads);
            assert_eq!(
                signature(engine.as_ref()),
                expected,
                "{name} @ {threads} threads diverged from the serial partition"
            );
            let merges: i64 = results.iter().sum();
            let expected_merges = (n - engine.count_sets()) as i64;
            assert_eq!(
                merges, expected_merges,
                "{name} @ {threads} threads: union returns must sum to N - K"
            );
        }
    }
}

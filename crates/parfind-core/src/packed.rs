//! Packed parent/rank word shared by the lock-free engines.
//!
//! One `i64` per element. A non-negative word is a parent index; a negative
//! word marks a root and encodes its rank as `-(word + 1)`, so a single CAS
//! can link a root under a parent (flipping the sign) or bump its rank.
//!
//! Acquire loads pair with the Release CAS/stores that publish structural
//! changes: a thread that sees a node pointing at a new root also sees the
//! root's own word. Relaxed is used only where the value merely bounds a
//! retry loop that re-reads with Acquire, or where a compression write is
//! benign because it installs an ancestor.

use std::sync::atomic::{AtomicI64, Ordering};

/// Decoded view of one packed word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    /// The element is a child of this index.
    Parent(usize),
    /// The element is a root with this rank.
    Root(u32),
}

impl Slot {
    pub(crate) fn decode(word: i64) -> Slot {
        if word < 0 {
            Slot::Root((-(word + 1)) as u32)
        } else {
            Slot::Parent(word as usize)
        }
    }

    pub(crate) fn encode(self) -> i64 {
        match self {
            Slot::Parent(parent) => parent as i64,
            Slot::Root(rank) => -(i64::from(rank) + 1),
        }
    }
}

/// The atomic word array all three lock-free engines operate on.
pub(crate) struct PackedForest {
    words: Vec<AtomicI64>,
}

impl PackedForest {
    /// `n` singleton roots of rank 0.
    pub(crate) fn new(n: usize) -> PackedForest {
        PackedForest {
            words: (0..n).map(|_| AtomicI64::new(Slot::Root(0).encode())).collect(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.words.len()
    }

    pub(crate) fn load(&self, i: usize, order: Ordering) -> i64 {
        self.words[i].load(order)
    }

    /// Walks parent links from `u` to a root without writing.
    pub(crate) fn walk_root(&self, mut u: usize, order: Ordering) -> usize {
        loop {
            match Slot::decode(self.words[u].load(order)) {
                Slot::Root(_) => return u,
                Slot::Parent(p) => u = p,
            }
        }
    }

    /// CAS path compression: re-points each node on the path from `a` at
    /// `root`. A failed CAS means another thread already installed an
    /// equal-or-better parent there; the failure is ignored and the walk
    /// moves on.
    pub(crate) fn compress_cas(&self, a: usize, root: usize) {
        let mut cur = a;
        while cur != root {
            let word = self.words[cur].load(Ordering::Acquire);
            let parent = match Slot::decode(word) {
                Slot::Root(_) => break,
                Slot::Parent(p) => p,
            };
            if parent != root {
                let _ = self.words[cur].compare_exchange_weak(
                    word,
                    Slot::Parent(root).encode(),
                    Ordering::Release,
                    Ordering::Relaxed,
                );
            }
            cur = parent;
        }
    }

    /// Plain-store path compression. The store races with concurrent links
    /// and compressions, but every value written is an ancestor of the node,
    /// so any interleaving still leads to the same root.
    pub(crate) fn compress_store(&self, a: usize, root: usize) {
        let mut cur = a;
        while cur != root {
            let parent = match Slot::decode(self.words[cur].load(Ordering::Relaxed)) {
                Slot::Root(_) => break,
                Slot::Parent(p) => p,
            };
            if parent != root {
                self.words[cur].store(Slot::Parent(root).encode(), Ordering::Relaxed);
            }
            cur = parent;
        }
    }

    /// Attempts to link root `child` (whose word was observed as `observed`)
    /// under `parent`. A strong CAS: a failure always means real
    /// interference, so callers retry from fresh finds rather than spin on
    /// spurious misses.
    fn try_link(&self, child: usize, observed: i64, parent: usize) -> bool {
        self.words[child]
            .compare_exchange(
                observed,
                Slot::Parent(parent).encode(),
                Ordering::Release,
                Ordering::Relaxed,
            )
            .is_ok()
    }

    /// Best-effort rank bump after an equal-rank link. Failure means another
    /// union already touched the new root; the link above stays the
    /// linearization point either way, and a missed bump only costs balance.
    fn try_bump_rank(&self, root: usize, observed: i64, rank: u32) {
        let _ = self.words[root].compare_exchange_weak(
            observed,
            Slot::Root(rank + 1).encode(),
            Ordering::Release,
            Ordering::Relaxed,
        );
    }
}

/// Equal-rank link direction, fixed per engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TiePolicy {
    /// The smaller root index becomes the parent.
    SmallerIndexParent,
    /// The smaller root index becomes the child.
    SmallerIndexChild,
}

/// One attempt of the lock-free union protocol. `None` means interference
/// was detected (a candidate root got merged away, or the link CAS lost a
/// race) and the caller should retry from fresh finds.
pub(crate) fn try_union_once<F>(
    forest: &PackedForest,
    find: F,
    tie: TiePolicy,
    a: usize,
    b: usize,
) -> Option<bool>
where
    F: Fn(usize) -> usize,
{
    let ra = find(a);
    let rb = find(b);

    // Re-load the candidates to get their latest packed state.
    let wa = forest.load(ra, Ordering::Acquire);
    let wb = forest.load(rb, Ordering::Acquire);
    let (rank_a, rank_b) = match (Slot::decode(wa), Slot::decode(wb)) {
        (Slot::Root(rank_a), Slot::Root(rank_b)) => (rank_a, rank_b),
        _ => return None,
    };
    if ra == rb {
        return Some(false);
    }

    let (child, child_word, parent, parent_word) = match rank_a.cmp(&rank_b) {
        std::cmp::Ordering::Less => (ra, wa, rb, wb),
        std::cmp::Ordering::Greater => (rb, wb, ra, wa),
        std::cmp::Ordering::Equal => {
            let smaller_first = ra < rb;
            match (tie, smaller_first) {
                (TiePolicy::SmallerIndexParent, true) | (TiePolicy::SmallerIndexChild, false) => {
                    (rb, wb, ra, wa)
                }
                (TiePolicy::SmallerIndexParent, false) | (TiePolicy::SmallerIndexChild, true) => {
                    (ra, wa, rb, wb)
                }
            }
        }
    };

    if !forest.try_link(child, child_word, parent) {
        return None;
    }
    if rank_a == rank_b {
        forest.try_bump_rank(parent, parent_word, rank_a);
    }
    Some(true)
}

/// One attempt of the lock-free same-set protocol. `None` means the first
/// candidate root was merged away while we looked, so the `false` answer
/// would have been stale.
pub(crate) fn try_same_set_once<F>(
    forest: &PackedForest,
    find: F,
    a: usize,
    b: usize,
) -> Option<bool>
where
    F: Fn(usize) -> usize,
{
    let ra = find(a);
    let rb = find(b);
    if ra == rb {
        return Some(true);
    }
    match Slot::decode(forest.load(ra, Ordering::Acquire)) {
        Slot::Root(_) => Some(false),
        Slot::Parent(_) => None,
    }
}

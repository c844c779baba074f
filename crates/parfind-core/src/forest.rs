//! The separated parent/rank forest used by the locked engines.

/// Parent and rank arrays over `[0, n)`. `parent[i] == i` marks a root;
/// `rank[i]` is meaningful only for roots.
pub(crate) struct Forest {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl Forest {
    /// `n` singleton sets.
    pub(crate) fn new(n: usize) -> Forest {
        Forest {
            parent: (0..n).collect(),
            rank: vec![0u8; n],
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.parent.len()
    }

    /// Walks to the root of `a`, then re-points every visited node at it
    /// (full path compression, two passes, no recursion).
    pub(crate) fn find(&mut self, a: usize) -> usize {
        let mut root = a;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = a;
        while cur != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Union by rank. Returns `true` iff a merge occurred. On a rank tie the
    /// first operand's root is retained and its rank incremented.
    pub(crate) fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => {
                self.parent[ra] = rb;
            }
            std::cmp::Ordering::Greater => {
                self.parent[rb] = ra;
            }
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }

    #[cfg(test)]
    pub(crate) fn rank_of(&self, root: usize) -> u8 {
        self.rank[root]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singletons_are_their_own_roots() {
        let mut f = Forest::new(4);
        for i in 0..4 {
            assert_eq!(f.find(i), i);
        }
    }

    #[test]
    fn full_compression_flattens_the_chain() {
        // Build 0 -> 1 -> 2 by hand-ordered unions, then check one find
        // re-points the whole path.
        let mut f = Forest::new(3);
        assert!(f.union(1, 0));
        assert!(f.union(2, 1));
        let root = f.find(0);
        assert_eq!(f.parent[0], root);
        assert_eq!(f.parent[1], root);
        assert_eq!(f.parent[2], root);
    }

    #[test]
    fn tie_retains_first_root_and_bumps_rank() {
        let mut f = Forest::new(2);
        assert!(f.union(0, 1));
        assert_eq!(f.find(1), 0, "first operand's root should be retained");
        assert_eq!(f.rank_of(0), 1);
    }

    #[test]
    fn rank_stays_logarithmic() {
        // Pairwise merges of equal-rank trees: rank grows by one per level.
        const N: usize = 256;
        let mut f = Forest::new(N);
        let mut stride = 1;
        while stride < N {
            for i in (0..N).step_by(stride * 2) {
                f.union(i, i + stride);
            }
            stride *= 2;
        }
        let root = f.find(0);
        assert!(u32::from(f.rank_of(root)) <= N.ilog2());
    }
}

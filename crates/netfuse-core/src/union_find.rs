//! Union-find (disjoint set) over dense node indices.
//!
//! Component discovery unions the endpoints of every fused-graph edge and
//! then reads back one representative per node. Find uses iterative
//! path-halving (each visited element is re-pointed at its grandparent),
//! union uses rank with a lower-index tie-break.

/// A union-find structure over elements `0..n`.
///
/// # Determinism
///
/// When two sets of equal rank merge, the lower index becomes the root, so
/// `union(a, b)` and `union(b, a)` pick the same representative and a fixed
/// union sequence always reproduces the same forest. Component discovery
/// additionally never depends on which member represents a set, only on
/// membership.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    /// Creates `n` singleton sets, each element its own representative.
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0u8; n],
        }
    }

    /// Returns the representative of the set containing `x`.
    ///
    /// Path-halving keeps the amortized cost at the inverse-Ackermann
    /// bound without recursion. Passing `x >= n` is a caller logic error
    /// and indexes out of bounds.
    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            let grandparent = self.parent[self.parent[x]];
            self.parent[x] = grandparent;
            x = grandparent;
        }
        x
    }

    /// Merges the sets containing `a` and `b`; a no-op if they already
    /// share a set.
    ///
    /// Union by rank, with the lower index winning rank ties.
    pub fn union(&mut self, a: usize, b: usize) {
        let root_a = self.find(a);
        let root_b = self.find(b);

        if root_a == root_b {
            return;
        }

        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => {
                self.parent[root_a] = root_b;
            }
            std::cmp::Ordering::Greater => {
                self.parent[root_b] = root_a;
            }
            std::cmp::Ordering::Equal => {
                if root_a < root_b {
                    self.parent[root_b] = root_a;
                    self.rank[root_a] += 1;
                } else {
                    self.parent[root_a] = root_b;
                    self.rank[root_b] += 1;
                }
            }
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Returns `true` if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_elements_represent_themselves() {
        let mut uf = UnionFind::new(4);
        for i in 0..4 {
            assert_eq!(uf.find(i), i);
        }
    }

    #[test]
    fn union_links_exactly_the_given_pair() {
        let mut uf = UnionFind::new(4);
        uf.union(1, 2);
        assert_eq!(uf.find(1), uf.find(2));
        assert_ne!(uf.find(0), uf.find(1));
        assert_ne!(uf.find(3), uf.find(1));
    }

    #[test]
    fn self_union_is_a_noop() {
        let mut uf = UnionFind::new(2);
        uf.union(0, 0);
        assert_eq!(uf.find(0), 0);
        assert_ne!(uf.find(0), uf.find(1));
    }

    #[test]
    fn chains_merge_transitively() {
        let mut uf = UnionFind::new(5);
        uf.union(0, 1);
        uf.union(1, 2);
        uf.union(3, 4);
        assert_eq!(uf.find(0), uf.find(2));
        assert_eq!(uf.find(3), uf.find(4));
        assert_ne!(uf.find(0), uf.find(3));
    }

    #[test]
    fn lower_index_wins_rank_ties() {
        let mut uf = UnionFind::new(6);
        uf.union(4, 2);
        assert_eq!(uf.find(4), 2);
        uf.union(5, 3);
        assert_eq!(uf.find(5), 3);
    }

    #[test]
    fn union_is_commutative_in_its_arguments() {
        let mut plain = UnionFind::new(3);
        plain.union(0, 1);
        plain.union(1, 2);

        let mut swapped = UnionFind::new(3);
        swapped.union(1, 0);
        swapped.union(2, 1);

        for i in 0..3 {
            assert_eq!(
                plain.find(i),
                swapped.find(i),
                "representative of {i} should not depend on argument order"
            );
        }
    }

    #[test]
    fn repeated_union_is_idempotent() {
        let mut uf = UnionFind::new(3);
        uf.union(0, 2);
        let before = uf.find(2);
        uf.union(0, 2);
        uf.union(2, 0);
        assert_eq!(uf.find(2), before);
    }

    #[test]
    fn star_merge_reaches_a_single_root() {
        const N: usize = 48;
        let mut uf = UnionFind::new(N);
        for i in 1..N {
            uf.union(0, i);
        }
        let root = uf.find(0);
        for i in 0..N {
            assert_eq!(uf.find(i), root);
        }
    }

    #[test]
    fn len_and_is_empty() {
        assert!(UnionFind::new(0).is_empty());
        let uf = UnionFind::new(2);
        assert!(!uf.is_empty());
        assert_eq!(uf.len(), 2);
    }
}

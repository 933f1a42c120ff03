/*!
# Bipartite Graphs

Testing whether a graph is bipartite and computing a bipartition if one exists. A bipartition
is stored as a [`NodeBitSet`]: nodes in the set are on the **right** side, all other nodes on the
**left** side. A bipartite component is properly colored by mapping the sides to the colors
`0` and `1`.
*/

use super::*;

/// A trait for testing and computing bipartitions in graphs.
pub trait BipartiteTest: AdjacencyList + Sized {
    /// Tests whether the given candidate partition is a valid bipartition.
    ///
    /// # Examples
    /// ```
    /// use brooks_coloring::{prelude::*, algo::*};
    ///
    /// let mut g = AdjArrayUndir::new(10);
    /// g.connect_path(0..10 as Node);
    ///
    /// assert!(g.is_bipartition(&NodeBitSet::new_with_bits_set(10, vec![0 as Node, 2, 4, 6, 8])));
    /// ```
    fn is_bipartition(&self, bipartition: &NodeBitSet) -> bool {
        self.edges(true)
            .all(|Edge(u, v)| bipartition.get_bit(u) != bipartition.get_bit(v))
    }

    /// Computes a candidate bipartition by BFS: in every connected component the BFS root is
    /// on the left side and each node is on the opposite side of its BFS parent.
    ///
    /// If a component is bipartite, the candidate is valid on that component; otherwise some
    /// edge inside the component has both endpoints on the same side.
    fn propose_bipartition(&self) -> NodeBitSet {
        let mut bipartition = self.vertex_bitset_unset();
        if self.is_empty() {
            return bipartition;
        }

        let mut bfs = self.bfs_with_predecessor(0);

        loop {
            for (node, pred) in bfs
                .by_ref()
                .filter_map(|x| Some((x.item(), x.predecessor()?)))
            {
                if !bipartition.get_bit(pred) {
                    bipartition.set_bit(node);
                }
            }

            if !bfs.try_restart_at_unvisited() {
                break;
            }
        }

        bipartition
    }

    /// Computes a valid bipartition of the graph, if one exists.
    /// Returns `None` if the graph is not bipartite.
    ///
    /// # Examples
    /// ```
    /// use brooks_coloring::{prelude::*, algo::*};
    ///
    /// let mut g = AdjArrayUndir::new(10);
    /// g.connect_path(0..10 as Node);
    ///
    /// let bip = g.compute_bipartition().unwrap();
    /// assert_eq!(bip.cardinality(), 5);
    /// ```
    fn compute_bipartition(&self) -> Option<NodeBitSet> {
        let bipartition = self.propose_bipartition();
        self.is_bipartition(&bipartition).then_some(bipartition)
    }

    /// Tests whether the graph is bipartite.
    fn is_bipartite(&self) -> bool {
        self.compute_bipartition().is_some()
    }
}

impl<G> BipartiteTest for G where G: AdjacencyList + Sized {}

use super::*;

/// An undirected graph representation
#[derive(Clone, Debug)]
pub struct UndirectedGraph<Nbs: Neighborhood> {
    nbs: Vec<Nbs>,
    num_edges: NumEdges,
}

/// Representation using an Adjacency-Array
pub type AdjArrayUndir = UndirectedGraph<ArrNeighborhood>;

/// Representation using a sparse Adjacency-Array
pub type SparseAdjArrayUndir = UndirectedGraph<SparseNeighborhood>;

impl<Nbs: Neighborhood> UndirectedGraph<Nbs> {
    /// Builds a graph directly from the adjacency contract `node -> ordered neighbor sequence`.
    ///
    /// The lists are taken as they are: they must be symmetric and free of self-loops and
    /// duplicate entries (checked in debug-builds only).
    ///
    /// # Examples
    /// ```
    /// use brooks_coloring::prelude::*;
    ///
    /// let g = AdjArrayUndir::from_adjacency_lists(vec![vec![1, 2], vec![0, 2], vec![0, 1]]);
    /// assert_eq!(g.number_of_edges(), 3);
    /// assert_eq!(g.neighbors_of(1).collect::<Vec<_>>(), vec![0, 2]);
    /// ```
    pub fn from_adjacency_lists<L>(lists: impl IntoIterator<Item = L>) -> Self
    where
        L: IntoIterator<Item = Node>,
    {
        let nbs: Vec<Nbs> = lists
            .into_iter()
            .map(|list| {
                let mut nb = Nbs::default();
                for v in list {
                    nb.add_neighbor(v);
                }
                nb
            })
            .collect();

        let total_degree: usize = nbs.iter().map(|nb| nb.as_slice().len()).sum();
        debug_assert!(total_degree % 2 == 0, "adjacency lists are not symmetric");

        let graph = Self {
            nbs,
            num_edges: (total_degree / 2) as NumEdges,
        };

        debug_assert!(graph.is_simple_and_symmetric());
        graph
    }

    /// Returns *true* if every neighborhood is free of self-loops and duplicates
    /// and every edge is stored at both endpoints.
    pub fn is_simple_and_symmetric(&self) -> bool {
        let n = self.number_of_nodes();
        self.vertices().all(|u| {
            let nbs = self.nbs[u as usize].as_slice();
            nbs.iter().all(|&v| v < n && v != u && self.nbs[v as usize].has_neighbor(u))
                && nbs.iter().all_unique()
        })
    }
}

impl<Nbs: Neighborhood> GraphNodeOrder for UndirectedGraph<Nbs> {
    fn number_of_nodes(&self) -> NumNodes {
        self.nbs.len() as NumNodes
    }
}

impl<Nbs: Neighborhood> GraphEdgeOrder for UndirectedGraph<Nbs> {
    fn number_of_edges(&self) -> NumEdges {
        self.num_edges
    }
}

impl<Nbs: Neighborhood> AdjacencyList for UndirectedGraph<Nbs> {
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = Node> + '_ {
        self.nbs[u as usize].as_slice().iter().copied()
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.nbs[u as usize].num_of_neighbors()
    }
}

impl<Nbs: Neighborhood> NeighborsSlice for UndirectedGraph<Nbs> {
    fn as_neighbors_slice(&self, u: Node) -> &[Node] {
        self.nbs[u as usize].as_slice()
    }
}

impl<Nbs: Neighborhood> AdjacencyTest for UndirectedGraph<Nbs> {
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.nbs[u as usize].has_neighbor(v)
    }
}

impl<Nbs: Neighborhood> GraphNew for UndirectedGraph<Nbs> {
    fn new(n: NumNodes) -> Self {
        Self {
            nbs: vec![Nbs::default(); n as usize],
            num_edges: 0,
        }
    }
}

impl<Nbs: Neighborhood> GraphEdgeEditing for UndirectedGraph<Nbs> {
    fn try_add_edge(&mut self, u: Node, v: Node) -> bool {
        assert_ne!(u, v, "self-loops are not supported");
        if !self.nbs[u as usize].try_add_neighbor(v) {
            assert!(!self.nbs[v as usize].try_add_neighbor(u));
            self.num_edges += 1;
            false
        } else {
            true
        }
    }

    fn try_remove_edge(&mut self, u: Node, v: Node) -> bool {
        if self.nbs[u as usize].try_remove_neighbor(v) {
            assert!(self.nbs[v as usize].try_remove_neighbor(u));
            self.num_edges -= 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    fn check_against_matrix<Nbs: Neighborhood>() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for n in [10 as NumNodes, 20, 50] {
            for m_ub in [n * 2, n * 5] {
                let mut graph = UndirectedGraph::<Nbs>::new(n);
                let mut adj_matrix: Vec<NodeBitSet> = vec![NodeBitSet::new(n); n as usize];

                for _ in 0..m_ub {
                    let u = rng.random_range(0..n);
                    let v = rng.random_range(0..n);
                    if u == v {
                        continue;
                    }
                    let existed = graph.try_add_edge(u, v);
                    assert_eq!(existed, adj_matrix[u as usize].set_bit(v));
                    adj_matrix[v as usize].set_bit(u);
                }

                let m: NumNodes = adj_matrix.iter().map(|row| row.cardinality()).sum();
                assert_eq!(graph.number_of_edges() * 2, m);
                assert!(graph.is_simple_and_symmetric());

                for u in 0..n {
                    assert_eq!(graph.neighbors_of_as_bitset(u), adj_matrix[u as usize]);
                    assert_eq!(graph.degree_of(u), adj_matrix[u as usize].cardinality());
                }

                for Edge(u, v) in graph.edges(true).collect_vec() {
                    assert!(graph.try_remove_edge(u, v));
                    assert!(!graph.has_edge(v, u));
                }
                assert!(graph.is_singleton_graph());
            }
        }
    }

    #[test]
    fn adj_array_matches_matrix() {
        check_against_matrix::<ArrNeighborhood>();
    }

    #[test]
    fn sparse_adj_array_matches_matrix() {
        check_against_matrix::<SparseNeighborhood>();
    }

    #[test]
    fn adjacency_lists_keep_order() {
        let lists = vec![vec![3, 1], vec![0, 2], vec![1, 3], vec![2, 0]];
        let graph = AdjArrayUndir::from_adjacency_lists(lists.clone());

        assert_eq!(graph.number_of_nodes(), 4);
        assert_eq!(graph.number_of_edges(), 4);
        for (u, list) in lists.iter().enumerate() {
            assert_eq!(graph.as_neighbors_slice(u as Node), list.as_slice());
        }
        assert_eq!(graph.ith_neighbor(0, 0), 3);
    }

    #[test]
    fn removal_keeps_order() {
        let mut graph = AdjArrayUndir::from_edges(5, [(0, 1), (0, 2), (0, 3), (0, 4)]);
        graph.remove_edge(0, 2);
        assert_eq!(graph.neighbors_of(0).collect_vec(), vec![1, 3, 4]);
        assert_eq!(graph.degree_distribution(), vec![(0, 1), (1, 3), (3, 1)]);
    }
}

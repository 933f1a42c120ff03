use std::iter::FusedIterator;

use super::*;

/// Decomposition of undirected graphs into biconnected components (blocks)
pub trait Biconnectivity: IndexedAdjacencyList + Sized {
    /// Returns an iterator over all blocks of the graph, including bridges (blocks with two nodes).
    /// Isolated nodes are not part of any block.
    fn biconnected_components(&self) -> BiconnectedComponents<'_, Self> {
        BiconnectedComponents::new(self)
    }

    /// Returns a bitset of all articulation points, i.e. nodes whose removal increases the
    /// number of connected components. A node is an articulation point iff it belongs to at
    /// least two blocks.
    ///
    /// # Examples
    /// ```
    /// use brooks_coloring::{prelude::*, algo::*};
    ///
    /// // two triangles sharing node 2
    /// let g = AdjArrayUndir::from_edges(5, [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2)]);
    /// assert_eq!(g.articulation_points().iter_set_bits().collect::<Vec<_>>(), vec![2]);
    /// ```
    fn articulation_points(&self) -> NodeBitSet {
        let mut seen = self.vertex_bitset_unset();
        let mut articulation_points = self.vertex_bitset_unset();

        for block in self.biconnected_components() {
            for u in block {
                if seen.set_bit(u) {
                    articulation_points.set_bit(u);
                }
            }
        }

        articulation_points
    }

    /// Returns the first block with at least three nodes (in sorted order) or, if the graph has
    /// no such block, all nodes of the graph.
    ///
    /// # Examples
    /// ```
    /// use brooks_coloring::{prelude::*, algo::*};
    ///
    /// // path 0 - 1 attached to the square 1 - 2 - 3 - 4
    /// let g = AdjArrayUndir::from_edges(5, [(0, 1), (1, 2), (2, 3), (3, 4), (4, 1)]);
    /// assert_eq!(g.find_nontrivial_block(), vec![1, 2, 3, 4]);
    ///
    /// let path = AdjArrayUndir::from_edges(3, [(0, 1), (1, 2)]);
    /// assert_eq!(path.find_nontrivial_block(), vec![0, 1, 2]);
    /// ```
    fn find_nontrivial_block(&self) -> Vec<Node> {
        self.biconnected_components()
            .find(|block| block.len() >= 3)
            .unwrap_or_else(|| self.vertices().collect())
    }
}

impl<G> Biconnectivity for G where G: IndexedAdjacencyList + Sized {}

/// Implementation of Tarjan's Algorithm for biconnected components.
/// It is designed as an iterator that emits the nodes of one block at a time (sorted ascendingly).
/// Blocks are emitted in the order in which the DFS completes them, i.e. leaf blocks of the
/// block-cut tree come first.
pub struct BiconnectedComponents<'a, G>
where
    G: IndexedAdjacencyList,
{
    graph: &'a G,
    time: Node,

    states: Vec<NodeState>,
    potentially_unvisited: usize,

    edge_stack: Vec<Edge>,
    in_block: NodeBitSet,

    call_stack: Vec<StackFrame>,
}

impl<'a, G> BiconnectedComponents<'a, G>
where
    G: IndexedAdjacencyList,
{
    /// Construct the iterator for some graph
    pub fn new(graph: &'a G) -> Self {
        Self {
            graph,
            time: 0,
            states: vec![Default::default(); graph.len()],
            potentially_unvisited: 0,

            edge_stack: Vec::with_capacity(32),
            in_block: graph.vertex_bitset_unset(),

            call_stack: Vec::with_capacity(32),
        }
    }

    /// Same as in the strongly connected components search: the DFS has to cover every node,
    /// so once the current tree is finished we start over at the next untouched node.
    fn next_unvisited_node(&mut self) -> Option<Node> {
        while self.potentially_unvisited < self.graph.len() {
            if !self.states[self.potentially_unvisited].visited {
                let v = self.potentially_unvisited as Node;
                self.push_node(v, INVALID_NODE);
                return Some(v);
            }

            self.potentially_unvisited += 1;
        }
        None
    }

    fn push_node(&mut self, node: Node, parent: Node) {
        self.states[node as usize].visit(self.time);
        self.time += 1;

        self.call_stack.push(StackFrame {
            node,
            parent,
            next_neighbor: 0,
        });
    }

    fn search(&mut self) -> Option<Vec<Node>> {
        /*
        The recursive formulation (visit u; for every tree child v: recurse, then compare
        low(v) against index(u)) is simulated with the explicit call stack `self.call_stack`.
        Each frame stores the position of the next neighbor to process, so a frame can be
        suspended when a child is pushed and resumed once the child finishes.

        Every tree edge and every back edge is pushed onto `self.edge_stack` exactly once.
        When a child v of u finishes with low(v) >= index(u), the edges on top of the stack
        down to and including (u, v) form a block.
        */

        'recurse: while let Some(frame) = self.call_stack.last_mut() {
            let u = frame.node;

            while frame.next_neighbor < self.graph.degree_of(u) {
                let v = self.graph.ith_neighbor(u, frame.next_neighbor);
                frame.next_neighbor += 1;

                if v == frame.parent {
                    continue;
                }

                let v_state = self.states[v as usize];
                if !v_state.visited {
                    self.edge_stack.push(Edge(u, v));
                    self.push_node(v, u);
                    continue 'recurse;
                } else if v_state.index < self.states[u as usize].index {
                    self.edge_stack.push(Edge(u, v));
                    self.states[u as usize].try_lower_link(v_state.index);
                }
            }

            let parent = frame.parent;
            self.call_stack.pop();

            if parent == INVALID_NODE {
                continue;
            }

            let state = self.states[u as usize];
            self.states[parent as usize].try_lower_link(state.low_link);

            if state.low_link >= self.states[parent as usize].index {
                return Some(self.pop_block(Edge(parent, u)));
            }
        }

        None
    }

    /// Pops edges until (and including) `tree_edge` and returns the sorted node set of these edges
    fn pop_block(&mut self, tree_edge: Edge) -> Vec<Node> {
        let mut block = Vec::new();

        while let Some(edge) = self.edge_stack.pop() {
            for x in [edge.0, edge.1] {
                if !self.in_block.set_bit(x) {
                    block.push(x);
                }
            }

            if edge == tree_edge {
                break;
            }
        }

        for &x in &block {
            self.in_block.clear_bit(x);
        }

        block.sort_unstable();
        block
    }
}

impl<G> Iterator for BiconnectedComponents<'_, G>
where
    G: IndexedAdjacencyList,
{
    type Item = Vec<Node>;

    /// Returns the nodes of the next block or None if all blocks were emitted
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(x) = self.search() {
                return Some(x);
            }

            self.next_unvisited_node()?;
        }
    }
}

impl<G> FusedIterator for BiconnectedComponents<'_, G> where G: IndexedAdjacencyList {}

#[derive(Debug, Clone, Copy)]
struct StackFrame {
    node: Node,
    parent: Node,
    next_neighbor: NumNodes,
}

#[derive(Debug, Clone, Copy, Default)]
struct NodeState {
    visited: bool,
    index: Node,
    low_link: Node,
}

impl NodeState {
    fn visit(&mut self, index: Node) {
        self.visited = true;
        self.index = index;
        self.low_link = index;
    }

    fn try_lower_link(&mut self, link: Node) {
        self.low_link = self.low_link.min(link);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    fn sorted_blocks<G: IndexedAdjacencyList>(graph: &G) -> Vec<Vec<Node>> {
        let mut blocks = graph.biconnected_components().collect_vec();
        blocks.sort();
        blocks
    }

    #[test]
    fn path_consists_of_bridges() {
        let graph = AdjArrayUndir::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
        assert_eq!(
            sorted_blocks(&graph),
            vec![vec![0, 1], vec![1, 2], vec![2, 3]]
        );
        assert_eq!(
            graph.articulation_points().iter_set_bits().collect_vec(),
            vec![1, 2]
        );
    }

    #[test]
    fn cycle_is_single_block() {
        let mut graph = AdjArrayUndir::new(7);
        graph.connect_cycle(0..7);
        assert_eq!(sorted_blocks(&graph), vec![(0..7).collect_vec()]);
        assert_eq!(graph.articulation_points().cardinality(), 0);
    }

    #[test]
    fn blocks_in_example() {
        // triangle 0-1-2, bridge 1-3, triangle 3-4-5, square 5-6-7-8, isolated 9
        let graph = AdjArrayUndir::from_edges(
            10,
            [
                (0, 1),
                (0, 2),
                (2, 1),
                (1, 3),
                (3, 4),
                (4, 5),
                (5, 3),
                (5, 6),
                (6, 7),
                (7, 8),
                (8, 5),
            ],
        );

        assert_eq!(
            sorted_blocks(&graph),
            vec![
                vec![0, 1, 2],
                vec![1, 3],
                vec![3, 4, 5],
                vec![5, 6, 7, 8]
            ]
        );
        assert_eq!(
            graph.articulation_points().iter_set_bits().collect_vec(),
            vec![1, 3, 5]
        );
        assert_eq!(graph.find_nontrivial_block().len(), 3);
    }

    #[test]
    fn every_edge_in_exactly_one_block() {
        use crate::gens::RandomGraph;
        use rand::SeedableRng;
        use rand_pcg::Pcg64Mcg;

        let rng = &mut Pcg64Mcg::seed_from_u64(1234);
        for n in [10, 30, 60] {
            let graph = AdjArrayUndir::gnp(rng, n, 2.5 / n as f64);

            let blocks = graph.biconnected_components().collect_vec();
            let mut covered = 0;
            for Edge(u, v) in graph.edges(true) {
                let containing = blocks
                    .iter()
                    .filter(|b| b.binary_search(&u).is_ok() && b.binary_search(&v).is_ok())
                    .count();
                assert_eq!(containing, 1, "edge ({u}, {v}) in {containing} blocks");
                covered += 1;
            }
            assert_eq!(covered, graph.number_of_edges());

            // removing an articulation point disconnects its component
            let aps = graph.articulation_points();
            for u in graph.vertices() {
                let before = graph.connected_components().count();
                let after = graph.connected_components_exclude_nodes([u]).count();
                let isolated = graph.is_singleton(u) as usize;
                assert_eq!(aps.get_bit(u), after + isolated > before, "node {u}");
            }
        }
    }
}

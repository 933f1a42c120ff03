/*!
Graph traversal algorithms and traversal-derived utilities.

This module provides:
- Generic traversal iterators (BFS, DFS, with and without predecessor tracking),
  started from a single node or from a whole set of sources at once.
- Node exclusion, used to search inside a block or around a removed hub.
- Shortest paths via BFS with predecessor tracking.
- A high-level `Traversal` trait that exposes these directly as methods on graphs.

Traversal iterators are lazy: the colorers consume the visiting order node by node and
may stop early.
*/

use super::*;
use std::{collections::VecDeque, marker::PhantomData};

/// Abstraction for items yielded by a traversal iterator.
///
/// A `SequencedItem` encodes both the **node currently visited**
/// and an **optional predecessor** that represents its parent
/// in the traversal tree.
pub trait SequencedItem: Clone + Copy {
    /// Constructs a new item with a predecessor.
    fn new_with_predecessor(predecessor: Node, item: Node) -> Self;

    /// Constructs a new item without predecessor information.
    fn new_without_predecessor(item: Node) -> Self;

    /// Returns the node represented by this item.
    fn item(&self) -> Node;

    /// Returns the predecessor of this node, if any.
    fn predecessor(&self) -> Option<Node>;
}

impl SequencedItem for Node {
    fn new_with_predecessor(_: Node, item: Node) -> Self {
        item
    }
    fn new_without_predecessor(item: Node) -> Self {
        item
    }
    fn item(&self) -> Node {
        *self
    }
    fn predecessor(&self) -> Option<Node> {
        None
    }
}

/// Compact representation of `(predecessor, node)` used for
/// traversals with parent tracking.
///
/// Internally, the absence of a predecessor is encoded by
/// setting both tuple entries to the same node value.
pub type PredecessorOfNode = (Node, Node);

impl SequencedItem for PredecessorOfNode {
    fn new_with_predecessor(predecessor: Node, item: Node) -> Self {
        (predecessor, item)
    }
    fn new_without_predecessor(item: Node) -> Self {
        (item, item)
    }
    fn item(&self) -> Node {
        self.1
    }
    fn predecessor(&self) -> Option<Node> {
        if self.0 == self.1 { None } else { Some(self.0) }
    }
}

/// Abstraction for the traversal frontier data structure.
///
/// - [`VecDeque`] -> queue semantics -> **BFS**
/// - [`Vec`] -> stack semantics -> **DFS**
pub trait NodeSequencer<T> {
    /// Creates an empty sequencer.
    fn empty() -> Self;

    /// Pushes a node into the frontier.
    fn push(&mut self, item: T);

    /// Removes and returns the next node from the frontier.
    fn pop(&mut self) -> Option<T>;

    /// Returns the number of items currently in the frontier.
    fn cardinality(&self) -> usize;
}

impl<T> NodeSequencer<T> for VecDeque<T> {
    fn empty() -> Self {
        VecDeque::new()
    }
    fn push(&mut self, u: T) {
        self.push_back(u)
    }
    fn pop(&mut self) -> Option<T> {
        self.pop_front()
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
}

impl<T> NodeSequencer<T> for Vec<T> {
    fn empty() -> Self {
        Vec::new()
    }
    fn push(&mut self, u: T) {
        Vec::push(self, u)
    }
    fn pop(&mut self) -> Option<T> {
        Vec::pop(self)
    }
    fn cardinality(&self) -> usize {
        self.len()
    }
}

/// Generic traversal iterator supporting BFS and DFS variants.
///
/// Maintains an explicit frontier (queue or stack) of nodes to visit and the set of
/// discovered nodes. A node counts as discovered as soon as it is pushed, so every node
/// is yielded at most once.
pub struct TraversalSearch<'a, G, S, I>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
{
    graph: &'a G,
    visited: NodeBitSet,
    sequencer: S,
    stop_at: Option<Node>,
    _item: PhantomData<I>,
}

/// A BFS traversal iterator over the graph.
pub type BFS<'a, G> = TraversalSearch<'a, G, VecDeque<Node>, Node>;

/// A DFS traversal iterator over the graph.
pub type DFS<'a, G> = TraversalSearch<'a, G, Vec<Node>, Node>;

/// A BFS traversal iterator that records predecessor information,
/// producing a spanning tree of the search.
pub type BFSWithPredecessor<'a, G> =
    TraversalSearch<'a, G, VecDeque<PredecessorOfNode>, PredecessorOfNode>;

impl<G, S, I> Iterator for TraversalSearch<'_, G, S, I>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
{
    type Item = I;

    fn next(&mut self) -> Option<Self::Item> {
        let popped = self.sequencer.pop()?;
        let u = popped.item();

        if self.stop_at == Some(u) {
            while self.sequencer.pop().is_some() {} // drop all
        } else {
            for v in self.graph.neighbors_of(u) {
                if !self.visited.set_bit(v) {
                    self.sequencer.push(I::new_with_predecessor(u, v));
                }
            }
        }

        Some(popped)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (
            self.sequencer.cardinality(),
            Some(self.graph.len() - self.visited.cardinality() as usize + self.sequencer.cardinality()),
        )
    }
}

impl<'a, G, S, I> TraversalSearch<'a, G, S, I>
where
    G: AdjacencyList,
    S: NodeSequencer<I>,
    I: SequencedItem,
{
    /// Creates a new traversal iterator starting from `start`.
    pub fn new(graph: &'a G, start: Node) -> Self {
        Self::from_sources(graph, [start])
    }

    /// Creates a new traversal iterator whose frontier initially contains all `sources`
    /// (in the given order, duplicates are ignored). A BFS started this way visits nodes by
    /// increasing distance to the source set.
    pub fn from_sources<N>(graph: &'a G, sources: N) -> Self
    where
        N: IntoIterator<Item = Node>,
    {
        let mut search = Self {
            graph,
            visited: graph.vertex_bitset_unset(),
            sequencer: S::empty(),
            stop_at: None,
            _item: PhantomData,
        };

        for u in sources {
            if !search.visited.set_bit(u) {
                search.sequencer.push(I::new_without_predecessor(u));
            }
        }

        search
    }

    /// Returns *true* if `u` was already discovered (or excluded)
    pub fn did_visit_node(&self, u: Node) -> bool {
        self.visited.get_bit(u)
    }

    /// Tries to restart the search at an yet unvisited node and returns
    /// true iff successful. Requires that search came to a hold earlier,
    /// i.e. self.next() returned None
    pub fn try_restart_at_unvisited(&mut self) -> bool {
        let node = self.graph.vertices().find(|&u| !self.visited.get_bit(u));
        match node {
            None => false,
            Some(x) => self.try_restart_at(x),
        }
    }

    /// Restarts the search at `u` if `u` was not discovered yet.
    /// Requires that the search came to a hold earlier.
    pub fn try_restart_at(&mut self, u: Node) -> bool {
        assert_eq!(self.sequencer.cardinality(), 0);
        if self.visited.set_bit(u) {
            return false;
        }
        self.sequencer.push(I::new_without_predecessor(u));
        true
    }

    /// Sets a stopper node. If this node is reached, the iterator returns it and afterwards only None.
    pub fn set_stop_at(&mut self, stopper: Node) {
        self.stop_at = Some(stopper);
    }

    /// Sets a stopper node. If this node is reached, the iterator returns it and afterwards only None.
    pub fn stop_at(mut self, stopper: Node) -> Self {
        self.set_stop_at(stopper);
        self
    }

    /// Excludes a node from the search. It will be treated as if it was already visited,
    /// i.e. no edges to or from that node will be taken.
    ///
    /// # Warning
    /// Calling this method has no effect if the node is already on the stack. It is therefore highly
    /// recommended to call this method directly after the constructor.
    pub fn exclude_node(&mut self, u: Node) {
        self.visited.set_bit(u);
    }

    /// Builder-variant of [`TraversalSearch::exclude_node`].
    pub fn with_node_excluded(mut self, u: Node) -> Self {
        self.exclude_node(u);
        self
    }

    /// Exclude multiple nodes from traversal. It is functionally equivalent to repeatedly
    /// calling [`TraversalSearch::exclude_node`].
    pub fn exclude_nodes<N>(&mut self, us: N)
    where
        N: IntoIterator<Item = Node>,
    {
        for u in us {
            self.exclude_node(u);
        }
    }

    /// Builder-variant of [`TraversalSearch::exclude_nodes`].
    pub fn with_nodes_excluded<N>(mut self, us: N) -> Self
    where
        N: IntoIterator<Item = Node>,
    {
        self.exclude_nodes(us);
        self
    }
}

/// Provides convenient traversal methods (BFS, DFS, shortest paths)
pub trait Traversal: AdjacencyList + Sized {
    /// Returns an iterator that traverses nodes reachable from `start`
    /// in **breadth-first search (BFS) order**.
    ///
    /// # Examples
    /// ```
    /// use brooks_coloring::{prelude::*, algo::*};
    ///
    /// let g = AdjArrayUndir::from_edges(3, [(0, 1), (1, 2)]);
    ///
    /// let order: Vec<_> = g.bfs(1).collect();
    /// assert_eq!(order, vec![1, 0, 2]);
    /// ```
    fn bfs(&self, start: Node) -> BFS<'_, Self> {
        BFS::new(self, start)
    }

    /// Returns a BFS iterator whose frontier initially contains all `sources`.
    ///
    /// # Examples
    /// ```
    /// use brooks_coloring::{prelude::*, algo::*};
    ///
    /// let g = AdjArrayUndir::from_edges(5, [(0, 1), (1, 2), (2, 3), (3, 4)]);
    ///
    /// let order: Vec<_> = g.bfs_from_sources([0, 4]).collect();
    /// assert_eq!(order, vec![0, 4, 1, 3, 2]);
    /// ```
    fn bfs_from_sources<N>(&self, sources: N) -> BFS<'_, Self>
    where
        N: IntoIterator<Item = Node>,
    {
        BFS::from_sources(self, sources)
    }

    /// Returns an iterator that traverses nodes reachable from `start`
    /// in **depth-first search (DFS) order**.
    fn dfs(&self, start: Node) -> DFS<'_, Self> {
        DFS::new(self, start)
    }

    /// Returns a BFS iterator starting from `start` that additionally
    /// yields the predecessor relation (edges traversed).
    ///
    /// # Examples
    /// ```
    /// use brooks_coloring::{prelude::*, algo::*};
    ///
    /// let g = AdjArrayUndir::from_edges(2, [(0, 1)]);
    ///
    /// let mut it = g.bfs_with_predecessor(0);
    /// assert_eq!(it.next().unwrap().predecessor(), None);
    /// assert_eq!(it.next().unwrap().predecessor(), Some(0));
    /// ```
    fn bfs_with_predecessor(&self, start: Node) -> BFSWithPredecessor<'_, Self> {
        BFSWithPredecessor::new(self, start)
    }

    /// Computes a **shortest path** from `start` to `end` using BFS that never enters a node
    /// set in `excluded`.
    ///
    /// - Returns `Some(path)` with `path[0] == start` and `path.last() == end` if such a path
    ///   exists. As the path is a shortest one, it is chordless.
    /// - Returns `None` otherwise, or if `start`/`end` themselves are excluded.
    ///
    /// # Examples
    /// ```
    /// use brooks_coloring::{prelude::*, algo::*};
    ///
    /// // 0 - 1 - 2 and 0 - 3 - 4 - 2
    /// let g = AdjArrayUndir::from_edges(5, [(0, 1), (1, 2), (0, 3), (3, 4), (4, 2)]);
    ///
    /// let mut excluded = g.vertex_bitset_unset();
    /// assert_eq!(g.shortest_path_avoiding(0, 2, &excluded), Some(vec![0, 1, 2]));
    ///
    /// excluded.set_bit(1);
    /// assert_eq!(g.shortest_path_avoiding(0, 2, &excluded), Some(vec![0, 3, 4, 2]));
    /// ```
    fn shortest_path_avoiding(
        &self,
        start: Node,
        end: Node,
        excluded: &NodeBitSet,
    ) -> Option<Vec<Node>> {
        if excluded.get_bit(start) || excluded.get_bit(end) {
            return None;
        }
        if start == end {
            return Some(vec![start]);
        }

        let mut bfs = BFSWithPredecessor::new(self, start)
            .with_nodes_excluded(excluded.iter_set_bits())
            .stop_at(end);
        let mut parent = vec![INVALID_NODE; self.len()];

        for item in bfs.by_ref() {
            let Some(pred) = item.predecessor() else {
                continue;
            };
            parent[item.item() as usize] = pred;

            if item.item() == end {
                let mut path = vec![end];
                let mut node = pred;
                while node != start {
                    path.push(node);
                    node = parent[node as usize];
                }
                path.push(start);
                path.reverse();
                return Some(path);
            }
        }

        None
    }
}

impl<G> Traversal for G where G: AdjacencyList + Sized {}

#[cfg(test)]
pub mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn bfs_order() {
        //  / 2 --- \
        // 1         4 - 3
        //  \ 0 - 5 /
        let graph = AdjArrayUndir::from_edges(6, [(1, 2), (1, 0), (4, 3), (0, 5), (2, 4), (5, 4)]);

        {
            let order: Vec<Node> = graph.bfs(1).collect();
            assert_eq!(order, vec![1, 2, 0, 4, 5, 3]);
        }

        {
            let order: Vec<Node> = BFS::new(&graph, 5).collect();
            assert_eq!(order, [5, 0, 4, 1, 3, 2]);
        }
    }

    #[test]
    fn bfs_with_predecessor() {
        let graph = AdjArrayUndir::from_edges(6, [(1, 2), (1, 0), (4, 3), (0, 5), (2, 4), (5, 4)]);

        let mut edges: Vec<_> = graph
            .bfs_with_predecessor(1)
            .map(|x| (x.predecessor(), x.item()))
            .collect();
        edges.sort();
        assert_eq!(
            edges,
            vec![
                (None, 1),
                (Some(0), 5),
                (Some(1), 0),
                (Some(1), 2),
                (Some(2), 4),
                (Some(4), 3)
            ]
        );
    }

    #[test]
    fn test_stopper() {
        let graph = AdjArrayUndir::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
        assert_eq!(graph.bfs(0).collect_vec(), vec![0, 1, 2, 3]);

        assert_eq!(graph.bfs(0).stop_at(1).collect_vec(), vec![0, 1]);
    }

    #[test]
    fn exclusion_and_restart() {
        let graph = AdjArrayUndir::from_edges(6, [(0, 1), (1, 2), (3, 4)]);

        let mut bfs = graph.bfs(0).with_node_excluded(2);
        assert_eq!(bfs.by_ref().collect_vec(), vec![0, 1]);
        assert!(bfs.did_visit_node(2));

        assert!(bfs.try_restart_at_unvisited());
        assert_eq!(bfs.by_ref().collect_vec(), vec![3, 4]);
        assert!(bfs.try_restart_at_unvisited());
        assert_eq!(bfs.by_ref().collect_vec(), vec![5]);
        assert!(!bfs.try_restart_at_unvisited());
    }

    #[test]
    fn multi_source_bfs_ignores_duplicates() {
        let graph = AdjArrayUndir::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
        assert_eq!(
            graph.bfs_from_sources([3, 0, 3]).collect_vec(),
            vec![3, 0, 2, 1]
        );
    }

    #[test]
    fn dfs_order() {
        //  / 2
        // 1         4 - 3
        //  \ 0 - 5 /
        let graph = AdjArrayUndir::from_edges(6, [(1, 2), (1, 0), (4, 3), (0, 5), (5, 4)]);

        let order: Vec<Node> = DFS::new(&graph, 1).collect();
        assert_eq!(order, vec![1, 0, 5, 4, 3, 2]);
    }

    #[test]
    fn shortest_path_unreachable() {
        let graph = AdjArrayUndir::from_edges(4, [(0, 1), (2, 3)]);
        let excluded = graph.vertex_bitset_unset();
        assert_eq!(graph.shortest_path_avoiding(0, 3, &excluded), None);
        assert_eq!(graph.shortest_path_avoiding(2, 2, &excluded), Some(vec![2]));
    }
}

use itertools::Itertools;

use super::*;

/// Connectivity queries on undirected graphs
pub trait Connectivity: AdjacencyList + Traversal + Sized {
    /// Returns an iterator over the connected components of the graph.
    /// Each component is emitted in BFS order starting at its smallest node.
    fn connected_components(&self) -> ConnectedComponents<'_, Self> {
        ConnectedComponents::new(self)
    }

    /// Returns an iterator over the connected components of the graph after removing
    /// all nodes in `ignore`. Removed nodes are not part of any component.
    fn connected_components_exclude_nodes<I>(&self, ignore: I) -> ConnectedComponents<'_, Self>
    where
        I: IntoIterator<Item = Node>,
    {
        ConnectedComponents::new(self).exclude_nodes(ignore)
    }

    /// Returns *true* if the graph has at least one node and all nodes are reachable from node `0`.
    ///
    /// # Examples
    /// ```
    /// use brooks_coloring::{prelude::*, algo::*};
    ///
    /// let g = AdjArrayUndir::from_edges(3, [(0, 1)]);
    /// assert!(!g.is_connected());
    ///
    /// let g = AdjArrayUndir::from_edges(3, [(0, 1), (1, 2)]);
    /// assert!(g.is_connected());
    /// ```
    fn is_connected(&self) -> bool {
        !self.is_empty() && self.bfs(0).count() == self.len()
    }

    /// Returns *true* if the graph restricted to nodes *not* in `ignore` is connected.
    /// A graph without remaining nodes is not connected.
    fn is_connected_without<I>(&self, ignore: I) -> bool
    where
        I: IntoIterator<Item = Node>,
    {
        let mut components = self.connected_components_exclude_nodes(ignore);
        components.next().is_some() && components.next().is_none()
    }
}

impl<G> Connectivity for G where G: AdjacencyList + Sized {}

/// Iterator over connected components realized as a BFS that restarts at the smallest
/// yet unvisited node whenever it runs dry.
pub struct ConnectedComponents<'a, G>
where
    G: AdjacencyList,
{
    bfs: BFS<'a, G>,
    started: bool,
}

impl<'a, G> ConnectedComponents<'a, G>
where
    G: AdjacencyList,
{
    pub fn new(graph: &'a G) -> Self {
        Self {
            bfs: BFS::from_sources(graph, std::iter::empty()),
            started: false,
        }
    }

    pub fn set_exclude_nodes<I>(&mut self, exclude: I)
    where
        I: IntoIterator<Item = Node>,
    {
        self.bfs.exclude_nodes(exclude);
    }

    pub fn exclude_nodes<I>(mut self, exclude: I) -> Self
    where
        I: IntoIterator<Item = Node>,
    {
        self.set_exclude_nodes(exclude);
        self
    }
}

impl<G> Iterator for ConnectedComponents<'_, G>
where
    G: AdjacencyList,
{
    type Item = Vec<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.started {
                let cc = self.bfs.by_ref().collect_vec();
                if !cc.is_empty() {
                    return Some(cc);
                }
            }
            self.started = true;

            if !self.bfs.try_restart_at_unvisited() {
                return None;
            }
        }
    }
}

/*!
# Substructure Generators

This module provides utility methods to generate additional **substructures**
inside an already existing graph.

It allows adding common motifs such as:

- **Paths**
- **Cycles**
- **Cliques**

These are exactly the motifs the Δ-list-coloring looks for (even cycles, wheel rims) or has to
reject (odd cycles, complete graphs), so most test graphs of this crate are assembled from them.

# Example

```rust
use brooks_coloring::{prelude::*, gens::*};

let mut g = AdjArrayUndir::new(5);
g.connect_path([0, 1, 2]);
g.connect_cycle([2, 3, 4]);
g.connect_clique([0, 2, 4]);

assert_eq!(
    g.ordered_edges(true),
    vec![Edge(0, 1), Edge(0, 2), Edge(0, 4), Edge(1, 2), Edge(2, 3), Edge(2, 4), Edge(3, 4)]
);
```
*/

use itertools::Itertools;

use super::*;

/// Trait for creating additional **substructures** (paths, cycles, cliques)
/// inside an already existing graph.
///
/// Implemented for all graphs that support edge editing.
pub trait GeneratorSubstructures {
    /// Connects the given nodes in order with a **simple path**.
    ///
    /// Each consecutive pair of nodes is connected by a single edge.
    /// ** Panics if one of the edges already exists **
    ///
    /// # Example
    /// ```rust
    /// use brooks_coloring::{prelude::*, gens::*};
    ///
    /// let mut g = AdjArrayUndir::new(4);
    /// g.connect_path([0, 1, 2, 3]);
    ///
    /// assert!(g.has_edge(0, 1));
    /// assert!(g.has_edge(1, 2));
    /// assert!(g.has_edge(2, 3));
    /// ```
    fn connect_path<P>(&mut self, nodes_on_path: P)
    where
        P: IntoIterator<Item = Node>;

    /// Connects the given nodes with a **cycle**.
    ///
    /// - Consecutive nodes are connected by edges.
    /// - Additionally, the last node is connected back to the first.
    ///
    /// Fewer than three nodes do not form a cycle in a simple graph: two nodes are connected
    /// by a single edge, a single node remains untouched.
    ///
    /// # Example
    /// ```rust
    /// use brooks_coloring::{prelude::*, gens::*};
    ///
    /// let mut g = AdjArrayUndir::new(3);
    /// g.connect_cycle([0, 1, 2]);
    ///
    /// assert!(g.has_edge(0, 1));
    /// assert!(g.has_edge(1, 2));
    /// assert!(g.has_edge(2, 0));
    /// ```
    fn connect_cycle<C>(&mut self, nodes_in_cycle: C)
    where
        C: IntoIterator<Item = Node>;

    /// Connects all given nodes into a **clique** (complete subgraph).
    /// Already existing edges are kept.
    ///
    /// # Example
    /// ```rust
    /// use brooks_coloring::{prelude::*, gens::*};
    ///
    /// let mut g = AdjArrayUndir::new(3);
    /// g.connect_clique(0..3);
    ///
    /// assert!(g.has_edge(0, 1));
    /// assert!(g.has_edge(1, 2));
    /// assert!(g.has_edge(0, 2));
    /// ```
    fn connect_clique<C>(&mut self, nodes: C)
    where
        C: IntoIterator<Item = Node>;
}

impl<G> GeneratorSubstructures for G
where
    G: GraphEdgeEditing,
{
    fn connect_path<P>(&mut self, nodes_on_path: P)
    where
        P: IntoIterator<Item = Node>,
    {
        for (u, v) in nodes_on_path.into_iter().tuple_windows() {
            self.add_edge(u, v);
        }
    }

    fn connect_cycle<C>(&mut self, nodes_in_cycle: C)
    where
        C: IntoIterator<Item = Node>,
    {
        let mut iter = nodes_in_cycle.into_iter();

        // we use a rather tedious implementation to avoid needing to clone the iterator
        if let Some(first) = iter.next() {
            let mut prev = first;
            let mut len = 1;
            for cur in iter {
                self.add_edge(prev, cur);
                prev = cur;
                len += 1;
            }

            if len > 2 {
                self.add_edge(prev, first);
            }
        }
    }

    fn connect_clique<C>(&mut self, nodes: C)
    where
        C: IntoIterator<Item = Node>,
    {
        for (u, v) in nodes.into_iter().unique().tuple_combinations() {
            self.try_add_edge(u, v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_path() {
        {
            let mut g = AdjArrayUndir::new(6);
            g.connect_path([]);
            assert_eq!(g.number_of_edges(), 0);
        }

        {
            let mut g = AdjArrayUndir::new(6);
            g.connect_path([1]);
            assert_eq!(g.number_of_edges(), 0);
        }

        {
            let mut g = AdjArrayUndir::new(6);
            g.connect_path([2, 1]);
            assert_eq!(g.number_of_edges(), 1);
            assert!(g.has_edge(2, 1));
        }

        {
            let mut g = AdjArrayUndir::new(6);
            g.connect_path([0, 3, 1, 4]);
            assert_eq!(
                g.ordered_edges(true),
                vec![Edge(0, 3), Edge(1, 3), Edge(1, 4)]
            );
        }
    }

    #[test]
    fn test_connect_cycle() {
        {
            let mut g = AdjArrayUndir::new(6);
            g.connect_cycle([]);
            assert_eq!(g.number_of_edges(), 0);
        }

        {
            let mut g = AdjArrayUndir::new(6);
            g.connect_cycle([1]);
            assert_eq!(g.number_of_edges(), 0);
        }

        {
            let mut g = AdjArrayUndir::new(6);
            g.connect_cycle([1, 5]);
            assert_eq!(g.number_of_edges(), 1);
        }

        {
            let mut g = AdjArrayUndir::new(6);
            g.connect_cycle([0, 3, 1, 4]);
            assert_eq!(
                g.ordered_edges(true),
                vec![Edge(0, 3), Edge(0, 4), Edge(1, 3), Edge(1, 4)]
            );
            assert_eq!(g.degree_distribution(), vec![(0, 2), (2, 4)]);
        }
    }

    #[test]
    fn test_connect_clique() {
        {
            let mut g = AdjArrayUndir::new(6);
            g.connect_clique([]);
            assert_eq!(g.number_of_edges(), 0);
        }

        {
            let mut g = AdjArrayUndir::new(6);
            g.connect_clique([1]);
            assert_eq!(g.number_of_edges(), 0);
        }

        {
            let mut g = AdjArrayUndir::new(6);
            g.connect_clique([1, 2, 4, 2]);
            assert_eq!(g.number_of_edges(), 3);
        }

        {
            let mut g = AdjArrayUndir::new(6);
            g.add_edge(0, 5);
            g.connect_clique([0, 1, 2, 3, 4, 5]);
            assert_eq!(g.number_of_edges(), 15);
            assert_eq!(g.min_degree(), 5);
        }
    }
}

/*!
`brooks_coloring` computes proper vertex colorings of simple, unlabelled and undirected
graphs and decides whether a graph satisfies the preconditions of Brooks' theorem.

# Representation

Nodes are `u32` in the range `0..n` where `n` is the number of nodes in the graph, edges are the
tuple-struct `Edge(Node, Node)`. Colors are `u32` as well; [`UNCOLORED`](coloring::UNCOLORED)
marks nodes that have not been assigned a color yet.

The adjacency contract is `node -> ordered sequence of neighbors`: symmetric, without self-loops
and without duplicates. [`AdjArrayUndir::from_adjacency_lists`](crate::repr::UndirectedGraph::from_adjacency_lists)
takes such lists as they are; [`GraphFromScratch::from_edges`](crate::ops::GraphFromScratch::from_edges)
builds them from an edge list. Every algorithm is generic over the traits in [`ops`].

# Algorithms

- **Δ-list-coloring** ([`DeltaListColoring`](coloring::DeltaListColoring)): colors a connected
  Δ-regular Brooks graph with at most Δ colors. It finds a nontrivial biconnected block,
  locates an even cycle, a wheel or a theta graph inside it, colors that seed and extends the
  coloring outward. Graphs that are not regular are delegated to a greedy colorer rooted at a
  node with spare degree.
- **Δ+1 greedy coloring** ([`DeltaPlusOneColoring`](coloring::DeltaPlusOneColoring)): the baseline,
  always applicable, optionally randomized through a caller-owned or seeded generator.
- **Brooks classifier** ([`BrooksClassification`](algo::BrooksClassification)): connectivity,
  completeness and odd-cycle checks.

The three entry points are also available as methods on every graph:

```rust
use brooks_coloring::prelude::*;

let mut g = AdjArrayUndir::new(8);
g.connect_cycle(0..8);
g.add_edges([(0, 4), (1, 5), (2, 6), (3, 7)]);

assert!(g.classify_brooks().is_candidate());

let coloring = g.color_delta_regular().unwrap();
assert!(coloring.is_proper_for(&g));
assert!(coloring.number_of_colors() <= 3);

let baseline = g.color_greedy_delta_plus_one(DeltaPlusOneColoring::new().seed(Some(7)));
assert!(baseline.is_proper_for(&g));
assert!(baseline.number_of_colors() <= 4);
```

# Design

Every algorithm is a configurable struct (builder/setter pattern) and the commonly used
functionality is additionally exposed through extension traits implemented for all graphs. Searches that may go deep (DFS, block decomposition, path enumeration)
use explicit stacks so that long paths cannot overflow the call stack.

The library logs through the [`log`](https://docs.rs/log) facade and never installs a logger.
*/

pub mod algo;
pub mod coloring;
pub mod edge;
pub mod gens;
pub mod node;
pub mod ops;
pub mod repr;
#[cfg(test)]
pub(crate) mod testing;

/// `brooks_coloring::prelude` includes definitions for nodes, edges, colors, all basic graph
/// operation traits, the representations and the algorithm entry points.
pub mod prelude {
    pub use super::{
        algo::{BrooksClassification, BrooksReason, BrooksTest, Traversal},
        coloring::*,
        edge::*,
        gens::GeneratorSubstructures,
        node::*,
        ops::*,
        repr::*,
    };
}

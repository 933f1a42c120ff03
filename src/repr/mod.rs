/*!
# Graph Representations

All colorers work on any type implementing the traits in [`ops`](crate::ops); this module provides
the storage backend used throughout the crate: an undirected adjacency array that keeps every
neighborhood in **insertion order**. Keeping the order matters: the block finder, the substructure
locator and the extender all iterate neighborhoods, so the same adjacency lists always produce
the same coloring.

- [`AdjArrayUndir`]: one `Vec<Node>` per node,
- [`SparseAdjArrayUndir`]: one `SmallVec<[Node; 8]>` per node (no heap allocation for nodes of
  degree at most `8`, which covers most sparse benchmark networks).
*/

use itertools::Itertools;
use smallvec::{Array, SmallVec};

use crate::{edge::*, node::*, ops::*};

mod undirected;

pub use undirected::*;

/// Trait for methods on the Neighborhood of a specified Node
pub trait Neighborhood: Clone + Default {
    /// Returns the number of neighbors in the Neighborhood
    fn num_of_neighbors(&self) -> NumNodes {
        self.as_slice().len() as NumNodes
    }

    /// Returns a slice-reference of the neighborhood in insertion order
    fn as_slice(&self) -> &[Node];

    /// Returns *true* if `v` is in the Neighborhood
    fn has_neighbor(&self, v: Node) -> bool {
        self.as_slice().contains(&v)
    }

    /// Tries to add a neighbor to the Neighborhood.
    /// Returns *true* if the node was in the Neighborhood before.
    fn try_add_neighbor(&mut self, u: Node) -> bool {
        if self.has_neighbor(u) {
            true
        } else {
            self.add_neighbor(u);
            false
        }
    }

    /// Adds a neighbor to the Neighborhood without checking if this neighbor exists beforehand.
    fn add_neighbor(&mut self, u: Node);

    /// Tries to remove a neighbor from the Neighborhood while keeping the order of the others.
    /// Returns *true* if the node was in the Neighborhood before.
    fn try_remove_neighbor(&mut self, u: Node) -> bool;

    /// Removes all neighbors in the Neighborhood
    fn clear(&mut self);
}

/// Basic Neighborhood-Impl. using `Vec<Node>`
#[derive(Default, Clone, Debug)]
pub struct ArrNeighborhood(pub Vec<Node>);

impl Neighborhood for ArrNeighborhood {
    fn as_slice(&self) -> &[Node] {
        &self.0
    }

    fn add_neighbor(&mut self, u: Node) {
        self.0.push(u);
    }

    fn try_remove_neighbor(&mut self, u: Node) -> bool {
        if let Some((pos, _)) = self.0.iter().find_position(|&&x| x == u) {
            self.0.remove(pos);
            true
        } else {
            false
        }
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

/// Like [`ArrNeighborhood`] but uses `SmallVec<[Node; N]>` instead.
/// Prefer this if the graph is known to be sparse.
#[derive(Default, Clone, Debug)]
pub struct SparseNeighborhood<const N: usize = 8>(pub SmallVec<[Node; N]>)
where
    [Node; N]: Array<Item = Node>;

impl<const N: usize> Neighborhood for SparseNeighborhood<N>
where
    [Node; N]: Array<Item = Node>,
{
    fn as_slice(&self) -> &[Node] {
        &self.0
    }

    fn add_neighbor(&mut self, u: Node) {
        self.0.push(u);
    }

    fn try_remove_neighbor(&mut self, u: Node) -> bool {
        if let Some((pos, _)) = self.0.iter().find_position(|&&x| x == u) {
            self.0.remove(pos);
            true
        } else {
            false
        }
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

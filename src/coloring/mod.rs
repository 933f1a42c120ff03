/*!
# Vertex Colorings

This module contains the colorers and the [`Coloring`] value they produce:

- [`DeltaListColoring`]: colors Brooks graphs with at most `Δ` colors by seeding an even cycle,
  wheel or theta graph inside a nontrivial block and extending the seed outward.
- [`DeltaPlusOneColoring`]: the greedy baseline with palette `[0, Δ]`, optionally randomized.
- [`BrooksCompletion`]: an ordering-based `Δ`-coloring used when the seed-and-extend pipeline
  gets stuck.

All colorers are also exposed through the [`GraphColoring`] extension trait.
*/

use itertools::Itertools;
use smallvec::SmallVec;

use crate::{algo::*, edge::*, node::*, ops::*};

mod completion;
mod delta;
mod error;
mod greedy;

pub use completion::*;
pub use delta::*;
pub use error::*;
pub use greedy::*;

/// Colors are non-negative integers; a coloring with `k` colors ideally uses `0..k`
pub type Color = u32;

/// Sentinel for nodes without color
pub const UNCOLORED: Color = Color::MAX;

/// A (possibly partial) assignment of colors to the nodes `0..n`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coloring {
    colors: Vec<Color>,
}

impl Coloring {
    /// Creates a coloring of `n` nodes in which no node is colored yet
    pub fn uncolored(n: NumNodes) -> Self {
        Self {
            colors: vec![UNCOLORED; n as usize],
        }
    }

    /// Wraps a color vector (entries equal to [`UNCOLORED`] denote uncolored nodes)
    pub fn from_colors(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    /// Returns the number of nodes covered by this coloring
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns *true* if the coloring covers no nodes
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Returns the color of every node ([`UNCOLORED`] for uncolored nodes)
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Consumes the coloring and returns the color of every node
    pub fn into_colors(self) -> Vec<Color> {
        self.colors
    }

    /// Returns the color of `u` or `None` if `u` is uncolored
    /// ** Panics if `u >= n` **
    pub fn color_of(&self, u: Node) -> Option<Color> {
        let c = self.colors[u as usize];
        (c != UNCOLORED).then_some(c)
    }

    /// Returns *true* if `u` has a color
    pub fn is_colored(&self, u: Node) -> bool {
        self.colors[u as usize] != UNCOLORED
    }

    /// Assigns color `c` to `u`
    pub fn set_color(&mut self, u: Node, c: Color) {
        debug_assert_ne!(c, UNCOLORED);
        self.colors[u as usize] = c;
    }

    /// Removes the color of `u`
    pub fn clear_color(&mut self, u: Node) {
        self.colors[u as usize] = UNCOLORED;
    }

    /// Returns the number of uncolored nodes
    pub fn number_of_uncolored(&self) -> NumNodes {
        self.colors.iter().filter(|&&c| c == UNCOLORED).count() as NumNodes
    }

    /// Returns *true* if every node has a color
    pub fn is_complete(&self) -> bool {
        self.colors.iter().all(|&c| c != UNCOLORED)
    }

    /// Returns the number of distinct colors in use
    ///
    /// # Examples
    /// ```
    /// use brooks_coloring::prelude::*;
    ///
    /// let coloring = Coloring::from_colors(vec![0, 3, 0, UNCOLORED]);
    /// assert_eq!(coloring.number_of_colors(), 2);
    /// ```
    pub fn number_of_colors(&self) -> NumNodes {
        self.colors
            .iter()
            .filter(|&&c| c != UNCOLORED)
            .unique()
            .count() as NumNodes
    }

    /// Returns the largest color in use
    pub fn max_color(&self) -> Option<Color> {
        self.colors.iter().copied().filter(|&c| c != UNCOLORED).max()
    }

    /// Returns all edges (normalized) whose endpoints are colored identically
    pub fn conflicts<G>(&self, graph: &G) -> Vec<Edge>
    where
        G: AdjacencyList,
    {
        graph
            .edges(true)
            .filter(|&Edge(u, v)| self.is_colored(u) && self.colors[u as usize] == self.colors[v as usize])
            .collect()
    }

    /// Returns *true* if this is a complete and proper coloring of `graph`
    ///
    /// # Examples
    /// ```
    /// use brooks_coloring::prelude::*;
    ///
    /// let g = AdjArrayUndir::from_edges(3, [(0, 1), (1, 2)]);
    /// assert!(Coloring::from_colors(vec![0, 1, 0]).is_proper_for(&g));
    /// assert!(!Coloring::from_colors(vec![0, 0, 1]).is_proper_for(&g));
    /// assert!(!Coloring::from_colors(vec![0, 1, UNCOLORED]).is_proper_for(&g));
    /// ```
    pub fn is_proper_for<G>(&self, graph: &G) -> bool
    where
        G: AdjacencyList,
    {
        self.len() == graph.len() && self.is_complete() && self.conflicts(graph).is_empty()
    }

    /// Returns the color classes: entry `c` lists the nodes of color `c` in ascending order
    pub fn color_classes(&self) -> Vec<Vec<Node>> {
        let mut classes = vec![Vec::new(); self.max_color().map_or(0, |c| c as usize + 1)];
        for (u, &c) in self.colors.iter().enumerate() {
            if c != UNCOLORED {
                classes[c as usize].push(u as Node);
            }
        }
        classes
    }

    /// Swaps the colors `a` and `b` on all given nodes
    pub(crate) fn swap_colors_on<I>(&mut self, nodes: I, a: Color, b: Color)
    where
        I: IntoIterator<Item = Node>,
    {
        for u in nodes {
            let c = &mut self.colors[u as usize];
            if *c == a {
                *c = b;
            } else if *c == b {
                *c = a;
            }
        }
    }
}

/// Finds free colors of a node within a fixed palette `[0, palette)`.
///
/// Instead of clearing a boolean array for every query, each query uses a fresh stamp and a
/// color counts as blocked iff its entry equals the current stamp.
#[derive(Debug, Clone)]
pub(crate) struct ColorPicker {
    stamps: Vec<u32>,
    stamp: u32,
}

impl ColorPicker {
    pub fn new(palette: NumNodes) -> Self {
        Self {
            stamps: vec![0; palette as usize],
            stamp: 0,
        }
    }

    pub fn palette(&self) -> NumNodes {
        self.stamps.len() as NumNodes
    }

    fn block_colors_of<I>(&mut self, coloring: &Coloring, neighbors: I)
    where
        I: IntoIterator<Item = Node>,
    {
        if self.stamp == u32::MAX {
            self.stamps.fill(0);
            self.stamp = 0;
        }
        self.stamp += 1;

        for v in neighbors {
            if let Some(entry) = coloring
                .color_of(v)
                .and_then(|c| self.stamps.get_mut(c as usize))
            {
                *entry = self.stamp;
            }
        }
    }

    /// Returns the smallest color of the palette not used by any of `neighbors`
    pub fn smallest_free<I>(&mut self, coloring: &Coloring, neighbors: I) -> Option<Color>
    where
        I: IntoIterator<Item = Node>,
    {
        self.block_colors_of(coloring, neighbors);
        self.stamps
            .iter()
            .position(|&s| s != self.stamp)
            .map(|c| c as Color)
    }

    /// Returns all colors of the palette not used by any of `neighbors` in ascending order
    pub fn free_colors<I>(&mut self, coloring: &Coloring, neighbors: I) -> SmallVec<[Color; 8]>
    where
        I: IntoIterator<Item = Node>,
    {
        self.block_colors_of(coloring, neighbors);
        self.stamps
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s != self.stamp)
            .map(|(c, _)| c as Color)
            .collect()
    }
}

/// Provides the colorers as methods on all graphs
pub trait GraphColoring: IndexedAdjacencyList + AdjacencyTest + Sized {
    /// Colors the graph with at most `Δ` colors using [`DeltaListColoring`] with default options.
    ///
    /// # Examples
    /// ```
    /// use brooks_coloring::{prelude::*, gens::*};
    ///
    /// let g = AdjArrayUndir::petersen();
    /// let coloring = g.color_delta_regular().unwrap();
    /// assert!(coloring.is_proper_for(&g));
    /// assert!(coloring.number_of_colors() <= 3);
    ///
    /// let k4 = AdjArrayUndir::complete(4);
    /// assert_eq!(
    ///     k4.color_delta_regular(),
    ///     Err(ColoringError::NotBrooks(BrooksReason::Complete))
    /// );
    /// ```
    fn color_delta_regular(&self) -> Result<Coloring, ColoringError> {
        DeltaListColoring::new().color(self)
    }

    /// Colors the graph with at most `Δ + 1` colors using the given [`DeltaPlusOneColoring`]
    fn color_greedy_delta_plus_one(&self, options: DeltaPlusOneColoring) -> Coloring {
        options.color(self)
    }

    /// Classifies the graph and returns whether it is a Brooks candidate
    fn is_brooks_candidate(&self) -> bool {
        self.classify_brooks().is_candidate()
    }
}

impl<G> GraphColoring for G where G: IndexedAdjacencyList + AdjacencyTest + Sized {}

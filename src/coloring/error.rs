//! Error type of the colorers.

use thiserror::Error;

use super::*;

/// Errors reported by the colorers.
///
/// [`ColoringError::NotBrooks`] is the only precondition rejection; all other variants signal
/// that an internal invariant of the Δ-list-coloring broke, in which case no coloring is
/// returned at all (the palette is never widened).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColoringError {
    /// The graph does not satisfy the preconditions of Brooks' theorem
    #[error("Not a Brooks graph: {0}")]
    NotBrooks(BrooksReason),

    /// The locator found neither an even cycle, a wheel nor a theta graph
    #[error("No even cycle, wheel or theta graph in a block of {block_size} nodes")]
    NoSubstructure { block_size: NumNodes },

    /// A node has neighbors of every color of the palette
    #[error("Node {node} has no free color in [0, {palette})")]
    NoFreeColor { node: Node, palette: NumNodes },

    /// A seed coloring needs more colors than the palette provides
    #[error("Seed color {color} of node {node} exceeds the palette [0, {palette})")]
    PaletteExceeded {
        node: Node,
        color: Color,
        palette: NumNodes,
    },

    /// The Brooks completion found no node with two non-adjacent neighbors whose removal keeps
    /// the component connected
    #[error("No anchor for the Brooks ordering in a component of {component_size} nodes")]
    NoBrooksAnchor { component_size: NumNodes },

    /// Some nodes were left uncolored
    #[error("{uncolored} nodes remained uncolored")]
    Incomplete { uncolored: NumNodes },
}

impl ColoringError {
    /// Creates a [`ColoringError::NoFreeColor`] error.
    pub fn no_free_color(node: Node, palette: NumNodes) -> Self {
        ColoringError::NoFreeColor { node, palette }
    }

    /// Returns *true* for violated internal invariants, i.e. every error except the
    /// precondition rejection [`ColoringError::NotBrooks`].
    ///
    /// # Examples
    /// ```
    /// use brooks_coloring::prelude::*;
    ///
    /// assert!(!ColoringError::NotBrooks(BrooksReason::Complete).is_internal());
    /// assert!(ColoringError::no_free_color(3, 3).is_internal());
    /// ```
    pub fn is_internal(&self) -> bool {
        !matches!(self, ColoringError::NotBrooks(_))
    }
}

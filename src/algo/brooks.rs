use std::fmt::Display;

use super::*;

/// Why a graph does not satisfy the preconditions of Brooks' theorem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrooksReason {
    /// The graph has no nodes
    Empty,
    /// Some node is not reachable from node `0`
    Disconnected,
    /// Every node is adjacent to every other node
    Complete,
    /// The graph is a single cycle of odd length
    OddCycle,
}

impl Display for BrooksReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            BrooksReason::Empty => "graph is empty",
            BrooksReason::Disconnected => "graph is disconnected",
            BrooksReason::Complete => "graph is complete",
            BrooksReason::OddCycle => "graph is an odd cycle",
        };
        f.write_str(text)
    }
}

/// Result of the Brooks classifier.
///
/// A graph is a *Brooks candidate* if it is connected, not complete and not an odd cycle.
/// By Brooks' theorem, such a graph can be colored with `Δ` colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrooksClassification {
    Candidate,
    NotBrooks(BrooksReason),
}

impl BrooksClassification {
    /// Runs the checks in order connectivity, completeness, odd cycle and stops at the first
    /// violated one.
    ///
    /// # Examples
    /// ```
    /// use brooks_coloring::{prelude::*, gens::*};
    ///
    /// let c5 = AdjArrayUndir::cycle(5);
    /// assert_eq!(
    ///     BrooksClassification::classify(&c5),
    ///     BrooksClassification::NotBrooks(BrooksReason::OddCycle)
    /// );
    ///
    /// let c6 = AdjArrayUndir::cycle(6);
    /// assert!(BrooksClassification::classify(&c6).is_candidate());
    /// ```
    pub fn classify<G>(graph: &G) -> Self
    where
        G: AdjacencyList,
    {
        if graph.is_empty() {
            return Self::NotBrooks(BrooksReason::Empty);
        }

        if !graph.is_connected() {
            return Self::NotBrooks(BrooksReason::Disconnected);
        }

        let n = graph.number_of_nodes();
        if graph.degrees().all(|d| d == n - 1) {
            return Self::NotBrooks(BrooksReason::Complete);
        }

        if graph.degrees().all(|d| d == 2) && n % 2 == 1 && ring_length(graph) == n {
            return Self::NotBrooks(BrooksReason::OddCycle);
        }

        Self::Candidate
    }

    /// Returns *true* if the graph satisfies all preconditions
    pub fn is_candidate(&self) -> bool {
        matches!(self, Self::Candidate)
    }

    /// Returns the reason of a rejection or `None` for candidates
    pub fn reason(&self) -> Option<BrooksReason> {
        match self {
            Self::Candidate => None,
            Self::NotBrooks(reason) => Some(*reason),
        }
    }
}

/// Walks along the ring through node `0` (every node has degree 2) and returns the number of
/// nodes visited before the walk returns to `0`.
fn ring_length<G: AdjacencyList>(graph: &G) -> NumNodes {
    let Some(mut cur) = graph.neighbors_of(0).next() else {
        return 1;
    };
    let mut prev = 0;
    let mut length = 1;

    while cur != 0 {
        length += 1;
        let Some(next) = graph.continue_path(prev, cur) else {
            break;
        };
        prev = cur;
        cur = next;
    }

    length
}

/// Provides the Brooks classifier as a method on all graphs
pub trait BrooksTest: AdjacencyList + Sized {
    /// Shorthand for [`BrooksClassification::classify`]
    fn classify_brooks(&self) -> BrooksClassification {
        BrooksClassification::classify(self)
    }
}

impl<G> BrooksTest for G where G: AdjacencyList + Sized {}

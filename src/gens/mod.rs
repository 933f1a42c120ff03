/*!
# Graph Generators

This module provides builders for the graphs used to benchmark and test the colorers.

Each random generator allows parameterized control over structural properties of the graph (number
of nodes, average degree, degree of regularity) and produces either a complete list of edges or a
stream of them through iterators. The typical usage workflow is:

1. Create a generator instance (e.g., `Gnp::new()`).
2. Set parameters using trait methods (e.g., `.nodes(n).prob(p)`).
3. Generate edges via `generate()` or `stream()`.

In addition, the `RandomGraph` trait wraps the generators into constructors of whole graph
instances, and `GraphFamilies` provides the deterministic families that appear as edge cases of
Brooks' theorem (complete graphs, odd cycles, hypercubes, ...).

Supported random models include:
- G(n,p): Erdős–Rényi model with independent edge probability
- Random d-regular graphs via the pairing (configuration) model
*/

use rand::Rng;

use crate::prelude::*;

mod families;
mod gnp;
mod regular;
mod substructures;

pub use families::*;
pub use gnp::*;
pub use regular::*;
pub use substructures::*;

/// Trait for generators that allow setting the number of nodes.
///
/// This is the most common builder trait across all generators.
/// Allows a fluent interface when configuring generators.
pub trait NumNodesGen {
    /// Sets the number of nodes in the graph generator.
    fn nodes(self, n: NumNodes) -> Self;
}

/// Trait for generators that allow setting the average degree.
pub trait AverageDegreeGen {
    /// Set the average degree of this generator.
    fn avg_deg(self, deg: f64) -> Self;
}

/// General trait for a configurable random edge generator.
///
/// Types implementing this trait can produce a complete edge list
/// or a lazily-evaluated stream (iterator) of edges.
/// All produced edges are normalized and free of self-loops.
pub trait GraphGenerator {
    /// Generates a list of random edges.
    ///
    /// This collects the full result from `stream()` into a `Vec<Edge>` as default.
    fn generate<R>(&self, rng: &mut R) -> Vec<Edge>
    where
        R: Rng,
    {
        self.stream(rng).collect()
    }

    /// Creates a lazy iterator (stream) over generated edges.
    ///
    /// Depending on the underlying graph model, this might also be just an iterator over the
    /// already generated list of edges if a direct iterator is not feasible in the model.
    fn stream<R>(&self, rng: &mut R) -> impl Iterator<Item = Edge>
    where
        R: Rng;
}

/// Trait for building full graph instances from common random models.
///
/// Requires that the implementing type supports construction from a set of edges.
/// Provided implementations use the corresponding edge generators under the hood.
pub trait RandomGraph: Sized {
    /// Creates a `G(n,p)` graph using edge probability `p`.
    fn gnp<R>(rng: &mut R, n: NumNodes, p: f64) -> Self
    where
        R: Rng;

    /// Creates a uniformly-ish random `d`-regular graph with `n` nodes.
    /// ** Panics if `n * d` is odd or `d >= n` **
    fn random_regular<R>(rng: &mut R, n: NumNodes, d: NumNodes) -> Self
    where
        R: Rng;
}

impl<G> RandomGraph for G
where
    G: GraphFromScratch,
{
    fn gnp<R>(rng: &mut R, n: NumNodes, p: f64) -> Self
    where
        R: Rng,
    {
        Self::from_edges(n, Gnp::new().nodes(n).prob(p).stream(rng))
    }

    fn random_regular<R>(rng: &mut R, n: NumNodes, d: NumNodes) -> Self
    where
        R: Rng,
    {
        Self::from_edges(n, RandomRegular::new().nodes(n).degree(d).stream(rng))
    }
}

/// Returns *true* if `p` lies in `[0, 1]`
pub(crate) fn is_valid_probability(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}

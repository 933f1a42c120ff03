use fxhash::FxHashSet;
use rand::seq::SliceRandom;

use super::*;

/// Random `d`-regular graphs on `n` nodes.
///
/// Uses the pairing model with the incremental rejection of Steger and Wormald: every node
/// contributes `d` points, and random pairs of points are joined one by one as long as they
/// produce neither a self-loop nor a multi-edge. If the process gets stuck, it restarts. The
/// resulting distribution is asymptotically uniform for fixed `d`.
///
/// # Examples
/// ```
/// use brooks_coloring::{prelude::*, gens::*};
/// use rand::SeedableRng;
/// use rand_pcg::Pcg64Mcg;
///
/// let rng = &mut Pcg64Mcg::seed_from_u64(5);
/// let g = AdjArrayUndir::random_regular(rng, 20, 3);
/// assert!(g.is_regular());
/// assert_eq!(g.max_degree(), 3);
/// ```
#[derive(Debug, Copy, Clone, Default)]
pub struct RandomRegular {
    n: NumNodes,
    d: NumNodes,
}

/// Number of failed pair draws (per remaining point) before the pairing process restarts
const ATTEMPTS_PER_POINT: usize = 32;

impl RandomRegular {
    /// Creates a new empty generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the degree `d` of every node
    pub fn degree(mut self, d: NumNodes) -> Self {
        self.d = d;
        self
    }

    /// Tries to pair all points once; returns `None` if the process got stuck
    fn try_pairing<R: Rng>(&self, rng: &mut R) -> Option<Vec<Edge>> {
        let mut points: Vec<Node> = (0..self.n)
            .flat_map(|u| std::iter::repeat_n(u, self.d as usize))
            .collect();
        points.shuffle(rng);

        let mut edges: FxHashSet<Edge> = FxHashSet::default();
        edges.reserve(points.len() / 2);

        while !points.is_empty() {
            let mut joined = false;

            for _ in 0..ATTEMPTS_PER_POINT * points.len() {
                let i = rng.random_range(0..points.len());
                let j = rng.random_range(0..points.len());
                let edge = Edge(points[i], points[j]).normalized();

                if edge.is_loop() || edges.contains(&edge) {
                    continue;
                }

                edges.insert(edge);
                points.swap_remove(i.max(j));
                points.swap_remove(i.min(j));
                joined = true;
                break;
            }

            if !joined {
                return None;
            }
        }

        let mut edges: Vec<Edge> = edges.into_iter().collect();
        edges.sort_unstable();
        Some(edges)
    }
}

impl NumNodesGen for RandomRegular {
    fn nodes(mut self, n: NumNodes) -> Self {
        self.n = n;
        self
    }
}

impl GraphGenerator for RandomRegular {
    fn generate<R: Rng>(&self, rng: &mut R) -> Vec<Edge> {
        assert!(
            self.d < self.n || (self.n == 0 && self.d == 0),
            "Degree must be smaller than the number of nodes!"
        );
        assert!(
            (self.n as u64 * self.d as u64) % 2 == 0,
            "n * d must be even!"
        );

        loop {
            if let Some(edges) = self.try_pairing(rng) {
                return edges;
            }
        }
    }

    fn stream<R: Rng>(&self, rng: &mut R) -> impl Iterator<Item = Edge> {
        self.generate(rng).into_iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn generates_regular_graphs() {
        let rng = &mut Pcg64Mcg::seed_from_u64(7);

        for (n, d) in [(4, 3), (10, 3), (10, 4), (30, 5), (50, 8), (8, 0)] {
            let graph = AdjArrayUndir::random_regular(rng, n, d);
            assert_eq!(graph.number_of_nodes(), n);
            assert!(graph.is_regular());
            assert_eq!(graph.max_degree(), d);
            assert_eq!(graph.number_of_edges(), n * d / 2);
        }
    }

    #[test]
    #[should_panic]
    fn odd_degree_sum() {
        let rng = &mut Pcg64Mcg::seed_from_u64(7);
        let _ = RandomRegular::new().nodes(5).degree(3).generate(rng);
    }
}

use rand_distr::Geometric;

use super::*;

/// A G(n, p) graph can be defined by either a probability or the average degree which is more
/// common in practice
#[derive(Debug, Copy, Clone, Default)]
enum GnpType {
    /// No value has been set yet
    #[default]
    NotSet,
    /// Direct probability value
    Prob(f64),
    /// Average degree of a node
    AvgDeg(f64),
}

/// `G(n,p)` graphs contain every possible edge between `n` nodes with probability `p`
/// independent from each other.
///
/// Instead of drawing one coin per node pair, the generator jumps over the linearized upper
/// triangle of the adjacency matrix with geometrically distributed step sizes.
///
/// # Examples
/// ```
/// use brooks_coloring::{prelude::*, gens::*};
/// use rand::SeedableRng;
/// use rand_pcg::Pcg64Mcg;
///
/// let rng = &mut Pcg64Mcg::seed_from_u64(1);
/// let edges = Gnp::new().nodes(10).prob(1.0).generate(rng);
/// assert_eq!(edges.len(), 45);
/// assert!(edges.iter().all(|e| e.is_normalized() && !e.is_loop()));
/// ```
#[derive(Debug, Copy, Clone, Default)]
pub struct Gnp {
    n: u64,
    p: GnpType,
}

impl Gnp {
    /// Creates a new empty `G(n,p)` generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates `p` directly
    pub fn prob(mut self, prob: f64) -> Self {
        assert!(is_valid_probability(prob));
        self.p = GnpType::Prob(prob);
        self
    }

    fn probability(&self) -> f64 {
        match self.p {
            GnpType::NotSet => panic!("Probability of Gnp was not set!"),
            GnpType::Prob(p) => p,
            GnpType::AvgDeg(d) => {
                let p = if self.n > 1 {
                    d / (self.n - 1) as f64
                } else {
                    0.0
                };
                assert!(
                    is_valid_probability(p),
                    "The average degree is invalid for the given n!"
                );
                p
            }
        }
    }
}

impl NumNodesGen for Gnp {
    /// Updates `n`
    fn nodes(mut self, n: NumNodes) -> Self {
        self.n = n as u64;
        self
    }
}

impl AverageDegreeGen for Gnp {
    /// Updates `p` such that `p = d/(n-1)`.
    /// Note that this conversion will only be done when calling `stream/generate`.
    fn avg_deg(mut self, deg: f64) -> Self {
        self.p = GnpType::AvgDeg(deg);
        self
    }
}

impl GraphGenerator for Gnp {
    /// Creates a streaming generator over random `G(n,p)` edges
    fn stream<R: Rng>(&self, rng: &mut R) -> impl Iterator<Item = Edge> {
        let p = self.probability();
        let n = self.n;

        // Pairs u < v are numbered row by row; row u holds the n - 1 - u pairs (u, u+1..n).
        // Jumps are increasing, so the current row only ever moves forward.
        let num_pairs = n * n.saturating_sub(1) / 2;
        let mut row = 0u64;
        let mut row_offset = 0u64;

        GeometricJumps::new(p, num_pairs, rng).map(move |idx| {
            while idx >= row_offset + (n - 1 - row) {
                row_offset += n - 1 - row;
                row += 1;
            }
            Edge(row as Node, (row + 1 + idx - row_offset) as Node)
        })
    }
}

/// Iterator over the positions of successes in a sequence of `stop` independent Bernoulli
/// trials with success probability `p`.
struct GeometricJumps<'a, R: Rng> {
    rng: &'a mut R,
    distr: Option<Geometric>,
    cur: u64,
    stop: u64,
}

impl<'a, R: Rng> GeometricJumps<'a, R> {
    fn new(p: f64, stop: u64, rng: &'a mut R) -> Self {
        Self {
            rng,
            distr: (p > 0.0).then(|| Geometric::new(p).ok()).flatten(),
            cur: 0,
            stop,
        }
    }
}

impl<R: Rng> Iterator for GeometricJumps<'_, R> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        let distr = self.distr?;
        let skip: u64 = self.rng.sample(distr);
        let next = self.cur.checked_add(skip)?;
        if next >= self.stop {
            self.cur = self.stop;
            return None;
        }
        self.cur = next + 1;
        Some(next)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn edge_cases() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        assert!(Gnp::new().nodes(20).prob(0.0).generate(rng).is_empty());
        assert!(Gnp::new().nodes(1).prob(1.0).generate(rng).is_empty());

        let mut edges = Gnp::new().nodes(6).prob(1.0).generate(rng);
        edges.sort_unstable();
        let mut expected = Vec::new();
        for u in 0..6 {
            for v in (u + 1)..6 {
                expected.push(Edge(u, v));
            }
        }
        assert_eq!(edges, expected);
    }

    #[test]
    fn average_degree() {
        let rng = &mut Pcg64Mcg::seed_from_u64(4);
        let n = 2000;
        let graph = AdjArrayUndir::from_edges(n, Gnp::new().nodes(n).avg_deg(6.0).stream(rng));

        let avg = 2.0 * graph.number_of_edges() as f64 / n as f64;
        assert!((5.5..6.5).contains(&avg), "average degree {avg}");
    }
}

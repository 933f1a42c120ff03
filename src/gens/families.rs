use super::*;

/// Deterministic graph families.
///
/// Several of them are the boundary cases of Brooks' theorem: complete graphs and odd cycles need
/// `Δ + 1` colors, every other connected graph can be colored with `Δ` colors.
pub trait GraphFamilies: Sized {
    /// The complete graph `K_n`
    fn complete(n: NumNodes) -> Self;

    /// `K_n` without the edge `(0, n-1)`. For `n >= 3` the graph is not regular.
    fn almost_complete(n: NumNodes) -> Self;

    /// The complete bipartite graph `K_{a,b}` with sides `0..a` and `a..a+b`
    fn complete_bipartite(a: NumNodes, b: NumNodes) -> Self;

    /// The path `0 - 1 - ... - (n-1)`
    fn path(n: NumNodes) -> Self;

    /// The cycle `0 - 1 - ... - (n-1) - 0`.
    /// ** Panics if `n < 3` **
    fn cycle(n: NumNodes) -> Self;

    /// The circulant graph on `n` nodes in which `u` and `v` are adjacent iff
    /// `(u - v) mod n` or `(v - u) mod n` is in `offsets`.
    ///
    /// # Examples
    /// ```
    /// use brooks_coloring::{prelude::*, gens::*};
    ///
    /// // the square of C8 is 4-regular
    /// let g = AdjArrayUndir::circulant(8, &[1, 2]);
    /// assert!(g.is_regular());
    /// assert_eq!(g.max_degree(), 4);
    /// ```
    fn circulant(n: NumNodes, offsets: &[NumNodes]) -> Self;

    /// The `dim`-dimensional hypercube with `2^dim` nodes; nodes are adjacent iff their
    /// indices differ in exactly one bit
    fn hypercube(dim: u32) -> Self;

    /// The prism `C_k x K_2`: two `k`-cycles `0..k` and `k..2k` joined by the matching `(i, i+k)`
    fn prism(k: NumNodes) -> Self;

    /// The Petersen graph (outer cycle `0..5`, inner pentagram `5..10`)
    fn petersen() -> Self;

    /// The wheel `W_k`: hub `0` adjacent to all nodes of the rim cycle `1..=k`
    fn wheel(k: NumNodes) -> Self;
}

impl<G> GraphFamilies for G
where
    G: GraphEdgeEditing,
{
    fn complete(n: NumNodes) -> Self {
        let mut graph = Self::new(n);
        graph.connect_clique(0..n);
        graph
    }

    fn almost_complete(n: NumNodes) -> Self {
        let mut graph = Self::complete(n);
        if n >= 2 {
            graph.remove_edge(0, n - 1);
        }
        graph
    }

    fn complete_bipartite(a: NumNodes, b: NumNodes) -> Self {
        let mut graph = Self::new(a + b);
        for u in 0..a {
            for v in a..(a + b) {
                graph.add_edge(u, v);
            }
        }
        graph
    }

    fn path(n: NumNodes) -> Self {
        let mut graph = Self::new(n);
        graph.connect_path(0..n);
        graph
    }

    fn cycle(n: NumNodes) -> Self {
        assert!(n >= 3, "A simple cycle needs at least three nodes!");
        let mut graph = Self::new(n);
        graph.connect_cycle(0..n);
        graph
    }

    fn circulant(n: NumNodes, offsets: &[NumNodes]) -> Self {
        let mut graph = Self::new(n);
        for u in 0..n {
            for &offset in offsets {
                let v = (u + offset % n) % n;
                if u != v {
                    graph.try_add_edge(u, v);
                }
            }
        }
        graph
    }

    fn hypercube(dim: u32) -> Self {
        let n: NumNodes = 1 << dim;
        let mut graph = Self::new(n);
        for u in 0..n {
            for bit in 0..dim {
                let v = u ^ (1 << bit);
                if u < v {
                    graph.add_edge(u, v);
                }
            }
        }
        graph
    }

    fn prism(k: NumNodes) -> Self {
        let mut graph = Self::new(2 * k);
        graph.connect_cycle(0..k);
        graph.connect_cycle(k..2 * k);
        for i in 0..k {
            graph.add_edge(i, i + k);
        }
        graph
    }

    fn petersen() -> Self {
        let mut graph = Self::new(10);
        graph.connect_cycle(0..5);
        graph.connect_cycle([5, 7, 9, 6, 8]);
        for i in 0..5 {
            graph.add_edge(i, i + 5);
        }
        graph
    }

    fn wheel(k: NumNodes) -> Self {
        let mut graph = Self::new(k + 1);
        graph.connect_cycle(1..=k);
        for u in 1..=k {
            graph.add_edge(0, u);
        }
        graph
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn degrees_of_families() {
        let g = AdjArrayUndir::complete(6);
        assert_eq!(g.number_of_edges(), 15);
        assert!(g.is_regular());

        let g = AdjArrayUndir::almost_complete(6);
        assert_eq!(g.number_of_edges(), 14);
        assert_eq!((g.min_degree(), g.max_degree()), (4, 5));

        let g = AdjArrayUndir::complete_bipartite(3, 3);
        assert_eq!(g.number_of_edges(), 9);
        assert!(g.is_regular());

        let g = AdjArrayUndir::hypercube(4);
        assert_eq!(g.number_of_nodes(), 16);
        assert_eq!(g.number_of_edges(), 32);
        assert!(g.is_regular());

        let g = AdjArrayUndir::prism(5);
        assert_eq!(g.number_of_edges(), 15);
        assert_eq!(g.max_degree(), 3);
        assert!(g.is_regular());

        let g = AdjArrayUndir::petersen();
        assert_eq!(g.number_of_edges(), 15);
        assert!(g.is_regular());

        let g = AdjArrayUndir::wheel(5);
        assert_eq!(g.degree_of(0), 5);
        assert_eq!(g.degree_distribution(), vec![(3, 5), (5, 1)]);
    }

    #[test]
    fn circulant_with_antipodal_offset() {
        // offset n/2 contributes a single perfect matching
        let g = AdjArrayUndir::circulant(6, &[1, 3]);
        assert!(g.is_regular());
        assert_eq!(g.max_degree(), 3);
        assert_eq!(g.number_of_edges(), 9);
    }
}

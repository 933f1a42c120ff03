use log::{debug, trace, warn};

use super::*;

/// Δ-list-coloring of Brooks graphs.
///
/// Computes a proper coloring with colors from `[0, Δ)`:
///
/// 1. Graphs that are not regular are colored by the nonregular rule: in every connected
///    component, greedy coloring in reverse BFS order from a node of minimum degree.
/// 2. Regular graphs are first checked by the Brooks classifier (can be disabled); complete
///    graphs, odd cycles and disconnected graphs are rejected with [`ColoringError::NotBrooks`].
/// 3. A nontrivial block is searched for an even cycle, a wheel or a theta graph. Its seed
///    coloring is extended to the whole graph by BFS from the seed, every node taking the smallest
///    free color.
/// 4. If the extension gets stuck, the [`BrooksCompletion`] recolors the graph from scratch
///    (can be disabled, in which case the error of step 3 is returned).
///
/// # Examples
/// ```
/// use brooks_coloring::{prelude::*, gens::*};
///
/// let g = AdjArrayUndir::hypercube(4);
/// let coloring = DeltaListColoring::new().color(&g).unwrap();
/// assert!(coloring.is_proper_for(&g));
/// assert!(coloring.max_color().unwrap() < 4);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DeltaListColoring {
    check_preconditions: bool,
    brooks_completion: bool,
    theta_budget: usize,
}

impl Default for DeltaListColoring {
    fn default() -> Self {
        Self {
            check_preconditions: true,
            brooks_completion: true,
            theta_budget: DEFAULT_THETA_BUDGET,
        }
    }
}

impl DeltaListColoring {
    /// Creates a colorer with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// If set (default), regular graphs are classified before coloring and non-Brooks graphs
    /// are rejected with [`ColoringError::NotBrooks`]
    pub fn set_check_preconditions(&mut self, check: bool) {
        self.check_preconditions = check;
    }

    /// Builder-variant of [`DeltaListColoring::set_check_preconditions`]
    pub fn check_preconditions(mut self, check: bool) -> Self {
        self.set_check_preconditions(check);
        self
    }

    /// If set (default), the [`BrooksCompletion`] takes over when the seed cannot be extended
    pub fn set_brooks_completion(&mut self, enable: bool) {
        self.brooks_completion = enable;
    }

    /// Builder-variant of [`DeltaListColoring::set_brooks_completion`]
    pub fn brooks_completion(mut self, enable: bool) -> Self {
        self.set_brooks_completion(enable);
        self
    }

    /// Number of neighbor inspections the theta search may spend
    pub fn set_theta_budget(&mut self, budget: usize) {
        self.theta_budget = budget;
    }

    /// Builder-variant of [`DeltaListColoring::set_theta_budget`]
    pub fn theta_budget(mut self, budget: usize) -> Self {
        self.set_theta_budget(budget);
        self
    }

    /// Colors the graph with colors from `[0, Δ)`
    pub fn color<G>(&self, graph: &G) -> Result<Coloring, ColoringError>
    where
        G: IndexedAdjacencyList + AdjacencyTest,
    {
        if graph.is_empty() {
            return Ok(Coloring::default());
        }

        let max_degree = graph.max_degree();
        if !graph.is_regular() {
            debug!("graph is not regular (max degree {max_degree}), using the nonregular rule");
            return self.color_nonregular(graph, max_degree);
        }

        if self.check_preconditions {
            if let BrooksClassification::NotBrooks(reason) = graph.classify_brooks() {
                debug!("rejecting {max_degree}-regular graph: {reason}");
                return Err(ColoringError::NotBrooks(reason));
            }
        }

        match self.seed_and_extend(graph, max_degree) {
            Ok(coloring) => Ok(coloring),
            Err(err) if self.brooks_completion && err.is_internal() => {
                warn!("seed-and-extend failed ({err}), falling back to the Brooks completion");
                BrooksCompletion::new(graph, max_degree)
                    .color()
                    .map_err(|completion_err| {
                        debug!("Brooks completion failed as well: {completion_err}");
                        err
                    })
            }
            Err(err) => Err(err),
        }
    }

    /// Nonregular rule applied per connected component. A component without a node of degree
    /// below `Δ` is itself `Δ`-regular; it is handed to the Brooks completion if enabled.
    fn color_nonregular<G>(&self, graph: &G, max_degree: NumNodes) -> Result<Coloring, ColoringError>
    where
        G: IndexedAdjacencyList + AdjacencyTest,
    {
        let mut coloring = Coloring::uncolored(graph.number_of_nodes());
        let mut picker = ColorPicker::new(max_degree);
        let mut completion = None;

        for component in graph.connected_components() {
            let Some(root) = component
                .iter()
                .copied()
                .min_by_key(|&u| (graph.degree_of(u), u))
            else {
                continue;
            };

            if graph.degree_of(root) < max_degree || !self.brooks_completion {
                trace!("component of {} nodes rooted at {root}", component.len());
                color_from_spare_root(graph, &mut coloring, &mut picker, root)?;
            } else {
                debug!(
                    "component of {} nodes is {max_degree}-regular, using the Brooks completion",
                    component.len()
                );
                completion
                    .get_or_insert_with(|| BrooksCompletion::new(graph, max_degree))
                    .color_component(&component, &mut coloring)?;
            }
        }

        Ok(coloring)
    }

    /// Block finder, substructure locator, seed colorer and extender
    fn seed_and_extend<G>(&self, graph: &G, max_degree: NumNodes) -> Result<Coloring, ColoringError>
    where
        G: IndexedAdjacencyList + AdjacencyTest,
    {
        let block = graph.find_nontrivial_block();
        let substructure = SubstructureSearch::new(graph, &block)
            .theta_budget(self.theta_budget)
            .find()
            .ok_or(ColoringError::NoSubstructure {
                block_size: block.len() as NumNodes,
            })?;

        debug!(
            "found {} with {} nodes in a block of {} nodes",
            substructure.kind(),
            substructure.nodes().len(),
            block.len()
        );

        let mut coloring = Coloring::uncolored(graph.number_of_nodes());
        for (u, color) in substructure.seed_colors() {
            if color >= max_degree {
                return Err(ColoringError::PaletteExceeded {
                    node: u,
                    color,
                    palette: max_degree,
                });
            }
            coloring.set_color(u, color);
        }

        extend_coloring(graph, &mut coloring, max_degree)?;
        Ok(coloring)
    }
}

/// Extends a partial coloring to the whole graph: a BFS started simultaneously at all colored
/// nodes visits the uncolored nodes by increasing distance to the colored ones, and each receives
/// the smallest color of `[0, palette)` not used by its colored neighbors. Parts of the graph
/// not reachable from a colored node are handled by restarting the BFS at their smallest node.
///
/// Fails with [`ColoringError::NoFreeColor`] instead of widening the palette.
///
/// # Examples
/// ```
/// use brooks_coloring::{prelude::*, gens::*};
///
/// let g = AdjArrayUndir::cycle(6);
/// let mut coloring = Coloring::uncolored(6);
/// coloring.set_color(0, 0);
/// coloring.set_color(1, 1);
///
/// extend_coloring(&g, &mut coloring, 2).unwrap();
/// assert_eq!(coloring.colors(), &[0, 1, 0, 1, 0, 1]);
///
/// let mut stuck = Coloring::uncolored(6);
/// stuck.set_color(0, 0);
/// stuck.set_color(3, 0);
/// assert!(extend_coloring(&g, &mut stuck, 2).is_err());
/// ```
pub fn extend_coloring<G>(
    graph: &G,
    coloring: &mut Coloring,
    palette: NumNodes,
) -> Result<(), ColoringError>
where
    G: AdjacencyList,
{
    let mut picker = ColorPicker::new(palette);
    let sources: Vec<Node> = graph.vertices().filter(|&u| coloring.is_colored(u)).collect();
    let mut bfs = graph.bfs_from_sources(sources);

    loop {
        color_in_order(graph, coloring, &mut picker, bfs.by_ref())?;

        if !bfs.try_restart_at_unvisited() {
            break;
        }
    }

    match coloring.number_of_uncolored() {
        0 => Ok(()),
        uncolored => Err(ColoringError::Incomplete { uncolored }),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{gens::*, repr::*, testing::*};
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn empty_graph() {
        let coloring = AdjArrayUndir::new(0).color_delta_regular().unwrap();
        assert!(coloring.is_empty());
        assert_eq!(coloring.number_of_colors(), 0);
    }

    #[test]
    fn path_uses_two_colors() {
        let graph = AdjArrayUndir::path(6);
        let coloring = graph.color_delta_regular().unwrap();
        assert_proper_within(&graph, &coloring, 2);
        assert_eq!(coloring.number_of_colors(), 2);
    }

    #[test]
    fn almost_complete_graph() {
        let graph = AdjArrayUndir::almost_complete(6);
        assert_eq!(graph.max_degree(), 5);
        let coloring = graph.color_delta_regular().unwrap();
        assert_proper_within(&graph, &coloring, 5);
    }

    #[test]
    fn rejects_non_brooks_graphs() {
        assert_eq!(
            AdjArrayUndir::complete(5).color_delta_regular(),
            Err(ColoringError::NotBrooks(BrooksReason::Complete))
        );
        assert_eq!(
            AdjArrayUndir::cycle(7).color_delta_regular(),
            Err(ColoringError::NotBrooks(BrooksReason::OddCycle))
        );

        let mut two_triangles = AdjArrayUndir::new(6);
        two_triangles.connect_cycle(0..3);
        two_triangles.connect_cycle(3..6);
        assert_eq!(
            two_triangles.color_delta_regular(),
            Err(ColoringError::NotBrooks(BrooksReason::Disconnected))
        );
    }

    #[test]
    fn unchecked_complete_graph_is_fatal() {
        let result = DeltaListColoring::new()
            .check_preconditions(false)
            .color(&AdjArrayUndir::complete(4));
        let err = result.unwrap_err();
        assert!(err.is_internal());

        let result = DeltaListColoring::new()
            .check_preconditions(false)
            .brooks_completion(false)
            .color(&AdjArrayUndir::cycle(5));
        assert_eq!(
            result,
            Err(ColoringError::PaletteExceeded {
                node: 2,
                color: 2,
                palette: 2
            })
        );
    }

    #[test]
    fn missing_substructure_is_fatal() {
        // K2 is 1-regular: its only block has two nodes and no room for any substructure
        let result = DeltaListColoring::new()
            .check_preconditions(false)
            .brooks_completion(false)
            .color(&AdjArrayUndir::complete(2));
        assert_eq!(result, Err(ColoringError::NoSubstructure { block_size: 2 }));
        assert!(result.unwrap_err().is_internal());
    }

    #[test]
    fn seed_and_extend_without_completion() {
        let graphs = vec![
            AdjArrayUndir::cycle(10),
            AdjArrayUndir::hypercube(3),
            AdjArrayUndir::hypercube(5),
            AdjArrayUndir::prism(6),
            AdjArrayUndir::petersen(),
        ];

        let colorer = DeltaListColoring::new().brooks_completion(false);
        for graph in graphs {
            let coloring = colorer.color(&graph).unwrap();
            assert_proper_within(&graph, &coloring, graph.max_degree());
        }
    }

    #[test]
    fn completion_takes_over_stuck_extension() {
        // the seed 1 2 5 4 leaves node 3 between the colors 0, 1 and 2
        let graph = AdjArrayUndir::prism(3);
        assert_eq!(
            DeltaListColoring::new()
                .brooks_completion(false)
                .color(&graph),
            Err(ColoringError::NoFreeColor {
                node: 3,
                palette: 3
            })
        );

        let coloring = graph.color_delta_regular().unwrap();
        assert_proper_within(&graph, &coloring, 3);
    }

    #[test]
    fn sparse_representation_gives_same_coloring() {
        let dense = AdjArrayUndir::petersen();
        let sparse = SparseAdjArrayUndir::petersen();
        assert_eq!(dense.color_delta_regular(), sparse.color_delta_regular());
        assert_proper_within(&sparse, &sparse.color_delta_regular().unwrap(), 3);
    }

    #[test]
    fn regular_families() {
        let graphs = vec![
            AdjArrayUndir::cycle(4),
            AdjArrayUndir::cycle(10),
            AdjArrayUndir::petersen(),
            AdjArrayUndir::prism(3),
            AdjArrayUndir::prism(6),
            AdjArrayUndir::hypercube(3),
            AdjArrayUndir::hypercube(5),
            AdjArrayUndir::complete_bipartite(4, 4),
            AdjArrayUndir::circulant(9, &[1, 2]),
            AdjArrayUndir::circulant(11, &[1, 3, 4]),
            AdjArrayUndir::circulant(8, &[1, 4]),
        ];

        for graph in graphs {
            assert!(graph.is_regular());
            let coloring = graph.color_delta_regular().unwrap();
            assert_proper_within(&graph, &coloring, graph.max_degree());
        }
    }

    #[test]
    fn random_regular_graphs() {
        let rng = &mut Pcg64Mcg::seed_from_u64(2024);

        for (n, d) in [(10, 3), (16, 3), (30, 4), (40, 5), (50, 6), (24, 3), (100, 3)] {
            for _ in 0..5 {
                let graph = AdjArrayUndir::random_regular(rng, n, d);
                match graph.classify_brooks() {
                    BrooksClassification::Candidate => {
                        let coloring = graph.color_delta_regular().unwrap();
                        assert_proper_within(&graph, &coloring, d);
                    }
                    BrooksClassification::NotBrooks(reason) => {
                        assert_eq!(
                            graph.color_delta_regular(),
                            Err(ColoringError::NotBrooks(reason))
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn disconnected_nonregular_graph() {
        // K4 plus a path: Δ = 3 but the K4 component needs 4 colors
        let mut graph = AdjArrayUndir::new(7);
        graph.connect_clique(0..4);
        graph.connect_path(4..7);
        assert!(matches!(
            graph.color_delta_regular(),
            Err(ColoringError::NoBrooksAnchor { component_size: 4 })
        ));

        // prism plus a path: the regular component goes through the completion
        let mut graph = AdjArrayUndir::new(9);
        graph.connect_cycle(0..3);
        graph.connect_cycle(3..6);
        graph.add_edges([(0, 3), (1, 4), (2, 5)]);
        graph.connect_path(6..9);
        let coloring = graph.color_delta_regular().unwrap();
        assert_proper_within(&graph, &coloring, 3);

        // even cycle plus a path
        let mut graph = AdjArrayUndir::new(9);
        graph.connect_cycle(0..6);
        graph.connect_path(6..9);
        let coloring = graph.color_delta_regular().unwrap();
        assert_proper_within(&graph, &coloring, 2);
    }

    #[test]
    fn extension_restarts_in_other_components() {
        let mut graph = AdjArrayUndir::new(7);
        graph.connect_cycle(0..4);
        graph.connect_path(4..7);

        let mut coloring = Coloring::uncolored(7);
        coloring.set_color(0, 0);
        extend_coloring(&graph, &mut coloring, 2).unwrap();
        assert_proper_within(&graph, &coloring, 2);
    }
}

use log::{debug, trace};

use super::*;

/// Ordering-based `Δ`-coloring of graphs whose components are not complete and not odd cycles.
///
/// Every connected component is colored independently by the first rule that applies:
///
/// 1. **Spare degree**: some node has degree below the palette size. Coloring greedily in
///    reverse BFS order from that node never gets stuck.
/// 2. **Bipartite**: the component is two-colored by BFS parity.
/// 3. **Cut vertex**: the component is split at an articulation point `c`. Each piece together
///    with `c` is colored from `c` as in rule 1 (`c` has spare degree inside every piece) and the
///    pieces are glued by permuting colors so that `c` receives the same color everywhere.
/// 4. **Anchor**: a node `v` with two non-adjacent neighbors `x`, `y` such that the component
///    stays connected without `x` and `y`. Both `x` and `y` get color `0`, the rest is colored in
///    reverse BFS order from `v`; the final node `v` sees `x` and `y` with the same color.
///
/// If none applies, the component is complete or an odd cycle and the
/// coloring fails with [`ColoringError::NoBrooksAnchor`].
///
/// # Examples
/// ```
/// use brooks_coloring::{prelude::*, gens::*};
///
/// let g = AdjArrayUndir::petersen();
/// let coloring = BrooksCompletion::new(&g, 3).color().unwrap();
/// assert!(coloring.is_proper_for(&g));
/// assert!(coloring.max_color().unwrap() < 3);
/// ```
pub struct BrooksCompletion<'a, G>
where
    G: IndexedAdjacencyList + AdjacencyTest,
{
    graph: &'a G,
    palette: NumNodes,
    articulation_points: NodeBitSet,
    bipartition: NodeBitSet,
}

impl<'a, G> BrooksCompletion<'a, G>
where
    G: IndexedAdjacencyList + AdjacencyTest,
{
    /// Prepares the completion of `graph` with colors `[0, palette)`
    pub fn new(graph: &'a G, palette: NumNodes) -> Self {
        Self {
            graph,
            palette,
            articulation_points: graph.articulation_points(),
            bipartition: graph.propose_bipartition(),
        }
    }

    /// Colors the whole graph
    pub fn color(&self) -> Result<Coloring, ColoringError> {
        let mut coloring = Coloring::uncolored(self.graph.number_of_nodes());
        for component in self.graph.connected_components() {
            self.color_component(&component, &mut coloring)?;
        }

        debug_assert!(coloring.is_complete());
        Ok(coloring)
    }

    /// Colors all nodes of `component`, which must be a connected component of the graph.
    /// Colors of nodes outside the component are left untouched.
    pub fn color_component(
        &self,
        component: &[Node],
        coloring: &mut Coloring,
    ) -> Result<(), ColoringError> {
        let mut picker = ColorPicker::new(self.palette);

        if let Some(root) = component
            .iter()
            .copied()
            .filter(|&u| self.graph.degree_of(u) < self.palette)
            .min_by_key(|&u| (self.graph.degree_of(u), u))
        {
            trace!("component of {} nodes: spare degree at {root}", component.len());
            return color_from_spare_root(self.graph, coloring, &mut picker, root);
        }

        if self.palette >= 2 && self.is_bipartite_component(component) {
            trace!("component of {} nodes: bipartite", component.len());
            for &u in component {
                coloring.set_color(u, self.bipartition.get_bit(u) as Color);
            }
            return Ok(());
        }

        let mut outside = self.graph.vertex_bitset_set();
        for &u in component {
            outside.clear_bit(u);
        }

        if let Some(cut) = component
            .iter()
            .copied()
            .find(|&u| self.articulation_points.get_bit(u))
        {
            trace!("component of {} nodes: cut vertex {cut}", component.len());
            return self.color_at_cut_vertex(cut, &outside, coloring, &mut picker);
        }

        let Some((v, x, y)) = self.find_anchor(component, &outside) else {
            return Err(ColoringError::NoBrooksAnchor {
                component_size: component.len() as NumNodes,
            });
        };

        debug!("component of {} nodes: anchor {v} with {x}, {y}", component.len());
        coloring.set_color(x, 0);
        coloring.set_color(y, 0);

        let order = reverse_bfs_order(
            self.graph,
            v,
            outside.iter_set_bits().chain([x, y]),
        );
        color_in_order(self.graph, coloring, &mut picker, order)
    }

    fn is_bipartite_component(&self, component: &[Node]) -> bool {
        component.iter().all(|&u| {
            self.graph
                .neighbors_of(u)
                .all(|v| self.bipartition.get_bit(u) != self.bipartition.get_bit(v))
        })
    }

    /// Colors the pieces of the component hanging at `cut` one after another and aligns the
    /// color of `cut` across them
    fn color_at_cut_vertex(
        &self,
        cut: Node,
        outside: &NodeBitSet,
        coloring: &mut Coloring,
        picker: &mut ColorPicker,
    ) -> Result<(), ColoringError> {
        let mut target = None;

        let pieces = self
            .graph
            .connected_components_exclude_nodes(outside.iter_set_bits().chain([cut]))
            .collect_vec();

        for piece in pieces {
            let mut not_in_piece = self.graph.vertex_bitset_set();
            for &u in &piece {
                not_in_piece.clear_bit(u);
            }
            not_in_piece.clear_bit(cut);

            coloring.clear_color(cut);
            let order = reverse_bfs_order(self.graph, cut, not_in_piece.iter_set_bits());
            color_in_order(
                self.graph,
                coloring,
                picker,
                order.iter().copied().filter(|&u| u != cut),
            )?;

            let color = picker
                .smallest_free(
                    coloring,
                    self.graph
                        .neighbors_of(cut)
                        .filter(|&u| !not_in_piece.get_bit(u)),
                )
                .ok_or_else(|| ColoringError::no_free_color(cut, picker.palette()))?;

            match target {
                None => target = Some(color),
                Some(t) if t != color => {
                    trace!("swapping colors {color} and {t} on a piece of {} nodes", piece.len());
                    coloring.swap_colors_on(piece.iter().copied(), color, t);
                }
                Some(_) => {}
            }
        }

        if let Some(t) = target {
            coloring.set_color(cut, t);
        }
        Ok(())
    }

    /// Finds `(v, x, y)` with `x`, `y` non-adjacent neighbors of `v` such that the component
    /// remains connected after removing `x` and `y`
    fn find_anchor(&self, component: &[Node], outside: &NodeBitSet) -> Option<(Node, Node, Node)> {
        let remaining = component.len().checked_sub(2)?;

        component
            .iter()
            .copied()
            .sorted_unstable()
            .find_map(|v| {
                let neighbors = self.graph.neighbors_of(v).collect_vec();
                neighbors
                    .iter()
                    .copied()
                    .tuple_combinations()
                    .find(|&(x, y)| {
                        !self.graph.has_edge(x, y)
                            && self
                                .graph
                                .bfs(v)
                                .with_nodes_excluded(outside.iter_set_bits().chain([x, y]))
                                .count()
                                == remaining
                    })
                    .map(|(x, y)| (v, x, y))
            })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{gens::*, repr::*, testing::*};

    #[test]
    fn regular_families() {
        let graphs = [
            (AdjArrayUndir::petersen(), 3),
            (AdjArrayUndir::prism(5), 3),
            (AdjArrayUndir::hypercube(3), 3),
            (AdjArrayUndir::cycle(8), 2),
            (AdjArrayUndir::circulant(9, &[1, 2]), 4),
            (AdjArrayUndir::complete_bipartite(3, 3), 3),
        ];

        for (graph, palette) in graphs {
            let coloring = BrooksCompletion::new(&graph, palette).color().unwrap();
            assert_proper_within(&graph, &coloring, palette);
        }
    }

    #[test]
    fn complete_graphs_and_odd_cycles_fail() {
        let k4 = AdjArrayUndir::complete(4);
        assert_eq!(
            BrooksCompletion::new(&k4, 3).color(),
            Err(ColoringError::NoBrooksAnchor { component_size: 4 })
        );

        let c5 = AdjArrayUndir::cycle(5);
        assert_eq!(
            BrooksCompletion::new(&c5, 2).color(),
            Err(ColoringError::NoBrooksAnchor { component_size: 5 })
        );
    }

    #[test]
    fn cut_vertex_glues_pieces() {
        // two copies of K5 minus an edge, the endpoints of the missing edges attached to node 0
        let mut graph = AdjArrayUndir::new(11);
        for offset in [1, 6] {
            graph.connect_clique(offset..offset + 5);
            graph.remove_edge(offset, offset + 1);
            graph.add_edges([(0, offset), (0, offset + 1)]);
        }
        assert!(graph.vertices().all(|u| graph.degree_of(u) == 4));

        let completion = BrooksCompletion::new(&graph, 4);
        assert!(completion.articulation_points.get_bit(0));

        let coloring = completion.color().unwrap();
        assert_proper_within(&graph, &coloring, 4);
    }

    #[test]
    fn bipartite_component_uses_two_colors() {
        let graph = AdjArrayUndir::hypercube(3);
        let coloring = BrooksCompletion::new(&graph, 3).color().unwrap();
        assert_proper_within(&graph, &coloring, 2);
    }

    #[test]
    fn anchor_ordering() {
        // prism over a triangle: node 0 has the non-adjacent neighbors 1 and 3
        let graph = AdjArrayUndir::prism(3);
        let completion = BrooksCompletion::new(&graph, 3);
        let outside = graph.vertex_bitset_unset();

        assert_eq!(
            completion.find_anchor(&graph.vertices().collect_vec(), &outside),
            Some((0, 1, 3))
        );

        let coloring = completion.color().unwrap();
        assert_proper_within(&graph, &coloring, 3);
        assert_eq!(coloring.color_of(1), Some(0));
        assert_eq!(coloring.color_of(3), Some(0));
    }

    #[test]
    fn other_components_are_untouched() {
        let mut graph = AdjArrayUndir::new(10);
        graph.connect_cycle(0..6);
        graph.connect_clique(6..10);

        let completion = BrooksCompletion::new(&graph, 2);
        let mut coloring = Coloring::uncolored(10);
        completion
            .color_component(&[0, 1, 2, 3, 4, 5], &mut coloring)
            .unwrap();

        assert_eq!(coloring.number_of_uncolored(), 4);
        assert!((0..6).all(|u| coloring.color_of(u).is_some_and(|c| c < 2)));
        assert!((6..10).all(|u| !coloring.is_colored(u)));
        assert!(coloring.conflicts(&graph).is_empty());
    }
}

use crate::prelude::*;

/// Asserts that `coloring` is a complete and proper coloring of `graph` using only colors
/// from `[0, palette)`
#[track_caller]
pub(crate) fn assert_proper_within<G: AdjacencyList>(graph: &G, coloring: &Coloring, palette: NumNodes) {
    assert_eq!(coloring.len(), graph.len(), "coloring does not cover the graph");
    assert!(
        coloring.conflicts(graph).is_empty(),
        "monochromatic edges: {:?}",
        coloring.conflicts(graph)
    );
    assert!(coloring.is_proper_for(graph), "coloring is incomplete");

    if let Some(max) = coloring.max_color() {
        assert!(max < palette, "color {max} exceeds the palette [0, {palette})");
    }
}

use log::debug;
use rand::{
    Rng, SeedableRng,
    seq::{IndexedRandom, SliceRandom},
};
use rand_pcg::Pcg64Mcg;

use super::*;

/// Greedy `(Δ + 1)`-coloring.
///
/// The nodes are processed in some order (random by default) and every node receives a color
/// from `[0, Δ]` that none of its already colored neighbors uses: the smallest one, or a
/// uniformly random one if `random_tiebreak` is set. As a node has at most `Δ` neighbors,
/// a free color always exists.
///
/// Randomness comes from a locally owned [`Pcg64Mcg`] seeded with `seed` (or from the operating
/// system if no seed is given); [`DeltaPlusOneColoring::color_with_rng`] accepts any
/// caller-owned generator instead.
///
/// # Examples
/// ```
/// use brooks_coloring::{prelude::*, gens::*};
///
/// let g = AdjArrayUndir::complete(5);
/// let coloring = DeltaPlusOneColoring::new().seed(Some(3)).color(&g);
/// assert!(coloring.is_proper_for(&g));
/// assert_eq!(coloring.number_of_colors(), 5);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DeltaPlusOneColoring {
    seed: Option<u64>,
    randomize_order: bool,
    random_tiebreak: bool,
}

impl Default for DeltaPlusOneColoring {
    fn default() -> Self {
        Self {
            seed: None,
            randomize_order: true,
            random_tiebreak: false,
        }
    }
}

impl DeltaPlusOneColoring {
    /// Creates a colorer with default options (no seed, random order, smallest free color)
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the seed of the internal generator; `None` seeds from the operating system
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    /// Builder-variant of [`DeltaPlusOneColoring::set_seed`]
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.set_seed(seed);
        self
    }

    /// If set, nodes are processed in a uniformly random order, otherwise in ascending order
    pub fn set_randomize_order(&mut self, randomize: bool) {
        self.randomize_order = randomize;
    }

    /// Builder-variant of [`DeltaPlusOneColoring::set_randomize_order`]
    pub fn randomize_order(mut self, randomize: bool) -> Self {
        self.set_randomize_order(randomize);
        self
    }

    /// If set, every node gets a uniformly random free color instead of the smallest one
    pub fn set_random_tiebreak(&mut self, random: bool) {
        self.random_tiebreak = random;
    }

    /// Builder-variant of [`DeltaPlusOneColoring::set_random_tiebreak`]
    pub fn random_tiebreak(mut self, random: bool) -> Self {
        self.set_random_tiebreak(random);
        self
    }

    /// Colors the graph using the internal generator
    pub fn color<G>(&self, graph: &G) -> Coloring
    where
        G: AdjacencyList,
    {
        let mut rng = match self.seed {
            Some(seed) => Pcg64Mcg::seed_from_u64(seed),
            None => Pcg64Mcg::from_os_rng(),
        };
        self.color_with_rng(graph, &mut rng)
    }

    /// Colors the graph drawing all random decisions from `rng`
    pub fn color_with_rng<G, R>(&self, graph: &G, rng: &mut R) -> Coloring
    where
        G: AdjacencyList,
        R: Rng,
    {
        let palette = graph.max_degree() + 1;
        let mut coloring = Coloring::uncolored(graph.number_of_nodes());
        let mut picker = ColorPicker::new(palette);

        let mut order: Vec<Node> = graph.vertices().collect();
        if self.randomize_order {
            order.shuffle(rng);
        }

        for u in order {
            let color = if self.random_tiebreak {
                picker
                    .free_colors(&coloring, graph.neighbors_of(u))
                    .choose(rng)
                    .copied()
            } else {
                picker.smallest_free(&coloring, graph.neighbors_of(u))
            };
            coloring.set_color(
                u,
                color.expect("a node with at most Δ neighbors has a free color in [0, Δ]"),
            );
        }

        debug!(
            "greedy coloring used {} of {} colors",
            coloring.number_of_colors(),
            palette
        );
        coloring
    }
}

/// Colors the nodes of `order` one after another with the smallest color not used by their
/// colored neighbors. Nodes that already have a color keep it.
pub(crate) fn color_in_order<G, I>(
    graph: &G,
    coloring: &mut Coloring,
    picker: &mut ColorPicker,
    order: I,
) -> Result<(), ColoringError>
where
    G: AdjacencyList,
    I: IntoIterator<Item = Node>,
{
    for u in order {
        if coloring.is_colored(u) {
            continue;
        }

        let color = picker
            .smallest_free(coloring, graph.neighbors_of(u))
            .ok_or_else(|| ColoringError::no_free_color(u, picker.palette()))?;
        coloring.set_color(u, color);
    }

    Ok(())
}

/// Returns the nodes reachable from `root` without entering `excluded` in **reverse** BFS order,
/// i.e. `root` comes last and every other node precedes its BFS parent.
///
/// Coloring greedily in this order never fails at a node other than `root` if the palette has
/// `Δ` colors: when a node is colored, its BFS parent is still uncolored.
pub(crate) fn reverse_bfs_order<G, I>(graph: &G, root: Node, excluded: I) -> Vec<Node>
where
    G: AdjacencyList,
    I: IntoIterator<Item = Node>,
{
    let mut order = graph.bfs(root).with_nodes_excluded(excluded).collect_vec();
    order.reverse();
    order
}

/// The nonregular rule: colors the component of `root` in reverse BFS order from `root` with
/// palette `[0, Δ)`. Succeeds whenever `root` has degree below `Δ`.
pub(crate) fn color_from_spare_root<G>(
    graph: &G,
    coloring: &mut Coloring,
    picker: &mut ColorPicker,
    root: Node,
) -> Result<(), ColoringError>
where
    G: AdjacencyList,
{
    let order = reverse_bfs_order(graph, root, std::iter::empty());
    color_in_order(graph, coloring, picker, order)
}

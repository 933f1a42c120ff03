/*!
Locating the seed substructures of the Δ-list-coloring inside a block.

Three kinds of substructures are searched in fixed order:
- an **even cycle** whose alternating `0, 1` coloring is proper,
- a **wheel**: a hub together with a chordless path (the rim) between two of its neighbors,
- a **theta graph**: two terminals joined by three internally disjoint paths.

Each kind comes with a canonical seed coloring (see [`Substructure::seed_colors`]) that the
locator only accepts if it is proper for the surrounding graph.
*/

use itertools::Itertools;
use log::trace;

use super::*;

/// Default number of neighbor inspections the theta search may spend over all terminal pairs
pub const DEFAULT_THETA_BUDGET: usize = 1 << 18;

/// Number of even cycles the DFS may reject before giving up in favor of the wheel search
const EVEN_CYCLE_ATTEMPTS: usize = 64;

/// A seed substructure found inside a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substructure {
    /// A simple cycle of even length (at least 4); `cycle[0]` is the DFS ancestor
    EvenCycle { cycle: Vec<Node> },
    /// A hub and a rim path between two of its neighbors that avoids the hub
    Wheel { hub: Node, rim: Vec<Node> },
    /// Terminals `u` and `v` and three internally disjoint paths `u -> v` (endpoints included)
    Theta {
        u: Node,
        v: Node,
        paths: Vec<Vec<Node>>,
    },
}

impl Substructure {
    /// Short name used in log messages
    pub fn kind(&self) -> &'static str {
        match self {
            Substructure::EvenCycle { .. } => "even cycle",
            Substructure::Wheel { .. } => "wheel",
            Substructure::Theta { .. } => "theta graph",
        }
    }

    /// Returns all nodes of the substructure (terminals of a theta graph only once)
    pub fn nodes(&self) -> Vec<Node> {
        self.seed_colors().into_iter().map(|(u, _)| u).collect()
    }

    /// Returns the canonical seed coloring:
    /// - even cycle: `0, 1, 0, 1, ...` by position,
    /// - wheel: hub `0`, rim `1, 2, 1, 2, ...` by position,
    /// - theta: `u -> 0`, `v -> 1`, interior nodes `2, 3, 2, 3, ...` by position along each path.
    ///
    /// # Examples
    /// ```
    /// use brooks_coloring::algo::Substructure;
    ///
    /// let wheel = Substructure::Wheel { hub: 4, rim: vec![0, 1, 2] };
    /// assert_eq!(wheel.seed_colors(), vec![(4, 0), (0, 1), (1, 2), (2, 1)]);
    /// ```
    pub fn seed_colors(&self) -> Vec<(Node, Color)> {
        match self {
            Substructure::EvenCycle { cycle } => cycle
                .iter()
                .enumerate()
                .map(|(i, &x)| (x, (i % 2) as Color))
                .collect(),

            Substructure::Wheel { hub, rim } => std::iter::once((*hub, 0))
                .chain(
                    rim.iter()
                        .enumerate()
                        .map(|(i, &x)| (x, 1 + (i % 2) as Color)),
                )
                .collect(),

            Substructure::Theta { u, v, paths } => {
                let mut colors = vec![(*u, 0), (*v, 1)];
                for path in paths {
                    let interior = &path[1..path.len() - 1];
                    colors.extend(
                        interior
                            .iter()
                            .enumerate()
                            .map(|(i, &x)| (x, 2 + (i % 2) as Color)),
                    );
                }
                colors
            }
        }
    }

    /// Returns *true* if the seed coloring assigns exactly one color per node and no edge of
    /// `graph` joins two seeded nodes of the same color (chords included)
    pub fn is_proper_seed<G>(&self, graph: &G) -> bool
    where
        G: AdjacencyList,
    {
        self.is_proper_seed_in(graph, &mut vec![UNCOLORED; graph.len()])
    }

    /// Same as [`Substructure::is_proper_seed`] with a caller-owned color table indexed by node.
    /// `colors` must be all [`UNCOLORED`] and is left that way.
    fn is_proper_seed_in<G>(&self, graph: &G, colors: &mut [Color]) -> bool
    where
        G: AdjacencyList,
    {
        let seed = self.seed_colors();
        let mut proper = true;
        for &(u, c) in &seed {
            proper &= colors[u as usize] == UNCOLORED;
            colors[u as usize] = c;
        }

        proper = proper
            && seed
                .iter()
                .all(|&(u, c)| graph.neighbors_of(u).all(|v| colors[v as usize] != c));

        for &(u, _) in &seed {
            colors[u as usize] = UNCOLORED;
        }
        proper
    }
}

/// Search for a seed substructure inside a node set (usually a nontrivial block).
///
/// All searches only use nodes of the block; edges leaving the block are ignored except for the
/// properness check of the seed coloring, which considers every edge of the graph.
///
/// # Examples
/// ```
/// use brooks_coloring::{prelude::*, algo::*, gens::*};
///
/// let g = AdjArrayUndir::cycle(6);
/// let block = g.find_nontrivial_block();
/// let found = SubstructureSearch::new(&g, &block).find();
/// assert!(matches!(found, Some(Substructure::EvenCycle { .. })));
/// ```
pub struct SubstructureSearch<'a, G>
where
    G: IndexedAdjacencyList,
{
    graph: &'a G,
    block: Vec<Node>,
    in_block: NodeBitSet,
    theta_budget: usize,
}

impl<'a, G> SubstructureSearch<'a, G>
where
    G: IndexedAdjacencyList,
{
    /// Creates a search restricted to the nodes of `block`
    pub fn new(graph: &'a G, block: &[Node]) -> Self {
        let mut block = block.to_vec();
        block.sort_unstable();
        block.dedup();

        Self {
            graph,
            in_block: NodeBitSet::new_with_bits_set(graph.number_of_nodes(), block.iter().copied()),
            block,
            theta_budget: DEFAULT_THETA_BUDGET,
        }
    }

    /// Updates the number of neighbor inspections the theta search may spend
    pub fn set_theta_budget(&mut self, budget: usize) {
        self.theta_budget = budget;
    }

    /// Builder-variant of [`SubstructureSearch::set_theta_budget`]
    pub fn theta_budget(mut self, budget: usize) -> Self {
        self.set_theta_budget(budget);
        self
    }

    /// Runs the searches in order even cycle, wheel, theta graph and returns the first hit
    pub fn find(&self) -> Option<Substructure> {
        self.find_even_cycle()
            .or_else(|| self.find_wheel())
            .or_else(|| self.find_theta())
    }

    /// DFS through the block tracking depth and parent. A back edge from `v` to an ancestor `u`
    /// closes the cycle `u ... v` of length `depth(v) - depth(u) + 1`; the first such cycle of
    /// even length whose alternating coloring is proper is returned (ancestor first).
    /// Gives up after a fixed number of rejected cycles.
    pub fn find_even_cycle(&self) -> Option<Substructure> {
        let &root = self.block.first()?;

        let n = self.graph.len();
        let mut colors = vec![UNCOLORED; n];
        let mut attempts = 0;
        let mut depth = vec![INVALID_NODE; n];
        let mut parent = vec![INVALID_NODE; n];
        let mut on_path = self.graph.vertex_bitset_unset();

        // (node, index of next neighbor)
        let mut stack: Vec<(Node, NumNodes)> = vec![(root, 0)];
        depth[root as usize] = 0;
        on_path.set_bit(root);

        while let Some(top) = stack.last_mut() {
            let v = top.0;
            if top.1 == self.graph.degree_of(v) {
                on_path.clear_bit(v);
                stack.pop();
                continue;
            }

            let w = self.graph.ith_neighbor(v, top.1);
            top.1 += 1;

            if !self.in_block.get_bit(w) || w == parent[v as usize] {
                continue;
            }

            if depth[w as usize] == INVALID_NODE {
                depth[w as usize] = depth[v as usize] + 1;
                parent[w as usize] = v;
                on_path.set_bit(w);
                stack.push((w, 0));
                continue;
            }

            if !on_path.get_bit(w) {
                continue;
            }

            let length = depth[v as usize] - depth[w as usize] + 1;
            if length % 2 != 0 {
                continue;
            }

            let mut cycle = Vec::with_capacity(length as usize);
            let mut x = v;
            while x != w {
                cycle.push(x);
                x = parent[x as usize];
            }
            cycle.push(w);
            cycle.reverse();

            let candidate = Substructure::EvenCycle { cycle };
            if candidate.is_proper_seed_in(self.graph, &mut colors) {
                trace!("even cycle of length {length} closed by back edge ({v}, {w})");
                return Some(candidate);
            }

            attempts += 1;
            if attempts == EVEN_CYCLE_ATTEMPTS {
                trace!("rejected {attempts} even cycles, giving up");
                return None;
            }
        }

        None
    }

    /// For every hub of the block (ascending) and every pair of its neighbors in the block,
    /// searches a shortest path between the two neighbors that avoids the hub. Shortest paths
    /// are chordless, so the rim is properly 2-colored by alternation.
    pub fn find_wheel(&self) -> Option<Substructure> {
        let mut colors = vec![UNCOLORED; self.graph.len()];
        let mut excluded = self.graph.vertex_bitset_set();
        for &u in &self.block {
            excluded.clear_bit(u);
        }

        for &hub in &self.block {
            let nbs = self
                .graph
                .neighbors_of(hub)
                .filter(|&x| self.in_block.get_bit(x))
                .collect_vec();
            if nbs.len() < 2 {
                continue;
            }

            excluded.set_bit(hub);
            for (&a, &b) in nbs.iter().tuple_combinations() {
                if let Some(rim) = self.graph.shortest_path_avoiding(a, b, &excluded) {
                    let candidate = Substructure::Wheel { hub, rim };
                    if candidate.is_proper_seed_in(self.graph, &mut colors) {
                        trace!("wheel with hub {hub} between rim endpoints {a} and {b}");
                        return Some(candidate);
                    }
                }
            }
            excluded.clear_bit(hub);
        }

        None
    }

    /// For every pair of terminals `u < v` of the block, enumerates simple `u -> v` paths inside
    /// the block by DFS and greedily keeps those internally disjoint from the ones kept before.
    /// Stops at the first pair with three kept paths and a proper seed coloring, or once the
    /// budget is spent.
    pub fn find_theta(&self) -> Option<Substructure> {
        let mut budget = self.theta_budget;
        let mut used = self.graph.vertex_bitset_unset();
        let mut colors = vec![UNCOLORED; self.graph.len()];

        for (i, &u) in self.block.iter().enumerate() {
            if self.graph.degree_of(u) < 3 {
                continue;
            }

            for &v in &self.block[i + 1..] {
                if self.graph.degree_of(v) < 3 {
                    continue;
                }

                let mut paths: Vec<Vec<Node>> = Vec::with_capacity(3);
                let mut enumeration = SimplePaths::new(self.graph, &self.in_block, u, v, budget);

                for path in enumeration.by_ref() {
                    let interior = &path[1..path.len() - 1];
                    if interior.iter().any(|&x| used.get_bit(x)) {
                        continue;
                    }

                    used.set_bits(interior.iter().copied());
                    paths.push(path);
                    if paths.len() == 3 {
                        break;
                    }
                }
                budget = enumeration.remaining_budget();

                for path in &paths {
                    for &x in &path[1..path.len() - 1] {
                        used.clear_bit(x);
                    }
                }

                if paths.len() == 3 {
                    let candidate = Substructure::Theta { u, v, paths };
                    if candidate.is_proper_seed_in(self.graph, &mut colors) {
                        trace!("theta graph between terminals {u} and {v}");
                        return Some(candidate);
                    }
                }

                if budget == 0 {
                    trace!("theta search ran out of budget");
                    return None;
                }
            }
        }

        None
    }
}

/// Enumerates all simple paths between two nodes inside a node set by DFS with backtracking.
/// Every inspected neighbor costs one unit of budget; the enumeration ends early once the budget
/// is spent.
struct SimplePaths<'a, G>
where
    G: IndexedAdjacencyList,
{
    graph: &'a G,
    allowed: &'a NodeBitSet,
    target: Node,
    on_path: NodeBitSet,
    path: Vec<Node>,
    // position of the next neighbor to inspect, one entry per node on `path`
    positions: Vec<NumNodes>,
    budget: usize,
}

impl<'a, G> SimplePaths<'a, G>
where
    G: IndexedAdjacencyList,
{
    fn new(graph: &'a G, allowed: &'a NodeBitSet, source: Node, target: Node, budget: usize) -> Self {
        let mut on_path = graph.vertex_bitset_unset();
        on_path.set_bit(source);

        Self {
            graph,
            allowed,
            target,
            on_path,
            path: vec![source],
            positions: vec![0],
            budget,
        }
    }

    fn remaining_budget(&self) -> usize {
        self.budget
    }
}

impl<G> Iterator for SimplePaths<'_, G>
where
    G: IndexedAdjacencyList,
{
    type Item = Vec<Node>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&u) = self.path.last() {
            let depth = self.path.len() - 1;
            let pos = self.positions[depth];

            if pos == self.graph.degree_of(u) {
                self.on_path.clear_bit(u);
                self.path.pop();
                self.positions.pop();
                continue;
            }

            if self.budget == 0 {
                return None;
            }
            self.budget -= 1;

            let w = self.graph.ith_neighbor(u, pos);
            self.positions[depth] += 1;

            if w == self.target {
                let mut found = self.path.clone();
                found.push(w);
                return Some(found);
            }

            if self.allowed.get_bit(w) && !self.on_path.set_bit(w) {
                self.path.push(w);
                self.positions.push(0);
            }
        }

        None
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::gens::*;

    fn search<G: IndexedAdjacencyList>(graph: &G) -> Option<Substructure> {
        let block = graph.find_nontrivial_block();
        SubstructureSearch::new(graph, &block).find()
    }

    #[test]
    fn even_cycle_in_even_ring() {
        let graph = AdjArrayUndir::cycle(8);
        let Some(Substructure::EvenCycle { cycle }) = search(&graph) else {
            panic!("no even cycle found");
        };
        assert_eq!(cycle.len(), 8);
        assert_eq!(cycle[0], 0);
    }

    #[test]
    fn even_cycle_rejects_chords_of_equal_parity() {
        // C4 with the chord (0, 2): both 4-cycles through the chord close odd triangles,
        // the outer 4-cycle has a chord between positions of equal parity
        let graph = AdjArrayUndir::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]);
        let block = graph.find_nontrivial_block();
        let search = SubstructureSearch::new(&graph, &block);
        assert_eq!(search.find_even_cycle(), None);

        let found = search.find();
        assert!(matches!(found, Some(Substructure::Wheel { .. })));
        assert!(found.is_some_and(|s| s.is_proper_seed(&graph)));
    }

    #[test]
    fn rejected_cycle_leaves_no_colors_behind() {
        // the first even cycle 0 1 2 5 4 3 has the chord (0, 2), the second one 1 2 5 4 is
        // chordless but touches nodes seeded by the first
        let graph = AdjArrayUndir::prism(3);
        let block = graph.find_nontrivial_block();
        assert_eq!(
            SubstructureSearch::new(&graph, &block).find_even_cycle(),
            Some(Substructure::EvenCycle {
                cycle: vec![1, 2, 5, 4]
            })
        );
    }

    #[test]
    fn even_cycle_search_gives_up_on_cliques() {
        let graph = AdjArrayUndir::complete(16);
        let block = graph.find_nontrivial_block();
        let search = SubstructureSearch::new(&graph, &block);
        assert_eq!(search.find_even_cycle(), None);
        assert_eq!(
            search.find(),
            Some(Substructure::Wheel {
                hub: 0,
                rim: vec![1, 2]
            })
        );
    }

    #[test]
    fn wheel_in_odd_wheel() {
        // W5 has 4-cycles through the hub, so restrict to the wheel search
        let graph = AdjArrayUndir::wheel(5);
        let block = graph.find_nontrivial_block();
        let Some(Substructure::Wheel { hub, rim }) = SubstructureSearch::new(&graph, &block).find_wheel()
        else {
            panic!("no wheel found");
        };
        assert_eq!(hub, 0);
        assert!(rim.iter().all(|&x| x != hub));
        assert!(rim.windows(2).all(|w| graph.has_edge(w[0], w[1])));
        assert!(graph.has_edge(hub, rim[0]));
        assert!(graph.has_edge(hub, *rim.last().unwrap()));
    }

    #[test]
    fn theta_in_k23() {
        // K_{2,3}: terminals 0 and 1, three paths through 2, 3 and 4
        let graph = AdjArrayUndir::complete_bipartite(2, 3);
        let block = graph.find_nontrivial_block();
        let search = SubstructureSearch::new(&graph, &block);

        let Some(Substructure::Theta { u, v, paths }) = search.find_theta() else {
            panic!("no theta found");
        };
        assert_eq!((u, v), (0, 1));
        assert_eq!(paths.len(), 3);

        let mut interior = paths.iter().flat_map(|p| p[1..p.len() - 1].to_vec()).collect_vec();
        interior.sort_unstable();
        assert_eq!(interior, vec![2, 3, 4]);
    }

    #[test]
    fn theta_respects_budget() {
        let graph = AdjArrayUndir::complete_bipartite(2, 3);
        let block = graph.find_nontrivial_block();
        assert_eq!(
            SubstructureSearch::new(&graph, &block)
                .theta_budget(2)
                .find_theta(),
            None
        );
    }

    #[test]
    fn seeds_are_proper_on_regular_graphs() {
        for graph in [
            AdjArrayUndir::petersen(),
            AdjArrayUndir::prism(5),
            AdjArrayUndir::hypercube(3),
            AdjArrayUndir::circulant(9, &[1, 2]),
            AdjArrayUndir::complete_bipartite(4, 4),
        ] {
            let found = search(&graph).expect("substructure");
            assert!(found.is_proper_seed(&graph), "{}", found.kind());
        }
    }

    #[test]
    fn nothing_outside_the_block() {
        let graph = AdjArrayUndir::path(5);
        assert_eq!(SubstructureSearch::new(&graph, &[]).find(), None);
        assert_eq!(search(&graph), None);
    }
}

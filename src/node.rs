/*!
# Node Representation

We choose `Node = u32` as almost all colored networks have less than `2^32` nodes.
This allows us to (1) save space in per-node arrays (colors, parents, low-links) and
(2) to use node values directly as indices without abstracting over them.
*/

use stream_bitset::bitset::BitSetImpl;

/// Nodes can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// Node-Value that is considered invalid (used e.g. as the parent of a DFS root)
pub const INVALID_NODE: Node = Node::MAX;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = Node;

/// BitSet for Nodes
pub type NodeBitSet = BitSetImpl<Node>;

/// Converts a `usize`-index into a `Node`.
/// ** Panics in debug-builds if the index does not fit **
#[inline]
pub fn node_from_index(idx: usize) -> Node {
    debug_assert!(idx < INVALID_NODE as usize);
    idx as Node
}

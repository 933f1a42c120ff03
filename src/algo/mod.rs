/*!
# Graph Algorithms

This module provides the structural graph algorithms the colorers are built from.
All algorithms are re-exported at the top level of this module, so you can simply do:
```rust
use brooks_coloring::algo::*;
```
and gain access to traversal, connectivity, bipartiteness, block decomposition, the Brooks
substructure locator and the Brooks classifier.
If possible, algorithms are provided as **iterators**, making it easy to consume results lazily.
*/

mod biconnected;
mod bipartite;
mod brooks;
mod connectivity;
mod substructure;
mod traversal;

use crate::prelude::*;

pub use biconnected::*;
pub use bipartite::*;
pub use brooks::*;
pub use connectivity::*;
pub use substructure::*;
pub use traversal::*;

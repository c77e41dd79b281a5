/*!
`gdwg` is a **g**eneric **d**irected **w**eighted **g**raph container:
- Nodes are identified by a user supplied value `N` (anything `Ord + Clone`),
- Edges are directed and carry a weight `E` (anything `PartialOrd + Clone`, so `f64` works),
- Multi-edges between the same pair of nodes are allowed as long as their weights differ,
- Self-loops are allowed.

The container only stores and queries adjacency; it does not implement graph algorithms.

# Representation

The graph is a registry of nodes ordered by value. Every node owns its outgoing edges as a sorted
set of `(destination, weight)` pairs. An edge refers to its destination by value (i.e. by its key in
the registry) and never holds a reference to the destination node itself, so deleting a node only
requires purging the edges that name it.

The edge set of a node is abstracted by the [`Neighborhood`](crate::repr::Neighborhood) trait:

- [`Graph`](crate::repr::Graph) stores edge sets in a `Vec`,
- [`SparseGraph`](crate::repr::SparseGraph) stores edge sets in a `SmallVec` and avoids
  allocations for nodes with small out-degree.

# Ordering

All listings are sorted:
- nodes ascending by value,
- edges of a node ascending by destination, then weight,
- iteration over all edges ascending by source, then destination, then weight.

Iteration is driven by a bidirectional [`Cursor`](crate::repr::Cursor) over the two-level
`node -> edge set` structure; [`Edges`](crate::repr::Edges) wraps two cursors into a double-ended
iterator.

# Errors

Operations that require existing nodes return a [`GraphError`] if the requirement is violated.
The graph is never modified in that case. Expected outcomes such as inserting a duplicate or
removing something absent are reported as `bool`.

# Usage

```
use gdwg::prelude::*;

let mut g = Graph::<i32, f64>::from_nodes([1, 2, 3]);
g.insert_edge(&1, &2, 6.9).unwrap();
g.insert_edge(&2, &3, 1.1).unwrap();
g.insert_edge(&3, &2, 1.2).unwrap();
g.insert_edge(&3, &2, 1.4).unwrap();

assert_eq!(g.weights(&3, &2).unwrap(), vec![1.2, 1.4]);
assert_eq!(
    g.to_string(),
    "1 (\n  2 | 6.9\n)\n2 (\n  3 | 1.1\n)\n3 (\n  2 | 1.2\n  2 | 1.4\n)\n"
);
```
*/

pub mod edge;
pub mod error;
pub mod io;
pub mod node;
pub mod ops;
pub mod repr;
pub(crate) mod testing;

pub use edge::*;
pub use error::*;
pub use node::*;

/// `gdwg::prelude` includes node and edge types, errors, all graph operation traits as well as all
/// implemented representations.
pub mod prelude {
    pub use super::{
        edge::*,
        error::{ErrorKind, GraphError},
        node::*,
        ops::*,
        repr::*,
    };
}

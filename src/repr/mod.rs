/*!
# Graph Representations

A graph is a [`DirectedGraph`] parameterized by the [`Neighborhood`] type that stores the outgoing
edges of each node:

- [`Graph`] uses [`ArrNeighborhood`] (`Vec`), the default choice,
- [`SparseGraph`] uses [`SparseNeighborhood`] (`SmallVec`) for graphs with small out-degrees.

Both behave identically; they only differ in memory layout. Graphs over different neighborhood
types can be compared with `==`.

Traversal over all edges is provided by [`Cursor`] (a bidirectional position) and [`Edges`]
(a double-ended iterator).
*/

use crate::{ops::*, *};

mod cursor;
mod directed;
mod neighborhood;

pub use cursor::*;
pub use directed::*;
pub use neighborhood::*;

/*!
# Node Representation

Nodes are identified by a user supplied value `N`. Two nodes are the same node iff their values are
equal, and the registry orders nodes by value. A node value therefore needs a strict total order
(`Ord`) and must be cloneable, as it is also stored as the destination key of every edge pointing
at it.
*/

/// Bounds required of a node value.
///
/// Blanket-implemented for every `Ord + Clone` type, so `i32`, `char`, `String`, ... all work out of
/// the box.
pub trait NodeValue: Ord + Clone {}

impl<N: Ord + Clone> NodeValue for N {}

/// We keep counts as `usize` as the number of nodes is bounded by memory anyway.
pub type NumNodes = usize;

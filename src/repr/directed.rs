/*!
# Directed Weighted Graph

[`DirectedGraph`] is the node registry: a `BTreeMap` from node value to the node's outgoing
[`Neighborhood`]. Edges store the destination's value, which is its key in the registry, so every
lookup of a destination goes through the registry and no edge ever keeps a node alive.

## Provided Representations

- [`Graph`]: outgoing edges in a `Vec` ([`ArrNeighborhood`]).
- [`SparseGraph`]: outgoing edges in a `SmallVec` ([`SparseNeighborhood`]).

## Invariants

After every operation:
- node values are unique (they are map keys),
- each edge set is sorted by `(dst, weight)` and contains no duplicates,
- every edge's destination is a key of the registry,
- `num_edges` equals the total size of all edge sets.
*/

use std::{
    borrow::Borrow,
    collections::{BTreeMap, btree_map::Entry},
    fmt::{Debug, Display},
    marker::PhantomData,
};

use tracing::trace;

use crate::{io::DumpWriter, ops::precondition, testing::test_graph_ops};

use super::*;

/// A directed weighted graph with multi-edges.
///
/// # Type parameters
/// - `N`: node values, ordered and unique.
/// - `E`: edge weights.
/// - `Nbs`: [`Neighborhood`] implementation used for the outgoing edges of each node.
#[derive(Clone)]
pub struct DirectedGraph<N, E, Nbs = ArrNeighborhood<N, E>>
where
    N: NodeValue,
    E: Weight,
    Nbs: Neighborhood<N, E>,
{
    nodes: BTreeMap<N, Nbs>,
    num_edges: NumEdges,
    _weight: PhantomData<E>,
}

/// Directed graph storing outgoing edges in a `Vec`.
pub type Graph<N, E> = DirectedGraph<N, E, ArrNeighborhood<N, E>>;

/// Directed graph storing outgoing edges in a `SmallVec` with inline space for 4 edges.
pub type SparseGraph<N, E> = DirectedGraph<N, E, SparseNeighborhood<N, E>>;

impl<N: NodeValue, E: Weight, Nbs: Neighborhood<N, E>> DirectedGraph<N, E, Nbs> {
    /// Leaves an empty graph in place of `self` and returns the previous contents
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Read access to the registry for cursors
    pub(super) fn registry(&self) -> &BTreeMap<N, Nbs> {
        &self.nodes
    }

    fn recount_edges(&mut self) {
        self.num_edges = self.nodes.values().map(|nbs| nbs.num_of_edges()).sum();
    }
}

impl<N: NodeValue, E: Weight, Nbs: Neighborhood<N, E>> Default for DirectedGraph<N, E, Nbs> {
    fn default() -> Self {
        Self {
            nodes: BTreeMap::new(),
            num_edges: 0,
            _weight: PhantomData,
        }
    }
}

impl<N: NodeValue, E: Weight, Nbs: Neighborhood<N, E>> GraphType for DirectedGraph<N, E, Nbs> {
    type Node = N;
    type Weight = E;
}

impl<N: NodeValue, E: Weight, Nbs: Neighborhood<N, E>> GraphNew for DirectedGraph<N, E, Nbs> {
    fn new() -> Self {
        Self::default()
    }
}

impl<N: NodeValue, E: Weight, Nbs: Neighborhood<N, E>> GraphNodeOrder
    for DirectedGraph<N, E, Nbs>
{
    fn number_of_nodes(&self) -> NumNodes {
        self.nodes.len()
    }

    fn vertices(&self) -> impl Iterator<Item = &N> + '_ {
        self.nodes.keys()
    }
}

impl<N: NodeValue, E: Weight, Nbs: Neighborhood<N, E>> GraphEdgeOrder
    for DirectedGraph<N, E, Nbs>
{
    fn number_of_edges(&self) -> NumEdges {
        self.num_edges
    }
}

impl<N: NodeValue, E: Weight, Nbs: Neighborhood<N, E>> AdjacencyTest for DirectedGraph<N, E, Nbs> {
    fn is_node<Q>(&self, u: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.nodes.contains_key(u)
    }

    fn has_edge<Q>(&self, u: &Q, v: &Q, weight: &E) -> bool
    where
        N: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.nodes
            .get(u)
            .is_some_and(|nbs| nbs.position_of(v, weight).is_ok())
    }

    fn is_connected<Q>(&self, u: &Q, v: &Q) -> Result<bool>
    where
        N: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.nodes.get(u) {
            Some(nbs) if self.nodes.contains_key(v) => Ok(nbs.has_edge_to(v)),
            _ => Err(precondition(GraphError::IsConnected)),
        }
    }
}

impl<N: NodeValue, E: Weight, Nbs: Neighborhood<N, E>> AdjacencyList for DirectedGraph<N, E, Nbs> {
    type Neighbors = Nbs;

    fn neighborhood_entry<Q>(&self, u: &Q) -> Option<(&N, &Nbs)>
    where
        N: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.nodes.get_key_value(u)
    }
}

impl<N: NodeValue, E: Weight, Nbs: Neighborhood<N, E>> GraphNodeEditing
    for DirectedGraph<N, E, Nbs>
{
    fn insert_node(&mut self, u: N) -> bool {
        match self.nodes.entry(u) {
            Entry::Vacant(entry) => {
                entry.insert(Nbs::default());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    fn delete_node<Q>(&mut self, u: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some(out_nbs) = self.nodes.remove(u) else {
            return false;
        };

        // outgoing edges (including self-loops) vanish with the node, incoming ones are purged
        let removed = out_nbs.num_of_edges()
            + self
                .nodes
                .values_mut()
                .map(|nbs| nbs.remove_edges_to(u))
                .sum::<NumEdges>();

        self.num_edges -= removed;
        trace!(removed_edges = removed, "deleted node");
        true
    }

    fn replace<Q>(&mut self, old: &Q, new: N) -> Result<bool>
    where
        N: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if !self.nodes.contains_key(old) {
            return Err(precondition(GraphError::Replace));
        }
        if Borrow::<Q>::borrow(&new) == old {
            return Ok(true);
        }
        if self.nodes.contains_key::<N>(&new) {
            return Ok(false);
        }

        let Some(mut out_nbs) = self.nodes.remove(old) else {
            return Err(precondition(GraphError::Replace));
        };

        // `new` is not a node yet, hence no redirected edge can collide with an existing one
        let mut collapsed = out_nbs.redirect_edges(old, &new);
        for nbs in self.nodes.values_mut() {
            collapsed += nbs.redirect_edges(old, &new);
        }
        debug_assert_eq!(collapsed, 0);

        self.nodes.insert(new, out_nbs);
        trace!("replaced node value");
        Ok(true)
    }

    fn merge_replace<Q>(&mut self, old: &Q, new: &Q) -> Result<()>
    where
        N: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if !self.nodes.contains_key(old) || !self.nodes.contains_key(new) {
            return Err(precondition(GraphError::MergeReplace));
        }
        if old == new {
            return Ok(());
        }

        let Some(old_nbs) = self.nodes.remove(old) else {
            return Err(precondition(GraphError::MergeReplace));
        };
        let Some(new_key) = self.nodes.get_key_value(new).map(|(k, _)| k.clone()) else {
            return Err(precondition(GraphError::MergeReplace));
        };

        // incoming edges of `old` now point at `new`
        for nbs in self.nodes.values_mut() {
            nbs.redirect_edges(old, &new_key);
        }

        // outgoing edges of `old` now leave from `new`; self-loops stay self-loops
        if let Some(new_nbs) = self.nodes.get_mut(new) {
            for edge in old_nbs.as_slice() {
                let dst = if edge.dst_as::<Q>() == old {
                    new_key.clone()
                } else {
                    edge.dst.clone()
                };
                new_nbs.try_add_edge(dst, edge.weight.clone());
            }
        }

        let before = self.num_edges;
        self.recount_edges();
        trace!(
            collapsed_edges = before - self.num_edges,
            "merged node into existing node"
        );
        Ok(())
    }

    fn clear(&mut self) {
        trace!(
            nodes = self.nodes.len(),
            edges = self.num_edges,
            "cleared graph"
        );
        self.nodes.clear();
        self.num_edges = 0;
    }
}

impl<N: NodeValue, E: Weight, Nbs: Neighborhood<N, E>> GraphEdgeEditing
    for DirectedGraph<N, E, Nbs>
{
    fn insert_edge<Q>(&mut self, u: &Q, v: &Q, weight: E) -> Result<bool>
    where
        N: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some((dst, _)) = self.nodes.get_key_value(v) else {
            return Err(precondition(GraphError::InsertEdge));
        };
        let dst = dst.clone();

        let Some(nbs) = self.nodes.get_mut(u) else {
            return Err(precondition(GraphError::InsertEdge));
        };

        let inserted = nbs.try_add_edge(dst, weight);
        if inserted {
            self.num_edges += 1;
        }
        Ok(inserted)
    }

    fn erase_edge<Q>(&mut self, u: &Q, v: &Q, weight: &E) -> bool
    where
        N: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let removed = self
            .nodes
            .get_mut(u)
            .is_some_and(|nbs| nbs.try_remove_edge(v, weight));
        if removed {
            self.num_edges -= 1;
        }
        removed
    }
}

/// Structural equality: same node values and, per node, the same outgoing `(dst, weight)` pairs.
/// Graphs over different [`Neighborhood`] types compare by content.
impl<N, E, A, B> PartialEq<DirectedGraph<N, E, B>> for DirectedGraph<N, E, A>
where
    N: NodeValue,
    E: Weight,
    A: Neighborhood<N, E>,
    B: Neighborhood<N, E>,
{
    fn eq(&self, other: &DirectedGraph<N, E, B>) -> bool {
        self.num_edges == other.num_edges
            && self.nodes.len() == other.nodes.len()
            && self
                .nodes
                .iter()
                .zip(other.nodes.iter())
                .all(|((u, a), (v, b))| u == v && a.as_slice() == b.as_slice())
    }
}

impl<N, E, Nbs> Eq for DirectedGraph<N, E, Nbs>
where
    N: NodeValue,
    E: Weight + Eq,
    Nbs: Neighborhood<N, E>,
{
}

impl<N: NodeValue, E: Weight, Nbs: Neighborhood<N, E>> FromIterator<N>
    for DirectedGraph<N, E, Nbs>
{
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        Self::from_nodes(iter)
    }
}

impl<N: NodeValue, E: Weight, Nbs: Neighborhood<N, E>> Extend<N> for DirectedGraph<N, E, Nbs> {
    fn extend<I: IntoIterator<Item = N>>(&mut self, iter: I) {
        self.insert_nodes(iter);
    }
}

impl<N: NodeValue, E: Weight, Nbs: Neighborhood<N, E>, const K: usize> From<[N; K]>
    for DirectedGraph<N, E, Nbs>
{
    fn from(nodes: [N; K]) -> Self {
        Self::from_nodes(nodes)
    }
}

/// Writes the node-by-node dump, see [`DumpWriter`]
impl<N, E, Nbs> Display for DirectedGraph<N, E, Nbs>
where
    N: NodeValue + Display,
    E: Weight + Display,
    Nbs: Neighborhood<N, E>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&DumpWriter::default().display(self), f)
    }
}

impl<N, E, Nbs> Debug for DirectedGraph<N, E, Nbs>
where
    N: NodeValue + Debug,
    E: Weight + Debug,
    Nbs: Neighborhood<N, E>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.nodes.iter().map(|(u, nbs)| (u, nbs.as_slice())))
            .finish()
    }
}

#[cfg(test)]
mod test {
    use itertools::Itertools;

    use super::*;

    fn cities() -> Graph<String, f64> {
        Graph::from_edges(
            [
                ("sydney", "melbourne", 5.4),
                ("melbourne", "perth", 20.1),
                ("perth", "adelaide", 25.9),
                ("sydney", "adelaide", 4.7),
                ("adelaide", "brisbane", 2.3),
            ]
            .map(|(u, v, w)| (u.to_string(), v.to_string(), w)),
        )
    }

    #[test]
    fn borrowed_lookups() {
        let g = cities();
        assert!(g.is_node("perth"));
        assert!(!g.is_node("hobart"));
        assert_eq!(g.connected("sydney").unwrap(), vec!["adelaide", "melbourne"]);
        assert_eq!(g.weights("perth", "adelaide").unwrap(), vec![25.9]);
        assert!(g.is_connected("adelaide", "brisbane").unwrap());
        assert!(!g.is_connected("brisbane", "adelaide").unwrap());
        assert!(g.has_edge("sydney", "melbourne", &5.4));
        assert!(!g.has_edge("sydney", "melbourne", &5.5));
    }

    #[test]
    fn missing_nodes_are_errors() {
        let g = cities();
        assert_eq!(g.is_connected("hobart", "perth"), Err(GraphError::IsConnected));
        assert_eq!(g.connected("hobart"), Err(GraphError::GetConnected));
        assert_eq!(g.weights("perth", "hobart"), Err(GraphError::GetWeights));
        assert_eq!(g.weights("hobart", "perth"), Err(GraphError::GetWeights));
    }

    #[test]
    fn delete_node_cascades() {
        let mut g = cities();
        assert_eq!(g.number_of_edges(), 5);
        assert!(g.delete_node("adelaide"));
        assert!(!g.delete_node("adelaide"));
        assert_eq!(g.number_of_edges(), 2);
        assert_eq!(g.connected("sydney").unwrap(), vec!["melbourne"]);
        assert!(g.connected("perth").unwrap().is_empty());
        assert!(g.in_neighbors_of("brisbane").is_empty());
    }

    #[test]
    fn delete_node_with_self_loop() {
        let mut g = Graph::<u32, u32>::from_edges([(1, 1, 0), (1, 2, 0), (2, 1, 3), (2, 2, 1)]);
        assert!(g.delete_node(&1));
        assert_eq!(g.number_of_edges(), 1);
        assert_eq!(
            g.edges_of(&2).collect_vec(),
            vec![WeightedEdge(2, 2, 1)]
        );
    }

    #[test]
    fn replace_keeps_edges() {
        let mut g = Graph::<char, i32>::from_edges([('a', 'b', 1), ('b', 'a', 2), ('a', 'a', 3)]);
        assert_eq!(g.replace(&'a', 'z'), Ok(true));
        assert!(!g.is_node(&'a'));
        assert_eq!(g.weights(&'z', &'b'), Ok(vec![1]));
        assert_eq!(g.weights(&'b', &'z'), Ok(vec![2]));
        assert_eq!(g.weights(&'z', &'z'), Ok(vec![3]));
        assert_eq!(g.number_of_edges(), 3);

        assert_eq!(g.replace(&'z', 'b'), Ok(false));
        assert_eq!(g.replace(&'z', 'z'), Ok(true));
        assert_eq!(g.replace(&'q', 'r'), Err(GraphError::Replace));
        assert_eq!(g.nodes(), vec!['b', 'z']);
    }

    #[test]
    fn merge_replace_collapses_duplicates() {
        let mut g = Graph::<char, i32>::from_edges([
            ('a', 'b', 1),
            ('a', 'c', 2),
            ('b', 'b', 1),
            ('c', 'a', 3),
            ('a', 'a', 4),
        ]);
        assert_eq!(g.merge_replace(&'a', &'b'), Ok(()));
        assert_eq!(g.nodes(), vec!['b', 'c']);
        assert_eq!(
            g.edges_of(&'b').collect_vec(),
            vec![WeightedEdge('b', 'b', 1), WeightedEdge('b', 'b', 4), WeightedEdge('b', 'c', 2)]
        );
        assert_eq!(g.edges_of(&'c').collect_vec(), vec![WeightedEdge('c', 'b', 3)]);
        assert_eq!(g.number_of_edges(), 4);

        assert_eq!(g.merge_replace(&'b', &'b'), Ok(()));
        assert_eq!(g.merge_replace(&'b', &'x'), Err(GraphError::MergeReplace));
        assert_eq!(g.number_of_edges(), 4);
    }

    #[test]
    fn equality_across_representations() {
        let edges = [(3, 1, 2), (1, 2, 5), (1, 2, 4), (2, 2, 0)];
        let a = Graph::<u8, u8>::from_edges(edges);
        let b = SparseGraph::<u8, u8>::from_edges(edges.into_iter().rev());
        assert!(a == b);

        let mut c = a.clone();
        c.erase_edge(&1, &2, &4);
        assert!(a != c);
        c.insert_edge(&1, &2, 4).unwrap();
        assert_eq!(a, c);
        c.insert_node(7);
        assert_ne!(a, c);
    }

    #[test]
    fn borrowed_node_and_weight_values() {
        let names = ["a", "b", "c"].map(String::from);
        let weights = [1.5, 2.5];

        let mut g = Graph::<&str, &f64>::from_nodes(names.iter().map(String::as_str));
        g.insert_edge(&"a", &"b", &weights[1]).unwrap();
        g.insert_edge(&"a", &"b", &weights[0]).unwrap();
        g.insert_edge(&"c", &"a", &weights[0]).unwrap();

        assert_eq!(g.connected(&"a"), Ok(vec!["b"]));
        assert_eq!(g.weights(&"a", &"b"), Ok(vec![&1.5, &2.5]));
        assert_eq!(g.in_neighbors_of(&"a"), vec!["c"]);
        assert_eq!(g.iter().rev().next(), Some((&"c", &"a", &&1.5)));

        assert_eq!(g.replace(&"c", "d"), Ok(true));
        assert_eq!(g.replace(&"d", "b"), Ok(false));
        assert_eq!(g.in_neighbors_of(&"a"), vec!["d"]);
    }

    #[test]
    fn nan_weights_next_to_numeric_weights() {
        let mut g = Graph::<u32, f64>::from_nodes([1, 2]);
        assert_eq!(g.insert_edge(&1, &2, 1.0), Ok(true));
        assert_eq!(g.insert_edge(&1, &2, f64::NAN), Ok(true));
        assert_eq!(g.insert_edge(&1, &2, f64::NAN), Ok(false));
        assert_eq!(g.insert_edge(&1, &2, 0.5), Ok(true));
        assert_eq!(g.number_of_edges(), 3);

        let weights = g.weights(&1, &2).unwrap();
        assert_eq!(weights[..2], [0.5, 1.0]);
        assert!(weights[2].is_nan());
        assert!(g.has_edge(&1, &2, &f64::NAN));
        assert_eq!(g, g.clone());

        assert!(g.erase_edge(&1, &2, &f64::NAN));
        assert!(!g.has_edge(&1, &2, &f64::NAN));
        assert_eq!(g.weights(&1, &2), Ok(vec![0.5, 1.0]));
        assert_eq!(g.number_of_edges(), 2);

        let h = Graph::<u32, f64>::from_edges([(1, 2, f64::NAN)]);
        assert_eq!(h, h.clone());
    }

    #[test]
    fn take_leaves_empty_graph() {
        let mut g = cities();
        let h = g.take();
        assert!(g.is_empty());
        assert!(g.is_singleton_graph());
        assert!(g.nodes().is_empty());
        assert_eq!(g.to_string(), "\n");
        assert_eq!(h.number_of_nodes(), 5);
    }

    #[test]
    fn constructors() {
        let g: Graph<&str, i32> = ["red", "orange", "yellow", "blue", "red"].into();
        assert_eq!(g.nodes(), vec!["blue", "orange", "red", "yellow"]);

        let mut h: SparseGraph<i32, i32> = (0..3).collect();
        h.extend([5, 2]);
        assert_eq!(h.nodes(), vec![0, 1, 2, 5]);
    }
}

// ---------- Testing ----------

test_graph_ops!(
    test_graph,
    Graph<u32, u32>,
    (
        GraphNew,
        GraphNodeEditing,
        GraphEdgeEditing,
        AdjacencyList,
        Cursor
    )
);

test_graph_ops!(
    test_sparse_graph,
    SparseGraph<u32, u32>,
    (
        GraphNew,
        GraphNodeEditing,
        GraphEdgeEditing,
        AdjacencyList,
        Cursor
    )
);

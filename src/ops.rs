use std::borrow::Borrow;

use itertools::Itertools;

use crate::{repr::Neighborhood, *};

/// Fixes the node and weight types of a graph
pub trait GraphType {
    /// Type of the values identifying nodes
    type Node: NodeValue;
    /// Type of the edge weights
    type Weight: Weight;
}

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder: GraphType {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Returns an iterator over all node values in ascending order
    fn vertices(&self) -> impl Iterator<Item = &Self::Node> + '_;

    /// Returns all node values in ascending order
    fn nodes(&self) -> Vec<Self::Node> {
        self.vertices().cloned().collect_vec()
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.number_of_nodes() == 0
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of edges of the graph
    fn number_of_edges(&self) -> NumEdges;

    /// Returns *true* if the graph has no edges
    fn is_singleton_graph(&self) -> bool {
        self.number_of_edges() == 0
    }
}

/// Trait to test existence of nodes and edges in a graph.
pub trait AdjacencyTest: GraphType {
    /// Returns *true* if a node with value `u` exists. Never fails.
    fn is_node<Q>(&self, u: &Q) -> bool
    where
        Self::Node: Borrow<Q>,
        Q: Ord + ?Sized;

    /// Returns *true* if the exact edge `(u, v, weight)` exists.
    /// Missing endpoints simply yield *false*.
    fn has_edge<Q>(&self, u: &Q, v: &Q, weight: &Self::Weight) -> bool
    where
        Self::Node: Borrow<Q>,
        Q: Ord + ?Sized;

    /// Returns *true* if at least one edge `u -> v` exists.
    /// Fails if either `u` or `v` is not a node.
    fn is_connected<Q>(&self, u: &Q, v: &Q) -> Result<bool>
    where
        Self::Node: Borrow<Q>,
        Q: Ord + ?Sized;
}

/// Traits pertaining getters for outgoing and incoming adjacency
pub trait AdjacencyList: GraphNodeOrder + AdjacencyTest {
    /// Representation of the outgoing edges of a single node
    type Neighbors: Neighborhood<Self::Node, Self::Weight>;

    /// Returns the stored value of node `u` together with its outgoing edge set,
    /// or `None` if `u` is not a node
    fn neighborhood_entry<Q>(&self, u: &Q) -> Option<(&Self::Node, &Self::Neighbors)>
    where
        Self::Node: Borrow<Q>,
        Q: Ord + ?Sized;

    /// Returns the outgoing edge set of `u` or `None` if `u` is not a node
    fn neighborhood_of<Q>(&self, u: &Q) -> Option<&Self::Neighbors>
    where
        Self::Node: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.neighborhood_entry(u).map(|(_, nbs)| nbs)
    }

    /// Returns the distinct nodes reachable from `u` by a single edge, in ascending order.
    /// Fails if `u` is not a node.
    fn connected<Q>(&self, u: &Q) -> Result<Vec<Self::Node>>
    where
        Self::Node: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let nbs = self
            .neighborhood_of(u)
            .ok_or_else(|| precondition(GraphError::GetConnected))?;
        Ok(nbs.destinations().cloned().collect_vec())
    }

    /// Returns the weights of all edges `u -> v` in ascending order.
    /// Fails if either `u` or `v` is not a node.
    fn weights<Q>(&self, u: &Q, v: &Q) -> Result<Vec<Self::Weight>>
    where
        Self::Node: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.neighborhood_of(u) {
            Some(nbs) if self.is_node(v) => Ok(nbs.weights_to(v).cloned().collect_vec()),
            _ => Err(precondition(GraphError::GetWeights)),
        }
    }

    /// Returns the number of outgoing edges of `u` (counting multi-edges) or 0 if `u` is not a node
    fn out_degree_of<Q>(&self, u: &Q) -> NumEdges
    where
        Self::Node: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.neighborhood_of(u).map_or(0, |nbs| nbs.num_of_edges())
    }

    /// Returns an iterator over the outgoing edges of `u` in ascending `(dst, weight)` order.
    /// The iterator is empty if `u` is not a node.
    fn edges_of<Q>(&self, u: &Q) -> impl Iterator<Item = WeightedEdge<Self::Node, Self::Weight>>
    where
        Self::Node: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.neighborhood_entry(u)
            .into_iter()
            .flat_map(|(src, nbs)| {
                nbs.as_slice()
                    .iter()
                    .map(move |e| WeightedEdge(src.clone(), e.dst.clone(), e.weight.clone()))
            })
    }

    /// Returns the distinct nodes `v` with an edge `v -> u`, in ascending order.
    ///
    /// Scans all nodes, which is costly compared to outgoing queries.
    fn in_neighbors_of<Q>(&self, u: &Q) -> Vec<Self::Node>
    where
        Self::Node: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.vertices()
            .filter(|v| {
                self.neighborhood_of::<Self::Node>(*v)
                    .is_some_and(|nbs| nbs.has_edge_to(u))
            })
            .cloned()
            .collect_vec()
    }
}

/// Trait for creating a new empty graph
pub trait GraphNew {
    /// Creates an empty graph without nodes
    fn new() -> Self;
}

/// Provides functions to insert/delete/rename nodes
pub trait GraphNodeEditing: GraphType {
    /// Adds a node with value `u`.
    /// Returns *true* exactly if the node was not present previously.
    fn insert_node(&mut self, u: Self::Node) -> bool;

    /// Adds all nodes in the collection, duplicates collapse
    fn insert_nodes(&mut self, nodes: impl IntoIterator<Item = Self::Node>) {
        for u in nodes {
            self.insert_node(u);
        }
    }

    /// Removes the node `u` together with all edges leaving or entering it.
    /// Returns *true* if the node was present.
    fn delete_node<Q>(&mut self, u: &Q) -> bool
    where
        Self::Node: Borrow<Q>,
        Q: Ord + ?Sized;

    /// Renames node `old` to `new`, keeping all incoming and outgoing edges.
    /// Returns *false* without effect if `new` already names a different node.
    /// Fails if `old` is not a node.
    fn replace<Q>(&mut self, old: &Q, new: Self::Node) -> Result<bool>
    where
        Self::Node: Borrow<Q>,
        Q: Ord + ?Sized;

    /// Moves all edges of `old` onto the existing node `new` and deletes `old`.
    /// Edges that then coincide with existing edges of `new` collapse.
    /// Fails if either `old` or `new` is not a node.
    fn merge_replace<Q>(&mut self, old: &Q, new: &Q) -> Result<()>
    where
        Self::Node: Borrow<Q>,
        Q: Ord + ?Sized;

    /// Removes all nodes and edges
    fn clear(&mut self);
}

/// Provides functions to insert/delete edges
pub trait GraphEdgeEditing: GraphNodeEditing {
    /// Adds the edge `(u, v, weight)`.
    /// Returns *true* exactly if the edge was not present previously.
    /// Fails if either `u` or `v` is not a node.
    fn insert_edge<Q>(&mut self, u: &Q, v: &Q, weight: Self::Weight) -> Result<bool>
    where
        Self::Node: Borrow<Q>,
        Q: Ord + ?Sized;

    /// Adds the edge and both of its endpoints if they are missing.
    /// Returns *true* exactly if the edge was not present previously.
    fn insert_edge_with_nodes(
        &mut self,
        edge: impl Into<WeightedEdge<Self::Node, Self::Weight>>,
    ) -> bool {
        let WeightedEdge(u, v, weight) = edge.into();
        self.insert_node(u.clone());
        self.insert_node(v.clone());
        // both endpoints exist at this point, so this cannot fail
        matches!(self.insert_edge(&u, &v, weight), Ok(true))
    }

    /// Removes the edge `(u, v, weight)`.
    /// Returns *true* if the edge was present; missing nodes or edges yield *false*.
    fn erase_edge<Q>(&mut self, u: &Q, v: &Q, weight: &Self::Weight) -> bool
    where
        Self::Node: Borrow<Q>,
        Q: Ord + ?Sized;
}

/// A super trait for creating a graph from scratch from a set of nodes or weighted edges
pub trait GraphFromScratch: GraphType + Sized {
    /// Create a graph from an iterator over node values
    fn from_nodes(nodes: impl IntoIterator<Item = Self::Node>) -> Self;

    /// Create a graph from an iterator over weighted edges; endpoints are inserted as needed
    fn from_edges(
        edges: impl IntoIterator<Item = impl Into<WeightedEdge<Self::Node, Self::Weight>>>,
    ) -> Self;
}

impl<G: GraphNew + GraphEdgeEditing> GraphFromScratch for G {
    fn from_nodes(nodes: impl IntoIterator<Item = Self::Node>) -> Self {
        let mut graph = Self::new();
        graph.insert_nodes(nodes);
        graph
    }

    fn from_edges(
        edges: impl IntoIterator<Item = impl Into<WeightedEdge<Self::Node, Self::Weight>>>,
    ) -> Self {
        let mut graph = Self::new();
        for edge in edges {
            graph.insert_edge_with_nodes(edge);
        }
        graph
    }
}

/// Logs a violated precondition and hands the error back
pub(crate) fn precondition(err: GraphError) -> GraphError {
    tracing::debug!(%err, kind = ?err.kind(), "graph precondition violated");
    err
}

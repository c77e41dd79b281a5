use std::{borrow::Borrow, ops::Range};

use itertools::Itertools;
use smallvec::{Array, SmallVec};

use super::*;

/// Outgoing edge set of a single node.
///
/// Implementations only need to expose their storage as a slice and support positional
/// insertion/removal; all queries are provided on top of the slice. The slice is kept sorted by
/// `(dst, weight)` and never contains two equal `(dst, weight)` pairs. Lookups are binary searches,
/// i.e. `O(log k)` for a node with out-degree `k`, while insertion/removal additionally shift the
/// tail of the slice.
pub trait Neighborhood<N: NodeValue, E: Weight>: Clone + Default {
    /// Returns the edges as a sorted slice
    fn as_slice(&self) -> &[OutEdge<N, E>];

    /// Inserts `edge` at position `idx` without checking order or uniqueness
    fn insert_at(&mut self, idx: usize, edge: OutEdge<N, E>);

    /// Removes and returns the edge at position `idx`
    /// ** Panics if `idx >= self.num_of_edges()` **
    fn remove_at(&mut self, idx: usize) -> OutEdge<N, E>;

    /// Removes all edges in the given range of positions
    fn remove_range(&mut self, range: Range<usize>);

    /// Removes all edges in the Neighborhood
    fn clear(&mut self);

    /// Returns the number of outgoing edges
    fn num_of_edges(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns *true* if there are no outgoing edges
    fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Binary search for the edge `(dst, weight)`.
    /// Returns `Ok(pos)` if present and `Err(pos)` with the insertion position otherwise.
    fn position_of<Q>(&self, dst: &Q, weight: &E) -> std::result::Result<usize, usize>
    where
        N: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.as_slice().binary_search_by(|e| {
            e.dst_as::<Q>()
                .cmp(dst)
                .then_with(|| cmp_weights(&e.weight, weight))
        })
    }

    /// Range of positions of all edges pointing at `dst`
    fn range_to<Q>(&self, dst: &Q) -> Range<usize>
    where
        N: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let edges = self.as_slice();
        let lo = edges.partition_point(|e| e.dst_as::<Q>() < dst);
        let hi = lo + edges[lo..].partition_point(|e| e.dst_as::<Q>() == dst);
        lo..hi
    }

    /// Tries to add the edge `(dst, weight)`.
    /// Returns *true* exactly if the edge was not present before.
    fn try_add_edge(&mut self, dst: N, weight: E) -> bool {
        match self.position_of(&dst, &weight) {
            Ok(_) => false,
            Err(pos) => {
                self.insert_at(pos, OutEdge::new(dst, weight));
                true
            }
        }
    }

    /// Tries to remove the edge `(dst, weight)`.
    /// Returns *true* if the edge was present before.
    fn try_remove_edge<Q>(&mut self, dst: &Q, weight: &E) -> bool
    where
        N: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.position_of(dst, weight) {
            Ok(pos) => {
                self.remove_at(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Removes every edge pointing at `dst` and returns the number of removed edges
    fn remove_edges_to<Q>(&mut self, dst: &Q) -> usize
    where
        N: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let range = self.range_to(dst);
        let removed = range.len();
        if removed > 0 {
            self.remove_range(range);
        }
        removed
    }

    /// Redirects every edge pointing at `from` to `to`, keeping the weights.
    /// Edges that already exist towards `to` collapse; the number of collapsed edges is returned.
    fn redirect_edges<Q>(&mut self, from: &Q, to: &N) -> usize
    where
        N: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let range = self.range_to(from);
        if range.is_empty() {
            return 0;
        }

        let weights = self.as_slice()[range.clone()]
            .iter()
            .map(|e| e.weight.clone())
            .collect_vec();
        self.remove_range(range);

        weights
            .into_iter()
            .filter(|w| !self.try_add_edge(to.clone(), w.clone()))
            .count()
    }

    /// Returns *true* if at least one edge points at `dst`
    fn has_edge_to<Q>(&self, dst: &Q) -> bool
    where
        N: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        !self.range_to(dst).is_empty()
    }

    /// Returns the distinct destinations in ascending order
    fn destinations<'a>(&'a self) -> impl Iterator<Item = &'a N> + 'a
    where
        N: 'a,
        E: 'a,
    {
        self.as_slice().iter().map(|e| &e.dst).dedup()
    }

    /// Returns the weights of all edges pointing at `dst` in ascending order
    fn weights_to<'a, Q>(&'a self, dst: &Q) -> impl Iterator<Item = &'a E>
    where
        N: Borrow<Q> + 'a,
        E: 'a,
        Q: Ord + ?Sized,
    {
        self.as_slice()[self.range_to(dst)]
            .iter()
            .map(|e| &e.weight)
    }
}

/// Basic Neighborhood-Impl. using `Vec<OutEdge>`
#[derive(Clone)]
pub struct ArrNeighborhood<N, E>(pub Vec<OutEdge<N, E>>);

impl<N, E> Default for ArrNeighborhood<N, E> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<N: NodeValue, E: Weight> Neighborhood<N, E> for ArrNeighborhood<N, E> {
    fn as_slice(&self) -> &[OutEdge<N, E>] {
        &self.0
    }

    fn insert_at(&mut self, idx: usize, edge: OutEdge<N, E>) {
        self.0.insert(idx, edge);
    }

    fn remove_at(&mut self, idx: usize) -> OutEdge<N, E> {
        self.0.remove(idx)
    }

    fn remove_range(&mut self, range: Range<usize>) {
        self.0.drain(range);
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

/// Like `ArrNeighborhood` but uses `SmallVec<[OutEdge; K]>` instead.
/// Prefer this if the graph is known to be sparse.
#[derive(Clone)]
pub struct SparseNeighborhood<N, E, const K: usize = 4>(pub SmallVec<[OutEdge<N, E>; K]>)
where
    [OutEdge<N, E>; K]: Array<Item = OutEdge<N, E>>;

impl<N, E, const K: usize> Default for SparseNeighborhood<N, E, K>
where
    [OutEdge<N, E>; K]: Array<Item = OutEdge<N, E>>,
{
    fn default() -> Self {
        Self(SmallVec::new())
    }
}

impl<N: NodeValue, E: Weight, const K: usize> Neighborhood<N, E> for SparseNeighborhood<N, E, K>
where
    [OutEdge<N, E>; K]: Array<Item = OutEdge<N, E>>,
{
    fn as_slice(&self) -> &[OutEdge<N, E>] {
        &self.0
    }

    fn insert_at(&mut self, idx: usize, edge: OutEdge<N, E>) {
        self.0.insert(idx, edge);
    }

    fn remove_at(&mut self, idx: usize) -> OutEdge<N, E> {
        self.0.remove(idx)
    }

    fn remove_range(&mut self, range: Range<usize>) {
        self.0.drain(range);
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn sample<Nbs: Neighborhood<char, i32>>() -> Nbs {
        let mut nbs = Nbs::default();
        for (dst, w) in [('c', 3), ('a', 7), ('c', 1), ('b', 2), ('a', -1)] {
            assert!(nbs.try_add_edge(dst, w));
        }
        nbs
    }

    fn keys<Nbs: Neighborhood<char, i32>>(nbs: &Nbs) -> Vec<(char, i32)> {
        nbs.as_slice().iter().map(|e| (e.dst, e.weight)).collect_vec()
    }

    fn sorted_and_unique<Nbs: Neighborhood<char, i32>>() {
        let mut nbs = sample::<Nbs>();
        assert!(!nbs.try_add_edge('c', 3));
        assert_eq!(
            keys(&nbs),
            vec![('a', -1), ('a', 7), ('b', 2), ('c', 1), ('c', 3)]
        );
        assert_eq!(nbs.num_of_edges(), 5);
    }

    fn queries<Nbs: Neighborhood<char, i32>>() {
        let nbs = sample::<Nbs>();
        assert_eq!(nbs.destinations().copied().collect_vec(), vec!['a', 'b', 'c']);
        assert_eq!(nbs.weights_to(&'c').copied().collect_vec(), vec![1, 3]);
        assert_eq!(nbs.weights_to(&'z').count(), 0);
        assert!(nbs.has_edge_to(&'b'));
        assert!(!nbs.has_edge_to(&'d'));
        assert_eq!(nbs.position_of(&'b', &2), Ok(2));
        assert_eq!(nbs.position_of(&'b', &3), Err(3));
    }

    fn removal<Nbs: Neighborhood<char, i32>>() {
        let mut nbs = sample::<Nbs>();
        assert!(nbs.try_remove_edge(&'a', &7));
        assert!(!nbs.try_remove_edge(&'a', &7));
        assert_eq!(nbs.remove_edges_to(&'c'), 2);
        assert_eq!(nbs.remove_edges_to(&'c'), 0);
        assert_eq!(keys(&nbs), vec![('a', -1), ('b', 2)]);
        nbs.clear();
        assert!(nbs.is_empty());
    }

    fn redirect<Nbs: Neighborhood<char, i32>>() {
        let mut nbs = sample::<Nbs>();
        // ('c', 1) and ('c', 3) are moved onto 'a', where ('a', 7) and ('a', -1) already live
        assert!(nbs.try_add_edge('a', 3));
        assert_eq!(nbs.redirect_edges(&'c', &'a'), 1);
        assert_eq!(
            keys(&nbs),
            vec![('a', -1), ('a', 1), ('a', 3), ('a', 7), ('b', 2)]
        );
        assert_eq!(nbs.redirect_edges(&'x', &'a'), 0);
    }

    #[test]
    fn arr_neighborhood() {
        sorted_and_unique::<ArrNeighborhood<char, i32>>();
        queries::<ArrNeighborhood<char, i32>>();
        removal::<ArrNeighborhood<char, i32>>();
        redirect::<ArrNeighborhood<char, i32>>();
    }

    #[test]
    fn sparse_neighborhood() {
        sorted_and_unique::<SparseNeighborhood<char, i32>>();
        queries::<SparseNeighborhood<char, i32>>();
        removal::<SparseNeighborhood<char, i32, 1>>();
        redirect::<SparseNeighborhood<char, i32, 2>>();
    }
}

/*!
# Cursors over all edges

The edges of a [`DirectedGraph`] live in two levels: the registry of nodes and, per node, the
sorted edge set. A [`Cursor`] flattens both into a single sequence of `(src, dst, weight)` triples
ordered by source, then destination, then weight.

A cursor is a pair of positions: the current node and the index into its edge set. Nodes without
outgoing edges are skipped in both directions, hence a cursor that is not at the end always points
at an existing edge. The end position is one past the last node and is shared by all cursors of a
graph; it is the result of stepping past the last edge and the start of stepping backwards.

Cursors borrow the graph immutably and can therefore not outlive a mutation. To erase through a
position, take a detached [`Position`] first and hand it to [`DirectedGraph::erase_at`], which
returns a cursor to the successor of the erased edge.
*/

use std::{
    borrow::Borrow,
    collections::BTreeMap,
    fmt::Debug,
    iter::FusedIterator,
    marker::PhantomData,
    ops::Bound::{Excluded, Unbounded},
};

use super::*;

/// A bidirectional position in the composite edge order of a graph.
pub struct Cursor<'a, N, E, Nbs>
where
    N: NodeValue,
    E: Weight,
    Nbs: Neighborhood<N, E>,
{
    registry: &'a BTreeMap<N, Nbs>,
    /// `None` encodes the end position
    current: Option<(&'a N, &'a Nbs)>,
    edge: usize,
    _weight: PhantomData<E>,
}

/// An owned snapshot of a cursor position that does not borrow the graph.
#[derive(Clone, Debug, PartialEq)]
pub enum Position<N, E> {
    /// The position of the edge `(src, dst, weight)`
    Edge { src: N, dst: N, weight: E },
    /// The end position
    End,
}

impl<'a, N, E, Nbs> Cursor<'a, N, E, Nbs>
where
    N: NodeValue,
    E: Weight,
    Nbs: Neighborhood<N, E>,
{
    fn new(registry: &'a BTreeMap<N, Nbs>, current: Option<(&'a N, &'a Nbs)>, edge: usize) -> Self {
        Self {
            registry,
            current,
            edge,
            _weight: PhantomData,
        }
    }

    /// The end position
    pub(super) fn end(registry: &'a BTreeMap<N, Nbs>) -> Self {
        Self::new(registry, None, 0)
    }

    /// First edge of the first node with outgoing edges (or the end)
    pub(super) fn front(registry: &'a BTreeMap<N, Nbs>) -> Self {
        let current = registry.iter().find(|(_, nbs)| !nbs.is_empty());
        Self::new(registry, current, 0)
    }

    /// First edge of the first node with outgoing edges strictly after `u` (or the end)
    pub(super) fn after_node(registry: &'a BTreeMap<N, Nbs>, u: &N) -> Self {
        let current = registry
            .range::<N, _>((Excluded(u), Unbounded))
            .find(|(_, nbs)| !nbs.is_empty());
        Self::new(registry, current, 0)
    }

    /// Returns the edge at the current position or `None` at the end
    pub fn get(&self) -> Option<(&'a N, &'a N, &'a E)> {
        let (src, nbs) = self.current?;
        nbs.as_slice()
            .get(self.edge)
            .map(|e| (src, &e.dst, &e.weight))
    }

    /// Returns *true* if the cursor is at the end position
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Moves to the next edge in composite order, skipping nodes without outgoing edges.
    /// Moving past the last edge reaches the end; moving from the end has no effect.
    pub fn move_next(&mut self) {
        let Some((src, nbs)) = self.current else {
            return;
        };

        if self.edge + 1 < nbs.num_of_edges() {
            self.edge += 1;
        } else {
            *self = Self::after_node(self.registry, src);
        }
    }

    /// Moves to the previous edge in composite order, skipping nodes without outgoing edges.
    /// Moving back from the end reaches the last edge; moving back from the first edge (or from
    /// the end of a graph without edges) has no effect.
    pub fn move_prev(&mut self) {
        if self.current.is_some() && self.edge > 0 {
            self.edge -= 1;
            return;
        }

        let prev = match self.current {
            Some((src, _)) => self
                .registry
                .range::<N, _>((Unbounded, Excluded(src)))
                .rev()
                .find(|(_, nbs)| !nbs.is_empty()),
            None => self.registry.iter().rev().find(|(_, nbs)| !nbs.is_empty()),
        };

        if let Some((src, nbs)) = prev {
            self.current = Some((src, nbs));
            self.edge = nbs.num_of_edges() - 1;
        }
    }

    /// Returns an owned snapshot of the current position
    pub fn position(&self) -> Position<N, E> {
        match self.get() {
            Some((src, dst, weight)) => Position::Edge {
                src: src.clone(),
                dst: dst.clone(),
                weight: weight.clone(),
            },
            None => Position::End,
        }
    }
}

impl<N, E, Nbs> Clone for Cursor<'_, N, E, Nbs>
where
    N: NodeValue,
    E: Weight,
    Nbs: Neighborhood<N, E>,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<N, E, Nbs> Copy for Cursor<'_, N, E, Nbs>
where
    N: NodeValue,
    E: Weight,
    Nbs: Neighborhood<N, E>,
{
}

/// Two cursors are equal iff they belong to the same graph and both positions coincide
impl<N, E, Nbs> PartialEq for Cursor<'_, N, E, Nbs>
where
    N: NodeValue,
    E: Weight,
    Nbs: Neighborhood<N, E>,
{
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.registry, other.registry)
            && match (self.current, other.current) {
                (None, None) => true,
                (Some((u, _)), Some((v, _))) => std::ptr::eq(u, v) && self.edge == other.edge,
                _ => false,
            }
    }
}

impl<N, E, Nbs> Eq for Cursor<'_, N, E, Nbs>
where
    N: NodeValue,
    E: Weight,
    Nbs: Neighborhood<N, E>,
{
}

impl<N, E, Nbs> Debug for Cursor<'_, N, E, Nbs>
where
    N: NodeValue + Debug,
    E: Weight + Debug,
    Nbs: Neighborhood<N, E>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.get() {
            Some((src, dst, weight)) => write!(f, "Cursor({src:?},{dst:?},{weight:?})"),
            None => write!(f, "Cursor(end)"),
        }
    }
}

/// Double-ended iterator over all edges of a graph in composite order.
///
/// Created by [`DirectedGraph::iter`]; use `.rev()` for reverse iteration.
pub struct Edges<'a, N, E, Nbs>
where
    N: NodeValue,
    E: Weight,
    Nbs: Neighborhood<N, E>,
{
    front: Cursor<'a, N, E, Nbs>,
    back: Cursor<'a, N, E, Nbs>,
    remaining: usize,
}

impl<'a, N, E, Nbs> Iterator for Edges<'a, N, E, Nbs>
where
    N: NodeValue,
    E: Weight + 'a,
    Nbs: Neighborhood<N, E>,
{
    type Item = (&'a N, &'a N, &'a E);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let item = self.front.get();
        self.front.move_next();
        self.remaining -= 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, N, E, Nbs> DoubleEndedIterator for Edges<'a, N, E, Nbs>
where
    N: NodeValue,
    E: Weight + 'a,
    Nbs: Neighborhood<N, E>,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.back.move_prev();
        self.remaining -= 1;
        self.back.get()
    }
}

impl<'a, N, E, Nbs> ExactSizeIterator for Edges<'a, N, E, Nbs>
where
    N: NodeValue,
    E: Weight + 'a,
    Nbs: Neighborhood<N, E>,
{
}

impl<'a, N, E, Nbs> FusedIterator for Edges<'a, N, E, Nbs>
where
    N: NodeValue,
    E: Weight + 'a,
    Nbs: Neighborhood<N, E>,
{
}

impl<N: NodeValue, E: Weight, Nbs: Neighborhood<N, E>> DirectedGraph<N, E, Nbs> {
    /// Returns a cursor at the first edge in composite order, or the end cursor if there are no
    /// edges
    pub fn cursor_front(&self) -> Cursor<'_, N, E, Nbs> {
        Cursor::front(self.registry())
    }

    /// Returns the end cursor
    pub fn cursor_end(&self) -> Cursor<'_, N, E, Nbs> {
        Cursor::end(self.registry())
    }

    /// Returns an iterator over all edges as `(src, dst, weight)` in composite order
    pub fn iter(&self) -> Edges<'_, N, E, Nbs> {
        Edges {
            front: self.cursor_front(),
            back: self.cursor_end(),
            remaining: self.number_of_edges(),
        }
    }

    /// Returns a cursor at the edge `(u, v, weight)` or the end cursor if there is no such edge
    pub fn find<Q>(&self, u: &Q, v: &Q, weight: &E) -> Cursor<'_, N, E, Nbs>
    where
        N: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let registry = self.registry();
        registry
            .get_key_value(u)
            .and_then(|(src, nbs)| {
                nbs.position_of(v, weight)
                    .ok()
                    .map(|idx| Cursor::new(registry, Some((src, nbs)), idx))
            })
            .unwrap_or_else(|| Cursor::end(registry))
    }

    /// Re-derives a cursor from a detached position.
    /// Positions whose edge no longer exists map to the end cursor.
    pub fn cursor_at(&self, position: &Position<N, E>) -> Cursor<'_, N, E, Nbs> {
        match position {
            Position::Edge { src, dst, weight } => self.find(src, dst, weight),
            Position::End => self.cursor_end(),
        }
    }

    /// Erases the edge at `position` and returns a cursor to the edge following it in composite
    /// order. Returns the end cursor if `position` is the end or its edge does not exist.
    pub fn erase_at(&mut self, position: Position<N, E>) -> Cursor<'_, N, E, Nbs> {
        let Position::Edge { src, dst, weight } = position else {
            return self.cursor_end();
        };

        if !self.erase_edge(&src, &dst, &weight) {
            return self.cursor_end();
        }

        let registry = self.registry();
        match registry.get_key_value(&src) {
            Some((key, nbs)) => {
                let idx = nbs
                    .as_slice()
                    .partition_point(|e| e.cmp_key(&dst, &weight).is_le());

                if idx < nbs.num_of_edges() {
                    Cursor::new(registry, Some((key, nbs)), idx)
                } else {
                    Cursor::after_node(registry, key)
                }
            }
            None => Cursor::end(registry),
        }
    }
}

impl<'a, N: NodeValue, E: Weight, Nbs: Neighborhood<N, E>> IntoIterator
    for &'a DirectedGraph<N, E, Nbs>
{
    type Item = (&'a N, &'a N, &'a E);
    type IntoIter = Edges<'a, N, E, Nbs>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod test {
    use itertools::Itertools;

    use super::*;

    /// Nodes 0, 2, 4 and 6 have no outgoing edges
    fn sample() -> Graph<u32, f64> {
        let mut g = Graph::from_nodes(0..7);
        for (u, v, w) in [(5, 1, 0.5), (1, 3, 2.0), (1, 2, 1.0), (3, 3, 0.1), (1, 2, 0.5)] {
            assert!(g.insert_edge(&u, &v, w).unwrap());
        }
        g
    }

    #[test]
    fn empty_graph() {
        let mut g = Graph::<u32, u32>::new();
        assert_eq!(g.cursor_front(), g.cursor_end());
        assert!(g.cursor_front().get().is_none());
        assert_eq!(g.iter().count(), 0);
        assert_eq!(g.iter().rev().count(), 0);

        let mut end = g.cursor_end();
        end.move_prev();
        assert!(end.is_end());

        assert!(!g.erase_edge(&1, &2, &3));
        assert!(g.insert_edge(&1, &2, 3).is_err());
        assert!(!g.delete_node(&1));
        assert_eq!(g.cursor_front(), g.cursor_end());

        // nodes without edges do not produce positions
        g.insert_nodes([1, 2, 3]);
        assert_eq!(g.cursor_front(), g.cursor_end());
    }

    #[test]
    fn forward_skips_empty_nodes() {
        let g = sample();
        assert_eq!(
            g.iter().map(|(u, v, w)| (*u, *v, *w)).collect_vec(),
            vec![
                (1, 2, 0.5),
                (1, 2, 1.0),
                (1, 3, 2.0),
                (3, 3, 0.1),
                (5, 1, 0.5)
            ]
        );
        assert_eq!(g.iter().len(), 5);
    }

    #[test]
    fn backward_matches_forward() {
        let g = sample();
        let forward = g.iter().collect_vec();
        let mut backward = g.iter().rev().collect_vec();
        backward.reverse();
        assert_eq!(forward, backward);

        let mut cursor = g.cursor_end();
        for expected in forward.iter().rev() {
            cursor.move_prev();
            assert_eq!(cursor.get(), Some(*expected));
        }
    }

    #[test]
    fn meeting_in_the_middle() {
        let g = sample();
        let mut iter = g.iter();
        assert_eq!(iter.next().map(|(u, _, _)| *u), Some(1));
        assert_eq!(iter.next_back().map(|(u, _, _)| *u), Some(5));
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.by_ref().count(), 3);
        assert!(iter.next().is_none());
        assert!(iter.next_back().is_none());
    }

    #[test]
    fn find_and_equality() {
        let g = sample();
        let mut cursor = g.cursor_front();
        cursor.move_next();
        assert_eq!(cursor, g.find(&1, &2, &1.0));
        assert_ne!(cursor, g.find(&1, &2, &0.5));
        assert_eq!(g.find(&1, &2, &0.7), g.cursor_end());
        assert_eq!(g.find(&9, &2, &1.0), g.cursor_end());

        cursor.move_next();
        cursor.move_next();
        assert_eq!(cursor.get(), Some((&3, &3, &0.1)));
        cursor.move_next();
        cursor.move_next();
        assert!(cursor.is_end());
        cursor.move_next();
        assert_eq!(cursor, g.cursor_end());

        let other = sample();
        assert_ne!(g.cursor_front(), other.cursor_front());
    }

    #[test]
    fn positions_round_trip() {
        let g = sample();
        let cursor = g.find(&3, &3, &0.1);
        let position = cursor.position();
        assert_eq!(
            position,
            Position::Edge {
                src: 3,
                dst: 3,
                weight: 0.1
            }
        );
        assert_eq!(g.cursor_at(&position), cursor);
        assert_eq!(g.cursor_end().position(), Position::End);
        assert_eq!(g.cursor_at(&Position::End), g.cursor_end());
    }

    #[test]
    fn erase_at_returns_successor() {
        let mut g = sample();

        let next = g.erase_at(Position::Edge {
            src: 1,
            dst: 2,
            weight: 1.0,
        });
        assert_eq!(next.get(), Some((&1, &3, &2.0)));

        // erasing the last edge of a node continues at the next node with edges
        let next = g.erase_at(Position::Edge {
            src: 1,
            dst: 3,
            weight: 2.0,
        });
        assert_eq!(next.get(), Some((&3, &3, &0.1)));

        let next = g.erase_at(Position::Edge {
            src: 5,
            dst: 1,
            weight: 0.5,
        });
        assert!(next.is_end());

        let next = g.erase_at(Position::Edge {
            src: 5,
            dst: 1,
            weight: 0.5,
        });
        assert!(next.is_end());
        assert!(g.erase_at(Position::End).is_end());

        assert_eq!(g.number_of_edges(), 2);
    }

    #[test]
    fn erase_while_iterating() {
        let mut g = sample();
        let mut position = g.cursor_front().position();
        let mut erased = 0;
        while position != Position::End {
            position = g.erase_at(position).position();
            erased += 1;
        }
        assert_eq!(erased, 5);
        assert!(g.is_singleton_graph());
        assert_eq!(g.number_of_nodes(), 7);
    }

    #[test]
    fn into_iterator_for_reference() {
        let g = sample();
        let mut sources = Vec::new();
        for (u, _, _) in &g {
            sources.push(*u);
        }
        assert_eq!(sources, vec![1, 1, 1, 3, 5]);
    }
}

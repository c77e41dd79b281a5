use std::{
    borrow::Borrow,
    cmp::Ordering,
    fmt::{Debug, Display},
};

use crate::node::NodeValue;

/// Bounds required of an edge weight.
///
/// Weights only need `PartialOrd` so that floating point weights can be used directly.
/// Weights that are not comparable to themselves (e.g. `NaN`) are ordered after all other weights
/// and are equal only to each other.
pub trait Weight: PartialOrd + Clone {}

impl<E: PartialOrd + Clone> Weight for E {}

/// We count edges as `usize`, same as nodes.
pub type NumEdges = usize;

/// Total order on weights used by every edge set
#[inline]
pub fn cmp_weights<E: Weight>(a: &E, b: &E) -> Ordering {
    match a.partial_cmp(b) {
        Some(ord) => ord,
        None => is_incomparable(a).cmp(&is_incomparable(b)),
    }
}

#[inline]
fn is_incomparable<E: Weight>(w: &E) -> bool {
    w.partial_cmp(w).is_none()
}

/// An outgoing edge as stored in the edge set of its source node.
///
/// The destination is stored by value: it is the key of the destination node in the registry, not
/// a reference to it.
#[derive(Clone)]
pub struct OutEdge<N, E> {
    pub dst: N,
    pub weight: E,
}

impl<N, E> OutEdge<N, E> {
    /// Returns the destination in its borrowed form, e.g. `&str` for `String` nodes
    #[inline]
    pub fn dst_as<Q: ?Sized>(&self) -> &Q
    where
        N: Borrow<Q>,
    {
        self.dst.borrow()
    }
}

impl<N: NodeValue, E: Weight> OutEdge<N, E> {
    pub fn new(dst: N, weight: E) -> Self {
        Self { dst, weight }
    }

    /// Orders edges first by destination, then by weight
    pub fn cmp_key(&self, dst: &N, weight: &E) -> Ordering {
        self.dst
            .cmp(dst)
            .then_with(|| cmp_weights(&self.weight, weight))
    }

    /// Returns *true* if this edge points to `dst` with exactly `weight`
    pub fn matches(&self, dst: &N, weight: &E) -> bool {
        self.cmp_key(dst, weight).is_eq()
    }
}

/// Equality follows the edge order, so two `NaN` weights towards the same destination are equal
impl<N: NodeValue, E: Weight> PartialEq for OutEdge<N, E> {
    fn eq(&self, other: &Self) -> bool {
        self.matches(&other.dst, &other.weight)
    }
}

impl<N: NodeValue, E: Weight + Eq> Eq for OutEdge<N, E> {}

impl<N: Debug, E: Debug> Debug for OutEdge<N, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "->{:?}|{:?}", self.dst, self.weight)
    }
}

/// A fully qualified edge `(src, dst, weight)`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct WeightedEdge<N, E>(pub N, pub N, pub E);

impl<N, E> WeightedEdge<N, E> {
    /// Returns *true* if source and destination coincide
    pub fn is_loop(&self) -> bool
    where
        N: PartialEq,
    {
        self.0 == self.1
    }

    /// Reverses the edge by switching the endpoints; the weight is kept
    pub fn reverse(self) -> Self {
        WeightedEdge(self.1, self.0, self.2)
    }
}

impl<N: NodeValue, E: Weight> WeightedEdge<N, E> {
    /// Composite order: source, then destination, then weight
    pub fn cmp_composite(&self, other: &Self) -> Ordering {
        self.0
            .cmp(&other.0)
            .then_with(|| self.1.cmp(&other.1))
            .then_with(|| cmp_weights(&self.2, &other.2))
    }
}

impl<N: Display, E: Display> Display for WeightedEdge<N, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{},{})", self.0, self.1, self.2)
    }
}

impl<N: Debug, E: Debug> Debug for WeightedEdge<N, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?},{:?},{:?})", self.0, self.1, self.2)
    }
}

impl<N, E> From<(N, N, E)> for WeightedEdge<N, E> {
    fn from(value: (N, N, E)) -> Self {
        WeightedEdge(value.0, value.1, value.2)
    }
}

impl<N: Clone, E: Clone> From<&(N, N, E)> for WeightedEdge<N, E> {
    fn from(value: &(N, N, E)) -> Self {
        WeightedEdge(value.0.clone(), value.1.clone(), value.2.clone())
    }
}

impl<N: Clone, E: Clone> From<(&N, &N, &E)> for WeightedEdge<N, E> {
    fn from(value: (&N, &N, &E)) -> Self {
        WeightedEdge(value.0.clone(), value.1.clone(), value.2.clone())
    }
}

impl<N: Clone, E: Clone> From<&WeightedEdge<N, E>> for WeightedEdge<N, E> {
    fn from(value: &WeightedEdge<N, E>) -> Self {
        value.clone()
    }
}

impl<N, E> From<WeightedEdge<N, E>> for (N, N, E) {
    fn from(value: WeightedEdge<N, E>) -> Self {
        (value.0, value.1, value.2)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn out_edge_order() {
        let e = OutEdge::new(2, 1.5);
        assert!(e.cmp_key(&3, &0.0).is_lt());
        assert!(e.cmp_key(&2, &1.0).is_gt());
        assert!(e.matches(&2, &1.5));
        assert!(!e.matches(&2, &1.4));
    }

    #[test]
    fn nan_weights_sort_last() {
        assert_eq!(cmp_weights(&f64::NAN, &1.0), Ordering::Greater);
        assert_eq!(cmp_weights(&f64::INFINITY, &f64::NAN), Ordering::Less);
        assert_eq!(cmp_weights(&f64::NAN, &f64::NAN), Ordering::Equal);
        assert_eq!(cmp_weights(&0.5, &1.0), Ordering::Less);

        let mut weights = vec![f64::NAN, 2.0, -1.0, f64::NAN, 0.0];
        weights.sort_by(cmp_weights);
        assert_eq!(weights[..3], [-1.0, 0.0, 2.0]);
        assert!(weights[3..].iter().all(|w| w.is_nan()));

        assert_eq!(OutEdge::new(1, f64::NAN), OutEdge::new(1, f64::NAN));
        assert_ne!(OutEdge::new(1, f64::NAN), OutEdge::new(1, 0.0));
        assert_ne!(OutEdge::new(1, f64::NAN), OutEdge::new(2, f64::NAN));
    }

    #[test]
    fn weighted_edge_display() {
        let e = WeightedEdge("a", "b", 3);
        assert_eq!(e.to_string(), "(a,b,3)");
        assert_eq!(e.clone().reverse(), WeightedEdge("b", "a", 3));
        assert!(!e.is_loop());
        assert!(WeightedEdge(1, 1, 0).is_loop());
    }

    #[test]
    fn composite_order() {
        let a = WeightedEdge(1, 2, 0.5);
        assert!(a.cmp_composite(&WeightedEdge(1, 2, 0.7)).is_lt());
        assert!(a.cmp_composite(&WeightedEdge(1, 1, 9.0)).is_gt());
        assert!(a.cmp_composite(&WeightedEdge(0, 9, 9.0)).is_gt());
    }
}

use crate::types::{Class, ParticleId};

/// An unordered proximity pair, stored with `a < b` so each pair has a
/// single representative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub a: ParticleId,
    pub b: ParticleId,
    pub class: Class,
}

/// Reusable scratch list for the proximity graph of one tick.
///
/// Edges are rebuilt from scratch every tick; the backing allocation is
/// kept across ticks so steady-state operation does not allocate unless
/// the edge count grows past the high-water mark.
#[derive(Debug, Default)]
pub struct EdgeList {
    edges: Vec<Edge>,
}

impl EdgeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all edges but keeps the allocation.
    pub fn clear(&mut self) {
        self.edges.clear();
    }

    /// Appends an edge. Endpoints must already be ordered.
    ///
    /// ### Panics
    /// Panics if `a >= b` (self-pair or unnormalized pair).
    #[inline]
    pub fn push(&mut self, a: ParticleId, b: ParticleId, class: Class) {
        assert!(a < b, "edge endpoints must satisfy a < b");
        self.edges.push(Edge { a, b, class });
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn capacity(&self) -> usize {
        self.edges.capacity()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn as_slice(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns `(primary, secondary)` edge counts for the current tick.
    pub fn class_counts(&self) -> (usize, usize) {
        let secondary = self
            .edges
            .iter()
            .filter(|e| e.class == Class::Secondary)
            .count();
        (self.edges.len() - secondary, secondary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_counts() {
        let mut edges = EdgeList::new();
        assert!(edges.is_empty());

        edges.push(0, 1, Class::Primary);
        edges.push(1, 3, Class::Secondary);
        edges.push(2, 3, Class::Primary);

        assert_eq!(edges.len(), 3);
        assert_eq!(edges.class_counts(), (2, 1));
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut edges = EdgeList::new();
        for i in 0..16 {
            edges.push(i, i + 1, Class::Primary);
        }
        let cap = edges.capacity();
        edges.clear();

        assert!(edges.is_empty());
        assert_eq!(edges.capacity(), cap);
    }

    #[test]
    #[should_panic]
    fn self_pair_is_rejected() {
        let mut edges = EdgeList::new();
        edges.push(2, 2, Class::Primary);
    }

    #[test]
    #[should_panic]
    fn unordered_pair_is_rejected() {
        let mut edges = EdgeList::new();
        edges.push(3, 1, Class::Primary);
    }
}

//! Shared mutable state the algorithms narrate over.
//!
//! Purpose
//! - `Scene` is the explicit context object handed to every steppable
//!   computation: the point set (with per-point role tags and display
//!   numbers) plus the working edge collection.
//! - Points carry a stable `index` assigned at creation; algorithms refer to
//!   points by index only, so the one reordering Graham scan performs (pivot
//!   into slot 0) never changes identities.
//!
//! The edge collection is keyed symmetrically: `EdgeKey::new(a, b)` equals
//! `EdgeKey::new(b, a)`, giving O(1) insert/lookup/remove either way round.
//! Mid-run it is just the algorithm's current guess and need not form a
//! polygon; only the terminal collection must trace into one simple cycle.

use std::collections::HashMap;

use nalgebra::Vector2;

/// Ephemeral per-point annotation used purely for step narration.
/// Never affects an algorithm's outcome; reset to `Neutral` between runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Role {
    #[default]
    Neutral,
    Pivot,
    Candidate,
    Accepted,
    Rejected,
    Left,
    Right,
}

/// One input point: position, stable identity, presentation state.
#[derive(Clone, Debug)]
pub struct Point {
    pub pos: Vector2<f64>,
    pub index: usize,
    pub role: Role,
    pub number: Option<usize>,
}

/// Unordered pair of point indices with a symmetric identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeKey(usize, usize);

impl EdgeKey {
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }
    #[inline]
    pub fn endpoints(self) -> (usize, usize) {
        (self.0, self.1)
    }
}

/// Trial edges are under test and usually removed again; hull edges are the
/// accepted boundary (the original drew them magenta and green).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeStatus {
    Trial,
    Hull,
}

#[derive(Clone, Copy, Debug)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub status: EdgeStatus,
}

/// Point set plus working edge collection.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    points: Vec<Point>,
    // slot[index] = position of that point in `points`
    slot: Vec<usize>,
    edges: HashMap<EdgeKey, Edge>,
}

impl Scene {
    /// Create a scene over `positions`; indices are assigned sequentially
    /// and never reused.
    pub fn new(positions: &[Vector2<f64>]) -> Self {
        let points = positions
            .iter()
            .enumerate()
            .map(|(index, &pos)| Point {
                pos,
                index,
                role: Role::Neutral,
                number: None,
            })
            .collect::<Vec<_>>();
        let slot = (0..points.len()).collect();
        Self {
            points,
            slot,
            edges: HashMap::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn pos(&self, index: usize) -> Vector2<f64> {
        self.points[self.slot[index]].pos
    }

    #[inline]
    pub fn role(&self, index: usize) -> Role {
        self.points[self.slot[index]].role
    }

    #[inline]
    pub fn set_role(&mut self, index: usize, role: Role) {
        let s = self.slot[index];
        self.points[s].role = role;
    }

    #[inline]
    pub fn set_number(&mut self, index: usize, number: usize) {
        let s = self.slot[index];
        self.points[s].number = Some(number);
    }

    /// Stable index of the point currently stored at array position `slot`.
    #[inline]
    pub fn index_at(&self, slot: usize) -> usize {
        self.points[slot].index
    }

    /// Swap two array positions. Identities travel with the points; this is
    /// the one in-place reordering Graham scan is allowed.
    pub fn swap(&mut self, s1: usize, s2: usize) {
        self.points.swap(s1, s2);
        self.slot[self.points[s1].index] = s1;
        self.slot[self.points[s2].index] = s2;
    }

    /// Assign sequential display numbers in array order.
    pub fn assign_numbers(&mut self) {
        for (n, p) in self.points.iter_mut().enumerate() {
            p.number = Some(n);
        }
    }

    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    pub fn insert_edge(&mut self, a: usize, b: usize, status: EdgeStatus) {
        self.edges.insert(EdgeKey::new(a, b), Edge { a, b, status });
    }

    pub fn remove_edge(&mut self, a: usize, b: usize) -> Option<Edge> {
        self.edges.remove(&EdgeKey::new(a, b))
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.edges.contains_key(&EdgeKey::new(a, b))
    }

    pub fn edge_status(&self, a: usize, b: usize) -> Option<EdgeStatus> {
        self.edges.get(&EdgeKey::new(a, b)).map(|e| e.status)
    }

    pub fn set_edge_status(&mut self, a: usize, b: usize, status: EdgeStatus) {
        if let Some(e) = self.edges.get_mut(&EdgeKey::new(a, b)) {
            e.status = status;
        }
    }

    /// Promote every remaining edge to hull status.
    pub fn finalize_edges(&mut self) {
        for e in self.edges.values_mut() {
            e.status = EdgeStatus::Hull;
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Index pairs of all hull-status edges, in unspecified order.
    pub fn hull_edges(&self) -> Vec<(usize, usize)> {
        self.edges
            .values()
            .filter(|e| e.status == EdgeStatus::Hull)
            .map(|e| (e.a, e.b))
            .collect()
    }

    /// Sorted indices of every point touched by a hull edge.
    pub fn hull_vertices(&self) -> Vec<usize> {
        let mut v: Vec<usize> = self
            .hull_edges()
            .into_iter()
            .flat_map(|(a, b)| [a, b])
            .collect();
        v.sort_unstable();
        v.dedup();
        v
    }

    /// Trace the hull edges into a single simple cycle starting from the
    /// smallest vertex index. `None` if the edges do not close into exactly
    /// one cycle with every vertex of degree two.
    pub fn hull_cycle(&self) -> Option<Vec<usize>> {
        trace_cycle(&self.hull_edges())
    }

    /// Return the scene to the clean state between runs: empty edge
    /// collection, neutral role and no number on every point. Array order is
    /// deliberately left as-is; identities are index-based.
    pub fn reset(&mut self) {
        self.edges.clear();
        for p in &mut self.points {
            p.role = Role::Neutral;
            p.number = None;
        }
    }
}

/// Trace unordered index pairs into one simple cycle (smallest index first,
/// direction chosen toward its smaller neighbor). `None` unless every vertex
/// has degree exactly two and a single walk covers all edges.
pub fn trace_cycle(edges: &[(usize, usize)]) -> Option<Vec<usize>> {
    if edges.len() < 3 {
        return None;
    }
    let mut adj: HashMap<usize, Vec<usize>> = HashMap::new();
    for &(a, b) in edges {
        adj.entry(a).or_default().push(b);
        adj.entry(b).or_default().push(a);
    }
    if adj.values().any(|n| n.len() != 2) {
        return None;
    }
    let start = *adj.keys().min()?;
    let mut cycle = vec![start];
    let first = &adj[&start];
    let mut prev = start;
    let mut cur = first[0].min(first[1]);
    while cur != start {
        cycle.push(cur);
        let ns = &adj[&cur];
        let next = if ns[0] == prev { ns[1] } else { ns[0] };
        prev = cur;
        cur = next;
        if cycle.len() > edges.len() {
            return None;
        }
    }
    if cycle.len() == edges.len() {
        Some(cycle)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    fn square() -> Scene {
        Scene::new(&[
            Vector2::new(0.0, 0.0),
            Vector2::new(4.0, 0.0),
            Vector2::new(4.0, 4.0),
            Vector2::new(0.0, 4.0),
        ])
    }

    #[test]
    fn edge_key_is_symmetric() {
        assert_eq!(EdgeKey::new(3, 7), EdgeKey::new(7, 3));
        let mut sc = square();
        sc.insert_edge(0, 1, EdgeStatus::Trial);
        assert!(sc.has_edge(1, 0));
        assert!(sc.remove_edge(1, 0).is_some());
        assert_eq!(sc.edge_count(), 0);
    }

    #[test]
    fn swap_keeps_identities() {
        let mut sc = square();
        sc.swap(0, 2);
        assert_eq!(sc.index_at(0), 2);
        assert_eq!(sc.pos(0), Vector2::new(0.0, 0.0));
        assert_eq!(sc.pos(2), Vector2::new(4.0, 4.0));
    }

    #[test]
    fn reset_clears_presentation_state() {
        let mut sc = square();
        sc.assign_numbers();
        sc.set_role(1, Role::Accepted);
        sc.insert_edge(0, 1, EdgeStatus::Hull);
        sc.reset();
        assert_eq!(sc.edge_count(), 0);
        assert!(sc.points().all(|p| p.role == Role::Neutral));
        assert!(sc.points().all(|p| p.number.is_none()));
    }

    #[test]
    fn cycle_traces_square() {
        let mut sc = square();
        for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
            sc.insert_edge(a, b, EdgeStatus::Hull);
        }
        assert_eq!(sc.hull_cycle(), Some(vec![0, 1, 2, 3]));
        assert_eq!(sc.hull_vertices(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn broken_cycle_is_rejected() {
        // two disjoint triangles: every degree is two but the walk does not
        // cover all edges
        let edges = [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)];
        assert_eq!(trace_cycle(&edges), None);
        // open chain
        assert_eq!(trace_cycle(&[(0, 1), (1, 2), (2, 3)]), None);
    }
}

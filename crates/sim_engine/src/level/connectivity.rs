//! Room graph connectivity
//!
//! Rooms are linked by a minimum spanning tree over center distances
//! (Kruskal with a union-find), plus a few of the shortest remaining edges
//! so the level has loops instead of only dead ends.

use super::room::{Corridor, Room};
use crate::foundation::math::{Vec3, Vec3Ext};
use log::debug;
use std::cmp::Ordering;

/// Disjoint-set forest with path compression
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    /// `len` singleton sets
    pub fn new(len: usize) -> Self {
        Self { parent: (0..len).collect() }
    }

    /// Representative of the set containing `x`
    ///
    /// Iterative: walks to the root, then points every visited node at it.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Merge the sets containing `a` and `b`
    ///
    /// Returns `false` if they were already in the same set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }
        self.parent[root_a] = root_b;
        true
    }
}

/// Weighted undirected edge between two room indices (`a < b`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Lower room index
    pub a: usize,
    /// Higher room index
    pub b: usize,
    /// Distance between room centers
    pub distance: f32,
}

/// Every room pair, sorted by ascending center distance
///
/// The sort is stable, so equal distances keep `(i, j)` lexicographic order.
pub fn sorted_edges(rooms: &[Room]) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(rooms.len() * rooms.len().saturating_sub(1) / 2);
    for i in 0..rooms.len() {
        for j in (i + 1)..rooms.len() {
            edges.push(Edge { a: i, b: j, distance: rooms[i].distance_to(&rooms[j]) });
        }
    }
    edges.sort_by(|x, y| x.distance.partial_cmp(&y.distance).unwrap_or(Ordering::Equal));
    edges
}

/// Kruskal's algorithm over pre-sorted edges
///
/// Returns the edges that joined two previously separate sets, in the order
/// they were accepted.
pub fn minimum_spanning_tree(room_count: usize, sorted: &[Edge]) -> Vec<Edge> {
    let mut sets = DisjointSet::new(room_count);
    sorted
        .iter()
        .filter(|edge| sets.union(edge.a, edge.b))
        .copied()
        .collect()
}

/// Shortest edges not already in the tree
///
/// Takes `max(1, floor(ratio * tree.len()))` of them, fewer if the graph has
/// no more edges.
pub fn loop_edges(sorted: &[Edge], tree: &[Edge], ratio: f32) -> Vec<Edge> {
    let wanted = ((tree.len() as f32 * ratio).floor() as usize).max(1);
    sorted
        .iter()
        .filter(|edge| !tree.iter().any(|t| t.a == edge.a && t.b == edge.b))
        .take(wanted)
        .copied()
        .collect()
}

/// L-shaped path: along X to the end room's X, then straight to its center
pub fn corridor_path(start: Vec3, end: Vec3) -> Vec<Vec3> {
    vec![start, Vec3::new(end.x, start.y, start.z), end]
}

/// Corridor dimensions used when synthesizing paths
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorridorStyle {
    /// Corridor width
    pub width: f32,
    /// Corridor height
    pub height: f32,
    /// Fraction of tree edges added back as loop edges
    pub extra_edge_ratio: f32,
}

impl Default for CorridorStyle {
    fn default() -> Self {
        Self { width: 2.0, height: 3.0, extra_edge_ratio: 0.1 }
    }
}

/// Link `rooms` with corridors and record connections on both ends
///
/// Fewer than two rooms produce no corridors.
pub fn connect(rooms: &mut [Room], style: &CorridorStyle) -> Vec<Corridor> {
    if rooms.len() < 2 {
        return Vec::new();
    }

    let edges = sorted_edges(rooms);
    let tree = minimum_spanning_tree(rooms.len(), &edges);
    let extra = loop_edges(&edges, &tree, style.extra_edge_ratio);

    debug!(
        "connecting {} rooms: {} tree edges, {} loop edges",
        rooms.len(),
        tree.len(),
        extra.len()
    );

    tree.iter()
        .chain(extra.iter())
        .map(|edge| {
            rooms[edge.a].connections.insert(edge.b);
            rooms[edge.b].connections.insert(edge.a);
            Corridor {
                start_room: edge.a,
                end_room: edge.b,
                width: style.width,
                height: style.height,
                path_points: corridor_path(rooms[edge.a].center(), rooms[edge.b].center()),
            }
        })
        .collect()
}

/// Sum of edge distances
pub fn total_distance(edges: &[Edge]) -> f32 {
    edges.iter().map(|e| e.distance).sum()
}

/// Whether every room is reachable from room 0 through the corridors
pub fn is_connected(room_count: usize, corridors: &[Corridor]) -> bool {
    if room_count == 0 {
        return true;
    }
    let mut sets = DisjointSet::new(room_count);
    for corridor in corridors {
        sets.union(corridor.start_room, corridor.end_room);
    }
    let root = sets.find(0);
    (1..room_count).all(|i| sets.find(i) == root)
}

/// Straight-line distance between the two end points of a corridor
pub fn corridor_span(corridor: &Corridor) -> f32 {
    match (corridor.path_points.first(), corridor.path_points.last()) {
        (Some(start), Some(end)) => start.distance_to(end),
        _ => 0.0,
    }
}

/*!
# Shortest Paths

Single-source shortest paths in the style of Dijkstra. Weighted queries use
a binary heap with lazy deletion (an improved distance pushes a fresh entry,
stale entries are skipped on pop); unweighted queries take a plain BFS fast
path since every edge costs 1. Directed graphs relax outgoing edges only,
undirected graphs the full incidence.

Unreachable destinations are data, not errors: they come back as `None`.
*/

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use fxhash::FxHashMap;
use itertools::Either;

use crate::{ids::*, ops::GraphOps};

/// How a vertex was reached on a shortest path from the source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Predecessor {
    /// The edge to the predecessor vertex, `None` for the source itself.
    pub edge: Option<EdgeId>,
    /// Total path weight from the source.
    pub weight: f64,
}

/// Min-heap entry; the reversed ordering turns `BinaryHeap` into a min-heap.
struct QueueEntry {
    weight: f64,
    vertex: VertexId,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

/// Single-source shortest-path computation with optional edge weights and
/// optional per-source result caching.
pub struct Dijkstra<'g, G: GraphOps> {
    graph: &'g G,
    /// Per-edge weights indexed by edge id; edges beyond the slice default
    /// to weight 1. `None` means every edge costs 1.
    weights: Option<&'g [f64]>,
    cache: Option<FxHashMap<VertexId, FxHashMap<VertexId, Predecessor>>>,
}

impl<'g, G: GraphOps> Dijkstra<'g, G> {
    /// Unit edge weights, results cached across calls.
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            weights: None,
            cache: Some(FxHashMap::default()),
        }
    }

    /// Uses `weights[edge]` as the (non-negative) cost of each edge.
    pub fn with_weights(graph: &'g G, weights: &'g [f64]) -> Self {
        Self {
            graph,
            weights: Some(weights),
            cache: Some(FxHashMap::default()),
        }
    }

    /// Enables or disables caching of per-source results. Disabling drops
    /// everything cached so far.
    pub fn set_cached(&mut self, cached: bool) {
        if cached {
            if self.cache.is_none() {
                self.cache = Some(FxHashMap::default());
            }
        } else {
            self.cache = None;
        }
    }

    /// Returns the shortest path to `to`, or `None` if `to` is unreachable
    /// from `from` or either vertex is invalid.
    pub fn shortest_path(&mut self, from: VertexId, to: VertexId) -> Option<Predecessor> {
        if let Some(map) = self.cache.as_ref().and_then(|c| c.get(&from)) {
            return map.get(&to).copied();
        }
        let map = self.compute(from);
        let result = map.get(&to).copied();
        if let Some(cache) = &mut self.cache {
            cache.insert(from, map);
        }
        result
    }

    /// Returns every vertex reachable from `from` with its path weight and
    /// predecessor edge. The source itself maps to weight 0.
    pub fn all_shortest_paths(&mut self, from: VertexId) -> FxHashMap<VertexId, Predecessor> {
        if let Some(map) = self.cache.as_ref().and_then(|c| c.get(&from)) {
            return map.clone();
        }
        let map = self.compute(from);
        if let Some(cache) = &mut self.cache {
            cache.insert(from, map.clone());
        }
        map
    }

    fn edge_weight(&self, edge: EdgeId) -> f64 {
        self.weights
            .and_then(|w| w.get(edge as usize))
            .copied()
            .unwrap_or(1.0)
    }

    fn relax_edges(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        if self.graph.is_directed() {
            Either::Left(self.graph.out_edges(v))
        } else {
            Either::Right(self.graph.edges_of(v))
        }
    }

    fn compute(&self, from: VertexId) -> FxHashMap<VertexId, Predecessor> {
        let mut best = FxHashMap::default();
        if !self.graph.is_vertex(from) {
            return best;
        }
        if self.weights.is_none() {
            self.compute_bfs(from, &mut best);
            return best;
        }

        best.insert(
            from,
            Predecessor {
                edge: None,
                weight: 0.0,
            },
        );
        let mut queue = BinaryHeap::new();
        queue.push(QueueEntry {
            weight: 0.0,
            vertex: from,
        });

        while let Some(QueueEntry { weight, vertex: v }) = queue.pop() {
            if best.get(&v).is_some_and(|p| p.weight < weight) {
                continue; // stale entry, already settled cheaper
            }
            for edge in self.relax_edges(v) {
                let Some(v2) = self.graph.other_vertex(edge, v) else {
                    continue;
                };
                let d = weight + self.edge_weight(edge);
                if best.get(&v2).is_none_or(|p| p.weight > d) {
                    best.insert(
                        v2,
                        Predecessor {
                            edge: Some(edge),
                            weight: d,
                        },
                    );
                    queue.push(QueueEntry { weight: d, vertex: v2 });
                }
            }
        }
        best
    }

    fn compute_bfs(&self, from: VertexId, best: &mut FxHashMap<VertexId, Predecessor>) {
        best.insert(
            from,
            Predecessor {
                edge: None,
                weight: 0.0,
            },
        );
        let mut queue = VecDeque::new();
        queue.push_back((from, 0.0));
        while let Some((v, weight)) = queue.pop_front() {
            let d = weight + 1.0;
            for edge in self.relax_edges(v) {
                let Some(v2) = self.graph.other_vertex(edge, v) else {
                    continue;
                };
                if !best.contains_key(&v2) {
                    best.insert(
                        v2,
                        Predecessor {
                            edge: Some(edge),
                            weight: d,
                        },
                    );
                    queue.push_back((v2, d));
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::LinkedGraph;
    use itertools::Itertools;

    #[test]
    fn directed_path_distances() {
        let mut g = LinkedGraph::new(true);
        let vs = (0..3).map(|_| g.add_vertex()).collect_vec();
        g.add_edge(vs[0], vs[1]).unwrap();
        g.add_edge(vs[1], vs[2]).unwrap();

        let mut sp = Dijkstra::new(&g);
        assert_eq!(sp.shortest_path(vs[0], vs[0]).unwrap().weight, 0.0);
        assert_eq!(sp.shortest_path(vs[0], vs[1]).unwrap().weight, 1.0);
        assert_eq!(sp.shortest_path(vs[0], vs[2]).unwrap().weight, 2.0);
        // edges are not walked backwards in a directed graph
        assert!(sp.shortest_path(vs[2], vs[0]).is_none());
    }

    #[test]
    fn undirected_traversal_uses_both_chains() {
        let mut g = LinkedGraph::new(false);
        let vs = (0..3).map(|_| g.add_vertex()).collect_vec();
        g.add_edge(vs[1], vs[0]).unwrap();
        g.add_edge(vs[2], vs[1]).unwrap();

        let mut sp = Dijkstra::new(&g);
        assert_eq!(sp.shortest_path(vs[2], vs[0]).unwrap().weight, 2.0);
        assert_eq!(sp.shortest_path(vs[0], vs[2]).unwrap().weight, 2.0);
    }

    #[test]
    fn weighted_detour_beats_heavy_edge() {
        let mut g = LinkedGraph::new(true);
        let vs = (0..3).map(|_| g.add_vertex()).collect_vec();
        let heavy = g.add_edge(vs[0], vs[2]).unwrap();
        let hop1 = g.add_edge(vs[0], vs[1]).unwrap();
        let hop2 = g.add_edge(vs[1], vs[2]).unwrap();

        let mut weights = vec![0.0; 3];
        weights[heavy as usize] = 10.0;
        weights[hop1 as usize] = 1.0;
        weights[hop2 as usize] = 2.0;

        let mut sp = Dijkstra::with_weights(&g, &weights);
        let p = sp.shortest_path(vs[0], vs[2]).unwrap();
        assert_eq!(p.weight, 3.0);
        assert_eq!(p.edge, Some(hop2));
    }

    #[test]
    fn parallel_edges_pick_the_lighter_one() {
        let mut g = LinkedGraph::new(true);
        let v0 = g.add_vertex();
        let v1 = g.add_vertex();
        let e0 = g.add_edge(v0, v1).unwrap();
        let e1 = g.add_edge(v0, v1).unwrap();

        let weights = [5.0, 2.0];
        let mut sp = Dijkstra::with_weights(&g, &weights);
        let p = sp.shortest_path(v0, v1).unwrap();
        assert_eq!(p.weight, 2.0);
        assert_eq!(p.edge, Some(e1));
        assert_ne!(p.edge, Some(e0));
    }

    #[test]
    fn unreachable_is_none_and_cache_is_consistent() {
        let mut g = LinkedGraph::new(false);
        let v0 = g.add_vertex();
        let v1 = g.add_vertex();
        let lone = g.add_vertex();
        g.add_edge(v0, v1).unwrap();

        let mut sp = Dijkstra::new(&g);
        assert!(sp.shortest_path(v0, lone).is_none());
        // second query hits the cached map, same answer
        assert!(sp.shortest_path(v0, lone).is_none());
        assert_eq!(sp.shortest_path(v0, v1).unwrap().weight, 1.0);

        sp.set_cached(false);
        assert_eq!(sp.shortest_path(v0, v1).unwrap().weight, 1.0);
    }

    #[test]
    fn all_shortest_paths_covers_the_component() {
        let mut g = LinkedGraph::new(false);
        let vs = (0..4).map(|_| g.add_vertex()).collect_vec();
        g.add_edge(vs[0], vs[1]).unwrap();
        g.add_edge(vs[1], vs[2]).unwrap();

        let mut sp = Dijkstra::new(&g);
        let map = sp.all_shortest_paths(vs[0]);
        assert_eq!(map.len(), 3);
        assert!(!map.contains_key(&vs[3]));
        assert_eq!(map[&vs[2]].weight, 2.0);
    }
}

/*!
# Graph Statistics

Clustering coefficients, average shortest-path distances and the diameter.
Distance-based statistics run one shortest-path computation per vertex, so
they are quadratic in the vertex count and meant for analysis, not hot paths.
*/

use fxhash::FxHashSet;
use itertools::Itertools;

use crate::{algo::Dijkstra, ids::*, ops::GraphOps};

/// Statistical measures over any [`GraphOps`] implementation.
pub trait Statistics: GraphOps + Sized {
    /// Computes, per vertex in iteration order, the fraction of edges that
    /// exist among its neighbors out of all possible neighbor pairs.
    ///
    /// A vertex with exactly one neighbor has coefficient 1.0 by definition.
    /// A vertex with no neighbors yields NaN (0 actual over 0 possible).
    fn clustering_coefficients(&self) -> Vec<f64> {
        self.vertices()
            .map(|v| {
                let neighbors: Vec<_> = self
                    .neighbors_of(v)
                    .collect::<FxHashSet<_>>()
                    .into_iter()
                    .collect();
                if neighbors.len() == 1 {
                    return 1.0;
                }
                let linked = neighbors
                    .iter()
                    .tuple_combinations()
                    .filter(|&(&v1, &v2)| {
                        self.get_edge(v1, v2).is_some() || self.get_edge(v2, v1).is_some()
                    })
                    .count();
                let possible = neighbors.len() * (neighbors.len() - 1) / 2;
                linked as f64 / possible as f64
            })
            .collect()
    }

    /// Computes, per vertex in iteration order, the average shortest-path
    /// distance to every other vertex. Returns `None` as soon as any pair
    /// is unreachable: the average is undefined on a disconnected graph.
    fn average_distances(&self) -> Option<Vec<f64>> {
        let mut sp = Dijkstra::new(self);
        let n = self.vertices_count();
        let mut distances = Vec::with_capacity(n as usize);
        for v in self.vertices().collect_vec() {
            let mut total = 0.0;
            for u in self.vertices().collect_vec() {
                if u == v {
                    continue;
                }
                total += sp.shortest_path(v, u)?.weight;
            }
            distances.push(total / (n as f64 - 1.0));
        }
        Some(distances)
    }

    /// Computes the diameter: the maximum finite shortest-path weight over
    /// all vertex pairs. Unreachable pairs are skipped, so a disconnected
    /// graph reports the largest diameter among its components.
    fn diameter(&self) -> f64 {
        let mut sp = Dijkstra::new(self);
        let vs = self.vertices().collect_vec();
        let mut diameter = 0.0f64;
        for (i, &v1) in vs.iter().enumerate() {
            for &v2 in &vs[i + 1..] {
                if let Some(p) = sp.shortest_path(v1, v2) {
                    diameter = diameter.max(p.weight);
                }
            }
        }
        diameter
    }
}

impl<G: GraphOps> Statistics for G {}

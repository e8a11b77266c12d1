/*!
# Bandwidth Reduction

Reverse Cuthill-McKee: a BFS ordering seeded and expanded in ascending
degree order, reversed at the end. Renumbering vertices along this ordering
tends to pull the endpoints of every edge close together, shrinking the
bandwidth of the adjacency matrix.
*/

use std::collections::VecDeque;

use itertools::Itertools;

use crate::{ids::*, ops::GraphOps};

/// Bandwidth queries and the reverse Cuthill-McKee ordering.
pub trait CuthillMcKee: GraphOps + Sized {
    /// Computes the reverse Cuthill-McKee ordering: position `i` of the
    /// returned vector holds the vertex placed at index `i`. Every valid
    /// vertex appears exactly once, isolated vertices included.
    fn cuthill_mckee(&self) -> Vec<VertexId> {
        // degrees are queried per neighbor visit, memoize them once
        let mut degree = vec![0; self.vertices_high() as usize];
        for v in self.vertices() {
            degree[v as usize] = self.degree(v);
        }

        let seeds = self
            .vertices()
            .sorted_by_key(|&v| (degree[v as usize], v))
            .collect_vec();

        let mut placed = self.vertex_bitset_unset();
        let mut ordering = Vec::with_capacity(self.vertices_count() as usize);
        let mut queue = VecDeque::new();

        for &seed in &seeds {
            if placed.get_bit(seed) {
                continue;
            }
            queue.push_back(seed);
            while let Some(v) = queue.pop_front() {
                if placed.get_bit(v) {
                    continue;
                }
                placed.set_bit(v);
                ordering.push(v);

                // queued duplicates are caught by the placed recheck above
                let expansion = self
                    .neighbors_of(v)
                    .filter(|&u| !placed.get_bit(u))
                    .sorted_by_key(|&u| (degree[u as usize], u));
                queue.extend(expansion);
            }
        }

        ordering.reverse();
        ordering
    }

    /// Computes the bandwidth, the maximum index distance between the two
    /// endpoints of any edge. With `ordering` the distance is measured
    /// between positions in the ordering, without it between raw vertex ids.
    fn compute_bandwidth(&self, ordering: Option<&[VertexId]>) -> Row {
        let position = ordering.map(|ord| {
            let mut pos = vec![0 as Row; self.vertices_high() as usize];
            for (i, &v) in ord.iter().enumerate() {
                pos[v as usize] = i as Row;
            }
            pos
        });

        let mut max = 0;
        for edge in self.edges() {
            let (Some(v1), Some(v2)) = (self.first_vertex(edge), self.second_vertex(edge)) else {
                continue;
            };
            let dist = match &position {
                None => v1.abs_diff(v2),
                Some(pos) => pos[v1 as usize].abs_diff(pos[v2 as usize]),
            };
            max = max.max(dist);
        }
        max
    }
}

impl<G: GraphOps> CuthillMcKee for G {}

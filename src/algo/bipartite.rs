/*!
# Bipartite Detection

Iterative 2-coloring with an explicit stack of (vertex, color) pairs. Every
uncolored vertex seeds a new traversal, so disconnected graphs are covered.
A conflict between a vertex's assigned color and the color implied by the
traversal proves an odd cycle, and the graph is not bipartite.
*/

use crate::{ids::*, ops::GraphOps};

/// Bipartiteness queries over any [`GraphOps`] implementation.
pub trait Bipartite: GraphOps + Sized {
    /// Computes a 2-partition of the vertices such that no edge connects
    /// two vertices of the same class. Returns the set of one class as a
    /// bitset, or `None` if the graph is not bipartite.
    ///
    /// Edge direction is ignored; a self-loop makes a graph non-bipartite.
    fn compute_bipartite(&self) -> Option<RowBitSet> {
        let mut colored = self.vertex_bitset_unset();
        let mut partition = self.vertex_bitset_unset();
        let mut stack = Vec::new();

        for seed in self.vertices() {
            if colored.get_bit(seed) {
                continue;
            }
            stack.push((seed, false));

            while let Some((v, color)) = stack.pop() {
                if !colored.get_bit(v) {
                    colored.set_bit(v);
                    if color {
                        partition.set_bit(v);
                    }
                    for other in self.neighbors_of(v) {
                        stack.push((other, !color));
                    }
                } else if partition.get_bit(v) != color {
                    return None;
                }
            }
        }
        Some(partition)
    }

    /// Tests whether the graph admits a 2-partition.
    fn is_bipartite(&self) -> bool {
        self.compute_bipartite().is_some()
    }
}

impl<G: GraphOps> Bipartite for G {}

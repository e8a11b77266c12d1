/*!
# Connected Components

Component discovery ignores edge direction: a component contains every
vertex reachable from a seed by walking edges either way. Traversal is
iterative with an explicit pending stack kept sorted, so stack membership is
a binary search instead of a second hash set.
*/

use std::cmp::Reverse;

use fxhash::FxHashSet;
use itertools::Itertools;
use rand::Rng;

use crate::{graph::LinkedGraph, ids::*, ops::GraphOps};

/// A component labeling: per-vertex component label plus per-label size.
#[derive(Debug, Clone)]
pub struct ComponentLabels {
    labels: Vec<Option<Row>>,
    sizes: Vec<NumRows>,
}

impl ComponentLabels {
    /// Number of components found.
    pub fn count(&self) -> NumRows {
        self.sizes.len() as NumRows
    }

    /// The component label of `v`, or `None` for an invalid vertex.
    pub fn label_of(&self, v: VertexId) -> Option<Row> {
        self.labels.get(v as usize).copied().flatten()
    }

    /// Number of vertices carrying `label`.
    pub fn size_of(&self, label: Row) -> NumRows {
        self.sizes[label as usize]
    }
}

/// Connected-component queries over any [`GraphOps`] implementation.
pub trait Connectivity: GraphOps + Sized {
    /// Returns the connected component of `vertex`: all vertices reachable
    /// from it or that can reach it, in traversal order.
    fn find_component(&self, vertex: VertexId) -> Vec<VertexId> {
        debug_assert!(self.is_vertex(vertex));
        let mut seen = FxHashSet::default();
        let mut component = Vec::new();
        // sorted, so binary search doubles as the queued-membership test
        let mut pending = vec![vertex];
        seen.insert(vertex);
        while let Some(v) = pending.pop() {
            component.push(v);
            for v2 in self.neighbors_of(v) {
                if seen.contains(&v2) {
                    continue;
                }
                if let Err(pos) = pending.binary_search(&v2) {
                    pending.insert(pos, v2);
                    seen.insert(v2);
                }
            }
        }
        component
    }

    /// Labels every vertex with its component and records component sizes.
    fn label_connected_components(&self) -> ComponentLabels {
        let mut labels = vec![None; self.vertices_high() as usize];
        let mut sizes = Vec::new();
        for v in self.vertices() {
            if labels[v as usize].is_some() {
                continue;
            }
            let component = self.find_component(v);
            let label = sizes.len() as Row;
            for &u in &component {
                labels[u as usize] = Some(label);
            }
            sizes.push(component.len() as NumRows);
        }
        ComponentLabels { labels, sizes }
    }

    /// Returns the vertices of every component, components ordered by
    /// descending size, vertices in id order within each component.
    fn connected_components(&self) -> Vec<Vec<VertexId>> {
        let labeling = self.label_connected_components();
        let order = (0..labeling.sizes.len())
            .sorted_by_key(|&c| Reverse(labeling.sizes[c]))
            .collect_vec();
        let mut position = vec![0; order.len()];
        for (i, &c) in order.iter().enumerate() {
            position[c] = i;
        }

        let mut comps = order
            .iter()
            .map(|&c| Vec::with_capacity(labeling.sizes[c] as usize))
            .collect_vec();
        for v in self.vertices() {
            if let Some(label) = labeling.label_of(v) {
                comps[position[label as usize]].push(v);
            }
        }
        comps
    }
}

impl<G: GraphOps> Connectivity for G {}

/// Links every non-giant component to the giant one with a fresh edge and
/// returns the added edges, or `None` if the graph was already connected.
///
/// Endpoints are biased towards low degree: each component is sorted by
/// degree and indexed with a cubic-skewed random value, so freshly linked
/// hubs stay unlikely.
pub fn connect_graph<R: Rng>(graph: &mut LinkedGraph, rng: &mut R) -> Option<Vec<EdgeId>> {
    let mut comps = graph.connected_components();
    if comps.len() < 2 {
        return None;
    }

    // memoize degrees, each query costs a chain walk
    let mut degree = vec![0; graph.vertices_high() as usize];
    for v in graph.vertices() {
        degree[v as usize] = graph.degree(v);
    }
    for comp in comps.iter_mut() {
        comp.sort_by_key(|&v| degree[v as usize]);
    }

    let mut skewed_pick = |comp: &[VertexId]| {
        let i = (rng.random::<f64>().powi(3) * comp.len() as f64) as usize;
        comp[i]
    };

    let mut added = Vec::with_capacity(comps.len() - 1);
    for i in 1..comps.len() {
        let v1 = skewed_pick(&comps[0]);
        let v2 = skewed_pick(&comps[i]);
        added.push(graph.add_edge(v1, v2).ok()?);
    }
    Some(added)
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn two_triangles_and_a_loner() -> (LinkedGraph, Vec<VertexId>) {
        let mut g = LinkedGraph::new(false);
        let vs = (0..7).map(|_| g.add_vertex()).collect_vec();
        for (u, w) in [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)] {
            g.add_edge(vs[u], vs[w]).unwrap();
        }
        (g, vs)
    }

    #[test]
    fn find_component_ignores_direction() {
        let mut g = LinkedGraph::new(true);
        let v0 = g.add_vertex();
        let v1 = g.add_vertex();
        let v2 = g.add_vertex();
        g.add_edge(v1, v0).unwrap();
        g.add_edge(v1, v2).unwrap();

        let mut comp = g.find_component(v0);
        comp.sort_unstable();
        assert_eq!(comp, vec![v0, v1, v2]);
    }

    #[test]
    fn labels_and_sizes() {
        let (g, vs) = two_triangles_and_a_loner();
        let labeling = g.label_connected_components();
        assert_eq!(labeling.count(), 3);
        assert_eq!(labeling.label_of(vs[0]), labeling.label_of(vs[2]));
        assert_ne!(labeling.label_of(vs[0]), labeling.label_of(vs[3]));
        assert_eq!(labeling.size_of(labeling.label_of(vs[6]).unwrap()), 1);
    }

    #[test]
    fn components_sorted_by_descending_size() {
        let (mut g, vs) = two_triangles_and_a_loner();
        g.add_vertex();
        let v8 = g.add_vertex();
        g.add_edge(vs[3], v8).unwrap();

        let comps = g.connected_components();
        assert_eq!(comps.iter().map(Vec::len).collect_vec(), vec![4, 3, 1, 1]);
        assert_eq!(comps[0], vec![vs[3], vs[4], vs[5], v8]);
    }

    #[test]
    fn connect_graph_yields_one_component() {
        let mut rng = Pcg64Mcg::seed_from_u64(42);
        let (mut g, _) = two_triangles_and_a_loner();
        let added = connect_graph(&mut g, &mut rng).unwrap();
        assert_eq!(added.len(), 2);
        assert_eq!(g.connected_components().len(), 1);
        // an already connected graph is left untouched
        assert!(connect_graph(&mut g, &mut rng).is_none());
    }

    #[test]
    fn labels_skip_removed_vertices() {
        let (mut g, vs) = two_triangles_and_a_loner();
        g.remove_vertex(vs[6]).unwrap();
        let labeling = g.label_connected_components();
        assert_eq!(labeling.count(), 2);
        assert_eq!(labeling.label_of(vs[6]), None);
    }
}

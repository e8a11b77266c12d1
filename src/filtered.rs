/*!
# Filtered Graph Views

A [`FilteredGraph`] is a read-only projection of a base graph through two
membership bitsets, one over vertices and one over edges. Both are computed
eagerly at construction from the supplied predicates: a vertex is visible iff
its predicate accepts it, an edge is visible iff its predicate accepts it
*and* both of its endpoints are visible.

The view is a pure derived index. It holds a shared borrow of the base graph
and is never patched incrementally; if the base graph must change, drop the
view and rebuild it. Because the view implements only the [`GraphOps`] read
contract, mutating it is a compile error rather than a runtime one.
*/

use crate::{ids::*, ops::GraphOps};

/// A read-only, membership-masked view of a base graph.
pub struct FilteredGraph<'g, G: GraphOps> {
    base: &'g G,
    visible_vertices: RowBitSet,
    visible_edges: RowBitSet,
}

impl<'g, G: GraphOps> FilteredGraph<'g, G> {
    /// Builds a view showing the vertices accepted by `vertex_filter` and
    /// the edges accepted by `edge_filter` whose endpoints are both visible.
    pub fn new(
        base: &'g G,
        mut vertex_filter: impl FnMut(VertexId) -> bool,
        mut edge_filter: impl FnMut(EdgeId) -> bool,
    ) -> Self {
        let mut visible_vertices = RowBitSet::new(base.vertices_high());
        for v in base.vertices() {
            if vertex_filter(v) {
                visible_vertices.set_bit(v);
            }
        }

        let mut visible_edges = RowBitSet::new(base.edges_high());
        for edge in base.edges() {
            let visible = edge_filter(edge)
                && base
                    .first_vertex(edge)
                    .is_some_and(|v| visible_vertices.get_bit(v))
                && base
                    .second_vertex(edge)
                    .is_some_and(|v| visible_vertices.get_bit(v));
            if visible {
                visible_edges.set_bit(edge);
            }
        }

        Self {
            base,
            visible_vertices,
            visible_edges,
        }
    }

    /// Builds a view masking vertices only; edges survive iff both their
    /// endpoints do.
    pub fn with_vertex_filter(base: &'g G, vertex_filter: impl FnMut(VertexId) -> bool) -> Self {
        Self::new(base, vertex_filter, |_| true)
    }

    /// Returns the underlying graph.
    pub fn base(&self) -> &'g G {
        self.base
    }
}

impl<G: GraphOps> GraphOps for FilteredGraph<'_, G> {
    fn is_directed(&self) -> bool {
        self.base.is_directed()
    }

    fn vertices_count(&self) -> NumRows {
        self.visible_vertices.cardinality() as NumRows
    }

    fn edges_count(&self) -> NumRows {
        self.visible_edges.cardinality() as NumRows
    }

    fn vertices_high(&self) -> Row {
        self.base.vertices_high()
    }

    fn edges_high(&self) -> Row {
        self.base.edges_high()
    }

    fn is_vertex(&self, v: VertexId) -> bool {
        v < self.vertices_high() && self.visible_vertices.get_bit(v)
    }

    fn is_edge(&self, edge: EdgeId) -> bool {
        edge < self.edges_high() && self.visible_edges.get_bit(edge)
    }

    fn first_vertex(&self, edge: EdgeId) -> Option<VertexId> {
        self.is_edge(edge).then(|| self.base.first_vertex(edge))?
    }

    fn second_vertex(&self, edge: EdgeId) -> Option<VertexId> {
        self.is_edge(edge).then(|| self.base.second_vertex(edge))?
    }

    fn get_edge(&self, mut v1: VertexId, mut v2: VertexId) -> Option<EdgeId> {
        if !self.is_vertex(v1) || !self.is_vertex(v2) {
            return None;
        }
        if !self.is_directed() && v1 > v2 {
            std::mem::swap(&mut v1, &mut v2);
        }
        // the base's first match may be masked while a parallel edge is not,
        // so scan the masked chain instead of delegating
        self.out_edges(v1)
            .find(|&e| self.base.second_vertex(e) == Some(v2))
    }

    fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.base.vertices().filter(|&v| self.visible_vertices.get_bit(v))
    }

    fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.base.edges().filter(|&e| self.visible_edges.get_bit(e))
    }

    fn out_edges(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        let visible = self.is_vertex(v);
        self.base
            .out_edges(v)
            .filter(move |&e| visible && self.visible_edges.get_bit(e))
    }

    fn in_edges(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        let visible = self.is_vertex(v);
        self.base
            .in_edges(v)
            .filter(move |&e| visible && self.visible_edges.get_bit(e))
    }

    fn edges_of(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        let visible = self.is_vertex(v);
        self.base
            .edges_of(v)
            .filter(move |&e| visible && self.visible_edges.get_bit(e))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::LinkedGraph;
    use itertools::Itertools;

    fn triangle_with_tail() -> (LinkedGraph, Vec<VertexId>, Vec<EdgeId>) {
        let mut g = LinkedGraph::new(false);
        let vs = (0..4).map(|_| g.add_vertex()).collect_vec();
        let es = [(0, 1), (1, 2), (2, 0), (2, 3)]
            .into_iter()
            .map(|(u, w)| g.add_edge(vs[u], vs[w]).unwrap())
            .collect_vec();
        (g, vs, es)
    }

    #[test]
    fn hiding_a_vertex_hides_its_edges() {
        let (g, vs, es) = triangle_with_tail();
        let view = FilteredGraph::with_vertex_filter(&g, |v| v != vs[2]);

        assert_eq!(view.vertices_count(), 3);
        assert_eq!(view.vertices().collect_vec(), vec![vs[0], vs[1], vs[3]]);
        // only the edge not touching the hidden vertex survives
        assert_eq!(view.edges().collect_vec(), vec![es[0]]);
        assert!(!view.is_edge(es[1]));
        assert_eq!(view.first_vertex(es[1]), None);
        assert_eq!(view.get_edge(vs[1], vs[2]), None);
        assert_eq!(view.get_edge(vs[0], vs[1]), Some(es[0]));
        assert_eq!(view.degree(vs[3]), 0);
    }

    #[test]
    fn edge_filter_composes_with_endpoint_visibility() {
        let (g, vs, es) = triangle_with_tail();
        let view = FilteredGraph::new(&g, |_| true, |e| e != es[0]);

        assert_eq!(view.edges_count(), 3);
        assert_eq!(view.get_edge(vs[0], vs[1]), None);
        assert_eq!(view.edges_of(vs[0]).collect_vec(), vec![es[2]]);
    }

    #[test]
    fn parallel_edge_lookup_skips_masked_edges() {
        let mut g = LinkedGraph::new(true);
        let v0 = g.add_vertex();
        let v1 = g.add_vertex();
        let e0 = g.add_edge(v0, v1).unwrap();
        let e1 = g.add_edge(v0, v1).unwrap();

        let view = FilteredGraph::new(&g, |_| true, |e| e != e0);
        assert_eq!(view.get_edge(v0, v1), Some(e1));
    }

    #[test]
    fn view_reflects_rebuild_not_mutation() {
        let (mut g, vs, _) = triangle_with_tail();
        {
            let view = FilteredGraph::with_vertex_filter(&g, |_| true);
            assert_eq!(view.edges_count(), 4);
        }
        g.remove_vertex(vs[3]).unwrap();
        let view = FilteredGraph::with_vertex_filter(&g, |_| true);
        assert_eq!(view.edges_count(), 3);
    }
}

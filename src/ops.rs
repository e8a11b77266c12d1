/*!
# Graph Operations

[`GraphOps`] is the read contract every algorithm in this crate is written
against. It captures exactly what a read-only consumer needs: counts,
directedness, row validity, endpoint lookup, vertex/edge iteration and
incidence iteration. [`LinkedGraph`](crate::graph::LinkedGraph) implements it
directly; [`FilteredGraph`](crate::filtered::FilteredGraph) implements it as
a masked projection. Since the trait has no mutating methods, a view that
implements only `GraphOps` is read-only at compile time.

Degree and neighbor queries have default implementations that walk the
incidence chains, so they cost O(degree) per call. Algorithms that query
degrees repeatedly memoize them in a local array first.
*/

use crate::ids::*;

/// Read access to a directed-or-undirected multigraph.
pub trait GraphOps {
    /// Returns *true* if edges are directed from first to second endpoint.
    fn is_directed(&self) -> bool;

    /// Returns the number of valid vertices.
    fn vertices_count(&self) -> NumRows;

    /// Returns the number of valid edges.
    fn edges_count(&self) -> NumRows;

    /// Returns an exclusive upper bound on vertex ids: every valid vertex is
    /// `< vertices_high()`, but ids below the bound may be invalid. Used to
    /// size per-vertex side arrays, never to enumerate vertices.
    fn vertices_high(&self) -> Row;

    /// Returns an exclusive upper bound on edge ids, the edge-table analogue
    /// of [`vertices_high`](GraphOps::vertices_high).
    fn edges_high(&self) -> Row;

    /// Returns *true* if `v` is a valid vertex row.
    fn is_vertex(&self, v: VertexId) -> bool;

    /// Returns *true* if `edge` is a valid edge row.
    fn is_edge(&self, edge: EdgeId) -> bool;

    /// Returns the first ("tail") endpoint of an edge.
    fn first_vertex(&self, edge: EdgeId) -> Option<VertexId>;

    /// Returns the second ("head") endpoint of an edge.
    fn second_vertex(&self, edge: EdgeId) -> Option<VertexId>;

    /// Returns an edge from `v1` to `v2` (in either orientation for
    /// undirected graphs), or `None`. Costs O(out-degree of `v1`).
    fn get_edge(&self, v1: VertexId, v2: VertexId) -> Option<EdgeId>;

    /// Returns an iterator over all valid vertices.
    fn vertices(&self) -> impl Iterator<Item = VertexId> + '_;

    /// Returns an iterator over all valid edges.
    fn edges(&self) -> impl Iterator<Item = EdgeId> + '_;

    /// Returns an iterator over the outgoing chain of `v`.
    fn out_edges(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + '_;

    /// Returns an iterator over the incoming chain of `v`.
    fn in_edges(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + '_;

    /// Returns an iterator over the full incidence of `v`, both chains
    /// end-to-end. A self-loop is yielded twice.
    fn edges_of(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + '_;

    /// Returns the endpoint of `edge` opposite to `v`, or `None` if `v` is
    /// not an endpoint of `edge`. A self-loop at `v` yields `v` itself.
    fn other_vertex(&self, edge: EdgeId, v: VertexId) -> Option<VertexId> {
        let first = self.first_vertex(edge)?;
        let second = self.second_vertex(edge)?;
        if first == v {
            Some(second)
        } else if second == v {
            Some(first)
        } else {
            None
        }
    }

    /// Returns the number of edges in the outgoing chain of `v`. O(degree).
    fn out_degree(&self, v: VertexId) -> NumRows {
        self.out_edges(v).count() as NumRows
    }

    /// Returns the number of edges in the incoming chain of `v`. O(degree).
    fn in_degree(&self, v: VertexId) -> NumRows {
        self.in_edges(v).count() as NumRows
    }

    /// Returns `in_degree(v) + out_degree(v)`. A self-loop sits in both
    /// chains of its vertex and is therefore counted twice.
    fn degree(&self, v: VertexId) -> NumRows {
        self.in_degree(v) + self.out_degree(v)
    }

    /// Returns an iterator over the vertices adjacent to `v`, ignoring edge
    /// direction. A vertex connected by parallel edges appears once per edge.
    fn neighbors_of(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_
    where
        Self: Sized,
    {
        self.edges_of(v).filter_map(move |e| self.other_vertex(e, v))
    }

    /// Returns an empty bitset sized for the vertex rows of this graph.
    fn vertex_bitset_unset(&self) -> RowBitSet {
        RowBitSet::new(self.vertices_high())
    }
}

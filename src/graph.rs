/*!
# Linked Multigraph

[`LinkedGraph`] is a directed-or-undirected multigraph stored column-wise:
vertices and edges are rows of two [`RowTable`]s, and adjacency is encoded as
two linked-list families threaded through per-edge `next` (and optionally
`prev`) columns. Each vertex row keeps the first and last edge of its
outgoing and incoming chains, so insertion at the chain tail is O(1).

Parallel edges are allowed. Undirected graphs canonicalize endpoints at
insertion time (smaller vertex id first), which makes edge lookup by vertex
pair direction-independent.

Removal cost is a construction-time trade-off: [`LinkedGraph::new`] stores
only `next` pointers and unsplices an edge by scanning its chain for the
predecessor (O(degree)), while [`LinkedGraph::with_fast_removal`] adds `prev`
columns for O(1) unsplicing at twice the pointer memory.

Observers registered with [`LinkedGraph::on_change`] receive exactly one
[`GraphEvent`] per logical mutation. Compound operations such as vertex
removal run with notifications suppressed and emit a single event, never one
per cascaded edge removal.
*/

use thiserror::Error;

use crate::{
    ids::*,
    iter::EdgeCursor,
    ops::GraphOps,
    table::{IntColumn, RowTable},
};

/// Structural errors raised by graph mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The operation referenced a vertex row that is not currently valid.
    #[error("invalid vertex {0}")]
    InvalidVertex(VertexId),
    /// The operation referenced an edge row that is not currently valid.
    #[error("invalid edge {0}")]
    InvalidEdge(EdgeId),
    /// The operation is not supported in the graph's current state.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}

/// One logical mutation of the graph, as seen by observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphEvent {
    VertexAdded(VertexId),
    VertexRemoved(VertexId),
    EdgeAdded(EdgeId),
    EdgeRemoved(EdgeId),
}

/// The endpoint role an adjacency chain covers: edges leaving a vertex
/// (`Out`, the vertex is the edge's first endpoint) or entering it (`In`,
/// the vertex is the second endpoint).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainRole {
    Out = 0,
    In = 1,
}

const OUT: usize = ChainRole::Out as usize;
const IN: usize = ChainRole::In as usize;

/// One linked-list family: per-vertex first/last pointers plus per-edge
/// next (and optionally prev) pointers.
#[derive(Debug, Clone)]
struct EdgeChain {
    first: IntColumn,
    last: IntColumn,
    next: IntColumn,
    prev: Option<IntColumn>,
}

impl EdgeChain {
    fn new(role: ChainRole, fast_removal: bool) -> Self {
        let (first, last, next, prev) = match role {
            ChainRole::Out => ("#FirstEdge", "#LastEdge", "#NextEdge", "#PrevEdge"),
            ChainRole::In => ("#FirstInEdge", "#LastInEdge", "#NextInEdge", "#PrevInEdge"),
        };
        Self {
            first: IntColumn::new(first),
            last: IntColumn::new(last),
            next: IntColumn::new(next),
            prev: fast_removal.then(|| IntColumn::new(prev)),
        }
    }

    /// Appends `edge` to the chain of `v`.
    fn splice(&mut self, v: VertexId, edge: EdgeId) {
        let p = self.last.get(v);
        self.last.set(v, Some(edge));
        match p {
            None => self.first.set(v, Some(edge)),
            Some(p) => self.next.set(p, Some(edge)),
        }
        self.next.set(edge, None);
        if let Some(prev) = &mut self.prev {
            prev.set(edge, p);
        }
    }

    /// Unlinks `edge` from the chain of `v`. Without prev pointers the
    /// predecessor is found by walking the chain from its head.
    fn unsplice(&mut self, v: VertexId, edge: EdgeId) {
        let n = self.next.get(edge);
        let p = match &self.prev {
            Some(prev) => prev.get(edge),
            None => {
                let mut p = None;
                let mut e = self.first.get(v);
                while let Some(cur) = e {
                    if cur == edge {
                        break;
                    }
                    p = Some(cur);
                    e = self.next.get(cur);
                }
                p
            }
        };
        self.next.set(edge, None);
        if let Some(prev) = &mut self.prev {
            prev.set(edge, None);
        }
        match n {
            None => self.last.set(v, p),
            Some(n) => {
                if let Some(prev) = &mut self.prev {
                    prev.set(n, p);
                }
            }
        }
        match p {
            None => self.first.set(v, n),
            Some(p) => self.next.set(p, n),
        }
    }

    fn clear(&mut self) {
        self.first.clear();
        self.last.clear();
        self.next.clear();
        if let Some(prev) = &mut self.prev {
            prev.clear();
        }
    }
}

/// A multigraph over two row tables with linked-list adjacency columns.
pub struct LinkedGraph {
    vertices: RowTable,
    edges: RowTable,
    /// The first ("tail") endpoint of each edge.
    first_vertex: IntColumn,
    /// The second ("head") endpoint of each edge.
    second_vertex: IntColumn,
    chains: [EdgeChain; 2],
    directed: bool,
    suppress: u32,
    observers: Vec<Box<dyn FnMut(GraphEvent)>>,
}

impl std::fmt::Debug for LinkedGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkedGraph")
            .field("directed", &self.directed)
            .field("vertices", &self.vertices.count())
            .field("edges", &self.edges.count())
            .finish()
    }
}

impl LinkedGraph {
    /// Creates an empty graph with O(degree) edge removal.
    pub fn new(directed: bool) -> Self {
        Self::with_config(directed, false)
    }

    /// Creates an empty graph that additionally stores prev pointers for
    /// O(1) edge removal.
    pub fn with_fast_removal(directed: bool) -> Self {
        Self::with_config(directed, true)
    }

    fn with_config(directed: bool, fast_removal: bool) -> Self {
        Self {
            vertices: RowTable::new("vertices"),
            edges: RowTable::new("edges"),
            first_vertex: IntColumn::new("#FirstVertex"),
            second_vertex: IntColumn::new("#SecondVertex"),
            chains: [
                EdgeChain::new(ChainRole::Out, fast_removal),
                EdgeChain::new(ChainRole::In, fast_removal),
            ],
            directed,
            suppress: 0,
            observers: Vec::new(),
        }
    }

    /// Changes directedness. Fails on a non-empty graph: canonicalization
    /// happens at insertion time and cannot be revised afterwards.
    pub fn set_directed(&mut self, directed: bool) -> Result<(), GraphError> {
        if self.directed == directed {
            return Ok(());
        }
        if self.edges.count() > 0 {
            return Err(GraphError::Unsupported(
                "cannot change directedness of a non-empty graph",
            ));
        }
        self.directed = directed;
        Ok(())
    }

    /// Allocates a vertex with empty adjacency chains.
    pub fn add_vertex(&mut self) -> VertexId {
        let chains = &mut self.chains;
        let v = self.vertices.with_notify_suppressed(|vertices| {
            let v = vertices.alloc();
            for chain in chains.iter_mut() {
                chain.first.set(v, None);
                chain.last.set(v, None);
            }
            v
        });
        self.emit(GraphEvent::VertexAdded(v));
        v
    }

    /// Adds an edge between two valid vertices. Parallel edges and
    /// self-loops are allowed; undirected graphs store the smaller endpoint
    /// first.
    pub fn add_edge(&mut self, mut v1: VertexId, mut v2: VertexId) -> Result<EdgeId, GraphError> {
        self.check_vertex(v1)?;
        self.check_vertex(v2)?;
        if !self.directed && v1 > v2 {
            std::mem::swap(&mut v1, &mut v2);
        }

        let first_vertex = &mut self.first_vertex;
        let second_vertex = &mut self.second_vertex;
        let [out, inn] = &mut self.chains;
        let edge = self.edges.with_notify_suppressed(|edges| {
            let edge = edges.alloc();
            first_vertex.set(edge, Some(v1));
            second_vertex.set(edge, Some(v2));
            out.splice(v1, edge);
            inn.splice(v2, edge);
            edge
        });

        debug_assert!(self.check_invariant(v1).is_none());
        debug_assert!(self.check_invariant(v2).is_none());
        self.emit(GraphEvent::EdgeAdded(edge));
        Ok(edge)
    }

    /// Returns an edge between `v1` and `v2`, adding one if none exists.
    /// Idempotent: a second call with the same pair returns the same edge.
    pub fn find_edge(&mut self, v1: VertexId, v2: VertexId) -> Result<EdgeId, GraphError> {
        self.check_vertex(v1)?;
        self.check_vertex(v2)?;
        match self.get_edge(v1, v2) {
            Some(edge) => Ok(edge),
            None => self.add_edge(v1, v2),
        }
    }

    /// Removes an edge, unsplicing it from both of its chains.
    pub fn remove_edge(&mut self, edge: EdgeId) -> Result<(), GraphError> {
        self.check_edge(edge)?;
        self.unsplice_edge(edge);
        self.emit(GraphEvent::EdgeRemoved(edge));
        Ok(())
    }

    /// Removes a vertex and every edge incident to it. Observers see one
    /// `VertexRemoved` event, not one event per removed edge.
    pub fn remove_vertex(&mut self, v: VertexId) -> Result<(), GraphError> {
        self.check_vertex(v)?;
        self.with_notify_suppressed(|g| -> Result<(), GraphError> {
            while let Some(edge) = g.chains[OUT].first.get(v) {
                g.remove_edge(edge)?;
            }
            while let Some(edge) = g.chains[IN].first.get(v) {
                g.remove_edge(edge)?;
            }
            for chain in &mut g.chains {
                chain.first.set(v, None);
                chain.last.set(v, None);
            }
            g.vertices.free(v);
            Ok(())
        })?;
        self.emit(GraphEvent::VertexRemoved(v));
        Ok(())
    }

    /// Drops all vertices and edges. Directedness becomes changeable again.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.first_vertex.clear();
        self.second_vertex.clear();
        for chain in &mut self.chains {
            chain.clear();
        }
    }

    /// Registers an observer receiving one [`GraphEvent`] per mutation.
    pub fn on_change(&mut self, observer: impl FnMut(GraphEvent) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Runs `f` with observer notifications suppressed. Events raised inside
    /// the scope are dropped; the caller emits the one logical event itself.
    pub fn with_notify_suppressed<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.suppress += 1;
        let out = f(self);
        self.suppress -= 1;
        out
    }

    /// Rebinds `cursor` onto the full incidence of `v`, reusing its storage.
    pub fn edges_of_into<'g>(&'g self, v: VertexId, cursor: &mut EdgeCursor<'g>) {
        cursor.rebind_merged(
            self.chains[OUT].first.get(v),
            &self.chains[OUT].next,
            self.chains[IN].first.get(v),
            &self.chains[IN].next,
        );
    }

    /// Rebinds `cursor` onto one chain of `v`, reusing its storage.
    pub fn chain_edges_into<'g>(&'g self, v: VertexId, role: ChainRole, cursor: &mut EdgeCursor<'g>) {
        let chain = &self.chains[role as usize];
        cursor.rebind(chain.first.get(v), &chain.next);
    }

    /// Verifies the adjacency invariants of a vertex: every edge reachable
    /// from either chain must link back to the vertex through its endpoint
    /// columns, and both chains must terminate at the stored last edge.
    /// Returns a description of the first violation found.
    pub fn check_invariant(&self, v: VertexId) -> Option<String> {
        if !self.vertices.is_valid(v) {
            return Some(format!("vertex {v} invalid"));
        }
        for role in [ChainRole::Out, ChainRole::In] {
            let chain = &self.chains[role as usize];
            let mut walked_last = None;
            let mut e = chain.first.get(v);
            while let Some(edge) = e {
                if !self.edges.is_valid(edge) {
                    return Some(format!("edge {edge} in chain of vertex {v} is invalid"));
                }
                let Some(other) = self.other_vertex(edge, v) else {
                    return Some(format!("edge {edge} does not reference vertex {v}"));
                };
                if self.other_vertex(edge, other) != Some(v) {
                    return Some(format!(
                        "edge {edge} loses vertex {v} going through vertex {other}"
                    ));
                }
                walked_last = Some(edge);
                e = chain.next.get(edge);
            }
            if chain.last.get(v) != walked_last {
                return Some(format!(
                    "chain of vertex {v} does not terminate at its last edge"
                ));
            }
        }
        None
    }

    fn unsplice_edge(&mut self, edge: EdgeId) {
        let (Some(v1), Some(v2)) = (self.first_vertex.get(edge), self.second_vertex.get(edge))
        else {
            return;
        };
        self.chains[OUT].unsplice(v1, edge);
        self.chains[IN].unsplice(v2, edge);
        self.first_vertex.set(edge, None);
        self.second_vertex.set(edge, None);
        self.edges.free(edge);
    }

    fn check_vertex(&self, v: VertexId) -> Result<(), GraphError> {
        if self.vertices.is_valid(v) {
            Ok(())
        } else {
            Err(GraphError::InvalidVertex(v))
        }
    }

    fn check_edge(&self, edge: EdgeId) -> Result<(), GraphError> {
        if self.edges.is_valid(edge) {
            Ok(())
        } else {
            Err(GraphError::InvalidEdge(edge))
        }
    }

    fn emit(&mut self, event: GraphEvent) {
        if self.suppress == 0 {
            for observer in &mut self.observers {
                observer(event);
            }
        }
    }
}

impl GraphOps for LinkedGraph {
    fn is_directed(&self) -> bool {
        self.directed
    }

    fn vertices_count(&self) -> NumRows {
        self.vertices.count()
    }

    fn edges_count(&self) -> NumRows {
        self.edges.count()
    }

    fn vertices_high(&self) -> Row {
        self.vertices.high()
    }

    fn edges_high(&self) -> Row {
        self.edges.high()
    }

    fn is_vertex(&self, v: VertexId) -> bool {
        self.vertices.is_valid(v)
    }

    fn is_edge(&self, edge: EdgeId) -> bool {
        self.edges.is_valid(edge)
    }

    fn first_vertex(&self, edge: EdgeId) -> Option<VertexId> {
        self.first_vertex.get(edge)
    }

    fn second_vertex(&self, edge: EdgeId) -> Option<VertexId> {
        self.second_vertex.get(edge)
    }

    fn get_edge(&self, mut v1: VertexId, mut v2: VertexId) -> Option<EdgeId> {
        if !self.is_vertex(v1) || !self.is_vertex(v2) {
            return None;
        }
        if !self.directed && v1 > v2 {
            std::mem::swap(&mut v1, &mut v2);
        }
        let out = &self.chains[OUT];
        let mut e = out.first.get(v1);
        while let Some(edge) = e {
            if self.second_vertex.get(edge) == Some(v2) {
                return Some(edge);
            }
            e = out.next.get(edge);
        }
        None
    }

    fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices.iter()
    }

    fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter()
    }

    fn out_edges(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        let out = &self.chains[OUT];
        EdgeCursor::new(out.first.get(v), &out.next)
    }

    fn in_edges(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        let inn = &self.chains[IN];
        EdgeCursor::new(inn.first.get(v), &inn.next)
    }

    fn edges_of(&self, v: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        EdgeCursor::new_merged(
            self.chains[OUT].first.get(v),
            &self.chains[OUT].next,
            self.chains[IN].first.get(v),
            &self.chains[IN].next,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn add_and_lookup_directed() {
        let mut g = LinkedGraph::new(true);
        let v0 = g.add_vertex();
        let v1 = g.add_vertex();
        let v2 = g.add_vertex();

        let e01 = g.add_edge(v0, v1).unwrap();
        let e12 = g.add_edge(v1, v2).unwrap();

        assert_eq!(g.vertices_count(), 3);
        assert_eq!(g.edges_count(), 2);
        assert_eq!(g.get_edge(v0, v1), Some(e01));
        assert_eq!(g.get_edge(v1, v0), None);
        assert_eq!(g.first_vertex(e12), Some(v1));
        assert_eq!(g.second_vertex(e12), Some(v2));
        assert_eq!(g.other_vertex(e01, v0), Some(v1));
        assert_eq!(g.other_vertex(e01, v1), Some(v0));
        assert_eq!(g.other_vertex(e01, v2), None);
    }

    #[test]
    fn undirected_canonicalization() {
        let mut g = LinkedGraph::new(false);
        let v0 = g.add_vertex();
        let v1 = g.add_vertex();

        let e = g.add_edge(v1, v0).unwrap();
        // the smaller endpoint is stored first
        assert_eq!(g.first_vertex(e), Some(v0));
        assert_eq!(g.second_vertex(e), Some(v1));
        // lookup works in either direction
        assert_eq!(g.get_edge(v0, v1), Some(e));
        assert_eq!(g.get_edge(v1, v0), Some(e));

        assert_eq!(g.edges_of(v0).collect_vec(), vec![e]);
        assert_eq!(g.edges_of(v1).collect_vec(), vec![e]);
    }

    #[test]
    fn invalid_rows_are_rejected() {
        let mut g = LinkedGraph::new(true);
        let v0 = g.add_vertex();

        assert_eq!(g.add_edge(v0, 7), Err(GraphError::InvalidVertex(7)));
        assert_eq!(g.remove_vertex(7), Err(GraphError::InvalidVertex(7)));
        assert_eq!(g.remove_edge(0), Err(GraphError::InvalidEdge(0)));
        assert_eq!(g.get_edge(v0, 7), None);
    }

    #[test]
    fn degree_identity_with_self_loop() {
        let mut g = LinkedGraph::new(true);
        let v0 = g.add_vertex();
        let v1 = g.add_vertex();
        g.add_edge(v0, v1).unwrap();
        g.add_edge(v0, v0).unwrap();

        // a self-loop sits in both chains and is double-counted by degree
        assert_eq!(g.out_degree(v0), 2);
        assert_eq!(g.in_degree(v0), 1);
        assert_eq!(g.degree(v0), 3);
        for v in g.vertices().collect_vec() {
            assert_eq!(g.degree(v), g.in_degree(v) + g.out_degree(v));
        }
    }

    #[test]
    fn find_edge_is_idempotent() {
        let mut g = LinkedGraph::new(false);
        let v0 = g.add_vertex();
        let v1 = g.add_vertex();

        let e = g.find_edge(v0, v1).unwrap();
        assert_eq!(g.find_edge(v1, v0).unwrap(), e);
        assert_eq!(g.edges_count(), 1);

        // add_edge has no such check: parallel edges are allowed
        g.add_edge(v0, v1).unwrap();
        assert_eq!(g.edges_count(), 2);
    }

    #[test]
    fn remove_vertex_cascades() {
        let mut g = LinkedGraph::new(true);
        let vs = (0..5).map(|_| g.add_vertex()).collect_vec();
        for (&u, &w) in vs.iter().tuple_combinations() {
            g.add_edge(u, w).unwrap();
        }
        assert_eq!(g.edges_count(), 10);

        let removed = g.degree(vs[2]);
        g.remove_vertex(vs[2]).unwrap();
        assert_eq!(g.edges_count(), 10 - removed);
        assert!(!g.is_vertex(vs[2]));
        for &v in vs.iter().filter(|&&v| v != vs[2]) {
            assert!(g.check_invariant(v).is_none());
        }
    }

    #[test]
    fn one_event_per_mutation() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);

        let mut g = LinkedGraph::new(true);
        g.on_change(move |ev| sink.borrow_mut().push(ev));

        let v0 = g.add_vertex();
        let v1 = g.add_vertex();
        let e = g.add_edge(v0, v1).unwrap();
        g.add_edge(v1, v0).unwrap();
        g.remove_edge(e).unwrap();
        g.remove_vertex(v0).unwrap();

        // vertex removal cascades into an edge removal but emits one event
        assert_eq!(
            *events.borrow(),
            vec![
                GraphEvent::VertexAdded(v0),
                GraphEvent::VertexAdded(v1),
                GraphEvent::EdgeAdded(e),
                GraphEvent::EdgeAdded(1),
                GraphEvent::EdgeRemoved(e),
                GraphEvent::VertexRemoved(v0),
            ]
        );
    }

    #[test]
    fn directedness_is_fixed_while_non_empty() {
        let mut g = LinkedGraph::new(true);
        let v0 = g.add_vertex();
        let v1 = g.add_vertex();

        // no edges yet, the transition is still allowed
        g.set_directed(false).unwrap();
        g.set_directed(true).unwrap();

        g.add_edge(v0, v1).unwrap();
        assert_eq!(
            g.set_directed(false),
            Err(GraphError::Unsupported(
                "cannot change directedness of a non-empty graph"
            ))
        );

        g.clear();
        assert_eq!(g.vertices_count(), 0);
        g.set_directed(false).unwrap();
    }

    fn fuzz_mutations(mut g: LinkedGraph, seed: u64) {
        let mut rng = Pcg64Mcg::seed_from_u64(seed);
        for _ in 0..500 {
            let vs = g.vertices().collect_vec();
            let es = g.edges().collect_vec();
            match rng.random_range(0..4) {
                0 => {
                    g.add_vertex();
                }
                1 if vs.len() >= 2 => {
                    let u = vs[rng.random_range(0..vs.len())];
                    let w = vs[rng.random_range(0..vs.len())];
                    g.add_edge(u, w).unwrap();
                }
                2 if !es.is_empty() => {
                    g.remove_edge(es[rng.random_range(0..es.len())]).unwrap();
                }
                3 if !vs.is_empty() => {
                    g.remove_vertex(vs[rng.random_range(0..vs.len())]).unwrap();
                }
                _ => {}
            }
            for v in g.vertices() {
                assert_eq!(g.check_invariant(v), None);
                assert_eq!(g.degree(v), g.in_degree(v) + g.out_degree(v));
            }
        }
    }

    #[test]
    fn fuzz_directed() {
        fuzz_mutations(LinkedGraph::new(true), 0x5eed);
    }

    #[test]
    fn fuzz_undirected() {
        fuzz_mutations(LinkedGraph::new(false), 0xbeef);
    }

    #[test]
    fn fuzz_fast_removal() {
        fuzz_mutations(LinkedGraph::with_fast_removal(true), 0x5eed);
        fuzz_mutations(LinkedGraph::with_fast_removal(false), 0xbeef);
    }
}

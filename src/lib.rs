/*!
`rowgraph` is a column-oriented graph data structure & algorithms library built
around stable integer rows:

- **Vertices and edges are rows** : both are numbered `u32` ids handed out by the
  graph and reused after removal, so they stay valid as indices into external
  per-vertex or per-edge columns.
- **Adjacency is linked** : every edge is threaded into the chains of both its
  endpoints, so incidence iteration never scans the full edge set.
- **Multigraphs are first class** : parallel edges and self-loops are allowed and
  preserved; `find_edge` exists for callers who want at-most-one semantics.

# Representation

The single storage backend is [`LinkedGraph`](crate::graph::LinkedGraph). It keeps
its vertex and edge sets in free-list row tables ([`table`]) and its adjacency in
two linked chain families (outgoing and incoming) threaded through per-edge
columns. Undirected graphs use the same two chains and normalize every edge to
`first <= second` on insertion; querying ignores the orientation.

By default removing an edge costs a scan of its chain predecessors. Graphs built
with [`LinkedGraph::with_fast_removal`](crate::graph::LinkedGraph::with_fast_removal)
carry backward pointers as well and remove in constant time, at the price of two
extra columns.

Mutations are observable: both the row tables and the graph accept change
listeners, and every logical mutation reports exactly one event, cascades
included.

# Design

Read access goes through the [`GraphOps`](crate::ops::GraphOps) trait, so the
algorithms in [`algo`] run unchanged on a [`LinkedGraph`](crate::graph::LinkedGraph)
or on a [`FilteredGraph`](crate::filtered::FilteredGraph) view that hides part of it.
Algorithms that only read are traits implemented on every `GraphOps` type;
algorithms that mutate or allocate a new graph are free functions taking a
`&mut LinkedGraph`.

# Usage

There are *4* core submodules you probably want to interact with:
- [`prelude`] includes the id types, the storage backend, the cursor and the
  basic graph operation traits,
- [`algo`] includes algorithm traits implemented on graphs themselves, such as
  connected components, bipartiteness, shortest paths, reverse Cuthill-McKee
  and clustering statistics,
- [`gens`] includes graph generators for random and deterministic test graphs,
- [`filtered`] includes the read-only filtered view over another graph.

In most use-cases, `use rowgraph::{prelude::*, algo::*};` suffices for your needs.
*/

pub mod algo;
pub mod filtered;
pub mod gens;
pub mod graph;
pub mod ids;
pub mod iter;
pub mod ops;
pub mod table;

/// `rowgraph::prelude` includes the id types, the storage backend, the edge
/// cursor and all basic graph operation traits.
pub mod prelude {
    pub use super::{graph::*, ids::*, iter::*, ops::*};
}

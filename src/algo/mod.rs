/*!
# Graph Algorithms

Algorithms built purely on the [`GraphOps`](crate::ops::GraphOps) read
contract, so they run unchanged on a [`LinkedGraph`](crate::graph::LinkedGraph)
or a [`FilteredGraph`](crate::filtered::FilteredGraph). Query algorithms are
provided as traits implemented on every `GraphOps` type; routines that mutate
a graph ([`copy_graph`], [`connect_graph`]) are free functions targeting a
[`LinkedGraph`].

All algorithms are re-exported at the top level of this module.
*/

mod bipartite;
mod components;
mod copy;
mod cuthill_mckee;
mod shortest_path;
mod statistics;

pub use bipartite::*;
pub use components::*;
pub use copy::*;
pub use cuthill_mckee::*;
pub use shortest_path::*;
pub use statistics::*;

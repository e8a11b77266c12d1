/*!
# Structural Copy

Copies the connectivity of one graph into another by walking the source's
edges. Only connectivity is preserved; ids are freshly allocated in the
destination, and vertices without any incident edge are not visited by the
edge walk and therefore not copied.
*/

use fxhash::FxHashMap;

use crate::{
    graph::{GraphError, LinkedGraph},
    ids::*,
    ops::GraphOps,
};

/// Copies every edge of `from` into `to`, allocating destination vertices on
/// first sight. Returns the source-to-destination vertex mapping.
pub fn copy_graph(
    from: &impl GraphOps,
    to: &mut LinkedGraph,
) -> Result<FxHashMap<VertexId, VertexId>, GraphError> {
    let mut map = FxHashMap::default();
    for edge in from.edges() {
        let (Some(v1), Some(v2)) = (from.first_vertex(edge), from.second_vertex(edge)) else {
            continue;
        };
        let v1 = *map.entry(v1).or_insert_with(|| to.add_vertex());
        let v2 = *map.entry(v2).or_insert_with(|| to.add_vertex());
        to.add_edge(v1, v2)?;
    }
    Ok(map)
}

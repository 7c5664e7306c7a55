use crate::cache::MoveCache;
use crate::error::Result;
use sirenia_geo::{Projection, Vector};
use sirenia_graph::Graph;

/// Offsets every movable node of `cache` by `delta` (projected units).
pub fn translate_nodes<P: Projection>(
    graph: &Graph,
    cache: &MoveCache,
    delta: Vector,
    projection: &P,
) -> Result<Graph> {
    let mut out = graph.clone();
    for id in cache.nodes() {
        let node = graph.node(id)?;
        let end = projection.project(node.loc) + delta;
        out = out.replace(node.moved(projection.invert(end)));
    }
    Ok(out)
}

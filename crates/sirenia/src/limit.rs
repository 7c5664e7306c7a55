//! Keeps moved way endpoints from being dragged across stationary ways.

use crate::cache::MoveCache;
use crate::error::Result;
use crate::options::MoveOptions;
use sirenia_geo::{Point, Projection, Vector, choose_edge, path_intersections, points_equal};
use sirenia_graph::Graph;

/// Shrinks `delta` so that no moved endpoint passes through the stationary way it is attached to.
///
/// Intersections are visited in cache order and each sees the delta limited by the previous ones.
/// When the moved way (with the proposed delta applied) crosses the stationary way anywhere other
/// than at the proposed endpoint location, the endpoint is clamped to the nearest point of the
/// stationary way.
pub fn limit_delta<P: Projection>(
    graph: &Graph,
    cache: &MoveCache,
    delta: Vector,
    projection: &P,
    options: &MoveOptions,
) -> Result<Vector> {
    let mut delta = delta;
    for obj in cache.intersections() {
        // Only a moved endpoint can be dragged through; endpoint-to-endpoint joins are free.
        if !obj.moved_is_endpoint || obj.unmoved_is_endpoint {
            continue;
        }

        let node = graph.node(&obj.node_id)?;
        let start = projection.project(node.loc);
        let end = start + delta;

        let moved_path: Vec<Point> = graph
            .child_nodes(graph.way(&obj.moved_id)?)?
            .iter()
            .map(|n| projection.project(n.loc) + delta)
            .collect();
        let unmoved_path: Vec<Point> = graph
            .child_nodes(graph.way(&obj.unmoved_id)?)?
            .iter()
            .map(|n| projection.project(n.loc))
            .collect();

        let hits = path_intersections(&moved_path, &unmoved_path);
        if hits
            .iter()
            .all(|hit| points_equal(*hit, end, options.hit_epsilon))
        {
            continue;
        }

        if let Some(edge) = choose_edge(&unmoved_path, end) {
            let limited = edge.point - start;
            tracing::debug!(
                node = %obj.node_id,
                unmoved = %obj.unmoved_id,
                from = ?(delta.x, delta.y),
                to = ?(limited.x, limited.y),
                "limited move delta"
            );
            delta = limited;
        }
    }
    Ok(delta)
}

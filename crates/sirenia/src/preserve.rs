//! Placeholder vertices that keep a way's shape where a shared vertex moved away.
//!
//! ```text
//!   start:             b moves to b':
//!
//!       b ---- e            *  b' ---- e'
//!      / \                 / \
//!     /   \               /   \
//!    a     c             a     c
//! ```
//!
//! Without the placeholder `*` the way `a-b-c` would collapse to `a-c` once `b` is pulled away
//! from it during untangling.

use crate::cache::MoveCache;
use crate::error::Result;
use crate::options::MoveOptions;
use sirenia_geo::{Projection, Vector, path_length, turn_angle_degrees};
use sirenia_graph::{EntityId, Graph};

/// Inserts a placeholder for `node_id` into `way_id` at the vertex's original location.
///
/// With `delta`, the placeholder goes to the original location offset by `delta` instead; this is
/// how the moving way keeps its (translated) shape. Vertices at a way end, and placeholders that
/// would sit on a straight line, are skipped.
pub fn preserve_vertex<P: Projection>(
    graph: &Graph,
    cache: &mut MoveCache,
    node_id: &EntityId,
    way_id: &EntityId,
    delta: Option<Vector>,
    projection: &P,
    options: &MoveOptions,
) -> Result<Graph> {
    let way = graph.way(way_id)?;
    let moved = graph.node(node_id)?;
    let Some(moved_index) = way.index_of(node_id) else {
        return Ok(graph.clone());
    };

    let closed = way.is_closed();
    let (len, prev_index, next_index) = if closed {
        let len = way.nodes.len() - 1;
        (
            len,
            Some((moved_index + len - 1) % len),
            (moved_index + 1) % len,
        )
    } else {
        (way.nodes.len(), moved_index.checked_sub(1), moved_index + 1)
    };

    let prev = prev_index
        .and_then(|i| way.nodes.get(i))
        .and_then(|id| graph.has_node(id));
    let next = way.nodes.get(next_index).and_then(|id| graph.has_node(id));
    let (Some(prev), Some(next)) = (prev, next) else {
        return Ok(graph.clone());
    };

    let start = cache.require_start_loc(node_id)?;
    let end = match delta {
        Some(d) => projection.invert(projection.project(start) + d),
        None => start,
    };
    let orig = cache.placeholder(way_id, node_id)?.moved(end);

    let p_orig = projection.project(orig.loc);
    let p_prev = projection.project(prev.loc);
    let p_next = projection.project(next.loc);
    let p_moved = projection.project(moved.loc);

    let angle = turn_angle_degrees(p_orig, p_prev, p_next);
    if (angle - 180.0).abs() < options.straight_angle_tolerance {
        tracing::trace!(way = %way_id, node = %node_id, angle, "placeholder would be straight");
        return Ok(graph.clone());
    }

    // Moving forward or backward along the way?
    let d1 = path_length(&[p_prev, p_orig, p_moved, p_next]);
    let d2 = path_length(&[p_prev, p_moved, p_orig, p_next]);
    let mut insert_at = if d1 <= d2 { moved_index } else { next_index };
    if closed && insert_at == 0 {
        insert_at = len;
    }

    tracing::trace!(
        way = %way_id,
        node = %node_id,
        placeholder = %orig.id,
        index = insert_at,
        "inserted placeholder"
    );
    let way = way.add_node(orig.id.clone(), insert_at)?;
    Ok(graph.replace(orig).replace(way))
}

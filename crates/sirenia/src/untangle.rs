//! Repairs "zorro" crossings at moved intersections.
//!
//! ```text
//!   start:                      way1 b,e (moving), way2 a,b,c (static), vertex b
//!   a - - - - b - - - c
//!             |
//!             e
//!
//!   b,e dragged right:          b now sits past c, so way2 doubles back on itself
//!   a ----- c = b - - - - - e
//!
//!   after untangling:           b snapped onto way2 and reordered to a,c,b
//!   a ----- c - b - - - - - e
//! ```

use crate::cache::Intersection;
use crate::error::Result;
use crate::options::MoveOptions;
use sirenia_geo::{Edge, Point, Projection, choose_edge};
use sirenia_graph::{EntityId, Graph, Way};

/// Snaps the intersection vertex onto the way(s) it is not an endpoint of, then moves it to the
/// matching position in their node sequence.
pub fn untangle<P: Projection>(
    graph: &Graph,
    intersection: &Intersection,
    projection: &P,
    options: &MoveOptions,
) -> Result<Graph> {
    let ep1 = intersection.moved_is_endpoint;
    let ep2 = intersection.unmoved_is_endpoint;
    if ep1 && ep2 {
        return Ok(graph.clone());
    }

    let vertex = graph.node(&intersection.node_id)?;
    let way1 = graph.way(&intersection.moved_id)?;
    let way2 = graph.way(&intersection.unmoved_id)?;

    let points1 = candidate_points(graph, way1, &vertex.id, projection)?;
    let points2 = candidate_points(graph, way2, &vertex.id, projection)?;
    let here = projection.project(vertex.loc);

    let mut edge1 = if ep1 { None } else { choose_edge(&points1, here) };
    let mut edge2 = if ep2 { None } else { choose_edge(&points2, here) };

    let target: Point = match (edge1, edge2) {
        (Some(e1), Some(e2)) => {
            let (p, e1, e2) = refine(&points1, &points2, e1, e2, options);
            edge1 = Some(e1);
            edge2 = Some(e2);
            p
        }
        (Some(e1), None) if !ep1 && ep2 => e1.point,
        (None, Some(e2)) if ep1 && !ep2 => e2.point,
        // A side that needs snapping has no usable edge.
        _ => return Ok(graph.clone()),
    };

    let mut out = graph.replace(vertex.moved(projection.invert(target)));

    for (way, edge) in [(way1, edge1), (way2, edge2)] {
        let Some(edge) = edge else {
            continue;
        };
        if way.index_of(&vertex.id) == Some(edge.index) {
            continue;
        }
        tracing::trace!(
            way = %way.id,
            node = %vertex.id,
            index = edge.index,
            "reordered intersection vertex"
        );
        let reordered = way.remove_node(&vertex.id).add_node(vertex.id.clone(), edge.index)?;
        out = out.replace(reordered);
    }

    Ok(out)
}

/// Projected nodes of `way` without `vertex`. A closed way that loses its first node is re-closed
/// on its new first node, so the closing segment stays part of the query.
fn candidate_points<P: Projection>(
    graph: &Graph,
    way: &Way,
    vertex: &EntityId,
    projection: &P,
) -> Result<Vec<Point>> {
    let mut points: Vec<Point> = graph
        .child_nodes(way)?
        .into_iter()
        .filter(|n| &n.id != vertex)
        .map(|n| projection.project(n.loc))
        .collect();
    if way.is_closed() && way.first() == Some(vertex) {
        if let Some(&first) = points.first() {
            points.push(first);
        }
    }
    Ok(points)
}

/// Walks toward a spot close to both ways by repeatedly re-querying from the midpoint of the two
/// nearest points. Bounded by `untangle_max_iterations`; returns the last midpoint either way.
fn refine(
    points1: &[Point],
    points2: &[Point],
    mut edge1: Edge,
    mut edge2: Edge,
    options: &MoveOptions,
) -> (Point, Edge, Edge) {
    let mut p = edge1.point.lerp(edge2.point, 0.5);
    for _ in 0..options.untangle_max_iterations {
        p = edge1.point.lerp(edge2.point, 0.5);
        let (Some(e1), Some(e2)) = (choose_edge(points1, p), choose_edge(points2, p)) else {
            break;
        };
        edge1 = e1;
        edge2 = e2;
        if (edge1.distance - edge2.distance).abs() < options.untangle_epsilon {
            break;
        }
    }
    (p, edge1, edge2)
}

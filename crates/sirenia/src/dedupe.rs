use crate::error::Result;
use crate::options::MoveOptions;
use sirenia_geo::points_equal;
use sirenia_graph::{EntityId, Graph, Node};

/// Removes vertices of `way_id` that coincide with their predecessor.
///
/// Of each coincident pair the earlier vertex is dropped if it is uninteresting, otherwise the
/// later one if that is uninteresting. Shared, relation-member and tagged vertices always stay.
pub fn remove_duplicate_vertices(
    graph: &Graph,
    way_id: &EntityId,
    options: &MoveOptions,
) -> Result<Graph> {
    let mut graph = graph.clone();
    let mut way = graph.way(way_id)?.clone();
    let mut prev: Option<Node> = None;

    // Every removal shrinks `way.nodes`, so the loop terminates even when `i` moves back.
    let mut i = 0;
    while i < way.nodes.len() {
        let curr = graph.has_node(&way.nodes[i]).cloned();
        let duplicate = match (&prev, &curr) {
            (Some(p), Some(c)) if points_equal(p.loc, c.loc, options.duplicate_epsilon) => {
                if !is_interesting(&graph, p) {
                    Some((p.id.clone(), c.clone()))
                } else if !is_interesting(&graph, c) {
                    Some((c.id.clone(), p.clone()))
                } else {
                    None
                }
            }
            _ => None,
        };

        match duplicate {
            Some((drop, keep)) => {
                tracing::trace!(way = %way_id, node = %drop, "removed duplicate vertex");
                way = way.remove_node(&drop);
                graph = graph.replace(way.clone()).remove(&drop);
                i = way.index_of(&keep.id).map_or(way.nodes.len(), |k| k + 1);
                prev = Some(keep);
            }
            None => {
                prev = curr;
                i += 1;
            }
        }
    }

    Ok(graph)
}

fn is_interesting(graph: &Graph, node: &Node) -> bool {
    graph.parent_ways(&node.id).len() > 1
        || !graph.parent_relations(&node.id).is_empty()
        || node.has_interesting_tags()
}

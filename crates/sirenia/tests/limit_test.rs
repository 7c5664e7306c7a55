use sirenia::geo::{Identity, vector};
use sirenia::graph::{Entity, EntityId, Graph, Node, Way, loc};
use sirenia::{MoveCache, MoveOptions, limit_delta};

fn id(s: &str) -> EntityId {
    EntityId::from(s)
}

//  a ------ b ------ c   (w2, stationary)
//           |
//           e            (w1, moving, starts at b)
fn spur() -> Graph {
    Graph::from_entities([
        Entity::from(Node::new("a", loc(-10.0, 0.0))),
        Node::new("b", loc(0.0, 0.0)).into(),
        Node::new("c", loc(10.0, 0.0)).into(),
        Node::new("e", loc(0.0, -10.0)).into(),
        Way::new("w2", ["a", "b", "c"]).into(),
        Way::new("w1", ["b", "e"]).into(),
    ])
}

#[test]
fn limit_clamps_endpoint_dragged_through_stationary_way() {
    let g = spur();
    let cache = MoveCache::build(&g, &[id("w1")]).unwrap();
    let opts = MoveOptions::default();

    let d = limit_delta(&g, &cache, vector(0.0, 5.0), &Identity, &opts).unwrap();
    assert_eq!(d, vector(0.0, 0.0));

    let d = limit_delta(&g, &cache, vector(3.0, 5.0), &Identity, &opts).unwrap();
    assert_eq!(d, vector(3.0, 0.0));
}

#[test]
fn limit_lets_endpoint_slide_along_stationary_way() {
    let g = spur();
    let cache = MoveCache::build(&g, &[id("w1")]).unwrap();
    let d = limit_delta(
        &g,
        &cache,
        vector(3.0, 0.0),
        &Identity,
        &MoveOptions::default(),
    )
    .unwrap();
    assert_eq!(d, vector(3.0, 0.0));
}

#[test]
fn limit_ignores_endpoint_to_endpoint_joins() {
    let g = Graph::from_entities([
        Entity::from(Node::new("a", loc(-10.0, 0.0))),
        Node::new("b", loc(0.0, 0.0)).into(),
        Node::new("e", loc(0.0, -10.0)).into(),
        Way::new("w2", ["a", "b"]).into(),
        Way::new("w1", ["b", "e"]).into(),
    ]);
    let cache = MoveCache::build(&g, &[id("w1")]).unwrap();
    assert_eq!(cache.intersections().len(), 1);

    let d = limit_delta(
        &g,
        &cache,
        vector(-20.0, 5.0),
        &Identity,
        &MoveOptions::default(),
    )
    .unwrap();
    assert_eq!(d, vector(-20.0, 5.0));
}

#[test]
fn limit_ignores_moved_interior_vertices() {
    // w1 crosses w2 at b, both ways continue past it.
    let g = spur()
        .replace(Node::new("f", loc(0.0, 10.0)))
        .replace(Way::new("w1", ["f", "b", "e"]));
    let cache = MoveCache::build(&g, &[id("w1")]).unwrap();
    assert!(!cache.intersections()[0].moved_is_endpoint);

    let d = limit_delta(
        &g,
        &cache,
        vector(0.0, 5.0),
        &Identity,
        &MoveOptions::default(),
    )
    .unwrap();
    assert_eq!(d, vector(0.0, 5.0));
}

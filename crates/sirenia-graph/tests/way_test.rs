use sirenia_graph::{Affix, EntityId, EntityKind, Error, Node, Tags, Way, loc};

fn id(s: &str) -> EntityId {
    EntityId::from(s)
}

fn ids(way: &Way) -> Vec<&str> {
    way.nodes.iter().map(EntityId::as_str).collect()
}

fn tags(pairs: &[(&str, &str)]) -> Tags {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn way_closed_and_affix() {
    let open = Way::new("w1", ["a", "b", "c"]);
    assert!(!open.is_closed());
    assert_eq!(open.affix(&id("a")), Some(Affix::Prefix));
    assert_eq!(open.affix(&id("c")), Some(Affix::Suffix));
    assert_eq!(open.affix(&id("b")), None);

    let closed = Way::new("w2", ["a", "b", "c", "a"]);
    assert!(closed.is_closed());
    assert!(!Way::new("w3", ["a"]).is_closed());
}

#[test]
fn way_is_area_follows_tags() {
    let ring = ["a", "b", "c", "a"];
    assert!(!Way::new("w1", ring).is_area());
    assert!(Way::new("w1", ring).with_tags(tags(&[("building", "yes")])).is_area());
    assert!(Way::new("w1", ring).with_tags(tags(&[("area", "yes")])).is_area());
    assert!(!Way::new("w1", ring)
        .with_tags(tags(&[("building", "yes"), ("area", "no")]))
        .is_area());
    assert!(!Way::new("w1", ring).with_tags(tags(&[("natural", "coastline")])).is_area());
    assert!(!Way::new("w1", ring).with_tags(tags(&[("highway", "residential")])).is_area());
    assert!(!Way::new("w1", ["a", "b"]).with_tags(tags(&[("building", "yes")])).is_area());
}

#[test]
fn way_add_node_inserts_before_index() {
    let w = Way::new("w1", ["a", "b", "c"]);
    assert_eq!(ids(&w.add_node("x", 0).unwrap()), ["x", "a", "b", "c"]);
    assert_eq!(ids(&w.add_node("x", 2).unwrap()), ["a", "b", "x", "c"]);
    assert_eq!(ids(&w.add_node("x", 3).unwrap()), ["a", "b", "c", "x"]);
}

#[test]
fn way_add_node_rejects_out_of_range_index() {
    let w = Way::new("w1", ["a", "b", "c"]);
    assert_eq!(
        w.add_node("x", 4).unwrap_err(),
        Error::IndexOutOfRange {
            way: id("w1"),
            index: 4,
            max: 3
        }
    );

    let closed = Way::new("w2", ["a", "b", "c", "a"]);
    assert!(closed.add_node("x", 4).is_err());
}

#[test]
fn way_add_node_keeps_closed_ways_closed() {
    let w = Way::new("w1", ["a", "b", "c", "a"]);
    assert_eq!(ids(&w.add_node("x", 1).unwrap()), ["a", "x", "b", "c", "a"]);
    assert_eq!(ids(&w.add_node("x", 3).unwrap()), ["a", "b", "c", "x", "a"]);
    assert_eq!(ids(&w.add_node("x", 0).unwrap()), ["x", "a", "b", "c", "x"]);
}

#[test]
fn way_add_node_collapses_consecutive_duplicates() {
    let w = Way::new("w1", ["a", "b", "c"]);
    assert_eq!(ids(&w.add_node("b", 1).unwrap()), ["a", "b", "c"]);
}

#[test]
fn way_remove_node_drops_all_occurrences() {
    let w = Way::new("w1", ["a", "b", "c", "b", "d"]);
    assert_eq!(ids(&w.remove_node(&id("b"))), ["a", "c", "d"]);

    let w = Way::new("w1", ["a", "b", "a", "c"]);
    assert_eq!(ids(&w.remove_node(&id("b"))), ["a", "c"]);
}

#[test]
fn way_remove_node_reconnects_closed_ways() {
    let w = Way::new("w1", ["a", "b", "c", "a"]);
    assert_eq!(ids(&w.remove_node(&id("a"))), ["b", "c", "b"]);
    assert_eq!(ids(&w.remove_node(&id("b"))), ["a", "c", "a"]);
}

#[test]
fn way_edits_do_not_touch_the_original() {
    let w = Way::new("w1", ["a", "b"]);
    let _ = w.add_node("c", 2).unwrap();
    let _ = w.remove_node(&id("a"));
    assert_eq!(ids(&w), ["a", "b"]);
}

#[test]
fn node_interesting_tags_ignore_metadata() {
    let n = Node::new("n1", loc(0.0, 0.0));
    assert!(!n.has_interesting_tags());
    let n = n.with_tags(tags(&[("source", "survey"), ("tiger:cfcc", "A41")]));
    assert!(!n.has_interesting_tags());
    let n = n.with_tags(tags(&[("highway", "crossing")]));
    assert!(n.has_interesting_tags());
}

#[test]
fn entity_ids_encode_kind() {
    assert_eq!(EntityId::node(5).as_str(), "n5");
    assert_eq!(EntityId::way(-2).kind(), Some(EntityKind::Way));
    assert!(EntityId::way(-2).is_new());
    assert!(!EntityId::relation(7).is_new());
    assert_eq!(id("x1").kind(), None);

    let a = EntityId::fresh(EntityKind::Node);
    let b = EntityId::fresh(EntityKind::Node);
    assert_ne!(a, b);
    assert!(a.is_new() && b.is_new());
}

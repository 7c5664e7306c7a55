use sirenia_geo::{Identity, Mercator, Projection, loc, point, points_equal, vector};

#[test]
fn identity_maps_lon_lat_to_x_y() {
    assert_eq!(Identity.project(loc(3.0, -4.0)), point(3.0, -4.0));
    assert_eq!(Identity.invert(point(3.0, -4.0)), loc(3.0, -4.0));
}

#[test]
fn mercator_origin_maps_to_translate() {
    let m = Mercator::at_zoom(16.0).with_translate(vector(100.0, 200.0));
    let p = m.project(loc(0.0, 0.0));
    assert!(points_equal(p, point(100.0, 200.0), 1e-6));
}

#[test]
fn mercator_y_grows_southward() {
    let m = Mercator::at_zoom(10.0);
    assert!(m.project(loc(0.0, 10.0)).y < m.project(loc(0.0, -10.0)).y);
    assert!(m.project(loc(10.0, 0.0)).x > m.project(loc(-10.0, 0.0)).x);
}

#[test]
fn mercator_round_trips() {
    let m = Mercator::at_zoom(17.0).with_translate(vector(-12.5, 40.0));
    for l in [loc(0.0, 0.0), loc(-77.03, 38.89), loc(139.69, 35.68), loc(12.0, -70.0)] {
        let back = m.invert(m.project(l));
        assert!(points_equal(back, l, 1e-9), "{back:?} != {l:?}");
    }
}

#[test]
fn world_is_one_tile_wide_at_zoom_zero() {
    let m = Mercator::default();
    let west = m.project(loc(-180.0, 0.0));
    let east = m.project(loc(180.0, 0.0));
    assert!((east.x - west.x - Mercator::TILE_SIZE).abs() < 1e-9);
}

#[test]
fn projection_is_usable_through_references() {
    fn project_twice<P: Projection>(p: P) -> sirenia_geo::Point {
        p.project(p.invert(p.project(loc(1.0, 2.0))))
    }
    let m = Mercator::at_zoom(3.0);
    assert!(points_equal(project_twice(&m), m.project(loc(1.0, 2.0)), 1e-9));
}

#[test]
fn mercator_deserializes_from_json() {
    let m: Mercator =
        serde_json::from_value(serde_json::json!({ "scale": 2.0, "translate": [5.0, 6.0] }))
            .unwrap();
    assert_eq!(m, Mercator::new(2.0, vector(5.0, 6.0)));
}

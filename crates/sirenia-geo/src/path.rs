//! Polyline helpers in projected space.

use crate::Point;

/// Result of a nearest-edge query against a polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Index of the segment's end vertex; inserting a vertex at this index splits the segment.
    pub index: usize,
    pub distance: f64,
    /// Closest point on the polyline.
    pub point: Point,
}

pub fn path_length(path: &[Point]) -> f64 {
    path.windows(2).map(|w| w[0].distance_to(w[1])).sum()
}

/// Intersection of the segments `a` and `b`, endpoints included.
///
/// Collinear and parallel segments never intersect, and neither does a segment `b` that starts
/// on the line through `a`.
pub fn line_intersection(a: (Point, Point), b: (Point, Point)) -> Option<Point> {
    let (p, p2) = a;
    let (q, q2) = b;
    let r = p2 - p;
    let s = q2 - q;
    let u_numerator = (q - p).cross(r);
    let denominator = r.cross(s);
    if u_numerator == 0.0 || denominator == 0.0 {
        return None;
    }

    let u = u_numerator / denominator;
    let t = (q - p).cross(s) / denominator;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(p.lerp(p2, t))
    } else {
        None
    }
}

/// Every segment/segment intersection between two polylines, in `path1`-major order.
pub fn path_intersections(path1: &[Point], path2: &[Point]) -> Vec<Point> {
    let mut out = Vec::new();
    for a in path1.windows(2) {
        for b in path2.windows(2) {
            if let Some(hit) = line_intersection((a[0], a[1]), (b[0], b[1])) {
                out.push(hit);
            }
        }
    }
    out
}

/// Finds the segment of `points` closest to `target`.
///
/// Zero-length segments are ignored. Ties keep the earliest segment. Returns `None` when the
/// polyline has no usable segment.
pub fn choose_edge(points: &[Point], target: Point) -> Option<Edge> {
    let mut best: Option<Edge> = None;
    for (i, seg) in points.windows(2).enumerate() {
        let o = seg[0];
        let s = seg[1] - o;
        let len2 = s.square_length();
        if len2 == 0.0 || !len2.is_finite() {
            continue;
        }

        let proj = (target - o).dot(s) / len2;
        let p = if proj < 0.0 {
            o
        } else if proj > 1.0 {
            seg[1]
        } else {
            o + s * proj
        };

        let d = p.distance_to(target);
        if best.map_or(true, |b| d < b.distance) {
            best = Some(Edge {
                index: i + 1,
                distance: d,
                point: p,
            });
        }
    }
    best
}

/// Direction from `a` to `b` in radians, `(-PI, PI]`.
pub fn angle(a: Point, b: Point) -> f64 {
    (b.y - a.y).atan2(b.x - a.x)
}

/// Absolute difference, in degrees, between the directions `vertex -> prev` and `vertex -> next`.
///
/// A straight pass-through vertex yields 180.
pub fn turn_angle_degrees(vertex: Point, prev: Point, next: Point) -> f64 {
    (angle(vertex, prev) - angle(vertex, next)).abs().to_degrees()
}

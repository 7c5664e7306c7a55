#![forbid(unsafe_code)]

//! Geometry primitives shared by the `sirenia` crates.
//!
//! Two coordinate spaces are kept apart at the type level:
//! - [`GeoSpace`]: geographic locations (`x` = longitude, `y` = latitude, degrees)
//! - [`ScreenSpace`]: projected planar coordinates, where all distance and angle math happens
//!
//! A [`Projection`] converts between the two.

pub mod path;
pub mod projection;

pub use path::{
    Edge, angle, choose_edge, line_intersection, path_intersections, path_length,
    turn_angle_degrees,
};
pub use projection::{Identity, Mercator, Projection};

/// Unit marker for geographic (lon/lat) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoSpace;

/// Unit marker for projected, planar coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSpace;

pub type Loc = euclid::Point2D<f64, GeoSpace>;
pub type Point = euclid::Point2D<f64, ScreenSpace>;
pub type Vector = euclid::Vector2D<f64, ScreenSpace>;

pub fn loc(lon: f64, lat: f64) -> Loc {
    euclid::point2(lon, lat)
}

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

/// Component-wise comparison with an absolute tolerance.
///
/// `epsilon == 0.0` means exact equality.
pub fn points_equal<U>(
    a: euclid::Point2D<f64, U>,
    b: euclid::Point2D<f64, U>,
    epsilon: f64,
) -> bool {
    if epsilon == 0.0 {
        return a.x == b.x && a.y == b.y;
    }
    (a.x - b.x).abs() <= epsilon && (a.y - b.y).abs() <= epsilon
}

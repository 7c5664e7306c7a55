//! Forward/inverse transforms between geographic and planar coordinates.

use crate::{Loc, Point, Vector};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// A reversible map projection.
///
/// `invert(project(loc))` must return `loc` up to floating point round-trip error.
pub trait Projection {
    fn project(&self, loc: Loc) -> Point;
    fn invert(&self, point: Point) -> Loc;

    fn project_all<I>(&self, locs: I) -> Vec<Point>
    where
        I: IntoIterator<Item = Loc>,
    {
        locs.into_iter().map(|l| self.project(l)).collect()
    }
}

impl<P: Projection + ?Sized> Projection for &P {
    fn project(&self, loc: Loc) -> Point {
        (**self).project(loc)
    }

    fn invert(&self, point: Point) -> Loc {
        (**self).invert(point)
    }
}

/// Treats lon/lat as planar x/y. Mostly useful in tests.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Identity;

impl Projection for Identity {
    fn project(&self, loc: Loc) -> Point {
        euclid::point2(loc.x, loc.y)
    }

    fn invert(&self, point: Point) -> Loc {
        euclid::point2(point.x, point.y)
    }
}

/// Spherical web mercator scaled to pixels, with screen `y` growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mercator {
    /// Pixels per radian.
    pub scale: f64,
    pub translate: Vector,
}

impl Default for Mercator {
    fn default() -> Self {
        Self::at_zoom(0.0)
    }
}

impl Mercator {
    pub const TILE_SIZE: f64 = 256.0;

    pub fn new(scale: f64, translate: Vector) -> Self {
        Self { scale, translate }
    }

    /// Scale for slippy-map zoom level `z` (one 256px tile covers the world at `z = 0`).
    pub fn at_zoom(z: f64) -> Self {
        Self {
            scale: Self::TILE_SIZE * 2f64.powf(z) / (2.0 * PI),
            translate: euclid::vec2(0.0, 0.0),
        }
    }

    pub fn with_translate(mut self, translate: Vector) -> Self {
        self.translate = translate;
        self
    }
}

impl Projection for Mercator {
    fn project(&self, loc: Loc) -> Point {
        let lambda = loc.x.to_radians();
        let phi = loc.y.to_radians();
        let x = lambda * self.scale + self.translate.x;
        let y = self.translate.y - (FRAC_PI_4 + phi / 2.0).tan().ln() * self.scale;
        euclid::point2(x, y)
    }

    fn invert(&self, point: Point) -> Loc {
        let lambda = (point.x - self.translate.x) / self.scale;
        let phi = 2.0 * ((self.translate.y - point.y) / self.scale).exp().atan() - FRAC_PI_2;
        euclid::point2(lambda.to_degrees(), phi.to_degrees())
    }
}

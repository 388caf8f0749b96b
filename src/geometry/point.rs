//! Planar point in sieve coordinates (millimeters, origin at the optical axis).

use serde::Serialize;

/// A point in the sieve plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// Horizontal coordinate in millimeters.
    pub x: f64,
    /// Vertical coordinate in millimeters.
    pub y: f64,
}

impl Point {
    /// Creates a point from Cartesian coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a point at `radius` from the origin along `azimuth` radians.
    #[inline]
    pub fn from_polar(radius: f64, azimuth: f64) -> Self {
        let (sin, cos) = azimuth.sin_cos();
        Self {
            x: radius * cos,
            y: radius * sin,
        }
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

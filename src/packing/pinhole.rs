//! Circular aperture on a ring centerline.

use crate::geometry::Point;
use serde::Serialize;
use std::f64::consts::PI;

/// An accepted pinhole.
///
/// The center is derived once from the azimuth and the parent ring's
/// centerline radius; a pinhole never changes after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pinhole {
    radius: f64,
    azimuth: f64,
    area: f64,
    center: Point,
}

impl Pinhole {
    /// Creates a pinhole of `radius` at `azimuth` on a ring of `centerline_radius`.
    pub fn new(radius: f64, azimuth: f64, centerline_radius: f64) -> Self {
        Self {
            radius,
            azimuth,
            area: PI * radius * radius,
            center: Point::from_polar(centerline_radius, azimuth),
        }
    }

    /// Radius in millimeters.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Angular position in radians, interpreted modulo 2π.
    #[inline]
    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }

    /// Open area `π·r²` in square millimeters.
    #[inline]
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Center in sieve coordinates.
    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Edge-to-edge distance to a circle of `radius` centered at `center`.
    ///
    /// Negative when the two circles overlap.
    #[inline]
    pub fn clearance_to(&self, center: &Point, radius: f64) -> f64 {
        self.center.distance_to(center) - self.radius - radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_fields() {
        let pinhole = Pinhole::new(0.01, 0.0, 0.5);
        assert!((pinhole.area() - PI * 1e-4).abs() < 1e-15);
        assert!((pinhole.center().x - 0.5).abs() < 1e-12);
        assert!(pinhole.center().y.abs() < 1e-12);
    }

    #[test]
    fn test_clearance_opposite_sides() {
        let a = Pinhole::new(0.01, 0.0, 0.5);
        let b = Pinhole::new(0.02, PI, 0.5);
        let clearance = a.clearance_to(&b.center(), b.radius());
        assert!((clearance - (1.0 - 0.03)).abs() < 1e-12);
    }

    #[test]
    fn test_overlap_is_negative() {
        let a = Pinhole::new(0.05, 0.0, 0.5);
        let b = Pinhole::new(0.05, 0.01, 0.5);
        assert!(a.clearance_to(&b.center(), b.radius()) < 0.0);
    }
}

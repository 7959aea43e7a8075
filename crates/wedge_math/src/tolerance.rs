//! Position identity under tolerance
//!
//! One value decides when two coordinates mean the same vertex, so the
//! soup builder and its callers cannot drift apart on the question.

use crate::Point3;
use serde::{Deserialize, Serialize};

/// Merge radius for coordinate identity
///
/// Two positions closer than `linear` collapse to one vertex. `relative`
/// widens the radius for coordinates far from the origin, where f64
/// spacing itself grows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Absolute merge radius
    pub linear: f64,
    /// Relative resolution for large magnitudes
    pub relative: f64,
}

impl Tolerance {
    /// Merge radius 1e-6, relative resolution 1e-10
    pub const DEFAULT: Self = Self {
        linear: 1e-6,
        relative: 1e-10,
    };

    /// Tolerance with a custom merge radius
    pub fn with_linear(linear: f64) -> Self {
        Self {
            linear,
            ..Self::DEFAULT
        }
    }

    /// Whether two positions name the same vertex
    #[inline]
    pub fn same_point(&self, a: Point3, b: Point3) -> bool {
        a.dist_sq(b) <= self.linear * self.linear
    }

    /// Whether a length is too small to matter
    #[inline]
    pub fn negligible(&self, length: f64) -> bool {
        length.abs() <= self.linear
    }

    /// Merge radius adjusted for a coordinate magnitude
    #[inline]
    pub fn effective(&self, magnitude: f64) -> f64 {
        self.linear.max(magnitude.abs() * self.relative)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_within_radius() {
        let tol = Tolerance::DEFAULT;
        let p = Point3::new(1.0, 1.0, 1.0);
        assert!(tol.same_point(p, Point3::new(1.0, 1.0 + 1e-8, 1.0)));
        assert!(!tol.same_point(p, Point3::new(1.0, 1.01, 1.0)));
    }

    #[test]
    fn test_custom_radius() {
        let coarse = Tolerance::with_linear(0.25);
        assert!(coarse.same_point(Point3::ORIGIN, Point3::new(0.2, 0.0, 0.0)));
        assert!(coarse.negligible(-0.1));
        assert!(!coarse.negligible(0.3));
    }

    #[test]
    fn test_effective_grows_with_magnitude() {
        let tol = Tolerance::DEFAULT;
        assert_eq!(tol.effective(1.0), 1e-6);
        assert_eq!(tol.effective(-1e6), 1e-4);
    }
}

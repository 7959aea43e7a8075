//! Axis-aligned bounds

use crate::{Point3, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned box around a point set
///
/// A fresh box is inverted (every min above every max), so folding points
/// in with `include` needs no first-point special case; a box that never
/// absorbed a point stays empty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Lower corner
    pub min: Point3,
    /// Upper corner
    pub max: Point3,
}

impl Aabb {
    /// Box containing nothing
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Tightest box around the given points
    pub fn around(points: impl IntoIterator<Item = Point3>) -> Self {
        let mut aabb = Self::empty();
        for p in points {
            aabb.include(p);
        }
        aabb
    }

    /// Grow to cover one more point
    pub fn include(&mut self, p: Point3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Whether the box contains no point at all
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Midpoint of the two corners
    pub fn center(&self) -> Point3 {
        self.min.lerp(self.max, 0.5)
    }

    /// Edge lengths along the three axes
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Whether a point lies inside or on the boundary
    pub fn contains(&self, p: Point3) -> bool {
        (self.min.x..=self.max.x).contains(&p.x)
            && (self.min.y..=self.max.y).contains(&p.y)
            && (self.min.z..=self.max.z).contains(&p.z)
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_box_is_empty() {
        assert!(Aabb::empty().is_empty());
        assert!(Aabb::around(std::iter::empty::<Point3>()).is_empty());
    }

    #[test]
    fn test_around_points() {
        let aabb = Aabb::around([
            Point3::new(1.0, -2.0, 0.0),
            Point3::new(-3.0, 4.0, 2.0),
            Point3::new(0.0, 0.0, -1.0),
        ]);
        assert!(!aabb.is_empty());
        assert_eq!(aabb.min, Point3::new(-3.0, -2.0, -1.0));
        assert_eq!(aabb.max, Point3::new(1.0, 4.0, 2.0));
        assert_eq!(aabb.size(), Vec3::new(4.0, 6.0, 3.0));
        assert_eq!(aabb.center(), Point3::new(-1.0, 1.0, 0.5));
    }

    #[test]
    fn test_single_point_box() {
        let p = Point3::new(5.0, 5.0, 5.0);
        let aabb = Aabb::around([p]);
        assert!(!aabb.is_empty());
        assert_eq!(aabb.min, p);
        assert_eq!(aabb.max, p);
        assert_eq!(aabb.size(), Vec3::ZERO);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let aabb = Aabb::around([Point3::ORIGIN, Point3::new(2.0, 2.0, 2.0)]);
        assert!(aabb.contains(Point3::new(1.0, 2.0, 0.0)));
        assert!(aabb.contains(Point3::ORIGIN));
        assert!(!aabb.contains(Point3::new(1.0, 1.0, 2.1)));
    }
}

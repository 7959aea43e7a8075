//! Coordinate types
//!
//! `Point3` is a location, `Vec3` a displacement; subtracting two points
//! yields a vector and adding a vector to a point yields a point, which is
//! the only arithmetic the kernel performs on raw coordinates. Components
//! are public f64 fields, so geometry code reads `p.x` rather than going
//! through accessors.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Displacement or direction in model space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl Vec3 {
    /// All components zero
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Unit vector along +X
    pub const X_AXIS: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };

    /// Unit vector along +Y
    pub const Y_AXIS: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };

    /// Unit vector along +Z
    pub const Z_AXIS: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    /// Vector from components
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Scalar product
    #[inline]
    pub fn dot(self, rhs: Vec3) -> f64 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    /// Right-handed vector product
    #[inline]
    pub fn cross(self, rhs: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    /// Euclidean length
    #[inline]
    pub fn norm(self) -> f64 {
        self.norm_sq().sqrt()
    }

    /// Squared length, sparing the square root
    #[inline]
    pub fn norm_sq(self) -> f64 {
        self.dot(self)
    }

    /// Direction of this vector, or None when its length vanishes
    ///
    /// Anything shorter than 1e-12 has no usable direction in f64 and
    /// reports None rather than an exploded quotient.
    #[inline]
    pub fn unit(self) -> Option<Vec3> {
        let n = self.norm();
        (n > 1e-12).then(|| self * (1.0 / n))
    }

    /// Whether the squared length is within `tol` of one
    #[inline]
    pub fn is_unit(self, tol: f64) -> bool {
        (self.norm_sq() - 1.0).abs() <= tol
    }

    /// Whether the vector fits in a ball of radius `tol`
    #[inline]
    pub fn near_zero(self, tol: f64) -> bool {
        self.norm_sq() <= tol * tol
    }

    /// Unsigned angle to another vector, in radians
    ///
    /// Computed as atan2(|a x b|, a . b), which stays accurate for nearly
    /// parallel and nearly opposite pairs.
    #[inline]
    pub fn angle(self, rhs: Vec3) -> f64 {
        self.cross(rhs).norm().atan2(self.dot(rhs))
    }
}

impl From<[f64; 3]> for Vec3 {
    #[inline]
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Vec3> for [f64; 3] {
    #[inline]
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    #[inline]
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, s: f64) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }
}

/// Location in model space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate
    pub z: f64,
}

impl Point3 {
    /// The origin
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Point from coordinates
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Displacement from the origin
    #[inline]
    pub fn to_vec(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Distance to another point
    #[inline]
    pub fn dist(self, rhs: Point3) -> f64 {
        (rhs - self).norm()
    }

    /// Squared distance, sparing the square root
    #[inline]
    pub fn dist_sq(self, rhs: Point3) -> f64 {
        (rhs - self).norm_sq()
    }

    /// Point a fraction `t` of the way towards another
    #[inline]
    pub fn lerp(self, rhs: Point3, t: f64) -> Point3 {
        self + (rhs - self) * t
    }
}

impl From<[f64; 3]> for Point3 {
    #[inline]
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Point3> for [f64; 3] {
    #[inline]
    fn from(p: Point3) -> Self {
        [p.x, p.y, p.z]
    }
}

impl Sub for Point3 {
    type Output = Vec3;

    #[inline]
    fn sub(self, rhs: Point3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Add<Vec3> for Point3 {
    type Output = Point3;

    #[inline]
    fn add(self, rhs: Vec3) -> Point3 {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dot_of_orthogonal_axes() {
        assert_eq!(Vec3::X_AXIS.dot(Vec3::Y_AXIS), 0.0);
        assert_eq!(Vec3::Z_AXIS.dot(Vec3::Z_AXIS), 1.0);
    }

    #[test]
    fn test_cross_follows_the_right_hand() {
        assert_eq!(Vec3::X_AXIS.cross(Vec3::Y_AXIS), Vec3::Z_AXIS);
        assert_eq!(Vec3::Y_AXIS.cross(Vec3::X_AXIS), -Vec3::Z_AXIS);
        // The product is orthogonal to both factors.
        let a = Vec3::new(1.0, 2.0, -3.0);
        let b = Vec3::new(-4.0, 0.5, 2.0);
        let c = a.cross(b);
        assert_relative_eq!(c.dot(a), 0.0, epsilon = 1e-12);
        assert_relative_eq!(c.dot(b), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unit_direction() {
        let u = Vec3::new(0.0, -2.0, 0.0).unit().unwrap();
        assert_eq!(u, Vec3::new(0.0, -1.0, 0.0));
        assert!(u.is_unit(1e-12));
        assert!(Vec3::ZERO.unit().is_none());
        assert!(Vec3::new(1e-15, 0.0, 0.0).unit().is_none());
    }

    #[test]
    fn test_near_zero_radius() {
        assert!(Vec3::new(1e-10, -1e-10, 0.0).near_zero(1e-9));
        assert!(!Vec3::X_AXIS.near_zero(0.5));
    }

    #[test]
    fn test_angle_extremes() {
        let a = Vec3::new(3.0, 0.0, 0.0);
        let quarter = a.angle(Vec3::new(0.0, 7.0, 0.0));
        assert_relative_eq!(quarter, std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(a.angle(a * 2.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(a.angle(-a), std::f64::consts::PI, epsilon = 1e-12);
    }

    #[test]
    fn test_point_minus_point_is_a_vector() {
        let d = Point3::new(4.0, 4.0, 4.0) - Point3::new(1.0, 2.0, 3.0);
        assert_eq!(d, Vec3::new(3.0, 2.0, 1.0));
    }

    #[test]
    fn test_point_plus_vector_round_trip() {
        let p = Point3::new(-1.0, 0.5, 2.0);
        let v = Vec3::new(0.25, -0.5, 1.0);
        assert_eq!((p + v) - p, v);
    }

    #[test]
    fn test_dist() {
        let a = Point3::ORIGIN;
        let b = Point3::new(2.0, -3.0, 6.0);
        assert_eq!(a.dist(b), 7.0);
        assert_eq!(a.dist_sq(b), 49.0);
    }

    #[test]
    fn test_lerp_endpoints_and_middle() {
        let a = Point3::new(0.0, 10.0, -4.0);
        let b = Point3::new(2.0, 0.0, 4.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Point3::new(1.0, 5.0, 0.0));
    }

    #[test]
    fn test_array_conversions() {
        let p = Point3::from([1.0, 2.0, 3.0]);
        assert_eq!(<[f64; 3]>::from(p), [1.0, 2.0, 3.0]);
        assert_eq!(Vec3::from([0.0, 0.0, 1.0]), Vec3::Z_AXIS);
    }
}

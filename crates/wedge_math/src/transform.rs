//! Affine transforms over homogeneous coordinates
//!
//! The one place this crate leans on nalgebra: inversion and composition
//! of 4x4 matrices are not worth hand-rolling, while the kernel-facing
//! surface stays in terms of `Point3` and `Vec3`.

use crate::{Point3, Vec3};
use nalgebra::{Matrix4, Unit, Vector3};
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// Homogeneous 4x4 transform
///
/// Composition through `*` reads right to left: `(a * b).apply_point(p)`
/// applies `b` first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mat4 {
    m: Matrix4<f64>,
}

impl Mat4 {
    /// The transform that changes nothing
    pub fn identity() -> Self {
        Self {
            m: Matrix4::identity(),
        }
    }

    /// Translation by an offset
    pub fn translation(offset: Vec3) -> Self {
        Self {
            m: Matrix4::new_translation(&Vector3::new(offset.x, offset.y, offset.z)),
        }
    }

    /// Per-axis scaling about the origin
    pub fn scaling(x: f64, y: f64, z: f64) -> Self {
        Self {
            m: Matrix4::new_nonuniform_scaling(&Vector3::new(x, y, z)),
        }
    }

    /// Uniform scaling about the origin
    pub fn uniform_scaling(factor: f64) -> Self {
        Self::scaling(factor, factor, factor)
    }

    /// Rotation about an axis through the origin, angle in radians
    pub fn rotation(axis: Vec3, angle: f64) -> Self {
        let axis = Unit::new_normalize(Vector3::new(axis.x, axis.y, axis.z));
        Self {
            m: Matrix4::from_axis_angle(&axis, angle),
        }
    }

    /// Map a location, translation included
    #[inline]
    pub fn apply_point(&self, p: Point3) -> Point3 {
        let q = self.m.transform_point(&nalgebra::Point3::new(p.x, p.y, p.z));
        Point3::new(q.x, q.y, q.z)
    }

    /// Map a direction, translation ignored
    #[inline]
    pub fn apply_vec(&self, v: Vec3) -> Vec3 {
        let w = self.m.transform_vector(&Vector3::new(v.x, v.y, v.z));
        Vec3::new(w.x, w.y, w.z)
    }

    /// Determinant of the homogeneous matrix
    #[inline]
    pub fn det(&self) -> f64 {
        self.m.determinant()
    }

    /// Inverse transform, unless singular
    pub fn inverse(&self) -> Option<Self> {
        self.m.try_inverse().map(|m| Self { m })
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    #[inline]
    fn mul(self, rhs: Mat4) -> Mat4 {
        Mat4 { m: self.m * rhs.m }
    }
}

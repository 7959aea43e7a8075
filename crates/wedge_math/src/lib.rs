//! Wedge Math - Scalar Geometry for the Wedge B-Rep Kernel
//!
//! The numeric layer the topology engine stands on. Coordinates are plain
//! f64 fields on small `Copy` types; the only place a linear-algebra
//! library earns its keep is the homogeneous transform, which defers its
//! inversion and composition to nalgebra. Position identity lives in one
//! `Tolerance` value so the kernel and its callers cannot disagree about
//! when two coordinates mean the same vertex.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod aabb;
mod coords;
mod polygon;
mod tolerance;
mod transform;

pub use aabb::Aabb;
pub use coords::{Point3, Vec3};
pub use polygon::{newell_normal, polygon_area, polygon_normal};
pub use tolerance::Tolerance;
pub use transform::Mat4;

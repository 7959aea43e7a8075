//! Wedge Kernel - Winged-Edge B-Rep Modeling Kernel
//!
//! The main crate re-exporting the whole kernel.
//!
//! ## Modules
//!
//! - `math`: points, vectors, transforms, tolerances
//! - `topo`: the winged-edge topology core (mesh, Euler operators,
//!   navigation, validation, primitives)
//! - `check`: validation reporting with warnings
//!
//! ## A triangle in four operator calls
//!
//! ```
//! use wedge_kernel::math::Point3;
//! use wedge_kernel::topo::Mesh;
//!
//! let mut mesh = Mesh::new();
//! let (v1, f) = mesh.mvsf(Point3::new(0.0, 0.0, 0.0));
//! let e1 = mesh.mev(v1, Point3::new(1.0, 0.0, 0.0), f).unwrap();
//! let v2 = mesh.edge(e1).unwrap().v2();
//! let e2 = mesh.mev(v2, Point3::new(0.5, 1.0, 0.0), f).unwrap();
//! let v3 = mesh.edge(e2).unwrap().v2();
//! mesh.mef(v3, v1, f).unwrap();
//!
//! assert_eq!(mesh.vertex_count(), 3);
//! assert_eq!(mesh.edge_count(), 3);
//! assert_eq!(mesh.face_count(), 2);
//! assert!(mesh.validate().is_ok());
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub use wedge_check as check;
pub use wedge_math as math;
pub use wedge_topo as topo;

/// Version of the Wedge kernel
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the kernel version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_facade_reaches_the_kernel() {
        let mesh = topo::cube(1.0).unwrap();
        assert!(check::check_mesh(&mesh).is_valid());
    }
}

//! Wedge Topo - Winged-Edge B-Rep Topology Engine
//!
//! Provides the boundary-representation core:
//! - Vertex, Edge, Face records with winged-edge adjacency
//! - The owning `Mesh` container with stable, never-reused entity ids
//! - Euler operators (MVSF, MEV, MEF, KEF, KFMRH)
//! - Navigation queries over face boundaries and vertex stars
//! - Structural validation and the 2-manifold predicate
//! - Primitive constructors (cube, plane, polygon soup)
//!
//! Every Euler operator checks its preconditions before touching the pools,
//! so a returned error implies the mesh is unchanged.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod euler;
mod handle;
mod mesh;
mod navigate;
mod pool;
mod primitives;
mod validate;

pub use euler::KefOutcome;
pub use handle::{EdgeId, EntityKind, FaceId, VertexId};
pub use mesh::{Edge, Face, Mesh, Vertex, Wing};
pub use navigate::Coedge;
pub use primitives::{cube, from_polygon_soup, plane};

/// Topology-related errors
///
/// The four kinds exhaust the kernel's failure surface. `BadArgument`,
/// `StaleHandle` and `TopologyViolation` are operator precondition failures
/// (mesh unchanged); `Inconsistency` means a walk or validation pass found a
/// broken invariant and names the offending entity.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// A precondition on operator inputs failed
    #[error("bad argument: {0}")]
    BadArgument(String),

    /// A handle referred to an entity that no longer exists in this mesh
    #[error("stale {kind} handle {id}")]
    StaleHandle {
        /// Kind of the referenced entity
        kind: EntityKind,
        /// Raw id of the missing entity
        id: u64,
    },

    /// An operator's preconditions on adjacency were not met
    #[error("topology violation: {0}")]
    TopologyViolation(String),

    /// A navigation or validation routine detected a broken invariant
    #[error("inconsistency at {kind} {id}: {message}")]
    Inconsistency {
        /// Kind of the offending entity
        kind: EntityKind,
        /// Raw id of the offending entity
        id: u64,
        /// What was found broken
        message: String,
    },
}

/// Result type for topology operations
pub type TopoResult<T> = Result<T, TopologyError>;

/// Direction of one use of an edge in a face's boundary walk
///
/// `Forward` is the `f1` side of the edge (traversal `v1 -> v2`), `Reversed`
/// the `f2` side (traversal `v2 -> v1`). A spur edge is used once in each
/// sense by the same face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sense {
    /// The `f1` side: traversal from `v1` to `v2`
    Forward,
    /// The `f2` side: traversal from `v2` to `v1`
    Reversed,
}

impl Sense {
    /// Check if forward
    pub fn is_forward(&self) -> bool {
        matches!(self, Sense::Forward)
    }

    /// Check if reversed
    pub fn is_reversed(&self) -> bool {
        matches!(self, Sense::Reversed)
    }

    /// Reverse the sense
    pub fn reverse(&self) -> Self {
        match self {
            Sense::Forward => Sense::Reversed,
            Sense::Reversed => Sense::Forward,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sense() {
        assert!(Sense::Forward.is_forward());
        assert!(Sense::Reversed.is_reversed());
        assert_eq!(Sense::Forward.reverse(), Sense::Reversed);
        assert_eq!(Sense::Reversed.reverse(), Sense::Forward);
    }

    #[test]
    fn test_error_display() {
        let err = TopologyError::StaleHandle {
            kind: EntityKind::Edge,
            id: 7,
        };
        assert_eq!(err.to_string(), "stale edge handle 7");

        let err = TopologyError::Inconsistency {
            kind: EntityKind::Face,
            id: 3,
            message: "boundary walk does not close".to_string(),
        };
        assert!(err.to_string().contains("face 3"));
    }
}

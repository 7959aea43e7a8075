//! Typed entity handles
//!
//! Ids are positive, assigned from a monotonically increasing per-kind
//! counter inside each mesh, and never reused for that mesh's lifetime.
//! Because an id is never recycled, a deleted handle simply misses the pool
//! index and dereferencing it reports a stale-handle error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind tag for uniform entity identification in errors and reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A vertex
    Vertex,
    /// An edge
    Edge,
    /// A face
    Face,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Vertex => write!(f, "vertex"),
            EntityKind::Edge => write!(f, "edge"),
            EntityKind::Face => write!(f, "face"),
        }
    }
}

/// Stable handle to a vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId(pub(crate) u64);

/// Stable handle to an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub(crate) u64);

/// Stable handle to a face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FaceId(pub(crate) u64);

impl VertexId {
    /// Raw id value
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl EdgeId {
    /// Raw id value
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl FaceId {
    /// Raw id value
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(VertexId(3).to_string(), "v3");
        assert_eq!(EdgeId(9).to_string(), "e9");
        assert_eq!(FaceId(1).to_string(), "f1");
        assert_eq!(EntityKind::Vertex.to_string(), "vertex");
    }

    #[test]
    fn test_ordering_follows_creation() {
        assert!(VertexId(1) < VertexId(2));
        assert!(EdgeId(10) > EdgeId(2));
    }
}

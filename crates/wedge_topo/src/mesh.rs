//! Entity records and the owning mesh container
//!
//! The mesh owns three pools (vertices, edges, faces) and is the only way to
//! reach an entity. Handles returned to callers are borrows by id; deleting
//! an entity invalidates its id forever.
//!
//! Wing convention: `wing1` holds the predecessor/successor of the edge in
//! its `f1` face walk, where traversal runs `v1 -> v2` (so `wing1.prev`
//! meets the edge at `v1` and `wing1.next` at `v2`). `wing2` is the same
//! pair for the `f2` walk, which runs `v2 -> v1`. Wings always name a live
//! edge; a wing naming its own edge encodes a spur tip.

use crate::handle::{EdgeId, EntityKind, FaceId, VertexId};
use crate::pool::Pool;
use crate::{Sense, TopoResult, TopologyError};
use wedge_math::{polygon_area, polygon_normal, Aabb, Mat4, Point3, Vec3};

/// A point of the model with its adjacency anchor
#[derive(Debug, Clone)]
pub struct Vertex {
    pub(crate) id: VertexId,
    pub(crate) position: Point3,
    pub(crate) edge: Option<EdgeId>,
}

impl Vertex {
    /// Handle of this vertex
    #[inline]
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Position in model space
    #[inline]
    pub fn position(&self) -> Point3 {
        self.position
    }

    /// One incident edge, absent for an isolated vertex
    #[inline]
    pub fn edge(&self) -> Option<EdgeId> {
        self.edge
    }
}

/// Predecessor/successor pair of an edge in one face walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wing {
    /// Edge preceding this one in the walk
    pub prev: EdgeId,
    /// Edge following this one in the walk
    pub next: EdgeId,
}

/// A winged edge: two endpoints, two face slots, four adjacency links
#[derive(Debug, Clone)]
pub struct Edge {
    pub(crate) id: EdgeId,
    pub(crate) v1: VertexId,
    pub(crate) v2: VertexId,
    pub(crate) f1: Option<FaceId>,
    pub(crate) f2: Option<FaceId>,
    pub(crate) wing1: Wing,
    pub(crate) wing2: Wing,
}

impl Edge {
    /// Handle of this edge
    #[inline]
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// First endpoint
    #[inline]
    pub fn v1(&self) -> VertexId {
        self.v1
    }

    /// Second endpoint
    #[inline]
    pub fn v2(&self) -> VertexId {
        self.v2
    }

    /// Face on the `v1 -> v2` side
    #[inline]
    pub fn f1(&self) -> Option<FaceId> {
        self.f1
    }

    /// Face on the `v2 -> v1` side
    #[inline]
    pub fn f2(&self) -> Option<FaceId> {
        self.f2
    }

    /// Wing pair for one side's face walk
    #[inline]
    pub fn wing(&self, sense: Sense) -> Wing {
        match sense {
            Sense::Forward => self.wing1,
            Sense::Reversed => self.wing2,
        }
    }

    pub(crate) fn wing_mut(&mut self, sense: Sense) -> &mut Wing {
        match sense {
            Sense::Forward => &mut self.wing1,
            Sense::Reversed => &mut self.wing2,
        }
    }

    /// Face slot for one side
    #[inline]
    pub fn face(&self, sense: Sense) -> Option<FaceId> {
        match sense {
            Sense::Forward => self.f1,
            Sense::Reversed => self.f2,
        }
    }

    pub(crate) fn set_face(&mut self, sense: Sense, face: Option<FaceId>) {
        match sense {
            Sense::Forward => self.f1 = face,
            Sense::Reversed => self.f2 = face,
        }
    }

    /// Vertex a walk in the given sense starts from
    #[inline]
    pub fn start(&self, sense: Sense) -> VertexId {
        match sense {
            Sense::Forward => self.v1,
            Sense::Reversed => self.v2,
        }
    }

    /// Vertex a walk in the given sense arrives at
    #[inline]
    pub fn end(&self, sense: Sense) -> VertexId {
        match sense {
            Sense::Forward => self.v2,
            Sense::Reversed => self.v1,
        }
    }

    /// Whether the vertex is one of this edge's endpoints
    #[inline]
    pub fn has_endpoint(&self, v: VertexId) -> bool {
        self.v1 == v || self.v2 == v
    }

    /// The opposite endpoint, if the vertex is an endpoint at all
    #[inline]
    pub fn other_vertex(&self, v: VertexId) -> Option<VertexId> {
        if v == self.v1 {
            Some(self.v2)
        } else if v == self.v2 {
            Some(self.v1)
        } else {
            None
        }
    }

    /// Whether both face slots name the same face (a dangling spur)
    #[inline]
    pub fn is_spur(&self) -> bool {
        self.f1.is_some() && self.f1 == self.f2
    }
}

/// A face with its boundary anchor and cached outward normal
#[derive(Debug, Clone)]
pub struct Face {
    pub(crate) id: FaceId,
    pub(crate) edge: Option<EdgeId>,
    pub(crate) normal: Vec3,
}

impl Face {
    /// Handle of this face
    #[inline]
    pub fn id(&self) -> FaceId {
        self.id
    }

    /// One boundary edge, absent only for the seed face of a fresh shell
    #[inline]
    pub fn edge(&self) -> Option<EdgeId> {
        self.edge
    }

    /// Cached unit normal, zero for a degenerate boundary
    ///
    /// Derived state: recomputed whenever the boundary is rewired or an
    /// incident vertex moves, never settable from outside.
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

/// The owning container: three entity pools and their id counters
#[derive(Default, Debug)]
pub struct Mesh {
    pub(crate) vertices: Pool<Vertex>,
    pub(crate) edges: Pool<Edge>,
    pub(crate) faces: Pool<Face>,
}

impl Mesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live vertices, O(1)
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of live edges, O(1)
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of live faces, O(1)
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Look up a vertex by handle
    #[inline]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.0)
    }

    /// Look up an edge by handle
    #[inline]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0)
    }

    /// Look up a face by handle
    #[inline]
    pub fn face(&self, id: FaceId) -> Option<&Face> {
        self.faces.get(id.0)
    }

    /// Live vertices in creation order
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    /// Live edges in creation order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Live faces in creation order
    pub fn faces(&self) -> impl Iterator<Item = &Face> {
        self.faces.iter()
    }

    pub(crate) fn try_vertex(&self, id: VertexId) -> TopoResult<&Vertex> {
        self.vertices.get(id.0).ok_or(TopologyError::StaleHandle {
            kind: EntityKind::Vertex,
            id: id.0,
        })
    }

    pub(crate) fn try_edge(&self, id: EdgeId) -> TopoResult<&Edge> {
        self.edges.get(id.0).ok_or(TopologyError::StaleHandle {
            kind: EntityKind::Edge,
            id: id.0,
        })
    }

    pub(crate) fn try_face(&self, id: FaceId) -> TopoResult<&Face> {
        self.faces.get(id.0).ok_or(TopologyError::StaleHandle {
            kind: EntityKind::Face,
            id: id.0,
        })
    }

    pub(crate) fn try_vertex_mut(&mut self, id: VertexId) -> TopoResult<&mut Vertex> {
        self.vertices.get_mut(id.0).ok_or(TopologyError::StaleHandle {
            kind: EntityKind::Vertex,
            id: id.0,
        })
    }

    pub(crate) fn try_edge_mut(&mut self, id: EdgeId) -> TopoResult<&mut Edge> {
        self.edges.get_mut(id.0).ok_or(TopologyError::StaleHandle {
            kind: EntityKind::Edge,
            id: id.0,
        })
    }

    pub(crate) fn try_face_mut(&mut self, id: FaceId) -> TopoResult<&mut Face> {
        self.faces.get_mut(id.0).ok_or(TopologyError::StaleHandle {
            kind: EntityKind::Face,
            id: id.0,
        })
    }

    pub(crate) fn add_vertex(&mut self, position: Point3) -> VertexId {
        VertexId(self.vertices.insert_with(|id| Vertex {
            id: VertexId(id),
            position,
            edge: None,
        }))
    }

    pub(crate) fn add_face(&mut self) -> FaceId {
        FaceId(self.faces.insert_with(|id| Face {
            id: FaceId(id),
            edge: None,
            normal: Vec3::ZERO,
        }))
    }

    pub(crate) fn add_edge(&mut self, v1: VertexId, v2: VertexId) -> EdgeId {
        EdgeId(self.edges.insert_with(|id| Edge {
            id: EdgeId(id),
            v1,
            v2,
            f1: None,
            f2: None,
            // Self-referential until the operator wires the walk.
            wing1: Wing {
                prev: EdgeId(id),
                next: EdgeId(id),
            },
            wing2: Wing {
                prev: EdgeId(id),
                next: EdgeId(id),
            },
        }))
    }

    /// Move a vertex, refreshing the cached normals of its incident faces
    ///
    /// Positions carry no topology, so this never rewires anything; it only
    /// keeps derived normals honest.
    pub fn set_position(&mut self, v: VertexId, position: Point3) -> TopoResult<()> {
        self.try_vertex(v)?;
        let touched = self.incident_faces(v)?;
        self.try_vertex_mut(v)?.position = position;
        for f in touched {
            self.recompute_normal(f)?;
        }
        Ok(())
    }

    /// Apply an affine transform to every vertex position
    ///
    /// A batched position edit: all cached face normals are recomputed
    /// afterwards.
    pub fn transform(&mut self, m: &Mat4) -> TopoResult<()> {
        for vertex in self.vertices.iter_mut() {
            vertex.position = m.apply_point(vertex.position);
        }
        let face_ids: Vec<FaceId> = self.faces.iter().map(|f| f.id).collect();
        for f in face_ids {
            self.recompute_normal(f)?;
        }
        Ok(())
    }

    /// Straight-line length of an edge
    pub fn edge_length(&self, e: EdgeId) -> TopoResult<f64> {
        let edge = self.try_edge(e)?;
        let p1 = self.try_vertex(edge.v1)?.position;
        let p2 = self.try_vertex(edge.v2)?.position;
        Ok(p1.dist(p2))
    }

    /// Area enclosed by a face's boundary walk (Newell sum)
    pub fn face_area(&self, f: FaceId) -> TopoResult<f64> {
        let positions = self.boundary_positions(f)?;
        Ok(polygon_area(&positions))
    }

    /// Axis-aligned bounding box over all live vertices
    pub fn bounding_box(&self) -> Aabb {
        Aabb::around(self.vertices.iter().map(|v| v.position))
    }

    /// Recompute and store the face's cached Newell normal
    pub(crate) fn recompute_normal(&mut self, f: FaceId) -> TopoResult<()> {
        let normal = match self.try_face(f)?.edge {
            Some(_) => polygon_normal(&self.boundary_positions(f)?),
            None => Vec3::ZERO,
        };
        self.try_face_mut(f)?.normal = normal;
        Ok(())
    }

    fn boundary_positions(&self, f: FaceId) -> TopoResult<Vec<Point3>> {
        let mut positions = Vec::new();
        for v in self.boundary_vertices(f)? {
            positions.push(self.try_vertex(v)?.position);
        }
        Ok(positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mesh() {
        let mesh = Mesh::new();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.edge_count(), 0);
        assert_eq!(mesh.face_count(), 0);
        assert!(mesh.bounding_box().is_empty());
    }

    #[test]
    fn test_lookup_absent_id() {
        let mesh = Mesh::new();
        assert!(mesh.vertex(VertexId(1)).is_none());
        assert!(mesh.edge(EdgeId(1)).is_none());
        assert!(mesh.face(FaceId(1)).is_none());
    }

    #[test]
    fn test_ids_are_per_kind() {
        let mut mesh = Mesh::new();
        let v = mesh.add_vertex(Point3::ORIGIN);
        let f = mesh.add_face();
        // Counters are independent per kind, both starting at 1.
        assert_eq!(v.raw(), 1);
        assert_eq!(f.raw(), 1);
    }

    #[test]
    fn test_creation_order_iteration() {
        let mut mesh = Mesh::new();
        let a = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
        let b = mesh.add_vertex(Point3::new(2.0, 0.0, 0.0));
        let c = mesh.add_vertex(Point3::new(3.0, 0.0, 0.0));
        let order: Vec<VertexId> = mesh.vertices().map(|v| v.id()).collect();
        assert_eq!(order, vec![a, b, c]);
    }

    #[test]
    fn test_set_position_isolated_vertex() {
        let mut mesh = Mesh::new();
        let (v, _) = mesh.mvsf(Point3::ORIGIN);
        mesh.set_position(v, Point3::new(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(mesh.vertex(v).unwrap().position(), Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_set_position_stale_handle() {
        let mut mesh = Mesh::new();
        let err = mesh.set_position(VertexId(42), Point3::ORIGIN).unwrap_err();
        assert_eq!(
            err,
            TopologyError::StaleHandle {
                kind: EntityKind::Vertex,
                id: 42
            }
        );
    }

    #[test]
    fn test_edge_length() {
        let mut mesh = Mesh::new();
        let (v, f) = mesh.mvsf(Point3::ORIGIN);
        let e = mesh.mev(v, Point3::new(3.0, 4.0, 0.0), f).unwrap();
        assert!((mesh.edge_length(e).unwrap() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_bounding_box() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(Point3::new(-1.0, 0.0, 2.0));
        mesh.add_vertex(Point3::new(3.0, -2.0, 0.0));
        let bbox = mesh.bounding_box();
        assert_eq!(bbox.min, Point3::new(-1.0, -2.0, 0.0));
        assert_eq!(bbox.max, Point3::new(3.0, 0.0, 2.0));
    }

    #[test]
    fn test_transform_moves_positions() {
        let mut mesh = Mesh::new();
        let (v, f) = mesh.mvsf(Point3::new(1.0, 0.0, 0.0));
        let e = mesh.mev(v, Point3::new(2.0, 0.0, 0.0), f).unwrap();
        let w = mesh.edge(e).unwrap().v2();
        mesh.transform(&Mat4::translation(Vec3::new(0.0, 5.0, 0.0))).unwrap();
        assert_eq!(mesh.vertex(v).unwrap().position(), Point3::new(1.0, 5.0, 0.0));
        assert_eq!(mesh.vertex(w).unwrap().position(), Point3::new(2.0, 5.0, 0.0));
    }
}

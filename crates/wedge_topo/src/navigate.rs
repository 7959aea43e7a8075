//! Navigation over the winged-edge adjacency graph
//!
//! All queries are pure and bounded: every walk carries a step cap derived
//! from the pool size plus a revisit set, so a corrupted mesh produces an
//! inconsistency error naming the offending entity instead of a hang.

use crate::handle::{EdgeId, EntityKind, FaceId, VertexId};
use crate::mesh::Mesh;
use crate::{Sense, TopoResult, TopologyError};
use std::collections::HashSet;

/// One directed use of an edge in a face's boundary walk
///
/// `Forward` walks the edge `v1 -> v2` on its `f1` side, `Reversed` walks
/// `v2 -> v1` on its `f2` side. A spur edge contributes one coedge of each
/// sense to the walk of its single face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coedge {
    /// The underlying edge
    pub edge: EdgeId,
    /// Which side of the edge this use walks
    pub sense: Sense,
}

impl Coedge {
    /// Coedge on the `f1` side
    #[inline]
    pub fn forward(edge: EdgeId) -> Self {
        Self {
            edge,
            sense: Sense::Forward,
        }
    }

    /// Coedge on the `f2` side
    #[inline]
    pub fn reversed(edge: EdgeId) -> Self {
        Self {
            edge,
            sense: Sense::Reversed,
        }
    }
}

impl Mesh {
    /// Vertex a coedge starts from
    pub fn coedge_start(&self, c: Coedge) -> TopoResult<VertexId> {
        Ok(self.try_edge(c.edge)?.start(c.sense))
    }

    /// Vertex a coedge arrives at
    pub fn coedge_end(&self, c: Coedge) -> TopoResult<VertexId> {
        Ok(self.try_edge(c.edge)?.end(c.sense))
    }

    /// Face a coedge walks on
    pub fn coedge_face(&self, c: Coedge) -> TopoResult<Option<FaceId>> {
        Ok(self.try_edge(c.edge)?.face(c.sense))
    }

    /// The ordered boundary walk of a face
    ///
    /// The result is cyclic: the successor of the last coedge is the first.
    /// Its length equals the number of face-slot references to this face
    /// along the walked loop (a spur appears twice). A face with no boundary
    /// yet yields an empty walk. Inner rings introduced by KFMRH are not
    /// reachable from the face's boundary handle and are not part of the
    /// result.
    pub fn boundary_edges(&self, f: FaceId) -> TopoResult<Vec<Coedge>> {
        self.face_cycle(f)
    }

    /// The ordered boundary vertices of a face
    ///
    /// Emits the start vertex of each walk step: `v1` for a coedge walking
    /// the `f1` side, `v2` for the `f2` side.
    pub fn boundary_vertices(&self, f: FaceId) -> TopoResult<Vec<VertexId>> {
        let mut vertices = Vec::new();
        for c in self.face_cycle(f)? {
            vertices.push(self.coedge_start(c)?);
        }
        Ok(vertices)
    }

    /// The cycle of edges around a vertex, each visited once
    ///
    /// Ordered by successive hops across the faces of the star; an isolated
    /// vertex yields an empty cycle.
    pub fn incident_edges(&self, v: VertexId) -> TopoResult<Vec<EdgeId>> {
        let vertex = self.try_vertex(v)?;
        let Some(start) = vertex.edge else {
            return Ok(Vec::new());
        };
        if self.edge(start).is_none() {
            return Err(TopologyError::Inconsistency {
                kind: EntityKind::Vertex,
                id: v.raw(),
                message: format!("incident edge {start} is not live"),
            });
        }

        let cap = self.edge_count() + 1;
        let mut cycle = vec![start];
        let mut seen: HashSet<EdgeId> = HashSet::from([start]);
        let mut cur = start;
        loop {
            cur = self.orbit_next(v, cur)?;
            if cur == start {
                return Ok(cycle);
            }
            if !seen.insert(cur) {
                return Err(TopologyError::Inconsistency {
                    kind: EntityKind::Vertex,
                    id: v.raw(),
                    message: format!("edge cycle revisits {cur} before closing"),
                });
            }
            cycle.push(cur);
            if cycle.len() > cap {
                return Err(TopologyError::Inconsistency {
                    kind: EntityKind::Vertex,
                    id: v.raw(),
                    message: "edge cycle does not close".to_string(),
                });
            }
        }
    }

    /// The faces around a vertex, deduplicated, in discovery order
    pub fn incident_faces(&self, v: VertexId) -> TopoResult<Vec<FaceId>> {
        let mut faces: Vec<FaceId> = Vec::new();
        for e in self.incident_edges(v)? {
            let edge = self.try_edge(e)?;
            for face in [edge.f1(), edge.f2()].into_iter().flatten() {
                if !faces.contains(&face) {
                    faces.push(face);
                }
            }
        }
        Ok(faces)
    }

    /// Number of edges incident to a vertex
    pub fn vertex_degree(&self, v: VertexId) -> TopoResult<usize> {
        Ok(self.incident_edges(v)?.len())
    }

    /// Step to the following coedge in a face walk
    ///
    /// The successor edge's sense is recovered from the hinge vertex: the
    /// walk arrives somewhere, and the next coedge must start there. Both a
    /// missing hinge and a face-slot mismatch are inconsistencies.
    pub(crate) fn walk_next(&self, c: Coedge, f: FaceId) -> TopoResult<Coedge> {
        let edge = self.try_edge(c.edge)?;
        let next_id = edge.wing(c.sense).next;
        let hinge = edge.end(c.sense);

        let next = self.edge(next_id).ok_or(TopologyError::Inconsistency {
            kind: EntityKind::Edge,
            id: c.edge.raw(),
            message: format!("next wing {next_id} is not live"),
        })?;
        let sense = if next.v1() == hinge {
            Sense::Forward
        } else if next.v2() == hinge {
            Sense::Reversed
        } else {
            return Err(TopologyError::Inconsistency {
                kind: EntityKind::Edge,
                id: next_id.raw(),
                message: format!("successor does not meet the walk at {hinge}"),
            });
        };
        if next.face(sense) != Some(f) {
            return Err(TopologyError::Inconsistency {
                kind: EntityKind::Edge,
                id: next_id.raw(),
                message: format!("face slot does not match walked face {f}"),
            });
        }
        Ok(Coedge {
            edge: next_id,
            sense,
        })
    }

    /// Step to the preceding coedge in a face walk (reverse direction)
    pub(crate) fn walk_prev(&self, c: Coedge, f: FaceId) -> TopoResult<Coedge> {
        let edge = self.try_edge(c.edge)?;
        let prev_id = edge.wing(c.sense).prev;
        let hinge = edge.start(c.sense);

        let prev = self.edge(prev_id).ok_or(TopologyError::Inconsistency {
            kind: EntityKind::Edge,
            id: c.edge.raw(),
            message: format!("prev wing {prev_id} is not live"),
        })?;
        let sense = if prev.v2() == hinge {
            Sense::Forward
        } else if prev.v1() == hinge {
            Sense::Reversed
        } else {
            return Err(TopologyError::Inconsistency {
                kind: EntityKind::Edge,
                id: prev_id.raw(),
                message: format!("predecessor does not meet the walk at {hinge}"),
            });
        };
        if prev.face(sense) != Some(f) {
            return Err(TopologyError::Inconsistency {
                kind: EntityKind::Edge,
                id: prev_id.raw(),
                message: format!("face slot does not match walked face {f}"),
            });
        }
        Ok(Coedge {
            edge: prev_id,
            sense,
        })
    }

    /// Resolve the sense with which an edge anchors a face's walk
    pub(crate) fn start_coedge(&self, e: EdgeId, f: FaceId) -> TopoResult<Coedge> {
        let edge = self.try_edge(e)?;
        if edge.f1() == Some(f) {
            Ok(Coedge::forward(e))
        } else if edge.f2() == Some(f) {
            Ok(Coedge::reversed(e))
        } else {
            Err(TopologyError::Inconsistency {
                kind: EntityKind::Face,
                id: f.raw(),
                message: format!("boundary edge {e} does not reference the face"),
            })
        }
    }

    /// Collect the full boundary cycle of a face from its boundary handle
    pub(crate) fn face_cycle(&self, f: FaceId) -> TopoResult<Vec<Coedge>> {
        let face = self.try_face(f)?;
        let Some(e0) = face.edge() else {
            return Ok(Vec::new());
        };
        let start = self.start_coedge(e0, f)?;

        let cap = 2 * self.edge_count() + 2;
        let mut cycle = vec![start];
        let mut seen: HashSet<Coedge> = HashSet::from([start]);
        let mut cur = start;
        loop {
            cur = self.walk_next(cur, f)?;
            if cur == start {
                return Ok(cycle);
            }
            if !seen.insert(cur) {
                return Err(TopologyError::Inconsistency {
                    kind: EntityKind::Face,
                    id: f.raw(),
                    message: format!("boundary walk revisits {} before closing", cur.edge),
                });
            }
            cycle.push(cur);
            if cycle.len() > cap {
                return Err(TopologyError::Inconsistency {
                    kind: EntityKind::Face,
                    id: f.raw(),
                    message: "boundary walk does not close".to_string(),
                });
            }
        }
    }

    /// Step to the next edge around a vertex
    ///
    /// Leaves the vertex along the given edge's side whose walk starts at
    /// the vertex, then takes that side's predecessor, which also meets the
    /// vertex. Each hop crosses one face of the star.
    pub(crate) fn orbit_next(&self, v: VertexId, e: EdgeId) -> TopoResult<EdgeId> {
        let edge = self.edge(e).ok_or(TopologyError::Inconsistency {
            kind: EntityKind::Vertex,
            id: v.raw(),
            message: format!("edge cycle reaches dead edge {e}"),
        })?;
        if edge.v1() == v {
            Ok(edge.wing(Sense::Forward).prev)
        } else if edge.v2() == v {
            Ok(edge.wing(Sense::Reversed).prev)
        } else {
            Err(TopologyError::Inconsistency {
                kind: EntityKind::Edge,
                id: e.raw(),
                message: format!("edge in the cycle around {v} does not reference it"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wedge_math::Point3;

    fn triangle() -> (Mesh, VertexId, VertexId, VertexId, FaceId, FaceId) {
        let mut mesh = Mesh::new();
        let (v1, f) = mesh.mvsf(Point3::new(0.0, 0.0, 0.0));
        let e1 = mesh.mev(v1, Point3::new(1.0, 0.0, 0.0), f).unwrap();
        let v2 = mesh.edge(e1).unwrap().v2();
        let e2 = mesh.mev(v2, Point3::new(0.5, 1.0, 0.0), f).unwrap();
        let v3 = mesh.edge(e2).unwrap().v2();
        let e3 = mesh.mef(v3, v1, f).unwrap();
        let back = mesh.edge(e3).unwrap().f2().unwrap();
        (mesh, v1, v2, v3, f, back)
    }

    #[test]
    fn test_boundary_edges_triangle() {
        let (mesh, _, _, _, f, back) = triangle();
        let front = mesh.boundary_edges(f).unwrap();
        let rear = mesh.boundary_edges(back).unwrap();
        assert_eq!(front.len(), 3);
        assert_eq!(rear.len(), 3);
        // Each edge appears once per face, in opposite senses.
        for c in &front {
            let twin = rear.iter().find(|r| r.edge == c.edge).unwrap();
            assert_eq!(twin.sense, c.sense.reverse());
        }
    }

    #[test]
    fn test_boundary_vertices_triangle() {
        let (mesh, v1, v2, v3, f, _) = triangle();
        let walk = mesh.boundary_vertices(f).unwrap();
        assert_eq!(walk.len(), 3);
        for v in [v1, v2, v3] {
            assert_eq!(walk.iter().filter(|&&w| w == v).count(), 1);
        }
        // Consecutive walk steps share a vertex with the edge between them.
        let cycle = mesh.boundary_edges(f).unwrap();
        for (i, c) in cycle.iter().enumerate() {
            let here = mesh.coedge_end(*c).unwrap();
            let next = cycle[(i + 1) % cycle.len()];
            assert_eq!(mesh.coedge_start(next).unwrap(), here);
        }
    }

    #[test]
    fn test_spur_walked_twice() {
        let mut mesh = Mesh::new();
        let (v1, f) = mesh.mvsf(Point3::ORIGIN);
        let e1 = mesh.mev(v1, Point3::new(1.0, 0.0, 0.0), f).unwrap();
        let cycle = mesh.boundary_edges(f).unwrap();
        assert_eq!(cycle.len(), 2);
        assert_eq!(cycle[0], Coedge::forward(e1));
        assert_eq!(cycle[1], Coedge::reversed(e1));
    }

    #[test]
    fn test_incident_edges_triangle() {
        let (mesh, v1, v2, v3, _, _) = triangle();
        for v in [v1, v2, v3] {
            let star = mesh.incident_edges(v).unwrap();
            assert_eq!(star.len(), 2, "triangle corner has two incident edges");
            for e in star {
                assert!(mesh.edge(e).unwrap().has_endpoint(v));
            }
        }
    }

    #[test]
    fn test_incident_faces_triangle() {
        let (mesh, v1, _, _, f, back) = triangle();
        let faces = mesh.incident_faces(v1).unwrap();
        assert_eq!(faces.len(), 2);
        assert!(faces.contains(&f));
        assert!(faces.contains(&back));
    }

    #[test]
    fn test_isolated_vertex_navigation() {
        let mut mesh = Mesh::new();
        let (v, f) = mesh.mvsf(Point3::ORIGIN);
        assert!(mesh.incident_edges(v).unwrap().is_empty());
        assert!(mesh.incident_faces(v).unwrap().is_empty());
        assert!(mesh.boundary_edges(f).unwrap().is_empty());
        assert_eq!(mesh.vertex_degree(v).unwrap(), 0);
    }

    #[test]
    fn test_spur_tip_has_valence_one() {
        let mut mesh = Mesh::new();
        let (v1, f) = mesh.mvsf(Point3::ORIGIN);
        let e1 = mesh.mev(v1, Point3::new(1.0, 0.0, 0.0), f).unwrap();
        let w = mesh.edge(e1).unwrap().v2();
        assert_eq!(mesh.incident_edges(w).unwrap(), vec![e1]);
        assert_eq!(mesh.vertex_degree(v1).unwrap(), 1);
    }

    #[test]
    fn test_navigation_stale_handles() {
        let mesh = Mesh::new();
        assert!(matches!(
            mesh.incident_edges(VertexId(9)).unwrap_err(),
            TopologyError::StaleHandle {
                kind: EntityKind::Vertex,
                ..
            }
        ));
        assert!(matches!(
            mesh.boundary_edges(FaceId(9)).unwrap_err(),
            TopologyError::StaleHandle {
                kind: EntityKind::Face,
                ..
            }
        ));
    }

    #[test]
    fn test_corrupt_wing_detected() {
        let (mut mesh, _, _, _, f, _) = triangle();
        // Point one wing somewhere that breaks the cycle.
        let e0 = mesh.face(f).unwrap().edge().unwrap();
        let c0 = mesh.start_coedge(e0, f).unwrap();
        let sense = c0.sense;
        mesh.try_edge_mut(e0).unwrap().wing_mut(sense).next = e0;
        let err = mesh.boundary_edges(f).unwrap_err();
        assert!(matches!(err, TopologyError::Inconsistency { .. }));
    }
}

//! Structural validation and the 2-manifold predicate
//!
//! `validate` is a read-only O(V + E + F) pass over the pools asserting the
//! structural invariants; it stops at the first offending entity and names
//! it. `is_manifold` is the stricter surface predicate: it tolerates
//! nothing a disk neighborhood cannot explain. Neither repairs anything.

use crate::handle::{EntityKind, VertexId};
use crate::mesh::Mesh;
use crate::navigate::Coedge;
use crate::{Sense, TopoResult, TopologyError};
use std::collections::{HashMap, HashSet};

impl Mesh {
    /// Check structural consistency: reference closure, endpoint sanity and
    /// boundary-loop closure
    ///
    /// Every handle stored in a live entity must resolve; edge endpoints
    /// must differ and vertex anchors must point back at the vertex; every
    /// edge side that names a face must lie on a closed walk of that face
    /// (the loop from the face's boundary handle, or an inner ring left by
    /// KFMRH), with `prev` wings agreeing with `next` wings. Spur edges are
    /// structurally legal; they are the manifold predicate's concern.
    pub fn validate(&self) -> TopoResult<()> {
        // Reference closure and endpoint consistency.
        for vertex in self.vertices.iter() {
            if let Some(e) = vertex.edge() {
                let Some(edge) = self.edge(e) else {
                    return Err(TopologyError::Inconsistency {
                        kind: EntityKind::Vertex,
                        id: vertex.id().raw(),
                        message: format!("incident edge {e} is not live"),
                    });
                };
                if !edge.has_endpoint(vertex.id()) {
                    return Err(TopologyError::Inconsistency {
                        kind: EntityKind::Vertex,
                        id: vertex.id().raw(),
                        message: format!("incident edge {e} does not reference the vertex"),
                    });
                }
            }
        }

        for edge in self.edges.iter() {
            let id = edge.id().raw();
            if edge.v1() == edge.v2() {
                return Err(TopologyError::Inconsistency {
                    kind: EntityKind::Edge,
                    id,
                    message: "endpoints coincide".to_string(),
                });
            }
            for v in [edge.v1(), edge.v2()] {
                if self.vertex(v).is_none() {
                    return Err(TopologyError::Inconsistency {
                        kind: EntityKind::Edge,
                        id,
                        message: format!("endpoint {v} is not live"),
                    });
                }
            }
            for face in [edge.f1(), edge.f2()].into_iter().flatten() {
                if self.face(face).is_none() {
                    return Err(TopologyError::Inconsistency {
                        kind: EntityKind::Edge,
                        id,
                        message: format!("face slot {face} is not live"),
                    });
                }
            }
            for sense in [Sense::Forward, Sense::Reversed] {
                let wing = edge.wing(sense);
                for w in [wing.prev, wing.next] {
                    if self.edge(w).is_none() {
                        return Err(TopologyError::Inconsistency {
                            kind: EntityKind::Edge,
                            id,
                            message: format!("wing {w} is not live"),
                        });
                    }
                }
            }
        }

        for face in self.faces.iter() {
            if let Some(e) = face.edge() {
                if self.edge(e).is_none() {
                    return Err(TopologyError::Inconsistency {
                        kind: EntityKind::Face,
                        id: face.id().raw(),
                        message: format!("boundary edge {e} is not live"),
                    });
                }
            }
        }

        // Boundary-loop closure, per face: collect every edge side naming
        // the face, walk the loop from the boundary handle, then any rings.
        for face in self.faces.iter() {
            let f = face.id();
            let mut pending: HashSet<Coedge> = HashSet::new();
            for edge in self.edges.iter() {
                if edge.f1() == Some(f) {
                    pending.insert(Coedge::forward(edge.id()));
                }
                if edge.f2() == Some(f) {
                    pending.insert(Coedge::reversed(edge.id()));
                }
            }

            if face.edge().is_none() {
                if !pending.is_empty() {
                    return Err(TopologyError::Inconsistency {
                        kind: EntityKind::Face,
                        id: f.raw(),
                        message: "face has no boundary handle but edges reference it".to_string(),
                    });
                }
                continue;
            }

            let outer = self.face_cycle(f)?;
            self.check_loop(&outer, f)?;
            for c in &outer {
                if !pending.remove(c) {
                    return Err(TopologyError::Inconsistency {
                        kind: EntityKind::Face,
                        id: f.raw(),
                        message: format!("boundary walk visits {} twice", c.edge),
                    });
                }
            }
            while let Some(&seed) = pending.iter().next() {
                let ring = self.walk_ring(seed, f, pending.len())?;
                self.check_loop(&ring, f)?;
                for c in &ring {
                    if !pending.remove(c) {
                        return Err(TopologyError::Inconsistency {
                            kind: EntityKind::Face,
                            id: f.raw(),
                            message: format!("ring walk visits {} twice", c.edge),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    /// Strict 2-manifold predicate
    ///
    /// True when every edge borders one or two faces (two requiring them
    /// distinct) and the edges around every vertex form a single closed
    /// cycle whose length equals the vertex degree. Non-manifold meshes are
    /// reported, never repaired; a structurally corrupt mesh reports false.
    pub fn is_manifold(&self) -> bool {
        for edge in self.edges.iter() {
            match (edge.f1(), edge.f2()) {
                (Some(a), Some(b)) if a == b => return false, // dangling spur
                (None, None) => return false,                 // wire edge
                _ => {}
            }
        }

        let mut degree: HashMap<VertexId, usize> = HashMap::new();
        for edge in self.edges.iter() {
            *degree.entry(edge.v1()).or_insert(0) += 1;
            *degree.entry(edge.v2()).or_insert(0) += 1;
        }
        for vertex in self.vertices.iter() {
            let expected = degree.get(&vertex.id()).copied().unwrap_or(0);
            let star = match self.incident_edges(vertex.id()) {
                Ok(star) => star,
                Err(_) => return false,
            };
            if star.len() != expected {
                return false;
            }
        }
        true
    }

    /// Walk a ring loop of a face starting at an arbitrary seed coedge
    fn walk_ring(&self, seed: Coedge, f: crate::FaceId, bound: usize) -> TopoResult<Vec<Coedge>> {
        let mut ring = vec![seed];
        let mut cur = seed;
        loop {
            cur = self.walk_next(cur, f)?;
            if cur == seed {
                return Ok(ring);
            }
            ring.push(cur);
            if ring.len() > bound {
                return Err(TopologyError::Inconsistency {
                    kind: EntityKind::Face,
                    id: f.raw(),
                    message: "ring walk does not close".to_string(),
                });
            }
        }
    }

    /// Check that the reverse walk of a loop retraces it
    fn check_loop(&self, cycle: &[Coedge], f: crate::FaceId) -> TopoResult<()> {
        let n = cycle.len();
        for (idx, &c) in cycle.iter().enumerate() {
            let successor = cycle[(idx + 1) % n];
            if self.walk_prev(successor, f)? != c {
                return Err(TopologyError::Inconsistency {
                    kind: EntityKind::Edge,
                    id: c.edge.raw(),
                    message: "prev wing disagrees with next wing".to_string(),
                });
            }
        }
        Ok(())
    }
}

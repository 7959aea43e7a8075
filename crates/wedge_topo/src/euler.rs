//! Euler operators
//!
//! The five atomic mutations. Each checks every precondition before its
//! first write, so an error leaves the mesh untouched, and each advertises
//! fixed count deltas:
//!
//! | operator | dV | dE | dF |
//! |---|---|---|---|
//! | MVSF | +1 | 0 | +1 |
//! | MEV | +1 | +1 | 0 |
//! | MEF | 0 | +1 | +1 |
//! | KEF (either variant) | 0 | -1 | -1 |
//! | KFMRH | 0 | 0 | -1 |
//!
//! Splits and splices are expressed over coedges. For MEF the split point is
//! canonical: scanning the face's walk from its boundary handle, the chord
//! runs from the first arrival at `a` to the first arrival at `b` found
//! after it; the original face keeps the chord's `f1` side (the cycle
//! continuing after the `b` arrival), the new face takes the rest.

use crate::handle::{EdgeId, FaceId, VertexId};
use crate::mesh::{Mesh, Wing};
use crate::navigate::Coedge;
use crate::{Sense, TopoResult, TopologyError};
use wedge_math::Point3;

/// What a KEF call did, depending on the edge's face slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KefOutcome {
    /// Two distinct faces: the second was merged into the survivor
    Merged {
        /// Face that absorbed the merged-away one
        survivor: FaceId,
    },
    /// One face slot only: both the edge and that face were removed
    FaceRemoved {
        /// Id the removed face had, for inspection
        removed: FaceId,
    },
}

impl Mesh {
    /// Make Vertex, Shell, Face
    ///
    /// Bootstraps a new shell: one vertex at the position and one face with
    /// no boundary yet. Legal on an empty mesh or alongside existing shells.
    pub fn mvsf(&mut self, position: Point3) -> (VertexId, FaceId) {
        let v = self.add_vertex(position);
        let f = self.add_face();
        (v, f)
    }

    /// Make Edge, Vertex
    ///
    /// Grows a spur from `u` into the walk of `f`: one new vertex `w` at
    /// `position` and one new edge `(u, w)` with both face slots on `f`.
    /// The spur is spliced in after the first arrival at `u` found scanning
    /// `f`'s walk from its boundary handle; on the seed face of a fresh
    /// shell (no boundary, isolated `u`) the spur becomes the boundary.
    /// Returns the new edge; the new vertex is its `v2`.
    pub fn mev(&mut self, u: VertexId, position: Point3, f: FaceId) -> TopoResult<EdgeId> {
        let anchored = self.try_vertex(u)?.edge().is_some();
        let has_boundary = self.try_face(f)?.edge().is_some();

        if !has_boundary {
            if anchored {
                return Err(TopologyError::TopologyViolation(format!(
                    "face {f} has no boundary but vertex {u} is already wired"
                )));
            }
            let w = self.add_vertex(position);
            let e = self.add_edge(u, w);
            let edge = self.try_edge_mut(e)?;
            edge.f1 = Some(f);
            edge.f2 = Some(f);
            self.try_vertex_mut(u)?.edge = Some(e);
            self.try_vertex_mut(w)?.edge = Some(e);
            self.try_face_mut(f)?.edge = Some(e);
            self.recompute_normal(f)?;
            return Ok(e);
        }

        let cycle = self.face_cycle(f)?;
        let mut splice = None;
        for (idx, c) in cycle.iter().enumerate() {
            if self.coedge_end(*c)? == u {
                splice = Some(idx);
                break;
            }
        }
        let Some(i) = splice else {
            return Err(TopologyError::TopologyViolation(format!(
                "vertex {u} is not on the boundary walk of {f}"
            )));
        };
        let d_in = cycle[i];
        let d_out = cycle[(i + 1) % cycle.len()];

        let w = self.add_vertex(position);
        let e = self.add_edge(u, w);
        {
            let edge = self.try_edge_mut(e)?;
            edge.f1 = Some(f);
            edge.f2 = Some(f);
            // Outbound use follows d_in, doubles back on itself at the tip,
            // and hands over to d_out.
            edge.wing1 = Wing {
                prev: d_in.edge,
                next: e,
            };
            edge.wing2 = Wing {
                prev: e,
                next: d_out.edge,
            };
        }
        self.set_walk_next(d_in, e)?;
        self.set_walk_prev(d_out, e)?;
        self.try_vertex_mut(w)?.edge = Some(e);
        if self.try_vertex(u)?.edge().is_none() {
            self.try_vertex_mut(u)?.edge = Some(e);
        }
        self.recompute_normal(f)?;
        Ok(e)
    }

    /// Make Edge, Face
    ///
    /// Splits `f` with a chord from `a` to `b`, both of which must lie on
    /// `f`'s boundary walk. The chord's `f1` side stays with `f`; the other
    /// side and every coedge on it move to the new face. Returns the chord.
    pub fn mef(&mut self, a: VertexId, b: VertexId, f: FaceId) -> TopoResult<EdgeId> {
        self.try_vertex(a)?;
        self.try_vertex(b)?;
        self.try_face(f)?;
        if a == b {
            return Err(TopologyError::BadArgument(
                "chord endpoints must be distinct".to_string(),
            ));
        }
        let cycle = self.face_cycle(f)?;
        if cycle.is_empty() {
            return Err(TopologyError::TopologyViolation(format!(
                "face {f} has no boundary to split"
            )));
        }
        let n = cycle.len();

        let mut at_a = None;
        for (idx, c) in cycle.iter().enumerate() {
            if self.coedge_end(*c)? == a {
                at_a = Some(idx);
                break;
            }
        }
        let Some(i) = at_a else {
            return Err(TopologyError::TopologyViolation(format!(
                "vertex {a} is not on the boundary walk of {f}"
            )));
        };
        let mut at_b = None;
        for k in 1..=n {
            let idx = (i + k) % n;
            if self.coedge_end(cycle[idx])? == b {
                at_b = Some(idx);
                break;
            }
        }
        let Some(j) = at_b else {
            return Err(TopologyError::TopologyViolation(format!(
                "vertex {b} is not on the boundary walk of {f}"
            )));
        };

        let x_i = cycle[i];
        let x_j = cycle[j];
        let after_a = cycle[(i + 1) % n]; // first coedge of the departing half
        let after_b = cycle[(j + 1) % n]; // first coedge of the kept half

        let e = self.add_edge(a, b);
        let f2 = self.add_face();
        {
            let edge = self.try_edge_mut(e)?;
            edge.f1 = Some(f);
            edge.f2 = Some(f2);
            edge.wing1 = Wing {
                prev: x_i.edge,
                next: after_b.edge,
            };
            edge.wing2 = Wing {
                prev: x_j.edge,
                next: after_a.edge,
            };
        }
        self.set_walk_next(x_i, e)?;
        self.set_walk_prev(after_b, e)?;
        self.set_walk_next(x_j, e)?;
        self.set_walk_prev(after_a, e)?;

        // Coedges between the a-arrival and the b-arrival leave for f2.
        let mut k = (i + 1) % n;
        loop {
            let c = cycle[k];
            self.try_edge_mut(c.edge)?.set_face(c.sense, Some(f2));
            if k == j {
                break;
            }
            k = (k + 1) % n;
        }

        self.try_face_mut(f)?.edge = Some(e);
        self.try_face_mut(f2)?.edge = Some(e);
        self.recompute_normal(f)?;
        self.recompute_normal(f2)?;
        Ok(e)
    }

    /// Kill Edge, Face
    ///
    /// With two distinct faces on the edge, merges the second into the
    /// first and removes the edge. With a single face slot, removes both
    /// the edge and that face, clearing the slot on every other edge that
    /// bordered it. A dangling spur (both slots the same face) is rejected.
    pub fn kef(&mut self, e: EdgeId) -> TopoResult<KefOutcome> {
        let edge = self.try_edge(e)?;
        match (edge.f1(), edge.f2()) {
            (Some(fa), Some(fb)) if fa != fb => self.kef_merge(e, fa, fb),
            (Some(_), Some(_)) => Err(TopologyError::TopologyViolation(format!(
                "edge {e} is a dangling spur with both sides on one face"
            ))),
            (Some(fa), None) => self.kef_boundary(e, fa, Sense::Forward),
            (None, Some(fb)) => self.kef_boundary(e, fb, Sense::Reversed),
            (None, None) => Err(TopologyError::TopologyViolation(format!(
                "edge {e} borders no face"
            ))),
        }
    }

    fn kef_merge(&mut self, e: EdgeId, fa: FaceId, fb: FaceId) -> TopoResult<KefOutcome> {
        let (v1, v2, w1, w2) = {
            let edge = self.try_edge(e)?;
            (edge.v1(), edge.v2(), edge.wing(Sense::Forward), edge.wing(Sense::Reversed))
        };
        // Resolve all four walk neighbors before mutating anything.
        let prev1 = self.coedge_arriving(w1.prev, v1, Some(fa))?;
        let next1 = self.coedge_leaving(w1.next, v2, Some(fa))?;
        let prev2 = self.coedge_arriving(w2.prev, v2, Some(fb))?;
        let next2 = self.coedge_leaving(w2.next, v1, Some(fb))?;

        // Splice both uses of e out of the merged walk: fa's walk continues
        // into fb's at v1 and comes back at v2.
        self.set_walk_next(prev1, next2.edge)?;
        self.set_walk_prev(next2, prev1.edge)?;
        self.set_walk_next(prev2, next1.edge)?;
        self.set_walk_prev(next1, prev2.edge)?;

        for other in self.edges.iter_mut() {
            if other.id() == e {
                continue;
            }
            if other.f1() == Some(fb) {
                other.f1 = Some(fa);
            }
            if other.f2() == Some(fb) {
                other.f2 = Some(fa);
            }
        }

        if self.try_face(fa)?.edge() == Some(e) {
            self.try_face_mut(fa)?.edge = Some(prev1.edge);
        }
        if self.try_vertex(v1)?.edge() == Some(e) {
            self.try_vertex_mut(v1)?.edge = Some(prev1.edge);
        }
        if self.try_vertex(v2)?.edge() == Some(e) {
            self.try_vertex_mut(v2)?.edge = Some(next1.edge);
        }

        self.edges.remove(e.raw());
        self.faces.remove(fb.raw());
        self.recompute_normal(fa)?;
        Ok(KefOutcome::Merged { survivor: fa })
    }

    fn kef_boundary(&mut self, e: EdgeId, fs: FaceId, side: Sense) -> TopoResult<KefOutcome> {
        let rim = side.reverse();
        let (start_v, end_v, wing, rim_wing) = {
            let edge = self.try_edge(e)?;
            (edge.start(side), edge.end(side), edge.wing(side), edge.wing(rim))
        };
        // Both uses of e leave their cycles: the face walk and the face-less
        // rim walk on the other side. Resolve every neighbor first.
        let prev = self.coedge_arriving(wing.prev, start_v, Some(fs))?;
        let next = self.coedge_leaving(wing.next, end_v, Some(fs))?;
        let rim_prev = self.coedge_arriving(rim_wing.prev, end_v, None)?;
        let rim_next = self.coedge_leaving(rim_wing.next, start_v, None)?;

        self.set_walk_next(prev, next.edge)?;
        self.set_walk_prev(next, prev.edge)?;
        self.set_walk_next(rim_prev, rim_next.edge)?;
        self.set_walk_prev(rim_next, rim_prev.edge)?;

        for other in self.edges.iter_mut() {
            if other.id() == e {
                continue;
            }
            if other.f1() == Some(fs) {
                other.f1 = None;
            }
            if other.f2() == Some(fs) {
                other.f2 = None;
            }
        }

        if self.try_vertex(start_v)?.edge() == Some(e) {
            self.try_vertex_mut(start_v)?.edge = Some(prev.edge);
        }
        if self.try_vertex(end_v)?.edge() == Some(e) {
            self.try_vertex_mut(end_v)?.edge = Some(next.edge);
        }

        self.edges.remove(e.raw());
        self.faces.remove(fs.raw());
        Ok(KefOutcome::FaceRemoved { removed: fs })
    }

    /// Kill Face, Make Ring Hole
    ///
    /// Deletes the inner face `h` and hands every edge side that bordered
    /// it to `f`, which gains an inner boundary loop; the shell's genus
    /// rises by one. The two faces must be edge-disjoint and lie in the
    /// same shell. Returns the absorbing face.
    pub fn kfmrh(&mut self, h: FaceId, f: FaceId) -> TopoResult<FaceId> {
        self.try_face(h)?;
        self.try_face(f)?;
        if h == f {
            return Err(TopologyError::BadArgument(
                "hole face and absorbing face must be distinct".to_string(),
            ));
        }
        for edge in self.edges.iter() {
            let borders_h = edge.f1() == Some(h) || edge.f2() == Some(h);
            let borders_f = edge.f1() == Some(f) || edge.f2() == Some(f);
            if borders_h && borders_f {
                return Err(TopologyError::TopologyViolation(format!(
                    "faces {h} and {f} share boundary edge {}",
                    edge.id()
                )));
            }
        }
        if !self.same_shell(f, h) {
            return Err(TopologyError::BadArgument(format!(
                "faces {h} and {f} lie in different shells"
            )));
        }

        for edge in self.edges.iter_mut() {
            if edge.f1() == Some(h) {
                edge.f1 = Some(f);
            }
            if edge.f2() == Some(h) {
                edge.f2 = Some(f);
            }
        }
        self.faces.remove(h.raw());
        Ok(f)
    }

    /// Breadth-first reachability over shared edges, O(V + E + F)
    fn same_shell(&self, from: FaceId, to: FaceId) -> bool {
        use std::collections::{HashMap, HashSet, VecDeque};

        let mut adjacent: HashMap<FaceId, Vec<FaceId>> = HashMap::new();
        for edge in self.edges.iter() {
            if let (Some(a), Some(b)) = (edge.f1(), edge.f2()) {
                if a != b {
                    adjacent.entry(a).or_default().push(b);
                    adjacent.entry(b).or_default().push(a);
                }
            }
        }
        let mut seen: HashSet<FaceId> = HashSet::from([from]);
        let mut queue: VecDeque<FaceId> = VecDeque::from([from]);
        while let Some(face) = queue.pop_front() {
            if face == to {
                return true;
            }
            for &next in adjacent.get(&face).into_iter().flatten() {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        false
    }

    fn set_walk_next(&mut self, c: Coedge, to: EdgeId) -> TopoResult<()> {
        self.try_edge_mut(c.edge)?.wing_mut(c.sense).next = to;
        Ok(())
    }

    fn set_walk_prev(&mut self, c: Coedge, to: EdgeId) -> TopoResult<()> {
        self.try_edge_mut(c.edge)?.wing_mut(c.sense).prev = to;
        Ok(())
    }

    /// The unique use of `e` that arrives at `at` walking side `on`
    ///
    /// `None` selects the face-less rim side of a boundary edge.
    fn coedge_arriving(&self, e: EdgeId, at: VertexId, on: Option<FaceId>) -> TopoResult<Coedge> {
        let edge = self.try_edge(e)?;
        if edge.v2() == at && edge.f1() == on {
            Ok(Coedge::forward(e))
        } else if edge.v1() == at && edge.f2() == on {
            Ok(Coedge::reversed(e))
        } else {
            Err(TopologyError::Inconsistency {
                kind: crate::EntityKind::Edge,
                id: e.raw(),
                message: format!("no use of the edge arrives at {at}"),
            })
        }
    }

    /// The unique use of `e` that leaves `from` walking side `on`
    fn coedge_leaving(&self, e: EdgeId, from: VertexId, on: Option<FaceId>) -> TopoResult<Coedge> {
        let edge = self.try_edge(e)?;
        if edge.v1() == from && edge.f1() == on {
            Ok(Coedge::forward(e))
        } else if edge.v2() == from && edge.f2() == on {
            Ok(Coedge::reversed(e))
        } else {
            Err(TopologyError::Inconsistency {
                kind: crate::EntityKind::Edge,
                id: e.raw(),
                message: format!("no use of the edge leaves {from}"),
            })
        }
    }
}

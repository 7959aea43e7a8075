//! Primitive constructors
//!
//! A convenience facade that builds common shapes by issuing Euler
//! operations only. The polygon-soup builder re-uses vertices by position
//! identity under a tolerance context and shares an edge whenever a face
//! names an ordered vertex pair whose reverse was already walked.
//!
//! Scope: soups must be edge-connected (faces are deferred until they share
//! an edge with built geometry) and of disk or sphere topology; each face
//! after the first closes with at most one chord. Soups outside that class
//! are rejected, never mis-built: after every face the builder checks that
//! the face's walk reproduces the input loop.

use crate::handle::{EdgeId, FaceId, VertexId};
use crate::mesh::Mesh;
use crate::{TopoResult, TopologyError};
use std::collections::HashMap;
use wedge_math::{Point3, Tolerance};

/// Build an axis-aligned cube centered at the origin
///
/// Yields 8 vertices, 12 edges and 6 faces, closed, manifold, with outward
/// face normals.
pub fn cube(side: f64) -> TopoResult<Mesh> {
    if !(side > 0.0) {
        return Err(TopologyError::BadArgument(format!(
            "cube side must be positive, got {side}"
        )));
    }
    let h = side / 2.0;
    let corner = [
        Point3::new(-h, -h, -h),
        Point3::new(h, -h, -h),
        Point3::new(h, h, -h),
        Point3::new(-h, h, -h),
        Point3::new(-h, -h, h),
        Point3::new(h, -h, h),
        Point3::new(h, h, h),
        Point3::new(-h, h, h),
    ];
    // Outward windings; each of the 12 edges appears in exactly two loops,
    // in opposite directions.
    let loops: [[usize; 4]; 6] = [
        [0, 3, 2, 1], // bottom (-Z)
        [4, 5, 6, 7], // top (+Z)
        [0, 1, 5, 4], // back (-Y)
        [2, 3, 7, 6], // front (+Y)
        [0, 4, 7, 3], // left (-X)
        [1, 2, 6, 5], // right (+X)
    ];
    let faces: Vec<Vec<Point3>> = loops
        .iter()
        .map(|quad| quad.iter().map(|&i| corner[i]).collect())
        .collect();
    let (mesh, _) = from_polygon_soup(&faces, Tolerance::DEFAULT)?;
    Ok(mesh)
}

/// Build a single quadrilateral in the XY plane, centered at the origin
///
/// Returns the mesh and the front face (normal +Z). As with any surface
/// built from Euler operations alone, the quad's other side is a second
/// face; the returned handle is the one wound counter-clockwise.
pub fn plane(width: f64, height: f64) -> TopoResult<(Mesh, FaceId)> {
    if !(width > 0.0 && height > 0.0) {
        return Err(TopologyError::BadArgument(format!(
            "plane dimensions must be positive, got {width} x {height}"
        )));
    }
    let (w, h) = (width / 2.0, height / 2.0);
    let quad = vec![
        Point3::new(-w, -h, 0.0),
        Point3::new(w, -h, 0.0),
        Point3::new(w, h, 0.0),
        Point3::new(-w, h, 0.0),
    ];
    let (mesh, faces) = from_polygon_soup(&[quad], Tolerance::DEFAULT)?;
    Ok((mesh, faces[0]))
}

/// Build a mesh from per-face ordered vertex positions
///
/// Positions within the tolerance context of an already-created vertex
/// re-use it; an ordered pair walked in reverse by an earlier face shares
/// that face's edge. Returns the mesh and one face handle per input face,
/// in input order.
pub fn from_polygon_soup(
    faces: &[Vec<Point3>],
    tolerance: Tolerance,
) -> TopoResult<(Mesh, Vec<FaceId>)> {
    for (idx, ring) in faces.iter().enumerate() {
        if ring.len() < 3 {
            return Err(TopologyError::BadArgument(format!(
                "face {idx} has {} vertices, need at least three",
                ring.len()
            )));
        }
    }

    let mut builder = SoupBuilder {
        mesh: Mesh::new(),
        lookup: Vec::new(),
        walked: HashMap::new(),
        residual: None,
        tolerance,
    };
    let mut built: Vec<Option<FaceId>> = vec![None; faces.len()];

    if let Some(first) = faces.first() {
        built[0] = Some(builder.build_face(first)?);
    }
    // Remaining faces attach to built geometry; defer the ones that do not
    // share an edge yet and retry until nothing moves.
    loop {
        let mut progress = false;
        for (idx, ring) in faces.iter().enumerate() {
            if built[idx].is_some() || !builder.shares_an_edge(ring) {
                continue;
            }
            built[idx] = Some(builder.build_face(ring)?);
            progress = true;
        }
        if built.iter().all(|b| b.is_some()) {
            break;
        }
        if !progress {
            return Err(TopologyError::TopologyViolation(
                "polygon soup is not edge-connected".to_string(),
            ));
        }
    }

    let ids = built.into_iter().map(|b| b.expect("all faces built")).collect();
    Ok((builder.mesh, ids))
}

struct SoupBuilder {
    mesh: Mesh,
    /// Created vertices with their positions, for tolerance identity
    lookup: Vec<(Point3, VertexId)>,
    /// Edges keyed by the ordered pair their first face walked
    walked: HashMap<(VertexId, VertexId), EdgeId>,
    /// The face covering everything not yet built; None before the first
    /// face and after a closing face adopts it
    residual: Option<FaceId>,
    tolerance: Tolerance,
}

impl SoupBuilder {
    fn resolve(&self, p: &Point3) -> Option<VertexId> {
        self.lookup
            .iter()
            .find(|(q, _)| self.tolerance.same_point(*p, *q))
            .map(|&(_, v)| v)
    }

    /// Whether a loop names some ordered pair whose edge already exists
    fn shares_an_edge(&self, ring: &[Point3]) -> bool {
        let n = ring.len();
        (0..n).any(|k| {
            let (Some(a), Some(b)) = (self.resolve(&ring[k]), self.resolve(&ring[(k + 1) % n]))
            else {
                return false;
            };
            self.walked.contains_key(&(a, b)) || self.walked.contains_key(&(b, a))
        })
    }

    fn build_face(&mut self, ring: &[Point3]) -> TopoResult<FaceId> {
        let n = ring.len();
        for i in 0..n {
            for j in (i + 1)..n {
                if self.tolerance.same_point(ring[i], ring[j]) {
                    return Err(TopologyError::BadArgument(format!(
                        "face repeats a vertex position at corners {i} and {j}"
                    )));
                }
            }
        }

        let resolved: Vec<Option<VertexId>> = ring.iter().map(|p| self.resolve(p)).collect();

        // Classify each ordered pair: does its edge already exist?
        let mut existing = vec![false; n];
        for k in 0..n {
            let (Some(a), Some(b)) = (resolved[k], resolved[(k + 1) % n]) else {
                continue;
            };
            if self.walked.contains_key(&(a, b)) {
                return Err(TopologyError::TopologyViolation(format!(
                    "edge {a}->{b} is walked twice in the same direction"
                )));
            }
            if let Some(&e) = self.walked.get(&(b, a)) {
                // The side this face will claim must still be unclaimed.
                let Some(residual) = self.residual else {
                    return Err(TopologyError::TopologyViolation(
                        "soup names more faces than the surface has".to_string(),
                    ));
                };
                let edge = self.mesh.edge(e).expect("walked edges stay live");
                let side = if edge.v1() == a { edge.f1() } else { edge.f2() };
                if side != Some(residual) {
                    return Err(TopologyError::TopologyViolation(format!(
                        "edge {b}->{a} already has both sides claimed"
                    )));
                }
                existing[k] = true;
            }
        }
        let missing = existing.iter().filter(|&&e| !e).count();

        if missing == 0 {
            return self.adopt_residual(&resolved);
        }
        if self.mesh.vertex_count() == 0 {
            return self.build_first(ring);
        }
        if missing == n {
            // Unreachable from the deferral loop; kept for direct callers.
            return Err(TopologyError::TopologyViolation(
                "face shares no edge with built geometry".to_string(),
            ));
        }

        // The missing pairs must form one contiguous run ending in a single
        // closing chord.
        let start = (0..n)
            .find(|&k| !existing[k] && existing[(k + n - 1) % n])
            .expect("mixed runs have a boundary");
        for off in 0..missing {
            if existing[(start + off) % n] {
                return Err(TopologyError::TopologyViolation(
                    "face needs more than one closing edge".to_string(),
                ));
            }
        }

        let residual = self.residual.expect("existing pairs imply a residual");
        let mut u = resolved[start].expect("run starts where an existing edge ends");
        for off in 0..missing - 1 {
            let target = (start + off + 1) % n;
            if resolved[target].is_some() {
                return Err(TopologyError::TopologyViolation(
                    "face needs more than one closing edge".to_string(),
                ));
            }
            let e = self.mesh.mev(u, ring[target], residual)?;
            let w = self.mesh.edge(e).expect("fresh edge").v2();
            self.lookup.push((ring[target], w));
            self.walked.insert((u, w), e);
            u = w;
        }
        let close = resolved[(start + missing) % n].expect("run ends at an existing vertex");
        let chord = self.mesh.mef(u, close, residual)?;
        self.walked.insert((u, close), chord);

        // The old residual id is now this face; the split-off side is the
        // new residual.
        let new_residual = self.mesh.edge(chord).expect("fresh chord").f2();
        self.residual = new_residual;
        self.check_walk(residual, ring)?;
        Ok(residual)
    }

    /// First face of the soup: MVSF, a chain of MEVs, one closing MEF
    fn build_first(&mut self, ring: &[Point3]) -> TopoResult<FaceId> {
        let n = ring.len();
        let (v0, seed) = self.mesh.mvsf(ring[0]);
        self.lookup.push((ring[0], v0));

        let mut u = v0;
        for k in 1..n {
            let e = self.mesh.mev(u, ring[k], seed)?;
            let w = self.mesh.edge(e).expect("fresh edge").v2();
            self.lookup.push((ring[k], w));
            self.walked.insert((u, w), e);
            u = w;
        }
        let chord = self.mesh.mef(u, v0, seed)?;
        self.walked.insert((u, v0), chord);

        self.residual = self.mesh.edge(chord).expect("fresh chord").f2();
        self.check_walk(seed, ring)?;
        Ok(seed)
    }

    /// A loop whose every edge already exists closes the surface: it must
    /// be the residual face itself.
    fn adopt_residual(&mut self, resolved: &[Option<VertexId>]) -> TopoResult<FaceId> {
        let Some(residual) = self.residual else {
            return Err(TopologyError::TopologyViolation(
                "soup names more faces than the surface has".to_string(),
            ));
        };
        let walk = self.mesh.boundary_vertices(residual)?;
        let ring: Vec<VertexId> = resolved
            .iter()
            .map(|v| v.expect("adopted loops resolve fully"))
            .collect();
        if !is_rotation(&walk, &ring) {
            return Err(TopologyError::TopologyViolation(
                "closing face does not match the remaining boundary".to_string(),
            ));
        }
        self.residual = None;
        Ok(residual)
    }

    /// Require the built face to reproduce the input loop
    fn check_walk(&self, f: FaceId, ring: &[Point3]) -> TopoResult<()> {
        let walk = self.mesh.boundary_vertices(f)?;
        let want: Vec<VertexId> = ring
            .iter()
            .map(|p| self.resolve(p).expect("built faces resolve fully"))
            .collect();
        if !is_rotation(&walk, &want) {
            return Err(TopologyError::TopologyViolation(
                "soup construction does not reproduce the face loop".to_string(),
            ));
        }
        Ok(())
    }
}

fn is_rotation(walk: &[VertexId], ring: &[VertexId]) -> bool {
    if walk.len() != ring.len() {
        return false;
    }
    let n = walk.len();
    if n == 0 {
        return true;
    }
    (0..n).any(|off| (0..n).all(|k| walk[(off + k) % n] == ring[k]))
}

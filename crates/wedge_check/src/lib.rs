//! Wedge Check - Validation Reporting for the Wedge B-Rep Kernel
//!
//! Wraps the kernel's structural and manifold predicates into a report of
//! typed errors and warnings. The kernel stops at the first broken
//! invariant; this layer adds the geometric near-degeneracy warnings a
//! modeling session wants surfaced. Nothing here repairs anything.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

use wedge_math::Tolerance;
use wedge_topo::{EntityKind, Mesh, TopologyError};

/// Validation error types
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A structural invariant is broken
    #[error("structural inconsistency at {kind} {id}: {message}")]
    Structural {
        /// Kind of the offending entity
        kind: EntityKind,
        /// Raw id of the offending entity
        id: u64,
        /// What was found broken
        message: String,
    },
    /// The surface is not a 2-manifold
    #[error("mesh is not a 2-manifold")]
    NonManifold,
}

/// Validation warning types
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationWarning {
    /// An edge shorter than the tolerance
    ShortEdge {
        /// Raw id of the edge
        id: u64,
        /// Its length
        length: f64,
    },
    /// A face whose boundary encloses almost no area
    SmallFace {
        /// Raw id of the face
        id: u64,
        /// Its area
        area: f64,
    },
    /// A face whose cached normal is the degenerate sentinel
    DegenerateNormal {
        /// Raw id of the face
        id: u64,
    },
}

/// Outcome of a validation pass
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// Errors found
    pub errors: Vec<ValidationError>,
    /// Warnings found
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Create a new empty validation result
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed (no errors)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// Validation options
#[derive(Debug, Clone, Copy)]
pub struct ValidationOptions {
    /// Merge radius for the geometric warnings
    pub tolerance: Tolerance,
    /// Require the mesh to be a 2-manifold
    pub require_manifold: bool,
    /// Emit geometric near-degeneracy warnings
    pub warn_degenerate: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::DEFAULT,
            require_manifold: false,
            warn_degenerate: true,
        }
    }
}

/// Validator for winged-edge meshes
pub struct Validator {
    options: ValidationOptions,
}

impl Validator {
    /// Create a new validator with default options
    pub fn new() -> Self {
        Self {
            options: ValidationOptions::default(),
        }
    }

    /// Create a new validator with custom options
    pub fn with_options(options: ValidationOptions) -> Self {
        Self { options }
    }

    /// Validate a mesh
    pub fn validate(&self, mesh: &Mesh) -> ValidationResult {
        let mut result = ValidationResult::new();

        match mesh.validate() {
            Ok(()) => {}
            Err(TopologyError::Inconsistency { kind, id, message }) => {
                result.add_error(ValidationError::Structural { kind, id, message });
            }
            Err(other) => {
                // The structural pass only reports inconsistencies; anything
                // else still surfaces rather than vanishing.
                result.add_error(ValidationError::Structural {
                    kind: EntityKind::Face,
                    id: 0,
                    message: other.to_string(),
                });
            }
        }

        if self.options.require_manifold && !mesh.is_manifold() {
            result.add_error(ValidationError::NonManifold);
        }

        if self.options.warn_degenerate && result.is_valid() {
            self.collect_warnings(mesh, &mut result);
        }
        result
    }

    fn collect_warnings(&self, mesh: &Mesh, result: &mut ValidationResult) {
        let tol = self.options.tolerance;
        for edge in mesh.edges() {
            if let Ok(length) = mesh.edge_length(edge.id()) {
                if tol.negligible(length) {
                    result.add_warning(ValidationWarning::ShortEdge {
                        id: edge.id().raw(),
                        length,
                    });
                }
            }
        }
        for face in mesh.faces() {
            if face.edge().is_none() {
                continue;
            }
            if let Ok(area) = mesh.face_area(face.id()) {
                if area <= tol.linear * tol.linear {
                    result.add_warning(ValidationWarning::SmallFace {
                        id: face.id().raw(),
                        area,
                    });
                }
            }
            if face.normal().near_zero(1e-12) {
                result.add_warning(ValidationWarning::DegenerateNormal {
                    id: face.id().raw(),
                });
            }
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Check a mesh with default options
pub fn check_mesh(mesh: &Mesh) -> ValidationResult {
    Validator::new().validate(mesh)
}

/// Check a mesh with custom options
pub fn check_mesh_with_options(mesh: &Mesh, options: ValidationOptions) -> ValidationResult {
    Validator::with_options(options).validate(mesh)
}

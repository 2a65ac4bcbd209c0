//! Mesh representation.
//!
//! Provides the canonical finite element mesh model and its two producers:
//! - flat node coordinates with ragged, 1-based element connectivity
//! - physical-group and node-set registries with bidirectional lookup
//! - structured rectangular quad mesh generation (linear and quadratic)
//! - Gmsh v2 ASCII mesh import

mod core;
mod element;
mod error;
pub mod gmsh;
mod groups;
mod structured;

pub use self::core::{Mesh, MeshSummary};
pub use element::{Element, ElementKind, LocalNodeRole};
pub use error::MeshError;
pub use gmsh::{read_gmsh_from, read_gmsh_mesh};
pub use groups::{NodeSet, NodeSetRegistry, PhysicalGroup, PhysicalGroupRegistry};
pub use structured::StructuredMeshBuilder;

//! # fem-mesh-rs
//!
//! Finite element mesh construction and import.
//!
//! This crate provides the data backbone a finite element analysis sits on:
//! - Canonical mesh representation (flat node coordinates, ragged 1-based
//!   element connectivity, boundary elements before bulk elements)
//! - Physical groups and node sets with bidirectional name/id lookup
//! - Structured rectangular mesh generation for linear and quadratic
//!   quadrilaterals (Quad4, Quad8, Quad9)
//! - Gmsh v2 ASCII mesh import with physical-group reconciliation
//!
//! ## Example
//! ```
//! use fem_mesh_rs::mesh::{ElementKind, StructuredMeshBuilder};
//!
//! let mesh = StructuredMeshBuilder::new(0.0, 2.0, 0.0, 1.0)
//!     .with_resolution(4, 2)
//!     .with_family(ElementKind::Quad9)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(mesh.n_bulk_elements(), 8);
//! assert_eq!(mesh.group_elements("left").unwrap().len(), 2);
//! ```

pub mod mesh;
pub mod types;

// Re-export main types for convenience
pub use mesh::{
    Element, ElementKind, LocalNodeRole, Mesh, MeshError, MeshSummary, NodeSet, NodeSetRegistry,
    PhysicalGroup, PhysicalGroupRegistry, StructuredMeshBuilder, read_gmsh_from, read_gmsh_mesh,
};
pub use types::{Bounds2D, Extent3, Side, Vector3};

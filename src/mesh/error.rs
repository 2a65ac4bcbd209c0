//! Mesh construction and import errors.

use thiserror::Error;

use crate::mesh::ElementKind;
use crate::types::Bounds2D;

/// Errors produced by the structured generator and the mesh file importer.
///
/// Variants fall into four groups: configuration (invalid generator
/// parameters), I/O (the stream cannot be read), format (content that cannot
/// be parsed), and consistency (well-formed content that contradicts itself).
/// Whatever the group, a failed build never yields a partial mesh; the caller
/// either gets a complete [`Mesh`](crate::mesh::Mesh) or one of these.
#[derive(Error, Debug)]
pub enum MeshError {
    /// Structured generation with a zero element count on either axis.
    #[error("invalid mesh resolution {nx}x{ny}: element counts must be at least 1")]
    InvalidResolution {
        /// Requested elements along x
        nx: usize,
        /// Requested elements along y
        ny: usize,
    },

    /// Structured generation over an empty or non-finite rectangle.
    #[error("degenerate mesh bounds {bounds}: max must exceed min on both axes")]
    DegenerateBounds {
        /// The rejected rectangle
        bounds: Bounds2D,
    },

    /// Element family the structured generator cannot produce.
    #[error("unsupported element family '{0}' for structured generation")]
    UnsupportedFamily(ElementKind),

    /// Underlying stream or file error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Mesh file version outside the supported 2.x set.
    #[error("unsupported mesh file version {0}, expected 2.0, 2.1 or 2.2")]
    UnsupportedVersion(String),

    /// A record that could not be parsed.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number in the input stream
        line: usize,
        /// What went wrong
        message: String,
    },

    /// Element type code missing from the capability table.
    #[error("unrecognized element type code {code} at line {line}")]
    UnknownElementType {
        /// The offending type code
        code: usize,
        /// 1-based line number in the input stream
        line: usize,
    },

    /// Point element whose connectivity is not a single node.
    #[error("node set element {elmt_id} must have exactly one node, found {found}")]
    InvalidNodeSetElement {
        /// 1-based element id from the file
        elmt_id: usize,
        /// Connectivity length found
        found: usize,
    },

    /// More node sets declared than distinct point physical ids observed.
    #[error("{declared} node sets declared but only {observed} distinct point physical ids observed")]
    NodeSetCountExceeds {
        /// Declared dim-0 physical group count
        declared: usize,
        /// Distinct physical ids among point elements
        observed: usize,
    },

    /// Declared node set with no matching point elements.
    #[error("node set '{name}' (physical id {id}) has no matching point elements")]
    UnmatchedNodeSet {
        /// The declared node-set name
        name: String,
        /// The declared node-set id
        id: usize,
    },

    /// Physical group name registered twice.
    #[error("duplicate physical group name '{0}'")]
    DuplicateGroupName(String),

    /// Node set name registered twice.
    #[error("duplicate node set name '{0}'")]
    DuplicateNodeSetName(String),

    /// A complete parse that produced no bulk elements.
    #[error("mesh contains no bulk elements")]
    NoBulkElements,
}

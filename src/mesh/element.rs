//! Element kinds, their fixed capabilities, and element storage.
//!
//! [`ElementKind`] is the single lookup table for everything that depends on
//! the element family: connectivity length, topological dimension,
//! interpolation order, rendering cell code, the boundary sub-element kind,
//! and the Gmsh type-code mapping used by the importer.

use std::fmt;

/// Supported element families.
///
/// Covers the linear and quadratic Lagrange families of the Gmsh v2 format
/// that the importer accepts, plus the point elements that carry node-set
/// markers.
///
/// # Example
///
/// ```
/// use fem_mesh_rs::mesh::ElementKind;
///
/// let kind = ElementKind::Quad9;
/// assert_eq!(kind.node_count(), 9);
/// assert_eq!(kind.dim(), 2);
/// assert_eq!(kind.order(), 2);
/// assert_eq!(kind.boundary_kind(), Some(ElementKind::Edge3));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Single node, used as a node-set marker
    Point1,
    /// 2-node line
    Edge2,
    /// 3-node quadratic line
    Edge3,
    /// 3-node triangle
    Tri3,
    /// 6-node quadratic triangle
    Tri6,
    /// 4-node bilinear quadrilateral
    Quad4,
    /// 8-node serendipity quadrilateral (no face-center node)
    Quad8,
    /// 9-node biquadratic quadrilateral
    Quad9,
    /// 4-node tetrahedron
    Tet4,
    /// 10-node quadratic tetrahedron
    Tet10,
    /// 8-node hexahedron
    Hex8,
    /// 20-node serendipity hexahedron
    Hex20,
    /// 27-node triquadratic hexahedron
    Hex27,
}

impl ElementKind {
    /// Connectivity length for this family.
    pub fn node_count(self) -> usize {
        match self {
            ElementKind::Point1 => 1,
            ElementKind::Edge2 => 2,
            ElementKind::Edge3 => 3,
            ElementKind::Tri3 => 3,
            ElementKind::Tri6 => 6,
            ElementKind::Quad4 => 4,
            ElementKind::Quad8 => 8,
            ElementKind::Quad9 => 9,
            ElementKind::Tet4 => 4,
            ElementKind::Tet10 => 10,
            ElementKind::Hex8 => 8,
            ElementKind::Hex20 => 20,
            ElementKind::Hex27 => 27,
        }
    }

    /// Topological dimension (0 = point, 1 = line, 2 = surface, 3 = volume).
    pub fn dim(self) -> usize {
        match self {
            ElementKind::Point1 => 0,
            ElementKind::Edge2 | ElementKind::Edge3 => 1,
            ElementKind::Tri3 | ElementKind::Tri6 => 2,
            ElementKind::Quad4 | ElementKind::Quad8 | ElementKind::Quad9 => 2,
            ElementKind::Tet4 | ElementKind::Tet10 => 3,
            ElementKind::Hex8 | ElementKind::Hex20 | ElementKind::Hex27 => 3,
        }
    }

    /// Polynomial interpolation order (1 = linear, 2 = quadratic).
    pub fn order(self) -> usize {
        match self {
            ElementKind::Point1
            | ElementKind::Edge2
            | ElementKind::Tri3
            | ElementKind::Quad4
            | ElementKind::Tet4
            | ElementKind::Hex8 => 1,
            ElementKind::Edge3
            | ElementKind::Tri6
            | ElementKind::Quad8
            | ElementKind::Quad9
            | ElementKind::Tet10
            | ElementKind::Hex20
            | ElementKind::Hex27 => 2,
        }
    }

    /// Rendering cell-type code handed to downstream consumers.
    pub fn cell_code(self) -> usize {
        match self {
            ElementKind::Point1 => 1,
            ElementKind::Edge2 => 3,
            ElementKind::Edge3 => 4,
            ElementKind::Tri3 => 5,
            ElementKind::Quad4 => 9,
            ElementKind::Tet4 => 10,
            ElementKind::Hex8 => 12,
            ElementKind::Tri6 => 22,
            ElementKind::Quad8 => 23,
            ElementKind::Tet10 => 24,
            ElementKind::Hex20 => 25,
            ElementKind::Quad9 => 28,
            ElementKind::Hex27 => 29,
        }
    }

    /// The element kind bounding one face/edge of this kind, if any.
    pub fn boundary_kind(self) -> Option<ElementKind> {
        match self {
            ElementKind::Point1 => None,
            ElementKind::Edge2 | ElementKind::Edge3 => Some(ElementKind::Point1),
            ElementKind::Tri3 => Some(ElementKind::Edge2),
            ElementKind::Tri6 => Some(ElementKind::Edge3),
            ElementKind::Quad4 => Some(ElementKind::Edge2),
            ElementKind::Quad8 | ElementKind::Quad9 => Some(ElementKind::Edge3),
            ElementKind::Tet4 => Some(ElementKind::Tri3),
            ElementKind::Tet10 => Some(ElementKind::Tri6),
            ElementKind::Hex8 => Some(ElementKind::Quad4),
            ElementKind::Hex20 => Some(ElementKind::Quad8),
            ElementKind::Hex27 => Some(ElementKind::Quad9),
        }
    }

    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Point1 => "point",
            ElementKind::Edge2 => "edge2",
            ElementKind::Edge3 => "edge3",
            ElementKind::Tri3 => "tri3",
            ElementKind::Tri6 => "tri6",
            ElementKind::Quad4 => "quad4",
            ElementKind::Quad8 => "quad8",
            ElementKind::Quad9 => "quad9",
            ElementKind::Tet4 => "tet4",
            ElementKind::Tet10 => "tet10",
            ElementKind::Hex8 => "hex8",
            ElementKind::Hex20 => "hex20",
            ElementKind::Hex27 => "hex27",
        }
    }

    /// Map a Gmsh v2 element type code to a kind.
    ///
    /// Returns `None` for type codes outside the supported set.
    pub fn from_gmsh(code: usize) -> Option<ElementKind> {
        match code {
            1 => Some(ElementKind::Edge2),
            2 => Some(ElementKind::Tri3),
            3 => Some(ElementKind::Quad4),
            4 => Some(ElementKind::Tet4),
            5 => Some(ElementKind::Hex8),
            8 => Some(ElementKind::Edge3),
            9 => Some(ElementKind::Tri6),
            10 => Some(ElementKind::Quad9),
            11 => Some(ElementKind::Tet10),
            12 => Some(ElementKind::Hex27),
            15 => Some(ElementKind::Point1),
            16 => Some(ElementKind::Quad8),
            17 => Some(ElementKind::Hex20),
            _ => None,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named position inside a quadrilateral element's connectivity.
///
/// The stored connectivity order for the quad families is: four corners
/// counter-clockwise from bottom-left, then (quadratic families) four
/// mid-edge nodes in the same counter-clockwise traversal, then (Quad9) the
/// face-center node last. Boundary extraction addresses nodes through these
/// roles instead of bare local indices, so a role that does not exist for a
/// family (mid-edges on Quad4, the center on Quad4/Quad8) resolves to `None`
/// and is skipped rather than silently aliasing a wrong position.
///
/// # Example
///
/// ```
/// use fem_mesh_rs::mesh::{ElementKind, LocalNodeRole};
///
/// assert_eq!(LocalNodeRole::Corner(3).index_in(ElementKind::Quad4), Some(3));
/// assert_eq!(LocalNodeRole::MidEdge(0).index_in(ElementKind::Quad4), None);
/// assert_eq!(LocalNodeRole::MidEdge(0).index_in(ElementKind::Quad8), Some(4));
/// assert_eq!(LocalNodeRole::Center.index_in(ElementKind::Quad9), Some(8));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocalNodeRole {
    /// Corner `k` (0 = bottom-left, counter-clockwise, `k < 4`)
    Corner(usize),
    /// Mid-edge node on edge `k` (edge `k` runs from corner `k` to corner
    /// `(k + 1) % 4`)
    MidEdge(usize),
    /// Face-center node
    Center,
}

impl LocalNodeRole {
    /// Resolve this role to a 0-based local connectivity index for `kind`.
    ///
    /// Only the quadrilateral families carry this convention; other kinds
    /// resolve to `None`.
    pub fn index_in(self, kind: ElementKind) -> Option<usize> {
        if !matches!(
            kind,
            ElementKind::Quad4 | ElementKind::Quad8 | ElementKind::Quad9
        ) {
            return None;
        }
        match self {
            LocalNodeRole::Corner(k) if k < 4 => Some(k),
            LocalNodeRole::MidEdge(k) if k < 4 && kind.order() == 2 => Some(4 + k),
            LocalNodeRole::Center if kind == ElementKind::Quad9 => Some(8),
            _ => None,
        }
    }
}

/// One mesh element: its family, group link, connectivity, and measure.
///
/// Node ids are 1-based. Connectivity order is load-bearing: consumers index
/// local nodes positionally, so the stored order must follow the family
/// convention documented on [`LocalNodeRole`].
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    /// Element family
    pub kind: ElementKind,
    /// Physical group id this element belongs to
    pub physical_id: usize,
    /// 1-based node ids in family order
    pub nodes: Vec<usize>,
    /// Element measure (area in 2D); zero when not yet computed
    pub volume: f64,
}

impl Element {
    /// Create an element with zero volume.
    pub fn new(kind: ElementKind, physical_id: usize, nodes: Vec<usize>) -> Self {
        Self {
            kind,
            physical_id,
            nodes,
            volume: 0.0,
        }
    }

    /// Create an element with a known measure.
    pub fn with_volume(
        kind: ElementKind,
        physical_id: usize,
        nodes: Vec<usize>,
        volume: f64,
    ) -> Self {
        Self {
            kind,
            physical_id,
            nodes,
            volume,
        }
    }

    /// Topological dimension of this element.
    #[inline]
    pub fn dim(&self) -> usize {
        self.kind.dim()
    }

    /// Interpolation order of this element.
    #[inline]
    pub fn order(&self) -> usize {
        self.kind.order()
    }

    /// Rendering cell-type code of this element.
    #[inline]
    pub fn cell_code(&self) -> usize {
        self.kind.cell_code()
    }

    /// Number of nodes in the connectivity.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

//! Structured rectangular mesh generation.
//!
//! Builds Quad4, Quad8, and Quad9 meshes over an axis-aligned rectangle:
//! lattice node coordinates, row-major bulk connectivity, one boundary edge
//! element per bulk element touching each side, and the five canonical
//! physical groups and node sets (`left`, `right`, `bottom`, `top`,
//! `alldomain`).
//!
//! Family-specific index arithmetic is confined to a small strategy table
//! ([`FamilyRules`]); the element loop and the boundary walker are
//! family-agnostic.

use tracing::debug;

use crate::mesh::{
    Element, ElementKind, LocalNodeRole, Mesh, MeshError, NodeSet, PhysicalGroup,
    PhysicalGroupRegistry, NodeSetRegistry,
};
use crate::types::{Bounds2D, Extent3, Side, Vector3};

/// Group and node-set id of `alldomain`, following the four side ids.
const ALLDOMAIN_ID: usize = 5;

/// Builder for structured rectangular meshes.
///
/// Defaults to a 1x1 Quad4 mesh of the unit square. `build` validates the
/// configuration and returns the finished mesh or a configuration error;
/// nothing is allocated until then.
///
/// # Example
///
/// ```
/// use fem_mesh_rs::mesh::{ElementKind, StructuredMeshBuilder};
///
/// let mesh = StructuredMeshBuilder::new(0.0, 1.0, 0.0, 1.0)
///     .with_resolution(2, 2)
///     .with_family(ElementKind::Quad4)
///     .build()
///     .unwrap();
///
/// assert_eq!(mesh.n_nodes(), 9);
/// assert_eq!(mesh.n_bulk_elements(), 4);
/// assert_eq!(mesh.n_boundary_elements(), 8);
/// ```
#[derive(Clone, Debug)]
pub struct StructuredMeshBuilder {
    bounds: Bounds2D,
    nx: usize,
    ny: usize,
    family: ElementKind,
}

impl StructuredMeshBuilder {
    /// Start from explicit rectangle corners.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self::from_bounds(Bounds2D::new(x_min, x_max, y_min, y_max))
    }

    /// Start from existing bounds.
    pub fn from_bounds(bounds: Bounds2D) -> Self {
        Self {
            bounds,
            nx: 1,
            ny: 1,
            family: ElementKind::Quad4,
        }
    }

    /// Start from the unit square [0, 1] × [0, 1].
    pub fn unit_square() -> Self {
        Self::from_bounds(Bounds2D::unit_square())
    }

    /// Set the element counts along x and y.
    pub fn with_resolution(mut self, nx: usize, ny: usize) -> Self {
        self.nx = nx;
        self.ny = ny;
        self
    }

    /// Set the element family (Quad4, Quad8, or Quad9).
    pub fn with_family(mut self, family: ElementKind) -> Self {
        self.family = family;
        self
    }

    /// Validate the configuration and build the mesh.
    ///
    /// # Errors
    ///
    /// - [`MeshError::InvalidResolution`] if either element count is zero
    /// - [`MeshError::DegenerateBounds`] if the rectangle is empty or
    ///   non-finite
    /// - [`MeshError::UnsupportedFamily`] for non-quadrilateral families
    pub fn build(self) -> Result<Mesh, MeshError> {
        let Self {
            bounds,
            nx,
            ny,
            family,
        } = self;

        if nx == 0 || ny == 0 {
            return Err(MeshError::InvalidResolution { nx, ny });
        }
        if !bounds.is_valid() {
            return Err(MeshError::DegenerateBounds { bounds });
        }
        let rules = FamilyRules::for_family(family)?;
        let boundary_kind = family
            .boundary_kind()
            .ok_or(MeshError::UnsupportedFamily(family))?;

        // Resolve each side's role pattern to local indices once; linear
        // families drop the mid-edge role here.
        let side_locals: [(Side, Vec<usize>); 4] = Side::ALL.map(|side| {
            let locals = side_roles(side)
                .iter()
                .filter_map(|role| role.index_in(family))
                .collect();
            (side, locals)
        });

        let nodes = (rules.positions)(&bounds, nx, ny);
        debug_assert_eq!(nodes.len(), (rules.node_count)(nx, ny));

        let cell_area = (bounds.width() / nx as f64) * (bounds.height() / ny as f64);

        // Bulk elements in row-major order, e = (j-1)*nx + i.
        let mut bulk = Vec::with_capacity(nx * ny);
        for j in 1..=ny {
            for i in 1..=nx {
                let conn = (rules.connectivity)(nx, i, j);
                bulk.push(Element::with_volume(family, ALLDOMAIN_ID, conn, cell_area));
            }
        }

        // One boundary element per bulk element adjacent to each side, in
        // side emission order; boundary ids start at 1.
        let mut boundary = Vec::with_capacity(2 * (nx + ny));
        let mut side_elmts: [Vec<usize>; 4] = Default::default();
        let mut side_nodes: [Vec<usize>; 4] = Default::default();
        for (k, (side, locals)) in side_locals.iter().enumerate() {
            for (i, j) in side_strip(*side, nx, ny) {
                let e = (j - 1) * nx + i;
                let parent = &bulk[e - 1];
                let conn: Vec<usize> = locals.iter().map(|&l| parent.nodes[l]).collect();
                side_nodes[k].extend_from_slice(&conn);
                boundary.push(Element::new(boundary_kind, side.group_id(), conn));
                side_elmts[k].push(boundary.len());
            }
        }

        // Final element table: boundary elements first, bulk after.
        let n_boundary = boundary.len();
        let n_bulk = bulk.len();
        let mut elements = boundary;
        elements.extend(bulk);

        let mut groups = PhysicalGroupRegistry::new();
        let mut node_sets = NodeSetRegistry::new();
        for (k, (side, _)) in side_locals.iter().enumerate() {
            groups.insert(PhysicalGroup {
                id: side.group_id(),
                name: side.name().to_string(),
                dim: 1,
                nodes_per_elmt: boundary_kind.node_count(),
                elmt_ids: std::mem::take(&mut side_elmts[k]),
            })?;
            node_sets.insert(NodeSet {
                id: side.group_id(),
                name: side.name().to_string(),
                node_ids: std::mem::take(&mut side_nodes[k]),
            })?;
        }
        groups.insert(PhysicalGroup {
            id: ALLDOMAIN_ID,
            name: "alldomain".to_string(),
            dim: 2,
            nodes_per_elmt: family.node_count(),
            elmt_ids: (n_boundary + 1..=n_boundary + n_bulk).collect(),
        })?;
        node_sets.insert(NodeSet {
            id: ALLDOMAIN_ID,
            name: "alldomain".to_string(),
            node_ids: (1..=nodes.len()).collect(),
        })?;

        let mut extent = Extent3::empty();
        extent.include(Vector3::from_xy(bounds.x_min, bounds.y_min));
        extent.include(Vector3::from_xy(bounds.x_max, bounds.y_max));

        debug!(
            "generated structured {} mesh: {} nodes, {} bulk + {} boundary elements",
            family,
            nodes.len(),
            n_bulk,
            n_boundary
        );

        Ok(Mesh {
            nodes,
            elements,
            extent,
            n_bulk,
            n_lines: n_boundary,
            n_surfaces: n_bulk,
            min_dim: 1,
            max_dim: 2,
            order: family.order(),
            bulk_kind: family,
            line_kind: Some(boundary_kind),
            surface_kind: Some(family),
            groups,
            node_sets,
        })
    }
}

impl Default for StructuredMeshBuilder {
    fn default() -> Self {
        Self::unit_square()
    }
}

/// Per-family lattice rules: node count, node positions, and element
/// connectivity. `i` and `j` are 1-based element column/row indices.
struct FamilyRules {
    node_count: fn(usize, usize) -> usize,
    positions: fn(&Bounds2D, usize, usize) -> Vec<Vector3>,
    connectivity: fn(usize, usize, usize) -> Vec<usize>,
}

impl FamilyRules {
    fn for_family(family: ElementKind) -> Result<Self, MeshError> {
        match family {
            ElementKind::Quad4 => Ok(Self {
                node_count: quad4_node_count,
                positions: quad4_positions,
                connectivity: quad4_connectivity,
            }),
            ElementKind::Quad8 => Ok(Self {
                node_count: quad8_node_count,
                positions: quad8_positions,
                connectivity: quad8_connectivity,
            }),
            ElementKind::Quad9 => Ok(Self {
                node_count: quad9_node_count,
                positions: quad9_positions,
                connectivity: quad9_connectivity,
            }),
            other => Err(MeshError::UnsupportedFamily(other)),
        }
    }
}

/// Local node roles picked up along one side, traversed corner to corner.
fn side_roles(side: Side) -> [LocalNodeRole; 3] {
    match side {
        Side::Left => [
            LocalNodeRole::Corner(3),
            LocalNodeRole::MidEdge(3),
            LocalNodeRole::Corner(0),
        ],
        Side::Right => [
            LocalNodeRole::Corner(1),
            LocalNodeRole::MidEdge(1),
            LocalNodeRole::Corner(2),
        ],
        Side::Bottom => [
            LocalNodeRole::Corner(0),
            LocalNodeRole::MidEdge(0),
            LocalNodeRole::Corner(1),
        ],
        Side::Top => [
            LocalNodeRole::Corner(2),
            LocalNodeRole::MidEdge(2),
            LocalNodeRole::Corner(3),
        ],
    }
}

/// Bulk element (column, row) pairs adjacent to `side`, in walk order.
fn side_strip(side: Side, nx: usize, ny: usize) -> Vec<(usize, usize)> {
    match side {
        Side::Left => (1..=ny).map(|j| (1, j)).collect(),
        Side::Right => (1..=ny).map(|j| (nx, j)).collect(),
        Side::Bottom => (1..=nx).map(|i| (i, 1)).collect(),
        Side::Top => (1..=nx).map(|i| (i, ny)).collect(),
    }
}

fn quad4_node_count(nx: usize, ny: usize) -> usize {
    (nx + 1) * (ny + 1)
}

/// Uniform (nx+1) x (ny+1) lattice, row-major bottom to top.
fn quad4_positions(bounds: &Bounds2D, nx: usize, ny: usize) -> Vec<Vector3> {
    let dx = bounds.width() / nx as f64;
    let dy = bounds.height() / ny as f64;
    let mut nodes = Vec::with_capacity(quad4_node_count(nx, ny));
    for j in 0..=ny {
        for i in 0..=nx {
            nodes.push(Vector3::from_xy(
                bounds.x_min + i as f64 * dx,
                bounds.y_min + j as f64 * dy,
            ));
        }
    }
    nodes
}

/// Corner ids counter-clockwise from bottom-left.
fn quad4_connectivity(nx: usize, i: usize, j: usize) -> Vec<usize> {
    let i1 = (j - 1) * (nx + 1) + i;
    let i2 = i1 + 1;
    let i3 = i2 + nx + 1;
    let i4 = i3 - 1;
    vec![i1, i2, i3, i4]
}

fn quad8_node_count(nx: usize, ny: usize) -> usize {
    (2 * nx + 1) * (2 * ny + 1) - nx * ny
}

/// Serendipity lattice: each element row contributes a full line of 2nx+1
/// nodes at half pitch plus a mid-height line of nx+1 corner-aligned nodes;
/// a final full line closes the top. No face-center nodes exist.
fn quad8_positions(bounds: &Bounds2D, nx: usize, ny: usize) -> Vec<Vector3> {
    let dx = bounds.width() / (2.0 * nx as f64);
    let dy = bounds.height() / (2.0 * ny as f64);
    let mut nodes = Vec::with_capacity(quad8_node_count(nx, ny));
    for j in 0..ny {
        let y0 = bounds.y_min + j as f64 * 2.0 * dy;
        for i in 0..(2 * nx + 1) {
            nodes.push(Vector3::from_xy(bounds.x_min + i as f64 * dx, y0));
        }
        for i in 0..(nx + 1) {
            nodes.push(Vector3::from_xy(
                bounds.x_min + i as f64 * 2.0 * dx,
                y0 + dy,
            ));
        }
    }
    let y_top = bounds.y_min + ny as f64 * 2.0 * dy;
    for i in 0..(2 * nx + 1) {
        nodes.push(Vector3::from_xy(bounds.x_min + i as f64 * dx, y_top));
    }
    nodes
}

/// Corners then mid-edges, counter-clockwise; row stride is 3nx+2.
fn quad8_connectivity(nx: usize, i: usize, j: usize) -> Vec<usize> {
    let row = 3 * nx + 2;
    let i1 = (j - 1) * row + 2 * i - 1;
    let i2 = i1 + 2;
    let i3 = i2 + row;
    let i4 = i3 - 2;
    let i5 = i1 + 1;
    let i6 = i2 + (2 * nx + 1) - i;
    let i7 = i3 - 1;
    let i8 = i1 + (2 * nx + 1) - (i - 1);
    vec![i1, i2, i3, i4, i5, i6, i7, i8]
}

fn quad9_node_count(nx: usize, ny: usize) -> usize {
    (2 * nx + 1) * (2 * ny + 1)
}

/// Full (2nx+1) x (2ny+1) tensor-product lattice at half pitch.
fn quad9_positions(bounds: &Bounds2D, nx: usize, ny: usize) -> Vec<Vector3> {
    let dx = bounds.width() / (2.0 * nx as f64);
    let dy = bounds.height() / (2.0 * ny as f64);
    let mut nodes = Vec::with_capacity(quad9_node_count(nx, ny));
    for j in 0..(2 * ny + 1) {
        for i in 0..(2 * nx + 1) {
            nodes.push(Vector3::from_xy(
                bounds.x_min + i as f64 * dx,
                bounds.y_min + j as f64 * dy,
            ));
        }
    }
    nodes
}

/// Corners, mid-edges, then the face center; the element spans two lattice
/// rows of stride 2nx+1.
fn quad9_connectivity(nx: usize, i: usize, j: usize) -> Vec<usize> {
    let row = 2 * nx + 1;
    let i1 = (j - 1) * 2 * row + 2 * i - 1;
    let i2 = i1 + 2;
    let i3 = i2 + 2 * row;
    let i4 = i3 - 2;
    let i5 = i1 + 1;
    let i6 = i2 + row;
    let i7 = i3 - 1;
    let i8 = i1 + row;
    let i9 = i8 + 1;
    vec![i1, i2, i3, i4, i5, i6, i7, i8, i9]
}

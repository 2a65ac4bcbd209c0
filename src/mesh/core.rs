//! The canonical mesh data model.

use std::fmt;

use crate::mesh::{Element, ElementKind, NodeSetRegistry, PhysicalGroupRegistry};
use crate::types::{Extent3, Vector3};

/// A complete finite element mesh: node coordinates, element connectivity,
/// and the named groups used to attach boundary conditions and material
/// assignments.
///
/// A `Mesh` is produced in one shot by a producer (the structured builder or
/// the file importer) and is immutable afterwards, so it can be shared
/// read-only with downstream consumers without synchronization. A failed
/// build never yields a `Mesh` value at all.
///
/// Node and element ids are 1-based and contiguous; internal storage is
/// 0-based with `internal_index = id - 1`. Structured meshes store boundary
/// elements first (ids `1..=n_boundary_elements()`) followed by bulk
/// elements; imported meshes keep the file's id order, where dimensions may
/// interleave.
#[derive(Clone, Debug)]
pub struct Mesh {
    pub(crate) nodes: Vec<Vector3>,
    pub(crate) elements: Vec<Element>,
    pub(crate) extent: Extent3,
    pub(crate) n_bulk: usize,
    pub(crate) n_lines: usize,
    pub(crate) n_surfaces: usize,
    pub(crate) min_dim: usize,
    pub(crate) max_dim: usize,
    pub(crate) order: usize,
    pub(crate) bulk_kind: ElementKind,
    pub(crate) line_kind: Option<ElementKind>,
    pub(crate) surface_kind: Option<ElementKind>,
    pub(crate) groups: PhysicalGroupRegistry,
    pub(crate) node_sets: NodeSetRegistry,
}

impl Mesh {
    /// Number of nodes.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of elements, bulk and boundary together.
    #[inline]
    pub fn n_elements(&self) -> usize {
        self.elements.len()
    }

    /// Number of elements at the mesh's maximum dimension.
    #[inline]
    pub fn n_bulk_elements(&self) -> usize {
        self.n_bulk
    }

    /// Number of elements below the bulk dimension (edges and points in 2D).
    #[inline]
    pub fn n_boundary_elements(&self) -> usize {
        self.elements.len() - self.n_bulk
    }

    /// Number of 1-dimensional elements.
    #[inline]
    pub fn n_line_elements(&self) -> usize {
        self.n_lines
    }

    /// Number of 2-dimensional elements.
    #[inline]
    pub fn n_surface_elements(&self) -> usize {
        self.n_surfaces
    }

    /// Interpolation order of the mesh (1 = linear, 2 = quadratic).
    #[inline]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Smallest topological dimension present.
    #[inline]
    pub fn min_dim(&self) -> usize {
        self.min_dim
    }

    /// Largest topological dimension present; elements at this dimension are
    /// the bulk.
    #[inline]
    pub fn max_dim(&self) -> usize {
        self.max_dim
    }

    /// Element kind of the bulk elements.
    #[inline]
    pub fn bulk_kind(&self) -> ElementKind {
        self.bulk_kind
    }

    /// Element kind of 1-dimensional elements, if any.
    #[inline]
    pub fn line_kind(&self) -> Option<ElementKind> {
        self.line_kind
    }

    /// Element kind of 2-dimensional elements, if any.
    #[inline]
    pub fn surface_kind(&self) -> Option<ElementKind> {
        self.surface_kind
    }

    /// Connectivity length of bulk elements.
    #[inline]
    pub fn nodes_per_bulk_elmt(&self) -> usize {
        self.bulk_kind.node_count()
    }

    /// Connectivity length of line elements (0 if the mesh has none).
    #[inline]
    pub fn nodes_per_line_elmt(&self) -> usize {
        self.line_kind.map_or(0, ElementKind::node_count)
    }

    /// Connectivity length of surface elements (0 if the mesh has none).
    #[inline]
    pub fn nodes_per_surface_elmt(&self) -> usize {
        self.surface_kind.map_or(0, ElementKind::node_count)
    }

    /// Coordinate of node `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is 0 or greater than [`Mesh::n_nodes`].
    #[inline]
    pub fn node(&self, id: usize) -> Vector3 {
        assert!(
            id >= 1 && id <= self.nodes.len(),
            "node id {} out of range 1..={}",
            id,
            self.nodes.len()
        );
        self.nodes[id - 1]
    }

    /// All node coordinates, ordered by id.
    #[inline]
    pub fn nodes(&self) -> &[Vector3] {
        &self.nodes
    }

    /// Element `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is 0 or greater than [`Mesh::n_elements`].
    #[inline]
    pub fn element(&self, id: usize) -> &Element {
        assert!(
            id >= 1 && id <= self.elements.len(),
            "element id {} out of range 1..={}",
            id,
            self.elements.len()
        );
        &self.elements[id - 1]
    }

    /// All elements, ordered by id.
    #[inline]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Node ids of element `id`, in the family's local order.
    #[inline]
    pub fn connectivity(&self, id: usize) -> &[usize] {
        &self.element(id).nodes
    }

    /// Topological dimension of element `id`.
    #[inline]
    pub fn element_dim(&self, id: usize) -> usize {
        self.element(id).dim()
    }

    /// Physical group id of element `id`.
    #[inline]
    pub fn element_physical_id(&self, id: usize) -> usize {
        self.element(id).physical_id
    }

    /// Rendering cell-type code of element `id`.
    #[inline]
    pub fn element_cell_code(&self, id: usize) -> usize {
        self.element(id).cell_code()
    }

    /// Measure (area in 2D) of element `id`.
    #[inline]
    pub fn element_volume(&self, id: usize) -> f64 {
        self.element(id).volume
    }

    /// Iterate bulk elements as `(id, element)` pairs in id order.
    pub fn bulk_elements(&self) -> impl Iterator<Item = (usize, &Element)> {
        let bulk_dim = self.max_dim;
        self.elements
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.dim() == bulk_dim)
            .map(|(i, e)| (i + 1, e))
    }

    /// Iterate boundary (below bulk dimension) elements as `(id, element)`
    /// pairs in id order.
    pub fn boundary_elements(&self) -> impl Iterator<Item = (usize, &Element)> {
        let bulk_dim = self.max_dim;
        self.elements
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.dim() < bulk_dim)
            .map(|(i, e)| (i + 1, e))
    }

    /// Axis-aligned extent of the node coordinates.
    #[inline]
    pub fn extent(&self) -> Extent3 {
        self.extent
    }

    /// The element physical groups.
    #[inline]
    pub fn physical_groups(&self) -> &PhysicalGroupRegistry {
        &self.groups
    }

    /// The node sets.
    #[inline]
    pub fn node_sets(&self) -> &NodeSetRegistry {
        &self.node_sets
    }

    /// Member element ids of the named physical group.
    #[inline]
    pub fn group_elements(&self, name: &str) -> Option<&[usize]> {
        self.groups.elements_of(name)
    }

    /// Member node ids of the named node set.
    #[inline]
    pub fn set_nodes(&self, name: &str) -> Option<&[usize]> {
        self.node_sets.nodes_of(name)
    }

    /// Snapshot of the mesh's headline numbers for display.
    pub fn summary(&self) -> MeshSummary {
        MeshSummary {
            n_nodes: self.n_nodes(),
            n_elements: self.n_elements(),
            n_bulk_elements: self.n_bulk_elements(),
            n_boundary_elements: self.n_boundary_elements(),
            order: self.order,
            bulk_kind: self.bulk_kind,
            extent: self.extent,
            groups: self
                .groups
                .iter()
                .map(|g| (g.name.clone(), g.id, g.elmt_ids.len()))
                .collect(),
            node_sets: self
                .node_sets
                .iter()
                .map(|s| (s.name.clone(), s.id, s.node_ids.len()))
                .collect(),
        }
    }
}

/// Headline mesh numbers, displayable as a short multi-line report.
#[derive(Clone, Debug)]
pub struct MeshSummary {
    /// Node count
    pub n_nodes: usize,
    /// Total element count
    pub n_elements: usize,
    /// Bulk element count
    pub n_bulk_elements: usize,
    /// Boundary element count
    pub n_boundary_elements: usize,
    /// Interpolation order
    pub order: usize,
    /// Bulk element kind
    pub bulk_kind: ElementKind,
    /// Coordinate extent
    pub extent: Extent3,
    /// (name, id, member count) per physical group, in registration order
    pub groups: Vec<(String, usize, usize)>,
    /// (name, id, member count) per node set, in registration order
    pub node_sets: Vec<(String, usize, usize)>,
}

impl fmt::Display for MeshSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mesh summary:")?;
        writeln!(f, "  Nodes: {}", self.n_nodes)?;
        writeln!(
            f,
            "  Elements: {} ({} bulk, {} boundary)",
            self.n_elements, self.n_bulk_elements, self.n_boundary_elements
        )?;
        writeln!(
            f,
            "  Bulk kind: {} (order {})",
            self.bulk_kind, self.order
        )?;
        writeln!(f, "  Extent: {}", self.extent)?;
        writeln!(f, "  Physical groups:")?;
        for (name, id, count) in &self.groups {
            writeln!(f, "    {} (id {}): {} elements", name, id, count)?;
        }
        writeln!(f, "  Node sets:")?;
        for (name, id, count) in &self.node_sets {
            writeln!(f, "    {} (id {}): {} nodes", name, id, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{NodeSet, PhysicalGroup};

    /// Two quad4 elements side by side, with one edge2 boundary element.
    fn two_quad_mesh() -> Mesh {
        let nodes = vec![
            Vector3::from_xy(0.0, 0.0),
            Vector3::from_xy(1.0, 0.0),
            Vector3::from_xy(2.0, 0.0),
            Vector3::from_xy(0.0, 1.0),
            Vector3::from_xy(1.0, 1.0),
            Vector3::from_xy(2.0, 1.0),
        ];
        let elements = vec![
            Element::new(ElementKind::Edge2, 1, vec![4, 1]),
            Element::with_volume(ElementKind::Quad4, 5, vec![1, 2, 5, 4], 1.0),
            Element::with_volume(ElementKind::Quad4, 5, vec![2, 3, 6, 5], 1.0),
        ];
        let mut groups = PhysicalGroupRegistry::new();
        groups
            .insert(PhysicalGroup {
                id: 1,
                name: "left".to_string(),
                dim: 1,
                nodes_per_elmt: 2,
                elmt_ids: vec![1],
            })
            .unwrap();
        groups
            .insert(PhysicalGroup {
                id: 5,
                name: "alldomain".to_string(),
                dim: 2,
                nodes_per_elmt: 4,
                elmt_ids: vec![2, 3],
            })
            .unwrap();
        let mut node_sets = NodeSetRegistry::new();
        node_sets
            .insert(NodeSet {
                id: 5,
                name: "alldomain".to_string(),
                node_ids: (1..=6).collect(),
            })
            .unwrap();
        Mesh {
            extent: Extent3::from_points(nodes.iter().copied()),
            nodes,
            elements,
            n_bulk: 2,
            n_lines: 1,
            n_surfaces: 2,
            min_dim: 1,
            max_dim: 2,
            order: 1,
            bulk_kind: ElementKind::Quad4,
            line_kind: Some(ElementKind::Edge2),
            surface_kind: Some(ElementKind::Quad4),
            groups,
            node_sets,
        }
    }

    #[test]
    fn test_counts() {
        let mesh = two_quad_mesh();
        assert_eq!(mesh.n_nodes(), 6);
        assert_eq!(mesh.n_elements(), 3);
        assert_eq!(mesh.n_bulk_elements(), 2);
        assert_eq!(mesh.n_boundary_elements(), 1);
        assert_eq!(mesh.n_line_elements(), 1);
        assert_eq!(mesh.order(), 1);
        assert_eq!(mesh.max_dim(), 2);
        assert_eq!(mesh.nodes_per_bulk_elmt(), 4);
        assert_eq!(mesh.nodes_per_line_elmt(), 2);
        assert_eq!(mesh.nodes_per_surface_elmt(), 4);
    }

    #[test]
    fn test_one_based_access() {
        let mesh = two_quad_mesh();
        assert_eq!(mesh.node(1), Vector3::zeros());
        assert_eq!(mesh.node(6), Vector3::from_xy(2.0, 1.0));
        assert_eq!(mesh.connectivity(2), &[1, 2, 5, 4]);
        assert_eq!(mesh.element_dim(1), 1);
        assert_eq!(mesh.element_physical_id(3), 5);
        assert_eq!(mesh.element_cell_code(2), 9);
        assert_eq!(mesh.element_volume(2), 1.0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_node_zero_panics() {
        let mesh = two_quad_mesh();
        mesh.node(0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_element_past_end_panics() {
        let mesh = two_quad_mesh();
        mesh.element(4);
    }

    #[test]
    fn test_bulk_boundary_iterators() {
        let mesh = two_quad_mesh();
        let bulk_ids: Vec<usize> = mesh.bulk_elements().map(|(id, _)| id).collect();
        assert_eq!(bulk_ids, vec![2, 3]);
        let boundary_ids: Vec<usize> = mesh.boundary_elements().map(|(id, _)| id).collect();
        assert_eq!(boundary_ids, vec![1]);
        assert!(mesh.bulk_elements().all(|(_, e)| e.kind == ElementKind::Quad4));
    }

    #[test]
    fn test_group_queries() {
        let mesh = two_quad_mesh();
        assert_eq!(mesh.group_elements("alldomain"), Some(&[2, 3][..]));
        assert_eq!(mesh.group_elements("nope"), None);
        assert_eq!(mesh.set_nodes("alldomain"), Some(&[1, 2, 3, 4, 5, 6][..]));
        assert_eq!(mesh.physical_groups().id_of("left"), Some(1));
    }

    #[test]
    fn test_summary_display() {
        let mesh = two_quad_mesh();
        let text = mesh.summary().to_string();
        assert!(text.contains("Nodes: 6"));
        assert!(text.contains("2 bulk"));
        assert!(text.contains("quad4"));
        assert!(text.contains("left (id 1): 1 elements"));
        assert!(text.contains("alldomain (id 5): 6 nodes"));
    }

    #[test]
    fn test_extent() {
        let mesh = two_quad_mesh();
        let extent = mesh.extent();
        assert_eq!(extent.min, Vector3::zeros());
        assert_eq!(extent.max, Vector3::new(2.0, 1.0, 0.0));
    }
}

//! Gmsh v2 ASCII mesh import.
//!
//! Reads the tag-delimited `$MeshFormat` / `$PhysicalNames` / `$Nodes` /
//! `$Elements` blocks of the msh v2 format (versions 2.0, 2.1, 2.2) in a
//! single pass and reconciles the file's physical-group metadata, which may
//! be absent, partial, or complete, into the canonical [`Mesh`] form.
//!
//! Reconciliation depends on how many groups the file declares and how many
//! distinct `(dimension, physical id)` pairs its elements carry:
//!
//! - nothing declared: synthesize one group per unique pair at the bulk
//!   dimension, named by the stringified id, plus `alldomain`
//! - exactly one declared group and one unique pair: the declared name and
//!   `alldomain` both cover the full bulk membership
//! - anything else: each element joins the first declared group carrying its
//!   physical id, and `alldomain` covers all bulk elements
//!
//! Declared dim-0 groups become node sets, fed by the single-node point
//! elements carrying the matching physical id.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::mesh::{
    Element, ElementKind, Mesh, MeshError, NodeSet, NodeSetRegistry, PhysicalGroup,
    PhysicalGroupRegistry,
};
use crate::types::{Extent3, Vector3};

/// Read a Gmsh v2 ASCII mesh file.
///
/// # Example
/// ```no_run
/// use fem_mesh_rs::mesh::read_gmsh_mesh;
/// use std::path::Path;
///
/// let mesh = read_gmsh_mesh(Path::new("domain.msh")).expect("failed to read mesh");
/// println!("{}", mesh.summary());
/// ```
pub fn read_gmsh_mesh(path: &Path) -> Result<Mesh, MeshError> {
    let file = File::open(path)?;
    read_gmsh_from(BufReader::new(file))
}

/// Read a Gmsh v2 ASCII mesh from any buffered reader.
///
/// Blocks may appear in any order; unrecognized blocks are skipped. The mesh
/// is assembled once the stream ends.
pub fn read_gmsh_from<R: BufRead>(reader: R) -> Result<Mesh, MeshError> {
    let mut scan = ScanState::default();
    let mut lines = reader.lines();
    let mut line_no = 0usize;

    while let Some(line_result) = lines.next() {
        line_no += 1;
        let line = line_result?;
        match line.trim() {
            "$MeshFormat" => parse_format(&mut lines, &mut line_no)?,
            "$PhysicalNames" => parse_physical_names(&mut lines, &mut line_no, &mut scan)?,
            "$Nodes" => parse_nodes(&mut lines, &mut line_no, &mut scan)?,
            "$Elements" => parse_elements(&mut lines, &mut line_no, &mut scan)?,
            other => {
                if other.starts_with('$') && !other.starts_with("$End") {
                    warn!("skipping unrecognized block {}", other);
                }
            }
        }
    }

    scan.reconcile()
}

/// One `$PhysicalNames` record, kept in declaration order.
#[derive(Clone, Debug)]
struct DeclaredGroup {
    dim: usize,
    id: usize,
    name: String,
}

/// Everything gathered during the single pass over the stream.
#[derive(Debug, Default)]
struct ScanState {
    coords: Vec<Vector3>,
    extent: Extent3,
    elements: Vec<Element>,
    elmt_source_lines: Vec<usize>,
    declared: Vec<DeclaredGroup>,
    declared_node_sets: Vec<(usize, String)>,
    unique_pairs: Vec<(usize, usize)>,
    node_set_members: BTreeMap<usize, Vec<usize>>,
    n_lines: usize,
    n_surfaces: usize,
    n_volumes: usize,
    min_dim: Option<usize>,
    max_dim: Option<usize>,
    order: usize,
    max_elmt_phys: usize,
    bulk_kind: Option<ElementKind>,
    line_kind: Option<ElementKind>,
    surface_kind: Option<ElementKind>,
}

impl ScanState {
    /// Nodes per member element for a group of dimension `dim`, taken from
    /// the element kinds observed during the pass.
    fn nodes_per_dim(&self, dim: usize) -> usize {
        match dim {
            0 => 1,
            1 => self.line_kind.map_or(0, ElementKind::node_count),
            2 => self.surface_kind.map_or(0, ElementKind::node_count),
            3 => self.bulk_kind.map_or(0, ElementKind::node_count),
            _ => 0,
        }
    }

    /// Assemble the canonical mesh from the gathered state.
    fn reconcile(self) -> Result<Mesh, MeshError> {
        // $Elements may precede $Nodes, so connectivity node ids are
        // range-checked only once the stream is done.
        let n_nodes = self.coords.len();
        let source_lines = self.elmt_source_lines.iter();
        for (idx, (elem, &line)) in self.elements.iter().zip(source_lines).enumerate() {
            for &node in &elem.nodes {
                if node > n_nodes {
                    return Err(MeshError::Parse {
                        line,
                        message: format!(
                            "element {} references node id {} beyond node count {}",
                            idx + 1,
                            node,
                            n_nodes
                        ),
                    });
                }
            }
        }

        let max_dim = self.max_dim.unwrap_or(0);
        let min_dim = self.min_dim.unwrap_or(0);
        let n_bulk = match max_dim {
            1 => self.n_lines,
            2 => self.n_surfaces,
            3 => self.n_volumes,
            _ => 0,
        };

        let mut groups = PhysicalGroupRegistry::new();

        if self.declared.is_empty() {
            // No $PhysicalNames block. One group per unique (dim, id) pair at
            // the bulk dimension, named by the stringified id.
            let max_pair_id = self.unique_pairs.iter().map(|p| p.1).max().unwrap_or(0);
            let bulk_ids: Vec<usize> = self
                .unique_pairs
                .iter()
                .filter(|p| p.0 == max_dim)
                .map(|p| p.1)
                .collect();
            let mut members: Vec<Vec<usize>> = vec![Vec::new(); bulk_ids.len()];
            let mut bulkconn = Vec::with_capacity(n_bulk);
            for (idx, elem) in self.elements.iter().enumerate() {
                if elem.dim() == max_dim {
                    let id = idx + 1;
                    bulkconn.push(id);
                    for (j, &pid) in bulk_ids.iter().enumerate() {
                        if elem.physical_id == pid {
                            members[j].push(id);
                            break;
                        }
                    }
                }
            }
            for (j, &pid) in bulk_ids.iter().enumerate() {
                groups.insert(PhysicalGroup {
                    id: pid,
                    name: pid.to_string(),
                    dim: max_dim,
                    nodes_per_elmt: self.nodes_per_dim(max_dim),
                    elmt_ids: std::mem::take(&mut members[j]),
                })?;
            }
            insert_alldomain(
                &mut groups,
                max_pair_id + 1,
                max_dim,
                self.nodes_per_dim(max_dim),
                bulkconn,
            )?;
        } else if self.declared.len() == 1 && self.unique_pairs.len() == 1 {
            // One declared group backed by one observed pair. The declared
            // name and alldomain alias the same bulk membership.
            let mut bulkconn = Vec::with_capacity(n_bulk);
            let mut max_id = 0usize;
            for (idx, elem) in self.elements.iter().enumerate() {
                if elem.dim() == max_dim {
                    bulkconn.push(idx + 1);
                    max_id = max_id.max(elem.physical_id);
                }
            }
            let decl = &self.declared[0];
            groups.insert(PhysicalGroup {
                id: decl.id,
                name: decl.name.clone(),
                dim: decl.dim,
                nodes_per_elmt: self.nodes_per_dim(decl.dim),
                elmt_ids: bulkconn.clone(),
            })?;
            insert_alldomain(
                &mut groups,
                max_id + 1,
                max_dim,
                self.nodes_per_dim(max_dim),
                bulkconn,
            )?;
        } else {
            // Two or more declared groups. Each element joins the first
            // declared group carrying its physical id.
            let mut members: Vec<Vec<usize>> = vec![Vec::new(); self.declared.len()];
            let mut bulkconn = Vec::with_capacity(n_bulk);
            for (idx, elem) in self.elements.iter().enumerate() {
                let id = idx + 1;
                for (j, decl) in self.declared.iter().enumerate() {
                    if elem.physical_id == decl.id {
                        members[j].push(id);
                        break;
                    }
                }
                if elem.dim() == max_dim {
                    bulkconn.push(id);
                }
            }
            for (j, decl) in self.declared.iter().enumerate() {
                groups.insert(PhysicalGroup {
                    id: decl.id,
                    name: decl.name.clone(),
                    dim: decl.dim,
                    nodes_per_elmt: self.nodes_per_dim(decl.dim),
                    elmt_ids: std::mem::take(&mut members[j]),
                })?;
            }
            insert_alldomain(
                &mut groups,
                self.max_elmt_phys + 1,
                max_dim,
                self.nodes_per_dim(max_dim),
                bulkconn,
            )?;
        }

        // Node sets. Every declared dim-0 group must be backed by point
        // elements, and there cannot be more declared sets than distinct
        // point physical ids.
        if self.declared_node_sets.len() > self.node_set_members.len() {
            return Err(MeshError::NodeSetCountExceeds {
                declared: self.declared_node_sets.len(),
                observed: self.node_set_members.len(),
            });
        }
        let mut node_sets = NodeSetRegistry::new();
        for (id, name) in &self.declared_node_sets {
            match self.node_set_members.get(id) {
                Some(list) => node_sets.insert(NodeSet {
                    id: *id,
                    name: name.clone(),
                    node_ids: list.clone(),
                })?,
                None => {
                    return Err(MeshError::UnmatchedNodeSet {
                        name: name.clone(),
                        id: *id,
                    })
                }
            }
        }
        if !node_sets.contains("alldomain") {
            let id = groups.id_of("alldomain").unwrap_or(self.max_elmt_phys + 1);
            node_sets.insert(NodeSet {
                id,
                name: "alldomain".to_string(),
                node_ids: (1..=self.coords.len()).collect(),
            })?;
        }

        if n_bulk == 0 {
            return Err(MeshError::NoBulkElements);
        }
        let bulk_kind = match self.bulk_kind {
            Some(kind) => kind,
            None => return Err(MeshError::NoBulkElements),
        };

        debug!(
            "imported mesh: {} nodes, {} elements ({} bulk), {} groups, {} node sets",
            self.coords.len(),
            self.elements.len(),
            n_bulk,
            groups.len(),
            node_sets.len()
        );

        Ok(Mesh {
            nodes: self.coords,
            elements: self.elements,
            extent: self.extent,
            n_bulk,
            n_lines: self.n_lines,
            n_surfaces: self.n_surfaces,
            min_dim,
            max_dim,
            order: self.order.max(1),
            bulk_kind,
            line_kind: self.line_kind,
            surface_kind: self.surface_kind,
            groups,
            node_sets,
        })
    }
}

/// Register the domain-wide group, unless the file already declared a group
/// under that name, in which case the declared membership stands.
fn insert_alldomain(
    groups: &mut PhysicalGroupRegistry,
    id: usize,
    dim: usize,
    nodes_per_elmt: usize,
    elmt_ids: Vec<usize>,
) -> Result<(), MeshError> {
    if groups.contains("alldomain") {
        return Ok(());
    }
    groups.insert(PhysicalGroup {
        id,
        name: "alldomain".to_string(),
        dim,
        nodes_per_elmt,
        elmt_ids,
    })
}

/// Pull the next line of a block, failing on end of stream.
fn content_line<I>(lines: &mut I, line_no: &mut usize) -> Result<String, MeshError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    match lines.next() {
        Some(line) => {
            *line_no += 1;
            Ok(line?)
        }
        None => Err(MeshError::Parse {
            line: *line_no,
            message: "unexpected end of file".to_string(),
        }),
    }
}

fn parse_token<T: std::str::FromStr>(token: &str, line: usize, what: &str) -> Result<T, MeshError> {
    token.parse().map_err(|_| MeshError::Parse {
        line,
        message: format!("invalid {} '{}'", what, token),
    })
}

/// `$MeshFormat`: version, file type, data size. Only ASCII v2 is accepted.
fn parse_format<I>(lines: &mut I, line_no: &mut usize) -> Result<(), MeshError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let line = content_line(lines, line_no)?;
    let token = line
        .split_whitespace()
        .next()
        .ok_or_else(|| MeshError::Parse {
            line: *line_no,
            message: "missing format version".to_string(),
        })?;
    let version: f64 = parse_token(token, *line_no, "format version")?;
    if version != 2.0 && version != 2.1 && version != 2.2 {
        return Err(MeshError::UnsupportedVersion(token.to_string()));
    }
    Ok(())
}

/// `$PhysicalNames`: count, then `dim id "name"` per record. Quoted names
/// may contain spaces. Dim-0 declarations double as node-set declarations.
fn parse_physical_names<I>(
    lines: &mut I,
    line_no: &mut usize,
    scan: &mut ScanState,
) -> Result<(), MeshError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    scan.declared.clear();
    scan.declared_node_sets.clear();

    let header = content_line(lines, line_no)?;
    let count: usize = parse_token(
        header.split_whitespace().next().unwrap_or(""),
        *line_no,
        "physical name count",
    )?;
    for _ in 0..count {
        let line = content_line(lines, line_no)?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 3 {
            return Err(MeshError::Parse {
                line: *line_no,
                message: "expected 'dim id \"name\"'".to_string(),
            });
        }
        let dim: usize = parse_token(parts[0], *line_no, "physical dimension")?;
        let id: usize = parse_token(parts[1], *line_no, "physical id")?;
        let name = parts[2..].join(" ").trim_matches('"').to_string();
        if name.is_empty() {
            return Err(MeshError::Parse {
                line: *line_no,
                message: "empty physical name".to_string(),
            });
        }
        scan.max_dim = Some(scan.max_dim.map_or(dim, |m| m.max(dim)));
        if dim == 0 {
            scan.declared_node_sets.push((id, name.clone()));
        }
        scan.declared.push(DeclaredGroup { dim, id, name });
    }
    debug!("declared {} physical names", count);
    Ok(())
}

/// `$Nodes`: count, then `id x y z` per record. Every id in `1..=count`
/// must appear exactly once; the coordinate extent grows as nodes stream
/// in.
fn parse_nodes<I>(lines: &mut I, line_no: &mut usize, scan: &mut ScanState) -> Result<(), MeshError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let header = content_line(lines, line_no)?;
    let count: usize = parse_token(
        header.split_whitespace().next().unwrap_or(""),
        *line_no,
        "node count",
    )?;
    let mut slots: Vec<Option<Vector3>> = vec![None; count];
    scan.extent = Extent3::empty();
    for _ in 0..count {
        let line = content_line(lines, line_no)?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 4 {
            return Err(MeshError::Parse {
                line: *line_no,
                message: "expected 'id x y z'".to_string(),
            });
        }
        let id: usize = parse_token(parts[0], *line_no, "node id")?;
        if id == 0 || id > count {
            return Err(MeshError::Parse {
                line: *line_no,
                message: format!("node id {} out of range 1..={}", id, count),
            });
        }
        let x: f64 = parse_token(parts[1], *line_no, "coordinate")?;
        let y: f64 = parse_token(parts[2], *line_no, "coordinate")?;
        let z: f64 = parse_token(parts[3], *line_no, "coordinate")?;
        let point = Vector3::new(x, y, z);
        slots[id - 1] = Some(point);
        scan.extent.include(point);
    }
    scan.coords = Vec::with_capacity(count);
    for (idx, slot) in slots.into_iter().enumerate() {
        match slot {
            Some(point) => scan.coords.push(point),
            None => {
                return Err(MeshError::Parse {
                    line: *line_no,
                    message: format!("node id {} never appeared in block", idx + 1),
                })
            }
        }
    }
    debug!("read {} nodes", count);
    Ok(())
}

/// `$Elements`: count, then `id type ntags physid geoid node...` per record.
///
/// A zero physical id falls back to the geometric entity id. Records carry
/// at least two tags; extras are ignored. Point elements accumulate their
/// single node under their physical id for node-set reconciliation.
fn parse_elements<I>(
    lines: &mut I,
    line_no: &mut usize,
    scan: &mut ScanState,
) -> Result<(), MeshError>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    let header = content_line(lines, line_no)?;
    let count: usize = parse_token(
        header.split_whitespace().next().unwrap_or(""),
        *line_no,
        "element count",
    )?;

    let mut slots: Vec<Option<(Element, usize)>> = vec![None; count];
    scan.n_lines = 0;
    scan.n_surfaces = 0;
    scan.n_volumes = 0;
    scan.order = 1;
    scan.node_set_members.clear();

    for _ in 0..count {
        let line = content_line(lines, line_no)?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 5 {
            return Err(MeshError::Parse {
                line: *line_no,
                message: "expected 'id type ntags physid geoid ...'".to_string(),
            });
        }
        let elmt_id: usize = parse_token(parts[0], *line_no, "element id")?;
        if elmt_id == 0 || elmt_id > count {
            return Err(MeshError::Parse {
                line: *line_no,
                message: format!("element id {} out of range 1..={}", elmt_id, count),
            });
        }
        let type_code: usize = parse_token(parts[1], *line_no, "element type")?;
        let ntags: usize = parse_token(parts[2], *line_no, "tag count")?;
        if ntags < 2 {
            return Err(MeshError::Parse {
                line: *line_no,
                message: format!("element {} needs at least 2 tags", elmt_id),
            });
        }
        let kind = ElementKind::from_gmsh(type_code).ok_or(MeshError::UnknownElementType {
            code: type_code,
            line: *line_no,
        })?;
        let phys: usize = parse_token(parts[3], *line_no, "physical id")?;
        let geo: usize = parse_token(parts[4], *line_no, "geometric id")?;
        let physical_id = if phys == 0 { geo } else { phys };

        let node_start = 3 + ntags;
        if parts.len() < node_start {
            return Err(MeshError::Parse {
                line: *line_no,
                message: format!("element {} is missing its declared tags", elmt_id),
            });
        }
        let found = parts.len() - node_start;
        if kind.dim() == 0 && found != 1 {
            return Err(MeshError::InvalidNodeSetElement { elmt_id, found });
        }
        if found != kind.node_count() {
            return Err(MeshError::Parse {
                line: *line_no,
                message: format!(
                    "element {} expects {} node ids for {}, found {}",
                    elmt_id,
                    kind.node_count(),
                    kind,
                    found
                ),
            });
        }
        let mut nodes = Vec::with_capacity(found);
        for token in &parts[node_start..] {
            let node: usize = parse_token(token, *line_no, "node id")?;
            if node == 0 {
                return Err(MeshError::Parse {
                    line: *line_no,
                    message: format!("element {} references node id 0", elmt_id),
                });
            }
            nodes.push(node);
        }

        scan.order = scan.order.max(kind.order());
        let dim = kind.dim();
        match dim {
            0 => {
                scan.node_set_members
                    .entry(physical_id)
                    .or_default()
                    .push(nodes[0]);
            }
            1 => {
                scan.n_lines += 1;
                scan.line_kind = Some(kind);
                scan.bulk_kind = Some(kind);
            }
            2 => {
                scan.n_surfaces += 1;
                scan.surface_kind = Some(kind);
                scan.bulk_kind = Some(kind);
                scan.line_kind = kind.boundary_kind();
            }
            _ => {
                scan.n_volumes += 1;
                scan.bulk_kind = Some(kind);
                scan.surface_kind = kind.boundary_kind();
            }
        }
        scan.max_dim = Some(scan.max_dim.map_or(dim, |m| m.max(dim)));
        scan.min_dim = Some(scan.min_dim.map_or(dim, |m| m.min(dim)));
        scan.max_elmt_phys = scan.max_elmt_phys.max(physical_id);

        if !scan.unique_pairs.contains(&(dim, physical_id)) {
            scan.unique_pairs.push((dim, physical_id));
        }

        slots[elmt_id - 1] = Some((Element::new(kind, physical_id, nodes), *line_no));
    }

    scan.elements = Vec::with_capacity(count);
    scan.elmt_source_lines = Vec::with_capacity(count);
    for (idx, slot) in slots.into_iter().enumerate() {
        match slot {
            Some((elem, line)) => {
                scan.elements.push(elem);
                scan.elmt_source_lines.push(line);
            }
            None => {
                return Err(MeshError::Parse {
                    line: *line_no,
                    message: format!("element id {} never appeared in block", idx + 1),
                })
            }
        }
    }
    debug!("read {} elements", count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn parse(content: &str) -> Result<Mesh, MeshError> {
        read_gmsh_from(Cursor::new(content.to_string()))
    }

    /// 2x2 quad4 unit square with the five canonical groups declared.
    const QUAD4_2X2: &str = r#"$MeshFormat
2.2 0 8
$EndMeshFormat
$PhysicalNames
5
1 1 "left"
1 2 "right"
1 3 "bottom"
1 4 "top"
2 5 "alldomain"
$EndPhysicalNames
$Nodes
9
1 0 0 0
2 0.5 0 0
3 1 0 0
4 0 0.5 0
5 0.5 0.5 0
6 1 0.5 0
7 0 1 0
8 0.5 1 0
9 1 1 0
$EndNodes
$Elements
12
1 1 2 1 1 4 1
2 1 2 1 1 7 4
3 1 2 2 2 3 6
4 1 2 2 2 6 9
5 1 2 3 3 1 2
6 1 2 3 3 2 3
7 1 2 4 4 8 7
8 1 2 4 4 9 8
9 3 2 5 6 1 2 5 4
10 3 2 5 6 2 3 6 5
11 3 2 5 6 4 5 8 7
12 3 2 5 6 5 6 9 8
$EndElements
"#;

    #[test]
    fn test_quad4_square_import() {
        let mesh = parse(QUAD4_2X2).unwrap();
        assert_eq!(mesh.n_nodes(), 9);
        assert_eq!(mesh.n_elements(), 12);
        assert_eq!(mesh.n_bulk_elements(), 4);
        assert_eq!(mesh.n_boundary_elements(), 8);
        assert_eq!(mesh.n_line_elements(), 8);
        assert_eq!(mesh.order(), 1);
        assert_eq!(mesh.max_dim(), 2);
        assert_eq!(mesh.min_dim(), 1);
        assert_eq!(mesh.bulk_kind(), ElementKind::Quad4);
        assert_eq!(mesh.line_kind(), Some(ElementKind::Edge2));
        assert_eq!(mesh.node(5), Vector3::new(0.5, 0.5, 0.0));
        assert_eq!(mesh.connectivity(9), &[1, 2, 5, 4]);
        assert_eq!(mesh.element_physical_id(1), 1);
    }

    #[test]
    fn test_declared_groups_collect_members() {
        let mesh = parse(QUAD4_2X2).unwrap();
        let groups = mesh.physical_groups();
        assert_eq!(groups.len(), 5);
        assert_eq!(groups.elements_of("left"), Some(&[1, 2][..]));
        assert_eq!(groups.elements_of("right"), Some(&[3, 4][..]));
        assert_eq!(groups.elements_of("bottom"), Some(&[5, 6][..]));
        assert_eq!(groups.elements_of("top"), Some(&[7, 8][..]));
        assert_eq!(groups.elements_of("alldomain"), Some(&[9, 10, 11, 12][..]));
        assert_eq!(groups.get("left").unwrap().nodes_per_elmt, 2);
        assert_eq!(groups.get("alldomain").unwrap().nodes_per_elmt, 4);
        assert_eq!(groups.get("alldomain").unwrap().id, 5);
    }

    #[test]
    fn test_alldomain_node_set_default() {
        let mesh = parse(QUAD4_2X2).unwrap();
        let all: Vec<usize> = (1..=9).collect();
        assert_eq!(mesh.set_nodes("alldomain"), Some(all.as_slice()));
    }

    #[test]
    fn test_version_gate() {
        for version in ["2.0", "2.1", "2.2"] {
            let content = format!("$MeshFormat\n{} 0 8\n$EndMeshFormat\n", version);
            let err = parse(&content).unwrap_err();
            // Accepted version, so the failure comes later for lack of
            // elements.
            assert!(matches!(err, MeshError::NoBulkElements), "{}", version);
        }
        for version in ["3.0", "4.1", "1.0"] {
            let content = format!("$MeshFormat\n{} 0 8\n$EndMeshFormat\n", version);
            let err = parse(&content).unwrap_err();
            assert!(
                matches!(err, MeshError::UnsupportedVersion(_)),
                "{}",
                version
            );
        }
    }

    #[test]
    fn test_zero_physical_id_uses_geometric_id() {
        let content = r#"$MeshFormat
2.2 0 8
$EndMeshFormat
$Nodes
4
1 0 0 0
2 1 0 0
3 1 1 0
4 0 1 0
$EndNodes
$Elements
1
1 3 2 0 7 1 2 3 4
$EndElements
"#;
        let mesh = parse(content).unwrap();
        assert_eq!(mesh.element_physical_id(1), 7);
        // Synthesized group named after the fallback id.
        assert_eq!(mesh.group_elements("7"), Some(&[1][..]));
    }

    #[test]
    fn test_no_declared_groups_synthesizes_alldomain() {
        let content = r#"$MeshFormat
2.2 0 8
$EndMeshFormat
$Nodes
6
1 0 0 0
2 1 0 0
3 2 0 0
4 0 1 0
5 1 1 0
6 2 1 0
$EndNodes
$Elements
2
1 3 2 1 1 1 2 5 4
2 3 2 1 1 2 3 6 5
$EndElements
"#;
        let mesh = parse(content).unwrap();
        let groups = mesh.physical_groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.elements_of("1"), Some(&[1, 2][..]));
        assert_eq!(groups.id_of("alldomain"), Some(2));
        assert_eq!(groups.elements_of("alldomain"), Some(&[1, 2][..]));
    }

    #[test]
    fn test_single_declared_group_aliases_alldomain() {
        let content = r#"$MeshFormat
2.2 0 8
$EndMeshFormat
$PhysicalNames
1
2 3 "matrix"
$EndPhysicalNames
$Nodes
4
1 0 0 0
2 1 0 0
3 1 1 0
4 0 1 0
$EndNodes
$Elements
1
1 3 2 3 1 1 2 3 4
$EndElements
"#;
        let mesh = parse(content).unwrap();
        let groups = mesh.physical_groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups.elements_of("matrix"), Some(&[1][..]));
        assert_eq!(groups.elements_of("alldomain"), Some(&[1][..]));
        assert_eq!(groups.id_of("alldomain"), Some(4));
    }

    #[test]
    fn test_node_sets_from_point_elements() {
        let content = r#"$MeshFormat
2.2 0 8
$EndMeshFormat
$PhysicalNames
3
0 7 "pin"
1 1 "edge"
2 2 "body"
$EndPhysicalNames
$Nodes
4
1 0 0 0
2 1 0 0
3 1 1 0
4 0 1 0
$EndNodes
$Elements
4
1 15 2 7 1 1
2 15 2 7 2 3
3 1 2 1 1 1 2
4 3 2 2 1 1 2 3 4
$EndElements
"#;
        let mesh = parse(content).unwrap();
        assert_eq!(mesh.set_nodes("pin"), Some(&[1, 3][..]));
        assert_eq!(mesh.node_sets().id_of("pin"), Some(7));
        // Point elements also join their declared group through the id scan.
        assert_eq!(mesh.group_elements("pin"), Some(&[1, 2][..]));
        assert_eq!(mesh.group_elements("edge"), Some(&[3][..]));
        assert_eq!(mesh.group_elements("body"), Some(&[4][..]));
        assert_eq!(
            mesh.physical_groups().get("pin").unwrap().nodes_per_elmt,
            1
        );
    }

    #[test]
    fn test_point_element_with_extra_nodes_rejected() {
        let content = r#"$MeshFormat
2.2 0 8
$EndMeshFormat
$Nodes
2
1 0 0 0
2 1 0 0
$EndNodes
$Elements
1
1 15 2 7 1 1 2
$EndElements
"#;
        let err = parse(content).unwrap_err();
        assert!(matches!(
            err,
            MeshError::InvalidNodeSetElement {
                elmt_id: 1,
                found: 2
            }
        ));
    }

    #[test]
    fn test_unmatched_node_set_rejected() {
        let content = r#"$MeshFormat
2.2 0 8
$EndMeshFormat
$PhysicalNames
2
0 9 "loose"
2 1 "body"
$EndPhysicalNames
$Nodes
4
1 0 0 0
2 1 0 0
3 1 1 0
4 0 1 0
$EndNodes
$Elements
2
1 15 2 4 1 2
2 3 2 1 1 1 2 3 4
$EndElements
"#;
        let err = parse(content).unwrap_err();
        match err {
            MeshError::UnmatchedNodeSet { name, id } => {
                assert_eq!(name, "loose");
                assert_eq!(id, 9);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_node_set_count_exceeds_rejected() {
        let content = r#"$MeshFormat
2.2 0 8
$EndMeshFormat
$PhysicalNames
3
0 7 "a"
0 8 "b"
2 1 "body"
$EndPhysicalNames
$Nodes
4
1 0 0 0
2 1 0 0
3 1 1 0
4 0 1 0
$EndNodes
$Elements
2
1 15 2 7 1 1
2 3 2 1 1 1 2 3 4
$EndElements
"#;
        let err = parse(content).unwrap_err();
        assert!(matches!(
            err,
            MeshError::NodeSetCountExceeds {
                declared: 2,
                observed: 1
            }
        ));
    }

    #[test]
    fn test_unknown_element_type_rejected() {
        let content = r#"$MeshFormat
2.2 0 8
$EndMeshFormat
$Nodes
6
1 0 0 0
2 1 0 0
3 1 1 0
4 0 1 0
5 0 0 1
6 1 0 1
$EndNodes
$Elements
1
1 6 2 1 1 1 2 3 4 5 6
$EndElements
"#;
        let err = parse(content).unwrap_err();
        assert!(matches!(err, MeshError::UnknownElementType { code: 6, .. }));
    }

    #[test]
    fn test_extra_tags_tolerated() {
        let content = r#"$MeshFormat
2.2 0 8
$EndMeshFormat
$Nodes
4
1 0 0 0
2 1 0 0
3 1 1 0
4 0 1 0
$EndNodes
$Elements
1
1 3 4 5 1 0 3 1 2 3 4
$EndElements
"#;
        let mesh = parse(content).unwrap();
        assert_eq!(mesh.element_physical_id(1), 5);
        assert_eq!(mesh.connectivity(1), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_malformed_node_line_reports_position() {
        let content = "$MeshFormat\n2.2 0 8\n$EndMeshFormat\n$Nodes\n1\n1 0 0\n$EndNodes\n";
        let err = parse(content).unwrap_err();
        match err {
            MeshError::Parse { line, .. } => assert_eq!(line, 6),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_node_id_rejected() {
        let content =
            "$MeshFormat\n2.2 0 8\n$EndMeshFormat\n$Nodes\n2\n1 0 0 0\n1 1 0 0\n$EndNodes\n";
        let err = parse(content).unwrap_err();
        match err {
            MeshError::Parse { message, .. } => {
                assert!(message.contains("node id 2"), "{}", message);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_connectivity_beyond_node_count_rejected() {
        let content = r#"$MeshFormat
2.2 0 8
$EndMeshFormat
$Nodes
4
1 0 0 0
2 1 0 0
3 1 1 0
4 0 1 0
$EndNodes
$Elements
1
1 3 2 1 1 1 2 9 4
$EndElements
"#;
        let err = parse(content).unwrap_err();
        match err {
            MeshError::Parse { line, message } => {
                assert_eq!(line, 13);
                assert!(message.contains("element 1"), "{}", message);
                assert!(message.contains("node id 9"), "{}", message);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_elements_block_before_nodes_block() {
        let content = r#"$MeshFormat
2.2 0 8
$EndMeshFormat
$Elements
1
1 3 2 1 1 1 2 3 4
$EndElements
$Nodes
4
1 0 0 0
2 1 0 0
3 1 1 0
4 0 1 0
$EndNodes
"#;
        let mesh = parse(content).unwrap();
        assert_eq!(mesh.n_nodes(), 4);
        assert_eq!(mesh.n_bulk_elements(), 1);
    }

    #[test]
    fn test_no_bulk_elements_rejected() {
        let content = r#"$MeshFormat
2.2 0 8
$EndMeshFormat
$Nodes
2
1 0 0 0
2 1 0 0
$EndNodes
$Elements
0
$EndElements
"#;
        let err = parse(content).unwrap_err();
        assert!(matches!(err, MeshError::NoBulkElements));
    }

    #[test]
    fn test_read_from_file_path() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(QUAD4_2X2.as_bytes()).unwrap();
        let mesh = read_gmsh_mesh(file.path()).unwrap();
        assert_eq!(mesh.n_nodes(), 9);
        assert_eq!(mesh.n_bulk_elements(), 4);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_gmsh_mesh(Path::new("/no/such/mesh.msh")).unwrap_err();
        assert!(matches!(err, MeshError::Io(_)));
    }

    #[test]
    fn test_extent_tracked() {
        let mesh = parse(QUAD4_2X2).unwrap();
        let extent = mesh.extent();
        assert_eq!(extent.min, Vector3::zeros());
        assert_eq!(extent.max, Vector3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_quadratic_import_sets_order() {
        let content = r#"$MeshFormat
2.2 0 8
$EndMeshFormat
$Nodes
9
1 0 0 0
2 1 0 0
3 1 1 0
4 0 1 0
5 0.5 0 0
6 1 0.5 0
7 0.5 1 0
8 0 0.5 0
9 0.5 0.5 0
$EndNodes
$Elements
1
1 10 2 1 1 1 2 3 4 5 6 7 8 9
$EndElements
"#;
        let mesh = parse(content).unwrap();
        assert_eq!(mesh.order(), 2);
        assert_eq!(mesh.bulk_kind(), ElementKind::Quad9);
        assert_eq!(mesh.line_kind(), Some(ElementKind::Edge3));
        assert_eq!(mesh.nodes_per_bulk_elmt(), 9);
    }

    #[test]
    fn test_names_with_spaces() {
        let content = r#"$MeshFormat
2.2 0 8
$EndMeshFormat
$PhysicalNames
2
2 1 "steel plate"
2 2 "aluminium insert"
$EndPhysicalNames
$Nodes
6
1 0 0 0
2 1 0 0
3 2 0 0
4 0 1 0
5 1 1 0
6 2 1 0
$EndNodes
$Elements
2
1 3 2 1 1 1 2 5 4
2 3 2 2 1 2 3 6 5
$EndElements
"#;
        let mesh = parse(content).unwrap();
        assert_eq!(mesh.group_elements("steel plate"), Some(&[1][..]));
        assert_eq!(mesh.group_elements("aluminium insert"), Some(&[2][..]));
    }

    #[test]
    fn test_id_collision_first_declaration_wins() {
        // Two declared groups sharing one physical id. Members land in the
        // group declared first.
        let content = r#"$MeshFormat
2.2 0 8
$EndMeshFormat
$PhysicalNames
2
2 1 "first"
2 1 "second"
$EndPhysicalNames
$Nodes
6
1 0 0 0
2 1 0 0
3 2 0 0
4 0 1 0
5 1 1 0
6 2 1 0
$EndNodes
$Elements
2
1 3 2 1 1 1 2 5 4
2 3 2 1 1 2 3 6 5
$EndElements
"#;
        let mesh = parse(content).unwrap();
        let groups = mesh.physical_groups();
        assert_eq!(groups.elements_of("first"), Some(&[1, 2][..]));
        assert_eq!(groups.elements_of("second"), Some(&[][..]));
        // Id lookups resolve to the first group registered under the id.
        assert_eq!(groups.name_of(1), Some("first"));
    }
}

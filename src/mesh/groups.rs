//! Physical group and node set registries.
//!
//! A physical group names a set of elements of one dimension; a node set
//! names a set of node ids. Both registries offer name and id lookup in both
//! directions and iterate in insertion order, so a mesh built twice from the
//! same input lists its groups identically.

use std::collections::HashMap;

use crate::mesh::MeshError;

/// A named, identified collection of element ids of one dimension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhysicalGroup {
    /// Positive id, not required to be contiguous or ordered
    pub id: usize,
    /// Unique name
    pub name: String,
    /// Topological dimension of member elements
    pub dim: usize,
    /// Expected connectivity length for member elements
    pub nodes_per_elmt: usize,
    /// Member element ids (1-based), in element-id scan order
    pub elmt_ids: Vec<usize>,
}

/// Registry of physical groups with bidirectional name/id lookup.
///
/// Names are unique; inserting a duplicate name fails. Ids may collide across
/// dimensions in imported meshes, in which case id lookup resolves to the
/// first inserted group with that id.
#[derive(Clone, Debug, Default)]
pub struct PhysicalGroupRegistry {
    groups: Vec<PhysicalGroup>,
    by_name: HashMap<String, usize>,
    by_id: HashMap<usize, usize>,
}

impl PhysicalGroupRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group, keeping insertion order.
    pub fn insert(&mut self, group: PhysicalGroup) -> Result<(), MeshError> {
        if self.by_name.contains_key(&group.name) {
            return Err(MeshError::DuplicateGroupName(group.name));
        }
        let index = self.groups.len();
        self.by_name.insert(group.name.clone(), index);
        self.by_id.entry(group.id).or_insert(index);
        self.groups.push(group);
        Ok(())
    }

    /// Number of registered groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True if no group is registered.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Look up a group by name.
    pub fn get(&self, name: &str) -> Option<&PhysicalGroup> {
        self.by_name.get(name).map(|&i| &self.groups[i])
    }

    /// Look up a group by id (first inserted wins on collisions).
    pub fn get_by_id(&self, id: usize) -> Option<&PhysicalGroup> {
        self.by_id.get(&id).map(|&i| &self.groups[i])
    }

    /// Id of the group with the given name.
    pub fn id_of(&self, name: &str) -> Option<usize> {
        self.get(name).map(|g| g.id)
    }

    /// Name of the group with the given id.
    pub fn name_of(&self, id: usize) -> Option<&str> {
        self.get_by_id(id).map(|g| g.name.as_str())
    }

    /// True if a group with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Member element ids of the named group.
    pub fn elements_of(&self, name: &str) -> Option<&[usize]> {
        self.get(name).map(|g| g.elmt_ids.as_slice())
    }

    /// Iterate groups in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PhysicalGroup> {
        self.groups.iter()
    }
}

/// A named, identified collection of node ids.
///
/// Member lists are kept sorted ascending and deduplicated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeSet {
    /// Positive id
    pub id: usize,
    /// Unique name
    pub name: String,
    /// Member node ids (1-based), sorted ascending, no duplicates
    pub node_ids: Vec<usize>,
}

/// Registry of node sets with bidirectional name/id lookup.
#[derive(Clone, Debug, Default)]
pub struct NodeSetRegistry {
    sets: Vec<NodeSet>,
    by_name: HashMap<String, usize>,
    by_id: HashMap<usize, usize>,
}

impl NodeSetRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node set, sorting and deduplicating its members.
    pub fn insert(&mut self, mut set: NodeSet) -> Result<(), MeshError> {
        if self.by_name.contains_key(&set.name) {
            return Err(MeshError::DuplicateNodeSetName(set.name));
        }
        set.node_ids.sort_unstable();
        set.node_ids.dedup();
        let index = self.sets.len();
        self.by_name.insert(set.name.clone(), index);
        self.by_id.entry(set.id).or_insert(index);
        self.sets.push(set);
        Ok(())
    }

    /// Number of registered node sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// True if no node set is registered.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Look up a node set by name.
    pub fn get(&self, name: &str) -> Option<&NodeSet> {
        self.by_name.get(name).map(|&i| &self.sets[i])
    }

    /// Look up a node set by id (first inserted wins on collisions).
    pub fn get_by_id(&self, id: usize) -> Option<&NodeSet> {
        self.by_id.get(&id).map(|&i| &self.sets[i])
    }

    /// Id of the node set with the given name.
    pub fn id_of(&self, name: &str) -> Option<usize> {
        self.get(name).map(|s| s.id)
    }

    /// Name of the node set with the given id.
    pub fn name_of(&self, id: usize) -> Option<&str> {
        self.get_by_id(id).map(|s| s.name.as_str())
    }

    /// True if a node set with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Member node ids of the named set.
    pub fn nodes_of(&self, name: &str) -> Option<&[usize]> {
        self.get(name).map(|s| s.node_ids.as_slice())
    }

    /// Iterate node sets in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeSet> {
        self.sets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(id: usize, name: &str, dim: usize) -> PhysicalGroup {
        PhysicalGroup {
            id,
            name: name.to_string(),
            dim,
            nodes_per_elmt: if dim == 1 { 2 } else { 4 },
            elmt_ids: vec![id * 10, id * 10 + 1],
        }
    }

    #[test]
    fn test_bidirectional_lookup() {
        let mut reg = PhysicalGroupRegistry::new();
        reg.insert(group(1, "left", 1)).unwrap();
        reg.insert(group(5, "alldomain", 2)).unwrap();

        assert_eq!(reg.len(), 2);
        assert_eq!(reg.id_of("left"), Some(1));
        assert_eq!(reg.name_of(5), Some("alldomain"));
        assert_eq!(reg.get("alldomain").unwrap().dim, 2);
        assert_eq!(reg.get_by_id(1).unwrap().name, "left");
        assert_eq!(reg.elements_of("left"), Some(&[10, 11][..]));
        assert!(reg.get("missing").is_none());
        assert!(reg.get_by_id(9).is_none());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut reg = PhysicalGroupRegistry::new();
        for (id, name) in [(4, "d"), (1, "a"), (3, "c")] {
            reg.insert(group(id, name, 1)).unwrap();
        }
        let names: Vec<&str> = reg.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["d", "a", "c"]);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut reg = PhysicalGroupRegistry::new();
        reg.insert(group(1, "left", 1)).unwrap();
        let err = reg.insert(group(2, "left", 1)).unwrap_err();
        assert!(matches!(err, MeshError::DuplicateGroupName(_)));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_id_collision_first_match() {
        let mut reg = PhysicalGroupRegistry::new();
        reg.insert(group(7, "boundary", 1)).unwrap();
        reg.insert(group(7, "domain", 2)).unwrap();
        assert_eq!(reg.name_of(7), Some("boundary"));
        assert_eq!(reg.get("domain").unwrap().id, 7);
    }

    #[test]
    fn test_node_set_sorted_dedup() {
        let mut reg = NodeSetRegistry::new();
        reg.insert(NodeSet {
            id: 1,
            name: "left".to_string(),
            node_ids: vec![7, 1, 4, 1, 7],
        })
        .unwrap();
        assert_eq!(reg.nodes_of("left"), Some(&[1, 4, 7][..]));
    }

    #[test]
    fn test_node_set_lookup() {
        let mut reg = NodeSetRegistry::new();
        reg.insert(NodeSet {
            id: 3,
            name: "bottom".to_string(),
            node_ids: vec![1, 2, 3],
        })
        .unwrap();
        assert_eq!(reg.id_of("bottom"), Some(3));
        assert_eq!(reg.name_of(3), Some("bottom"));
        assert!(reg.contains("bottom"));
        assert!(!reg.contains("top"));
        let err = reg
            .insert(NodeSet {
                id: 9,
                name: "bottom".to_string(),
                node_ids: vec![],
            })
            .unwrap_err();
        assert!(matches!(err, MeshError::DuplicateNodeSetName(_)));
    }
}

//! Read access to a loaded resource.

use super::node::ResourceNode;
use indexmap::IndexMap;

/// Path-based read access to a resource that has already been loaded.
///
/// Only [`PropertyReader::root`] must be implemented; the lookups are provided
/// on top of [`ResourceNode::at_path`].
pub trait PropertyReader: Send + Sync {
    /// The whole document.
    fn root(&self) -> &ResourceNode;

    /// The node at `path`, or [`ResourceNode::Absent`].
    fn get_node(&self, path: &str) -> &ResourceNode {
        self.root().at_path(path)
    }

    /// The raw value at `path`, if anything is stored there.
    fn get_object(&self, path: &str) -> Option<&ResourceNode> {
        Some(self.get_node(path)).filter(|node| !node.is_absent())
    }

    fn get_list(&self, path: &str) -> Option<&[ResourceNode]> {
        self.get_node(path).as_sequence()
    }

    fn get_mapping(&self, path: &str) -> Option<&IndexMap<String, ResourceNode>> {
        self.get_node(path).as_mapping()
    }

    fn contains(&self, path: &str) -> bool {
        !self.get_node(path).is_absent()
    }

    /// Paths of every leaf value in the resource.
    fn leaf_paths(&self) -> Vec<String> {
        self.root().leaf_paths()
    }
}

/// A [`PropertyReader`] over an owned node tree.
#[derive(Debug, Clone, Default)]
pub struct NodeReader {
    root: ResourceNode,
}

impl NodeReader {
    pub fn new(root: ResourceNode) -> Self {
        Self { root }
    }
}

impl PropertyReader for NodeReader {
    fn root(&self) -> &ResourceNode {
        &self.root
    }
}

impl From<serde_json::Value> for NodeReader {
    fn from(value: serde_json::Value) -> Self {
        Self::new(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reader_lookups() {
        let reader = NodeReader::from(json!({
            "list": { "path": ["a", "b"] },
            "map": { "path": { "k": 1 } },
            "bool": { "path": { "test": true } }
        }));

        assert_eq!(reader.get_list("list.path").map(<[_]>::len), Some(2));
        assert!(reader.get_list("map.path").is_none());
        assert_eq!(reader.get_mapping("map.path").map(IndexMap::len), Some(1));
        assert_eq!(
            reader.get_object("bool.path.test"),
            Some(&ResourceNode::from(true))
        );
        assert!(reader.get_object("bool.path.wrong").is_none());
        assert!(reader.contains("map.path.k"));
        assert!(!reader.contains("map.path.x"));
    }
}

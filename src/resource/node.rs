//! # Resource Node Model
//!
//! The untyped tree every converter reads from and every export writes to.
//! A backend (see [`JsonResource`](super::JsonResource)) parses its document into a
//! [`ResourceNode`]; the rest of the crate never touches files.

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A raw leaf value as read from the resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(value) => write!(f, "{value}"),
            Scalar::Integer(value) => write!(f, "{value}"),
            Scalar::Float(value) => write!(f, "{value}"),
            Scalar::String(value) => f.write_str(value),
        }
    }
}

/// One unit of the semi-structured source tree.
///
/// Mapping keys are unique and keep the order in which the backend produced them,
/// so a value that is read and written back lands in the same place.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResourceNode {
    #[default]
    Absent,
    Scalar(Scalar),
    Sequence(Vec<ResourceNode>),
    Mapping(IndexMap<String, ResourceNode>),
}

static ABSENT: ResourceNode = ResourceNode::Absent;

impl ResourceNode {
    pub fn empty_mapping() -> Self {
        ResourceNode::Mapping(IndexMap::new())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, ResourceNode::Absent)
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            ResourceNode::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ResourceNode]> {
        match self {
            ResourceNode::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, ResourceNode>> {
        match self {
            ResourceNode::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the direct child stored under `key`, or [`ResourceNode::Absent`].
    pub fn child(&self, key: &str) -> &ResourceNode {
        self.as_mapping()
            .and_then(|entries| entries.get(key))
            .unwrap_or(&ABSENT)
    }

    /// Walks the mapping chain along a dot-separated `path`.
    ///
    /// A missing segment, or a segment that is not a mapping where one is needed,
    /// yields [`ResourceNode::Absent`]. The empty path addresses `self`.
    pub fn at_path(&self, path: &str) -> &ResourceNode {
        if path.is_empty() {
            return self;
        }
        path.split('.').fold(self, |node, segment| node.child(segment))
    }

    /// Stores `node` under `path`, creating intermediate mappings as needed.
    ///
    /// An intermediate value that is not a mapping is replaced. Inserting
    /// [`ResourceNode::Absent`] is a no-op so optional values disappear on export.
    pub fn insert_at(&mut self, path: &str, node: ResourceNode) {
        if node.is_absent() {
            return;
        }
        if path.is_empty() {
            *self = node;
            return;
        }

        let mut current = self;
        let mut segments = path.split('.').peekable();
        while let Some(segment) = segments.next() {
            if !matches!(current, ResourceNode::Mapping(_)) {
                *current = ResourceNode::empty_mapping();
            }
            let ResourceNode::Mapping(entries) = current else {
                unreachable!("replaced by a mapping above");
            };
            if segments.peek().is_none() {
                entries.insert(segment.to_owned(), node);
                return;
            }
            current = entries
                .entry(segment.to_owned())
                .or_insert_with(ResourceNode::empty_mapping);
        }
    }

    /// Collects the paths of every leaf (non-mapping) node, in document order.
    pub fn leaf_paths(&self) -> Vec<String> {
        fn walk(node: &ResourceNode, prefix: &str, out: &mut Vec<String>) {
            match node {
                ResourceNode::Mapping(entries) if !entries.is_empty() => {
                    for (key, child) in entries {
                        let path = if prefix.is_empty() {
                            key.clone()
                        } else {
                            format!("{prefix}.{key}")
                        };
                        walk(child, &path, out);
                    }
                }
                ResourceNode::Absent => {}
                _ if !prefix.is_empty() => out.push(prefix.to_owned()),
                _ => {}
            }
        }

        let mut out = Vec::new();
        walk(self, "", &mut out);
        out
    }
}

impl From<bool> for ResourceNode {
    fn from(value: bool) -> Self {
        ResourceNode::Scalar(Scalar::Bool(value))
    }
}

impl From<i64> for ResourceNode {
    fn from(value: i64) -> Self {
        ResourceNode::Scalar(Scalar::Integer(value))
    }
}

impl From<f64> for ResourceNode {
    fn from(value: f64) -> Self {
        ResourceNode::Scalar(Scalar::Float(value))
    }
}

impl From<&str> for ResourceNode {
    fn from(value: &str) -> Self {
        ResourceNode::Scalar(Scalar::String(value.to_owned()))
    }
}

impl From<String> for ResourceNode {
    fn from(value: String) -> Self {
        ResourceNode::Scalar(Scalar::String(value))
    }
}

impl From<serde_json::Value> for ResourceNode {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => ResourceNode::Absent,
            Value::Bool(flag) => flag.into(),
            Value::Number(number) => match number.as_i64() {
                Some(integer) => integer.into(),
                // u64 beyond i64::MAX and every fractional number
                None => number.as_f64().map(ResourceNode::from).unwrap_or_default(),
            },
            Value::String(text) => text.into(),
            Value::Array(items) => {
                ResourceNode::Sequence(items.into_iter().map(ResourceNode::from).collect())
            }
            Value::Object(entries) => ResourceNode::Mapping(
                entries
                    .into_iter()
                    .map(|(key, child)| (key, ResourceNode::from(child)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for ResourceNode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ResourceNode::Absent => serializer.serialize_none(),
            ResourceNode::Scalar(scalar) => scalar.serialize(serializer),
            ResourceNode::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            ResourceNode::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, child) in entries {
                    map.serialize_entry(key, child)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ResourceNode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // `preserve_order` keeps the object key order through this detour
        serde_json::Value::deserialize(deserializer).map(ResourceNode::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ResourceNode {
        ResourceNode::from(json!({
            "title": { "text": "Hello", "size": 12 },
            "flags": [true, false],
            "ratio": 0.5,
            "nothing": null
        }))
    }

    #[test]
    fn test_at_path_walks_mappings() {
        let root = sample();
        assert_eq!(root.at_path("title.text"), &ResourceNode::from("Hello"));
        assert_eq!(root.at_path("title.size"), &ResourceNode::from(12i64));
        assert_eq!(root.at_path(""), &root);
    }

    #[test]
    fn test_at_path_yields_absent_for_missing_or_non_mapping() {
        let root = sample();
        assert!(root.at_path("title.missing").is_absent());
        assert!(root.at_path("ratio.deeper").is_absent());
        assert!(root.at_path("flags.0").is_absent());
        assert!(root.at_path("nothing").is_absent());
    }

    #[test]
    fn test_insert_at_creates_and_groups_parents() {
        let mut root = ResourceNode::Absent;
        root.insert_at("title.text", "Test".into());
        root.insert_at("subtitle.text", "hello world".into());
        root.insert_at("title.size", 12i64.into());
        root.insert_at("ignored", ResourceNode::Absent);

        let keys: Vec<_> = root.as_mapping().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["title", "subtitle"]);
        assert_eq!(root.leaf_paths(), vec!["title.text", "title.size", "subtitle.text"]);
    }

    #[test]
    fn test_insert_at_replaces_scalar_parent() {
        let mut root = ResourceNode::from(json!({ "title": "flat" }));
        root.insert_at("title.text", "nested".into());
        assert_eq!(root.at_path("title.text"), &ResourceNode::from("nested"));
    }

    #[test]
    fn test_json_conversion_preserves_order_and_kinds() {
        let root = sample();
        let keys: Vec<_> = root.as_mapping().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["title", "flags", "ratio", "nothing"]);
        assert_eq!(root.at_path("ratio"), &ResourceNode::from(0.5));

        let text = serde_json::to_string(&root.at_path("title")).unwrap();
        assert_eq!(text, r#"{"text":"Hello","size":12}"#);

        let parsed: ResourceNode = serde_json::from_str(&text).unwrap();
        assert_eq!(&parsed, root.at_path("title"));
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::Bool(false).to_string(), "false");
        assert_eq!(Scalar::Integer(1).to_string(), "1");
        assert_eq!(Scalar::Float(2.5).to_string(), "2.5");
        assert_eq!(Scalar::String("toast".into()).to_string(), "toast");
    }
}

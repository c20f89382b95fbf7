//! Folder manifest document types.

use serde::{Deserialize, Serialize};

/// Node type as recorded in the manifest (`"dir"` or `"file"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Dir,
    File,
}

/// One node of the manifest tree (`file-list.json`).
///
/// # Path Convention
///
/// - Root: empty string `""`
/// - Child of root: `"Class 1"`
/// - Nested: `"Class 1/EVS/chapter.pdf"`
/// - No leading or trailing slashes
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ManifestNode {
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Ordered children (directories only).
    #[serde(default)]
    pub children: Vec<ManifestNode>,
}

impl ManifestNode {
    /// Create a directory node.
    pub fn dir(name: &str, path: &str, children: Vec<ManifestNode>) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            kind: NodeKind::Dir,
            children,
        }
    }

    /// Create a file node.
    pub fn file(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            kind: NodeKind::File,
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_manifest_node() {
        let json = r#"{
            "name": "root", "path": "", "type": "dir",
            "children": [
                { "name": "A", "path": "A", "type": "dir", "children": [
                    { "name": "doc.pdf", "path": "A/doc.pdf", "type": "file" }
                ]}
            ]
        }"#;
        let root: ManifestNode = serde_json::from_str(json).unwrap();

        assert!(root.is_dir());
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].children[0].kind, NodeKind::File);
        assert!(root.children[0].children[0].children.is_empty());
    }

    #[test]
    fn test_missing_path_defaults_to_empty() {
        let node: ManifestNode =
            serde_json::from_str(r#"{ "name": "a.pdf", "type": "file" }"#).unwrap();
        assert_eq!(node.path, "");
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result = serde_json::from_str::<ManifestNode>(r#"{ "name": "x", "type": "link" }"#);
        assert!(result.is_err());
    }
}

//! In-memory manifest tree.
//!
//! The manifest is fetched once per session and never mutated afterwards.
//! Cloning a [`ManifestTree`] is cheap (the root is shared).

use std::sync::Arc;

use super::error::{ErrorKind, ManifestError};
use super::fetch::Fetch;
use super::path::{join_path, normalize_location, resolve_node, to_safe_reference};
use crate::models::{BrowseItem, ManifestNode};

/// Read-only folder tree built from `file-list.json`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestTree {
    root: Arc<ManifestNode>,
}

impl ManifestTree {
    /// Build a tree from a parsed root node.
    ///
    /// Recorded paths are normalized and missing paths are derived from the
    /// parent path and the node name.
    pub fn new(mut root: ManifestNode) -> Self {
        root.path = String::new();
        normalize_children(&mut root);
        Self {
            root: Arc::new(root),
        }
    }

    /// Parse a manifest document.
    pub fn parse(json: &str) -> Result<Self, ManifestError> {
        let root: ManifestNode =
            serde_json::from_str(json).map_err(|e| ManifestError::Malformed(e.to_string()))?;
        if !root.is_dir() {
            return Err(ManifestError::Malformed(
                "root node must be a directory".to_string(),
            ));
        }
        Ok(Self::new(root))
    }

    /// Fetch and parse the manifest at `url`.
    pub async fn load<F: Fetch>(fetcher: &F, url: &str) -> Result<Self, ManifestError> {
        let text = fetcher.get_text(url).await?;
        let tree = Self::parse(&text)?;
        log::info!(target: "manifest", "loaded {} ({} top-level entries)", url, tree.root.children.len());
        Ok(tree)
    }

    #[inline]
    pub fn root(&self) -> &ManifestNode {
        &self.root
    }

    /// Root title, `"Home"` when the manifest leaves it blank.
    pub fn title(&self) -> String {
        if self.root.name.trim().is_empty() {
            "Home".to_string()
        } else {
            self.root.name.clone()
        }
    }

    /// Look up a node by tree path.
    pub fn resolve(&self, path: &str) -> Option<&ManifestNode> {
        resolve_node(&self.root, path)
    }

    /// Browse items for the children of `node`, in manifest order.
    pub fn child_items(node: &ManifestNode) -> Vec<BrowseItem> {
        node.children
            .iter()
            .map(|child| BrowseItem {
                name: child.name.clone(),
                path: Some(child.path.clone()),
                is_dir: child.is_dir(),
                href: to_safe_reference(&child.path, child.is_dir()),
            })
            .collect()
    }
}

fn normalize_children(node: &mut ManifestNode) {
    let parent = node.path.clone();
    for child in &mut node.children {
        let recorded = normalize_location(&child.path).to_string();
        child.path = if recorded.is_empty() {
            join_path(&parent, &child.name)
        } else {
            recorded
        };
        normalize_children(child);
    }
}

/// Log a manifest failure at the level its kind deserves.
pub fn log_load_failure(url: &str, err: &ManifestError) {
    let kind = err.kind();
    if kind.is_expected() {
        log::info!(target: "manifest", "{} not present, falling back to server index", url);
    } else if kind == ErrorKind::Malformed {
        log::warn!(target: "manifest", "{} is malformed, falling back to server index: {}", url, err);
    } else {
        log::warn!(target: "manifest", "{} unreachable: {}", url, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::FetchError;
    use crate::core::fetch::testing::FakeFetcher;

    const SCENARIO: &str = r#"{"name":"root","path":"","type":"dir","children":[
        {"name":"A","path":"A","type":"dir","children":[
            {"name":"doc.pdf","path":"A/doc.pdf","type":"file"}]}]}"#;

    #[test]
    fn test_child_items() {
        let tree = ManifestTree::parse(SCENARIO).unwrap();
        let items = ManifestTree::child_items(tree.root());

        assert_eq!(
            items,
            vec![BrowseItem {
                name: "A".to_string(),
                path: Some("A".to_string()),
                is_dir: true,
                href: "./A/".to_string(),
            }]
        );

        let folder = tree.resolve("A").unwrap();
        let items = ManifestTree::child_items(folder);
        assert_eq!(items[0].href, "./A/doc.pdf");
        assert!(!items[0].is_dir);
    }

    #[test]
    fn test_child_items_keep_manifest_order() {
        let json = r#"{"name":"","type":"dir","children":[
            {"name":"z.pdf","path":"z.pdf","type":"file"},
            {"name":"m","path":"m","type":"dir"},
            {"name":"a.pdf","path":"a.pdf","type":"file"}]}"#;
        let tree = ManifestTree::parse(json).unwrap();
        let names: Vec<_> = ManifestTree::child_items(tree.root())
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, ["z.pdf", "m", "a.pdf"]);
        assert_eq!(tree.title(), "Home");
    }

    #[test]
    fn test_name_only_manifest_gets_paths() {
        let json = r#"{"name":"Books","type":"dir","children":[
            {"name":"Class 1","type":"dir","children":[
                {"name":"ch1.pdf","type":"file"}]}]}"#;
        let tree = ManifestTree::parse(json).unwrap();

        let file = tree.resolve("Class 1/ch1.pdf").unwrap();
        assert_eq!(file.path, "Class 1/ch1.pdf");
        assert_eq!(
            ManifestTree::child_items(tree.resolve("Class 1").unwrap())[0].href,
            "./Class%201/ch1.pdf"
        );
    }

    #[test]
    fn test_recorded_paths_normalized() {
        let json = r#"{"name":"r","path":"./","type":"dir","children":[
            {"name":"A","path":"./A/","type":"dir"}]}"#;
        let tree = ManifestTree::parse(json).unwrap();
        assert_eq!(tree.root().path, "");
        assert_eq!(tree.root().children[0].path, "A");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            ManifestTree::parse("{ not json"),
            Err(ManifestError::Malformed(_))
        ));
        assert!(matches!(
            ManifestTree::parse(r#"{"name":"x","type":"file"}"#),
            Err(ManifestError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_load_distinguishes_failures() {
        let fetcher = FakeFetcher::new()
            .with_text("./ok.json", SCENARIO)
            .with_text("./bad.json", "<html>")
            .with_error("./slow.json", FetchError::Timeout);

        assert!(ManifestTree::load(&fetcher, "./ok.json").await.is_ok());
        assert_eq!(
            ManifestTree::load(&fetcher, "./missing.json").await,
            Err(ManifestError::Absent)
        );
        assert_eq!(
            ManifestTree::load(&fetcher, "./bad.json")
                .await
                .unwrap_err()
                .kind(),
            ErrorKind::Malformed
        );
        assert_eq!(
            ManifestTree::load(&fetcher, "./slow.json").await,
            Err(ManifestError::Unreachable(FetchError::Timeout))
        );
    }
}

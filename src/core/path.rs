//! Path and reference resolution.
//!
//! Tree paths are root-relative and slash-joined (`"Class 1/EVS"`), with no
//! leading or trailing slash. References are what the browser fetches or
//! opens: `./`-prefixed with every segment percent-encoded independently.

use crate::models::ManifestNode;

/// Current-directory marker that prefixes every reference.
pub const SELF_MARKER: &str = "./";

/// Turn a tree path into a safe relative reference.
///
/// Directories get a trailing `/`. The empty path maps to `./`.
pub fn to_safe_reference(path: &str, is_dir: bool) -> String {
    if path.is_empty() {
        return SELF_MARKER.to_string();
    }

    let encoded: Vec<_> = path.split('/').map(urlencoding::encode).collect();
    let mut reference = format!("{}{}", SELF_MARKER, encoded.join("/"));
    if is_dir && !reference.ends_with('/') {
        reference.push('/');
    }
    reference
}

/// Turn a reference produced by [`to_safe_reference`] back into a tree path.
///
/// Returns `None` if a segment does not decode to valid UTF-8.
pub fn from_safe_reference(reference: &str) -> Option<String> {
    let trimmed = normalize_location(reference);
    if trimmed.is_empty() {
        return Some(String::new());
    }

    trimmed
        .split('/')
        .map(|segment| urlencoding::decode(segment).ok().map(|s| s.into_owned()))
        .collect::<Option<Vec<_>>>()
        .map(|segments| segments.join("/"))
}

/// Strip a leading `./` (or `/`) and any trailing `/` from a location.
pub fn normalize_location(location: &str) -> &str {
    let trimmed = location.strip_prefix(SELF_MARKER).unwrap_or(location);
    trimmed.trim_start_matches('/').trim_end_matches('/')
}

/// Join a parent path and a child name using the tree path convention.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

// =============================================================================
// Node Resolution
// =============================================================================

/// How a path segment can match a child node.
///
/// Manifests in the wild record either bare names or fully qualified paths,
/// so both rules are tried in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchRule {
    /// `child.name == segment`
    Name,
    /// `child.path == path-so-far`
    RecordedPath,
}

impl MatchRule {
    pub const ALL: [MatchRule; 2] = [MatchRule::Name, MatchRule::RecordedPath];

    fn matches(self, child: &ManifestNode, segment: &str, accumulated: &str) -> bool {
        match self {
            Self::Name => child.name == segment,
            Self::RecordedPath => child.path == accumulated,
        }
    }
}

/// Find the node at `path`, or `None` as soon as a segment fails to match.
///
/// `""` and `"."` resolve to the root.
pub fn resolve_node<'a>(root: &'a ManifestNode, path: &str) -> Option<&'a ManifestNode> {
    if path.is_empty() || path == "." {
        return Some(root);
    }

    let mut current = root;
    let mut accumulated = String::new();

    for segment in path.split('/').filter(|s| !s.is_empty()) {
        accumulated = join_path(&accumulated, segment);
        current = current.children.iter().find(|child| {
            MatchRule::ALL
                .iter()
                .any(|rule| rule.matches(child, segment, &accumulated))
        })?;
    }

    Some(current)
}

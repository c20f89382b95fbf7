//! View-model types for the folder browser.

/// One row of the folder listing.
///
/// Built fresh on every render from either a manifest node or a parsed
/// directory index anchor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowseItem {
    /// Display name (no trailing slash)
    pub name: String,
    /// Manifest path. `None` for items parsed from a directory index.
    pub path: Option<String>,
    pub is_dir: bool,
    /// Encoded relative reference used for fetching or opening.
    pub href: String,
}

/// Where the browser currently is.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationState {
    /// Root-relative folder path, empty at root.
    pub current_path: String,
    /// Header label for the current folder.
    pub breadcrumb: String,
}

impl NavigationState {
    pub fn new(current_path: impl Into<String>, breadcrumb: impl Into<String>) -> Self {
        Self {
            current_path: current_path.into(),
            breadcrumb: breadcrumb.into(),
        }
    }

    /// Back control is shown iff this is true.
    #[inline]
    pub fn can_go_back(&self) -> bool {
        !self.current_path.is_empty()
    }

    /// Parent folder path (drops the last segment).
    pub fn parent_path(&self) -> String {
        match self.current_path.trim_end_matches('/').rsplit_once('/') {
            Some((parent, _)) => parent.to_string(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_path() {
        assert_eq!(NavigationState::new("", "Home").parent_path(), "");
        assert_eq!(NavigationState::new("A", "A").parent_path(), "");
        assert_eq!(NavigationState::new("A/B/C", "A/B/C").parent_path(), "A/B");
    }

    #[test]
    fn test_can_go_back() {
        assert!(!NavigationState::default().can_go_back());
        assert!(NavigationState::new("Class 1", "Class 1").can_go_back());
    }
}

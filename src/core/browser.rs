//! Folder navigation state machine.
//!
//! The browser prefers the manifest (`file-list.json`) and falls back to the
//! web server's own directory index pages when none is published.
//!
//! # Flow
//!
//! A navigation is split in three steps so no state is borrowed across an
//! await:
//!
//! 1. [`DirectoryBrowser::begin`] snapshots what the request needs and hands
//!    out a ticket.
//! 2. [`PendingNavigation::run`] does the I/O.
//! 3. [`DirectoryBrowser::commit`] applies the result, unless a newer
//!    navigation was started in the meantime (latest click wins).

use super::error::ListingError;
use super::fetch::Fetch;
use super::launcher::{LaunchParameters, build_launch_parameters};
use super::listing;
use super::manifest::{ManifestTree, log_load_failure};
use super::path::{from_safe_reference, normalize_location};
use crate::config::{INDEX_URL, MANIFEST_URL};
use crate::models::{BrowseItem, NavigationState};

/// Shown when neither a manifest nor a directory index is available.
pub const UNAVAILABLE_MESSAGE: &str =
    "No manifest and directory listing disabled. Put file-list.json or enable directory index.";

/// Where the browser is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BrowserState {
    /// Initialize has not completed yet.
    Loading,
    Root,
    InFolder(String),
    /// Terminal: nothing to browse.
    Unavailable,
}

/// A navigation request from the UI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    Initialize,
    /// Folder click.
    Descend(BrowseItem),
    /// Back click.
    Ascend,
}

/// URLs the browser reads from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrowserConfig {
    pub manifest_url: String,
    /// Server index for the root folder.
    pub index_url: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            manifest_url: MANIFEST_URL.to_string(),
            index_url: INDEX_URL.to_string(),
        }
    }
}

/// A folder ready to render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FolderView {
    pub nav: NavigationState,
    pub items: Vec<BrowseItem>,
}

/// What a finished navigation produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Initialize succeeded, with or without a manifest.
    Ready {
        manifest: Option<ManifestTree>,
        view: FolderView,
    },
    Show(FolderView),
    /// Keep the position, replace the listing with a message.
    Failed(String),
    Unavailable(String),
}

/// Completed navigation waiting to be committed.
#[derive(Clone, Debug)]
pub struct Resolved {
    ticket: u64,
    outcome: Outcome,
}

#[derive(Clone, Debug)]
enum Target {
    Initialize,
    Manifest { tree: ManifestTree, path: String },
    Index { location: String },
}

/// Snapshot of a navigation in flight. Owns everything it needs.
#[derive(Clone, Debug)]
pub struct PendingNavigation {
    ticket: u64,
    target: Target,
    config: BrowserConfig,
}

impl PendingNavigation {
    /// Perform the fetches for this navigation.
    pub async fn run<F: Fetch>(self, fetcher: &F) -> Resolved {
        let outcome = match self.target {
            Target::Initialize => initialize(fetcher, &self.config).await,
            Target::Manifest { tree, path } => manifest_view(&tree, &path),
            Target::Index { location } => match index_view(fetcher, &location, &self.config).await {
                Ok(view) => Outcome::Show(view),
                Err(err) => {
                    log::warn!(target: "browser", "fetch of {} failed: {}", location, err);
                    Outcome::Failed(format!("Failed to fetch directory: {}", err))
                }
            },
        };
        Resolved {
            ticket: self.ticket,
            outcome,
        }
    }
}

async fn initialize<F: Fetch>(fetcher: &F, config: &BrowserConfig) -> Outcome {
    match ManifestTree::load(fetcher, &config.manifest_url).await {
        Ok(tree) => {
            let view = root_view(&tree);
            return Outcome::Ready {
                manifest: Some(tree),
                view,
            };
        }
        Err(err) => log_load_failure(&config.manifest_url, &err),
    }

    let fallback = index_view(fetcher, &config.index_url, config)
        .await
        .and_then(|view| {
            if view.items.is_empty() {
                Err(ListingError::Empty)
            } else {
                Ok(view)
            }
        });

    match fallback {
        Ok(view) => Outcome::Ready {
            manifest: None,
            view,
        },
        Err(err) => {
            log::warn!(target: "browser", "directory index unavailable: {}", err);
            Outcome::Unavailable(UNAVAILABLE_MESSAGE.to_string())
        }
    }
}

fn root_view(tree: &ManifestTree) -> FolderView {
    FolderView {
        nav: NavigationState::new("", tree.title()),
        items: ManifestTree::child_items(tree.root()),
    }
}

fn manifest_view(tree: &ManifestTree, path: &str) -> Outcome {
    match tree.resolve(path) {
        Some(node) if node.path.is_empty() => Outcome::Show(root_view(tree)),
        Some(node) if node.is_dir() => Outcome::Show(FolderView {
            nav: NavigationState::new(node.path.clone(), node.path.clone()),
            items: ManifestTree::child_items(node),
        }),
        Some(_) => Outcome::Failed(format!("Not a folder: {}", path)),
        None => {
            log::warn!(target: "browser", "manifest node not found: {}", path);
            Outcome::Failed(format!("Folder not found in manifest: {}", path))
        }
    }
}

/// Fetch and parse the server index at `location`.
async fn index_view<F: Fetch>(
    fetcher: &F,
    location: &str,
    config: &BrowserConfig,
) -> Result<FolderView, ListingError> {
    let mut request = location.to_string();
    if !request.ends_with('/') {
        request.push('/');
    }

    let html = fetcher.get_text(&request).await?;
    let parsed = listing::parse(&html, &request);
    if let Some(err) = parsed.diagnostic {
        return Err(err);
    }

    let current = folder_path(config, &request);
    let breadcrumb = if current.is_empty() {
        "Index".to_string()
    } else {
        from_safe_reference(&current).unwrap_or_else(|| current.clone())
    };

    Ok(FolderView {
        nav: NavigationState::new(current, breadcrumb),
        items: parsed.items,
    })
}

/// Folder path for a fetched index location.
///
/// The root index maps to `""`. Root-absolute locations keep their leading
/// `/` so [`index_location`] can rebuild them.
fn folder_path(config: &BrowserConfig, request: &str) -> String {
    if request.trim_end_matches('/') == config.index_url.trim_end_matches('/') {
        return String::new();
    }
    if request.starts_with('/') {
        return request.trim_end_matches('/').to_string();
    }
    normalize_location(request).to_string()
}

/// Index page location for a folder path (`""` is the root index).
fn index_location(config: &BrowserConfig, path: &str) -> String {
    if path.is_empty() {
        config.index_url.clone()
    } else if path.starts_with('/') {
        format!("{}/", path)
    } else {
        format!("./{}/", path)
    }
}

// =============================================================================
// DirectoryBrowser
// =============================================================================

/// Stateful folder navigator.
///
/// Owns the session's manifest (read-only once loaded) and the navigation
/// position. Only [`commit`](Self::commit) mutates either.
#[derive(Clone, Debug)]
pub struct DirectoryBrowser {
    config: BrowserConfig,
    state: BrowserState,
    nav: NavigationState,
    manifest: Option<ManifestTree>,
    items: Vec<BrowseItem>,
    message: Option<String>,
    generation: u64,
}

impl DirectoryBrowser {
    pub fn new(config: BrowserConfig) -> Self {
        Self {
            config,
            state: BrowserState::Loading,
            nav: NavigationState::default(),
            manifest: None,
            items: Vec::new(),
            message: None,
            generation: 0,
        }
    }

    /// Start a navigation. Returns `None` when the request does not apply
    /// (Back at root, a file passed to Descend, or nothing to browse).
    pub fn begin(&mut self, request: Navigation) -> Option<PendingNavigation> {
        if self.state == BrowserState::Unavailable {
            log::debug!(target: "browser", "ignoring {:?}: browser unavailable", request);
            return None;
        }

        let target = match request {
            Navigation::Initialize => Target::Initialize,
            Navigation::Descend(item) => {
                if !item.is_dir {
                    return None;
                }
                match &self.manifest {
                    Some(tree) => Target::Manifest {
                        tree: tree.clone(),
                        path: item
                            .path
                            .clone()
                            .or_else(|| from_safe_reference(&item.href))
                            .unwrap_or_default(),
                    },
                    None => Target::Index {
                        location: item.href.clone(),
                    },
                }
            }
            Navigation::Ascend => {
                if !self.nav.can_go_back() {
                    return None;
                }
                let parent = self.nav.parent_path();
                match &self.manifest {
                    Some(tree) => Target::Manifest {
                        tree: tree.clone(),
                        path: parent,
                    },
                    None => Target::Index {
                        location: index_location(&self.config, &parent),
                    },
                }
            }
        };

        self.generation += 1;
        Some(PendingNavigation {
            ticket: self.generation,
            target,
            config: self.config.clone(),
        })
    }

    /// Apply a finished navigation. Returns `false` for stale results.
    pub fn commit(&mut self, resolved: Resolved) -> bool {
        if resolved.ticket != self.generation {
            log::debug!(
                target: "browser",
                "discarding navigation {} (latest is {})",
                resolved.ticket,
                self.generation
            );
            return false;
        }

        match resolved.outcome {
            Outcome::Ready { manifest, view } => {
                self.manifest = manifest;
                self.show(view);
            }
            Outcome::Show(view) => self.show(view),
            Outcome::Failed(message) => {
                self.items.clear();
                self.message = Some(message);
            }
            Outcome::Unavailable(message) => {
                self.state = BrowserState::Unavailable;
                self.nav = NavigationState::default();
                self.items.clear();
                self.message = Some(message);
            }
        }
        true
    }

    /// Begin, run and commit in one go.
    pub async fn navigate<F: Fetch>(&mut self, fetcher: &F, request: Navigation) -> bool {
        match self.begin(request) {
            Some(pending) => {
                let resolved = pending.run(fetcher).await;
                self.commit(resolved)
            }
            None => false,
        }
    }

    /// Launch parameters for a file. Navigation state is left untouched.
    pub fn select(
        &self,
        item: &BrowseItem,
        audio_base_override: Option<&str>,
    ) -> Option<LaunchParameters> {
        if item.is_dir {
            return None;
        }
        log::info!(target: "browser", "opening {} in viewer", item.href);
        Some(build_launch_parameters(item, audio_base_override))
    }

    fn show(&mut self, view: FolderView) {
        self.state = if view.nav.current_path.is_empty() {
            BrowserState::Root
        } else {
            BrowserState::InFolder(view.nav.current_path.clone())
        };
        self.nav = view.nav;
        self.items = view.items;
        self.message = None;
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    pub fn items(&self) -> &[BrowseItem] {
        &self.items
    }

    /// Message shown in place of the listing, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[cfg(test)]
    pub fn has_manifest(&self) -> bool {
        self.manifest.is_some()
    }

    /// Back control is shown iff this is true.
    pub fn can_go_back(&self) -> bool {
        self.state != BrowserState::Unavailable && self.nav.can_go_back()
    }
}

impl Default for DirectoryBrowser {
    fn default() -> Self {
        Self::new(BrowserConfig::default())
    }
}

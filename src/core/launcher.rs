//! Viewer launch parameters.
//!
//! The browser page opens the viewer in a new browsing context with a query
//! string `src=…&audioBase=…&title=…`. Both directions live here so the key
//! names stay in one place.

use crate::config::{DEFAULT_AUDIO_BASE, DEFAULT_VIEWER_TITLE};
use crate::models::BrowseItem;

const KEY_SOURCE: &str = "src";
const KEY_AUDIO_BASE: &str = "audioBase";
const KEY_TITLE: &str = "title";

/// Everything the viewer page needs to show a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchParameters {
    /// Document reference handed to the paging widget.
    pub source: String,
    /// Folder holding `audio-{page}.mp3` clips (no trailing slash).
    pub audio_base: String,
    pub title: String,
}

/// Build launch parameters for a selected file.
///
/// A blank override falls back to [`DEFAULT_AUDIO_BASE`].
pub fn build_launch_parameters(
    item: &BrowseItem,
    audio_base_override: Option<&str>,
) -> LaunchParameters {
    LaunchParameters {
        source: item.href.clone(),
        audio_base: resolve_audio_base(audio_base_override),
        title: item.name.clone(),
    }
}

fn resolve_audio_base(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_AUDIO_BASE)
        .to_string()
}

impl LaunchParameters {
    /// Serialize as a query string (without the leading `?`).
    pub fn to_query(&self) -> String {
        [
            (KEY_SOURCE, &self.source),
            (KEY_AUDIO_BASE, &self.audio_base),
            (KEY_TITLE, &self.title),
        ]
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
    }

    /// Full viewer URL for `page` (e.g. `viewer.html`).
    pub fn viewer_url(&self, page: &str) -> String {
        format!("{}?{}", page, self.to_query())
    }

    /// Parse a viewer query string. Returns `None` without a `src`.
    pub fn from_query(query: &str) -> Option<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut source = None;
        let mut audio_base = None;
        let mut title = None;

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let Some(value) = decode_component(value) else {
                continue;
            };
            match key {
                KEY_SOURCE => source = Some(value),
                KEY_AUDIO_BASE => audio_base = Some(value),
                KEY_TITLE => title = Some(value),
                _ => {}
            }
        }

        let source = source.filter(|s| !s.trim().is_empty())?;
        let audio_base = resolve_audio_base(audio_base.as_deref())
            .trim_end_matches('/')
            .to_string();
        let title = title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| title_from_source(&source));

        Some(Self {
            source,
            audio_base,
            title,
        })
    }
}

fn decode_component(value: &str) -> Option<String> {
    urlencoding::decode(&value.replace('+', " "))
        .ok()
        .map(|v| v.into_owned())
}

fn title_from_source(source: &str) -> String {
    source
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .and_then(|s| urlencoding::decode(s).ok())
        .map(|s| s.into_owned())
        .unwrap_or_else(|| DEFAULT_VIEWER_TITLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf_item() -> BrowseItem {
        BrowseItem {
            name: "ch 1.pdf".to_string(),
            path: Some("Class 1/ch 1.pdf".to_string()),
            is_dir: false,
            href: "./Class%201/ch%201.pdf".to_string(),
        }
    }

    #[test]
    fn test_build_defaults_audio_base() {
        let params = build_launch_parameters(&pdf_item(), None);
        assert_eq!(params.source, "./Class%201/ch%201.pdf");
        assert_eq!(params.audio_base, DEFAULT_AUDIO_BASE);
        assert_eq!(params.title, "ch 1.pdf");

        let params = build_launch_parameters(&pdf_item(), Some("   "));
        assert_eq!(params.audio_base, DEFAULT_AUDIO_BASE);
    }

    #[test]
    fn test_build_with_override() {
        let params = build_launch_parameters(&pdf_item(), Some(" ./audio/class1 "));
        assert_eq!(params.audio_base, "./audio/class1");
    }

    #[test]
    fn test_query_round_trip() {
        let params = build_launch_parameters(&pdf_item(), Some("./audio/c1"));
        let url = params.viewer_url("viewer.html");
        assert!(url.starts_with("viewer.html?src="));

        let query = url.split_once('?').unwrap().1;
        assert_eq!(LaunchParameters::from_query(query), Some(params));
    }

    #[test]
    fn test_from_query_defaults() {
        let params = LaunchParameters::from_query("?src=.%2FA%2Fmy%20doc.pdf").unwrap();
        assert_eq!(params.audio_base, "./audio");
        assert_eq!(params.title, "my doc.pdf");

        let params =
            LaunchParameters::from_query("src=book.pdf&audioBase=.%2Fclips%2F&title=My+Book")
                .unwrap();
        assert_eq!(params.audio_base, "./clips");
        assert_eq!(params.title, "My Book");
    }

    #[test]
    fn test_from_query_requires_source() {
        assert_eq!(LaunchParameters::from_query(""), None);
        assert_eq!(LaunchParameters::from_query("?title=x"), None);
        assert_eq!(LaunchParameters::from_query("?src="), None);
    }

    #[test]
    fn test_title_fallback() {
        assert_eq!(title_from_source("./dir/"), DEFAULT_VIEWER_TITLE);
    }
}

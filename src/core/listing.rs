//! Directory index fallback.
//!
//! When no manifest is published, the browser reads the web server's own
//! autoindex pages (nginx, Apache, lighttpd, `python -m http.server`). Only
//! anchors matter: every `<a href>` that points inside the folder becomes a
//! [`BrowseItem`]. The parser is lenient and never fails the caller.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::error::ListingError;
use crate::models::BrowseItem;

static ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<a\b([^>]*)>(.*?)</a\s*>").expect("valid anchor regex"));

static HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bhref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#).expect("valid href regex")
});

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("valid entity regex")
});

static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*:").expect("valid scheme regex"));

/// Result of parsing one index page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedListing {
    /// Entries in anchor order.
    pub items: Vec<BrowseItem>,
    /// Set when the document could not be read as HTML at all.
    pub diagnostic: Option<ListingError>,
}

/// Parse an autoindex HTML page fetched from `base` (e.g. `"./chapter1/"`).
pub fn parse(html: &str, base: &str) -> ParsedListing {
    if html.trim().is_empty() || !html.contains('<') {
        let err = ListingError::Malformed("document contains no markup".to_string());
        log::warn!(target: "listing", "{}: {}", base, err);
        return ParsedListing {
            items: Vec::new(),
            diagnostic: Some(err),
        };
    }

    let mut items: Vec<BrowseItem> = Vec::new();
    let mut last_named = false;
    for caps in ANCHOR.captures_iter(html) {
        let Some(raw_href) = extract_href(&caps[1]) else {
            continue;
        };
        let text = decode_entities(&TAG.replace_all(&caps[2], ""));
        let named = !text.trim().is_empty();
        let Some(item) = classify(&raw_href, text.trim(), base) else {
            log::debug!(target: "listing", "skipped anchor {:?}", raw_href);
            continue;
        };

        // Icon and name anchors for the same entry (Apache `IconsAreLinks`)
        match items.last_mut() {
            Some(prev) if prev.href == item.href => {
                if named && !last_named {
                    *prev = item;
                    last_named = true;
                }
            }
            _ => {
                items.push(item);
                last_named = named;
            }
        }
    }

    ParsedListing {
        items,
        diagnostic: None,
    }
}

fn extract_href(attrs: &str) -> Option<String> {
    let caps = HREF.captures(attrs)?;
    let value = caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3))?;
    Some(decode_entities(value.as_str()))
}

/// Build an item from one anchor, or `None` when it is not a folder entry.
fn classify(href: &str, text: &str, base: &str) -> Option<BrowseItem> {
    if is_navigation_link(href, text) {
        return None;
    }

    let is_dir = href.ends_with('/');
    let label = text.strip_suffix('/').unwrap_or(text);
    let label = if label.is_empty() {
        href.trim_end_matches('/').rsplit('/').next().unwrap_or_default()
    } else {
        label
    };
    let name = urlencoding::decode(label).ok()?.into_owned();
    if name.is_empty() {
        return None;
    }

    let href = if href.starts_with('/') {
        href.to_string()
    } else {
        format!("{}{}", base, href).replace("/./", "/")
    };

    Some(BrowseItem {
        name,
        path: None,
        is_dir,
        href,
    })
}

/// Parent links, external links, sort links and fragments.
fn is_navigation_link(href: &str, text: &str) -> bool {
    href.is_empty()
        || matches!(href, "../" | ".." | "./" | ".")
        || href.starts_with('?')
        || href.starts_with('#')
        || href.starts_with("//")
        || SCHEME.is_match(href)
        || text.eq_ignore_ascii_case("parent directory")
}

fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .map(|hex| u32::from_str_radix(hex, 16))
                    .or_else(|| entity.strip_prefix('#').map(|dec| dec.parse::<u32>()))
                    .and_then(Result::ok)
                    .and_then(char::from_u32),
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

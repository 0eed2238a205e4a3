//! Embedded video extraction.
//!
//! Collects the sources of `<iframe>`, `<embed>` and `<object>` elements
//! hosted by a known video provider.

use std::collections::HashSet;

use dom_query::{Document, Selection};

use crate::dom;
use crate::patterns::VIDEO_PROVIDERS;
use crate::url_utils;

/// Video URLs in document order, without duplicates.
#[must_use]
pub fn extract_videos(doc: &Document, final_url: &str) -> Vec<String> {
    let mut movies = Vec::new();
    let mut seen = HashSet::new();

    for node in doc.select("iframe, embed, object").nodes() {
        let element = Selection::from(*node);
        let Some(src) = embed_source(&element) else {
            continue;
        };
        let Some(url) = url_utils::resolve(&src, final_url) else {
            continue;
        };
        if is_video_provider(&url) && seen.insert(url.clone()) {
            movies.push(url);
        }
    }

    movies
}

/// `src` of an iframe or embed; for an object, its `data`, its `movie`
/// parameter or its inner embed.
fn embed_source(element: &Selection) -> Option<String> {
    if !dom::is_tag(element, &["object"]) {
        return dom::non_empty_attribute(element, "src");
    }

    dom::non_empty_attribute(element, "data")
        .or_else(|| {
            element
                .select("param")
                .iter()
                .find(|param| {
                    dom::get_attribute(param, "name").is_some_and(|n| n.eq_ignore_ascii_case("movie"))
                })
                .and_then(|param| dom::non_empty_attribute(&param, "value"))
        })
        .or_else(|| {
            element
                .select("embed")
                .iter()
                .find_map(|embed| dom::non_empty_attribute(&embed, "src"))
        })
}

/// Host is a provider or one of its subdomains.
///
/// Facebook embeds count only when they are video plugins.
fn is_video_provider(url: &str) -> bool {
    let Some(parsed) = url_utils::parse_url(url) else {
        return false;
    };
    let Some(host) = parsed.host_str() else {
        return false;
    };
    let host = host.to_lowercase();

    VIDEO_PROVIDERS.iter().any(|provider| {
        let matches = host == *provider || host.ends_with(&format!(".{provider}"));
        if matches && *provider == "facebook.com" {
            return parsed.path().contains("video");
        }
        matches
    })
}

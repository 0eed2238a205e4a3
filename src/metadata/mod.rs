//! Metadata extraction module.
//!
//! Reads title, language, favicon, description, keywords, canonical link,
//! domain, tags and publication date from a parsed document. Every function
//! here is read-only on the DOM.

pub mod date;
pub mod dom_extraction;
pub mod meta_tags;

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use dom_query::Document;
use tracing::debug;

use crate::url_utils;
use crate::Options;

pub use date::find_publish_date;
pub use dom_extraction::{extract_tags, normalize_title, title_unmodified};
pub use meta_tags::{canonical_link, declared_language, parse_meta_date};

/// Language used when neither the document nor the detector yields one.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Everything the metadata stage learns about a page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMetadata {
    pub title: String,
    pub title_unmodified: String,
    pub description: String,
    pub keywords: String,
    /// Language handed to the scorer, ISO 639-1.
    pub language: String,
    pub favicon: String,
    pub canonical_link: String,
    pub domain: String,
    pub tags: BTreeSet<String>,
    pub publish_date: Option<DateTime<Utc>>,
}

/// Extract all metadata from a document.
///
/// Relative canonical links are resolved against `final_url`; the domain is
/// the host of the resulting canonical link.
#[must_use]
pub fn extract_metadata(doc: &Document, final_url: &str, opts: &Options) -> PageMetadata {
    let raw_title = title_unmodified(doc);
    let canonical = canonical_link(doc, final_url);
    let domain = url_utils::extract_hostname(&canonical).unwrap_or_default();

    let publish_date = if opts.extract_publish_date {
        meta_tags::meta_publish_date(doc).or_else(|| find_publish_date(&body_text(doc)))
    } else {
        None
    };

    let metadata = PageMetadata {
        title: normalize_title(&raw_title),
        title_unmodified: raw_title,
        description: meta_tags::meta_description(doc),
        keywords: meta_tags::meta_keywords(doc),
        language: resolve_language(doc, opts),
        favicon: meta_tags::favicon(doc),
        canonical_link: canonical,
        domain,
        tags: extract_tags(doc),
        publish_date,
    };

    if opts.debug {
        debug!(
            title = %metadata.title,
            language = %metadata.language,
            canonical = %metadata.canonical_link,
            tags = metadata.tags.len(),
            has_date = metadata.publish_date.is_some(),
            "metadata extracted"
        );
    }

    metadata
}

/// Pick the scoring language.
///
/// With `use_meta_language` off, `target_language` is used as given. Otherwise
/// the declared language wins when the stop-word service supports it, then the
/// detector's guess, then [`FALLBACK_LANGUAGE`].
#[must_use]
pub fn resolve_language(doc: &Document, opts: &Options) -> String {
    if !opts.use_meta_language {
        return opts.target_language.clone();
    }

    let declared = declared_language(doc);
    if !declared.is_empty() && opts.stop_words.supports(&declared) {
        return declared;
    }

    opts.stop_words
        .detect(&body_text(doc))
        .filter(|lang| !lang.is_empty())
        .unwrap_or_else(|| FALLBACK_LANGUAGE.to_string())
}

fn body_text(doc: &Document) -> String {
    let body = doc.select("body");
    if body.exists() {
        body.text().to_string()
    } else {
        doc.select("html").text().to_string()
    }
}

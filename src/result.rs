//! Result types for extraction output.
//!
//! This module defines the article record produced by the pipeline. The record
//! owns every string it carries; nothing in it points back into the DOM.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// An extracted article.
///
/// Fields that could not be determined stay empty (`""`, `None`, empty
/// collections). A missing field is never an error.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Article {
    /// Normalised headline (delimiter-stripped, trimmed).
    pub title: String,

    /// The literal `<title>` text, whitespace included.
    pub title_unmodified: String,

    /// Body text, paragraphs separated by blank lines.
    pub cleaned_text: String,

    /// `<meta name="description">` content.
    pub meta_description: String,

    /// `<meta name="keywords">` content.
    pub meta_keywords: String,

    /// Language used for scoring (ISO 639-1).
    pub meta_language: String,

    /// Favicon `href`.
    pub meta_favicon: String,

    /// Canonical URL, falling back to `final_url`.
    pub canonical_link: String,

    /// URL the HTML was obtained from, after redirects.
    pub final_url: String,

    /// Host component of the canonical URL.
    pub domain: String,

    /// Hex digest identifying `final_url`.
    pub link_hash: String,

    /// Tag labels collected from tag/topic links.
    pub tags: BTreeSet<String>,

    /// Representative image URL.
    pub top_image: String,

    /// Embedded video URLs, unique, in document order.
    pub movies: Vec<String>,

    /// Absolute outbound links found in the article body, in document order.
    pub links: Vec<String>,

    /// Publication date, when one could be found.
    pub publish_date: Option<DateTime<Utc>>,

    /// The preprocessed HTML the DOM was built from.
    pub raw_html: String,

    /// Outer HTML of the article body subtree, captured after post-cleaning.
    pub top_node: Option<String>,

    /// Output of the configured additional data extractor.
    pub additional_data: BTreeMap<String, String>,

    /// Elapsed extraction time in nanoseconds.
    pub delta: u128,

    /// Non-fatal issues encountered during extraction.
    ///
    /// - Content extraction failed (metadata-only result)
    /// - Charset conversion failed (URL-only result)
    pub warnings: Vec<String>,
}

impl Article {
    /// Creates an empty record for `final_url`.
    #[must_use]
    pub fn new(final_url: &str) -> Self {
        Self {
            final_url: final_url.to_string(),
            ..Self::default()
        }
    }
}

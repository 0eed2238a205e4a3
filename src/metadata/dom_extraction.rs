//! DOM-based Metadata Extraction
//!
//! Title and tag extraction from document elements, used alongside the
//! meta-tag readers in [`super::meta_tags`].

use std::collections::BTreeSet;

use dom_query::{Document, Selection};

use crate::dom;
use crate::patterns::{PUBLICATION_NAMES, TAG_HREF_FRAGMENTS, TITLE_DELIMITERS};

use super::meta_tags;

/// Sentinel some pages leave behind from a failed entity decode.
const REPLACEMENT_ENTITY: &str = "&#65533;";

// ============================================================
// TITLE EXTRACTION
// ============================================================

/// Raw title: `<title>`, else `og:title`, else the first `post-title` or
/// `headline` element, else empty.
///
/// The `<title>` text is returned verbatim, surrounding whitespace included.
#[must_use]
pub fn title_unmodified(doc: &Document) -> String {
    let title_elem = doc.select("title").first();
    if title_elem.exists() {
        let title = dom::text_content(&title_elem);
        if !title.trim().is_empty() {
            return title.to_string();
        }
    }

    if let Some(og_title) = meta_tags::meta_property(doc, "og:title").filter(|t| !t.trim().is_empty()) {
        return og_title;
    }

    [".post-title", ".headline"]
        .iter()
        .map(|selector| doc.select(selector).first())
        .find(Selection::exists)
        .map(|heading| dom::text_content(&heading).trim().to_string())
        .unwrap_or_default()
}

/// Strip the site name from a raw title.
///
/// Splits on the first delimiter (in list order) the title contains. A
/// two-part title keeps its first part when the second looks like a
/// publication name; otherwise the longest part wins.
///
/// # Examples
///
/// ```
/// use article_extractor::metadata::normalize_title;
///
/// assert_eq!(normalize_title("   foobar this - is it | bla ¿ "), "foobar this - is it");
/// assert_eq!(normalize_title(" Plain headline "), "Plain headline");
/// ```
#[must_use]
pub fn normalize_title(raw: &str) -> String {
    let Some(delimiter) = TITLE_DELIMITERS.iter().find(|d| raw.contains(*d)) else {
        return clean_title(raw);
    };

    let parts: Vec<&str> = raw.split(delimiter).collect();

    if let [first, last] = parts.as_slice() {
        if looks_like_publication(last) {
            return clean_title(first);
        }
    }

    let longest = parts
        .iter()
        .copied()
        .fold("", |best, part| if part.trim().len() > best.trim().len() { part } else { best });
    clean_title(longest)
}

fn looks_like_publication(part: &str) -> bool {
    PUBLICATION_NAMES.iter().any(|name| part.contains(name)) || part.chars().count() < 20
}

fn clean_title(title: &str) -> String {
    title.replace(REPLACEMENT_ENTITY, "").trim().to_string()
}

// ============================================================
// TAG EXTRACTION
// ============================================================

/// Text of `a[rel=tag]` links and of links whose `href` points at a tag page.
#[must_use]
pub fn extract_tags(doc: &Document) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();

    for node in doc.select("a").nodes() {
        let link = Selection::from(*node);
        let is_rel_tag = dom::get_attribute(&link, "rel")
            .is_some_and(|rel| rel.split_whitespace().any(|r| r.eq_ignore_ascii_case("tag")));
        let is_tag_href = dom::get_attribute(&link, "href")
            .is_some_and(|href| TAG_HREF_FRAGMENTS.iter().any(|f| href.contains(f)));

        if is_rel_tag || is_tag_href {
            let text = dom::text_content(&link).trim().to_string();
            if !text.is_empty() {
                tags.insert(text);
            }
        }
    }

    tags
}

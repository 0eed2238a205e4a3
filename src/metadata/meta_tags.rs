//! HTML Meta Tag Extraction
//!
//! Reads metadata from `<meta>`, `<link>` and `<html>` attributes: description,
//! keywords, declared language, favicon, canonical link, Open Graph title, and
//! machine-readable publication dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use dom_query::{Document, Selection};

use crate::dom;
use crate::url_utils;

/// Content of the first `meta[name=…]` or `meta[itemprop=…]` equal to `key`
/// (case-insensitive), trimmed.
#[must_use]
pub fn meta_content(doc: &Document, key: &str) -> String {
    for node in doc.select("meta").nodes() {
        let meta = Selection::from(*node);
        let matches = ["name", "itemprop"].iter().any(|attr| {
            dom::get_attribute(&meta, attr).is_some_and(|v| v.trim().eq_ignore_ascii_case(key))
        });
        if matches {
            return dom::get_attribute(&meta, "content")
                .map(|c| c.trim().to_string())
                .unwrap_or_default();
        }
    }
    String::new()
}

/// Content of the first `meta[property=…]` equal to `property`.
#[must_use]
pub fn meta_property(doc: &Document, property: &str) -> Option<String> {
    doc.select("meta[property]")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .find(|meta| {
            dom::get_attribute(meta, "property").is_some_and(|p| p.eq_ignore_ascii_case(property))
        })
        .and_then(|meta| dom::get_attribute(&meta, "content"))
}

/// Every `meta[property=…]` content equal to `property`, in document order.
#[must_use]
pub fn meta_properties(doc: &Document, property: &str) -> Vec<String> {
    doc.select("meta[property]")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .filter(|meta| {
            dom::get_attribute(meta, "property").is_some_and(|p| p.eq_ignore_ascii_case(property))
        })
        .filter_map(|meta| dom::get_attribute(&meta, "content"))
        .collect()
}

/// `meta[name=description]` content.
#[must_use]
pub fn meta_description(doc: &Document) -> String {
    meta_content(doc, "description")
}

/// `meta[name=keywords]` content.
#[must_use]
pub fn meta_keywords(doc: &Document) -> String {
    meta_content(doc, "keywords")
}

/// `href` of the first `<link>` whose `rel` contains `icon`.
#[must_use]
pub fn favicon(doc: &Document) -> String {
    doc.select("link[rel]")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .find(|link| {
            dom::get_attribute(link, "rel").is_some_and(|rel| rel.to_lowercase().contains("icon"))
        })
        .and_then(|link| dom::get_attribute(&link, "href"))
        .unwrap_or_default()
}

/// Canonical URL: `link[rel=canonical]`, else `final_url`.
///
/// Relative canonical links are resolved against `final_url`.
#[must_use]
pub fn canonical_link(doc: &Document, final_url: &str) -> String {
    let declared = doc
        .select("link[rel]")
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .find(|link| {
            dom::get_attribute(link, "rel").is_some_and(|rel| rel.trim().eq_ignore_ascii_case("canonical"))
        })
        .and_then(|link| dom::non_empty_attribute(&link, "href"));

    match declared {
        Some(href) => url_utils::resolve(&href, final_url).unwrap_or(href),
        None => final_url.to_string(),
    }
}

/// Language declared by the document, reduced to its primary subtag.
///
/// Order: `<html lang>`, any other `lang` attribute on `<body>` or `<head>`,
/// then `meta[http-equiv=content-language]`.
#[must_use]
pub fn declared_language(doc: &Document) -> String {
    let from_attr = ["html", "body", "head"]
        .iter()
        .find_map(|tag| dom::non_empty_attribute(&doc.select(tag).first(), "lang"));

    let raw = from_attr.or_else(|| {
        doc.select("meta[http-equiv]")
            .nodes()
            .iter()
            .map(|node| Selection::from(*node))
            .find(|meta| {
                dom::get_attribute(meta, "http-equiv")
                    .is_some_and(|v| v.trim().eq_ignore_ascii_case("content-language"))
            })
            .and_then(|meta| dom::non_empty_attribute(&meta, "content"))
    });

    raw.map(|lang| primary_subtag(&lang)).unwrap_or_default()
}

/// `en-US` → `en`, `pt_BR` → `pt`.
fn primary_subtag(lang: &str) -> String {
    lang.split([',', '-', '_'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

/// Publication date from well-known meta tags and `<time datetime>`.
#[must_use]
pub fn meta_publish_date(doc: &Document) -> Option<DateTime<Utc>> {
    const DATE_KEYS: &[&str] = &[
        "article:published_time",
        "og:published_time",
        "article:published",
        "datepublished",
        "pubdate",
        "publishdate",
        "publish_date",
        "date",
        "dc.date",
        "dc.date.issued",
        "dcterms.created",
        "sailthru.date",
        "parsely-pub-date",
    ];

    for node in doc.select("meta").nodes() {
        let meta = Selection::from(*node);
        let key = dom::get_attribute(&meta, "property")
            .or_else(|| dom::get_attribute(&meta, "name"))
            .or_else(|| dom::get_attribute(&meta, "itemprop"))
            .unwrap_or_default()
            .to_lowercase();
        if !DATE_KEYS.contains(&key.as_str()) {
            continue;
        }
        if let Some(date) = dom::get_attribute(&meta, "content").and_then(|c| parse_meta_date(&c)) {
            return Some(date);
        }
    }

    doc.select("time[datetime]")
        .nodes()
        .iter()
        .find_map(|node| dom::get_attribute(&Selection::from(*node), "datetime").and_then(|d| parse_meta_date(&d)))
}

/// Parse the machine-readable date formats found in meta tags.
#[must_use]
pub fn parse_meta_date(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();

    // ISO 8601 with timezone
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    // ISO 8601 without timezone
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(date_str, fmt) {
            return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}

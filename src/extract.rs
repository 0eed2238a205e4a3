//! Extraction pipeline.
//!
//! Runs the passes in order over one mutable DOM: preprocess, metadata,
//! additional-data hook, cleaner, top-node search, post-clean, top image,
//! videos and output formatting.

use std::time::Instant;

use tracing::{debug, warn};
use xxhash_rust::xxh3::xxh3_64;

use crate::dom;
use crate::error::{Error, Result};
use crate::extractor;
use crate::formatter;
use crate::html_processing;
use crate::images;
use crate::metadata;
use crate::options::Options;
use crate::preprocess::{self, Prepared};
use crate::result::Article;
use crate::url_utils;
use crate::videos;

/// Warning recorded when no article body could be located.
pub const NO_CONTENT_WARNING: &str = "Content extraction failed - no main content found";

/// Hex digest identifying a URL.
#[must_use]
pub fn link_hash(url: &str) -> String {
    format!("{:016x}", xxh3_64(url.as_bytes()))
}

/// Extract an article from a raw body fetched from `final_url`.
pub(crate) fn extract_article(
    final_url: &str,
    raw: &[u8],
    charset: Option<&str>,
    options: &Options,
) -> Result<Article> {
    let start = Instant::now();
    let mut article = Article::new(final_url);
    article.link_hash = link_hash(final_url);

    let Prepared { document, html, charset } = match preprocess::prepare(raw, charset, options) {
        Ok(prepared) => prepared,
        Err(Error::DecodeError(reason)) => {
            warn!(url = final_url, %reason, "charset conversion failed, returning URL-only article");
            article.canonical_link = final_url.to_string();
            article.domain = url_utils::extract_hostname(final_url).unwrap_or_default();
            article.warnings.push(format!("Charset conversion failed: {reason}"));
            article.delta = start.elapsed().as_nanos();
            return Ok(article);
        }
        Err(e) => return Err(e),
    };
    article.raw_html = html;

    let meta = metadata::extract_metadata(&document, final_url, options);
    let lang = meta.language.clone();
    article.title = meta.title;
    article.title_unmodified = meta.title_unmodified;
    article.meta_description = meta.description;
    article.meta_keywords = meta.keywords;
    article.meta_language = meta.language;
    article.meta_favicon = meta.favicon;
    article.canonical_link = meta.canonical_link;
    article.domain = meta.domain;
    article.tags = meta.tags;
    article.publish_date = meta.publish_date;

    if let Some(extractor) = &options.additional_data_extractor {
        article.additional_data = extractor.extract(&document);
    }

    // Site hints match on class names the cleaner strips.
    let hinted = extractor::hints::hint_candidates(&document);
    html_processing::doc_cleaning(&document, options);

    match extractor::find_top_node(&document, &hinted, &lang, options) {
        Ok((top, scores)) => {
            let synthetic = extractor::pruning::post_clean(&top, &lang, options);
            article.top_node = Some(dom::outer_html(&top).to_string());
            article.top_image = images::top_image(&document, Some(&top), final_url);
            article.movies = videos::extract_videos(&document, final_url);

            let formatted = formatter::format_top_node(&top, &scores, &synthetic);
            article.cleaned_text = formatted.text;
            article.links = formatted.links;
        }
        Err(Error::NoContent) => {
            article.warnings.push(NO_CONTENT_WARNING.to_string());
            article.top_image = images::top_image(&document, None, final_url);
            article.movies = videos::extract_videos(&document, final_url);
        }
        Err(e) => return Err(e),
    }

    article.delta = start.elapsed().as_nanos();

    if options.debug {
        debug!(
            url = final_url,
            charset = %charset,
            language = %lang,
            text_chars = article.cleaned_text.len(),
            links = article.links.len(),
            movies = article.movies.len(),
            warnings = article.warnings.len(),
            elapsed_ns = %article.delta,
            "extraction finished"
        );
    }

    Ok(article)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAGRAPH: &str = "The city council voted on Tuesday to approve the new budget, which \
                             includes funding for schools, parks and the repair of old roads.";

    #[test]
    fn link_hash_is_stable_hex() {
        let hash = link_hash("https://example.com/a");
        assert_eq!(hash.len(), 16);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(hash, link_hash("https://example.com/a"));
        assert_ne!(hash, link_hash("https://example.com/b"));
    }

    #[test]
    fn empty_body_is_an_error() {
        let result = extract_article("https://example.com/", b"", None, &Options::default());
        assert!(matches!(result, Err(Error::EmptyBody)));
    }

    #[test]
    fn decode_failure_returns_url_only_article() {
        let result = extract_article(
            "https://www.example.com/story",
            b"<html><body><p>x</p></body></html>",
            Some("no-such-charset"),
            &Options::default(),
        );
        match result {
            Ok(article) => {
                assert!(article.cleaned_text.is_empty());
                assert_eq!(article.canonical_link, "https://www.example.com/story");
                assert_eq!(article.domain, "www.example.com");
                assert!(article.warnings.iter().any(|w| w.contains("Charset conversion failed")));
            }
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        }
    }

    #[test]
    fn missing_content_is_a_warning() {
        let result = extract_article(
            "https://example.com/",
            b"<html><head><title>Empty</title></head><body><nav>Home</nav></body></html>",
            None,
            &Options::default(),
        );
        match result {
            Ok(article) => {
                assert!(article.cleaned_text.is_empty());
                assert!(article.top_node.is_none());
                assert_eq!(article.warnings, vec![NO_CONTENT_WARNING.to_string()]);
                assert_eq!(article.title, "Empty");
            }
            Err(err) => panic!("expected Ok(_), got Err({err:?})"),
        }
    }

    #[test]
    fn article_fields_are_populated() {
        let html = format!(
            "<html><head><title>Budget approved | The Daily</title></head>\
             <body><div id=\"story\"><p>{PARAGRAPH}</p><p>{PARAGRAPH} Again.</p></div></body></html>"
        );
        let article = extract_article("https://example.com/news/1", html.as_bytes(), None, &Options::default()).unwrap();

        assert_eq!(article.title, "Budget approved");
        assert_eq!(article.meta_language, "en");
        assert_eq!(article.domain, "example.com");
        assert_eq!(article.link_hash, link_hash("https://example.com/news/1"));
        assert!(article.cleaned_text.contains(PARAGRAPH));
        assert!(article.top_node.as_deref().is_some_and(|html| html.contains("story")));
        assert!(article.warnings.is_empty());
    }

    #[test]
    fn additional_data_hook_runs() {
        use std::collections::BTreeMap;
        use std::sync::Arc;

        use crate::options::AdditionalDataExtractor;
        use dom_query::Document;

        struct Headline;
        impl AdditionalDataExtractor for Headline {
            fn extract(&self, doc: &Document) -> BTreeMap<String, String> {
                let mut data = BTreeMap::new();
                data.insert("h1".to_string(), doc.select("h1").text().trim().to_string());
                data
            }
        }

        let options = Options {
            additional_data_extractor: Some(Arc::new(Headline)),
            ..Options::default()
        };
        let html = format!("<html><body><h1>Big Headline</h1><div><p>{PARAGRAPH}</p></div></body></html>");
        let article = extract_article("https://example.com/", html.as_bytes(), None, &options).unwrap();
        assert_eq!(article.additional_data.get("h1").map(String::as_str), Some("Big Headline"));
    }
}

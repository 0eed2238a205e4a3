//! Site-hint fast path.
//!
//! Many publishers wrap the article body in a container with a well-known
//! class or attribute. When one of [`SITE_HINT_SELECTORS`] matches a
//! container that reads like prose, it is taken as the top node directly and
//! reduced to its prose paragraphs.
//!
//! The cleaner strips `class` from `<article>` and retags containers as
//! `<p>`, so the selectors are matched with [`hint_candidates`] on the
//! uncleaned document and the matches are judged after cleaning.

use std::collections::HashSet;

use dom_query::{Document, NodeRef, Selection};
use tracing::debug;

use crate::dom;
use crate::link_density::is_high_link_density;
use crate::options::Options;
use crate::patterns::{HINT_NAV_VOCABULARY, SENTENCE_END, SITE_HINT_SELECTORS};

const MIN_TEXT_CHARS: usize = 200;
const MIN_PARAGRAPHS: usize = 3;
const MIN_SENTENCES: usize = 3;
/// Sentences longer than this count towards the average length.
const SUBSTANTIAL_SENTENCE_CHARS: usize = 20;
const MIN_AVERAGE_SENTENCE_CHARS: f64 = 50.0;
const MAX_NAV_HITS: usize = 5;

/// Paragraphs kept from a hinted container need this many characters and words.
const PROSE_MIN_CHARS: usize = 25;
const PROSE_MIN_WORDS: usize = 5;

/// A node matched by one of the site-hint selectors.
#[derive(Clone, Copy)]
pub struct HintMatch<'a> {
    pub selector: &'static str,
    pub node: NodeRef<'a>,
}

/// Match the site-hint selectors against `doc`.
///
/// Ordered by selector, then document order. A node matched by several
/// selectors appears once, under the first.
pub fn hint_candidates(doc: &Document) -> Vec<HintMatch<'_>> {
    let mut seen = HashSet::new();
    let mut matches = Vec::new();

    for selector in SITE_HINT_SELECTORS {
        for node in doc.select(selector).nodes() {
            if seen.insert(node.id) {
                matches.push(HintMatch { selector, node: *node });
            }
        }
    }
    matches
}

/// Find a hinted article container and reduce it to its prose paragraphs.
///
/// Candidates are tried in order. Ones the cleaner detached from the
/// document are skipped. Returns `None` when no container qualifies.
pub fn find_hinted_container<'a>(candidates: &[HintMatch<'a>], opts: &Options) -> Option<Selection<'a>> {
    for candidate in candidates {
        if !is_attached(&candidate.node) {
            continue;
        }

        let container = Selection::from(candidate.node);
        if !is_article_container(&container) {
            continue;
        }

        let paragraphs = prose_paragraphs(&container);
        if paragraphs.is_empty() {
            continue;
        }

        if opts.debug {
            debug!(selector = candidate.selector, paragraphs = paragraphs.len(), "site hint matched");
        }
        container.set_html(paragraphs.concat());
        return Some(container);
    }
    None
}

fn is_attached(node: &NodeRef) -> bool {
    node.ancestors(None).iter().any(|ancestor| dom::node_tag(ancestor) == "html")
}

/// Whether a hinted container carries enough prose to skip scoring.
fn is_article_container(container: &Selection) -> bool {
    let text = dom::text_content(container);
    text.trim().chars().count() > MIN_TEXT_CHARS
        && container.select("p").length() >= MIN_PARAGRAPHS
        && !is_high_link_density(container)
        && has_good_content_signals(&text)
}

/// Sentence count and length look like an article, and site-chrome
/// vocabulary is rare.
fn has_good_content_signals(text: &str) -> bool {
    let sentences: Vec<&str> = SENTENCE_END
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if sentences.len() < MIN_SENTENCES {
        return false;
    }

    let substantial: Vec<usize> = sentences
        .iter()
        .map(|s| s.chars().count())
        .filter(|len| *len > SUBSTANTIAL_SENTENCE_CHARS)
        .collect();
    if substantial.is_empty() {
        return false;
    }
    let average = substantial.iter().sum::<usize>() as f64 / substantial.len() as f64;
    if average < MIN_AVERAGE_SENTENCE_CHARS {
        return false;
    }

    HINT_NAV_VOCABULARY.find_iter(text).count() < MAX_NAV_HITS
}

/// Outer HTML of the container's `<p>` descendants that read as prose.
fn prose_paragraphs(container: &Selection) -> Vec<String> {
    container
        .select("p")
        .iter()
        .filter(|p| {
            let text = dom::text_content(p);
            let text = text.trim();
            text.chars().count() >= PROSE_MIN_CHARS
                && dom::word_count(text) >= PROSE_MIN_WORDS
                && !is_high_link_density(p)
        })
        .map(|p| dom::outer_html(&p).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html_processing;

    const SENTENCE: &str = "Officials confirmed on Tuesday that the long awaited railway extension will finally open next year.";

    fn article_html(tag: &str, attrs: &str) -> String {
        format!(
            r#"<html><body>
                <{tag} {attrs}>
                    <p>{SENTENCE} {SENTENCE}</p>
                    <p>Short caption</p>
                    <p>{SENTENCE}</p>
                    <p>{SENTENCE} <a href="/more">Read more</a></p>
                </{tag}>
            </body></html>"#
        )
    }

    fn hinted(html: &str, clean: bool) -> Option<String> {
        let doc = Document::from(html);
        let options = Options::default();
        let candidates = hint_candidates(&doc);
        if clean {
            html_processing::doc_cleaning(&doc, &options);
        }
        find_hinted_container(&candidates, &options).map(|container| dom::inner_html(&container).to_string())
    }

    #[test]
    fn hinted_container_is_reduced_to_prose() {
        let inner = hinted(&article_html("div", "class=\"article-body\""), false).unwrap();

        assert_eq!(inner.matches("<p>").count(), 3);
        assert!(!inner.contains("Short caption"));
    }

    #[test]
    fn article_hints_survive_cleaning() {
        for attrs in ["role=\"main\"", "class=\"article-body\"", "itemprop=\"articleBody\""] {
            let inner = hinted(&article_html("article", attrs), true);
            let inner = inner.unwrap_or_else(|| panic!("no hinted container for <article {attrs}>"));

            assert_eq!(inner.matches("<p>").count(), 3, "for <article {attrs}>");
            assert!(!inner.contains("Short caption"));
        }
    }

    #[test]
    fn candidates_follow_selector_order_without_duplicates() {
        let doc = Document::from(
            r#"<html><body>
                <div id="a" class="post-content"></div>
                <article id="b" role="main" class="article-body"></article>
            </body></html>"#,
        );
        let ids: Vec<String> = hint_candidates(&doc)
            .iter()
            .filter_map(|candidate| dom::id(&Selection::from(candidate.node)))
            .collect();
        assert_eq!(ids, vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn removed_containers_are_skipped() {
        let html = format!(
            r#"<html><body><div style="display: none"><div class="article-body">
                <p>{SENTENCE} {SENTENCE}</p><p>{SENTENCE}</p><p>{SENTENCE}</p>
            </div></div></body></html>"#
        );
        assert!(hinted(&html, false).is_some());
        assert!(hinted(&html, true).is_none());
    }

    #[test]
    fn unknown_container_is_not_hinted() {
        assert!(hinted(&article_html("div", "class=\"wrapper\""), true).is_none());
    }

    #[test]
    fn thin_container_is_rejected() {
        let html = r#"<html><body><div class="post-content"><p>One.</p><p>Two.</p><p>Three.</p></div></body></html>"#;
        assert!(hinted(html, true).is_none());
    }

    #[test]
    fn navigation_vocabulary_rejects_container() {
        let text = format!("{SENTENCE} Home. News. Sports. Weather. Subscribe to our newsletter. {SENTENCE} {SENTENCE}");
        assert!(!has_good_content_signals(&text));
        let text = format!("{SENTENCE} {SENTENCE} {SENTENCE}");
        assert!(has_good_content_signals(&text));
    }
}

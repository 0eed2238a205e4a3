//! Output formatting.
//!
//! Turns the top node into plain text: drops negatively scored nodes,
//! harvests absolute links, unwraps inline markup, removes short children and
//! linearises the remaining text into blank-line separated paragraphs.

use std::collections::HashSet;

use dom_query::{NodeRef, Selection};

use crate::dom;
use crate::extractor::state::ScoreTable;
use crate::patterns::{HORIZONTAL_WHITESPACE, NAVIGATION_VOCABULARY, PUBLICATION_MARKERS};

/// Inline tags replaced by their text.
const INLINE_TAGS: &[&str] = &["em", "strong", "b", "i", "span", "h1", "h2", "h3", "h4"];

/// Parents that collapse to text once their only link has been unwrapped.
const TRIVIAL_TEXT_CONTAINERS: &[&str] = &["span", "em", "strong", "b", "i", "font", "u"];

/// Elements whose boundaries become paragraph breaks.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "pre", "td", "th", "tr", "li", "ul", "ol", "dl", "dt", "dd", "table",
    "blockquote", "section", "article", "main", "h5", "h6", "figure", "header",
];

/// Children with fewer words than this are removed.
const MIN_CHILD_WORDS: usize = 5;

/// Lines shorter than this are dropped.
const MIN_LINE_CHARS: usize = 3;

/// Formatter output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormattedText {
    /// Paragraphs separated by blank lines.
    pub text: String,
    /// Absolute links in document order, without duplicates.
    pub links: Vec<String>,
}

/// Format the top node.
///
/// `synthetic` paragraphs (from sibling ingestion) are placed before the
/// top node's own text.
pub fn format_top_node(top: &Selection, scores: &ScoreTable, synthetic: &[String]) -> FormattedText {
    remove_negative_scores(top, scores);
    let links = harvest_links(top);
    unwrap_inline(top);
    remove_short_children(top);

    let mut raw = String::new();
    for paragraph in synthetic {
        raw.push_str(paragraph);
        raw.push_str("\n\n");
    }
    if let Some(node) = top.nodes().first() {
        linearise(node, &mut raw);
    }

    FormattedText {
        text: normalize_text(&raw),
        links,
    }
}

fn remove_negative_scores(top: &Selection, scores: &ScoreTable) {
    for node in top.select("*").nodes() {
        if scores.score(node.id).is_some_and(|score| score < 1) {
            Selection::from(*node).remove();
        }
    }
}

/// Collect absolute `href`s and replace each text link with its text.
fn harvest_links(top: &Selection) -> Vec<String> {
    let top_id = top.nodes().first().map(|n| n.id);
    let mut links = Vec::new();
    let mut seen = HashSet::new();

    for node in top.select("a").nodes().to_vec() {
        let link = Selection::from(node);
        if dom::has_descendant(&link, "img") {
            continue;
        }

        if let Some(href) = dom::non_empty_attribute(&link, "href") {
            if (href.starts_with("http://") || href.starts_with("https://")) && seen.insert(href.clone()) {
                links.push(href);
            }
        }

        let parent = node.parent();
        dom::replace_with_text(&link);

        if let Some(parent) = parent.filter(|p| Some(p.id) != top_id) {
            let is_trivial = TRIVIAL_TEXT_CONTAINERS.contains(&dom::node_tag(&parent).as_str())
                && !parent.children().iter().any(NodeRef::is_element);
            if is_trivial {
                dom::replace_with_text(&Selection::from(parent));
            }
        }
    }

    links
}

fn unwrap_inline(top: &Selection) {
    // Reverse document order unwraps nested inline elements before their parents
    for node in top.select(&INLINE_TAGS.join(", ")).nodes().to_vec().into_iter().rev() {
        dom::replace_with_text(&Selection::from(node));
    }
}

fn remove_short_children(top: &Selection) {
    for child in top.children().iter() {
        let words = dom::word_count(&dom::text_content(&child));
        if words < MIN_CHILD_WORDS && !dom::has_descendant(&child, "object, em") {
            child.remove();
        }
    }
}

/// Append the text of `node` to `out`, with blank lines around blocks.
fn linearise(node: &NodeRef, out: &mut String) {
    for child in node.children() {
        if child.is_text() {
            out.push_str(&child.text().replace('\n', " "));
            continue;
        }
        if !child.is_element() {
            continue;
        }

        let tag = dom::node_tag(&child);
        if tag == "br" {
            out.push('\n');
        } else if BLOCK_TAGS.contains(&tag.as_str()) {
            out.push_str("\n\n");
            linearise(&child, out);
            out.push_str("\n\n");
        } else {
            linearise(&child, out);
        }
    }
}

/// Line-level cleanup of linearised text.
///
/// Collapses horizontal whitespace, trims lines, drops duplicate lines
/// (first occurrence wins), navigation vocabulary, any line carrying a
/// publication marker and lines under three characters, then folds blank
/// runs to a single blank line and trims the result. Idempotent.
///
/// # Examples
///
/// ```
/// use article_extractor::formatter::normalize_text;
///
/// let text = "First  paragraph.\n\n\n\nSubscribe\n\nFirst  paragraph.\n\nSecond one.";
/// assert_eq!(normalize_text(text), "First paragraph.\n\nSecond one.");
/// ```
#[must_use]
pub fn normalize_text(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for raw_line in text.split('\n') {
        let line = HORIZONTAL_WHITESPACE.replace_all(raw_line, " ").trim().to_string();

        if line.is_empty() {
            if lines.last().is_some_and(|last| !last.is_empty()) {
                lines.push(String::new());
            }
            continue;
        }

        if seen.contains(&line) || !keep_line(&line) {
            continue;
        }
        seen.insert(line.clone());
        lines.push(line);
    }

    lines.join("\n").trim().to_string()
}

fn keep_line(line: &str) -> bool {
    let length = line.chars().count();
    if length < MIN_LINE_CHARS {
        return false;
    }

    let lower = line.to_lowercase();
    if NAVIGATION_VOCABULARY.contains(lower.as_str()) {
        return false;
    }
    !PUBLICATION_MARKERS.iter().any(|m| lower.contains(m))
}

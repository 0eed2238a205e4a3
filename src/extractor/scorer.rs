//! General content scorer.
//!
//! Scores every `<p>`, `<pre>` and `<td>` candidate by stop-word density plus
//! a structural boost, then propagates the scores to parents (in full) and
//! grandparents (half). The best-scoring ancestor is the article body.

use std::collections::HashMap;

use dom_query::{Document, NodeId, NodeRef, Selection};
use tracing::debug;

use crate::dom;
use crate::error::{Error, Result};
use crate::link_density::is_high_link_density;
use crate::options::Options;
use crate::patterns::{ARTICLE_HINT_CLASS, NON_CONTENT_TAGS, NON_CONTENT_TOKENS};

use super::state::ScoreTable;

/// Tags the scorer reads text from.
pub const CANDIDATE_TAGS: &[&str] = &["p", "pre", "td"];

/// Candidates with less own text than this are ignored.
const MIN_CANDIDATE_CHARS: usize = 10;

/// Stop words a `<p>` needs to be boostable.
const BOOSTABLE_STOP_WORDS: usize = 5;

/// Candidate lists at or below this size get no bottom penalty.
const PENALTY_MIN_CANDIDATES: usize = 15;

/// Total penalty after which each further penalty is flattened to the cap.
const PENALTY_BUDGET: f64 = 40.0;
const PENALTY_CAP: f64 = -5.0;

/// A paragraph-like node that passed the candidate filters.
struct Candidate<'a> {
    node: NodeRef<'a>,
    stop_words: usize,
    base_score: i64,
}

/// Pick the article body by scoring candidates.
///
/// Returns the winning node together with the score table, which the
/// formatter uses to drop negatively scored descendants.
pub fn calculate_best_node<'a>(
    doc: &'a Document,
    lang: &str,
    opts: &Options,
) -> Result<(Selection<'a>, ScoreTable)> {
    let candidates = collect_candidates(doc, lang, opts);
    let total = candidates.len();
    let bottom_boundary = total as f64 * 0.25;

    let mut table = ScoreTable::new();
    let mut credited: HashMap<NodeId, NodeRef<'a>> = HashMap::new();
    let mut starting_boost = 1.0_f64;
    let mut negative_scoring = 0.0_f64;

    for (i, candidate) in candidates.iter().enumerate() {
        let mut boost = 0.0_f64;

        if is_boostable(candidate) {
            boost = 50.0 / starting_boost;
            starting_boost += 1.0;
        }

        let remaining = (total - i) as f64;
        if total > PENALTY_MIN_CANDIDATES && remaining <= bottom_boundary {
            let booster = bottom_boundary - remaining;
            let mut penalty = -booster.powi(2);
            if penalty.abs() + negative_scoring > PENALTY_BUDGET {
                penalty = PENALTY_CAP;
            }
            negative_scoring += penalty.abs();
            boost = penalty;
        }

        let score = candidate.base_score + boost as i64;
        for ancestor in propagate(&mut table, &candidate.node, score) {
            credited.entry(ancestor.id).or_insert(ancestor);
        }
    }

    let best = table.best().ok_or(Error::NoContent)?;
    let winner = credited
        .get(&best)
        .map(|node| Selection::from(*node))
        .ok_or(Error::NoContent)?;

    if opts.debug {
        debug!(
            candidates = total,
            credited = table.len(),
            tag = %dom::tag_name(&winner).unwrap_or_default(),
            score = table.score(best).unwrap_or_default(),
            "top node selected"
        );
    }

    Ok((winner, table))
}

/// Candidates in document order, with their unboosted scores.
fn collect_candidates<'a>(doc: &'a Document, lang: &str, opts: &Options) -> Vec<Candidate<'a>> {
    let selector = CANDIDATE_TAGS.join(", ");
    let mut candidates = Vec::new();

    for node in doc.select(&selector).nodes() {
        if has_non_content_ancestor(node) {
            continue;
        }

        let text = own_text(node);
        let trimmed = text.trim();
        if trimmed.chars().count() < MIN_CANDIDATE_CHARS {
            continue;
        }

        let stop_words = opts.stop_words.stats(lang, trimmed).stop_word_count;
        let base_score = stop_words as i64 + article_boost(node, trimmed);
        if base_score <= 2 || is_high_link_density(&Selection::from(*node)) {
            continue;
        }

        candidates.push(Candidate {
            node: *node,
            stop_words,
            base_score,
        });
    }

    candidates
}

fn is_boostable(candidate: &Candidate) -> bool {
    dom::node_tag(&candidate.node) == "p" && candidate.stop_words > BOOSTABLE_STOP_WORDS
}

/// Credit the parent with `score` and the grandparent with half of it.
///
/// Returns the credited ancestors.
fn propagate<'a>(table: &mut ScoreTable, node: &NodeRef<'a>, score: i64) -> Vec<NodeRef<'a>> {
    let mut credited = Vec::with_capacity(2);
    let Some(parent) = node.parent().filter(is_scorable_ancestor) else {
        return credited;
    };
    table.credit(parent.id, score);
    credited.push(parent);

    if let Some(grandparent) = parent.parent().filter(is_scorable_ancestor) {
        table.credit(grandparent.id, score / 2);
        credited.push(grandparent);
    }
    credited
}

/// Only elements inside `<html>` (body included) may become the top node.
fn is_scorable_ancestor(node: &NodeRef) -> bool {
    let tag = dom::node_tag(node);
    !tag.is_empty() && tag != "html" && tag != "head"
}

/// Text of `node` excluding text inside nested candidate tags.
///
/// A container the cleaner retagged as `<p>` thus does not score its
/// children's text a second time.
pub fn own_text(node: &NodeRef) -> String {
    let mut text = String::new();
    collect_own_text(node, &mut text);
    text
}

fn collect_own_text(node: &NodeRef, out: &mut String) {
    for child in node.children() {
        if child.is_text() {
            out.push_str(&child.text());
        } else if child.is_element() && !CANDIDATE_TAGS.contains(&dom::node_tag(&child).as_str()) {
            collect_own_text(&child, out);
        }
    }
}

/// Whether any ancestor below `<body>` is navigation, header, footer,
/// sidebar or ad chrome.
///
/// Page-level classes on `<body>` and `<html>` (`no-sidebar`, `has-header`)
/// describe the layout, not the candidate.
fn has_non_content_ancestor(node: &NodeRef) -> bool {
    for ancestor in node.ancestors(None) {
        if !ancestor.is_element() {
            continue;
        }
        let tag = dom::node_tag(&ancestor);
        if tag == "body" || tag == "html" {
            break;
        }
        if NON_CONTENT_TAGS.contains(&tag.as_str()) {
            return true;
        }
        let sel = Selection::from(ancestor);
        let flagged = [dom::class_name(&sel), dom::id(&sel)]
            .into_iter()
            .flatten()
            .any(|value| has_non_content_token(&value));
        if flagged {
            return true;
        }
    }
    false
}

fn has_non_content_token(value: &str) -> bool {
    value
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .any(|token| NON_CONTENT_TOKENS.contains(token.to_lowercase().as_str()))
}

/// Structural bonus from ancestors that look like article containers, plus
/// a bonus for long text.
fn article_boost(node: &NodeRef, text: &str) -> i64 {
    let mut boost = 0;

    for ancestor in node.ancestors(None) {
        let tag = dom::node_tag(&ancestor);
        if tag.is_empty() || tag == "body" || tag == "html" {
            break;
        }
        if tag == "article" || tag == "main" {
            boost += 15;
        }
        let sel = Selection::from(ancestor);
        let hinted = [dom::class_name(&sel), dom::id(&sel)]
            .into_iter()
            .flatten()
            .any(|value| ARTICLE_HINT_CLASS.is_match(&value));
        if hinted {
            boost += 10;
        }
    }

    let length = text.chars().count();
    if length > 100 {
        boost += 5;
    }
    if length > 200 {
        boost += 5;
    }
    boost
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::stopwords::{StopWords, WordStats};

    const PROSE: &str = "The council said on Monday that the new bridge would open to traffic \
                         in the spring, after years of delays that had frustrated residents.";

    /// Reports the same stop-word count for every text.
    struct FixedStopWords(usize);

    impl StopWords for FixedStopWords {
        fn stats(&self, _lang: &str, text: &str) -> WordStats {
            WordStats {
                word_count: text.split_whitespace().count(),
                stop_word_count: self.0,
            }
        }

        fn supports(&self, _lang: &str) -> bool {
            true
        }

        fn detect(&self, _text: &str) -> Option<String> {
            None
        }
    }

    /// Wraps each candidate in `<div id="c{i}">` and returns the divs' scores.
    fn wrapper_scores(stop_words: usize, candidates: &[String]) -> Vec<i64> {
        let body: String = candidates
            .iter()
            .enumerate()
            .map(|(i, candidate)| format!(r#"<div id="c{i}">{candidate}</div>"#))
            .collect();
        let doc = Document::from(format!("<html><body>{body}</body></html>").as_str());
        let options = Options {
            stop_words: Arc::new(FixedStopWords(stop_words)),
            ..Options::default()
        };
        let (_, table) = calculate_best_node(&doc, "en", &options).unwrap();

        (0..candidates.len())
            .map(|i| {
                let node = doc.select(&format!("#c{i}")).nodes()[0];
                table.score(node.id).unwrap()
            })
            .collect()
    }

    fn paragraphs(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("<p>candidate paragraph {i}</p>")).collect()
    }

    fn best_id(html: &str) -> Option<String> {
        let doc = Document::from(html);
        calculate_best_node(&doc, "en", &Options::default())
            .ok()
            .and_then(|(node, _)| dom::id(&node))
    }

    #[test]
    fn picks_container_of_prose_paragraphs() {
        let html = format!(
            r#"<html><body>
                <div id="menu-wrap"><p>Home News Sport Weather</p></div>
                <div id="story"><p>{PROSE}</p><p>{PROSE}</p><p>{PROSE}</p></div>
            </body></html>"#
        );
        assert_eq!(best_id(&html).as_deref(), Some("story"));
    }

    #[test]
    fn no_candidates_is_no_content() {
        let doc = Document::from("<html><body><p>short</p></body></html>");
        assert!(matches!(
            calculate_best_node(&doc, "en", &Options::default()),
            Err(Error::NoContent)
        ));
    }

    #[test]
    fn navigation_ancestors_are_skipped() {
        let html = format!(
            r#"<html><body>
                <nav><div id="in-nav"><p>{PROSE}</p><p>{PROSE}</p></div></nav>
                <div class="site-footer"><div id="in-footer"><p>{PROSE}</p></div></div>
                <div id="main-text"><p>{PROSE}</p></div>
            </body></html>"#
        );
        assert_eq!(best_id(&html).as_deref(), Some("main-text"));
    }

    #[test]
    fn link_heavy_paragraphs_are_not_candidates() {
        let html = r#"<html><body>
            <div id="links"><p><a href="/a">one link here</a> <a href="/b">two link here</a> and</p></div>
        </body></html>"#;
        assert_eq!(best_id(html), None);
    }

    #[test]
    fn own_text_skips_nested_candidates() {
        let doc = Document::from(
            r#"<div id="outer">lead text <span>more</span><p>nested text</p><table><tr><td>cell</td></tr></table></div>"#,
        );
        let node = doc.select("#outer").nodes()[0];
        let text = own_text(&node);
        assert!(text.contains("lead text"));
        assert!(text.contains("more"));
        assert!(!text.contains("nested"));
        assert!(!text.contains("cell"));
    }

    #[test]
    fn scores_propagate_to_parent_and_grandparent() {
        let html = format!(r#"<html><body><section id="gp"><div id="p"><p>{PROSE}</p></div></section></body></html>"#);
        let doc = Document::from(html.as_str());
        let (_, table) = calculate_best_node(&doc, "en", &Options::default()).unwrap();

        let parent = table.get(doc.select("#p").nodes()[0].id).unwrap();
        let grandparent = table.get(doc.select("#gp").nodes()[0].id).unwrap();
        assert_eq!(parent.nodes, 1);
        assert_eq!(grandparent.nodes, 1);
        assert_eq!(grandparent.score, parent.score / 2);
    }

    #[test]
    fn non_content_tokens_split_on_separators() {
        assert!(has_non_content_token("main-nav"));
        assert!(has_non_content_token("left_sidebar wide"));
        assert!(!has_non_content_token("navigator-story"));
        assert!(!has_non_content_token("article-body"));
    }

    #[test]
    fn body_layout_classes_do_not_hide_candidates() {
        let html = format!(
            r#"<html class="has-header"><body class="home page no-sidebar header-fixed">
                <div id="story"><p>{PROSE}</p><p>{PROSE}</p><p>{PROSE}</p></div>
            </body></html>"#
        );
        assert_eq!(best_id(&html).as_deref(), Some("story"));
    }

    #[test]
    fn boost_decays_over_boostable_paragraphs() {
        let candidates = [
            "<p>first boostable paragraph</p>".to_string(),
            "<pre>preformatted block text</pre>".to_string(),
            "<p>second boostable paragraph</p>".to_string(),
            "<p>third boostable paragraph</p>".to_string(),
        ];
        // 6 stop words, then +50, +50/2 and +50/3 for the paragraphs only.
        assert_eq!(wrapper_scores(6, &candidates), vec![56, 6, 31, 22]);
    }

    #[test]
    fn no_bottom_penalty_up_to_fifteen_candidates() {
        assert_eq!(wrapper_scores(3, &paragraphs(15)), vec![3_i64; 15]);
    }

    #[test]
    fn last_quarter_is_penalised_quadratically() {
        let scores = wrapper_scores(3, &paragraphs(20));
        assert_eq!(scores[..15], vec![3_i64; 15][..]);
        assert_eq!(scores[15..], [3, 2, -1, -6, -13]);
    }

    #[test]
    fn penalty_is_capped_once_budget_is_spent() {
        let scores = wrapper_scores(3, &paragraphs(40));
        assert_eq!(scores[..30], vec![3_i64; 30][..]);
        // Penalties 0, 1, 4, 9 and 16 spend 30 of the budget of 40; the next
        // would overrun it, so every later one is flattened to -5.
        assert_eq!(scores[30..], [3, 2, -1, -6, -13, -2, -2, -2, -2, -2]);
    }
}

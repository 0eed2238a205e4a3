//! Post-cleaning of the top node.
//!
//! Pulls prose from the top node's previous siblings into a list of
//! synthetic paragraphs, then prunes weak children of the top node.

use dom_query::Selection;
use tracing::debug;

use crate::dom;
use crate::link_density::is_high_link_density;
use crate::options::Options;

/// Baseline when the top node has no paragraphs, so no sibling qualifies.
const DEFAULT_BASELINE: f64 = 100_000.0;

/// Fraction of the baseline a sibling paragraph's stop words must exceed.
const SIBLING_THRESHOLD: f64 = 0.30;

/// Paragraphs shorter than this are dropped from non-paragraph children.
const MIN_PARAGRAPH_CHARS: usize = 25;

/// Expand and prune the top node.
///
/// Returns the synthetic paragraphs, in document order, to be placed before
/// the top node's own text.
pub fn post_clean(top: &Selection, lang: &str, opts: &Options) -> Vec<String> {
    let synthetic = sibling_paragraphs(top, lang, opts);
    let pruned = prune_children(top);

    if opts.debug {
        debug!(ingested = synthetic.len(), pruned, "top node post-cleaned");
    }
    synthetic
}

/// Mean stop-word count over the top node's paragraphs.
fn stop_word_baseline(top: &Selection, lang: &str, opts: &Options) -> f64 {
    let counts: Vec<usize> = top
        .select("p")
        .iter()
        .map(|p| opts.stop_words.stats(lang, &dom::text_content(&p)).stop_word_count)
        .collect();

    if counts.is_empty() {
        return DEFAULT_BASELINE;
    }
    counts.iter().sum::<usize>() as f64 / counts.len() as f64
}

/// Text of previous siblings worth keeping, farthest sibling first.
fn sibling_paragraphs(top: &Selection, lang: &str, opts: &Options) -> Vec<String> {
    let threshold = stop_word_baseline(top, lang, opts) * SIBLING_THRESHOLD;

    // Collected nearest first; each sibling's group is prepended
    let mut groups: Vec<Vec<String>> = Vec::new();
    let mut sibling = dom::previous_element_sibling(top);

    while let Some(current) = sibling {
        let mut group = Vec::new();

        if dom::is_tag(&current, &["p"]) {
            let text = dom::text_content(&current).trim().to_string();
            if !text.is_empty() {
                group.push(text);
            }
        } else {
            for p in current.select("p").iter() {
                let text = dom::text_content(&p).trim().to_string();
                if text.is_empty() {
                    continue;
                }
                let stop_words = opts.stop_words.stats(lang, &text).stop_word_count;
                if stop_words as f64 > threshold && !is_high_link_density(&p) {
                    group.push(text);
                }
            }
        }

        groups.push(group);
        sibling = dom::previous_element_sibling(&current);
    }

    groups.into_iter().rev().flatten().collect()
}

/// Remove link-heavy or paragraph-less children of the top node.
///
/// Returns the number of children removed.
fn prune_children(top: &Selection) -> usize {
    let mut removed = 0;

    for child in top.children().iter() {
        if dom::is_tag(&child, &["p"]) {
            continue;
        }

        if is_high_link_density(&child) {
            child.remove();
            removed += 1;
            continue;
        }

        for p in child.select("p").iter() {
            if dom::text_content(&p).trim().chars().count() < MIN_PARAGRAPH_CHARS {
                p.remove();
            }
        }

        if !child.select("p").exists() && !dom::is_tag(&child, &["td"]) {
            child.remove();
            removed += 1;
        }
    }

    removed
}

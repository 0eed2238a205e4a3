//! HTML Cleaning
//!
//! Removes template chrome from the document before scoring and rewrites
//! text-only containers into `<p>` elements, since the scorer only looks at
//! `<p>`, `<pre>` and `<td>` nodes.

use tracing::debug;

use crate::dom::{self, Document, NodeRef, Selection};
use crate::options::Options;
use crate::patterns::{BLOCK_CONTENT, HIDDEN_STYLE, REMOVE_NODES, TAB_NEWLINE};

/// Tags removed together with their content.
const TAGS_TO_CLEAN: &[&str] = &["script", "noscript", "style", "footer", "aside"];

/// Attributes checked against [`REMOVE_NODES`].
const REMOVE_NODES_ATTRIBUTES: &[&str] = &["id", "class", "name"];

/// Containers rewritten into paragraphs, in processing order.
const PARAGRAPH_CONTAINERS: &[&str] = &["div", "span", "article", "pre"];

/// Elements the cleaner never removes.
const PROTECTED_TAGS: &[&str] = &["html", "head", "body"];

// === Document Cleaning Functions ===

/// Clean the document in place.
///
/// Steps, in order: drop hidden elements, strip identifying attributes from
/// `<article>`, unwrap `<em>` and drop-cap spans, remove script/style/footer/
/// aside, remove nodes whose `id`/`class`/`name` matches [`REMOVE_NODES`],
/// unwrap spans inside paragraphs, then convert text containers to `<p>`.
pub fn doc_cleaning(doc: &Document, opts: &Options) {
    let hidden = remove_hidden_elements(doc);

    for node in doc.select("article").nodes() {
        let article = Selection::from(*node);
        for attr in ["id", "name", "class"] {
            article.remove_attr(attr);
        }
    }

    // Reverse document order so nested elements are unwrapped before their parents
    for node in doc.select("em").nodes().to_vec().into_iter().rev() {
        let em = Selection::from(node);
        if !dom::has_descendant(&em, "img") {
            dom::replace_with_text(&em);
        }
    }

    for node in doc.select("span[class]").nodes().to_vec().into_iter().rev() {
        let span = Selection::from(node);
        let is_drop_cap = dom::class_name(&span)
            .is_some_and(|class| class.contains("dropcap") || class.contains("drop_cap"));
        if is_drop_cap {
            dom::replace_with_text(&span);
        }
    }

    doc.select(&TAGS_TO_CLEAN.join(", ")).remove();

    let chrome = remove_chrome_nodes(doc);

    for node in doc.select("p span").nodes().to_vec().into_iter().rev() {
        let is_direct_child = node
            .parent()
            .is_some_and(|parent| dom::node_tag(&parent) == "p");
        if is_direct_child {
            dom::replace_with_text(&Selection::from(node));
        }
    }

    let (renamed, flattened) = convert_to_paragraphs(doc);

    if opts.debug {
        debug!(hidden, chrome, renamed, flattened, "document cleaned");
    }
}

/// Remove elements hidden by inline style, `hidden` or `aria-hidden="true"`.
///
/// Returns the number of elements removed.
fn remove_hidden_elements(doc: &Document) -> usize {
    let mut removed = 0;

    for node in doc.select("[style], [hidden], [aria-hidden]").nodes().to_vec() {
        let sel = Selection::from(node);
        if is_protected(&node) {
            continue;
        }

        let hidden_style = dom::get_attribute(&sel, "style").is_some_and(|s| HIDDEN_STYLE.is_match(&s));
        let aria_hidden = dom::get_attribute(&sel, "aria-hidden")
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"));

        if hidden_style || aria_hidden || sel.has_attr("hidden") {
            sel.remove();
            removed += 1;
        }
    }

    removed
}

/// Remove elements whose `id`, `class` or `name` marks them as chrome.
///
/// Returns the number of elements removed.
fn remove_chrome_nodes(doc: &Document) -> usize {
    let mut removed = 0;

    for attr in REMOVE_NODES_ATTRIBUTES {
        for node in doc.select(&format!("[{attr}]")).nodes().to_vec() {
            if is_protected(&node) {
                continue;
            }
            let sel = Selection::from(node);
            if dom::get_attribute(&sel, attr).is_some_and(|value| REMOVE_NODES.is_match(&value)) {
                sel.remove();
                removed += 1;
            }
        }
    }

    removed
}

fn is_protected(node: &NodeRef) -> bool {
    PROTECTED_TAGS.contains(&dom::node_tag(node).as_str())
}

/// Convert `div`/`span`/`article`/`pre` containers into paragraphs.
///
/// A container holding block markup is retagged as `<p>`. Otherwise its
/// direct text nodes are folded into one leading `<p>` child, with its
/// remaining element children kept after it.
///
/// Returns `(renamed, flattened)` counts.
fn convert_to_paragraphs(doc: &Document) -> (usize, usize) {
    let mut renamed = 0;
    let mut flattened = 0;

    for tag in PARAGRAPH_CONTAINERS {
        for node in doc.select(tag).nodes().to_vec() {
            let sel = Selection::from(node);
            if BLOCK_CONTENT.is_match(&dom::inner_html(&sel)) {
                dom::rename(&sel, "p");
                renamed += 1;
            } else if flatten_text_children(&sel, &node) {
                flattened += 1;
            }
        }
    }

    (renamed, flattened)
}

/// Fold the direct text children of `node` into a `<p>`.
///
/// Fragments are stripped of tabs and newlines; fragments of one character
/// or less are discarded. Returns whether a paragraph was built.
fn flatten_text_children(sel: &Selection, node: &NodeRef) -> bool {
    let mut fragments = Vec::new();
    let mut remaining = String::new();

    for child in node.children() {
        if child.is_text() {
            let text = TAB_NEWLINE.replace_all(&child.text(), " ").trim().to_string();
            if text.chars().count() > 1 {
                fragments.push(html_escape::encode_text(&text).into_owned());
            }
        } else if child.is_element() {
            remaining.push_str(&dom::outer_html(&Selection::from(child)));
        }
    }

    if fragments.is_empty() {
        return false;
    }

    sel.set_html(format!("<p>{}</p>{remaining}", fragments.join(" ")));
    true
}

//! Main content extraction module.
//!
//! Locates the article body in a cleaned document and refines it.
//!
//! # Module Structure
//!
//! - `hints`: Site-hint fast path for well-known article containers
//! - `scorer`: Stop-word scoring with propagation to ancestors
//! - `state`: Score side table keyed by node identity
//! - `pruning`: Sibling ingestion and child pruning of the top node
//!
//! # Usage
//!
//! ```rust
//! use article_extractor::extractor::{find_top_node, hints, pruning};
//! use article_extractor::{dom, Options};
//!
//! let body = "The minister said on Friday that the plan would be reviewed by the end of the year.";
//! let html = format!("<html><body><div id='story'><p>{body}</p><p>{body}</p></div></body></html>");
//! let doc = dom::parse(&html);
//! let options = Options::default();
//!
//! let hinted = hints::hint_candidates(&doc);
//! let (top, scores) = find_top_node(&doc, &hinted, "en", &options)?;
//! let synthetic = pruning::post_clean(&top, "en", &options);
//! assert_eq!(dom::id(&top).as_deref(), Some("story"));
//! assert!(synthetic.is_empty());
//! assert!(!scores.is_empty());
//! # Ok::<(), article_extractor::Error>(())
//! ```

pub mod hints;
pub mod pruning;
pub mod scorer;
pub mod state;

use dom_query::{Document, Selection};

use crate::error::Result;
use crate::options::Options;

pub use hints::HintMatch;
pub use state::{Gravity, ScoreTable};

/// Find the article body: a qualifying site-hint container, else the best
/// scored node.
///
/// `hinted` comes from [`hints::hint_candidates`], taken before cleaning. A
/// hinted container comes with an empty score table.
pub fn find_top_node<'a>(
    doc: &'a Document,
    hinted: &[HintMatch<'a>],
    lang: &str,
    opts: &Options,
) -> Result<(Selection<'a>, ScoreTable)> {
    if let Some(container) = hints::find_hinted_container(hinted, opts) {
        return Ok((container, ScoreTable::new()));
    }
    scorer::calculate_best_node(doc, lang, opts)
}

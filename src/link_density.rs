//! Link Density Testing
//!
//! Checks whether a subtree is rich in links (probably navigation or other
//! boilerplate) by comparing the words inside `<a>` elements to all words.

use dom_query::Selection;

use crate::dom;

/// Word and link counts for one subtree.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LinkStats {
    /// Whitespace-separated words in the subtree's text.
    pub words: usize,
    /// Words inside `<a>` descendants.
    pub link_words: usize,
    /// Number of `<a>` descendants.
    pub links: usize,
}

impl LinkStats {
    /// Collect counts for the first node of `element`.
    #[must_use]
    pub fn collect(element: &Selection) -> Self {
        let links = element.select("a");
        let link_words = links
            .iter()
            .map(|link| dom::word_count(&dom::text_content(&link)))
            .sum();

        Self {
            words: dom::word_count(&dom::text_content(element)),
            link_words,
            links: links.length(),
        }
    }

    /// `link_words / words`; zero when there are no words.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        if self.words == 0 {
            return 0.0;
        }
        self.link_words as f64 / self.words as f64
    }

    /// Whether these counts describe link-heavy chrome.
    ///
    /// High when there is no text at all, when more than five links cover
    /// over 30% of the words, when links cover over 60% of the words, or when
    /// `links × ratio` exceeds 0.8 with links covering at least 30%.
    #[must_use]
    pub fn is_high(&self) -> bool {
        if self.words == 0 {
            return true;
        }
        let ratio = self.ratio();
        (self.links > 5 && ratio > 0.3)
            || ratio > 0.6
            || (ratio >= 0.3 && self.links as f64 * ratio > 0.8)
    }
}

/// Check whether `element` is link-heavy. See [`LinkStats::is_high`].
#[must_use]
pub fn is_high_link_density(element: &Selection) -> bool {
    LinkStats::collect(element).is_high()
}

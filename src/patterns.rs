//! Compiled regex patterns and literal lists used by the extraction pipeline.
//!
//! All patterns are compiled once at first use with `LazyLock`. The literal
//! lists here are part of the observable extraction behaviour; treat every
//! entry as data, not control flow.
//!
//! The lists are a reconstruction: they hold the documented entries and
//! representative members of each category, not a byte-for-byte copy of any
//! upstream table. The tests below pin the entries extraction relies on.

#![allow(clippy::expect_used)]

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Cleaner
// =============================================================================

/// `id`/`class`/`name` values marking template chrome that the cleaner removes.
pub static REMOVE_NODES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        "[Cc]omentario|",
        "[Ff]ooter|",
        "^fn$|",
        "^inset$|",
        "^print$|",
        "^scroll$|",
        "^side$|",
        "^side_|",
        "^widget$|",
        "ajoutVideo|",
        "^ab[0-9]$|",
        "[_-]ads?$|",
        "^ads?[ _-]|",
        "^ads?$|",
        "^ADX_CLIENTSIDE$|",
        "^adsbygoogle|",
        "^advert|",
        "^alerts|",
        "articleheadings|",
        "_articles|",
        "^article-tags|",
        "author-dropdown|",
        "^banner|",
        "^bar$|",
        "blog-pager|",
        "brass-rail|",
        "breadcrumbs|",
        "button|",
        "byline|",
        "cabecera|",
        "^caption$|",
        "carousel|",
        "^click|",
        "cnnStryHghLght|",
        "cnn_html_slideshow|",
        "cnn_strycaptiontxt|",
        "cnn_strylftcntnt|",
        "cnn_stryspcvbx|",
        "combx|",
        "comment|",
        "communitypromo|",
        "^comscore$|",
        "contact|",
        "contentTools2|",
        "controls|",
        "cookie|",
        "CoversMainContent|",
        "^critical-alerts$|",
        "^date$|",
        "detail_new_|",
        "detail_related_|",
        "^DYSRC$|",
        "^early-body|",
        "error|",
        "facebook|",
        "^fb-root$|",
        "feature_feed|",
        "figcaption|",
        "footnote|",
        "^ga-track$|",
        "^header|",
        "hidden|",
        "^img_popup_single$|",
        "inline-share-tools|",
        "inread|",
        "^interstitial-ad-modal$|",
        "^Inv[0-9]$|",
        "js_replies|",
        "[Kk]ona[Ff]ilter|",
        "^kxhead$|",
        "^lede[_-]container$|",
        "legende?|",
        "^lightningjs-|",
        "links|",
        "^login|",
        "^lui-mini-profile-body$|",
        "^marginalia|",
        "^marketing|",
        "^masthead|",
        "^meta$|",
        "^meta[-_]|",
        "^mg_|",
        "^modal|",
        "^moreArticles$|",
        "^moreLinks$|",
        "^more[-_]?(stories|articles|links|news)|",
        "^nav|",
        "navbar|",
        "^navigation|",
        "^newsletter|",
        "^noprint$|",
        "nrelate|",
        "^oauth|",
        "^outbrain|",
        "^PageContent2Rl$|",
        "pagetools|",
        "^pagination|",
        "^paywall|",
        "^pdf|",
        "^permalink|",
        "PopularQuestions|",
        "popup|",
        "post-attributes|",
        "post-title|",
        "preview|",
        "relacionado|",
        "related|",
        "^rss|",
        "rss$|",
        "share|",
        "shoutbox|",
        "sidebar|",
        "^similar|",
        "site[-_]?footer|",
        "site[-_]?header|",
        "site[-_]?nav|",
        "^skip|",
        "snippet|",
        "social|",
        "^socialNetworking|",
        "sponsor|",
        "^stats|",
        "^story[-_]?photo|",
        "^subnav|",
        "^subscribe|",
        "^sucfooter$|",
        "^tabs?$|",
        "taboola|",
        "^tag|",
        "^teaser|",
        "^tool|",
        "tooltip|",
        "^top[-_]?bar|",
        "^topics?$|",
        "^trending|",
        "^tweet|",
        "twitter|",
        "^updated|",
        "^vcard|",
        "^weather|",
        "^wrapper-sidebar|",
        "^xcontainer|",
        "zoom",
    ))
    .expect("REMOVE_NODES regex")
});

/// Inline `style` declarations that hide an element.
pub static HIDDEN_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(display\s*:\s*none|visibility\s*:\s*hidden)").expect("HIDDEN_STYLE regex")
});

/// Markup inside a container that makes the cleaner retag it as `<p>`.
pub static BLOCK_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(a|blockquote|dl|div|img|ol|p|pre|table|ul)").expect("BLOCK_CONTENT regex")
});

/// Tab/newline noise stripped from text fragments folded into paragraphs.
pub static TAB_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\t\n\r]+").expect("TAB_NEWLINE regex"));

// =============================================================================
// Scorer
// =============================================================================

/// Selectors for article containers used by major publishers, tried in order.
pub const SITE_HINT_SELECTORS: &[&str] = &[
    ".article__content",
    "article[role='main']",
    ".article-body",
    ".article__body",
    ".article-content",
    ".story-body",
    ".story-content",
    ".post-content",
    ".entry-content",
    ".post-body",
    "[data-testid='article-body']",
    "[itemprop='articleBody']",
    ".c-entry-content",
    ".content-body",
    "#article-body",
];

/// Site-chrome vocabulary counted when vetting a hinted container.
pub static HINT_NAV_VOCABULARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(sign in|sign up|log in|subscribe|newsletter|home|news|sports|weather|entertainment|business|politics|opinion|video|menu|search|contact us|about us|privacy policy|terms of use)\b",
    )
    .expect("HINT_NAV_VOCABULARY regex")
});

/// Class/id fragments earning the structural article boost.
pub static ARTICLE_HINT_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(article|content|story|post|entry|main|body|text)")
        .expect("ARTICLE_HINT_CLASS regex")
});

/// Class/id tokens whose presence on an ancestor disqualifies a candidate.
pub static NON_CONTENT_TOKENS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "nav", "navbar", "navigation", "menu", "header", "masthead", "footer",
        "sidebar", "aside", "ad", "ads", "advert", "advertisement", "banner",
        "breadcrumb", "breadcrumbs",
    ]
    .into_iter()
    .collect()
});

/// Semantic tags whose descendants are never scoring candidates.
pub const NON_CONTENT_TAGS: &[&str] = &["nav", "header", "footer", "aside"];

/// Splits sentences on terminal punctuation.
pub static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+(\s+|$)").expect("SENTENCE_END regex"));

// =============================================================================
// Output formatter
// =============================================================================

/// Lines equal (case-insensitively, after trimming) to one of these are dropped.
pub static NAVIGATION_VOCABULARY: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "sign in", "sign up", "log in", "login", "log out", "register",
        "subscribe", "subscribe now", "newsletter", "sign up for our newsletter",
        "ad feedback", "advertisement", "advertising", "sponsored", "close",
        "menu", "search", "share", "share this", "share this article",
        "tweet", "email", "print", "home", "skip to content",
        "skip to main content", "read more", "continue reading", "follow us",
        "comments", "related articles", "more stories", "cookie policy",
        "privacy policy", "terms of use", "all rights reserved", "back to top",
        "video", "watch", "listen", "next", "previous", "loading", "show more",
        "see more", "trending", "most popular", "top stories",
    ]
    .into_iter()
    .collect()
});

/// Publication-metadata markers; any output line containing one is dropped.
pub const PUBLICATION_MARKERS: &[&str] = &[
    "min read",
    "updated",
    "published",
    "analysis by",
    "getty images",
    "reuters",
    "associated press",
    "afp via",
    "photo by",
    "image credit",
    "credit:",
    "©",
];

/// Horizontal whitespace collapsed to one space during linearisation.
pub static HORIZONTAL_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\x0B\x0C\r]+").expect("HORIZONTAL_WHITESPACE regex"));

// =============================================================================
// Metadata
// =============================================================================

/// Title delimiters, tried in this order.
pub const TITLE_DELIMITERS: &[&str] = &["|", " - ", " — ", "»", ":"];

/// Fragments marking the trailing part of a title as a publication name.
pub const PUBLICATION_NAMES: &[&str] = &["News", "BBC", "CNN", "ABC", "Times", "Post", "Journal"];

/// `href` fragments identifying tag links.
pub const TAG_HREF_FRAGMENTS: &[&str] = &["/tag/", "/tags/", "/topic/", "?keyword"];

// =============================================================================
// Media
// =============================================================================

/// Video hosts whose embeds are collected.
pub const VIDEO_PROVIDERS: &[&str] = &[
    "youtube.com",
    "youtu.be",
    "youtube-nocookie.com",
    "vimeo.com",
    "dailymotion.com",
    "dai.ly",
    "kewego.com",
    "twitch.tv",
    "wistia.com",
    "wistia.net",
    "brightcove.net",
    "brightcove.com",
    "facebook.com",
    "ted.com",
];

/// Image URLs that are ads, trackers or icons rather than content.
pub static BAD_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(/ads?/|doubleclick|adserver|advert|tracking|tracker|pixel|beacon|spacer|blank\.gif|1x1|icon|favicon|logo|sprite|avatar|badge|button|emoji)",
    )
    .expect("BAD_IMAGE regex")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_nodes_matches_chrome() {
        for value in [
            "hidden", "site-footer", "comment-list", "nav-main", "sidebar",
            "share-tools", "adsbygoogle", "ad-slot", "top-ads", "related-posts",
        ] {
            assert!(REMOVE_NODES.is_match(value), "{value} should match");
        }
    }

    #[test]
    fn remove_nodes_spares_content_containers() {
        for value in [
            "content", "article-body", "story-body", "main", "post-content",
            "entry-content", "body", "container", "download", "headline-wrap",
        ] {
            assert!(!REMOVE_NODES.is_match(value), "{value} should not match");
        }
    }

    #[test]
    fn block_content_detects_paragraph_markup() {
        assert!(BLOCK_CONTENT.is_match("text <p>para</p>"));
        assert!(BLOCK_CONTENT.is_match("<img src=x>"));
        assert!(!BLOCK_CONTENT.is_match("just <b>bold</b> text"));
    }

    #[test]
    fn hidden_style_matches_variants() {
        assert!(HIDDEN_STYLE.is_match("display:none"));
        assert!(HIDDEN_STYLE.is_match("color: red; DISPLAY : none"));
        assert!(HIDDEN_STYLE.is_match("visibility: hidden"));
        assert!(!HIDDEN_STYLE.is_match("display: block"));
    }

    #[test]
    fn horizontal_whitespace_keeps_newlines() {
        let out = HORIZONTAL_WHITESPACE.replace_all("a \t b\nc\r\rd", " ");
        assert_eq!(out, "a b\nc d");
    }
}

//! # article-extractor
//!
//! Reader-mode article extraction for arbitrary HTML pages.
//!
//! Given the HTML of a news or blog page, this library returns the headline,
//! the cleaned body text, the representative image, tags, embedded videos and
//! page metadata, while discarding navigation, advertising and other chrome.
//!
//! ## Quick Start
//!
//! ```rust
//! use article_extractor::extract_html;
//!
//! let paragraph = "The council voted on Tuesday to approve the new budget, which includes \
//!                  funding for the schools and the parks of the city over the next year.";
//! let html = format!(
//!     "<html><head><title>Budget approved | The Daily</title></head>\
//!      <body><div class='story'><p>{paragraph}</p><p>{paragraph}</p></div></body></html>"
//! );
//!
//! let article = extract_html("https://example.com/budget", html.as_bytes())?;
//! assert_eq!(article.title, "Budget approved");
//! assert!(article.cleaned_text.starts_with("The council voted"));
//! # Ok::<(), article_extractor::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! - **Preprocessing**: boundary padding, charset detection and re-decoding
//! - **Metadata**: title, description, keywords, favicon, canonical URL, tags,
//!   language and publication date
//! - **Cleaning**: removal of hidden elements and page chrome, conversion of
//!   text-bearing containers to paragraphs
//! - **Top node**: site-hint containers, else stop-word scoring propagated to
//!   ancestors, followed by sibling ingestion and child pruning
//! - **Media**: top image and embedded videos
//! - **Formatting**: link harvesting and plain-text linearisation
//!
//! Extraction of one page is single-threaded. Independent pages may be
//! processed concurrently with a shared [`Options`] value.

mod error;
mod extract;
mod options;
mod patterns;
mod preprocess;
mod result;

/// DOM helpers over `dom_query`.
pub mod dom;

/// Charset normalisation and decoding.
pub mod encoding;

/// Top-node search, scoring state and post-cleaning.
pub mod extractor;

/// Page fetching abstraction and the HTTP implementation.
pub mod fetch;

/// Plain-text rendering of the top node.
pub mod formatter;

/// Document cleaning before scoring.
pub mod html_processing;

/// Top image selection.
pub mod images;

/// Link density testing for boilerplate detection.
pub mod link_density;

/// Metadata extraction (meta tags, title, tags, language, dates).
pub mod metadata;

/// Stop-word service and language detection.
pub mod stopwords;

/// URL utilities for validation and resolution.
pub mod url_utils;

/// Embedded video extraction.
pub mod videos;

// Public API - re-exports
pub use error::{Error, Result};
pub use extract::{link_hash, NO_CONTENT_WARNING};
#[cfg(feature = "fetch")]
pub use fetch::HttpFetcher;
pub use fetch::{FetchedPage, HtmlFetcher};
pub use options::{AdditionalDataExtractor, Options, DEFAULT_USER_AGENT};
pub use result::Article;
pub use stopwords::{BuiltinStopWords, StopWords, WordStats};

/// Extracts an article from raw HTML using default options.
///
/// `final_url` is the address the HTML was obtained from; relative links,
/// images and videos are resolved against it.
///
/// # Errors
///
/// Returns [`Error::EmptyBody`] for an empty body and [`Error::ParseError`]
/// when no document can be built. A page without an article body is not an
/// error: the result carries metadata and a warning.
///
/// # Example
///
/// ```rust
/// use article_extractor::extract_html;
///
/// let html = b"<html><head><title>Nothing here</title></head><body><nav>Home</nav></body></html>";
/// let article = extract_html("https://example.com/", html)?;
/// assert!(article.cleaned_text.is_empty());
/// assert_eq!(article.warnings.len(), 1);
/// # Ok::<(), article_extractor::Error>(())
/// ```
pub fn extract_html(final_url: &str, html: &[u8]) -> Result<Article> {
    extract_html_with_options(final_url, html, None, &Options::default())
}

/// Extracts an article from raw HTML with custom options.
///
/// `charset` is the charset announced out of band (for example by an HTTP
/// `Content-Type` header). It takes precedence over declarations inside the
/// document.
///
/// # Example
///
/// ```rust
/// use article_extractor::{extract_html_with_options, Options};
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"><title>Caf\xE9</title></head><body></body></html>";
/// let options = Options {
///     extract_publish_date: false,
///     ..Options::default()
/// };
/// let article = extract_html_with_options("https://example.com/", html, None, &options)?;
/// assert_eq!(article.title, "Café");
/// # Ok::<(), article_extractor::Error>(())
/// ```
pub fn extract_html_with_options(
    final_url: &str,
    html: &[u8],
    charset: Option<&str>,
    options: &Options,
) -> Result<Article> {
    extract::extract_article(final_url, html, charset, options)
}

/// Fetches `url` with `fetcher` and extracts the article.
///
/// The article's `final_url` is the URL reached after redirects, or `url`
/// when the fetcher does not report one.
///
/// # Errors
///
/// Transport failures from the fetcher are returned unchanged.
pub fn extract_url_with_fetcher<F: HtmlFetcher + ?Sized>(
    fetcher: &F,
    url: &str,
    headers: &[(&str, &str)],
    options: &Options,
) -> Result<Article> {
    let page = fetcher.fetch(url, headers, options)?;
    let final_url = if page.final_url.is_empty() {
        url
    } else {
        page.final_url.as_str()
    };
    extract::extract_article(final_url, &page.body, page.charset.as_deref(), options)
}

/// Fetches `url` over HTTP and extracts the article using default options.
#[cfg(feature = "fetch")]
pub fn extract_url(url: &str) -> Result<Article> {
    extract_url_with_options(url, &[], &Options::default())
}

/// Fetches `url` over HTTP with extra request headers and custom options.
#[cfg(feature = "fetch")]
pub fn extract_url_with_options(url: &str, headers: &[(&str, &str)], options: &Options) -> Result<Article> {
    extract_url_with_fetcher(&HttpFetcher, url, headers, options)
}

//! Configuration options for article extraction.
//!
//! The `Options` struct controls extraction behavior. It is never mutated by the
//! pipeline, so one value can be shared by concurrent extractions.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dom_query::Document;

use crate::stopwords::{BuiltinStopWords, StopWords};

/// Default `User-Agent` sent by the HTTP fetcher.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Hook that reads extra fields from the parsed document.
///
/// Runs after metadata extraction and before the cleaner touches the DOM.
pub trait AdditionalDataExtractor: Send + Sync {
    /// Returns key/value pairs stored in `Article::additional_data`.
    fn extract(&self, doc: &Document) -> BTreeMap<String, String>;
}

/// Configuration options for article extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use article_extractor::Options;
///
/// let options = Options {
///     target_language: "de".to_string(),
///     use_meta_language: false,
///     ..Options::default()
/// };
/// assert!(options.extract_publish_date);
/// ```
#[derive(Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Language used when meta language detection is disabled.
    ///
    /// Default: `"en"`
    pub target_language: String,

    /// Let the document's declared (or detected) language override
    /// `target_language`.
    ///
    /// Default: `true`
    pub use_meta_language: bool,

    /// `User-Agent` header for outgoing HTTP requests.
    pub browser_user_agent: String,

    /// HTTP request timeout.
    ///
    /// Default: 20 seconds
    pub timeout: Duration,

    /// Reserved. Has no effect on extracted text.
    ///
    /// Default: `false`
    pub enable_image_fetching: bool,

    /// Look for a publication date in meta tags and page text.
    ///
    /// Default: `true`
    pub extract_publish_date: bool,

    /// Optional hook producing `Article::additional_data`.
    ///
    /// Default: `None`
    pub additional_data_extractor: Option<Arc<dyn AdditionalDataExtractor>>,

    /// Stop-word counting and language detection service.
    ///
    /// Default: [`BuiltinStopWords`]
    pub stop_words: Arc<dyn StopWords>,

    /// Emit diagnostic `tracing` events at debug level.
    ///
    /// Default: `false`
    pub debug: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            target_language: "en".to_string(),
            use_meta_language: true,
            browser_user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(20),
            enable_image_fetching: false,
            extract_publish_date: true,
            additional_data_extractor: None,
            stop_words: Arc::new(BuiltinStopWords),
            debug: false,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("target_language", &self.target_language)
            .field("use_meta_language", &self.use_meta_language)
            .field("browser_user_agent", &self.browser_user_agent)
            .field("timeout", &self.timeout)
            .field("enable_image_fetching", &self.enable_image_fetching)
            .field("extract_publish_date", &self.extract_publish_date)
            .field(
                "additional_data_extractor",
                &self.additional_data_extractor.as_ref().map(|_| "<hook>"),
            )
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

//! Page fetching.
//!
//! The pipeline only needs the raw body, the charset announced by the server
//! and the URL reached after redirects. [`HtmlFetcher`] abstracts that so the
//! HTTP client can be swapped out (or stubbed in tests); [`HttpFetcher`] is
//! the `reqwest` implementation behind the `fetch` feature.

use crate::error::Result;
use crate::options::Options;

/// A fetched HTML page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedPage {
    /// Raw response body.
    pub body: Vec<u8>,
    /// Charset from the `Content-Type` response header, if any.
    pub charset: Option<String>,
    /// URL after redirects.
    pub final_url: String,
}

/// Source of raw HTML.
pub trait HtmlFetcher {
    /// Fetch `url`, sending `headers` in addition to the configured user agent.
    ///
    /// Implementations honour `options.timeout` and `options.browser_user_agent`
    /// and report failures as [`crate::Error::Transport`].
    fn fetch(&self, url: &str, headers: &[(&str, &str)], options: &Options) -> Result<FetchedPage>;
}

#[cfg(feature = "fetch")]
pub use http::HttpFetcher;

#[cfg(feature = "fetch")]
mod http {
    use reqwest::blocking::Client;
    use reqwest::header::CONTENT_TYPE;
    use tracing::debug;

    use super::{FetchedPage, HtmlFetcher};
    use crate::encoding;
    use crate::error::{Error, Result};
    use crate::options::Options;

    /// Blocking HTTP fetcher built on `reqwest`.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct HttpFetcher;

    fn create_client(options: &Options) -> Result<Client> {
        Client::builder()
            .user_agent(options.browser_user_agent.as_str())
            .timeout(options.timeout)
            .build()
            .map_err(|e| Error::Transport(e.to_string()))
    }

    impl HtmlFetcher for HttpFetcher {
        fn fetch(&self, url: &str, headers: &[(&str, &str)], options: &Options) -> Result<FetchedPage> {
            let client = create_client(options)?;

            let mut request = client.get(url);
            for (name, value) in headers {
                request = request.header(*name, *value);
            }

            let response = request
                .send()
                .and_then(reqwest::blocking::Response::error_for_status)
                .map_err(|e| Error::Transport(e.to_string()))?;

            let final_url = response.url().to_string();
            let charset = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .and_then(encoding::charset_from_content_type);

            let body = response
                .bytes()
                .map_err(|e| Error::Transport(e.to_string()))?
                .to_vec();

            if options.debug {
                debug!(url, final_url = %final_url, bytes = body.len(), charset = ?charset, "page fetched");
            }

            Ok(FetchedPage { body, charset, final_url })
        }
    }
}

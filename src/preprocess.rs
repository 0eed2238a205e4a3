//! Raw HTML preparation.
//!
//! Pads element boundaries so adjacent inline text does not fuse when the
//! tree is linearised, decodes the body with the right charset, and parses it.

use dom_query::Document;
use tracing::debug;

use crate::encoding;
use crate::error::{Error, Result};
use crate::options::Options;

/// A parsed document together with the HTML it was built from.
pub struct Prepared {
    /// The DOM every later stage mutates.
    pub document: Document,
    /// The boundary-padded HTML that was parsed.
    pub html: String,
    /// Canonical charset used to decode the body (empty when none was declared).
    pub charset: String,
}

/// Insert whitespace at tag boundaries.
///
/// `><` gains a space, `</blockquote>`, `</li>` and `</p>` gain a trailing
/// newline, and `<img ` gains a leading newline.
#[must_use]
pub fn pad_boundaries(html: &str) -> String {
    html.replace("><", "> <")
        .replace("</blockquote>", "</blockquote>\n")
        .replace("</li>", "</li>\n")
        .replace("</p>", "</p>\n")
        .replace("<img ", "\n<img ")
}

/// Decode, pad and parse a raw body.
///
/// A caller-supplied charset wins over any declaration inside the document.
pub fn prepare(raw: &[u8], charset_hint: Option<&str>, options: &Options) -> Result<Prepared> {
    if raw.is_empty() {
        return Err(Error::EmptyBody);
    }

    let html = pad_boundaries(&String::from_utf8_lossy(raw));
    let document = parse(&html)?;

    let declared = charset_hint
        .map(str::to_string)
        .filter(|c| !c.trim().is_empty())
        .or_else(|| encoding::charset_from_document(&document))
        .map(|c| encoding::normalise_charset(&c))
        .unwrap_or_default();

    if options.debug {
        debug!(charset = %declared, bytes = raw.len(), "preprocessing document");
    }

    if declared.is_empty() || declared == "UTF-8" {
        return Ok(Prepared { document, html, charset: declared });
    }

    let decoded = encoding::decode(raw, &declared)?;
    let html = pad_boundaries(&decoded);
    let document = parse(&html)?;
    Ok(Prepared { document, html, charset: declared })
}

fn parse(html: &str) -> Result<Document> {
    let document = Document::from(html);
    if document.select("html").is_empty() {
        return Err(Error::ParseError("document has no root element".to_string()));
    }
    Ok(document)
}

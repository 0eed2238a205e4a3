//! Character set normalisation, detection and transcoding.
//!
//! Web pages declare charsets with a zoo of misspelled and vendor-specific
//! labels. [`normalise_charset`] maps them onto canonical names, and
//! [`decode`] turns raw bytes into UTF-8 through `encoding_rs`.

use std::sync::LazyLock;

use dom_query::{Document, Selection};
use encoding_rs::{Encoding, EUC_KR, ISO_8859_2, UTF_8};
use regex::Regex;

use crate::dom;
use crate::error::{Error, Result};

/// `charset=` parameter inside a Content-Type value.
#[allow(clippy::expect_used)]
static CHARSET_PARAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"';\s]+)"#).expect("valid regex")
});

/// Map a charset label to its canonical name.
///
/// Unknown labels are returned uppercased and trimmed, so the function is
/// idempotent: `normalise_charset(&normalise_charset(x)) == normalise_charset(x)`.
///
/// # Examples
///
/// ```
/// use article_extractor::encoding::normalise_charset;
///
/// assert_eq!(normalise_charset("SIFT_JIS"), "SHIFT_JIS");
/// assert_eq!(normalise_charset("utf8"), "UTF-8");
/// ```
#[must_use]
pub fn normalise_charset(label: &str) -> String {
    let upper = label
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_uppercase();

    let canonical = match upper.as_str() {
        "UTF8" | "UT-8" | "UTR-8" | "UFT-8" | "UTF8-WITHOUT-BOM" | "UTF8_GENERAL_CI" => "UTF-8",
        "SIFT_JIS" | "SJIS" | "SHIFT-JIS" | "X-SJIS" => "SHIFT_JIS",
        "ANSI" | "ISO-8859-1" | "ISO8859-1" | "ISO_8859-1" | "ISO 8859-1" | "LATIN1" | "LATIN-1"
        | "WINDOWS-1252" | "WIN-1252" | "WIN1252" | "US-ASCII" | "ASCII" => "CP1252",
        "WINDOWS-1251" | "WIN-1251" | "WIN1251" => "CP1251",
        "WINDOWS-1255" | "WIN-1255" => "ISO-8859-8",
        "WINDOWS-1257" | "WIN-1257" => "ISO-8859-13",
        "MS949" | "KSC5601" | "KS_C_5601-1987" | "CP949" | "EUC-KR" => "UHC",
        "LATIN2" | "ISO-8859-2" | "ISO8859-2" => "LATIN-2",
        "GB2312" | "GBK" | "X-GBK" => "GB18030",
        "BIG-5" | "BIG5-HKSCS" => "BIG5",
        _ => return upper,
    };
    canonical.to_string()
}

/// Look up the decoder for a canonical charset name.
#[must_use]
pub fn encoding_for(charset: &str) -> Option<&'static Encoding> {
    match charset {
        "UHC" => Some(EUC_KR),
        "LATIN-2" => Some(ISO_8859_2),
        other => Encoding::for_label(other.as_bytes()),
    }
}

/// Charset declared inside the parsed document.
///
/// Checks `meta[http-equiv=Content-Type]` first, then `meta[charset]`.
#[must_use]
pub fn charset_from_document(doc: &Document) -> Option<String> {
    for node in doc.select("meta[http-equiv]").nodes() {
        let meta = Selection::from(*node);
        let is_content_type = dom::get_attribute(&meta, "http-equiv")
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("content-type"));
        if !is_content_type {
            continue;
        }
        if let Some(charset) = dom::get_attribute(&meta, "content")
            .as_deref()
            .and_then(charset_from_content_type)
        {
            return Some(charset);
        }
    }

    doc.select("meta[charset]")
        .nodes()
        .first()
        .and_then(|node| dom::non_empty_attribute(&Selection::from(*node), "charset"))
}

/// Extract the `charset=` parameter from a Content-Type value.
#[must_use]
pub fn charset_from_content_type(value: &str) -> Option<String> {
    CHARSET_PARAM_RE
        .captures(value)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Decode `raw` as `charset` (canonical name). Empty or UTF-8 means UTF-8.
///
/// Invalid byte sequences become U+FFFD; only an unknown charset fails.
pub fn decode(raw: &[u8], charset: &str) -> Result<String> {
    if charset.is_empty() || charset == "UTF-8" {
        return Ok(String::from_utf8_lossy(raw).into_owned());
    }

    let encoding = encoding_for(charset)
        .ok_or_else(|| Error::DecodeError(format!("unsupported charset {charset}")))?;
    if encoding == UTF_8 {
        return Ok(String::from_utf8_lossy(raw).into_owned());
    }

    let (decoded, _encoding_used, _had_errors) = encoding.decode(raw);
    Ok(decoded.into_owned())
}

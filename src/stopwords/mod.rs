//! Stop-word counting and language detection.
//!
//! The scorer uses stop-word density as its proxy for prose. The service is a
//! trait so callers can plug in richer dictionaries; [`BuiltinStopWords`] ships
//! small embedded lists and detects languages with `whatlang`.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use whatlang::Lang;

/// All embedded stoplists: (ISO 639-1 code, file contents).
const STOPLISTS: &[(&str, &str)] = &[
    ("de", include_str!("de.txt")),
    ("en", include_str!("en.txt")),
    ("es", include_str!("es.txt")),
    ("fr", include_str!("fr.txt")),
    ("it", include_str!("it.txt")),
    ("nl", include_str!("nl.txt")),
    ("pt", include_str!("pt.txt")),
];

static PARSED_STOPLISTS: LazyLock<HashMap<&'static str, HashSet<String>>> = LazyLock::new(|| {
    STOPLISTS
        .iter()
        .map(|(code, contents)| (*code, parse_stoplist(contents)))
        .collect()
});

#[allow(clippy::expect_used)]
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}\s']").expect("PUNCTUATION regex"));

/// Parse a stoplist file: one word per line, lowercased, blank lines skipped.
fn parse_stoplist(contents: &str) -> HashSet<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Word statistics for a block of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordStats {
    /// Number of words after punctuation removal.
    pub word_count: usize,
    /// Number of those words found in the language's stoplist.
    pub stop_word_count: usize,
}

/// Stop-word service consumed by the scorer and metadata stages.
pub trait StopWords: Send + Sync {
    /// Counts words and stop words of `text` in language `lang`.
    ///
    /// Languages without a stoplist yield zero stop words.
    fn stats(&self, lang: &str, text: &str) -> WordStats;

    /// Whether a stoplist exists for `lang`.
    fn supports(&self, lang: &str) -> bool;

    /// Guesses the language of `text`, as an ISO 639-1 code.
    fn detect(&self, text: &str) -> Option<String>;
}

/// Embedded stoplists plus `whatlang` detection.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinStopWords;

impl StopWords for BuiltinStopWords {
    fn stats(&self, lang: &str, text: &str) -> WordStats {
        let cleaned = PUNCTUATION.replace_all(text, " ").to_lowercase();
        let stoplist = PARSED_STOPLISTS.get(lang);

        let mut stats = WordStats::default();
        for word in cleaned.split_whitespace() {
            stats.word_count += 1;
            if stoplist.is_some_and(|list| list.contains(word)) {
                stats.stop_word_count += 1;
            }
        }
        stats
    }

    fn supports(&self, lang: &str) -> bool {
        PARSED_STOPLISTS.contains_key(lang)
    }

    fn detect(&self, text: &str) -> Option<String> {
        let info = whatlang::detect(text)?;
        let code = match info.lang() {
            Lang::Eng => "en",
            Lang::Spa => "es",
            Lang::Fra => "fr",
            Lang::Deu => "de",
            Lang::Ita => "it",
            Lang::Por => "pt",
            Lang::Nld => "nl",
            Lang::Rus => "ru",
            Lang::Jpn => "ja",
            Lang::Kor => "ko",
            Lang::Cmn => "zh",
            other => return Some(other.code().to_string()),
        };
        Some(code.to_string())
    }
}

/// Return the list of languages with an embedded stoplist.
#[must_use]
pub fn available_languages() -> Vec<&'static str> {
    STOPLISTS.iter().map(|(code, _)| *code).collect()
}

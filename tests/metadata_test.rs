use std::collections::BTreeMap;
use std::sync::Arc;

use article_extractor::{extract_html_with_options, AdditionalDataExtractor, Article, Options};
use chrono::{Datelike, Timelike};
use dom_query::Document;
use pretty_assertions::assert_eq;

const URL: &str = "https://blog.example.org/posts/42";

fn extract(html: &str, options: &Options) -> Article {
    match extract_html_with_options(URL, html.as_bytes(), None, options) {
        Ok(article) => article,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn canonical_link_sets_domain() {
    let html = r#"<html><head>
        <link rel="canonical" href="http://www.example.com/index.html">
    </head><body></body></html>"#;
    let article = extract(html, &Options::default());

    assert_eq!(article.canonical_link, "http://www.example.com/index.html");
    assert_eq!(article.domain, "www.example.com");
    assert_eq!(article.final_url, URL);
}

#[test]
fn relative_canonical_link_is_resolved() {
    let html = r#"<html><head><link rel="canonical" href="/posts/42-slug"></head><body></body></html>"#;
    let article = extract(html, &Options::default());
    assert_eq!(article.canonical_link, "https://blog.example.org/posts/42-slug");
}

#[test]
fn canonical_link_falls_back_to_final_url() {
    let article = extract("<html><head></head><body></body></html>", &Options::default());
    assert_eq!(article.canonical_link, URL);
    assert_eq!(article.domain, "blog.example.org");
}

#[test]
fn head_meta_fields_are_read() {
    let html = r#"<html><head>
        <meta name="description" content="  A look at harbour finances  ">
        <meta name="keywords" content="harbour, budget, council">
        <link rel="shortcut icon" href="/favicon.ico">
    </head><body></body></html>"#;
    let article = extract(html, &Options::default());

    assert_eq!(article.meta_description, "A look at harbour finances");
    assert_eq!(article.meta_keywords, "harbour, budget, council");
    assert_eq!(article.meta_favicon, "/favicon.ico");
}

#[test]
fn tags_come_from_tag_links() {
    let html = r#"<html><body>
        <a rel="tag" href="/t/1">Economy</a>
        <a href="https://blog.example.org/tag/politics">Politics</a>
        <a href="/topic/harbour">Harbour</a>
        <a href="/search?keyword=x">Budget</a>
        <a href="/about">About</a>
        <a rel="tag" href="/t/1">Economy</a>
    </body></html>"#;
    let article = extract(html, &Options::default());

    let tags: Vec<&str> = article.tags.iter().map(String::as_str).collect();
    assert_eq!(tags, vec!["Budget", "Economy", "Harbour", "Politics"]);
}

#[test]
fn declared_language_is_used() {
    let html = r#"<html lang="de-DE"><head></head><body><p>Dies ist ein kurzer Text.</p></body></html>"#;
    let article = extract(html, &Options::default());
    assert_eq!(article.meta_language, "de");
}

#[test]
fn target_language_wins_when_meta_language_is_disabled() {
    let html = r#"<html lang="de"><head></head><body></body></html>"#;
    let options = Options {
        target_language: "fr".to_string(),
        use_meta_language: false,
        ..Options::default()
    };
    assert_eq!(extract(html, &options).meta_language, "fr");
}

#[test]
fn missing_language_falls_back_to_english() {
    let article = extract("<html><head></head><body></body></html>", &Options::default());
    assert_eq!(article.meta_language, "en");
}

#[test]
fn publish_date_from_meta_tag() {
    let html = r#"<html><head>
        <meta property="article:published_time" content="2023-04-05T10:30:00+02:00">
    </head><body></body></html>"#;
    let date = extract(html, &Options::default()).publish_date;

    let date = date.unwrap_or_default();
    assert_eq!((date.year(), date.month(), date.day()), (2023, 4, 5));
    assert_eq!(date.hour(), 8);
}

#[test]
fn publish_date_from_body_text() {
    let html = r#"<html><body><p class="dateline">Posted on January 5, 2021 by the newsroom</p></body></html>"#;
    let date = extract(html, &Options::default()).publish_date;

    let date = date.unwrap_or_default();
    assert_eq!((date.year(), date.month(), date.day()), (2021, 1, 5));
}

#[test]
fn publish_date_can_be_disabled() {
    let html = r#"<html><head>
        <meta property="article:published_time" content="2023-04-05T10:30:00Z">
    </head><body></body></html>"#;
    let options = Options {
        extract_publish_date: false,
        ..Options::default()
    };
    assert_eq!(extract(html, &options).publish_date, None);
}

struct BylineExtractor;

impl AdditionalDataExtractor for BylineExtractor {
    fn extract(&self, doc: &Document) -> BTreeMap<String, String> {
        let mut data = BTreeMap::new();
        // Runs before cleaning, so chrome such as bylines is still present
        let byline = doc.select(".byline").text().trim().to_string();
        if !byline.is_empty() {
            data.insert("byline".to_string(), byline);
        }
        data
    }
}

#[test]
fn additional_data_sees_the_uncleaned_document() {
    let html = r#"<html><body><div class="byline">By A. Reporter</div></body></html>"#;
    let options = Options {
        additional_data_extractor: Some(Arc::new(BylineExtractor)),
        ..Options::default()
    };
    let article = extract(html, &options);

    assert_eq!(
        article.additional_data.get("byline").map(String::as_str),
        Some("By A. Reporter")
    );
}

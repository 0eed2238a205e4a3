use article_extractor::{extract_html, Article};
use pretty_assertions::assert_eq;

const URL: &str = "https://www.example.com/travel/lakes.html";

const P1: &str = "The northern lakes have become one of the most popular places in the country for a \
                  quiet weekend away from the noise of the city.";
const P2: &str = "Most of the visitors come for the walking trails, but the small villages along the \
                  shore are also worth a visit in the evening.";
const P3: &str = "Local guides said that the best time to go is in the early autumn, when the weather \
                  is still warm and the crowds have gone home.";

fn extract(html: &str) -> Article {
    match extract_html(URL, html.as_bytes()) {
        Ok(article) => article,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn first_og_image_is_preferred() {
    let html = format!(
        r#"<html>
          <head>
            <meta property="og:image" content="https://cdn.example.com/lead.jpg">
            <meta property="og:image" content="https://cdn.example.com/alternate.jpg">
          </head>
          <body>
            <div id="story">
              <img src="/images/huge.jpg" width="2400" height="1600">
              <p>{P1}</p><p>{P2}</p><p>{P3}</p>
            </div>
          </body>
        </html>"#
    );
    assert_eq!(extract(&html).top_image, "https://cdn.example.com/lead.jpg");
}

#[test]
fn largest_story_image_is_used_without_og_image() {
    let html = format!(
        r#"<html>
          <body>
            <img src="/images/masthead-photo.jpg" width="3000" height="3000">
            <div id="story">
              <img src="thumbs/small.jpg" width="120" height="90">
              <p>{P1}</p>
              <img src="photos/shore.jpg" width="1200" height="800">
              <p>{P2}</p><p>{P3}</p>
            </div>
          </body>
        </html>"#
    );
    assert_eq!(extract(&html).top_image, "https://www.example.com/travel/photos/shore.jpg");
}

#[test]
fn page_without_images_has_empty_top_image() {
    let html = format!(r#"<html><body><div id="story"><p>{P1}</p><p>{P2}</p></div></body></html>"#);
    assert_eq!(extract(&html).top_image, "");
}

#[test]
fn embedded_videos_are_collected_once() {
    let html = format!(
        r#"<html>
          <body>
            <div id="story">
              <p>{P1}</p>
              <iframe src="https://www.youtube.com/embed/lake-tour"></iframe>
              <p>{P2}</p>
              <iframe src="https://tracker.example.net/frame.html"></iframe>
              <object data="https://player.vimeo.com/video/1234"></object>
              <p>{P3}</p>
              <iframe src="https://www.youtube.com/embed/lake-tour"></iframe>
            </div>
          </body>
        </html>"#
    );
    assert_eq!(
        extract(&html).movies,
        vec![
            "https://www.youtube.com/embed/lake-tour".to_string(),
            "https://player.vimeo.com/video/1234".to_string(),
        ]
    );
}

#[test]
fn protocol_relative_embeds_are_resolved() {
    let html = format!(
        r#"<html><body><div id="story"><p>{P1}</p><embed src="//www.dailymotion.com/embed/video/x7"><p>{P2}</p></div></body></html>"#
    );
    assert_eq!(extract(&html).movies, vec!["https://www.dailymotion.com/embed/video/x7".to_string()]);
}

//! Top image resolution.
//!
//! The first `og:image` that resolves to an absolute URL wins. Otherwise the
//! largest acceptable `<img>` in the top node (then in the whole document)
//! is used.

use dom_query::{Document, Selection};

use crate::dom;
use crate::metadata::meta_tags;
use crate::patterns::BAD_IMAGE;
use crate::url_utils;

/// Pick the representative image URL, or an empty string.
#[must_use]
pub fn top_image(doc: &Document, top: Option<&Selection>, final_url: &str) -> String {
    if let Some(og_image) = meta_tags::meta_properties(doc, "og:image")
        .iter()
        .find_map(|content| url_utils::resolve(content, final_url))
    {
        return og_image;
    }

    top.and_then(|node| largest_image(node, final_url))
        .or_else(|| largest_image(&doc.select("body"), final_url))
        .unwrap_or_default()
}

/// Largest acceptable `<img>` under `root` by declared `width × height`.
///
/// Images without dimensions count as zero; the first image wins ties.
fn largest_image(root: &Selection, final_url: &str) -> Option<String> {
    let mut best: Option<(String, u64)> = None;

    for img in root.select("img").iter() {
        let Some(src) = dom::non_empty_attribute(&img, "src")
            .or_else(|| dom::non_empty_attribute(&img, "data-src"))
        else {
            continue;
        };
        if src.starts_with("data:") || BAD_IMAGE.is_match(&src) {
            continue;
        }
        let Some(url) = url_utils::resolve(&src, final_url) else {
            continue;
        };

        let area = dimension(&img, "width") * dimension(&img, "height");
        if best.as_ref().is_none_or(|(_, best_area)| area > *best_area) {
            best = Some((url, area));
        }
    }

    best.map(|(url, _)| url)
}

/// Leading digits of a size attribute (`"640px"` → 640), zero if absent.
fn dimension(img: &Selection, attr: &str) -> u64 {
    dom::get_attribute(img, attr)
        .map(|value| {
            value
                .trim()
                .chars()
                .take_while(char::is_ascii_digit)
                .collect::<String>()
        })
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(0)
}

//! SEO metadata extraction from HTML.

use scraper::{Html, Selector};

use crate::models::PageInfo;

/// Extract the tracked metadata from an HTML body.
///
/// Missing elements yield empty strings rather than errors; a page
/// without a title is a finding worth recording, not a failure.
pub fn extract_page_info(status_code: u16, html: &str) -> PageInfo {
    let document = Html::parse_document(html);

    PageInfo {
        status_code,
        h1: first_element_text(&document, "h1"),
        title: first_element_text(&document, "title"),
        description: meta_description(&document),
    }
}

/// Collected text of the first element matching `selector`, trimmed.
fn first_element_text(document: &Html, selector: &str) -> String {
    let parsed = match Selector::parse(selector) {
        Ok(parsed) => parsed,
        Err(_) => return String::new(),
    };

    document
        .select(&parsed)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn meta_description(document: &Html) -> String {
    let parsed = match Selector::parse(r#"meta[name="description"]"#) {
        Ok(parsed) => parsed,
        Err(_) => return String::new(),
    };

    document
        .select(&parsed)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default()
}

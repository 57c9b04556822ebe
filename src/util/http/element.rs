use scraper::{Html, Selector};

use crate::util::text;

/// Extracts the text of the first element matched by a CSS selector.
///
/// Returns `None` when the selector is invalid or matches nothing.
pub fn select_first_text(document: &Html, css_selector: &str) -> Option<String> {
    let selector = Selector::parse(css_selector).ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>())
}

/// Walks an ordered list of selector candidates and returns the first one
/// whose text normalizes to a positive price.
pub fn first_price(document: &Html, selectors: &[&str]) -> Option<f64> {
    selectors
        .iter()
        .filter_map(|selector| select_first_text(document, selector))
        .filter_map(|value| text::parse_price(&value))
        .find(|price| *price > 0.0)
}

/// Walks an ordered list of selector candidates and returns the first one
/// whose text normalizes to a percentage.
pub fn first_percentage(document: &Html, selectors: &[&str]) -> Option<f64> {
    selectors
        .iter()
        .filter_map(|selector| select_first_text(document, selector))
        .find_map(|value| text::parse_percentage(&value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_first_text() {
        let document = Html::parse_document(r#"<div class="price">₹ 3,456.70</div>"#);
        assert_eq!(
            select_first_text(&document, "div.price"),
            Some("₹ 3,456.70".to_string())
        );
        assert_eq!(select_first_text(&document, "span.missing"), None);
    }

    #[test]
    fn test_first_price_skips_non_positive_candidates() {
        let html = r#"
            <span class="stale">0</span>
            <span class="junk">N/A</span>
            <span class="live">1,234.55</span>
        "#;
        let document = Html::parse_document(html);
        let price = first_price(&document, &[".stale", ".junk", ".live"]);
        assert_eq!(price, Some(1234.55));
    }

    #[test]
    fn test_first_percentage_takes_first_parseable() {
        let html = r#"
            <span class="a">--</span>
            <span class="b">-1.25%</span>
            <span class="c">+9.90%</span>
        "#;
        let document = Html::parse_document(html);
        assert_eq!(first_percentage(&document, &[".a", ".b", ".c"]), Some(-1.25));
    }
}

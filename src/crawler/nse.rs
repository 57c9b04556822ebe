use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;

use crate::{crawler::Extract, declare::Observation};

// NSE renders quote data client-side, so the figures live in an embedded
// JSON object inside a script tag rather than in static markup.
static EMBEDDED_JSON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\{.*\})").expect("embedded json pattern"));

pub struct Nse;

impl Extract for Nse {
    fn extract(&self, document: &Html) -> Observation {
        let mut observation = Observation::default();
        let selector = match Selector::parse("script") {
            Ok(selector) => selector,
            Err(_) => return observation,
        };

        for script in document.select(&selector) {
            let content = script.text().collect::<String>();
            if !content.contains("lastPrice") {
                continue;
            }

            let Some(captures) = EMBEDDED_JSON.captures(&content) else {
                continue;
            };
            let Ok(value) = serde_json::from_str::<Value>(&captures[1]) else {
                continue;
            };

            if let Some(price) = number_field(&value, "lastPrice") {
                observation.current_price = Some(price);
                observation.change_percent = number_field(&value, "pChange");
                observation.day_high = number_field(&value, "dayHigh");
                observation.day_low = number_field(&value, "dayLow");
                break;
            }
        }

        observation
    }
}

/// Reads a numeric field that NSE serves either as a JSON number or as a
/// numeric string.
fn number_field(value: &Value, key: &str) -> Option<f64> {
    match value.get(key)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_embedded_json() {
        let html = r#"
            <script>window.__q = {"symbol":"TCS","lastPrice":3456.7,"pChange":-0.42,"dayHigh":3490.0,"dayLow":3410.55};</script>
        "#;
        let observation = Nse.extract(&Html::parse_document(html));

        assert_eq!(observation.current_price, Some(3456.7));
        assert_eq!(observation.change_percent, Some(-0.42));
        assert_eq!(observation.day_high, Some(3490.0));
        assert_eq!(observation.day_low, Some(3410.55));
    }

    #[test]
    fn test_extract_accepts_numeric_strings() {
        let html = r#"
            <script>var data = {"lastPrice":"1234.55","pChange":"+0.91"};</script>
        "#;
        let observation = Nse.extract(&Html::parse_document(html));

        assert_eq!(observation.current_price, Some(1234.55));
        assert_eq!(observation.change_percent, Some(0.91));
    }

    #[test]
    fn test_extract_skips_unrelated_and_broken_scripts() {
        let html = r#"
            <script>console.log("nothing to see");</script>
            <script>var broken = {lastPrice: oops};</script>
            <script>var ok = {"lastPrice":99.5};</script>
        "#;
        let observation = Nse.extract(&Html::parse_document(html));

        assert_eq!(observation.current_price, Some(99.5));
        assert_eq!(observation.change_percent, None);
    }

    #[test]
    fn test_extract_without_quote_data() {
        let html = r#"<script>var x = {"open": 1};</script>"#;
        let observation = Nse.extract(&Html::parse_document(html));

        assert_eq!(observation.current_price, None);
    }
}

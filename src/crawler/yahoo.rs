use scraper::Html;

use crate::{crawler::Extract, declare::Observation, util::http::element};

// Yahoo styles its quote header with atomic CSS classes, so the escaped
// class selectors are load-bearing.
const PRICE_SELECTORS: &[&str] = &[
    r#"[data-test="qsp-price"]"#,
    r".Fw\(b\) .Fz\(36px\)",
    r".Trsdu\(0\.3s\)",
];

const CHANGE_SELECTORS: &[&str] = &[
    r#"[data-test="qsp-price-change-percent"]"#,
    r".Fw\(500\)",
];

pub struct Yahoo;

impl Extract for Yahoo {
    fn extract(&self, document: &Html) -> Observation {
        Observation {
            current_price: element::first_price(document, PRICE_SELECTORS),
            change_percent: element::first_percentage(document, CHANGE_SELECTORS),
            ..Default::default()
        }
    }
}

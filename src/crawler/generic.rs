use std::ops::RangeInclusive;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

use crate::{crawler::Extract, declare::Observation, util::text};

/// Currency-prefixed price patterns, tried in order against the page text.
static PRICE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"₹\s*([0-9,]+(?:\.[0-9]{1,2})?)",
        r"rs\.?\s*([0-9,]+(?:\.[0-9]{1,2})?)",
        r"price[:\s]*([0-9,]+(?:\.[0-9]{1,2})?)",
        r"([0-9,]+(?:\.[0-9]{1,2})?)\s*rupees",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("price pattern"))
    .collect()
});

static PERCENT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([+-]?\d+(?:\.\d+)?)\s*%").expect("percent pattern"));

/// Accepted ranges reject spurious matches (ad banners, footers, years).
const PRICE_RANGE: RangeInclusive<f64> = 1.0..=100_000.0;
const PERCENT_RANGE: RangeInclusive<f64> = -50.0..=50.0;

pub struct Generic;

impl Extract for Generic {
    fn extract(&self, document: &Html) -> Observation {
        let mut observation = Observation::default();
        let page_text = document
            .root_element()
            .text()
            .collect::<String>()
            .to_lowercase();

        'price: for pattern in PRICE_PATTERNS.iter() {
            for captures in pattern.captures_iter(&page_text) {
                if let Some(price) = text::parse_price(&captures[1]) {
                    if PRICE_RANGE.contains(&price) {
                        observation.current_price = Some(price);
                        break 'price;
                    }
                }
            }
        }

        for captures in PERCENT_PATTERN.captures_iter(&page_text) {
            if let Ok(change) = captures[1].parse::<f64>() {
                if PERCENT_RANGE.contains(&change) {
                    observation.change_percent = Some(change);
                    break;
                }
            }
        }

        observation
    }
}

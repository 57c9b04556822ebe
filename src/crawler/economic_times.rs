use scraper::Html;

use crate::{crawler::Extract, declare::Observation, util::http::element};

const PRICE_SELECTORS: &[&str] = &[".price .number", ".last-price", ".current-price"];

const CHANGE_SELECTORS: &[&str] = &[".change .number", ".percentage-change"];

pub struct EconomicTimes;

impl Extract for EconomicTimes {
    fn extract(&self, document: &Html) -> Observation {
        Observation {
            current_price: element::first_price(document, PRICE_SELECTORS),
            change_percent: element::first_percentage(document, CHANGE_SELECTORS),
            ..Default::default()
        }
    }
}

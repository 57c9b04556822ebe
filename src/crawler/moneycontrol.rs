use scraper::Html;

use crate::{crawler::Extract, declare::Observation, util::http::element};

const PRICE_SELECTORS: &[&str] = &[
    ".pcnstkprc",
    ".prc_flot",
    ".FL .gD_12",
    r#"[data-field="last_price"]"#,
    ".prc",
];

const CHANGE_SELECTORS: &[&str] = &[
    ".gD_12 .FL",
    ".prcntchng",
    r#"[data-field="percentage_change"]"#,
];

const DAY_HIGH_SELECTORS: &[&str] = &[r#"[data-field="day_high"]"#, ".dayrangetd .FL"];

const DAY_LOW_SELECTORS: &[&str] = &[r#"[data-field="day_low"]"#, ".dayrangetd .FR"];

pub struct MoneyControl;

impl Extract for MoneyControl {
    fn extract(&self, document: &Html) -> Observation {
        Observation {
            current_price: element::first_price(document, PRICE_SELECTORS),
            change_percent: element::first_percentage(document, CHANGE_SELECTORS),
            day_high: element::first_price(document, DAY_HIGH_SELECTORS),
            day_low: element::first_price(document, DAY_LOW_SELECTORS),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_full_quote() {
        let html = r#"
            <div class="pcnstkprc">₹ 3,456.70</div>
            <span class="prcntchng">+1.25%</span>
            <div data-field="day_high">3,490.00</div>
            <div data-field="day_low">3,410.55</div>
        "#;
        let observation = MoneyControl.extract(&Html::parse_document(html));

        assert_eq!(observation.current_price, Some(3456.70));
        assert_eq!(observation.change_percent, Some(1.25));
        assert_eq!(observation.day_high, Some(3490.00));
        assert_eq!(observation.day_low, Some(3410.55));
    }

    #[test]
    fn test_extract_uses_later_price_candidates() {
        let html = r#"
            <div class="prc_flot">4,012.30</div>
            <span class="prcntchng">-0.42%</span>
        "#;
        let observation = MoneyControl.extract(&Html::parse_document(html));

        assert_eq!(observation.current_price, Some(4012.30));
        assert_eq!(observation.change_percent, Some(-0.42));
        assert_eq!(observation.day_high, None);
        assert_eq!(observation.day_low, None);
    }

    #[test]
    fn test_day_range_prefers_data_field_over_document_order() {
        // The legacy day-range cell comes first in the markup; the data-field
        // elements must still win because they are the earlier candidate.
        let html = r#"
            <div class="pcnstkprc">3,456.70</div>
            <div class="dayrangetd">
                <span class="FL">9,999.00</span>
                <span class="FR">1.00</span>
            </div>
            <div data-field="day_high">3,490.00</div>
            <div data-field="day_low">3,410.55</div>
        "#;
        let observation = MoneyControl.extract(&Html::parse_document(html));

        assert_eq!(observation.day_high, Some(3490.00));
        assert_eq!(observation.day_low, Some(3410.55));
    }

    #[test]
    fn test_day_range_falls_back_to_range_cell() {
        let html = r#"
            <div class="pcnstkprc">3,456.70</div>
            <div class="dayrangetd">
                <span class="FL">3,490.00</span>
                <span class="FR">3,410.55</span>
            </div>
        "#;
        let observation = MoneyControl.extract(&Html::parse_document(html));

        assert_eq!(observation.day_high, Some(3490.00));
        assert_eq!(observation.day_low, Some(3410.55));
    }

    #[test]
    fn test_extract_empty_document() {
        let observation = MoneyControl.extract(&Html::parse_document("<html></html>"));

        assert_eq!(observation.current_price, None);
        assert_eq!(observation.change_percent, None);
    }
}

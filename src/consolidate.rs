use chrono::Local;

use crate::declare::{ConsolidatedQuote, DataQuality, Observation, QuoteRequest};

/// Merges per-source observations into one consensus quote.
///
/// Each numeric field takes the lower-median across the observations carrying
/// that field; fields with no contributors stay 0. An empty input still
/// yields a valid quote, zeroed and classified `low`.
pub fn consolidate(observations: &[Observation], request: &QuoteRequest) -> ConsolidatedQuote {
    let mut quote = ConsolidatedQuote {
        symbol: request.symbol.clone(),
        company_name: request.company_name.clone(),
        current_price: 0.0,
        change_percent: 0.0,
        day_high: 0.0,
        day_low: 0.0,
        volume: 0,
        last_updated: Local::now(),
        sources: Vec::new(),
        data_quality: DataQuality::Low,
    };

    if observations.is_empty() {
        return quote;
    }

    quote.current_price = consensus(observations, |o| o.current_price);
    quote.change_percent = consensus(observations, |o| o.change_percent);
    quote.day_high = consensus(observations, |o| o.day_high);
    quote.day_low = consensus(observations, |o| o.day_low);
    quote.sources = observations.iter().map(|o| o.source.clone()).collect();
    quote.data_quality = DataQuality::from_source_count(observations.len());

    quote
}

fn consensus(observations: &[Observation], field: impl Fn(&Observation) -> Option<f64>) -> f64 {
    lower_median(observations.iter().filter_map(field).collect()).unwrap_or(0.0)
}

/// Element at index `n / 2` of the ascending sort; for an even count this is
/// the upper of the two middle values, never an average.
fn lower_median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Some(values[values.len() / 2])
}

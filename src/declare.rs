use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Names the stock to look up. Immutable for the duration of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Ticker in upper-cased canonical form.
    pub symbol: String,
    pub company_name: String,
}

/// A discovered page worth scraping, tagged with its canonical source name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateUrl {
    pub url: String,
    pub source: String,
}

/// One source's best-effort extracted quote fragment.
///
/// Every numeric field may be absent. The pipeline only retains observations
/// that carry a `current_price`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Observation {
    pub source: String,
    pub current_price: Option<f64>,
    pub change_percent: Option<f64>,
    pub day_high: Option<f64>,
    pub day_low: Option<f64>,
}

/// Coarse confidence tier derived solely from the contributing source count.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataQuality {
    Low,
    Medium,
    High,
}

impl DataQuality {
    pub fn from_source_count(count: usize) -> Self {
        match count {
            n if n >= 3 => DataQuality::High,
            2 => DataQuality::Medium,
            _ => DataQuality::Low,
        }
    }
}

/// The consensus quote returned to callers. Constructed once per request and
/// not mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidatedQuote {
    pub symbol: String,
    pub company_name: String,
    pub current_price: f64,
    pub change_percent: f64,
    pub day_high: f64,
    pub day_low: f64,
    /// Not extracted from any source, always 0.
    pub volume: u64,
    /// Consolidation time, not any source's page timestamp.
    pub last_updated: DateTime<Local>,
    /// Contributing source names in discovery order, not deduplicated.
    pub sources: Vec<String>,
    pub data_quality: DataQuality,
}

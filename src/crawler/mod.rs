use std::time::Duration;

use anyhow::Result;
use scraper::Html;

use crate::{
    config::SETTINGS,
    consolidate,
    declare::{CandidateUrl, ConsolidatedQuote, Observation, QuoteRequest},
    logging, search,
    util::{self, http::FetchConfig},
};

/// Economic Times
pub mod economic_times;
/// Fallback for unrecognized financial sites
pub mod generic;
/// MoneyControl
pub mod moneycontrol;
/// NSE India
pub mod nse;
/// Yahoo Finance
pub mod yahoo;

/// Known financial-site domains. Matched as substrings of the lower-cased
/// URL, not as strict host suffixes.
const FINANCIAL_DOMAINS: &[&str] = &[
    "moneycontrol.com",
    "nseindia.com",
    "bseindia.com",
    "yahoo.com",
    "economictimes.indiatimes.com",
    "livemint.com",
    "business-standard.com",
    "zeebiz.com",
    "investing.com",
    "marketwatch.com",
    "bloomberg.com",
    "reuters.com",
    "cnbc.com",
    "financialexpress.com",
];

/// Display names for the domains we can attribute precisely.
const SOURCE_NAMES: &[(&str, &str)] = &[
    ("moneycontrol.com", "MoneyControl"),
    ("nseindia.com", "NSE India"),
    ("bseindia.com", "BSE India"),
    ("finance.yahoo.com", "Yahoo Finance"),
    ("economictimes.indiatimes.com", "Economic Times"),
    ("livemint.com", "LiveMint"),
    ("business-standard.com", "Business Standard"),
    ("zeebiz.com", "Zee Business"),
    ("investing.com", "Investing.com"),
    ("bloomberg.com", "Bloomberg"),
    ("reuters.com", "Reuters"),
];

/// True when the URL belongs to a known financial website.
pub fn is_financial_domain(url: &str) -> bool {
    let url = url.to_lowercase();

    FINANCIAL_DOMAINS.iter().any(|domain| url.contains(domain))
}

/// Canonical display name for a financial website, derived from its domain.
pub fn resolve_source_name(url: &str) -> String {
    let url = url.to_lowercase();

    SOURCE_NAMES
        .iter()
        .find(|(domain, _)| url.contains(domain))
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| String::from("Financial News"))
}

/// Extraction strategy key, resolved once per URL.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Site {
    MoneyControl,
    Yahoo,
    Nse,
    EconomicTimes,
    Generic,
}

impl Site {
    pub fn classify(url: &str) -> Site {
        let url = url.to_lowercase();

        if url.contains("moneycontrol.com") {
            Site::MoneyControl
        } else if url.contains("yahoo.com") {
            Site::Yahoo
        } else if url.contains("nseindia.com") {
            Site::Nse
        } else if url.contains("economictimes.indiatimes.com") {
            Site::EconomicTimes
        } else {
            Site::Generic
        }
    }

    fn extractor(self) -> &'static dyn Extract {
        match self {
            Site::MoneyControl => &moneycontrol::MoneyControl,
            Site::Yahoo => &yahoo::Yahoo,
            Site::Nse => &nse::Nse,
            Site::EconomicTimes => &economic_times::EconomicTimes,
            Site::Generic => &generic::Generic,
        }
    }
}

/// Per-site extraction strategy. Implementations read an already-parsed
/// document and never touch the network.
pub trait Extract: Sync {
    fn extract(&self, document: &Html) -> Observation;
}

/// Fetches one candidate page and extracts a quote fragment from it.
///
/// Returns `Ok(None)` when the page yielded no price; an observation carrying
/// only a change percentage is discarded as a whole, since it usually means
/// the selector matched an unrelated widget.
pub async fn scrape(candidate: &CandidateUrl, fetch: &FetchConfig) -> Result<Option<Observation>> {
    let body = util::http::get(&candidate.url, fetch).await?;
    let document = Html::parse_document(&body);
    let mut observation = Site::classify(&candidate.url)
        .extractor()
        .extract(&document);

    if observation.current_price.is_none() {
        return Ok(None);
    }

    observation.source = candidate.source.clone();
    Ok(Some(observation))
}

/// End-to-end pipeline: URL discovery, bounded sequential scraping with a
/// politeness pause, then consolidation. Per-source failures degrade to "no
/// observation" and never abort the batch, so this function is infallible.
pub async fn collect_quote(request: &QuoteRequest) -> ConsolidatedQuote {
    logging::info_file_async(format!(
        "Collecting quote data for {} ({})",
        request.symbol, request.company_name
    ));

    let candidates = search::discover_urls(&request.symbol, &request.company_name).await;
    let fetch = FetchConfig::from_settings();
    let delay = Duration::from_millis(SETTINGS.scraper.fetch_delay_ms);
    let limit = candidates.len().min(SETTINGS.scraper.max_sources);
    let observations = gather_observations(&candidates[..limit], &fetch, delay).await;

    logging::info_file_async(format!(
        "Consolidating {} observations for {}",
        observations.len(),
        request.symbol
    ));

    consolidate::consolidate(&observations, request)
}

/// Scrapes each candidate in order with a politeness pause between fetches.
/// A failed source contributes nothing; the loop always runs to the end.
async fn gather_observations(
    candidates: &[CandidateUrl],
    fetch: &FetchConfig,
    delay: Duration,
) -> Vec<Observation> {
    let mut observations = Vec::with_capacity(candidates.len());

    for (i, candidate) in candidates.iter().enumerate() {
        match scrape(candidate, fetch).await {
            Ok(Some(observation)) => {
                logging::info_file_async(format!("Scraped quote data from {}", candidate.source));
                observations.push(observation);
            }
            Ok(None) => {
                logging::warn_file_async(format!(
                    "No usable quote data from {} ({})",
                    candidate.source, candidate.url
                ));
            }
            Err(why) => {
                logging::warn_file_async(format!(
                    "Failed to scrape {} because {:?}",
                    candidate.source, why
                ));
            }
        }

        if i + 1 < candidates.len() {
            tokio::time::sleep(delay).await;
        }
    }

    observations
}

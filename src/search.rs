use anyhow::{anyhow, bail, Result};
use serde::Deserialize;

use crate::{
    config::SETTINGS,
    crawler,
    declare::CandidateUrl,
    logging,
    util::http::{self, FetchConfig},
};

const SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    link: Option<String>,
}

/// Candidate URLs for a symbol, in ranking order.
///
/// Uses the search provider when credentials are configured and falls back to
/// the static URL list on missing credentials, transport errors, or non-200
/// responses. Discovery failure is never surfaced to the caller.
pub async fn discover_urls(symbol: &str, company_name: &str) -> Vec<CandidateUrl> {
    let (api_key, engine_id) = match SETTINGS.google.search_credentials() {
        Some(credentials) => credentials,
        None => {
            logging::warn_file_async(
                "Search credentials not configured, using fallback URLs".to_string(),
            );
            return fallback_urls(symbol);
        }
    };

    match search(symbol, company_name, api_key, engine_id).await {
        Ok(candidates) => {
            logging::info_file_async(format!(
                "Found {} relevant financial URLs for {}",
                candidates.len(),
                symbol
            ));
            candidates
        }
        Err(why) => {
            logging::warn_file_async(format!(
                "Search failed because {:?}, using fallback URLs",
                why
            ));
            fallback_urls(symbol)
        }
    }
}

async fn search(
    symbol: &str,
    company_name: &str,
    api_key: &str,
    engine_id: &str,
) -> Result<Vec<CandidateUrl>> {
    let query = format!("{company_name} {symbol} stock price NSE BSE live");
    let url = format!(
        "{SEARCH_ENDPOINT}?key={api_key}&cx={engine_id}&q={query}&num=10&gl=in&lr=lang_en",
        query = urlencoding::encode(&query)
    );

    let response = http::get_response(&url, &FetchConfig::from_settings()).await?;
    if !response.status().is_success() {
        bail!("Search API error: {}", response.status());
    }

    let body = response
        .json::<SearchResponse>()
        .await
        .map_err(|why| anyhow!("Error parsing search response JSON: {:?}", why))?;

    Ok(to_candidates(
        body.items.into_iter().filter_map(|item| item.link),
    ))
}

/// Keeps allow-listed links, attributes them to a source, and caps the list
/// at the configured per-request source bound.
fn to_candidates(links: impl Iterator<Item = String>) -> Vec<CandidateUrl> {
    let mut candidates: Vec<CandidateUrl> = links
        .filter(|link| crawler::is_financial_domain(link))
        .map(|link| CandidateUrl {
            source: crawler::resolve_source_name(&link),
            url: link,
        })
        .collect();
    candidates.truncate(SETTINGS.scraper.max_sources);

    candidates
}

/// Static candidate list used when the search provider is unavailable.
/// Deterministic for a given symbol.
pub fn fallback_urls(symbol: &str) -> Vec<CandidateUrl> {
    vec![
        CandidateUrl {
            url: format!(
                "https://www.moneycontrol.com/india/stockpricequote/{}",
                symbol.to_lowercase()
            ),
            source: "MoneyControl".to_string(),
        },
        CandidateUrl {
            url: format!("https://www.nseindia.com/get-quotes/equity?symbol={symbol}"),
            source: "NSE India".to_string(),
        },
        CandidateUrl {
            url: format!("https://finance.yahoo.com/quote/{symbol}.NS"),
            source: "Yahoo Finance".to_string(),
        },
        CandidateUrl {
            url: format!(
                "https://economictimes.indiatimes.com/markets/stocks/stock-quotes?ticker={symbol}"
            ),
            source: "Economic Times".to_string(),
        },
        CandidateUrl {
            url: "https://www.livemint.com/market/stock-market-news".to_string(),
            source: "LiveMint".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_are_filtered_and_capped_at_max_sources() {
        let links = [
            "https://www.moneycontrol.com/india/stockpricequote/tcs",
            "https://en.wikipedia.org/wiki/Tata_Consultancy_Services",
            "https://www.nseindia.com/get-quotes/equity?symbol=TCS",
            "https://finance.yahoo.com/quote/TCS.NS",
            "https://example.com/tcs-share-price",
            "https://economictimes.indiatimes.com/markets/stocks/stock-quotes?ticker=TCS",
            "https://www.livemint.com/market/tcs",
            "https://www.business-standard.com/markets/tcs",
            "https://www.zeebiz.com/markets/stocks/tcs",
        ];
        let candidates = to_candidates(links.iter().map(|link| link.to_string()));

        assert_eq!(candidates.len(), SETTINGS.scraper.max_sources);
        assert!(candidates
            .iter()
            .all(|candidate| crawler::is_financial_domain(&candidate.url)));
        assert_eq!(candidates[0].source, "MoneyControl");
        assert_eq!(candidates[1].source, "NSE India");
    }

    #[tokio::test]
    async fn test_discovery_without_credentials_uses_fallback() {
        dotenv::dotenv().ok();
        if SETTINGS.google.search_credentials().is_some() {
            return;
        }

        let candidates = discover_urls("TCS", "Tata Consultancy Services").await;

        assert_eq!(candidates, fallback_urls("TCS"));
    }

    #[test]
    fn test_fallback_urls_are_deterministic() {
        assert_eq!(fallback_urls("TCS"), fallback_urls("TCS"));
    }

    #[test]
    fn test_fallback_urls_substitute_symbol() {
        let candidates = fallback_urls("TCS");

        assert_eq!(candidates.len(), 5);
        assert_eq!(
            candidates[0].url,
            "https://www.moneycontrol.com/india/stockpricequote/tcs"
        );
        assert_eq!(candidates[0].source, "MoneyControl");
        assert_eq!(
            candidates[1].url,
            "https://www.nseindia.com/get-quotes/equity?symbol=TCS"
        );
        assert_eq!(candidates[2].url, "https://finance.yahoo.com/quote/TCS.NS");
        assert!(candidates[3].url.ends_with("ticker=TCS"));
        assert_eq!(candidates[4].source, "LiveMint");
    }

    #[test]
    fn test_fallback_urls_pass_the_domain_filter() {
        for candidate in fallback_urls("INFY") {
            assert!(
                crawler::is_financial_domain(&candidate.url),
                "{} should be allow-listed",
                candidate.url
            );
        }
    }
}

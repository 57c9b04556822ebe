use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use once_cell::sync::{Lazy, OnceCell};
use reqwest::{header, Client, Method, Response};
use tokio::sync::Semaphore;

use crate::{config::SETTINGS, logging::Logger};

pub mod element;
pub mod user_agent;

/// Limits process-wide concurrent requests so target sites are not hammered.
static SEMAPHORE: Lazy<Semaphore> = Lazy::new(|| Semaphore::new(4));

/// A singleton instance of the reqwest client.
static CLIENT: OnceCell<Client> = OnceCell::new();

static LOGGER: Lazy<Logger> = Lazy::new(|| Logger::new("http"));

/// Per-request fetch settings. Passed explicitly into every fetch step
/// instead of living in shared implicit session state.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub headers: header::HeaderMap,
}

impl FetchConfig {
    pub fn from_settings() -> Self {
        FetchConfig {
            timeout: Duration::from_secs(SETTINGS.scraper.timeout_seconds),
            headers: browser_headers(),
        }
    }
}

/// Standard headers a browser would send alongside the User-Agent.
fn browser_headers() -> header::HeaderMap {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        header::HeaderValue::from_static("en-US,en;q=0.5"),
    );
    headers.insert(
        header::CONNECTION,
        header::HeaderValue::from_static("keep-alive"),
    );
    headers.insert(
        header::UPGRADE_INSECURE_REQUESTS,
        header::HeaderValue::from_static("1"),
    );

    headers
}

/// Returns the reqwest client singleton instance or creates one if it doesn't
/// exist. The overall request timeout is set per request from `FetchConfig`.
fn get_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .brotli(true)
            .gzip(true)
            .connect_timeout(Duration::from_secs(8))
            .tcp_nodelay(true)
            .pool_max_idle_per_host(8)
            .pool_idle_timeout(Duration::from_secs(90))
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(5))
            .referer(true)
            .user_agent(user_agent::gen_random_ua())
            .build()
            .map_err(|why| anyhow!("Failed to create reqwest client: {:?}", why))
    })
}

/// Performs an HTTP GET request and returns the raw response.
pub async fn get_response(url: &str, fetch: &FetchConfig) -> Result<Response> {
    send(Method::GET, url, fetch).await
}

/// Performs an HTTP GET request and returns the response body as text.
pub async fn get(url: &str, fetch: &FetchConfig) -> Result<String> {
    get_response(url, fetch)
        .await?
        .text()
        .await
        .map_err(|why| anyhow!("Error parsing response text: {:?}", why))
}

/// Sends one request. A failed source is dropped by the pipeline rather than
/// retried, so there is deliberately no retry loop here.
async fn send(method: Method, url: &str, fetch: &FetchConfig) -> Result<Response> {
    let visit_log = format!("{method}:{url}");
    let client = get_client()?;
    let request = client
        .request(method, url)
        .headers(fetch.headers.clone())
        .timeout(fetch.timeout);

    let permit = SEMAPHORE.acquire().await;
    let start = Instant::now();
    let result = request.send().await;
    let elapsed = start.elapsed().as_millis();
    drop(permit);

    match result {
        Ok(response) => {
            LOGGER.info(format!("{} {} ms", visit_log, elapsed));
            Ok(response)
        }
        Err(why) => {
            LOGGER.error(format!("{} failed because {:?}. {} ms", visit_log, why, elapsed));
            Err(anyhow!(
                "Failed to send request to {} because {:?}",
                url,
                why
            ))
        }
    }
}

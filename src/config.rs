use std::{env, path::PathBuf};

use ::config::{Config, File};
use anyhow::Result;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

const CONFIG_PATH: &str = "app.json";

const GOOGLE_SEARCH_API_KEY: &str = "GOOGLE_SEARCH_API_KEY";
const GOOGLE_SEARCH_ENGINE_ID: &str = "GOOGLE_SEARCH_ENGINE_ID";
const HTTP_PORT: &str = "HTTP_PORT";
const SCRAPER_MAX_SOURCES: &str = "SCRAPER_MAX_SOURCES";
const SCRAPER_FETCH_DELAY_MS: &str = "SCRAPER_FETCH_DELAY_MS";
const SCRAPER_TIMEOUT_SECONDS: &str = "SCRAPER_TIMEOUT_SECONDS";

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct App {
    #[serde(default)]
    pub google: Google,
    #[serde(default)]
    pub scraper: Scraper,
    #[serde(default)]
    pub system: System,
}

/// Google Custom Search credentials. Both fields are optional; when either is
/// missing, URL discovery uses the static fallback list instead.
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct Google {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub search_engine_id: String,
}

impl Google {
    pub fn search_credentials(&self) -> Option<(&str, &str)> {
        if self.api_key.is_empty() || self.search_engine_id.is_empty() {
            return None;
        }

        Some((&self.api_key, &self.search_engine_id))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Scraper {
    /// Upper bound on sources scraped per request.
    #[serde(default = "default_max_sources")]
    pub max_sources: usize,
    /// Politeness pause between source fetches.
    #[serde(default = "default_fetch_delay_ms")]
    pub fetch_delay_ms: u64,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for Scraper {
    fn default() -> Self {
        Scraper {
            max_sources: default_max_sources(),
            fetch_delay_ms: default_fetch_delay_ms(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct System {
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

impl Default for System {
    fn default() -> Self {
        System {
            http_port: default_http_port(),
        }
    }
}

fn default_max_sources() -> usize {
    5
}

fn default_fetch_delay_ms() -> u64 {
    1000
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_http_port() -> u16 {
    5000
}

pub static SETTINGS: Lazy<App> = Lazy::new(|| App::get().expect("Config error"));

impl App {
    fn get() -> Result<Self> {
        let config_path = PathBuf::from(CONFIG_PATH);
        if config_path.exists() {
            let app: App = Config::builder()
                .add_source(File::from(config_path))
                .build()?
                .try_deserialize()?;
            return Ok(app.override_with_env());
        }

        Ok(App::default().override_with_env())
    }

    /// Env values win over values from the config file.
    fn override_with_env(mut self) -> Self {
        if let Ok(api_key) = env::var(GOOGLE_SEARCH_API_KEY) {
            self.google.api_key = api_key;
        }

        if let Ok(engine_id) = env::var(GOOGLE_SEARCH_ENGINE_ID) {
            self.google.search_engine_id = engine_id;
        }

        if let Ok(port) = env::var(HTTP_PORT) {
            self.system.http_port = port.parse().unwrap_or_else(|_| default_http_port());
        }

        if let Ok(max_sources) = env::var(SCRAPER_MAX_SOURCES) {
            self.scraper.max_sources = max_sources
                .parse()
                .unwrap_or_else(|_| default_max_sources());
        }

        if let Ok(delay) = env::var(SCRAPER_FETCH_DELAY_MS) {
            self.scraper.fetch_delay_ms =
                delay.parse().unwrap_or_else(|_| default_fetch_delay_ms());
        }

        if let Ok(timeout) = env::var(SCRAPER_TIMEOUT_SECONDS) {
            self.scraper.timeout_seconds = timeout
                .parse()
                .unwrap_or_else(|_| default_timeout_seconds());
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let app = App::default();
        assert_eq!(app.scraper.max_sources, 5);
        assert_eq!(app.scraper.fetch_delay_ms, 1000);
        assert_eq!(app.scraper.timeout_seconds, 10);
        assert_eq!(app.system.http_port, 5000);
        assert!(app.google.search_credentials().is_none());
    }

    #[test]
    fn test_search_credentials_require_both_fields() {
        let google = Google {
            api_key: "key".to_string(),
            search_engine_id: String::new(),
        };
        assert!(google.search_credentials().is_none());

        let google = Google {
            api_key: "key".to_string(),
            search_engine_id: "cx".to_string(),
        };
        assert_eq!(google.search_credentials(), Some(("key", "cx")));
    }
}

pub mod config;
pub mod consolidate;
pub mod crawler;
pub mod declare;
pub mod logging;
pub mod search;
pub mod util;
pub mod web;

use std::env;

use anyhow::Result;

use crate::declare::QuoteRequest;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first() {
        // CLI mode: stock_scraper <SYMBOL> [COMPANY_NAME]
        Some(symbol) => {
            let symbol = symbol.trim().to_uppercase();
            let company_name = args
                .get(1)
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| symbol.clone());
            let request = QuoteRequest {
                symbol,
                company_name,
            };
            let quote = crawler::collect_quote(&request).await;
            println!("{}", serde_json::to_string_pretty(&quote)?);
            Ok(())
        }
        // Web-service mode
        None => web::serve().await,
    }
}

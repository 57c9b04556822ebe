use anyhow::{anyhow, Result};
use axum::{
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::{config::SETTINGS, crawler, declare::QuoteRequest, logging};

#[derive(Debug, Default, Deserialize)]
pub struct ScrapeParams {
    #[serde(default)]
    symbol: String,
    #[serde(default)]
    company_name: Option<String>,
}

pub fn router() -> Router {
    Router::new()
        .route(
            "/api/scrape-stock",
            get(scrape_stock_query).post(scrape_stock_json),
        )
        .route("/api/health", get(health))
        .layer(CorsLayer::permissive())
}

pub async fn serve() -> Result<()> {
    let address = format!("0.0.0.0:{}", SETTINGS.system.http_port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|why| anyhow!("Failed to bind {} because {:?}", address, why))?;

    logging::info_console(format!("stock-scraper listening on {}", address));

    axum::serve(listener, router())
        .await
        .map_err(|why| anyhow!("Server error: {:?}", why))?;

    Ok(())
}

async fn scrape_stock_json(Json(params): Json<ScrapeParams>) -> Response {
    handle(params).await
}

async fn scrape_stock_query(Query(params): Query<ScrapeParams>) -> Response {
    handle(params).await
}

async fn handle(params: ScrapeParams) -> Response {
    let symbol = params.symbol.trim().to_uppercase();
    if symbol.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Symbol is required"})),
        )
            .into_response();
    }

    let company_name = params
        .company_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| symbol.clone());
    let request = QuoteRequest {
        symbol,
        company_name,
    };

    // The pipeline itself degrades failures to an all-zero quote; a join
    // error here means the task panicked, which surfaces as a server error.
    match tokio::spawn(async move { crawler::collect_quote(&request).await }).await {
        Ok(quote) => Json(quote).into_response(),
        Err(why) => {
            logging::error_file_async(format!("Quote pipeline panicked: {:?}", why));
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": why.to_string()})),
            )
                .into_response()
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "healthy", "service": "stock-scraper"}))
}

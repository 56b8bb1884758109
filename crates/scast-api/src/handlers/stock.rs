//! Stock photo search proxy.
//!
//! Thin pass-through to an external stock photo provider. The provider URL
//! and key come from the environment; an unconfigured provider degrades to
//! a 503 rather than failing startup.

use axum::extract::{Query, State};
use axum::http::header;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const DEFAULT_SEARCH_URL: &str = "https://api.pexels.com/v1/search";

#[derive(Debug, Deserialize)]
pub struct StockQuery {
    pub query: String,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_per_page() -> u32 {
    12
}

/// Upstream response shape (Pexels-compatible).
#[derive(Debug, Deserialize)]
struct UpstreamResponse {
    #[serde(default)]
    photos: Vec<UpstreamPhoto>,
    #[serde(default)]
    total_results: u64,
}

#[derive(Debug, Deserialize)]
struct UpstreamPhoto {
    id: u64,
    width: u32,
    height: u32,
    #[serde(default)]
    photographer: String,
    src: UpstreamSrc,
    #[serde(default)]
    alt: String,
}

#[derive(Debug, Deserialize)]
struct UpstreamSrc {
    original: String,
    #[serde(default)]
    large: Option<String>,
    #[serde(default)]
    medium: Option<String>,
}

#[derive(Serialize)]
pub struct StockPhoto {
    pub id: u64,
    pub width: u32,
    pub height: u32,
    pub photographer: String,
    pub url: String,
    pub thumbnail: String,
    pub alt: String,
}

#[derive(Serialize)]
pub struct StockSearchResponse {
    pub photos: Vec<StockPhoto>,
    pub total_results: u64,
}

/// Search the stock photo provider.
pub async fn search_stock_photos(
    State(state): State<AppState>,
    Query(query): Query<StockQuery>,
) -> ApiResult<Json<StockSearchResponse>> {
    if query.query.trim().is_empty() {
        return Err(ApiError::bad_request("Search query is required"));
    }

    let api_key = std::env::var("STOCK_PHOTO_API_KEY")
        .map_err(|_| ApiError::unavailable("Stock photo provider not configured"))?;
    let search_url =
        std::env::var("STOCK_PHOTO_API_URL").unwrap_or_else(|_| DEFAULT_SEARCH_URL.to_string());

    let response = state
        .http
        .get(&search_url)
        .header(header::AUTHORIZATION.as_str(), api_key)
        .query(&[
            ("query", query.query.as_str()),
            ("per_page", &query.per_page.to_string()),
        ])
        .send()
        .await
        .map_err(|e| ApiError::unavailable(format!("Stock photo provider unreachable: {}", e)))?;

    if !response.status().is_success() {
        return Err(ApiError::unavailable(format!(
            "Stock photo provider returned {}",
            response.status()
        )));
    }

    let upstream: UpstreamResponse = response
        .json()
        .await
        .map_err(|e| ApiError::unavailable(format!("Stock photo provider response invalid: {}", e)))?;

    let photos = upstream
        .photos
        .into_iter()
        .map(|p| {
            let url = p.src.large.clone().unwrap_or_else(|| p.src.original.clone());
            let thumbnail = p.src.medium.clone().unwrap_or_else(|| url.clone());
            StockPhoto {
                id: p.id,
                width: p.width,
                height: p.height,
                photographer: p.photographer,
                url,
                thumbnail,
                alt: p.alt,
            }
        })
        .collect();

    Ok(Json(StockSearchResponse {
        photos,
        total_results: upstream.total_results,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_parsing_with_missing_optionals() {
        let json = r#"{
            "photos": [{
                "id": 42,
                "width": 1920,
                "height": 1080,
                "src": {"original": "https://example.com/42.jpg"}
            }],
            "total_results": 1
        }"#;
        let parsed: UpstreamResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.photos.len(), 1);
        assert!(parsed.photos[0].src.large.is_none());
        assert!(parsed.photos[0].photographer.is_empty());
    }
}

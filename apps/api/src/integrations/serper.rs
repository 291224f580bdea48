//! Web-mention lookup via the Serper search API. One POST, no retries;
//! the organic result list is the mention signal.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

const SERPER_API_URL: &str = "https://google.serper.dev/search";

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    q: &'a str,
    num: u32,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic: Vec<OrganicResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganicResult {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MentionReport {
    pub query: String,
    pub mention_count: usize,
    pub top_sources: Vec<OrganicResult>,
}

pub async fn count_mentions(
    http: &Client,
    api_key: Option<&str>,
    query: &str,
) -> Result<MentionReport, AppError> {
    let api_key = api_key.ok_or(AppError::NotConfigured("SERPER_API_KEY"))?;

    let response = http
        .post(SERPER_API_URL)
        .header("X-API-KEY", api_key)
        .json(&SearchRequest { q: query, num: 20 })
        .send()
        .await
        .map_err(|e| AppError::Upstream(format!("Serper request failed: {e}")))?;

    match response.status() {
        StatusCode::TOO_MANY_REQUESTS => Err(AppError::RateLimited("Serper".to_string())),
        status if !status.is_success() => {
            Err(AppError::Upstream(format!("Serper returned status {status}")))
        }
        _ => {
            let body: SearchResponse = response
                .json()
                .await
                .map_err(|e| AppError::Upstream(format!("Serper response parse failed: {e}")))?;
            Ok(MentionReport {
                query: query.to_string(),
                mention_count: body.organic.len(),
                top_sources: body.organic.into_iter().take(5).collect(),
            })
        }
    }
}

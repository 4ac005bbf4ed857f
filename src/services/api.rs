//! Backend REST API client
//!
//! The dashboard only reads from the backend. [`DashboardApi`] is the seam the
//! loader depends on; [`HttpApiClient`] is the production implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::types::{Collection, DashboardError, ExecutionLogRecord, ResourceRef, Result, SummaryStats};

/// API version prefix shared by every endpoint
const API_PREFIX: &str = "/api/v1";

/// Longest error body echoed back in an [`DashboardError::Api`] message
const MAX_ERROR_BODY: usize = 200;

/// Read-only operations the dashboard needs from the backend
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn list_models(&self) -> Result<Collection<ResourceRef>>;
    async fn list_prompts(&self) -> Result<Collection<ResourceRef>>;
    async fn list_api_keys(&self) -> Result<Collection<ResourceRef>>;
    async fn list_workflows(&self) -> Result<Collection<ResourceRef>>;
    async fn list_credential_providers(&self) -> Result<Collection<ResourceRef>>;
    async fn get_execution_stats(&self) -> Result<SummaryStats>;
    async fn list_execution_logs(&self, limit: usize) -> Result<Collection<ExecutionLogRecord>>;
}

/// reqwest-backed [`DashboardApi`]
pub struct HttpApiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("execdash/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|key| !key.is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/models`
    fn endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = self.endpoint(path);
        let mut request = self.client.get(&url).query(query);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        tracing::debug!(%url, "GET");
        let response = request.send().await.map_err(|e| {
            tracing::error!("Failed to send GET request to {}: {}", url, e);
            DashboardError::Http(e)
        })?;

        let status = response.status();
        let body = response.text().await?;
        decode_body(status, &body)
    }
}

/// Turn a response status and body into a typed value or an API error
fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    if !status.is_success() {
        let message: String = body.chars().take(MAX_ERROR_BODY).collect();
        return Err(DashboardError::Api {
            status: status.as_u16(),
            message: if message.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                message
            },
        });
    }
    serde_json::from_str(body).map_err(|e| DashboardError::Decode(e.to_string()))
}

#[async_trait]
impl DashboardApi for HttpApiClient {
    async fn list_models(&self) -> Result<Collection<ResourceRef>> {
        self.get_json("/models", &[]).await
    }

    async fn list_prompts(&self) -> Result<Collection<ResourceRef>> {
        self.get_json("/prompts", &[]).await
    }

    async fn list_api_keys(&self) -> Result<Collection<ResourceRef>> {
        self.get_json("/api-keys", &[]).await
    }

    async fn list_workflows(&self) -> Result<Collection<ResourceRef>> {
        self.get_json("/workflows", &[]).await
    }

    async fn list_credential_providers(&self) -> Result<Collection<ResourceRef>> {
        self.get_json("/credential-providers", &[]).await
    }

    async fn get_execution_stats(&self) -> Result<SummaryStats> {
        self.get_json("/executions/stats", &[]).await
    }

    async fn list_execution_logs(&self, limit: usize) -> Result<Collection<ExecutionLogRecord>> {
        self.get_json("/executions/logs", &[("limit", limit.to_string())])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_config(base_url: &str, api_key: Option<&str>) -> ApiConfig {
        ApiConfig {
            base_url: base_url.into(),
            api_key: api_key.map(String::from),
            timeout_secs: 5,
        }
    }

    #[test]
    fn test_endpoint_joins_prefix() {
        let client = HttpApiClient::new(&api_config("http://localhost:8080", None)).unwrap();
        assert_eq!(
            client.endpoint("/executions/stats"),
            "http://localhost:8080/api/v1/executions/stats"
        );
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = HttpApiClient::new(&api_config("https://admin.example.com/", None)).unwrap();
        assert_eq!(client.base_url(), "https://admin.example.com");
        assert_eq!(
            client.endpoint("/models"),
            "https://admin.example.com/api/v1/models"
        );
    }

    #[test]
    fn test_empty_api_key_ignored() {
        let client = HttpApiClient::new(&api_config("http://x", Some(""))).unwrap();
        assert!(client.api_key.is_none());
    }

    #[test]
    fn test_decode_body_success() {
        let stats: SummaryStats =
            decode_body(StatusCode::OK, r#"{"total_executions": 3}"#).unwrap();
        assert_eq!(stats.total_executions, 3);
    }

    #[test]
    fn test_decode_body_logs_collection() {
        let logs: Collection<ExecutionLogRecord> = decode_body(
            StatusCode::OK,
            r#"{"items": [{"created_at": "2024-03-14T00:00:00Z", "status": "success"}], "total": 1}"#,
        )
        .unwrap();
        assert_eq!(logs.items.len(), 1);
        assert!(logs.items[0].is_success());
    }

    #[test]
    fn test_decode_body_logs_keeps_good_records_beside_bad_ones() {
        use crate::services::LogAggregator;
        use chrono::{TimeZone, Utc};

        let good = r#"{"created_at": "2024-03-14T10:00:00Z", "cost_micros": 2000000,
            "token_usage": {"total_tokens": 10}, "status": "success",
            "execution_type": "model", "resource_id": "m1", "resource_name": "gpt-4"}"#;
        let reference = Utc.with_ymd_and_hms(2024, 3, 14, 12, 0, 0).unwrap();

        for bad in [
            r#"{"created_at": "2024-03-14T11:00:00Z", "cost_micros": 1500000.0}"#,
            r#"{"created_at": null, "status": "success"}"#,
            r#"{"created_at": "2024-03-14T11:00:00Z", "token_usage": {"total_tokens": -1}}"#,
            r#""not a record""#,
        ] {
            let body = format!(r#"{{"items": [{}, {}], "total": 2}}"#, good, bad);
            let logs: Collection<ExecutionLogRecord> = decode_body(StatusCode::OK, &body).unwrap();
            assert!(!logs.items.is_empty(), "good record lost beside {}", bad);
            assert_eq!(logs.items[0].resource_name.as_deref(), Some("gpt-4"));

            let buckets = LogAggregator::bucket_by_day(&logs.items, 14, reference);
            let today = buckets.last().unwrap();
            assert!(today.executions >= 1, "no executions beside {}", bad);
            assert_eq!(
                LogAggregator::top_model_usage(&logs.items, 10)[0].model,
                "gpt-4"
            );
        }
    }

    #[test]
    fn test_decode_body_error_status() {
        let err = decode_body::<SummaryStats>(StatusCode::UNAUTHORIZED, "token expired").unwrap_err();
        match err {
            DashboardError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "token expired");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_body_error_status_empty_body() {
        let err = decode_body::<SummaryStats>(StatusCode::NOT_FOUND, "").unwrap_err();
        assert!(err.to_string().contains("Not Found"));
    }

    #[test]
    fn test_decode_body_malformed_json() {
        let err = decode_body::<SummaryStats>(StatusCode::OK, "<html>").unwrap_err();
        assert!(matches!(err, DashboardError::Decode(_)));
    }
}

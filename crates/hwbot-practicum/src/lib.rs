//! Yandex Practicum adapter (homework statuses).
//!
//! Implements the `hwbot-core` HomeworkSource port with a single authenticated
//! GET per poll.

use async_trait::async_trait;
use tracing::debug;

use hwbot_core::{config::Config, domain::Timestamp, errors::Error, ports::HomeworkSource, Result};

#[derive(Clone)]
pub struct PracticumClient {
    endpoint: String,
    token: String,
    http: reqwest::Client,
}

impl PracticumClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Unexpected(format!("http client build error: {e}")))?;
        Ok(Self {
            endpoint: endpoint.into(),
            token: token.into(),
            http,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        Self::new(cfg.endpoint.clone(), cfg.practicum_token.clone())
    }
}

#[async_trait]
impl HomeworkSource for PracticumClient {
    #[tracing::instrument(skip_all)]
    async fn fetch(&self, from_date: Timestamp) -> Result<serde_json::Value> {
        debug!(endpoint = %self.endpoint, from_date, "requesting homework statuses");

        let resp = self
            .http
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| Error::transport(None, format!("request to {} failed: {e}", self.endpoint)))?;

        let status = resp.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("Unknown");
            return Err(Error::transport(
                Some(status.as_u16()),
                format!("HTTP status is not 200 OK: {reason} ({})", status.as_u16()),
            ));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| Error::transport(Some(status.as_u16()), format!("failed to read response body: {e}")))?;

        serde_json::from_str(&body).map_err(|e| {
            Error::transport(
                Some(status.as_u16()),
                format!(
                    "response is not valid JSON: {e}: {}",
                    body.chars().take(200).collect::<String>()
                ),
            )
        })
    }
}

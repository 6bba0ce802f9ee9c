//! HTTP client for the calculation log API.
//!
//! Used by the pad to persist finished calculations and repaint the recent
//! list. Configuration is via environment variables:
//! - `TALLYPAD_URL` - Base URL (default: `http://localhost:3000`)

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{Calculation, CreateCalculationInput};

/// Default URL for local development.
const DEFAULT_URL: &str = "http://localhost:3000";

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    Server(String),
}

/// HTTP client for the calculation log API.
#[derive(Debug, Clone)]
pub struct LogClient {
    base_url: String,
    client: Client,
}

impl LogClient {
    /// Create client from environment variables.
    pub fn from_env() -> Self {
        let base_url = std::env::var("TALLYPAD_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        Self::new(base_url)
    }

    /// Create with an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    /// Handle response, converting HTTP errors to ClientError.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            match status {
                StatusCode::BAD_REQUEST => Err(ClientError::BadRequest(body)),
                _ => Err(ClientError::Server(format!("{}: {}", status, body))),
            }
        }
    }

    /// Persist a finished calculation.
    pub async fn save_calculation(
        &self,
        expression: &str,
        result: &str,
    ) -> Result<Calculation, ClientError> {
        let input = CreateCalculationInput {
            expression: expression.to_string(),
            result: result.to_string(),
        };
        let response = self
            .client
            .post(format!("{}/calculations", self.base_url))
            .json(&input)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// The most recent calculations, newest first. `None` uses the server
    /// default limit.
    pub async fn recent_calculations(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<Calculation>, ClientError> {
        let mut request = self
            .client
            .get(format!("{}/calculations/recent", self.base_url));
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// All calculations in insertion order.
    pub async fn all_calculations(&self) -> Result<Vec<Calculation>, ClientError> {
        let response = self
            .client
            .get(format!("{}/calculations", self.base_url))
            .send()
            .await?;
        self.handle_response(response).await
    }
}

//! Blocking HTTP client with a bounded request timeout

use serde::Serialize;
use serde_json::Value as JsonValue;
use std::time::Duration;

use crate::api::error::ApiError;
use crate::core::Config;

/// Client for the marketplace backend
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        Self::with_base_url(config.api_url(), config.timeout())
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Build)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL for an endpoint path
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn get(&self, path: &str) -> Result<JsonValue, ApiError> {
        let url = self.endpoint(path);
        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;
        Self::handle(url, response)
    }

    pub fn post(&self, path: &str, body: &impl Serialize) -> Result<JsonValue, ApiError> {
        let url = self.endpoint(path);
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;
        Self::handle(url, response)
    }

    fn handle(url: String, response: reqwest::blocking::Response) -> Result<JsonValue, ApiError> {
        let status = response.status();
        let text = response.text().map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: backend_message(&text, status.as_u16()),
            });
        }
        serde_json::from_str(&text).map_err(|e| ApiError::Decode {
            url,
            message: e.to_string(),
        })
    }
}

/// Pull a human-readable message out of a backend error body.
///
/// The backend has shipped two error shapes across snapshots:
/// `{"error":{"message":...}}` and `{"message":[{"messages":[{"message":...}]}]}`.
fn backend_message(body: &str, status: u16) -> String {
    let value: JsonValue = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return format!("request failed with status {}", status),
    };

    if let Some(message) = value
        .pointer("/error/message")
        .or_else(|| value.pointer("/message/0/messages/0/message"))
        .or_else(|| value.get("message"))
        .and_then(JsonValue::as_str)
    {
        return message.to_string();
    }
    format!("request failed with status {}", status)
}

//! Automations fallback client.
//!
//! When no local assistant rule matches, the message is forwarded to an
//! external text-completion endpoint. One request, no retries; every failure
//! mode resolves to "no usable reply" and the caller falls back to the
//! static text.

use std::sync::Arc;

use serde::Deserialize;
use tracing::instrument;

use thiserror::Error;

/// Errors that can occur calling the automations endpoint.
#[derive(Debug, Error)]
pub enum AutomationsError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Response body shape: `{"result": "..."}`.
#[derive(Debug, Deserialize)]
struct AutomationsResponse {
    #[serde(default)]
    result: Option<String>,
}

/// Client for the automations text-completion endpoint.
#[derive(Clone)]
pub struct AutomationsClient {
    inner: Arc<AutomationsClientInner>,
}

struct AutomationsClientInner {
    client: reqwest::Client,
    url: String,
}

impl AutomationsClient {
    /// Create a new automations client.
    #[must_use]
    pub fn new(url: &str) -> Self {
        Self {
            inner: Arc::new(AutomationsClientInner {
                client: reqwest::Client::new(),
                url: url.to_owned(),
            }),
        }
    }

    /// Forward a message and return a usable reply, if the endpoint produced
    /// one.
    ///
    /// `Ok(None)` covers non-success statuses, missing `result` fields, and
    /// placeholder "not activated" bodies.
    ///
    /// # Errors
    ///
    /// Returns `AutomationsError::Http` when the request cannot be sent.
    #[instrument(skip(self, message))]
    pub async fn complete(&self, message: &str) -> Result<Option<String>, AutomationsError> {
        let response = self
            .inner
            .client
            .post(&self.inner.url)
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "Automations endpoint returned non-success");
            return Ok(None);
        }

        let text = response.text().await?;

        // The endpoint may answer with a JSON envelope or raw text
        let result = match serde_json::from_str::<AutomationsResponse>(&text) {
            Ok(body) => body.result,
            Err(_) => Some(text),
        };

        Ok(result.filter(|reply| {
            !reply.trim().is_empty() && !reply.contains("currently being tested or not activated")
        }))
    }
}

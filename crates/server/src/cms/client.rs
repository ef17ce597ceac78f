//! Contentstack REST client implementation.
//!
//! Uses `reqwest` directly against the Delivery and Management APIs. All
//! operations are single request/response: no retries, no backoff.

use std::sync::Arc;

use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::ContentstackConfig;

use super::CmsError;
use super::types::{CmsUserEntry, CmsUserFields, EntriesEnvelope, EntryEnvelope, ErrorEnvelope};

/// Content type holding user records.
const CONTENT_TYPE: &str = "signup_user";

/// Locale all entries are written and read in.
const LOCALE: &str = "en-us";

/// Client for the Contentstack Delivery and Management APIs.
///
/// Scoped to the `signup_user` content type; the credential store is the only
/// CMS consumer in this service.
#[derive(Clone)]
pub struct CmsClient {
    inner: Arc<CmsClientInner>,
}

struct CmsClientInner {
    client: reqwest::Client,
    delivery_base: &'static str,
    management_base: &'static str,
    api_key: String,
    delivery_token: String,
    management_token: Option<String>,
    environment: String,
}

impl CmsClient {
    /// Create a new Contentstack client.
    #[must_use]
    pub fn new(config: &ContentstackConfig) -> Self {
        Self {
            inner: Arc::new(CmsClientInner {
                client: reqwest::Client::new(),
                delivery_base: config.region.delivery_base_url(),
                management_base: config.region.management_base_url(),
                api_key: config.api_key.clone(),
                delivery_token: config.delivery_token.expose_secret().to_string(),
                management_token: config
                    .management_token
                    .as_ref()
                    .map(|t| t.expose_secret().to_string()),
                environment: config.environment.clone(),
            }),
        }
    }

    /// Whether a management token is configured.
    #[must_use]
    pub fn has_management_token(&self) -> bool {
        self.inner.management_token.is_some()
    }

    /// Check whether an entry with this email already exists.
    ///
    /// Checks the Delivery tier first, then the Management tier (entries
    /// created but not yet published are only visible there).
    ///
    /// # Errors
    ///
    /// Returns `CmsError` if a request cannot be sent or a success response
    /// cannot be parsed.
    #[instrument(skip(self, email))]
    pub async fn email_exists(&self, email: &str) -> Result<bool, CmsError> {
        let query = email_query(email);

        let response = self
            .inner
            .client
            .get(format!(
                "{}/content_types/{CONTENT_TYPE}/entries",
                self.inner.delivery_base
            ))
            .query(&[
                ("environment", self.inner.environment.as_str()),
                ("query", query.as_str()),
            ])
            .header("api_key", &self.inner.api_key)
            .header("access_token", &self.inner.delivery_token)
            .send()
            .await?;

        if response.status().is_success() {
            let body: EntriesEnvelope = response.json().await?;
            if !body.entries.is_empty() {
                return Ok(true);
            }
        }

        if let Some(token) = &self.inner.management_token {
            let response = self
                .inner
                .client
                .get(format!(
                    "{}/content_types/{CONTENT_TYPE}/entries",
                    self.inner.management_base
                ))
                .query(&[("query", query.as_str()), ("locale", LOCALE)])
                .header("api_key", &self.inner.api_key)
                .header("authorization", token)
                .send()
                .await?;

            if response.status().is_success() {
                let body: EntriesEnvelope = response.json().await?;
                return Ok(!body.entries.is_empty());
            }
        }

        Ok(false)
    }

    /// Find a user entry by email.
    ///
    /// Prefers the Management API so the entry includes the password field
    /// (the Delivery tier often omits it); falls back to the Delivery API,
    /// backfilling the password with a full entry fetch when possible.
    ///
    /// # Errors
    ///
    /// Returns `CmsError` if a request cannot be sent or a success response
    /// cannot be parsed.
    #[instrument(skip(self, email))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<CmsUserEntry>, CmsError> {
        let query = email_query(email);

        if let Some(token) = &self.inner.management_token {
            let response = self
                .inner
                .client
                .get(format!(
                    "{}/content_types/{CONTENT_TYPE}/entries",
                    self.inner.management_base
                ))
                .query(&[("query", query.as_str()), ("locale", LOCALE)])
                .header("api_key", &self.inner.api_key)
                .header("authorization", token)
                .send()
                .await?;

            if response.status().is_success() {
                let body: EntriesEnvelope = response.json().await?;
                if let Some(entry) = body.entries.into_iter().next() {
                    tracing::debug!("User entry found via Management API");
                    return Ok(Some(entry));
                }
            }
        }

        let response = self
            .inner
            .client
            .get(format!(
                "{}/content_types/{CONTENT_TYPE}/entries",
                self.inner.delivery_base
            ))
            .query(&[
                ("environment", self.inner.environment.as_str()),
                ("query", query.as_str()),
            ])
            .header("api_key", &self.inner.api_key)
            .header("access_token", &self.inner.delivery_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let body: EntriesEnvelope = response.json().await?;
        let Some(mut entry) = body.entries.into_iter().next() else {
            return Ok(None);
        };

        if entry.fields.password.is_none()
            && self.inner.management_token.is_some()
            && let Some(full) = self.get_entry(&entry.uid).await?
            && full.fields.password.is_some()
        {
            entry.fields.password = full.fields.password;
        }

        Ok(Some(entry))
    }

    /// Fetch a full entry via the Management API.
    ///
    /// Returns `None` without a management token or when the entry is not
    /// readable.
    ///
    /// # Errors
    ///
    /// Returns `CmsError` if the request cannot be sent or a success response
    /// cannot be parsed.
    #[instrument(skip(self))]
    pub async fn get_entry(&self, uid: &str) -> Result<Option<CmsUserEntry>, CmsError> {
        let Some(token) = &self.inner.management_token else {
            return Ok(None);
        };

        let response = self
            .inner
            .client
            .get(format!(
                "{}/content_types/{CONTENT_TYPE}/entries/{uid}",
                self.inner.management_base
            ))
            .query(&[("locale", LOCALE)])
            .header("api_key", &self.inner.api_key)
            .header("authorization", token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let body: EntryEnvelope = response.json().await?;
        Ok(Some(body.entry))
    }

    /// Create a new user entry and publish it.
    ///
    /// Publishing is best-effort: a publish failure is logged, not surfaced
    /// (the entry stays readable through the Management tier).
    ///
    /// # Errors
    ///
    /// Returns `CmsError::Api` when the API rejects the entry (for example a
    /// uniqueness violation).
    #[instrument(skip(self, fields), fields(username = %fields.username))]
    pub async fn create_user(&self, fields: &CmsUserFields) -> Result<CmsUserEntry, CmsError> {
        // The Management token is preferred; some stacks accept the delivery
        // token for writes in development
        let token = self
            .inner
            .management_token
            .as_deref()
            .unwrap_or(&self.inner.delivery_token);

        let response = self
            .inner
            .client
            .post(format!(
                "{}/content_types/{CONTENT_TYPE}/entries",
                self.inner.management_base
            ))
            .query(&[("locale", LOCALE)])
            .header("api_key", &self.inner.api_key)
            .header("authorization", token)
            .json(&serde_json::json!({ "entry": fields }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            tracing::error!(status = %status, message = %message, "Entry create failed");
            return Err(CmsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: EntryEnvelope = response.json().await?;
        tracing::info!(uid = %body.entry.uid, "User entry created");

        self.publish(&body.entry.uid).await;

        Ok(body.entry)
    }

    /// Update an entry (full record PUT) and re-publish it.
    ///
    /// # Errors
    ///
    /// Returns `CmsError::ManagementTokenRequired` without a management
    /// token, or `CmsError::Api` when the API rejects the update.
    #[instrument(skip(self, fields))]
    pub async fn update_user(&self, uid: &str, fields: &CmsUserFields) -> Result<(), CmsError> {
        let Some(token) = &self.inner.management_token else {
            return Err(CmsError::ManagementTokenRequired);
        };

        let response = self
            .inner
            .client
            .put(format!(
                "{}/content_types/{CONTENT_TYPE}/entries/{uid}",
                self.inner.management_base
            ))
            .query(&[("locale", LOCALE)])
            .header("api_key", &self.inner.api_key)
            .header("authorization", token)
            .json(&serde_json::json!({ "entry": fields }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = error_message(response).await;
            tracing::error!(status = %status, message = %message, "Entry update failed");
            return Err(CmsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        self.publish(uid).await;

        Ok(())
    }

    /// Publish an entry, logging failures instead of surfacing them.
    async fn publish(&self, uid: &str) {
        match self.try_publish(uid).await {
            Ok(()) => {}
            Err(e) => tracing::warn!(uid, error = %e, "Entry publish failed"),
        }
    }

    async fn try_publish(&self, uid: &str) -> Result<(), CmsError> {
        let Some(token) = &self.inner.management_token else {
            return Ok(());
        };

        // The publish payload wants the current version when we know it
        let version = self.get_entry(uid).await?.and_then(|e| e.version);

        let mut entry = serde_json::json!({
            "environments": [self.inner.environment],
            "locales": [LOCALE],
        });
        if let Some(v) = version {
            entry["version"] = v.into();
        }

        let response = self
            .inner
            .client
            .post(format!(
                "{}/content_types/{CONTENT_TYPE}/entries/{uid}/publish",
                self.inner.management_base
            ))
            .header("api_key", &self.inner.api_key)
            .header("authorization", token)
            .json(&serde_json::json!({ "entry": entry }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(uid, "Entry published");
            return Ok(());
        }

        let message = error_message(response).await;
        // A 422 for an entry that is already published is not a failure
        if status == reqwest::StatusCode::UNPROCESSABLE_ENTITY
            && (message.contains("already published")
                || message.contains("ENTRY_ALREADY_PUBLISHED"))
        {
            return Ok(());
        }

        Err(CmsError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Serialize the query-by-email parameter.
fn email_query(email: &str) -> String {
    serde_json::json!({ "email": email.to_lowercase() }).to_string()
}

/// Extract a readable message from an error response body.
async fn error_message(response: reqwest::Response) -> String {
    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorEnvelope>(&text) {
        Ok(envelope) => envelope
            .error_message
            .or(envelope.error_code)
            .unwrap_or_else(|| truncate(&text)),
        Err(_) => truncate(&text),
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_query_is_lowercased_json() {
        assert_eq!(
            email_query("User@Example.COM"),
            r#"{"email":"user@example.com"}"#
        );
    }

    #[test]
    fn test_truncate_caps_length() {
        let long = "x".repeat(500);
        assert_eq!(truncate(&long).len(), 200);
        assert_eq!(truncate("short"), "short");
    }
}

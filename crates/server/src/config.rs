//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `COFFEECORNER_ENCRYPTION_SECRET` - Credential cipher secret (min 32 chars, high entropy)
//!
//! ## Optional
//! - `COFFEECORNER_HOST` - Bind address (default: 127.0.0.1)
//! - `COFFEECORNER_PORT` - Listen port (default: 3000)
//! - `COFFEECORNER_BASE_URL` - Public URL (default: `http://127.0.0.1:3000`)
//! - `COFFEECORNER_DATA_DIR` - Directory for the JSON stores (default: data)
//! - `CONTENTSTACK_API_KEY` - Contentstack stack API key
//! - `CONTENTSTACK_DELIVERY_TOKEN` - Contentstack Delivery API token
//! - `CONTENTSTACK_MANAGEMENT_TOKEN` - Contentstack Management API token
//! - `CONTENTSTACK_ENVIRONMENT` - Target environment (default: development)
//! - `CONTENTSTACK_REGION` - API region, us or eu (default: us)
//! - `AUTOMATIONS_API_URL` - Assistant fallback text-completion endpoint
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry traces sample rate (default: 0.0)
//!
//! The credential store backend is selected by configuration presence: when
//! both `CONTENTSTACK_API_KEY` and `CONTENTSTACK_DELIVERY_TOKEN` are set the
//! CMS backend is used, otherwise credentials live in the local JSON store.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_ENCRYPTION_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the service
    pub base_url: String,
    /// Directory holding the JSON stores (users, carts)
    pub data_dir: PathBuf,
    /// Secret for the credential cipher and local digests
    pub encryption_secret: SecretString,
    /// Contentstack configuration; `None` selects the local credential store
    pub contentstack: Option<ContentstackConfig>,
    /// Assistant fallback text-completion endpoint
    pub automations_api_url: Option<String>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate
    pub sentry_traces_sample_rate: f32,
}

/// Contentstack API region.
///
/// Contentstack has no separate "staging" API host; staging is an environment
/// name inside the stack. The API host is determined by region only:
/// us = `.contentstack.io`, eu = `.contentstack.com`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    #[default]
    Us,
    Eu,
}

impl Region {
    /// Parse a region from its env var form (case-insensitive).
    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "us" => Some(Self::Us),
            "eu" => Some(Self::Eu),
            _ => None,
        }
    }

    /// Base URL of the Delivery API (CDN tier).
    #[must_use]
    pub const fn delivery_base_url(self) -> &'static str {
        match self {
            Self::Us => "https://cdn.contentstack.io/v3",
            Self::Eu => "https://cdn.contentstack.com/v3",
        }
    }

    /// Base URL of the Management API.
    #[must_use]
    pub const fn management_base_url(self) -> &'static str {
        match self {
            Self::Us => "https://api.contentstack.io/v3",
            Self::Eu => "https://api.contentstack.com/v3",
        }
    }
}

/// Contentstack credential-store configuration.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct ContentstackConfig {
    /// Stack API key (sent on every request)
    pub api_key: String,
    /// Delivery API access token
    pub delivery_token: SecretString,
    /// Management API token; enables create/update/publish and full entry reads
    pub management_token: Option<SecretString>,
    /// Environment name entries are published to (e.g., development, production)
    pub environment: String,
    /// API region
    pub region: Region,
}

impl std::fmt::Debug for ContentstackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentstackConfig")
            .field("api_key", &self.api_key)
            .field("delivery_token", &"[REDACTED]")
            .field(
                "management_token",
                &self.management_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("environment", &self.environment)
            .field("region", &self.region)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("COFFEECORNER_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("COFFEECORNER_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("COFFEECORNER_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("COFFEECORNER_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_env_or_default("COFFEECORNER_BASE_URL", "http://127.0.0.1:3000");
        let data_dir = PathBuf::from(get_env_or_default("COFFEECORNER_DATA_DIR", "data"));

        let encryption_secret = get_validated_secret("COFFEECORNER_ENCRYPTION_SECRET")?;
        validate_secret_length(&encryption_secret, "COFFEECORNER_ENCRYPTION_SECRET")?;

        let contentstack = ContentstackConfig::from_env()?;

        let automations_api_url = get_optional_env("AUTOMATIONS_API_URL");
        if let Some(raw) = &automations_api_url {
            url::Url::parse(raw).map_err(|e| {
                ConfigError::InvalidEnvVar("AUTOMATIONS_API_URL".to_string(), e.to_string())
            })?;
        }

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_env_or_default("SENTRY_SAMPLE_RATE", "1.0")
            .parse::<f32>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SENTRY_SAMPLE_RATE".to_string(), e.to_string())
            })?;
        let sentry_traces_sample_rate = get_env_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0")
            .parse::<f32>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SENTRY_TRACES_SAMPLE_RATE".to_string(), e.to_string())
            })?;

        Ok(Self {
            host,
            port,
            base_url,
            data_dir,
            encryption_secret,
            contentstack,
            automations_api_url,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the CMS credential backend is configured.
    #[must_use]
    pub const fn uses_cms_backend(&self) -> bool {
        self.contentstack.is_some()
    }

    /// Log a startup summary of what is configured (never the values).
    pub fn log_summary(&self) {
        match &self.contentstack {
            Some(cs) => {
                tracing::info!(
                    environment = %cs.environment,
                    region = ?cs.region,
                    management_token = cs.management_token.is_some(),
                    "Contentstack credential backend configured"
                );
            }
            None => {
                tracing::info!("Contentstack not configured - using local credential store");
            }
        }
        tracing::info!(
            configured = self.automations_api_url.is_some(),
            "Assistant fallback endpoint"
        );
        tracing::info!(data_dir = %self.data_dir.display(), "Data directory");
    }
}

impl ContentstackConfig {
    /// Build from environment; `None` when the API key or delivery token is absent.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let (Some(api_key), Some(delivery_token)) = (
            get_optional_env("CONTENTSTACK_API_KEY"),
            get_optional_env("CONTENTSTACK_DELIVERY_TOKEN"),
        ) else {
            return Ok(None);
        };

        let region_raw = get_env_or_default("CONTENTSTACK_REGION", "us");
        let region = Region::parse(&region_raw).ok_or_else(|| {
            ConfigError::InvalidEnvVar(
                "CONTENTSTACK_REGION".to_string(),
                format!("expected us or eu, got {region_raw}"),
            )
        })?;

        Ok(Some(Self {
            api_key,
            delivery_token: SecretString::from(delivery_token),
            management_token: get_optional_env("CONTENTSTACK_MANAGEMENT_TOKEN")
                .map(SecretString::from),
            environment: get_env_or_default("CONTENTSTACK_ENVIRONMENT", "development"),
            region,
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a secret meets minimum length requirements.
fn validate_secret_length(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_ENCRYPTION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_ENCRYPTION_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real secrets like API keys have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

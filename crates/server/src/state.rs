//! Application state shared across handlers.

use std::sync::Arc;

use crate::assistant::AutomationsClient;
use crate::catalog::Catalog;
use crate::cms::CmsClient;
use crate::config::ServerConfig;
use crate::services::auth::AuthService;
use crate::services::cart::CartService;
use crate::services::crypto::PasswordCipher;
use crate::storage::{JsonStore, StorageError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the catalog, credential backend, and cart store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    catalog: Catalog,
    auth: AuthService,
    carts: CartService,
    automations: Option<AutomationsClient>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Seeds the catalog, opens the JSON stores under the configured data
    /// directory, and selects the credential backend by configuration
    /// presence.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the data directory or store files cannot be
    /// opened.
    pub fn new(config: ServerConfig) -> Result<Self, StorageError> {
        std::fs::create_dir_all(&config.data_dir)?;

        let catalog = Catalog::new();

        let auth = match &config.contentstack {
            Some(contentstack) => AuthService::cms(
                CmsClient::new(contentstack),
                PasswordCipher::new(&config.encryption_secret),
            ),
            None => AuthService::local(JsonStore::open(config.data_dir.join("users.json"))?),
        };

        let carts = CartService::new(JsonStore::open(config.data_dir.join("carts.json"))?);

        let automations = config
            .automations_api_url
            .as_deref()
            .map(AutomationsClient::new);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                auth,
                carts,
                automations,
            }),
        })
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the authentication service.
    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }

    /// Get a reference to the cart service.
    #[must_use]
    pub fn carts(&self) -> &CartService {
        &self.inner.carts
    }

    /// Get the assistant fallback client, if configured.
    #[must_use]
    pub fn automations(&self) -> Option<&AutomationsClient> {
        self.inner.automations.as_ref()
    }
}

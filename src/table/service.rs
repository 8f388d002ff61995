//! Account-level service handle

use super::client::TableClient;
use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RateLimiterConfig};
use crate::store::{RestStore, TableStore};
use crate::types::BackoffType;
use std::sync::Arc;
use std::time::Duration;

/// Entry point to a table store account
///
/// Cheap to clone; all handles built from one service share the same
/// transport and store.
#[derive(Clone)]
pub struct TableService {
    store: Arc<dyn TableStore>,
}

impl TableService {
    /// Connect to an endpoint with default transport settings and no auth
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::builder().endpoint(endpoint).build()
    }

    /// Create a service builder
    pub fn builder() -> TableServiceBuilder {
        TableServiceBuilder::default()
    }

    /// Wrap an existing store implementation
    ///
    /// Useful for tests and local development with [`MemoryStore`].
    ///
    /// [`MemoryStore`]: crate::store::MemoryStore
    pub fn with_store(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// Get a handle for one table
    ///
    /// The handle carries a fresh, empty checkpoint cache.
    pub fn table(&self, name: impl Into<String>) -> TableClient {
        TableClient::new(Arc::clone(&self.store), name)
    }

    /// Create a table
    pub async fn create_table(&self, name: &str) -> Result<()> {
        validate_table_name(name)?;
        self.store.create_table(name).await
    }

    /// Delete a table and all its entities
    pub async fn delete_table(&self, name: &str) -> Result<()> {
        validate_table_name(name)?;
        self.store.delete_table(name).await
    }

    /// Check whether a table exists
    pub async fn table_exists(&self, name: &str) -> Result<bool> {
        validate_table_name(name)?;
        self.store.table_exists(name).await
    }
}

impl std::fmt::Debug for TableService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableService").finish_non_exhaustive()
    }
}

fn validate_table_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::validation("table name must not be empty"));
    }
    Ok(())
}

/// Builder for a REST-backed table service
pub struct TableServiceBuilder {
    endpoint: Option<String>,
    auth: AuthConfig,
    config: HttpClientConfig,
}

impl Default for TableServiceBuilder {
    fn default() -> Self {
        Self {
            endpoint: None,
            auth: AuthConfig::None,
            config: HttpClientConfig::default(),
        }
    }
}

impl TableServiceBuilder {
    /// Set the store endpoint (required)
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set request authentication
    #[must_use]
    pub fn auth(mut self, auth: AuthConfig) -> Self {
        self.auth = auth;
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max transport retries
    #[must_use]
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set backoff configuration
    #[must_use]
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.config.backoff_type = backoff_type;
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Set rate limiting
    #[must_use]
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable rate limiting
    #[must_use]
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Set the user agent
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the service
    pub fn build(mut self) -> Result<TableService> {
        let endpoint = self
            .endpoint
            .ok_or_else(|| Error::validation("endpoint is required"))?;

        // Surface malformed endpoints here rather than on the first request
        url::Url::parse(&endpoint)?;

        self.config.base_url = Some(endpoint);
        let store = RestStore::new(HttpClient::with_auth(self.config, self.auth));

        Ok(TableService {
            store: Arc::new(store),
        })
    }
}

//! Coinbase Exchange REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::cache::CatalogCache;
use crate::config::ClientConfig;
use crate::error::CoinbaseError;
use crate::request::ApiRequest;
use crate::response::{parse_list, parse_single};
use crate::rest::accounts::Accounts;
use crate::rest::call::{Call, EntityParser};
use crate::rest::currencies::Currencies;
use crate::rest::fees::FeeRates;
use crate::rest::products::Products;
use crate::rest::profiles::Profiles;
use crate::rest::reports::Reports;
use crate::rest::transfers::Transfers;
use crate::rest::users::Users;
use crate::rest::wrapped_assets::WrappedAssets;
use crate::transport::{HttpTransport, RequestSigner, Transport};

/// The Coinbase Exchange REST API client.
///
/// Endpoints are grouped by resource family; each accessor returns a
/// lightweight manager borrowing the client.
///
/// # Example
///
/// ```rust,no_run
/// use coinbase_exchange_client::rest::CoinbaseClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = CoinbaseClient::new()?;
///
///     let products = client.products().list(None).await?;
///     println!("{} products", products.len());
///
///     let stats = client.products().stats("BTC-USD").await?;
///     println!("24h change: {:.2}%", stats.change_percent_24h());
///     Ok(())
/// }
/// ```
///
/// Private endpoints need a [`RequestSigner`]:
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use coinbase_exchange_client::rest::CoinbaseClient;
/// # use coinbase_exchange_client::transport::RequestSigner;
/// # fn signer() -> Arc<dyn RequestSigner> { unimplemented!() }
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = CoinbaseClient::builder().signer(signer()).build()?;
///     for account in client.accounts().list().await? {
///         println!("{}: {}", account.currency, account.balance);
///     }
///     Ok(())
/// }
/// ```
pub struct CoinbaseClient<T = HttpTransport> {
    transport: T,
    catalog: Arc<CatalogCache>,
    batch_concurrency: usize,
}

impl CoinbaseClient<HttpTransport> {
    /// Create a client for the production API with default settings.
    pub fn new() -> Result<Self, CoinbaseError> {
        Self::builder().build()
    }

    /// Create a client for the public sandbox.
    pub fn sandbox() -> Result<Self, CoinbaseError> {
        Self::builder().sandbox().build()
    }

    /// Create a client configured from the environment.
    pub fn from_env() -> Result<Self, CoinbaseError> {
        Self::builder().config(ClientConfig::from_env()?).build()
    }

    /// Create a new client builder.
    pub fn builder() -> CoinbaseClientBuilder {
        CoinbaseClientBuilder::new()
    }
}

impl<T: Transport> CoinbaseClient<T> {
    /// Create a client on top of a custom transport, sharing the global
    /// catalog cache.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            catalog: CatalogCache::global(),
            batch_concurrency: crate::config::DEFAULT_BATCH_CONCURRENCY,
        }
    }

    /// Use a dedicated catalog cache instead of the process-wide one.
    pub fn with_catalog_cache(mut self, cache: Arc<CatalogCache>) -> Self {
        self.catalog = cache;
        self
    }

    /// Set the number of requests in flight for batch operations.
    pub fn with_batch_concurrency(mut self, concurrency: usize) -> Self {
        self.batch_concurrency = concurrency.max(1);
        self
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The catalog cache used by batch operations.
    pub fn catalog_cache(&self) -> &Arc<CatalogCache> {
        &self.catalog
    }

    pub(crate) fn batch_concurrency(&self) -> usize {
        self.batch_concurrency
    }

    /// Prepare a call returning a single entity.
    pub(crate) fn single<R: DeserializeOwned>(&self, request: ApiRequest) -> Call<'_, R, T> {
        Call::new(self, request, parse_single::<R>)
    }

    /// Prepare a call returning a list of entities.
    pub(crate) fn list<E: DeserializeOwned>(&self, request: ApiRequest) -> Call<'_, Vec<E>, T> {
        Call::new(self, request, parse_list::<E>)
    }

    /// Prepare a call with a custom entity parser.
    pub(crate) fn call_with<R>(&self, request: ApiRequest, parser: EntityParser<R>) -> Call<'_, R, T> {
        Call::new(self, request, parser)
    }

    /// Accounts of the current profile.
    pub fn accounts(&self) -> Accounts<'_, T> {
        Accounts::new(self)
    }

    /// Currencies known to the exchange.
    pub fn currencies(&self) -> Currencies<'_, T> {
        Currencies::new(self)
    }

    /// Fee rates.
    pub fn fees(&self) -> FeeRates<'_, T> {
        FeeRates::new(self)
    }

    /// Trading pairs and market data.
    pub fn products(&self) -> Products<'_, T> {
        Products::new(self)
    }

    /// Profiles.
    pub fn profiles(&self) -> Profiles<'_, T> {
        Profiles::new(self)
    }

    /// Reports.
    pub fn reports(&self) -> Reports<'_, T> {
        Reports::new(self)
    }

    /// Deposits, withdrawals and transfer history.
    pub fn transfers(&self) -> Transfers<'_, T> {
        Transfers::new(self)
    }

    /// User limits and volume.
    pub fn users(&self) -> Users<'_, T> {
        Users::new(self)
    }

    /// Wrapped assets and stake-wrap conversions.
    pub fn wrapped_assets(&self) -> WrappedAssets<'_, T> {
        WrappedAssets::new(self)
    }
}

impl<T: Clone> Clone for CoinbaseClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            catalog: Arc::clone(&self.catalog),
            batch_concurrency: self.batch_concurrency,
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for CoinbaseClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinbaseClient")
            .field("transport", &self.transport)
            .field("batch_concurrency", &self.batch_concurrency)
            .finish()
    }
}

/// Builder for [`CoinbaseClient`] over the default HTTP transport.
pub struct CoinbaseClientBuilder {
    config: ClientConfig,
    signer: Option<Arc<dyn RequestSigner>>,
    catalog: Option<Arc<CatalogCache>>,
}

impl CoinbaseClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            signer: None,
            catalog: None,
        }
    }

    /// Replace all settings with the given configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Target the public sandbox.
    pub fn sandbox(mut self) -> Self {
        self.config.base_url = crate::rest::SANDBOX_BASE_URL.to_string();
        self
    }

    /// Set the signer supplying authentication headers.
    pub fn signer(mut self, signer: Arc<dyn RequestSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = Some(user_agent.into());
        self
    }

    /// Set the maximum number of retries for transient failures.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the number of requests in flight for batch operations.
    pub fn batch_concurrency(mut self, concurrency: usize) -> Self {
        self.config.batch_concurrency = concurrency;
        self
    }

    /// Use a dedicated catalog cache instead of the process-wide one.
    pub fn catalog_cache(mut self, cache: Arc<CatalogCache>) -> Self {
        self.catalog = Some(cache);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<CoinbaseClient<HttpTransport>, CoinbaseError> {
        let batch_concurrency = self.config.batch_concurrency;
        let mut transport = HttpTransport::builder().config(self.config);
        if let Some(signer) = self.signer {
            transport = transport.signer(signer);
        }

        let client = CoinbaseClient::with_transport(transport.build()?)
            .with_batch_concurrency(batch_concurrency);
        Ok(match self.catalog {
            Some(cache) => client.with_catalog_cache(cache),
            None => client,
        })
    }
}

impl Default for CoinbaseClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

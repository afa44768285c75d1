//! Time-windowed caching of the trading-pair catalog.
//!
//! Batch operations such as "ticker for every product" need the full product
//! list. Re-fetching it on every call is wasteful, so the list is held in a
//! [`TimeWindowedCache`] for [`CATALOG_TTL`].
//!
//! One catalog cache is shared by the whole process ([`CatalogCache::global`]).
//! Tests and embedders can build their own with an injected [`Clock`] and hand
//! it to the client builder.
//!
//! ```rust
//! use std::sync::Arc;
//! use coinbase_exchange_client::cache::{CacheState, CatalogCache, ManualClock, CATALOG_TTL};
//!
//! # tokio_test::block_on(async {
//! let clock = Arc::new(ManualClock::new());
//! let cache = CatalogCache::with_clock(CATALOG_TTL, clock.clone());
//! assert_eq!(cache.state().await, CacheState::Empty);
//! # });
//! ```

mod clock;
mod windowed;

use std::sync::{Arc, OnceLock};
use std::time::Duration;

pub use clock::{Clock, ManualClock, SystemClock};
pub use windowed::{CacheState, TimeWindowedCache};

use crate::rest::products::Product;

/// How long the product catalog is trusted before it is fetched again.
pub const CATALOG_TTL: Duration = Duration::from_secs(60 * 60);

/// Cache of the full product list.
pub type CatalogCache = TimeWindowedCache<Vec<Product>>;

static GLOBAL_CATALOG: OnceLock<Arc<CatalogCache>> = OnceLock::new();

impl TimeWindowedCache<Vec<Product>> {
    /// The process-wide catalog cache shared by every client that was not
    /// given its own.
    pub fn global() -> Arc<CatalogCache> {
        Arc::clone(GLOBAL_CATALOG.get_or_init(|| Arc::new(CatalogCache::new(CATALOG_TTL))))
    }
}

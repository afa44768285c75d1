//! Product and market data endpoints (no authentication required).

mod types;

pub use types::*;

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use futures_util::{StreamExt, TryStreamExt, stream};
use rust_decimal::prelude::ToPrimitive;
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

use crate::error::CoinbaseError;
use crate::forecast::{Forecast, ForecastInput};
use crate::request::{ApiRequest, ParameterSet};
use crate::response::{Materialized, OutputMode};
use crate::rest::endpoints::{self, PRODUCTS};
use crate::rest::{Call, CoinbaseClient};
use crate::transport::Transport;
use crate::types::{BookLevel, Granularity};

/// Parameters accepted by the product list.
pub const LIST_PARAMS: &[&str] = &["type"];
/// Parameters accepted by the order book.
pub const BOOK_PARAMS: &[&str] = &["level"];
/// Parameters accepted by the candles endpoint.
pub const CANDLE_PARAMS: &[&str] = &["granularity", "start", "end"];
/// Parameters accepted by the trades endpoint.
pub const TRADE_PARAMS: &[&str] = &["limit", "before", "after"];

/// Most candles returned by a single candles request.
pub const MAX_CANDLES: usize = 300;

/// Product and market data endpoints.
pub struct Products<'a, T> {
    client: &'a CoinbaseClient<T>,
}

impl<'a, T: Transport> Products<'a, T> {
    pub(crate) fn new(client: &'a CoinbaseClient<T>) -> Self {
        Self { client }
    }

    /// List all trading pairs.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use coinbase_exchange_client::rest::CoinbaseClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = CoinbaseClient::new()?;
    ///     for product in client.products().list(None).await? {
    ///         println!("{} ({})", product.id, product.status);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub fn list(&self, options: Option<&ParameterSet>) -> Call<'a, Vec<Product>, T> {
        let query = ParameterSet::allowing(LIST_PARAMS).merged(options);
        self.client.list(ApiRequest::get(PRODUCTS).query(query))
    }

    /// Get a single trading pair.
    pub fn get(&self, product_id: &str) -> Call<'a, Product, T> {
        self.client
            .single(ApiRequest::get(endpoints::path(PRODUCTS, &[product_id])))
    }

    /// Get the order book at the given aggregation level.
    pub fn book(&self, product_id: &str, level: BookLevel) -> Call<'a, ProductBook, T> {
        let query = ParameterSet::allowing(BOOK_PARAMS).with("level", level);
        self.client.single(
            ApiRequest::get(endpoints::path(PRODUCTS, &[product_id, "book"])).query(query),
        )
    }

    /// Get historic rates, newest first.
    ///
    /// # Arguments
    ///
    /// * `product_id` - Trading pair (e.g. "BTC-USD").
    /// * `options` - `granularity` (seconds, see [`Granularity`]), `start`, `end`.
    pub fn candles(
        &self,
        product_id: &str,
        options: Option<&ParameterSet>,
    ) -> Call<'a, Vec<Candle>, T> {
        let query = ParameterSet::allowing(CANDLE_PARAMS).merged(options);
        self.client.list(
            ApiRequest::get(endpoints::path(PRODUCTS, &[product_id, "candles"])).query(query),
        )
    }

    /// Get 24-hour statistics.
    pub fn stats(&self, product_id: &str) -> Call<'a, ProductStats, T> {
        self.client
            .single(ApiRequest::get(endpoints::path(PRODUCTS, &[product_id, "stats"])))
    }

    /// Get the ticker.
    pub fn ticker(&self, product_id: &str) -> Call<'a, Ticker, T> {
        self.client
            .single(ApiRequest::get(endpoints::path(PRODUCTS, &[product_id, "ticker"])))
    }

    /// Get the latest trades.
    pub fn trades(
        &self,
        product_id: &str,
        options: Option<&ParameterSet>,
    ) -> Call<'a, Vec<Trade>, T> {
        let query = ParameterSet::allowing(TRADE_PARAMS).merged(options);
        self.client.list(
            ApiRequest::get(endpoints::path(PRODUCTS, &[product_id, "trades"])).query(query),
        )
    }

    /// All trading pairs, served from the catalog cache while it is fresh.
    pub async fn catalog(&self) -> Result<Arc<Vec<Product>>, CoinbaseError> {
        self.client
            .catalog_cache()
            .get(|| self.list(None).typed())
            .await
    }

    /// Order books of every product in the catalog, keyed by product ID.
    pub async fn all_books(
        &self,
        level: BookLevel,
        mode: OutputMode,
    ) -> Result<BTreeMap<String, Materialized<ProductBook>>, CoinbaseError> {
        self.for_each_product(|id| self.book(id, level).output(mode)).await
    }

    /// 24-hour statistics of every product in the catalog, keyed by product ID.
    pub async fn all_stats(
        &self,
        mode: OutputMode,
    ) -> Result<BTreeMap<String, Materialized<ProductStats>>, CoinbaseError> {
        self.for_each_product(|id| self.stats(id).output(mode)).await
    }

    /// Tickers of every product in the catalog, keyed by product ID.
    pub async fn all_tickers(
        &self,
        mode: OutputMode,
    ) -> Result<BTreeMap<String, Materialized<Ticker>>, CoinbaseError> {
        self.for_each_product(|id| self.ticker(id).output(mode)).await
    }

    /// Forecast the price direction from daily candle highs.
    ///
    /// Fetches `2 * interval_days` daily candles and the ticker, then compares
    /// the mean high of the last `interval_days` with the window before it.
    /// Changes within `tolerance` (a fraction, `0.02` = 2%) are flat.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use coinbase_exchange_client::rest::CoinbaseClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = CoinbaseClient::new()?;
    ///     let forecast = client.products().forecast("BTC-USD", 7, 0.02).await?;
    ///     println!("{:?} {:+.2}% -> {:.2}", forecast.trend, forecast.percent, forecast.projected_price);
    ///     Ok(())
    /// }
    /// ```
    pub async fn forecast(
        &self,
        product_id: &str,
        interval_days: i64,
        tolerance: f64,
    ) -> Result<Forecast, CoinbaseError> {
        let probe = ForecastInput::daily(Vec::new(), 0.0, interval_days, tolerance);
        let samples = probe.check_parameters()?.saturating_mul(2);
        if samples > MAX_CANDLES {
            return Err(CoinbaseError::invalid_argument(format!(
                "a {}-day interval needs {} daily candles, more than the {} one request returns",
                interval_days, samples, MAX_CANDLES
            )));
        }

        let end = OffsetDateTime::now_utc();
        let start = end - Duration::days(samples as i64);
        let options = ParameterSet::new()
            .with("granularity", Granularity::OneDay)
            .with("start", format_time(start)?)
            .with("end", format_time(end)?);

        let mut candles = self.candles(product_id, Some(&options)).await?;
        candles.sort_by_key(|candle| candle.time);
        let ticker = self.ticker(product_id).await?;

        let last_price = ticker.price.to_f64().ok_or_else(|| {
            CoinbaseError::invalid_argument(format!("ticker price {} is out of range", ticker.price))
        })?;
        let highs = candles.iter().map(|candle| candle.high).collect();
        ForecastInput::daily(highs, last_price, interval_days, tolerance).evaluate()
    }

    async fn for_each_product<R, F, Fut>(
        &self,
        call: F,
    ) -> Result<BTreeMap<String, R>, CoinbaseError>
    where
        F: Fn(&str) -> Fut,
        Fut: Future<Output = Result<R, CoinbaseError>>,
    {
        let catalog = self.catalog().await?;
        tracing::debug!(
            products = catalog.len(),
            concurrency = self.client.batch_concurrency(),
            "fetching per-product data"
        );

        stream::iter(catalog.iter())
            .map(|product| {
                let pending = call(&product.id);
                async move { pending.await.map(|value| (product.id.clone(), value)) }
            })
            .buffered(self.client.batch_concurrency())
            .try_collect()
            .await
    }
}

fn format_time(at: OffsetDateTime) -> Result<String, CoinbaseError> {
    at.format(&Rfc3339)
        .map_err(|e| CoinbaseError::invalid_argument(e.to_string()))
}

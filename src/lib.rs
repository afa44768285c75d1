//! # Coinbase Exchange Client
//!
//! An async Rust client library for the Coinbase Exchange REST API.
//!
//! ## Features
//!
//! - Every endpoint returns its response as raw text, a JSON tree, or a typed
//!   value, chosen per call
//! - Parameter sets with documented allow-lists per endpoint
//! - Cached product catalog for batch market data calls
//! - Directional price forecasts from candle history
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use coinbase_exchange_client::rest::CoinbaseClient;
//! use coinbase_exchange_client::OutputMode;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CoinbaseClient::new()?;
//!
//!     let ticker = client.products().ticker("BTC-USD").await?;
//!     println!("BTC-USD: {}", ticker.price);
//!
//!     let raw = client.products().stats("BTC-USD").raw().await?;
//!     println!("stats: {}", raw);
//!
//!     let tickers = client.products().all_tickers(OutputMode::Typed).await?;
//!     println!("{} tickers", tickers.len());
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod forecast;
pub mod request;
pub mod response;
pub mod rest;
pub mod transport;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{ApiError, CoinbaseError, MalformedResponse};
pub use request::{ParamValue, ParameterSet};
pub use response::{Materialized, OutputMode};
pub use types::common::{BookLevel, Granularity, Side};

/// Result type alias using CoinbaseError
pub type Result<T> = std::result::Result<T, CoinbaseError>;

//! Coinbase Exchange REST API client.
//!
//! [`CoinbaseClient`] groups the endpoints by resource family. Every endpoint
//! method returns a [`Call`]; awaiting it yields the typed result, while
//! [`Call::raw`], [`Call::structured`] and [`Call::output`] select another
//! representation of the same response.

pub mod accounts;
mod call;
mod client;
pub mod currencies;
pub mod endpoints;
pub mod fees;
pub mod products;
pub mod profiles;
pub mod reports;
pub mod transfers;
pub mod users;
pub mod wrapped_assets;

pub use call::{Call, EntityParser};
pub use client::{CoinbaseClient, CoinbaseClientBuilder};
pub use endpoints::{PRODUCTION_BASE_URL, SANDBOX_BASE_URL};

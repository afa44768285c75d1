//! Common types used across the Coinbase Exchange client library.

pub mod common;
pub mod serde_helpers;

pub use common::*;

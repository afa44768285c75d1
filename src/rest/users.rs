//! User endpoints (authentication required).

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::request::ApiRequest;
use crate::rest::endpoints::{self, TRAILING_VOLUME, USERS};
use crate::rest::{Call, CoinbaseClient};
use crate::transport::Transport;
use crate::types::serde_helpers::flexible_datetime;

/// Deposit and withdrawal limits of a user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExchangeLimits {
    /// Currency the limits are expressed in.
    pub limit_currency: String,
    /// Limits keyed by transfer method, then by currency.
    #[serde(default)]
    pub transfer_limits: BTreeMap<String, BTreeMap<String, TransferLimit>>,
}

/// One transfer limit.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransferLimit {
    /// Maximum amount.
    pub max: Decimal,
    /// Remaining amount.
    pub remaining: Decimal,
    /// Days until the limit resets.
    #[serde(default)]
    pub period_in_days: Option<u32>,
}

/// Trailing 30-day volume of one product.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrailingVolume {
    /// Product ID.
    pub product_id: String,
    /// Exchange-wide volume.
    pub exchange_volume: Decimal,
    /// The user's volume.
    pub volume: Decimal,
    /// Time of the last update.
    #[serde(deserialize_with = "flexible_datetime::deserialize")]
    pub recorded_at: OffsetDateTime,
}

/// User endpoints.
pub struct Users<'a, T> {
    client: &'a CoinbaseClient<T>,
}

impl<'a, T: Transport> Users<'a, T> {
    pub(crate) fn new(client: &'a CoinbaseClient<T>) -> Self {
        Self { client }
    }

    /// Get the deposit and withdrawal limits of a user.
    pub fn exchange_limits(&self, user_id: &str) -> Call<'a, ExchangeLimits, T> {
        self.client
            .single(ApiRequest::get(endpoints::path(USERS, &[user_id, "exchange-limits"])))
    }

    /// Get the 30-day volume of the current user per product.
    pub fn trailing_volume(&self) -> Call<'a, Vec<TrailingVolume>, T> {
        self.client.list(ApiRequest::get(TRAILING_VOLUME))
    }
}

//! Currency endpoints (no authentication required).

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::request::ApiRequest;
use crate::rest::endpoints::{self, CURRENCIES};
use crate::rest::{Call, CoinbaseClient};
use crate::transport::Transport;
use crate::types::serde_helpers::{empty_string_as_none, maybe_decimal};

/// A currency known to the exchange.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Currency {
    /// Currency code (e.g. "BTC").
    pub id: String,
    /// Name.
    pub name: String,
    /// Smallest unit.
    pub min_size: Decimal,
    /// Status (e.g. "online").
    pub status: String,
    /// Status details.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub message: Option<String>,
    /// Largest precision allowed.
    #[serde(default, deserialize_with = "maybe_decimal::deserialize")]
    pub max_precision: Option<Decimal>,
    /// Currencies this one converts to without a fee.
    #[serde(default)]
    pub convertible_to: Vec<String>,
    /// Deposit and withdrawal details.
    #[serde(default)]
    pub details: CurrencyDetails,
}

/// Network details of a currency.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CurrencyDetails {
    /// "crypto" or "fiat".
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Symbol for display.
    #[serde(default)]
    pub symbol: Option<String>,
    /// Confirmations before a deposit is credited.
    #[serde(default)]
    pub network_confirmations: Option<u32>,
    /// Block explorer URL template.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub crypto_address_link: Option<String>,
    /// Smallest withdrawal.
    #[serde(default, deserialize_with = "maybe_decimal::deserialize")]
    pub min_withdrawal_amount: Option<Decimal>,
    /// Largest withdrawal.
    #[serde(default, deserialize_with = "maybe_decimal::deserialize")]
    pub max_withdrawal_amount: Option<Decimal>,
}

/// Currency endpoints.
pub struct Currencies<'a, T> {
    client: &'a CoinbaseClient<T>,
}

impl<'a, T: Transport> Currencies<'a, T> {
    pub(crate) fn new(client: &'a CoinbaseClient<T>) -> Self {
        Self { client }
    }

    /// List all currencies.
    pub fn list(&self) -> Call<'a, Vec<Currency>, T> {
        self.client.list(ApiRequest::get(CURRENCIES))
    }

    /// Get a single currency.
    pub fn get(&self, currency_id: &str) -> Call<'a, Currency, T> {
        self.client
            .single(ApiRequest::get(endpoints::path(CURRENCIES, &[currency_id])))
    }
}

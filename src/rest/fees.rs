//! Fee endpoint (authentication required).

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::request::ApiRequest;
use crate::rest::endpoints::FEES;
use crate::rest::{Call, CoinbaseClient};
use crate::transport::Transport;
use crate::types::serde_helpers::maybe_decimal;

/// Current fee rates and the volume they are based on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Fees {
    /// Maker fee rate (a fraction, `0.004` = 0.4%).
    pub maker_fee_rate: Decimal,
    /// Taker fee rate.
    pub taker_fee_rate: Decimal,
    /// Trailing 30-day USD volume.
    #[serde(default, deserialize_with = "maybe_decimal::deserialize")]
    pub usd_volume: Option<Decimal>,
}

/// Fee endpoint.
pub struct FeeRates<'a, T> {
    client: &'a CoinbaseClient<T>,
}

impl<'a, T: Transport> FeeRates<'a, T> {
    pub(crate) fn new(client: &'a CoinbaseClient<T>) -> Self {
        Self { client }
    }

    /// Get the fee rates of the current user.
    pub fn get(&self) -> Call<'a, Fees, T> {
        self.client.single(ApiRequest::get(FEES))
    }
}

//! Wrapped asset and stake-wrap endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use time::OffsetDateTime;

use crate::error::MalformedResponse;
use crate::request::{ApiRequest, ParameterSet};
use crate::response::parse_list;
use crate::rest::endpoints::{self, STAKE_WRAP, WRAPPED_ASSETS};
use crate::rest::{Call, CoinbaseClient};
use crate::transport::Transport;
use crate::types::serde_helpers::{flexible_datetime, maybe_decimal};

/// Parameters accepted by the stake-wrap list.
pub const STAKE_WRAP_LIST_PARAMS: &[&str] = &["from", "to", "before", "after", "limit"];
/// Body of a stake-wrap creation.
pub const STAKE_WRAP_CREATE_PARAMS: &[&str] = &["from_currency", "to_currency", "amount"];

/// A wrapped asset and its supply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WrappedAsset {
    /// Asset ID (e.g. "CBETH").
    pub id: String,
    /// Circulating supply.
    #[serde(default, deserialize_with = "maybe_decimal::deserialize")]
    pub circulating_supply: Option<Decimal>,
    /// Total supply.
    #[serde(default, deserialize_with = "maybe_decimal::deserialize")]
    pub total_supply: Option<Decimal>,
    /// Units of the underlying asset per wrapped unit.
    #[serde(default, deserialize_with = "maybe_decimal::deserialize")]
    pub conversion_rate: Option<Decimal>,
    /// Annual percentage yield.
    #[serde(default, deserialize_with = "maybe_decimal::deserialize")]
    pub apy: Option<Decimal>,
}

/// Conversion rate of a wrapped asset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConversionRate {
    /// Units of the underlying asset per wrapped unit.
    pub amount: Decimal,
}

/// A conversion of a staked asset into its wrapped token.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StakeWrap {
    /// Stake-wrap ID.
    pub id: String,
    /// Amount converted.
    pub from_amount: Decimal,
    /// Amount received.
    #[serde(default, deserialize_with = "maybe_decimal::deserialize")]
    pub to_amount: Option<Decimal>,
    /// Source account.
    #[serde(default)]
    pub from_account_id: Option<String>,
    /// Destination account.
    #[serde(default)]
    pub to_account_id: Option<String>,
    /// Source currency.
    pub from_currency: String,
    /// Destination currency.
    pub to_currency: String,
    /// Status (e.g. "pending", "completed", "canceled").
    pub status: String,
    /// Rate applied.
    #[serde(default, deserialize_with = "maybe_decimal::deserialize")]
    pub conversion_rate: Option<Decimal>,
    /// Creation time.
    #[serde(deserialize_with = "flexible_datetime::deserialize")]
    pub created_at: OffsetDateTime,
    /// Completion time.
    #[serde(default, deserialize_with = "flexible_datetime::option::deserialize")]
    pub completed_at: Option<OffsetDateTime>,
    /// Cancellation time.
    #[serde(default, deserialize_with = "flexible_datetime::option::deserialize")]
    pub canceled_at: Option<OffsetDateTime>,
}

/// Request to convert a staked asset into its wrapped token.
#[derive(Debug, Clone, PartialEq)]
pub struct StakeWrapRequest {
    /// Source currency (e.g. "ETH").
    pub from_currency: String,
    /// Destination currency (e.g. "CBETH").
    pub to_currency: String,
    /// Amount of the source currency.
    pub amount: Decimal,
}

impl StakeWrapRequest {
    /// Create a stake-wrap request.
    pub fn new(from_currency: impl Into<String>, to_currency: impl Into<String>, amount: Decimal) -> Self {
        Self {
            from_currency: from_currency.into(),
            to_currency: to_currency.into(),
            amount,
        }
    }
}

impl From<&StakeWrapRequest> for ParameterSet {
    fn from(request: &StakeWrapRequest) -> Self {
        ParameterSet::allowing(STAKE_WRAP_CREATE_PARAMS)
            .with("from_currency", request.from_currency.as_str())
            .with("to_currency", request.to_currency.as_str())
            .with("amount", request.amount)
    }
}

/// Wrapped asset endpoints.
pub struct WrappedAssets<'a, T> {
    client: &'a CoinbaseClient<T>,
}

impl<'a, T: Transport> WrappedAssets<'a, T> {
    pub(crate) fn new(client: &'a CoinbaseClient<T>) -> Self {
        Self { client }
    }

    /// List all wrapped assets.
    pub fn list(&self) -> Call<'a, Vec<WrappedAsset>, T> {
        self.client
            .call_with(ApiRequest::get(WRAPPED_ASSETS), parse_wrapped_asset_list)
    }

    /// Get a single wrapped asset.
    pub fn get(&self, asset_id: &str) -> Call<'a, WrappedAsset, T> {
        self.client
            .single(ApiRequest::get(endpoints::path(WRAPPED_ASSETS, &[asset_id])))
    }

    /// Get the conversion rate of a wrapped asset.
    pub fn conversion_rate(&self, asset_id: &str) -> Call<'a, ConversionRate, T> {
        self.client.single(ApiRequest::get(endpoints::path(
            WRAPPED_ASSETS,
            &[asset_id, "conversion-rate"],
        )))
    }

    /// List stake-wraps.
    pub fn stake_wraps(&self, options: Option<&ParameterSet>) -> Call<'a, Vec<StakeWrap>, T> {
        let query = ParameterSet::allowing(STAKE_WRAP_LIST_PARAMS).merged(options);
        self.client.list(ApiRequest::get(STAKE_WRAP).query(query))
    }

    /// Get a single stake-wrap.
    pub fn stake_wrap(&self, stake_wrap_id: &str) -> Call<'a, StakeWrap, T> {
        self.client
            .single(ApiRequest::get(endpoints::path(STAKE_WRAP, &[stake_wrap_id])))
    }

    /// Convert a staked asset into its wrapped token.
    pub fn create_stake_wrap(&self, request: &StakeWrapRequest) -> Call<'a, StakeWrap, T> {
        self.client
            .single(ApiRequest::post(STAKE_WRAP, request.into()))
    }
}

/// The list endpoint wraps its entries in `{"wrapped_assets": [...]}`.
fn parse_wrapped_asset_list(value: Value) -> Result<Vec<WrappedAsset>, MalformedResponse> {
    let Value::Object(mut map) = value else {
        return Err(MalformedResponse::new("expected an object holding `wrapped_assets`"));
    };
    let entries = map.remove("wrapped_assets").ok_or_else(|| {
        MalformedResponse::new("missing field `wrapped_assets`").with_key("wrapped_assets")
    })?;
    parse_list(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_wrapped_asset_list() {
        let assets = parse_wrapped_asset_list(json!({
            "wrapped_assets": [
                {"id": "CBETH", "circulating_supply": "100", "total_supply": "120",
                 "conversion_rate": "1.05", "apy": "0.031"}
            ]
        }))
        .unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].id, "CBETH");
    }

    #[test]
    fn test_parse_wrapped_asset_list_reports_location() {
        let err = parse_wrapped_asset_list(json!({"assets": []})).unwrap_err();
        assert_eq!(err.key.as_deref(), Some("wrapped_assets"));

        let err = parse_wrapped_asset_list(json!({"wrapped_assets": [{"id": "CBETH"}, {"apy": "1"}]}))
            .unwrap_err();
        assert_eq!(err.element, Some(1));
        assert_eq!(err.key.as_deref(), Some("id"));
    }
}

//! Types for transfer endpoints.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::request::ParameterSet;
use crate::types::serde_helpers::{empty_string_as_none, flexible_datetime, maybe_decimal};

/// A deposit or withdrawal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transfer {
    /// Transfer ID.
    pub id: String,
    /// "deposit", "withdraw", "internal_deposit" or "internal_withdraw".
    #[serde(rename = "type")]
    pub kind: String,
    /// Creation time.
    #[serde(deserialize_with = "flexible_datetime::deserialize")]
    pub created_at: OffsetDateTime,
    /// Completion time.
    #[serde(default, deserialize_with = "flexible_datetime::option::deserialize")]
    pub completed_at: Option<OffsetDateTime>,
    /// Cancellation time.
    #[serde(default, deserialize_with = "flexible_datetime::option::deserialize")]
    pub canceled_at: Option<OffsetDateTime>,
    /// Processing time.
    #[serde(default, deserialize_with = "flexible_datetime::option::deserialize")]
    pub processed_at: Option<OffsetDateTime>,
    /// Amount.
    pub amount: Decimal,
    /// Currency, when the exchange reports it.
    #[serde(default)]
    pub currency: Option<String>,
    /// Client-supplied nonce.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub user_nonce: Option<String>,
    /// Method-dependent details.
    #[serde(default)]
    pub details: BTreeMap<String, serde_json::Value>,
}

impl Transfer {
    /// True once funds have moved.
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some() && self.canceled_at.is_none()
    }
}

/// Acknowledgement of a deposit or withdrawal request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransferReceipt {
    /// Transfer ID.
    pub id: String,
    /// Amount.
    pub amount: Decimal,
    /// Currency.
    pub currency: String,
    /// Expected settlement time.
    #[serde(default, deserialize_with = "flexible_datetime::option::deserialize")]
    pub payout_at: Option<OffsetDateTime>,
    /// Fee charged.
    #[serde(default, deserialize_with = "maybe_decimal::deserialize")]
    pub fee: Option<Decimal>,
    /// Amount before fees.
    #[serde(default, deserialize_with = "maybe_decimal::deserialize")]
    pub subtotal: Option<Decimal>,
}

/// A linked bank account or card.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentMethod {
    /// Payment method ID.
    pub id: String,
    /// Kind (e.g. "ach_bank_account", "fedwire").
    #[serde(rename = "type")]
    pub kind: String,
    /// Name.
    pub name: String,
    /// Currency.
    pub currency: String,
    /// Default method for buys.
    #[serde(default)]
    pub primary_buy: bool,
    /// Default method for sells.
    #[serde(default)]
    pub primary_sell: bool,
    /// Deposits are allowed.
    #[serde(default)]
    pub allow_deposit: bool,
    /// Withdrawals are allowed.
    #[serde(default)]
    pub allow_withdraw: bool,
    /// Verified.
    #[serde(default)]
    pub verified: bool,
}

/// Estimated network fee of a crypto withdrawal.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeeEstimate {
    /// Fee.
    pub fee: Decimal,
    /// Fee before any subsidy.
    #[serde(default, deserialize_with = "maybe_decimal::deserialize")]
    pub fee_before_subsidy: Option<Decimal>,
}

/// Funds moved between the exchange and a Coinbase wallet.
#[derive(Debug, Clone, PartialEq)]
pub struct WalletTransfer {
    /// Amount.
    pub amount: Decimal,
    /// Currency.
    pub currency: String,
    /// Coinbase wallet ID.
    pub wallet_id: String,
    /// Exchange profile, when not the default.
    pub profile_id: Option<String>,
}

impl WalletTransfer {
    /// Create a wallet transfer.
    pub fn new(amount: Decimal, currency: impl Into<String>, wallet_id: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            wallet_id: wallet_id.into(),
            profile_id: None,
        }
    }

    /// Use a specific exchange profile.
    pub fn profile(mut self, profile_id: impl Into<String>) -> Self {
        self.profile_id = Some(profile_id.into());
        self
    }
}

impl From<&WalletTransfer> for ParameterSet {
    fn from(transfer: &WalletTransfer) -> Self {
        let mut params = ParameterSet::allowing(super::WALLET_PARAMS);
        params
            .add("amount", transfer.amount)
            .add("currency", transfer.currency.as_str())
            .add("coinbase_account_id", transfer.wallet_id.as_str())
            .add_opt("profile_id", transfer.profile_id.as_deref());
        params
    }
}

/// Funds moved between the exchange and a payment method.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentMethodTransfer {
    /// Amount.
    pub amount: Decimal,
    /// Currency.
    pub currency: String,
    /// Payment method ID.
    pub payment_method_id: String,
    /// Exchange profile, when not the default.
    pub profile_id: Option<String>,
}

impl PaymentMethodTransfer {
    /// Create a payment method transfer.
    pub fn new(
        amount: Decimal,
        currency: impl Into<String>,
        payment_method_id: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            currency: currency.into(),
            payment_method_id: payment_method_id.into(),
            profile_id: None,
        }
    }

    /// Use a specific exchange profile.
    pub fn profile(mut self, profile_id: impl Into<String>) -> Self {
        self.profile_id = Some(profile_id.into());
        self
    }
}

impl From<&PaymentMethodTransfer> for ParameterSet {
    fn from(transfer: &PaymentMethodTransfer) -> Self {
        let mut params = ParameterSet::allowing(super::PAYMENT_METHOD_PARAMS);
        params
            .add("amount", transfer.amount)
            .add("currency", transfer.currency.as_str())
            .add("payment_method_id", transfer.payment_method_id.as_str())
            .add_opt("profile_id", transfer.profile_id.as_deref());
        params
    }
}

/// Withdrawal to an external crypto address.
#[derive(Debug, Clone, PartialEq)]
pub struct CryptoWithdrawal {
    /// Amount.
    pub amount: Decimal,
    /// Currency.
    pub currency: String,
    /// Destination address.
    pub crypto_address: String,
    /// Memo or destination tag.
    pub destination_tag: Option<String>,
    /// Confirms the destination needs no tag.
    pub no_destination_tag: Option<bool>,
    /// Network to send on.
    pub network: Option<String>,
    /// Add the network fee on top of `amount`.
    pub add_network_fee_to_total: Option<bool>,
    /// Idempotency nonce.
    pub nonce: Option<u64>,
    /// Exchange profile, when not the default.
    pub profile_id: Option<String>,
}

impl CryptoWithdrawal {
    /// Create a crypto withdrawal.
    pub fn new(amount: Decimal, currency: impl Into<String>, crypto_address: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
            crypto_address: crypto_address.into(),
            destination_tag: None,
            no_destination_tag: None,
            network: None,
            add_network_fee_to_total: None,
            nonce: None,
            profile_id: None,
        }
    }

    /// Set the memo or destination tag.
    pub fn destination_tag(mut self, tag: impl Into<String>) -> Self {
        self.destination_tag = Some(tag.into());
        self.no_destination_tag = None;
        self
    }

    /// Send on a specific network.
    pub fn network(mut self, network: impl Into<String>) -> Self {
        self.network = Some(network.into());
        self
    }

    /// Set an idempotency nonce.
    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }
}

impl From<&CryptoWithdrawal> for ParameterSet {
    fn from(withdrawal: &CryptoWithdrawal) -> Self {
        let mut params = ParameterSet::allowing(super::CRYPTO_PARAMS);
        params
            .add("amount", withdrawal.amount)
            .add("currency", withdrawal.currency.as_str())
            .add("crypto_address", withdrawal.crypto_address.as_str())
            .add_opt("destination_tag", withdrawal.destination_tag.as_deref())
            .add_opt("no_destination_tag", withdrawal.no_destination_tag)
            .add_opt("network", withdrawal.network.as_deref())
            .add_opt("add_network_fee_to_total", withdrawal.add_network_fee_to_total)
            .add_opt("nonce", withdrawal.nonce)
            .add_opt("profile_id", withdrawal.profile_id.as_deref());
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_crypto_withdrawal_body() {
        let withdrawal = CryptoWithdrawal::new(Decimal::new(15, 1), "ETH", "0xabc").nonce(7);
        let body = ParameterSet::from(&withdrawal).to_body();
        assert_eq!(
            body,
            json!({"amount": "1.5", "currency": "ETH", "crypto_address": "0xabc", "nonce": 7})
        );
    }

    #[test]
    fn test_wallet_transfer_uses_exchange_key() {
        let params = ParameterSet::from(&WalletTransfer::new(Decimal::ONE, "BTC", "w-1"));
        assert_eq!(params.get("coinbase_account_id").unwrap().to_string(), "w-1");
        assert!(params.unknown_keys().is_empty());
    }
}

//! Types for account endpoints.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::types::serde_helpers::{empty_string_as_none, flexible_datetime, maybe_decimal};

/// A trading account holding one currency.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Account {
    /// Account ID.
    pub id: String,
    /// Currency held.
    pub currency: String,
    /// Total funds.
    pub balance: Decimal,
    /// Funds on hold for open orders and pending withdrawals.
    pub hold: Decimal,
    /// Funds available to trade or withdraw.
    pub available: Decimal,
    /// Owning profile.
    pub profile_id: String,
    /// Trading is enabled.
    #[serde(default)]
    pub trading_enabled: bool,
    /// Deposits not yet credited.
    #[serde(default, deserialize_with = "maybe_decimal::deserialize")]
    pub pending_deposit: Option<Decimal>,
}

/// Funds reserved on an account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Hold {
    /// Hold ID.
    pub id: String,
    /// Creation time.
    #[serde(deserialize_with = "flexible_datetime::deserialize")]
    pub created_at: OffsetDateTime,
    /// Last update.
    #[serde(default, deserialize_with = "flexible_datetime::option::deserialize")]
    pub updated_at: Option<OffsetDateTime>,
    /// Amount held.
    pub amount: Decimal,
    /// Reason for the hold (e.g. "order", "transfer").
    #[serde(rename = "type")]
    pub kind: String,
    /// ID of the order or transfer that created the hold.
    #[serde(rename = "ref")]
    pub reference: String,
}

/// Ledger activity on an account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LedgerEntry {
    /// Entry ID.
    pub id: String,
    /// Creation time.
    #[serde(deserialize_with = "flexible_datetime::deserialize")]
    pub created_at: OffsetDateTime,
    /// Signed amount.
    pub amount: Decimal,
    /// Balance after the entry.
    pub balance: Decimal,
    /// Entry type (e.g. "transfer", "match", "fee", "rebate", "conversion").
    #[serde(rename = "type")]
    pub kind: String,
    /// Type-dependent details such as `order_id` or `product_id`.
    #[serde(default)]
    pub details: BTreeMap<String, serde_json::Value>,
}

/// A deposit or withdrawal recorded on an account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccountTransfer {
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
    /// Client-supplied nonce.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub user_nonce: Option<String>,
    /// Method-dependent details.
    #[serde(default)]
    pub details: BTreeMap<String, serde_json::Value>,
}

/// A wallet of the linked Coinbase account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Wallet {
    /// Wallet ID.
    pub id: String,
    /// Wallet name.
    pub name: String,
    /// Balance.
    pub balance: Decimal,
    /// Currency.
    pub currency: String,
    /// Wallet type (e.g. "wallet", "fiat").
    #[serde(rename = "type")]
    pub kind: String,
    /// Primary wallet for its currency.
    #[serde(default)]
    pub primary: bool,
    /// Funds can be moved to and from the exchange.
    #[serde(default)]
    pub active: bool,
    /// Funds held.
    #[serde(default, deserialize_with = "maybe_decimal::deserialize")]
    pub hold_balance: Option<Decimal>,
    /// Currency of `hold_balance`.
    #[serde(default)]
    pub hold_currency: Option<String>,
}

/// A crypto deposit address.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DepositAddress {
    /// Address ID.
    #[serde(default)]
    pub id: Option<String>,
    /// On-chain address.
    pub address: String,
    /// Memo or destination tag, when the network needs one.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub destination_tag: Option<String>,
    /// Network the address belongs to.
    #[serde(default)]
    pub network: Option<String>,
    /// Creation time.
    #[serde(default, deserialize_with = "flexible_datetime::option::deserialize")]
    pub created_at: Option<OffsetDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_entry_details() {
        let entry: LedgerEntry = serde_json::from_value(serde_json::json!({
            "id": "100",
            "created_at": "2019-06-11T22:11:56.382Z",
            "amount": "-0.0100",
            "balance": "0.9900",
            "type": "fee",
            "details": {"order_id": "d50ec984", "product_id": "BTC-USD", "trade_id": "74"}
        }))
        .unwrap();
        assert_eq!(entry.kind, "fee");
        assert_eq!(entry.details["product_id"], "BTC-USD");
        assert!(entry.amount.is_sign_negative());
    }

    #[test]
    fn test_account_transfer_database_timestamps() {
        let transfer: AccountTransfer = serde_json::from_value(serde_json::json!({
            "id": "19ac524d",
            "type": "deposit",
            "created_at": "2020-03-12 00:14:12.397805+00",
            "completed_at": "2020-03-12 00:14:13.021176+00",
            "canceled_at": null,
            "processed_at": "2020-03-12 00:14:13.021176+00",
            "amount": "1.00",
            "user_nonce": "",
            "details": {"coinbase_account_id": "2b760113"}
        }))
        .unwrap();
        assert!(transfer.completed_at.is_some());
        assert!(transfer.canceled_at.is_none());
        assert!(transfer.user_nonce.is_none());
    }
}

//! Types for profile endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::request::ParameterSet;
use crate::types::serde_helpers::flexible_datetime;

/// A profile (sub-portfolio) of the user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Profile {
    /// Profile ID.
    pub id: String,
    /// Owning user.
    pub user_id: String,
    /// Name.
    pub name: String,
    /// Profile is active.
    #[serde(default)]
    pub active: bool,
    /// Default profile of the user.
    #[serde(default)]
    pub is_default: bool,
    /// Creation time.
    #[serde(deserialize_with = "flexible_datetime::deserialize")]
    pub created_at: OffsetDateTime,
    /// Margin is enabled.
    #[serde(default)]
    pub has_margin: Option<bool>,
}

/// Funds moved between two profiles of the same user.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileTransfer {
    /// Source profile.
    pub from: String,
    /// Destination profile.
    pub to: String,
    /// Currency.
    pub currency: String,
    /// Amount.
    pub amount: Decimal,
}

impl ProfileTransfer {
    /// Create a new profile transfer.
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        currency: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            currency: currency.into(),
            amount,
        }
    }
}

impl From<&ProfileTransfer> for ParameterSet {
    fn from(transfer: &ProfileTransfer) -> Self {
        ParameterSet::allowing(super::TRANSFER_PARAMS)
            .with("from", transfer.from.as_str())
            .with("to", transfer.to.as_str())
            .with("currency", transfer.currency.as_str())
            .with("amount", transfer.amount)
    }
}

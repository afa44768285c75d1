//! Deposit, withdrawal and transfer history endpoints (authentication required).

mod types;

pub use types::*;

use crate::request::{ApiRequest, ParameterSet};
use crate::rest::endpoints::{
    self, DEPOSIT_COINBASE_ACCOUNT, DEPOSIT_PAYMENT_METHOD, PAYMENT_METHODS, TRANSFERS,
    WITHDRAW_COINBASE_ACCOUNT, WITHDRAW_CRYPTO, WITHDRAW_FEE_ESTIMATE, WITHDRAW_PAYMENT_METHOD,
};
use crate::rest::{Call, CoinbaseClient};
use crate::transport::Transport;

/// Parameters accepted by the transfer list.
pub const LIST_PARAMS: &[&str] = &["profile_id", "before", "after", "limit", "type"];
/// Body of a wallet deposit or withdrawal.
pub const WALLET_PARAMS: &[&str] = &["amount", "currency", "coinbase_account_id", "profile_id"];
/// Body of a payment method deposit or withdrawal.
pub const PAYMENT_METHOD_PARAMS: &[&str] =
    &["amount", "currency", "payment_method_id", "profile_id"];
/// Body of a crypto withdrawal.
pub const CRYPTO_PARAMS: &[&str] = &[
    "amount",
    "currency",
    "crypto_address",
    "destination_tag",
    "no_destination_tag",
    "network",
    "add_network_fee_to_total",
    "nonce",
    "profile_id",
];
/// Parameters accepted by the withdrawal fee estimate.
pub const FEE_ESTIMATE_PARAMS: &[&str] = &["currency", "crypto_address", "network"];

/// Deposit, withdrawal and transfer history endpoints.
pub struct Transfers<'a, T> {
    client: &'a CoinbaseClient<T>,
}

impl<'a, T: Transport> Transfers<'a, T> {
    pub(crate) fn new(client: &'a CoinbaseClient<T>) -> Self {
        Self { client }
    }

    /// List deposits and withdrawals across accounts.
    ///
    /// # Arguments
    ///
    /// * `options` - `type` (see [`TransferType`](crate::types::TransferType)),
    ///   `profile_id` and pagination.
    pub fn list(&self, options: Option<&ParameterSet>) -> Call<'a, Vec<Transfer>, T> {
        let query = ParameterSet::allowing(LIST_PARAMS).merged(options);
        self.client.list(ApiRequest::get(TRANSFERS).query(query))
    }

    /// Get a single transfer.
    pub fn get(&self, transfer_id: &str) -> Call<'a, Transfer, T> {
        self.client
            .single(ApiRequest::get(endpoints::path(TRANSFERS, &[transfer_id])))
    }

    /// Deposit funds from a Coinbase wallet.
    pub fn deposit_from_wallet(&self, transfer: &WalletTransfer) -> Call<'a, TransferReceipt, T> {
        self.client
            .single(ApiRequest::post(DEPOSIT_COINBASE_ACCOUNT, transfer.into()))
    }

    /// Deposit funds from a linked payment method.
    pub fn deposit_from_payment_method(
        &self,
        transfer: &PaymentMethodTransfer,
    ) -> Call<'a, TransferReceipt, T> {
        self.client
            .single(ApiRequest::post(DEPOSIT_PAYMENT_METHOD, transfer.into()))
    }

    /// Withdraw funds to a Coinbase wallet.
    pub fn withdraw_to_wallet(&self, transfer: &WalletTransfer) -> Call<'a, TransferReceipt, T> {
        self.client
            .single(ApiRequest::post(WITHDRAW_COINBASE_ACCOUNT, transfer.into()))
    }

    /// Withdraw funds to a linked payment method.
    pub fn withdraw_to_payment_method(
        &self,
        transfer: &PaymentMethodTransfer,
    ) -> Call<'a, TransferReceipt, T> {
        self.client
            .single(ApiRequest::post(WITHDRAW_PAYMENT_METHOD, transfer.into()))
    }

    /// Withdraw funds to an external crypto address.
    pub fn withdraw_to_crypto(&self, withdrawal: &CryptoWithdrawal) -> Call<'a, TransferReceipt, T> {
        self.client
            .single(ApiRequest::post(WITHDRAW_CRYPTO, withdrawal.into()))
    }

    /// Estimate the network fee of a crypto withdrawal.
    pub fn fee_estimate(
        &self,
        currency: &str,
        crypto_address: &str,
        options: Option<&ParameterSet>,
    ) -> Call<'a, FeeEstimate, T> {
        let query = ParameterSet::allowing(FEE_ESTIMATE_PARAMS)
            .with("currency", currency)
            .with("crypto_address", crypto_address)
            .merged(options);
        self.client
            .single(ApiRequest::get(WITHDRAW_FEE_ESTIMATE).query(query))
    }

    /// List linked payment methods.
    pub fn payment_methods(&self) -> Call<'a, Vec<PaymentMethod>, T> {
        self.client.list(ApiRequest::get(PAYMENT_METHODS))
    }
}

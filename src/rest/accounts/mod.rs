//! Account endpoints (authentication required).

mod types;

pub use types::*;

use crate::request::{ApiRequest, ParameterSet};
use crate::rest::endpoints::{self, ACCOUNTS, COINBASE_ACCOUNTS};
use crate::rest::{Call, CoinbaseClient};
use crate::transport::Transport;

/// Parameters accepted by the holds endpoint.
pub const HOLD_PARAMS: &[&str] = &["before", "after", "limit"];
/// Parameters accepted by the ledger endpoint.
pub const LEDGER_PARAMS: &[&str] = &[
    "start_date",
    "end_date",
    "before",
    "after",
    "limit",
    "profile_id",
];
/// Parameters accepted by the account transfers endpoint.
pub const TRANSFER_PARAMS: &[&str] = &["before", "after", "limit", "type"];

/// Account endpoints.
pub struct Accounts<'a, T> {
    client: &'a CoinbaseClient<T>,
}

impl<'a, T: Transport> Accounts<'a, T> {
    pub(crate) fn new(client: &'a CoinbaseClient<T>) -> Self {
        Self { client }
    }

    /// List the trading accounts of the current profile.
    pub fn list(&self) -> Call<'a, Vec<Account>, T> {
        self.client.list(ApiRequest::get(ACCOUNTS))
    }

    /// Get a single account.
    pub fn get(&self, account_id: &str) -> Call<'a, Account, T> {
        self.client
            .single(ApiRequest::get(endpoints::path(ACCOUNTS, &[account_id])))
    }

    /// List holds on an account.
    pub fn holds(&self, account_id: &str, options: Option<&ParameterSet>) -> Call<'a, Vec<Hold>, T> {
        let query = ParameterSet::allowing(HOLD_PARAMS).merged(options);
        self.client.list(
            ApiRequest::get(endpoints::path(ACCOUNTS, &[account_id, "holds"])).query(query),
        )
    }

    /// List ledger activity on an account, newest first.
    ///
    /// # Arguments
    ///
    /// * `account_id` - Account to query.
    /// * `options` - Date range (`start_date`, `end_date`), pagination
    ///   (`before`, `after`, `limit`) and `profile_id`.
    pub fn ledger(
        &self,
        account_id: &str,
        options: Option<&ParameterSet>,
    ) -> Call<'a, Vec<LedgerEntry>, T> {
        let query = ParameterSet::allowing(LEDGER_PARAMS).merged(options);
        self.client.list(
            ApiRequest::get(endpoints::path(ACCOUNTS, &[account_id, "ledger"])).query(query),
        )
    }

    /// List deposits and withdrawals of an account.
    pub fn transfers(
        &self,
        account_id: &str,
        options: Option<&ParameterSet>,
    ) -> Call<'a, Vec<AccountTransfer>, T> {
        let query = ParameterSet::allowing(TRANSFER_PARAMS).merged(options);
        self.client.list(
            ApiRequest::get(endpoints::path(ACCOUNTS, &[account_id, "transfers"])).query(query),
        )
    }

    /// List wallets of the linked Coinbase account.
    pub fn wallets(&self) -> Call<'a, Vec<Wallet>, T> {
        self.client.list(ApiRequest::get(COINBASE_ACCOUNTS))
    }

    /// Generate a one-time crypto deposit address for a wallet.
    pub fn generate_address(&self, wallet_id: &str) -> Call<'a, DepositAddress, T> {
        self.client.single(ApiRequest::post(
            endpoints::path(COINBASE_ACCOUNTS, &[wallet_id, "addresses"]),
            ParameterSet::new(),
        ))
    }
}

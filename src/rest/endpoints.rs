//! Coinbase Exchange REST API endpoint constants.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Base URL for the production REST API.
pub const PRODUCTION_BASE_URL: &str = "https://api.exchange.coinbase.com";

/// Base URL for the public sandbox REST API.
pub const SANDBOX_BASE_URL: &str = "https://api-public.sandbox.exchange.coinbase.com";

/// Trading accounts of the current profile.
pub const ACCOUNTS: &str = "/accounts";
/// Wallets of the linked Coinbase account.
pub const COINBASE_ACCOUNTS: &str = "/coinbase-accounts";
/// Known currencies.
pub const CURRENCIES: &str = "/currencies";
/// Fee rates.
pub const FEES: &str = "/fees";
/// Trading pairs.
pub const PRODUCTS: &str = "/products";
/// Profiles.
pub const PROFILES: &str = "/profiles";
/// Fund transfer between profiles.
pub const PROFILES_TRANSFER: &str = "/profiles/transfer";
/// Reports.
pub const REPORTS: &str = "/reports";
/// Transfers.
pub const TRANSFERS: &str = "/transfers";
/// Deposit from a Coinbase wallet.
pub const DEPOSIT_COINBASE_ACCOUNT: &str = "/deposits/coinbase-account";
/// Deposit from a payment method.
pub const DEPOSIT_PAYMENT_METHOD: &str = "/deposits/payment-method";
/// Withdraw to a Coinbase wallet.
pub const WITHDRAW_COINBASE_ACCOUNT: &str = "/withdrawals/coinbase-account";
/// Withdraw to a payment method.
pub const WITHDRAW_PAYMENT_METHOD: &str = "/withdrawals/payment-method";
/// Withdraw to a crypto address.
pub const WITHDRAW_CRYPTO: &str = "/withdrawals/crypto";
/// Estimated network fee of a crypto withdrawal.
pub const WITHDRAW_FEE_ESTIMATE: &str = "/withdrawals/fee-estimate";
/// Linked payment methods.
pub const PAYMENT_METHODS: &str = "/payment-methods";
/// Users.
pub const USERS: &str = "/users";
/// Trailing 30-day volume of the current user.
pub const TRAILING_VOLUME: &str = "/users/self/trailing-volume";
/// Wrapped assets.
pub const WRAPPED_ASSETS: &str = "/wrapped-assets";
/// Stake-wrap conversions.
pub const STAKE_WRAP: &str = "/wrapped-assets/stake-wrap";

/// Characters escaped inside a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Join a root path and identifier segments, percent-encoding each segment.
pub(crate) fn path(root: &str, segments: &[&str]) -> String {
    let mut path = root.to_string();
    for segment in segments {
        path.push('/');
        path.extend(utf8_percent_encode(segment, PATH_SEGMENT));
    }
    path
}

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue};
use rust_decimal::Decimal;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use coinbase_exchange_client::cache::{CATALOG_TTL, CatalogCache};
use coinbase_exchange_client::request::Method;
use coinbase_exchange_client::rest::CoinbaseClient;
use coinbase_exchange_client::rest::profiles::ProfileTransfer;
use coinbase_exchange_client::rest::reports::{ReportFormat, ReportRequest, ReportType};
use coinbase_exchange_client::rest::transfers::{CryptoWithdrawal, PaymentMethodTransfer, WalletTransfer};
use coinbase_exchange_client::rest::wrapped_assets::StakeWrapRequest;
use coinbase_exchange_client::transport::RequestSigner;
use coinbase_exchange_client::types::TransferType;
use coinbase_exchange_client::{CoinbaseError, ParameterSet};

/// Signs with a fixed key header and echoes the signed path for assertions.
struct StaticSigner;

impl RequestSigner for StaticSigner {
    fn sign(
        &self,
        method: &Method,
        path_and_query: &str,
        body: &str,
    ) -> Result<HeaderMap, CoinbaseError> {
        let mut headers = HeaderMap::new();
        headers.insert("cb-access-key", HeaderValue::from_static("test-key"));
        let prehash = format!("{}{}{}", method, path_and_query, body);
        headers.insert(
            "x-test-prehash",
            HeaderValue::from_str(&prehash)
                .map_err(|e| CoinbaseError::Transport(e.to_string()))?,
        );
        Ok(headers)
    }
}

fn build_private_client(server: &MockServer) -> CoinbaseClient {
    CoinbaseClient::builder()
        .base_url(server.uri())
        .max_retries(0)
        .signer(Arc::new(StaticSigner))
        .catalog_cache(Arc::new(CatalogCache::new(CATALOG_TTL)))
        .build()
        .unwrap()
}

fn account_json(id: &str, currency: &str, balance: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "currency": currency,
        "balance": balance,
        "hold": "0.0000000000000000",
        "available": balance,
        "profile_id": "8058d771-2d88-4f0f-ab6e-299c153d4308",
        "trading_enabled": true,
        "pending_deposit": "",
    })
}

#[tokio::test]
async fn test_list_accounts_is_signed() {
    let server = MockServer::start().await;
    let response = serde_json::json!([
        account_json("acc-1", "BTC", "1.5000000000000000"),
        account_json("acc-2", "USD", "1200.25")
    ]);

    Mock::given(method("GET"))
        .and(path("/accounts"))
        .and(header("cb-access-key", "test-key"))
        .and(header("x-test-prehash", "GET/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_private_client(&server);
    let accounts = client.accounts().list().await.unwrap();
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].currency, "BTC");
    assert_eq!(accounts[1].available.to_string(), "1200.25");
    assert!(accounts[0].pending_deposit.is_none());
}

#[tokio::test]
async fn test_account_ledger_with_pagination() {
    let server = MockServer::start().await;
    let response = serde_json::json!([{
        "id": "1001",
        "amount": "0.001",
        "balance": "1.501",
        "created_at": "2024-01-10T12:00:01.123456Z",
        "type": "match",
        "details": {"order_id": "o-1", "trade_id": "74", "product_id": "BTC-USD"}
    }]);

    Mock::given(method("GET"))
        .and(path("/accounts/acc-1/ledger"))
        .and(query_param("limit", "1"))
        .and(query_param("before", "1000"))
        .and(header("x-test-prehash", "GET/accounts/acc-1/ledger?limit=1&before=1000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_private_client(&server);
    let options = ParameterSet::new().with("limit", 1).with("before", "1000");
    let ledger = client
        .accounts()
        .ledger("acc-1", Some(&options))
        .await
        .unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].kind, "match");
    assert_eq!(ledger[0].details["product_id"], "BTC-USD");
}

#[tokio::test]
async fn test_account_holds_and_transfers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts/acc-1/holds"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": "h-1",
            "created_at": "2024-01-10T12:00:01Z",
            "amount": "25.00",
            "type": "order",
            "ref": "o-9"
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/accounts/acc-1/transfers"))
        .and(query_param("type", "deposit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": "t-1",
            "type": "deposit",
            "created_at": "2024-01-09 08:15:00.5+00",
            "completed_at": "2024-01-09 08:16:00+00",
            "amount": "100.00",
            "details": {}
        }])))
        .mount(&server)
        .await;

    let client = build_private_client(&server);
    let holds = client.accounts().holds("acc-1", None).await.unwrap();
    assert_eq!(holds[0].reference, "o-9");

    let options = ParameterSet::new().with("type", TransferType::Deposit);
    let transfers = client
        .accounts()
        .transfers("acc-1", Some(&options))
        .await
        .unwrap();
    assert_eq!(transfers[0].kind, "deposit");
    assert!(transfers[0].completed_at.is_some());
}

#[tokio::test]
async fn test_generate_wallet_address() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/coinbase-accounts/w-1/addresses"))
        .and(body_json(serde_json::json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "addr-1",
            "address": "0x5ad5769cd04681FeD900BCE3DDc877B50E83d469",
            "network": "ethereum",
            "destination_tag": "",
            "created_at": "2024-01-10T12:00:01Z"
        })))
        .mount(&server)
        .await;

    let client = build_private_client(&server);
    let address = client.accounts().generate_address("w-1").await.unwrap();
    assert_eq!(address.network.as_deref(), Some("ethereum"));
    assert!(address.destination_tag.is_none());
}

#[tokio::test]
async fn test_currencies_and_fees() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/currencies/BTC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "BTC",
            "name": "Bitcoin",
            "min_size": "0.00000001",
            "status": "online",
            "message": "",
            "max_precision": "0.00000001",
            "convertible_to": [],
            "details": {"type": "crypto", "symbol": "₿", "network_confirmations": 2}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "maker_fee_rate": "0.0040",
            "taker_fee_rate": "0.0060",
            "usd_volume": "1500.00"
        })))
        .mount(&server)
        .await;

    let client = build_private_client(&server);
    let btc = client.currencies().get("BTC").await.unwrap();
    assert_eq!(btc.details.network_confirmations, Some(2));
    assert!(btc.message.is_none());

    let fees = client.fees().get().await.unwrap();
    assert_eq!(fees.taker_fee_rate.to_string(), "0.0060");
}

#[tokio::test]
async fn test_profile_lifecycle() {
    let server = MockServer::start().await;
    let profile = serde_json::json!({
        "id": "p-2",
        "user_id": "u-1",
        "name": "bots",
        "active": true,
        "is_default": false,
        "created_at": "2024-01-10T12:00:01.123Z"
    });

    Mock::given(method("POST"))
        .and(path("/profiles"))
        .and(body_json(serde_json::json!({"name": "bots"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile.clone()))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/profiles/p-2"))
        .and(body_json(serde_json::json!({"profile_id": "p-2", "name": "arb"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/profiles/transfer"))
        .and(body_json(serde_json::json!({
            "from": "p-1", "to": "p-2", "currency": "USD", "amount": "10.5"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/profiles/p-2/deactivate"))
        .and(body_json(serde_json::json!({"profile_id": "p-2", "to": "p-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = build_private_client(&server);
    let created = client.profiles().create("bots").await.unwrap();
    assert_eq!(created.id, "p-2");
    assert!(created.active);

    client.profiles().rename("p-2", "arb").await.unwrap();

    let transfer = ProfileTransfer::new("p-1", "p-2", "USD", Decimal::new(105, 1));
    client.profiles().transfer(&transfer).await.unwrap();
    client.profiles().deactivate("p-2", "p-1").await.unwrap();
}

#[tokio::test]
async fn test_create_and_get_report() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/reports"))
        .and(body_json(serde_json::json!({
            "type": "fills",
            "format": "csv",
            "product_id": "BTC-USD",
            "start_date": "2024-01-01T00:00:00Z",
            "end_date": "2024-02-01T00:00:00Z"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "r-1", "type": "fills", "status": "pending"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/reports/r-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "r-1",
            "type": "fills",
            "status": "ready",
            "created_at": "2024-02-02T00:00:00Z",
            "completed_at": "2024-02-02T00:01:00Z",
            "expires_at": "2024-02-09T00:01:00Z",
            "file_url": "https://example.com/r-1.csv",
            "params": {"product_id": "BTC-USD"}
        })))
        .mount(&server)
        .await;

    let client = build_private_client(&server);
    let request = ReportRequest::fills("BTC-USD", "2024-01-01T00:00:00Z", "2024-02-01T00:00:00Z")
        .format(ReportFormat::Csv);
    let pending = client.reports().create(&request).await.unwrap();
    assert_eq!(pending.kind, ReportType::Fills);
    assert!(!pending.is_ready());

    let ready = client.reports().get("r-1").await.unwrap();
    assert!(ready.is_ready());
}

#[tokio::test]
async fn test_deposits_and_withdrawals() {
    let server = MockServer::start().await;
    let receipt = serde_json::json!({
        "id": "tx-1",
        "amount": "10.00",
        "currency": "USD",
        "payout_at": "2024-01-12T00:00:00Z"
    });

    Mock::given(method("POST"))
        .and(path("/deposits/coinbase-account"))
        .and(body_json(serde_json::json!({
            "amount": "10.00", "currency": "USD", "coinbase_account_id": "w-1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(receipt.clone()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/withdrawals/payment-method"))
        .and(body_json(serde_json::json!({
            "amount": "10.00", "currency": "USD", "payment_method_id": "pm-1", "profile_id": "p-1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(receipt.clone()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/withdrawals/crypto"))
        .and(body_json(serde_json::json!({
            "amount": "0.5", "currency": "ETH", "crypto_address": "0xabc", "network": "ethereum"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "tx-2", "amount": "0.5", "currency": "ETH", "fee": "0.001", "subtotal": "0.499"
        })))
        .mount(&server)
        .await;

    let client = build_private_client(&server);
    let amount = Decimal::new(1000, 2);

    let deposit = client
        .transfers()
        .deposit_from_wallet(&WalletTransfer::new(amount, "USD", "w-1"))
        .await
        .unwrap();
    assert_eq!(deposit.id, "tx-1");
    assert!(deposit.payout_at.is_some());

    let withdrawal = PaymentMethodTransfer::new(amount, "USD", "pm-1").profile("p-1");
    client
        .transfers()
        .withdraw_to_payment_method(&withdrawal)
        .await
        .unwrap();

    let crypto = CryptoWithdrawal::new(Decimal::new(5, 1), "ETH", "0xabc").network("ethereum");
    let receipt = client.transfers().withdraw_to_crypto(&crypto).await.unwrap();
    assert_eq!(receipt.fee.unwrap().to_string(), "0.001");
}

#[tokio::test]
async fn test_fee_estimate_and_payment_methods() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/withdrawals/fee-estimate"))
        .and(query_param("currency", "ETH"))
        .and(query_param("crypto_address", "0xabc"))
        .and(query_param("network", "base"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "fee": "0.0001", "fee_before_subsidy": "0.0002"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/payment-methods"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": "pm-1",
            "type": "ach_bank_account",
            "name": "Checking",
            "currency": "USD",
            "primary_buy": true,
            "allow_deposit": true,
            "allow_withdraw": true
        }])))
        .mount(&server)
        .await;

    let client = build_private_client(&server);
    let options = ParameterSet::new().with("network", "base");
    let estimate = client
        .transfers()
        .fee_estimate("ETH", "0xabc", Some(&options))
        .await
        .unwrap();
    assert_eq!(estimate.fee.to_string(), "0.0001");

    let methods = client.transfers().payment_methods().await.unwrap();
    assert_eq!(methods[0].kind, "ach_bank_account");
    assert!(methods[0].primary_buy);
    assert!(!methods[0].primary_sell);
}

#[tokio::test]
async fn test_list_transfers_by_type() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/transfers"))
        .and(query_param("type", "withdraw"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "id": "t-9",
            "type": "withdraw",
            "created_at": "2024-01-09T08:15:00Z",
            "completed_at": null,
            "canceled_at": "2024-01-09T09:00:00Z",
            "amount": "5.00",
            "currency": "USD"
        }])))
        .mount(&server)
        .await;

    let client = build_private_client(&server);
    let options = ParameterSet::new().with("type", TransferType::Withdraw);
    let transfers = client.transfers().list(Some(&options)).await.unwrap();
    assert_eq!(transfers.len(), 1);
    assert!(!transfers[0].is_completed());
}

#[tokio::test]
async fn test_user_limits_and_volume() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/u-1/exchange-limits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "limit_currency": "USD",
            "transfer_limits": {
                "ach": {"USD": {"max": "25000", "remaining": "24000", "period_in_days": 7}}
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/self/trailing-volume"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "product_id": "BTC-USD",
            "exchange_volume": "11800.92",
            "volume": "0.1",
            "recorded_at": "2024-01-10T12:00:01Z"
        }])))
        .mount(&server)
        .await;

    let client = build_private_client(&server);
    let limits = client.users().exchange_limits("u-1").await.unwrap();
    assert_eq!(limits.transfer_limits["ach"]["USD"].remaining.to_string(), "24000");

    let volume = client.users().trailing_volume().await.unwrap();
    assert_eq!(volume[0].product_id, "BTC-USD");
}

#[tokio::test]
async fn test_wrapped_assets_and_stake_wraps() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wrapped-assets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "wrapped_assets": [{
                "id": "CBETH",
                "circulating_supply": "1200000",
                "total_supply": "1250000",
                "conversion_rate": "1.0710",
                "apy": "0.0321"
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wrapped-assets/CBETH/conversion-rate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"amount": "1.0710"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/wrapped-assets/stake-wrap"))
        .and(body_json(serde_json::json!({
            "from_currency": "ETH", "to_currency": "CBETH", "amount": "2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "sw-1",
            "from_amount": "2",
            "to_amount": "1.867",
            "from_currency": "ETH",
            "to_currency": "CBETH",
            "status": "pending",
            "created_at": "2024-01-10T12:00:01Z"
        })))
        .mount(&server)
        .await;

    let client = build_private_client(&server);
    let assets = client.wrapped_assets().list().await.unwrap();
    assert_eq!(assets[0].id, "CBETH");

    let rate = client.wrapped_assets().conversion_rate("CBETH").await.unwrap();
    assert_eq!(rate.amount.to_string(), "1.0710");

    let request = StakeWrapRequest::new("ETH", "CBETH", Decimal::from(2));
    let wrap = client
        .wrapped_assets()
        .create_stake_wrap(&request)
        .await
        .unwrap();
    assert_eq!(wrap.status, "pending");
    assert!(wrap.completed_at.is_none());
}

#[tokio::test]
async fn test_unauthorized_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/accounts"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(serde_json::json!({"message": "invalid signature"})),
        )
        .mount(&server)
        .await;

    let client = build_private_client(&server);
    match client.accounts().list().await {
        Err(CoinbaseError::Api(api)) => {
            assert!(api.is_unauthorized());
            assert_eq!(api.message, "invalid signature");
        }
        other => panic!("expected an API error, got {:?}", other.map(|a| a.len())),
    }
}

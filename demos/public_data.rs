//! Example: Fetching public market data from Coinbase Exchange.
//!
//! This example uses the public sandbox unless `COINBASE_EXCHANGE_BASE_URL`
//! or `COINBASE_EXCHANGE_SANDBOX` says otherwise.
//!
//! Run with: cargo run --example public_data

use coinbase_exchange_client::ParameterSet;
use coinbase_exchange_client::config::ClientConfig;
use coinbase_exchange_client::rest::CoinbaseClient;
use coinbase_exchange_client::types::{BookLevel, Granularity};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::var("COINBASE_EXCHANGE_BASE_URL") {
        Ok(_) => ClientConfig::from_env()?,
        Err(_) => ClientConfig::sandbox(),
    };
    let client = CoinbaseClient::builder().config(config).build()?;

    println!("=== Products ===");
    let products = client.products().catalog().await?;
    for product in products.iter().take(5) {
        println!(
            "{}: base={}, quote={}, status={}",
            product.id, product.base_currency, product.quote_currency, product.status
        );
    }

    println!("\n=== Currencies ===");
    let currencies = client.currencies().list().await?;
    for currency in currencies.iter().take(5) {
        println!("{}: {} (min size {})", currency.id, currency.name, currency.min_size);
    }

    println!("\n=== BTC-USD Ticker ===");
    let ticker = client.products().ticker("BTC-USD").await?;
    println!("Price: {} (bid {} / ask {})", ticker.price, ticker.bid, ticker.ask);

    println!("\n=== BTC-USD Stats ===");
    let stats = client.products().stats("BTC-USD").await?;
    println!("Last: {}, 24h change: {:+.2}%", stats.last, stats.change_percent_24h());

    println!("\n=== BTC-USD Book ===");
    let book = client.products().book("BTC-USD", BookLevel::Top50).await?;
    println!(
        "{} bids, {} asks, spread {:?}",
        book.bids.len(),
        book.asks.len(),
        book.spread()
    );

    println!("\n=== BTC-USD Hourly Candles ===");
    let options = ParameterSet::new().with("granularity", Granularity::OneHour);
    let candles = client.products().candles("BTC-USD", Some(&options)).await?;
    for candle in candles.iter().take(3) {
        println!(
            "t={} o={} h={} l={} c={}",
            candle.time, candle.open, candle.high, candle.low, candle.close
        );
    }

    Ok(())
}

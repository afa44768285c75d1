//! Example: One endpoint, three representations.
//!
//! Run with: cargo run --example output_modes

use coinbase_exchange_client::rest::CoinbaseClient;
use coinbase_exchange_client::{CoinbaseError, Materialized, OutputMode};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let client = CoinbaseClient::sandbox()?;
    let products = client.products();

    // Awaiting a call directly yields the typed value.
    let ticker = products.ticker("BTC-USD").await?;
    println!("Typed: price={} at {}", ticker.price, ticker.time);

    // The same endpoint as untouched text...
    let raw = products.ticker("BTC-USD").raw().await?;
    println!("Raw: {}", raw);

    // ...or as a JSON tree.
    let tree = products.ticker("BTC-USD").structured().await?;
    println!("Structured: volume={}", tree["volume"]);

    // The mode can also be picked at runtime.
    for mode in [OutputMode::Raw, OutputMode::Structured, OutputMode::Typed] {
        match products.stats("BTC-USD").output(mode).await {
            Ok(Materialized::Raw(text)) => println!("{:?}: {} bytes", mode, text.len()),
            Ok(Materialized::Structured(value)) => println!("{:?}: last={}", mode, value["last"]),
            Ok(Materialized::Typed(stats)) => println!("{:?}: last={}", mode, stats.last),
            Err(CoinbaseError::MalformedResponse(details)) => {
                println!("{:?}: malformed response: {}", mode, details)
            }
            Err(e) => return Err(e.into()),
        }
    }

    // Batch calls take the mode as an argument.
    let stats = products.all_stats(OutputMode::Structured).await?;
    println!("Stats for {} products", stats.len());

    Ok(())
}

//! Example: Directional forecasts from daily candles.
//!
//! Run with: cargo run --example forecast -- BTC-USD 7 0.02

use coinbase_exchange_client::forecast::{ForecastInput, trend_percent};
use coinbase_exchange_client::rest::CoinbaseClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let product_id = args.next().unwrap_or_else(|| "BTC-USD".to_string());
    let interval_days: i64 = args.next().map(|a| a.parse()).transpose()?.unwrap_or(7);
    let tolerance: f64 = args.next().map(|a| a.parse()).transpose()?.unwrap_or(0.02);

    // Offline: the forecaster is a pure function of the history.
    let highs: Vec<f64> = (0..14).map(|day| 100.0 + day as f64).collect();
    let offline = ForecastInput::daily(highs, 113.0, 7, 0.02).evaluate()?;
    println!(
        "Synthetic series: {:?} {:+.2}% (projected {:.2})",
        offline.trend, offline.percent, offline.projected_price
    );
    println!("100 -> 108 is {:+.1}%", trend_percent(100.0, 108.0));

    // Online: candles and ticker from the exchange.
    let client = CoinbaseClient::from_env()?;
    let forecast = client
        .products()
        .forecast(&product_id, interval_days, tolerance)
        .await?;
    println!(
        "{} over {} days: {:?} {:+.2}% (projected {:.2})",
        product_id, interval_days, forecast.trend, forecast.percent, forecast.projected_price
    );

    Ok(())
}

//! Types for product and market data endpoints.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize, de};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use time::OffsetDateTime;

use crate::forecast::trend_percent;
use crate::types::Side;
use crate::types::serde_helpers::{empty_string_as_none, maybe_decimal};

/// A trading pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID (e.g. "BTC-USD").
    pub id: String,
    /// Base currency.
    pub base_currency: String,
    /// Quote currency.
    pub quote_currency: String,
    /// Price increment.
    pub quote_increment: Decimal,
    /// Size increment.
    pub base_increment: Decimal,
    /// Human-readable name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Minimum funds for a market order.
    #[serde(default, deserialize_with = "maybe_decimal::deserialize")]
    pub min_market_funds: Option<Decimal>,
    /// Trading status (e.g. "online", "delisted").
    pub status: String,
    /// Status details.
    #[serde(default, deserialize_with = "empty_string_as_none::deserialize")]
    pub status_message: Option<String>,
    /// Margin trading is enabled.
    #[serde(default)]
    pub margin_enabled: bool,
    /// Only post-only orders are accepted.
    #[serde(default)]
    pub post_only: bool,
    /// Only limit orders are accepted.
    #[serde(default)]
    pub limit_only: bool,
    /// Only cancellations are accepted.
    #[serde(default)]
    pub cancel_only: bool,
    /// Trading is disabled.
    #[serde(default)]
    pub trading_disabled: bool,
    /// Product is a stablecoin FX pair.
    #[serde(default)]
    pub fx_stablecoin: bool,
    /// Maximum slippage for market orders.
    #[serde(default, deserialize_with = "maybe_decimal::deserialize")]
    pub max_slippage_percentage: Option<Decimal>,
    /// Product is in auction mode.
    #[serde(default)]
    pub auction_mode: bool,
}

impl Product {
    /// True when the product accepts orders.
    pub fn is_tradable(&self) -> bool {
        self.status == "online" && !self.trading_disabled && !self.cancel_only
    }
}

/// A single candle.
///
/// Format: `[time, low, high, open, close, volume]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    /// Bucket start time, Unix seconds.
    pub time: i64,
    /// Lowest price.
    pub low: f64,
    /// Highest price.
    pub high: f64,
    /// Opening price.
    pub open: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: f64,
}

impl<'de> Deserialize<'de> for Candle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let arr: (i64, f64, f64, f64, f64, f64) = Deserialize::deserialize(deserializer)?;
        Ok(Candle {
            time: arr.0,
            low: arr.1,
            high: arr.2,
            open: arr.3,
            close: arr.4,
            volume: arr.5,
        })
    }
}

/// Third column of an order book entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookEntryDetail {
    /// Number of orders at the price (levels 1 and 2).
    Orders(u64),
    /// Order ID (level 3).
    OrderId(String),
}

impl<'de> Deserialize<'de> for BookEntryDetail {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(id) => Ok(BookEntryDetail::OrderId(id)),
            serde_json::Value::Number(n) => n
                .as_u64()
                .map(BookEntryDetail::Orders)
                .ok_or_else(|| de::Error::custom(format!("invalid order count {}", n))),
            other => Err(de::Error::custom(format!(
                "expected an order count or order id, got {}",
                other
            ))),
        }
    }
}

/// Order book entry.
/// Format: [price, size, num_orders | order_id]
#[derive(Debug, Clone, PartialEq)]
pub struct BookEntry {
    /// Price.
    pub price: Decimal,
    /// Size.
    pub size: Decimal,
    /// Order count or order ID, depending on the level requested.
    pub detail: BookEntryDetail,
}

impl<'de> Deserialize<'de> for BookEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let arr: (Decimal, Decimal, BookEntryDetail) = Deserialize::deserialize(deserializer)?;
        Ok(BookEntry {
            price: arr.0,
            size: arr.1,
            detail: arr.2,
        })
    }
}

/// Order book of one product.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductBook {
    /// Book sequence number.
    pub sequence: u64,
    /// Bids, best first.
    pub bids: Vec<BookEntry>,
    /// Asks, best first.
    pub asks: Vec<BookEntry>,
    /// Product is in auction mode.
    #[serde(default)]
    pub auction_mode: bool,
    /// Snapshot time.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub time: Option<OffsetDateTime>,
}

impl ProductBook {
    /// Best bid price.
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|e| e.price)
    }

    /// Best ask price.
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|e| e.price)
    }

    /// Difference between best ask and best bid.
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()? - self.best_bid()?)
    }
}

/// 24-hour statistics of one product.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductStats {
    /// Opening price 24 hours ago.
    pub open: Decimal,
    /// Highest price in the last 24 hours.
    pub high: Decimal,
    /// Lowest price in the last 24 hours.
    pub low: Decimal,
    /// Last traded price.
    pub last: Decimal,
    /// Volume in the last 24 hours.
    pub volume: Decimal,
    /// Volume in the last 30 days.
    #[serde(default, deserialize_with = "maybe_decimal::deserialize")]
    pub volume_30day: Option<Decimal>,
}

impl ProductStats {
    /// Signed percentage change from the 24-hour open to the last price.
    pub fn change_percent_24h(&self) -> f64 {
        let open = self.open.to_f64().unwrap_or(0.0);
        let last = self.last.to_f64().unwrap_or(0.0);
        trend_percent(open, last)
    }
}

/// Snapshot of the last trade, best bid and best ask.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ticker {
    /// ID of the last trade.
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub trade_id: u64,
    /// Last trade price.
    pub price: Decimal,
    /// Last trade size.
    pub size: Decimal,
    /// Best bid.
    pub bid: Decimal,
    /// Best ask.
    pub ask: Decimal,
    /// 24-hour volume.
    pub volume: Decimal,
    /// Time of the last trade.
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
}

/// A public trade.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Trade {
    /// Trade ID.
    pub trade_id: u64,
    /// Maker order side.
    pub side: Side,
    /// Price.
    pub price: Decimal,
    /// Size.
    pub size: Decimal,
    /// Execution time.
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_candle_from_positional_array() {
        let candle: Candle =
            serde_json::from_str("[1700000000, 90.5, 110.25, 100, 105.75, 1234.5]").unwrap();
        assert_eq!(candle.time, 1_700_000_000);
        assert_eq!(candle.low, 90.5);
        assert_eq!(candle.high, 110.25);
        assert_eq!(candle.open, 100.0);
        assert_eq!(candle.close, 105.75);
        assert_eq!(candle.volume, 1234.5);
    }

    #[test]
    fn test_candle_rejects_short_array() {
        assert!(serde_json::from_str::<Candle>("[1700000000, 90.5, 110.25]").is_err());
    }

    #[test]
    fn test_book_entry_levels() {
        let aggregated: BookEntry = serde_json::from_str(r#"["100.5", "2.0", 3]"#).unwrap();
        assert_eq!(aggregated.price, Decimal::from_str("100.5").unwrap());
        assert_eq!(aggregated.detail, BookEntryDetail::Orders(3));

        let full: BookEntry = serde_json::from_str(r#"["100.5", "2.0", "a1b2"]"#).unwrap();
        assert_eq!(full.detail, BookEntryDetail::OrderId("a1b2".to_string()));
    }

    #[test]
    fn test_book_spread() {
        let book: ProductBook = serde_json::from_str(
            r#"{"sequence": 7, "bids": [["99.5", "1", 1]], "asks": [["100.25", "2", 4]]}"#,
        )
        .unwrap();
        assert_eq!(book.spread(), Some(Decimal::from_str("0.75").unwrap()));
        assert!(book.time.is_none());
    }

    #[test]
    fn test_stats_change_percent() {
        let stats: ProductStats = serde_json::from_str(
            r#"{"open": "100", "high": "112", "low": "95", "last": "108", "volume": "10", "volume_30day": ""}"#,
        )
        .unwrap();
        assert_eq!(stats.change_percent_24h(), 8.0);
        assert!(stats.volume_30day.is_none());

        let zero = ProductStats {
            open: Decimal::ZERO,
            ..stats
        };
        assert_eq!(zero.change_percent_24h(), 0.0);
    }

    #[test]
    fn test_ticker_trade_id_as_string_or_number() {
        let mut json = serde_json::json!({
            "trade_id": "42",
            "price": "1",
            "size": "1",
            "bid": "1",
            "ask": "1",
            "volume": "1",
            "time": "2024-01-02T03:04:05.678Z"
        });
        let ticker: Ticker = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(ticker.trade_id, 42);

        json["trade_id"] = serde_json::json!(43);
        let ticker: Ticker = serde_json::from_value(json).unwrap();
        assert_eq!(ticker.trade_id, 43);
        assert_eq!(ticker.time.year(), 2024);
    }

    #[test]
    fn test_product_tradable() {
        let product: Product = serde_json::from_str(
            r#"{"id": "BTC-USD", "base_currency": "BTC", "quote_currency": "USD",
                "quote_increment": "0.01", "base_increment": "0.00000001",
                "status": "online", "status_message": ""}"#,
        )
        .unwrap();
        assert!(product.is_tradable());
        assert!(product.status_message.is_none());
    }
}

//! Common domain types for the Coinbase Exchange API.

use serde::{Deserialize, Serialize};

use crate::request::ParamValue;

/// Buy or sell side of an order or trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy side
    Buy,
    /// Sell side
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "buy"),
            Side::Sell => write!(f, "sell"),
        }
    }
}

/// Candle spacing accepted by the candles endpoint, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum Granularity {
    /// 1 minute
    OneMinute,
    /// 5 minutes
    FiveMinutes,
    /// 15 minutes
    FifteenMinutes,
    /// 1 hour
    OneHour,
    /// 6 hours
    SixHours,
    /// 1 day
    OneDay,
}

impl Granularity {
    /// Length of one candle in seconds.
    pub fn seconds(self) -> u32 {
        match self {
            Granularity::OneMinute => 60,
            Granularity::FiveMinutes => 300,
            Granularity::FifteenMinutes => 900,
            Granularity::OneHour => 3_600,
            Granularity::SixHours => 21_600,
            Granularity::OneDay => 86_400,
        }
    }

    /// Number of candles covering one day.
    pub fn samples_per_day(self) -> usize {
        (86_400 / self.seconds()) as usize
    }
}

impl From<Granularity> for u32 {
    fn from(granularity: Granularity) -> u32 {
        granularity.seconds()
    }
}

impl TryFrom<u32> for Granularity {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            60 => Ok(Granularity::OneMinute),
            300 => Ok(Granularity::FiveMinutes),
            900 => Ok(Granularity::FifteenMinutes),
            3_600 => Ok(Granularity::OneHour),
            21_600 => Ok(Granularity::SixHours),
            86_400 => Ok(Granularity::OneDay),
            _ => Err(format!("Invalid candle granularity: {}", value)),
        }
    }
}

impl From<Granularity> for ParamValue {
    fn from(granularity: Granularity) -> Self {
        ParamValue::UInt(u64::from(granularity.seconds()))
    }
}

/// Aggregation level of an order book request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BookLevel {
    /// Best bid and ask only.
    #[default]
    Best,
    /// Top 50 aggregated price levels.
    Top50,
    /// Full non-aggregated book.
    Full,
}

impl BookLevel {
    /// Numeric level sent as the `level` parameter.
    pub fn as_u8(self) -> u8 {
        match self {
            BookLevel::Best => 1,
            BookLevel::Top50 => 2,
            BookLevel::Full => 3,
        }
    }
}

impl From<BookLevel> for ParamValue {
    fn from(level: BookLevel) -> Self {
        ParamValue::UInt(u64::from(level.as_u8()))
    }
}

/// Kind of a transfer between the exchange and outside wallets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferType {
    /// Funds moved into the exchange.
    Deposit,
    /// Funds moved out of the exchange.
    Withdraw,
    /// Internal deposit between profiles.
    InternalDeposit,
    /// Internal withdrawal between profiles.
    InternalWithdraw,
}

impl std::fmt::Display for TransferType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TransferType::Deposit => "deposit",
            TransferType::Withdraw => "withdraw",
            TransferType::InternalDeposit => "internal_deposit",
            TransferType::InternalWithdraw => "internal_withdraw",
        };
        write!(f, "{}", s)
    }
}

impl From<TransferType> for ParamValue {
    fn from(kind: TransferType) -> Self {
        ParamValue::Str(kind.to_string())
    }
}

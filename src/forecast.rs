//! Directional price forecasts from candle history.
//!
//! The forecast compares the mean of the most recent window of candle highs to
//! the mean of the window before it. The relative change between the two means,
//! in percent, is the forecast; changes within `tolerance` are reported as flat.

use crate::error::CoinbaseError;
use crate::types::Granularity;

/// Signed percentage change from `reference` to `current`.
///
/// Positive values mean an increase. A zero reference yields `0.0` instead of
/// dividing by zero.
///
/// ```rust
/// use coinbase_exchange_client::forecast::trend_percent;
///
/// assert_eq!(trend_percent(100.0, 108.0), 8.0);
/// assert_eq!(trend_percent(100.0, 92.0), -8.0);
/// assert_eq!(trend_percent(0.0, 50.0), 0.0);
/// ```
pub fn trend_percent(reference: f64, current: f64) -> f64 {
    if reference == 0.0 {
        return 0.0;
    }
    (current - reference) / reference.abs() * 100.0
}

/// Direction of a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    /// Prices are expected to rise.
    Rising,
    /// Prices are expected to fall.
    Falling,
    /// The change is within tolerance.
    Flat,
}

/// Result of a forecast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Forecast {
    /// Direction.
    pub trend: Trend,
    /// Signed percentage; `0.0` when flat.
    pub percent: f64,
    /// Last price moved by `percent`.
    pub projected_price: f64,
}

/// Inputs of a forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastInput {
    /// Candle highs ordered oldest first.
    pub historical_highs: Vec<f64>,
    /// Last traded price.
    pub last_price: f64,
    /// Length of each comparison window, in days.
    pub interval_days: i64,
    /// Relative change (as a fraction, `0.02` = 2%) treated as flat.
    pub tolerance: f64,
    /// Spacing of the samples in `historical_highs`.
    pub granularity: Granularity,
}

impl ForecastInput {
    /// Inputs sampled from daily candles.
    pub fn daily(
        historical_highs: Vec<f64>,
        last_price: f64,
        interval_days: i64,
        tolerance: f64,
    ) -> Self {
        Self {
            historical_highs,
            last_price,
            interval_days,
            tolerance,
            granularity: Granularity::OneDay,
        }
    }

    /// Set the sample spacing.
    pub fn granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Number of samples in one comparison window.
    pub fn window_len(&self) -> Result<usize, CoinbaseError> {
        if self.interval_days <= 0 {
            return Err(CoinbaseError::invalid_argument(format!(
                "interval_days must be positive, got {}",
                self.interval_days
            )));
        }
        usize::try_from(self.interval_days)
            .ok()
            .and_then(|days| days.checked_mul(self.granularity.samples_per_day()))
            .ok_or_else(|| CoinbaseError::invalid_argument("interval_days is too large"))
    }

    /// Check the interval and tolerance, returning the window length.
    ///
    /// Callers that still have to fetch the history use this to fail before
    /// any request is made.
    pub fn check_parameters(&self) -> Result<usize, CoinbaseError> {
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(CoinbaseError::invalid_argument(format!(
                "tolerance must be non-negative, got {}",
                self.tolerance
            )));
        }
        self.window_len()
    }

    /// Run the forecast.
    pub fn evaluate(&self) -> Result<Forecast, CoinbaseError> {
        let window = self.check_parameters()?;
        if !self.last_price.is_finite() {
            return Err(CoinbaseError::invalid_argument("last_price must be finite"));
        }

        let needed = window
            .checked_mul(2)
            .ok_or_else(|| CoinbaseError::invalid_argument("interval_days is too large"))?;
        let samples = self.historical_highs.len();
        if samples < needed {
            return Err(CoinbaseError::invalid_argument(format!(
                "need {} samples for two {}-day windows, got {}",
                needed, self.interval_days, samples
            )));
        }

        let history = &self.historical_highs[samples - needed..];
        if history.iter().any(|high| !high.is_finite()) {
            return Err(CoinbaseError::invalid_argument("historical highs must be finite"));
        }
        let (prior, recent) = history.split_at(window);
        let change = trend_percent(mean(prior), mean(recent));

        let (trend, percent) = if change.abs() <= self.tolerance * 100.0 {
            (Trend::Flat, 0.0)
        } else if change > 0.0 {
            (Trend::Rising, change)
        } else {
            (Trend::Falling, change)
        };

        tracing::debug!(window, change, ?trend, "forecast evaluated");
        Ok(Forecast {
            trend,
            percent,
            projected_price: self.last_price * (1.0 + percent / 100.0),
        })
    }
}

/// Forecast from daily highs, returning the signed percentage.
pub fn forecast(
    historical_highs: &[f64],
    last_price: f64,
    interval_days: i64,
    tolerance: f64,
) -> Result<f64, CoinbaseError> {
    ForecastInput::daily(historical_highs.to_vec(), last_price, interval_days, tolerance)
        .evaluate()
        .map(|forecast| forecast.percent)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

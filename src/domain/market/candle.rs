use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single OHLCV row. Timestamps are Unix milliseconds, strictly increasing
/// within a series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candle {
    pub timestamp: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

/// Working element of the candle merge stage.
///
/// `merged_high`/`merged_low` start at the candle's own extremes and are
/// widened in place while absorption runs. Every stage after the merger
/// treats these fields as read-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MergedCandle {
    pub timestamp: i64,
    pub high: Decimal,
    pub low: Decimal,
    pub merged_high: Decimal,
    pub merged_low: Decimal,
}

impl MergedCandle {
    pub fn from_candle(candle: &Candle) -> Self {
        Self {
            timestamp: candle.timestamp,
            high: candle.high,
            low: candle.low,
            merged_high: candle.high,
            merged_low: candle.low,
        }
    }

    /// True when this candle's merged range is a superset of the other's.
    pub fn contains(&self, other: &MergedCandle) -> bool {
        self.merged_high >= other.merged_high && self.merged_low <= other.merged_low
    }

    /// Folds the other candle's merged range into this one.
    ///
    /// The low bound takes the max of the two lows, not the min; downstream
    /// structure detection depends on this exact combination.
    pub fn absorb(&mut self, other: &MergedCandle) {
        self.merged_high = self.merged_high.max(other.merged_high);
        self.merged_low = self.merged_low.max(other.merged_low);
    }
}

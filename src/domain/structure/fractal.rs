use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::market::candle::MergedCandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FractalKind {
    Top,
    Bottom,
}

impl fmt::Display for FractalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FractalKind::Top => write!(f, "TOP"),
            FractalKind::Bottom => write!(f, "BOTTOM"),
        }
    }
}

/// A 3-candle local extremum in the merged sequence.
///
/// The candle is a strict extremum among itself and its immediate merged
/// neighbors on both sides. `index` is its position in the merged sequence
/// and drives the stroke builder's separation rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fractal {
    pub kind: FractalKind,
    pub index: usize,
    pub candle: MergedCandle,
}

impl Fractal {
    /// The extremum this fractal marks: merged high for tops, merged low for
    /// bottoms.
    pub fn price(&self) -> Decimal {
        match self.kind {
            FractalKind::Top => self.candle.merged_high,
            FractalKind::Bottom => self.candle.merged_low,
        }
    }

    pub fn timestamp(&self) -> i64 {
        self.candle.timestamp
    }
}

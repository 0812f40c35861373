use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::fractal::{Fractal, FractalKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Direction implied by the fractal a stroke ends on: falling into a
    /// bottom is Down, rising into a top is Up.
    pub fn from_end_fractal(kind: FractalKind) -> Self {
        match kind {
            FractalKind::Top => Direction::Up,
            FractalKind::Bottom => Direction::Down,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "UP"),
            Direction::Down => write!(f, "DOWN"),
        }
    }
}

/// Minimal directional move between two fractals of opposite kind.
///
/// The endpoints sit more than one merged candle apart; pairs closer than
/// that never become strokes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stroke {
    pub direction: Direction,
    pub start: Fractal,
    pub end: Fractal,
    pub high: Decimal,
    pub low: Decimal,
}

impl Stroke {
    pub fn new(start: Fractal, end: Fractal) -> Self {
        let direction = Direction::from_end_fractal(end.kind);
        let high = start.candle.merged_high.max(end.candle.merged_high);
        let low = start.candle.merged_low.min(end.candle.merged_low);
        Self {
            direction,
            start,
            end,
            high,
            low,
        }
    }

    pub fn start_time(&self) -> i64 {
        self.start.candle.timestamp
    }

    pub fn end_time(&self) -> i64 {
        self.end.candle.timestamp
    }

    /// Merged-sequence index distance between the endpoints.
    pub fn span(&self) -> usize {
        self.end.index.abs_diff(self.start.index)
    }
}

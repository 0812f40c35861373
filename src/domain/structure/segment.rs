use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::stroke::{Direction, Stroke};

/// Runs shorter than this carry no structural significance.
const MIN_STROKES: usize = 3;

/// A maximal run of 3+ consecutive same-direction strokes.
///
/// Start/end times come from the first stroke's start fractal and the last
/// stroke's end fractal; high/low span every member stroke.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Segment {
    pub direction: Direction,
    pub strokes: Vec<Stroke>,
    pub high: Decimal,
    pub low: Decimal,
    pub start_time: i64,
    pub end_time: i64,
}

impl Segment {
    /// Builds a segment from a finished run of same-direction strokes.
    /// Runs shorter than three strokes are discarded.
    pub fn from_run(strokes: Vec<Stroke>) -> Option<Self> {
        if strokes.len() < MIN_STROKES {
            return None;
        }

        let direction = strokes[0].direction;
        let high = strokes.iter().map(|s| s.high).max()?;
        let low = strokes.iter().map(|s| s.low).min()?;
        let start_time = strokes[0].start_time();
        let end_time = strokes[strokes.len() - 1].end_time();

        Some(Self {
            direction,
            strokes,
            high,
            low,
            start_time,
            end_time,
        })
    }
}

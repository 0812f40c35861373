// Structural decomposition pipeline, one module per stage
pub mod centers;
pub mod fractals;
pub mod merger;
pub mod points;
pub mod segments;
pub mod strokes;

pub use centers::detect_centers;
pub use fractals::detect_fractals;
pub use merger::merge_candles;
pub use points::classify_points;
pub use segments::build_segments;
pub use strokes::build_strokes;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::market::candle::Candle;
use crate::domain::structure::{BuySellPoint, Center, Segment, Stroke};

/// Full structural decomposition of one candle window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChanAnalysis {
    pub strokes: Vec<Stroke>,
    pub segments: Vec<Segment>,
    pub centers: Vec<Center>,
    pub points: Vec<BuySellPoint>,
}

/// Runs the six pipeline stages over one window of candles.
///
/// `histogram` is a momentum-oscillator histogram aligned 1:1 by position
/// with `candles`; an empty histogram only disables the divergence rule set.
/// Each stage degrades to an empty output when its input is too short, so
/// this never errors on well-formed input.
pub fn analyze(candles: &[Candle], histogram: &[f64]) -> ChanAnalysis {
    let merged = merge_candles(candles);
    let fractals = detect_fractals(&merged);
    let strokes = build_strokes(&fractals);
    let segments = build_segments(&strokes);
    let centers = detect_centers(&segments);
    let points = classify_points(candles, histogram, &segments, &centers);

    debug!(
        "ChanPipeline: {} candles -> {} merged, {} fractals, {} strokes, {} segments, {} centers, {} points",
        candles.len(),
        merged.len(),
        fractals.len(),
        strokes.len(),
        segments.len(),
        centers.len(),
        points.len()
    );

    ChanAnalysis {
        strokes,
        segments,
        centers,
        points,
    }
}

use tracing::debug;

use crate::domain::market::candle::{Candle, MergedCandle};

/// Stage 1: collapses inclusion relationships between adjacent candles.
///
/// Scans adjacent pairs of a working buffer; when either candle's merged
/// range contains the other's, the earlier candle absorbs the later one and
/// the scan restarts from the front. A merge can retroactively create a new
/// containment with the preceding candle, so the restart is required for the
/// output to be free of adjacent containments. Terminates because every
/// merge shrinks the buffer.
pub fn merge_candles(candles: &[Candle]) -> Vec<MergedCandle> {
    let mut merged: Vec<MergedCandle> = candles.iter().map(MergedCandle::from_candle).collect();

    let mut i = 1;
    while i < merged.len() {
        if merged[i - 1].contains(&merged[i]) || merged[i].contains(&merged[i - 1]) {
            let absorbed = merged.remove(i);
            merged[i - 1].absorb(&absorbed);
            i = 1;
        } else {
            i += 1;
        }
    }

    if merged.len() < candles.len() {
        debug!(
            "CandleMerger: {} candles collapsed to {}",
            candles.len(),
            merged.len()
        );
    }

    merged
}

use crate::domain::structure::{Fractal, FractalKind, Stroke};

/// Stage 3: connects fractals of opposite kind into strokes.
///
/// One cursor walks the fractal list. Same-kind fractals collapse into the
/// most extreme one; a kind change emits a stroke only when the endpoints
/// sit more than one merged candle apart. The cursor advances to the new
/// fractal even when that separation test fails, so a rejected pair drops
/// its stroke and the next emission can repeat the previous direction.
/// Consecutive strokes alternate whenever every kind-change pair passes the
/// separation test.
pub fn build_strokes(fractals: &[Fractal]) -> Vec<Stroke> {
    let mut strokes = Vec::new();
    let Some(first) = fractals.first() else {
        return strokes;
    };
    let mut cursor = first.clone();

    for fractal in &fractals[1..] {
        if fractal.kind == cursor.kind {
            let more_extreme = match fractal.kind {
                FractalKind::Top => fractal.candle.merged_high > cursor.candle.merged_high,
                FractalKind::Bottom => fractal.candle.merged_low < cursor.candle.merged_low,
            };
            if more_extreme {
                cursor = fractal.clone();
            }
        } else {
            // At least one merged candle must sit between the endpoints.
            if fractal.index.abs_diff(cursor.index) > 1 {
                strokes.push(Stroke::new(cursor.clone(), fractal.clone()));
            }
            cursor = fractal.clone();
        }
    }

    strokes
}

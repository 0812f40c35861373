use crate::domain::market::candle::MergedCandle;
use crate::domain::structure::{Fractal, FractalKind};

/// Stage 2: finds 3-candle local extrema in the merged sequence.
///
/// A strict 3-candle test: only the immediate left and right neighbors are
/// compared. A candle whose range dwarfs both neighbors can come out as both
/// top and bottom; no dedup happens here because later stages tolerate it
/// through the stroke builder's same-kind collapse.
pub fn detect_fractals(merged: &[MergedCandle]) -> Vec<Fractal> {
    let mut fractals = Vec::new();
    if merged.len() < 3 {
        return fractals;
    }

    for i in 1..merged.len() - 1 {
        let (prev, current, next) = (&merged[i - 1], &merged[i], &merged[i + 1]);

        if current.merged_high > prev.merged_high && current.merged_high > next.merged_high {
            fractals.push(Fractal {
                kind: FractalKind::Top,
                index: i,
                candle: current.clone(),
            });
        }
        if current.merged_low < prev.merged_low && current.merged_low < next.merged_low {
            fractals.push(Fractal {
                kind: FractalKind::Bottom,
                index: i,
                candle: current.clone(),
            });
        }
    }

    fractals
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn mock_merged(timestamp: i64, high: Decimal, low: Decimal) -> MergedCandle {
        MergedCandle {
            timestamp,
            high,
            low,
            merged_high: high,
            merged_low: low,
        }
    }

    #[test]
    fn test_too_short_input_yields_nothing() {
        assert!(detect_fractals(&[]).is_empty());
        let two = vec![
            mock_merged(1000, dec!(110), dec!(100)),
            mock_merged(2000, dec!(120), dec!(110)),
        ];
        assert!(detect_fractals(&two).is_empty());
    }

    #[test]
    fn test_monotonic_data_has_no_extrema() {
        let merged: Vec<MergedCandle> = (0..5)
            .map(|i| {
                mock_merged(
                    1000 * (i + 1),
                    dec!(100) + Decimal::from(i * 10),
                    dec!(95) + Decimal::from(i * 10),
                )
            })
            .collect();

        assert!(detect_fractals(&merged).is_empty());
    }

    #[test]
    fn test_v_shape_yields_single_bottom() {
        let merged = vec![
            mock_merged(1000, dec!(110), dec!(100)),
            mock_merged(2000, dec!(105), dec!(95)),
            mock_merged(3000, dec!(100), dec!(90)),
            mock_merged(4000, dec!(95), dec!(85)),
            mock_merged(5000, dec!(100), dec!(90)),
            mock_merged(6000, dec!(105), dec!(95)),
            mock_merged(7000, dec!(110), dec!(100)),
        ];

        let fractals = detect_fractals(&merged);
        assert_eq!(fractals.len(), 1);
        assert_eq!(fractals[0].kind, FractalKind::Bottom);
        assert_eq!(fractals[0].index, 3);
        assert_eq!(fractals[0].candle.timestamp, 4000);
    }

    #[test]
    fn test_peak_yields_top() {
        let merged = vec![
            mock_merged(1000, dec!(100), dec!(90)),
            mock_merged(2000, dec!(110), dec!(100)),
            mock_merged(3000, dec!(105), dec!(95)),
        ];

        let fractals = detect_fractals(&merged);
        assert_eq!(fractals.len(), 1);
        assert_eq!(fractals[0].kind, FractalKind::Top);
        assert_eq!(fractals[0].index, 1);
    }

    #[test]
    fn test_ties_are_not_extrema() {
        // Equal highs on the left neighbor break the strict comparison.
        let merged = vec![
            mock_merged(1000, dec!(110), dec!(100)),
            mock_merged(2000, dec!(110), dec!(101)),
            mock_merged(3000, dec!(105), dec!(102)),
        ];

        assert!(detect_fractals(&merged).is_empty());
    }

    #[test]
    fn test_engulfing_candle_emits_both_kinds() {
        // Unmerged input can hold a candle that dwarfs both neighbors; it
        // comes out as a top and a bottom, top first.
        let merged = vec![
            mock_merged(1000, dec!(105), dec!(95)),
            mock_merged(2000, dec!(120), dec!(80)),
            mock_merged(3000, dec!(104), dec!(96)),
        ];

        let fractals = detect_fractals(&merged);
        assert_eq!(fractals.len(), 2);
        assert_eq!(fractals[0].kind, FractalKind::Top);
        assert_eq!(fractals[1].kind, FractalKind::Bottom);
        assert_eq!(fractals[0].index, 1);
        assert_eq!(fractals[1].index, 1);
    }
}

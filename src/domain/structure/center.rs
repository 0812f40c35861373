use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::segment::Segment;

/// A consolidation pivot spanning exactly three consecutive segments.
///
/// `zg`/`zd` bound the overlap of the first and third members' ranges;
/// `high`/`low` are the actual extremes across all three. `zg > zd` holds
/// for every constructed center. Segment indices are positions in the full
/// segment list, kept for positional lookahead by the point classifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Center {
    pub zg: Decimal,
    pub zd: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub first_segment: usize,
    pub last_segment: usize,
}

impl Center {
    /// Builds a center from three consecutive segments when the first and
    /// third members' price ranges overlap. `first_index` is s1's position
    /// in the full segment list. Degenerate windows yield None.
    pub fn from_window(s1: &Segment, s2: &Segment, s3: &Segment, first_index: usize) -> Option<Self> {
        let zd = s1.low.max(s3.low);
        let zg = s1.high.min(s3.high);
        if zd >= zg {
            return None;
        }

        Some(Self {
            zg,
            zd,
            high: s1.high.max(s2.high).max(s3.high),
            low: s1.low.min(s2.low).min(s3.low),
            first_segment: first_index,
            last_segment: first_index + 2,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::structure::Direction;
    use rust_decimal_macros::dec;

    fn mock_segment(high: Decimal, low: Decimal) -> Segment {
        Segment {
            direction: Direction::Up,
            strokes: Vec::new(),
            high,
            low,
            start_time: 0,
            end_time: 0,
        }
    }

    #[test]
    fn test_overlapping_window_builds_center() {
        let s1 = mock_segment(dec!(110), dec!(100));
        let s2 = mock_segment(dec!(120), dec!(105));
        let s3 = mock_segment(dec!(112), dec!(102));

        let center = Center::from_window(&s1, &s2, &s3, 4).unwrap();
        assert_eq!(center.zd, dec!(102));
        assert_eq!(center.zg, dec!(110));
        assert_eq!(center.high, dec!(120));
        assert_eq!(center.low, dec!(100));
        assert_eq!(center.first_segment, 4);
        assert_eq!(center.last_segment, 6);
        assert!(center.zg > center.zd);
    }

    #[test]
    fn test_disjoint_window_is_degenerate() {
        // s1 and s3 do not overlap; s2 alone cannot rescue the window.
        let s1 = mock_segment(dec!(110), dec!(100));
        let s2 = mock_segment(dec!(140), dec!(95));
        let s3 = mock_segment(dec!(130), dec!(120));

        assert!(Center::from_window(&s1, &s2, &s3, 0).is_none());
    }

    #[test]
    fn test_touching_ranges_are_degenerate() {
        // zd == zg is not a valid pivot.
        let s1 = mock_segment(dec!(110), dec!(100));
        let s2 = mock_segment(dec!(115), dec!(105));
        let s3 = mock_segment(dec!(125), dec!(110));

        assert!(Center::from_window(&s1, &s2, &s3, 0).is_none());
    }
}

use std::collections::HashSet;

use tracing::{info, warn};

use crate::domain::market::candle::Candle;
use crate::domain::structure::{BuySellPoint, Center, Direction, PointKind, Segment};

/// Stage 6: classifies buy/sell points against segments and centers.
///
/// The three rule sets run independently; their output is deduplicated by
/// (timestamp, kind) with the first occurrence winning, then sorted by
/// timestamp. Missing segments, missing centers, or an empty histogram thin
/// the result out instead of erroring.
pub fn classify_points(
    candles: &[Candle],
    histogram: &[f64],
    segments: &[Segment],
    centers: &[Center],
) -> Vec<BuySellPoint> {
    let mut points = detect_divergence_points(candles, histogram, segments, centers);
    points.extend(detect_pivot_hold_points(segments, centers));
    points.extend(detect_pivot_breakout_points(segments, centers));

    let points = dedup_and_sort(points);
    if !points.is_empty() {
        info!("PointClassifier: {} buy/sell points detected", points.len());
    }
    points
}

/// 1st buy/sell: momentum divergence around the most recent center.
///
/// The entering segment is the center's first member; the leaving segment
/// follows the center's last member. Both must share a direction. A 1st buy
/// needs the leaving segment to fall to a new low on a smaller absolute
/// momentum area than the entering segment; a 1st sell mirrors it with a
/// new high.
pub fn detect_divergence_points(
    candles: &[Candle],
    histogram: &[f64],
    segments: &[Segment],
    centers: &[Center],
) -> Vec<BuySellPoint> {
    let mut points = Vec::new();
    let Some(center) = centers.last() else {
        return points;
    };
    let Some(entering) = segments.get(center.first_segment) else {
        return points;
    };
    let Some(leaving) = segments.get(center.last_segment + 1) else {
        return points;
    };
    if entering.direction != leaving.direction {
        return points;
    }

    let entering_area = momentum_area(candles, histogram, entering);
    let leaving_area = momentum_area(candles, histogram, leaving);
    let diverging = leaving_area.abs() < entering_area.abs();

    match leaving.direction {
        Direction::Down if leaving.low < entering.low && diverging => {
            points.push(BuySellPoint {
                kind: PointKind::FirstBuy,
                timestamp: leaving.end_time,
                price: leaving.low,
                segment: leaving.clone(),
            });
        }
        Direction::Up if leaving.high > entering.high && diverging => {
            points.push(BuySellPoint {
                kind: PointKind::FirstSell,
                timestamp: leaving.end_time,
                price: leaving.high,
                segment: leaving.clone(),
            });
        }
        _ => {}
    }

    points
}

/// 2nd buy/sell: a pullback after the center that holds the near pivot edge.
///
/// For each center, the two segments after its last member must reverse
/// (up then down for buys, down then up for sells) with the pullback staying
/// on the right side of zd/zg.
pub fn detect_pivot_hold_points(segments: &[Segment], centers: &[Center]) -> Vec<BuySellPoint> {
    let mut points = Vec::new();

    for center in centers {
        let Some(s1) = segments.get(center.last_segment + 1) else {
            continue;
        };
        let Some(s2) = segments.get(center.last_segment + 2) else {
            continue;
        };

        match (s1.direction, s2.direction) {
            (Direction::Up, Direction::Down) if s2.low > center.zd => {
                points.push(BuySellPoint {
                    kind: PointKind::SecondBuy,
                    timestamp: s2.end_time,
                    price: s2.low,
                    segment: s2.clone(),
                });
            }
            (Direction::Down, Direction::Up) if s2.high < center.zg => {
                points.push(BuySellPoint {
                    kind: PointKind::SecondSell,
                    timestamp: s2.end_time,
                    price: s2.high,
                    segment: s2.clone(),
                });
            }
            _ => {}
        }
    }

    points
}

/// 3rd buy/sell: the same two-segment lookahead, held against the far pivot
/// edge. The pullback must not even re-enter the old pivot, so a 3rd buy
/// stays above zg and a 3rd sell below zd.
pub fn detect_pivot_breakout_points(segments: &[Segment], centers: &[Center]) -> Vec<BuySellPoint> {
    let mut points = Vec::new();

    for center in centers {
        let Some(s1) = segments.get(center.last_segment + 1) else {
            continue;
        };
        let Some(s2) = segments.get(center.last_segment + 2) else {
            continue;
        };

        match (s1.direction, s2.direction) {
            (Direction::Up, Direction::Down) if s2.low > center.zg => {
                points.push(BuySellPoint {
                    kind: PointKind::ThirdBuy,
                    timestamp: s2.end_time,
                    price: s2.low,
                    segment: s2.clone(),
                });
            }
            (Direction::Down, Direction::Up) if s2.high < center.zd => {
                points.push(BuySellPoint {
                    kind: PointKind::ThirdSell,
                    timestamp: s2.end_time,
                    price: s2.high,
                    segment: s2.clone(),
                });
            }
            _ => {}
        }
    }

    points
}

/// Sums the histogram over the candle positions a segment spans.
///
/// Both segment endpoints are located by exact timestamp match in the candle
/// series and the sum is inclusive of both. A missing endpoint degrades to
/// zero area.
pub fn momentum_area(candles: &[Candle], histogram: &[f64], segment: &Segment) -> f64 {
    let start = candles
        .iter()
        .position(|c| c.timestamp == segment.start_time);
    let end = candles.iter().position(|c| c.timestamp == segment.end_time);

    let (Some(start), Some(end)) = (start, end) else {
        warn!(
            "PointClassifier: segment span {}..{} not found in candle series, using zero area",
            segment.start_time, segment.end_time
        );
        return 0.0;
    };

    histogram.iter().take(end + 1).skip(start).sum()
}

fn dedup_and_sort(mut points: Vec<BuySellPoint>) -> Vec<BuySellPoint> {
    let mut seen = HashSet::new();
    points.retain(|p| seen.insert((p.timestamp, p.kind)));
    points.sort_by_key(|p| p.timestamp);
    points
}

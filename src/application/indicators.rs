use rust_decimal::prelude::ToPrimitive;
use ta::Next;
use ta::indicators::{
    BollingerBands, ExponentialMovingAverage, MovingAverageConvergenceDivergence,
    RelativeStrengthIndex, SimpleMovingAverage,
};
use tracing::debug;

use crate::domain::market::candle::Candle;

/// Periods for the indicator columns computed alongside the structural
/// analysis.
#[derive(Debug, Clone)]
pub struct IndicatorConfig {
    pub ema_period: usize,
    pub macd_fast_period: usize,
    pub macd_slow_period: usize,
    pub macd_signal_period: usize,
    pub rsi_period: usize,
    pub volume_ma_period: usize,
    pub bb_period: usize,
    pub bb_std_dev: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ema_period: 20,
            macd_fast_period: 12,
            macd_slow_period: 26,
            macd_signal_period: 9,
            rsi_period: 14,
            volume_ma_period: 20,
            bb_period: 20,
            bb_std_dev: 2.0,
        }
    }
}

/// Column-oriented indicator values, one entry per input candle.
#[derive(Debug, Clone, Default)]
pub struct IndicatorSeries {
    pub ema: Vec<f64>,
    pub macd: Vec<f64>,
    pub macd_signal: Vec<f64>,
    pub macd_histogram: Vec<f64>,
    pub rsi: Vec<f64>,
    pub volume_ma: Vec<f64>,
    pub bb_upper: Vec<f64>,
    pub bb_middle: Vec<f64>,
    pub bb_lower: Vec<f64>,
    pub bb_width: Vec<f64>,
}

impl IndicatorSeries {
    pub fn len(&self) -> usize {
        self.ema.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ema.is_empty()
    }
}

/// Streaming indicator state over a single candle series.
///
/// The underlying indicators accumulate history across calls, so one engine
/// must not be reused for a second series or timeframe.
pub struct IndicatorEngine {
    ema: ExponentialMovingAverage,
    macd: MovingAverageConvergenceDivergence,
    rsi: RelativeStrengthIndex,
    volume_ma: SimpleMovingAverage,
    bb: BollingerBands,
}

impl IndicatorEngine {
    pub fn new(config: &IndicatorConfig) -> Self {
        Self {
            ema: ExponentialMovingAverage::new(config.ema_period)
                .expect("ema_period from IndicatorConfig must be > 0"),
            macd: MovingAverageConvergenceDivergence::new(
                config.macd_fast_period,
                config.macd_slow_period,
                config.macd_signal_period,
            )
            .expect("MACD periods from IndicatorConfig must be valid"),
            rsi: RelativeStrengthIndex::new(config.rsi_period)
                .expect("rsi_period from IndicatorConfig must be > 0"),
            volume_ma: SimpleMovingAverage::new(config.volume_ma_period)
                .expect("volume_ma_period from IndicatorConfig must be > 0"),
            bb: BollingerBands::new(config.bb_period, config.bb_std_dev)
                .expect("bb_period from IndicatorConfig must be > 0"),
        }
    }

    /// Feeds every candle through the indicators and collects the columns.
    pub fn compute(&mut self, candles: &[Candle]) -> IndicatorSeries {
        let mut series = IndicatorSeries::default();

        for candle in candles {
            let close = candle.close.to_f64().unwrap_or(0.0);
            let volume = candle.volume.to_f64().unwrap_or(0.0);

            series.ema.push(self.ema.next(close));

            let macd_val = self.macd.next(close);
            series.macd.push(macd_val.macd);
            series.macd_signal.push(macd_val.signal);
            series.macd_histogram.push(macd_val.histogram);

            series.rsi.push(self.rsi.next(close));
            series.volume_ma.push(self.volume_ma.next(volume));

            let bb_val = self.bb.next(close);
            series.bb_upper.push(bb_val.upper);
            series.bb_middle.push(bb_val.average);
            series.bb_lower.push(bb_val.lower);
            let width = if bb_val.average != 0.0 {
                (bb_val.upper - bb_val.lower) / bb_val.average
            } else {
                0.0
            };
            series.bb_width.push(width);
        }

        debug!(
            "IndicatorEngine: computed {} rows across 10 columns",
            series.len()
        );
        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn mock_candle(i: i64, close: Decimal) -> Candle {
        Candle {
            timestamp: 1_700_000_000_000 + i * 3_600_000,
            open: close,
            high: close + dec!(1),
            low: close - dec!(1),
            close,
            volume: dec!(1000),
        }
    }

    #[test]
    fn test_columns_align_with_input() {
        let candles: Vec<Candle> = (0..30)
            .map(|i| mock_candle(i, Decimal::from(100 + i)))
            .collect();

        let mut engine = IndicatorEngine::new(&IndicatorConfig::default());
        let series = engine.compute(&candles);

        assert_eq!(series.len(), candles.len());
        assert_eq!(series.macd.len(), candles.len());
        assert_eq!(series.macd_signal.len(), candles.len());
        assert_eq!(series.macd_histogram.len(), candles.len());
        assert_eq!(series.rsi.len(), candles.len());
        assert_eq!(series.volume_ma.len(), candles.len());
        assert_eq!(series.bb_upper.len(), candles.len());
        assert_eq!(series.bb_middle.len(), candles.len());
        assert_eq!(series.bb_lower.len(), candles.len());
        assert_eq!(series.bb_width.len(), candles.len());
    }

    #[test]
    fn test_empty_input_yields_empty_series() {
        let mut engine = IndicatorEngine::new(&IndicatorConfig::default());
        let series = engine.compute(&[]);
        assert!(series.is_empty());
    }

    #[test]
    fn test_flat_prices_flatten_macd() {
        let candles: Vec<Candle> = (0..40).map(|i| mock_candle(i, dec!(100))).collect();

        let mut engine = IndicatorEngine::new(&IndicatorConfig::default());
        let series = engine.compute(&candles);

        for i in 0..series.len() {
            assert!(series.macd_histogram[i].abs() < 1e-9);
            assert!((series.rsi[i] - 50.0).abs() < 1e-9);
            assert!((series.ema[i] - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rising_closes_push_rsi_up() {
        let candles: Vec<Candle> = (0..30)
            .map(|i| mock_candle(i, Decimal::from(100 + 2 * i)))
            .collect();

        let mut engine = IndicatorEngine::new(&IndicatorConfig::default());
        let series = engine.compute(&candles);

        let last_rsi = series.rsi[series.len() - 1];
        assert!(last_rsi > 50.0, "rsi {} should exceed 50", last_rsi);
    }

    #[test]
    fn test_bb_width_stays_finite_on_degenerate_prices() {
        let candles: Vec<Candle> = (0..10).map(|i| mock_candle(i, dec!(0))).collect();

        let mut engine = IndicatorEngine::new(&IndicatorConfig::default());
        let series = engine.compute(&candles);

        assert!(series.bb_width.iter().all(|w| w.is_finite()));
    }
}

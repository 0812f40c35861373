use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::application::indicators::IndicatorSeries;
use crate::domain::market::candle::Candle;
use crate::domain::market::timeframe::Timeframe;

/// Thresholds for the rule-based signal checks.
#[derive(Debug, Clone)]
pub struct SignalConfig {
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
    pub volume_breakout_ratio: f64,
    pub bb_squeeze_threshold: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
            volume_breakout_ratio: 1.5,
            bb_squeeze_threshold: 0.05,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSignal {
    pub name: String,
    /// Relative weight on a 1-3 scale, 3 strongest.
    pub strength: u8,
    pub timeframe: Timeframe,
}

/// Runs the indicator-based signal checks over the tail of a series.
///
/// Every check looks only at the last two positions; the structural pipeline
/// covers everything that needs a longer memory.
pub struct SignalDetector {
    config: SignalConfig,
}

impl SignalDetector {
    pub fn new(config: SignalConfig) -> Self {
        Self { config }
    }

    pub fn detect_all(
        &self,
        candles: &[Candle],
        series: &IndicatorSeries,
        timeframe: Timeframe,
    ) -> Vec<MarketSignal> {
        if candles.len() < 2 || series.len() < 2 {
            return Vec::new();
        }

        let checks = [
            self.detect_macd_cross(series, timeframe),
            self.detect_rsi_divergence(candles, series, timeframe),
            self.detect_volume_breakout(candles, series, timeframe),
            self.detect_bollinger_squeeze(candles, series, timeframe),
        ];

        let mut signals = Vec::new();
        for signal in checks.into_iter().flatten() {
            info!(
                "SignalDetector [{}]: {} (strength {})",
                timeframe, signal.name, signal.strength
            );
            signals.push(signal);
        }
        signals
    }

    fn detect_macd_cross(
        &self,
        series: &IndicatorSeries,
        timeframe: Timeframe,
    ) -> Option<MarketSignal> {
        let last = series.len() - 1;
        let prev = last - 1;

        let crossed_up = series.macd[last] > series.macd_signal[last]
            && series.macd[prev] <= series.macd_signal[prev];
        let crossed_down = series.macd[last] < series.macd_signal[last]
            && series.macd[prev] >= series.macd_signal[prev];

        if crossed_up {
            return Some(MarketSignal {
                name: "MACD bullish cross".to_string(),
                strength: 2,
                timeframe,
            });
        }
        if crossed_down {
            return Some(MarketSignal {
                name: "MACD bearish cross".to_string(),
                strength: 2,
                timeframe,
            });
        }
        None
    }

    fn detect_rsi_divergence(
        &self,
        candles: &[Candle],
        series: &IndicatorSeries,
        timeframe: Timeframe,
    ) -> Option<MarketSignal> {
        let last = candles.len() - 1;
        let prev = last - 1;
        let rsi = series.rsi[series.len() - 1];
        let close = candles[last].close.to_f64().unwrap_or(0.0);
        let prev_close = candles[prev].close.to_f64().unwrap_or(0.0);

        if rsi > self.config.rsi_overbought && close < prev_close {
            return Some(MarketSignal {
                name: "RSI bearish divergence".to_string(),
                strength: 3,
                timeframe,
            });
        }
        if rsi < self.config.rsi_oversold && close > prev_close {
            return Some(MarketSignal {
                name: "RSI bullish divergence".to_string(),
                strength: 3,
                timeframe,
            });
        }
        None
    }

    fn detect_volume_breakout(
        &self,
        candles: &[Candle],
        series: &IndicatorSeries,
        timeframe: Timeframe,
    ) -> Option<MarketSignal> {
        let last = candles.len() - 1;
        let prev = last - 1;
        let volume = candles[last].volume.to_f64().unwrap_or(0.0);
        let volume_ma = series.volume_ma[series.len() - 1];
        let close = candles[last].close.to_f64().unwrap_or(0.0);
        let prev_close = candles[prev].close.to_f64().unwrap_or(0.0);

        if volume > self.config.volume_breakout_ratio * volume_ma && close > prev_close {
            return Some(MarketSignal {
                name: "Volume breakout".to_string(),
                strength: 2,
                timeframe,
            });
        }
        None
    }

    fn detect_bollinger_squeeze(
        &self,
        candles: &[Candle],
        series: &IndicatorSeries,
        timeframe: Timeframe,
    ) -> Option<MarketSignal> {
        let last = series.len() - 1;
        let prev = last - 1;
        let close = candles[candles.len() - 1].close.to_f64().unwrap_or(0.0);

        // The squeeze is measured one step back so the break candle itself
        // does not mask it.
        if series.bb_width[prev] >= self.config.bb_squeeze_threshold {
            return None;
        }

        if close > series.bb_upper[last] {
            return Some(MarketSignal {
                name: "Bollinger squeeze break up".to_string(),
                strength: 2,
                timeframe,
            });
        }
        if close < series.bb_lower[last] {
            return Some(MarketSignal {
                name: "Bollinger squeeze break down".to_string(),
                strength: 2,
                timeframe,
            });
        }
        None
    }
}

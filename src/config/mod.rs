//! Runtime configuration parsing from environment variables.
//!
//! CLI flags take precedence over the environment; the environment takes
//! precedence over the defaults baked in here.

use anyhow::{Context, Result};
use std::env;

use crate::application::indicators::IndicatorConfig;
use crate::application::signals::SignalConfig;
use crate::domain::market::timeframe::Timeframe;

#[derive(Debug, Clone)]
pub struct Config {
    pub symbol: String,
    pub timeframes: Vec<Timeframe>,
    pub indicators: IndicatorConfig,
    pub signals: SignalConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let symbol = env::var("SYMBOL").unwrap_or_else(|_| "ETH/USDT".to_string());

        let timeframes_str = env::var("TIMEFRAMES").unwrap_or_else(|_| "1h,4h,1d,1w".to_string());
        let timeframes: Vec<Timeframe> = timeframes_str
            .split(',')
            .map(|s| s.trim().parse())
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to parse TIMEFRAMES")?;

        let indicators = IndicatorConfig {
            ema_period: Self::parse_usize("EMA_PERIOD", 20)?,
            macd_fast_period: Self::parse_usize("MACD_FAST_PERIOD", 12)?,
            macd_slow_period: Self::parse_usize("MACD_SLOW_PERIOD", 26)?,
            macd_signal_period: Self::parse_usize("MACD_SIGNAL_PERIOD", 9)?,
            rsi_period: Self::parse_usize("RSI_PERIOD", 14)?,
            volume_ma_period: Self::parse_usize("VOLUME_MA_PERIOD", 20)?,
            bb_period: Self::parse_usize("BB_PERIOD", 20)?,
            bb_std_dev: Self::parse_f64("BB_STD_DEV", 2.0)?,
        };

        let signals = SignalConfig {
            rsi_overbought: Self::parse_f64("RSI_OVERBOUGHT", 70.0)?,
            rsi_oversold: Self::parse_f64("RSI_OVERSOLD", 30.0)?,
            volume_breakout_ratio: Self::parse_f64("VOLUME_BREAKOUT_RATIO", 1.5)?,
            bb_squeeze_threshold: Self::parse_f64("BB_SQUEEZE_THRESHOLD", 0.05)?,
        };

        Ok(Self {
            symbol,
            timeframes,
            indicators,
            signals,
        })
    }

    fn parse_usize(key: &str, default: usize) -> Result<usize> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<usize>()
            .context(format!("Failed to parse {}", key))
    }

    fn parse_f64(key: &str, default: f64) -> Result<f64> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<f64>()
            .context(format!("Failed to parse {}", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::from_env().expect("Should parse with defaults");
        assert_eq!(config.symbol, "ETH/USDT");
        assert_eq!(config.timeframes.len(), 4);
        assert_eq!(config.indicators.macd_slow_period, 26);
        assert_eq!(config.signals.rsi_overbought, 70.0);
    }
}

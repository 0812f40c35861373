use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Analysis windows supported by the batch pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    OneHour,
    FourHour,
    OneDay,
    OneWeek,
}

impl Timeframe {
    /// Converts to Binance API interval string
    pub fn to_binance_string(&self) -> &'static str {
        match self {
            Timeframe::OneHour => "1h",
            Timeframe::FourHour => "4h",
            Timeframe::OneDay => "1d",
            Timeframe::OneWeek => "1w",
        }
    }

    /// Number of candles one analysis window covers on this timeframe.
    ///
    /// Longer timeframes use shorter windows so every window spans a
    /// comparable stretch of history.
    pub fn window_limit(&self) -> usize {
        match self {
            Timeframe::OneHour => 120,
            Timeframe::FourHour => 200,
            Timeframe::OneDay => 180,
            Timeframe::OneWeek => 60,
        }
    }

    /// Returns the duration of this timeframe in minutes
    pub fn to_minutes(&self) -> usize {
        match self {
            Timeframe::OneHour => 60,
            Timeframe::FourHour => 240,
            Timeframe::OneDay => 1440,
            Timeframe::OneWeek => 10080,
        }
    }

    /// Returns all available timeframes in ascending order
    pub fn all() -> Vec<Timeframe> {
        vec![
            Timeframe::OneHour,
            Timeframe::FourHour,
            Timeframe::OneDay,
            Timeframe::OneWeek,
        ]
    }
}

impl FromStr for Timeframe {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "1h" | "1hour" | "onehour" => Ok(Timeframe::OneHour),
            "4h" | "4hour" | "fourhour" => Ok(Timeframe::FourHour),
            "1d" | "1day" | "oneday" => Ok(Timeframe::OneDay),
            "1w" | "1week" | "oneweek" => Ok(Timeframe::OneWeek),
            _ => Err(anyhow!(
                "Invalid timeframe: '{}'. Valid options: 1h, 4h, 1d, 1w",
                s
            )),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_binance_string())
    }
}

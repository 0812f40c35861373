// Market data domain
pub mod candle;
pub mod timeframe;

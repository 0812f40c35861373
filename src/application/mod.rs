// Indicator columns computed alongside the structural pass
pub mod indicators;

// Rule-based signal checks over the indicator tail
pub mod signals;

// Candlestick structural decomposition pipeline
pub mod structure;

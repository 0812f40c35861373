//! rustchan - Chan-style structural analyzer for candle series.
//!
//! Reads an OHLCV CSV, runs the merge/fractal/stroke/segment/center
//! decomposition plus the indicator signal checks, and prints a text or
//! JSON report to stdout. Logs go to stderr so JSON output stays clean.
//!
//! # Usage
//! ```sh
//! rustchan --file data/eth_4h.csv --timeframe 4h --json
//! ```
//!
//! # Environment Variables
//! - `SYMBOL` - Label attached to the report (default: ETH/USDT)
//! - `TIMEFRAMES` - Enabled timeframes, comma separated (default: 1h,4h,1d,1w)
//! - `EMA_PERIOD`, `MACD_FAST_PERIOD`, ... - indicator periods
//! - `RSI_OVERBOUGHT`, `VOLUME_BREAKOUT_RATIO`, ... - signal thresholds

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::TimeZone;
use clap::Parser;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{Level, info, warn};
use tracing_subscriber::prelude::*;

use rustchan::application::indicators::IndicatorEngine;
use rustchan::application::signals::{MarketSignal, SignalDetector};
use rustchan::application::structure::{ChanAnalysis, analyze};
use rustchan::config::Config;
use rustchan::domain::errors::DataError;
use rustchan::domain::market::candle::Candle;
use rustchan::domain::market::timeframe::Timeframe;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the candle CSV (timestamp,open,high,low,close,volume)
    #[arg(long)]
    file: PathBuf,

    /// Timeframe label, controls the analysis window size
    #[arg(long, default_value = "4h")]
    timeframe: Timeframe,

    /// Symbol label for the report (overrides SYMBOL)
    #[arg(long)]
    symbol: Option<String>,

    /// Emit the report as pretty JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: i64,
    open: Decimal,
    high: Decimal,
    low: Decimal,
    close: Decimal,
    volume: Decimal,
}

#[derive(Debug, Serialize)]
struct Report {
    symbol: String,
    timeframe: Timeframe,
    candles: usize,
    analysis: ChanAnalysis,
    signals: Vec<MarketSignal>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stderr_layer)
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;

    info!("rustchan {} starting...", env!("CARGO_PKG_VERSION"));

    if !config.timeframes.contains(&args.timeframe) {
        warn!(
            "Timeframe {} is not in TIMEFRAMES ({:?}), analyzing anyway",
            args.timeframe, config.timeframes
        );
    }

    let mut candles = load_candles(&args.file)?;
    info!(
        "Loaded {} candles from {}",
        candles.len(),
        args.file.display()
    );

    let limit = args.timeframe.window_limit();
    if candles.len() > limit {
        let skip = candles.len() - limit;
        candles.drain(..skip);
        info!(
            "Using most recent {} candles for {} (skipped {} older)",
            limit, args.timeframe, skip
        );
    }

    let mut engine = IndicatorEngine::new(&config.indicators);
    let series = engine.compute(&candles);

    let analysis = analyze(&candles, &series.macd_histogram);
    let detector = SignalDetector::new(config.signals);
    let signals = detector.detect_all(&candles, &series, args.timeframe);

    let report = Report {
        symbol: args.symbol.unwrap_or(config.symbol),
        timeframe: args.timeframe,
        candles: candles.len(),
        analysis,
        signals,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

/// Loads and validates the candle series.
///
/// Enforces the input contract up front: rows parse, high >= low, at least
/// one candle, strictly increasing timestamps. Rows are numbered from 1,
/// excluding the header.
fn load_candles(path: &Path) -> Result<Vec<Candle>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open candle file {}", path.display()))?;
    let mut rdr = csv::Reader::from_reader(BufReader::new(file));

    let mut candles = Vec::new();
    for (i, result) in rdr.deserialize().enumerate() {
        let row: CsvRow = result.map_err(|e| DataError::MalformedRow {
            row: i + 1,
            reason: e.to_string(),
        })?;
        if row.high < row.low {
            return Err(DataError::MalformedRow {
                row: i + 1,
                reason: format!("high {} is below low {}", row.high, row.low),
            }
            .into());
        }
        candles.push(Candle {
            timestamp: row.timestamp,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
        });
    }

    if candles.is_empty() {
        return Err(DataError::EmptySeries {
            path: path.display().to_string(),
        }
        .into());
    }

    for (i, pair) in candles.windows(2).enumerate() {
        if pair[1].timestamp <= pair[0].timestamp {
            return Err(DataError::NonMonotonicTimestamps {
                row: i + 2,
                previous: pair[0].timestamp,
                current: pair[1].timestamp,
            }
            .into());
        }
    }

    Ok(candles)
}

fn print_report(report: &Report) {
    println!(
        "=== {} {} structural analysis ===",
        report.symbol, report.timeframe
    );
    println!("Candles analyzed: {}", report.candles);
    println!();
    println!("Strokes: {}", report.analysis.strokes.len());
    println!("Segments: {}", report.analysis.segments.len());
    for (i, segment) in report.analysis.segments.iter().enumerate() {
        println!(
            "  {}. {} {} -> {}  high {} low {}",
            i + 1,
            segment.direction,
            format_ts(segment.start_time),
            format_ts(segment.end_time),
            segment.high,
            segment.low
        );
    }
    println!("Centers: {}", report.analysis.centers.len());
    for (i, center) in report.analysis.centers.iter().enumerate() {
        println!(
            "  {}. zg {} zd {} (segments {}-{})",
            i + 1,
            center.zg,
            center.zd,
            center.first_segment + 1,
            center.last_segment + 1
        );
    }
    println!("Buy/sell points: {}", report.analysis.points.len());
    for point in &report.analysis.points {
        println!(
            "  - {} at {} ({})",
            point.kind,
            point.price,
            format_ts(point.timestamp)
        );
    }
    if !report.signals.is_empty() {
        println!("Signals: {}", report.signals.len());
        for signal in &report.signals {
            println!("  - {} (strength {})", signal.name, signal.strength);
        }
    }
}

fn format_ts(timestamp: i64) -> String {
    chrono::Utc
        .timestamp_millis_opt(timestamp)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

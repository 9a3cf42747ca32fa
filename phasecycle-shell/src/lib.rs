mod error;
pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;

use chrono::NaiveDate;
use phasecycle::chart::annotation;
use phasecycle::{
    recent, Analysis, Bias, CycleStats, Leader, Lookback, PhaseConfig, PhaseState, TurningPoint,
};
use serde_derive::*;
use std::fmt::{self, Write};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Json document of the analyze command
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub symbol: &'a str,
    pub config: &'a PhaseConfig,
    pub lookback: Lookback,
    pub phases: &'a [PhaseState],
    pub turning_points: &'a [TurningPoint],
    pub stats: &'a CycleStats,
    pub latest_bias: Option<Bias>,
}

impl<'a> Report<'a> {
    pub fn new(
        symbol: &'a str,
        config: &'a PhaseConfig,
        analysis: &'a Analysis,
        lookback: Lookback,
    ) -> Self {
        Report {
            symbol,
            config,
            lookback,
            phases: recent(&analysis.phases, lookback),
            turning_points: &analysis.turning_points,
            stats: &analysis.stats,
            latest_bias: analysis.latest_bias(),
        }
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s, DATE_FORMAT)?)
}

/// Plain text table of the recent phases followed by the cycle summary
pub fn summary_table(
    symbol: &str,
    analysis: &Analysis,
    window: usize,
    lookback: Lookback,
) -> std::result::Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{} ({})", symbol, lookback)?;
    writeln!(
        out,
        "{:<10}  {:>10}  {:>10}  {:>7}  {:<9}  {:>4}  {}",
        "date",
        "close",
        format!("ma{}", window),
        "dev",
        "phase",
        "day",
        "turning"
    )?;
    let ips = recent(&analysis.indicators, lookback);
    let states = recent(&analysis.phases, lookback);
    for (ip, s) in ips.iter().zip(states.iter()) {
        let ma = ip
            .moving_average
            .map_or_else(|| "-".to_owned(), |ma| format!("{:.2}", ma));
        let dev = ip
            .deviation
            .map_or_else(|| "-".to_owned(), |d| format!("{:.2}%", d * 100.0));
        let turning = s.turning.map(|t| t.to_string()).unwrap_or_default();
        writeln!(
            out,
            "{:<10}  {:>10.2}  {:>10}  {:>7}  {:<9}  {:>4}  {}",
            s.date.format(DATE_FORMAT).to_string(),
            s.close,
            ma,
            dev,
            s.phase.as_str(),
            s.cycle_day,
            turning
        )?;
    }
    if !analysis.turning_points.is_empty() {
        writeln!(out, "turning points:")?;
        for tp in &analysis.turning_points {
            writeln!(out, "  {}  {:<6}  {:.2}", tp.date.format(DATE_FORMAT), tp.kind.to_string(), tp.price)?;
        }
    }
    writeln!(out, "{}", annotation(analysis))?;
    Ok(out)
}

/// Plain text ranking of the symbols by interval return
pub fn leaders_table(leaders: &[Leader], lookback: Lookback) -> std::result::Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "leaders ({})", lookback)?;
    writeln!(out, "{:>4}  {:<8}  {:>9}", "rank", "symbol", "return")?;
    for (i, l) in leaders.iter().enumerate() {
        writeln!(out, "{:>4}  {:<8}  {:>8.2}%", i + 1, l.symbol, l.return_pct)?;
    }
    Ok(out)
}

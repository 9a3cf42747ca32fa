//! Relative strength of symbols over a lookback interval
use crate::lookback::Lookback;
use phasecycle_morph::Bar;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leader {
    pub symbol: String,
    /// percent change of the close over the interval
    pub return_pct: f64,
}

/// Percent return from the close `trading_days` bars back, the last bar
/// included, to the last close.
///
/// None if the series is shorter than the interval or the start close is not positive.
pub fn interval_return(bars: &[Bar], lookback: Lookback) -> Option<f64> {
    let last = bars.last()?;
    let start = match lookback.trading_days() {
        Some(n) if n > bars.len() => return None,
        Some(n) => &bars[bars.len() - n],
        None => &bars[0],
    };
    if !(start.close > 0.0) {
        return None;
    }
    Some((last.close - start.close) / start.close * 100.0)
}

/// Symbols ordered by interval return, best first
///
/// Symbols without a return over the interval are left out,
/// equal returns keep the input order.
pub fn rank_by_return<S: AsRef<str>>(series: &[(S, Vec<Bar>)], lookback: Lookback) -> Vec<Leader> {
    let mut leaders: Vec<Leader> = series
        .iter()
        .filter_map(|(symbol, bars)| {
            interval_return(bars, lookback).map(|return_pct| Leader {
                symbol: symbol.as_ref().to_owned(),
                return_pct,
            })
        })
        .collect();
    leaders.sort_by(|a, b| {
        b.return_pct
            .partial_cmp(&a.return_pct)
            .unwrap_or(Ordering::Equal)
    });
    leaders
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_interval_return() {
        let bars = new_bars(&[50.0, 80.0, 100.0, 90.0, 95.0, 110.0, 120.0]);
        // 5 bars back is the close of 100
        assert_close(20.0, interval_return(&bars, Lookback::W1));
        assert_close(140.0, interval_return(&bars, Lookback::All));
        assert_eq!(Some(0.0), interval_return(&bars, Lookback::D1));
        assert_eq!(None, interval_return(&bars, Lookback::M1));
        assert_eq!(None, interval_return(&[], Lookback::All));
        assert_eq!(None, interval_return(&new_bars(&[0.0, 10.0]), Lookback::All));
    }

    #[test]
    fn test_rank_by_return() {
        let series = vec![
            ("XLU", new_bars(&[100.0, 101.0, 99.0, 102.0, 104.0])),
            ("XLK", new_bars(&[100.0, 105.0, 110.0, 108.0, 115.0])),
            ("XLE", new_bars(&[100.0, 97.0, 95.0, 94.0, 90.0])),
            ("XLF", new_bars(&[100.0, 102.0])),
            ("XLV", new_bars(&[50.0, 51.0, 49.0, 50.0, 52.0])),
        ];
        let leaders = rank_by_return(&series, Lookback::W1);
        let symbols: Vec<&str> = leaders.iter().map(|l| l.symbol.as_str()).collect();
        // XLF is too short, XLU and XLV tie at 4%
        assert_eq!(vec!["XLK", "XLU", "XLV", "XLE"], symbols);
        assert_close(15.0, Some(leaders[0].return_pct));
        assert_close(-10.0, Some(leaders[3].return_pct));
    }

    fn assert_close(expected: f64, actual: Option<f64>) {
        match actual {
            Some(v) => assert!((v - expected).abs() < 1e-9, "{} != {}", v, expected),
            None => panic!("no return, expected {}", expected),
        }
    }

    fn new_bars(closes: &[f64]) -> Vec<Bar> {
        let start = NaiveDate::from_ymd(2024, 1, 1);
        closes
            .iter()
            .enumerate()
            .map(|(i, c)| Bar::new(start + chrono::Duration::days(i as i64), *c))
            .collect()
    }
}

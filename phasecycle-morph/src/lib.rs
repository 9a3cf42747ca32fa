//! Market phase morphology
//!
//! Bars are reshaped step by step:
//! bars -> indicator points -> phase states -> turning points -> cycle statistics.
mod config;
mod cycle;
mod error;
mod indicator;
mod phase;
mod shape;
mod trend;

pub use config::PhaseConfig;
pub use cycle::{cycle_stats, phases_to_tps};
pub use error::Error;
pub use indicator::{bars_to_ips, sma, validate_bars};
pub use phase::ips_to_phases;
pub use shape::*;
pub use trend::bars_to_bias;
pub type Result<T> = std::result::Result<T, Error>;

use log::debug;

/// Runs the whole pipeline over a bar series
///
/// Configuration and bars are validated before any classification happens,
/// so either the whole series is analyzed or an error is returned.
pub fn analyze(bars: &[Bar], cfg: &PhaseConfig) -> Result<Analysis> {
    cfg.validate()?;
    validate_bars(bars)?;
    let indicators = bars_to_ips(bars, cfg.window)?;
    let phases = ips_to_phases(&indicators, cfg)?;
    let turning_points = phases_to_tps(&phases);
    let last_date = bars[bars.len() - 1].date;
    let stats = cycle::tps_to_stats(&turning_points, last_date);
    let bias = bars_to_bias(bars, cfg.long_window);
    debug!(
        "analyzed {} bars, {} turning points, latest phase {}",
        bars.len(),
        turning_points.len(),
        phases.last().map(|s| s.phase).unwrap_or(Phase::Undefined)
    );
    Ok(Analysis {
        indicators,
        phases,
        turning_points,
        stats,
        bias,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_analyze_short_series() -> Result<()> {
        let bars = new_bars(&[100.0; 10]);
        let a = analyze(&bars, &PhaseConfig::default())?;
        assert!(a.phases.iter().all(|s| s.phase == Phase::Undefined));
        assert!(a.phases.iter().all(|s| s.cycle_day == 0));
        assert_eq!(CycleStats::default(), a.stats);
        assert!(a.turning_points.is_empty());
        assert_eq!(None, a.latest_bias());
        Ok(())
    }

    #[test]
    fn test_analyze_rejects_invalid_input() {
        assert!(analyze(&[], &PhaseConfig::default()).is_err());
        let cfg = PhaseConfig {
            window: 0,
            ..PhaseConfig::default()
        };
        assert!(analyze(&new_bars(&[1.0, 2.0]), &cfg).is_err());
    }

    #[test]
    fn test_analyze_serde() -> Result<()> {
        let bars = new_bars(&[100.0, 106.0]);
        let cfg = PhaseConfig {
            window: 2,
            long_window: 2,
            ..PhaseConfig::default()
        };
        let a = analyze(&bars, &cfg)?;
        let json = serde_json::to_string(&a.phases[1]).unwrap();
        assert_eq!(
            r#"{"date":"2020-06-02","close":106.0,"phase":"uptrend","cycle_day":1,"turning":null}"#,
            json
        );
        assert_eq!(Some(Bias::Bull), a.latest_bias());
        Ok(())
    }

    fn new_bars(closes: &[f64]) -> Vec<Bar> {
        let start = NaiveDate::from_ymd(2020, 6, 1);
        closes
            .iter()
            .enumerate()
            .map(|(i, c)| Bar::new(start + chrono::Duration::days(i as i64), *c))
            .collect()
    }
}

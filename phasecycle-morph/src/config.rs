use crate::{Error, Result};
use serde_derive::*;
use std::str::FromStr;

/// Parameters of the classifier pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseConfig {
    /// window of the moving average used for signals
    pub window: usize,
    /// minimal deviation from the moving average to count as a trend signal
    pub threshold: f64,
    /// minimal length of a run to be committed as a phase
    pub min_confirmed_days: usize,
    /// window of the moving average used for the long-term bias
    pub long_window: usize,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        PhaseConfig {
            window: 20,
            threshold: 0.02,
            min_confirmed_days: 6,
            long_window: 200,
        }
    }
}

impl PhaseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(Error::invalid_input("window must be positive"));
        }
        if self.long_window == 0 {
            return Err(Error::invalid_input("long window must be positive"));
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(Error::invalid_input(format!(
                "threshold must be a non-negative number, got {}",
                self.threshold
            )));
        }
        if self.min_confirmed_days == 0 {
            return Err(Error::invalid_input("min confirmed days must be at least 1"));
        }
        Ok(())
    }
}

/// Parses settings like "window:20,threshold:0.02,min_days:6,long_window:200".
///
/// Missing keys keep their default value.
impl FromStr for PhaseConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut cfg = PhaseConfig::default();
        for c in s.split(',').map(str::trim).filter(|c| !c.is_empty()) {
            let mut kv = c.splitn(2, ':');
            let key = kv.next().unwrap_or_default();
            let value = kv
                .next()
                .ok_or_else(|| Error::invalid_input(format!("missing value in setting: {}", c)))?;
            match key {
                "window" => cfg.window = parse_value(key, value)?,
                "threshold" => cfg.threshold = parse_value(key, value)?,
                "min_days" => cfg.min_confirmed_days = parse_value(key, value)?,
                "long_window" => cfg.long_window = parse_value(key, value)?,
                _ => {
                    return Err(Error::invalid_input(format!("unknown setting: {}", key)));
                }
            }
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::invalid_input(format!("invalid value for {}: {}", key, value)))
}

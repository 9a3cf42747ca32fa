use phasecycle_morph::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display interval counted in trading days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lookback {
    #[serde(rename = "1D")]
    D1,
    #[serde(rename = "1V")]
    W1,
    #[serde(rename = "1M")]
    M1,
    #[serde(rename = "3M")]
    M3,
    #[serde(rename = "6M")]
    M6,
    #[serde(rename = "12M")]
    M12,
    #[serde(rename = "all")]
    All,
}

impl Lookback {
    pub fn trading_days(self) -> Option<usize> {
        match self {
            Lookback::D1 => Some(1),
            Lookback::W1 => Some(5),
            Lookback::M1 => Some(21),
            Lookback::M3 => Some(63),
            Lookback::M6 => Some(126),
            Lookback::M12 => Some(252),
            Lookback::All => None,
        }
    }
}

impl Default for Lookback {
    fn default() -> Self {
        Lookback::M6
    }
}

impl FromStr for Lookback {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "1D" => Ok(Lookback::D1),
            // week is written as 1V in the dashboard
            "1V" | "1W" | "5D" => Ok(Lookback::W1),
            "1M" => Ok(Lookback::M1),
            "3M" => Ok(Lookback::M3),
            "6M" => Ok(Lookback::M6),
            "12M" | "1Y" => Ok(Lookback::M12),
            "ALL" => Ok(Lookback::All),
            _ => Err(Error::invalid_input(format!("invalid lookback: {}", s))),
        }
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Lookback::D1 => "1D",
            Lookback::W1 => "1V",
            Lookback::M1 => "1M",
            Lookback::M3 => "3M",
            Lookback::M6 => "6M",
            Lookback::M12 => "12M",
            Lookback::All => "all",
        };
        f.write_str(s)
    }
}

/// Trailing slice covered by the lookback
pub fn recent<T>(items: &[T], lookback: Lookback) -> &[T] {
    match lookback.trading_days() {
        Some(n) if n < items.len() => &items[items.len() - n..],
        _ => items,
    }
}

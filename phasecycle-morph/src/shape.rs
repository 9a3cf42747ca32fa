use chrono::NaiveDate;
use serde_derive::*;
use std::fmt;

/// Daily bar
///
/// Only date and close take part in classification,
/// open, high and low are carried for the chart layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    pub close: f64,
}

impl Bar {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Bar {
            date,
            open: None,
            high: None,
            low: None,
            close,
        }
    }

    pub fn with_ohlc(date: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> Self {
        Bar {
            date,
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close,
        }
    }
}

/// Moving average and deviation of a single bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub close: f64,
    pub moving_average: Option<f64>,
    // |close - ma| / ma, always non-negative
    pub deviation: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Undefined,
    Uptrend,
    Downtrend,
    Choppy,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Undefined => "undefined",
            Phase::Uptrend => "uptrend",
            Phase::Downtrend => "downtrend",
            Phase::Choppy => "choppy",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurningKind {
    Top,
    Bottom,
}

impl fmt::Display for TurningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurningKind::Top => f.write_str("top"),
            TurningKind::Bottom => f.write_str("bottom"),
        }
    }
}

/// Classifier output of a single bar
///
/// cycle_day counts the bars since the current phase began, including this one,
/// and is 0 only for undefined points.
/// turning is assigned afterwards to the extremum of a closed uptrend or downtrend run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseState {
    pub date: NaiveDate,
    pub close: f64,
    pub phase: Phase,
    pub cycle_day: u32,
    pub turning: Option<TurningKind>,
}

/// Cycle top or bottom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurningPoint {
    pub date: NaiveDate,
    pub kind: TurningKind,
    pub price: f64,
}

/// Average cycle lengths in calendar days
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CycleStats {
    pub average_up_duration: Option<f64>,
    pub average_down_duration: Option<f64>,
    pub current_cycle_day: Option<i64>,
}

/// Long-term bias against the long moving average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bias {
    Bull,
    Bear,
}

/// Complete result of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub indicators: Vec<IndicatorPoint>,
    pub phases: Vec<PhaseState>,
    pub turning_points: Vec<TurningPoint>,
    pub stats: CycleStats,
    pub bias: Vec<Option<Bias>>,
}

impl Analysis {
    /// phase of the last bar
    pub fn latest_phase(&self) -> Phase {
        self.phases
            .last()
            .map(|s| s.phase)
            .unwrap_or(Phase::Undefined)
    }

    pub fn latest_bias(&self) -> Option<Bias> {
        self.bias.last().cloned().flatten()
    }
}

//! Chart payload
//!
//! Reshapes an analysis into the pieces a chart renderer draws:
//! candles, moving average overlay, background bands per phase,
//! turning point markers and a text annotation of the cycle statistics.
use crate::lookback::{recent, Lookback};
use chrono::NaiveDate;
use phasecycle_morph::{Analysis, Bar, Bias, CycleStats, Error, Phase, Result, TurningKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl From<&Bar> for Candle {
    fn from(b: &Bar) -> Self {
        Candle {
            date: b.date,
            open: b.open.unwrap_or(b.close),
            high: b.high.unwrap_or(b.close),
            low: b.low.unwrap_or(b.close),
            close: b.close,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub name: String,
    pub points: Vec<LinePoint>,
}

/// Maximal run of a single phase, both ends inclusive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub phase: Phase,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub date: NaiveDate,
    pub kind: TurningKind,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub symbol: String,
    pub lookback: Lookback,
    pub candles: Vec<Candle>,
    pub overlay: Line,
    pub bands: Vec<Band>,
    pub markers: Vec<Marker>,
    pub annotation: String,
}

impl Chart {
    /// Builds the chart of the bars analyzed, restricted to the lookback.
    ///
    /// Statistics in the annotation always cover the full history.
    pub fn from_analysis(
        symbol: &str,
        bars: &[Bar],
        analysis: &Analysis,
        window: usize,
        lookback: Lookback,
    ) -> Result<Chart> {
        if bars.len() != analysis.phases.len() || bars.len() != analysis.indicators.len() {
            return Err(Error::invalid_input(format!(
                "{} bars do not match analysis of {} points",
                bars.len(),
                analysis.phases.len()
            )));
        }
        let bars = recent(bars, lookback);
        let first_date = match bars.first() {
            Some(b) => b.date,
            None => return Err(Error::invalid_input("empty bar series")),
        };
        let candles = bars.iter().map(Candle::from).collect();
        let overlay = Line {
            name: format!("MA{}", window),
            points: recent(&analysis.indicators, lookback)
                .iter()
                .filter_map(|ip| {
                    ip.moving_average.map(|value| LinePoint {
                        date: ip.date,
                        value,
                    })
                })
                .collect(),
        };
        let markers = analysis
            .turning_points
            .iter()
            .filter(|tp| tp.date >= first_date)
            .map(|tp| Marker {
                date: tp.date,
                kind: tp.kind,
                price: tp.price,
            })
            .collect();
        let phases = recent(&analysis.phases, lookback);
        let mut bands: Vec<Band> = Vec::new();
        for s in phases.iter().filter(|s| s.phase != Phase::Undefined) {
            if let Some(band) = bands.last_mut() {
                if band.phase == s.phase {
                    band.end = s.date;
                    continue;
                }
            }
            bands.push(Band {
                phase: s.phase,
                start: s.date,
                end: s.date,
            });
        }
        Ok(Chart {
            symbol: symbol.to_owned(),
            lookback,
            candles,
            overlay,
            bands,
            markers,
            annotation: annotation(analysis),
        })
    }
}

/// Text summary of the latest phase and the cycle statistics
pub fn annotation(analysis: &Analysis) -> String {
    let CycleStats {
        average_up_duration,
        average_down_duration,
        current_cycle_day,
    } = &analysis.stats;
    let (phase, cycle_day) = analysis
        .phases
        .last()
        .map(|s| (s.phase, s.cycle_day))
        .unwrap_or((Phase::Undefined, 0));
    let bias = match analysis.latest_bias() {
        Some(Bias::Bull) => "bull",
        Some(Bias::Bear) => "bear",
        None => "n/a",
    };
    format!(
        "Phase: {} (day {}) | Long-term: {} | Avg up cycle: {} | Avg down cycle: {} | Days since turning point: {}",
        phase,
        cycle_day,
        bias,
        days(*average_up_duration),
        days(*average_down_duration),
        current_cycle_day.map_or_else(|| "n/a".to_owned(), |d| d.to_string()),
    )
}

fn days(d: Option<f64>) -> String {
    d.map_or_else(|| "n/a".to_owned(), |d| format!("{:.1} days", d))
}

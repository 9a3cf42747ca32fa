use crate::shape::{IndicatorPoint, Phase, PhaseState, TurningKind};
use crate::{PhaseConfig, Result};
use log::debug;

/// Classifies indicator points into market phases
///
/// Runs a single pass over the points.
/// Each point with a defined deviation produces a signal, consecutive signals
/// form runs, and a run is committed as a phase only when it lasts at least
/// min_confirmed_days. Shorter reversals collapse into choppy.
/// When an uptrend (downtrend) run is closed, its highest (lowest) close
/// is marked as a cycle top (bottom).
pub fn ips_to_phases(ips: &[IndicatorPoint], cfg: &PhaseConfig) -> Result<Vec<PhaseState>> {
    cfg.validate()?;
    let shaper = PhaseShaper::new(cfg);
    let (_, states) = ips.iter().enumerate().fold(
        (None, Vec::with_capacity(ips.len())),
        |(memory, mut states), (idx, ip)| {
            let memory = shaper.consume(memory, idx, ip, &mut states);
            (memory, states)
        },
    );
    Ok(states)
}

/// Fold state of the classifier
#[derive(Debug, Clone, Copy, PartialEq)]
struct PhaseMemory {
    current: Phase,
    start_idx: usize,
    last_committed: Option<TurningKind>,
}

struct PhaseShaper<'c> {
    cfg: &'c PhaseConfig,
}

impl<'c> PhaseShaper<'c> {
    fn new(cfg: &'c PhaseConfig) -> Self {
        PhaseShaper { cfg }
    }

    fn signal(&self, ip: &IndicatorPoint) -> Option<Phase> {
        let (ma, deviation) = match (ip.moving_average, ip.deviation) {
            (Some(ma), Some(deviation)) => (ma, deviation),
            _ => return None,
        };
        let signal = if ip.close > ma && deviation >= self.cfg.threshold {
            Phase::Uptrend
        } else if ip.close < ma && deviation >= self.cfg.threshold {
            Phase::Downtrend
        } else {
            Phase::Choppy
        };
        Some(signal)
    }

    /// Consumes one point, pushes its state and returns the updated memory.
    ///
    /// States already pushed are only touched to mark the extremum of a closed run.
    fn consume(
        &self,
        memory: Option<PhaseMemory>,
        idx: usize,
        ip: &IndicatorPoint,
        states: &mut Vec<PhaseState>,
    ) -> Option<PhaseMemory> {
        let signal = match self.signal(ip) {
            Some(signal) => signal,
            None => {
                // indicator not ready, phase memory stays as is
                states.push(new_state(ip, Phase::Undefined, 0));
                return memory;
            }
        };

        let mut m = match memory {
            Some(m) => m,
            None => {
                states.push(new_state(ip, signal, 1));
                return Some(PhaseMemory {
                    current: signal,
                    start_idx: idx,
                    last_committed: None,
                });
            }
        };

        if signal == m.current {
            states.push(new_state(ip, m.current, cycle_day(idx - m.start_idx + 1)));
            return Some(m);
        }

        let duration = idx - m.start_idx;
        if duration < self.cfg.min_confirmed_days {
            // too short to be a phase, fold into choppy
            debug!(
                "{} run of {} days dampened into choppy at {}",
                m.current, duration, ip.date
            );
            m.current = Phase::Choppy;
            states.push(new_state(ip, m.current, cycle_day(duration + 1)));
            return Some(m);
        }

        if let Some(kind) = commit_run(m.current, &mut states[m.start_idx..idx]) {
            if m.last_committed == Some(kind) {
                debug!("consecutive {} committed before {}", kind, ip.date);
            }
            m.last_committed = Some(kind);
        }
        m.current = signal;
        m.start_idx = idx;
        states.push(new_state(ip, m.current, 1));
        Some(m)
    }
}

/// Marks the extremum of a closed run and returns the kind of turning point.
///
/// Ties resolve to the earliest point.
fn commit_run(phase: Phase, run: &mut [PhaseState]) -> Option<TurningKind> {
    let kind = match phase {
        Phase::Uptrend => TurningKind::Top,
        Phase::Downtrend => TurningKind::Bottom,
        _ => return None,
    };
    let mut extremum: Option<usize> = None;
    for (i, s) in run.iter().enumerate() {
        let better = match extremum {
            None => true,
            Some(e) => match kind {
                TurningKind::Top => s.close > run[e].close,
                TurningKind::Bottom => s.close < run[e].close,
            },
        };
        if better {
            extremum = Some(i);
        }
    }
    let e = extremum?;
    debug!(
        "{} run closed, cycle {} at {} price {}",
        phase, kind, run[e].date, run[e].close
    );
    run[e].turning = Some(kind);
    Some(kind)
}

#[inline]
fn new_state(ip: &IndicatorPoint, phase: Phase, cycle_day: u32) -> PhaseState {
    PhaseState {
        date: ip.date,
        close: ip.close,
        phase,
        cycle_day,
        turning: None,
    }
}

#[inline]
fn cycle_day(days: usize) -> u32 {
    days as u32
}

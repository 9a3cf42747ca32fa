use crate::shape::{CycleStats, PhaseState, TurningKind, TurningPoint};

/// Extracts turning points from classified states.
///
/// Consecutive turning points of the same kind are collapsed,
/// only the last of each run is kept.
pub fn phases_to_tps(states: &[PhaseState]) -> Vec<TurningPoint> {
    let mut tps: Vec<TurningPoint> = Vec::new();
    for s in states {
        let kind = match s.turning {
            Some(kind) => kind,
            None => continue,
        };
        let tp = TurningPoint {
            date: s.date,
            kind,
            price: s.close,
        };
        if tps.last().map(|last| last.kind) == Some(kind) {
            tps.pop();
        }
        tps.push(tp);
    }
    tps
}

/// Aggregates average cycle durations and the days since the last turning point
pub fn cycle_stats(states: &[PhaseState]) -> CycleStats {
    let tps = phases_to_tps(states);
    let last_date = match states.last() {
        Some(s) => s.date,
        None => return CycleStats::default(),
    };
    tps_to_stats(&tps, last_date)
}

pub(crate) fn tps_to_stats(tps: &[TurningPoint], last_date: chrono::NaiveDate) -> CycleStats {
    let mut up = Vec::new();
    let mut down = Vec::new();
    for (tp0, tp1) in tps.iter().zip(tps.iter().skip(1)) {
        let days = tp1.date.signed_duration_since(tp0.date).num_days() as f64;
        match (tp0.kind, tp1.kind) {
            (TurningKind::Bottom, TurningKind::Top) => up.push(days),
            (TurningKind::Top, TurningKind::Bottom) => down.push(days),
            _ => (),
        }
    }
    CycleStats {
        average_up_duration: mean(&up),
        average_down_duration: mean(&down),
        current_cycle_day: tps
            .last()
            .map(|tp| last_date.signed_duration_since(tp.date).num_days() + 1),
    }
}

fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Phase;
    use chrono::NaiveDate;

    #[test]
    fn test_stats_of_alternating_cycles() {
        let mut states = new_states(60);
        mark(&mut states, 10, 90.0, TurningKind::Bottom);
        mark(&mut states, 30, 120.0, TurningKind::Top);
        mark(&mut states, 50, 95.0, TurningKind::Bottom);

        let tps = phases_to_tps(&states);
        assert_eq!(3, tps.len());
        assert_eq!(120.0, tps[1].price);
        let stats = cycle_stats(&states);
        assert_eq!(Some(20.0), stats.average_up_duration);
        assert_eq!(Some(20.0), stats.average_down_duration);
        // last bar at day 59
        assert_eq!(Some(10), stats.current_cycle_day);
    }

    #[test]
    fn test_collapse_keeps_last_of_same_kind() {
        let mut states = new_states(40);
        mark(&mut states, 5, 100.0, TurningKind::Top);
        mark(&mut states, 12, 104.0, TurningKind::Top);
        mark(&mut states, 20, 96.0, TurningKind::Bottom);
        mark(&mut states, 25, 95.0, TurningKind::Bottom);
        mark(&mut states, 33, 99.0, TurningKind::Top);

        let tps = phases_to_tps(&states);
        let dates: Vec<_> = tps.iter().map(|tp| tp.date).collect();
        assert_eq!(vec![new_date(12), new_date(25), new_date(33)], dates);
        for (tp0, tp1) in tps.iter().zip(tps.iter().skip(1)) {
            assert_ne!(tp0.kind, tp1.kind);
        }

        let stats = cycle_stats(&states);
        assert_eq!(Some(8.0), stats.average_up_duration);
        assert_eq!(Some(13.0), stats.average_down_duration);
        assert_eq!(Some(7), stats.current_cycle_day);
    }

    #[test]
    fn test_single_turning_point() {
        let mut states = new_states(10);
        mark(&mut states, 9, 100.0, TurningKind::Top);
        let stats = cycle_stats(&states);
        assert_eq!(None, stats.average_up_duration);
        assert_eq!(None, stats.average_down_duration);
        assert_eq!(Some(1), stats.current_cycle_day);
    }

    #[test]
    fn test_no_turning_point() {
        assert_eq!(CycleStats::default(), cycle_stats(&new_states(10)));
        assert_eq!(CycleStats::default(), cycle_stats(&[]));
    }

    fn mark(states: &mut [PhaseState], day: usize, price: f64, kind: TurningKind) {
        states[day].close = price;
        states[day].turning = Some(kind);
    }

    fn new_states(n: i64) -> Vec<PhaseState> {
        (0..n)
            .map(|i| PhaseState {
                date: new_date(i),
                close: 100.0,
                phase: Phase::Choppy,
                cycle_day: 1,
                turning: None,
            })
            .collect()
    }

    fn new_date(day: i64) -> NaiveDate {
        NaiveDate::from_ymd(2021, 3, 1) + chrono::Duration::days(day)
    }
}

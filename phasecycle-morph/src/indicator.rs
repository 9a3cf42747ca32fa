use crate::shape::{Bar, IndicatorPoint};
use crate::{Error, Result};

/// Computes moving average and deviation of each bar
pub fn bars_to_ips(bars: &[Bar], window: usize) -> Result<Vec<IndicatorPoint>> {
    validate_bars(bars)?;
    if window == 0 {
        return Err(Error::invalid_input("window must be positive"));
    }
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let mas = sma(&closes, window);
    let ips = bars
        .iter()
        .zip(mas.into_iter())
        .map(|(b, ma)| IndicatorPoint {
            date: b.date,
            close: b.close,
            moving_average: ma,
            deviation: ma.map(|ma| (b.close - ma).abs() / ma),
        })
        .collect();
    Ok(ips)
}

/// Trailing simple moving average
///
/// The first window-1 values are None.
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    let warmup = values.len().min(window - 1);
    let mut res = Vec::with_capacity(values.len());
    res.resize(warmup, None);
    let wv = window as f64;
    res.extend(
        values
            .windows(window)
            .map(|w| Some(w.iter().sum::<f64>() / wv)),
    );
    res
}

/// Checks the bar series is non-empty, strictly increasing by date and carries positive closes
pub fn validate_bars(bars: &[Bar]) -> Result<()> {
    if bars.is_empty() {
        return Err(Error::invalid_input("empty bar series"));
    }
    for b in bars {
        if !b.close.is_finite() || b.close <= 0.0 {
            return Err(Error::invalid_input(format!(
                "close price must be positive, got {} at {}",
                b.close, b.date
            )));
        }
    }
    for (b0, b1) in bars.iter().zip(bars.iter().skip(1)) {
        if b1.date <= b0.date {
            return Err(Error::invalid_input(format!(
                "dates not strictly increasing: {} followed by {}",
                b0.date, b1.date
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_sma() {
        let ma1 = sma(&[1.0, 1.0, 1.0, 1.0, 1.0], 3);
        assert_eq!(vec![None, None, Some(1.0), Some(1.0), Some(1.0)], ma1);
        let ma2 = sma(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0], 3);
        let expected = vec![None, None, Some(2.0), Some(3.0), Some(4.0), Some(5.0), Some(6.0)];
        assert_eq!(expected, ma2);
    }

    #[test]
    fn test_sma_longer_than_series() {
        assert_eq!(vec![None, None], sma(&[1.0, 2.0], 5));
        assert_eq!(vec![Some(1.0), Some(2.0)], sma(&[1.0, 2.0], 1));
    }

    #[test]
    fn test_bars_to_ips() -> Result<()> {
        let bars = new_bars(&[100.0, 100.0, 100.0, 103.0, 97.0]);
        let ips = bars_to_ips(&bars, 3)?;
        assert_eq!(5, ips.len());
        assert_eq!(None, ips[0].moving_average);
        assert_eq!(None, ips[1].deviation);
        assert_eq!(Some(100.0), ips[2].moving_average);
        assert_eq!(Some(0.0), ips[2].deviation);
        assert_eq!(Some(101.0), ips[3].moving_average);
        assert_eq!(Some(100.0), ips[4].moving_average);
        assert_eq!(Some(0.03), ips[4].deviation);
        Ok(())
    }

    #[test]
    fn test_invalid_bars() {
        assert!(bars_to_ips(&[], 20).is_err());
        assert!(bars_to_ips(&new_bars(&[1.0, 2.0]), 0).is_err());
        assert!(bars_to_ips(&new_bars(&[1.0, -2.0]), 1).is_err());

        let mut bars = new_bars(&[1.0, 2.0, 3.0]);
        bars.swap(0, 2);
        assert_eq!(
            Some(Error::InvalidInput(
                "dates not strictly increasing: 2020-01-03 followed by 2020-01-02".to_owned()
            )),
            bars_to_ips(&bars, 2).err()
        );
        let mut bars = new_bars(&[1.0, 2.0]);
        bars[1].date = bars[0].date;
        assert!(bars_to_ips(&bars, 1).is_err());
    }

    fn new_bars(closes: &[f64]) -> Vec<Bar> {
        let start = NaiveDate::from_ymd(2020, 1, 1);
        closes
            .iter()
            .enumerate()
            .map(|(i, c)| Bar::new(start + chrono::Duration::days(i as i64), *c))
            .collect()
    }
}

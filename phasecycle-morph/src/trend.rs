use crate::indicator::sma;
use crate::shape::{Bar, Bias};

/// Long-term bias of each bar
///
/// Bull when the close is at or above the long moving average, bear below it,
/// None while the average is not yet defined.
pub fn bars_to_bias(bars: &[Bar], window: usize) -> Vec<Option<Bias>> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    sma(&closes, window)
        .into_iter()
        .zip(closes.iter())
        .map(|(ma, close)| {
            ma.map(|ma| if *close >= ma { Bias::Bull } else { Bias::Bear })
        })
        .collect()
}

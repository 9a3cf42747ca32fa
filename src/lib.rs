//! Market phase classification of daily price series
//!
//! The morphology itself lives in `phasecycle-morph` and is re-exported here,
//! together with the chart payload handed to renderers and the ranking of
//! symbols by their return over a lookback interval.
pub mod chart;
pub mod leaders;
pub mod lookback;

pub use chart::Chart;
pub use leaders::{interval_return, rank_by_return, Leader};
pub use lookback::{recent, Lookback};
pub use phasecycle_morph::*;

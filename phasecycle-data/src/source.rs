use crate::error::Error;
use crate::model::quotes_to_bars;
use chrono::NaiveDate;
use log::debug;
use phasecycle_morph::Bar;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Daily price data of a single symbol
pub trait PriceSource {
    /// bars of the symbol within [start, end], sorted by date
    fn bars(
        &self,
        symbol: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Bar>, Error>;
}

/// Price source backed by a local csv file
///
/// The file holds the quotes of one symbol, the symbol passed in is only logged.
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        CsvFileSource { path: path.into() }
    }
}

impl PriceSource for CsvFileSource {
    fn bars(
        &self,
        symbol: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Bar>, Error> {
        let file = File::open(&self.path)?;
        let bars = quotes_to_bars(BufReader::new(file))?;
        let bars = within(bars, start, end);
        debug!(
            "loaded {} bars of {} from {}",
            bars.len(),
            symbol,
            self.path.display()
        );
        Ok(bars)
    }
}

pub(crate) fn within(bars: Vec<Bar>, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Vec<Bar> {
    bars.into_iter()
        .filter(|b| start.map_or(true, |s| b.date >= s))
        .filter(|b| end.map_or(true, |e| b.date <= e))
        .collect()
}

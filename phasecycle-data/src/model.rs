use crate::error::Error;
use chrono::NaiveDate;
use phasecycle_morph::Bar;
use serde_derive::*;
use std::io::Read;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Daily quote as found in downloaded price files
///
/// Headers follow the common "Date,Open,High,Low,Close,Adj Close,Volume" layout,
/// columns other than Date and Close may be absent or empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Open", default)]
    pub open: Option<f64>,
    #[serde(rename = "High", default)]
    pub high: Option<f64>,
    #[serde(rename = "Low", default)]
    pub low: Option<f64>,
    #[serde(rename = "Close")]
    pub close: f64,
    #[serde(rename = "Adj Close", default)]
    pub adj_close: Option<f64>,
    #[serde(rename = "Volume", default)]
    pub volume: Option<f64>,
}

impl Quote {
    /// converts to bar, only the date part of a timestamp is kept
    pub fn to_bar(&self) -> Result<Bar, Error> {
        Ok(Bar {
            date: parse_date(&self.date)?,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
        })
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate, Error> {
    let day = s
        .get(..10)
        .ok_or_else(|| Error::Client(format!("invalid date: {}", s)))?;
    NaiveDate::parse_from_str(day, DATE_FORMAT)
        .map_err(|e| Error::Client(format!("invalid date {}: {}", s, e)))
}

// csv consuming function
pub(crate) fn consume_csv<R, T>(reader: R) -> Result<Vec<T>, Error>
where
    R: Read,
    for<'de> T: serde::Deserialize<'de>,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rs = Vec::new();
    for r in reader.deserialize() {
        let s: T = r?;
        rs.push(s);
    }
    Ok(rs)
}

/// Parses quotes into bars sorted by date
pub fn quotes_to_bars<R: Read>(reader: R) -> Result<Vec<Bar>, Error> {
    let quotes: Vec<Quote> = consume_csv(reader)?;
    let mut bars = quotes
        .iter()
        .map(Quote::to_bar)
        .collect::<Result<Vec<_>, _>>()?;
    bars.sort_by_key(|b| b.date);
    Ok(bars)
}

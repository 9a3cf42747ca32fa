mod client;
pub mod error;
pub mod model;
mod source;

pub use client::HttpCsvSource;
pub use error::Error;
pub use model::{quotes_to_bars, Quote};
pub use source::{CsvFileSource, PriceSource};

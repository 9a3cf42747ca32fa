use crate::error::Error;
use crate::model::quotes_to_bars;
use crate::source::{within, PriceSource};
use chrono::NaiveDate;
use log::debug;
use phasecycle_morph::Bar;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Price source downloading csv quotes over http
///
/// Requests `GET {base_url}/{symbol}.csv?start=YYYY-MM-DD&end=YYYY-MM-DD`,
/// both query parameters are optional.
pub struct HttpCsvSource {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpCsvSource {
    pub fn new(base_url: &str) -> Self {
        HttpCsvSource {
            base_url: base_url.trim_end_matches('/').to_owned(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn url(&self, symbol: &str) -> String {
        format!("{}/{}.csv", self.base_url, symbol)
    }
}

impl PriceSource for HttpCsvSource {
    fn bars(
        &self,
        symbol: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<Bar>, Error> {
        if symbol.is_empty() {
            return Err(Error::Client("empty symbol".to_owned()));
        }
        let mut query = Vec::new();
        if let Some(start) = start {
            query.push(("start", start.format(DATE_FORMAT).to_string()));
        }
        if let Some(end) = end {
            query.push(("end", end.format(DATE_FORMAT).to_string()));
        }
        let url = self.url(symbol);
        debug!("requesting {} with {:?}", url, query);
        let response = self.client.get(&url).query(&query).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Server(format!("{} returned {}", url, status)));
        }
        let bars = quotes_to_bars(response)?;
        // the server may ignore the range
        Ok(within(bars, start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{mock, Matcher};

    fn quotes_body(n: usize) -> String {
        let mut s = String::from("Date,Open,High,Low,Close,Adj Close,Volume\n");
        let start = NaiveDate::from_ymd(2024, 3, 1);
        for i in 0..n {
            let date = start + chrono::Duration::days(i as i64);
            let close = 400.0 + i as f64;
            s.push_str(&format!(
                "{},{},{},{},{},{},1000000\n",
                date.format(DATE_FORMAT),
                close - 1.0,
                close + 2.0,
                close - 2.0,
                close,
                close
            ));
        }
        s
    }

    #[test]
    fn test_bars_filters_range() {
        let _m = mock("GET", Matcher::Regex(r"^/SPY\.csv".to_owned()))
            .with_status(200)
            .with_body(&quotes_body(10))
            .create();

        let source = HttpCsvSource::new(&format!("{}/", mockito::server_url()));
        let bars = source
            .bars(
                "SPY",
                Some(NaiveDate::from_ymd(2024, 3, 3)),
                Some(NaiveDate::from_ymd(2024, 3, 5)),
            )
            .unwrap();
        let dates: Vec<_> = bars.iter().map(|b| b.date).collect();
        assert_eq!(
            vec![
                NaiveDate::from_ymd(2024, 3, 3),
                NaiveDate::from_ymd(2024, 3, 4),
                NaiveDate::from_ymd(2024, 3, 5),
            ],
            dates
        );
        assert_eq!(Some(400.0), bars[0].low);
    }

    #[test]
    fn test_bars_server_error() {
        let _m = mock("GET", Matcher::Regex(r"^/XLK\.csv".to_owned()))
            .with_status(500)
            .with_body("error: internal")
            .create();

        let source = HttpCsvSource::new(&mockito::server_url());
        match source.bars("XLK", None, None) {
            Err(Error::Server(_)) => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_bars_empty_symbol() {
        let source = HttpCsvSource::new(&mockito::server_url());
        match source.bars("", None, None) {
            Err(Error::Client(_)) => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}

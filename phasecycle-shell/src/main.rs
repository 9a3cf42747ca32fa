use chrono::NaiveDate;
use dotenv::dotenv;
use log::info;
use phasecycle::{analyze, rank_by_return, Analysis, Bar, Chart, Lookback, PhaseConfig};
use phasecycle_data::{CsvFileSource, HttpCsvSource, PriceSource};
use phasecycle_shell::{leaders_table, parse_date, summary_table, Error, Report};
use structopt::StructOpt;
use structopt_derive::*;

fn main() -> std::result::Result<(), Error> {
    dotenv().ok();
    env_logger::init();
    let opt = Opt::from_args();

    let start = opt.start.as_deref().map(parse_date).transpose()?;
    let end = opt.end.as_deref().map(parse_date).transpose()?;

    match &opt.cmd {
        Command::Analyze { json } => {
            let (cfg, _, analysis) = load_analysis(&opt, start, end)?;
            if *json {
                let report = Report::new(&opt.symbol, &cfg, &analysis, opt.lookback);
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", summary_table(&opt.symbol, &analysis, cfg.window, opt.lookback)?);
            }
        }
        Command::Chart => {
            let (cfg, bars, analysis) = load_analysis(&opt, start, end)?;
            let chart = Chart::from_analysis(&opt.symbol, &bars, &analysis, cfg.window, opt.lookback)?;
            println!("{}", serde_json::to_string_pretty(&chart)?);
        }
        Command::Leaders { symbols } => {
            let mut series = Vec::with_capacity(symbols.len());
            for entry in symbols {
                // SYMBOL=path reads a local csv file, a bare symbol goes to the url
                let (symbol, bars) = match entry.find('=') {
                    Some(idx) => {
                        let symbol = &entry[..idx];
                        let source = CsvFileSource::new(&entry[idx + 1..]);
                        (symbol, source.bars(symbol, start, end)?)
                    }
                    None => match &opt.url {
                        Some(url) => (entry.as_str(), HttpCsvSource::new(url).bars(entry, start, end)?),
                        None => return Err(Error(format!("no url to fetch {} from", entry))),
                    },
                };
                info!("loaded {} bars of {}", bars.len(), symbol);
                series.push((symbol, bars));
            }
            let leaders = rank_by_return(&series, opt.lookback);
            print!("{}", leaders_table(&leaders, opt.lookback)?);
        }
    }
    Ok(())
}

fn load_analysis(
    opt: &Opt,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> std::result::Result<(PhaseConfig, Vec<Bar>, Analysis), Error> {
    let cfg = PhaseConfig {
        window: opt.window,
        threshold: opt.threshold,
        min_confirmed_days: opt.min_days,
        long_window: opt.long_window,
    };
    cfg.validate()?;
    let source: Box<dyn PriceSource> = match (&opt.file, &opt.url) {
        (Some(file), _) => Box::new(CsvFileSource::new(file)),
        (None, Some(url)) => Box::new(HttpCsvSource::new(url)),
        (None, None) => return Err(Error("either file or url must be specified".to_owned())),
    };
    let bars = source.bars(&opt.symbol, start, end)?;
    info!("loaded {} bars of {}", bars.len(), opt.symbol);
    let analysis = analyze(&bars, &cfg)?;
    Ok((cfg, bars, analysis))
}

#[derive(Debug, StructOpt)]
#[structopt(name = "phasecycle-shell", about = "shell to classify market phases of daily prices")]
struct Opt {
    #[structopt(short, long, env = "PHASECYCLE_SYMBOL", default_value = "QQQ")]
    symbol: String,

    #[structopt(short, long, env = "PHASECYCLE_FILE", help = "csv file of daily quotes")]
    file: Option<String>,

    #[structopt(short, long, env = "PHASECYCLE_URL", help = "base url serving {symbol}.csv")]
    url: Option<String>,

    #[structopt(long, help = "first date, YYYY-MM-DD")]
    start: Option<String>,

    #[structopt(long, help = "last date, YYYY-MM-DD")]
    end: Option<String>,

    #[structopt(long, env = "PHASECYCLE_WINDOW", default_value = "20")]
    window: usize,

    #[structopt(long, env = "PHASECYCLE_THRESHOLD", default_value = "0.02")]
    threshold: f64,

    #[structopt(long = "min-days", env = "PHASECYCLE_MIN_DAYS", default_value = "6")]
    min_days: usize,

    #[structopt(long, env = "PHASECYCLE_LONG_WINDOW", default_value = "200")]
    long_window: usize,

    #[structopt(
        short,
        long,
        default_value = "6M",
        help = "displayed or ranked interval: 1D, 1V, 1M, 3M, 6M, 12M or all"
    )]
    lookback: Lookback,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(Debug, StructOpt)]
enum Command {
    /// prints phases of the displayed interval and the cycle summary
    Analyze {
        #[structopt(long)]
        json: bool,
    },
    /// prints the chart payload as json
    Chart,
    /// ranks symbols by their return over the lookback interval
    Leaders {
        /// symbols fetched from the url, or SYMBOL=path of a csv file
        #[structopt(required = true)]
        symbols: Vec<String>,
    },
}

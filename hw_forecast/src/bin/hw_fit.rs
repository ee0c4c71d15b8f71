//! Fit, forecast and report on a CSV series
//!
//! ```text
//! hw_fit <series.csv> <period> [--config config.json] [--report report.html]
//! ```
//!
//! The last `period` observations are held out. Coefficients are fitted on
//! the rest, the model is retrained with them and its forecast is compared
//! against the held-out tail. Log output follows `RUST_LOG`, for example
//! `RUST_LOG=hw_forecast=debug` to see every search round.

use clap::Parser;
use hw_forecast::metrics::HoldoutScore;
use hw_forecast::report::write_report;
use hw_forecast::utils::holdout_split;
use hw_forecast::{FitConfig, ForecastError, SeriesLoader, TripleExponentialSmoothing};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "hw_fit")]
#[command(about = "Fit Holt-Winters coefficients to a series and score a holdout forecast")]
struct Args {
    /// CSV file with the observations
    series: PathBuf,

    /// Season length in observations
    period: usize,

    /// Column holding the observations
    #[arg(long, default_value = "1")]
    column: usize,

    /// JSON search configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured search tolerance
    #[arg(short, long)]
    tolerance: Option<f64>,

    /// Override the configured worker bound
    #[arg(short, long)]
    workers: Option<usize>,

    /// Write an HTML chart of the holdout and the forecast
    #[arg(short, long)]
    report: Option<PathBuf>,
}

impl Args {
    fn fit_config(&self) -> Result<FitConfig, ForecastError> {
        let mut config = match &self.config {
            Some(path) => FitConfig::from_json_file(path)?,
            None => FitConfig::default(),
        };
        if let Some(tolerance) = self.tolerance {
            config = config.with_tolerance(tolerance);
        }
        if let Some(workers) = self.workers {
            config = config.with_max_workers(workers);
        }
        config.validate()?;
        Ok(config)
    }
}

fn run(args: Args) -> Result<(), ForecastError> {
    let config = args.fit_config()?;

    let series = SeriesLoader::new()
        .with_column(args.column)
        .load_csv(&args.series)?;
    info!(path = %args.series.display(), len = series.len(), "loaded series");

    let (train, test) = holdout_split(&series, args.period)?;

    let mut model = TripleExponentialSmoothing::new(args.period)?;
    let report = model.fit_with_config(train, &config)?;
    let best = report.best;
    println!(
        "Best parameters: alpha={:.5} beta={:.5} gamma={:.5} ({} rounds)",
        best.alpha,
        best.beta,
        best.gamma,
        report.rounds.len()
    );

    model.train(train, best.alpha, best.beta, best.gamma)?;
    let forecast = model.forecast(args.period)?;

    let score = HoldoutScore::new(&best, &forecast, test)?;
    print!("{}", score);

    if let Some(output) = &args.report {
        write_report(None, output, test, &forecast)?;
        info!(path = %output.display(), "wrote report");
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "hw_fit failed");
            ExitCode::FAILURE
        }
    }
}

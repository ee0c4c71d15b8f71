// Fits a Holt-Winters model to a synthetic quarterly series and forecasts a year
use holtwinters_workspace::hw_forecast::metrics::HoldoutScore;
use holtwinters_workspace::hw_forecast::utils::holdout_split;
use holtwinters_workspace::{FitConfig, TripleExponentialSmoothing};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "hw_forecast=debug".into()),
        )
        .init();

    let pattern = [1.15, 0.85, 1.3, 0.7];
    let series: Vec<f64> = (0..40)
        .map(|t| (200.0 + 4.0 * t as f64) * pattern[t % 4] + (t as f64 * 1.7).sin() * 6.0)
        .collect();
    let period = pattern.len();

    let (train, test) = holdout_split(&series, period)?;

    let mut model = TripleExponentialSmoothing::new(period)?;
    let config = FitConfig::default().with_tolerance(0.0001);
    let report = model.fit_with_config(train, &config)?;

    println!("Search rounds:");
    for round in &report.rounds {
        println!(
            "  step {:<8} trials {:>5}  best mse {:.4}",
            round.step, round.trials, round.best.mse
        );
    }

    let best = report.best;
    println!(
        "Best: alpha={:.4} beta={:.4} gamma={:.4}",
        best.alpha, best.beta, best.gamma
    );

    model.train(train, best.alpha, best.beta, best.gamma)?;
    let forecast = model.forecast(period)?;

    for (i, (f, a)) in forecast.iter().zip(test).enumerate() {
        println!("Quarter {}: forecast {:.2}, actual {:.2}", i + 1, f, a);
    }
    print!("{}", HoldoutScore::new(&best, &forecast, test)?);

    Ok(())
}

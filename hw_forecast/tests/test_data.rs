use hw_forecast::data::SeriesLoader;
use hw_forecast::metrics::HoldoutScore;
use hw_forecast::report::write_report;
use hw_forecast::utils::holdout_split;
use hw_forecast::{FitConfig, TripleExponentialSmoothing};
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

fn seasonal_csv(cycles: usize) -> NamedTempFile {
    let pattern = [1.2, 0.8, 0.9, 1.1];
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "timestamp,value").unwrap();
    for t in 0..cycles * 4 {
        let value = (100.0 + 2.0 * t as f64) * pattern[t % 4];
        writeln!(file, "2017-03-01T{:02}:00,{}", t % 24, value).unwrap();
    }
    file
}

#[test]
fn test_series_loader_from_csv() {
    let file = seasonal_csv(3);
    let series = SeriesLoader::new().load_csv(file.path()).unwrap();

    assert_eq!(series.len(), 12);
    assert_eq!(series[0], 120.0);
}

#[test]
fn test_series_loader_error_handling() {
    assert!(SeriesLoader::new().load_csv("nonexistent_file.csv").is_err());

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "invalid,csv,format").unwrap();
    assert!(SeriesLoader::new().load_csv(file.path()).is_err());
}

#[test]
fn test_holdout_pipeline_with_report() {
    let file = seasonal_csv(8);
    let series = SeriesLoader::new().load_csv(file.path()).unwrap();
    let (train, test) = holdout_split(&series, 4).unwrap();

    let mut model = TripleExponentialSmoothing::new(4).unwrap();
    let config = FitConfig::default().with_tolerance(0.01).with_max_workers(2);
    let best = model.fit_with_config(train, &config).unwrap().best;
    model.train(train, best.alpha, best.beta, best.gamma).unwrap();
    let forecast = model.forecast(4).unwrap();

    let score = HoldoutScore::new(&best, &forecast, test).unwrap();
    assert_eq!(score.horizon, 4);
    assert_eq!(score.fit_mse, best.mse);
    assert!(score.holdout_mse.is_finite());
    assert!(score.holdout_mae <= score.holdout_rmse() + 1e-9);

    let output = NamedTempFile::new().unwrap();
    write_report(None, output.path(), test, &forecast).unwrap();
    let html = fs::read_to_string(output.path()).unwrap();
    assert!(html.contains("const real = ["));
    assert!(!html.contains("[estimate]"));
}

#[test]
fn test_report_with_custom_template() {
    let mut template = NamedTempFile::new().unwrap();
    write!(template, "<p>[real]</p><p>[estimate]</p>").unwrap();
    let output = NamedTempFile::new().unwrap();

    write_report(Some(template.path()), output.path(), &[1.0, 2.0], &[1.5, 2.5]).unwrap();

    assert_eq!(
        fs::read_to_string(output.path()).unwrap(),
        "<p>[1.0,2.0]</p><p>[1.5,2.5]</p>"
    );
}

#[test]
fn test_config_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{ "tolerance": 0.0001, "max_workers": 2 }}"#).unwrap();

    let config = FitConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.tolerance, 0.0001);
    assert_eq!(config.worker_count(), 2);

    assert!(FitConfig::from_json_file("missing.json").is_err());
}

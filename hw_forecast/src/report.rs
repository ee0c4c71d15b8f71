//! HTML report comparing held-out values with a forecast
//!
//! Templates carry two placeholders, `[real]` and `[estimate]`, each
//! replaced by a JSON array of numbers.

use crate::error::{ForecastError, Result};
use std::fs;
use std::path::Path;

/// Placeholder for the actual values
pub const REAL_PLACEHOLDER: &str = "[real]";

/// Placeholder for the forecast values
pub const ESTIMATE_PLACEHOLDER: &str = "[estimate]";

/// Built-in template plotting both series as lines
pub const DEFAULT_TEMPLATE: &str = r##"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Holt-Winters forecast</title>
<script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
</head>
<body>
<canvas id="forecast"></canvas>
<script>
const real = [real];
const estimate = [estimate];
new Chart(document.getElementById("forecast"), {
  type: "line",
  data: {
    labels: real.map((_, i) => i),
    datasets: [
      { label: "real", data: real, borderColor: "#1f77b4", pointRadius: 0 },
      { label: "estimate", data: estimate, borderColor: "#ff7f0e", pointRadius: 0 }
    ]
  }
});
</script>
</body>
</html>
"##;

/// Substitute both series into `template`
pub fn render_report(template: &str, real: &[f64], estimate: &[f64]) -> Result<String> {
    if !template.contains(REAL_PLACEHOLDER) || !template.contains(ESTIMATE_PLACEHOLDER) {
        return Err(ForecastError::DataError(format!(
            "Template must contain both {} and {}",
            REAL_PLACEHOLDER, ESTIMATE_PLACEHOLDER
        )));
    }

    let real = serde_json::to_string(real)?;
    let estimate = serde_json::to_string(estimate)?;

    Ok(template
        .replace(REAL_PLACEHOLDER, &real)
        .replace(ESTIMATE_PLACEHOLDER, &estimate))
}

/// Render into `output`, using `template` or the built-in template
pub fn write_report<P: AsRef<Path>>(
    template: Option<&Path>,
    output: P,
    real: &[f64],
    estimate: &[f64],
) -> Result<()> {
    let template = match template {
        Some(path) => fs::read_to_string(path)?,
        None => DEFAULT_TEMPLATE.to_string(),
    };

    let html = render_report(&template, real, estimate)?;
    fs::write(output, html)?;
    Ok(())
}

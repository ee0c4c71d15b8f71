//! Narrowing grid search over smoothing coefficients
//!
//! Each round evaluates every point of a 3-D grid over (α, β, γ) on a
//! bounded worker pool, keeps the lowest in-sample MSE, re-centers the box
//! on it with a radius of one step and divides the step by ten. The search
//! stops after the first round whose step is at most the tolerance.
//!
//! Trials share only the read-only series and seeds. Their outcomes are
//! collected in grid order and reduced on the calling thread after the
//! round completes, so ties go to the earliest grid point (α-major, then
//! β, then γ).

use crate::config::FitConfig;
use crate::engine::{check_period, Seeds, SmoothingParams, SmoothingState};
use crate::error::{ForecastError, Result};
use rayon::prelude::*;
use rayon::ThreadPool;
use serde::{Deserialize, Serialize};
use smoothing_math::WindowedMse;
use tracing::{debug, info, warn};

/// Relative slack when comparing a decimal step against the tolerance
const STEP_EPSILON: f64 = 1e-9;

/// Best coefficients found and their in-sample MSE
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub mse: f64,
}

impl FitResult {
    fn new(params: SmoothingParams, mse: f64) -> Self {
        Self {
            alpha: params.alpha,
            beta: params.beta,
            gamma: params.gamma,
            mse,
        }
    }

    /// The winning coefficients
    pub fn params(&self) -> SmoothingParams {
        SmoothingParams {
            alpha: self.alpha,
            beta: self.beta,
            gamma: self.gamma,
        }
    }

    /// Strictly better score; NaN never beats a number and a number always beats NaN
    pub fn improves_on(&self, current: &FitResult) -> bool {
        self.mse < current.mse || (current.mse.is_nan() && !self.mse.is_nan())
    }
}

/// Axis-aligned box in (α, β, γ) space, always inside the unit cube
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchBox {
    pub lower: [f64; 3],
    pub upper: [f64; 3],
}

impl SearchBox {
    /// The full unit cube
    pub fn unit() -> Self {
        Self {
            lower: [0.0; 3],
            upper: [1.0; 3],
        }
    }

    /// Box of half-width `radius` around `center`, clamped to [0, 1]
    pub fn around(center: [f64; 3], radius: f64) -> Self {
        let mut lower = [0.0; 3];
        let mut upper = [1.0; 3];
        for axis in 0..3 {
            lower[axis] = (center[axis] - radius).clamp(0.0, 1.0);
            upper[axis] = (center[axis] + radius).clamp(0.0, 1.0);
        }
        Self { lower, upper }
    }

    /// Every grid point at `step`, bounds inclusive, α-major order
    pub fn grid(&self, step: f64) -> Vec<SmoothingParams> {
        let alphas = axis_points(self.lower[0], self.upper[0], step);
        let betas = axis_points(self.lower[1], self.upper[1], step);
        let gammas = axis_points(self.lower[2], self.upper[2], step);

        let mut points = Vec::with_capacity(alphas.len() * betas.len() * gammas.len());
        for &alpha in &alphas {
            for &beta in &betas {
                for &gamma in &gammas {
                    points.push(SmoothingParams { alpha, beta, gamma });
                }
            }
        }
        points
    }
}

fn axis_points(lower: f64, upper: f64, step: f64) -> Vec<f64> {
    let intervals = ((upper - lower) / step).round() as usize;
    (0..=intervals)
        .map(|k| {
            if k == intervals {
                upper
            } else {
                (lower + k as f64 * step).min(upper)
            }
        })
        .collect()
}

/// Outcome of one search round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: usize,
    pub step: f64,
    pub search_box: SearchBox,
    pub trials: usize,
    /// Best result so far, including earlier rounds
    pub best: FitResult,
}

/// Final result of a search with its per-round history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    pub best: FitResult,
    pub rounds: Vec<RoundSummary>,
}

/// Parameter search over one training series
#[derive(Debug)]
pub struct ParameterSearch<'a> {
    series: &'a [f64],
    period: usize,
    seeds: Seeds,
    config: FitConfig,
}

impl<'a> ParameterSearch<'a> {
    /// Validate inputs and estimate the seeds every trial starts from
    pub fn new(series: &'a [f64], period: usize, config: FitConfig) -> Result<Self> {
        config.validate()?;
        check_period(series, period)?;
        if series.len() <= period + 2 {
            return Err(ForecastError::InsufficientData(format!(
                "Scoring with period {} needs more than {} observations, have {}",
                period,
                period + 2,
                series.len()
            )));
        }

        let seeds = Seeds::estimate(series, period)?;

        Ok(Self {
            series,
            period,
            seeds,
            config,
        })
    }

    /// In-sample one-step-ahead MSE for `params`
    ///
    /// Numeric failures score as NaN so they can never win a round.
    pub fn trial(&self, params: SmoothingParams) -> f64 {
        let series = self.series;
        let mut score = WindowedMse::new(self.period);
        let run = SmoothingState::run(series, self.period, params, &self.seeds, |i, p| {
            score.push(i, series[i], p)
        });
        if let Err(err) = run {
            debug!(?params, %err, "trial failed");
            return f64::NAN;
        }

        score.finish().unwrap_or(f64::NAN)
    }

    /// Run rounds until the step reaches the tolerance
    pub fn run(&self) -> Result<FitReport> {
        let workers = self.config.worker_count();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()?;

        let mut search_box = SearchBox::unit();
        let mut best: Option<FitResult> = None;
        let mut rounds = Vec::new();

        for round in 0.. {
            let step = self.config.initial_step / 10f64.powi(round as i32);
            let grid = search_box.grid(step);
            let trials = find_best(&pool, &grid, |params| self.trial(params), &mut best);

            let Some(current) = best else {
                return Err(ForecastError::InsufficientData(
                    "Search grid produced no candidates".to_string(),
                ));
            };

            debug!(
                round,
                step,
                trials,
                alpha = current.alpha,
                beta = current.beta,
                gamma = current.gamma,
                mse = current.mse,
                "search round complete"
            );
            if !current.mse.is_finite() {
                warn!(round, step, "no trial produced a finite MSE");
            }

            rounds.push(RoundSummary {
                round,
                step,
                search_box,
                trials,
                best: current,
            });

            if step <= self.config.tolerance * (1.0 + STEP_EPSILON) {
                break;
            }
            search_box = SearchBox::around(current.params().as_array(), step);
        }

        let best = rounds
            .last()
            .map(|summary| summary.best)
            .ok_or_else(|| ForecastError::InsufficientData("Search ran no rounds".to_string()))?;

        info!(
            rounds = rounds.len(),
            workers,
            alpha = best.alpha,
            beta = best.beta,
            gamma = best.gamma,
            mse = best.mse,
            "parameter search finished"
        );

        Ok(FitReport { best, rounds })
    }
}

/// Evaluate `grid` on `pool` and fold the outcomes into `best` in grid order
///
/// Returns the number of trials run.
fn find_best<F>(
    pool: &ThreadPool,
    grid: &[SmoothingParams],
    evaluate: F,
    best: &mut Option<FitResult>,
) -> usize
where
    F: Fn(SmoothingParams) -> f64 + Sync,
{
    let outcomes: Vec<FitResult> = pool.install(|| {
        grid.par_iter()
            .map(|&params| FitResult::new(params, evaluate(params)))
            .collect()
    });

    for candidate in &outcomes {
        let replace = match best {
            Some(current) => candidate.improves_on(current),
            None => true,
        };
        if replace {
            *best = Some(*candidate);
        }
    }

    outcomes.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SERIES: [f64; 24] = [
        362.0, 385.0, 432.0, 341.0, 382.0, 409.0, 498.0, 387.0, 473.0, 513.0, 582.0, 474.0, 544.0,
        582.0, 681.0, 557.0, 628.0, 707.0, 773.0, 592.0, 627.0, 725.0, 854.0, 661.0,
    ];

    fn result(mse: f64) -> FitResult {
        FitResult {
            alpha: 0.5,
            beta: 0.5,
            gamma: 0.5,
            mse,
        }
    }

    #[test]
    fn test_improves_on_handles_nan() {
        assert!(result(1.0).improves_on(&result(2.0)));
        assert!(!result(2.0).improves_on(&result(2.0)));
        assert!(!result(f64::NAN).improves_on(&result(5.0)));
        assert!(result(5.0).improves_on(&result(f64::NAN)));
        assert!(!result(f64::NAN).improves_on(&result(f64::NAN)));
        assert!(result(1e300).improves_on(&result(f64::INFINITY)));
    }

    #[test]
    fn test_unit_grid() {
        let grid = SearchBox::unit().grid(0.1);
        assert_eq!(grid.len(), 11 * 11 * 11);
        assert_eq!(grid[0].as_array(), [0.0, 0.0, 0.0]);
        assert_eq!(grid[1].as_array()[2], 0.1);
        assert_eq!(grid[grid.len() - 1].as_array(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_box_around_is_clamped() {
        let search_box = SearchBox::around([0.0, 0.5, 1.0], 0.1);
        assert_eq!(search_box.lower[0], 0.0);
        assert_relative_eq!(search_box.upper[0], 0.1);
        assert_relative_eq!(search_box.lower[1], 0.4);
        assert_relative_eq!(search_box.upper[1], 0.6);
        assert_relative_eq!(search_box.lower[2], 0.9);
        assert_eq!(search_box.upper[2], 1.0);

        // 11 points on a clamped axis, 21 on a full one
        let grid = search_box.grid(0.01);
        assert_eq!(grid.len(), 11 * 21 * 11);
        assert!(grid
            .iter()
            .all(|p| p.as_array().iter().all(|v| (0.0..=1.0).contains(v))));
    }

    #[test]
    fn test_round_count_and_steps() {
        let config = FitConfig::default()
            .with_tolerance(0.001)
            .with_max_workers(2);
        let report = ParameterSearch::new(&SERIES, 4, config)
            .unwrap()
            .run()
            .unwrap();

        let steps: Vec<f64> = report.rounds.iter().map(|r| r.step).collect();
        assert_eq!(steps.len(), 3);
        assert_relative_eq!(steps[0], 0.1);
        assert_relative_eq!(steps[1], 0.01);
        assert_relative_eq!(steps[2], 0.001);
        assert_eq!(report.rounds[0].trials, 1331);
    }

    #[test]
    fn test_trial_matches_reduction() {
        let search = ParameterSearch::new(&SERIES, 4, FitConfig::default().with_tolerance(0.1))
            .unwrap();
        let report = search.run().unwrap();

        assert_eq!(report.rounds.len(), 1);
        assert_eq!(report.best.mse, search.trial(report.best.params()));
        assert!(report.best.mse.is_finite());
    }

    fn pool(threads: usize) -> ThreadPool {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
    }

    #[test]
    fn test_find_best_skips_nan_trials() {
        let grid = SearchBox::unit().grid(0.5);
        // Every point with alpha below one fails; the rest score by gamma
        let evaluate = |p: SmoothingParams| {
            if p.alpha < 1.0 {
                f64::NAN
            } else {
                1.0 + p.gamma
            }
        };

        let mut best = None;
        let trials = find_best(&pool(3), &grid, evaluate, &mut best);

        assert_eq!(trials, 27);
        let best = best.unwrap();
        assert_eq!(best.params().as_array(), [1.0, 0.0, 0.0]);
        assert_eq!(best.mse, 1.0);
    }

    #[test]
    fn test_find_best_keeps_earlier_finite_best() {
        let grid = SearchBox::unit().grid(0.5);
        let mut best = Some(result(7.0));

        find_best(&pool(2), &grid, |_| f64::NAN, &mut best);
        assert_eq!(best, Some(result(7.0)));

        // A later finite score still replaces it when lower
        find_best(&pool(2), &grid, |p| if p.beta == 0.5 { 3.0 } else { f64::NAN }, &mut best);
        let best = best.unwrap();
        assert_eq!(best.mse, 3.0);
        assert_eq!(best.params().as_array(), [0.0, 0.5, 0.0]);
    }

    #[test]
    fn test_find_best_all_nan_takes_first_point() {
        let grid = SearchBox::unit().grid(0.5);
        let mut best = None;
        find_best(&pool(4), &grid, |_| f64::NAN, &mut best);

        let best = best.unwrap();
        assert!(best.mse.is_nan());
        assert_eq!(best.params().as_array(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_find_best_ties_go_to_first_grid_point() {
        let grid = SearchBox::unit().grid(0.5);
        let mut best = None;
        find_best(&pool(4), &grid, |p| if p.alpha > 0.0 { 2.0 } else { 5.0 }, &mut best);

        assert_eq!(best.unwrap().params().as_array(), [0.5, 0.0, 0.0]);
    }

    #[test]
    fn test_trial_matches_direct_scoring() {
        let search = ParameterSearch::new(&SERIES, 4, FitConfig::default()).unwrap();
        let params = SmoothingParams::new(0.3, 0.6, 0.2).unwrap();

        let mut predicted = vec![0.0; SERIES.len()];
        SmoothingState::run(&SERIES, 4, params, &search.seeds, |i, p| predicted[i] = p).unwrap();

        assert_eq!(
            search.trial(params),
            smoothing_math::mse(&SERIES, &predicted, 4).unwrap()
        );
    }

    #[test]
    fn test_rejects_short_series() {
        let short = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert!(matches!(
            ParameterSearch::new(&short, 4, FitConfig::default()),
            Err(ForecastError::InvalidPeriod(_))
        ));
        assert!(matches!(
            ParameterSearch::new(&short[..4], 2, FitConfig::default()),
            Err(ForecastError::InsufficientData(_))
        ));
        assert!(matches!(
            ParameterSearch::new(&SERIES, 4, FitConfig::default().with_tolerance(0.0)),
            Err(ForecastError::InvalidConfig(_))
        ));
    }
}

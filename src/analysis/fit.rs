use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::analysis::curves::CurveModel;
use crate::error::DashboardError;

/// Multiplicative step applied to the damping factor on reject/accept.
const DAMPING_STEP: f64 = 10.0;
/// Damping ceiling; exceeding it means the search surface offers no
/// improving direction and the fit is declared non-convergent.
const MAX_DAMPING: f64 = 1e12;
/// Floor for diagonal scaling so flat parameters still receive damping.
const DIAG_FLOOR: f64 = 1e-12;

/// Tuning knobs for the least-squares optimizer.
#[derive(Debug, Clone)]
pub struct FitOptions {
    pub max_iterations: usize,
    /// Relative cost-decrease threshold that counts as converged.
    pub tolerance: f64,
    pub initial_damping: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            tolerance: 1e-10,
            initial_damping: 1e-3,
        }
    }
}

/// A successful fit: optimized parameters and the full-horizon projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitOutcome {
    pub model: CurveModel,
    pub params: Vec<f64>,
    /// Model evaluated over `0..forecast_span`, extending past the training
    /// window into the forecast horizon.
    pub projection: Vec<f64>,
    pub residual_sum_squares: f64,
    pub iterations: usize,
}

/// Fit `model` to the training window by nonlinear least squares and project
/// it over `[0, forecast_span)`.
///
/// Levenberg-Marquardt with a forward-difference Jacobian. Each invocation is
/// an independent optimization starting from `guess`; there are no retries.
/// Non-convergence is an `Err`, never a panic — callers fit several models
/// per render and continue with whichever succeeded.
pub fn fit_curve(
    model: CurveModel,
    x_train: &[f64],
    y_train: &[f64],
    guess: &[f64],
    forecast_span: usize,
) -> Result<FitOutcome, DashboardError> {
    fit_curve_with(model, x_train, y_train, guess, forecast_span, &FitOptions::default())
}

/// [`fit_curve`] with explicit optimizer options.
pub fn fit_curve_with(
    model: CurveModel,
    x_train: &[f64],
    y_train: &[f64],
    guess: &[f64],
    forecast_span: usize,
    options: &FitOptions,
) -> Result<FitOutcome, DashboardError> {
    let k = model.param_count();
    if x_train.len() != y_train.len() {
        return Err(DashboardError::ValidationError(format!(
            "Training window lengths differ: {} x values vs {} y values",
            x_train.len(),
            y_train.len()
        )));
    }
    if guess.len() != k {
        return Err(DashboardError::ValidationError(format!(
            "{} model takes {} parameters, guess has {}",
            model.label(),
            k,
            guess.len()
        )));
    }
    if x_train.len() < k {
        return Err(DashboardError::InsufficientData(format!(
            "{} model needs at least {} points, window has {}",
            model.label(),
            k,
            x_train.len()
        )));
    }

    let mut params = guess.to_vec();
    let mut rss = residual_sum_squares(model, x_train, y_train, &params);
    if !rss.is_finite() {
        return Err(DashboardError::FitNonConvergence(format!(
            "{}: initial guess produces non-finite residuals",
            model.label()
        )));
    }

    let mut lambda = options.initial_damping;
    let mut converged = false;
    let mut iterations = 0;

    for iter in 0..options.max_iterations {
        iterations = iter + 1;

        let r = residual_vector(model, x_train, y_train, &params);
        let j = jacobian(model, x_train, &params);
        let jtj = j.transpose() * &j;
        let jtr = j.transpose() * &r;

        // Damping adjustment: retry with stronger damping until a step
        // improves the cost or the ceiling is hit.
        loop {
            let mut damped = jtj.clone();
            for i in 0..k {
                let scale = damped[(i, i)].abs().max(DIAG_FLOOR);
                damped[(i, i)] += lambda * scale;
            }

            if let Some(step) = damped.lu().solve(&jtr) {
                let candidate: Vec<f64> = params
                    .iter()
                    .zip(step.iter())
                    .map(|(p, d)| p + d)
                    .collect();
                let candidate_rss =
                    residual_sum_squares(model, x_train, y_train, &candidate);

                if candidate_rss.is_finite() && candidate_rss < rss {
                    let improvement = rss - candidate_rss;
                    params = candidate;
                    rss = candidate_rss;
                    lambda = (lambda / DAMPING_STEP).max(1e-12);
                    if improvement <= options.tolerance * (rss + options.tolerance) {
                        converged = true;
                    }
                    break;
                }
            }

            lambda *= DAMPING_STEP;
            if lambda > MAX_DAMPING {
                // No improving direction left. A vanished gradient means the
                // optimum was reached; anything else is a failed fit.
                if jtr.amax() <= 1e-6 * (1.0 + rss) {
                    converged = true;
                    break;
                }
                return Err(DashboardError::FitNonConvergence(format!(
                    "{}: no improving step found after {} iterations",
                    model.label(),
                    iterations
                )));
            }
        }

        if converged {
            break;
        }
    }

    if !converged {
        return Err(DashboardError::FitNonConvergence(format!(
            "{}: stopping criterion not met within {} iterations",
            model.label(),
            options.max_iterations
        )));
    }

    let projection = (0..forecast_span)
        .map(|x| model.eval(x as f64, &params))
        .collect();

    Ok(FitOutcome {
        model,
        params,
        projection,
        residual_sum_squares: rss,
        iterations,
    })
}

fn residual_vector(model: CurveModel, x: &[f64], y: &[f64], params: &[f64]) -> DVector<f64> {
    DVector::from_iterator(
        x.len(),
        x.iter()
            .zip(y.iter())
            .map(|(xi, yi)| yi - model.eval(*xi, params)),
    )
}

fn residual_sum_squares(model: CurveModel, x: &[f64], y: &[f64], params: &[f64]) -> f64 {
    x.iter()
        .zip(y.iter())
        .map(|(xi, yi)| {
            let r = yi - model.eval(*xi, params);
            r * r
        })
        .sum()
}

/// Forward-difference Jacobian of the model with respect to its parameters.
fn jacobian(model: CurveModel, x: &[f64], params: &[f64]) -> DMatrix<f64> {
    let n = x.len();
    let k = params.len();
    // sqrt of machine epsilon, the usual forward-difference step scale
    let eps = f64::EPSILON.sqrt();

    let base: Vec<f64> = x.iter().map(|xi| model.eval(*xi, params)).collect();
    let mut j = DMatrix::zeros(n, k);

    for col in 0..k {
        let h = eps * params[col].abs().max(1.0);
        let mut bumped = params.to_vec();
        bumped[col] += h;
        for row in 0..n {
            j[(row, col)] = (model.eval(x[row], &bumped) - base[row]) / h;
        }
    }
    j
}

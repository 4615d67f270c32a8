use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, OrderStatistics};

/// Window size (in days) at or below which early-stage data is assumed to be
/// pre-inflection, making the exponential model the better-determined choice.
pub const EXPONENTIAL_WINDOW_LIMIT: usize = 18;

/// A growth-curve family the fitting engine can optimize.
///
/// A closed set rather than arbitrary callables: each variant knows its
/// parameter count, evaluation rule, and initial-guess heuristic, so callers
/// select a model explicitly instead of passing loose function pointers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveModel {
    /// `y = a * exp(b * x) + c` — unconstrained growth, pre-inflection data.
    Exponential,
    /// `y = L / (1 + exp(-k * (x - x0))) + b` — bounded S-curve.
    Logistic,
    /// `y = a / (1 + exp(-k * (x - x0)))` — 3-parameter bounded fallback for
    /// when the offset logistic is numerically unstable.
    Sigmoid,
}

impl CurveModel {
    /// Number of free parameters.
    pub fn param_count(&self) -> usize {
        match self {
            CurveModel::Exponential => 3,
            CurveModel::Logistic => 4,
            CurveModel::Sigmoid => 3,
        }
    }

    /// Label used in series names and fit-failure messages.
    pub fn label(&self) -> &'static str {
        match self {
            CurveModel::Exponential => "exponential",
            CurveModel::Logistic => "logistic",
            CurveModel::Sigmoid => "sigmoid",
        }
    }

    /// Evaluate the model at `x` with the given parameter vector.
    ///
    /// # Panics
    /// Panics if `params.len() != self.param_count()`. The fitting engine
    /// sizes parameter vectors from the model, so this indicates a caller bug.
    pub fn eval(&self, x: f64, params: &[f64]) -> f64 {
        assert_eq!(params.len(), self.param_count(), "parameter vector size");
        match self {
            CurveModel::Exponential => params[0] * (params[1] * x).exp() + params[2],
            CurveModel::Logistic => {
                params[0] / (1.0 + (-params[2] * (x - params[1])).exp()) + params[3]
            }
            CurveModel::Sigmoid => params[0] / (1.0 + (-params[2] * (x - params[1])).exp()),
        }
    }

    /// Initial-guess heuristic, computed from the full series.
    ///
    /// Exponential starts from a near-flat curve; the bounded models guess
    /// the asymptote from the observed maximum, the inflection point from the
    /// median day index, and the offset from the observed minimum.
    pub fn initial_guess(&self, x_full: &[f64], y_full: &[f64]) -> Vec<f64> {
        match self {
            CurveModel::Exponential => vec![1.0, 1e-6, 1.0],
            CurveModel::Logistic => vec![
                max_of(y_full),
                median_of(x_full),
                1.0,
                min_of(y_full),
            ],
            CurveModel::Sigmoid => vec![max_of(y_full), median_of(x_full), 1.0],
        }
    }

    /// The model preferred for a training window of `window` days.
    ///
    /// Short windows carry no visible inflection point, so an S-curve is
    /// under-determined and the exponential wins; longer windows prefer the
    /// logistic.
    pub fn preferred_for_window(window: usize) -> CurveModel {
        if window <= EXPONENTIAL_WINDOW_LIMIT {
            CurveModel::Exponential
        } else {
            CurveModel::Logistic
        }
    }
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn median_of(values: &[f64]) -> f64 {
    Data::new(values.to_vec()).median()
}

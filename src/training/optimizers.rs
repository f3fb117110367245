//! Parameter-estimation strategies for the binary logistic model
//!
//! Three variants share one iteration loop and differ only in the step
//! formula: batch gradient descent, Newton-Raphson, and L2-regularized batch
//! gradient descent. Every variant runs its full iteration count; there is no
//! convergence-based stopping. A learning rate that is too large diverges
//! silently; choosing a stable one is the caller's responsibility.

use super::linalg;
use crate::error::{LogRegError, Result};
use crate::metrics::{average_log_likelihood, sigmoid};
use ndarray::{Array1, Array2};
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const VARIANT_USAGE: &str =
    "0 - batch gradient descent, 1 - Newton-Raphson method, 2 - regularized batch gradient";

/// Optimizer variant selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptimizerKind {
    /// Full-batch gradient descent with a fixed learning rate
    BatchGradient,
    /// Newton-Raphson with an inverse-Hessian step (no learning rate)
    Newton,
    /// Batch gradient descent with an L2 penalty on the coefficients
    RegularizedGradient,
}

impl OptimizerKind {
    /// Map a variant index {0, 1, 2} to a kind. Anything else reports the
    /// three valid choices.
    pub fn from_index(index: u8) -> Result<Self> {
        match index {
            0 => Ok(OptimizerKind::BatchGradient),
            1 => Ok(OptimizerKind::Newton),
            2 => Ok(OptimizerKind::RegularizedGradient),
            other => Err(LogRegError::InvalidParameter {
                name: "optimizer variant".to_string(),
                value: other.to_string(),
                reason: format!("valid choices are {}", VARIANT_USAGE),
            }),
        }
    }

    /// Numeric index used in the prediction output file name
    pub fn index(&self) -> u8 {
        match self {
            OptimizerKind::BatchGradient => 0,
            OptimizerKind::Newton => 1,
            OptimizerKind::RegularizedGradient => 2,
        }
    }

    /// Human-readable optimizer name
    pub fn name(&self) -> &'static str {
        match self {
            OptimizerKind::BatchGradient => "batch gradient descent",
            OptimizerKind::Newton => "Newton-Raphson",
            OptimizerKind::RegularizedGradient => "regularized batch gradient",
        }
    }
}

impl fmt::Display for OptimizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OptimizerKind {
    type Err = LogRegError;

    fn from_str(s: &str) -> Result<Self> {
        let index: u8 = s.parse().map_err(|_| LogRegError::InvalidParameter {
            name: "optimizer variant".to_string(),
            value: s.to_string(),
            reason: format!("valid choices are {}", VARIANT_USAGE),
        })?;
        Self::from_index(index)
    }
}

/// Hyperparameters shared by the optimizer variants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Step size for the gradient variants (ignored by Newton-Raphson)
    pub learning_rate: f64,
    /// Fixed iteration count; every variant runs exactly this many steps
    pub num_iter: usize,
    /// L2 strength for the regularized variant (ignored by the others)
    pub lambda: f64,
    /// Log the diagnostic log-likelihood every 1000th Newton iteration
    pub verbose: bool,
    /// Seed for the coefficient initialization; `None` falls back to 42
    pub random_state: Option<u64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.003,
            num_iter: 10_000,
            lambda: 9.2,
            verbose: true,
            random_state: Some(42),
        }
    }
}

impl TrainConfig {
    pub fn with_learning_rate(mut self, lr: f64) -> Self {
        self.learning_rate = lr;
        self
    }

    pub fn with_num_iter(mut self, num_iter: usize) -> Self {
        self.num_iter = num_iter;
        self
    }

    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }
}

/// Fit coefficients on an augmented design matrix.
///
/// Coefficients start uniform in [0, 1) from the seeded generator, fresh per
/// call — there is no warm start. Returns the final coefficient vector after
/// exactly `config.num_iter` steps.
pub fn fit(
    kind: OptimizerKind,
    x: &Array2<f64>,
    y: &Array1<f64>,
    config: &TrainConfig,
) -> Result<Array1<f64>> {
    if x.nrows() != y.len() {
        return Err(LogRegError::ShapeError {
            expected: format!("{} labels", x.nrows()),
            actual: format!("{} labels", y.len()),
        });
    }
    validate_config(kind, config)?;

    let p = x.ncols();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(config.random_state.unwrap_or(42));
    let mut beta = Array1::from_shape_fn(p, |_| rng.gen::<f64>());

    for iter in 0..config.num_iter {
        beta = match kind {
            OptimizerKind::BatchGradient => gradient_step(x, y, &beta, config.learning_rate, 0.0),
            OptimizerKind::RegularizedGradient => {
                gradient_step(x, y, &beta, config.learning_rate, config.lambda)
            }
            OptimizerKind::Newton => newton_step(x, y, &beta)?,
        };

        if config.verbose && kind == OptimizerKind::Newton && iter % 1000 == 0 {
            tracing::info!(
                iteration = iter,
                avg_log_likelihood = average_log_likelihood(x, y, &beta),
                "newton diagnostic"
            );
        }
    }

    Ok(beta)
}

fn validate_config(kind: OptimizerKind, config: &TrainConfig) -> Result<()> {
    if config.num_iter == 0 {
        return Err(LogRegError::InvalidParameter {
            name: "num_iter".to_string(),
            value: "0".to_string(),
            reason: "iteration count must be positive".to_string(),
        });
    }
    let needs_lr = matches!(
        kind,
        OptimizerKind::BatchGradient | OptimizerKind::RegularizedGradient
    );
    if needs_lr && config.learning_rate <= 0.0 {
        return Err(LogRegError::InvalidParameter {
            name: "learning_rate".to_string(),
            value: config.learning_rate.to_string(),
            reason: "learning rate must be positive".to_string(),
        });
    }
    if kind == OptimizerKind::RegularizedGradient && config.lambda < 0.0 {
        return Err(LogRegError::InvalidParameter {
            name: "lambda".to_string(),
            value: config.lambda.to_string(),
            reason: "regularization strength must be non-negative".to_string(),
        });
    }
    Ok(())
}

/// One batch-gradient step; `lambda` = 0 degenerates to the plain variant.
/// Gradient is `X^T (p_hat - y) - 2 lambda beta`, update `beta - lr * g`.
fn gradient_step(
    x: &Array2<f64>,
    y: &Array1<f64>,
    beta: &Array1<f64>,
    lr: f64,
    lambda: f64,
) -> Array1<f64> {
    let p_hat = sigmoid(&x.dot(beta));
    let residual = &p_hat - y;
    let mut grad = x.t().dot(&residual);
    if lambda > 0.0 {
        grad -= &(beta * (2.0 * lambda));
    }
    beta - &(&grad * lr)
}

/// One Newton-Raphson step.
///
/// The Hessian is `I - (X^T X) * (p_hat . (1 - p_hat))`: the identity minus
/// the Gram matrix scaled by a single curvature scalar. The curvature enters
/// as one scalar rather than the textbook per-row `X^T W X` weighting, and
/// downstream consumers depend on that exact update.
fn newton_step(x: &Array2<f64>, y: &Array1<f64>, beta: &Array1<f64>) -> Result<Array1<f64>> {
    let p = x.ncols();
    let p_hat = sigmoid(&x.dot(beta));
    let ascent = y - &p_hat;
    let grad = x.t().dot(&ascent);

    let curvature = p_hat.dot(&p_hat.mapv(|v| 1.0 - v));
    let gram = x.t().dot(x);
    let mut hessian: Array2<f64> = Array2::eye(p);
    hessian -= &(&gram * curvature);

    let inverse = linalg::invert(&hessian).ok_or_else(|| {
        LogRegError::ComputationError("singular Hessian, cannot invert".to_string())
    })?;

    Ok(beta - &inverse.dot(&grad))
}

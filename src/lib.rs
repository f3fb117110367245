//! Binary logistic regression on labeled tabular data
//!
//! Fits a two-class logistic classifier and evaluates it on a held-out set.
//! Three parameter-estimation strategies share one training loop:
//! batch gradient descent, Newton-Raphson, and L2-regularized batch gradient
//! descent. All run a fixed iteration count; there is no convergence-based
//! stopping.
//!
//! # Modules
//!
//! - [`metrics`] - sigmoid, diagnostic log-likelihood, accuracy
//! - [`preprocessing`] - design-matrix augmentation and pooled z-score scaling
//! - [`training`] - the optimizer strategies
//! - [`data`] - CSV loading and the prediction dump
//! - [`estimator`] - the load/normalize/train/predict façade
//! - [`cli`] - command-line interface

pub mod error;

pub mod data;
pub mod estimator;
pub mod metrics;
pub mod preprocessing;
pub mod training;

pub mod cli;

pub use error::{LogRegError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::data::{Dataset, LABEL_COLUMN};
    pub use crate::error::{LogRegError, Result};
    pub use crate::estimator::LogisticRegression;
    pub use crate::metrics::{accuracy, average_log_likelihood, sigmoid};
    pub use crate::preprocessing::{add_intercept_column, PooledStandardScaler};
    pub use crate::training::{fit, OptimizerKind, TrainConfig};
}

//! Model training module
//!
//! Three optimizer strategies behind a single loop skeleton:
//! - batch gradient descent
//! - Newton-Raphson (inverse-Hessian steps)
//! - L2-regularized batch gradient descent

mod linalg;
mod optimizers;

pub use optimizers::{fit, OptimizerKind, TrainConfig};

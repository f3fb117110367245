//! Estimator façade
//!
//! Owns the train/test tables and walks the fixed lifecycle:
//! load -> (optional) normalize -> train -> predict. Fully synchronous and
//! single-threaded; coefficients are created fresh per training run and
//! handed to the caller.

use crate::data::{self, Dataset};
use crate::error::{LogRegError, Result};
use crate::metrics::{accuracy, average_log_likelihood, sigmoid};
use crate::preprocessing::{add_intercept_column, PooledStandardScaler};
use crate::training::{self, OptimizerKind, TrainConfig};
use ndarray::Array1;
use std::path::{Path, PathBuf};

/// Binary logistic regression over a train/test pair of CSV sources
#[derive(Debug)]
pub struct LogisticRegression {
    config: TrainConfig,
    train_set: Option<Dataset>,
    test_set: Option<Dataset>,
    is_normalized: bool,
    last_kind: Option<OptimizerKind>,
    output_dir: PathBuf,
}

impl LogisticRegression {
    /// Create an estimator with the given hyperparameters.
    /// Predictions are dumped under `output/` unless overridden.
    pub fn new(config: TrainConfig) -> Self {
        Self {
            config,
            train_set: None,
            test_set: None,
            is_normalized: false,
            last_kind: None,
            output_dir: PathBuf::from("output"),
        }
    }

    /// Override the directory receiving the prediction dump
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Populate train and test tables from two CSV sources. Both must carry
    /// the reserved `y` label column and an identical feature column set.
    pub fn load(&mut self, train_path: &str, test_path: &str) -> Result<&mut Self> {
        let train_set = data::load_dataset(train_path)?;
        let test_set = data::load_dataset(test_path)?;

        if train_set.feature_names != test_set.feature_names {
            return Err(LogRegError::DataError(format!(
                "train and test feature columns differ: {:?} vs {:?}",
                train_set.feature_names, test_set.feature_names
            )));
        }

        tracing::debug!(
            train_rows = train_set.n_rows(),
            test_rows = test_set.n_rows(),
            n_features = train_set.n_features(),
            "loaded data"
        );

        self.train_set = Some(train_set);
        self.test_set = Some(test_set);
        self.is_normalized = false;
        Ok(self)
    }

    /// Apply pooled z-score normalization in place to both tables.
    /// Statistics come from the union of train and test rows so the two
    /// tables stay on an identical scale.
    pub fn normalize(&mut self) -> Result<&mut Self> {
        let (train_set, test_set) = match (&self.train_set, &self.test_set) {
            (Some(tr), Some(te)) => (tr, te),
            _ => {
                return Err(LogRegError::DataError(
                    "no data loaded; call load() before normalize()".to_string(),
                ))
            }
        };

        let mut scaler = PooledStandardScaler::new();
        scaler.fit(&[&train_set.features, &test_set.features])?;
        let train_scaled = scaler.transform(&train_set.features)?;
        let test_scaled = scaler.transform(&test_set.features)?;

        self.train_set.as_mut().unwrap().features = train_scaled;
        self.test_set.as_mut().unwrap().features = test_scaled;
        self.is_normalized = true;
        Ok(self)
    }

    /// Fit coefficients with the selected optimizer and return them.
    /// The training features are intercept-augmented first; the resulting
    /// vector and the diagnostic log-likelihood are logged.
    pub fn train(&mut self, kind: OptimizerKind) -> Result<Array1<f64>> {
        let train_set = self.train_set.as_ref().ok_or_else(|| {
            LogRegError::DataError("no data loaded; call load() before train()".to_string())
        })?;

        self.last_kind = Some(kind);
        let design = add_intercept_column(&train_set.features);
        let beta = training::fit(kind, &design, &train_set.labels, &self.config)?;

        tracing::info!(
            optimizer = kind.name(),
            coefficients = ?beta.to_vec(),
            avg_log_likelihood = average_log_likelihood(&design, &train_set.labels, &beta),
            "training finished"
        );

        Ok(beta)
    }

    /// Diagnostic average log-likelihood of a coefficient vector on the
    /// (augmented) training set
    pub fn training_log_likelihood(&self, beta: &Array1<f64>) -> Result<f64> {
        let train_set = self.train_set.as_ref().ok_or_else(|| {
            LogRegError::DataError("no data loaded; call load() first".to_string())
        })?;
        let design = add_intercept_column(&train_set.features);
        self.check_beta_width(beta, design.ncols())?;
        Ok(average_log_likelihood(&design, &train_set.labels, beta))
    }

    /// Threshold `sigma(X beta) >= 0.5` on the augmented test features,
    /// write the prediction dump, and return the test accuracy.
    pub fn predict(&self, beta: &Array1<f64>) -> Result<f64> {
        let test_set = self.test_set.as_ref().ok_or_else(|| {
            LogRegError::DataError("no data loaded; call load() before predict()".to_string())
        })?;
        if self.last_kind.is_none() {
            return Err(LogRegError::TrainingError(
                "no training run recorded; call train() before predict()".to_string(),
            ));
        }

        let design = add_intercept_column(&test_set.features);
        self.check_beta_width(beta, design.ncols())?;

        let probabilities = sigmoid(&design.dot(beta));
        let predicted = probabilities.mapv(|p| if p >= 0.5 { 1.0 } else { 0.0 });

        let path = self.output_path();
        data::write_predictions(&path, &test_set.labels, &predicted)?;
        tracing::info!(path = %path.display(), "wrote predictions");

        Ok(accuracy(&predicted, &test_set.labels))
    }

    /// Deterministic dump location: combines the last optimizer variant index
    /// and the normalization flag
    pub fn output_path(&self) -> PathBuf {
        let variant = self
            .last_kind
            .map(|k| k.index().to_string())
            .unwrap_or_else(|| "x".to_string());
        let normalized = if self.is_normalized { 1 } else { 0 };
        self.output_dir.join(format!(
            "logistic-regression-output_{}_{}.txt",
            variant, normalized
        ))
    }

    /// Whether pooled z-score normalization has been applied
    pub fn is_normalized(&self) -> bool {
        self.is_normalized
    }

    /// The loaded training table, if any
    pub fn train_set(&self) -> Option<&Dataset> {
        self.train_set.as_ref()
    }

    /// The loaded test table, if any
    pub fn test_set(&self) -> Option<&Dataset> {
        self.test_set.as_ref()
    }

    fn check_beta_width(&self, beta: &Array1<f64>, expected: usize) -> Result<()> {
        if beta.len() != expected {
            return Err(LogRegError::ShapeError {
                expected: format!("{} coefficients", expected),
                actual: format!("{} coefficients", beta.len()),
            });
        }
        Ok(())
    }
}

impl LogisticRegression {
    /// Convenience constructor for tests and callers that already hold
    /// in-memory tables
    pub fn from_datasets(config: TrainConfig, train_set: Dataset, test_set: Dataset) -> Self {
        let mut estimator = Self::new(config);
        estimator.train_set = Some(train_set);
        estimator.test_set = Some(test_set);
        estimator
    }
}

/// Check that a path exists and is readable before handing it to the loader
pub fn ensure_readable(path: &str) -> Result<()> {
    if !Path::new(path).is_file() {
        return Err(LogRegError::DataError(format!("{} is not a readable file", path)));
    }
    Ok(())
}

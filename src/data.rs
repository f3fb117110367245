//! Tabular data loading and prediction output
//!
//! CSV sources carry a reserved label column [`LABEL_COLUMN`] plus any number
//! of named numeric feature columns; loading splits the label out and hands
//! the rest to the numeric layer as an `ndarray` matrix.

use crate::error::{LogRegError, Result};
use ndarray::{Array1, Array2};
use polars::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Reserved name of the label column in every data source
pub const LABEL_COLUMN: &str = "y";

/// An in-memory labeled table: features, labels, and feature column names
/// in source order.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub features: Array2<f64>,
    pub labels: Array1<f64>,
    pub feature_names: Vec<String>,
}

impl Dataset {
    /// Number of observations
    pub fn n_rows(&self) -> usize {
        self.features.nrows()
    }

    /// Number of feature columns (before intercept augmentation)
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }
}

/// Read a headered CSV into a DataFrame
pub fn read_csv(path: &str) -> Result<DataFrame> {
    let file = File::open(path)
        .map_err(|e| LogRegError::DataError(format!("cannot open {}: {}", path, e)))?;

    let reader = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .into_reader_with_file_handle(file);

    reader
        .finish()
        .map_err(|e| LogRegError::DataError(e.to_string()))
}

/// Load a CSV source and split off the reserved label column
pub fn load_dataset(path: &str) -> Result<Dataset> {
    let df = read_csv(path)?;
    split_label(&df)
}

/// Split a DataFrame into a feature matrix and the label vector.
/// Feature column order follows the source; the label column must be present.
pub fn split_label(df: &DataFrame) -> Result<Dataset> {
    let label_series = df
        .column(LABEL_COLUMN)
        .map_err(|_| LogRegError::FeatureNotFound(LABEL_COLUMN.to_string()))?;
    let label_f64 = label_series
        .cast(&DataType::Float64)
        .map_err(|e| LogRegError::DataError(e.to_string()))?;
    let labels: Array1<f64> = label_f64
        .f64()
        .map_err(|e| LogRegError::DataError(e.to_string()))?
        .into_iter()
        .map(|v| v.unwrap_or(0.0))
        .collect();

    let feature_names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .filter(|name| name.as_str() != LABEL_COLUMN)
        .map(|s| s.to_string())
        .collect();

    let features = columns_to_array2(df, &feature_names)?;

    Ok(Dataset {
        features,
        labels,
        feature_names,
    })
}

/// Extract named columns from a DataFrame into a row-major `Array2<f64>`.
/// Columns are cast to Float64 first, so integer CSV columns load cleanly.
fn columns_to_array2(df: &DataFrame, col_names: &[String]) -> Result<Array2<f64>> {
    let n_rows = df.height();
    let n_cols = col_names.len();

    let col_data: Vec<Vec<f64>> = col_names
        .iter()
        .map(|col_name| {
            let series = df
                .column(col_name)
                .map_err(|_| LogRegError::FeatureNotFound(col_name.clone()))?;
            let series_f64 = series
                .cast(&DataType::Float64)
                .map_err(|e| LogRegError::DataError(e.to_string()))?;
            let values: Vec<f64> = series_f64
                .f64()
                .map_err(|e| LogRegError::DataError(e.to_string()))?
                .into_iter()
                .map(|v| v.unwrap_or(0.0))
                .collect();
            Ok(values)
        })
        .collect::<Result<Vec<Vec<f64>>>>()?;

    let col_refs: Vec<&[f64]> = col_data.iter().map(|c| c.as_slice()).collect();
    Ok(Array2::from_shape_fn((n_rows, n_cols), |(r, c)| {
        col_refs[c][r]
    }))
}

/// Write the prediction dump: one tab-separated `actual<TAB>predicted` line
/// per test observation, newline-terminated. Parent directories are created
/// as needed.
pub fn write_predictions(path: &Path, actual: &Array1<f64>, predicted: &Array1<f64>) -> Result<()> {
    if actual.len() != predicted.len() {
        return Err(LogRegError::ShapeError {
            expected: format!("{} predictions", actual.len()),
            actual: format!("{} predictions", predicted.len()),
        });
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for (a, p) in actual.iter().zip(predicted.iter()) {
        writeln!(writer, "{}\t{}", a, p)?;
    }
    writer.flush()?;
    Ok(())
}

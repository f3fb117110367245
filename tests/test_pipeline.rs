//! Integration test: full load -> normalize -> train -> predict pipeline

use logreg::estimator::LogisticRegression;
use logreg::training::{OptimizerKind, TrainConfig};
use logreg::LogRegError;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

fn write_csv(dir: &Path, name: &str, rows: &[(f64, f64)]) -> String {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "x1,y").unwrap();
    for (x, y) in rows {
        writeln!(file, "{},{}", x, y).unwrap();
    }
    path.to_str().unwrap().to_string()
}

fn quiet_config() -> TrainConfig {
    TrainConfig::default()
        .with_learning_rate(0.01)
        .with_num_iter(5000)
        .with_verbose(false)
        .with_random_state(42)
}

#[test]
fn test_batch_gradient_end_to_end() {
    let dir = TempDir::new().unwrap();
    let rows = [(0.0, 0.0), (1.0, 0.0), (2.0, 1.0), (3.0, 1.0)];
    let train = write_csv(dir.path(), "train.csv", &rows);
    let test = write_csv(dir.path(), "test.csv", &rows);

    let mut estimator =
        LogisticRegression::new(quiet_config()).with_output_dir(dir.path().join("out"));
    estimator.load(&train, &test).unwrap();

    let beta = estimator.train(OptimizerKind::BatchGradient).unwrap();
    assert_eq!(beta.len(), 2);
    assert!(beta[1] > 0.0, "feature weight should be positive: {}", beta[1]);

    let accuracy = estimator.predict(&beta).unwrap();
    assert!(accuracy >= 0.75, "accuracy {}", accuracy);

    // Dump name encodes variant 0, no normalization
    let out = estimator.output_path();
    assert!(out.ends_with("logistic-regression-output_0_0.txt"));
    let contents = std::fs::read_to_string(&out).unwrap();
    assert_eq!(contents.lines().count(), 4);
    for line in contents.lines() {
        let fields: Vec<&str> = line.split('\t').collect();
        assert_eq!(fields.len(), 2);
        fields[0].parse::<f64>().unwrap();
        fields[1].parse::<f64>().unwrap();
    }
}

#[test]
fn test_normalized_pipeline() {
    let dir = TempDir::new().unwrap();
    let train = write_csv(dir.path(), "train.csv", &[(1.0, 0.0), (2.0, 0.0)]);
    let test = write_csv(dir.path(), "test.csv", &[(3.0, 1.0), (4.0, 1.0)]);

    let mut estimator =
        LogisticRegression::new(quiet_config()).with_output_dir(dir.path().join("out"));
    estimator.load(&train, &test).unwrap();
    estimator.normalize().unwrap();

    // Pooled column [1,2,3,4]: mean 2.5, population std sqrt(1.25)
    let std = 1.25f64.sqrt();
    let train_features = &estimator.train_set().unwrap().features;
    assert!((train_features[[0, 0]] - (1.0 - 2.5) / std).abs() < 1e-12);

    let beta = estimator.train(OptimizerKind::BatchGradient).unwrap();
    estimator.predict(&beta).unwrap();
    assert!(estimator.output_path().ends_with("logistic-regression-output_0_1.txt"));
}

#[test]
fn test_newton_pipeline() {
    let dir = TempDir::new().unwrap();
    let rows = [
        (1.0, 0.0),
        (1.5, 0.0),
        (2.0, 0.0),
        (5.0, 1.0),
        (5.5, 1.0),
        (6.0, 1.0),
    ];
    let train = write_csv(dir.path(), "train.csv", &rows);
    let test = write_csv(dir.path(), "test.csv", &rows);

    let config = TrainConfig::default()
        .with_num_iter(10)
        .with_verbose(false)
        .with_random_state(42);
    let mut estimator =
        LogisticRegression::new(config).with_output_dir(dir.path().join("out"));
    estimator.load(&train, &test).unwrap();

    let beta = estimator.train(OptimizerKind::Newton).unwrap();
    assert!(beta.iter().all(|v| v.is_finite()));

    let accuracy = estimator.predict(&beta).unwrap();
    assert!(accuracy >= 0.99, "accuracy {}", accuracy);
}

#[test]
fn test_mismatched_feature_columns_fail() {
    let dir = TempDir::new().unwrap();
    let train = write_csv(dir.path(), "train.csv", &[(1.0, 0.0)]);

    let test_path = dir.path().join("test.csv");
    let mut file = std::fs::File::create(&test_path).unwrap();
    writeln!(file, "other,y").unwrap();
    writeln!(file, "1.0,0").unwrap();

    let mut estimator = LogisticRegression::new(quiet_config());
    let err = estimator
        .load(&train, test_path.to_str().unwrap())
        .unwrap_err();
    assert!(matches!(err, LogRegError::DataError(_)));
}

#[test]
fn test_unknown_variant_reports_choices() {
    let err = "9".parse::<OptimizerKind>().unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("0 - batch gradient descent"));
    assert!(msg.contains("1 - Newton-Raphson"));
    assert!(msg.contains("2 - regularized batch gradient"));
}

// ============================================================
// Layer 6 — Training Metrics
// ============================================================
// In-sample fit quality of a freshly trained model, appended as
// one CSV row per training run to `<artifact_dir>/metrics.csv`.
//
//   n_trees,seed,rows,mae,rmse,r2
//   200,42,150,812.45,1104.22,0.9913
//
// These are training-set numbers: there is no held-out split,
// so they say how well the forest memorised the sample, not how
// well it generalises. A rising MAE across runs on the same
// sample usually means the forest was made shallower.
//
// Rows go through the `csv` writer, the same crate the dataset
// loader reads with, so the file can be loaded back with
// `csv::Reader` into `MetricsRow`. The header is written only
// when the file is empty.
//
// Reference: csv crate documentation (Writer, serde support)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
};

use crate::data::dataset::TrainingMatrix;
use crate::domain::traits::Regressor;
use crate::ml::forest::ForestConfig;

const METRICS_FILE: &str = "metrics.csv";

/// How well a fitted model reproduces its own training sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitMetrics {
    /// Number of training rows the metrics were computed over
    pub rows: usize,

    /// Mean absolute error, in salary units
    /// Roughly "how far off is a typical prediction"
    pub mae:  f64,

    /// Root mean squared error, in salary units
    /// Always >= mae; a large gap means a few rows are badly off
    pub rmse: f64,

    /// Coefficient of determination
    /// 1.0 is a perfect fit, 0.0 is no better than the mean
    pub r2:   f64,
}

impl FitMetrics {
    pub fn compute<R: Regressor>(model: &R, matrix: &TrainingMatrix) -> Self {
        let n = matrix.len();
        if n == 0 {
            return Self { rows: 0, mae: 0.0, rmse: 0.0, r2: 0.0 };
        }

        let mean = matrix.targets.iter().sum::<f64>() / n as f64;
        let (mut abs, mut sq, mut tot) = (0.0, 0.0, 0.0);
        for (row, &target) in matrix.rows.iter().zip(&matrix.targets) {
            let err = model.predict_row(row) - target;
            abs += err.abs();
            sq  += err * err;
            tot += (target - mean) * (target - mean);
        }

        // A constant target has no variance to explain.
        let r2 = if tot > 0.0 { 1.0 - sq / tot } else { 0.0 };
        Self {
            rows: n,
            mae:  abs / n as f64,
            rmse: (sq / n as f64).sqrt(),
            r2,
        }
    }
}

/// One line of `metrics.csv`. Field order is column order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsRow {
    /// Trees in the forest that was evaluated
    pub n_trees: usize,
    /// Seed the forest was grown with
    pub seed:    u64,
    pub rows:    usize,
    pub mae:     f64,
    pub rmse:    f64,
    pub r2:      f64,
}

impl MetricsRow {
    pub fn new(config: &ForestConfig, m: &FitMetrics) -> Self {
        Self {
            n_trees: config.n_trees,
            seed:    config.seed,
            rows:    m.rows,
            mae:     m.mae,
            rmse:    m.rmse,
            r2:      m.r2,
        }
    }
}

/// Appends MetricsRow records to the metrics CSV.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Make sure the directory exists. The file itself is created
    /// by the first `log`.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create metrics directory '{}'", dir.display()))?;
        Ok(Self { csv_path: dir.join(METRICS_FILE) })
    }

    pub fn log(&self, config: &ForestConfig, m: &FitMetrics) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open metrics CSV '{}'", self.csv_path.display()))?;
        let empty = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new().has_headers(empty).from_writer(file);
        writer.serialize(MetricsRow::new(config, m))?;
        writer.flush()?;

        if empty {
            tracing::debug!("Created metrics CSV: '{}'", self.csv_path.display());
        }
        tracing::debug!("Logged training metrics to '{}'", self.csv_path.display());
        Ok(())
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::{FeatureVector, FEATURE_COUNT};

    struct Constant(f64);

    impl Regressor for Constant {
        fn predict_row(&self, _row: &FeatureVector) -> f64 {
            self.0
        }
    }

    fn matrix(targets: &[f64]) -> TrainingMatrix {
        TrainingMatrix {
            rows:    vec![[0.0; FEATURE_COUNT]; targets.len()],
            targets: targets.to_vec(),
        }
    }

    #[test]
    fn test_mean_predictor_has_zero_r2() {
        let m = FitMetrics::compute(&Constant(2.0), &matrix(&[1.0, 2.0, 3.0]));
        assert_eq!(m.rows, 3);
        assert!((m.mae - 2.0 / 3.0).abs() < 1e-12);
        assert!((m.rmse - (2.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert!(m.r2.abs() < 1e-12);
    }

    #[test]
    fn test_perfect_fit() {
        let m = FitMetrics::compute(&Constant(5.0), &matrix(&[5.0, 5.0]));
        assert_eq!(m.mae, 0.0);
        assert_eq!(m.rmse, 0.0);
    }

    #[test]
    fn test_logger_appends_rows_under_one_header() {
        let dir    = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path()).unwrap();
        let first  = FitMetrics { rows: 10, mae: 1.0, rmse: 2.0, r2: 0.5 };
        logger.log(&ForestConfig::default(), &first).unwrap();

        let second = FitMetrics { rows: 12, mae: 0.25, rmse: 0.75, r2: 0.9 };
        let config = ForestConfig { n_trees: 50, seed: 7, ..ForestConfig::default() };
        let again  = MetricsLogger::new(dir.path()).unwrap();
        again.log(&config, &second).unwrap();

        let text = fs::read_to_string(again.csv_path()).unwrap();
        assert_eq!(text.lines().next(), Some("n_trees,seed,rows,mae,rmse,r2"));
        assert_eq!(text.lines().count(), 3);

        let mut reader = csv::Reader::from_path(again.csv_path()).unwrap();
        let rows: Vec<MetricsRow> = reader.deserialize().collect::<Result<_, _>>().unwrap();
        assert_eq!(
            rows,
            vec![
                MetricsRow::new(&ForestConfig::default(), &first),
                MetricsRow::new(&config, &second),
            ]
        );
    }

    #[test]
    fn test_logger_without_runs_creates_no_file() {
        let dir    = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path().join("nested")).unwrap();
        assert!(dir.path().join("nested").is_dir());
        assert!(!logger.csv_path().exists());
    }
}

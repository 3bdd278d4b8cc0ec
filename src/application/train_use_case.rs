// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the training pipeline in order:
//
//   Step 1: Load the CSV sample        (Layer 4 - data)
//   Step 2: Fit encoders + forest      (Layer 5 - ml)
//   Step 3: Persist the bundle         (Layer 6 - infra)
//   Step 4: Append training metrics    (Layer 6 - infra)
//
// Steps 1 and 2 can fail on bad data; nothing touches the
// artifact directory until both have succeeded.
//
// Reference: Rust Book §9 (Propagating Errors)

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::loader::CsvLoader;
use crate::domain::traits::RecordSource;
use crate::infra::{
    artifact_store::ArtifactStore,
    metrics::{FitMetrics, MetricsLogger},
};
use crate::ml::forest::ForestConfig;
use crate::ml::trainer::run_training;

// ─── Training Configuration ──────────────────────────────────────────────────
// Everything that determines a training run. Saved next to the
// artifacts so a bundle can always be traced back to its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    /// CSV sample to train on
    pub dataset_path:      String,

    /// Where model.mpk.gz, encoders.json, train_config.json and
    /// metrics.csv are written. Existing files are overwritten.
    pub artifact_dir:      String,

    /// Trees in the forest (default 200)
    pub n_trees:           usize,

    /// Seed for every random draw during fitting (default 42)
    /// Same seed + same CSV gives a byte-identical model
    pub seed:              u64,

    /// Depth cap per tree; None grows until leaves are pure
    pub max_depth:         Option<usize>,

    /// Nodes with fewer samples than this become leaves
    pub min_samples_split: usize,
}

impl TrainConfig {
    pub fn forest_config(&self) -> ForestConfig {
        ForestConfig {
            n_trees:           self.n_trees,
            seed:              self.seed,
            max_depth:         self.max_depth,
            min_samples_split: self.min_samples_split,
        }
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        let forest = ForestConfig::default();
        Self {
            dataset_path:      "model/sample_dataset.csv".to_string(),
            artifact_dir:      "model".to_string(),
            n_trees:           forest.n_trees,
            seed:              forest.seed,
            max_depth:         forest.max_depth,
            min_samples_split: forest.min_samples_split,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Run the training pipeline end to end and return the
    /// in-sample metrics of the persisted model.
    pub fn execute(&self) -> Result<FitMetrics> {
        let cfg = &self.config;

        // ── Step 1: Load the sample ───────────────────────────────────────────
        let records = CsvLoader::new(&cfg.dataset_path).load_all()?;

        // ── Step 2: Fit encoders and forest in memory ─────────────────────────
        let forest_cfg = cfg.forest_config();
        let outcome    = run_training(&records, forest_cfg)?;

        // ── Step 3: Persist, overwriting any previous bundle ──────────────────
        let store = ArtifactStore::new(&cfg.artifact_dir);
        store.save_bundle(&outcome.bundle, cfg)?;

        // ── Step 4: Record how well the model fits its own sample ─────────────
        let logger = MetricsLogger::new(store.dir())?;
        logger.log(&forest_cfg, &outcome.metrics)?;
        tracing::info!("Metrics appended to '{}'", logger.csv_path().display());

        Ok(outcome.metrics)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::fixtures::sample_records;
    use std::{fs, io::Write, path::Path};

    const HEADER: &str = "age,education-num,hours-per-week,work_experience,company_type,job_role,location,remote_work,job_level,language_skills,gender,estimated_salary";

    fn write_dataset(path: &Path, rows: usize) {
        let mut f = fs::File::create(path).unwrap();
        writeln!(f, "{HEADER}").unwrap();
        for r in sample_records(rows) {
            writeln!(
                f,
                "{},{},{},{},{},{},{},{},{},{},{},{}",
                r.age, r.education_num, r.hours_per_week, r.work_experience,
                r.company_type, r.job_role, r.location, r.remote_work,
                r.job_level, r.language_skills, r.gender, r.estimated_salary,
            )
            .unwrap();
        }
    }

    fn config_for(dir: &Path, n_trees: usize) -> TrainConfig {
        TrainConfig {
            dataset_path: dir.join("sample.csv").display().to_string(),
            artifact_dir: dir.join("model").display().to_string(),
            n_trees,
            ..TrainConfig::default()
        }
    }

    #[test]
    fn test_execute_writes_all_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(&dir.path().join("sample.csv"), 40);

        let metrics = TrainUseCase::new(config_for(dir.path(), 10)).execute().unwrap();
        assert_eq!(metrics.rows, 40);

        let model_dir = dir.path().join("model");
        for file in ["model.mpk.gz", "encoders.json", "train_config.json", "metrics.csv"] {
            assert!(model_dir.join(file).exists(), "{file} missing");
        }
    }

    #[test]
    fn test_retraining_with_same_seed_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(&dir.path().join("sample.csv"), 40);
        let model_dir = dir.path().join("model");

        TrainUseCase::new(config_for(dir.path(), 10)).execute().unwrap();
        let encoders_1 = fs::read(model_dir.join("encoders.json")).unwrap();
        let model_1    = ArtifactStore::new(&model_dir).load_model().unwrap();

        TrainUseCase::new(config_for(dir.path(), 10)).execute().unwrap();
        let encoders_2 = fs::read(model_dir.join("encoders.json")).unwrap();
        let model_2    = ArtifactStore::new(&model_dir).load_model().unwrap();

        assert_eq!(encoders_1, encoders_2);
        assert_eq!(model_1, model_2);
    }

    #[test]
    fn test_bad_dataset_writes_nothing() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.csv");
        fs::write(&path, "age,gender\n30,Male\n").unwrap();

        let err = TrainUseCase::new(config_for(dir.path(), 10)).execute().unwrap_err();
        assert!(format!("{err:#}").contains("missing required column"));
        assert!(!dir.path().join("model").exists());
    }

    #[test]
    fn test_empty_dataset_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(&dir.path().join("sample.csv"), 0);

        let err = TrainUseCase::new(config_for(dir.path(), 10)).execute().unwrap_err();
        assert!(format!("{err:#}").contains("no rows"));
        assert!(!dir.path().join("model").exists());
    }
}

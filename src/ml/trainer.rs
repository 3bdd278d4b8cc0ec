// ============================================================
// Layer 5 — Trainer
// ============================================================
// Fits everything the prediction pipeline needs, in memory:
//
//   records ─▶ EncoderSet::fit ─▶ TrainingMatrix ─▶ RandomForest::fit
//
// Nothing is written here. The caller persists the returned
// bundle only after every step has succeeded, so a degenerate
// column or an empty dataset never leaves partial artifacts.

use anyhow::{Context, Result};

use crate::data::dataset::{SalaryRecord, TrainingMatrix};
use crate::data::encoder::EncoderSet;
use crate::infra::metrics::FitMetrics;
use crate::ml::bundle::ArtifactBundle;
use crate::ml::forest::{ForestConfig, RandomForest};

pub struct TrainingOutcome {
    pub bundle:  ArtifactBundle<RandomForest>,
    pub metrics: FitMetrics,
}

pub fn run_training(records: &[SalaryRecord], config: ForestConfig) -> Result<TrainingOutcome> {
    let encoders = EncoderSet::fit(records).context("Cannot fit categorical encoders")?;
    let matrix   = TrainingMatrix::encode(records, &encoders)?;
    tracing::info!("Encoded {} rows x {} features", matrix.len(), crate::domain::schema::FEATURE_COUNT);

    tracing::info!(
        "Fitting random forest: {} trees, seed {}, max_depth {:?}",
        config.n_trees,
        config.seed,
        config.max_depth
    );
    let forest = RandomForest::fit(&matrix, config)?;

    let max_depth = forest.trees().iter().map(|t| t.depth()).max().unwrap_or(0);
    let metrics   = FitMetrics::compute(&forest, &matrix);
    tracing::info!(
        "Training fit: MAE={:.2} RMSE={:.2} R²={:.4} (deepest tree: {})",
        metrics.mae,
        metrics.rmse,
        metrics.r2,
        max_depth
    );

    Ok(TrainingOutcome {
        bundle: ArtifactBundle::new(forest, encoders),
        metrics,
    })
}

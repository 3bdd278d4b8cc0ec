// ============================================================
// Layer 5 — Random Forest Regressor
// ============================================================
// A bagged ensemble of CART regression trees.
//
//   for each of n_trees:
//     draw n row indices with replacement     (bootstrap)
//     grow a RegressionTree on that sample    (all features per split)
//   prediction = mean of the tree predictions
//
// Every random draw comes from one StdRng seeded with `seed`, and
// each tree gets its own child RNG seeded from that stream. The
// same (dataset, n_trees, seed) therefore always yields the same
// forest.
//
// The forest persists the feature names and schema version it
// was fitted against. `validate_schema` compares them to this
// build's FEATURE_SCHEMA so a model trained on a different column
// layout is rejected at load time instead of silently
// mispredicting.
//
// Reference: Breiman (2001) Random Forests; rand crate (StdRng)

use anyhow::{ensure, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::data::dataset::TrainingMatrix;
use crate::domain::error::SchemaError;
use crate::domain::schema::{feature_names, FeatureVector, SCHEMA_VERSION};
use crate::domain::traits::Regressor;
use crate::ml::tree::{RegressionTree, TreeParams};

/// Hyper-parameters, persisted inside the model so a loaded forest
/// can report how it was grown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestConfig {
    pub n_trees:           usize,
    pub seed:              u64,
    pub max_depth:         Option<usize>,
    pub min_samples_split: usize,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees:           200,
            seed:              42,
            max_depth:         None,
            min_samples_split: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    schema_version: u32,
    feature_names:  Vec<String>,
    config:         ForestConfig,
    trees:          Vec<RegressionTree>,
}

impl RandomForest {
    pub fn fit(matrix: &TrainingMatrix, config: ForestConfig) -> Result<Self> {
        ensure!(!matrix.is_empty(), "cannot fit a forest on an empty dataset");
        ensure!(
            matrix.rows.len() == matrix.targets.len(),
            "feature rows ({}) and targets ({}) differ in length",
            matrix.rows.len(),
            matrix.targets.len()
        );
        ensure!(config.n_trees > 0, "n_trees must be at least 1");
        ensure!(config.min_samples_split >= 2, "min_samples_split must be at least 2");

        let n      = matrix.len();
        let params = TreeParams {
            max_depth:         config.max_depth,
            min_samples_split: config.min_samples_split,
        };
        let mut rng = StdRng::seed_from_u64(config.seed);

        let trees = (0..config.n_trees)
            .map(|_| {
                let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                let mut tree_rng       = StdRng::seed_from_u64(rng.gen());
                RegressionTree::fit(&matrix.rows, &matrix.targets, &sample, params, &mut tree_rng)
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            "Grew {} trees, {} nodes in total",
            trees.len(),
            trees.iter().map(RegressionTree::node_count).sum::<usize>()
        );

        Ok(Self {
            schema_version: SCHEMA_VERSION,
            feature_names:  feature_names(),
            config,
            trees,
        })
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }

    /// Reject a model whose feature layout differs from this build's.
    pub fn validate_schema(&self) -> Result<(), SchemaError> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(SchemaError::Version { expected: SCHEMA_VERSION, actual: self.schema_version });
        }
        let expected = feature_names();
        if self.feature_names != expected {
            return Err(SchemaError::ColumnOrder { expected, actual: self.feature_names.clone() });
        }
        Ok(())
    }
}

impl Regressor for RandomForest {
    fn predict_row(&self, row: &FeatureVector) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.predict(row)).sum();
        sum / self.trees.len().max(1) as f64
    }
}

// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer programs against these, not against the
// CSV loader or the random forest directly. Tests swap in
// in-memory records and fixture models through the same traits.

use anyhow::Result;

use crate::data::dataset::SalaryRecord;
use crate::domain::error::SchemaError;
use crate::domain::schema::{FeatureVector, FEATURE_COUNT};

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Anything that can produce the raw training rows.
///
/// Implementations:
///   - CsvLoader → reads a delimited file with a header row
pub trait RecordSource {
    fn load_all(&self) -> Result<Vec<SalaryRecord>>;
}

// ─── Regressor ────────────────────────────────────────────────────────────────
/// A fitted model mapping one FeatureVector to a salary.
///
/// Implementations:
///   - RandomForest → the persisted ensemble
///   - fixture models in tests
pub trait Regressor {
    /// Inference on a vector already laid out per FEATURE_SCHEMA.
    fn predict_row(&self, row: &FeatureVector) -> f64;

    /// Checked inference on an arbitrary slice. Refuses anything
    /// that is not exactly FEATURE_COUNT wide.
    fn predict(&self, row: &[f64]) -> Result<f64, SchemaError> {
        let row: &FeatureVector = row.try_into().map_err(|_| SchemaError::FeatureCount {
            expected: FEATURE_COUNT,
            actual:   row.len(),
        })?;
        Ok(self.predict_row(row))
    }
}

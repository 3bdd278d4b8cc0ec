// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the raw CSV sample and the numeric matrix
// the forest is fitted on.
//
//   sample_dataset.csv
//       │
//       ▼
//   CsvLoader         → header check, parses rows into SalaryRecord
//       │
//       ▼
//   EncoderSet::fit   → one LabelEncoder per categorical column
//       │
//       ▼
//   TrainingMatrix    → rows laid out per FEATURE_SCHEMA + targets
//
// The same EncoderSet is persisted and later used by the
// prediction pipeline to encode a single profile.
//
// Reference: scikit-learn LabelEncoder semantics

/// Reads the training CSV
pub mod loader;

/// Label encoders for the categorical columns
pub mod encoder;

/// Raw records and the encoded training matrix
pub mod dataset;

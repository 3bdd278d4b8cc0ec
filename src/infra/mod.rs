// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// File-system concerns shared by the training and prediction
// pipelines:
//
//   artifact_store.rs — Saving and loading the artifact bundle.
//                       The model goes to gzipped MessagePack,
//                       the encoders and the TrainConfig to JSON,
//                       all in one directory.
//
//   metrics.rs        — In-sample fit metrics (MAE, RMSE, R²),
//                       appended as one CSV row per training run.
//
// Reference: Rust Book §7 (Modules)

/// Artifact bundle persistence
pub mod artifact_store;

/// Training metrics CSV logger
pub mod metrics;

// ============================================================
// Layer 5 — ML Layer
// ============================================================
// Model fitting and inference. No file I/O and no CLI concerns.
//
//   tree.rs       — CART regression tree (squared error)
//   forest.rs     — bootstrap-aggregated ensemble of trees,
//                   seeded for reproducibility, schema-stamped
//   bundle.rs     — the immutable (model, encoders) pair
//   trainer.rs    — encoders + matrix + forest, in memory
//   inferencer.rs — profile → FeatureVector → salary, and the
//                   lazy salary-vs-experience sweep
//
// Reference: Breiman (2001) Random Forests

/// Regression tree
pub mod tree;

/// Random forest regressor
pub mod forest;

/// Model + encoders bundle
pub mod bundle;

/// Training pipeline (fit only)
pub mod trainer;

/// Prediction pipeline (encode + infer)
pub mod inferencer;

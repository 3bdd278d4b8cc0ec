// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one goal each:
// retrain the model, or estimate a salary.
//
// Rules for this layer:
//   - No fitting or tree code here (that's Layer 5)
//   - No printing here (that's Layer 1)
//   - No direct file access (that's Layers 4 and 6)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern

// The training workflow
pub mod train_use_case;

// The prediction workflow
pub mod predict_use_case;

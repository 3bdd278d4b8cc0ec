// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Pure Rust structs, enums and traits that define what the
// system talks about: an employee profile, the ordered feature
// schema the model consumes, and the salary post-processing
// rules.
//
// Rules for this layer:
//   - NO file I/O
//   - NO model fitting or inference code
//   - Only plain types, pure functions and traits
//
// The feature schema lives here (not in `data` or `ml`) because
// both the training pipeline and the prediction pipeline must
// index through the same constant.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

/// Ordered feature schema shared by training and prediction
pub mod schema;

/// The employee profile submitted for a prediction
pub mod profile;

/// Tax / net salary rules, trend points and the industry table
pub mod salary;

/// Typed errors raised by the domain, data and ml layers
pub mod error;

/// Core abstractions (traits) that other layers implement
pub mod traits;

// ============================================================
// Layer 3 — Typed Errors
// ============================================================
// The application and CLI layers work with anyhow::Result, but
// the failures a caller may want to match on are typed here
// with thiserror. An unknown category in particular has to stay
// distinguishable from a plain I/O failure.
//
// Reference: thiserror crate documentation

use thiserror::Error;

use crate::domain::schema::CategoricalColumn;

/// Failures while mapping labels to integer codes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// The value was never seen in the training data for this column.
    #[error("unknown category '{value}' for column '{column}' (not in trained vocabulary)")]
    UnknownCategory {
        column: CategoricalColumn,
        value:  String,
    },

    /// Fitting saw fewer than two distinct labels.
    #[error("column '{column}' has {classes} distinct value(s); at least 2 are required")]
    DegenerateColumn {
        column:  CategoricalColumn,
        classes: usize,
    },

    /// A code with no label behind it (decoding only).
    #[error("code {code} is out of range for column '{column}' ({classes} classes)")]
    UnknownCode {
        column:  CategoricalColumn,
        code:    usize,
        classes: usize,
    },

    #[error("encoder for column '{0}' is missing")]
    MissingEncoder(CategoricalColumn),

    #[error("encoder for column '{column}' is invalid: {reason}")]
    InvalidEncoder {
        column: CategoricalColumn,
        reason: String,
    },
}

/// The model and the caller disagree about the feature layout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("schema mismatch: expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },

    #[error("schema mismatch: expected columns {expected:?}, model was trained on {actual:?}")]
    ColumnOrder {
        expected: Vec<String>,
        actual:   Vec<String>,
    },

    #[error("schema mismatch: model schema version {actual}, this build expects {expected}")]
    Version { expected: u32, actual: u32 },
}

/// A profile field outside its accepted range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min:   u32,
        max:   u32,
    },

    #[error("unknown education code {0}")]
    UnknownEducation(u32),
}

/// Problems with the training CSV. All of them are detected
/// before any artifact is written.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("dataset contains no rows")]
    Empty,

    #[error("row {row}: cannot parse column '{column}' value '{value}'")]
    Parse {
        row:    usize,
        column: String,
        value:  String,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

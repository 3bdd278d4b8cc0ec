// ============================================================
// Layer 3 — Feature Schema
// ============================================================
// The model sees an 11-dimensional vector. Which slot holds
// which column is decided exactly once, here, by FEATURE_SCHEMA.
//
// Training assembles its matrix by walking FEATURE_SCHEMA and
// prediction assembles its vector the same way, so the two can
// never disagree. The column names are also persisted with the
// model and compared on load (see ml::forest).
//
// Bump SCHEMA_VERSION whenever FEATURE_SCHEMA changes.
//
// Reference: Rust Book §6 (Enums and Pattern Matching)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Incremented whenever the order or content of FEATURE_SCHEMA changes.
pub const SCHEMA_VERSION: u32 = 1;

/// Number of model inputs.
pub const FEATURE_COUNT: usize = 11;

/// Name of the regression target column in the training CSV.
pub const TARGET_COLUMN: &str = "estimated_salary";

/// One row of model input, ordered per FEATURE_SCHEMA.
pub type FeatureVector = [f64; FEATURE_COUNT];

// ─── CategoricalColumn ────────────────────────────────────────────────────────
/// The six label-encoded columns. Closed set: an encoder exists for
/// every variant and for nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalColumn {
    CompanyType,
    JobRole,
    Location,
    RemoteWork,
    JobLevel,
    Gender,
}

impl CategoricalColumn {
    /// Every categorical column, in schema order.
    pub const ALL: [CategoricalColumn; 6] = [
        CategoricalColumn::CompanyType,
        CategoricalColumn::JobRole,
        CategoricalColumn::Location,
        CategoricalColumn::RemoteWork,
        CategoricalColumn::JobLevel,
        CategoricalColumn::Gender,
    ];

    /// CSV header / persisted key for this column.
    pub fn name(self) -> &'static str {
        match self {
            CategoricalColumn::CompanyType => "company_type",
            CategoricalColumn::JobRole     => "job_role",
            CategoricalColumn::Location    => "location",
            CategoricalColumn::RemoteWork  => "remote_work",
            CategoricalColumn::JobLevel    => "job_level",
            CategoricalColumn::Gender      => "gender",
        }
    }
}

impl fmt::Display for CategoricalColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Feature ──────────────────────────────────────────────────────────────────
/// A single model input. Numeric features are fed as-is,
/// categorical ones go through their encoder first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Age,
    EducationNum,
    HoursPerWeek,
    WorkExperience,
    LanguageSkills,
    Categorical(CategoricalColumn),
}

impl Feature {
    pub fn name(self) -> &'static str {
        match self {
            Feature::Age              => "age",
            Feature::EducationNum     => "education-num",
            Feature::HoursPerWeek     => "hours-per-week",
            Feature::WorkExperience   => "work_experience",
            Feature::LanguageSkills   => "language_skills",
            Feature::Categorical(col) => col.name(),
        }
    }
}

/// THE feature order. Index `i` of every FeatureVector holds
/// `FEATURE_SCHEMA[i]`.
pub const FEATURE_SCHEMA: [Feature; FEATURE_COUNT] = [
    Feature::Age,
    Feature::EducationNum,
    Feature::HoursPerWeek,
    Feature::WorkExperience,
    Feature::Categorical(CategoricalColumn::CompanyType),
    Feature::Categorical(CategoricalColumn::JobRole),
    Feature::Categorical(CategoricalColumn::Location),
    Feature::Categorical(CategoricalColumn::RemoteWork),
    Feature::Categorical(CategoricalColumn::JobLevel),
    Feature::LanguageSkills,
    Feature::Categorical(CategoricalColumn::Gender),
];

/// Column names in schema order, as persisted alongside the model.
pub fn feature_names() -> Vec<String> {
    FEATURE_SCHEMA.iter().map(|f| f.name().to_string()).collect()
}

/// Position of `feature` inside FEATURE_SCHEMA.
pub fn index_of(feature: Feature) -> usize {
    FEATURE_SCHEMA
        .iter()
        .position(|f| *f == feature)
        .unwrap_or_else(|| unreachable!("{feature:?} is not part of FEATURE_SCHEMA"))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_schema_matches_training_column_order() {
        assert_eq!(
            feature_names(),
            vec![
                "age", "education-num", "hours-per-week", "work_experience",
                "company_type", "job_role", "location", "remote_work",
                "job_level", "language_skills", "gender",
            ]
        );
    }

    #[test]
    fn test_every_categorical_column_appears_once() {
        let cats: Vec<_> = FEATURE_SCHEMA
            .iter()
            .filter_map(|f| match f {
                Feature::Categorical(c) => Some(*c),
                _ => None,
            })
            .collect();
        assert_eq!(cats.len(), CategoricalColumn::ALL.len());
        let unique: HashSet<_> = cats.iter().collect();
        assert_eq!(unique.len(), cats.len());
    }

    #[test]
    fn test_experience_index() {
        assert_eq!(index_of(Feature::WorkExperience), 3);
        assert_eq!(index_of(Feature::Categorical(CategoricalColumn::Gender)), 10);
    }
}

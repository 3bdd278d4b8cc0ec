// ============================================================
// Layer 4 — Salary Records and Training Matrix
// ============================================================
// A SalaryRecord is one CSV row exactly as read: numbers as f64,
// categorical labels as strings. TrainingMatrix is what the
// forest actually consumes:
//
//   records ──EncoderSet──▶ rows:    Vec<[f64; 11]>  (FEATURE_SCHEMA order)
//                           targets: Vec<f64>        (estimated_salary)
//
// Column order inside a row comes from FEATURE_SCHEMA alone, never
// from the order of the CSV header.

use serde::{Deserialize, Serialize};

use crate::data::encoder::EncoderSet;
use crate::domain::error::EncodeError;
use crate::domain::schema::{CategoricalColumn, Feature, FeatureVector, FEATURE_COUNT, FEATURE_SCHEMA};

/// One row of the training CSV, before encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// Age in years (`age`)
    pub age:              f64,

    /// Ordinal education code (`education-num`), e.g. 13 = Bachelor's
    pub education_num:    f64,

    /// Weekly working hours (`hours-per-week`)
    pub hours_per_week:   f64,

    /// Years of work experience; the value swept for the trend
    pub work_experience:  f64,

    /// Number of languages known
    pub language_skills:  f64,

    pub company_type:     String,
    pub job_role:         String,
    pub location:         String,

    /// "Yes" or "No" in the shipped sample, but any two labels work
    pub remote_work:      String,

    pub job_level:        String,
    pub gender:           String,

    /// Regression target, monthly salary in rupees
    pub estimated_salary: f64,
}

impl SalaryRecord {
    pub fn category(&self, column: CategoricalColumn) -> &str {
        match column {
            CategoricalColumn::CompanyType => &self.company_type,
            CategoricalColumn::JobRole     => &self.job_role,
            CategoricalColumn::Location    => &self.location,
            CategoricalColumn::RemoteWork  => &self.remote_work,
            CategoricalColumn::JobLevel    => &self.job_level,
            CategoricalColumn::Gender      => &self.gender,
        }
    }

    /// Lay this record out per FEATURE_SCHEMA, encoding its labels.
    pub fn to_features(&self, encoders: &EncoderSet) -> Result<FeatureVector, EncodeError> {
        let mut row = [0.0; FEATURE_COUNT];
        for (slot, feature) in row.iter_mut().zip(FEATURE_SCHEMA) {
            *slot = match feature {
                Feature::Age              => self.age,
                Feature::EducationNum     => self.education_num,
                Feature::HoursPerWeek     => self.hours_per_week,
                Feature::WorkExperience   => self.work_experience,
                Feature::LanguageSkills   => self.language_skills,
                Feature::Categorical(col) => encoders.encode(col, self.category(col))? as f64,
            };
        }
        Ok(row)
    }
}

/// Encoded features and targets, row-aligned.
#[derive(Debug, Clone)]
pub struct TrainingMatrix {
    /// One encoded FeatureVector per record
    pub rows:    Vec<FeatureVector>,
    /// `estimated_salary` for the row at the same index
    pub targets: Vec<f64>,
}

impl TrainingMatrix {
    pub fn encode(records: &[SalaryRecord], encoders: &EncoderSet) -> Result<Self, EncodeError> {
        let rows = records
            .iter()
            .map(|r| r.to_features(encoders))
            .collect::<Result<Vec<_>, _>>()?;
        let targets = records.iter().map(|r| r.estimated_salary).collect();
        Ok(Self { rows, targets })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ─── Test fixtures ────────────────────────────────────────────────────────────
// A small deterministic sample used by tests across the crate.
// Salary is a simple function of the inputs so a fitted forest
// has something real to learn.
#[cfg(test)]
pub(crate) mod fixtures {
    use super::SalaryRecord;

    const COMPANY_TYPES: [&str; 3] = ["MNC", "Product", "Startup"];
    const JOB_ROLES:     [&str; 3] = ["Analyst", "Engineer", "Manager"];
    const LOCATIONS:     [&str; 3] = ["Bangalore", "Delhi", "Pune"];
    const JOB_LEVELS:    [&str; 3] = ["Junior", "Mid", "Senior"];
    const GENDERS:       [&str; 2] = ["Female", "Male"];
    const REMOTE:        [&str; 2] = ["No", "Yes"];
    const EDUCATION:     [f64; 4]  = [10.0, 13.0, 14.0, 16.0];

    pub(crate) fn sample_records(n: usize) -> Vec<SalaryRecord> {
        (0..n)
            .map(|i| {
                let experience = (i % 21) as f64;
                let level      = i % 3;
                let role       = (i / 3) % 3;
                let education  = EDUCATION[i % 4];
                let salary     = 25_000.0
                    + experience * 2_500.0
                    + level as f64 * 12_000.0
                    + role as f64 * 6_000.0
                    + (education - 10.0) * 1_500.0;
                SalaryRecord {
                    age:              22.0 + experience + (i % 5) as f64,
                    education_num:    education,
                    hours_per_week:   35.0 + (i % 4) as f64 * 5.0,
                    work_experience:  experience,
                    language_skills:  1.0 + (i % 5) as f64,
                    company_type:     COMPANY_TYPES[i % 3].to_string(),
                    job_role:         JOB_ROLES[role].to_string(),
                    location:         LOCATIONS[(i / 2) % 3].to_string(),
                    remote_work:      REMOTE[i % 2].to_string(),
                    job_level:        JOB_LEVELS[level].to_string(),
                    gender:           GENDERS[(i / 7) % 2].to_string(),
                    estimated_salary: salary,
                }
            })
            .collect()
    }
}

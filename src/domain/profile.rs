// ============================================================
// Layer 3 — EmployeeProfile Domain Type
// ============================================================
// The single record submitted to the prediction pipeline.
//
// Numeric fields carry the same bounds the input form enforces:
//   age               18 – 65
//   hours per week    20 – 80
//   work experience    0 – 50
//   languages known    1 – 5
//
// Categorical fields are plain strings here. Whether a value is
// acceptable depends on what the encoders saw at training time,
// which the domain layer cannot know, so that check happens
// during encoding (see data::encoder).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use crate::domain::error::ProfileError;
use crate::domain::schema::CategoricalColumn;

pub const AGE_RANGE:        RangeInclusive<u32> = 18..=65;
pub const HOURS_RANGE:      RangeInclusive<u32> = 20..=80;
pub const EXPERIENCE_RANGE: RangeInclusive<u32> = 0..=50;
pub const LANGUAGE_RANGE:   RangeInclusive<u32> = 1..=5;

// ─── Education ────────────────────────────────────────────────────────────────
/// Highest education reached. The model consumes the ordinal
/// `education-num` code, not the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Education {
    TenthPass,
    TwelfthPass,
    Diploma,
    Bachelors,
    Masters,
    Mba,
    Phd,
    PostDoc,
}

impl Education {
    pub const ALL: [Education; 8] = [
        Education::TenthPass,
        Education::TwelfthPass,
        Education::Diploma,
        Education::Bachelors,
        Education::Masters,
        Education::Mba,
        Education::Phd,
        Education::PostDoc,
    ];

    /// Ordinal code fed to the model as `education-num`.
    pub fn code(self) -> u32 {
        match self {
            Education::TenthPass   => 8,
            Education::TwelfthPass => 10,
            Education::Diploma     => 11,
            Education::Bachelors   => 13,
            Education::Masters     => 14,
            Education::Mba         => 15,
            Education::Phd         => 16,
            Education::PostDoc     => 17,
        }
    }

    pub fn from_code(code: u32) -> Result<Self, ProfileError> {
        Self::ALL
            .into_iter()
            .find(|e| e.code() == code)
            .ok_or(ProfileError::UnknownEducation(code))
    }

    pub fn label(self) -> &'static str {
        match self {
            Education::TenthPass   => "10th Pass",
            Education::TwelfthPass => "12th Pass",
            Education::Diploma     => "Diploma",
            Education::Bachelors   => "Bachelor's",
            Education::Masters     => "Master's",
            Education::Mba         => "MBA",
            Education::Phd         => "PhD",
            Education::PostDoc     => "PostDoc",
        }
    }
}

impl fmt::Display for Education {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.code())
    }
}

// ─── RemoteWork ───────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteWork {
    Yes,
    No,
}

impl RemoteWork {
    /// Label as it appears in the training CSV.
    pub fn label(self) -> &'static str {
        match self {
            RemoteWork::Yes => "Yes",
            RemoteWork::No  => "No",
        }
    }
}

// ─── EmployeeProfile ──────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Years, within AGE_RANGE
    pub age:             u32,
    pub education:       Education,
    /// Within HOURS_RANGE
    pub hours_per_week:  u32,
    /// Years, within EXPERIENCE_RANGE. Replaced by 1..=20 for the trend.
    pub work_experience: u32,
    pub company_type:    String,
    pub job_role:        String,
    pub job_level:       String,
    pub location:        String,
    pub remote_work:     RemoteWork,
    /// Languages known, within LANGUAGE_RANGE
    pub language_skills: u32,
    pub gender:          String,
}

impl EmployeeProfile {
    /// Check every numeric field against its accepted range.
    /// Reports the first violation found.
    pub fn validate(&self) -> Result<(), ProfileError> {
        check("age",             self.age,             &AGE_RANGE)?;
        check("hours_per_week",  self.hours_per_week,  &HOURS_RANGE)?;
        check("work_experience", self.work_experience, &EXPERIENCE_RANGE)?;
        check("language_skills", self.language_skills, &LANGUAGE_RANGE)?;
        Ok(())
    }

    /// Raw label submitted for a categorical column.
    pub fn category(&self, column: CategoricalColumn) -> &str {
        match column {
            CategoricalColumn::CompanyType => &self.company_type,
            CategoricalColumn::JobRole     => &self.job_role,
            CategoricalColumn::Location    => &self.location,
            CategoricalColumn::RemoteWork  => self.remote_work.label(),
            CategoricalColumn::JobLevel    => &self.job_level,
            CategoricalColumn::Gender      => &self.gender,
        }
    }
}

fn check(field: &'static str, value: u32, range: &RangeInclusive<u32>) -> Result<(), ProfileError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ProfileError::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

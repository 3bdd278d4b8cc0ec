// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the subcommands `train`, `predict` and `vocab`.
//
// `predict` plays the part of the input form: clap enforces the
// same numeric bounds the form's sliders had, and any categorical
// flag left out falls back to the first label the encoders know,
// just like an untouched select box.
//
// Reference: clap derive tutorial (value parsers, ValueEnum)

use anyhow::Result;
use clap::{builder::RangedI64ValueParser, Args, Subcommand, ValueEnum};
use std::ops::RangeInclusive;

use crate::application::train_use_case::TrainConfig;
use crate::data::encoder::EncoderSet;
use crate::domain::profile::{
    Education, EmployeeProfile, RemoteWork, AGE_RANGE, EXPERIENCE_RANGE, HOURS_RANGE, LANGUAGE_RANGE,
};
use crate::domain::schema::CategoricalColumn;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Retrain the salary model from a CSV sample
    Train(TrainArgs),

    /// Estimate the monthly salary for one employee profile
    Predict(PredictArgs),

    /// List each categorical label with its code, plus the model's parameters
    Vocab(VocabArgs),
}

// ─── train ────────────────────────────────────────────────────────────────────
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// CSV sample with a header row and an `estimated_salary` column
    #[arg(long, default_value = "model/sample_dataset.csv")]
    pub dataset: String,

    /// Directory the model, encoders and metrics are written to
    #[arg(long, default_value = "model")]
    pub artifact_dir: String,

    /// Number of trees in the forest
    #[arg(long, default_value_t = 200)]
    pub n_trees: usize,

    /// Seed for bootstrap sampling and feature shuffling
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Maximum tree depth (unlimited when omitted)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Minimum samples a node needs before it may split
    #[arg(long, default_value_t = 2)]
    pub min_samples_split: usize,
}

/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            dataset_path:      a.dataset,
            artifact_dir:      a.artifact_dir,
            n_trees:           a.n_trees,
            seed:              a.seed,
            max_depth:         a.max_depth,
            min_samples_split: a.min_samples_split,
        }
    }
}

// ─── predict ──────────────────────────────────────────────────────────────────
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Age in years
    #[arg(long, default_value_t = 30, value_parser = bounded(AGE_RANGE))]
    pub age: u32,

    /// Education level: a label (10th, 12th, diploma, bachelors,
    /// masters, mba, phd, postdoc) or its code (8–17)
    #[arg(long, default_value = "bachelors", value_parser = parse_education)]
    pub education: Education,

    /// Hours worked per week
    #[arg(long, default_value_t = 40, value_parser = bounded(HOURS_RANGE))]
    pub hours: u32,

    /// Work experience in years
    #[arg(long, default_value_t = 2, value_parser = bounded(EXPERIENCE_RANGE))]
    pub experience: u32,

    /// Number of languages known
    #[arg(long, default_value_t = 2, value_parser = bounded(LANGUAGE_RANGE))]
    pub languages: u32,

    /// Company type, e.g. MNC or Startup (see `vocab`)
    #[arg(long)]
    pub company_type: Option<String>,

    /// Job role as it appears in the training data
    #[arg(long)]
    pub job_role: Option<String>,

    /// Seniority level, e.g. Junior or Senior
    #[arg(long)]
    pub job_level: Option<String>,

    /// City of employment
    #[arg(long)]
    pub location: Option<String>,

    /// Whether the role is remote
    #[arg(long, value_enum, default_value_t = RemoteArg::Yes)]
    pub remote: RemoteArg,

    /// Gender label as it appears in the training data
    #[arg(long)]
    pub gender: Option<String>,

    /// Directory holding the trained artifacts
    #[arg(long, default_value = "model")]
    pub artifact_dir: String,

    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum RemoteArg {
    Yes,
    No,
}

impl From<RemoteArg> for RemoteWork {
    fn from(r: RemoteArg) -> Self {
        match r {
            RemoteArg::Yes => RemoteWork::Yes,
            RemoteArg::No  => RemoteWork::No,
        }
    }
}

impl PredictArgs {
    /// Build the profile, filling omitted categorical fields with
    /// the first label each encoder knows.
    pub fn to_profile(&self, encoders: &EncoderSet) -> Result<EmployeeProfile> {
        let pick = |given: &Option<String>, col: CategoricalColumn| -> Result<String> {
            match given {
                Some(v) => Ok(v.clone()),
                None => {
                    let classes = encoders.classes(col)?;
                    classes
                        .first()
                        .cloned()
                        .ok_or_else(|| anyhow::anyhow!("encoder for '{col}' has no labels"))
                }
            }
        };

        Ok(EmployeeProfile {
            age:             self.age,
            education:       self.education,
            hours_per_week:  self.hours,
            work_experience: self.experience,
            company_type:    pick(&self.company_type, CategoricalColumn::CompanyType)?,
            job_role:        pick(&self.job_role, CategoricalColumn::JobRole)?,
            job_level:       pick(&self.job_level, CategoricalColumn::JobLevel)?,
            location:        pick(&self.location, CategoricalColumn::Location)?,
            remote_work:     self.remote.into(),
            language_skills: self.languages,
            gender:          pick(&self.gender, CategoricalColumn::Gender)?,
        })
    }
}

// ─── vocab ────────────────────────────────────────────────────────────────────
#[derive(Args, Debug)]
pub struct VocabArgs {
    /// Directory holding the trained artifacts
    #[arg(long, default_value = "model")]
    pub artifact_dir: String,
}

// ─── Value parsers ────────────────────────────────────────────────────────────
fn bounded(range: RangeInclusive<u32>) -> RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(i64::from(*range.start())..=i64::from(*range.end()))
}

fn parse_education(s: &str) -> Result<Education, String> {
    if let Ok(code) = s.parse::<u32>() {
        return Education::from_code(code).map_err(|e| e.to_string());
    }
    let normalised: String = s
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    match normalised.as_str() {
        "10th" | "10thpass"  => Ok(Education::TenthPass),
        "12th" | "12thpass"  => Ok(Education::TwelfthPass),
        "diploma"            => Ok(Education::Diploma),
        "bachelors"          => Ok(Education::Bachelors),
        "masters"            => Ok(Education::Masters),
        "mba"                => Ok(Education::Mba),
        "phd"                => Ok(Education::Phd),
        "postdoc"            => Ok(Education::PostDoc),
        _ => Err(format!("unknown education level '{s}'")),
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::data::dataset::fixtures::sample_records;
    use clap::Parser;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("salary-predictor").chain(args.iter().copied()))
    }

    fn predict_args(args: &[&str]) -> PredictArgs {
        let mut full = vec!["predict"];
        full.extend_from_slice(args);
        match parse(&full).unwrap().command {
            Commands::Predict(p) => p,
            other => panic!("expected predict, got {other:?}"),
        }
    }

    #[test]
    fn test_education_accepts_labels_and_codes() {
        assert_eq!(parse_education("Bachelor's"), Ok(Education::Bachelors));
        assert_eq!(parse_education("10th Pass"), Ok(Education::TenthPass));
        assert_eq!(parse_education("16"), Ok(Education::Phd));
        assert!(parse_education("9").is_err());
        assert!(parse_education("kindergarten").is_err());
    }

    #[test]
    fn test_predict_defaults_match_form_defaults() {
        let p = predict_args(&[]);
        assert_eq!((p.age, p.hours, p.experience, p.languages), (30, 40, 2, 2));
        assert_eq!(p.education, Education::Bachelors);
        assert!(matches!(p.remote, RemoteArg::Yes));
    }

    #[test]
    fn test_out_of_range_flags_rejected() {
        assert!(parse(&["predict", "--age", "17"]).is_err());
        assert!(parse(&["predict", "--hours", "81"]).is_err());
        assert!(parse(&["predict", "--experience", "51"]).is_err());
        assert!(parse(&["predict", "--languages", "0"]).is_err());
        assert!(parse(&["predict", "--age", "65", "--languages", "5"]).is_ok());
    }

    #[test]
    fn test_omitted_categories_use_first_label() {
        let encoders = EncoderSet::fit(&sample_records(40)).unwrap();
        let p        = predict_args(&["--gender", "Male", "--remote", "no"]);
        let profile  = p.to_profile(&encoders).unwrap();

        assert_eq!(profile.gender, "Male");
        assert_eq!(profile.remote_work, RemoteWork::No);
        assert_eq!(profile.company_type, encoders.classes(CategoricalColumn::CompanyType).unwrap()[0]);
        assert_eq!(profile.job_role, encoders.classes(CategoricalColumn::JobRole).unwrap()[0]);
    }

    #[test]
    fn test_train_args_convert_to_config() {
        let cfg: TrainConfig = match parse(&["train", "--n-trees", "50", "--max-depth", "8"]).unwrap().command {
            Commands::Train(a) => a.into(),
            other => panic!("expected train, got {other:?}"),
        };
        assert_eq!(cfg.n_trees, 50);
        assert_eq!(cfg.max_depth, Some(8));
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.dataset_path, "model/sample_dataset.csv");
    }
}

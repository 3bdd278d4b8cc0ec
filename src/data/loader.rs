// ============================================================
// Layer 4 — CSV Loader
// ============================================================
// Reads the training sample: a delimited file with a header row.
//
// Required columns (any order, extra columns ignored):
//   age, education-num, hours-per-week, work_experience,
//   language_skills, company_type, job_role, location,
//   remote_work, job_level, gender, estimated_salary
//
// There is no missing-value handling. A blank or non-numeric
// cell in a numeric column fails the whole load, and so does a
// missing column or an empty file. All of this happens before
// the trainer writes anything, so a bad dataset never leaves a
// half-written artifact bundle behind.
//
// Reference: csv crate documentation (ReaderBuilder, StringRecord)

use anyhow::{Context, Result};
use std::{io, path::PathBuf};

use crate::data::dataset::SalaryRecord;
use crate::domain::error::DatasetError;
use crate::domain::schema::{CategoricalColumn, Feature, FEATURE_SCHEMA, TARGET_COLUMN};
use crate::domain::traits::RecordSource;

/// Loads SalaryRecords from a CSV file on disk.
pub struct CsvLoader {
    path: PathBuf,
}

impl CsvLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for CsvLoader {
    fn load_all(&self) -> Result<Vec<SalaryRecord>> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .with_context(|| format!("Cannot open dataset '{}'", self.path.display()))?;

        let records = parse_records(reader)
            .with_context(|| format!("Invalid dataset '{}'", self.path.display()))?;

        tracing::info!("Loaded {} rows from '{}'", records.len(), self.path.display());
        Ok(records)
    }
}

/// Column positions resolved from the header row.
struct ColumnIndex {
    features: Vec<(Feature, usize)>,
    target:   usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, DatasetError> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let mut missing  = Vec::new();
        let mut features = Vec::with_capacity(FEATURE_SCHEMA.len());
        for feature in FEATURE_SCHEMA {
            match find(feature.name()) {
                Some(idx) => features.push((feature, idx)),
                None      => missing.push(feature.name().to_string()),
            }
        }
        let target = find(TARGET_COLUMN);
        if target.is_none() {
            missing.push(TARGET_COLUMN.to_string());
        }

        match target {
            Some(target) if missing.is_empty() => Ok(Self { features, target }),
            _ => Err(DatasetError::MissingColumns(missing)),
        }
    }
}

/// Parse every data row of `reader` into a SalaryRecord.
pub fn parse_records<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<SalaryRecord>, DatasetError> {
    let index = ColumnIndex::resolve(reader.headers()?)?;

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row?;
        // Row numbers are 1-based and count data rows only.
        records.push(parse_row(&row, i + 1, &index)?);
    }

    if records.is_empty() {
        return Err(DatasetError::Empty);
    }
    Ok(records)
}

fn parse_row(row: &csv::StringRecord, row_no: usize, index: &ColumnIndex) -> Result<SalaryRecord, DatasetError> {
    let cell = |idx: usize| row.get(idx).unwrap_or("");
    let number = |name: &str, idx: usize| -> Result<f64, DatasetError> {
        let raw = cell(idx);
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| DatasetError::Parse {
                row:    row_no,
                column: name.to_string(),
                value:  raw.to_string(),
            })
    };

    let mut record = SalaryRecord {
        age:              0.0,
        education_num:    0.0,
        hours_per_week:   0.0,
        work_experience:  0.0,
        language_skills:  0.0,
        company_type:     String::new(),
        job_role:         String::new(),
        location:         String::new(),
        remote_work:      String::new(),
        job_level:        String::new(),
        gender:           String::new(),
        estimated_salary: number(TARGET_COLUMN, index.target)?,
    };

    for &(feature, idx) in &index.features {
        match feature {
            Feature::Age            => record.age             = number(feature.name(), idx)?,
            Feature::EducationNum   => record.education_num   = number(feature.name(), idx)?,
            Feature::HoursPerWeek   => record.hours_per_week  = number(feature.name(), idx)?,
            Feature::WorkExperience => record.work_experience = number(feature.name(), idx)?,
            Feature::LanguageSkills => record.language_skills = number(feature.name(), idx)?,
            Feature::Categorical(col) => {
                let value = cell(idx).to_string();
                match col {
                    CategoricalColumn::CompanyType => record.company_type = value,
                    CategoricalColumn::JobRole     => record.job_role     = value,
                    CategoricalColumn::Location    => record.location     = value,
                    CategoricalColumn::RemoteWork  => record.remote_work  = value,
                    CategoricalColumn::JobLevel    => record.job_level    = value,
                    CategoricalColumn::Gender      => record.gender       = value,
                }
            }
        }
    }

    Ok(record)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "age,education-num,hours-per-week,work_experience,company_type,job_role,location,remote_work,job_level,language_skills,gender,estimated_salary";

    fn parse(text: &str) -> Result<Vec<SalaryRecord>, DatasetError> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());
        parse_records(reader)
    }

    #[test]
    fn test_parses_rows() {
        let text = format!(
            "{HEADER}\n30,13,40,2,MNC,Analyst,Pune,Yes,Junior,2,Female,41000\n\
             45,16,50,20,Startup,Manager,Delhi,No,Senior,3,Male,98000.5\n"
        );
        let records = parse(&text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].age, 30.0);
        assert_eq!(records[0].company_type, "MNC");
        assert_eq!(records[1].gender, "Male");
        assert_eq!(records[1].estimated_salary, 98000.5);
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let text = "estimated_salary,gender,language_skills,job_level,remote_work,location,job_role,company_type,work_experience,hours-per-week,education-num,age,notes\n\
                    50000,Male,1,Mid,No,Pune,Engineer,MNC,5,45,14,28,ignored\n";
        let records = parse(text).unwrap();
        assert_eq!(records[0].age, 28.0);
        assert_eq!(records[0].education_num, 14.0);
        assert_eq!(records[0].job_role, "Engineer");
        assert_eq!(records[0].estimated_salary, 50000.0);
    }

    #[test]
    fn test_missing_columns_reported() {
        let text = "age,education-num,hours-per-week\n30,13,40\n";
        match parse(text) {
            Err(DatasetError::MissingColumns(cols)) => {
                assert!(cols.contains(&"gender".to_string()));
                assert!(cols.contains(&TARGET_COLUMN.to_string()));
                assert!(!cols.contains(&"age".to_string()));
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_header_only_is_empty() {
        assert!(matches!(parse(&format!("{HEADER}\n")), Err(DatasetError::Empty)));
    }

    #[test]
    fn test_bad_number_names_row_and_column() {
        let text = format!("{HEADER}\n30,13,forty,2,MNC,Analyst,Pune,Yes,Junior,2,Female,41000\n");
        match parse(&text) {
            Err(DatasetError::Parse { row, column, value }) => {
                assert_eq!(row, 1);
                assert_eq!(column, "hours-per-week");
                assert_eq!(value, "forty");
            }
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "30,13,40,2,MNC,Analyst,Pune,Yes,Junior,2,Female,41000").unwrap();
        let records = CsvLoader::new(file.path()).load_all().unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = CsvLoader::new("/definitely/not/here.csv").load_all().unwrap_err();
        assert!(err.to_string().contains("Cannot open dataset"));
    }
}

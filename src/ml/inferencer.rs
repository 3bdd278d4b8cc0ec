// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Turns an EmployeeProfile into model input and runs it.
//
//   profile ──encode──▶ FeatureVector ──predict_row──▶ salary
//                            │
//                            └─ experience slot overwritten 1..=20
//                               ──▶ ExperienceTrend
//
// Encoding walks FEATURE_SCHEMA, the same constant the trainer
// used to build its matrix. An unknown categorical value stops
// the pipeline with EncodeError::UnknownCategory before any
// inference runs.
//
// Reference: Rust Book §13 (Iterators and Closures)

use std::ops::RangeInclusive;

use crate::domain::error::EncodeError;
use crate::domain::profile::EmployeeProfile;
use crate::domain::salary::{TrendPoint, EXPERIENCE_SWEEP};
use crate::domain::schema::{index_of, Feature, FeatureVector, FEATURE_COUNT, FEATURE_SCHEMA};
use crate::domain::traits::Regressor;
use crate::ml::bundle::ArtifactBundle;

pub struct Inferencer<'a, R> {
    bundle: &'a ArtifactBundle<R>,
}

impl<'a, R: Regressor> Inferencer<'a, R> {
    pub fn new(bundle: &'a ArtifactBundle<R>) -> Self {
        Self { bundle }
    }

    /// Lay the profile out per FEATURE_SCHEMA, encoding every
    /// categorical field through its trained encoder.
    pub fn encode(&self, profile: &EmployeeProfile) -> Result<FeatureVector, EncodeError> {
        let encoders = self.bundle.encoders();
        let mut row  = [0.0; FEATURE_COUNT];
        for (slot, feature) in row.iter_mut().zip(FEATURE_SCHEMA) {
            *slot = match feature {
                Feature::Age              => f64::from(profile.age),
                Feature::EducationNum     => f64::from(profile.education.code()),
                Feature::HoursPerWeek     => f64::from(profile.hours_per_week),
                Feature::WorkExperience   => f64::from(profile.work_experience),
                Feature::LanguageSkills   => f64::from(profile.language_skills),
                Feature::Categorical(col) => encoders.encode(col, profile.category(col))? as f64,
            };
        }
        Ok(row)
    }

    /// Single forward inference.
    pub fn predict(&self, profile: &EmployeeProfile) -> Result<f64, EncodeError> {
        let row    = self.encode(profile)?;
        let salary = self.bundle.model().predict_row(&row);
        tracing::debug!("Predicted {:.2} for features {:?}", salary, row);
        Ok(salary)
    }

    /// Salary-vs-experience trend with every other field held at
    /// the profile's values. Nothing is computed until iterated.
    pub fn trend(&self, profile: &EmployeeProfile) -> Result<ExperienceTrend<'a, R>, EncodeError> {
        Ok(ExperienceTrend {
            model: self.bundle.model(),
            base:  self.encode(profile)?,
        })
    }
}

// ─── ExperienceTrend ──────────────────────────────────────────────────────────
/// A finite, restartable sweep over EXPERIENCE_SWEEP. Each call to
/// `iter` starts again from the first experience value and runs
/// one inference per point.
pub struct ExperienceTrend<'a, R> {
    model: &'a R,
    base:  FeatureVector,
}

impl<'a, R: Regressor> ExperienceTrend<'a, R> {
    pub fn iter(&self) -> TrendIter<'a, R> {
        TrendIter {
            model: self.model,
            base:  self.base,
            years: EXPERIENCE_SWEEP,
        }
    }
}

impl<'a, R: Regressor> IntoIterator for &ExperienceTrend<'a, R> {
    type Item     = TrendPoint;
    type IntoIter = TrendIter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct TrendIter<'a, R> {
    model: &'a R,
    base:  FeatureVector,
    years: RangeInclusive<u32>,
}

impl<R: Regressor> Iterator for TrendIter<'_, R> {
    type Item = TrendPoint;

    fn next(&mut self) -> Option<TrendPoint> {
        let experience = self.years.next()?;
        let mut row    = self.base;
        row[index_of(Feature::WorkExperience)] = f64::from(experience);
        Some(TrendPoint {
            experience,
            salary: self.model.predict_row(&row),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.years.size_hint()
    }
}

impl<R: Regressor> ExactSizeIterator for TrendIter<'_, R> {}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::encoder::EncoderSet;
    use crate::domain::profile::tests::sample_profile;
    use crate::domain::schema::CategoricalColumn;
    use std::cell::Cell;

    /// Fixture model: salary = 1000 * experience + 10 * gender code,
    /// counting how many inferences it served.
    struct LinearFixture {
        calls: Cell<usize>,
    }

    impl Regressor for LinearFixture {
        fn predict_row(&self, row: &FeatureVector) -> f64 {
            self.calls.set(self.calls.get() + 1);
            1000.0 * row[3] + 10.0 * row[10]
        }
    }

    fn fixture_bundle() -> ArtifactBundle<LinearFixture> {
        let mut raw = std::collections::BTreeMap::new();
        for col in CategoricalColumn::ALL {
            let classes: Vec<String> = match col {
                CategoricalColumn::CompanyType => vec!["MNC".into(), "Startup".into()],
                CategoricalColumn::JobRole     => vec!["Analyst".into(), "Engineer".into()],
                CategoricalColumn::Location    => vec!["Bangalore".into(), "Pune".into()],
                CategoricalColumn::RemoteWork  => vec!["No".into(), "Yes".into()],
                CategoricalColumn::JobLevel    => vec!["Junior".into(), "Senior".into()],
                CategoricalColumn::Gender      => vec!["Female".into(), "Male".into()],
            };
            raw.insert(col, classes);
        }
        let encoders = EncoderSet::try_from(raw).unwrap();
        ArtifactBundle::new(LinearFixture { calls: Cell::new(0) }, encoders)
    }

    #[test]
    fn test_encode_follows_schema() {
        let bundle = fixture_bundle();
        let row    = Inferencer::new(&bundle).encode(&sample_profile()).unwrap();
        assert_eq!(row, [30.0, 13.0, 40.0, 2.0, 0.0, 0.0, 0.0, 1.0, 0.0, 2.0, 0.0]);
    }

    #[test]
    fn test_predict_uses_model() {
        let bundle  = fixture_bundle();
        let profile = EmployeeProfile { gender: "Male".into(), ..sample_profile() };
        let salary  = Inferencer::new(&bundle).predict(&profile).unwrap();
        assert_eq!(salary, 2010.0);
    }

    #[test]
    fn test_unknown_category_stops_before_inference() {
        let bundle  = fixture_bundle();
        let profile = EmployeeProfile { job_role: "Astronaut".into(), ..sample_profile() };
        let err     = Inferencer::new(&bundle).predict(&profile).unwrap_err();
        assert_eq!(
            err,
            EncodeError::UnknownCategory {
                column: CategoricalColumn::JobRole,
                value:  "Astronaut".into(),
            }
        );
        assert_eq!(bundle.model().calls.get(), 0);
    }

    #[test]
    fn test_trend_is_lazy_ordered_and_restartable() {
        let bundle = fixture_bundle();
        let trend  = Inferencer::new(&bundle).trend(&sample_profile()).unwrap();
        assert_eq!(bundle.model().calls.get(), 0);

        let first: Vec<TrendPoint> = trend.iter().collect();
        assert_eq!(first.len(), 20);
        assert_eq!(bundle.model().calls.get(), 20);
        let years: Vec<u32> = first.iter().map(|p| p.experience).collect();
        assert_eq!(years, (1..=20).collect::<Vec<_>>());
        assert_eq!(first[0].salary, 1000.0);
        assert_eq!(first[19].salary, 20_000.0);

        let again: Vec<TrendPoint> = (&trend).into_iter().collect();
        assert_eq!(first, again);
        assert_eq!(trend.iter().len(), 20);
    }
}

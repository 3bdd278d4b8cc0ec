// ============================================================
// Layer 2 — Predict Use Case
// ============================================================
// One profile in, one SalaryReport out:
//
//   1. Validate the profile's numeric ranges
//   2. Encode + infer the gross salary
//   3. Apply the flat tax rule
//   4. Sweep experience 1..=20 for the trend
//   5. Attach the static industry table
//
// The artifact bundle is loaded once in `new` and only borrowed
// afterwards. Nothing is cached between calls and nothing is
// retried: any error ends the request.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::encoder::EncoderSet;
use crate::domain::profile::EmployeeProfile;
use crate::domain::salary::{apply_tax, IndustryAverage, SalaryBreakdown, TrendPoint, INDUSTRY_AVERAGES};
use crate::domain::traits::Regressor;
use crate::infra::artifact_store::ArtifactStore;
use crate::ml::bundle::ArtifactBundle;
use crate::ml::forest::RandomForest;
use crate::ml::inferencer::Inferencer;

/// Everything the prediction pipeline returns for one profile.
#[derive(Debug, Clone, Serialize)]
pub struct SalaryReport {
    pub profile:           EmployeeProfile,
    pub breakdown:         SalaryBreakdown,
    pub trend:             Vec<TrendPoint>,
    pub industry_averages: Vec<IndustryAverage>,
}

pub struct PredictUseCase<R = RandomForest> {
    bundle: ArtifactBundle<R>,
}

impl PredictUseCase<RandomForest> {
    /// Load the persisted bundle. Fails if it is missing or corrupt.
    pub fn new(artifact_dir: &str) -> Result<Self> {
        let bundle = ArtifactStore::new(artifact_dir)
            .load_bundle()
            .context("Cannot start prediction without a valid artifact bundle")?;
        Ok(Self::from_bundle(bundle))
    }
}

impl<R: Regressor> PredictUseCase<R> {
    pub fn from_bundle(bundle: ArtifactBundle<R>) -> Self {
        Self { bundle }
    }

    pub fn encoders(&self) -> &EncoderSet {
        self.bundle.encoders()
    }

    pub fn predict(&self, profile: &EmployeeProfile) -> Result<SalaryReport> {
        profile.validate()?;

        let inferencer = Inferencer::new(&self.bundle);
        let gross      = inferencer.predict(profile)?;
        let breakdown  = apply_tax(gross);
        tracing::info!(
            "Predicted gross {:.0}, tax {:.0}, net {:.0}",
            breakdown.gross,
            breakdown.tax,
            breakdown.net
        );

        let trend: Vec<TrendPoint> = inferencer.trend(profile)?.iter().collect();
        tracing::debug!("Computed {} trend points", trend.len());

        Ok(SalaryReport {
            profile: profile.clone(),
            breakdown,
            trend,
            industry_averages: INDUSTRY_AVERAGES.to_vec(),
        })
    }
}

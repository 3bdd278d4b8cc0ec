// ============================================================
// Layer 5 — Artifact Bundle
// ============================================================
// The fitted model and the encoders it was trained with travel
// together as one immutable value. It is built once (by the
// trainer, by ArtifactStore::load_bundle, or by hand in tests)
// and then only ever borrowed by the prediction pipeline.

use crate::data::encoder::EncoderSet;
use crate::domain::traits::Regressor;
use crate::ml::forest::RandomForest;

#[derive(Debug, Clone)]
pub struct ArtifactBundle<R = RandomForest> {
    model:    R,
    encoders: EncoderSet,
}

impl<R: Regressor> ArtifactBundle<R> {
    pub fn new(model: R, encoders: EncoderSet) -> Self {
        Self { model, encoders }
    }

    pub fn model(&self) -> &R {
        &self.model
    }

    pub fn encoders(&self) -> &EncoderSet {
        &self.encoders
    }
}

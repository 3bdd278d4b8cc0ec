// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Reads and writes the artifact bundle on disk.
//
// Directory layout:
//   model/
//     model.mpk.gz        ← RandomForest, named MessagePack, gzip
//     encoders.json       ← { "company_type": [...], ... }
//     train_config.json   ← the TrainConfig that produced them
//     metrics.csv         ← see infra::metrics
//
// Saving overwrites whatever is there. There is no backup and no
// atomic rename, so a crash halfway through a save can leave the
// directory with a new model and old encoders. Re-run `train`.
//
// Loading is all-or-nothing: both files must decode, the
// encoders must cover every categorical column, the model must
// carry this build's feature schema, and every tree must be
// structurally sound. Any failure is fatal to the caller.
//
// Reference: rmp-serde and flate2 crate documentation

use anyhow::{ensure, Context, Result};
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::application::train_use_case::TrainConfig;
use crate::data::encoder::EncoderSet;
use crate::ml::bundle::ArtifactBundle;
use crate::ml::forest::RandomForest;

const MODEL_FILE:    &str = "model.mpk.gz";
const ENCODERS_FILE: &str = "encoders.json";
const CONFIG_FILE:   &str = "train_config.json";

pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write config, encoders and model, in that order.
    pub fn save_bundle(&self, bundle: &ArtifactBundle<RandomForest>, cfg: &TrainConfig) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create artifact directory '{}'", self.dir.display()))?;
        self.save_config(cfg)?;
        self.save_encoders(bundle.encoders())?;
        self.save_model(bundle.model())?;
        tracing::info!("Saved artifact bundle to '{}'", self.dir.display());
        Ok(())
    }

    pub fn load_bundle(&self) -> Result<ArtifactBundle<RandomForest>> {
        let encoders = self.load_encoders()?;
        let model    = self.load_model()?;
        tracing::info!("Loaded artifact bundle from '{}'", self.dir.display());
        Ok(ArtifactBundle::new(model, encoders))
    }

    pub fn save_model(&self, model: &RandomForest) -> Result<()> {
        let path = self.dir.join(MODEL_FILE);
        let file = File::create(&path)
            .with_context(|| format!("Cannot write model to '{}'", path.display()))?;

        let mut gz = GzEncoder::new(BufWriter::new(file), Compression::default());
        rmp_serde::encode::write_named(&mut gz, model)
            .with_context(|| format!("Cannot encode model to '{}'", path.display()))?;
        gz.finish()?.flush()?;

        tracing::debug!("Saved model ({} trees) to '{}'", model.trees().len(), path.display());
        Ok(())
    }

    pub fn load_model(&self) -> Result<RandomForest> {
        let path = self.dir.join(MODEL_FILE);
        let file = File::open(&path).with_context(|| {
            format!(
                "Cannot read model from '{}'. Have you run 'train' first?",
                path.display()
            )
        })?;

        let model: RandomForest = rmp_serde::decode::from_read(GzDecoder::new(BufReader::new(file)))
            .with_context(|| format!("Corrupt model file '{}'", path.display()))?;

        model
            .validate_schema()
            .with_context(|| format!("Model '{}' does not match this build", path.display()))?;
        ensure!(!model.trees().is_empty(), "Model '{}' contains no trees", path.display());
        ensure!(
            model.trees().iter().all(|t| t.is_well_formed()),
            "Model '{}' contains a malformed tree",
            path.display()
        );

        Ok(model)
    }

    pub fn save_encoders(&self, encoders: &EncoderSet) -> Result<()> {
        let path = self.dir.join(ENCODERS_FILE);
        let json = serde_json::to_string_pretty(encoders)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write encoders to '{}'", path.display()))?;
        tracing::debug!("Saved encoders to '{}'", path.display());
        Ok(())
    }

    pub fn load_encoders(&self) -> Result<EncoderSet> {
        let path = self.dir.join(ENCODERS_FILE);
        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "Cannot read encoders from '{}'. Have you run 'train' first?",
                path.display()
            )
        })?;
        serde_json::from_str(&json)
            .with_context(|| format!("Invalid encoders file '{}'", path.display()))
    }

    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        let path = self.dir.join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;
        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }

    pub fn load_config(&self) -> Result<TrainConfig> {
        let path = self.dir.join(CONFIG_FILE);
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;
        Ok(serde_json::from_str(&json)?)
    }
}

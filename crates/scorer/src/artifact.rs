// Rust guideline compliant 2026-10-19

//! Versioned on-disk model artifact.
//!
//! The artifact is a JSON document carrying an explicit `schema_version` so a
//! file written by an incompatible build is reported as such, distinct from a
//! missing or unparsable file.

use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use domain::{FeatureVector, ScoreModel};
use serde::{Deserialize, Serialize};

use crate::forest::{ForestParams, RegressionForest, training_samples};

/// Schema version written by this build; the only one it reads.
pub const SCHEMA_VERSION: u32 = 1;

/// Name reported by [`ForestModel`].
pub const MODEL_NAME: &str = "FOREST";

/// Version reported by [`ForestModel`].
pub const MODEL_VERSION: &str = "1";

// ---------------------------------------------------------------------------
// ArtifactError
// ---------------------------------------------------------------------------

/// Why a model artifact could not be loaded or saved.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    /// No file at the configured path.
    #[error("model artifact not found at {path}")]
    Missing {
        /// Path that was probed.
        path: String,
    },
    /// The file exists but could not be read or written.
    #[error("model artifact I/O error: {0}")]
    Io(#[from] io::Error),
    /// The file is not a valid artifact document.
    #[error("model artifact malformed: {reason}")]
    Malformed {
        /// Parser or validation message.
        reason: String,
    },
    /// The file was written with a different schema version.
    #[error("model artifact schema version {found} is not supported (expected {expected})")]
    IncompatibleVersion {
        /// Version found in the file.
        found: u32,
        /// Version this build reads.
        expected: u32,
    },
}

/// Only the version tag, read before the full document.
#[derive(Deserialize)]
struct VersionProbe {
    schema_version: u32,
}

// ---------------------------------------------------------------------------
// ForestModel
// ---------------------------------------------------------------------------

/// A trained forest plus the metadata persisted alongside it.
///
/// Implements the `domain::ScoreModel` port. Immutable once built or loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestModel {
    schema_version: u32,
    model_name: String,
    model_version: String,
    trained_at: DateTime<Utc>,
    forest: RegressionForest,
}

impl ForestModel {
    /// Fit a fresh forest on the embedded training set.
    #[must_use]
    pub fn train(params: &ForestParams) -> Self {
        let forest = RegressionForest::fit(&training_samples(), params);
        tracing::info!(
            trees = forest.tree_count(),
            max_depth = params.max_depth,
            seed = params.seed,
            "scorer.model.trained"
        );
        Self {
            schema_version: SCHEMA_VERSION,
            model_name: MODEL_NAME.to_owned(),
            model_version: MODEL_VERSION.to_owned(),
            trained_at: Utc::now(),
            forest,
        }
    }

    /// Read and validate an artifact.
    ///
    /// # Errors
    ///
    /// - [`ArtifactError::Missing`] when no file exists at `path`;
    /// - [`ArtifactError::Io`] when the file cannot be read;
    /// - [`ArtifactError::IncompatibleVersion`] when the version tag differs
    ///   from [`SCHEMA_VERSION`];
    /// - [`ArtifactError::Malformed`] when the JSON does not parse or the
    ///   forest fails structural validation.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ArtifactError::Missing { path: path.display().to_string() });
            }
            Err(e) => return Err(ArtifactError::Io(e)),
        };

        let probe: VersionProbe = serde_json::from_slice(&bytes)
            .map_err(|e| ArtifactError::Malformed { reason: e.to_string() })?;
        if probe.schema_version != SCHEMA_VERSION {
            return Err(ArtifactError::IncompatibleVersion {
                found: probe.schema_version,
                expected: SCHEMA_VERSION,
            });
        }

        let model: Self = serde_json::from_slice(&bytes)
            .map_err(|e| ArtifactError::Malformed { reason: e.to_string() })?;
        if !model.forest.is_well_formed() {
            return Err(ArtifactError::Malformed {
                reason: "forest has no trees or a broken node link".to_owned(),
            });
        }
        Ok(model)
    }

    /// Write this model as pretty-printed JSON, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::Io`] when the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ArtifactError> {
        let json = serde_json::to_vec_pretty(self)
            .map_err(|e| ArtifactError::Malformed { reason: e.to_string() })?;
        std::fs::write(path, json)?;
        Ok(())
    }

    #[must_use]
    pub fn trained_at(&self) -> DateTime<Utc> {
        self.trained_at
    }

    #[must_use]
    pub fn forest(&self) -> &RegressionForest {
        &self.forest
    }

    /// Split share per feature name.
    #[must_use]
    pub fn feature_importance(&self) -> Vec<(&'static str, f64)> {
        FeatureVector::NAMES
            .into_iter()
            .zip(self.forest.feature_importance())
            .collect()
    }
}

impl ScoreModel for ForestModel {
    fn predict(&self, features: &FeatureVector) -> f64 {
        self.forest.predict(&features.to_array())
    }

    fn name(&self) -> &str {
        &self.model_name
    }

    fn version(&self) -> &str {
        &self.model_version
    }
}

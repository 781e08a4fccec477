// Rust guideline compliant 2026-10-19

//! Score predictor for the lead-triage workspace.
//!
//! [`Scorer`] turns `LeadAttributes` into a `Score` using one of two
//! strategies: a trained `domain::ScoreModel` fed by the [`encoder`], or the
//! deterministic [`rule_based`] formula. The strategy is fixed when the
//! scorer is built, once, at startup via [`Scorer::initialize`].
//!
//! Entry points: [`Scorer::initialize`], [`Scorer::predict`],
//! [`Scorer::predict_rule_based`]. Configuration via [`ScorerConfig::builder`].

pub mod artifact;
pub mod encoder;
pub mod forest;
pub mod rule_based;

use std::path::PathBuf;

use domain::{LeadAttributes, Score, ScoreModel};

pub use artifact::{ArtifactError, ForestModel};
pub use forest::ForestParams;

// ---------------------------------------------------------------------------
// ScorerError
// ---------------------------------------------------------------------------

/// Errors raised while configuring a [`Scorer`].
#[derive(Debug, thiserror::Error)]
pub enum ScorerError {
    /// The supplied configuration is invalid.
    #[error("invalid scorer configuration: {reason}")]
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// ScorerConfig + builder
// ---------------------------------------------------------------------------

/// Startup configuration for [`Scorer::initialize`].
///
/// Construct via [`ScorerConfig::builder`].
#[derive(Debug, Clone)]
pub struct ScorerConfig {
    /// Where the model artifact is read from and written to. `None` keeps the
    /// model in memory only.
    pub artifact_path: Option<PathBuf>,
    /// Train a fresh model when the artifact cannot be loaded. When `false`
    /// the scorer falls back to the rule-based strategy instead.
    pub retrain_if_unavailable: bool,
    /// Hyper-parameters used when training.
    pub forest: ForestParams,
}

/// Builder for [`ScorerConfig`].
///
/// Obtain via [`ScorerConfig::builder`]; finalize with [`build`](Self::build).
#[derive(Debug)]
pub struct ScorerConfigBuilder {
    artifact_path: Option<PathBuf>,
    retrain_if_unavailable: bool,
    forest: ForestParams,
}

impl ScorerConfig {
    /// Create a builder.
    ///
    /// Default values: no artifact path, `retrain_if_unavailable = true`,
    /// 100 trees of depth 10, seed 42.
    #[must_use]
    pub fn builder() -> ScorerConfigBuilder {
        ScorerConfigBuilder {
            artifact_path: None,
            retrain_if_unavailable: true,
            forest: ForestParams::default(),
        }
    }
}

impl ScorerConfigBuilder {
    #[must_use]
    pub fn artifact_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.artifact_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn retrain_if_unavailable(mut self, retrain: bool) -> Self {
        self.retrain_if_unavailable = retrain;
        self
    }

    /// Fix the bootstrap seed used when training.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.forest.seed = seed;
        self
    }

    #[must_use]
    pub fn trees(mut self, trees: usize) -> Self {
        self.forest.trees = trees;
        self
    }

    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.forest.max_depth = max_depth;
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScorerError::InvalidConfig`] when `trees` or `max_depth` is zero.
    #[must_use = "the Result must be checked; use ? or unwrap"]
    pub fn build(self) -> Result<ScorerConfig, ScorerError> {
        if self.forest.trees == 0 {
            return Err(ScorerError::InvalidConfig { reason: "trees must be >= 1".to_owned() });
        }
        if self.forest.max_depth == 0 {
            return Err(ScorerError::InvalidConfig { reason: "max_depth must be >= 1".to_owned() });
        }
        Ok(ScorerConfig {
            artifact_path: self.artifact_path,
            retrain_if_unavailable: self.retrain_if_unavailable,
            forest: self.forest,
        })
    }
}

// ---------------------------------------------------------------------------
// Scorer
// ---------------------------------------------------------------------------

/// Lead score predictor.
///
/// Generic over any `ScoreModel`; holds `None` when running on the
/// rule-based strategy. Never mutated after construction, so a shared
/// reference may be used from any number of callers.
#[derive(Debug)]
pub struct Scorer<M: ScoreModel = ForestModel> {
    model: Option<M>,
}

impl Scorer {
    /// Scorer that always uses the deterministic formula.
    #[must_use]
    pub fn rule_based() -> Self {
        Self { model: None }
    }

    /// Build the process-wide scorer from `config`.
    ///
    /// Loads the artifact when a path is configured. If that fails for any
    /// reason the cause is logged and, depending on
    /// `config.retrain_if_unavailable`, a fresh model is trained on the
    /// embedded samples (and saved back when a path is set) or the scorer
    /// falls back to the rule-based strategy. Never fails.
    #[must_use]
    pub fn initialize(config: &ScorerConfig) -> Self {
        if let Some(path) = &config.artifact_path {
            match ForestModel::load(path) {
                Ok(model) => {
                    tracing::info!(
                        path = %path.display(),
                        trained_at = %model.trained_at(),
                        "scorer.artifact.loaded"
                    );
                    return Self::with_model(model);
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "scorer.artifact.unavailable"
                    );
                }
            }
        }

        if !config.retrain_if_unavailable {
            tracing::info!("scorer.strategy.rule_based");
            return Self::rule_based();
        }

        let model = ForestModel::train(&config.forest);
        if let Some(path) = &config.artifact_path {
            match model.save(path) {
                Ok(()) => tracing::info!(path = %path.display(), "scorer.artifact.saved"),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "scorer.artifact.save_failed"
                    );
                }
            }
        }
        Self::with_model(model)
    }
}

impl<M: ScoreModel> Scorer<M> {
    /// Scorer backed by `model`.
    #[must_use]
    pub fn with_model(model: M) -> Self {
        Self { model: Some(model) }
    }

    /// The trained model, when one is active.
    #[must_use]
    pub fn model(&self) -> Option<&M> {
        self.model.as_ref()
    }

    #[must_use]
    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// Score `attributes` with the active strategy. Pure and total.
    #[must_use]
    pub fn predict(&self, attributes: &LeadAttributes) -> Score {
        match &self.model {
            Some(model) => trained_score(model, attributes),
            None => rule_based::score(attributes),
        }
    }

    /// Score with the deterministic formula regardless of the active strategy.
    #[must_use]
    pub fn predict_rule_based(&self, attributes: &LeadAttributes) -> Score {
        rule_based::score(attributes)
    }
}

/// Model output plus `(engagement - 1) * 2`, truncated toward zero and
/// clamped to `0..=100`.
fn trained_score<M: ScoreModel>(model: &M, attributes: &LeadAttributes) -> Score {
    let raw = model.predict(&encoder::encode(attributes));
    let boost = (i32::from(attributes.engagement_level.get()) - 1) * 2;
    // `as` saturates out-of-range values and maps NaN to 0.
    #[expect(clippy::cast_possible_truncation, reason = "saturating cast, clamped below")]
    let combined = (raw + f64::from(boost)).trunc() as i64;
    let score = Score::saturating(combined);
    tracing::debug!(model = model.name(), raw, boost, score = score.get(), "scorer.predict");
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{BudgetRange, CompanySize, EngagementLevel, FeatureVector, LeadSource, Timeline};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tempfile::TempDir;

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    struct ConstantModel {
        value: f64,
        calls: AtomicU32,
    }

    impl ConstantModel {
        fn new(value: f64) -> Self {
            Self { value, calls: AtomicU32::new(0) }
        }
    }

    impl ScoreModel for ConstantModel {
        fn predict(&self, _features: &FeatureVector) -> f64 {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.value
        }

        fn name(&self) -> &str {
            "CONST"
        }

        fn version(&self) -> &str {
            "0"
        }
    }

    fn attrs(
        source: &str,
        size: &str,
        engagement: i64,
        budget: &str,
        timeline: &str,
    ) -> LeadAttributes {
        LeadAttributes {
            source: LeadSource::from_raw(source),
            company_size: CompanySize::from_raw(size),
            engagement_level: EngagementLevel::new(engagement).unwrap(),
            budget_range: BudgetRange::from_raw(budget),
            timeline: Timeline::from_raw(timeline),
        }
    }

    fn artifact_path(dir: &TempDir) -> PathBuf {
        dir.path().join("lead-scorer.json")
    }

    // ------------------------------------------------------------------
    // Config validation
    // ------------------------------------------------------------------

    #[test]
    fn config_rejects_zero_trees() {
        let result = ScorerConfig::builder().trees(0).build();
        assert!(matches!(result, Err(ScorerError::InvalidConfig { .. })));
    }

    #[test]
    fn config_rejects_zero_depth() {
        let result = ScorerConfig::builder().max_depth(0).build();
        assert!(matches!(result, Err(ScorerError::InvalidConfig { .. })));
    }

    #[test]
    fn config_defaults() {
        let config = ScorerConfig::builder().build().unwrap();
        assert!(config.artifact_path.is_none());
        assert!(config.retrain_if_unavailable);
        assert_eq!(config.forest, ForestParams::default());
    }

    // ------------------------------------------------------------------
    // Rule-based strategy
    // ------------------------------------------------------------------

    #[test]
    fn rule_based_scenarios() {
        let scorer = Scorer::rule_based();
        assert!(!scorer.is_trained());
        assert_eq!(scorer.predict(&attrs("referral", "large", 5, "high", "immediate")).get(), 100);
        let warm = attrs("website", "medium", 3, "medium", "short_term");
        let cool = attrs("cold_call", "small", 2, "unknown", "long_term");
        assert_eq!(scorer.predict(&warm).get(), 75);
        assert_eq!(scorer.predict(&cool).get(), 45);
        assert_eq!(scorer.predict(&attrs("other", "small", 1, "unknown", "unknown")).get(), 30);
    }

    // ------------------------------------------------------------------
    // Trained strategy
    // ------------------------------------------------------------------

    #[test]
    fn trained_path_adds_engagement_boost() {
        let scorer = Scorer::with_model(ConstantModel::new(50.0));
        // engagement 4 -> boost 6
        assert_eq!(scorer.predict(&attrs("website", "small", 4, "low", "unknown")).get(), 56);
        // engagement 0 -> boost -2
        assert_eq!(scorer.predict(&attrs("website", "small", 0, "low", "unknown")).get(), 48);
        assert_eq!(scorer.model().unwrap().calls.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn trained_path_truncates_toward_zero() {
        let scorer = Scorer::with_model(ConstantModel::new(50.9));
        assert_eq!(scorer.predict(&attrs("website", "small", 1, "low", "unknown")).get(), 50);
    }

    #[test]
    fn trained_path_clamps_to_range() {
        let high = Scorer::with_model(ConstantModel::new(98.0));
        assert_eq!(high.predict(&attrs("referral", "large", 5, "high", "immediate")), Score::MAX);
        let low = Scorer::with_model(ConstantModel::new(-40.0));
        assert_eq!(low.predict(&attrs("other", "small", 0, "unknown", "unknown")), Score::MIN);
        let nan = Scorer::with_model(ConstantModel::new(f64::NAN));
        assert!(nan.predict(&attrs("other", "small", 0, "unknown", "unknown")) <= Score::MAX);
    }

    #[test]
    fn rule_based_stays_available_with_a_model() {
        let scorer = Scorer::with_model(ConstantModel::new(0.0));
        let a = attrs("website", "medium", 3, "medium", "short_term");
        assert_eq!(scorer.predict_rule_based(&a).get(), 75);
        assert_eq!(scorer.model().unwrap().calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn trained_forest_scores_full_vocabulary_in_range() {
        let config = ScorerConfig::builder().trees(10).build().unwrap();
        let scorer = Scorer::initialize(&config);
        assert!(scorer.is_trained());
        for source in LeadSource::ALL {
            for budget in BudgetRange::ALL {
                for level in 0..=5 {
                    let a = LeadAttributes {
                        source,
                        company_size: CompanySize::Medium,
                        engagement_level: EngagementLevel::new(level).unwrap(),
                        budget_range: budget,
                        timeline: Timeline::ShortTerm,
                    };
                    let s = scorer.predict(&a);
                    assert!(s <= Score::MAX);
                    assert_eq!(s, scorer.predict(&a));
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Initialization and fallback
    // ------------------------------------------------------------------

    #[test]
    fn missing_artifact_without_retrain_falls_back_to_rules() {
        let dir = tempfile::tempdir().unwrap();
        let path = artifact_path(&dir);
        let config = ScorerConfig::builder()
            .artifact_path(&path)
            .retrain_if_unavailable(false)
            .build()
            .unwrap();
        let scorer = Scorer::initialize(&config);
        assert!(!scorer.is_trained());
        assert!(!path.exists(), "fallback must not write an artifact");
    }

    #[test]
    fn missing_artifact_with_retrain_trains_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = artifact_path(&dir);
        let config = ScorerConfig::builder().artifact_path(&path).trees(5).build().unwrap();

        let first = Scorer::initialize(&config);
        assert!(first.is_trained());
        assert!(path.exists(), "retrain must persist a fresh artifact");

        // Second start loads the saved model instead of retraining.
        let second = Scorer::initialize(&config);
        assert_eq!(
            second.model().unwrap().trained_at(),
            first.model().unwrap().trained_at()
        );
    }

    #[test]
    fn corrupt_artifact_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = artifact_path(&dir);
        std::fs::write(&path, b"not json").unwrap();
        let config = ScorerConfig::builder().artifact_path(&path).trees(5).build().unwrap();

        let scorer = Scorer::initialize(&config);
        assert!(scorer.is_trained());
        assert!(ForestModel::load(&path).is_ok(), "corrupt artifact must be overwritten");
    }
}

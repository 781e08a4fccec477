// Rust guideline compliant 2026-10-19

//! Triage component -- loads leads from a `LeadStore`, rescores them,
//! records recommendations, and delivers alerts and follow-up reminders to a
//! `NotificationStore`.
//!
//! Entry points: [`Triage::triage_once`], [`Triage::run`], plus the batch
//! helpers [`score_all`], [`generate_report`], [`bulk_recommendations`], and
//! [`top_leads`]. Configuration via [`TriageConfig::builder`].

pub mod batch;

use std::time::Duration;

use chrono::NaiveDate;
use domain::{LeadStore, NotificationError, NotificationStore, ScoreModel, StoreError};
use recommender::RecommendationEngine;
use scorer::Scorer;

pub use batch::{
    LeadRecommendation, PENDING, Report, bulk_recommendations, generate_report, score_all,
    top_leads,
};

// ---------------------------------------------------------------------------
// TriageError
// ---------------------------------------------------------------------------

/// Hard errors that abort a triage pass.
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    /// The supplied configuration is invalid.
    #[error("invalid triage configuration: {reason}")]
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
    /// Leads could not be loaded.
    #[error("lead load error: {0}")]
    Load(StoreError),
    /// Unread notifications could not be listed.
    #[error("notification listing error: {0}")]
    Unread(NotificationError),
}

/// A per-lead failure collected during a pass instead of aborting it.
#[derive(Debug, thiserror::Error)]
pub enum LeadFailure {
    /// The updated lead could not be saved.
    #[error("save failed for lead {lead_id}: {source}")]
    Save {
        lead_id: uuid::Uuid,
        source: StoreError,
    },
    /// A notification for the lead could not be delivered.
    #[error("notification failed for lead {lead_id}: {source}")]
    Notify {
        lead_id: uuid::Uuid,
        source: NotificationError,
    },
}

// ---------------------------------------------------------------------------
// TriageConfig + builder
// ---------------------------------------------------------------------------

/// Runtime configuration for a [`Triage`].
///
/// Construct via [`TriageConfig::builder`].
#[derive(Debug)]
pub struct TriageConfig {
    /// Delay between successive passes.
    pub poll_interval: Duration,
    /// Optional upper bound on the number of passes. `None` means infinite.
    pub iterations: Option<u64>,
}

/// Builder for [`TriageConfig`].
///
/// Obtain via [`TriageConfig::builder`]; finalize with [`build`](Self::build).
#[derive(Debug)]
pub struct TriageConfigBuilder {
    poll_interval: Duration,
    iterations: Option<u64>,
}

impl TriageConfig {
    /// Create a builder.
    ///
    /// Default values: `poll_interval = 100 ms`, `iterations = None`.
    #[must_use]
    pub fn builder() -> TriageConfigBuilder {
        TriageConfigBuilder {
            // Demo cadence; lower for tests.
            poll_interval: Duration::from_millis(100),
            iterations: None,
        }
    }
}

impl TriageConfigBuilder {
    /// Override the inter-pass delay.
    #[must_use]
    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Set a finite pass count. Without this the loop runs until cancelled.
    #[must_use]
    pub fn iterations(mut self, n: u64) -> Self {
        self.iterations = Some(n);
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::InvalidConfig`] when `iterations` is zero.
    #[must_use = "the Result must be checked; use ? or unwrap"]
    pub fn build(self) -> Result<TriageConfig, TriageError> {
        if self.iterations == Some(0) {
            return Err(TriageError::InvalidConfig {
                reason: "iterations must be >= 1 when set".to_owned(),
            });
        }
        Ok(TriageConfig { poll_interval: self.poll_interval, iterations: self.iterations })
    }
}

// ---------------------------------------------------------------------------
// TriageOutcome
// ---------------------------------------------------------------------------

/// Counters and collected failures of one pass.
#[derive(Debug, Default)]
pub struct TriageOutcome {
    /// Leads loaded from the store.
    pub scanned: usize,
    /// Leads whose score changed.
    pub rescored: usize,
    /// Leads written back to the store.
    pub saved: usize,
    /// Alerts delivered.
    pub alerts: usize,
    /// Follow-up reminders delivered.
    pub reminders: usize,
    /// Best-effort failures; none of them stopped the pass.
    pub failures: Vec<LeadFailure>,
}

// ---------------------------------------------------------------------------
// Triage
// ---------------------------------------------------------------------------

/// Periodic lead triage over injected ports.
///
/// Holds no adapter references -- store, notifications, scorer, and engine
/// are injected per call.
#[derive(Debug)]
pub struct Triage {
    config: TriageConfig,
}

impl Triage {
    #[must_use]
    pub fn new(config: TriageConfig) -> Self {
        Self { config }
    }

    /// One triage pass dated `today`.
    ///
    /// Every lead is rescored. A lead whose score changed, or whose stored
    /// action differs from what the rules now yield (including no action
    /// yet), gets a fresh recommendation (action and follow-up date), is
    /// saved, and has its alert delivered when the action is high priority.
    /// Due follow-up reminders are then delivered unless one is already
    /// unread. A pass over unchanged leads saves nothing and raises no
    /// alerts.
    ///
    /// Save and delivery failures are collected in the outcome; a lead whose
    /// save failed gets no alert.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::Load`] when leads cannot be loaded, or
    /// [`TriageError::Unread`] when unread notifications cannot be listed.
    pub async fn triage_once<S, N, M>(
        &self,
        store: &S,
        notifications: &N,
        scorer: &Scorer<M>,
        engine: &RecommendationEngine,
        today: NaiveDate,
    ) -> Result<TriageOutcome, TriageError>
    where
        S: LeadStore,
        N: NotificationStore,
        M: ScoreModel,
    {
        let mut leads = store.load_all().await.map_err(TriageError::Load)?;
        let mut outcome = TriageOutcome { scanned: leads.len(), ..TriageOutcome::default() };

        for lead in &mut leads {
            let score = scorer.predict(&lead.attributes);
            let rescored = score != lead.ai_score;
            if rescored {
                lead.ai_score = score;
                outcome.rescored += 1;
            }
            // Rules also read status and raw attributes, so an unchanged
            // score does not imply an unchanged action.
            let stale = lead.recommended_action != Some(engine.recommend(lead).action);
            if !rescored && !stale {
                continue;
            }

            let (recommendation, alert) = engine.apply(lead, today);
            tracing::debug!(
                lead_id = %lead.id,
                score = score.get(),
                action = recommendation.action.as_str(),
                "triage.lead.recommended"
            );

            if let Err(source) = store.save(lead).await {
                tracing::warn!(lead_id = %lead.id, error = %source, "triage.lead.save_failed");
                outcome.failures.push(LeadFailure::Save { lead_id: lead.id, source });
                continue;
            }
            outcome.saved += 1;

            if let Some(alert) = alert {
                match notifications.append(&alert).await {
                    Ok(()) => outcome.alerts += 1,
                    Err(source) => {
                        tracing::warn!(lead_id = %lead.id, error = %source, "triage.alert.failed");
                        outcome.failures.push(LeadFailure::Notify { lead_id: lead.id, source });
                    }
                }
            }
        }

        let unread = notifications.unread().await.map_err(TriageError::Unread)?;
        for reminder in recommender::follow_up_reminders(&leads, &unread, today) {
            match notifications.append(&reminder).await {
                Ok(()) => outcome.reminders += 1,
                Err(source) => {
                    tracing::warn!(
                        lead_id = %reminder.lead_id,
                        error = %source,
                        "triage.reminder.failed"
                    );
                    outcome
                        .failures
                        .push(LeadFailure::Notify { lead_id: reminder.lead_id, source });
                }
            }
        }

        tracing::info!(
            scanned = outcome.scanned,
            rescored = outcome.rescored,
            saved = outcome.saved,
            alerts = outcome.alerts,
            reminders = outcome.reminders,
            failures = outcome.failures.len(),
            "triage.pass.completed"
        );
        Ok(outcome)
    }

    /// Run passes until `config.iterations` is reached.
    ///
    /// Each pass is dated with the current UTC day and followed by a
    /// `poll_interval` sleep. Per-lead failures are logged by
    /// [`triage_once`](Self::triage_once) and never stop the loop.
    ///
    /// # Errors
    ///
    /// Returns the first hard [`TriageError`].
    pub async fn run<S, N, M>(
        &self,
        store: &S,
        notifications: &N,
        scorer: &Scorer<M>,
        engine: &RecommendationEngine,
    ) -> Result<(), TriageError>
    where
        S: LeadStore,
        N: NotificationStore,
        M: ScoreModel,
    {
        let mut count = 0u64;
        loop {
            let today = chrono::Utc::now().date_naive();
            self.triage_once(store, notifications, scorer, engine, today).await?;

            count += 1;
            tracing::info!(iteration = count, "triage.run.iteration");

            if let Some(max) = self.config.iterations
                && count >= max
            {
                tracing::info!("triage.run.stopped: iteration limit reached");
                return Ok(());
            }

            tokio::time::sleep(self.config.poll_interval).await;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

// Rust guideline compliant 2026-10-19

//! Lead-triage pipeline entry point.
//!
//! Wires the seeder and the triage loop to the in-memory DEMO adapters: the
//! sample roster is stored first, then random leads keep arriving while the
//! triage loop rescores them, records recommendations, and logs alerts and
//! follow-up reminders. On CTRL+C the final report is logged as JSON.
//!
//! # Usage
//!
//! ```text
//! # Infinite mode -- press CTRL+C to stop
//! RUST_LOG=info cargo run --bin lead_triage
//!
//! # Also show per-lead debug output
//! RUST_LOG=debug cargo run --bin lead_triage
//! ```
//!
//! The trained model is read from `LEAD_TRIAGE_MODEL` (default
//! `lead_model.json`) and retrained and written there when missing.

mod adapters;
mod summary;

use adapters::in_memory_store::InMemoryStore;
use adapters::log_notifications::LogNotifications;
use anyhow::Context as _;
use recommender::RecommendationEngine;
use scorer::{Scorer, ScorerConfig};
use seeder::{LeadGenerator, SeederConfig};
use std::time::Duration;
use tracing::Instrument as _;
use triage::{Triage, TriageConfig};

/// Artifact file used when `LEAD_TRIAGE_MODEL` is unset.
const DEFAULT_MODEL_PATH: &str = "lead_model.json";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize the tracing subscriber before any async work.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // -- Scorer: load the artifact, or retrain and save it --
    let model_path =
        std::env::var("LEAD_TRIAGE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_owned());
    let scorer_config = ScorerConfig::builder()
        .artifact_path(model_path)
        .build()
        .context("failed to build scorer config")?;
    let scorer = Scorer::initialize(&scorer_config);
    tracing::info!(trained = scorer.is_trained(), "main.scorer.ready");
    let engine = RecommendationEngine::new();

    // -- Stores: the sample roster goes in before the first pass --
    let store = InMemoryStore::new();
    let notifications = LogNotifications::new();
    let roster = seeder::sample_leads().context("failed to build the sample roster")?;
    seeder::seed_store(&store, &roster)
        .await
        .context("failed to seed the sample roster")?;

    // -- Seeder: 5 random leads every 2 s; set .iterations(n) for a finite feed --
    let seeder_config = SeederConfig::builder(5)
        .poll_interval(Duration::from_secs(2))
        .build()
        .context("failed to build seeder config")?;
    let generator = LeadGenerator::new(seeder_config);

    // -- Triage: one pass per second keeps logs readable in real time --
    let triage_config = TriageConfig::builder()
        .poll_interval(Duration::from_secs(1))
        .build()
        .context("failed to build triage config")?;
    let triage = Triage::new(triage_config);

    let pipeline = async {
        let (s, t) = tokio::join!(
            generator
                .run(&store)
                .instrument(tracing::info_span!("seeder")),
            triage
                .run(&store, &notifications, &scorer, &engine)
                .instrument(tracing::info_span!("triage"))
        );
        s.context("seeder failed").and(t.context("triage failed"))
    };

    // Race the pipeline against CTRL+C, then summarize whatever was stored.
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("main.shutdown: ctrl_c received");
        }
        result = pipeline => {
            result?;
        }
    }

    summary::log_summary(&store, &scorer, &engine).await
}

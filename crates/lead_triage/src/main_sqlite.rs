// Rust guideline compliant 2026-10-19

//! Lead-triage pipeline entry point -- `SQLite` storage demo.
//!
//! Same flow as the main `lead_triage` binary except that leads and
//! notifications live in a `SQLite` file (`lead_triage.db` in the current
//! working directory by default). Only this entry point and the adapter
//! differ; the domain and pipeline crates are untouched.
//!
//! # Usage
//!
//! ```text
//! # Infinite mode -- press CTRL+C to stop
//! RUST_LOG=info cargo run --bin lead_triage_sqlite
//!
//! # Use another database file
//! LEAD_TRIAGE_DB=sqlite:/tmp/leads.db RUST_LOG=info cargo run --bin lead_triage_sqlite
//! ```
//!
//! The sample roster is stored only when the database holds no leads, so a
//! second run resumes from the previous state.

mod summary;

// Load sqlite_store directly so it only enters this binary's module tree,
// avoiding dead_code warnings in the `lead_triage` binary.
#[path = "adapters/sqlite_store.rs"]
mod sqlite_store;

use anyhow::Context as _;
use domain::LeadStore as _;
use recommender::RecommendationEngine;
use scorer::{Scorer, ScorerConfig};
use seeder::{LeadGenerator, SeederConfig};
use sqlite_store::SqliteStore;
use std::time::Duration;
use tracing::Instrument as _;
use triage::{Triage, TriageConfig};

/// Database used when `LEAD_TRIAGE_DB` is unset.
const DEFAULT_DB_URL: &str = "sqlite:lead_triage.db";
/// Artifact file used when `LEAD_TRIAGE_MODEL` is unset.
const DEFAULT_MODEL_PATH: &str = "lead_model.json";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let model_path =
        std::env::var("LEAD_TRIAGE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_owned());
    let scorer_config = ScorerConfig::builder()
        .artifact_path(model_path)
        .build()
        .context("failed to build scorer config")?;
    let scorer = Scorer::initialize(&scorer_config);
    tracing::info!(trained = scorer.is_trained(), "main.scorer.ready");
    let engine = RecommendationEngine::new();

    // SqliteStore serves both ports: leads and notifications share one file.
    let db_url = std::env::var("LEAD_TRIAGE_DB").unwrap_or_else(|_| DEFAULT_DB_URL.to_owned());
    let store = SqliteStore::new(&db_url)
        .await
        .with_context(|| format!("failed to open SQLite store at {db_url}"))?;

    let existing = store.load_all().await.context("failed to read stored leads")?;
    if existing.is_empty() {
        let roster = seeder::sample_leads().context("failed to build the sample roster")?;
        seeder::seed_store(&store, &roster)
            .await
            .context("failed to seed the sample roster")?;
        tracing::info!(count = roster.len(), "main.roster.seeded");
    } else {
        tracing::info!(count = existing.len(), "main.roster.resumed");
    }

    let seeder_config = SeederConfig::builder(5)
        .poll_interval(Duration::from_secs(2))
        .build()
        .context("failed to build seeder config")?;
    let generator = LeadGenerator::new(seeder_config);

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
                .run(&store, &store, &scorer, &engine)
                .instrument(tracing::info_span!("triage"))
        );
        s.context("seeder failed").and(t.context("triage failed"))
    };

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

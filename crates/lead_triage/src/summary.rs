// Rust guideline compliant 2026-10-19

//! End-of-run summary shared by both binaries.

use anyhow::Context as _;
use domain::LeadStore;
use recommender::RecommendationEngine;
use scorer::Scorer;

/// How many high-priority leads the summary lists.
const TOP_LEADS: usize = 5;

/// Log the aggregate report as JSON, the hottest leads, and (for a trained
/// model) the per-feature split shares.
///
/// # Errors
///
/// Returns an error when the leads cannot be loaded or the report cannot be
/// serialized.
pub async fn log_summary<S: LeadStore>(
    store: &S,
    scorer: &Scorer,
    engine: &RecommendationEngine,
) -> anyhow::Result<()> {
    let leads = store
        .load_all()
        .await
        .context("failed to load leads for the final report")?;

    let report = triage::generate_report(&leads);
    let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
    tracing::info!(report = %json, "main.report");

    for lead in triage::top_leads(&leads, TOP_LEADS) {
        tracing::info!(
            lead_id = %lead.id,
            name = %lead.name,
            score = lead.ai_score.get(),
            action = lead.recommended_action.map_or(triage::PENDING, |key| key.as_str()),
            "main.top_lead"
        );
    }

    let open = triage::bulk_recommendations(engine, &leads);
    tracing::info!(open_leads = open.len(), "main.open_leads");

    if let Some(model) = scorer.model() {
        for (feature, share) in model.feature_importance() {
            tracing::info!(feature, share, "main.feature_importance");
        }
    }
    Ok(())
}

// Rust guideline compliant 2026-10-19

//! Whole-collection operations: rescoring, reporting, bulk recommendations.

use std::collections::BTreeMap;

use domain::{Lead, Priority, Recommendation, ScoreModel};
use recommender::RecommendationEngine;
use scorer::Scorer;
use serde::Serialize;

/// Key used in [`Report::action_counts`] for leads with no recommended action.
pub const PENDING: &str = "pending";

/// Re-score every lead; returns how many scores changed.
///
/// Only `ai_score` is written, and only when the new value differs, so a
/// second pass over unchanged attributes returns 0.
pub fn score_all<M: ScoreModel>(scorer: &Scorer<M>, leads: &mut [Lead]) -> usize {
    let mut changed = 0;
    for lead in leads.iter_mut() {
        let score = scorer.predict(&lead.attributes);
        if score != lead.ai_score {
            tracing::debug!(
                lead_id = %lead.id,
                old = lead.ai_score.get(),
                new = score.get(),
                "triage.lead.rescored"
            );
            lead.ai_score = score;
            changed += 1;
        }
    }
    changed
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Aggregate view of a lead collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub total: usize,
    pub high_count: usize,
    pub medium_count: usize,
    pub low_count: usize,
    /// Keyed by action key, or [`PENDING`] when none is recorded.
    pub action_counts: BTreeMap<&'static str, usize>,
    /// Keyed by status name.
    pub status_breakdown: BTreeMap<&'static str, usize>,
}

/// Aggregate `leads` in a single pass.
#[must_use]
pub fn generate_report(leads: &[Lead]) -> Report {
    let mut report = Report { total: leads.len(), ..Report::default() };
    for lead in leads {
        match lead.priority() {
            Priority::High => report.high_count += 1,
            Priority::Medium => report.medium_count += 1,
            Priority::Low => report.low_count += 1,
        }
        let action = lead.recommended_action.map_or(PENDING, |key| key.as_str());
        *report.action_counts.entry(action).or_default() += 1;
        *report.status_breakdown.entry(lead.status.as_str()).or_default() += 1;
    }
    report
}

// ---------------------------------------------------------------------------
// Bulk recommendations + top leads
// ---------------------------------------------------------------------------

/// A recommendation paired with the lead it was made for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadRecommendation {
    pub lead_id: uuid::Uuid,
    pub name: String,
    pub recommendation: Recommendation,
}

/// Recommendations for every open (new or qualified) lead, in input order.
#[must_use]
pub fn bulk_recommendations(
    engine: &RecommendationEngine,
    leads: &[Lead],
) -> Vec<LeadRecommendation> {
    leads
        .iter()
        .filter(|lead| lead.status.is_open())
        .map(|lead| LeadRecommendation {
            lead_id: lead.id,
            name: lead.name.clone(),
            recommendation: engine.recommend(lead),
        })
        .collect()
}

/// At most `limit` high-tier leads, highest score first.
#[must_use]
pub fn top_leads(leads: &[Lead], limit: usize) -> Vec<&Lead> {
    let mut hot: Vec<&Lead> =
        leads.iter().filter(|lead| lead.priority() == Priority::High).collect();
    hot.sort_by(|a, b| b.ai_score.cmp(&a.ai_score));
    hot.truncate(limit);
    hot
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{
        ActionKey, BudgetRange, CompanySize, EngagementLevel, LeadAttributes, LeadSource,
        LeadStatus, Score, Timeline,
    };

    fn lead(
        source: &str,
        size: &str,
        engagement: i64,
        budget: &str,
        timeline: &str,
        status: LeadStatus,
    ) -> Lead {
        Lead::new(
            "Test Lead",
            "lead@example.com",
            LeadAttributes {
                source: LeadSource::from_raw(source),
                company_size: CompanySize::from_raw(size),
                engagement_level: EngagementLevel::new(engagement).unwrap(),
                budget_range: BudgetRange::from_raw(budget),
                timeline: Timeline::from_raw(timeline),
            },
        )
        .with_status(status)
    }

    fn scenarios() -> Vec<Lead> {
        vec![
            lead("referral", "large", 5, "high", "immediate", LeadStatus::Qualified),
            lead("website", "medium", 3, "medium", "short_term", LeadStatus::New),
            lead("cold_call", "small", 2, "unknown", "long_term", LeadStatus::New),
            lead("other", "small", 1, "unknown", "unknown", LeadStatus::New),
        ]
    }

    fn with_score(mut lead: Lead, score: u8) -> Lead {
        lead.ai_score = Score::new(score).unwrap();
        lead
    }

    // ------------------------------------------------------------------
    // score_all
    // ------------------------------------------------------------------

    #[test]
    fn score_all_updates_then_settles() {
        let scorer = Scorer::rule_based();
        let mut leads = scenarios();
        assert_eq!(score_all(&scorer, &mut leads), 4);
        let scores: Vec<u8> = leads.iter().map(|l| l.ai_score.get()).collect();
        assert_eq!(scores, vec![100, 75, 45, 30]);
        assert_eq!(score_all(&scorer, &mut leads), 0, "second pass must change nothing");
    }

    #[test]
    fn score_all_counts_only_changed_leads() {
        let scorer = Scorer::rule_based();
        let mut leads = scenarios();
        leads[0].ai_score = Score::MAX;
        assert_eq!(score_all(&scorer, &mut leads), 3);
    }

    #[test]
    fn score_all_on_empty_collection() {
        assert_eq!(score_all(&Scorer::rule_based(), &mut []), 0);
    }

    // ------------------------------------------------------------------
    // generate_report
    // ------------------------------------------------------------------

    #[test]
    fn report_counts_tiers_actions_and_statuses() {
        let mut leads = scenarios();
        score_all(&Scorer::rule_based(), &mut leads);
        leads[0].recommended_action = Some(ActionKey::CallImmediately);
        leads[3].recommended_action = Some(ActionKey::NurtureCampaign);

        let report = generate_report(&leads);
        assert_eq!(report.total, 4);
        assert_eq!((report.high_count, report.medium_count, report.low_count), (2, 1, 1));
        assert_eq!(report.action_counts.get("call_immediately"), Some(&1));
        assert_eq!(report.action_counts.get("nurture_campaign"), Some(&1));
        assert_eq!(report.action_counts.get(PENDING), Some(&2));
        assert_eq!(report.status_breakdown.get("new"), Some(&3));
        assert_eq!(report.status_breakdown.get("qualified"), Some(&1));
        assert_eq!(
            report.high_count + report.medium_count + report.low_count,
            report.total
        );
    }

    #[test]
    fn report_of_nothing_is_empty() {
        assert_eq!(generate_report(&[]), Report::default());
    }

    #[test]
    fn report_serializes_with_string_keys() {
        let mut leads = scenarios();
        score_all(&Scorer::rule_based(), &mut leads);
        let json = serde_json::to_value(generate_report(&leads)).unwrap();
        assert_eq!(json["total"], 4);
        assert_eq!(json["action_counts"]["pending"], 4);
    }

    // ------------------------------------------------------------------
    // bulk_recommendations + top_leads
    // ------------------------------------------------------------------

    #[test]
    fn bulk_recommendations_skip_closed_leads() {
        let mut leads = scenarios();
        leads.push(lead("referral", "large", 5, "high", "immediate", LeadStatus::Converted));
        leads.push(lead("referral", "large", 5, "high", "immediate", LeadStatus::Lost));
        score_all(&Scorer::rule_based(), &mut leads);

        let recs = bulk_recommendations(&RecommendationEngine::new(), &leads);
        let ids: Vec<_> = recs.iter().map(|r| r.lead_id).collect();
        let expected: Vec<_> = leads[..4].iter().map(|l| l.id).collect();
        assert_eq!(ids, expected);
        assert_eq!(recs[3].recommendation.action, ActionKey::NurtureCampaign);
    }

    #[test]
    fn top_leads_are_high_tier_sorted_and_limited() {
        let base = || lead("website", "small", 1, "low", "unknown", LeadStatus::New);
        let leads = vec![
            with_score(base(), 72),
            with_score(base(), 95),
            with_score(base(), 69),
            with_score(base(), 88),
            with_score(base(), 70),
        ];
        let top: Vec<u8> = top_leads(&leads, 3).iter().map(|l| l.ai_score.get()).collect();
        assert_eq!(top, vec![95, 88, 72]);
        assert_eq!(top_leads(&leads, 10).len(), 4);
        assert!(top_leads(&leads, 0).is_empty());
    }
}

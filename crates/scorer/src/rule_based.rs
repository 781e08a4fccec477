// Rust guideline compliant 2026-10-19

//! Deterministic weighted-sum scoring.
//!
//! The reference strategy: always available, reproducible across processes,
//! and independent of the ordinal codes in [`crate::encoder`]. Each term reads
//! the categorical value directly.

use domain::{BudgetRange, CompanySize, LeadAttributes, LeadSource, Score, Timeline};

/// Points contributed by each attribute before the 100-point cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub source: u8,
    pub company_size: u8,
    pub engagement: u8,
    pub budget: u8,
    pub timeline: u8,
}

impl ScoreBreakdown {
    /// Uncapped sum of all terms (at most 120).
    #[must_use]
    pub fn raw_total(&self) -> u8 {
        self.source + self.company_size + self.engagement + self.budget + self.timeline
    }

    /// Sum capped at 100. Every term is non-negative so no floor is needed.
    #[must_use]
    pub fn score(&self) -> Score {
        Score::saturating(i64::from(self.raw_total()))
    }
}

#[must_use]
pub fn source_points(source: LeadSource) -> u8 {
    match source {
        LeadSource::Referral => 25,
        LeadSource::LinkedIn => 20,
        LeadSource::Website => 15,
        LeadSource::ColdCall | LeadSource::Advertisement => 10,
        LeadSource::Other | LeadSource::Unrecognized => 5,
    }
}

#[must_use]
pub fn company_size_points(size: CompanySize) -> u8 {
    match size {
        CompanySize::Enterprise => 25,
        CompanySize::Large => 20,
        CompanySize::Medium => 15,
        CompanySize::Small | CompanySize::Unrecognized => 10,
    }
}

/// `enterprise` has no row in the budget table and falls to the default, 5.
#[must_use]
pub fn budget_points(budget: BudgetRange) -> u8 {
    match budget {
        BudgetRange::High => 25,
        BudgetRange::Medium => 15,
        BudgetRange::Low => 10,
        BudgetRange::Unknown | BudgetRange::Enterprise => 5,
    }
}

#[must_use]
pub fn timeline_points(timeline: Timeline) -> u8 {
    match timeline {
        Timeline::Immediate => 20,
        Timeline::ShortTerm => 15,
        Timeline::LongTerm => 10,
        Timeline::Unknown => 5,
    }
}

/// Per-term points for `attributes`.
#[must_use]
pub fn breakdown(attributes: &LeadAttributes) -> ScoreBreakdown {
    ScoreBreakdown {
        source: source_points(attributes.source),
        company_size: company_size_points(attributes.company_size),
        engagement: attributes.engagement_level.get() * 5,
        budget: budget_points(attributes.budget_range),
        timeline: timeline_points(attributes.timeline),
    }
}

/// Deterministic score of `attributes`, `min(100, sum of terms)`.
#[must_use]
pub fn score(attributes: &LeadAttributes) -> Score {
    breakdown(attributes).score()
}

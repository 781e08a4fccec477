// Rust guideline compliant 2026-10-19

//! Ordinal feature encoding for trained models.
//!
//! Every table is total: values outside the vocabulary take the documented
//! default code instead of failing. The codes are part of the trained-model
//! contract and must not be renumbered.

use domain::{BudgetRange, CompanySize, FeatureVector, LeadAttributes, LeadSource, Timeline};

/// A categorical attribute that can be encoded from a raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoricalAttribute {
    Source,
    CompanySize,
    BudgetRange,
    Timeline,
}

/// Code for an unrecognized source (same as `website`).
pub const SOURCE_DEFAULT: u8 = 1;
/// Code for an unrecognized company size (same as `medium`).
pub const COMPANY_SIZE_DEFAULT: u8 = 1;
/// Code for an unrecognized budget (same as `unknown`).
pub const BUDGET_DEFAULT: u8 = 3;
/// Code for an unrecognized timeline (same as `unknown`).
pub const TIMELINE_DEFAULT: u8 = 2;

#[must_use]
pub fn encode_source(source: LeadSource) -> u8 {
    match source {
        LeadSource::Referral => 0,
        LeadSource::Website => 1,
        LeadSource::ColdCall => 2,
        LeadSource::LinkedIn => 3,
        LeadSource::Advertisement => 4,
        LeadSource::Other => 5,
        LeadSource::Unrecognized => SOURCE_DEFAULT,
    }
}

#[must_use]
pub fn encode_company_size(size: CompanySize) -> u8 {
    match size {
        CompanySize::Small => 0,
        CompanySize::Medium => 1,
        CompanySize::Large => 2,
        CompanySize::Enterprise => 3,
        CompanySize::Unrecognized => COMPANY_SIZE_DEFAULT,
    }
}

/// `high` and `enterprise` share a code.
#[must_use]
pub fn encode_budget(budget: BudgetRange) -> u8 {
    match budget {
        BudgetRange::Low => 0,
        BudgetRange::Medium => 1,
        BudgetRange::High | BudgetRange::Enterprise => 2,
        BudgetRange::Unknown => BUDGET_DEFAULT,
    }
}

/// `long_term` and `unknown` share a code.
#[must_use]
pub fn encode_timeline(timeline: Timeline) -> u8 {
    match timeline {
        Timeline::Immediate => 0,
        Timeline::ShortTerm => 1,
        Timeline::LongTerm | Timeline::Unknown => TIMELINE_DEFAULT,
    }
}

/// Encode one raw categorical value. Total: never fails.
#[must_use]
pub fn encode_raw(attribute: CategoricalAttribute, raw: &str) -> u8 {
    match attribute {
        CategoricalAttribute::Source => encode_source(LeadSource::from_raw(raw)),
        CategoricalAttribute::CompanySize => encode_company_size(CompanySize::from_raw(raw)),
        CategoricalAttribute::BudgetRange => encode_budget(BudgetRange::from_raw(raw)),
        CategoricalAttribute::Timeline => encode_timeline(Timeline::from_raw(raw)),
    }
}

/// Encode all five attributes. Engagement passes through unchanged.
#[must_use]
pub fn encode(attributes: &LeadAttributes) -> FeatureVector {
    FeatureVector {
        source: encode_source(attributes.source),
        company_size: encode_company_size(attributes.company_size),
        engagement: attributes.engagement_level.get(),
        budget: encode_budget(attributes.budget_range),
        timeline: encode_timeline(attributes.timeline),
    }
}

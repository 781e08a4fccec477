// Rust guideline compliant 2026-10-19

//! Ordered recommendation rules.
//!
//! Each rule is a plain [`Condition`] value paired with an action; the engine
//! walks [`RULES`] in order and the first satisfied condition wins. Every
//! field of a condition is an independent conjunct, and an unset field places
//! no constraint.

use domain::{ActionKey, BudgetRange, CompanySize, Lead, LeadSource, LeadStatus, Timeline};

/// Conjunction of comparisons over a scored lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    /// Inclusive lower bound on `ai_score`.
    pub min_score: Option<u8>,
    /// Exclusive upper bound on `ai_score`.
    pub below_score: Option<u8>,
    /// Inclusive lower bound on engagement.
    pub min_engagement: Option<u8>,
    /// Inclusive upper bound on engagement.
    pub max_engagement: Option<u8>,
    /// Accepted timelines; empty accepts any.
    pub timelines: &'static [Timeline],
    pub source: Option<LeadSource>,
    /// Accepted budgets; empty accepts any.
    pub budgets: &'static [BudgetRange],
    pub status: Option<LeadStatus>,
    pub company_size: Option<CompanySize>,
}

impl Condition {
    /// Condition satisfied by every lead.
    pub const ANY: Self = Self {
        min_score: None,
        below_score: None,
        min_engagement: None,
        max_engagement: None,
        timelines: &[],
        source: None,
        budgets: &[],
        status: None,
        company_size: None,
    };

    /// Whether `lead` satisfies every set field.
    #[must_use]
    pub fn matches(&self, lead: &Lead) -> bool {
        let score = lead.ai_score.get();
        let engagement = lead.attributes.engagement_level.get();
        let attrs = &lead.attributes;

        self.min_score.is_none_or(|min| score >= min)
            && self.below_score.is_none_or(|bound| score < bound)
            && self.min_engagement.is_none_or(|min| engagement >= min)
            && self.max_engagement.is_none_or(|max| engagement <= max)
            && (self.timelines.is_empty() || self.timelines.contains(&attrs.timeline))
            && self.source.is_none_or(|source| attrs.source == source)
            && (self.budgets.is_empty() || self.budgets.contains(&attrs.budget_range))
            && self.status.is_none_or(|status| lead.status == status)
            && self.company_size.is_none_or(|size| attrs.company_size == size)
    }
}

/// One entry of the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// Position in evaluation order, starting at 1.
    pub number: u8,
    pub condition: Condition,
    pub action: ActionKey,
}

impl Rule {
    #[must_use]
    pub fn matches(&self, lead: &Lead) -> bool {
        self.condition.matches(lead)
    }
}

/// The rule table, in evaluation order.
pub const RULES: [Rule; 10] = [
    Rule {
        number: 1,
        condition: Condition {
            min_score: Some(70),
            min_engagement: Some(4),
            timelines: &[Timeline::Immediate, Timeline::ShortTerm],
            ..Condition::ANY
        },
        action: ActionKey::CallImmediately,
    },
    Rule {
        number: 2,
        condition: Condition {
            min_score: Some(70),
            timelines: &[Timeline::Immediate],
            ..Condition::ANY
        },
        action: ActionKey::ScheduleMeeting,
    },
    Rule {
        number: 3,
        condition: Condition {
            min_score: Some(70),
            source: Some(LeadSource::Referral),
            ..Condition::ANY
        },
        action: ActionKey::CallImmediately,
    },
    Rule {
        number: 4,
        condition: Condition {
            min_score: Some(40),
            below_score: Some(70),
            min_engagement: Some(3),
            ..Condition::ANY
        },
        action: ActionKey::FollowUpEmail,
    },
    Rule {
        number: 5,
        condition: Condition {
            min_score: Some(40),
            budgets: &[BudgetRange::High, BudgetRange::Enterprise],
            ..Condition::ANY
        },
        action: ActionKey::ScheduleMeeting,
    },
    Rule {
        number: 6,
        condition: Condition {
            min_score: Some(25),
            below_score: Some(40),
            source: Some(LeadSource::Referral),
            ..Condition::ANY
        },
        action: ActionKey::FollowUpEmail,
    },
    Rule {
        number: 7,
        condition: Condition {
            below_score: Some(25),
            max_engagement: Some(2),
            ..Condition::ANY
        },
        action: ActionKey::Reconnect,
    },
    Rule {
        number: 8,
        condition: Condition {
            below_score: Some(40),
            status: Some(LeadStatus::New),
            ..Condition::ANY
        },
        action: ActionKey::NurtureCampaign,
    },
    Rule {
        number: 9,
        condition: Condition {
            min_score: Some(70),
            company_size: Some(CompanySize::Enterprise),
            ..Condition::ANY
        },
        action: ActionKey::Escalate,
    },
    Rule {
        number: 10,
        condition: Condition {
            min_score: Some(40),
            status: Some(LeadStatus::Qualified),
            ..Condition::ANY
        },
        action: ActionKey::ScheduleMeeting,
    },
];

/// First rule of `rules` satisfied by `lead`.
#[must_use]
pub fn first_match<'a>(rules: &'a [Rule], lead: &Lead) -> Option<&'a Rule> {
    rules.iter().find(|rule| rule.matches(lead))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{EngagementLevel, LeadAttributes, Score};

    fn lead(score: u8, engagement: i64, timeline: Timeline, source: LeadSource) -> Lead {
        let mut lead = Lead::new(
            "Test",
            "test@example.com",
            LeadAttributes {
                source,
                company_size: CompanySize::Small,
                engagement_level: EngagementLevel::new(engagement).unwrap(),
                budget_range: BudgetRange::Low,
                timeline,
            },
        );
        lead.ai_score = Score::new(score).unwrap();
        lead
    }

    // ------------------------------------------------------------------
    // Condition semantics
    // ------------------------------------------------------------------

    #[test]
    fn any_matches_everything() {
        assert!(Condition::ANY.matches(&lead(0, 0, Timeline::Unknown, LeadSource::Other)));
        assert!(Condition::ANY.matches(&lead(100, 5, Timeline::Immediate, LeadSource::Referral)));
    }

    #[test]
    fn score_bounds_are_half_open() {
        let band = Condition { min_score: Some(40), below_score: Some(70), ..Condition::ANY };
        assert!(!band.matches(&lead(39, 3, Timeline::Unknown, LeadSource::Website)));
        assert!(band.matches(&lead(40, 3, Timeline::Unknown, LeadSource::Website)));
        assert!(band.matches(&lead(69, 3, Timeline::Unknown, LeadSource::Website)));
        assert!(!band.matches(&lead(70, 3, Timeline::Unknown, LeadSource::Website)));
    }

    #[test]
    fn engagement_bounds_are_inclusive() {
        let low = Condition { max_engagement: Some(2), ..Condition::ANY };
        assert!(low.matches(&lead(10, 2, Timeline::Unknown, LeadSource::Website)));
        assert!(!low.matches(&lead(10, 3, Timeline::Unknown, LeadSource::Website)));
    }

    // ------------------------------------------------------------------
    // Table shape
    // ------------------------------------------------------------------

    #[test]
    fn rules_are_numbered_in_order() {
        for (index, rule) in RULES.iter().enumerate() {
            assert_eq!(usize::from(rule.number), index + 1);
        }
    }

    #[test]
    fn earlier_rule_wins() {
        // Satisfies rules 1, 2 and 3; rule 1 must be picked.
        let hot = lead(90, 5, Timeline::Immediate, LeadSource::Referral);
        assert_eq!(first_match(&RULES, &hot).map(|r| r.number), Some(1));
    }

    #[test]
    fn no_match_for_mid_score_unengaged_new_lead() {
        let quiet = lead(45, 2, Timeline::LongTerm, LeadSource::ColdCall);
        assert!(first_match(&RULES, &quiet).is_none());
    }
}

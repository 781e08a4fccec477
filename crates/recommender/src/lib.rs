// Rust guideline compliant 2026-10-19

//! Next-action recommendations for scored leads.
//!
//! [`RecommendationEngine`] evaluates the ordered [`rules::RULES`] table
//! against a lead, falls back to a score band when nothing matches, and
//! decorates the result from the static [`catalog`]. [`RecommendationEngine::apply`]
//! also records the action on the lead, schedules the next follow-up, and
//! builds an alert for high-priority actions.
//!
//! Entry points: [`RecommendationEngine::recommend`],
//! [`RecommendationEngine::apply`], [`follow_up_reminders`].

pub mod catalog;
pub mod rules;

use chrono::{Days, NaiveDate};
use domain::{
    ActionKey, Lead, Notification, NotificationKind, Priority, Recommendation,
    RecommendationOrigin,
};

use crate::rules::{RULES, Rule};

/// Reason attached to default-band recommendations.
pub const DEFAULT_REASON: &str = "Default recommendation based on score";

// ---------------------------------------------------------------------------
// RecommendationEngine
// ---------------------------------------------------------------------------

/// Fixed-order rule interpreter.
///
/// Stateless apart from its rule table; every method takes `&self`.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationEngine {
    rules: &'static [Rule],
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationEngine {
    /// Engine over the standard ten-rule table.
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: &RULES }
    }

    /// Engine over a custom table. Rules are still evaluated in slice order.
    #[must_use]
    pub const fn with_rules(rules: &'static [Rule]) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    /// First rule satisfied by `lead`, if any.
    #[must_use]
    pub fn matching_rule(&self, lead: &Lead) -> Option<&'static Rule> {
        rules::first_match(self.rules, lead)
    }

    /// Exactly one recommendation for `lead`. Pure and total.
    #[must_use]
    pub fn recommend(&self, lead: &Lead) -> Recommendation {
        let (action, origin, reason) = match self.matching_rule(lead) {
            Some(rule) => (
                rule.action,
                RecommendationOrigin::Rule(rule.number),
                reason_for(rule.action, lead),
            ),
            None => (
                default_action(lead),
                RecommendationOrigin::DefaultBand,
                DEFAULT_REASON.to_owned(),
            ),
        };
        tracing::debug!(
            lead_id = %lead.id,
            score = lead.ai_score.get(),
            action = action.as_str(),
            ?origin,
            "recommender.recommend"
        );

        let entry = catalog::entry(action);
        Recommendation {
            action,
            label: entry.label,
            priority: entry.priority,
            description: entry.description,
            icon: entry.icon,
            reason,
            origin,
        }
    }

    /// Recommend, then record the result on `lead`.
    ///
    /// Sets `recommended_action` and `next_followup` (high: +1 day,
    /// medium: +3, low: +7). Returns the alert to deliver when the action is
    /// high priority. Identity fields and the score are left untouched.
    pub fn apply(
        &self,
        lead: &mut Lead,
        today: NaiveDate,
    ) -> (Recommendation, Option<Notification>) {
        let recommendation = self.recommend(lead);
        lead.recommended_action = Some(recommendation.action);
        lead.next_followup = Some(follow_up_date(recommendation.priority, today));
        let alert = alert_for(lead, &recommendation, today);
        (recommendation, alert)
    }
}

/// Band fallback when no rule matches: high score calls, medium emails,
/// low nurtures.
#[must_use]
pub fn default_action(lead: &Lead) -> ActionKey {
    match lead.priority() {
        Priority::High => ActionKey::CallImmediately,
        Priority::Medium => ActionKey::FollowUpEmail,
        Priority::Low => ActionKey::NurtureCampaign,
    }
}

/// Explanation text for a rule-produced `action`.
#[must_use]
pub fn reason_for(action: ActionKey, lead: &Lead) -> String {
    let attrs = &lead.attributes;
    let score = lead.ai_score;
    match action {
        ActionKey::CallImmediately => {
            format!("High score ({score}) and {} timeline", attrs.timeline)
        }
        ActionKey::FollowUpEmail => format!("Medium score ({score}) with good engagement"),
        ActionKey::ScheduleMeeting => format!("Strong potential - {} budget", attrs.budget_range),
        ActionKey::NurtureCampaign => format!("Low score ({score}) - needs nurturing"),
        ActionKey::Escalate => {
            format!("Enterprise lead ({}) requires attention", attrs.company_size)
        }
        ActionKey::Reconnect => {
            format!("Low engagement ({}/5) - reconnect later", attrs.engagement_level)
        }
    }
}

/// Date of the next follow-up for an action of `priority`.
#[must_use]
pub fn follow_up_date(priority: Priority, today: NaiveDate) -> NaiveDate {
    let days = match priority {
        Priority::High => 1,
        Priority::Medium => 3,
        Priority::Low => 7,
    };
    add_days(today, days)
}

/// Alert for `recommendation`, or `None` unless it is high priority.
#[must_use]
pub fn alert_for(
    lead: &Lead,
    recommendation: &Recommendation,
    today: NaiveDate,
) -> Option<Notification> {
    if recommendation.priority != Priority::High {
        return None;
    }
    Some(Notification {
        id: uuid::Uuid::new_v4(),
        lead_id: lead.id,
        kind: NotificationKind::Alert,
        title: format!("Action Required: {}", lead.name),
        message: format!(
            "{} {} - {}",
            recommendation.icon, recommendation.label, recommendation.description
        ),
        priority: Priority::High,
        action_date: add_days(today, 1),
        is_read: false,
    })
}

// ---------------------------------------------------------------------------
// Follow-up reminders
// ---------------------------------------------------------------------------

/// Reminders for open leads whose follow-up date has come.
///
/// A lead qualifies when its status is new or qualified, its
/// `next_followup` is on or before `today`, and `existing` holds no unread
/// reminder for it. Output follows input order.
#[must_use]
pub fn follow_up_reminders(
    leads: &[Lead],
    existing: &[Notification],
    today: NaiveDate,
) -> Vec<Notification> {
    leads
        .iter()
        .filter(|lead| lead.status.is_open())
        .filter(|lead| lead.next_followup.is_some_and(|due| due <= today))
        .filter(|lead| {
            !existing.iter().any(|n| {
                n.lead_id == lead.id && n.kind == NotificationKind::Reminder && !n.is_read
            })
        })
        .map(|lead| Notification {
            id: uuid::Uuid::new_v4(),
            lead_id: lead.id,
            kind: NotificationKind::Reminder,
            title: format!("Follow-up Reminder: {}", lead.name),
            message: format!(
                "It's time to follow up with {} from {}",
                lead.name,
                lead.company.as_deref().unwrap_or("Unknown")
            ),
            priority: Priority::Medium,
            action_date: add_days(today, 1),
            is_read: false,
        })
        .collect()
}

fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Condition;
    use domain::{
        BudgetRange, CompanySize, EngagementLevel, LeadAttributes, LeadSource, LeadStatus, Score,
        Timeline,
    };

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    fn lead(
        score: u8,
        engagement: i64,
        timeline: Timeline,
        source: LeadSource,
        budget: BudgetRange,
        status: LeadStatus,
        size: CompanySize,
    ) -> Lead {
        let mut lead = Lead::new(
            "Grace Hopper",
            "grace@example.com",
            LeadAttributes {
                source,
                company_size: size,
                engagement_level: EngagementLevel::new(engagement).unwrap(),
                budget_range: budget,
                timeline,
            },
        )
        .with_status(status);
        lead.ai_score = Score::new(score).unwrap();
        lead
    }

    /// Plain lead that matches no rule at any score unless overridden.
    fn plain(score: u8, engagement: i64) -> Lead {
        lead(
            score,
            engagement,
            Timeline::LongTerm,
            LeadSource::Website,
            BudgetRange::Low,
            LeadStatus::Qualified,
            CompanySize::Small,
        )
    }

    fn origin_and_action(lead: &Lead) -> (RecommendationOrigin, ActionKey) {
        let r = RecommendationEngine::new().recommend(lead);
        (r.origin, r.action)
    }

    // ------------------------------------------------------------------
    // Reference scenarios
    // ------------------------------------------------------------------

    #[test]
    fn scenario_hot_referral_hits_rule_1() {
        let l = lead(
            100,
            5,
            Timeline::Immediate,
            LeadSource::Referral,
            BudgetRange::High,
            LeadStatus::Qualified,
            CompanySize::Large,
        );
        let r = RecommendationEngine::new().recommend(&l);
        assert_eq!(r.origin, RecommendationOrigin::Rule(1));
        assert_eq!(r.action, ActionKey::CallImmediately);
        assert_eq!(r.reason, "High score (100) and immediate timeline");
    }

    #[test]
    fn scenario_balanced_website_uses_default_band() {
        let l = lead(
            75,
            3,
            Timeline::ShortTerm,
            LeadSource::Website,
            BudgetRange::Medium,
            LeadStatus::New,
            CompanySize::Medium,
        );
        let r = RecommendationEngine::new().recommend(&l);
        assert_eq!(r.origin, RecommendationOrigin::DefaultBand);
        assert_eq!(r.action, ActionKey::CallImmediately);
        assert_eq!(r.reason, DEFAULT_REASON);
    }

    #[test]
    fn scenario_cold_call_uses_default_band() {
        let l = lead(
            45,
            2,
            Timeline::LongTerm,
            LeadSource::ColdCall,
            BudgetRange::Unknown,
            LeadStatus::New,
            CompanySize::Small,
        );
        assert_eq!(
            origin_and_action(&l),
            (RecommendationOrigin::DefaultBand, ActionKey::FollowUpEmail)
        );
    }

    #[test]
    fn scenario_cold_lead_nurtured_without_alert() {
        let mut l = lead(
            30,
            1,
            Timeline::Unknown,
            LeadSource::Other,
            BudgetRange::Unknown,
            LeadStatus::New,
            CompanySize::Small,
        );
        let (r, alert) = RecommendationEngine::new().apply(&mut l, today());
        assert_eq!(r.origin, RecommendationOrigin::Rule(8));
        assert_eq!(r.action, ActionKey::NurtureCampaign);
        assert_eq!(r.reason, "Low score (30) - needs nurturing");
        assert!(alert.is_none());
    }

    // ------------------------------------------------------------------
    // Each rule in isolation
    // ------------------------------------------------------------------

    #[test]
    fn rule_2_immediate_timeline_schedules_meeting() {
        let l = lead(
            80,
            2,
            Timeline::Immediate,
            LeadSource::Website,
            BudgetRange::Low,
            LeadStatus::New,
            CompanySize::Small,
        );
        assert_eq!(
            origin_and_action(&l),
            (RecommendationOrigin::Rule(2), ActionKey::ScheduleMeeting)
        );
    }

    #[test]
    fn rule_3_high_score_referral_calls() {
        let l = lead(
            80,
            2,
            Timeline::LongTerm,
            LeadSource::Referral,
            BudgetRange::Low,
            LeadStatus::New,
            CompanySize::Small,
        );
        assert_eq!(
            origin_and_action(&l),
            (RecommendationOrigin::Rule(3), ActionKey::CallImmediately)
        );
    }

    #[test]
    fn rule_4_engaged_medium_score_emails() {
        let r = RecommendationEngine::new().recommend(&plain(50, 3));
        assert_eq!((r.origin, r.action), (RecommendationOrigin::Rule(4), ActionKey::FollowUpEmail));
        assert_eq!(r.reason, "Medium score (50) with good engagement");
    }

    #[test]
    fn rule_5_big_budget_schedules_meeting() {
        for budget in [BudgetRange::High, BudgetRange::Enterprise] {
            let l = lead(
                55,
                2,
                Timeline::LongTerm,
                LeadSource::Website,
                budget,
                LeadStatus::New,
                CompanySize::Small,
            );
            let r = RecommendationEngine::new().recommend(&l);
            assert_eq!(
                (r.origin, r.action),
                (RecommendationOrigin::Rule(5), ActionKey::ScheduleMeeting)
            );
            assert_eq!(r.reason, format!("Strong potential - {budget} budget"));
        }
    }

    #[test]
    fn rule_6_low_referral_emails() {
        let l = lead(
            30,
            3,
            Timeline::LongTerm,
            LeadSource::Referral,
            BudgetRange::Low,
            LeadStatus::New,
            CompanySize::Small,
        );
        assert_eq!(
            origin_and_action(&l),
            (RecommendationOrigin::Rule(6), ActionKey::FollowUpEmail)
        );
    }

    #[test]
    fn rule_7_cold_unengaged_reconnects() {
        let r = RecommendationEngine::new().recommend(&plain(20, 2));
        assert_eq!((r.origin, r.action), (RecommendationOrigin::Rule(7), ActionKey::Reconnect));
        assert_eq!(r.reason, "Low engagement (2/5) - reconnect later");
    }

    #[test]
    fn rule_9_enterprise_escalates() {
        let l = lead(
            80,
            2,
            Timeline::LongTerm,
            LeadSource::Website,
            BudgetRange::Low,
            LeadStatus::Qualified,
            CompanySize::Enterprise,
        );
        let r = RecommendationEngine::new().recommend(&l);
        assert_eq!((r.origin, r.action), (RecommendationOrigin::Rule(9), ActionKey::Escalate));
        assert_eq!(r.reason, "Enterprise lead (enterprise) requires attention");
    }

    #[test]
    fn rule_10_qualified_schedules_meeting() {
        let r = RecommendationEngine::new().recommend(&plain(50, 2));
        assert_eq!(
            (r.origin, r.action),
            (RecommendationOrigin::Rule(10), ActionKey::ScheduleMeeting)
        );
    }

    #[test]
    fn default_band_low_nurtures() {
        // Qualified, score 30, engagement 3: rules 6, 7 and 8 all miss.
        let r = RecommendationEngine::new().recommend(&plain(30, 3));
        assert_eq!(
            (r.origin, r.action),
            (RecommendationOrigin::DefaultBand, ActionKey::NurtureCampaign)
        );
    }

    #[test]
    fn custom_rule_table_replaces_the_standard_one() {
        static ESCALATE_ALL: [Rule; 1] = [Rule {
            number: 1,
            condition: Condition { min_score: Some(10), ..Condition::ANY },
            action: ActionKey::Escalate,
        }];
        let engine = RecommendationEngine::with_rules(&ESCALATE_ALL);
        assert_eq!(engine.rules().len(), 1);
        assert_eq!(RecommendationEngine::new().rules().len(), RULES.len());

        let r = engine.recommend(&plain(50, 3));
        assert_eq!((r.origin, r.action), (RecommendationOrigin::Rule(1), ActionKey::Escalate));
        // Below every custom condition the default band still answers.
        let r = engine.recommend(&plain(5, 3));
        assert_eq!(
            (r.origin, r.action),
            (RecommendationOrigin::DefaultBand, ActionKey::NurtureCampaign)
        );
    }

    // ------------------------------------------------------------------
    // Exactly one recommendation, consistent with the table
    // ------------------------------------------------------------------

    #[test]
    fn origin_is_always_the_first_satisfied_rule() {
        let engine = RecommendationEngine::new();
        for score in (0..=100).step_by(5) {
            for engagement in 0..=5 {
                for timeline in Timeline::ALL {
                    for status in LeadStatus::ALL {
                        let l = lead(
                            score,
                            engagement,
                            timeline,
                            LeadSource::Referral,
                            BudgetRange::Medium,
                            status,
                            CompanySize::Enterprise,
                        );
                        let r = engine.recommend(&l);
                        let first = RULES.iter().position(|rule| rule.matches(&l));
                        match (r.origin, first) {
                            (RecommendationOrigin::Rule(n), Some(i)) => {
                                assert_eq!(usize::from(n), i + 1);
                                assert_eq!(r.action, RULES[i].action);
                            }
                            (RecommendationOrigin::DefaultBand, None) => {
                                assert_eq!(r.action, default_action(&l));
                            }
                            other => panic!("inconsistent origin {other:?} for {l:?}"),
                        }
                        assert_eq!(r.priority, catalog::entry(r.action).priority);
                    }
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // apply: follow-up date and alert
    // ------------------------------------------------------------------

    #[test]
    fn apply_high_priority_emits_alert() {
        let mut l = lead(
            100,
            5,
            Timeline::Immediate,
            LeadSource::Referral,
            BudgetRange::High,
            LeadStatus::Qualified,
            CompanySize::Large,
        );
        let before = l.clone();
        let (r, alert) = RecommendationEngine::new().apply(&mut l, today());
        let alert = alert.unwrap();

        assert_eq!(l.recommended_action, Some(r.action));
        assert_eq!(l.next_followup, NaiveDate::from_ymd_opt(2026, 3, 11));
        assert_eq!((l.id, &l.name, l.ai_score), (before.id, &before.name, before.ai_score));

        assert_eq!(alert.lead_id, l.id);
        assert_eq!(alert.kind, NotificationKind::Alert);
        assert_eq!(alert.priority, Priority::High);
        assert_eq!(alert.title, "Action Required: Grace Hopper");
        assert_eq!(
            alert.message,
            "📞 Call Immediately - This is a hot lead. Call within 24 hours."
        );
        assert_eq!(alert.action_date, NaiveDate::from_ymd_opt(2026, 3, 11).unwrap());
        assert!(!alert.is_read);
    }

    #[test]
    fn apply_medium_priority_schedules_three_days_out() {
        let mut l = plain(50, 3);
        let (r, alert) = RecommendationEngine::new().apply(&mut l, today());
        assert_eq!(r.priority, Priority::Medium);
        assert!(alert.is_none());
        assert_eq!(l.next_followup, NaiveDate::from_ymd_opt(2026, 3, 13));
    }

    #[test]
    fn apply_low_priority_schedules_a_week_out() {
        let mut l = plain(20, 1);
        let (r, alert) = RecommendationEngine::new().apply(&mut l, today());
        assert_eq!(r.priority, Priority::Low);
        assert!(alert.is_none());
        assert_eq!(l.next_followup, NaiveDate::from_ymd_opt(2026, 3, 17));
    }

    // ------------------------------------------------------------------
    // Follow-up reminders
    // ------------------------------------------------------------------

    #[test]
    fn reminders_for_due_open_leads_only() {
        let mut due = plain(50, 3).with_company("Navy");
        due.next_followup = Some(today());
        let mut overdue = plain(50, 3).with_status(LeadStatus::New);
        overdue.next_followup = NaiveDate::from_ymd_opt(2026, 3, 1);
        let mut future = plain(50, 3);
        future.next_followup = NaiveDate::from_ymd_opt(2026, 3, 11);
        let mut closed = plain(50, 3).with_status(LeadStatus::Converted);
        closed.next_followup = Some(today());
        let unscheduled = plain(50, 3);

        let leads = vec![due.clone(), overdue.clone(), future, closed, unscheduled];
        let reminders = follow_up_reminders(&leads, &[], today());

        let ids: Vec<_> = reminders.iter().map(|n| n.lead_id).collect();
        assert_eq!(ids, vec![due.id, overdue.id]);

        let first = &reminders[0];
        assert_eq!(first.kind, NotificationKind::Reminder);
        assert_eq!(first.priority, Priority::Medium);
        assert_eq!(first.title, "Follow-up Reminder: Grace Hopper");
        assert_eq!(first.message, "It's time to follow up with Grace Hopper from Navy");
        assert_eq!(first.action_date, NaiveDate::from_ymd_opt(2026, 3, 11).unwrap());
        assert_eq!(reminders[1].message, "It's time to follow up with Grace Hopper from Unknown");
    }

    #[test]
    fn unread_reminder_suppresses_duplicate() {
        let mut l = plain(50, 3);
        l.next_followup = Some(today());
        let first = follow_up_reminders(std::slice::from_ref(&l), &[], today());
        assert_eq!(first.len(), 1);

        let again = follow_up_reminders(std::slice::from_ref(&l), &first, today());
        assert!(again.is_empty());

        let mut read = first;
        read[0].is_read = true;
        assert_eq!(follow_up_reminders(std::slice::from_ref(&l), &read, today()).len(), 1);
    }

    #[test]
    fn unread_alert_does_not_suppress_reminder() {
        let mut l = lead(
            100,
            5,
            Timeline::Immediate,
            LeadSource::Referral,
            BudgetRange::High,
            LeadStatus::New,
            CompanySize::Large,
        );
        let (_, alert) = RecommendationEngine::new().apply(&mut l, today());
        l.next_followup = Some(today());
        let reminders = follow_up_reminders(std::slice::from_ref(&l), &[alert.unwrap()], today());
        assert_eq!(reminders.len(), 1);
    }
}

// Rust guideline compliant 2026-10-19

//! Static catalog of the six next actions.

use domain::{ActionKey, Priority};

/// Display data attached to an [`ActionKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub label: &'static str,
    pub priority: Priority,
    pub description: &'static str,
    pub icon: &'static str,
}

/// Catalog entry for `action`. Total over [`ActionKey`].
#[must_use]
pub const fn entry(action: ActionKey) -> CatalogEntry {
    match action {
        ActionKey::CallImmediately => CatalogEntry {
            label: "Call Immediately",
            priority: Priority::High,
            description: "This is a hot lead. Call within 24 hours.",
            icon: "📞",
        },
        ActionKey::FollowUpEmail => CatalogEntry {
            label: "Send Follow-up Email",
            priority: Priority::Medium,
            description: "Send a personalized follow-up email.",
            icon: "📧",
        },
        ActionKey::ScheduleMeeting => CatalogEntry {
            label: "Schedule Meeting",
            priority: Priority::High,
            description: "Schedule a demo or discovery call.",
            icon: "📅",
        },
        ActionKey::NurtureCampaign => CatalogEntry {
            label: "Add to Nurture Campaign",
            priority: Priority::Low,
            description: "Add to email nurture sequence.",
            icon: "📬",
        },
        ActionKey::Escalate => CatalogEntry {
            label: "Escalate to Manager",
            priority: Priority::High,
            description: "This lead requires manager attention.",
            icon: "⚠️",
        },
        ActionKey::Reconnect => CatalogEntry {
            label: "Reconnect Later",
            priority: Priority::Low,
            description: "Reconnect in a few weeks.",
            icon: "🔄",
        },
    }
}

// Rust guideline compliant 2026-10-19

//! Shared domain types for the lead-triage workspace.
//!
//! Defines `Lead`, `Score`, `Priority`, `Recommendation`, `Notification`, the
//! encoded `FeatureVector`, and the hexagonal port traits: `ScoreModel`,
//! `LeadStore`, and `NotificationStore`. Every other crate depends on this
//! one; it holds invariants but no scoring or rule logic.

mod attributes;

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use attributes::{
    BudgetRange, CompanySize, EngagementLevel, LeadAttributes, LeadSource, LeadStatus, Timeline,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A lead attribute failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeadError {
    /// The raw value is not acceptable for `attribute`.
    #[error("invalid lead attribute {attribute}: {value:?} ({reason})")]
    InvalidAttribute {
        /// Attribute name, e.g. `"engagement_level"`.
        attribute: &'static str,
        /// Offending raw value.
        value: String,
        /// What was expected instead.
        reason: &'static str,
    },
}

/// Errors from the `LeadStore` hexagonal port.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("lead store unavailable: {reason}")]
    Unavailable {
        /// Human-readable description.
        reason: String,
    },
    /// A stored row could not be turned back into a `Lead`.
    #[error("corrupt lead record {id}: {source}")]
    Corrupt {
        /// Identifier of the offending row.
        id: String,
        /// Validation failure.
        source: LeadError,
    },
}

/// Errors from the `NotificationStore` hexagonal port.
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    /// The notification could not be recorded.
    #[error("delivery failed: {reason}")]
    DeliveryFailed {
        /// Human-readable description.
        reason: String,
    },
}

// ---------------------------------------------------------------------------
// Score + Priority
// ---------------------------------------------------------------------------

/// Lead score, always within `0..=100`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(100);

    /// `None` when `value > 100`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= Self::MAX.0 { Some(Self(value)) } else { None }
    }

    /// Clamp any integer into `0..=100`.
    #[must_use]
    pub fn saturating(value: i64) -> Self {
        let clamped = value.clamp(0, i64::from(Self::MAX.0));
        Self(u8::try_from(clamped).unwrap_or(Self::MAX.0))
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Priority tier derived from this score.
    #[must_use]
    pub fn priority(self) -> Priority {
        Priority::from_score(self)
    }
}

impl TryFrom<i64> for Score {
    type Error = LeadError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| LeadError::InvalidAttribute {
                attribute: "ai_score",
                value: value.to_string(),
                reason: "must be an integer in 0..=100",
            })
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Three-level urgency shared by score tiers, actions, and notifications.
///
/// Ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Lowest score in the high tier.
    pub const HIGH_THRESHOLD: u8 = 70;
    /// Lowest score in the medium tier.
    pub const MEDIUM_THRESHOLD: u8 = 40;

    /// Tier of `score`: `>= 70` high, `40..70` medium, below 40 low.
    ///
    /// The only place tiers are computed; they are never stored.
    #[must_use]
    pub fn from_score(score: Score) -> Self {
        match score.get() {
            s if s >= Self::HIGH_THRESHOLD => Self::High,
            s if s >= Self::MEDIUM_THRESHOLD => Self::Medium,
            _ => Self::Low,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = LeadError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(LeadError::InvalidAttribute {
                attribute: "priority",
                value: raw.to_owned(),
                reason: "expected one of low, medium, high",
            }),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ActionKey
// ---------------------------------------------------------------------------

/// Key of one of the six catalogued next actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKey {
    CallImmediately,
    FollowUpEmail,
    ScheduleMeeting,
    NurtureCampaign,
    Escalate,
    Reconnect,
}

impl ActionKey {
    pub const ALL: [Self; 6] = [
        Self::CallImmediately,
        Self::FollowUpEmail,
        Self::ScheduleMeeting,
        Self::NurtureCampaign,
        Self::Escalate,
        Self::Reconnect,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CallImmediately => "call_immediately",
            Self::FollowUpEmail => "follow_up_email",
            Self::ScheduleMeeting => "schedule_meeting",
            Self::NurtureCampaign => "nurture_campaign",
            Self::Escalate => "escalate",
            Self::Reconnect => "reconnect",
        }
    }
}

impl FromStr for ActionKey {
    type Err = LeadError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == raw)
            .ok_or_else(|| LeadError::InvalidAttribute {
                attribute: "recommended_action",
                value: raw.to_owned(),
                reason: "not a catalogued action key",
            })
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Lead
// ---------------------------------------------------------------------------

/// A prospective customer as supplied by the storage collaborator.
///
/// Identity fields are never touched by scoring or recommendation; only
/// `ai_score`, `recommended_action`, and `next_followup` are derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub attributes: LeadAttributes,
    pub status: LeadStatus,
    pub ai_score: Score,
    pub recommended_action: Option<ActionKey>,
    pub next_followup: Option<NaiveDate>,
}

impl Lead {
    /// New unscored lead with a fresh id and status `new`.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        attributes: LeadAttributes,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            company: None,
            attributes,
            status: LeadStatus::New,
            ai_score: Score::MIN,
            recommended_action: None,
            next_followup: None,
        }
    }

    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: LeadStatus) -> Self {
        self.status = status;
        self
    }

    /// Priority tier of the current score.
    #[must_use]
    pub fn priority(&self) -> Priority {
        self.ai_score.priority()
    }
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

/// Which part of the rule engine produced a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationOrigin {
    /// Rule number, `1..=10`, in evaluation order.
    Rule(u8),
    /// No rule matched; the score band decided.
    DefaultBand,
}

/// Suggested next action for a scored lead. Not persisted by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub action: ActionKey,
    pub label: &'static str,
    pub priority: Priority,
    pub description: &'static str,
    pub icon: &'static str,
    /// Explanatory text only; never read back by any logic.
    pub reason: String,
    pub origin: RecommendationOrigin,
}

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// Why a notification exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Raised by a high-priority recommendation.
    Alert,
    /// Raised when a follow-up date has come due.
    Reminder,
}

impl NotificationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::Reminder => "reminder",
        }
    }
}

impl FromStr for NotificationKind {
    type Err = LeadError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "alert" => Ok(Self::Alert),
            "reminder" => Ok(Self::Reminder),
            _ => Err(LeadError::InvalidAttribute {
                attribute: "notification_kind",
                value: raw.to_owned(),
                reason: "expected alert or reminder",
            }),
        }
    }
}

/// A dated reminder record. Its lifecycle belongs to the `NotificationStore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: uuid::Uuid,
    pub lead_id: uuid::Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub priority: Priority,
    pub action_date: NaiveDate,
    pub is_read: bool,
}

// ---------------------------------------------------------------------------
// FeatureVector
// ---------------------------------------------------------------------------

/// Ordinal encoding of `LeadAttributes`, consumed only by trained models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureVector {
    pub source: u8,
    pub company_size: u8,
    pub engagement: u8,
    pub budget: u8,
    pub timeline: u8,
}

impl FeatureVector {
    /// Number of features.
    pub const LEN: usize = 5;
    /// Feature names in `to_array` order.
    pub const NAMES: [&'static str; Self::LEN] =
        ["source", "company_size", "engagement", "budget", "timeline"];

    #[must_use]
    pub fn to_array(self) -> [f64; Self::LEN] {
        [
            f64::from(self.source),
            f64::from(self.company_size),
            f64::from(self.engagement),
            f64::from(self.budget),
            f64::from(self.timeline),
        ]
    }
}

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Hexagonal port: a trained score predictor.
///
/// Implementations are immutable after construction, so one instance may be
/// shared across threads and read concurrently.
pub trait ScoreModel: Send + Sync {
    /// Raw, unclamped score for an encoded lead.
    fn predict(&self, features: &FeatureVector) -> f64;

    /// Name of this model (e.g. `"FOREST"`).
    fn name(&self) -> &str;

    /// Version string of this model (e.g. `"1"`).
    fn version(&self) -> &str;
}

/// Hexagonal port: the storage collaborator that owns leads.
#[expect(
    async_fn_in_trait,
    reason = "no dyn dispatch needed; internal workspace only"
)]
pub trait LeadStore {
    /// Load every stored lead.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` when the store cannot be read, or
    /// `StoreError::Corrupt` when a row fails validation.
    async fn load_all(&self) -> Result<Vec<Lead>, StoreError>;

    /// Insert or replace one lead, keyed by `lead.id`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` when the write fails.
    async fn save(&self, lead: &Lead) -> Result<(), StoreError>;
}

/// Hexagonal port: the collaborator that keeps notifications.
#[expect(
    async_fn_in_trait,
    reason = "no dyn dispatch needed; internal workspace only"
)]
pub trait NotificationStore {
    /// Record a notification (fire-and-forget from the core's point of view).
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::DeliveryFailed` when it cannot be recorded.
    async fn append(&self, notification: &Notification) -> Result<(), NotificationError>;

    /// Every notification not yet marked read.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::DeliveryFailed` when the store cannot be read.
    async fn unread(&self) -> Result<Vec<Notification>, NotificationError>;
}

// Rust guideline compliant 2026-10-19

//! Scoring attributes of a lead and their closed vocabularies.
//!
//! Categorical attributes parse totally: a raw string outside the vocabulary
//! maps to `Unrecognized` (source, company size) or `Unknown` (budget,
//! timeline) so downstream tables can apply their documented defaults.
//! `EngagementLevel` and `LeadStatus` are validated and reject bad input.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::LeadError;

/// Serde goes through `from_raw`/`as_str`, so deserializing is as total as
/// parsing: values outside the vocabulary take the type's default variant.
macro_rules! raw_string_serde {
    ($ty:ty) => {
        impl From<String> for $ty {
            fn from(raw: String) -> Self {
                Self::from_raw(&raw)
            }
        }

        impl From<$ty> for &'static str {
            fn from(value: $ty) -> Self {
                value.as_str()
            }
        }
    };
}

// ---------------------------------------------------------------------------
// LeadSource
// ---------------------------------------------------------------------------

/// Acquisition channel a lead came in through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum LeadSource {
    Website,
    Referral,
    ColdCall,
    LinkedIn,
    Advertisement,
    Other,
    /// Raw value outside the vocabulary; the raw text itself is not kept.
    Unrecognized,
}

impl LeadSource {
    /// Every recognized channel, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Website,
        Self::Referral,
        Self::ColdCall,
        Self::LinkedIn,
        Self::Advertisement,
        Self::Other,
    ];

    /// Parse a raw channel name. Never fails.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "website" => Self::Website,
            "referral" => Self::Referral,
            "cold_call" => Self::ColdCall,
            "linkedin" => Self::LinkedIn,
            "advertisement" => Self::Advertisement,
            "other" => Self::Other,
            _ => Self::Unrecognized,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Website => "website",
            Self::Referral => "referral",
            Self::ColdCall => "cold_call",
            Self::LinkedIn => "linkedin",
            Self::Advertisement => "advertisement",
            Self::Other => "other",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for LeadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

raw_string_serde!(LeadSource);

// ---------------------------------------------------------------------------
// CompanySize
// ---------------------------------------------------------------------------

/// Headcount bracket of the lead's company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum CompanySize {
    Small,
    Medium,
    Large,
    Enterprise,
    /// Raw value outside the vocabulary; the raw text itself is not kept.
    Unrecognized,
}

impl CompanySize {
    /// Every recognized bracket, smallest first.
    pub const ALL: [Self; 4] = [Self::Small, Self::Medium, Self::Large, Self::Enterprise];

    /// Parse a raw size bracket. Never fails.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "small" => Self::Small,
            "medium" => Self::Medium,
            "large" => Self::Large,
            "enterprise" => Self::Enterprise,
            _ => Self::Unrecognized,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Enterprise => "enterprise",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

raw_string_serde!(CompanySize);

// ---------------------------------------------------------------------------
// BudgetRange
// ---------------------------------------------------------------------------

/// Declared purchasing budget. Unrecognized input collapses to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum BudgetRange {
    Unknown,
    Low,
    Medium,
    High,
    Enterprise,
}

impl BudgetRange {
    pub const ALL: [Self; 5] = [
        Self::Unknown,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::Enterprise,
    ];

    /// Parse a raw budget value. Never fails.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            "enterprise" => Self::Enterprise,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for BudgetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

raw_string_serde!(BudgetRange);

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// Expected purchase horizon. Unrecognized input collapses to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Timeline {
    Unknown,
    LongTerm,
    ShortTerm,
    Immediate,
}

impl Timeline {
    pub const ALL: [Self; 4] = [Self::Unknown, Self::LongTerm, Self::ShortTerm, Self::Immediate];

    /// Parse a raw timeline value. Never fails.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "long_term" => Self::LongTerm,
            "short_term" => Self::ShortTerm,
            "immediate" => Self::Immediate,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::LongTerm => "long_term",
            Self::ShortTerm => "short_term",
            Self::Immediate => "immediate",
        }
    }
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

raw_string_serde!(Timeline);

// ---------------------------------------------------------------------------
// EngagementLevel
// ---------------------------------------------------------------------------

/// Engagement on a `0..=5` scale. Out-of-range input is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct EngagementLevel(u8);

impl EngagementLevel {
    /// Highest valid level.
    pub const MAX: u8 = 5;

    /// Validate an integer engagement level.
    ///
    /// # Errors
    ///
    /// Returns [`LeadError::InvalidAttribute`] when `value` is outside `0..=5`.
    pub fn new(value: i64) -> Result<Self, LeadError> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MAX)
            .map(Self)
            .ok_or_else(|| LeadError::InvalidAttribute {
                attribute: "engagement_level",
                value: value.to_string(),
                reason: "must be an integer in 0..=5",
            })
    }

    /// Parse a raw engagement level such as `"4"`.
    ///
    /// # Errors
    ///
    /// Returns [`LeadError::InvalidAttribute`] for non-numeric or
    /// out-of-range input.
    pub fn parse(raw: &str) -> Result<Self, LeadError> {
        let value: i64 = raw.trim().parse().map_err(|_parse_err| LeadError::InvalidAttribute {
            attribute: "engagement_level",
            value: raw.to_owned(),
            reason: "must be an integer in 0..=5",
        })?;
        Self::new(value)
    }

    /// Cap `value` at [`Self::MAX`].
    #[must_use]
    pub const fn saturating(value: u8) -> Self {
        if value > Self::MAX { Self(Self::MAX) } else { Self(value) }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for EngagementLevel {
    type Error = LeadError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EngagementLevel> for u8 {
    fn from(level: EngagementLevel) -> Self {
        level.0
    }
}

impl fmt::Display for EngagementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// LeadStatus
// ---------------------------------------------------------------------------

/// Pipeline stage of a lead. Read only by the recommendation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Qualified,
    Converted,
    Lost,
}

impl LeadStatus {
    pub const ALL: [Self; 4] = [Self::New, Self::Qualified, Self::Converted, Self::Lost];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Qualified => "qualified",
            Self::Converted => "converted",
            Self::Lost => "lost",
        }
    }

    /// `true` for stages that still need sales attention.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::New | Self::Qualified)
    }
}

impl FromStr for LeadStatus {
    type Err = LeadError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "new" => Ok(Self::New),
            "qualified" => Ok(Self::Qualified),
            "converted" => Ok(Self::Converted),
            "lost" => Ok(Self::Lost),
            _ => Err(LeadError::InvalidAttribute {
                attribute: "status",
                value: raw.to_owned(),
                reason: "expected one of new, qualified, converted, lost",
            }),
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// LeadAttributes
// ---------------------------------------------------------------------------

/// The five attributes that feed both scoring strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeadAttributes {
    pub source: LeadSource,
    pub company_size: CompanySize,
    pub engagement_level: EngagementLevel,
    pub budget_range: BudgetRange,
    pub timeline: Timeline,
}

impl LeadAttributes {
    /// Build attributes from raw collaborator input.
    ///
    /// Categorical values never fail; only `engagement_level` is validated.
    ///
    /// # Errors
    ///
    /// Returns [`LeadError::InvalidAttribute`] when `engagement_level` is not
    /// an integer in `0..=5`.
    pub fn from_raw(
        source: &str,
        company_size: &str,
        engagement_level: &str,
        budget_range: &str,
        timeline: &str,
    ) -> Result<Self, LeadError> {
        Ok(Self {
            source: LeadSource::from_raw(source),
            company_size: CompanySize::from_raw(company_size),
            engagement_level: EngagementLevel::parse(engagement_level)?,
            budget_range: BudgetRange::from_raw(budget_range),
            timeline: Timeline::from_raw(timeline),
        })
    }
}

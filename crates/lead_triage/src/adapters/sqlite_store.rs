// Rust guideline compliant 2026-10-19

//! SQLite adapter for the `LeadStore` and `NotificationStore` ports (demo).
//!
//! Persists leads and notifications to a SQLite file via `sqlx`. Categorical
//! attributes, statuses, and action keys are stored as their snake_case
//! names; dates as ISO-8601 `TEXT`.
//!
//! # Lossy categorical round-trip
//!
//! The domain keeps no raw text for a source or company size outside the
//! known vocabulary, so such a value is written as `"unrecognized"` and
//! reads back as `Unrecognized`. The original string is gone once the lead
//! has been parsed; scoring and rules treat every unrecognized value alike.
//!
//! # `INSERT OR REPLACE` semantics
//!
//! Saving a lead whose id already exists overwrites the row, which is what
//! the triage pass needs when it writes back a rescored lead.
//!
//! # Validation on read
//!
//! Rows are validated on the way out: a row with an out-of-range engagement
//! level, an unknown status, or a malformed date surfaces as
//! `StoreError::Corrupt` naming the row instead of being silently coerced.

use chrono::NaiveDate;
use domain::{
    ActionKey, BudgetRange, CompanySize, EngagementLevel, Lead, LeadAttributes, LeadError,
    LeadSource, LeadStore, Notification, NotificationError, NotificationStore, Score, StoreError,
    Timeline,
};
use sqlx::Row as _;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};

/// `LeadStore` + `NotificationStore` adapter backed by a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: sqlx::SqlitePool,
}

impl SqliteStore {
    /// Open or create a SQLite database and initialize the schema.
    ///
    /// The pool holds a single connection so `sqlite::memory:` URLs keep one
    /// database for the lifetime of the store. Tables are created via
    /// `CREATE TABLE IF NOT EXISTS`, making repeated calls safe.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` when the connection or schema creation fails.
    pub async fn new(db_url: &str) -> Result<Self, sqlx::Error> {
        // sqlx 0.8 defaults to create_if_missing(false) for file databases.
        let opts = db_url.parse::<SqliteConnectOptions>()?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opts)
            .await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS leads (
                id                 TEXT    PRIMARY KEY,
                name               TEXT    NOT NULL,
                email              TEXT    NOT NULL,
                company            TEXT,
                source             TEXT    NOT NULL,
                company_size       TEXT    NOT NULL,
                engagement_level   INTEGER NOT NULL,
                budget_range       TEXT    NOT NULL,
                timeline           TEXT    NOT NULL,
                status             TEXT    NOT NULL,
                ai_score           INTEGER NOT NULL DEFAULT 0,
                recommended_action TEXT,
                next_followup      TEXT
            )",
        )
        .execute(&pool)
        .await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS notifications (
                id          TEXT    PRIMARY KEY,
                lead_id     TEXT    NOT NULL,
                kind        TEXT    NOT NULL,
                title       TEXT    NOT NULL,
                message     TEXT    NOT NULL,
                priority    TEXT    NOT NULL,
                action_date TEXT    NOT NULL,
                is_read     INTEGER NOT NULL DEFAULT 0
            )",
        )
        .execute(&pool)
        .await?;
        Ok(Self { pool })
    }

    /// Mark the notification with `id` as read.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::DeliveryFailed` on any `sqlx` error.
    #[cfg(test)]
    pub async fn mark_read(&self, id: uuid::Uuid) -> Result<(), NotificationError> {
        sqlx::query("UPDATE notifications SET is_read = 1 WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(notification_unavailable)?;
        Ok(())
    }
}

fn store_unavailable(e: sqlx::Error) -> StoreError {
    tracing::error!(error = %e, "sqlite_store.lead_query_failed");
    StoreError::Unavailable { reason: e.to_string() }
}

fn notification_unavailable(e: sqlx::Error) -> NotificationError {
    tracing::error!(error = %e, "sqlite_store.notification_query_failed");
    NotificationError::DeliveryFailed { reason: e.to_string() }
}

fn invalid(attribute: &'static str, value: &str, reason: &'static str) -> LeadError {
    LeadError::InvalidAttribute { attribute, value: value.to_owned(), reason }
}

fn parse_date(attribute: &'static str, raw: &str) -> Result<NaiveDate, LeadError> {
    raw.parse::<NaiveDate>()
        .map_err(|_parse_err| invalid(attribute, raw, "expected a YYYY-MM-DD date"))
}

fn parse_uuid(attribute: &'static str, raw: &str) -> Result<uuid::Uuid, LeadError> {
    uuid::Uuid::parse_str(raw).map_err(|_parse_err| invalid(attribute, raw, "expected a UUID"))
}

// ---------------------------------------------------------------------------
// Lead rows
// ---------------------------------------------------------------------------

/// Raw column values of one `leads` row, before validation.
struct LeadRow {
    id: String,
    name: String,
    email: String,
    company: Option<String>,
    source: String,
    company_size: String,
    engagement_level: i64,
    budget_range: String,
    timeline: String,
    status: String,
    ai_score: i64,
    recommended_action: Option<String>,
    next_followup: Option<String>,
}

impl LeadRow {
    fn read(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            company: row.try_get("company")?,
            source: row.try_get("source")?,
            company_size: row.try_get("company_size")?,
            engagement_level: row.try_get("engagement_level")?,
            budget_range: row.try_get("budget_range")?,
            timeline: row.try_get("timeline")?,
            status: row.try_get("status")?,
            ai_score: row.try_get("ai_score")?,
            recommended_action: row.try_get("recommended_action")?,
            next_followup: row.try_get("next_followup")?,
        })
    }

    fn into_lead(self) -> Result<Lead, LeadError> {
        Ok(Lead {
            id: parse_uuid("id", &self.id)?,
            name: self.name,
            email: self.email,
            company: self.company,
            attributes: LeadAttributes {
                source: LeadSource::from_raw(&self.source),
                company_size: CompanySize::from_raw(&self.company_size),
                engagement_level: EngagementLevel::new(self.engagement_level)?,
                budget_range: BudgetRange::from_raw(&self.budget_range),
                timeline: Timeline::from_raw(&self.timeline),
            },
            status: self.status.parse()?,
            ai_score: Score::try_from(self.ai_score)?,
            recommended_action: self.recommended_action.as_deref().map(str::parse).transpose()?,
            next_followup: self
                .next_followup
                .as_deref()
                .map(|raw| parse_date("next_followup", raw))
                .transpose()?,
        })
    }
}

impl LeadStore for SqliteStore {
    /// Load and validate every row of `leads`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` on any `sqlx` error, or
    /// `StoreError::Corrupt` for the first row that fails validation.
    async fn load_all(&self) -> Result<Vec<Lead>, StoreError> {
        let rows = sqlx::query("SELECT * FROM leads ORDER BY name, id")
            .fetch_all(&self.pool)
            .await
            .map_err(store_unavailable)?;
        rows.iter()
            .map(|row| {
                let raw = LeadRow::read(row).map_err(store_unavailable)?;
                let id = raw.id.clone();
                raw.into_lead().map_err(|source| StoreError::Corrupt { id, source })
            })
            .collect()
    }

    /// Insert or replace the row keyed by `lead.id`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` on any `sqlx` error.
    async fn save(&self, lead: &Lead) -> Result<(), StoreError> {
        let attrs = &lead.attributes;
        sqlx::query(
            "INSERT OR REPLACE INTO leads
             (id, name, email, company, source, company_size, engagement_level,
              budget_range, timeline, status, ai_score, recommended_action, next_followup)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(lead.id.to_string())
        .bind(&lead.name)
        .bind(&lead.email)
        .bind(lead.company.as_deref())
        .bind(attrs.source.as_str())
        .bind(attrs.company_size.as_str())
        .bind(i64::from(attrs.engagement_level.get()))
        .bind(attrs.budget_range.as_str())
        .bind(attrs.timeline.as_str())
        .bind(lead.status.as_str())
        .bind(i64::from(lead.ai_score.get()))
        .bind(lead.recommended_action.map(ActionKey::as_str))
        .bind(lead.next_followup.as_ref().map(NaiveDate::to_string))
        .execute(&self.pool)
        .await
        .map_err(store_unavailable)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Notification rows
// ---------------------------------------------------------------------------

/// Raw column values of one `notifications` row, before validation.
struct NotificationRow {
    id: String,
    lead_id: String,
    kind: String,
    title: String,
    message: String,
    priority: String,
    action_date: String,
    is_read: i64,
}

impl NotificationRow {
    fn read(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            lead_id: row.try_get("lead_id")?,
            kind: row.try_get("kind")?,
            title: row.try_get("title")?,
            message: row.try_get("message")?,
            priority: row.try_get("priority")?,
            action_date: row.try_get("action_date")?,
            is_read: row.try_get("is_read")?,
        })
    }

    fn into_notification(self) -> Result<Notification, LeadError> {
        Ok(Notification {
            id: parse_uuid("id", &self.id)?,
            lead_id: parse_uuid("lead_id", &self.lead_id)?,
            kind: self.kind.parse()?,
            title: self.title,
            message: self.message,
            priority: self.priority.parse()?,
            action_date: parse_date("action_date", &self.action_date)?,
            is_read: self.is_read != 0,
        })
    }
}

impl NotificationStore for SqliteStore {
    /// Insert `notification` as a new row.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::DeliveryFailed` on any `sqlx` error,
    /// including a duplicate id.
    async fn append(&self, notification: &Notification) -> Result<(), NotificationError> {
        sqlx::query(
            "INSERT INTO notifications
             (id, lead_id, kind, title, message, priority, action_date, is_read)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(notification.id.to_string())
        .bind(notification.lead_id.to_string())
        .bind(notification.kind.as_str())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.priority.as_str())
        .bind(notification.action_date.to_string())
        .bind(i64::from(notification.is_read))
        .execute(&self.pool)
        .await
        .map_err(notification_unavailable)?;
        Ok(())
    }

    /// Every row with `is_read = 0`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::DeliveryFailed` on any `sqlx` error or a
    /// row that fails validation.
    async fn unread(&self) -> Result<Vec<Notification>, NotificationError> {
        let rows = sqlx::query("SELECT * FROM notifications WHERE is_read = 0 ORDER BY rowid")
            .fetch_all(&self.pool)
            .await
            .map_err(notification_unavailable)?;
        rows.iter()
            .map(|row| {
                let raw = NotificationRow::read(row).map_err(notification_unavailable)?;
                let id = raw.id.clone();
                raw.into_notification().map_err(|e| NotificationError::DeliveryFailed {
                    reason: format!("corrupt notification {id}: {e}"),
                })
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

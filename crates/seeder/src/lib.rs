// Rust guideline compliant 2026-10-19

//! Seeder component -- supplies demo leads to a `LeadStore` hexagonal port.
//!
//! Two sources: a fixed roster ([`sample_leads`]) that covers every priority
//! tier, and a seeded random generator ([`LeadGenerator`]) over the full
//! attribute vocabularies.
//!
//! Entry points: [`sample_leads`], [`LeadGenerator::generate`],
//! [`LeadGenerator::run`], [`seed_store`]. Configuration via
//! [`SeederConfig::builder`].

use domain::{
    BudgetRange, CompanySize, EngagementLevel, Lead, LeadAttributes, LeadError, LeadSource,
    LeadStatus, LeadStore, StoreError, Timeline,
};
use rand::{Rng, RngCore, SeedableRng, rngs::StdRng};
use std::cell::RefCell;
use std::time::Duration;

// ---------------------------------------------------------------------------
// SeederError
// ---------------------------------------------------------------------------

/// Errors that can occur while seeding leads.
#[derive(Debug, thiserror::Error)]
pub enum SeederError {
    /// The supplied configuration is invalid.
    #[error("invalid seeder configuration: {reason}")]
    InvalidConfig {
        /// Human-readable description of the problem.
        reason: String,
    },
    /// A roster row failed validation.
    #[error("invalid sample lead: {0}")]
    InvalidLead(#[from] LeadError),
    /// A store write failed.
    #[error("store error: {source}")]
    Store {
        /// The underlying store error.
        #[from]
        source: StoreError,
    },
}

// ---------------------------------------------------------------------------
// SeederConfig + builder
// ---------------------------------------------------------------------------

/// Configuration for a [`LeadGenerator`].
///
/// Construct via [`SeederConfig::builder`].
#[derive(Debug)]
pub struct SeederConfig {
    /// Number of leads per [`LeadGenerator::generate`] call (at least 1).
    pub count: usize,
    /// Delay between successive batches in [`LeadGenerator::run`].
    pub poll_interval: Duration,
    /// Optional upper bound on the number of batches. `None` means infinite.
    pub iterations: Option<u64>,
    /// Optional RNG seed for reproducible leads. `None` seeds from the OS.
    pub seed: Option<u64>,
}

/// Builder for [`SeederConfig`].
///
/// Obtain via [`SeederConfig::builder`]; finalize with [`build`](Self::build).
#[derive(Debug)]
pub struct SeederConfigBuilder {
    count: usize,
    poll_interval: Duration,
    iterations: Option<u64>,
    seed: Option<u64>,
}

impl SeederConfig {
    /// Create a builder. `count` is the only required parameter.
    ///
    /// Default values: `poll_interval = 1 s`, `iterations = None`, `seed = None`.
    #[must_use]
    pub fn builder(count: usize) -> SeederConfigBuilder {
        SeederConfigBuilder {
            count,
            poll_interval: Duration::from_secs(1),
            iterations: None,
            seed: None,
        }
    }
}

impl SeederConfigBuilder {
    /// Override the inter-batch delay.
    #[must_use]
    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Set a finite batch count for [`LeadGenerator::run`].
    #[must_use]
    pub fn iterations(mut self, n: u64) -> Self {
        self.iterations = Some(n);
        self
    }

    /// Fix the RNG seed for deterministic output (useful in tests).
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate and build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SeederError::InvalidConfig`] when `count` or `iterations`
    /// is zero.
    #[must_use = "the Result must be checked; use ? or unwrap"]
    pub fn build(self) -> Result<SeederConfig, SeederError> {
        if self.count == 0 {
            return Err(SeederError::InvalidConfig { reason: "count must be >= 1".to_owned() });
        }
        if self.iterations == Some(0) {
            return Err(SeederError::InvalidConfig {
                reason: "iterations must be >= 1 when set".to_owned(),
            });
        }
        Ok(SeederConfig {
            count: self.count,
            poll_interval: self.poll_interval,
            iterations: self.iterations,
            seed: self.seed,
        })
    }
}

// ---------------------------------------------------------------------------
// Sample roster
// ---------------------------------------------------------------------------

/// One roster row, in the raw string form a collaborator would supply.
struct SampleRow {
    name: &'static str,
    email: &'static str,
    company: Option<&'static str>,
    source: &'static str,
    company_size: &'static str,
    engagement_level: &'static str,
    budget_range: &'static str,
    timeline: &'static str,
    status: &'static str,
}

const ROSTER: [SampleRow; 8] = [
    SampleRow {
        name: "John Smith",
        email: "john.smith@techcorp.com",
        company: Some("TechCorp Inc"),
        source: "referral",
        company_size: "large",
        engagement_level: "5",
        budget_range: "high",
        timeline: "immediate",
        status: "qualified",
    },
    SampleRow {
        name: "Sarah Johnson",
        email: "sarah.j@innovate.io",
        company: Some("Innovate Solutions"),
        source: "website",
        company_size: "medium",
        engagement_level: "3",
        budget_range: "medium",
        timeline: "short_term",
        status: "new",
    },
    SampleRow {
        name: "Michael Chen",
        email: "m.chen@startupx.com",
        company: Some("StartupX Labs"),
        source: "cold_call",
        company_size: "small",
        engagement_level: "2",
        budget_range: "unknown",
        timeline: "long_term",
        status: "new",
    },
    SampleRow {
        name: "David Park",
        email: "dpark@midmarket.io",
        company: None,
        source: "other",
        company_size: "small",
        engagement_level: "1",
        budget_range: "unknown",
        timeline: "unknown",
        status: "new",
    },
    SampleRow {
        name: "Emily Rodriguez",
        email: "emily.r@enterprise.com",
        company: Some("Enterprise Global"),
        source: "industry_event",
        company_size: "enterprise",
        engagement_level: "5",
        budget_range: "enterprise",
        timeline: "immediate",
        status: "qualified",
    },
    SampleRow {
        name: "Lisa Anderson",
        email: "l.anderson@tech.ventures",
        company: Some("Tech Ventures LLC"),
        source: "linkedin",
        company_size: "small",
        engagement_level: "4",
        budget_range: "low",
        timeline: "short_term",
        status: "new",
    },
    SampleRow {
        name: "Robert Taylor",
        email: "r.taylor@corporate.net",
        company: Some("Corporate Dynamics"),
        source: "referral",
        company_size: "large",
        engagement_level: "3",
        budget_range: "high",
        timeline: "long_term",
        status: "converted",
    },
    SampleRow {
        name: "Jennifer Martinez",
        email: "j.martinez@digital.co",
        company: Some("Digital Innovations Co"),
        source: "advertisement",
        company_size: "medium",
        engagement_level: "2",
        budget_range: "medium",
        timeline: "unknown",
        status: "lost",
    },
];

/// Fixed roster of unscored leads covering every priority tier.
///
/// The first four rows are the reference scenarios: a hot referral, a
/// balanced website lead, a lukewarm cold call, and a cold lead with no
/// company.
///
/// # Errors
///
/// Returns [`SeederError::InvalidLead`] if a roster row fails validation.
pub fn sample_leads() -> Result<Vec<Lead>, SeederError> {
    ROSTER
        .iter()
        .map(|row| -> Result<Lead, SeederError> {
            let attributes = LeadAttributes::from_raw(
                row.source,
                row.company_size,
                row.engagement_level,
                row.budget_range,
                row.timeline,
            )?;
            let mut lead =
                Lead::new(row.name, row.email, attributes).with_status(row.status.parse()?);
            lead.company = row.company.map(str::to_owned);
            Ok(lead)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// LeadGenerator
// ---------------------------------------------------------------------------

/// First-name pool for synthetic leads.
const FIRST_NAMES: &[&str] =
    &["Ada", "Alan", "Barbara", "Dennis", "Edsger", "Frances", "Grace", "Ken"];

/// Last-name pool for synthetic leads.
const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Wilson",
    "Taylor",
];

/// Company pool; `None` entries leave the company unset.
const COMPANIES: &[Option<&str>] = &[
    Some("Acme Corp"),
    Some("Globex"),
    Some("Initech"),
    Some("Umbrella"),
    None,
];

/// Generates random leads over the full attribute vocabularies.
#[derive(Debug)]
pub struct LeadGenerator {
    config: SeederConfig,
    /// Interior mutability required because all public methods take `&self`.
    rng: RefCell<StdRng>,
}

impl LeadGenerator {
    /// Create a generator from `config`.
    ///
    /// Seeds the RNG from `config.seed` if set, otherwise from the OS.
    #[must_use]
    pub fn new(config: SeederConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { config, rng: RefCell::new(rng) }
    }

    /// Generate `config.count` unscored leads.
    ///
    /// Ids come from the RNG too, so a fixed seed reproduces the whole batch.
    #[must_use]
    pub fn generate(&self) -> Vec<Lead> {
        let mut rng = self.rng.borrow_mut();
        (0..self.config.count).map(|_| random_lead(&mut rng)).collect()
    }

    /// Generate one batch and save it to `store`.
    ///
    /// # Errors
    ///
    /// Propagates any [`StoreError`] wrapped in [`SeederError::Store`].
    pub async fn seed_once<S: LeadStore>(&self, store: &S) -> Result<(), SeederError> {
        let leads = self.generate();
        seed_store(store, &leads).await
    }

    /// Feed the store until `config.iterations` batches have been written.
    ///
    /// Sleeps `config.poll_interval` between batches.
    ///
    /// # Errors
    ///
    /// Returns the first [`SeederError::Store`].
    pub async fn run<S: LeadStore>(&self, store: &S) -> Result<(), SeederError> {
        let mut count = 0u64;
        loop {
            self.seed_once(store).await?;

            count += 1;
            tracing::info!(iteration = count, "seeder.batch.written");

            if let Some(max) = self.config.iterations
                && count >= max
            {
                tracing::info!("seeder.run.stopped: iteration limit reached");
                return Ok(());
            }

            tokio::time::sleep(self.config.poll_interval).await;
        }
    }
}

fn pick<T: Copy>(rng: &mut StdRng, items: &[T]) -> T {
    items[rng.random_range(0..items.len())]
}

fn random_lead(rng: &mut StdRng) -> Lead {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    let id = uuid::Builder::from_random_bytes(bytes).into_uuid();

    let first = pick(rng, FIRST_NAMES);
    let last = pick(rng, LAST_NAMES);
    let attributes = LeadAttributes {
        source: pick(rng, &LeadSource::ALL),
        company_size: pick(rng, &CompanySize::ALL),
        engagement_level: EngagementLevel::saturating(rng.random_range(0..=EngagementLevel::MAX)),
        budget_range: pick(rng, &BudgetRange::ALL),
        timeline: pick(rng, &Timeline::ALL),
    };
    let status = pick(rng, &LeadStatus::ALL);
    let company = pick(rng, COMPANIES);

    let mut lead = Lead::new(
        format!("{first} {last}"),
        format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
        attributes,
    )
    .with_status(status);
    lead.id = id;
    lead.company = company.map(str::to_owned);
    lead
}

/// Save every lead in `leads` to `store`, stopping at the first failure.
///
/// # Errors
///
/// Propagates any [`StoreError`] wrapped in [`SeederError::Store`].
pub async fn seed_store<S: LeadStore>(store: &S, leads: &[Lead]) -> Result<(), SeederError> {
    for lead in leads {
        store.save(lead).await?;
    }
    tracing::debug!(count = leads.len(), "seeder.store.seeded");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

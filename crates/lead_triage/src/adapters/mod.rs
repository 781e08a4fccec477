// Rust guideline compliant 2026-10-19

//! Adapters (secondary ports) for the lead-triage binaries.
//!
//! Each sub-module implements one or more hexagonal port traits defined in the
//! `domain` crate. The SQLite adapter lives beside them but is loaded only by
//! the `lead_triage_sqlite` binary.

pub mod in_memory_store;
pub mod log_notifications;

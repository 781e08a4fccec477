// Rust guideline compliant 2026-10-19

//! In-memory adapter for the `LeadStore` port.
//!
//! Intended for demo runs and unit tests only. `StoreError::Unavailable` is
//! part of the port contract but is never returned by this adapter.

use std::cell::RefCell;

use domain::{Lead, LeadStore, StoreError};

/// `LeadStore` adapter backed by an in-memory `Vec<Lead>`.
///
/// `save` replaces the lead with the same id, or appends it. Insertion order
/// is preserved by `load_all`.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RefCell<Vec<Lead>>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of stored leads.
    #[cfg(test)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }
}

impl LeadStore for InMemoryStore {
    async fn load_all(&self) -> Result<Vec<Lead>, StoreError> {
        Ok(self.inner.borrow().clone())
    }

    async fn save(&self, lead: &Lead) -> Result<(), StoreError> {
        let mut inner = self.inner.borrow_mut();
        match inner.iter_mut().find(|stored| stored.id == lead.id) {
            Some(slot) => slot.clone_from(lead),
            None => inner.push(lead.clone()),
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

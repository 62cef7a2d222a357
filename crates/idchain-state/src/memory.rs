//! In-memory reference implementation of the ledger state boundary.
//!
//! Deterministic and test-friendly. Production deployments are expected to
//! implement [`LedgerState`] over the host ledger's own store.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::StateError;
use crate::traits::{InsertOutcome, LedgerState};

/// In-memory ledger state adapter.
#[derive(Default)]
pub struct InMemoryLedger {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerState for InMemoryLedger {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StateError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StateError::Read("entries lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn put_state(&self, key: &str, value: &[u8]) -> Result<(), StateError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StateError::Write("entries lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn put_state_if_absent(
        &self,
        key: &str,
        value: &[u8],
    ) -> Result<InsertOutcome, StateError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StateError::Write("entries lock poisoned".to_string()))?;
        if entries.contains_key(key) {
            return Ok(InsertOutcome::Occupied);
        }
        entries.insert(key.to_string(), value.to_vec());
        Ok(InsertOutcome::Inserted)
    }
}

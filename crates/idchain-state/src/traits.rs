use crate::error::StateError;

/// Result of a conditional write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The key was vacant and the value was written.
    Inserted,
    /// The key already held a value; nothing was written.
    Occupied,
}

/// Key-value boundary to the host ledger store.
///
/// Implementations must make `put_state_if_absent` atomic per key: when two
/// callers race on the same vacant key, exactly one observes
/// [`InsertOutcome::Inserted`]. The registry relies on this for its
/// create-if-absent sequence instead of an unstated single-writer guarantee.
pub trait LedgerState: Send + Sync {
    /// Read the raw bytes stored under `key`, if any.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StateError>;

    /// Unconditionally write `value` under `key`.
    fn put_state(&self, key: &str, value: &[u8]) -> Result<(), StateError>;

    /// Write `value` under `key` only when the key is vacant; never
    /// overwrites an existing value.
    fn put_state_if_absent(&self, key: &str, value: &[u8])
        -> Result<InsertOutcome, StateError>;
}

//! Idchain Registry - the authorization and persistence core
//!
//! Two gated operations over the ledger state boundary:
//! - [`IdentityRegistry::create_identity`] writes a new identity record once,
//!   stamped with the resolved caller name
//! - [`IdentityRegistry::access_identity`] returns the raw stored bytes for
//!   an owner hash
//!
//! Both operations resolve the caller exactly once before touching the
//! store. Retry and backoff policy belong to the host layers on either side
//! of this crate; every error is surfaced immediately.

#![deny(unsafe_code)]

use idchain_resolver::{CallerResolver, CredentialSource, ResolverError};
use idchain_state::{InsertOutcome, LedgerState, StateError};
use idchain_types::Identity;
use thiserror::Error;
use tracing::{error, info, warn};

/// Everything a single invocation needs from its host: ledger state plus the
/// caller's credential.
pub trait InvocationContext: LedgerState + CredentialSource {}

impl<T> InvocationContext for T where T: LedgerState + CredentialSource {}

/// Combines independent state and credential halves into one
/// [`InvocationContext`].
pub struct HostContext<S, C> {
    state: S,
    credential: C,
}

impl<S: LedgerState, C: CredentialSource> HostContext<S, C> {
    pub fn new(state: S, credential: C) -> Self {
        Self { state, credential }
    }

    pub fn state(&self) -> &S {
        &self.state
    }
}

impl<S: LedgerState, C: CredentialSource> LedgerState for HostContext<S, C> {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StateError> {
        self.state.get_state(key)
    }

    fn put_state(&self, key: &str, value: &[u8]) -> Result<(), StateError> {
        self.state.put_state(key, value)
    }

    fn put_state_if_absent(
        &self,
        key: &str,
        value: &[u8],
    ) -> Result<InsertOutcome, StateError> {
        self.state.put_state_if_absent(key, value)
    }
}

impl<S: LedgerState, C: CredentialSource> CredentialSource for HostContext<S, C> {
    fn caller_certificate(&self) -> Result<Vec<u8>, ResolverError> {
        self.credential.caller_certificate()
    }
}

/// The identity registry. Stateless; all record state lives behind the
/// [`LedgerState`] boundary of the invocation context.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityRegistry {
    resolver: CallerResolver,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self {
            resolver: CallerResolver::new(),
        }
    }

    /// Create a new identity record under its owner hash.
    ///
    /// The caller-supplied `owner` field is overwritten with the resolved
    /// caller name before the record is written. The write is conditional on
    /// the key being vacant, so concurrent creates for the same hash cannot
    /// both succeed. The create is not retried internally.
    pub fn create_identity(
        &self,
        ctx: &dyn InvocationContext,
        mut proposed: Identity,
    ) -> Result<(), RegistryError> {
        if proposed.owner_hash.is_empty() {
            return Err(RegistryError::EmptyOwnerHash);
        }

        let caller = self.resolver.resolve_from(ctx)?;

        if !caller.role.may_create() {
            warn!(
                caller = %caller.name,
                role = ?caller.role,
                "identity creation denied"
            );
            return Err(RegistryError::PermissionDenied);
        }

        proposed.owner = caller.name;

        let encoded = serde_json::to_vec(&proposed)
            .map_err(|err| RegistryError::Serialization(err.to_string()))?;

        let key = proposed.owner_hash.as_str();
        match ctx.put_state_if_absent(key, &encoded) {
            Ok(InsertOutcome::Inserted) => {
                info!(owner_hash = %proposed.owner_hash, owner = %proposed.owner, "identity created");
                Ok(())
            }
            Ok(InsertOutcome::Occupied) => {
                warn!(owner_hash = %proposed.owner_hash, "identity already exists");
                Err(RegistryError::AlreadyExists(proposed.owner_hash.0))
            }
            Err(err) => {
                error!(owner_hash = %proposed.owner_hash, %err, "identity write failed");
                Err(RegistryError::Store(err))
            }
        }
    }

    /// Read the raw stored record bytes for `owner_hash`.
    ///
    /// An absent key is `Ok(None)`, not an error. Read restriction for
    /// consumer and validator callers is not enforced: any caller that
    /// resolves is granted access, preserving the permissive behavior
    /// existing deployments rely on.
    pub fn access_identity(
        &self,
        ctx: &dyn InvocationContext,
        owner_hash: &str,
    ) -> Result<Option<Vec<u8>>, RegistryError> {
        let _caller = self.resolver.resolve_from(ctx)?;

        ctx.get_state(owner_hash).map_err(|err| {
            error!(%owner_hash, %err, "identity read failed");
            RegistryError::Store(err)
        })
    }
}

/// Registry operation errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("caller resolution failed: {0}")]
    AuthResolution(#[from] ResolverError),

    #[error("only the owner of an identity can create it")]
    PermissionDenied,

    #[error("identity already exists for owner hash {0}")]
    AlreadyExists(String),

    #[error("owner hash must not be empty")]
    EmptyOwnerHash,

    #[error("identity serialization failed: {0}")]
    Serialization(String),

    #[error("ledger state error: {0}")]
    Store(#[from] StateError),
}

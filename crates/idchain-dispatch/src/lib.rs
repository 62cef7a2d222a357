//! Idchain Dispatch - invocation routing for the identity ledger
//!
//! Maps external operation names onto registry operations, decodes their
//! string arguments, and surfaces every failure as a textual error with no
//! payload. Mutating operations arrive through [`IdentityLedgerApp::invoke`],
//! reads through [`IdentityLedgerApp::query`], mirroring the host ledger's
//! invoke/query split.

#![deny(unsafe_code)]

use idchain_registry::{IdentityRegistry, InvocationContext, RegistryError};
use idchain_types::Identity;
use thiserror::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// The deployable identity ledger application: dispatch over a stateless
/// registry.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityLedgerApp {
    registry: IdentityRegistry,
}

impl IdentityLedgerApp {
    pub fn new() -> Self {
        Self {
            registry: IdentityRegistry::new(),
        }
    }

    /// Deployment bootstrap hook. Never fails for valid deployment
    /// arguments; the arguments themselves carry no meaning here.
    pub fn init(&self, args: &[String]) -> Result<(), DispatchError> {
        info!(?args, "identity ledger initialized");
        Ok(())
    }

    /// Route a mutating invocation to the registry.
    pub fn invoke(
        &self,
        ctx: &dyn InvocationContext,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>, DispatchError> {
        debug!(function, "invoke");
        match function {
            "create_identity" => {
                let raw = args
                    .first()
                    .ok_or(DispatchError::MissingArgument("identity document"))?;
                let identity: Identity =
                    serde_json::from_str(raw).map_err(|_| DispatchError::Decode)?;
                self.registry.create_identity(ctx, identity)?;
                Ok(Vec::new())
            }
            _ => {
                warn!(function, "unknown invoke function");
                Err(DispatchError::UnknownFunction)
            }
        }
    }

    /// Route a read-only invocation to the registry.
    ///
    /// An absent owner hash yields empty bytes, not an error.
    pub fn query(
        &self,
        ctx: &dyn InvocationContext,
        function: &str,
        args: &[String],
    ) -> Result<Vec<u8>, DispatchError> {
        debug!(function, "query");
        match function {
            "access_identity" => {
                let owner_hash = args
                    .first()
                    .ok_or(DispatchError::MissingArgument("owner hash"))?;
                let stored = self.registry.access_identity(ctx, owner_hash)?;
                Ok(stored.unwrap_or_default())
            }
            _ => {
                warn!(function, "unknown query function");
                Err(DispatchError::UnknownFunction)
            }
        }
    }
}

/// Install the process-wide tracing subscriber for binary hosts.
///
/// `RUST_LOG` overrides the default level when set.
pub fn init_telemetry(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Dispatch-boundary errors.
///
/// The display texts of [`DispatchError::Decode`] and
/// [`DispatchError::UnknownFunction`] are part of the external contract;
/// callers match on them.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Unmarshal identity data")]
    Decode,

    #[error("Unknown function call")]
    UnknownFunction,

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

//! Idchain Resolver - caller name and role derivation
//!
//! The resolver consumes a caller certificate that the host transport has
//! already authenticated; issuance, revocation, and trust-chain validation
//! are out of scope here. It extracts the subject common name and assigns an
//! authorization role.

#![deny(unsafe_code)]

use idchain_types::Role;
use thiserror::Error;
use x509_parser::prelude::*;

/// The caller as seen by the registry: a name and an authorization role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedCaller {
    pub name: String,
    pub role: Role,
}

/// Source of the caller's credential bytes, provided by the host invocation
/// context.
pub trait CredentialSource: Send + Sync {
    /// Raw DER bytes of the authenticated caller certificate.
    fn caller_certificate(&self) -> Result<Vec<u8>, ResolverError>;
}

/// A [`CredentialSource`] holding fixed credential bytes.
///
/// Reference implementation for tests and embedded hosts where the
/// credential is known up front.
#[derive(Clone, Debug)]
pub struct StaticCredential {
    der: Vec<u8>,
}

impl StaticCredential {
    pub fn new(der: impl Into<Vec<u8>>) -> Self {
        Self { der: der.into() }
    }
}

impl CredentialSource for StaticCredential {
    fn caller_certificate(&self) -> Result<Vec<u8>, ResolverError> {
        Ok(self.der.clone())
    }
}

/// Derives a caller's name and role from an authenticated credential.
#[derive(Clone, Copy, Debug, Default)]
pub struct CallerResolver;

impl CallerResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the caller from raw certificate bytes.
    ///
    /// Pure function of its input. Returns the certificate's subject common
    /// name (empty when the subject carries none) and the caller's role.
    ///
    /// Known limitation: role derivation from certificate attributes is not
    /// wired up; every authenticated caller resolves to [`Role::Owner`].
    pub fn resolve(&self, credential: &[u8]) -> Result<ResolvedCaller, ResolverError> {
        let (_, certificate) = parse_x509_certificate(credential)
            .map_err(|err| ResolverError::Parse(err.to_string()))?;

        let name = certificate
            .subject()
            .iter_common_name()
            .next()
            .and_then(|cn| cn.as_str().ok())
            .unwrap_or_default()
            .to_string();

        Ok(ResolvedCaller {
            name,
            role: Role::Owner,
        })
    }

    /// Retrieve the credential from `source` and resolve the caller.
    pub fn resolve_from(
        &self,
        source: &dyn CredentialSource,
    ) -> Result<ResolvedCaller, ResolverError> {
        let credential = source.caller_certificate()?;
        self.resolve(&credential)
    }
}

/// Caller resolution errors.
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("caller certificate unavailable: {0}")]
    Unavailable(String),

    #[error("caller certificate malformed: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn certificate_der(common_name: &str) -> Vec<u8> {
        let mut params = rcgen::CertificateParams::default();
        let mut dn = rcgen::DistinguishedName::new();
        dn.push(rcgen::DnType::CommonName, common_name);
        params.distinguished_name = dn;
        let key_pair = rcgen::KeyPair::generate().unwrap();
        params.self_signed(&key_pair).unwrap().der().to_vec()
    }

    struct FailingCredential;

    impl CredentialSource for FailingCredential {
        fn caller_certificate(&self) -> Result<Vec<u8>, ResolverError> {
            Err(ResolverError::Unavailable("no transport context".into()))
        }
    }

    #[test]
    fn resolves_subject_common_name() {
        let resolver = CallerResolver::new();
        let caller = resolver.resolve(&certificate_der("rajeev")).unwrap();
        assert_eq!(caller.name, "rajeev");
        assert_eq!(caller.role, Role::Owner);
    }

    #[test]
    fn non_certificate_bytes_fail_with_parse_error() {
        let resolver = CallerResolver::new();
        let err = resolver.resolve(b"not a certificate").unwrap_err();
        assert!(matches!(err, ResolverError::Parse(_)));
    }

    #[test]
    fn resolve_from_static_credential() {
        let resolver = CallerResolver::new();
        let source = StaticCredential::new(certificate_der("sakhuja"));
        let caller = resolver.resolve_from(&source).unwrap();
        assert_eq!(caller.name, "sakhuja");
    }

    #[test]
    fn unavailable_credential_is_surfaced() {
        let resolver = CallerResolver::new();
        let err = resolver.resolve_from(&FailingCredential).unwrap_err();
        assert!(matches!(err, ResolverError::Unavailable(_)));
    }
}

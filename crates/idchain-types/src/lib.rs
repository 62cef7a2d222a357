//! Idchain Types - record model for the identity ledger
//!
//! The JSON field names on [`Identity`] and [`Demographic`] are part of the
//! external contract: existing stored records use `hash`, `owner` and the
//! abbreviated demographic names. Do not rename them on the wire.

#![deny(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Authorization class of a caller. Derived per invocation, never
/// persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Owner of the identity record.
    Owner,
    /// A party interested in consuming the identity.
    Consumer,
    /// An entity that can certify or validate the identity.
    Validator,
}

impl Role {
    /// Only the owner of an identity may create its record.
    pub fn may_create(&self) -> bool {
        matches!(self, Role::Owner)
    }
}

/// Caller-chosen key identifying an identity record in the ledger.
///
/// Doubles as the record's primary key; uniqueness is enforced by the
/// registry, not by the store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerHash(pub String);

impl OwnerHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for OwnerHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Personal demographic data carried by an identity record.
///
/// All fields are opaque text; no identifier format validation is performed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographic {
    #[serde(rename = "fname")]
    pub first_name: String,
    #[serde(rename = "mname")]
    pub middle_name: String,
    #[serde(rename = "lname")]
    pub last_name: String,
    #[serde(rename = "ssn")]
    pub national_id: String,
}

/// The persisted identity record.
///
/// `owner` is never trusted from input: the registry overwrites it with the
/// resolved caller name before the record is written, so a caller cannot
/// create a record falsely attributed to someone else. Once written a record
/// is immutable; no update or delete path exists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(rename = "hash")]
    pub owner_hash: OwnerHash,
    pub owner: String,
    pub demographic: Demographic,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_field_names_are_stable() {
        let identity = Identity {
            owner_hash: OwnerHash::new("H1"),
            owner: "rajeev".to_string(),
            demographic: Demographic {
                first_name: "rajeev".to_string(),
                middle_name: "*".to_string(),
                last_name: "sakhuja".to_string(),
                national_id: "123456789".to_string(),
            },
        };

        let encoded = serde_json::to_value(&identity).unwrap();
        assert_eq!(
            encoded,
            serde_json::json!({
                "hash": "H1",
                "owner": "rajeev",
                "demographic": {
                    "fname": "rajeev",
                    "mname": "*",
                    "lname": "sakhuja",
                    "ssn": "123456789",
                },
            })
        );
    }

    #[test]
    fn decodes_existing_stored_record() {
        let raw = r#"{"hash":"H1","owner":"ignored","demographic":{"fname":"rajeev","mname":"*","lname":"sakhuja","ssn":"123456789"}}"#;
        let identity: Identity = serde_json::from_str(raw).unwrap();
        assert_eq!(identity.owner_hash.as_str(), "H1");
        assert_eq!(identity.owner, "ignored");
        assert_eq!(identity.demographic.last_name, "sakhuja");
    }

    #[test]
    fn only_owner_may_create() {
        assert!(Role::Owner.may_create());
        assert!(!Role::Consumer.may_create());
        assert!(!Role::Validator.may_create());
    }
}

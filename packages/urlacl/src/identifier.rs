//! Identifiers for emitted records.
//!
//! Elements without an authored `Id` get one derived from their context.
//! Derivation is deterministic, so a reservation authored twice with the
//! same content gets the same identifier twice and shows up as a duplicate
//! instead of as two distinct records.

use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::types::ElementKind;

/// Identifier of a row, unique within its table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Derive an identifier from the ordered context parts of an element.
///
/// The result is the kind's prefix followed by the hex SHA-256 digest of
/// the parts. Each part is length-prefixed before hashing so that moving a
/// separator between parts changes the digest. Absent parts hash as empty
/// strings.
///
/// # Examples
/// ```
/// use urlacl_compiler::derive_identifier;
/// use urlacl_compiler::types::ElementKind;
///
/// let a = derive_identifier(ElementKind::UrlReservation, &[Some("Comp"), None, Some("http://+:80/")]);
/// let b = derive_identifier(ElementKind::UrlReservation, &[Some("Comp"), None, Some("http://+:80/")]);
/// assert_eq!(a, b);
/// assert!(a.as_str().starts_with("url"));
/// ```
#[must_use]
pub fn derive_identifier(kind: ElementKind, parts: &[Option<&str>]) -> Identifier {
    let mut hasher = Sha256::new();
    for part in parts {
        let bytes = part.unwrap_or_default().as_bytes();
        hasher.update((bytes.len() as u64).to_le_bytes());
        hasher.update(bytes);
    }
    let digest = hex::encode(hasher.finalize());
    Identifier(format!("{}{digest}", kind.identifier_prefix()))
}

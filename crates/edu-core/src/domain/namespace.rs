// ============================================================================
// EDU Core - Namespace Key
// File: crates/edu-core/src/domain/namespace.rs
// Description: Validated tenant namespace key (PostgreSQL schema name)
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use edu_shared::constants::{DIRECTORY_SCHEMA, MAX_NAMESPACE_KEY_LENGTH};

use crate::error::DomainError;

/// Globally unique, immutable key naming a tenant's namespace.
///
/// A parsed key is always a plain lowercase PostgreSQL identifier
/// (`[a-z][a-z0-9_]*`, at most 63 bytes) that is not reserved by the server
/// or used by the directory, so it can never address another schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NamespaceKey(String);

impl NamespaceKey {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if raw.is_empty() {
            return Err(DomainError::InvalidNamespaceKey("key is empty".into()));
        }
        if raw.len() > MAX_NAMESPACE_KEY_LENGTH {
            return Err(DomainError::InvalidNamespaceKey(format!(
                "key is longer than {} characters",
                MAX_NAMESPACE_KEY_LENGTH
            )));
        }

        let mut chars = raw.chars();
        if !chars.next().is_some_and(|c| c.is_ascii_lowercase()) {
            return Err(DomainError::InvalidNamespaceKey(
                "key must start with a lowercase letter".into(),
            ));
        }
        if !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
            return Err(DomainError::InvalidNamespaceKey(
                "key may only contain lowercase letters, digits and '_'".into(),
            ));
        }

        if raw == DIRECTORY_SCHEMA || raw == "information_schema" || raw.starts_with("pg_") {
            return Err(DomainError::InvalidNamespaceKey(format!("'{}' is reserved", raw)));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Double-quoted identifier form for DDL and `search_path`.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0.replace('"', "\"\""))
    }
}

impl fmt::Display for NamespaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NamespaceKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for NamespaceKey {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NamespaceKey> for String {
    fn from(key: NamespaceKey) -> Self {
        key.0
    }
}

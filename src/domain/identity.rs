//! Caller identity used as the vote deduplication key.
//!
//! An identity is either the caller's public IP address or, when that lookup
//! fails, a random `anonymous-*` token. It is not a credential.

use crate::domain::token::random_base36;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix marking an identity that did not come from an address lookup.
pub const FALLBACK_PREFIX: &str = "anonymous-";

const FALLBACK_TOKEN_LEN: usize = 13;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// A fresh non-authoritative identity, e.g. `anonymous-k3j9x0q2m1a7z`.
    pub fn fallback() -> Self {
        Self(format!("{}{}", FALLBACK_PREFIX, random_base36(FALLBACK_TOKEN_LEN)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_fallback(&self) -> bool {
        self.0.starts_with(FALLBACK_PREFIX)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_identities_are_marked_and_distinct() {
        let a = Identity::fallback();
        let b = Identity::fallback();
        assert!(a.is_fallback());
        assert!(a.as_str().starts_with("anonymous-"));
        assert_eq!(a.as_str().len(), FALLBACK_PREFIX.len() + FALLBACK_TOKEN_LEN);
        assert_ne!(a, b);
    }

    #[test]
    fn address_identity_is_not_fallback() {
        let ip = Identity::new("1.2.3.4");
        assert!(!ip.is_fallback());
        assert_eq!(ip.to_string(), "1.2.3.4");
    }
}

//! # Credential Stores
//!
//! How a password is kept on the user record and checked at login.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CREDENTIAL STORES                                  │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  CredentialStore Trait                                                 │
//! │  ─────────────────────                                                 │
//! │  • protect(user, password)          → stored credential                │
//! │  • verify(user, stored, candidate)  → bool                             │
//! │                                                                         │
//! │  ┌─────────────────────┐   ┌─────────────────────────────────┐        │
//! │  │ PlaintextCredentials│   │ Sha256Credentials               │        │
//! │  │                     │   │                                 │        │
//! │  │ stored = password   │   │ stored = hex(SHA-256(           │        │
//! │  │ verify = equality   │   │   user ‖ 0x00 ‖ password))      │        │
//! │  └─────────────────────┘   └─────────────────────────────────┘        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `PlaintextCredentials` is the default and keeps the password verbatim.
//! It is a known weakness, kept so login behaves exactly like plain string
//! comparison.

use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::config::CredentialPolicy;

/// Protects and verifies user passwords
pub trait CredentialStore: Send + Sync {
    /// Turn a password into the value kept on the user record
    fn protect(&self, username: &str, password: &str) -> String;

    /// Check a login attempt against the kept value
    fn verify(&self, username: &str, stored: &str, candidate: &str) -> bool;
}

/// Keeps passwords verbatim and compares them exactly
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextCredentials;

impl CredentialStore for PlaintextCredentials {
    fn protect(&self, _username: &str, password: &str) -> String {
        password.to_string()
    }

    fn verify(&self, _username: &str, stored: &str, candidate: &str) -> bool {
        stored == candidate
    }
}

/// Keeps a SHA-256 digest of the password, salted with the username
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Credentials;

impl Sha256Credentials {
    fn digest(username: &str, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(username.as_bytes());
        hasher.update([0u8]);
        hasher.update(password.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl CredentialStore for Sha256Credentials {
    fn protect(&self, username: &str, password: &str) -> String {
        Self::digest(username, password)
    }

    fn verify(&self, username: &str, stored: &str, candidate: &str) -> bool {
        Self::digest(username, candidate) == stored
    }
}

/// Build the store selected by `policy`
pub fn credential_store(policy: CredentialPolicy) -> Arc<dyn CredentialStore> {
    match policy {
        CredentialPolicy::Plaintext => Arc::new(PlaintextCredentials),
        CredentialPolicy::Sha256 => Arc::new(Sha256Credentials),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plaintext_store() {
        let store = PlaintextCredentials;
        let stored = store.protect("alice", "p1");

        assert_eq!(stored, "p1");
        assert!(store.verify("alice", &stored, "p1"));
        assert!(!store.verify("alice", &stored, "P1"));
        assert!(!store.verify("alice", &stored, "p1 "));
    }

    #[test]
    fn test_sha256_store() {
        let store = Sha256Credentials;
        let stored = store.protect("alice", "p1");

        assert_eq!(stored.len(), 64);
        assert_ne!(stored, "p1");
        assert!(store.verify("alice", &stored, "p1"));
        assert!(!store.verify("alice", &stored, "wrong"));
    }

    #[test]
    fn test_sha256_salted_by_username() {
        let store = Sha256Credentials;
        let alice = store.protect("alice", "same");
        let bob = store.protect("bob", "same");

        assert_ne!(alice, bob);
        assert!(!store.verify("bob", &alice, "same"));
    }

    #[test]
    fn test_credential_store_from_policy() {
        let plain = credential_store(CredentialPolicy::Plaintext);
        assert_eq!(plain.protect("u", "pw"), "pw");

        let hashed = credential_store(CredentialPolicy::Sha256);
        assert_ne!(hashed.protect("u", "pw"), "pw");
    }
}

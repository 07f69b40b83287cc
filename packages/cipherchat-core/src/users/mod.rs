//! # Users Module
//!
//! Registered users and the registry that owns them.
//!
//! ## User Record
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         USER RECORD                                     │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  username        unique across the registry                            │
//! │  credential      whatever the CredentialStore produced                 │
//! │  key_pair        (e, d, n), generated once at registration             │
//! │  symmetric_key   32 printable bytes, never rotated                     │
//! │  history         sender → [StoredMessage, ...]   append-only           │
//! │  created_at      Unix seconds                                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! History is recorded only on the receiving side: a user's history holds
//! what others sent to them, keyed by the sender's name.

mod credentials;
mod registry;

pub use credentials::{credential_store, CredentialStore, PlaintextCredentials, Sha256Credentials};
pub use registry::UserRegistry;

use std::collections::HashMap;
use std::fmt;

use crate::crypto::{KeyPair, PublicKey, SymmetricKey};
use crate::messaging::StoredMessage;

/// A registered user and everything they own
pub struct User {
    username: String,
    credential: String,
    key_pair: KeyPair,
    symmetric_key: SymmetricKey,
    history: HashMap<String, Vec<StoredMessage>>,
    created_at: i64,
}

impl User {
    pub(crate) fn new(
        username: String,
        credential: String,
        key_pair: KeyPair,
        symmetric_key: SymmetricKey,
    ) -> Self {
        Self {
            username,
            credential,
            key_pair,
            symmetric_key,
            history: HashMap::new(),
            created_at: crate::time::now_timestamp(),
        }
    }

    /// Username
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The user's asymmetric keypair
    pub fn key_pair(&self) -> &KeyPair {
        &self.key_pair
    }

    /// Public half of the keypair
    pub fn public_key(&self) -> PublicKey {
        self.key_pair.public_key()
    }

    /// The user's symmetric key
    pub fn symmetric_key(&self) -> &SymmetricKey {
        &self.symmetric_key
    }

    /// When the user registered (Unix timestamp)
    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    /// Messages received from `sender`, oldest first
    pub fn history(&self, sender: &str) -> &[StoredMessage] {
        self.history.get(sender).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All received messages, keyed by sender
    pub fn conversations(&self) -> &HashMap<String, Vec<StoredMessage>> {
        &self.history
    }

    /// Total number of received messages
    pub fn message_count(&self) -> usize {
        self.history.values().map(Vec::len).sum()
    }

    pub(crate) fn credential(&self) -> &str {
        &self.credential
    }

    pub(crate) fn add_message(&mut self, sender: &str, message: StoredMessage) {
        self.history
            .entry(sender.to_string())
            .or_default()
            .push(message);
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("key_pair", &self.key_pair)
            .field("symmetric_key", &self.symmetric_key)
            .field("messages", &self.message_count())
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TESTS
// ============================================================================

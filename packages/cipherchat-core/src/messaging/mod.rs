//! # Messaging Module
//!
//! Hybrid-encrypted messages between registered users.
//!
//! ## Message Encryption Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    MESSAGE ENCRYPTION FLOW                              │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Sender (Alice)                              Recipient (Bob)           │
//! │  ──────────────                              ───────────────           │
//! │                                                                         │
//! │  1. XOR the message with Alice's symmetric key                         │
//! │     body = "hello" ⊕ K_alice                                           │
//! │                                                                         │
//! │  2. Wrap K_alice under Bob's public key                                │
//! │     blob = asym_encrypt(K_alice, (e_bob, n_bob))                       │
//! │                                                                         │
//! │  3. Append to Bob's history under "alice"                              │
//! │     ┌────────────────────────────────┐                                 │
//! │     │  body  │ '|' │  "t₀ t₁ ... t₃₁ " │ ──────────────────────────►   │
//! │     └────────────────────────────────┘                                 │
//! │                                                                         │
//! │                                        4. Unwrap with (d_bob, n_bob)   │
//! │                                           K_alice = asym_decrypt(blob) │
//! │                                                                         │
//! │                                        5. body ⊕ K_alice = "hello"     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only the recipient's history changes. The sender keeps no copy of what
//! they sent, and sending to yourself records the entry once, under your
//! own name.
//!
//! The body is raw XOR output and may itself contain `'|'`. The key blob
//! never does, so a serialized entry is split at its last `'|'`.

use crate::crypto::{asymmetric, symmetric};
use crate::error::{Error, Result};
use crate::users::UserRegistry;

/// Separator between body and key blob in a serialized entry
pub const SEPARATOR: u8 = b'|';

// ============================================================================
// STORED MESSAGE
// ============================================================================

/// One entry in a recipient's history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    body: Vec<u8>,
    key_blob: String,
    received_at: i64,
}

impl StoredMessage {
    /// Create an entry stamped with the current time
    pub fn new(body: Vec<u8>, key_blob: String) -> Self {
        Self {
            body,
            key_blob,
            received_at: crate::time::now_timestamp(),
        }
    }

    /// Symmetrically encrypted message bytes
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Sender's symmetric key, encrypted to the recipient
    pub fn key_blob(&self) -> &str {
        &self.key_blob
    }

    /// When the entry was appended (Unix timestamp)
    pub fn received_at(&self) -> i64 {
        self.received_at
    }

    /// Serialize as `body | key_blob`
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.body.len() + 1 + self.key_blob.len());
        out.extend_from_slice(&self.body);
        out.push(SEPARATOR);
        out.extend_from_slice(self.key_blob.as_bytes());
        out
    }

    /// Parse a serialized entry, splitting at the last `'|'`
    ///
    /// The timestamp is not part of the wire form, so the parsed entry is
    /// stamped with the current time.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let split = bytes
            .iter()
            .rposition(|&b| b == SEPARATOR)
            .ok_or_else(|| Error::MalformedMessage("missing '|' separator".into()))?;

        let key_blob = std::str::from_utf8(&bytes[split + 1..])
            .map_err(|_| Error::MalformedMessage("key blob is not valid UTF-8".into()))?;

        Ok(Self::new(bytes[..split].to_vec(), key_blob.to_string()))
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Sends and opens hybrid-encrypted messages against a [`UserRegistry`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MessagingPipeline;

impl MessagingPipeline {
    /// Encrypt `message` from `sender` to `recipient` and append it to the
    /// recipient's history under the sender's name
    ///
    /// Nothing is recorded if either user is unknown or encryption fails.
    pub fn send(
        registry: &mut UserRegistry,
        sender: &str,
        recipient: &str,
        message: &[u8],
    ) -> Result<StoredMessage> {
        let sender_key = registry
            .user(sender)
            .map(|user| user.symmetric_key().clone())
            .ok_or_else(|| Error::UnknownParticipant(sender.to_string()))?;
        let recipient_key = registry
            .public_key(recipient)
            .ok_or_else(|| Error::UnknownParticipant(recipient.to_string()))?;

        let body = symmetric::transform(message, sender_key.as_bytes())?;
        let key_blob = asymmetric::encrypt(sender_key.as_bytes(), &recipient_key)?;
        let entry = StoredMessage::new(body, key_blob);

        registry
            .user_mut(recipient)
            .ok_or_else(|| Error::UnknownParticipant(recipient.to_string()))?
            .add_message(sender, entry.clone());

        tracing::debug!(
            "Stored {}-byte message from {} for {}",
            message.len(),
            sender,
            recipient
        );
        Ok(entry)
    }

    /// Recover the plaintext of an entry in `recipient`'s history
    ///
    /// Unwraps the sender's symmetric key with the recipient's private key,
    /// then reverses the XOR.
    pub fn open(registry: &UserRegistry, recipient: &str, entry: &StoredMessage) -> Result<Vec<u8>> {
        let user = registry
            .user(recipient)
            .ok_or_else(|| Error::UnknownParticipant(recipient.to_string()))?;

        let key = asymmetric::decrypt_with(entry.key_blob(), user.key_pair())?;
        symmetric::transform(entry.body(), &key)
    }
}

// ============================================================================
// TESTS
// ============================================================================

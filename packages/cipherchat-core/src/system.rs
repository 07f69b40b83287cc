//! # Chat System
//!
//! A thread-safe entry point that owns the user registry and the random
//! source.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CHAT SYSTEM                                     │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────┐      ┌─────────────────────────┐          │
//! │  │ RwLock<UserRegistry>    │      │ Mutex<rng>              │          │
//! │  │                         │      │                         │          │
//! │  │ read:  authenticate,    │      │ locked only while       │          │
//! │  │        open, history    │      │ registering, after the  │          │
//! │  │ write: register, send   │      │ registry write lock     │          │
//! │  └─────────────────────────┘      └─────────────────────────┘          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Registering holds the registry write lock for the whole key
//! generation, so two registrations of the same name cannot both succeed.

use std::collections::HashMap;

use parking_lot::{Mutex, RwLock};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::config::CoreConfig;
use crate::crypto::PublicKey;
use crate::error::{Error, Result};
use crate::messaging::{MessagingPipeline, StoredMessage};
use crate::users::UserRegistry;

/// Registry plus randomness behind one shareable handle
pub struct ChatSystem {
    registry: RwLock<UserRegistry>,
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl ChatSystem {
    /// Create a system seeded from OS entropy
    pub fn new(config: CoreConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create a system with a caller-supplied random source
    ///
    /// Pass a seeded RNG for reproducible keys.
    pub fn with_rng(config: CoreConfig, rng: impl RngCore + Send + 'static) -> Result<Self> {
        let registry = UserRegistry::new(&config)?;
        tracing::info!(
            "Chat system ready (primes in [{}, {}], {}-byte session keys)",
            config.prime_min,
            config.prime_max,
            config.symmetric_key_len
        );
        Ok(Self::from_parts(registry, rng))
    }

    /// Wrap an existing registry
    pub fn from_parts(registry: UserRegistry, rng: impl RngCore + Send + 'static) -> Self {
        Self {
            registry: RwLock::new(registry),
            rng: Mutex::new(Box::new(rng)),
        }
    }

    /// Register a user; see [`UserRegistry::register`]
    pub fn register(&self, username: &str, password: &str) -> Result<()> {
        let mut registry = self.registry.write();
        let mut rng = self.rng.lock();
        registry.register(&mut **rng, username, password)
    }

    /// Check a username and password
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        self.registry.read().authenticate(username, password)
    }

    /// Send `message` from `sender` to `recipient`
    pub fn send(&self, sender: &str, recipient: &str, message: &str) -> Result<StoredMessage> {
        let mut registry = self.registry.write();
        MessagingPipeline::send(&mut registry, sender, recipient, message.as_bytes())
    }

    /// Decrypt an entry from `recipient`'s history
    ///
    /// Messages are sent as text, so plaintext that is not UTF-8 means the
    /// entry was opened with the wrong key or altered, and yields
    /// `MalformedMessage`.
    pub fn open(&self, recipient: &str, entry: &StoredMessage) -> Result<String> {
        let plaintext = MessagingPipeline::open(&self.registry.read(), recipient, entry)?;
        String::from_utf8(plaintext).map_err(|e| {
            Error::MalformedMessage(format!(
                "plaintext is not UTF-8 at byte {}",
                e.utf8_error().valid_up_to()
            ))
        })
    }

    /// Messages `recipient` has received from `sender`, oldest first
    pub fn history(&self, recipient: &str, sender: &str) -> Vec<StoredMessage> {
        self.registry.read().history(recipient, sender)
    }

    /// Every message `recipient` has received, keyed by sender
    pub fn messages_for(&self, recipient: &str) -> Result<HashMap<String, Vec<StoredMessage>>> {
        self.registry.read().conversations(recipient)
    }

    /// A user's public key
    pub fn public_key(&self, username: &str) -> Option<PublicKey> {
        self.registry.read().public_key(username)
    }

    /// Registered usernames, sorted
    pub fn usernames(&self) -> Vec<String> {
        self.registry.read().usernames()
    }

    /// Number of registered users
    pub fn user_count(&self) -> usize {
        self.registry.read().len()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_system(seed: u64) -> ChatSystem {
        let config = CoreConfig {
            prime_min: 1_000,
            prime_max: 50_000,
            ..CoreConfig::default()
        };
        ChatSystem::with_rng(config, StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn test_register_and_authenticate() {
        let system = create_test_system(1);

        system.register("alice", "p1").unwrap();
        assert!(system.authenticate("alice", "p1"));
        assert!(!system.authenticate("alice", "nope"));
        assert_eq!(
            system.register("alice", "p2"),
            Err(Error::DuplicateUsername("alice".into()))
        );
        assert_eq!(system.user_count(), 1);
    }

    #[test]
    fn test_send_and_open() {
        let system = create_test_system(2);
        system.register("alice", "p1").unwrap();
        system.register("bob", "p2").unwrap();

        system.send("alice", "bob", "hello").unwrap();

        let history = system.history("bob", "alice");
        assert_eq!(history.len(), 1);
        assert_eq!(system.open("bob", &history[0]).unwrap(), "hello");
        assert!(system.history("alice", "bob").is_empty());
    }

    #[test]
    fn test_open_rejects_non_utf8_plaintext() {
        let system = create_test_system(6);
        system.register("alice", "p1").unwrap();
        system.register("bob", "p2").unwrap();
        let entry = system.send("alice", "bob", "hello").unwrap();

        // Flip the first body byte so it decrypts to 0xFF
        let mut body = entry.body().to_vec();
        body[0] ^= b'h' ^ 0xFF;
        let tampered = StoredMessage::new(body, entry.key_blob().to_string());

        assert!(matches!(
            system.open("bob", &tampered),
            Err(Error::MalformedMessage(_))
        ));
        assert_eq!(system.open("bob", &entry).unwrap(), "hello");
    }

    #[test]
    fn test_messages_for() {
        let system = create_test_system(3);
        for name in ["alice", "bob", "carol"] {
            system.register(name, "pw").unwrap();
        }
        system.send("alice", "carol", "from alice").unwrap();
        system.send("bob", "carol", "from bob").unwrap();
        system.send("bob", "carol", "again").unwrap();

        let inbox = system.messages_for("carol").unwrap();
        assert_eq!(inbox.len(), 2);
        assert_eq!(inbox["alice"].len(), 1);
        assert_eq!(inbox["bob"].len(), 2);
        assert!(system.messages_for("alice").unwrap().is_empty());
        assert!(matches!(
            system.messages_for("ghost"),
            Err(Error::UnknownParticipant(_))
        ));
    }

    #[test]
    fn test_same_seed_same_keys() {
        let a = create_test_system(99);
        let b = create_test_system(99);
        a.register("alice", "pw").unwrap();
        b.register("alice", "pw").unwrap();

        assert_eq!(a.public_key("alice"), b.public_key("alice"));
    }

    #[test]
    fn test_concurrent_registration() {
        let system = create_test_system(4);

        std::thread::scope(|s| {
            for i in 0..8 {
                let system = &system;
                s.spawn(move || {
                    system.register(&format!("user{}", i), "pw").unwrap();
                    // Everyone races for the same name; exactly one wins
                    let _ = system.register("shared", "pw");
                });
            }
        });

        assert_eq!(system.user_count(), 9);
        assert!(system.usernames().contains(&"shared".to_string()));
    }

    #[test]
    fn test_concurrent_sends() {
        let system = create_test_system(5);
        system.register("hub", "pw").unwrap();
        for i in 0..4 {
            system.register(&format!("peer{}", i), "pw").unwrap();
        }

        std::thread::scope(|s| {
            for i in 0..4 {
                let system = &system;
                s.spawn(move || {
                    let sender = format!("peer{}", i);
                    for n in 0..5 {
                        system.send(&sender, "hub", &format!("{}-{}", sender, n)).unwrap();
                    }
                });
            }
        });

        for i in 0..4 {
            let sender = format!("peer{}", i);
            let opened: Vec<String> = system
                .history("hub", &sender)
                .iter()
                .map(|e| system.open("hub", e).unwrap())
                .collect();
            let expected: Vec<String> = (0..5).map(|n| format!("{}-{}", sender, n)).collect();
            assert_eq!(opened, expected);
        }
    }
}

//! User registry: registration, login and lookups.

use std::collections::HashMap;
use std::sync::Arc;

use rand::RngCore;

use super::credentials::{credential_store, CredentialStore};
use super::User;
use crate::config::CoreConfig;
use crate::crypto::{KeyPairGenerator, PublicKey, SymmetricKey};
use crate::error::{Error, Result};
use crate::messaging::StoredMessage;

/// Owns every registered user, keyed by username
pub struct UserRegistry {
    users: HashMap<String, User>,
    keygen: KeyPairGenerator,
    symmetric_key_len: usize,
    credentials: Arc<dyn CredentialStore>,
}

impl UserRegistry {
    /// Create an empty registry using the credential policy from `config`
    pub fn new(config: &CoreConfig) -> Result<Self> {
        Self::with_credential_store(config, credential_store(config.credentials))
    }

    /// Create an empty registry with a custom credential store
    pub fn with_credential_store(
        config: &CoreConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self> {
        let keygen = KeyPairGenerator::new(config)?;
        Ok(Self {
            users: HashMap::new(),
            keygen,
            symmetric_key_len: config.symmetric_key_len,
            credentials,
        })
    }

    /// Register a new user with fresh keys
    ///
    /// Keys are generated before the user is inserted, so a failed
    /// generation leaves the registry unchanged.
    pub fn register<R: RngCore + ?Sized>(
        &mut self,
        rng: &mut R,
        username: &str,
        password: &str,
    ) -> Result<()> {
        if self.users.contains_key(username) {
            tracing::debug!("Rejected duplicate registration for {}", username);
            return Err(Error::DuplicateUsername(username.to_string()));
        }

        let key_pair = self.keygen.generate(rng)?;
        let symmetric_key = SymmetricKey::generate(rng, self.symmetric_key_len)?;
        let credential = self.credentials.protect(username, password);

        self.users.insert(
            username.to_string(),
            User::new(username.to_string(), credential, key_pair, symmetric_key),
        );

        tracing::info!("Registered user {}", username);
        Ok(())
    }

    /// Check a username and password
    ///
    /// Unknown users and wrong passwords look the same to the caller.
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        let ok = self
            .users
            .get(username)
            .map(|user| self.credentials.verify(username, user.credential(), password))
            .unwrap_or(false);

        if !ok {
            tracing::debug!("Failed login for {}", username);
        }
        ok
    }

    /// Whether `username` is registered
    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    /// Look up a user
    pub fn user(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    pub(crate) fn user_mut(&mut self, username: &str) -> Option<&mut User> {
        self.users.get_mut(username)
    }

    /// A user's public key
    pub fn public_key(&self, username: &str) -> Option<PublicKey> {
        self.users.get(username).map(User::public_key)
    }

    /// Number of registered users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether nobody has registered yet
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Registered usernames, sorted
    pub fn usernames(&self) -> Vec<String> {
        let mut names: Vec<String> = self.users.keys().cloned().collect();
        names.sort();
        names
    }

    /// Messages `recipient` has received from `sender`
    ///
    /// Empty when either user is unknown or they have never exchanged
    /// messages in that direction.
    pub fn history(&self, recipient: &str, sender: &str) -> Vec<StoredMessage> {
        self.users
            .get(recipient)
            .map(|user| user.history(sender).to_vec())
            .unwrap_or_default()
    }

    /// Everything `recipient` has received, keyed by sender
    pub fn conversations(&self, recipient: &str) -> Result<HashMap<String, Vec<StoredMessage>>> {
        self.users
            .get(recipient)
            .map(|user| user.conversations().clone())
            .ok_or_else(|| Error::UnknownParticipant(recipient.to_string()))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CredentialPolicy;
    use crate::crypto::{is_prime, symmetric};
    use crate::messaging::MessagingPipeline;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Small primes keep generation fast in tests
    fn test_config() -> CoreConfig {
        CoreConfig {
            prime_min: 1_000,
            prime_max: 50_000,
            ..CoreConfig::default()
        }
    }

    fn create_test_registry() -> (UserRegistry, StdRng) {
        (
            UserRegistry::new(&test_config()).unwrap(),
            StdRng::seed_from_u64(42),
        )
    }

    #[test]
    fn test_register_creates_user() {
        let (mut registry, mut rng) = create_test_registry();

        registry.register(&mut rng, "alice", "p1").unwrap();

        assert!(registry.contains("alice"));
        assert_eq!(registry.len(), 1);
        let alice = registry.user("alice").unwrap();
        assert_eq!(alice.username(), "alice");
        assert_eq!(alice.symmetric_key().len(), 32);
        assert!(alice.conversations().is_empty());

        let (p, q) = alice.key_pair().factors();
        assert!(is_prime(p) && is_prime(q));
        assert_eq!(alice.key_pair().modulus(), p as u128 * q as u128);
        assert_eq!(alice.key_pair().public_exponent(), 65537);
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let (mut registry, mut rng) = create_test_registry();

        registry.register(&mut rng, "alice", "p1").unwrap();
        registry.register(&mut rng, "bob", "p3").unwrap();
        MessagingPipeline::send(&mut registry, "bob", "alice", b"hey").unwrap();

        let key_before = registry.public_key("alice");
        let sym_before = registry.user("alice").unwrap().symmetric_key().clone();
        let history_before = registry.history("alice", "bob");

        let result = registry.register(&mut rng, "alice", "p2");
        assert_eq!(result, Err(Error::DuplicateUsername("alice".into())));

        // First record untouched
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.public_key("alice"), key_before);
        assert_eq!(registry.user("alice").unwrap().symmetric_key(), &sym_before);

        let history_after = registry.history("alice", "bob");
        assert_eq!(history_after, history_before);
        assert_eq!(
            MessagingPipeline::open(&registry, "alice", &history_after[0]).unwrap(),
            b"hey"
        );
        assert!(registry.authenticate("alice", "p1"));
        assert!(!registry.authenticate("alice", "p2"));
    }

    #[test]
    fn test_authenticate() {
        let (mut registry, mut rng) = create_test_registry();
        registry.register(&mut rng, "alice", "p1").unwrap();

        assert!(registry.authenticate("alice", "p1"));
        assert!(!registry.authenticate("alice", "wrong"));
        assert!(!registry.authenticate("mallory", "p1"));
        assert!(!registry.authenticate("", ""));
    }

    #[test]
    fn test_hashed_credentials() {
        let config = CoreConfig {
            credentials: CredentialPolicy::Sha256,
            ..test_config()
        };
        let mut registry = UserRegistry::new(&config).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        registry.register(&mut rng, "bob", "hunter2").unwrap();

        assert_ne!(registry.user("bob").unwrap().credential(), "hunter2");
        assert!(registry.authenticate("bob", "hunter2"));
        assert!(!registry.authenticate("bob", "hunter3"));
    }

    #[test]
    fn test_failed_generation_leaves_registry_unchanged() {
        // [24, 28] holds no primes
        let config = CoreConfig {
            prime_min: 24,
            prime_max: 28,
            max_prime_attempts: 5,
            ..CoreConfig::default()
        };
        let mut registry = UserRegistry::new(&config).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let result = registry.register(&mut rng, "alice", "p1");
        assert!(matches!(result, Err(Error::GenerationExhausted { .. })));
        assert!(!registry.contains("alice"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_users_get_distinct_keys() {
        let (mut registry, mut rng) = create_test_registry();
        registry.register(&mut rng, "alice", "p1").unwrap();
        registry.register(&mut rng, "bob", "p2").unwrap();

        let alice = registry.user("alice").unwrap();
        let bob = registry.user("bob").unwrap();
        assert_ne!(alice.symmetric_key(), bob.symmetric_key());
        assert_eq!(registry.usernames(), vec!["alice", "bob"]);

        // Each symmetric key still behaves as a key
        let msg = b"check";
        let enc = symmetric::transform(msg, alice.symmetric_key().as_bytes()).unwrap();
        assert_ne!(enc, msg);
    }

    #[test]
    fn test_lookups_for_unknown_users() {
        let (registry, _) = create_test_registry();

        assert!(registry.user("ghost").is_none());
        assert!(registry.public_key("ghost").is_none());
        assert!(registry.history("ghost", "alice").is_empty());
        assert_eq!(
            registry.conversations("ghost"),
            Err(Error::UnknownParticipant("ghost".into()))
        );
    }
}

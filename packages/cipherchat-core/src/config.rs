//! # Configuration
//!
//! Tunables for key generation and credential handling.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CONFIG SOURCES                                   │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  CoreConfig::default()        10-digit primes, 32-byte session keys    │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  CoreConfig::load(path)       JSON file, missing fields = defaults     │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  CoreConfig::validate()       rejects ranges the arithmetic can't hold │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default lower bound for generated primes (10 digits)
pub const DEFAULT_PRIME_MIN: u64 = 1_000_000_000;

/// Default upper bound for generated primes (10 digits)
pub const DEFAULT_PRIME_MAX: u64 = 9_999_999_999;

/// Default number of draws before prime generation gives up
pub const DEFAULT_MAX_PRIME_ATTEMPTS: u32 = 1000;

/// Default symmetric key length in bytes
pub const DEFAULT_SYMMETRIC_KEY_LEN: usize = 32;

/// Largest accepted prime bound.
///
/// Keeps `p·q` below 2^126 so modular products never overflow `u128`.
pub const MAX_PRIME_BOUND: u64 = i64::MAX as u64;

/// How passwords are kept on the user record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialPolicy {
    /// Stored verbatim, compared with plain equality
    #[default]
    Plaintext,
    /// Stored as a salted SHA-256 digest
    Sha256,
}

/// Configuration for a [`crate::ChatSystem`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Inclusive lower bound for prime candidates
    pub prime_min: u64,
    /// Inclusive upper bound for prime candidates
    pub prime_max: u64,
    /// Draws per prime before `GenerationExhausted`
    pub max_prime_attempts: u32,
    /// Length of each user's symmetric key
    pub symmetric_key_len: usize,
    /// Redraw `q` when it equals `p`
    pub reject_equal_primes: bool,
    /// Password storage policy
    pub credentials: CredentialPolicy,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            prime_min: DEFAULT_PRIME_MIN,
            prime_max: DEFAULT_PRIME_MAX,
            max_prime_attempts: DEFAULT_MAX_PRIME_ATTEMPTS,
            symmetric_key_len: DEFAULT_SYMMETRIC_KEY_LEN,
            reject_equal_primes: true,
            credentials: CredentialPolicy::default(),
        }
    }
}

impl CoreConfig {
    /// Parse a JSON document; absent fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<()> {
        if self.prime_min > self.prime_max {
            return Err(Error::InvalidConfig(format!(
                "prime_min ({}) exceeds prime_max ({})",
                self.prime_min, self.prime_max
            )));
        }
        if self.prime_max > MAX_PRIME_BOUND {
            return Err(Error::InvalidConfig(format!(
                "prime_max must not exceed {}",
                MAX_PRIME_BOUND
            )));
        }
        if self.max_prime_attempts == 0 {
            return Err(Error::InvalidConfig(
                "max_prime_attempts must be positive".into(),
            ));
        }
        if self.symmetric_key_len == 0 {
            return Err(Error::InvalidConfig(
                "symmetric_key_len must be positive".into(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

//! # CipherChat Core
//!
//! An in-memory messaging core that demonstrates hybrid encryption: each
//! message body is XOR-encrypted with the sender's symmetric key, and that
//! key travels alongside it encrypted to the recipient's public key.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CIPHERCHAT CORE MODULES                            │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │                        ┌──────────────────┐                            │
//! │                        │    ChatSystem    │                            │
//! │                        │                  │                            │
//! │                        │ - register       │                            │
//! │                        │ - authenticate   │                            │
//! │                        │ - send / open    │                            │
//! │                        └────────┬─────────┘                            │
//! │                 ┌───────────────┴───────────────┐                      │
//! │                 ▼                               ▼                      │
//! │  ┌─────────────────────────┐     ┌─────────────────────────┐          │
//! │  │        Users            │     │       Messaging         │          │
//! │  │                         │     │                         │          │
//! │  │ - UserRegistry          │◄────│ - MessagingPipeline     │          │
//! │  │ - CredentialStore       │     │ - StoredMessage         │          │
//! │  └────────────┬────────────┘     └────────────┬────────────┘          │
//! │               └───────────────┬───────────────┘                        │
//! │                               ▼                                        │
//! │  ┌─────────────────────────────────────────────────────────────────┐  │
//! │  │                         Crypto                                  │  │
//! │  │                                                                 │  │
//! │  │  primes ──► keys (e, d, n) ──► asymmetric     symmetric (XOR)   │  │
//! │  │              ▲                                                  │  │
//! │  │            arith (mul_mod, mod_exp, mod_inverse)                │  │
//! │  └─────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error types for the entire library
//! - [`config`] - Key generation and credential settings
//! - [`crypto`] - Primes, keypairs, and both ciphers
//! - [`users`] - User records, registration and login
//! - [`messaging`] - Hybrid message encryption and history
//! - [`system`] - Thread-safe facade over all of the above
//!
//! ## Quick Start
//!
//! ```no_run
//! use cipherchat_core::{ChatSystem, CoreConfig};
//!
//! let chat = ChatSystem::new(CoreConfig::default())?;
//! chat.register("alice", "p1")?;
//! chat.register("bob", "p2")?;
//!
//! chat.send("alice", "bob", "hi")?;
//! let entry = &chat.history("bob", "alice")[0];
//! assert_eq!(chat.open("bob", entry)?, "hi");
//! # Ok::<(), cipherchat_core::Error>(())
//! ```
//!
//! ## Security Model
//!
//! None. The primes are ten digits, the asymmetric cipher is unpadded and
//! deterministic per byte, the symmetric cipher is a repeating XOR, and
//! passwords are stored verbatim unless [`CredentialPolicy::Sha256`] is
//! selected. This crate is for teaching how the pieces fit together.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod config;
pub mod crypto;
pub mod error;
pub mod messaging;
pub mod system;
/// UTC time helpers.
pub mod time;
pub mod users;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use config::{CoreConfig, CredentialPolicy};
pub use crypto::{KeyPair, KeyPairGenerator, PrimeGenerator, PublicKey, SymmetricKey};
pub use error::{Error, Result};
pub use messaging::{MessagingPipeline, StoredMessage};
pub use system::ChatSystem;
pub use users::{CredentialStore, User, UserRegistry};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Returns the version of CipherChat Core
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}

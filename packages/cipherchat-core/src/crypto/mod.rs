//! # Cryptography Module
//!
//! The primitives behind hybrid message encryption.
//!
//! ## Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CRYPTOGRAPHIC ARCHITECTURE                           │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    PER-USER KEYS                                │   │
//! │  ├─────────────────────────────────────────────────────────────────┤   │
//! │  │                                                                 │   │
//! │  │  ┌─────────────────┐         ┌─────────────────┐              │   │
//! │  │  │  KeyPair        │         │ SymmetricKey    │              │   │
//! │  │  │  (e, d, n)      │         │ (32 printable   │              │   │
//! │  │  │                 │         │  ASCII bytes)   │              │   │
//! │  │  │ • Unwrap keys   │         │ • Encrypt body  │              │   │
//! │  │  │   sent to us    │         │   of our sends  │              │   │
//! │  │  └─────────────────┘         └─────────────────┘              │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 HYBRID SCHEME                                   │   │
//! │  ├─────────────────────────────────────────────────────────────────┤   │
//! │  │                                                                 │   │
//! │  │  body = message ⊕ sender.symmetric_key          (symmetric)    │   │
//! │  │  blob = sender.symmetric_key ^ e_rcpt mod n_rcpt (asymmetric)  │   │
//! │  │                                                                 │   │
//! │  │  stored = body | blob                                          │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security Considerations
//!
//! These are reference constructions with deliberately weak parameters:
//! 10-digit primes, unpadded per-byte exponentiation, and a repeating-key
//! XOR with no authentication. Do not use them to protect real data.

pub mod arith;
pub mod asymmetric;
mod keys;
pub mod primes;
pub mod symmetric;

pub use keys::{KeyPair, KeyPairGenerator, PublicKey};
pub use primes::{is_prime, PrimeGenerator};
pub use symmetric::SymmetricKey;

/// Fixed public exponent (F4)
pub const PUBLIC_EXPONENT: u128 = 65537;

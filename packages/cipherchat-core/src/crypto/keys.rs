//! # Key Management
//!
//! Asymmetric keypair generation.
//!
//! ## Key Derivation
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          KEYPAIR GENERATION                             │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  PrimeGenerator ──► p                                                  │
//! │  PrimeGenerator ──► q        (redrawn while q == p, if configured)     │
//! │                                                                         │
//! │  n = p · q                   modulus, shared                           │
//! │  φ = (p - 1)(q - 1)          totient, discarded                        │
//! │  e = 65537                   public exponent, fixed                    │
//! │  d = e⁻¹ mod φ               private exponent (extended Euclid)        │
//! │                                                                         │
//! │  Public:  (e, n)                                                       │
//! │  Private: (d, n, p, q)       zeroized on drop                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::CoreConfig;
use crate::crypto::arith::mod_inverse;
use crate::crypto::primes::{is_prime, PrimeGenerator};
use crate::crypto::PUBLIC_EXPONENT;
use crate::error::{Error, Result};

/// Asymmetric keypair: public exponent, private exponent and modulus
///
/// ## Security
///
/// - Private exponent and factors are zeroized when dropped
/// - `Debug` never prints private material
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyPair {
    public_exponent: u128,
    private_exponent: u128,
    modulus: u128,
    p: u64,
    q: u64,
}

impl KeyPair {
    /// Build a keypair from two primes and a public exponent
    ///
    /// Fails with `InvalidKey` if either factor is not prime and with
    /// `NoModularInverse` if `public_exponent` shares a factor with the
    /// totient.
    pub fn from_primes(p: u64, q: u64, public_exponent: u128) -> Result<Self> {
        for factor in [p, q] {
            if !is_prime(factor) {
                return Err(Error::InvalidKey(format!("{} is not prime", factor)));
            }
        }

        let modulus = p as u128 * q as u128;
        let totient = (p as u128 - 1) * (q as u128 - 1);
        let private_exponent = mod_inverse(public_exponent, totient)?;

        Ok(Self {
            public_exponent,
            private_exponent,
            modulus,
            p,
            q,
        })
    }

    /// Public exponent `e`
    pub fn public_exponent(&self) -> u128 {
        self.public_exponent
    }

    /// Private exponent `d`
    ///
    /// ## Security Warning
    ///
    /// Never log or transmit this value.
    pub fn private_exponent(&self) -> u128 {
        self.private_exponent
    }

    /// Modulus `n = p · q`
    pub fn modulus(&self) -> u128 {
        self.modulus
    }

    /// The prime factors `(p, q)` the modulus was built from
    pub fn factors(&self) -> (u64, u64) {
        (self.p, self.q)
    }

    /// Public half, safe to hand to other users
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            exponent: self.public_exponent,
            modulus: self.modulus,
        }
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_exponent", &self.public_exponent)
            .field("modulus", &self.modulus)
            .finish_non_exhaustive()
    }
}

/// Public exponent and modulus of a user's keypair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey {
    /// Public exponent `e`
    pub exponent: u128,
    /// Modulus `n`
    pub modulus: u128,
}

/// Derives keypairs from randomly drawn primes
#[derive(Debug, Clone, Copy)]
pub struct KeyPairGenerator {
    primes: PrimeGenerator,
    public_exponent: u128,
    reject_equal_primes: bool,
}

impl KeyPairGenerator {
    /// Create a generator from the core configuration
    pub fn new(config: &CoreConfig) -> Result<Self> {
        config.validate()?;
        let primes = PrimeGenerator::with_attempts(
            config.prime_min,
            config.prime_max,
            config.max_prime_attempts,
        )?;
        Ok(Self {
            primes,
            public_exponent: PUBLIC_EXPONENT,
            reject_equal_primes: config.reject_equal_primes,
        })
    }

    /// Create a generator around an existing prime source
    pub fn with_primes(primes: PrimeGenerator, reject_equal_primes: bool) -> Self {
        Self {
            primes,
            public_exponent: PUBLIC_EXPONENT,
            reject_equal_primes,
        }
    }

    /// Generate a fresh keypair
    pub fn generate<R: RngCore + ?Sized>(&self, rng: &mut R) -> Result<KeyPair> {
        let p = self.primes.generate(rng)?;
        let mut q = self.primes.generate(rng)?;

        if self.reject_equal_primes {
            let mut redraws = 0;
            while q == p {
                if redraws == self.primes.max_attempts() {
                    tracing::warn!("Could not draw a second prime distinct from the first");
                    return Err(Error::GenerationExhausted {
                        min: self.primes.min(),
                        max: self.primes.max(),
                        attempts: redraws,
                    });
                }
                q = self.primes.generate(rng)?;
                redraws += 1;
            }
        }

        let keypair = KeyPair::from_primes(p, q, self.public_exponent).map_err(|e| {
            tracing::warn!("Keypair derivation failed: {}", e);
            e
        })?;

        tracing::debug!(
            "Generated keypair with {}-bit modulus",
            128 - keypair.modulus().leading_zeros()
        );
        Ok(keypair)
    }
}

// ============================================================================
// TESTS
// ============================================================================

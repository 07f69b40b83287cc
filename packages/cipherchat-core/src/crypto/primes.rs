//! # Prime Generation
//!
//! Rejection sampling over a bounded range with a trial-division test.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      PRIME SELECTION                                    │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  for attempt in 0..max_attempts:                                       │
//! │      n ← uniform [min, max]                                            │
//! │      if is_prime(n): return n                                          │
//! │  fail GenerationExhausted                                              │
//! │                                                                         │
//! │  is_prime(n):                                                          │
//! │      n ≤ 1        → false                                              │
//! │      n ≤ 3        → true                                               │
//! │      2 | n, 3 | n → false                                              │
//! │      i = 5, 11, 17, ... while i² ≤ n:                                  │
//! │          i | n or (i + 2) | n → false                                  │
//! │      → true                                                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Trial division is exact, but the cost grows with √n; the default
//! 10-digit range needs at most ~33k divisions per candidate.

use rand::{Rng, RngCore};

use crate::config::DEFAULT_MAX_PRIME_ATTEMPTS;
use crate::error::{Error, Result};

/// Primality by trial division over the 6k±1 wheel
pub fn is_prime(n: u64) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    // u128 keeps i² from overflowing near u64::MAX
    let n_wide = n as u128;
    let mut i: u64 = 5;
    while (i as u128) * (i as u128) <= n_wide {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Draws random primes from an inclusive range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimeGenerator {
    min: u64,
    max: u64,
    max_attempts: u32,
}

impl PrimeGenerator {
    /// Create a generator over `[min, max]`
    pub fn new(min: u64, max: u64) -> Result<Self> {
        Self::with_attempts(min, max, DEFAULT_MAX_PRIME_ATTEMPTS)
    }

    /// Create a generator with a custom attempt cap
    pub fn with_attempts(min: u64, max: u64, max_attempts: u32) -> Result<Self> {
        if min > max {
            return Err(Error::InvalidConfig(format!(
                "empty prime range [{}, {}]",
                min, max
            )));
        }
        if max_attempts == 0 {
            return Err(Error::InvalidConfig(
                "prime generation needs at least one attempt".into(),
            ));
        }
        Ok(Self {
            min,
            max,
            max_attempts,
        })
    }

    /// Inclusive lower bound
    pub fn min(&self) -> u64 {
        self.min
    }

    /// Inclusive upper bound
    pub fn max(&self) -> u64 {
        self.max
    }

    /// Draw cap per call to [`generate`](Self::generate)
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Draw a prime, or fail with `GenerationExhausted` after the cap
    pub fn generate<R: RngCore + ?Sized>(&self, rng: &mut R) -> Result<u64> {
        for _ in 0..self.max_attempts {
            let candidate = rng.gen_range(self.min..=self.max);
            if is_prime(candidate) {
                return Ok(candidate);
            }
        }

        tracing::warn!(
            "No prime found in [{}, {}] after {} attempts",
            self.min,
            self.max,
            self.max_attempts
        );
        Err(Error::GenerationExhausted {
            min: self.min,
            max: self.max,
            attempts: self.max_attempts,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

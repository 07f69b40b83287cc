//! # Symmetric Cipher
//!
//! Repeating-key XOR over bytes. The transform is an involution, so the
//! same call encrypts and decrypts:
//!
//! ```text
//! out[i] = data[i] ⊕ key[i mod key.len()]
//! transform(transform(D, K), K) == D
//! ```
//!
//! This provides no integrity and leaks plaintext structure whenever the
//! message is longer than the key; it is a reference construction only.

use std::fmt;

use rand::{Rng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

/// Smallest byte a generated key may contain (`'!'`)
pub const KEY_BYTE_MIN: u8 = 33;

/// Largest byte a generated key may contain (`'~'`)
pub const KEY_BYTE_MAX: u8 = 126;

/// A per-user symmetric key of printable ASCII bytes
///
/// Zeroized when dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey(Vec<u8>);

impl SymmetricKey {
    /// Generate `len` random bytes from the printable range `33..=126`
    pub fn generate<R: RngCore + ?Sized>(rng: &mut R, len: usize) -> Result<Self> {
        if len == 0 {
            return Err(Error::EmptyKey);
        }
        let bytes = (0..len)
            .map(|_| rng.gen_range(KEY_BYTE_MIN..=KEY_BYTE_MAX))
            .collect();
        Ok(Self(bytes))
    }

    /// Wrap existing key bytes
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(Error::EmptyKey);
        }
        Ok(Self(bytes))
    }

    /// Raw key bytes
    ///
    /// ## Security Warning
    ///
    /// Never log or transmit these bytes unwrapped.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Key length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; empty keys cannot be constructed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encrypt or decrypt `data` under this key
    pub fn apply(&self, data: &[u8]) -> Vec<u8> {
        xor_with(data, &self.0)
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymmetricKey({} bytes)", self.0.len())
    }
}

fn xor_with(data: &[u8], key: &[u8]) -> Vec<u8> {
    data.iter()
        .zip(key.iter().cycle())
        .map(|(d, k)| d ^ k)
        .collect()
}

/// XOR `data` with `key` repeated to its length
///
/// Fails with `EmptyKey` when `key` is empty.
pub fn transform(data: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    if key.is_empty() {
        return Err(Error::EmptyKey);
    }
    Ok(xor_with(data, key))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_transform_known_values() {
        let out = transform(b"hi", b"AB").unwrap();
        assert_eq!(out, vec![b'h' ^ b'A', b'i' ^ b'B']);
    }

    #[test]
    fn test_key_repeats() {
        let out = transform(&[0u8; 5], b"xy").unwrap();
        assert_eq!(out, b"xyxyx");
    }

    #[test]
    fn test_involution() {
        let mut rng = StdRng::seed_from_u64(3);
        for len in [0usize, 1, 31, 32, 33, 200] {
            let data: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            let key = SymmetricKey::generate(&mut rng, 32).unwrap();

            let once = transform(&data, key.as_bytes()).unwrap();
            let twice = transform(&once, key.as_bytes()).unwrap();
            assert_eq!(twice, data);
            assert_eq!(key.apply(&key.apply(&data)), data);
        }
    }

    #[test]
    fn test_involution_non_ascii_key() {
        let data = "héllo wörld".as_bytes();
        let key = [0xFFu8, 0x00, 0x80];
        let once = transform(data, &key).unwrap();
        assert_eq!(transform(&once, &key).unwrap(), data);
    }

    #[test]
    fn test_empty_key_rejected() {
        assert_eq!(transform(b"data", b""), Err(Error::EmptyKey));
        assert_eq!(SymmetricKey::from_bytes(Vec::<u8>::new()), Err(Error::EmptyKey));
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(SymmetricKey::generate(&mut rng, 0), Err(Error::EmptyKey));
    }

    #[test]
    fn test_generated_key_is_printable() {
        let mut rng = StdRng::seed_from_u64(8);
        let key = SymmetricKey::generate(&mut rng, 32).unwrap();

        assert_eq!(key.len(), 32);
        assert!(key
            .as_bytes()
            .iter()
            .all(|b| (KEY_BYTE_MIN..=KEY_BYTE_MAX).contains(b)));
    }

    #[test]
    fn test_keys_differ_between_draws() {
        let mut rng = StdRng::seed_from_u64(8);
        let a = SymmetricKey::generate(&mut rng, 32).unwrap();
        let b = SymmetricKey::generate(&mut rng, 32).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_debug_hides_key_bytes() {
        let key = SymmetricKey::from_bytes(b"secret-key".to_vec()).unwrap();
        assert_eq!(format!("{:?}", key), "SymmetricKey(10 bytes)");
    }
}

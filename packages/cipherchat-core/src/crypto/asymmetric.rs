//! # Asymmetric Cipher
//!
//! Byte-at-a-time modular exponentiation. Each plaintext byte becomes one
//! decimal token followed by a single space:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      TOKEN ENCODING                                     │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  plaintext:   [ b₀ ]      [ b₁ ]      [ b₂ ]                           │
//! │                 │           │           │                               │
//! │                 ▼           ▼           ▼                               │
//! │             b₀^e mod n  b₁^e mod n  b₂^e mod n                         │
//! │                 │           │           │                               │
//! │                 ▼           ▼           ▼                               │
//! │  ciphertext: "7123456 " "901234 "  "5550123 "                          │
//! │                                                                         │
//! │  decrypt: split on whitespace, t^d mod n, one byte per token           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every occurrence of a byte encrypts to the same token, so the output
//! leaks the plaintext's byte histogram. The encoding is kept as is.
//!
//! Bytes are read as unsigned values `0..=255`.

use std::fmt::Write;

use crate::crypto::arith::mod_exp;
use crate::crypto::keys::{KeyPair, PublicKey};
use crate::error::{Error, Result};

fn check_modulus(modulus: u128) -> Result<()> {
    if modulus < 2 {
        return Err(Error::InvalidKey(format!(
            "modulus {} cannot carry any value",
            modulus
        )));
    }
    Ok(())
}

/// Encrypt each byte of `plaintext` under `key`
///
/// Returns the space-terminated decimal tokens. Fails with
/// `ValueExceedsModulus` if any byte is not below the modulus.
pub fn encrypt(plaintext: &[u8], key: &PublicKey) -> Result<String> {
    check_modulus(key.modulus)?;

    // One token per byte, each at most as wide as n - 1, plus its separator
    let token_width = (key.modulus - 1).checked_ilog10().unwrap_or(0) as usize + 2;
    let mut out = String::with_capacity(plaintext.len() * token_width);

    for &byte in plaintext {
        if byte as u128 >= key.modulus {
            return Err(Error::ValueExceedsModulus {
                value: byte,
                modulus: key.modulus,
            });
        }
        // Writing into a String cannot fail
        let _ = write!(out, "{} ", mod_exp(byte as u128, key.exponent, key.modulus));
    }

    Ok(out)
}

/// Decrypt whitespace-separated tokens back into bytes
///
/// Fails with `MalformedCiphertext` if a token is not a non-negative
/// integer or does not decrypt to a byte value.
pub fn decrypt(ciphertext: &str, private_exponent: u128, modulus: u128) -> Result<Vec<u8>> {
    check_modulus(modulus)?;

    ciphertext
        .split_whitespace()
        .map(|token| {
            let value: u128 = token.parse().map_err(|_| {
                Error::MalformedCiphertext(format!("token {:?} is not an integer", token))
            })?;
            let plain = mod_exp(value, private_exponent, modulus);
            u8::try_from(plain).map_err(|_| {
                Error::MalformedCiphertext(format!(
                    "token {} decrypts to {}, which is not a byte",
                    token, plain
                ))
            })
        })
        .collect()
}

/// Decrypt with the private half of `keypair`
pub fn decrypt_with(ciphertext: &str, keypair: &KeyPair) -> Result<Vec<u8>> {
    decrypt(ciphertext, keypair.private_exponent(), keypair.modulus())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CoreConfig;
    use crate::crypto::keys::KeyPairGenerator;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn textbook_keypair() -> KeyPair {
        KeyPair::from_primes(61, 53, 17).unwrap()
    }

    #[test]
    fn test_encrypt_token_format() {
        let kp = textbook_keypair();
        let ciphertext = encrypt(b"A", &kp.public_key()).unwrap();

        // 65^17 mod 3233 = 2790
        assert_eq!(ciphertext, "2790 ");
    }

    #[test]
    fn test_one_token_per_byte() {
        let kp = textbook_keypair();
        let ciphertext = encrypt(b"hello", &kp.public_key()).unwrap();

        assert!(ciphertext.ends_with(' '));
        let tokens: Vec<&str> = ciphertext.split_whitespace().collect();
        assert_eq!(tokens.len(), 5);
        assert!(tokens.iter().all(|t| t.chars().all(|c| c.is_ascii_digit())));
        // 'l' appears twice and maps to the same token
        assert_eq!(tokens[2], tokens[3]);
    }

    #[test]
    fn test_roundtrip_all_bytes() {
        let kp = textbook_keypair();
        let plaintext: Vec<u8> = (0..=255).collect();

        let ciphertext = encrypt(&plaintext, &kp.public_key()).unwrap();
        assert_eq!(decrypt_with(&ciphertext, &kp).unwrap(), plaintext);
    }

    #[test]
    fn test_roundtrip_generated_keypair() {
        let mut rng = StdRng::seed_from_u64(17);
        let kp = KeyPairGenerator::new(&CoreConfig::default())
            .unwrap()
            .generate(&mut rng)
            .unwrap();

        let key = b"!x~Q0;aZ]%{e9Mv^&Kp?3z<Gc|N@u'TL";
        let ciphertext = encrypt(key, &kp.public_key()).unwrap();
        let recovered = decrypt(&ciphertext, kp.private_exponent(), kp.modulus()).unwrap();
        assert_eq!(recovered, key);
    }

    #[test]
    fn test_empty_plaintext() {
        let kp = textbook_keypair();
        assert_eq!(encrypt(b"", &kp.public_key()).unwrap(), "");
        assert!(decrypt_with("", &kp).unwrap().is_empty());
    }

    #[test]
    fn test_value_exceeds_modulus() {
        // n = 11 · 17 = 187, so bytes ≥ 187 cannot be represented
        let kp = KeyPair::from_primes(11, 17, 3).unwrap();

        assert!(encrypt(&[0, 100, 186], &kp.public_key()).is_ok());
        assert_eq!(
            encrypt(&[10, 200], &kp.public_key()),
            Err(Error::ValueExceedsModulus {
                value: 200,
                modulus: 187
            })
        );
    }

    #[test]
    fn test_decrypt_tolerates_extra_whitespace() {
        let kp = textbook_keypair();
        let ciphertext = encrypt(b"ok", &kp.public_key()).unwrap();
        let spaced = format!("  {}\n\t", ciphertext.replace(' ', "   "));

        assert_eq!(decrypt_with(&spaced, &kp).unwrap(), b"ok");
    }

    #[test]
    fn test_decrypt_malformed_tokens() {
        let kp = textbook_keypair();

        assert!(matches!(
            decrypt_with("2790 abc ", &kp),
            Err(Error::MalformedCiphertext(_))
        ));
        assert!(matches!(
            decrypt_with("-5 ", &kp),
            Err(Error::MalformedCiphertext(_))
        ));
        // 1000 is below n, so it survives the round trip but is not a byte
        let big = mod_exp(1000, 17, 3233);
        assert!(matches!(
            decrypt_with(&format!("{} ", big), &kp),
            Err(Error::MalformedCiphertext(_))
        ));
    }

    #[test]
    fn test_degenerate_modulus() {
        let key = PublicKey {
            exponent: 65537,
            modulus: 1,
        };
        assert!(matches!(encrypt(b"x", &key), Err(Error::InvalidKey(_))));
        assert!(matches!(decrypt("1 ", 1, 0), Err(Error::InvalidKey(_))));
    }
}

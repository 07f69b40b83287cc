//! # Key Generation Demo
//!
//! Generates primes and keypairs, then shows the per-byte cipher and the
//! XOR cipher on a short string.
//!
//! An optional argument names a JSON config file:
//!
//! ```bash
//! cargo run --example keygen_demo -- config.json
//! ```

use cipherchat_core::crypto::{asymmetric, symmetric, KeyPairGenerator, PrimeGenerator};
use cipherchat_core::{CoreConfig, SymmetricKey};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,cipherchat_core=debug".into()),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => CoreConfig::load(&path).expect("Failed to load config"),
        None => CoreConfig::default(),
    };
    let mut rng = StdRng::from_entropy();

    println!("=================================================");
    println!("           CIPHERCHAT KEYGEN DEMO");
    println!("=================================================\n");

    // =========================================================================
    // Primes
    // =========================================================================
    let primes = PrimeGenerator::with_attempts(
        config.prime_min,
        config.prime_max,
        config.max_prime_attempts,
    )
    .expect("Invalid prime range");

    println!("1. Primes in [{}, {}]:\n", primes.min(), primes.max());
    for _ in 0..3 {
        println!("   {}", primes.generate(&mut rng).expect("No prime found"));
    }
    println!();

    // =========================================================================
    // Keypair
    // =========================================================================
    let keypair = KeyPairGenerator::new(&config)
        .expect("Invalid config")
        .generate(&mut rng)
        .expect("Key generation failed");
    let (p, q) = keypair.factors();

    println!("2. Keypair:\n");
    println!("   p = {}", p);
    println!("   q = {}", q);
    println!("   n = {}", keypair.modulus());
    println!("   e = {}", keypair.public_exponent());
    println!("   d = {}", keypair.private_exponent());
    println!();

    // =========================================================================
    // Ciphers
    // =========================================================================
    let message = b"Hello";
    let ciphertext = asymmetric::encrypt(message, &keypair.public_key()).expect("Encrypt failed");
    let recovered = asymmetric::decrypt_with(&ciphertext, &keypair).expect("Decrypt failed");

    println!("3. Asymmetric cipher on {:?}:\n", String::from_utf8_lossy(message));
    println!("   ciphertext: {}", ciphertext);
    println!("   decrypted:  {:?}", String::from_utf8_lossy(&recovered));
    println!();

    let key = SymmetricKey::generate(&mut rng, config.symmetric_key_len).expect("Empty key");
    let masked = symmetric::transform(message, key.as_bytes()).expect("Empty key");
    let unmasked = symmetric::transform(&masked, key.as_bytes()).expect("Empty key");

    println!("4. XOR cipher with a {}-byte key:\n", key.len());
    println!("   masked (hex): {}", hex::encode(&masked));
    println!("   unmasked:     {:?}", String::from_utf8_lossy(&unmasked));
}

//! # Hybrid Messaging Demo
//!
//! This example walks through one message exchange:
//! 1. Alice and Bob register and get keypairs plus symmetric keys
//! 2. Login succeeds with the right password and fails otherwise
//! 3. Alice sends Bob a message
//! 4. Bob unwraps Alice's key and reads the message
//! 5. Sending to an unknown user fails without touching anything
//!
//! ## Run
//!
//! ```bash
//! RUST_LOG=debug cargo run --example messaging_demo
//! ```

use cipherchat_core::crypto::asymmetric;
use cipherchat_core::{ChatSystem, CoreConfig, Error};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,cipherchat_core=debug".into()),
        )
        .init();

    println!("=================================================");
    println!("        CIPHERCHAT HYBRID MESSAGING DEMO");
    println!("=================================================\n");

    let chat = ChatSystem::new(CoreConfig::default()).expect("Failed to create chat system");

    // =========================================================================
    // STEP 1: Register Alice and Bob
    // =========================================================================
    println!("1. Registering Alice and Bob...\n");

    chat.register("alice", "p1").expect("Failed to register alice");
    chat.register("bob", "p2").expect("Failed to register bob");

    for name in ["alice", "bob"] {
        let key = chat.public_key(name).expect("registered user has a key");
        println!("   {:<6} e = {}, n = {}", name, key.exponent, key.modulus);
    }
    println!();

    match chat.register("alice", "other") {
        Err(Error::DuplicateUsername(name)) => {
            println!("   Second registration of {:?} rejected\n", name)
        }
        other => panic!("Expected DuplicateUsername, got {:?}", other),
    }

    // =========================================================================
    // STEP 2: Login
    // =========================================================================
    println!("2. Authenticating...\n");

    println!("   alice / p1     -> {}", chat.authenticate("alice", "p1"));
    println!("   alice / wrong  -> {}", chat.authenticate("alice", "wrong"));
    println!("   carol / p1     -> {}", chat.authenticate("carol", "p1"));
    println!();

    // =========================================================================
    // STEP 3: Alice sends Bob a message
    // =========================================================================
    println!("3. Alice sends \"hi bob\" to Bob...\n");

    let entry = chat.send("alice", "bob", "hi bob").expect("Failed to send");

    println!("   Body (hex): {}", hex::encode(entry.body()));
    println!(
        "   Key blob:   {} tokens, {} chars",
        entry.key_blob().split_whitespace().count(),
        entry.key_blob().len()
    );
    println!(
        "   Bob's history from alice:  {} entries",
        chat.history("bob", "alice").len()
    );
    println!(
        "   Alice's history from bob:  {} entries",
        chat.history("alice", "bob").len()
    );
    println!();

    // =========================================================================
    // STEP 4: Bob reads it
    // =========================================================================
    println!("4. Bob opens the entry...\n");

    for stored in chat.history("bob", "alice") {
        let plaintext = chat.open("bob", &stored).expect("Bob can open his own messages");
        println!("   Decrypted: {:?}", plaintext);
    }

    // The blob alone is meaningless without Bob's private key
    let bogus_key = asymmetric::decrypt(entry.key_blob(), 65537, u64::MAX as u128);
    println!("   Unwrapping with a made-up key: {:?}", bogus_key.map(|k| k.len()));
    println!();

    // =========================================================================
    // STEP 5: Unknown recipient
    // =========================================================================
    println!("5. Alice sends to \"ghost\"...\n");

    match chat.send("alice", "ghost", "anyone there?") {
        Err(e) => println!("   Rejected: {} (code {})", e, e.code()),
        Ok(_) => panic!("ghost is not registered"),
    }
    println!("   Bob still has {} entry", chat.history("bob", "alice").len());

    println!("\n=================================================");
    println!("                 DEMO COMPLETE");
    println!("=================================================");
}

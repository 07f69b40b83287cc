//! # Error Handling
//!
//! Error types for CipherChat Core.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR HIERARCHY                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error (top-level)                                                     │
//! │  │                                                                      │
//! │  ├── Configuration Errors                                              │
//! │  │   ├── InvalidConfig         - Config values out of range            │
//! │  │   └── ConfigIo              - Config file unreadable/unparsable     │
//! │  │                                                                      │
//! │  ├── User Errors                                                       │
//! │  │   └── DuplicateUsername     - Username already registered           │
//! │  │                                                                      │
//! │  ├── Crypto Errors                                                     │
//! │  │   ├── GenerationExhausted   - No prime found within attempt cap     │
//! │  │   ├── NoModularInverse      - e and φ(n) not coprime                │
//! │  │   ├── EmptyKey              - Symmetric key has zero length         │
//! │  │   ├── ValueExceedsModulus   - Plaintext byte ≥ modulus              │
//! │  │   ├── MalformedCiphertext   - Key blob token unusable               │
//! │  │   └── InvalidKey            - Degenerate modulus                    │
//! │  │                                                                      │
//! │  └── Message Errors                                                    │
//! │      ├── UnknownParticipant    - Sender or recipient not registered    │
//! │      └── MalformedMessage      - Entry unparsable or not valid text    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Authentication failure is not an error: `authenticate` returns `false`.

use thiserror::Error;

/// Result type alias for CipherChat Core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CipherChat Core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ========================================================================
    // Configuration Errors (100-199)
    // ========================================================================

    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be read or parsed
    #[error("Failed to load configuration: {0}")]
    ConfigIo(String),

    // ========================================================================
    // User Errors (200-299)
    // ========================================================================

    /// The username is already taken
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    // ========================================================================
    // Crypto Errors (300-399)
    // ========================================================================

    /// No prime was found within the attempt cap
    #[error("Failed to generate a prime in [{min}, {max}] after {attempts} attempts")]
    GenerationExhausted {
        /// Lower bound of the range
        min: u64,
        /// Upper bound of the range
        max: u64,
        /// Number of draws made
        attempts: u32,
    },

    /// The public exponent has no inverse modulo the totient
    #[error("{value} has no inverse modulo {modulus}")]
    NoModularInverse {
        /// Value that was inverted
        value: u128,
        /// Modulus of the inversion
        modulus: u128,
    },

    /// The symmetric key is empty
    #[error("Symmetric key must not be empty")]
    EmptyKey,

    /// A plaintext byte does not fit under the modulus
    #[error("Byte value {value} is not below modulus {modulus}")]
    ValueExceedsModulus {
        /// Offending byte value
        value: u8,
        /// Modulus it was encrypted under
        modulus: u128,
    },

    /// A ciphertext token could not be decrypted to a byte
    #[error("Malformed ciphertext: {0}")]
    MalformedCiphertext(String),

    /// The key material cannot be used
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    // ========================================================================
    // Message Errors (700-799)
    // ========================================================================

    /// Sender or recipient is not registered
    #[error("Sender or recipient does not exist: {0}")]
    UnknownParticipant(String),

    /// A stored message could not be parsed or did not open to text
    #[error("Malformed stored message: {0}")]
    MalformedMessage(String),
}

impl Error {
    /// Get the numeric error code
    ///
    /// Error codes are organized by category:
    /// - 100-199: Configuration
    /// - 200-299: Users
    /// - 300-399: Crypto
    /// - 700-799: Messages
    pub fn code(&self) -> i32 {
        match self {
            // Configuration (100-199)
            Error::InvalidConfig(_) => 100,
            Error::ConfigIo(_) => 101,

            // Users (200-299)
            Error::DuplicateUsername(_) => 200,

            // Crypto (300-399)
            Error::GenerationExhausted { .. } => 300,
            Error::NoModularInverse { .. } => 301,
            Error::EmptyKey => 302,
            Error::ValueExceedsModulus { .. } => 303,
            Error::MalformedCiphertext(_) => 304,
            Error::InvalidKey(_) => 305,

            // Messages (700-799)
            Error::UnknownParticipant(_) => 700,
            Error::MalformedMessage(_) => 701,
        }
    }

    /// Check if this error is recoverable
    ///
    /// Key generation draws fresh randomness on every attempt, so a
    /// registration that failed during generation may succeed when retried.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::GenerationExhausted { .. } | Error::NoModularInverse { .. }
        )
    }
}

// ============================================================================
// ERROR CONVERSIONS
// ============================================================================

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ConfigIo(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::ConfigIo(err.to_string())
    }
}

// ============================================================================
// TESTS
// ============================================================================

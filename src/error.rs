//! Error types for gcmseal

use crate::validate::Field;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for gcmseal
#[derive(Error, Debug)]
pub enum Error {
    // Input validation errors
    #[error("Hexadecimal decoding failed for {field}: {source}")]
    Encoding {
        field: Field,
        #[source]
        source: hex::FromHexError,
    },

    #[error("Incorrect {field} length: expected {expected} bytes, received {actual} bytes")]
    Length {
        field: Field,
        expected: usize,
        actual: usize,
    },

    // Crypto errors
    #[error("Authentication failed: ciphertext tampered or wrong key/nonce/tag")]
    AuthenticationFailure,

    #[error("Invalid key material: {0}")]
    InvalidKeyMaterial(String),

    #[error("Encryption error: {0}")]
    Encryption(String),

    // IO errors
    #[error("Unable to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Wrap an IO error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit status for this failure
    ///
    /// Every failure is terminal for the operation, so all kinds map to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Encoding { .. }
            | Error::Length { .. }
            | Error::AuthenticationFailure
            | Error::InvalidKeyMaterial(_)
            | Error::Encryption(_)
            | Error::Io { .. }
            | Error::Serialization(_) => 1,
        }
    }

    /// True if this error came from tag verification
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, Error::AuthenticationFailure)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

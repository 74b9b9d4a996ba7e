//! Cryptography module for gcmseal
//!
//! Provides AES-256-GCM authenticated encryption with a 128-bit nonce.
//! No associated data is ever bound into the tag.

mod encryption;
mod keys;

pub use encryption::{decrypt_and_verify, encrypt, GcmEngine, Sealed};
pub use keys::{AuthTag, GcmNonce, SecretKey};

/// Size of AES-256 key in bytes
pub const KEY_SIZE: usize = 32;

/// Size of GCM nonce in bytes
pub const NONCE_SIZE: usize = 16;

/// Size of GCM authentication tag in bytes
pub const TAG_SIZE: usize = 16;

//! Key material for a single encrypt or decrypt call
//!
//! - Secret key: 32 random bytes, wiped from memory on drop
//! - Nonce: 16 bytes, must never repeat under the same key
//! - Tag: 16-byte GCM authentication tag
//!
//! Nonce uniqueness is not tracked across invocations. Every encryption
//! draws a fresh random nonce; reusing a (key, nonce) pair is on the caller.

use crate::crypto::{KEY_SIZE, NONCE_SIZE, TAG_SIZE};
use crate::error::Result;
use crate::validate::{check_length, Field};
use rand::RngCore;
use std::fmt;
use zeroize::Zeroizing;

/// AES-256 key
#[derive(Clone)]
pub struct SecretKey {
    key: Zeroizing<[u8; KEY_SIZE]>,
}

impl SecretKey {
    /// Generate a fresh random key
    pub fn generate() -> Self {
        let mut key = Zeroizing::new([0u8; KEY_SIZE]);
        rand::thread_rng().fill_bytes(&mut key[..]);
        SecretKey { key }
    }

    /// Wrap existing key bytes
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        SecretKey {
            key: Zeroizing::new(bytes),
        }
    }

    /// Copy key bytes out of a slice, rejecting anything but 32 bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        check_length(bytes, KEY_SIZE, Field::Key)?;

        let mut key = Zeroizing::new([0u8; KEY_SIZE]);
        key.copy_from_slice(bytes);
        Ok(SecretKey { key })
    }

    /// Get the raw key bytes
    pub fn key(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }

    /// Lowercase hex rendering for the operator
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(&self.key[..]))
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

/// GCM nonce (IV)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GcmNonce([u8; NONCE_SIZE]);

impl GcmNonce {
    /// Generate a fresh random nonce
    pub fn generate() -> Self {
        let mut nonce = [0u8; NONCE_SIZE];
        rand::thread_rng().fill_bytes(&mut nonce);
        GcmNonce(nonce)
    }

    pub fn from_bytes(bytes: [u8; NONCE_SIZE]) -> Self {
        GcmNonce(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        check_length(bytes, NONCE_SIZE, Field::Nonce)?;

        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(bytes);
        Ok(GcmNonce(nonce))
    }

    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// GCM authentication tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthTag([u8; TAG_SIZE]);

impl AuthTag {
    pub fn from_bytes(bytes: [u8; TAG_SIZE]) -> Self {
        AuthTag(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        check_length(bytes, TAG_SIZE, Field::Tag)?;

        let mut tag = [0u8; TAG_SIZE];
        tag.copy_from_slice(bytes);
        Ok(AuthTag(tag))
    }

    pub fn as_bytes(&self) -> &[u8; TAG_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

//! AES-256-GCM Encryption Implementation
//!
//! AES-GCM combines CTR-mode keystream encryption with a GHASH tag computed
//! over GF(2^128), giving:
//! - Confidentiality: Data is encrypted
//! - Integrity: Any tampering is detected
//! - Authentication: Verifies the data came from the key holder
//!
//! The nonce is 128 bits, so the initial counter block is derived by GHASH
//! over the nonce rather than by appending a 32-bit counter. Ciphertext is
//! exactly as long as the plaintext and the tag is carried separately.

use crate::crypto::{AuthTag, GcmNonce, SecretKey, KEY_SIZE, NONCE_SIZE, TAG_SIZE};
use crate::error::{Error, Result};
use aes_gcm::aead::consts::U16;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::aes::Aes256;
use aes_gcm::AesGcm;
use zeroize::{Zeroize, Zeroizing};

/// AES-256-GCM with a 16-byte nonce and 16-byte tag
type Aes256Gcm128 = AesGcm<Aes256, U16>;

/// Associated data is never used
const NO_AAD: &[u8] = &[];

/// Ciphertext with its detached authentication tag
#[derive(Debug, Clone)]
pub struct Sealed {
    /// Ciphertext, same length as the plaintext
    pub ciphertext: Vec<u8>,
    /// Tag over the ciphertext
    pub tag: AuthTag,
}

/// A cipher instance bound to one (key, nonce) pair
///
/// Works on caller-owned buffers in place so the same engine can serve a
/// whole file held in memory or any other buffer the caller assembles.
pub struct GcmEngine {
    cipher: Aes256Gcm128,
    nonce: GcmNonce,
}

impl GcmEngine {
    /// Create an engine from validated key material
    pub fn new(key: &SecretKey, nonce: &GcmNonce) -> Self {
        GcmEngine {
            cipher: Aes256Gcm128::new(GenericArray::from_slice(key.key())),
            nonce: *nonce,
        }
    }

    /// Create an engine from raw slices
    ///
    /// Fails with `InvalidKeyMaterial` when the key is not 32 bytes or the
    /// nonce is not 16 bytes.
    pub fn from_slices(key: &[u8], nonce: &[u8]) -> Result<Self> {
        if key.len() != KEY_SIZE {
            return Err(Error::InvalidKeyMaterial(format!(
                "key must be {} bytes, got {}",
                KEY_SIZE,
                key.len()
            )));
        }
        if nonce.len() != NONCE_SIZE {
            return Err(Error::InvalidKeyMaterial(format!(
                "nonce must be {} bytes, got {}",
                NONCE_SIZE,
                nonce.len()
            )));
        }

        let cipher = Aes256Gcm128::new_from_slice(key)
            .map_err(|_| Error::InvalidKeyMaterial("Failed to create cipher key".to_string()))?;
        let nonce = GcmNonce::from_slice(nonce)
            .map_err(|_| Error::InvalidKeyMaterial("Failed to create nonce".to_string()))?;

        Ok(GcmEngine { cipher, nonce })
    }

    /// The nonce this engine was built with
    pub fn nonce(&self) -> &GcmNonce {
        &self.nonce
    }

    /// Encrypt `buffer` in place and return the tag
    pub fn seal_in_place(&self, buffer: &mut [u8]) -> Result<AuthTag> {
        let nonce = GenericArray::from_slice(self.nonce.as_bytes());
        let tag = self
            .cipher
            .encrypt_in_place_detached(nonce, NO_AAD, buffer)
            .map_err(|_| Error::Encryption("Encryption failed".to_string()))?;

        let mut out = [0u8; TAG_SIZE];
        out.copy_from_slice(tag.as_slice());
        Ok(AuthTag::from_bytes(out))
    }

    /// Decrypt `buffer` in place, keeping the result only if `tag` verifies
    ///
    /// The tag comparison is constant time. On failure the buffer is wiped
    /// so no unverified plaintext survives, and `AuthenticationFailure` is
    /// returned.
    pub fn open_in_place(&self, buffer: &mut [u8], tag: &AuthTag) -> Result<()> {
        let nonce = GenericArray::from_slice(self.nonce.as_bytes());
        let tag = GenericArray::from_slice(tag.as_bytes());

        match self
            .cipher
            .decrypt_in_place_detached(nonce, NO_AAD, buffer, tag)
        {
            Ok(()) => Ok(()),
            Err(_) => {
                buffer.zeroize();
                Err(Error::AuthenticationFailure)
            }
        }
    }
}

/// Encrypt data using AES-256-GCM
///
/// # Arguments
/// * `plaintext` - Data to encrypt, any length including zero
/// * `key` - 256-bit encryption key
/// * `nonce` - 128-bit nonce, unique for this key
///
/// # Returns
/// Ciphertext of the same length as `plaintext` and a 16-byte tag
pub fn encrypt(plaintext: &[u8], key: &[u8], nonce: &[u8]) -> Result<Sealed> {
    let engine = GcmEngine::from_slices(key, nonce)?;

    let mut ciphertext = plaintext.to_vec();
    let tag = engine.seal_in_place(&mut ciphertext)?;

    Ok(Sealed { ciphertext, tag })
}

/// Decrypt data using AES-256-GCM and verify its tag
///
/// # Arguments
/// * `ciphertext` - Data produced by [`encrypt`]
/// * `key` - 256-bit encryption key
/// * `nonce` - 128-bit nonce used for encryption
/// * `tag` - 16-byte tag produced by encryption
///
/// # Returns
/// Verified plaintext, wiped from memory when dropped
pub fn decrypt_and_verify(
    ciphertext: &[u8],
    key: &[u8],
    nonce: &[u8],
    tag: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    let engine = GcmEngine::from_slices(key, nonce)?;
    let tag = AuthTag::from_slice(tag)
        .map_err(|_| Error::InvalidKeyMaterial(format!("tag must be {} bytes", TAG_SIZE)))?;

    let mut plaintext = Zeroizing::new(ciphertext.to_vec());
    engine.open_in_place(&mut plaintext, &tag)?;

    Ok(plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZERO_KEY: [u8; KEY_SIZE] = [0u8; KEY_SIZE];
    const ZERO_NONCE: [u8; NONCE_SIZE] = [0u8; NONCE_SIZE];

    // "hello world" under an all-zero key and all-zero 16-byte nonce
    const HELLO_CIPHERTEXT: &str = "b736ac615f3749e4eeb259";
    const HELLO_TAG: &str = "3eb2ec540398aef37a9652d7ae3bea31";

    // Empty plaintext under the same key and nonce
    const EMPTY_TAG: &str = "8312357a2111ea33b1b67eb2fe05fe86";

    fn test_key() -> SecretKey {
        SecretKey::generate()
    }

    fn flip_bit(bytes: &[u8], index: usize, bit: u8) -> Vec<u8> {
        let mut out = bytes.to_vec();
        out[index] ^= 1 << bit;
        out
    }

    #[test]
    fn test_encrypt_decrypt() {
        let key = test_key();
        let nonce = GcmNonce::generate();
        let plaintext = b"Hello, gcmseal!";

        let sealed = encrypt(plaintext, key.key(), nonce.as_bytes()).unwrap();
        let decrypted =
            decrypt_and_verify(&sealed.ciphertext, key.key(), nonce.as_bytes(), sealed.tag.as_bytes())
                .unwrap();

        assert_eq!(decrypted.as_slice(), plaintext);
    }

    #[test]
    fn test_empty_plaintext() {
        let key = test_key();
        let nonce = GcmNonce::generate();

        let sealed = encrypt(b"", key.key(), nonce.as_bytes()).unwrap();
        assert!(sealed.ciphertext.is_empty());

        let decrypted =
            decrypt_and_verify(&sealed.ciphertext, key.key(), nonce.as_bytes(), sealed.tag.as_bytes())
                .unwrap();
        assert!(decrypted.is_empty());
    }

    #[test]
    fn test_length_invariants() {
        let key = test_key();
        let nonce = GcmNonce::generate();

        for size in [0usize, 1, 1024, 1_000_000] {
            let plaintext = vec![0x42u8; size];
            let sealed = encrypt(&plaintext, key.key(), nonce.as_bytes()).unwrap();

            assert_eq!(sealed.ciphertext.len(), size);
            assert_eq!(sealed.tag.as_bytes().len(), TAG_SIZE);
        }
    }

    #[test]
    fn test_deterministic_for_same_inputs() {
        let key = test_key();
        let nonce = GcmNonce::generate();

        let first = encrypt(b"same input", key.key(), nonce.as_bytes()).unwrap();
        let second = encrypt(b"same input", key.key(), nonce.as_bytes()).unwrap();

        assert_eq!(first.ciphertext, second.ciphertext);
        assert_eq!(first.tag, second.tag);
    }

    #[test]
    fn test_hello_world_vector() {
        let sealed = encrypt(b"hello world", &ZERO_KEY, &ZERO_NONCE).unwrap();

        assert_eq!(hex::encode(&sealed.ciphertext), HELLO_CIPHERTEXT);
        assert_eq!(sealed.tag.to_hex(), HELLO_TAG);

        let ciphertext = hex::decode(HELLO_CIPHERTEXT).unwrap();
        let tag = hex::decode(HELLO_TAG).unwrap();
        let decrypted = decrypt_and_verify(&ciphertext, &ZERO_KEY, &ZERO_NONCE, &tag).unwrap();
        assert_eq!(decrypted.as_slice(), b"hello world");
    }

    #[test]
    fn test_empty_vector() {
        let sealed = encrypt(b"", &ZERO_KEY, &ZERO_NONCE).unwrap();
        assert_eq!(sealed.tag.to_hex(), EMPTY_TAG);
    }

    #[test]
    fn test_hello_world_altered_tag_character_fails() {
        let ciphertext = hex::decode(HELLO_CIPHERTEXT).unwrap();

        for position in 0..HELLO_TAG.len() {
            let mut altered: Vec<char> = HELLO_TAG.chars().collect();
            altered[position] = if altered[position] == '0' { '1' } else { '0' };
            let altered: String = altered.into_iter().collect();
            let tag = hex::decode(&altered).unwrap();

            let result = decrypt_and_verify(&ciphertext, &ZERO_KEY, &ZERO_NONCE, &tag);
            assert!(matches!(result, Err(Error::AuthenticationFailure)));
        }
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let key = test_key();
        let nonce = GcmNonce::generate();
        let sealed = encrypt(b"Secret data", key.key(), nonce.as_bytes()).unwrap();

        for index in 0..sealed.ciphertext.len() {
            for bit in 0..8 {
                let tampered = flip_bit(&sealed.ciphertext, index, bit);
                let result =
                    decrypt_and_verify(&tampered, key.key(), nonce.as_bytes(), sealed.tag.as_bytes());
                assert!(matches!(result, Err(Error::AuthenticationFailure)));
            }
        }
    }

    #[test]
    fn test_tampered_tag_fails() {
        let key = test_key();
        let nonce = GcmNonce::generate();
        let sealed = encrypt(b"Secret data", key.key(), nonce.as_bytes()).unwrap();

        for index in 0..TAG_SIZE {
            let tampered = flip_bit(sealed.tag.as_bytes(), index, (index % 8) as u8);
            let result = decrypt_and_verify(&sealed.ciphertext, key.key(), nonce.as_bytes(), &tampered);
            assert!(matches!(result, Err(Error::AuthenticationFailure)));
        }
    }

    #[test]
    fn test_wrong_key_fails() {
        let key = test_key();
        let nonce = GcmNonce::generate();
        let sealed = encrypt(b"Secret data", key.key(), nonce.as_bytes()).unwrap();

        for index in [0, 15, 31] {
            let wrong_key = flip_bit(key.key(), index, 0);
            let result =
                decrypt_and_verify(&sealed.ciphertext, &wrong_key, nonce.as_bytes(), sealed.tag.as_bytes());
            assert!(matches!(result, Err(Error::AuthenticationFailure)));
        }
    }

    #[test]
    fn test_wrong_nonce_fails() {
        let key = test_key();
        let nonce = GcmNonce::generate();
        let sealed = encrypt(b"Secret data", key.key(), nonce.as_bytes()).unwrap();

        for index in [0, 11, 12, 15] {
            let wrong_nonce = flip_bit(nonce.as_bytes(), index, 7);
            let result =
                decrypt_and_verify(&sealed.ciphertext, key.key(), &wrong_nonce, sealed.tag.as_bytes());
            assert!(matches!(result, Err(Error::AuthenticationFailure)));
        }
    }

    #[test]
    fn test_tampered_empty_ciphertext_tag_fails() {
        let sealed = encrypt(b"", &ZERO_KEY, &ZERO_NONCE).unwrap();
        let tampered = flip_bit(sealed.tag.as_bytes(), 0, 0);

        let result = decrypt_and_verify(&[], &ZERO_KEY, &ZERO_NONCE, &tampered);
        assert!(matches!(result, Err(Error::AuthenticationFailure)));
    }

    #[test]
    fn test_invalid_key_material() {
        let nonce = [0u8; NONCE_SIZE];
        let tag = [0u8; TAG_SIZE];

        assert!(matches!(
            encrypt(b"data", &[0u8; 31], &nonce),
            Err(Error::InvalidKeyMaterial(_))
        ));
        assert!(matches!(
            encrypt(b"data", &ZERO_KEY, &[0u8; 12]),
            Err(Error::InvalidKeyMaterial(_))
        ));
        assert!(matches!(
            decrypt_and_verify(b"data", &[0u8; 33], &nonce, &tag),
            Err(Error::InvalidKeyMaterial(_))
        ));
        assert!(matches!(
            decrypt_and_verify(b"data", &ZERO_KEY, &nonce, &[0u8; 15]),
            Err(Error::InvalidKeyMaterial(_))
        ));
    }

    #[test]
    fn test_open_in_place_wipes_buffer_on_failure() {
        let key = SecretKey::from_bytes(ZERO_KEY);
        let nonce = GcmNonce::from_bytes(ZERO_NONCE);
        let engine = GcmEngine::new(&key, &nonce);

        let mut buffer = hex::decode(HELLO_CIPHERTEXT).unwrap();
        let wrong_tag = AuthTag::from_bytes([0u8; TAG_SIZE]);

        let result = engine.open_in_place(&mut buffer, &wrong_tag);
        assert!(matches!(result, Err(Error::AuthenticationFailure)));
        assert!(buffer.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_engine_in_place_round_trip() {
        let key = test_key();
        let nonce = GcmNonce::generate();
        let engine = GcmEngine::new(&key, &nonce);

        let mut buffer = b"in place".to_vec();
        let tag = engine.seal_in_place(&mut buffer).unwrap();
        assert_ne!(buffer.as_slice(), b"in place");

        engine.open_in_place(&mut buffer, &tag).unwrap();
        assert_eq!(buffer.as_slice(), b"in place");
        assert_eq!(engine.nonce(), &nonce);
    }
}

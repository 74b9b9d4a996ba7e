//! Whole-file encrypt and decrypt
//!
//! Files are read fully into memory, transformed in place and written back
//! out in one call. A decrypted buffer is written only after its tag
//! verifies; on authentication failure the output path is never touched.

use crate::crypto::{GcmEngine, GcmNonce, SecretKey};
use crate::error::{Error, Result};
use crate::material::KeyMaterial;
use std::path::Path;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

/// Read a whole file into memory
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    let data = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    debug!("Read {} bytes from {:?}", data.len(), path);
    Ok(data)
}

/// Write a whole buffer to `path`, replacing any existing file
pub fn write_output(path: &Path, data: &[u8]) -> Result<()> {
    std::fs::write(path, data).map_err(|e| Error::io(path, e))?;
    debug!("Wrote {} bytes to {:?}", data.len(), path);
    Ok(())
}

/// Encrypt `input` under a fresh random key and nonce, writing raw
/// ciphertext to `output`
///
/// Returns the key material the operator must keep for decryption.
pub fn encrypt_file(input: &Path, output: &Path) -> Result<KeyMaterial> {
    let mut buffer = Zeroizing::new(read_input(input)?);

    let key = SecretKey::generate();
    let nonce = GcmNonce::generate();
    let engine = GcmEngine::new(&key, &nonce);

    info!("Encrypting file {:?} ({} bytes)", input, buffer.len());
    let tag = engine.seal_in_place(&mut buffer)?;

    write_output(output, &buffer)?;
    info!("Ciphertext written to {:?}", output);

    Ok(KeyMaterial { key, nonce, tag })
}

/// Decrypt `input` with `material`, writing verified plaintext to `output`
///
/// Returns the number of plaintext bytes written.
pub fn decrypt_file(input: &Path, output: &Path, material: &KeyMaterial) -> Result<usize> {
    let mut buffer = Zeroizing::new(read_input(input)?);

    info!("Decrypting file {:?}...", input);
    let engine = GcmEngine::new(&material.key, &material.nonce);

    if let Err(e) = engine.open_in_place(&mut buffer, &material.tag) {
        warn!("Tag verification failed for {:?}, no output written", input);
        return Err(e);
    }

    write_output(output, &buffer)?;
    info!("Decryption and verification successful, saved to {:?}", output);

    Ok(buffer.len())
}

/// Decrypt `input` using hex-encoded key material
///
/// Key, nonce and tag are decoded and length-checked before the input file
/// is opened.
pub fn decrypt_file_hex(
    input: &Path,
    output: &Path,
    key_hex: &str,
    nonce_hex: &str,
    tag_hex: &str,
) -> Result<usize> {
    let material = KeyMaterial::from_hex(key_hex, nonce_hex, tag_hex)?;
    decrypt_file(input, output, &material)
}

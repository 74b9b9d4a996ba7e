//! Key material produced by encryption and required for decryption
//!
//! The operator stores the key, nonce and tag themselves. They can be
//! printed as hex or kept in a small JSON file next to the ciphertext.

use crate::crypto::{AuthTag, GcmNonce, SecretKey};
use crate::error::{Error, Result};
use crate::validate::{decode_hex, Field};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Everything needed to decrypt one ciphertext
#[derive(Debug, Clone)]
pub struct KeyMaterial {
    pub key: SecretKey,
    pub nonce: GcmNonce,
    pub tag: AuthTag,
}

/// On-disk JSON form, all fields lowercase hex
#[derive(Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
struct MaterialRecord {
    key: String,
    nonce: String,
    tag: String,
}

impl KeyMaterial {
    /// Build key material from operator-supplied hex strings
    ///
    /// All three values are decoded first, then their lengths are checked
    /// in key, nonce, tag order.
    pub fn from_hex(key_hex: &str, nonce_hex: &str, tag_hex: &str) -> Result<Self> {
        let key = decode_hex(Field::Key, key_hex)?;
        let nonce = decode_hex(Field::Nonce, nonce_hex)?;
        let tag = decode_hex(Field::Tag, tag_hex)?;

        Ok(KeyMaterial {
            key: SecretKey::from_slice(&key)?,
            nonce: GcmNonce::from_slice(&nonce)?,
            tag: AuthTag::from_slice(&tag)?,
        })
    }

    /// Render as a JSON object of hex strings
    pub fn to_json(&self) -> Result<String> {
        let record = MaterialRecord {
            key: self.key.to_hex().to_string(),
            nonce: self.nonce.to_hex(),
            tag: self.tag.to_hex(),
        };
        Ok(serde_json::to_string_pretty(&record)?)
    }

    /// Parse the JSON form, applying the same validation as [`from_hex`]
    ///
    /// [`from_hex`]: KeyMaterial::from_hex
    pub fn from_json(json: &str) -> Result<Self> {
        let record: MaterialRecord = serde_json::from_str(json)?;
        KeyMaterial::from_hex(&record.key, &record.nonce, &record.tag)
    }

    /// Save to a JSON file readable only by the owner
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut json = self.to_json()?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let written = options
            .open(path)
            .and_then(|mut file| file.write_all(json.as_bytes()));
        json.zeroize();
        written.map_err(|e| Error::io(path, e))?;

        debug!("Key material saved to {:?}", path);
        Ok(())
    }

    /// Load from a JSON file written by [`save`]
    ///
    /// [`save`]: KeyMaterial::save
    pub fn load(path: &Path) -> Result<Self> {
        let mut json = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let material = KeyMaterial::from_json(&json);
        json.zeroize();
        material
    }
}

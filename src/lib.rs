//! gcmseal - Authenticated file encryption
//!
//! Encrypts a file under a fresh AES-256 key and 128-bit nonce with
//! AES-GCM, and decrypts it again only when the authentication tag
//! verifies.

pub mod crypto;
pub mod error;
pub mod file;
pub mod material;
pub mod validate;

pub use error::{Error, Result};
pub use material::KeyMaterial;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::crypto::{AuthTag, GcmEngine, GcmNonce, SecretKey};
    pub use crate::error::{Error, Result};
    pub use crate::material::KeyMaterial;
}

//! Bearer tokens sealed with AES-256-GCM
//!
//! A token is `base64url(nonce || ciphertext)` where the plaintext is the JSON
//! claims `{sub, exp}`. Only the holder of the local token key can mint or read
//! one, and any tampering fails authentication.

use std::path::Path;

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::{
    aead::{Aead, KeyInit, OsRng},
    Aes256Gcm, Nonce,
};
use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    Engine,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{SpendbookError, SpendbookResult};
use crate::models::UserId;
use crate::storage::file_io::write_atomic;

/// Size of the AES-GCM nonce in bytes (96 bits)
const NONCE_SIZE: usize = 12;

const KEY_SIZE: usize = 32;

/// Secret key for sealing tokens; wiped on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct TokenKey {
    key: [u8; KEY_SIZE],
}

impl TokenKey {
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_SIZE];
        OsRng.fill_bytes(&mut key);
        Self { key }
    }

    /// Read the key stored at `path`, creating one on first use
    pub fn load_or_generate(path: &Path) -> SpendbookResult<Self> {
        if path.exists() {
            let encoded = std::fs::read_to_string(path)
                .map_err(|e| SpendbookError::Io(format!("Failed to read token key: {}", e)))?;
            let mut bytes = STANDARD.decode(encoded.trim()).map_err(|e| {
                SpendbookError::Encryption(format!("Invalid token key encoding: {}", e))
            })?;
            if bytes.len() != KEY_SIZE {
                bytes.zeroize();
                return Err(SpendbookError::Encryption(
                    "Token key has the wrong length".into(),
                ));
            }
            let mut key = [0u8; KEY_SIZE];
            key.copy_from_slice(&bytes);
            bytes.zeroize();
            return Ok(Self { key });
        }

        let key = Self::generate();
        write_atomic(path, STANDARD.encode(key.key).as_bytes())?;
        Ok(key)
    }

    fn cipher(&self) -> SpendbookResult<Aes256Gcm> {
        Aes256Gcm::new_from_slice(&self.key)
            .map_err(|e| SpendbookError::Encryption(format!("Failed to create cipher: {}", e)))
    }
}

/// What a token asserts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Owner the token was issued to
    pub sub: UserId,
    /// Expiry as a unix timestamp (seconds)
    pub exp: i64,
}

impl TokenClaims {
    pub fn new(sub: UserId, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub,
            exp: (issued_at + ttl).timestamp(),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

/// Seal claims into an opaque token string
pub fn seal(claims: &TokenClaims, key: &TokenKey) -> SpendbookResult<String> {
    let plaintext = serde_json::to_vec(claims)?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = key
        .cipher()?
        .encrypt(nonce, plaintext.as_ref())
        .map_err(|e| SpendbookError::Encryption(format!("Token sealing failed: {}", e)))?;

    let mut sealed = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    sealed.extend_from_slice(&nonce_bytes);
    sealed.extend_from_slice(&ciphertext);
    Ok(URL_SAFE_NO_PAD.encode(sealed))
}

/// Open and check a token. Every failure is Unauthorized.
pub fn open(token: &str, key: &TokenKey, now: DateTime<Utc>) -> SpendbookResult<TokenClaims> {
    let invalid = || SpendbookError::Unauthorized("Invalid token".into());

    let sealed = URL_SAFE_NO_PAD
        .decode(token.trim())
        .map_err(|_| invalid())?;
    if sealed.len() <= NONCE_SIZE {
        return Err(invalid());
    }
    let (nonce_bytes, ciphertext) = sealed.split_at(NONCE_SIZE);

    let plaintext = key
        .cipher()?
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| invalid())?;
    let claims: TokenClaims = serde_json::from_slice(&plaintext).map_err(|_| invalid())?;

    if claims.is_expired(now) {
        return Err(SpendbookError::Unauthorized("Token expired".into()));
    }
    Ok(claims)
}

//! Cryptographic functions for Spendbook
//!
//! Argon2id password hashing and AES-256-GCM sealed bearer tokens.

pub mod password;
pub mod secure_memory;
pub mod token;

pub use password::{hash_password, verify_password, MIN_PASSWORD_LEN};
pub use secure_memory::SecureString;
pub use token::{open, seal, TokenClaims, TokenKey};

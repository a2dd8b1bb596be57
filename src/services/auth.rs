//! Authentication service
//!
//! Maps credentials to a bearer token and a bearer token back to its owner.
//! Nothing past this service ever sees a password or a token.

use chrono::{Duration, Utc};
use serde_json::json;

use crate::audit::EntityType;
use crate::crypto::{self, TokenClaims, TokenKey, MIN_PASSWORD_LEN};
use crate::error::{SpendbookError, SpendbookResult};
use crate::models::User;
use crate::storage::Storage;

pub struct AuthService<'a> {
    storage: &'a Storage,
    key: &'a TokenKey,
    token_ttl: Duration,
}

impl<'a> AuthService<'a> {
    pub fn new(storage: &'a Storage, key: &'a TokenKey, token_ttl: Duration) -> Self {
        Self {
            storage,
            key,
            token_ttl,
        }
    }

    /// Create an account and return it with a fresh token.
    ///
    /// Conflict when the email or username is already registered.
    pub fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> SpendbookResult<(User, String)> {
        if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(SpendbookError::InvalidArgument(
                "Username, email and password are all required".into(),
            ));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(SpendbookError::InvalidArgument(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let user = User::new(username, email, crypto::hash_password(password)?);
        user.validate()
            .map_err(|e| SpendbookError::InvalidArgument(e.to_string()))?;

        self.storage.users.insert(user.clone())?;
        self.storage.users.save()?;

        // the hash stays out of the audit log
        self.storage.log_create(
            EntityType::User,
            user.id.to_string(),
            user.id,
            Some(user.username.clone()),
            &json!({ "username": user.username, "email": user.email }),
        )?;

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    /// An unknown email and a wrong password fail with the same Unauthorized error
    pub fn login(&self, email: &str, password: &str) -> SpendbookResult<(User, String)> {
        let invalid = || SpendbookError::Unauthorized("Invalid credentials".into());
        let user = self.storage.users.get_by_email(email)?.ok_or_else(invalid)?;

        if !crypto::verify_password(password, &user.password_hash)? {
            return Err(invalid());
        }

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    /// The user a token was issued to
    pub fn resolve(&self, token: &str) -> SpendbookResult<User> {
        let claims = crypto::open(token, self.key, Utc::now())?;
        self.storage
            .users
            .get(claims.sub)?
            .ok_or_else(|| SpendbookError::Unauthorized("Token refers to an unknown user".into()))
    }

    fn issue_token(&self, user: &User) -> SpendbookResult<String> {
        let claims = TokenClaims::new(user.id, Utc::now(), self.token_ttl);
        crypto::seal(&claims, self.key)
    }
}

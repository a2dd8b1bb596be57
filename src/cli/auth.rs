//! Auth CLI commands
//!
//! Register, log in and out. A successful register or login stores the bearer
//! token in the session file; every other command resolves it back to a user.

use clap::Subcommand;

use crate::config::{Session, Settings};
use crate::crypto::{SecureString, TokenKey};
use crate::error::{SpendbookError, SpendbookResult};
use crate::models::User;
use crate::services::AuthService;
use crate::storage::Storage;

/// Environment variable that supplies a password without prompting
pub const PASSWORD_ENV: &str = "SPENDBOOK_PASSWORD";

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Create an account and log in
    Register {
        username: String,
        email: String,
        /// Password (prompted for when omitted)
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
    },

    /// Log in with email and password
    Login {
        email: String,
        /// Password (prompted for when omitted)
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in user
    Whoami,
}

pub fn handle_auth_command(
    storage: &Storage,
    settings: &Settings,
    key: &TokenKey,
    cmd: AuthCommands,
) -> SpendbookResult<()> {
    let auth = AuthService::new(storage, key, settings.token_ttl());
    let paths = storage.paths();

    match cmd {
        AuthCommands::Register {
            username,
            email,
            password,
        } => {
            let password = read_password(password, "Choose a password: ")?;
            let (user, token) = auth.register(&username, &email, &password)?;
            Session::store(paths, token)?;
            println!("Registered {} <{}>", user.username, user.email);
            println!("You are now logged in.");
        }

        AuthCommands::Login { email, password } => {
            let password = read_password(password, "Password: ")?;
            let (user, token) = auth.login(&email, &password)?;
            Session::store(paths, token)?;
            println!("Logged in as {}", user.username);
        }

        AuthCommands::Logout => {
            if Session::clear(paths)? {
                println!("Logged out.");
            } else {
                println!("Not logged in.");
            }
        }

        AuthCommands::Whoami => {
            let user = current_user(storage, settings, key)?;
            println!("{} <{}> ({})", user.username, user.email, user.id);
        }
    }

    Ok(())
}

/// The user the stored session token belongs to
pub fn current_user(storage: &Storage, settings: &Settings, key: &TokenKey) -> SpendbookResult<User> {
    let session = Session::load(storage.paths())?;
    let token = session.require_token()?;
    AuthService::new(storage, key, settings.token_ttl()).resolve(token)
}

fn read_password(given: Option<String>, prompt: &str) -> SpendbookResult<SecureString> {
    match given {
        Some(password) => Ok(SecureString::new(password)),
        None => rpassword::prompt_password(prompt)
            .map(SecureString::new)
            .map_err(|e| SpendbookError::Io(format!("Failed to read password: {}", e))),
    }
}

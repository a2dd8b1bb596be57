//! Configuration module for Spendbook
//!
//! Path resolution, user settings and the persisted login session.

pub mod paths;
pub mod session;
pub mod settings;

pub use paths::SpendbookPaths;
pub use session::Session;
pub use settings::Settings;

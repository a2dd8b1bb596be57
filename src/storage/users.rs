//! User repository for JSON storage
//!
//! Usernames and emails are unique across all users (case-insensitive).

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendbookError;
use crate::models::user::normalize_email;
use crate::models::{User, UserId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct UserData {
    users: Vec<User>,
}

pub struct UserRepository {
    path: PathBuf,
    data: RwLock<HashMap<UserId, User>>,
}

impl UserRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), SpendbookError> {
        let file_data: UserData = read_json(&self.path)?;

        let mut data = write_lock(&self.data)?;
        data.clear();
        for user in file_data.users {
            data.insert(user.id, user);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), SpendbookError> {
        let data = read_lock(&self.data)?;

        let mut users: Vec<_> = data.values().cloned().collect();
        users.sort_by_key(|u| u.created_at);

        write_json_atomic(&self.path, &UserData { users })
    }

    pub fn get(&self, id: UserId) -> Result<Option<User>, SpendbookError> {
        let data = read_lock(&self.data)?;
        Ok(data.get(&id).cloned())
    }

    pub fn get_by_email(&self, email: &str) -> Result<Option<User>, SpendbookError> {
        let data = read_lock(&self.data)?;
        let email = normalize_email(email);
        Ok(data.values().find(|u| u.email == email).cloned())
    }

    /// Add a new user; Conflict if the email or username is taken
    pub fn insert(&self, user: User) -> Result<(), SpendbookError> {
        let mut data = write_lock(&self.data)?;

        if data.values().any(|u| u.email == user.email) {
            return Err(SpendbookError::Conflict {
                entity_type: "User",
                identifier: format!("email '{}'", user.email),
            });
        }
        if data
            .values()
            .any(|u| u.username.eq_ignore_ascii_case(&user.username))
        {
            return Err(SpendbookError::Conflict {
                entity_type: "User",
                identifier: format!("username '{}'", user.username),
            });
        }

        data.insert(user.id, user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_unique_email_and_username() {
        let temp_dir = TempDir::new().unwrap();
        let repo = UserRepository::new(temp_dir.path().join("users.json"));

        repo.insert(User::new("ana", "ana@example.com", "h")).unwrap();

        let same_email = repo.insert(User::new("other", "ANA@example.com", "h"));
        assert!(same_email.unwrap_err().is_conflict());

        let same_name = repo.insert(User::new("Ana", "x@example.com", "h"));
        assert!(same_name.unwrap_err().is_conflict());
    }

    #[test]
    fn test_lookup_by_email() {
        let temp_dir = TempDir::new().unwrap();
        let repo = UserRepository::new(temp_dir.path().join("users.json"));
        let user = User::new("ana", "ana@example.com", "h");
        repo.insert(user.clone()).unwrap();
        repo.save().unwrap();

        let reopened = UserRepository::new(temp_dir.path().join("users.json"));
        reopened.load().unwrap();
        assert_eq!(
            reopened.get_by_email(" Ana@Example.com ").unwrap(),
            Some(user.clone())
        );
        assert_eq!(reopened.get(user.id).unwrap(), Some(user));
        assert_eq!(reopened.get_by_email("nobody@example.com").unwrap(), None);
    }
}

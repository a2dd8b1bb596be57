//! Savings snapshot repository
//!
//! At most one snapshot per `(owner, month)`; the first one recorded wins.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendbookError;
use crate::models::{Month, SavingsSnapshot, UserId};

use super::file_io::{read_json, write_json_atomic};
use super::{read_lock, write_lock};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct SavingsData {
    snapshots: Vec<SavingsSnapshot>,
}

pub struct SavingsRepository {
    path: PathBuf,
    data: RwLock<HashMap<(UserId, Month), SavingsSnapshot>>,
}

impl SavingsRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), SpendbookError> {
        let file_data: SavingsData = read_json(&self.path)?;

        let mut data = write_lock(&self.data)?;
        data.clear();
        for snapshot in file_data.snapshots {
            data.entry((snapshot.owner, snapshot.month))
                .or_insert(snapshot);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), SpendbookError> {
        let data = read_lock(&self.data)?;

        let mut snapshots: Vec<_> = data.values().cloned().collect();
        snapshots.sort_by_key(|s| (s.month, s.created_at));

        write_json_atomic(&self.path, &SavingsData { snapshots })
    }

    pub fn get(
        &self,
        owner: UserId,
        month: Month,
    ) -> Result<Option<SavingsSnapshot>, SpendbookError> {
        let data = read_lock(&self.data)?;
        Ok(data.get(&(owner, month)).cloned())
    }

    /// Store `snapshot` unless its month is already recorded.
    ///
    /// Returns `true` when the snapshot was stored.
    pub fn insert_if_absent(&self, snapshot: SavingsSnapshot) -> Result<bool, SpendbookError> {
        let mut data = write_lock(&self.data)?;
        let key = (snapshot.owner, snapshot.month);
        if data.contains_key(&key) {
            return Ok(false);
        }
        data.insert(key, snapshot);
        Ok(true)
    }

    /// `owner`'s snapshots, oldest month first
    pub fn list(&self, owner: UserId) -> Result<Vec<SavingsSnapshot>, SpendbookError> {
        let data = read_lock(&self.data)?;
        let mut snapshots: Vec<_> = data
            .values()
            .filter(|s| s.owner == owner)
            .cloned()
            .collect();
        snapshots.sort_by_key(|s| s.month);
        Ok(snapshots)
    }
}

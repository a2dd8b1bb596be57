//! Income repository for JSON storage

use std::cmp::Reverse;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SpendbookError;
use crate::models::{Income, IncomeId, Month, UserId};

use super::file_io::{read_json, write_json_atomic};
use super::{pick_unique, read_lock, write_lock};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct IncomeData {
    incomes: Vec<Income>,
}

pub struct IncomeRepository {
    path: PathBuf,
    data: RwLock<HashMap<IncomeId, Income>>,
}

impl IncomeRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), SpendbookError> {
        let file_data: IncomeData = read_json(&self.path)?;

        let mut data = write_lock(&self.data)?;
        data.clear();
        for income in file_data.incomes {
            data.insert(income.id, income);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), SpendbookError> {
        let data = read_lock(&self.data)?;

        let mut incomes: Vec<_> = data.values().cloned().collect();
        incomes.sort_by_key(|i| (i.date, i.created_at));

        write_json_atomic(&self.path, &IncomeData { incomes })
    }

    pub fn get(&self, owner: UserId, id: IncomeId) -> Result<Option<Income>, SpendbookError> {
        let data = read_lock(&self.data)?;
        Ok(data.get(&id).filter(|i| i.owner == owner).cloned())
    }

    pub fn find(&self, owner: UserId, identifier: &str) -> Result<Option<Income>, SpendbookError> {
        let data = read_lock(&self.data)?;
        pick_unique(
            data.values()
                .filter(|i| i.owner == owner && i.id.matches_identifier(identifier)),
            "Income",
            identifier,
        )
    }

    /// `owner`'s incomes, newest first, optionally restricted to one month
    pub fn list(
        &self,
        owner: UserId,
        month: Option<Month>,
    ) -> Result<Vec<Income>, SpendbookError> {
        let data = read_lock(&self.data)?;
        let mut incomes: Vec<_> = data
            .values()
            .filter(|i| i.owner == owner)
            .filter(|i| month.map_or(true, |m| m.contains(i.date)))
            .cloned()
            .collect();
        incomes.sort_by_key(|i| (Reverse(i.date), Reverse(i.created_at)));
        Ok(incomes)
    }

    pub fn upsert(&self, income: Income) -> Result<(), SpendbookError> {
        let mut data = write_lock(&self.data)?;
        data.insert(income.id, income);
        Ok(())
    }

    pub fn delete(&self, owner: UserId, id: IncomeId) -> Result<Option<Income>, SpendbookError> {
        let mut data = write_lock(&self.data)?;
        if data.get(&id).is_some_and(|i| i.owner == owner) {
            Ok(data.remove(&id))
        } else {
            Ok(None)
        }
    }
}

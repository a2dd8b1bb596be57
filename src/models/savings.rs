//! Savings snapshot model
//!
//! Records a month's net balance (income minus expenses) the first time it is
//! summarised. One snapshot per `(owner, month)`; later recomputation does not
//! overwrite it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{SavingsId, UserId};
use super::money::Money;
use super::month::Month;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsSnapshot {
    pub id: SavingsId,
    pub owner: UserId,
    /// At most one snapshot per owner and month
    pub month: Month,
    /// Net balance at the time of recording; negative when the month overspent
    pub amount: Money,
    pub created_at: DateTime<Utc>,
}

impl SavingsSnapshot {
    pub fn new(owner: UserId, month: Month, amount: Money) -> Self {
        Self {
            id: SavingsId::new(),
            owner,
            month,
            amount,
            created_at: Utc::now(),
        }
    }
}

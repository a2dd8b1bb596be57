//! `spendbook history`: the current user's recent audit entries

use crate::error::SpendbookResult;
use crate::models::User;
use crate::storage::Storage;

pub fn handle_history_command(storage: &Storage, user: &User, limit: usize) -> SpendbookResult<()> {
    let entries = storage.audit().read_recent_for_owner(user.id, limit)?;

    if entries.is_empty() {
        println!("No history yet.");
        return Ok(());
    }

    for entry in entries.iter().rev() {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}

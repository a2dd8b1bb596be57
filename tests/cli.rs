//! End-to-end tests for the `spendbook` binary
//!
//! Each test runs against its own data directory.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PASSWORD: &str = "correct-horse";

fn spendbook(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("spendbook").unwrap();
    cmd.env("SPENDBOOK_DATA_DIR", dir.path())
        .env("SPENDBOOK_PASSWORD", PASSWORD);
    cmd
}

fn registered() -> TempDir {
    let dir = TempDir::new().unwrap();
    spendbook(&dir)
        .args(["auth", "register", "ana", "ana@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered ana <ana@example.com>"));
    dir
}

#[test]
fn test_register_and_whoami() {
    let dir = registered();
    spendbook(&dir)
        .args(["auth", "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ana <ana@example.com>"));
}

#[test]
fn test_commands_require_login() {
    let dir = TempDir::new().unwrap();
    spendbook(&dir)
        .args(["expense", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_logout_then_login() {
    let dir = registered();
    spendbook(&dir)
        .args(["auth", "logout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out."));
    spendbook(&dir).args(["budget", "list"]).assert().failure();

    spendbook(&dir)
        .args(["auth", "login", "ana@example.com"])
        .env("SPENDBOOK_PASSWORD", "wrong-password")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));
    spendbook(&dir)
        .args(["auth", "login", "nobody@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));
    spendbook(&dir)
        .args(["auth", "login", "ANA@example.com"])
        .assert()
        .success();
    spendbook(&dir).args(["budget", "list"]).assert().success();
}

#[test]
fn test_duplicate_registration_conflicts() {
    let dir = registered();
    spendbook(&dir)
        .args(["auth", "register", "other", "ana@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_budget_usage_from_expenses() {
    let dir = registered();
    spendbook(&dir)
        .args(["budget", "create", "Groceries", "500", "--month", "2025-06"])
        .assert()
        .success();
    spendbook(&dir)
        .args([
            "expense", "add", "320", "food", "Weekly shop", "--date", "2025-06-10", "--budget",
            "groceries",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded $320.00"));
    // outside the month, so it does not count
    spendbook(&dir)
        .args(["expense", "add", "99", "food", "Old shop", "--date", "2025-05-31"])
        .assert()
        .success();

    spendbook(&dir)
        .args(["budget", "show", "Groceries", "--month", "2025-06"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Spent:       $320.00"))
        .stdout(predicate::str::contains("Remaining:   $180.00"))
        .stdout(predicate::str::contains("64%"))
        .stdout(predicate::str::contains("Status:      on track"))
        .stdout(predicate::str::contains("Linked:      1 expense(s)"));
}

#[test]
fn test_duplicate_budget_conflicts() {
    let dir = registered();
    spendbook(&dir)
        .args(["budget", "create", "Rent", "1200", "--month", "2025-06"])
        .assert()
        .success();
    spendbook(&dir)
        .args(["budget", "create", "Rent", "900", "--month", "2025-06"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Budget already exists"));
    spendbook(&dir)
        .args(["budget", "create", "rent", "900", "--month", "2025-06"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Budget already exists"));
    spendbook(&dir)
        .args(["budget", "create", "Rent", "900", "--month", "2025-07"])
        .assert()
        .success();
}

#[test]
fn test_invalid_input_is_rejected() {
    let dir = registered();
    spendbook(&dir)
        .args(["budget", "create", "Rent", "0", "--month", "2025-06"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid argument"));
    spendbook(&dir)
        .args(["budget", "create", "Rent", "100", "--month", "2025-6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid argument"));
    spendbook(&dir)
        .args(["expense", "add", "10", "gadgets", "Thing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid argument"));
}

#[test]
fn test_expense_link_must_match_month() {
    let dir = registered();
    spendbook(&dir)
        .args(["budget", "create", "Fun", "100", "--month", "2025-06"])
        .assert()
        .success();
    spendbook(&dir)
        .args([
            "expense", "add", "20", "entertainment", "Cinema", "--date", "2025-07-02", "--budget",
            "Fun",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_summary_records_savings_once() {
    let dir = registered();
    spendbook(&dir)
        .args(["income", "add", "2000", "Acme Corp", "--date", "2025-06-01"])
        .assert()
        .success();
    spendbook(&dir)
        .args(["expense", "add", "1500", "utilities", "Bills", "--date", "2025-06-05"])
        .assert()
        .success();

    spendbook(&dir)
        .args(["report", "summary", "--month", "2025-06"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$500.00"))
        .stdout(predicate::str::contains("25%"))
        .stdout(predicate::str::contains("Recorded savings of $500.00 for 2025-06"));

    spendbook(&dir)
        .args(["expense", "add", "100", "food", "Late dinner", "--date", "2025-06-20"])
        .assert()
        .success();
    spendbook(&dir)
        .args(["report", "summary", "--month", "2025-06"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded savings").not());

    spendbook(&dir)
        .args(["report", "savings"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-06"))
        .stdout(predicate::str::contains("$500.00"));
}

#[test]
fn test_users_do_not_see_each_other() {
    let dir = registered();
    spendbook(&dir)
        .args(["expense", "add", "42", "shopping", "Secret purchase", "--date", "2025-06-01"])
        .assert()
        .success();

    spendbook(&dir)
        .args(["auth", "register", "ben", "ben@example.com"])
        .assert()
        .success();
    spendbook(&dir)
        .args(["expense", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses found."));
}

#[test]
fn test_export_csv_to_stdout() {
    let dir = registered();
    spendbook(&dir)
        .args(["expense", "add", "12.50", "food", "Lunch", "--date", "2025-06-03"])
        .assert()
        .success();

    spendbook(&dir)
        .args(["export", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Date,Category,Description,Notes,Amount\n2025-06-03,Food,Lunch,,12.50",
        ));
}

#[test]
fn test_history_lists_changes() {
    let dir = registered();
    spendbook(&dir)
        .args(["budget", "create", "Travel", "300", "--month", "2025-08"])
        .assert()
        .success();
    spendbook(&dir)
        .args(["budget", "edit", "Travel", "--max-amount", "350"])
        .assert()
        .success();

    spendbook(&dir)
        .args(["history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget"))
        .stdout(predicate::str::contains("$300.00 -> $350.00"));
}

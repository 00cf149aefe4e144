use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn budgee(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("budgee").unwrap();
    cmd.env("BUDGEE_DATA_DIR", data_dir).env_remove("BUDGEE_CONTEXT");
    cmd
}

fn run(data_dir: &Path, args: &[&str]) {
    budgee(data_dir).args(args).assert().success();
}

#[test]
fn summary_of_empty_ledger() {
    let temp_dir = TempDir::new().unwrap();

    budgee(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary"))
        .stdout(predicate::str::contains("Nothing recorded yet."));
}

#[test]
fn missing_context_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.json");

    budgee(temp_dir.path())
        .arg("--context")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Context file not found"));
}

#[test]
fn shared_rent_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    run(dir, &["person", "add", "Alice"]);
    run(dir, &["person", "add", "Bob"]);
    run(
        dir,
        &["transaction", "add", "expense", "Rent", "1000", "--category", "housing"],
    );
    run(dir, &["person", "link", "Alice", "Rent"]);
    run(dir, &["person", "link", "bob", "rent"]);

    budgee(dir)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("People (2):"))
        .stdout(predicate::str::contains(
            "- Rent: -$1000.00 [Housing] (split 2 ways)",
        ));

    budgee(dir)
        .args(["person", "show", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Rent: -$500.00 of -$1000.00"));

    run(dir, &["person", "unlink", "Bob", "Rent"]);
    budgee(dir)
        .args(["transaction", "show", "Rent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Participants: Alice"))
        .stdout(predicate::str::contains("Share:        -$1000.00"));

    assert!(dir.join("data").join("ledger.json").exists());
}

#[test]
fn duplicate_person_fails() {
    let temp_dir = TempDir::new().unwrap();

    run(temp_dir.path(), &["person", "add", "Café"]);
    budgee(temp_dir.path())
        .args(["person", "add", "cafe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn unknown_category_fails() {
    let temp_dir = TempDir::new().unwrap();

    budgee(temp_dir.path())
        .args(["transaction", "add", "expense", "Food", "20", "-c", "Groceries"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown category"));
}

#[test]
fn huge_amount_is_rejected() {
    let temp_dir = TempDir::new().unwrap();

    budgee(temp_dir.path())
        .args(["transaction", "add", "income", "Jackpot", "99999999999999999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount out of range"));
}

#[test]
fn context_file_is_loaded_and_saved() {
    let temp_dir = TempDir::new().unwrap();
    let context = temp_dir.path().join("trip.json");
    std::fs::write(
        &context,
        r#"{
            "persons": [{"name": "Alice", "transactions": ["Hotel"]}],
            "incomes": [],
            "expenses": [{"name": "Hotel", "amount": -300.0, "persons": ["Alice"]}]
        }"#,
    )
    .unwrap();

    budgee(temp_dir.path())
        .arg("--context")
        .arg(&context)
        .args(["transaction", "add", "income", "Refund", "50"])
        .assert()
        .success();

    let saved = std::fs::read_to_string(&context).unwrap();
    assert!(saved.contains("Refund"));
    assert!(saved.contains("Hotel"));
    assert!(!temp_dir.path().join("data").join("ledger.json").exists());
}

#[test]
fn history_lists_changes() {
    let temp_dir = TempDir::new().unwrap();

    run(temp_dir.path(), &["person", "add", "Alice"]);
    run(temp_dir.path(), &["person", "rename", "Alice", "Alicia"]);

    budgee(temp_dir.path())
        .args(["history", "--limit", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Person alice"))
        .stdout(predicate::str::contains("UPDATE Person alicia"));
}

#[test]
fn history_filters_by_name_and_type() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    run(dir, &["person", "add", "Alice"]);
    run(dir, &["person", "add", "Bob"]);
    run(dir, &["transaction", "add", "expense", "Rent", "900"]);
    run(dir, &["person", "link", "Alice", "Rent"]);

    budgee(dir)
        .args(["history", "--name", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Person alice"))
        .stdout(predicate::str::contains("CREATE Association alice:rent"))
        .stdout(predicate::str::contains("bob").not());

    budgee(dir)
        .args(["history", "--type", "expense"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Expense rent"))
        .stdout(predicate::str::contains("Person").not());
}

#[test]
fn export_allocations_csv() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();
    let output = dir.join("allocations.csv");

    run(dir, &["person", "add", "Alice"]);
    run(dir, &["transaction", "add", "income", "Salary", "2500.50"]);
    run(dir, &["person", "link", "Alice", "Salary"]);

    budgee(dir)
        .arg("export")
        .arg("allocations")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 allocations"));

    let csv = std::fs::read_to_string(&output).unwrap();
    assert!(csv.contains("Alice,Salary,Income,,2500.50,1,2500.50"));
}

#[test]
fn init_creates_settings_and_ledger() {
    let temp_dir = TempDir::new().unwrap();

    budgee(temp_dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created empty ledger"));

    assert!(temp_dir.path().join("config.json").exists());
    assert!(temp_dir.path().join("data").join("ledger.json").exists());

    budgee(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Currency symbol: $"));
}

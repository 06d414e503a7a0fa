use assert_cmd::Command;
use predicates::prelude::*;

fn write_sample_csv(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("statement.csv");
    std::fs::write(
        &path,
        "Date,Description,Type,Amount\n\
         2025-08-15,SWIGGY ORDER 123,DEBIT,250\n\
         2025-08-16,RANDOM MERCHANT XYZ,DEBIT,500\n\
         2025-08-17,John Doe,CREDIT,100\n",
    )
    .unwrap();
    path
}

fn khata(data_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("khata").unwrap();
    cmd.env("KHATA_DATA_DIR", data_dir);
    cmd
}

#[test]
fn analyze_categorizes_and_lists_unknowns() {
    let dir = tempfile::tempdir().unwrap();
    let stmt = write_sample_csv(dir.path());
    khata(dir.path())
        .args(["analyze", stmt.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food"))
        .stdout(predicate::str::contains("RANDOM MERCHANT XYZ"))
        .stdout(predicate::str::contains("2 unresolved payees"))
        .stdout(predicate::str::contains("Suggested categories"));
}

#[test]
fn unsupported_extension_fails_with_format_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("statement.txt");
    std::fs::write(&path, "hello").unwrap();
    khata(dir.path())
        .args(["analyze", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported statement"));
}

#[test]
fn missing_description_column_fails_with_schema_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no_desc.csv");
    std::fs::write(&path, "Date,Amount\n2025-01-01,10\n").unwrap();
    khata(dir.path())
        .args(["analyze", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("schema error"));
}

#[test]
fn mappings_add_then_list_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    khata(dir.path())
        .args(["mappings", "add", "John Doe", "--category", "Transfers"])
        .assert()
        .success();
    khata(dir.path())
        .args(["mappings", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("John Doe"))
        .stdout(predicate::str::contains("Transfers"));
}

#[test]
fn mapping_override_resolves_unknown_payee() {
    let dir = tempfile::tempdir().unwrap();
    let stmt = write_sample_csv(dir.path());
    khata(dir.path())
        .args(["mappings", "add", "RANDOM MERCHANT XYZ", "--category", "Others"])
        .assert()
        .success();
    khata(dir.path())
        .args(["analyze", stmt.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Others"))
        .stdout(predicate::str::contains("1 unresolved payees"));
}

#[test]
fn export_writes_register_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let stmt = write_sample_csv(dir.path());
    let out = dir.path().join("report.csv");
    khata(dir.path())
        .args(["export", stmt.to_str().unwrap(), "--output", out.to_str().unwrap()])
        .assert()
        .success();
    assert!(out.exists());
    assert!(dir.path().join("report.summary.csv").exists());
    let register = std::fs::read_to_string(&out).unwrap();
    assert!(register.contains("SWIGGY ORDER 123"));
    assert!(register.contains("Food"));
}

#[test]
fn dashboard_prints_summary_tables() {
    let dir = tempfile::tempdir().unwrap();
    let stmt = write_sample_csv(dir.path());
    khata(dir.path())
        .args(["dashboard", stmt.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Credited"))
        .stdout(predicate::str::contains("2025-08"));
}

#[test]
fn categories_lists_advertised_vocabulary() {
    let dir = tempfile::tempdir().unwrap();
    khata(dir.path())
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Grocery / Daily Needs"))
        .stdout(predicate::str::contains("Others"));
}

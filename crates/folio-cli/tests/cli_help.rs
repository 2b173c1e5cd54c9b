use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("folio")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("type"))
        .stdout(predicate::str::contains("contact"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_type_help_shows_options() {
    cargo_bin_cmd!("folio")
        .args(["type", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--role"))
        .stdout(predicate::str::contains("--steps"))
        .stdout(predicate::str::contains("--instant"));
}

#[test]
fn test_contact_help_shows_fields() {
    cargo_bin_cmd!("folio")
        .args(["contact", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--name"))
        .stdout(predicate::str::contains("--email"))
        .stdout(predicate::str::contains("--subject"))
        .stdout(predicate::str::contains("--message"))
        .stdout(predicate::str::contains("--endpoint"));
}

#[test]
fn test_page_requires_terminal() {
    let dir = tempfile::tempdir().unwrap();

    cargo_bin_cmd!("folio")
        .env("FOLIO_HOME", dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}

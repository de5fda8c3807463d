//! Command-line tests that stay offline.

use assert_cmd::Command;
use predicates::prelude::*;

const FIXTURE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../payable-core/tests/fixtures/export-6394865.json"
);

fn payable(config_dir: &tempfile::TempDir) -> Command {
    let config = config_dir.path().join("config.json");
    if !config.exists() {
        std::fs::write(&config, "{}").unwrap();
    }

    let mut cmd = Command::cargo_bin("payable").unwrap();
    cmd.arg("--config").arg(&config);
    for key in [
        "ROSSUM_BASE_URL",
        "ROSSUM_AUTH_TOKEN",
        "TARGET_ENDPOINT",
        "XML_ENCODING",
        "DOCUMENT_ID",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

#[test]
fn test_convert_prints_xml() {
    let dir = tempfile::tempdir().unwrap();
    payable(&dir)
        .args(["convert", FIXTURE])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<InvoiceRegisters>",
        ))
        .stdout(predicate::str::contains("<Amount>2077.14</Amount>"))
        .stdout(predicate::str::contains("<Notes/>"));
}

#[test]
fn test_convert_json_format() {
    let dir = tempfile::tempdir().unwrap();
    payable(&dir)
        .args(["convert", FIXTURE, "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"InvoiceNumber\": \"143453775\""));
}

#[test]
fn test_convert_uses_configured_encoding() {
    let dir = tempfile::tempdir().unwrap();
    payable(&dir)
        .env("XML_ENCODING", "UTF-8")
        .args(["convert", FIXTURE])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
}

#[test]
fn test_convert_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.xml");

    payable(&dir)
        .args(["convert", FIXTURE, "--output"])
        .arg(&output)
        .assert()
        .success();

    let xml = std::fs::read_to_string(&output).unwrap();
    assert!(xml.contains("<VendorAddress>2423 KONGSVINGER Norway</VendorAddress>"));
}

#[test]
fn test_convert_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    payable(&dir)
        .args(["convert", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_run_requires_document_id() {
    let dir = tempfile::tempdir().unwrap();
    payable(&dir)
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("document ID is required"));
}

#[test]
fn test_run_rejects_blank_document_id() {
    let dir = tempfile::tempdir().unwrap();
    payable(&dir)
        .env("DOCUMENT_ID", "   ")
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("document ID is required"));
}

#[test]
fn test_config_init_and_show() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");

    payable(&dir)
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    payable(&dir)
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    payable(&dir)
        .env("ROSSUM_AUTH_TOKEN", "secret")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"auth_token\": \"********\""))
        .stdout(predicate::str::contains("secret").not());
}

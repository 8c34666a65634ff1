use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn deepcap(db_path: &str) -> Command {
    let mut cmd = Command::cargo_bin("deepcap").unwrap();
    cmd.args(["--db-path", db_path]);
    cmd
}

#[test]
fn config_show_defaults_to_production() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("deepcap.db");

    deepcap(db.to_str().unwrap())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("production"))
        .stdout(predicate::str::contains("https://app.thedeep.io"))
        .stdout(predicate::str::contains("https://prod-api.thedeep.io"));
}

#[test]
fn config_use_staging_persists_across_invocations() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("deepcap.db");
    let db = db.to_str().unwrap();

    deepcap(db)
        .args(["config", "use", "staging"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://staging-api.thedeep.io"));

    deepcap(db)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("staging"))
        .stdout(predicate::str::contains("https://staging.thedeep.io"));
}

#[test]
fn config_custom_round_trips() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("deepcap.db");
    let db = db.to_str().unwrap();

    deepcap(db)
        .args([
            "config",
            "custom",
            "--web-server",
            "https://x.test",
            "--api-server",
            "https://api.x.test",
            "--serverless",
            "https://sl.x.test",
            "--identifier",
            "x",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://api.x.test"));

    deepcap(db)
        .args(["config", "show", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"identifier\": \"x\""))
        .stdout(predicate::str::contains("https://sl.x.test"));
}

#[test]
fn config_custom_rejects_malformed_url_and_saves_nothing() {
    let dir = tempdir().unwrap();
    let db = dir.path().join("deepcap.db");
    let db = db.to_str().unwrap();

    deepcap(db)
        .args([
            "config",
            "custom",
            "--web-server",
            "not-a-url",
            "--api-server",
            "https://api.x.test",
            "--serverless",
            "https://sl.x.test",
            "--identifier",
            "x",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("webServerUrl"));

    // Still on the compiled-in production default.
    deepcap(db)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://app.thedeep.io"));
}

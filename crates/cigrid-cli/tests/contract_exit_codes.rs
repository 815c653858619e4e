use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use tempfile::tempdir;

fn cigrid() -> Command {
    Command::cargo_bin("cigrid").unwrap()
}

#[test]
fn missing_config_exits_with_config_error() {
    let dir = tempdir().unwrap();
    cigrid()
        .args(["render", "-c", "/does/not/exist.yaml", "-r", "also-missing.json", "-o"])
        .arg(dir.path().join("out.html"))
        .assert()
        .code(2)
        .stderr(contains("failed to read config"));
}

#[test]
fn unparsable_config_exits_with_config_error() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("broken.yaml");
    fs::write(&config, "version: [broken").unwrap();

    cigrid()
        .args(["validate", "-c"])
        .arg(&config)
        .assert()
        .code(2)
        .stderr(contains("failed to parse YAML"));
}

#[test]
fn unsupported_version_exits_with_config_error() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("v9.yaml");
    fs::write(&config, "version: v9\nmatrices:\n  m: {}\n").unwrap();

    cigrid()
        .args(["validate", "-c"])
        .arg(&config)
        .assert()
        .code(2)
        .stderr(contains("unsupported spec version"));
}

#[test]
fn missing_snapshot_exits_with_config_error() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("matrices.yaml");
    fs::write(
        &config,
        "version: v1\nmatrices:\n  m:\n    tests:\n      g:\n        - test_name: t\n",
    )
    .unwrap();

    cigrid()
        .args(["render", "-c"])
        .arg(&config)
        .args(["-r", "/does/not/exist.json", "-o"])
        .arg(dir.path().join("out.html"))
        .assert()
        .code(2)
        .stderr(contains("results snapshot"));
}

#[test]
fn validate_accepts_a_good_config() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("matrices.yaml");
    fs::write(
        &config,
        "version: v1\nmatrices:\n  m:\n    tests:\n      g:\n        - test_name: t\n",
    )
    .unwrap();

    cigrid()
        .args(["validate", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stderr(contains("config ok: 1 matrices, 1 tests"));
}

#[test]
fn version_prints_the_package_version() {
    cigrid()
        .arg("version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

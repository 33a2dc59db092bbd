//! End-to-end tests of the yarn_release binary.

#![cfg(unix)]

mod common;

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_both_workflows() {
    Command::cargo_bin("yarn_release")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("prepare"))
        .stdout(predicate::str::contains("verify-auth"));
}

#[test]
fn prepare_requires_a_version() {
    Command::cargo_bin("yarn_release")
        .unwrap()
        .arg("prepare")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--version"));
}

#[test]
fn prepare_updates_the_manifest_through_the_binary() {
    let tmp = tempfile::tempdir().unwrap();
    let cwd = tmp.path().join("work");
    let bin = tmp.path().join("bin");
    fs::create_dir_all(&cwd).unwrap();
    fs::write(
        cwd.join("package.json"),
        "{\n  \"name\": \"my-pkg\",\n  \"version\": \"0.0.0-dev\"\n}\n",
    )
    .unwrap();
    common::write_stub(&bin, "yarn", common::YARN_STUB);

    Command::cargo_bin("yarn_release")
        .unwrap()
        .current_dir(&cwd)
        .env("PATH", common::stub_path(&bin))
        .args(["prepare", "--version", "1.2.3"])
        .assert()
        .success();

    let manifest = fs::read_to_string(cwd.join("package.json")).unwrap();
    assert!(manifest.contains("\"version\": \"1.2.3\""));
}

#[test]
fn verify_auth_without_credentials_reports_the_registry() {
    let tmp = tempfile::tempdir().unwrap();
    let cwd = tmp.path().join("work");
    fs::create_dir_all(&cwd).unwrap();
    fs::write(cwd.join("package.json"), "{\n  \"name\": \"my-pkg\"\n}\n").unwrap();

    Command::cargo_bin("yarn_release")
        .unwrap()
        .current_dir(&cwd)
        .env_remove("NPM_TOKEN")
        .env_remove("NPM_USERNAME")
        .env_remove("NPM_PASSWORD")
        .env_remove("NPM_EMAIL")
        .env_remove("NPM_CONFIG_USERCONFIG")
        .env_remove("NPM_CONFIG_REGISTRY")
        .arg("verify-auth")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No npm token specified"))
        .stderr(predicate::str::contains("registry.npmjs.org"));
}

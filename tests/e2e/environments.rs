use super::test_predicates::{contains_error, contains_success_message};
use super::*;

#[test]
fn create_writes_empty_environment() {
    let ctx = TestContext::new();

    ctx.tip()
        .args(["create", "dev"])
        .assert()
        .success()
        .stdout(contains_success_message());

    let content = std::fs::read_to_string(ctx.environment_file("dev")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert!(value.as_object().unwrap().is_empty());
}

#[test]
fn create_refuses_existing_environment() {
    let ctx = TestContext::new();
    ctx.create("dev");

    ctx.tip()
        .args(["create", "dev"])
        .assert()
        .failure()
        .stderr(contains_error("already exists"));
}

#[test]
fn create_rejects_bad_names() {
    let ctx = TestContext::new();

    ctx.tip()
        .args(["create", "a/b"])
        .assert()
        .failure()
        .stderr(contains_error("Configuration error"));
}

#[test]
fn add_and_list_packages() {
    let ctx = TestContext::new();
    ctx.create("dev");

    ctx.tip()
        .args(["add", "-e", "dev", "requests==2.31.0", "six==1.16.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added requests==2.31.0"));

    ctx.tip()
        .args(["list", "-e", "dev"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("requests 2.31.0").and(predicate::str::contains("six 1.16.0")),
        );
}

#[test]
fn add_conflicting_version_fails_without_saving() {
    let ctx = TestContext::new();
    ctx.create("dev");
    ctx.tip()
        .args(["add", "-e", "dev", "six==1.16.0"])
        .assert()
        .success();

    ctx.tip()
        .args(["add", "-e", "dev", "attrs==23.1.0", "six==1.15.0"])
        .assert()
        .failure()
        .stderr(contains_error("version 1.16.0").and(predicate::str::contains("--replace")));

    let content = std::fs::read_to_string(ctx.environment_file("dev")).unwrap();
    assert!(content.contains("1.16.0"));
    assert!(!content.contains("attrs"));
}

#[test]
fn add_with_replace_switches_version() {
    let ctx = TestContext::new();
    ctx.create("dev");
    ctx.tip()
        .args(["add", "-e", "dev", "six==1.16.0"])
        .assert()
        .success();

    ctx.tip()
        .args(["add", "-e", "dev", "--replace", "six==1.15.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Replaced six==1.16.0"));

    ctx.tip()
        .args(["list", "-e", "dev"])
        .assert()
        .success()
        .stdout(predicate::str::contains("six 1.15.0"));
}

#[test]
fn add_from_another_environment() {
    let ctx = TestContext::new();
    ctx.create("base");
    ctx.create("dev");
    ctx.tip()
        .args(["add", "-e", "base", "six==1.16.0", "attrs==23.1.0"])
        .assert()
        .success();

    ctx.tip()
        .args(["add", "-e", "dev", "--from", "base"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 2 package(s) from 'base'"));
}

#[test]
fn add_malformed_specifier() {
    let ctx = TestContext::new();
    ctx.create("dev");

    ctx.tip()
        .args(["add", "-e", "dev", "six>=1.0"])
        .assert()
        .failure()
        .stderr(contains_error("Malformed package specifier"));
}

#[test]
fn remove_reports_mismatch_and_absent() {
    let ctx = TestContext::new();
    ctx.create("dev");
    ctx.tip()
        .args(["add", "-e", "dev", "six==1.16.0", "attrs==23.1.0"])
        .assert()
        .success();

    ctx.tip()
        .args(["remove", "-e", "dev", "six==1.15.0", "idna==3.4", "attrs==23.1.0"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("the environment has 'six==1.16.0'")
                .and(predicate::str::contains("'idna' is not in the environment"))
                .and(predicate::str::contains("Removed attrs==23.1.0")),
        );

    ctx.tip()
        .args(["list", "-e", "dev"])
        .assert()
        .success()
        .stdout(predicate::str::contains("six 1.16.0").and(predicate::str::contains("attrs").not()));
}

#[test]
fn activate_makes_environment_default() {
    let ctx = TestContext::new();
    ctx.create("dev");

    ctx.tip()
        .args(["activate", "dev"])
        .assert()
        .success()
        .stdout(contains_success_message());

    ctx.tip()
        .args(["add", "six==1.16.0"])
        .assert()
        .success();
    ctx.tip()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("active environment: dev"));
    ctx.tip()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("six 1.16.0"));
}

#[test]
fn activate_unknown_environment() {
    let ctx = TestContext::new();

    ctx.tip()
        .args(["activate", "nope"])
        .assert()
        .failure()
        .stderr(contains_error("not found"));
}

#[test]
fn commands_without_environment_fail() {
    let ctx = TestContext::new();

    ctx.tip()
        .args(["add", "six==1.16.0"])
        .assert()
        .failure()
        .stderr(contains_error("no active environment"));
}

#[test]
fn delete_clears_active_environment() {
    let ctx = TestContext::new();
    ctx.create("dev");
    ctx.tip().args(["activate", "dev"]).assert().success();

    ctx.tip()
        .args(["delete", "dev", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted environment 'dev'"));

    assert!(!ctx.environment_file("dev").exists());
    ctx.tip()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("active environment: (none)"));
}

#[test]
fn delete_unknown_environment() {
    let ctx = TestContext::new();

    ctx.tip()
        .args(["delete", "nope", "--yes"])
        .assert()
        .failure()
        .stderr(contains_error("not found"));
}

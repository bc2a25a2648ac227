use super::test_predicates::{contains_error, contains_success_message};
use super::*;

#[test]
fn config_set_and_unset() {
    let ctx = TestContext::new();
    let cache = ctx.temp.child("cache");

    ctx.tip()
        .args(["config", "set", "cache_dir"])
        .arg(cache.path())
        .assert()
        .success()
        .stdout(contains_success_message());

    ctx.tip()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "cache directory: {}",
            cache.path().display()
        )));

    ctx.tip()
        .args(["config", "unset", "cache_dir"])
        .assert()
        .success();
    ctx.tip()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("cache directory: (disabled)"));
}

#[test]
fn config_rejects_unknown_key() {
    let ctx = TestContext::new();

    ctx.tip()
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure()
        .stderr(contains_error("Unknown config key 'colour'"));
}

#[test]
fn config_relative_site_packages() {
    let ctx = TestContext::new();

    ctx.tip()
        .args(["config", "set", "site_packages_dir", "pkgs"])
        .assert()
        .success();

    ctx.tip()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "site-packages directory: {}",
            ctx.tip_home.join("pkgs").display()
        )));
}

#[test]
fn cache_dir_from_environment_variable() {
    let ctx = TestContext::new();
    let cache = ctx.temp.child("env-cache");

    ctx.tip()
        .env("TIP_CACHE_DIR", cache.path())
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(cache.path().display().to_string()));
}

#[test]
fn cache_clear_when_disabled() {
    let ctx = TestContext::new();

    ctx.tip()
        .args(["cache", "clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache is disabled"));
}

#[test]
fn cache_clear_removes_entries() {
    let ctx = TestContext::new();
    let cache = ctx.temp.child("cache");
    cache.child("six/1.16.0").create_dir_all().unwrap();
    cache.child("six/1.16.0/six.py").write_str("").unwrap();
    ctx.tip()
        .args(["config", "set", "cache_dir"])
        .arg(cache.path())
        .assert()
        .success();

    ctx.tip()
        .args(["cache", "clear"])
        .assert()
        .success()
        .stdout(contains_success_message());

    assert!(!cache.path().join("six").exists());
}

use super::test_predicates::{contains_error, contains_success_message};
use super::*;

#[test]
fn list_installed_groups_versions() {
    let ctx = TestContext::new();
    ctx.fake_install("six", "1.15.0");
    ctx.fake_install("six", "1.16.0");
    ctx.fake_install("attrs", "23.1.0");

    let output = ctx.tip().args(["list", "--installed"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    // First line is the store root
    let listing: String = stdout.lines().skip(1).collect::<Vec<_>>().join("\n");

    let attrs = listing.find("attrs").unwrap();
    let six = listing.find("six").unwrap();
    assert!(attrs < six);
    assert_eq!(listing.matches("six").count(), 1);
    assert!(listing.contains("1.15.0") && listing.contains("1.16.0"));
}

#[test]
fn list_rejects_env_with_installed() {
    let ctx = TestContext::new();
    ctx.create("dev");

    ctx.tip()
        .args(["list", "--installed", "-e", "dev"])
        .assert()
        .failure()
        .stderr(contains_error("At most one of"));
}

#[test]
fn uninstall_removes_store_entry() {
    let ctx = TestContext::new();
    ctx.fake_install("six", "1.16.0");

    ctx.tip()
        .args(["uninstall", "six==1.16.0"])
        .assert()
        .success()
        .stdout(contains_success_message());

    assert!(!ctx.tip_home.join("site-packages/six/1.16.0").exists());
}

#[test]
fn uninstall_skips_missing_packages() {
    let ctx = TestContext::new();

    ctx.tip()
        .args(["uninstall", "ghost==0.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not installed, skipping"));
}

#[test]
fn uninstall_validates_every_specifier_first() {
    let ctx = TestContext::new();
    ctx.fake_install("six", "1.16.0");

    ctx.tip()
        .args(["uninstall", "six==1.16.0", "broken"])
        .assert()
        .failure()
        .stderr(contains_error("Malformed package specifier 'broken'"));

    assert!(ctx.tip_home.join("site-packages/six/1.16.0").exists());
}

#[test]
fn uninstall_refuses_paths_outside_store() {
    let ctx = TestContext::new();
    ctx.fake_install("x", "1.0");
    // site-packages/x/../../victim
    ctx.temp.child("tip/victim/keep").create_dir_all().unwrap();
    let victim = ctx.temp.child("tip/victim/keep/data.txt");
    victim.write_str("keep me").unwrap();

    ctx.tip()
        .args(["uninstall", "x==../../victim"])
        .assert()
        .failure()
        .stderr(contains_error("Malformed package specifier"));

    victim.assert("keep me");
    assert!(ctx.tip_home.join("site-packages/x/1.0").exists());
}

#[test]
fn install_rejects_specs_with_env() {
    let ctx = TestContext::new();
    ctx.create("dev");

    ctx.tip()
        .args(["install", "-e", "dev", "six==1.16.0"])
        .assert()
        .failure()
        .stderr(contains_error("At most one of"));
}

#[test]
fn dependencies_reports_uninstalled_packages() {
    let ctx = TestContext::new();
    ctx.create("dev");
    ctx.tip()
        .args(["add", "-e", "dev", "six==1.16.0"])
        .assert()
        .success();

    ctx.tip()
        .args(["dependencies", "-e", "dev"])
        .assert()
        .success()
        .stdout(predicate::str::contains("six==1.16.0 is not installed"));
}

#[test]
fn run_requires_installed_packages() {
    let ctx = TestContext::new();
    ctx.create("dev");
    ctx.tip()
        .args(["add", "-e", "dev", "six==1.16.0"])
        .assert()
        .success();

    ctx.tip()
        .args(["run", "-e", "dev", "-c", "import six"])
        .assert()
        .failure()
        .stderr(contains_error("'six==1.16.0' is not installed"));
}

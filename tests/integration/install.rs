//! Installing through the resolver into a real store

use super::common::TestHome;
use tip::core::TipError;
use tip::environment::Environment;
use tip::package::PackageSpecifier;
use tip::resolver::dependency_report;

fn seed(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn spec(text: &str) -> PackageSpecifier {
    PackageSpecifier::parse(text).unwrap()
}

#[test]
fn test_install_with_dependency() {
    let home = TestHome::new().with_app_and_lib();

    let resolution = home.container.resolver().resolve(&seed(&["app==1.0"])).unwrap();

    assert_eq!(resolution.installed, vec![spec("app==1.0"), spec("lib==2.0")]);
    assert!(home.site_packages().join("app/1.0/app/__init__.py").exists());
    assert!(home.site_packages().join("lib/2.0/lib/__init__.py").exists());

    let store = home.container.store();
    assert_eq!(store.dependencies_of(&spec("app==1.0")).unwrap(), vec![spec("lib==2.0")]);
    assert!(store.dependencies_of(&spec("lib==2.0")).unwrap().is_empty());
}

#[cfg(unix)]
#[test]
fn test_install_mounts_links() {
    let home = TestHome::new().with_app_and_lib();
    home.container.resolver().resolve(&seed(&["app==1.0"])).unwrap();

    let app_link = home.links().join("app");
    let lib_link = home.links().join("lib");
    assert!(app_link.symlink_metadata().unwrap().file_type().is_symlink());
    assert!(lib_link.symlink_metadata().unwrap().file_type().is_symlink());
    assert!(app_link.join("__init__.py").exists());

    let names: Vec<String> = home
        .container
        .link_space()
        .entries()
        .unwrap()
        .into_iter()
        .map(|entry| entry.name)
        .collect();
    assert_eq!(names, ["app", "lib"]);
}

#[test]
fn test_install_is_idempotent() {
    let home = TestHome::new().with_app_and_lib();
    let resolver = home.container.resolver();

    resolver.resolve(&seed(&["app==1.0"])).unwrap();
    let again = resolver.resolve(&seed(&["app==1.0"])).unwrap();

    assert!(again.installed.is_empty());
    assert_eq!(again.skipped, vec![spec("app==1.0")]);
    assert_eq!(home.installer.install_count("app==1.0"), 1);
    assert_eq!(home.installer.install_count("lib==2.0"), 1);
}

#[test]
fn test_install_cycle_terminates() {
    let home = TestHome::new();
    home.installer.add_package("a==1", &["b==1"]);
    home.installer.add_package("b==1", &["a==1", "b==1"]);

    let resolution = home.container.resolver().resolve(&seed(&["a==1"])).unwrap();

    assert_eq!(resolution.installed, vec![spec("a==1"), spec("b==1")]);
    assert_eq!(home.installer.calls(), ["a==1", "b==1"]);
}

#[test]
fn test_failed_install_leaves_nothing_behind() {
    let home = TestHome::new().with_app_and_lib();
    home.installer.fail_on("lib==2.0", "no such distribution");

    let err = home.container.resolver().resolve(&seed(&["app==1.0"])).unwrap_err();

    match err {
        TipError::InstallFailed { spec, cause } => {
            assert_eq!(spec, "lib==2.0");
            assert!(cause.contains("no such distribution"));
        }
        other => panic!("unexpected error: {other}"),
    }
    // app finished before lib was attempted
    assert!(home.site_packages().join("app/1.0").is_dir());
    assert!(!home.site_packages().join("lib/2.0").exists());

    let leftovers: Vec<_> = std::fs::read_dir(home.site_packages().join("lib"))
        .map(|entries| entries.flatten().collect())
        .unwrap_or_default();
    assert!(leftovers.is_empty());
}

#[test]
fn test_install_environment_packages() {
    let home = TestHome::new().with_app_and_lib();
    let mut environment = Environment::new("dev");
    environment.add_package(&spec("app==1.0"), false).unwrap();
    home.container.environments().save(&environment, false).unwrap();

    let loaded = home.container.load_environment(Some("dev")).unwrap();
    let mut announced = Vec::new();
    let resolution = home
        .container
        .resolver()
        .resolve_environment(&[], &loaded, &mut |spec| announced.push(spec.to_string()))
        .unwrap();

    assert_eq!(resolution.visited(), 2);
    assert_eq!(announced, ["app==1.0", "lib==2.0"]);

    let report = dependency_report(&home.container.store(), &loaded);
    assert_eq!(report.missing, vec![spec("lib==2.0")]);
    assert!(report.skipped.is_empty());
}

#[test]
fn test_install_populates_cache() {
    let home = TestHome::with_cache().with_app_and_lib();
    home.container.resolver().resolve(&seed(&["app==1.0"])).unwrap();

    let cache = home.container.cache();
    let entry = cache.entry_path("app", "1.0").unwrap();
    assert!(entry.join("app/__init__.py").exists());

    cache.clear().unwrap();
    assert!(!entry.exists());
    // The store keeps its copy
    assert!(home.site_packages().join("app/1.0/app/__init__.py").exists());
}

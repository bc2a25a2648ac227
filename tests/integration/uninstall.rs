//! Removing packages from the store

use super::common::TestHome;
use tip::core::TipError;
use tip::package::PackageSpecifier;

fn spec(text: &str) -> PackageSpecifier {
    PackageSpecifier::parse(text).unwrap()
}

#[test]
fn test_uninstall_keeps_other_versions() {
    let home = TestHome::new();
    home.installer.add_package("lib==1.0", &[]);
    home.installer.add_package("lib==2.0", &[]);
    let store = home.container.store();
    home.container
        .resolver()
        .resolve(&["lib==1.0".to_string(), "lib==2.0".to_string()])
        .unwrap();

    store.uninstall(&spec("lib==1.0")).unwrap();

    assert!(!store.is_installed(&spec("lib==1.0")));
    assert!(store.is_installed(&spec("lib==2.0")));
    assert_eq!(store.list_installed().unwrap(), vec![spec("lib==2.0")]);
}

#[test]
fn test_uninstall_last_version_removes_name_dir() {
    let home = TestHome::with_cache().with_app_and_lib();
    home.container
        .resolver()
        .resolve(&["app==1.0".to_string()])
        .unwrap();
    let store = home.container.store();
    let cached = store.cache().entry_path("lib", "2.0").unwrap();
    assert!(cached.exists());

    store.uninstall(&spec("lib==2.0")).unwrap();

    assert!(!home.site_packages().join("lib").exists());
    assert!(!cached.exists());
    assert_eq!(store.list_installed().unwrap(), vec![spec("app==1.0")]);
}

#[test]
fn test_uninstall_missing_package() {
    let home = TestHome::new();
    let err = home.container.store().uninstall(&spec("ghost==0.1")).unwrap_err();
    assert!(matches!(err, TipError::NotInstalled { .. }));
}

#[test]
fn test_reinstall_after_uninstall() {
    let home = TestHome::new().with_app_and_lib();
    let resolver = home.container.resolver();
    resolver.resolve(&["lib==2.0".to_string()]).unwrap();

    resolver.store().uninstall(&spec("lib==2.0")).unwrap();
    let resolution = resolver.resolve(&["lib==2.0".to_string()]).unwrap();

    assert_eq!(resolution.installed, vec![spec("lib==2.0")]);
    assert_eq!(home.installer.install_count("lib==2.0"), 2);
}

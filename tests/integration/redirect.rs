//! Import redirection over installed environments

use super::common::TestHome;
use std::sync::Arc;
use tempfile::TempDir;
use tip::core::TipError;
use tip::environment::Environment;
use tip::package::PackageSpecifier;
use tip::redirect::{
    write_bootstrap, BootstrapManifest, ImportRedirector, ModuleFinder, MountTable,
    ResolutionChain,
};

fn environment(name: &str, specs: &[&str]) -> Environment {
    let mut environment = Environment::new(name);
    for text in specs {
        environment
            .add_package(&PackageSpecifier::parse(text).unwrap(), false)
            .unwrap();
    }
    environment
}

fn redirector(home: &TestHome, environment: &Environment, fallback: &TempDir) -> ImportRedirector {
    let table =
        MountTable::from_environment(environment, &home.container.store(), &home.container.layout)
            .unwrap();
    ImportRedirector::with_fallback_dir(table, home.container.layout.clone(), fallback.path().to_path_buf())
}

#[test]
fn test_environment_modules_resolve_to_store() {
    let home = TestHome::new().with_app_and_lib();
    home.container
        .resolver()
        .resolve(&["app==1.0".to_string()])
        .unwrap();
    let fallback = TempDir::new().unwrap();

    let env = environment("dev", &["app==1.0", "lib==2.0"]);
    let redirector = redirector(&home, &env, &fallback);

    let lib = redirector.find_spec("lib", None).unwrap();
    assert_eq!(
        lib.origin,
        home.site_packages().join("lib/2.0/lib/__init__.py")
    );
    assert_eq!(
        lib.search_locations,
        vec![home.site_packages().join("lib/2.0/lib")]
    );
    assert!(redirector.find_spec("app", None).is_some());
    assert!(redirector.find_spec("unknown", None).is_none());
}

#[test]
fn test_unlisted_dependency_is_not_visible() {
    let home = TestHome::new().with_app_and_lib();
    home.container
        .resolver()
        .resolve(&["app==1.0".to_string()])
        .unwrap();
    let fallback = TempDir::new().unwrap();

    let env = environment("narrow", &["app==1.0"]);
    let redirector = redirector(&home, &env, &fallback);

    assert!(redirector.find_spec("app", None).is_some());
    assert!(redirector.find_spec("lib", None).is_none());
}

#[test]
fn test_environments_see_their_own_versions() {
    let home = TestHome::new();
    home.installer.add_package("lib==1.0", &[]);
    home.installer.add_package("lib==2.0", &[]);
    home.container
        .resolver()
        .resolve(&["lib==1.0".to_string(), "lib==2.0".to_string()])
        .unwrap();
    let fallback = TempDir::new().unwrap();

    let old = redirector(&home, &environment("old", &["lib==1.0"]), &fallback);
    let new = redirector(&home, &environment("new", &["lib==2.0"]), &fallback);

    assert!(old.find_spec("lib", None).unwrap().origin.starts_with(home.site_packages().join("lib/1.0")));
    assert!(new.find_spec("lib", None).unwrap().origin.starts_with(home.site_packages().join("lib/2.0")));
}

#[test]
fn test_uninstalled_package_fails_mount() {
    let home = TestHome::new();
    let env = environment("dev", &["ghost==0.1"]);

    let err = MountTable::from_environment(&env, &home.container.store(), &home.container.layout)
        .unwrap_err();
    assert!(matches!(err, TipError::NotInstalled { spec } if spec == "ghost==0.1"));
}

#[test]
fn test_registration_in_chain() {
    let home = TestHome::new().with_app_and_lib();
    home.container
        .resolver()
        .resolve(&["app==1.0".to_string()])
        .unwrap();
    let fallback = TempDir::new().unwrap();
    let redirector = Arc::new(redirector(
        &home,
        &environment("dev", &["app==1.0", "lib==2.0"]),
        &fallback,
    ));

    let mut chain = ResolutionChain::new();
    assert!(chain.find_spec("lib", None).is_none());

    assert!(redirector.register(&mut chain));
    assert!(!redirector.register(&mut chain));
    assert_eq!(chain.len(), 1);
    assert!(chain.find_spec("lib", None).is_some());

    assert!(redirector.unregister(&mut chain));
    assert!(chain.is_empty());
    assert!(!redirector.is_registered());
}

#[test]
fn test_bootstrap_manifest_lists_mounted_modules() {
    let home = TestHome::new().with_app_and_lib();
    home.container
        .resolver()
        .resolve(&["app==1.0".to_string()])
        .unwrap();
    let fallback = TempDir::new().unwrap();
    let redirector = redirector(
        &home,
        &environment("dev", &["app==1.0", "lib==2.0"]),
        &fallback,
    );

    let manifest = BootstrapManifest::from_redirector(&redirector);
    let names: Vec<&String> = manifest.modules.keys().collect();
    assert_eq!(names, ["app", "lib"]);

    let out = TempDir::new().unwrap();
    let files = write_bootstrap(out.path(), &manifest).unwrap();
    let written = std::fs::read_to_string(&files.manifest).unwrap();
    assert!(written.contains("lib/2.0/lib/__init__.py"));
    assert!(files.script.exists());
}

//! Running a real interpreter through the bootstrap finder
//!
//! Each test returns early when `python3` is not on `PATH`.

use super::common::TestHome;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tip::environment::Environment;
use tip::package::PackageSpecifier;
use tip::path_setup::{PythonRunner, RunOptions, RunTarget};
use tip::redirect::{ImportRedirector, MountTable};

/// Exit code the snippets use to report `ModuleNotFoundError`
const NOT_FOUND: i32 = 3;

fn python3_available() -> bool {
    if which::which("python3").is_ok() {
        return true;
    }
    eprintln!("python3 not found in PATH, skipping");
    false
}

fn files(entries: &[(&str, &str)]) -> Vec<(String, String)> {
    entries
        .iter()
        .map(|(path, content)| (path.to_string(), content.to_string()))
        .collect()
}

/// `app==1.0` importing `lib==2.0`, a nested `sub` package and an unrelated `other`
fn installed_home() -> TestHome {
    let home = TestHome::new();
    home.installer.add_package_with_files(
        "app==1.0",
        &["lib==2.0"],
        &files(&[("app/__init__.py", "import lib\nLIB_VERSION = lib.VERSION\n")]),
    );
    home.installer.add_package_with_files(
        "lib==2.0",
        &[],
        &files(&[("lib/__init__.py", "VERSION = \"2.0\"\n")]),
    );
    home.installer.add_package_with_files(
        "sub==1.0",
        &[],
        &files(&[
            ("sub/__init__.py", ""),
            ("sub/inner/__init__.py", ""),
            ("sub/inner/deep.py", "VALUE = 42\n"),
        ]),
    );
    home.installer
        .add_package_with_files("other==1.0", &[], &files(&[("other/__init__.py", "")]));
    home.container
        .resolver()
        .resolve(&[
            "app==1.0".to_string(),
            "sub==1.0".to_string(),
            "other==1.0".to_string(),
        ])
        .unwrap();
    home
}

/// Run `source` with `-c` seeing only `specs`, from an empty working directory
fn run_command(home: &TestHome, specs: &[&str], source: &str) -> i32 {
    let mut environment = Environment::new("dev");
    for text in specs {
        environment
            .add_package(&PackageSpecifier::parse(text).unwrap(), false)
            .unwrap();
    }
    let table =
        MountTable::from_environment(&environment, &home.container.store(), &home.container.layout)
            .unwrap();
    let cwd = TempDir::new().unwrap();
    let redirector = Arc::new(ImportRedirector::with_fallback_dir(
        table,
        home.container.layout.clone(),
        cwd.path().to_path_buf(),
    ));

    PythonRunner::new("python3")
        .run_in_environment(
            redirector,
            &RunTarget::Command(source.to_string()),
            &RunOptions::default(),
        )
        .unwrap()
}

fn expect_not_found(module: &str) -> String {
    format!(
        "try:\n    import {module}\nexcept ModuleNotFoundError:\n    raise SystemExit({NOT_FOUND})\n"
    )
}

fn python_str(path: &Path) -> String {
    format!("{:?}", path.display().to_string())
}

#[test]
fn test_environment_package_imports_from_store() {
    if !python3_available() {
        return;
    }
    let home = installed_home();
    let init = home.site_packages().join("lib/2.0/lib/__init__.py");

    let source = format!(
        "import lib\nassert lib.__file__ == {}, lib.__file__\nassert lib.VERSION == \"2.0\"\n",
        python_str(&init)
    );
    assert_eq!(run_command(&home, &["app==1.0", "lib==2.0"], &source), 0);

    let source = "import app\nassert app.LIB_VERSION == \"2.0\"\n";
    assert_eq!(run_command(&home, &["app==1.0", "lib==2.0"], source), 0);
}

#[test]
fn test_nested_submodules_import() {
    if !python3_available() {
        return;
    }
    let home = installed_home();
    let deep = home.site_packages().join("sub/1.0/sub/inner/deep.py");

    let source = format!(
        "import sub.inner.deep\nassert sub.inner.deep.VALUE == 42\nassert sub.inner.deep.__file__ == {}\n",
        python_str(&deep)
    );
    assert_eq!(run_command(&home, &["sub==1.0"], &source), 0);
}

#[test]
fn test_packages_outside_environment_are_hidden() {
    if !python3_available() {
        return;
    }
    let home = installed_home();

    // Installed in the store but not part of the environment
    assert_eq!(
        run_command(&home, &["app==1.0", "lib==2.0"], &expect_not_found("other")),
        NOT_FOUND
    );
    assert_eq!(
        run_command(&home, &["sub==1.0"], &expect_not_found("lib")),
        NOT_FOUND
    );
    assert_eq!(run_command(&home, &["sub==1.0"], "import sub\n"), 0);
}

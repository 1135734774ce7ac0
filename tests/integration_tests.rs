//! Integration tests for modrename
//!
//! These tests verify:
//! - Scanning a multi-module project into a declaration store
//! - Propose/apply over scanned declarations
//! - Span edits that keep every other byte of the build files
//! - Concurrent proposals against a shared store

use modrename::config::ScanConfig;
use modrename::domain::{DeclarationIds, ModulePath, RenameRequest};
use modrename::error::{ApplyError, ManifestError};
use modrename::manifest::{
    detect_build_files, parse_settings, scan_build_file, EditPlan, ManifestWriter, TextEdit,
};
use modrename::parser::{parse, serialize};
use modrename::rename::{apply, propagate, validate, DeclarationStore, SharedDeclarationStore};
use std::fs;
use std::path::Path;
use std::thread;
use tempfile::TempDir;

/// Test fixture directory creation helper
fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Android-style project with Groovy and Kotlin build files
fn create_android_project() -> TempDir {
    let dir = create_test_dir();
    let root = dir.path();
    write(
        root,
        "settings.gradle.kts",
        "rootProject.name = \"demo\"\ninclude(\":app\", \":app:feature\", \":app:featureX\")\ninclude(\":core\")\n",
    );
    write(
        root,
        "app/build.gradle.kts",
        r#"plugins {
    id("com.android.application")
}

dependencies {
    implementation(project(":app:feature"))
    implementation(project(":app:featureX"))
    implementation(project(":core"))
    testImplementation(project(path = ":app:feature", configuration = "testFixtures"))
}
"#,
    );
    write(
        root,
        "app/feature/build.gradle",
        "dependencies {\n    api project(':core')\n}\n",
    );
    write(
        root,
        "app/featureX/build.gradle",
        "dependencies {\n    api project( ':app: feature' )\n}\n",
    );
    write(root, "core/build.gradle", "// no dependencies\n");
    dir
}

fn scan_store(root: &Path) -> DeclarationStore {
    let mut ids = DeclarationIds::new();
    let mut store = DeclarationStore::new();
    for info in detect_build_files(root, &ScanConfig::default()) {
        if info.is_settings() {
            continue;
        }
        let outcome = scan_build_file(&info, &mut ids).unwrap();
        assert!(outcome.errors.is_empty());
        for declaration in outcome.declarations {
            store.insert(declaration);
        }
    }
    store
}

mod codec {
    use super::*;

    #[test]
    fn test_round_trip_preserves_formatting() {
        for text in [":", ":app", ":app:feature", " :app : feature ", "lib", ":a\\$b", ":x\\:y"] {
            assert_eq!(serialize(&parse(text).unwrap()), text);
        }
    }

    #[test]
    fn test_parse_example() {
        let path = parse(":app:feature").unwrap();
        assert_eq!(path.names(), vec!["app", "feature"]);
    }

    #[test]
    fn test_malformed_paths() {
        for text in ["", "   ", "::", ":app:", ":a\"b", ":a\\nb", ":a\\"] {
            assert!(parse(text).is_err(), "{text:?} should be rejected");
        }
    }
}

mod scanning {
    use super::*;

    #[test]
    fn test_scan_android_project() {
        let dir = create_android_project();
        let store = scan_store(dir.path());

        assert_eq!(store.len(), 6);
        let owners: Vec<_> = store.iter().map(|d| d.owning_module().to_string()).collect();
        assert!(owners.contains(&":app".to_string()));
        assert!(owners.contains(&":app:featureX".to_string()));

        let fixture = store
            .iter()
            .find(|d| d.target_configuration().is_some())
            .unwrap();
        assert_eq!(fixture.configuration(), "testImplementation");
        assert_eq!(fixture.target_configuration(), Some("testFixtures"));
    }

    #[test]
    fn test_settings_includes() {
        let dir = create_android_project();
        let path = dir.path().join("settings.gradle.kts");
        let settings = parse_settings(&fs::read_to_string(&path).unwrap(), &path);

        assert_eq!(settings.includes.len(), 4);
        assert!(settings.includes_module(&ModulePath::absolute(["app", "feature"])));
        assert!(!settings.includes_module(&ModulePath::absolute(["feature"])));
    }
}

mod rename_flow {
    use super::*;

    #[test]
    fn test_propagate_matches_exact_module_only() {
        let dir = create_android_project();
        let store = scan_store(dir.path());
        let request = RenameRequest::parse(":app:feature", "login").unwrap();

        let change_set = propagate(&request, store.iter());

        // Two references from :app plus the padded one from :app:featureX
        assert_eq!(change_set.len(), 3);
        for entry in change_set.entries() {
            assert_eq!(entry.proposed().leaf(), Some("login"));
        }
    }

    #[test]
    fn test_apply_then_write_preserves_bytes() {
        let dir = create_android_project();
        let root = dir.path();
        let mut store = scan_store(root);
        let request = RenameRequest::parse(":app:feature", "login").unwrap();

        let change_set = store.propose(&request);
        let mut plan = EditPlan::new();
        for entry in change_set.entries() {
            let span = store.get(entry.id()).unwrap().origin().unwrap().clone();
            plan.add(TextEdit::new(
                span,
                entry.expected().to_string(),
                entry.proposed().to_string(),
            ));
        }
        let prepared = plan.prepare().unwrap();
        assert_eq!(apply(change_set, &mut store).unwrap(), 3);
        ManifestWriter::new(false).write_all(&prepared).unwrap();

        let app = fs::read_to_string(root.join("app/build.gradle.kts")).unwrap();
        assert!(app.contains("implementation(project(\":app:login\"))"));
        assert!(app.contains("implementation(project(\":app:featureX\"))"));
        assert!(app.contains("project(path = \":app:login\", configuration = \"testFixtures\")"));

        let padded = fs::read_to_string(root.join("app/featureX/build.gradle")).unwrap();
        assert_eq!(padded, "dependencies {\n    api project( ':app: login' )\n}\n");

        let untouched = fs::read_to_string(root.join("app/feature/build.gradle")).unwrap();
        assert_eq!(untouched, "dependencies {\n    api project(':core')\n}\n");
    }

    #[test]
    fn test_stale_file_aborts_before_writing() {
        let dir = create_android_project();
        let root = dir.path();
        let store = scan_store(root);
        let request = RenameRequest::parse(":core", "base").unwrap();

        let change_set = store.propose(&request);
        let mut plan = EditPlan::new();
        for entry in change_set.entries() {
            let span = store.get(entry.id()).unwrap().origin().unwrap().clone();
            plan.add(TextEdit::new(
                span,
                entry.expected().to_string(),
                entry.proposed().to_string(),
            ));
        }

        // Someone edits a file between scan and write
        write(
            root,
            "app/feature/build.gradle",
            "dependencies {\n    api project(':kore')\n}\n",
        );

        let err = plan.prepare().unwrap_err();
        assert!(matches!(err, ManifestError::StaleFile { .. }));
        let app = fs::read_to_string(root.join("app/build.gradle.kts")).unwrap();
        assert!(app.contains("project(\":core\")"));
    }

    #[test]
    fn test_validate_rejects_concurrent_removal() {
        let dir = create_android_project();
        let mut store = scan_store(dir.path());
        let request = RenameRequest::parse(":core", "base").unwrap();
        let change_set = store.propose(&request);

        let victim = change_set.entries()[0].id();
        store.remove(victim);
        let before = store.clone();

        let err = validate(change_set, &mut store).unwrap_err();
        assert_eq!(err, ApplyError::missing(victim));
        assert_eq!(store, before);
    }
}

mod concurrency {
    use super::*;

    #[test]
    fn test_readers_propose_while_writer_applies() {
        let dir = create_android_project();
        let shared = SharedDeclarationStore::new(scan_store(dir.path()));
        let request = RenameRequest::parse(":core", "base").unwrap();

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                let request = request.clone();
                thread::spawn(move || shared.propose(&request).len())
            })
            .collect();

        let change_set = shared.propose(&request);
        let applied = shared.apply(change_set).unwrap();
        assert_eq!(applied, 2);

        for reader in readers {
            // Either before or after the apply, never half way
            let seen = reader.join().unwrap();
            assert!(seen == 2 || seen == 0);
        }
        assert!(shared.propose(&request).is_empty());
    }
}

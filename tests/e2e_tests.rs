//! End-to-end tests for the modrename CLI
//!
//! These tests verify:
//! - Dry-run mode leaves files unchanged
//! - CLI produces correct JSON output schema
//! - Exit codes are correct for various scenarios
//! - Error messages for rejected renames

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SETTINGS: &str = "rootProject.name = 'demo'\ninclude ':app', ':lib', ':app:feature'\n";
const APP_BUILD: &str = r#"plugins {
    id 'java'
}

dependencies {
    implementation project(':lib')
    implementation project(':app:feature')
    testImplementation 'junit:junit:4.13.2'
}
"#;
const FEATURE_BUILD: &str = "dependencies {\n    api(project(\":lib\"))\n}\n";

/// Create a test project with three modules
fn create_test_project() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let root = temp_dir.path();
    fs::write(root.join("settings.gradle"), SETTINGS).unwrap();
    fs::create_dir_all(root.join("app/feature")).unwrap();
    fs::create_dir_all(root.join("lib")).unwrap();
    fs::write(root.join("app/build.gradle"), APP_BUILD).unwrap();
    fs::write(root.join("app/feature/build.gradle.kts"), FEATURE_BUILD).unwrap();
    fs::write(root.join("lib/build.gradle"), "plugins {\n    id 'java-library'\n}\n").unwrap();
    temp_dir
}

fn modrename(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("modrename").expect("binary should be built");
    cmd.arg("--root").arg(root);
    cmd
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

mod dry_run_tests {
    use super::*;

    /// Test that dry-run mode does not modify any files
    #[test]
    fn test_dry_run_leaves_files_unchanged() {
        let temp_dir = create_test_project();
        let root = temp_dir.path();

        modrename(root)
            .args(["--dry-run", ":lib", "core"])
            .assert()
            .success()
            .stdout(predicate::str::contains("(dry-run)"))
            .stdout(predicate::str::contains(":lib -> :core"));

        assert_eq!(read(root, "settings.gradle"), SETTINGS);
        assert_eq!(read(root, "app/build.gradle"), APP_BUILD);
        assert_eq!(read(root, "app/feature/build.gradle.kts"), FEATURE_BUILD);
    }

    #[test]
    fn test_dry_run_with_quiet_mode() {
        let temp_dir = create_test_project();

        modrename(temp_dir.path())
            .args(["-n", "-q", ":lib", "core"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }
}

mod rename_tests {
    use super::*;

    #[test]
    fn test_rename_rewrites_references() {
        let temp_dir = create_test_project();
        let root = temp_dir.path();

        modrename(root)
            .args([":lib", "core"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Renamed :lib -> :core (2 references, 3 files)"));

        assert_eq!(
            read(root, "settings.gradle"),
            "rootProject.name = 'demo'\ninclude ':app', ':core', ':app:feature'\n"
        );
        assert_eq!(read(root, "app/build.gradle"), APP_BUILD.replace("':lib'", "':core'"));
        assert_eq!(
            read(root, "app/feature/build.gradle.kts"),
            "dependencies {\n    api(project(\":core\"))\n}\n"
        );
        // Directory renames are left to the caller
        assert!(root.join("lib").is_dir());
    }

    #[test]
    fn test_rename_does_not_touch_prefix_matches() {
        let temp_dir = create_test_project();
        let root = temp_dir.path();
        fs::write(
            root.join("settings.gradle"),
            "include ':app', ':lib', ':app:feature', ':app:featureX'\n",
        )
        .unwrap();
        fs::create_dir_all(root.join("app/featureX")).unwrap();
        fs::write(
            root.join("app/featureX/build.gradle"),
            "dependencies {\n    api project(':app:featureX')\n}\n",
        )
        .unwrap();

        modrename(root)
            .args([":app:feature", "login"])
            .assert()
            .success();

        assert!(read(root, "app/build.gradle").contains("project(':app:login')"));
        assert_eq!(
            read(root, "app/featureX/build.gradle"),
            "dependencies {\n    api project(':app:featureX')\n}\n"
        );
        assert_eq!(
            read(root, "settings.gradle"),
            "include ':app', ':lib', ':app:login', ':app:featureX'\n"
        );
    }

    #[test]
    fn test_diff_output_mode() {
        let temp_dir = create_test_project();

        modrename(temp_dir.path())
            .args(["-n", "--diff", ":app:feature", "login"])
            .assert()
            .success()
            .stdout(predicate::str::contains("--- a/app/build.gradle"))
            .stdout(predicate::str::contains("-    implementation project(':app:feature')"))
            .stdout(predicate::str::contains("+    implementation project(':app:login')"));
    }

    #[test]
    fn test_verbose_mode() {
        let temp_dir = create_test_project();

        modrename(temp_dir.path())
            .args(["-n", "--verbose", ":lib", "core"])
            .assert()
            .success()
            .stderr(predicate::str::contains("modrename v"))
            .stderr(predicate::str::contains("Mode: dry-run"));
    }
}

mod json_output_tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_json_output_schema() {
        let temp_dir = create_test_project();

        let output = modrename(temp_dir.path())
            .args(["-n", "--json", ":lib", "core"])
            .output()
            .expect("Failed to execute command");
        assert!(output.status.success());

        let json: Value = serde_json::from_slice(&output.stdout).expect("Output should be valid JSON");
        assert_eq!(json["dry_run"], true);
        assert_eq!(json["old_path"], ":lib");
        assert_eq!(json["new_path"], ":core");
        assert_eq!(json["applied"], 2);
        assert!(json["warnings"].is_array());
        assert!(json["errors"].as_array().unwrap().is_empty());

        let files = json["files"].as_array().unwrap();
        assert_eq!(files.len(), 3);
        let app = files
            .iter()
            .find(|f| f["path"] == "app/build.gradle")
            .expect("app/build.gradle should be listed");
        assert_eq!(app["changes"][0]["line"], 6);
        assert_eq!(app["changes"][0]["after"], "    implementation project(':core')");
    }

    #[test]
    fn test_json_output_no_references() {
        let temp_dir = create_test_project();

        let output = modrename(temp_dir.path())
            .args(["-n", "--json", "--no-settings", ":unused", "other"])
            .output()
            .expect("Failed to execute command");
        assert!(output.status.success());

        let json: Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["applied"], 0);
        assert!(json["files"].as_array().unwrap().is_empty());
    }
}

mod exit_code_tests {
    use super::*;

    #[test]
    fn test_exit_code_help() {
        Command::cargo_bin("modrename")
            .unwrap()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("modrename"));
    }

    #[test]
    fn test_exit_code_version() {
        Command::cargo_bin("modrename")
            .unwrap()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("modrename "));
    }

    #[test]
    fn test_exit_code_missing_arguments() {
        Command::cargo_bin("modrename")
            .unwrap()
            .assert()
            .code(2);
    }

    #[test]
    fn test_exit_code_root_module() {
        let temp_dir = create_test_project();

        modrename(temp_dir.path())
            .args([":", "renamed"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Error: can't rename root module"));
    }

    #[test]
    fn test_exit_code_separator_in_name() {
        let temp_dir = create_test_project();

        modrename(temp_dir.path())
            .args([":lib", "a:b"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("must not contain the path separator"));
    }

    #[test]
    fn test_exit_code_module_not_included() {
        let temp_dir = create_test_project();

        modrename(temp_dir.path())
            .args([":missing", "other"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("can't find module ':missing'"));
    }

    #[test]
    fn test_exit_code_module_already_exists() {
        let temp_dir = create_test_project();
        let root = temp_dir.path();

        modrename(root)
            .args([":lib", "app"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("module ':app' already exists"));

        assert_eq!(read(root, "app/build.gradle"), APP_BUILD);
    }

    #[test]
    fn test_exit_code_settings_not_found() {
        let temp_dir = create_test_project();
        fs::remove_file(temp_dir.path().join("settings.gradle")).unwrap();

        modrename(temp_dir.path())
            .args([":lib", "core"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("settings.gradle file not found"));
    }

    #[test]
    fn test_exit_code_nonexistent_root() {
        Command::cargo_bin("modrename")
            .unwrap()
            .args(["--root", "/nonexistent/path/that/does/not/exist", ":lib", "core"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("not a directory"));
    }

    #[test]
    fn test_exit_code_partial_on_malformed_declaration() {
        let temp_dir = create_test_project();
        let root = temp_dir.path();
        fs::write(
            root.join("lib/build.gradle"),
            "dependencies {\n    implementation project(\":${name}\")\n}\n",
        )
        .unwrap();

        modrename(root)
            .args([":app:feature", "login"])
            .assert()
            .code(2)
            .stdout(predicate::str::contains("error: "));

        assert!(read(root, "app/build.gradle").contains("project(':app:login')"));
    }

    #[test]
    fn test_exit_code_conflicting_options() {
        let temp_dir = create_test_project();

        modrename(temp_dir.path())
            .args(["-q", "--verbose", ":lib", "core"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("conflicting options"));
    }
}

mod config_tests {
    use super::*;

    #[test]
    fn test_project_config_disables_settings_update() {
        let temp_dir = create_test_project();
        let root = temp_dir.path();
        fs::write(root.join("modrename.toml"), "[rename]\nupdate_settings = false\n").unwrap();

        modrename(root).args([":lib", "core"]).assert().success();

        assert_eq!(read(root, "settings.gradle"), SETTINGS);
        assert!(read(root, "app/build.gradle").contains("project(':core')"));
    }

    #[test]
    fn test_invalid_config_file() {
        let temp_dir = create_test_project();
        let root = temp_dir.path();
        fs::write(root.join("modrename.toml"), "[scan]\nunknown = 1\n").unwrap();

        modrename(root)
            .args([":lib", "core"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("failed to parse config file"));
    }

    #[test]
    fn test_exclude_option() {
        let temp_dir = create_test_project();
        let root = temp_dir.path();

        modrename(root)
            .args(["--exclude", "feature", ":lib", "core"])
            .assert()
            .success();

        assert_eq!(read(root, "app/feature/build.gradle.kts"), FEATURE_BUILD);
        assert!(read(root, "app/build.gradle").contains("project(':core')"));
    }
}

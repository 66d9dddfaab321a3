//! End-to-end dependency upgrades through `ko upgrade`

mod common;

use common::Harness;
use predicates::prelude::*;

const DEPS_OLD: &str = "//DEPS io.alphalon.kotlin:kotlin-scripting:0.1.0\n";
const DEPS_NEW: &str = "//DEPS io.alphalon.kotlin:kotlin-scripting:0.2.0\n";

#[test]
fn test_upgrade_rewrites_nearby_script() {
    let harness = Harness::new();
    harness.write_script("Build.kts", DEPS_OLD);

    harness
        .ko_here()
        .args(["upgrade", "0.2.0"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Upgrading to io.alphalon.kotlin:kotlin-scripting:0.2.0")
                .and(predicate::str::contains("Upgraded")),
        );

    assert_eq!(harness.read("Build.kts"), DEPS_NEW);
}

#[test]
fn test_upgrade_dry_run_leaves_files_alone() {
    let harness = Harness::new();
    harness.write_script("Build.kts", DEPS_OLD);

    harness
        .ko_here()
        .args(["upgrade", "--dry-run", "0.2.0"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Current Version").and(predicate::str::contains("0.1.0")),
        );

    assert_eq!(harness.read("Build.kts"), DEPS_OLD);
}

#[test]
fn test_upgrade_is_idempotent() {
    let harness = Harness::new();
    harness.write_script("Build.kts", DEPS_OLD);

    harness.ko_here().args(["upgrade", "0.2.0"]).assert().success();
    harness
        .ko_here()
        .args(["upgrade", "0.2.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Could not find any scripts to upgrade"));

    assert_eq!(harness.read("Build.kts"), DEPS_NEW);
}

#[test]
fn test_upgrade_to_current_version_is_noop() {
    let harness = Harness::new();
    harness.write_script("Build.kts", DEPS_NEW);

    harness
        .ko_here()
        .args(["upgrade", "0.2.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Could not find any scripts to upgrade"));

    assert_eq!(harness.read("Build.kts"), DEPS_NEW);
}

#[test]
fn test_upgrade_specific_library() {
    let harness = Harness::new();
    harness.write_script("Tool.kts", "//DEPS io.ktor:ktor-client:1.0.0\n");

    harness
        .ko_here()
        .args(["upgrade", "2.0.0", "io.ktor:ktor-client"])
        .assert()
        .success();

    assert_eq!(harness.read("Tool.kts"), "//DEPS io.ktor:ktor-client:2.0.0\n");
}

#[test]
fn test_upgrade_rejects_malformed_library() {
    let harness = Harness::new();
    harness.write_script("Build.kts", DEPS_OLD);

    harness
        .ko_here()
        .args(["upgrade", "0.2.0", "not-a-library"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("groupId:artifactId"));

    assert_eq!(harness.read("Build.kts"), DEPS_OLD);
}

#[test]
fn test_upgrade_without_version_fails() {
    let harness = Harness::new();
    harness.write_script("Build.kts", DEPS_OLD);

    harness
        .ko_here()
        .arg("upgrade")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("version"));
}

#[test]
fn test_upgrade_defaults_to_framework_version() {
    let harness = Harness::new();
    harness.write_script("Build.kts", DEPS_OLD);

    harness
        .ko_here()
        .env("KO_VERSION", "0.2.0")
        .arg("upgrade")
        .assert()
        .success();

    assert_eq!(harness.read("Build.kts"), DEPS_NEW);
}

#[test]
fn test_upgrade_quiet_prints_nothing() {
    let harness = Harness::new();
    harness.write_script("Build.kts", DEPS_OLD);

    harness
        .ko_here()
        .args(["upgrade", "-q", "0.2.0"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(harness.read("Build.kts"), DEPS_NEW);
}

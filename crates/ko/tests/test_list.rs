//! End-to-end command discovery through `ko list`

mod common;

use common::Harness;
use predicates::prelude::*;

#[test]
fn test_list_shows_directory_commands() {
    let harness = Harness::new();
    harness.write_script("Build.kts", "//CMD build Builds the project\n");
    harness.write_script("Publish.kts", "//CMD publish Publishes artifacts\n");

    harness
        .ko()
        .arg("list")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("build")
                .and(predicate::str::contains("Builds the project"))
                .and(predicate::str::contains("publish")),
        );
}

#[test]
fn test_list_excludes_catch_all_from_directory_scan() {
    let harness = Harness::new();
    harness.write_script("Build.kts", "//CMD build Builds the project\n");
    harness.write_script("ko.kts", "//CMD hello Says hello\n");

    harness
        .ko()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("hello").not());
}

#[test]
fn test_list_includes_catch_all_as_file_entry() {
    let harness = Harness::new();
    let catch_all =
        harness.write_script("ko.kts", "//CMD hello Says hello\n//CMD goodbye Says goodbye\n");

    harness
        .ko_bare()
        .env("KO_SEARCH_PATH", &catch_all)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("hello").and(predicate::str::contains("goodbye")));
}

#[test]
fn test_list_synthesizes_command_for_plain_script() {
    let harness = Harness::new();
    harness.write_script("Deploy.kts", "println(\"deploying\")\n");

    harness
        .ko()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deploy"));
}

#[test]
fn test_list_json_is_sorted_case_insensitive() {
    let harness = Harness::new();
    harness.write_script("Zulu.kts", "//CMD Zulu Last\n");
    harness.write_script("alpha.kts", "//CMD alpha First\n");
    harness.write_script("Mike.kts", "//CMD Mike Middle\n");

    let output = harness
        .ko()
        .args(["list", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let records: Vec<serde_json::Value> = serde_json::from_slice(&output).unwrap();
    let names: Vec<&str> = records
        .iter()
        .filter_map(|record| record["name"].as_str())
        .collect();
    assert_eq!(names, vec!["alpha", "Mike", "Zulu"]);
}

#[test]
fn test_list_without_search_path_finds_nothing() {
    let harness = Harness::new();
    harness
        .ko_bare()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No commands found"));
}

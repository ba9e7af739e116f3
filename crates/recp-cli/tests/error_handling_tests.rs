//! Tests for error messages, suggestions, and exit codes.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn setup() -> (TempDir, Command) {
    let temp = TempDir::new().unwrap();
    let recipes = temp.path().join("recipes");
    fs::create_dir_all(&recipes).unwrap();

    let mut cmd = Command::cargo_bin("recp").unwrap();
    cmd.current_dir(temp.path())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .env("RECP_RECIPES__DIR", &recipes);
    (temp, cmd)
}

fn write_recipe(temp: &TempDir, name: &str, body: &str) {
    fs::write(temp.path().join("recipes").join(format!("{name}.yaml")), body).unwrap();
}

#[test]
fn test_unknown_recipe_is_not_found() {
    let (_temp, mut cmd) = setup();
    cmd.args(["expand", "ghost"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("ghost"))
        .stderr(predicate::str::contains("recp list"));
}

#[test]
fn test_misspelled_transformation_suggests_name() {
    let (temp, mut cmd) = setup();
    write_recipe(
        &temp,
        "typo",
        "steps:\n  - command: \"ls {f}\"\n    run:\n      - dir_fles: { token: \"{f}\", dir: /tmp }\n",
    );

    cmd.args(["expand", "typo"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("dir_fles"))
        .stderr(predicate::str::contains("Did you mean 'dir_files'?"));
}

#[test]
fn test_negative_repeat_is_invalid_parameter() {
    let (temp, mut cmd) = setup();
    write_recipe(
        &temp,
        "neg",
        "steps:\n  - command: echo hi\n    run:\n      - repeat: { n: -1 }\n",
    );

    cmd.args(["expand", "neg"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("-1"));
}

#[test]
fn test_missing_folder_names_path() {
    let (temp, mut cmd) = setup();
    let missing = temp.path().join("no-such-folder");
    write_recipe(
        &temp,
        "missing",
        &format!(
            "steps:\n  - command: \"ls {{f}}\"\n    run:\n      - dir_files: {{ token: \"{{f}}\", dir: {:?} }}\n",
            missing.display().to_string()
        ),
    );

    cmd.args(["expand", "missing"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Folder not found"))
        .stderr(predicate::str::contains("no-such-folder"));
}

#[test]
fn test_add_rejects_yml_extension() {
    let (temp, mut cmd) = setup();
    let source = temp.path().join("recipe.yml");
    fs::write(&source, "steps:\n  - command: echo hi\n").unwrap();

    cmd.arg("add")
        .arg(&source)
        .assert()
        .code(2)
        .stderr(predicate::str::contains(".yaml"));
    assert!(!temp.path().join("recipes").join("recipe.yml").exists());
}

#[test]
fn test_config_set_rejects_missing_folder() {
    let (temp, mut cmd) = setup();
    let config = temp.path().join("config.toml");
    fs::write(&config, "").unwrap();

    cmd.arg("--config")
        .arg(&config)
        .args(["config", "set", "recipes.dir", "/definitely/not/here"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid folder"));
    assert_eq!(fs::read_to_string(&config).unwrap(), "");
}

#[test]
fn test_explicit_missing_config_file() {
    let (temp, mut cmd) = setup();
    cmd.arg("--config")
        .arg(temp.path().join("absent.toml"))
        .arg("list")
        .assert()
        .code(4);
}

#[test]
fn test_unknown_config_key() {
    let (_temp, mut cmd) = setup();
    cmd.args(["config", "get", "nope.nope"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_bad_set_argument_is_usage_error() {
    let (_temp, mut cmd) = setup();
    cmd.args(["expand", "anything", "--set", "novalue"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("KEY=VALUE"));
}

#[test]
fn test_verbose_shows_cause_chain() {
    let (temp, mut cmd) = setup();
    write_recipe(
        &temp,
        "neg",
        "steps:\n  - command: echo hi\n    run:\n      - repeat: { n: -1 }\n",
    );

    cmd.args(["-v", "expand", "neg"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--verbose").not());
}

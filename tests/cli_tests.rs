//! Binary tests for the prelaunch command line

mod common;

use predicates::prelude::*;

use common::{HostBundle, TestGame, prelaunch_cmd, runtime_payload};

#[test]
fn test_help_output() {
    prelaunch_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("launch"))
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("resolve"))
        .stdout(predicate::str::contains("cache"));
}

#[test]
fn test_version_output() {
    prelaunch_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("prelaunch"))
        .stdout(predicate::str::contains("prelaunch.launch.v1.Launch"));
}

#[test]
fn test_completions_output() {
    prelaunch_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("prelaunch"));
}

#[test]
fn test_extract_prints_destination() {
    let game = TestGame::new();
    let bundle = HostBundle::new()
        .dependency("Foo", "lib/foo.bin", b"foo payload")
        .write_to(&game.outside("host.tar"));

    prelaunch_cmd()
        .arg("-g")
        .arg(&game.path)
        .args(["extract", "Foo", "--bundle"])
        .arg(&bundle)
        .assert()
        .success()
        .stdout(predicate::str::contains("foo.bin"));

    let extracted = game.dependencies_dir().join("foo.bin");
    assert_eq!(std::fs::read(extracted).ok(), Some(b"foo payload".to_vec()));
}

#[test]
fn test_extract_undeclared_dependency_fails() {
    let game = TestGame::new();
    let bundle = game.standard_bundle();

    prelaunch_cmd()
        .arg("-g")
        .arg(&game.path)
        .args(["extract", "Nope", "--bundle"])
        .arg(&bundle)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("Nope"));
}

#[test]
fn test_game_dir_from_environment() {
    let game = TestGame::new();
    let bundle = game.standard_bundle();

    prelaunch_cmd()
        .env("PRELAUNCH_GAME_DIR", &game.path)
        .args(["extract", "Runtime", "--bundle"])
        .arg(&bundle)
        .assert()
        .success();

    assert!(game.dependencies_dir().join("runtime.tar").is_file());
}

#[test]
fn test_launch_prints_environment_summary() {
    let game = TestGame::new();
    let bundle = game.standard_bundle();
    std::fs::create_dir_all(game.path.join("mods/alpha")).ok();

    prelaunch_cmd()
        .arg("-g")
        .arg(&game.path)
        .args(["launch", "--bundle"])
        .arg(&bundle)
        .args(["--plugin", "prelaunch.launch.v1.ConsolePlugin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Environment ready"))
        .stdout(predicate::str::contains("runtime.tar"))
        .stdout(predicate::str::contains("alpha"));
}

#[test]
fn test_launch_plugin_from_config() {
    let game = TestGame::new();
    let bundle = game.standard_bundle();
    game.write_config("plugin: prelaunch.launch.v1.ConsolePlugin\n");

    prelaunch_cmd()
        .arg("-g")
        .arg(&game.path)
        .args(["launch", "--bundle"])
        .arg(&bundle)
        .assert()
        .success()
        .stdout(predicate::str::contains("Environment ready"));
}

#[test]
fn test_launch_unknown_plugin_fails() {
    let game = TestGame::new();
    let bundle = game.standard_bundle();

    prelaunch_cmd()
        .arg("-g")
        .arg(&game.path)
        .args(["launch", "--bundle"])
        .arg(&bundle)
        .args(["--plugin", "prelaunch.launch.v1.Unknown"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("prelaunch.launch.v1.Unknown"));
}

#[test]
fn test_launch_without_entry_point_fails() {
    let game = TestGame::new();
    let bundle = HostBundle::new()
        .dependency("Runtime", "lib/runtime.tar", &runtime_payload())
        .write_to(&game.outside("host.tar"));

    prelaunch_cmd()
        .arg("-g")
        .arg(&game.path)
        .args(["launch", "--bundle"])
        .arg(&bundle)
        .assert()
        .failure()
        .stderr(predicate::str::contains("prelaunch.launch.v1.Launch"))
        .stderr(predicate::str::contains("Caused by"));
}

#[test]
fn test_launch_missing_bundle_fails() {
    let game = TestGame::new();

    prelaunch_cmd()
        .arg("-g")
        .arg(&game.path)
        .args(["launch", "--bundle"])
        .arg(game.outside("absent.tar"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_invalid_config_fails() {
    let game = TestGame::new();
    let bundle = game.standard_bundle();
    game.write_config("unknown_key: true\n");

    prelaunch_cmd()
        .arg("-g")
        .arg(&game.path)
        .args(["launch", "--bundle"])
        .arg(&bundle)
        .assert()
        .failure()
        .stderr(predicate::str::contains("prelaunch.yaml"))
        .stderr(predicate::str::contains("unknown_key"));
}

#[test]
fn test_resolve_isolated_symbol() {
    let game = TestGame::new();
    let bundle = game.standard_bundle();

    prelaunch_cmd()
        .arg("-g")
        .arg(&game.path)
        .args(["resolve", "runtime.core.Engine", "--bundle"])
        .arg(&bundle)
        .assert()
        .success()
        .stdout(predicate::str::contains("isolated"))
        .stdout(predicate::str::contains("runtime/core/Engine.sym"));
}

#[test]
fn test_resolve_through_host_location() {
    let game = TestGame::new();
    let bundle = game.standard_bundle();
    let host = common::symbol_dir(&game.outside("libs"), &["app.Main"]);

    prelaunch_cmd()
        .arg("-g")
        .arg(&game.path)
        .args(["resolve", "app.Main", "--bundle"])
        .arg(&bundle)
        .arg("--host")
        .arg(&host)
        .assert()
        .success()
        .stdout(predicate::str::contains("host"));
}

#[test]
fn test_resolve_missing_isolated_symbol_fails() {
    let game = TestGame::new();
    let bundle = game.standard_bundle();

    prelaunch_cmd()
        .arg("-g")
        .arg(&game.path)
        .args(["resolve", "runtime.core.Missing", "--bundle"])
        .arg(&bundle)
        .assert()
        .failure()
        .stderr(predicate::str::contains("runtime.core.Missing"));
}

#[test]
fn test_cache_list_and_clear() {
    let game = TestGame::new();
    let bundle = game.standard_bundle();

    prelaunch_cmd()
        .arg("-g")
        .arg(&game.path)
        .arg("cache")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cache is empty"));

    prelaunch_cmd()
        .arg("-g")
        .arg(&game.path)
        .args(["extract", "Runtime", "--bundle"])
        .arg(&bundle)
        .assert()
        .success();

    prelaunch_cmd()
        .arg("-g")
        .arg(&game.path)
        .args(["cache", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("runtime.tar"));

    prelaunch_cmd()
        .arg("-g")
        .arg(&game.path)
        .args(["cache", "clear", "--only", "runtime.tar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed extracted dependency"));

    assert!(!game.dependencies_dir().join("runtime.tar").exists());
}

#[test]
fn test_cache_clear_unknown_file_fails() {
    let game = TestGame::new();

    prelaunch_cmd()
        .arg("-g")
        .arg(&game.path)
        .args(["cache", "clear", "--only", "missing.tar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found in cache"));
}

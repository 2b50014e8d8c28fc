use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn help_lists_builtin_commands() {
    Command::cargo_bin("herald")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("start"))
        .stdout(contains("stop"))
        .stdout(contains("status"))
        .stdout(contains("route:list"))
        .stdout(contains("plugin:install"));
}

#[test]
fn no_arguments_prints_usage_and_fails() {
    Command::cargo_bin("herald").unwrap().assert().failure().code(2);
}

#[test]
fn unknown_command_is_a_usage_error() {
    Command::cargo_bin("herald")
        .unwrap()
        .arg("no-such-command")
        .assert()
        .failure()
        .code(2);
}

#[test]
fn version_flag_succeeds() {
    Command::cargo_bin("herald")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains("herald"));
}

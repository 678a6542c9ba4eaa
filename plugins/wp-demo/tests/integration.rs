use std::env;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// The demo binary with an environment free of CI and plugin variables.
fn demo() -> Command {
  let mut cmd = cargo_bin_cmd!("wp-demo");
  cmd.env_clear().env("PATH", env::var_os("PATH").unwrap_or_default());
  cmd
}

#[test]
fn prints_version_with_name() {
  demo()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains(format!("wp-demo version={}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn help_lists_metadata_flags() {
  demo()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Woodpecker Repository Flags"))
    .stdout(predicate::str::contains("--auto-tag"));
}

#[test]
fn derives_tags_and_renders_summary() {
  demo()
    .env("CI_REPO", "octo/demo")
    .env("CI_COMMIT_SHA", "abc123")
    .env("CI_COMMIT_REF", "refs/tags/v1.2.3")
    .env("PLUGIN_AUTO_TAG", "true")
    .assert()
    .success()
    .stdout(predicate::str::contains("tags: 1,1.2,1.2.3"))
    .stdout(predicate::str::contains("octo/demo@abc123"));
}

#[test]
fn default_summary_without_repository() {
  demo()
    .env("CI_COMMIT_SHA", "abc123")
    .assert()
    .success()
    .stdout(predicate::str::contains("@abc123"));
}

#[test]
fn renders_labels_in_custom_template() {
  demo()
    .env("PLUGIN_LABELS", r#"{"team":"platform"}"#)
    .env("PLUGIN_TEMPLATE", "owned by {{ labels.team }}")
    .assert()
    .success()
    .stdout(predicate::str::contains("owned by platform"));
}

#[test]
fn invalid_labels_are_rejected() {
  demo()
    .env("PLUGIN_LABELS", "not json")
    .assert()
    .failure()
    .stderr(predicate::str::contains("--labels"));
}

#[test]
fn unknown_log_level_fails() {
  demo()
    .env("PLUGIN_LOG_LEVEL", "loud")
    .assert()
    .failure()
    .stdout(predicate::str::contains("execution failed"))
    .stdout(predicate::str::contains("unknown logging level: loud"));
}

#[cfg(unix)]
#[test]
fn runs_command_with_plugin_environment() {
  demo()
    .env("PLUGIN_COMMAND", "sh,-c,echo greeting=$GREETING")
    .env("PLUGIN_ENVIRONMENT", r#"{"GREETING":"hello"}"#)
    .assert()
    .success()
    .stdout(predicate::str::contains("-c echo greeting=$GREETING"))
    .stdout(predicate::str::contains("greeting=hello"));
}

#[test]
fn docs_include_plugin_arguments() {
  cargo_bin_cmd!("wp-demo-docs")
    .assert()
    .success()
    .stdout(predicate::str::contains("# wp-demo"))
    .stdout(predicate::str::contains("| `auto_tag` | bool |"))
    .stdout(predicate::str::contains("| `tags` | list | `\"latest\"` |"))
    .stdout(predicate::str::contains("| `log_level` | string | `\"info\"` |"));
}

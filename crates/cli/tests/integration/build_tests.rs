//! Tests for the `build` workspace pipeline.

use predicates::prelude::*;
use serial_test::serial;

use super::common::{TestEnv, read};

#[test]
#[serial]
fn build_rewrites_module_and_copies_artifact() {
  let env = TestEnv::new();

  env
    .loosego_cmd()
    .args(["build", "~module=foo/bar", "~copy=out/binary", "-o", "out/binary"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Build complete"))
    .stdout(predicate::str::contains("out/binary"));

  let binary = read(&env.project().join("out/binary"));
  assert!(binary.contains("import \"foo/bar/lib\""), "got: {}", binary);

  let calls = env.calls();
  let args: Vec<&str> = calls.iter().map(|(_, _, a)| a.as_str()).collect();
  assert_eq!(args, vec!["mod download", "mod vendor", "build -o out/binary"]);

  let workspace = calls[2].0.file_name().unwrap().to_str().unwrap().to_string();
  assert!(workspace.starts_with("myapp-"), "workspace {} named after project", workspace);
  assert_eq!(calls[2].0.parent().unwrap(), env.gopath().join("src"));
  assert_eq!(calls[2].1, "off");

  assert!(env.workspaces().is_empty(), "workspace removed");
  assert!(env.project().join("go.mod").exists(), "project manifest untouched");
}

#[test]
#[serial]
fn build_failure_propagates_exit_code() {
  let env = TestEnv::new();

  env
    .loosego_cmd()
    .env("FAKE_GO_EXIT", "7")
    .args(["build", "~copy=out/binary", "-o", "out/binary"])
    .assert()
    .code(7);

  assert_eq!(env.calls().len(), 1, "stops after the failing download");
  assert!(env.workspaces().is_empty());
  assert!(!env.project().join("out/binary").exists());
}

#[test]
#[serial]
fn vendor_moves_rewrite_references() {
  let env = TestEnv::new();
  env.write_file("myapp/vendor/github.com/x/dep/dep.go", "package dep\n");
  env.write_file("myapp/main.go", "package main\n\nimport \"github.com/x/dep\"\n");

  env
    .loosego_cmd()
    .args([
      "build",
      "~moveVendor=github.com/x/dep:internal/dep",
      "~copy=bin/app",
      "-o",
      "bin/app",
    ])
    .assert()
    .success();

  assert_eq!(
    read(&env.project().join("bin/app")),
    "package main\n\nimport \"internal/dep\"\n"
  );
  assert!(env.workspaces().is_empty());
}

#[test]
#[serial]
fn repeated_builds_use_distinct_workspaces() {
  let env = TestEnv::new();

  for _ in 0..2 {
    env.loosego_cmd().args(["build", "."]).assert().success();
  }

  let builds: Vec<_> = env
    .calls()
    .into_iter()
    .filter(|(_, _, args)| args.starts_with("build"))
    .map(|(cwd, _, _)| cwd)
    .collect();
  assert_eq!(builds.len(), 2);
  assert_ne!(builds[0], builds[1]);
}

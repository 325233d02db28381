//! Shared test helpers for CLI integration tests.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Fake `go` used by every test.
///
/// Logs `<cwd>|<GO111MODULE>|<args>` per call, creates `vendor/` on
/// `mod vendor`, copies `main.go` to the `-o` target on `build` and exits
/// with `$FAKE_GO_EXIT` (default 0).
const FAKE_GO: &str = r##"#!/bin/sh
echo "$(pwd)|$GO111MODULE|$*" >> "$FAKE_GO_LOG"
case "$1" in
  mod)
    if [ "$2" = "vendor" ]; then
      mkdir -p vendor
      echo "# vendored" > vendor/modules.txt
    fi
    ;;
  build)
    while [ $# -gt 0 ]; do
      if [ "$1" = "-o" ]; then
        shift
        mkdir -p "$(dirname "$1")"
        cat main.go > "$1"
      fi
      shift
    done
    ;;
esac
exit "${FAKE_GO_EXIT:-0}"
"##;

/// Isolated test environment.
///
/// Each test gets its own project directory (`myapp`), GOPATH and fake toolchain.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// A `myapp` module whose main package imports one of its own packages.
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let env = Self { temp };
    env.write_file("myapp/go.mod", "module myapp\n\ngo 1.21\n");
    env.write_file("myapp/go.sum", "");
    env.write_file(
      "myapp/main.go",
      "package main\n\nimport \"myapp/lib\"\n\nfunc main() { lib.Run() }\n",
    );
    env.write_file("myapp/lib/lib.go", "package lib\n\nfunc Run() {}\n");

    let script = env.root().join("fake-go");
    fs::write(&script, FAKE_GO).unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    env
  }

  pub fn root(&self) -> PathBuf {
    dunce::canonicalize(self.temp.path()).unwrap()
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
  }

  pub fn project(&self) -> PathBuf {
    self.root().join("myapp")
  }

  pub fn gopath(&self) -> PathBuf {
    self.root().join("gopath")
  }

  /// Workspaces currently present under `$GOPATH/src`.
  pub fn workspaces(&self) -> Vec<PathBuf> {
    match fs::read_dir(self.gopath().join("src")) {
      Ok(dir) => dir.map(|e| e.unwrap().path()).collect(),
      Err(_) => Vec::new(),
    }
  }

  /// Logged toolchain calls as `(cwd, GO111MODULE, args)`.
  pub fn calls(&self) -> Vec<(PathBuf, String, String)> {
    let log = fs::read_to_string(self.root().join("fake-go.log")).unwrap_or_default();
    log
      .lines()
      .map(|line| {
        let parts: Vec<&str> = line.splitn(3, '|').collect();
        (PathBuf::from(parts[0]), parts[1].to_string(), parts[2].to_string())
      })
      .collect()
  }

  /// Get a pre-configured Command for the loosego binary.
  ///
  /// Runs in the project directory with:
  /// - `GOPATH`: isolated source root
  /// - `LOOSEGO_GO`: the fake toolchain
  /// - `FAKE_GO_LOG`: where the fake toolchain records its calls
  pub fn loosego_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("loosego");
    cmd.current_dir(self.project());
    cmd.env("GOPATH", self.gopath());
    cmd.env("LOOSEGO_GO", self.root().join("fake-go"));
    cmd.env("FAKE_GO_LOG", self.root().join("fake-go.log"));
    cmd.env_remove("GO111MODULE");
    cmd
  }
}

pub fn read(path: &Path) -> String {
  fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
}

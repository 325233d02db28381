//! Test utilities for loosego-lib.
//!
//! Provides a fake toolchain so pipeline tests run without a Go installation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ToolchainConfig;

/// A shell script standing in for `go`.
///
/// Each invocation appends `<cwd>|<GO111MODULE>|<args>` to `log`. `mod vendor`
/// creates `vendor/modules.txt`; `build -o <file>` writes the contents of
/// `main.go` to `<file>`. A fake installed with `fail_on` exits with status 3
/// when invoked with that verb.
pub struct FakeGo {
  pub script: PathBuf,
  pub log: PathBuf,
}

#[cfg(unix)]
impl FakeGo {
  pub fn install(dir: &Path) -> Self {
    Self::install_with(dir, None)
  }

  pub fn install_with(dir: &Path, fail_on: Option<&str>) -> Self {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-go");
    let log = dir.join("fake-go.log");
    let body = format!(
      r##"#!/bin/sh
echo "$(pwd)|$GO111MODULE|$*" >> "{log}"
verb="$1"
if [ "$verb" = "{fail_on}" ]; then
  exit 3
fi
case "$verb" in
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
exit 0
"##,
      log = log.display(),
      fail_on = fail_on.unwrap_or("<never>"),
    );
    fs::write(&script, body).unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    Self { script, log }
  }

  pub fn config(&self, gopath: &Path) -> ToolchainConfig {
    ToolchainConfig {
      program: self.script.clone(),
      gopath: Some(gopath.as_os_str().to_os_string()),
    }
  }

  /// Logged invocations as `(cwd, GO111MODULE, args)`.
  pub fn calls(&self) -> Vec<(PathBuf, String, String)> {
    let Ok(log) = fs::read_to_string(&self.log) else {
      return Vec::new();
    };
    log
      .lines()
      .map(|line| {
        let mut parts = line.splitn(3, '|');
        let cwd = PathBuf::from(parts.next().unwrap_or_default());
        let mode = parts.next().unwrap_or_default().to_string();
        let args = parts.next().unwrap_or_default().to_string();
        (cwd, mode, args)
      })
      .collect()
  }
}

/// Write `content` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) {
  let path = root.join(rel);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).unwrap();
  }
  fs::write(path, content).unwrap();
}

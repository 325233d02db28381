//! Toolchain subprocess execution.
//!
//! Every toolchain call inherits stdio, so the user sees the toolchain's own
//! output, and runs in an explicit directory with the configured GOPATH.

use std::path::Path;
use std::process::ExitStatus;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

use crate::config::ToolchainConfig;
use crate::consts::{LEGACY_MODE_ENV, SOURCE_ROOT_ENV};

#[derive(Debug, Error)]
pub enum BuildError {
  #[error("failed to start {command}: {source}")]
  Spawn {
    command: String,
    #[source]
    source: std::io::Error,
  },

  #[error("{command} failed with exit code {code:?}")]
  Failed { command: String, code: Option<i32> },
}

/// Handle on the configured toolchain program.
#[derive(Debug, Clone)]
pub struct Toolchain {
  config: ToolchainConfig,
}

impl Toolchain {
  pub fn new(config: ToolchainConfig) -> Self {
    Self { config }
  }

  /// Run the toolchain with `args` in `dir`, adding `env` on top of the inherited environment.
  pub async fn run<S: AsRef<str>>(&self, args: &[S], dir: &Path, env: &[(&str, &str)]) -> Result<(), BuildError> {
    let command = self.describe(args);
    info!(command = %command, dir = %dir.display(), "running toolchain");

    let mut cmd = Command::new(&self.config.program);
    for arg in args {
      let arg: &str = arg.as_ref();
      cmd.arg(arg);
    }
    cmd.current_dir(dir);
    if let Some(gopath) = &self.config.gopath {
      cmd.env(SOURCE_ROOT_ENV, gopath);
    }
    for (key, value) in env {
      cmd.env(key, value);
    }

    debug!(program = %self.config.program.display(), ?env, "spawning process");

    let status = cmd.status().await.map_err(|e| BuildError::Spawn {
      command: command.clone(),
      source: e,
    })?;
    check(command, status)
  }

  /// Build in `workspace` with module resolution forced off.
  pub async fn build(&self, args: &[String], workspace: &Path) -> Result<(), BuildError> {
    self.run(args, workspace, &[LEGACY_MODE_ENV]).await
  }

  /// Forward `args` unchanged, in `dir`, with no overrides.
  pub async fn forward(&self, args: &[String], dir: &Path) -> Result<(), BuildError> {
    self.run(args, dir, &[]).await
  }

  fn describe<S: AsRef<str>>(&self, args: &[S]) -> String {
    let mut parts = vec![self.config.program.display().to_string()];
    for arg in args {
      let arg: &str = arg.as_ref();
      parts.push(arg.to_string());
    }
    parts.join(" ")
  }
}

fn check(command: String, status: ExitStatus) -> Result<(), BuildError> {
  if status.success() {
    Ok(())
  } else {
    Err(BuildError::Failed {
      command,
      code: status.code(),
    })
  }
}

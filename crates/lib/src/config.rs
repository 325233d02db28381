//! Toolchain configuration read from the process environment.

use std::ffi::OsString;
use std::path::PathBuf;

use thiserror::Error;

use crate::consts::{DEFAULT_TOOLCHAIN, SOURCE_ROOT_ENV, TOOLCHAIN_ENV};

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("GOPATH not set - needs GOPATH to be set to build in non module mode")]
  SourceRootUnset,

  #[error("failed to determine working directory: {0}")]
  WorkingDir(#[source] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct ToolchainConfig {
  /// Toolchain program, `go` unless overridden.
  pub program: PathBuf,
  /// Raw GOPATH value, forwarded to every toolchain subprocess.
  pub gopath: Option<OsString>,
}

impl Default for ToolchainConfig {
  fn default() -> Self {
    Self {
      program: PathBuf::from(DEFAULT_TOOLCHAIN),
      gopath: None,
    }
  }
}

impl ToolchainConfig {
  pub fn from_env() -> Self {
    let program = std::env::var_os(TOOLCHAIN_ENV)
      .filter(|p| !p.is_empty())
      .map(PathBuf::from)
      .unwrap_or_else(|| PathBuf::from(DEFAULT_TOOLCHAIN));
    let gopath = std::env::var_os(SOURCE_ROOT_ENV).filter(|p| !p.is_empty());
    Self { program, gopath }
  }

  /// The source root workspaces are created under: the first GOPATH entry.
  pub fn source_root(&self) -> Result<PathBuf, ConfigError> {
    let gopath = self.gopath.as_ref().ok_or(ConfigError::SourceRootUnset)?;
    std::env::split_paths(gopath)
      .find(|p| !p.as_os_str().is_empty())
      .ok_or(ConfigError::SourceRootUnset)
  }
}

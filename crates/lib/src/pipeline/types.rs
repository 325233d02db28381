//! Result and error types for a pipeline run.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::config::ConfigError;
use crate::plan::FormatError;
use crate::rewrite::RewriteReport;
use crate::toolchain::BuildError;
use crate::util::copy::CopyError;
use crate::workspace::WorkspaceError;

/// Exit status for failures that abort the run outright.
pub const ABORT_EXIT_CODE: i32 = 2;

#[derive(Debug, Error)]
pub enum PipelineError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Format(#[from] FormatError),

  #[error(transparent)]
  Copy(#[from] CopyError),

  #[error(transparent)]
  Workspace(#[from] WorkspaceError),

  #[error(transparent)]
  Build(#[from] BuildError),
}

impl PipelineError {
  /// Process exit status for this failure.
  pub fn exit_code(&self) -> i32 {
    match self {
      PipelineError::Config(_) => 1,
      PipelineError::Build(BuildError::Failed { code, .. }) => match code {
        Some(0) | None => 1,
        Some(code) => *code,
      },
      PipelineError::Format(_)
      | PipelineError::Copy(_)
      | PipelineError::Workspace(_)
      | PipelineError::Build(BuildError::Spawn { .. }) => ABORT_EXIT_CODE,
    }
  }
}

/// Summary of a completed workspace build.
#[derive(Debug)]
pub struct BuildReport {
  /// Workspace the build ran in. Already deleted when the report is returned.
  pub workspace: PathBuf,
  pub module_name: String,
  pub rewrite: RewriteReport,
  /// Destination paths of collected artifacts.
  pub artifacts: Vec<PathBuf>,
  pub elapsed: Duration,
}

#[derive(Debug)]
pub enum RunOutcome {
  /// The workspace pipeline ran to completion.
  Built(BuildReport),
  /// Arguments were forwarded to the toolchain unchanged and it succeeded.
  Forwarded,
}

//! Copies build artifacts from the workspace back to the working directory.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::plan::ArtifactCopySpec;
use crate::util::copy::{CopyError, copy_path};

/// Copy each artifact to the same relative path under `working_dir`.
///
/// Returns the destination paths in order.
pub fn collect_artifacts(
  workspace: &Path,
  working_dir: &Path,
  artifacts: &[ArtifactCopySpec],
) -> Result<Vec<PathBuf>, CopyError> {
  let mut copied = Vec::with_capacity(artifacts.len());
  for artifact in artifacts {
    let from = workspace.join(&artifact.path);
    let to = working_dir.join(&artifact.path);
    info!(artifact = %artifact.path.display(), "copying build output");
    copy_path(&from, &to, None)?;
    copied.push(to);
  }
  Ok(copied)
}

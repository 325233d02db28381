//! Dependency materialization inside a workspace.
//!
//! Downloads and vendors dependencies through the toolchain, then removes the
//! module manifest so the legacy build resolves imports from `vendor/`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::consts::{MODULE_CHECKSUMS, MODULE_MANIFEST};
use crate::toolchain::{BuildError, Toolchain};

/// What materialization found and changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Materialized {
  /// Module path declared in the manifest, read before it was removed.
  pub module_path: Option<String>,
  /// Manifest files that were deleted.
  pub removed: Vec<PathBuf>,
}

pub async fn materialize(toolchain: &Toolchain, workspace: &Path) -> Result<Materialized, BuildError> {
  let module_path = fs::read_to_string(workspace.join(MODULE_MANIFEST))
    .ok()
    .and_then(|manifest| declared_module_path(&manifest));
  debug!(module_path = ?module_path, "read module declaration");

  info!("running go mod download");
  toolchain.run(&["mod", "download"], workspace, &[]).await?;
  info!("running go mod vendor");
  toolchain.run(&["mod", "vendor"], workspace, &[]).await?;

  let removed = strip_module_files(workspace);

  Ok(Materialized { module_path, removed })
}

/// Best-effort removal of the module manifest and checksums.
///
/// Missing files and removal failures are ignored.
pub fn strip_module_files(workspace: &Path) -> Vec<PathBuf> {
  [MODULE_MANIFEST, MODULE_CHECKSUMS]
    .iter()
    .map(|name| workspace.join(name))
    .filter(|path| fs::remove_file(path).is_ok())
    .collect()
}

/// Extract the path from the `module` directive of a manifest.
pub fn declared_module_path(manifest: &str) -> Option<String> {
  manifest.lines().find_map(|line| {
    let line = line.split("//").next().unwrap_or_default().trim();
    let rest = line.strip_prefix("module")?;
    if !rest.starts_with(char::is_whitespace) && !rest.starts_with('"') {
      return None;
    }
    let path = rest.trim().trim_matches(|c| c == '"' || c == '`');
    (!path.is_empty()).then(|| path.to_string())
  })
}

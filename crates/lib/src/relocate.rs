//! Vendored dependency relocation.
//!
//! The source subtree is copied, not moved: `vendor/<from>` is still present
//! after relocation.

use std::path::Path;

use tracing::info;

use crate::consts::VENDOR_DIR;
use crate::plan::VendorMoveSpec;
use crate::rewrite::{RewriteReport, rewrite_tree};
use crate::util::copy::{CopyError, copy_path};

/// Copy `vendor/<from>` to `vendor/<to>` and rewrite `from` to `to` across the workspace.
pub fn relocate_vendor(workspace: &Path, spec: &VendorMoveSpec) -> Result<RewriteReport, CopyError> {
  info!(from = %spec.from, to = %spec.to, "moving vendor");

  let vendor = workspace.join(VENDOR_DIR);
  let to = vendor.join(&spec.to);
  // `to` may sit inside `from` (major version moves such as `x/y:x/y/v2`).
  copy_path(&vendor.join(&spec.from), &to, Some(to.as_path()))?;

  Ok(rewrite_tree(workspace, &spec.rule()))
}

/// Apply each move in order, stopping at the first copy failure.
pub fn relocate_all(workspace: &Path, specs: &[VendorMoveSpec]) -> Result<RewriteReport, CopyError> {
  let mut report = RewriteReport::default();
  for spec in specs {
    report.merge(relocate_vendor(workspace, spec)?);
  }
  Ok(report)
}

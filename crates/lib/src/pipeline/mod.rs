//! The workspace build pipeline.
//!
//! Steps run strictly in order:
//! - Validate directives into a [`BuildPlan`]
//! - Copy the project into a fresh [`Workspace`]
//! - Vendor dependencies and strip the module manifest
//! - Rewrite the module path and relocate vendored packages
//! - Build with module resolution off
//! - Copy artifacts back
//!
//! The workspace guard is released explicitly on success and by `Drop` on
//! every early return, so it never outlives [`build`].

mod types;

pub use types::*;

use std::path::Path;
use std::time::Instant;

use tracing::{info, warn};

use crate::args::Invocation;
use crate::collect::collect_artifacts;
use crate::config::ToolchainConfig;
use crate::materialize::materialize;
use crate::plan::{BuildPlan, ModuleRewriteRule};
use crate::relocate::relocate_all;
use crate::rewrite::{RewriteReport, rewrite_tree};
use crate::toolchain::Toolchain;
use crate::workspace::Workspace;

/// Run one invocation: the workspace pipeline for `build`, plain forwarding otherwise.
pub async fn run(
  invocation: &Invocation,
  config: &ToolchainConfig,
  working_dir: &Path,
) -> Result<RunOutcome, PipelineError> {
  if invocation.activates_build() {
    build(invocation, config, working_dir).await.map(RunOutcome::Built)
  } else {
    forward(invocation, config, working_dir).await?;
    Ok(RunOutcome::Forwarded)
  }
}

/// Forward the passthrough arguments to the toolchain. Directives are ignored.
pub async fn forward(invocation: &Invocation, config: &ToolchainConfig, working_dir: &Path) -> Result<(), PipelineError> {
  if !invocation.directives.is_empty() {
    info!(count = invocation.directives.len(), "ignoring directives outside of build");
  }
  Toolchain::new(config.clone())
    .forward(&invocation.passthrough, working_dir)
    .await?;
  Ok(())
}

pub async fn build(
  invocation: &Invocation,
  config: &ToolchainConfig,
  working_dir: &Path,
) -> Result<BuildReport, PipelineError> {
  let start = Instant::now();
  info!("loose build starting");

  let plan = BuildPlan::from_directives(&invocation.directives)?;
  let source_root = config.source_root()?;
  let toolchain = Toolchain::new(config.clone());

  let mut workspace = Workspace::create(working_dir, &source_root)?;
  let dir = workspace.path().to_path_buf();

  let materialized = materialize(&toolchain, &dir).await?;

  let mut rewrite = RewriteReport::default();
  if let Some(target) = &plan.module {
    let old = match materialized.module_path {
      Some(path) => path,
      None => {
        let fallback = project_name(working_dir);
        warn!(fallback = %fallback, "no module declaration found, rewriting project name");
        fallback
      }
    };
    let rule = ModuleRewriteRule::new(old, target.resolve(workspace.module_name()));
    info!(old = %rule.old, new = %rule.new, "rewriting module path");
    rewrite.merge(rewrite_tree(&dir, &rule));
  }

  if !plan.vendor_moves.is_empty() {
    rewrite.merge(relocate_all(&dir, &plan.vendor_moves)?);
  }

  info!("building module");
  toolchain.build(&invocation.passthrough, &dir).await?;

  let artifacts = collect_artifacts(&dir, working_dir, &plan.artifacts)?;

  let module_name = workspace.module_name().to_string();
  if let Err(e) = workspace.release() {
    warn!(error = %e, "failed to delete temporary directory");
  }

  Ok(BuildReport {
    workspace: dir,
    module_name,
    rewrite,
    artifacts,
    elapsed: start.elapsed(),
  })
}

fn project_name(working_dir: &Path) -> String {
  working_dir
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_default()
}

//! Interpretation of tool directives into a build plan.
//!
//! All directive values are validated here, before a workspace exists, so a
//! malformed directive never leaves anything behind.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::args::ToolDirectives;
use crate::consts::{BARE_DIRECTIVE_VALUE, COPY_DIRECTIVE, MODULE_DIRECTIVE, MOVE_VENDOR_DIRECTIVE};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
  #[error("vendor move incorrect format: {value:?} (expected <from>:<to>)")]
  VendorMove { value: String },

  #[error("copy path must be relative and stay inside the project: {value:?}")]
  CopyPath { value: String },
}

/// Literal prefix substitution applied to every regular file in a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRewriteRule {
  pub old: String,
  pub new: String,
}

impl ModuleRewriteRule {
  pub fn new(old: impl Into<String>, new: impl Into<String>) -> Self {
    Self {
      old: old.into(),
      new: new.into(),
    }
  }

  /// A rule that cannot change any file.
  pub fn is_noop(&self) -> bool {
    self.old.is_empty() || self.old == self.new
  }
}

/// Target of the project-wide module rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleTarget {
  /// Rewrite to the generated workspace module name (`~module`).
  Workspace,
  /// Rewrite to an explicit import path (`~module=<path>`).
  Path(String),
}

impl ModuleTarget {
  pub fn resolve<'a>(&'a self, workspace_module: &'a str) -> &'a str {
    match self {
      ModuleTarget::Workspace => workspace_module,
      ModuleTarget::Path(path) => path,
    }
  }
}

/// Copy of `vendor/<from>` to `vendor/<to>`, followed by a `from -> to` rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorMoveSpec {
  pub from: String,
  pub to: String,
}

impl VendorMoveSpec {
  pub fn parse(value: &str) -> Result<Self, FormatError> {
    let parts: Vec<&str> = value.split(':').collect();
    match parts.as_slice() {
      [from, to] if !from.is_empty() && !to.is_empty() => Ok(Self {
        from: (*from).to_string(),
        to: (*to).to_string(),
      }),
      _ => Err(FormatError::VendorMove {
        value: value.to_string(),
      }),
    }
  }

  pub fn rule(&self) -> ModuleRewriteRule {
    ModuleRewriteRule::new(&self.from, &self.to)
  }
}

/// A build output copied from the workspace back to the same relative path
/// under the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactCopySpec {
  pub path: PathBuf,
}

impl ArtifactCopySpec {
  pub fn parse(value: &str) -> Result<Self, FormatError> {
    let path = Path::new(value);
    let escapes = path
      .components()
      .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if value.is_empty() || escapes {
      return Err(FormatError::CopyPath {
        value: value.to_string(),
      });
    }
    Ok(Self {
      path: path.to_path_buf(),
    })
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildPlan {
  pub module: Option<ModuleTarget>,
  pub vendor_moves: Vec<VendorMoveSpec>,
  pub artifacts: Vec<ArtifactCopySpec>,
}

impl BuildPlan {
  pub fn from_directives(directives: &ToolDirectives) -> Result<Self, FormatError> {
    for key in directives.keys() {
      if ![MODULE_DIRECTIVE, MOVE_VENDOR_DIRECTIVE, COPY_DIRECTIVE].contains(&key) {
        debug!(key, "ignoring unknown directive");
      }
    }

    let modules = directives.get(MODULE_DIRECTIVE);
    if modules.len() > 1 {
      warn!(count = modules.len(), "multiple module directives given, using the first");
    }
    let module = modules.first().map(|value| match *value {
      BARE_DIRECTIVE_VALUE => ModuleTarget::Workspace,
      path => ModuleTarget::Path(path.to_string()),
    });

    let vendor_moves = directives
      .get(MOVE_VENDOR_DIRECTIVE)
      .into_iter()
      .map(VendorMoveSpec::parse)
      .collect::<Result<Vec<_>, _>>()?;

    let artifacts = directives
      .get(COPY_DIRECTIVE)
      .into_iter()
      .map(ArtifactCopySpec::parse)
      .collect::<Result<Vec<_>, _>>()?;

    Ok(Self {
      module,
      vendor_moves,
      artifacts,
    })
  }
}

//! Disposable build workspaces under the legacy source root.
//!
//! A [`Workspace`] is a full copy of the project at
//! `<source-root>/src/<project>-<uuid>`. The directory is removed when the
//! guard is released or dropped, whichever comes first.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::util::copy::{CopyError, copy_path};

#[derive(Debug, Error)]
pub enum WorkspaceError {
  #[error("cannot derive a project name from {0}")]
  ProjectName(PathBuf),

  #[error("failed to prepare source root {path}: {source}")]
  SourceRoot {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to delete workspace {path}: {source}")]
  Remove {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error(transparent)]
  Copy(#[from] CopyError),
}

/// An isolated copy of the project tree, deleted on release.
#[derive(Debug)]
pub struct Workspace {
  path: PathBuf,
  module_name: String,
  released: bool,
}

impl Workspace {
  /// Copy `working_dir` into a uniquely named directory under `source_root/src`.
  ///
  /// Nothing needs cleaning up if this fails: the guard only exists once the
  /// copy succeeded. A partially copied directory is removed before returning.
  pub fn create(working_dir: &Path, source_root: &Path) -> Result<Self, WorkspaceError> {
    let project_name = working_dir
      .file_name()
      .and_then(|n| n.to_str())
      .filter(|n| !n.is_empty())
      .ok_or_else(|| WorkspaceError::ProjectName(working_dir.to_path_buf()))?;

    let module_name = unique_module_name(project_name);

    let src_dir = source_root.join("src");
    fs::create_dir_all(&src_dir).map_err(|e| WorkspaceError::SourceRoot {
      path: src_dir.clone(),
      source: e,
    })?;
    let src_dir = dunce::canonicalize(&src_dir).map_err(|e| WorkspaceError::SourceRoot {
      path: src_dir.clone(),
      source: e,
    })?;
    let path = src_dir.join(&module_name);

    info!(path = %path.display(), "copying to temporary directory");

    // A source root inside the project must not be copied into itself.
    let project = dunce::canonicalize(working_dir).unwrap_or_else(|_| working_dir.to_path_buf());
    let exclude = path.starts_with(&project).then_some(path.as_path());

    if let Err(e) = copy_path(&project, &path, exclude) {
      let _ = fs::remove_dir_all(&path);
      return Err(e.into());
    }

    Ok(Self {
      path,
      module_name,
      released: false,
    })
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// `<project>-<uuid>`, the import path of the project inside the source root.
  pub fn module_name(&self) -> &str {
    &self.module_name
  }

  /// Delete the workspace. Safe to call repeatedly; a missing directory is not an error.
  pub fn release(&mut self) -> Result<(), WorkspaceError> {
    self.released = true;
    match fs::remove_dir_all(&self.path) {
      Ok(()) => {
        info!(path = %self.path.display(), "deleted temporary directory");
        Ok(())
      }
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(WorkspaceError::Remove {
        path: self.path.clone(),
        source: e,
      }),
    }
  }
}

impl Drop for Workspace {
  fn drop(&mut self) {
    if self.released {
      return;
    }
    if let Err(e) = self.release() {
      warn!(error = %e, "failed to delete temporary directory");
    }
  }
}

fn unique_module_name(project_name: &str) -> String {
  format!("{}-{}", project_name, Uuid::new_v4())
}

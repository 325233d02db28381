//! Recursive copy preserving directory structure.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum CopyError {
  #[error("failed to copy {from} to {to}: {source}")]
  Io {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to traverse directory {path}: {source}")]
  WalkDir {
    path: PathBuf,
    #[source]
    source: walkdir::Error,
  },
}

impl CopyError {
  fn io(from: &Path, to: &Path, source: io::Error) -> Self {
    CopyError::Io {
      from: from.to_path_buf(),
      to: to.to_path_buf(),
      source,
    }
  }
}

/// Copy a file or directory tree from `src` to `dst`.
///
/// Parent directories of `dst` are created. Directories are merged into an
/// existing destination; files overwrite. Entries under `exclude` are skipped.
pub fn copy_path(src: &Path, dst: &Path, exclude: Option<&Path>) -> Result<(), CopyError> {
  let meta = fs::symlink_metadata(src).map_err(|e| CopyError::io(src, dst, e))?;

  if !meta.is_dir() {
    if let Some(parent) = dst.parent() {
      fs::create_dir_all(parent).map_err(|e| CopyError::io(src, dst, e))?;
    }
    return copy_entry(src, dst, meta.file_type());
  }

  debug!(from = %src.display(), to = %dst.display(), "copying tree");

  let walker = WalkDir::new(src)
    .into_iter()
    .filter_entry(|e| exclude.is_none_or(|excluded| e.path() != excluded));

  for entry in walker {
    let entry = entry.map_err(|e| CopyError::WalkDir {
      path: src.to_path_buf(),
      source: e,
    })?;
    let relative = entry.path().strip_prefix(src).map_err(|_| {
      CopyError::io(
        entry.path(),
        dst,
        io::Error::other("entry escaped the source tree"),
      )
    })?;
    let target = dst.join(relative);

    if entry.file_type().is_dir() {
      fs::create_dir_all(&target).map_err(|e| CopyError::io(entry.path(), &target, e))?;
    } else {
      copy_entry(entry.path(), &target, entry.file_type())?;
    }
  }

  Ok(())
}

#[cfg(unix)]
fn copy_entry(src: &Path, dst: &Path, file_type: fs::FileType) -> Result<(), CopyError> {
  if file_type.is_symlink() {
    let link = fs::read_link(src).map_err(|e| CopyError::io(src, dst, e))?;
    if fs::symlink_metadata(dst).is_ok() {
      fs::remove_file(dst).map_err(|e| CopyError::io(src, dst, e))?;
    }
    return std::os::unix::fs::symlink(&link, dst).map_err(|e| CopyError::io(src, dst, e));
  }
  fs::copy(src, dst).map(|_| ()).map_err(|e| CopyError::io(src, dst, e))
}

#[cfg(not(unix))]
fn copy_entry(src: &Path, dst: &Path, _file_type: fs::FileType) -> Result<(), CopyError> {
  fs::copy(src, dst).map(|_| ()).map_err(|e| CopyError::io(src, dst, e))
}

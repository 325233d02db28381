//! Project-wide literal import-path substitution.
//!
//! Rewriting is best-effort per file: a file that cannot be read or written is
//! recorded as a [`RewriteWarning`] and the walk continues.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::plan::ModuleRewriteRule;

/// A file the rewriter had to skip.
#[derive(Debug)]
pub struct RewriteWarning {
  pub path: PathBuf,
  pub message: String,
}

#[derive(Debug, Default)]
pub struct RewriteReport {
  /// Files whose contents changed.
  pub rewritten: Vec<PathBuf>,
  pub skipped: Vec<RewriteWarning>,
}

impl RewriteReport {
  pub fn merge(&mut self, other: RewriteReport) {
    self.rewritten.extend(other.rewritten);
    self.skipped.extend(other.skipped);
  }
}

/// Replace every occurrence of `rule.old` with `rule.new` in every regular file under `root`.
pub fn rewrite_tree(root: &Path, rule: &ModuleRewriteRule) -> RewriteReport {
  let mut report = RewriteReport::default();
  if rule.is_noop() {
    return report;
  }

  debug!(root = %root.display(), old = %rule.old, new = %rule.new, "rewriting tree");

  for entry in WalkDir::new(root) {
    let entry = match entry {
      Ok(entry) => entry,
      Err(e) => {
        let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
        warn!(path = %path.display(), error = %e, "skipping unreadable entry");
        report.skipped.push(RewriteWarning {
          path,
          message: e.to_string(),
        });
        continue;
      }
    };
    if !entry.file_type().is_file() {
      continue;
    }

    match rewrite_file(entry.path(), rule) {
      Ok(true) => report.rewritten.push(entry.path().to_path_buf()),
      Ok(false) => {}
      Err(e) => {
        warn!(path = %entry.path().display(), error = %e, "skipping file");
        report.skipped.push(RewriteWarning {
          path: entry.path().to_path_buf(),
          message: e.to_string(),
        });
      }
    }
  }

  report
}

/// Returns whether the file changed.
fn rewrite_file(path: &Path, rule: &ModuleRewriteRule) -> std::io::Result<bool> {
  let contents = fs::read(path)?;
  let Some(replaced) = replace_all(&contents, rule.old.as_bytes(), rule.new.as_bytes()) else {
    return Ok(false);
  };
  fs::write(path, replaced)?;
  Ok(true)
}

/// Literal replacement over bytes. `None` when `from` does not occur.
fn replace_all(haystack: &[u8], from: &[u8], to: &[u8]) -> Option<Vec<u8>> {
  if from.is_empty() {
    return None;
  }
  let mut out = Vec::new();
  let mut rest = haystack;
  let mut found = false;

  while let Some(at) = rest.windows(from.len()).position(|w| w == from) {
    found = true;
    out.extend_from_slice(&rest[..at]);
    out.extend_from_slice(to);
    rest = &rest[at + from.len()..];
  }

  if !found {
    return None;
  }
  out.extend_from_slice(rest);
  Some(out)
}

//! Invocation classification.
//!
//! Every raw argument is either a tool directive (prefixed with
//! [`DIRECTIVE_MARKER`]) or a passthrough argument forwarded to the toolchain.

use crate::consts::{BARE_DIRECTIVE_VALUE, BUILD_VERB, DIRECTIVE_MARKER};

/// Directives addressed to loosego, in the order they were given.
///
/// Keys may repeat; lookups return every value for a key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolDirectives {
  entries: Vec<(String, String)>,
}

impl ToolDirectives {
  fn push(&mut self, raw: &str) {
    let (key, value) = match raw.split_once('=') {
      Some((key, value)) => (key, value),
      None => (raw, BARE_DIRECTIVE_VALUE),
    };
    self.entries.push((key.to_string(), value.to_string()));
  }

  /// All values given for `key`, in input order.
  pub fn get(&self, key: &str) -> Vec<&str> {
    self
      .entries
      .iter()
      .filter(|(k, _)| k == key)
      .map(|(_, v)| v.as_str())
      .collect()
  }

  pub fn first(&self, key: &str) -> Option<&str> {
    self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
  }

  /// Distinct keys in order of first appearance.
  pub fn keys(&self) -> Vec<&str> {
    let mut keys: Vec<&str> = Vec::new();
    for (key, _) in &self.entries {
      if !keys.contains(&key.as_str()) {
        keys.push(key.as_str());
      }
    }
    keys
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

/// One classified run of the tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
  pub directives: ToolDirectives,
  pub passthrough: Vec<String>,
}

impl Invocation {
  /// Split raw arguments (without the program name) into directives and passthrough args.
  pub fn classify<I, S>(args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut invocation = Invocation::default();
    for arg in args {
      let arg = arg.as_ref();
      match arg.strip_prefix(DIRECTIVE_MARKER) {
        Some(directive) => invocation.directives.push(directive),
        None => invocation.passthrough.push(arg.to_string()),
      }
    }
    invocation
  }

  /// Whether the workspace pipeline runs for this invocation.
  pub fn activates_build(&self) -> bool {
    self.passthrough.first().is_some_and(|verb| verb == BUILD_VERB)
  }
}

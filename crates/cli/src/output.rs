//! Terminal reporting for loosego runs.
//!
//! The toolchain owns stdout while it runs, so loosego only speaks after the
//! pipeline finishes: a build summary on stdout, skipped rewrites and fatal
//! diagnostics on stderr. Markers are colored when the stream supports it.

use std::time::Duration;

use owo_colors::{OwoColorize, Stream};

use loosego_lib::pipeline::BuildReport;

const DONE: &str = "✓";
const FAILED: &str = "✗";
const SKIPPED: &str = "⚠";

/// Elapsed build time at millisecond precision.
pub fn format_duration(duration: Duration) -> String {
  let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
  humantime::format_duration(Duration::from_millis(millis)).to_string()
}

/// Summary of a finished workspace build.
pub fn print_build_report(report: &BuildReport) {
  for skipped in &report.rewrite.skipped {
    eprintln!(
      "{} rewrite skipped {}: {}",
      SKIPPED.if_supports_color(Stream::Stderr, |s| s.yellow()),
      skipped.path.display(),
      skipped.message
    );
  }

  println!();
  println!(
    "{} Build complete in {}",
    DONE.if_supports_color(Stream::Stdout, |s| s.green()),
    format_duration(report.elapsed)
  );
  print_field("Workspace", &report.module_name);
  print_field("Files rewritten", &report.rewrite.rewritten.len().to_string());
  for artifact in &report.artifacts {
    print_field("Artifact", &artifact.display().to_string());
  }
}

/// A fatal diagnostic; the process exits right after.
pub fn print_failure(message: &str) {
  eprintln!(
    "{} {}",
    FAILED.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

fn print_field(label: &str, value: &str) {
  println!("  {}: {}", label.if_supports_color(Stream::Stdout, |s| s.dimmed()), value);
}

//! loosego - build module-based Go projects in GOPATH mode.
//!
//! Arguments are forwarded to `go`. When the first one is `build`, the project
//! is built from a vendored copy under $GOPATH/src. Arguments starting with `~`
//! are loosego directives: `~module[=<path>]`, `~moveVendor=<from>:<to>`,
//! `~copy=<path>`.

mod cmd;
mod output;

use std::process::ExitCode;

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::output::print_failure;

fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match raw_args().and_then(|args| cmd::cmd_run(&args)) {
    Ok(code) => code,
    Err(e) => {
      print_failure(&format!("{:#}", e));
      ExitCode::from(2)
    }
  }
}

/// Arguments after the program name, untouched: `--` and leading flags belong to the toolchain.
fn raw_args() -> Result<Vec<String>> {
  std::env::args_os()
    .skip(1)
    .map(|arg| {
      arg
        .into_string()
        .map_err(|arg| anyhow!("argument is not valid UTF-8: {}", arg.to_string_lossy()))
    })
    .collect()
}

//! The single entry point that turns a pipeline result into a process exit status.

use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::debug;

use loosego_lib::args::Invocation;
use loosego_lib::config::{ConfigError, ToolchainConfig};
use loosego_lib::pipeline::{self, PipelineError, RunOutcome};

use crate::output::{print_build_report, print_failure};

/// Classify `args`, run the pipeline or forward to the toolchain, and report.
///
/// Every workspace is already deleted by the time this returns.
pub fn cmd_run(args: &[String]) -> Result<ExitCode> {
  let invocation = Invocation::classify(args);
  let config = ToolchainConfig::from_env();
  debug!(
    directives = invocation.directives.len(),
    passthrough = ?invocation.passthrough,
    program = %config.program.display(),
    "classified arguments"
  );

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let result = match std::env::current_dir() {
    Ok(working_dir) => rt.block_on(pipeline::run(&invocation, &config, &working_dir)),
    Err(e) => Err(PipelineError::from(ConfigError::WorkingDir(e))),
  };

  Ok(match result {
    Ok(RunOutcome::Built(report)) => {
      print_build_report(&report);
      ExitCode::SUCCESS
    }
    Ok(RunOutcome::Forwarded) => ExitCode::SUCCESS,
    Err(e) => {
      print_failure(&e.to_string());
      exit_code(e.exit_code())
    }
  })
}

fn exit_code(code: i32) -> ExitCode {
  match u8::try_from(code) {
    Ok(0) | Err(_) => ExitCode::FAILURE,
    Ok(code) => ExitCode::from(code),
  }
}

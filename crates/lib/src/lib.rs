//! loosego-lib: build module-based Go projects in GOPATH mode.
//!
//! The project is copied into a disposable workspace under `$GOPATH/src`,
//! its dependencies are vendored and the module manifest is removed, import
//! paths are rewritten as directed, and the toolchain builds with module
//! resolution turned off. Requested artifacts are copied back and the
//! workspace is deleted.

pub mod args;
pub mod collect;
pub mod config;
pub mod consts;
pub mod materialize;
pub mod pipeline;
pub mod plan;
pub mod relocate;
pub mod rewrite;
pub mod toolchain;
pub mod util;
pub mod workspace;

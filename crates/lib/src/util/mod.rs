//! Shared utilities.
//!
//! Recursive filesystem copy and test helpers.

pub mod copy;

#[cfg(test)]
pub mod testutil;

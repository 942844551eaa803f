//! jnilibs - stage the NDK C++ runtime into an Android project's jniLibs
//!
//! This crate provides the library side of the `jnilibs` tool: locating an
//! NDK, copying `libc++_shared.so` for each ABI into the staging tree, and
//! removing those copies again.
//!
//! The binary writes human status lines (`Copied`, `Removed`, warnings and
//! errors) to stderr, cargo style. Stdout carries only the `locate` and
//! `status` reports, completion scripts and JSON events, so it stays
//! parseable.

pub mod core;
pub mod ops;
pub mod toolchain;
pub mod util;

/// Test utilities for jnilibs unit tests.
///
/// Only available when running tests. Provides a synthetic NDK layout on
/// disk.
#[cfg(test)]
pub mod test_support;

pub use core::{abi::Abi, staging::StagingTree, workspace::Workspace};
pub use toolchain::{NdkLocator, Toolchain};
pub use util::context::GlobalContext;

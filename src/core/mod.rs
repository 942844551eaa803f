//! Core data structures.
//!
//! - Android ABIs and their NDK sysroot directories
//! - The jniLibs staging tree layout
//! - Workspace (project root plus resolved settings)

pub mod abi;
pub mod staging;
pub mod workspace;

pub use abi::{Abi, AbiDirMap};
pub use staging::StagingTree;
pub use workspace::Workspace;

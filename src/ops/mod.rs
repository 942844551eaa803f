//! High-level operations.
//!
//! Each operation returns a report; the CLI decides how to render it.

pub mod clean;
pub mod stage;
pub mod status;

pub use clean::{clean, CleanReport};
pub use stage::{stage, AbiOutcome, AbiStage, StageReport, Stager};
pub use status::{status, AbiState, AbiStatus, StatusReport};

//! Batch audio conversion
//!
//! Handles file eligibility, archival naming, collision-safe destinations,
//! and driving the external media tool once per file.

mod classify;
mod error;
mod invoker;
mod naming;
mod orchestrator;
mod reporter;

pub use error::BatchError;
pub use orchestrator::{BatchOrchestrator, ConversionTally};

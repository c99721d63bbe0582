//! Core configuration and platform plumbing
//!
//! This module contains:
//! - The immutable per-run batch configuration
//! - Path separator normalization for the current platform

mod config;
mod paths;

pub use config::{BatchConfig, MatchMode, DEFAULT_BITRATE_KBPS, DEFAULT_TARGET_FORMAT};
pub use paths::PathNormalizer;

//! Per-file progress and the end-of-run summary

use std::path::Path;

use crate::core::PathNormalizer;

use super::orchestrator::ConversionTally;

/// Emits progress through the log facade and the final totals on stdout.
pub struct Reporter {
    normalizer: PathNormalizer,
}

impl Reporter {
    pub fn new(normalizer: PathNormalizer) -> Self {
        Self { normalizer }
    }

    pub fn file_started(&self, source: &Path) {
        log::info!("Converting file {} ...", self.shown(source));
    }

    pub fn file_converted(&self, source: &Path, dest: &Path) {
        log::info!("Converted {} -> {}", self.shown(source), self.shown(dest));
    }

    pub fn file_failed(&self, source: &Path, detail: &str) {
        log::error!("Failed to convert {}: {detail}", self.shown(source));
    }

    /// Final totals. `OK` means every eligible file was converted; `Error`
    /// means at least one was not.
    pub fn summary(&self, tally: &ConversionTally) {
        println!();
        if tally.fully_converted() {
            println!("OK");
        } else {
            println!("Error");
        }
        println!("Total Files      {}", tally.total_eligible);
        println!("Converted Files  {}", tally.total_converted);
    }

    fn shown(&self, path: &Path) -> String {
        self.normalizer.to_native(&path.to_string_lossy())
    }
}

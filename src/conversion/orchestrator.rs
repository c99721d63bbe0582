//! Batch orchestration
//!
//! Walks the configured tree and drives every eligible file through the
//! same strictly ordered sequence: archive the original, transcode into a
//! fixed temporary name, move the result to its collision-resolved
//! destination. One file completes (or fails and is reported) before the
//! next is considered; nothing here runs concurrently.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::core::{BatchConfig, PathNormalizer};

use super::classify;
use super::error::{BatchError, TranscodeError};
use super::invoker::{temp_output_path, TranscodeInvoker};
use super::naming;
use super::reporter::Reporter;

/// Everything needed to convert one eligible file. Created when the
/// classifier accepts a name, dropped when the file is done or reported.
#[derive(Debug)]
struct ConversionJob {
    source_path: PathBuf,
    directory: PathBuf,
    original_filename: String,
    derived_base_name: String,
    target_extension: String,
    bitrate_kbps: u32,
}

impl ConversionJob {
    fn for_path(path: &Path, config: &BatchConfig) -> Option<Self> {
        let filename = path.file_name()?.to_str()?;
        if !classify::is_eligible(filename, &config.source_extensions, config.match_mode) {
            return None;
        }
        Some(Self {
            source_path: path.to_path_buf(),
            directory: path.parent()?.to_path_buf(),
            original_filename: filename.to_string(),
            derived_base_name: classify::derive_base_name(filename),
            target_extension: config.target_extension(),
            bitrate_kbps: config.bitrate_kbps,
        })
    }

    fn archived_path(&self) -> PathBuf {
        self.directory
            .join(naming::archived_name(&self.original_filename))
    }

    fn temp_output(&self) -> PathBuf {
        temp_output_path(&self.directory, &self.target_extension)
    }
}

/// Counters for one batch run. `total_converted <= total_eligible` holds at
/// every point; the run is fully successful iff they end up equal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConversionTally {
    pub total_eligible: u32,
    pub total_converted: u32,
}

impl ConversionTally {
    pub fn fully_converted(&self) -> bool {
        self.total_converted == self.total_eligible
    }
}

/// Sequential driver for one batch run.
pub struct BatchOrchestrator {
    config: BatchConfig,
    invoker: TranscodeInvoker,
    reporter: Reporter,
}

impl BatchOrchestrator {
    pub fn new(config: BatchConfig, normalizer: PathNormalizer) -> Self {
        let invoker = TranscodeInvoker::new(
            config.tool_path.clone(),
            normalizer,
            config.tool_timeout,
        );
        Self {
            config,
            invoker,
            reporter: Reporter::new(normalizer),
        }
    }

    /// Run the batch to completion and return the final tally.
    ///
    /// Fatal preconditions are checked before any file is touched. A tool
    /// that cannot be launched mid-walk aborts the batch; every other
    /// per-file failure is reported and skipped.
    pub fn run(&self) -> Result<ConversionTally, BatchError> {
        self.check_preconditions()?;

        log::info!("Converting files in {} ...", self.config.root_dir.display());

        let mut tally = ConversionTally::default();
        for path in self.snapshot_files() {
            self.process_file(&path, &mut tally)?;
        }

        self.reporter.summary(&tally);
        Ok(tally)
    }

    fn check_preconditions(&self) -> Result<(), BatchError> {
        if !self.config.tool_path.is_file() {
            return Err(BatchError::ToolMissing(self.config.tool_path.clone()));
        }
        if !self.config.root_dir.is_dir() {
            return Err(BatchError::RootMissing(self.config.root_dir.clone()));
        }
        Ok(())
    }

    /// Depth-first snapshot of every file under the root.
    ///
    /// Taken before converting anything, so outputs and archived originals
    /// created by this run are never revisited. Iteration order within a
    /// directory is whatever the filesystem returns.
    fn snapshot_files(&self) -> Vec<PathBuf> {
        WalkDir::new(&self.config.root_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .collect()
    }

    fn process_file(&self, path: &Path, tally: &mut ConversionTally) -> Result<(), BatchError> {
        let Some(job) = ConversionJob::for_path(path, &self.config) else {
            return Ok(());
        };
        tally.total_eligible += 1;
        self.reporter.file_started(path);

        // Archive first: whatever happens from here on, the original stays
        // on disk under the marker-prefixed name.
        let archived = job.archived_path();
        if let Err(e) = fs::rename(&job.source_path, &archived) {
            self.reporter
                .file_failed(path, &format!("could not archive original: {e}"));
            return Ok(());
        }

        let temp = job.temp_output();
        if temp.exists() {
            // Stale output of an interrupted run.
            let _ = fs::remove_file(&temp);
        }

        match self
            .invoker
            .transcode(&archived, &temp, &job.target_extension, job.bitrate_kbps)
        {
            Ok(()) => {}
            Err(err @ TranscodeError::Launch { .. }) => {
                return Err(BatchError::ToolUnavailable(err));
            }
            Err(err) => {
                self.reporter.file_failed(path, &err.to_string());
                return Ok(());
            }
        }

        match naming::move_into_place(
            &temp,
            &job.directory,
            &job.derived_base_name,
            &job.target_extension,
        ) {
            Ok(dest) => {
                tally.total_converted += 1;
                self.reporter.file_converted(path, &dest);
            }
            Err(e) => {
                self.reporter
                    .file_failed(path, &format!("could not place converted file: {e}"));
            }
        }
        Ok(())
    }
}

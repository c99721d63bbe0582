//! audioconv - bulk audio converter
//!
//! Walks a directory tree, archives every eligible source file under a
//! marker-prefixed name, and re-encodes it to the target format by driving
//! a headless VLC process once per file.

mod cli;
mod conversion;
mod core;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use crate::cli::Args;
use crate::conversion::BatchOrchestrator;
use crate::core::{BatchConfig, MatchMode, PathNormalizer};

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_logging();

    let normalizer = PathNormalizer::for_platform();

    let Some(tool_path) = cli::locate_tool(args.program.as_deref()) else {
        log::error!("media tool not found; pass --program with the path to your VLC install");
        return ExitCode::FAILURE;
    };

    let match_mode = if args.strict_extensions {
        MatchMode::Suffix
    } else {
        MatchMode::Substring
    };
    let root_dir = PathBuf::from(normalizer.to_native(&args.dir.to_string_lossy()));

    let config = BatchConfig::new(
        root_dir,
        tool_path,
        &args.output_format,
        args.rate,
        match_mode,
        args.timeout.map(Duration::from_secs),
    );

    let orchestrator = BatchOrchestrator::new(config, normalizer);
    match orchestrator.run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

//! Logging configuration
//!
//! Log lines go to the terminal and to a file under the platform log
//! directory, so a long unattended batch can be reconstructed afterwards.

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

const LOG_FILE_NAME: &str = "audioconv.log";
const MAX_LOG_BYTES: u64 = 10 * 1024 * 1024;

/// Get the log directory path
/// On macOS: ~/Library/Logs/audioconv/
pub fn log_directory() -> Option<PathBuf> {
    if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join("Library").join("Logs").join("audioconv"))
    } else {
        dirs::data_local_dir().map(|d| d.join("audioconv").join("logs"))
    }
}

/// Get the current log file path (used in tests)
#[allow(dead_code)]
pub fn log_file_path() -> Option<PathBuf> {
    log_directory().map(|d| d.join(LOG_FILE_NAME))
}

/// Initialize the logging system
///
/// Sets up combined logging to the terminal (info and above) and the log
/// file (debug and above). Returns the log file path on success; falls back
/// to terminal-only logging when the file cannot be opened.
pub fn init_logging() -> Option<PathBuf> {
    let log_dir = match log_directory() {
        Some(d) => d,
        None => {
            eprintln!("Warning: Could not determine log directory");
            init_terminal_only();
            return None;
        }
    };

    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Could not create log directory: {}", e);
        init_terminal_only();
        return None;
    }

    let log_path = log_dir.join(LOG_FILE_NAME);

    // Rotate the previous log once it grows past the cap.
    if let Ok(metadata) = fs::metadata(&log_path) {
        if metadata.len() > MAX_LOG_BYTES {
            let backup_path = log_dir.join(format!("{LOG_FILE_NAME}.old"));
            let _ = fs::rename(&log_path, &backup_path);
        }
    }

    let log_file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not open log file: {}", e);
            init_terminal_only();
            return None;
        }
    };

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();

    let loggers: Vec<Box<dyn SharedLogger>> = vec![
        TermLogger::new(
            LevelFilter::Info,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Debug, config, log_file),
    ];

    if CombinedLogger::init(loggers).is_err() {
        eprintln!("Warning: Logger already initialized");
    }

    log::debug!("=== audioconv session started ===");

    Some(log_path)
}

/// Terminal-only fallback when file logging is unavailable.
fn init_terminal_only() {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();

    let term_logger = TermLogger::new(
        LevelFilter::Info,
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
    let _ = CombinedLogger::init(vec![term_logger]);
}

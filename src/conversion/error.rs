//! Error types for the conversion pipeline.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single external transcode.
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// The media tool could not be started at the configured path.
    #[error("failed to launch media tool {}: {}", tool.display(), source)]
    Launch {
        tool: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The media tool ran but reported failure.
    #[error("media tool exited with {status}: {detail}")]
    NonZeroExit { status: ExitStatus, detail: String },

    /// The media tool was killed after exceeding the configured timeout.
    #[error("transcode timed out after {}s", .0.as_secs())]
    TimedOut(Duration),

    /// I/O error while waiting on the media tool.
    #[error("i/o error while running the media tool: {0}")]
    Io(#[from] io::Error),
}

/// Errors that abort a batch run before or during the walk.
#[derive(Debug, Error)]
pub enum BatchError {
    /// No executable at the configured tool path. Checked before any file
    /// is touched.
    #[error("media tool not found at {}", .0.display())]
    ToolMissing(PathBuf),

    /// The configured root is not an existing directory.
    #[error("directory {} does not exist", .0.display())]
    RootMissing(PathBuf),

    /// The tool vanished mid-walk; continuing would fail every remaining
    /// file the same way.
    #[error(transparent)]
    ToolUnavailable(#[from] TranscodeError),
}

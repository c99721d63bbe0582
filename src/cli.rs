//! Command line surface and media tool discovery

use std::env;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::core::{DEFAULT_BITRATE_KBPS, DEFAULT_TARGET_FORMAT};

/// Binary name used for the PATH fallback.
const TOOL_BINARY: &str = if cfg!(windows) { "vlc.exe" } else { "vlc" };

/// Bulk convert audio files in a directory tree by driving a VLC install.
#[derive(Debug, Parser)]
#[command(author, version, about, max_term_width = 100)]
pub struct Args {
    /// Directory to bulk convert audio files in
    #[arg(short, long, value_name = "DIR")]
    pub dir: PathBuf,

    /// Output format (mp3 or wav)
    #[arg(short, long, value_name = "FORMAT", default_value = DEFAULT_TARGET_FORMAT)]
    pub output_format: String,

    /// Bit rate in kilobits
    #[arg(short, long, value_name = "RATE", default_value_t = DEFAULT_BITRATE_KBPS)]
    pub rate: u32,

    /// Path to the VLC program (default: well-known install locations, then $PATH)
    #[arg(short, long, value_name = "PATH")]
    pub program: Option<PathBuf>,

    /// Only accept filenames that end with a source extension
    #[arg(long)]
    pub strict_extensions: bool,

    /// Give up on a single file after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

/// Well-known VLC install locations for the current platform.
fn known_install_locations() -> &'static [&'static str] {
    if cfg!(target_os = "windows") {
        &[
            "C:/Program Files/VideoLAN/VLC/vlc.exe",
            "C:/Program Files (x86)/VideoLAN/VLC/vlc.exe",
        ]
    } else if cfg!(target_os = "macos") {
        &["/Applications/VLC.app/Contents/MacOS/VLC"]
    } else {
        &["/usr/bin/vlc", "/usr/local/bin/vlc", "/snap/bin/vlc"]
    }
}

/// Resolve the media tool path.
///
/// An explicit `--program` value is passed through untouched (the
/// orchestrator's precondition check reports it if it does not exist).
/// Otherwise the well-known install locations are probed, then `$PATH`.
pub fn locate_tool(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    for location in known_install_locations() {
        let location = Path::new(location);
        if location.is_file() {
            return Some(location.to_path_buf());
        }
    }
    find_in_path(TOOL_BINARY)
}

fn find_in_path(binary: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    env::split_paths(&path_var)
        .map(|dir| dir.join(binary))
        .find(|candidate| candidate.is_file())
}

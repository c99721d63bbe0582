//! Batch configuration
//!
//! One immutable value built from the parsed command line and handed to the
//! orchestrator; nothing in the run mutates it.

use std::path::PathBuf;
use std::time::Duration;

/// Default target format when none is given on the command line.
pub const DEFAULT_TARGET_FORMAT: &str = "mp3";

/// Default bit rate in kilobits.
pub const DEFAULT_BITRATE_KBPS: u32 = 128;

/// Source formats eligible regardless of the target format.
const BASE_SOURCE_EXTENSIONS: &[&str] = &[".aac", ".m4a", ".ogg", ".opus", ".wma"];

/// How a filename is matched against the source-extension set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// The extension may appear anywhere in the name, so a stem containing
    /// `.wav` matches just like a real `.wav` suffix does.
    #[default]
    Substring,
    /// The extension must terminate the name.
    Suffix,
}

/// Immutable configuration for one batch run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Root of the directory tree to convert.
    pub root_dir: PathBuf,
    /// Path to the external media tool.
    pub tool_path: PathBuf,
    /// Target format, lowercased, without a leading dot (e.g. `mp3`).
    pub target_format: String,
    /// Bit rate in kilobits for lossy targets.
    pub bitrate_kbps: u32,
    /// Extension substrings a filename must carry to be converted.
    pub source_extensions: Vec<String>,
    /// Substring or suffix-anchored extension matching.
    pub match_mode: MatchMode,
    /// Give up on a single transcode after this long; `None` waits forever.
    pub tool_timeout: Option<Duration>,
}

impl BatchConfig {
    pub fn new(
        root_dir: PathBuf,
        tool_path: PathBuf,
        target_format: &str,
        bitrate_kbps: u32,
        match_mode: MatchMode,
        tool_timeout: Option<Duration>,
    ) -> Self {
        let target_format = target_format.to_lowercase();
        let source_extensions = source_extensions_for(&target_format);
        Self {
            root_dir,
            tool_path,
            target_format,
            bitrate_kbps,
            source_extensions,
            match_mode,
            tool_timeout,
        }
    }

    /// Target extension with its leading dot (e.g. `.mp3`).
    pub fn target_extension(&self) -> String {
        format!(".{}", self.target_format)
    }
}

/// Source-extension set for a given target format.
///
/// The base set is extended with `.mp3` when converting to wav, otherwise
/// with `.wav`, so a file already in the target format is never picked up.
pub fn source_extensions_for(target_format: &str) -> Vec<String> {
    let mut extensions: Vec<String> = BASE_SOURCE_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect();
    if target_format == "wav" {
        extensions.push(".mp3".to_string());
    } else {
        extensions.push(".wav".to_string());
    }
    extensions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_extensions_for_lossy_target() {
        let extensions = source_extensions_for("mp3");
        assert!(extensions.contains(&".wav".to_string()));
        assert!(!extensions.contains(&".mp3".to_string()));
    }

    #[test]
    fn test_source_extensions_for_wav_target() {
        let extensions = source_extensions_for("wav");
        assert!(extensions.contains(&".mp3".to_string()));
        assert!(!extensions.contains(&".wav".to_string()));
    }

    #[test]
    fn test_target_format_is_lowercased() {
        let config = BatchConfig::new(
            PathBuf::from("/music"),
            PathBuf::from("/usr/bin/vlc"),
            "MP3",
            128,
            MatchMode::Substring,
            None,
        );
        assert_eq!(config.target_format, "mp3");
        assert_eq!(config.target_extension(), ".mp3");
    }

    #[test]
    fn test_base_set_is_always_included() {
        for target in ["mp3", "wav", "ogg"] {
            let extensions = source_extensions_for(target);
            for ext in [".aac", ".m4a", ".ogg", ".opus", ".wma"] {
                assert!(extensions.contains(&ext.to_string()), "{target} should include {ext}");
            }
        }
    }
}

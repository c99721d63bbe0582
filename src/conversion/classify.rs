//! File eligibility and destination base names

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use crate::core::MatchMode;

use super::naming::ARCHIVE_MARKER;

/// Encoder-added bitrate annotation, e.g. ` (128kbit_AAC)` or ` (64kbit_Opus)`.
static BITRATE_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s\(\d{2,3}kbit_(AAC|Opus)\)").expect("valid pattern"));

/// Check whether a filename should be converted.
///
/// In [`MatchMode::Substring`] the extension may appear anywhere in the
/// name, case-sensitively as authored. Archived originals (names carrying
/// the [`ARCHIVE_MARKER`] prefix) are never eligible, so a second run over
/// an already converted tree picks up nothing.
pub fn is_eligible(filename: &str, source_extensions: &[String], mode: MatchMode) -> bool {
    if filename.starts_with(ARCHIVE_MARKER) {
        return false;
    }
    source_extensions.iter().any(|ext| match mode {
        MatchMode::Substring => filename.contains(ext.as_str()),
        MatchMode::Suffix => filename.ends_with(ext.as_str()),
    })
}

/// Derive the destination stem for a filename.
///
/// Takes the name without its final extension, strips any bitrate
/// annotation a previous encode appended, and strips the archival marker.
/// A name free of both is returned as its plain stem.
pub fn derive_base_name(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);
    let stripped = BITRATE_ANNOTATION.replace_all(stem, "");
    stripped.replace(ARCHIVE_MARKER, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extensions(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_recognizes_source_formats() {
        let exts = extensions(&[".aac", ".m4a", ".ogg", ".opus", ".wma", ".wav"]);
        assert!(is_eligible("song.m4a", &exts, MatchMode::Substring));
        assert!(is_eligible("song.opus", &exts, MatchMode::Substring));
        assert!(!is_eligible("song.mp3", &exts, MatchMode::Substring));
        assert!(!is_eligible("notes.txt", &exts, MatchMode::Substring));
    }

    #[test]
    fn test_substring_matches_inside_stem() {
        // The historical behavior: `.wav` anywhere in the name counts.
        let exts = extensions(&[".wav"]);
        assert!(is_eligible("album.wav backup.txt", &exts, MatchMode::Substring));
    }

    #[test]
    fn test_suffix_mode_requires_trailing_extension() {
        let exts = extensions(&[".wav"]);
        assert!(!is_eligible("album.wav backup.txt", &exts, MatchMode::Suffix));
        assert!(is_eligible("album.wav", &exts, MatchMode::Suffix));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let exts = extensions(&[".wav"]);
        assert!(!is_eligible("song.WAV", &exts, MatchMode::Substring));
    }

    #[test]
    fn test_archived_files_are_never_eligible() {
        let exts = extensions(&[".m4a"]);
        assert!(!is_eligible("_OLD_song.m4a", &exts, MatchMode::Substring));
        assert!(!is_eligible("_OLD_song.m4a", &exts, MatchMode::Suffix));
    }

    #[test]
    fn test_base_name_is_identity_on_clean_stem() {
        assert_eq!(derive_base_name("Song Title.m4a"), "Song Title");
        assert_eq!(derive_base_name("01 - Intro.ogg"), "01 - Intro");
    }

    #[test]
    fn test_base_name_strips_bitrate_annotation() {
        assert_eq!(derive_base_name("Song (128kbit_AAC).m4a"), "Song");
        assert_eq!(derive_base_name("Song (64kbit_Opus).opus"), "Song");
        assert_eq!(derive_base_name("Song (320kbit_AAC).aac"), "Song");
    }

    #[test]
    fn test_base_name_keeps_unknown_annotations() {
        // Only the known encoder pattern is removed, case-sensitively.
        assert_eq!(derive_base_name("Song (128kbit_aac).m4a"), "Song (128kbit_aac)");
        assert_eq!(derive_base_name("Song (live).m4a"), "Song (live)");
    }

    #[test]
    fn test_base_name_strips_archival_marker() {
        assert_eq!(derive_base_name("_OLD_Song.m4a"), "Song");
    }

    #[test]
    fn test_base_name_without_extension() {
        assert_eq!(derive_base_name("Song"), "Song");
    }
}

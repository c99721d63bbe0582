//! Archival marker and collision-safe destination names

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Prefix added to an original file before it is transcoded, keeping it
/// recoverable under a visibly different name.
pub const ARCHIVE_MARKER: &str = "_OLD_";

/// The archived (marker-prefixed) name for an original file.
///
/// Names already carrying the marker are returned unchanged.
pub fn archived_name(filename: &str) -> String {
    if filename.starts_with(ARCHIVE_MARKER) {
        filename.to_string()
    } else {
        format!("{ARCHIVE_MARKER}{filename}")
    }
}

fn candidate(directory: &Path, base_name: &str, extension: &str, index: u32) -> PathBuf {
    if index == 0 {
        directory.join(format!("{base_name}{extension}"))
    } else {
        directory.join(format!("{base_name} ({index}){extension}"))
    }
}

/// First destination path under `directory` that does not exist yet.
///
/// Tries `base.ext`, then `base (1).ext`, `base (2).ext`, ... — the first
/// available integer suffix. Never returns a path that exists at call time.
pub fn resolve_destination(directory: &Path, base_name: &str, extension: &str) -> PathBuf {
    let mut index = 0;
    loop {
        let path = candidate(directory, base_name, extension, index);
        if !path.exists() {
            return path;
        }
        index += 1;
    }
}

/// Move `tmp` to the first free `base.ext` / `base (n).ext` slot in
/// `directory` and return the final path.
///
/// The claim goes through `hard_link`, which refuses to replace an existing
/// destination: a name that appears between the existence probe and the
/// claim bumps the index instead of clobbering a file. Filesystems without
/// hard links fall back to a plain rename.
pub fn move_into_place(
    tmp: &Path,
    directory: &Path,
    base_name: &str,
    extension: &str,
) -> io::Result<PathBuf> {
    loop {
        let dest = resolve_destination(directory, base_name, extension);
        match fs::hard_link(tmp, &dest) {
            Ok(()) => {
                fs::remove_file(tmp)?;
                return Ok(dest);
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(_) => {
                fs::rename(tmp, &dest)?;
                return Ok(dest);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_archived_name_adds_prefix() {
        assert_eq!(archived_name("song.m4a"), "_OLD_song.m4a");
    }

    #[test]
    fn test_archived_name_is_idempotent() {
        assert_eq!(archived_name("_OLD_song.m4a"), "_OLD_song.m4a");
    }

    #[test]
    fn test_resolve_destination_prefers_plain_name() {
        let temp_dir = TempDir::new().unwrap();
        let dest = resolve_destination(temp_dir.path(), "song", ".mp3");
        assert_eq!(dest, temp_dir.path().join("song.mp3"));
    }

    #[test]
    fn test_resolve_destination_skips_existing_names() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("song.mp3"), "a").unwrap();
        fs::write(temp_dir.path().join("song (1).mp3"), "b").unwrap();
        fs::write(temp_dir.path().join("song (2).mp3"), "c").unwrap();

        let dest = resolve_destination(temp_dir.path(), "song", ".mp3");
        assert_eq!(dest, temp_dir.path().join("song (3).mp3"));
        assert!(!dest.exists());
    }

    #[test]
    fn test_move_into_place_uses_free_slot() {
        let temp_dir = TempDir::new().unwrap();
        let tmp = temp_dir.path().join("_output_.mp3");
        fs::write(&tmp, "converted").unwrap();

        let dest = move_into_place(&tmp, temp_dir.path(), "song", ".mp3").unwrap();
        assert_eq!(dest, temp_dir.path().join("song.mp3"));
        assert!(!tmp.exists());
        assert_eq!(fs::read_to_string(dest).unwrap(), "converted");
    }

    #[test]
    fn test_move_into_place_bumps_index_on_collision() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("song.mp3"), "original").unwrap();
        let tmp = temp_dir.path().join("_output_.mp3");
        fs::write(&tmp, "converted").unwrap();

        let dest = move_into_place(&tmp, temp_dir.path(), "song", ".mp3").unwrap();
        assert_eq!(dest, temp_dir.path().join("song (1).mp3"));
        // The colliding file is untouched.
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("song.mp3")).unwrap(),
            "original"
        );
    }
}

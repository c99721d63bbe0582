//! Path separator normalization
//!
//! The media tool accepts forward slashes on every platform, while paths
//! shown to the user should carry the native separator. Both directions are
//! pure string transforms and idempotent.

/// Separator convention of the platform the batch runs on.
///
/// Selected once at startup; every component that needs to rewrite a path
/// string goes through the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathNormalizer {
    /// Native separator is `/`; both transforms are the identity.
    Posix,
    /// Native separator is `\`; the portable form uses `/`.
    Windows,
}

impl PathNormalizer {
    /// Pick the normalizer for the detected platform.
    pub fn for_platform() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }

    /// Rewrite a path string with the platform's native separator.
    pub fn to_native(&self, path: &str) -> String {
        match self {
            Self::Posix => path.to_string(),
            Self::Windows => path.replace('/', "\\"),
        }
    }

    /// Rewrite a path string with forward slashes for the media tool.
    pub fn to_portable(&self, path: &str) -> String {
        match self {
            Self::Posix => path.to_string(),
            Self::Windows => path.replace('\\', "/"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posix_is_identity() {
        let n = PathNormalizer::Posix;
        assert_eq!(n.to_native("/music/album/song.m4a"), "/music/album/song.m4a");
        assert_eq!(n.to_portable("/music/album/song.m4a"), "/music/album/song.m4a");
    }

    #[test]
    fn test_windows_swaps_separators() {
        let n = PathNormalizer::Windows;
        assert_eq!(n.to_native("C:/Music/song.m4a"), "C:\\Music\\song.m4a");
        assert_eq!(n.to_portable("C:\\Music\\song.m4a"), "C:/Music/song.m4a");
    }

    #[test]
    fn test_transforms_are_idempotent() {
        let n = PathNormalizer::Windows;
        let native = n.to_native("C:/Music/song.m4a");
        assert_eq!(n.to_native(&native), native);

        let portable = n.to_portable("C:\\Music\\song.m4a");
        assert_eq!(n.to_portable(&portable), portable);
    }

    #[cfg(unix)]
    #[test]
    fn test_platform_detection() {
        assert_eq!(PathNormalizer::for_platform(), PathNormalizer::Posix);
    }
}

//! # Path Resolution Module
//!
//! Centralizza il calcolo del path finale di un file ricodificato.

use crate::config::{Config, InstallMode};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Computes final output paths
pub struct PathResolver;

impl PathResolver {
    /// Final destination of `input` under the configured install mode
    pub fn get_output_path(input: &Path, config: &Config) -> PathBuf {
        match config.mode {
            InstallMode::InPlace => input.to_path_buf(),
            InstallMode::KeepOriginal => Self::keep_original_path(input, &config.suffix),
        }
    }

    /// First unused sibling among `<stem><suffix>.mp4`, `<stem><suffix>_001.mp4`, ...
    ///
    /// The stem is kept as raw `OsStr`, so non-UTF-8 names survive unchanged.
    /// Not race-free against other writers in the same folder.
    pub fn keep_original_path(input: &Path, suffix: &str) -> PathBuf {
        let parent = input.parent().unwrap_or_else(|| Path::new(""));
        let stem = input.file_stem().unwrap_or_default();

        let mut candidate = parent.join(Self::sibling_name(stem, suffix, None));
        let mut idx: u32 = 1;
        while Self::is_taken(&candidate) {
            candidate = parent.join(Self::sibling_name(stem, suffix, Some(idx)));
            idx += 1;
        }
        candidate
    }

    fn sibling_name(stem: &OsStr, suffix: &str, idx: Option<u32>) -> OsString {
        let mut name = OsString::with_capacity(stem.len() + suffix.len() + 8);
        name.push(stem);
        name.push(suffix);
        if let Some(idx) = idx {
            name.push(format!("_{idx:03}"));
        }
        name.push(".mp4");
        name
    }

    // Dangling symlinks count as taken
    fn is_taken(path: &Path) -> bool {
        path.symlink_metadata().is_ok()
    }
}

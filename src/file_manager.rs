//! # File Management Module
//!
//! Questo modulo gestisce tutte le operazioni sui file.
//!
//! ## Responsabilità:
//! - Discovery dei file MP4 in una cartella (opzionalmente ricorsiva)
//! - Derivazione del path temporaneo `<file>.tmp_transcode.mp4`
//! - Installazione atomica del risultato (un singolo rename)
//! - Pulizia best-effort dei file temporanei
//! - Formattazione human-readable delle dimensioni
//!
//! ## Discovery:
//! - Estensione `mp4` case-insensitive (`.mp4` e `.MP4`)
//! - File e cartelle nascosti inclusi (nessun filtro sul punto iniziale)
//! - File temporanei lasciati da run interrotte ignorati
//! - Path risolti (canonicalize), deduplicati e ordinati
//!
//! ## Sicurezza operazioni:
//! - L'originale viene toccato solo dal rename finale
//! - Nessun fallback copia+cancella: un rename fallito resta un errore
//!
//! ## Esempio:
//! ```rust,no_run
//! use mp4_reencoder::file_manager::FileManager;
//! use std::path::Path;
//!
//! let files = FileManager::find_mp4_files(Path::new("/path/to/videos"), false)?;
//! for file in &files {
//!     println!("{}", FileManager::temp_path_for(file).display());
//! }
//! # Ok::<(), mp4_reencoder::ReencodeError>(())
//! ```

use crate::error::{ReencodeError, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Marker inserted between the original file name and the `.mp4` of the scratch file
pub const TEMP_MARKER: &str = ".tmp_transcode";

/// Manages file discovery and file system mutations
pub struct FileManager;

impl FileManager {
    /// Find all MP4 files in a folder, resolved, deduplicated and sorted
    pub fn find_mp4_files(folder: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
        if !folder.exists() || !folder.is_dir() {
            return Err(ReencodeError::InvalidInput(folder.display().to_string()));
        }

        let mut walker = WalkDir::new(folder).min_depth(1).follow_links(false);
        if !recursive {
            walker = walker.max_depth(1);
        }

        let mut files = BTreeSet::new();

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Error reading directory entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() || !Self::is_mp4(path) {
                continue;
            }

            if Self::is_temp_file(path) {
                debug!("Ignoring leftover temporary file: {}", path.display());
                continue;
            }

            match path.canonicalize() {
                Ok(resolved) => {
                    files.insert(resolved);
                }
                Err(e) => warn!("Failed to resolve {}: {}", path.display(), e),
            }
        }

        Ok(files.into_iter().collect())
    }

    /// Check if a file has an `mp4` extension (any case)
    pub fn is_mp4(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("mp4"))
            .unwrap_or(false)
    }

    /// Check if a file is a scratch output of this tool
    pub fn is_temp_file(path: &Path) -> bool {
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .map(|stem| stem.ends_with(TEMP_MARKER))
            .unwrap_or(false)
    }

    /// Deterministic scratch path for an input: `<input>.tmp_transcode.mp4`
    pub fn temp_path_for(input: &Path) -> PathBuf {
        let mut name = input.as_os_str().to_owned();
        name.push(TEMP_MARKER);
        name.push(".mp4");
        PathBuf::from(name)
    }

    /// Size of a file, `None` if it does not exist
    pub async fn file_size(path: &Path) -> Option<u64> {
        fs::metadata(path).await.ok().map(|m| m.len())
    }

    /// Atomically replace `original` with `replacement` using a single rename
    pub async fn replace_file(original: &Path, replacement: &Path) -> Result<()> {
        Self::install_as(replacement, original).await
    }

    /// Atomically move `from` to `to` using a single rename
    pub async fn install_as(from: &Path, to: &Path) -> Result<()> {
        fs::rename(from, to)
            .await
            .map_err(|source| ReencodeError::Install {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
                source,
            })
    }

    /// Remove a file if it exists, swallowing errors
    pub async fn safe_cleanup(path: &Path) {
        if fs::symlink_metadata(path).await.is_err() {
            return;
        }
        match fs::remove_file(path).await {
            Ok(()) => debug!("Removed temporary file: {}", path.display()),
            Err(e) => debug!("Could not remove {}: {}", path.display(), e),
        }
    }

    /// Get human-readable file size
    pub fn format_size(size: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size as u64, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

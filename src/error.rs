//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce `ReencodeError` per categorizzare gli errori di una run
//! - Distingue errori fatali (cartella non valida, configurazione)
//!   da errori per singolo file (transcodifica, validazione, installazione)
//! - Espone un nome stabile (`kind()`) per l'output JSON
//!
//! ## Categorie di errori:
//! - `InvalidInput`: cartella inesistente o non directory (fatale)
//! - `TranscodeProcess`: ffmpeg non avviabile o exit code != 0
//! - `TranscodeValidation`: output temporaneo assente o vuoto
//! - `Install`: rename finale fallito (permessi, filesystem diversi, ...)
//! - `Config`: configurazione non valida
//!
//! ## Esempio:
//! ```rust
//! use mp4_reencoder::ReencodeError;
//!
//! let err = ReencodeError::InvalidInput("/nope".to_string());
//! assert_eq!(err.kind(), "invalid_input");
//! ```

use std::io;
use std::path::PathBuf;

/// Errors raised while re-encoding a folder
#[derive(thiserror::Error, Debug)]
pub enum ReencodeError {
    #[error("Not a valid folder: {0}")]
    InvalidInput(String),

    #[error("Transcoder failed for {}: {reason}", .path.display())]
    TranscodeProcess { path: PathBuf, reason: String },

    #[error("Temporary output was not created or is empty: {}", .0.display())]
    TranscodeValidation(PathBuf),

    #[error("Failed to move {} to {}: {source}{}", .from.display(), .to.display(), cross_device_note(.source))]
    Install {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReencodeError {
    /// Stable machine-readable name of the error category
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::TranscodeProcess { .. } => "transcode_process",
            Self::TranscodeValidation(_) => "transcode_validation",
            Self::Install { .. } => "install",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
        }
    }
}

/// Whether a rename failed because source and target live on different filesystems.
pub fn is_cross_device(err: &io::Error) -> bool {
    // EXDEV is 18 on Linux and the BSDs
    #[cfg(unix)]
    {
        err.raw_os_error() == Some(18)
    }
    // ERROR_NOT_SAME_DEVICE
    #[cfg(windows)]
    {
        err.raw_os_error() == Some(17)
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = err;
        false
    }
}

fn cross_device_note(err: &io::Error) -> &'static str {
    if is_cross_device(err) {
        " (temporary file and target are on different filesystems; no copy fallback is attempted)"
    } else {
        ""
    }
}

pub type Result<T> = std::result::Result<T, ReencodeError>;

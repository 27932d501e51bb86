//! # Configuration Management Module
//!
//! Questo modulo gestisce la configurazione di una run di ricodifica.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con i parametri della run
//! - Definisce `InstallMode` (sostituzione in-place o nuovo file accanto all'originale)
//! - Valida i parametri prima di toccare il filesystem
//! - Supporta caricamento/salvataggio da/verso file JSON
//!
//! ## Parametri di configurazione:
//! - `recursive`: Scansione ricorsiva delle sottocartelle (default: false)
//! - `mode`: `in_place` oppure `keep_original` (default: in_place)
//! - `suffix`: Suffisso del nuovo file in modalità keep_original (default: "_reencoded")
//! - `dry_run`: Solo elenco dei target, nessuna scrittura (default: false)
//! - `ffmpeg_path`: Binario ffmpeg alternativo (default: None = ffmpeg nel PATH)
//! - `json_output`: Eventi JSON su stdout (default: false)
//!
//! I parametri di encoding NON sono configurabili: il profilo H.264 è fisso
//! (vedi `video_processor::EncodeProfile`).
//!
//! ## Esempio:
//! ```rust
//! use mp4_reencoder::config::{Config, InstallMode};
//!
//! let config = Config {
//!     recursive: true,
//!     mode: InstallMode::KeepOriginal,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use crate::error::{ReencodeError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default suffix for keep-original outputs
pub const DEFAULT_SUFFIX: &str = "_reencoded";

/// Where a validated encode ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallMode {
    /// Rename the encode over the original file
    InPlace,
    /// Rename the encode to a fresh sibling, original untouched
    KeepOriginal,
}

impl InstallMode {
    pub fn description(&self) -> &'static str {
        match self {
            Self::InPlace => "replace original (in-place)",
            Self::KeepOriginal => "keep original + write new file",
        }
    }
}

/// Configuration for one re-encode run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Descend into subfolders
    pub recursive: bool,
    /// Install policy, shared by every file of the run
    pub mode: InstallMode,
    /// Suffix for keep-original outputs
    pub suffix: String,
    /// List targets only, no encode and no writes
    pub dry_run: bool,
    /// Explicit transcoder binary (None = platform ffmpeg from PATH)
    pub ffmpeg_path: Option<PathBuf>,
    /// Output progress and status as JSON for programmatic use
    pub json_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recursive: false,
            mode: InstallMode::InPlace,
            suffix: DEFAULT_SUFFIX.to_string(),
            dry_run: false,
            ffmpeg_path: None,
            json_output: false,
        }
    }
}

impl Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.suffix.contains('/') || self.suffix.contains('\\') {
            return Err(ReencodeError::Config(format!(
                "Suffix must not contain path separators: {:?}",
                self.suffix
            )));
        }

        if self.suffix.contains(crate::file_manager::TEMP_MARKER) {
            return Err(ReencodeError::Config(format!(
                "Suffix must not contain the temporary marker: {:?}",
                self.suffix
            )));
        }

        if let Some(ref ffmpeg) = self.ffmpeg_path {
            if ffmpeg.as_os_str().is_empty() {
                return Err(ReencodeError::Config("ffmpeg path is empty".to_string()));
            }
        }

        Ok(())
    }

    /// Load configuration from file
    pub async fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.suffix = "../escape".to_string();
        assert!(config.validate().is_err());

        config.suffix = "sub\\dir".to_string();
        assert!(config.validate().is_err());

        config.suffix = ".tmp_transcode".to_string();
        assert!(config.validate().is_err());

        config.suffix = String::new();
        assert!(config.validate().is_ok());

        config.ffmpeg_path = Some(PathBuf::new());
        assert!(matches!(config.validate(), Err(ReencodeError::Config(_))));
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(!config.recursive);
        assert_eq!(config.mode, InstallMode::InPlace);
        assert_eq!(config.suffix, "_reencoded");
        assert!(!config.dry_run);
        assert!(config.ffmpeg_path.is_none());
        assert!(!config.json_output);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"mode": "keep_original"}"#).unwrap();
        assert_eq!(config.mode, InstallMode::KeepOriginal);
        assert_eq!(config.suffix, DEFAULT_SUFFIX);
        assert!(!config.recursive);
    }

    #[tokio::test]
    async fn test_config_save_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");

        let original_config = Config {
            recursive: true,
            mode: InstallMode::KeepOriginal,
            suffix: "_h264".to_string(),
            dry_run: true,
            ffmpeg_path: Some(PathBuf::from("/opt/ffmpeg/bin/ffmpeg")),
            json_output: false,
        };

        original_config.save_to_file(&config_path).await.unwrap();
        let loaded_config = Config::from_file(&config_path).await.unwrap();

        assert!(loaded_config.recursive);
        assert_eq!(loaded_config.mode, InstallMode::KeepOriginal);
        assert_eq!(loaded_config.suffix, "_h264");
        assert!(loaded_config.dry_run);
        assert_eq!(
            loaded_config.ffmpeg_path,
            Some(PathBuf::from("/opt/ffmpeg/bin/ffmpeg"))
        );
    }

    #[tokio::test]
    async fn test_missing_config_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::from_file(&temp_dir.path().join("absent.json"))
            .await
            .unwrap();
        assert_eq!(config.suffix, DEFAULT_SUFFIX);
    }

    #[tokio::test]
    async fn test_invalid_config_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        tokio::fs::write(&config_path, r#"{"suffix": "a/b"}"#).await.unwrap();

        tokio_test::assert_err!(Config::from_file(&config_path).await);
    }
}

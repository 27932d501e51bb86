//! # Platform-specific utilities
//!
//! Centralizza la risoluzione del transcoder esterno (ffmpeg) e il controllo
//! della sua disponibilità sul sistema.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Platform-specific command names
pub struct PlatformCommands {
    ffmpeg: &'static str,
    which_command: &'static str,
}

impl PlatformCommands {
    /// Get the singleton instance
    pub fn instance() -> &'static Self {
        static INSTANCE: OnceLock<PlatformCommands> = OnceLock::new();
        INSTANCE.get_or_init(Self::new)
    }

    fn new() -> Self {
        if cfg!(windows) {
            Self {
                ffmpeg: "ffmpeg.exe",
                which_command: "where",
            }
        } else {
            Self {
                ffmpeg: "ffmpeg",
                which_command: "which",
            }
        }
    }

    /// Get the command used to check if a program exists
    pub fn which_command(&self) -> &str {
        self.which_command
    }

    /// Transcoder to run: the explicit override if any, otherwise the platform ffmpeg
    pub fn resolve_ffmpeg(&self, configured: Option<&Path>) -> PathBuf {
        configured
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(self.ffmpeg))
    }

    /// Check if a program can be launched
    ///
    /// Paths with a directory component are checked on disk, bare names are
    /// looked up with `which`/`where`.
    pub async fn is_command_available(&self, program: &Path) -> bool {
        if program.components().count() > 1 || program.is_absolute() {
            return program.is_file();
        }

        let result = tokio::process::Command::new(self.which_command)
            .arg(program)
            .output()
            .await;

        match result {
            Ok(output) => output.status.success(),
            Err(_) => false,
        }
    }

    /// Get system information for debugging
    pub fn system_info() -> SystemInfo {
        SystemInfo {
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
            family: std::env::consts::FAMILY,
        }
    }
}

/// System information structure
#[derive(Debug, Clone)]
pub struct SystemInfo {
    pub os: &'static str,
    pub arch: &'static str,
    pub family: &'static str,
}

impl std::fmt::Display for SystemInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.os, self.arch, self.family)
    }
}

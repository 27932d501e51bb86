//! # JSON Output Module
//!
//! Questo modulo gestisce l'output strutturato in JSON per l'uso da altri programmi.
//!
//! ## Responsabilità:
//! - Emette un oggetto JSON per riga su stdout
//! - Riusa `Config` e `RunSummary` invece di duplicare i dati
//!
//! ## Tipi di messaggi:
//! - `start`: Inizio della run (cartella, numero file, configurazione)
//! - `file_start`: Inizio elaborazione di un file
//! - `file_complete`: Fine elaborazione di un file (output oppure errore)
//! - `complete`: Fine della run con i conteggi finali

use crate::config::{Config, InstallMode};
use crate::summary::{FileOutcome, RunSummary};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tipo di messaggio JSON
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum JsonMessage {
    /// Inizio della run
    #[serde(rename = "start")]
    Start {
        folder: PathBuf,
        total_files: usize,
        config: JsonConfig,
    },

    /// Inizio elaborazione di un file
    #[serde(rename = "file_start")]
    FileStart {
        path: PathBuf,
        index: usize,
        total: usize,
    },

    /// Fine elaborazione di un file
    #[serde(rename = "file_complete")]
    FileComplete {
        path: PathBuf,
        output: Option<PathBuf>,
        error: Option<String>,
        error_kind: Option<String>,
    },

    /// Run completata
    #[serde(rename = "complete")]
    Complete {
        total: usize,
        succeeded: usize,
        failed: usize,
        dry_run: bool,
        duration_seconds: f64,
    },
}

/// Configurazione per output JSON
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonConfig {
    pub recursive: bool,
    pub mode: InstallMode,
    pub suffix: String,
    pub dry_run: bool,
}

impl From<&Config> for JsonConfig {
    fn from(config: &Config) -> Self {
        Self {
            recursive: config.recursive,
            mode: config.mode,
            suffix: config.suffix.clone(),
            dry_run: config.dry_run,
        }
    }
}

impl JsonMessage {
    /// Emette il messaggio JSON su stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    pub fn start(folder: PathBuf, total_files: usize, config: &Config) -> Self {
        Self::Start {
            folder,
            total_files,
            config: JsonConfig::from(config),
        }
    }

    pub fn file_start(path: PathBuf, index: usize, total: usize) -> Self {
        Self::FileStart { path, index, total }
    }

    pub fn file_complete(outcome: &FileOutcome) -> Self {
        match &outcome.result {
            Ok(output) => Self::FileComplete {
                path: outcome.input.clone(),
                output: Some(output.clone()),
                error: None,
                error_kind: None,
            },
            Err(e) => Self::FileComplete {
                path: outcome.input.clone(),
                output: None,
                error: Some(e.to_string()),
                error_kind: Some(e.kind().to_string()),
            },
        }
    }

    pub fn complete(summary: &RunSummary) -> Self {
        Self::Complete {
            total: summary.total(),
            succeeded: summary.succeeded(),
            failed: summary.failed(),
            dry_run: summary.dry_run,
            duration_seconds: summary.duration.as_secs_f64(),
        }
    }
}

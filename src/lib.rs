//! # MP4 Reencoder Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Responsabilità:
//! - Definisce la struttura modulare dell'applicazione
//! - Espone i tipi e le funzioni principali tramite re-exports
//! - Fornisce un'interfaccia pulita per il main.rs e per altri consumatori
//!
//! ## Architettura dei moduli:
//! - `config`: Configurazione della run e validazione parametri
//! - `error`: Tipi di errore custom
//! - `file_manager`: Discovery, path temporanei, rename atomico, cleanup
//! - `video_processor`: Invocazione di FFmpeg con il profilo H.264 fisso
//! - `reencoder`: Orchestratore della run e pipeline per singolo file
//! - `summary`: Esiti per file e conteggi finali
//! - `json_output`: Eventi JSON per uso programmatico
//! - `platform`: Risoluzione del binario FFmpeg
//!
//! ## Utilizzo:
//! ```rust,no_run
//! use mp4_reencoder::{BatchReencoder, Config};
//! use std::path::Path;
//!
//! # async fn demo() -> mp4_reencoder::error::Result<()> {
//! let reencoder = BatchReencoder::new(Config::default())?;
//! let summary = reencoder.run(Path::new("/path/to/videos")).await?;
//! println!("{}", summary.format_summary());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod file_manager;
pub mod json_output;
pub mod platform;
pub mod reencoder;
pub mod summary;
pub mod video_processor;

#[cfg(all(test, unix))]
mod test_support;

pub use config::{Config, InstallMode};
pub use error::ReencodeError;
pub use reencoder::BatchReencoder;
pub use summary::{FileOutcome, RunSummary};

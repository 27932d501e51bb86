//! # MP4 Reencoder - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing` (su stderr)
//! - Costruzione della configurazione (file JSON opzionale + flag CLI)
//! - Avvio della run e stampa del riepilogo
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI (cartella, recursive, keep-original, suffix, dry-run)
//! 2. Configura il logging (INFO o DEBUG a seconda del flag verbose, `RUST_LOG` vince)
//! 3. Carica l'eventuale file di configurazione e applica i flag CLI
//! 4. Esegue `BatchReencoder::run` su un runtime single-thread
//!
//! Gli errori sui singoli file (FFmpeg mancante compreso) non cambiano
//! l'exit code: solo cartella o configurazione non valide terminano con errore.
//!
//! ## Esempio di utilizzo:
//! ```bash
//! mp4-reencode /path/to/videos --recursive --keep-original --suffix _h264
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use mp4_reencoder::{BatchReencoder, Config, InstallMode};

#[derive(Parser)]
#[command(name = "mp4-reencode")]
#[command(about = "Re-encode every MP4 in a folder to a fixed H.264 profile. Replaces originals by default.")]
struct Args {
    /// Folder containing the MP4 files
    folder: PathBuf,

    /// Also process subfolders
    #[arg(long)]
    recursive: bool,

    /// Keep the original and write a new file next to it (default: replace the original)
    #[arg(long)]
    keep_original: bool,

    /// Suffix of the new file name with --keep-original [default: _reencoded]
    #[arg(long)]
    suffix: Option<String>,

    /// Only list the target files, no encoding and no writes
    #[arg(long)]
    dry_run: bool,

    /// FFmpeg binary to use instead of the one on PATH
    #[arg(long)]
    ffmpeg: Option<PathBuf>,

    /// JSON configuration file; command line flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit JSON events on stdout
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn apply_to(self, mut config: Config) -> (PathBuf, Config) {
        config.recursive |= self.recursive;
        config.dry_run |= self.dry_run;
        config.json_output |= self.json;
        if self.keep_original {
            config.mode = InstallMode::KeepOriginal;
        }
        if let Some(suffix) = self.suffix {
            config.suffix = suffix;
        }
        if let Some(ffmpeg) = self.ffmpeg {
            config.ffmpeg_path = Some(ffmpeg);
        }
        (self.folder, config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let base_config = match args.config {
        Some(ref path) => Config::from_file(path).await?,
        None => Config::default(),
    };
    let (folder, config) = args.apply_to(base_config);

    let reencoder = BatchReencoder::new(config)?;
    reencoder.run(&folder).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags_map_to_config() {
        let args = Args::parse_from([
            "mp4-reencode",
            "/videos",
            "--recursive",
            "--keep-original",
            "--suffix",
            "_h264",
            "--dry-run",
        ]);
        let (folder, config) = args.apply_to(Config::default());

        assert_eq!(folder, PathBuf::from("/videos"));
        assert!(config.recursive);
        assert!(config.dry_run);
        assert_eq!(config.mode, InstallMode::KeepOriginal);
        assert_eq!(config.suffix, "_h264");
    }

    #[test]
    fn test_file_config_kept_when_flags_absent() {
        let args = Args::parse_from(["mp4-reencode", "/videos"]);
        let file_config = Config {
            recursive: true,
            mode: InstallMode::KeepOriginal,
            suffix: "_small".to_string(),
            ..Default::default()
        };
        let (_, config) = args.apply_to(file_config);

        assert!(config.recursive);
        assert_eq!(config.mode, InstallMode::KeepOriginal);
        assert_eq!(config.suffix, "_small");
        assert!(!config.dry_run);
    }

    #[test]
    fn test_folder_is_required() {
        assert!(Args::try_parse_from(["mp4-reencode"]).is_err());
    }
}

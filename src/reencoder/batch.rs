//! # Batch Re-encoder
//!
//! Orchestratore di una run: valida la cartella, trova i file, li elabora
//! uno alla volta in ordine e produce il `RunSummary`.

use crate::{
    config::{Config, InstallMode},
    error::Result,
    file_manager::FileManager,
    json_output::JsonMessage,
    platform::PlatformCommands,
    reencoder::task::TaskReencoder,
    summary::RunSummary,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Runs one re-encode pass over a folder
pub struct BatchReencoder {
    config: Config,
    ffmpeg: PathBuf,
}

impl BatchReencoder {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let ffmpeg = PlatformCommands::instance().resolve_ffmpeg(config.ffmpeg_path.as_deref());

        Ok(Self { config, ffmpeg })
    }

    /// Re-encode every MP4 in `folder`
    ///
    /// Only folder and config problems are returned as `Err`; per-file
    /// failures, including a transcoder that cannot be launched, are
    /// recorded in the summary.
    pub async fn run(&self, folder: &Path) -> Result<RunSummary> {
        let start_time = Instant::now();
        let mut summary = RunSummary::new(self.config.dry_run);

        let files = FileManager::find_mp4_files(folder, self.config.recursive)?;

        if self.config.json_output {
            JsonMessage::start(folder.to_path_buf(), files.len(), &self.config).emit();
        }

        if files.is_empty() {
            info!("No mp4 files to process in {}", folder.display());
            return Ok(self.finish(summary, start_time));
        }

        self.log_configuration(folder, &files);

        if !self.config.dry_run {
            self.check_dependencies().await;
        }

        let task = TaskReencoder::new(self.config.clone(), self.ffmpeg.clone());
        debug!("Encode profile: {}", task.video_processor().profile());

        let total = files.len();
        for (index, file) in files.iter().enumerate() {
            info!("[{}/{}] Processing: {}", index + 1, total, file.display());

            if self.config.json_output {
                JsonMessage::file_start(file.clone(), index, total).emit();
            }

            let result = if self.config.dry_run {
                let planned = task.planned_output(file);
                match self.config.mode {
                    InstallMode::InPlace => info!("  - (dry-run) would encode and replace the original"),
                    InstallMode::KeepOriginal => {
                        info!("  - (dry-run) would encode to {}", planned.display())
                    }
                }
                Ok(planned)
            } else {
                task.process_single_file(file).await
            };

            if let Err(ref e) = result {
                error!("  - failed: {}", e);
            }

            summary.record(file, result);

            if self.config.json_output {
                if let Some(outcome) = summary.outcomes.last() {
                    JsonMessage::file_complete(outcome).emit();
                }
            }
        }

        Ok(self.finish(summary, start_time))
    }

    fn log_configuration(&self, folder: &Path, files: &[PathBuf]) {
        info!("Target folder: {}", folder.display());
        info!("Recursive: {}", self.config.recursive);
        info!("Mode: {}", self.config.mode.description());
        if self.config.mode == InstallMode::KeepOriginal {
            info!("New file suffix: {}", self.config.suffix);
        }
        info!("Files to process: {}", files.len());
        if self.config.dry_run {
            info!("DRY RUN: no encoding and no file writes will happen");
        }
        debug!("Transcoder: {}", self.ffmpeg.display());
        debug!("System: {}", PlatformCommands::system_info());
    }

    // Advisory only: a launch failure is recorded per file
    async fn check_dependencies(&self) {
        if !PlatformCommands::instance()
            .is_command_available(&self.ffmpeg)
            .await
        {
            warn!(
                "Transcoder {} not found, every file is likely to fail",
                self.ffmpeg.display()
            );
        }
    }

    fn finish(&self, mut summary: RunSummary, start_time: Instant) -> RunSummary {
        summary.duration = start_time.elapsed();

        if summary.total() > 0 {
            info!("Summary");
            info!("  Succeeded: {}", summary.succeeded());
            info!("  Failed: {}", summary.failed());
            if summary.failed() > 0 {
                warn!("  Failed files still have their original content.");
            }
            debug!("{} in {:.1}s", summary.format_summary(), summary.duration.as_secs_f64());
        }

        if self.config.json_output {
            JsonMessage::complete(&summary).emit();
        }

        summary
    }
}

//! # Task Module
//!
//! Pipeline di un singolo file: ricodifica nel file temporaneo, validazione,
//! installazione atomica. In caso di errore il temporaneo viene rimosso e
//! l'originale resta intatto.

use crate::{
    config::{Config, InstallMode},
    error::Result,
    file_manager::FileManager,
    reencoder::path_resolver::PathResolver,
    video_processor::VideoProcessor,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Worker for one input file at a time
pub struct TaskReencoder {
    config: Config,
    video_processor: VideoProcessor,
}

impl TaskReencoder {
    pub fn new(config: Config, ffmpeg: PathBuf) -> Self {
        Self {
            config,
            video_processor: VideoProcessor::new(ffmpeg),
        }
    }

    pub fn video_processor(&self) -> &VideoProcessor {
        &self.video_processor
    }

    /// Where `file` would end up, without touching the filesystem
    pub fn planned_output(&self, file: &Path) -> PathBuf {
        PathResolver::get_output_path(file, &self.config)
    }

    /// Re-encode one file and install the result, returning its final path
    pub async fn process_single_file(&self, file: &Path) -> Result<PathBuf> {
        let result = self.transcode_and_install(file).await;

        if result.is_err() {
            FileManager::safe_cleanup(&FileManager::temp_path_for(file)).await;
        }

        result
    }

    async fn transcode_and_install(&self, file: &Path) -> Result<PathBuf> {
        let temp_path = self.video_processor.transcode_to_temp(file).await?;

        // The rename below is the only write to anything but the temp file
        match self.config.mode {
            InstallMode::InPlace => {
                debug!("Replacing {} with {}", file.display(), temp_path.display());
                FileManager::replace_file(file, &temp_path).await?;
                info!("  - done: original replaced with the new encode");
                Ok(file.to_path_buf())
            }
            InstallMode::KeepOriginal => {
                let target = PathResolver::keep_original_path(file, &self.config.suffix);
                FileManager::install_as(&temp_path, &target).await?;
                info!("  - done: original kept, new file -> {}", target.display());
                Ok(target)
            }
        }
    }
}

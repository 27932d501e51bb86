//! # Video Processing Module
//!
//! Questo modulo gestisce la ricodifica dei video tramite FFmpeg.
//!
//! ## Responsabilità:
//! - Costruisce la riga di comando FFmpeg con il profilo H.264 fisso
//! - Scrive il risultato in un file temporaneo accanto all'originale
//! - Rimuove file temporanei rimasti da run precedenti
//! - Valida l'output (esistenza e dimensione > 0)
//!
//! ## Profilo di encoding (fisso, non configurabile):
//! - Codec video: libx264, profilo `high`, pixel format `yuv420p`
//! - Frame rate di output: 2 fps
//! - Bitrate: 2420k (maxrate 2420k, buffer 4840k)
//! - B-frame: 2
//! - Audio: rimosso (`-an`)
//! - `+faststart` per mettere il moov atom in testa
//!
//! ## Validazione:
//! L'output di FFmpeg non viene interpretato. Conta solo l'exit code e il
//! file temporaneo: se manca o è vuoto la ricodifica fallisce anche con
//! exit code 0.
//!
//! ## Esempio:
//! ```rust,no_run
//! use mp4_reencoder::video_processor::VideoProcessor;
//! use std::path::{Path, PathBuf};
//!
//! # async fn demo() -> mp4_reencoder::error::Result<()> {
//! let processor = VideoProcessor::new(PathBuf::from("ffmpeg"));
//! let temp = processor.transcode_to_temp(Path::new("/videos/a.mp4")).await?;
//! # Ok(())
//! # }
//! ```

use crate::error::{ReencodeError, Result};
use crate::file_manager::FileManager;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info};

/// Fixed H.264 encode parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeProfile {
    pub video_codec: &'static str,
    pub profile: &'static str,
    pub pixel_format: &'static str,
    pub frame_rate: u32,
    pub bitrate: &'static str,
    pub max_rate: &'static str,
    pub buffer_size: &'static str,
    pub b_frames: u32,
    pub drop_audio: bool,
    pub fast_start: bool,
}

impl Default for EncodeProfile {
    fn default() -> Self {
        Self {
            video_codec: "libx264",
            profile: "high",
            pixel_format: "yuv420p",
            frame_rate: 2,
            bitrate: "2420k",
            max_rate: "2420k",
            buffer_size: "4840k",
            b_frames: 2,
            drop_audio: true,
            fast_start: true,
        }
    }
}

impl EncodeProfile {
    /// FFmpeg arguments encoding `input` into `output`
    pub fn ffmpeg_args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-y".into(), "-i".into(), input.into()];

        for (flag, value) in [
            ("-c:v", self.video_codec.to_string()),
            ("-profile:v", self.profile.to_string()),
            ("-pix_fmt", self.pixel_format.to_string()),
            ("-r", self.frame_rate.to_string()),
            ("-b:v", self.bitrate.to_string()),
            ("-maxrate", self.max_rate.to_string()),
            ("-bufsize", self.buffer_size.to_string()),
            ("-bf", self.b_frames.to_string()),
        ] {
            args.push(flag.into());
            args.push(value.into());
        }

        if self.drop_audio {
            args.push("-an".into());
        }
        if self.fast_start {
            args.push("-movflags".into());
            args.push("+faststart".into());
        }

        args.push(output.into());
        args
    }
}

impl std::fmt::Display for EncodeProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}/{} @ {} fps, {} (max {}, buf {}), bf={}{}",
            self.video_codec,
            self.profile,
            self.pixel_format,
            self.frame_rate,
            self.bitrate,
            self.max_rate,
            self.buffer_size,
            self.b_frames,
            if self.drop_audio { ", no audio" } else { "" }
        )
    }
}

/// Runs the external transcoder for one file at a time
pub struct VideoProcessor {
    ffmpeg: PathBuf,
    profile: EncodeProfile,
}

impl VideoProcessor {
    pub fn new(ffmpeg: PathBuf) -> Self {
        Self {
            ffmpeg,
            profile: EncodeProfile::default(),
        }
    }

    pub fn profile(&self) -> &EncodeProfile {
        &self.profile
    }

    /// Encode `input` into its scratch path and return that path once validated
    pub async fn transcode_to_temp(&self, input: &Path) -> Result<PathBuf> {
        let temp_path = FileManager::temp_path_for(input);

        if tokio::fs::symlink_metadata(&temp_path).await.is_ok() {
            debug!("Removing stale temporary file: {}", temp_path.display());
            tokio::fs::remove_file(&temp_path).await?;
        }

        self.run_ffmpeg(input, &temp_path).await?;
        Self::validate_output(&temp_path).await?;

        Ok(temp_path)
    }

    async fn run_ffmpeg(&self, input: &Path, output: &Path) -> Result<()> {
        let mut cmd = Command::new(&self.ffmpeg);
        cmd.arg("-hide_banner");

        // Suppress FFmpeg chatter unless in debug mode
        if !tracing::enabled!(tracing::Level::DEBUG) {
            cmd.args(["-loglevel", "warning"]);
        }
        cmd.args(self.profile.ffmpeg_args(input, output));

        debug!("Running {} on {}", self.ffmpeg.display(), input.display());
        let start_time = std::time::Instant::now();

        let output_status = cmd
            .output()
            .await
            .map_err(|e| ReencodeError::TranscodeProcess {
                path: input.to_path_buf(),
                reason: format!("failed to execute {}: {}", self.ffmpeg.display(), e),
            })?;

        let duration = start_time.elapsed();

        if !output_status.status.success() {
            let stderr = String::from_utf8_lossy(&output_status.stderr);
            let mut reason = format!("{} after {:.1}s", output_status.status, duration.as_secs_f64());
            if let Some(last_line) = stderr.lines().rev().find(|l| !l.trim().is_empty()) {
                reason.push_str(": ");
                reason.push_str(last_line.trim());
            }
            return Err(ReencodeError::TranscodeProcess {
                path: input.to_path_buf(),
                reason,
            });
        }

        info!("  - encode finished in {:.1}s", duration.as_secs_f64());
        Ok(())
    }

    async fn validate_output(temp_path: &Path) -> Result<()> {
        match FileManager::file_size(temp_path).await {
            Some(size) if size > 0 => {
                debug!(
                    "Temporary output {} is {}",
                    temp_path.display(),
                    FileManager::format_size(size)
                );
                Ok(())
            }
            _ => Err(ReencodeError::TranscodeValidation(temp_path.to_path_buf())),
        }
    }
}

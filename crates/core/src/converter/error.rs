//! Error types for the converter module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while handling a conversion request.
///
/// Every variant except [`ConverterError::TranscodeFailed`] is raised during
/// validation, before the transcoder process is spawned.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// Input path is empty or does not exist.
    #[error("Input file does not exist")]
    InputNotFound { path: PathBuf },

    /// Input path does not carry the `.mp3` suffix.
    #[error("Input file must be an MP3")]
    InvalidInputFormat { path: PathBuf },

    /// Bitrate outside of the range accepted by libopus.
    #[error("Bitrate must be between 6 and 510 kbps")]
    InvalidBitrate { bitrate: i64 },

    /// VBR mode other than 0, 1 or 2.
    #[error("VBR must be 0, 1, or 2")]
    InvalidVbrMode { vbr: i64 },

    /// Channel count other than mono or stereo.
    #[error("Channels must be 1 (mono) or 2 (stereo)")]
    InvalidChannelCount { channels: i64 },

    /// Start time or duration is negative or not a finite number.
    #[error("{field} must be a non-negative number of seconds, got {value}")]
    InvalidTimeOffset { field: &'static str, value: f64 },

    /// The transcoder could not be run or exited unsuccessfully.
    #[error("FFmpeg error: {reason}")]
    TranscodeFailed { reason: String },
}

impl ConverterError {
    /// Creates a new transcode failed error.
    pub fn transcode_failed(reason: impl Into<String>) -> Self {
        Self::TranscodeFailed {
            reason: reason.into(),
        }
    }

    /// Whether this error was raised by request validation.
    ///
    /// Validation errors never leave anything behind on disk.
    pub fn is_validation_error(&self) -> bool {
        !matches!(self, Self::TranscodeFailed { .. })
    }
}

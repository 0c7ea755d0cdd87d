//! Configuration for the transcoder process.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the ffmpeg-based transcoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscoderConfig {
    /// Path to the ffmpeg binary. Bare names are looked up on `PATH`.
    #[serde(default = "default_transcoder_path")]
    pub path: PathBuf,

    /// Additional arguments placed before `-i` (e.g. `-hide_banner`).
    #[serde(default)]
    pub extra_args: Vec<String>,
}

fn default_transcoder_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            path: default_transcoder_path(),
            extra_args: Vec::new(),
        }
    }
}

impl TranscoderConfig {
    /// Creates a new config with a custom transcoder path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Sets the extra arguments.
    pub fn with_extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args = args.into_iter().map(Into::into).collect();
        self
    }
}

use std::path::PathBuf;

use clap::Parser;
use tracing::warn;

use mp3_to_opus_core::converter::{
    OptionOverrides, DEFAULT_BITRATE, DEFAULT_CHANNELS, DEFAULT_VBR,
};

/// Convert an MP3 file to Opus using ffmpeg.
#[derive(Debug, Parser)]
#[command(name = "mp3-to-opus", version, max_term_width = 80)]
pub struct Cli {
    /// Input MP3 file
    #[arg(value_name = "INPUT.mp3")]
    pub input: Option<PathBuf>,

    /// Output file [default: the input with an .opus extension]
    #[arg(value_name = "OUTPUT.opus")]
    pub output: Option<PathBuf>,

    /// Bitrate in kbps, 6-510 [default: 128]
    #[arg(long, value_name = "KBPS", allow_hyphen_values = true)]
    pub bitrate: Option<String>,

    /// Variable bitrate mode: 0=off, 1=constrained, 2=full [default: 1]
    #[arg(long, value_name = "0|1|2", allow_hyphen_values = true)]
    pub vbr: Option<String>,

    /// Audio channels: 1=mono, 2=stereo [default: 2]
    #[arg(long, value_name = "1|2", allow_hyphen_values = true)]
    pub channels: Option<String>,

    /// Start time in seconds
    #[arg(long, value_name = "SECONDS", allow_hyphen_values = true)]
    pub start: Option<String>,

    /// Duration in seconds
    #[arg(long, value_name = "SECONDS", allow_hyphen_values = true)]
    pub duration: Option<String>,

    /// Path to config file
    #[arg(long, value_name = "PATH", env = "MP3OPUS_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Builds option overrides from the numeric flags.
    ///
    /// Values that do not parse fall back to the default for bitrate, vbr and
    /// channels, and are dropped for start and duration.
    pub fn overrides(&self) -> OptionOverrides {
        OptionOverrides {
            bitrate: self
                .bitrate
                .as_deref()
                .map(|raw| int_or_default("bitrate", raw, DEFAULT_BITRATE)),
            vbr: self
                .vbr
                .as_deref()
                .map(|raw| int_or_default("vbr", raw, DEFAULT_VBR)),
            channels: self
                .channels
                .as_deref()
                .map(|raw| int_or_default("channels", raw, DEFAULT_CHANNELS)),
            start_time: self.start.as_deref().and_then(|raw| seconds("start", raw)),
            duration: self
                .duration
                .as_deref()
                .and_then(|raw| seconds("duration", raw)),
        }
    }
}

fn int_or_default(flag: &str, raw: &str, default: i64) -> i64 {
    match raw.trim().parse::<i64>() {
        Ok(value) => value,
        Err(e) => {
            warn!(flag, value = raw, default, error = %e, "Unparseable value, using default");
            default
        }
    }
}

fn seconds(flag: &str, raw: &str) -> Option<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(flag, value = raw, error = %e, "Unparseable value, ignoring");
            None
        }
    }
}

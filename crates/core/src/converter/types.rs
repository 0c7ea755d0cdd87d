//! Types for the converter module.

use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// Default target bitrate in kbps.
pub const DEFAULT_BITRATE: i64 = 128;
/// Default VBR mode (constrained).
pub const DEFAULT_VBR: i64 = 1;
/// Default channel count (stereo).
pub const DEFAULT_CHANNELS: i64 = 2;

/// Message carried by every successful [`ConversionResult`].
pub const SUCCESS_MESSAGE: &str = "Conversion completed successfully";

/// Opus variable bitrate mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VbrMode {
    /// Hard constant bitrate.
    Off,
    /// Constrained variable bitrate.
    Constrained,
    /// Full variable bitrate.
    On,
}

impl VbrMode {
    /// Maps the numeric option value (0, 1 or 2) to a mode.
    pub fn from_option(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Off),
            1 => Some(Self::Constrained),
            2 => Some(Self::On),
            _ => None,
        }
    }

    /// Returns the value libopus expects for `-vbr`.
    pub fn ffmpeg_arg(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Constrained => "constrained",
            Self::On => "on",
        }
    }
}

/// Fully merged conversion options.
///
/// Integer fields hold whatever the caller asked for; range checks happen
/// when a request is validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionOptions {
    /// Target bitrate in kbps (6-510).
    pub bitrate: i64,
    /// VBR mode: 0 = off, 1 = constrained, 2 = on.
    pub vbr: i64,
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: i64,
    /// Offset into the input to start from, in seconds.
    pub start_time: Option<f64>,
    /// Maximum duration of the output, in seconds.
    pub duration: Option<f64>,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            bitrate: DEFAULT_BITRATE,
            vbr: DEFAULT_VBR,
            channels: DEFAULT_CHANNELS,
            start_time: None,
            duration: None,
        }
    }
}

/// Caller-supplied options. Unset fields fall back to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vbr: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl OptionOverrides {
    /// Sets the bitrate.
    pub fn with_bitrate(mut self, bitrate: i64) -> Self {
        self.bitrate = Some(bitrate);
        self
    }

    /// Sets the VBR mode.
    pub fn with_vbr(mut self, vbr: i64) -> Self {
        self.vbr = Some(vbr);
        self
    }

    /// Sets the channel count.
    pub fn with_channels(mut self, channels: i64) -> Self {
        self.channels = Some(channels);
        self
    }

    /// Sets the start offset in seconds.
    pub fn with_start_time(mut self, seconds: f64) -> Self {
        self.start_time = Some(seconds);
        self
    }

    /// Sets the duration in seconds.
    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    /// Applies these overrides on top of the default options.
    pub fn merge_over_defaults(&self) -> ConversionOptions {
        let defaults = ConversionOptions::default();
        ConversionOptions {
            bitrate: self.bitrate.unwrap_or(defaults.bitrate),
            vbr: self.vbr.unwrap_or(defaults.vbr),
            channels: self.channels.unwrap_or(defaults.channels),
            start_time: self.start_time.or(defaults.start_time),
            duration: self.duration.or(defaults.duration),
        }
    }
}

/// A conversion request as supplied by the caller.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// Input MP3 file.
    pub input_path: PathBuf,
    /// Output file. Derived from the input when absent.
    pub output_path: Option<PathBuf>,
    /// Options to apply over the defaults.
    pub options: OptionOverrides,
}

impl ConversionRequest {
    /// Creates a request with default options and a derived output path.
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: None,
            options: OptionOverrides::default(),
        }
    }

    /// Sets an explicit output path.
    pub fn with_output(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(output_path.into());
        self
    }

    /// Sets the option overrides.
    pub fn with_options(mut self, options: OptionOverrides) -> Self {
        self.options = options;
        self
    }
}

/// A validated request, ready to hand to a transcoder.
///
/// Built by [`validate_request`](super::validate_request), which guarantees
/// every value in here is in range.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscodeJob {
    /// Existing `.mp3` input file.
    pub input_path: PathBuf,
    /// Resolved output file.
    pub output_path: PathBuf,
    /// Merged options.
    pub options: ConversionOptions,
    /// Parsed VBR mode.
    pub vbr: VbrMode,
}

/// A fully built transcoder invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscodeCommand {
    /// Executable to run.
    pub program: PathBuf,
    /// Arguments, one per entry. No shell is involved.
    pub args: Vec<OsString>,
}

impl TranscodeCommand {
    /// Whether the given flag is immediately followed by the given value.
    pub fn has_arg_pair(&self, flag: &str, value: &str) -> bool {
        self.args
            .windows(2)
            .any(|pair| pair[0] == flag && pair[1] == value)
    }

    /// Whether the given argument appears anywhere.
    pub fn has_arg(&self, arg: impl AsRef<Path>) -> bool {
        self.args.iter().any(|a| Path::new(a) == arg.as_ref())
    }
}

impl fmt::Display for TranscodeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;

        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }

        Ok(())
    }
}

/// Result of a successful conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Input file path.
    pub input: PathBuf,
    /// Output file path.
    pub output: PathBuf,
    /// Fixed success message.
    pub message: String,
    /// Options the conversion ran with.
    pub options: ConversionOptions,
}

//! Request validation and output path resolution.

use std::path::{Path, PathBuf};

use super::error::ConverterError;
use super::types::{ConversionRequest, TranscodeJob, VbrMode};

/// Suffix every input file must carry.
pub const INPUT_SUFFIX: &str = ".mp3";

/// Extension given to derived output files.
pub const OUTPUT_EXTENSION: &str = "opus";

/// Accepted bitrate range in kbps.
pub const BITRATE_RANGE: std::ops::RangeInclusive<i64> = 6..=510;

/// Validates a request and resolves its output path.
///
/// Checks run in a fixed order and the first failure is returned. Nothing is
/// spawned or written here.
pub fn validate_request(request: &ConversionRequest) -> Result<TranscodeJob, ConverterError> {
    let input_path = &request.input_path;

    if input_path.as_os_str().is_empty() || !input_path.exists() {
        return Err(ConverterError::InputNotFound {
            path: input_path.clone(),
        });
    }

    if !has_mp3_suffix(input_path) {
        return Err(ConverterError::InvalidInputFormat {
            path: input_path.clone(),
        });
    }

    let options = request.options.merge_over_defaults();

    if !BITRATE_RANGE.contains(&options.bitrate) {
        return Err(ConverterError::InvalidBitrate {
            bitrate: options.bitrate,
        });
    }

    let vbr = VbrMode::from_option(options.vbr)
        .ok_or(ConverterError::InvalidVbrMode { vbr: options.vbr })?;

    if !matches!(options.channels, 1 | 2) {
        return Err(ConverterError::InvalidChannelCount {
            channels: options.channels,
        });
    }

    check_seconds("startTime", options.start_time)?;
    check_seconds("duration", options.duration)?;

    let output_path = match &request.output_path {
        Some(path) => path.clone(),
        None => derive_output_path(input_path),
    };

    Ok(TranscodeJob {
        input_path: input_path.clone(),
        output_path,
        options,
        vbr,
    })
}

/// Derives `<dir>/<stem>.opus` from `<dir>/<stem>.mp3`.
pub fn derive_output_path(input_path: &Path) -> PathBuf {
    let name = input_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = name.strip_suffix(INPUT_SUFFIX).unwrap_or(&name);

    input_path.with_file_name(format!("{}.{}", stem, OUTPUT_EXTENSION))
}

/// Literal, case-sensitive suffix check.
fn has_mp3_suffix(path: &Path) -> bool {
    path.to_string_lossy().ends_with(INPUT_SUFFIX)
}

fn check_seconds(field: &'static str, value: Option<f64>) -> Result<(), ConverterError> {
    match value {
        Some(value) if !value.is_finite() || value < 0.0 => {
            Err(ConverterError::InvalidTimeOffset { field, value })
        }
        _ => Ok(()),
    }
}

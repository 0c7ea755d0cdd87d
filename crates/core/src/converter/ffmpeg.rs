//! FFmpeg-based transcoder implementation.

use async_trait::async_trait;
use std::ffi::OsString;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::{debug, info, warn};

use super::config::TranscoderConfig;
use super::error::ConverterError;
use super::traits::Transcoder;
use super::types::{TranscodeCommand, TranscodeJob};

/// Audio encoder requested from ffmpeg.
const OPUS_ENCODER: &str = "libopus";

/// FFmpeg-based transcoder implementation.
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    config: TranscoderConfig,
}

impl FfmpegTranscoder {
    /// Creates a new FFmpeg transcoder with the given configuration.
    pub fn new(config: TranscoderConfig) -> Self {
        Self { config }
    }

    /// Creates a transcoder with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(TranscoderConfig::default())
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &TranscoderConfig {
        &self.config
    }

    /// Builds the ffmpeg invocation for a validated job.
    pub fn build_command(&self, job: &TranscodeJob) -> TranscodeCommand {
        let options = &job.options;

        let mut args: Vec<OsString> = self.config.extra_args.iter().map(OsString::from).collect();

        args.push(OsString::from("-i"));
        args.push(job.input_path.clone().into_os_string());

        let codec_args = [
            "-c:a".to_string(),
            OPUS_ENCODER.to_string(),
            "-b:a".to_string(),
            format!("{}k", options.bitrate),
            "-vbr".to_string(),
            job.vbr.ffmpeg_arg().to_string(),
            "-ac".to_string(),
            options.channels.to_string(),
        ];
        args.extend(codec_args.into_iter().map(OsString::from));

        if let Some(start) = options.start_time {
            args.push(OsString::from("-ss"));
            args.push(OsString::from(start.to_string()));
        }

        if let Some(duration) = options.duration {
            args.push(OsString::from("-t"));
            args.push(OsString::from(duration.to_string()));
        }

        args.push(job.output_path.clone().into_os_string());

        // Overwrite output
        args.push(OsString::from("-y"));

        TranscodeCommand {
            program: self.config.path.clone(),
            args,
        }
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn transcode(&self, job: &TranscodeJob) -> Result<(), ConverterError> {
        let command = self.build_command(job);
        let start = Instant::now();

        debug!(command = %command, "Running transcoder");

        let output = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                warn!(program = %command.program.display(), error = %e, "Failed to run transcoder");
                ConverterError::transcode_failed(format!("{}: {}", command.program.display(), e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);

            warn!(
                status = %output.status,
                input = %job.input_path.display(),
                "Transcoder exited unsuccessfully"
            );

            let reason = if stderr.trim().is_empty() {
                format!("{} exited with {}", command.program.display(), output.status)
            } else {
                stderr.into_owned()
            };

            return Err(ConverterError::transcode_failed(reason));
        }

        info!(
            input = %job.input_path.display(),
            output = %job.output_path.display(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Transcode finished"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::types::{ConversionOptions, VbrMode};
    use std::path::PathBuf;

    fn job_with(options: ConversionOptions) -> TranscodeJob {
        let vbr = VbrMode::from_option(options.vbr).unwrap();
        TranscodeJob {
            input_path: PathBuf::from("/music/input.mp3"),
            output_path: PathBuf::from("/music/input.opus"),
            options,
            vbr,
        }
    }

    fn args_of(command: &TranscodeCommand) -> Vec<String> {
        command
            .args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_build_command_defaults() {
        let transcoder = FfmpegTranscoder::with_defaults();
        let command = transcoder.build_command(&job_with(ConversionOptions::default()));

        assert_eq!(command.program, PathBuf::from("ffmpeg"));
        assert_eq!(
            args_of(&command),
            vec![
                "-i",
                "/music/input.mp3",
                "-c:a",
                "libopus",
                "-b:a",
                "128k",
                "-vbr",
                "constrained",
                "-ac",
                "2",
                "/music/input.opus",
                "-y",
            ]
        );
        assert!(!command.has_arg("-ss"));
        assert!(!command.has_arg("-t"));
    }

    #[test]
    fn test_build_command_with_times() {
        let transcoder = FfmpegTranscoder::with_defaults();
        let command = transcoder.build_command(&job_with(ConversionOptions {
            start_time: Some(5.0),
            duration: Some(10.0),
            ..Default::default()
        }));

        assert!(command.has_arg_pair("-ss", "5"));
        assert!(command.has_arg_pair("-t", "10"));

        let args = args_of(&command);
        let ss = args.iter().position(|a| a == "-ss").unwrap();
        let t = args.iter().position(|a| a == "-t").unwrap();
        let out = args.iter().position(|a| a == "/music/input.opus").unwrap();
        assert!(ss < t && t < out);
        assert_eq!(args.last().map(String::as_str), Some("-y"));
    }

    #[test]
    fn test_build_command_fractional_seconds_and_modes() {
        let transcoder = FfmpegTranscoder::with_defaults();
        let command = transcoder.build_command(&job_with(ConversionOptions {
            bitrate: 64,
            vbr: 0,
            channels: 1,
            start_time: Some(2.5),
            duration: None,
        }));

        assert!(command.has_arg_pair("-b:a", "64k"));
        assert!(command.has_arg_pair("-vbr", "off"));
        assert!(command.has_arg_pair("-ac", "1"));
        assert!(command.has_arg_pair("-ss", "2.5"));
        assert!(!command.has_arg("-t"));

        let command = transcoder.build_command(&job_with(ConversionOptions {
            vbr: 2,
            ..Default::default()
        }));
        assert!(command.has_arg_pair("-vbr", "on"));
    }

    #[test]
    fn test_extra_args_precede_input() {
        let transcoder = FfmpegTranscoder::new(
            TranscoderConfig::with_path("/opt/ffmpeg/bin/ffmpeg")
                .with_extra_args(["-hide_banner", "-loglevel", "error"]),
        );
        let command = transcoder.build_command(&job_with(ConversionOptions::default()));

        assert_eq!(command.program, PathBuf::from("/opt/ffmpeg/bin/ffmpeg"));
        assert_eq!(
            &args_of(&command)[..4],
            &["-hide_banner", "-loglevel", "error", "-i"]
        );
    }

    #[test]
    fn test_paths_with_spaces_stay_single_arguments() {
        let transcoder = FfmpegTranscoder::with_defaults();
        let mut job = job_with(ConversionOptions::default());
        job.input_path = PathBuf::from("/music/My Album/01 intro.mp3");

        let command = transcoder.build_command(&job);
        assert!(command.has_arg_pair("-i", "/music/My Album/01 intro.mp3"));
        assert!(command
            .to_string()
            .contains("-i \"/music/My Album/01 intro.mp3\""));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_transcode_success() {
        let transcoder = FfmpegTranscoder::new(TranscoderConfig::with_path("true"));
        transcoder
            .transcode(&job_with(ConversionOptions::default()))
            .await
            .unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_transcode_failure_carries_stderr() {
        // `sh -c <script> sh <ffmpeg args...>` runs the script with the
        // ffmpeg arguments as positional parameters.
        let transcoder = FfmpegTranscoder::new(
            TranscoderConfig::with_path("sh").with_extra_args([
                "-c",
                "echo \"$2: Invalid data found when processing input\" >&2; exit 1",
                "sh",
            ]),
        );

        let err = transcoder
            .transcode(&job_with(ConversionOptions::default()))
            .await
            .unwrap_err();

        match err {
            ConverterError::TranscodeFailed { reason } => {
                assert_eq!(
                    reason,
                    "/music/input.mp3: Invalid data found when processing input\n"
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_transcode_failure_without_stderr() {
        let transcoder = FfmpegTranscoder::new(TranscoderConfig::with_path("false"));

        let err = transcoder
            .transcode(&job_with(ConversionOptions::default()))
            .await
            .unwrap_err();

        match err {
            ConverterError::TranscodeFailed { reason } => {
                assert!(reason.starts_with("false exited with"), "{}", reason);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transcode_missing_binary() {
        let transcoder =
            FfmpegTranscoder::new(TranscoderConfig::with_path("/nonexistent/bin/ffmpeg"));

        let err = transcoder
            .transcode(&job_with(ConversionOptions::default()))
            .await
            .unwrap_err();

        match err {
            ConverterError::TranscodeFailed { reason } => {
                assert!(reason.starts_with("/nonexistent/bin/ffmpeg: "), "{}", reason);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}

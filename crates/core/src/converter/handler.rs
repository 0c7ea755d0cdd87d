//! Validate-and-convert entry points.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::config::TranscoderConfig;
use super::error::ConverterError;
use super::ffmpeg::FfmpegTranscoder;
use super::traits::Transcoder;
use super::types::{ConversionRequest, ConversionResult, OptionOverrides, SUCCESS_MESSAGE};
use super::validate::validate_request;

/// Validates conversion requests and hands them to a [`Transcoder`].
///
/// Holds no per-request state, so one handler can serve any number of
/// concurrent requests. Cloning is cheap.
pub struct ConversionRequestHandler<T> {
    transcoder: Arc<T>,
}

impl<T> Clone for ConversionRequestHandler<T> {
    fn clone(&self) -> Self {
        Self {
            transcoder: Arc::clone(&self.transcoder),
        }
    }
}

impl ConversionRequestHandler<FfmpegTranscoder> {
    /// Creates a handler backed by ffmpeg.
    pub fn ffmpeg(config: TranscoderConfig) -> Self {
        Self::new(FfmpegTranscoder::new(config))
    }
}

impl<T> ConversionRequestHandler<T>
where
    T: Transcoder + 'static,
{
    /// Creates a handler owning the given transcoder.
    pub fn new(transcoder: T) -> Self {
        Self::from_shared(Arc::new(transcoder))
    }

    /// Creates a handler around a transcoder shared with the caller.
    pub fn from_shared(transcoder: Arc<T>) -> Self {
        Self { transcoder }
    }

    /// Returns the underlying transcoder.
    pub fn transcoder(&self) -> &T {
        &self.transcoder
    }

    /// Validates the request, runs the transcoder and returns the result.
    ///
    /// Validation errors are returned before the transcoder is invoked.
    pub async fn convert(
        &self,
        request: ConversionRequest,
    ) -> Result<ConversionResult, ConverterError> {
        let job = validate_request(&request).inspect_err(|e| {
            debug!(input = %request.input_path.display(), error = %e, "Rejected conversion request");
        })?;

        debug!(
            transcoder = self.transcoder.name(),
            input = %job.input_path.display(),
            output = %job.output_path.display(),
            "Starting conversion"
        );

        self.transcoder.transcode(&job).await?;

        Ok(ConversionResult {
            input: job.input_path,
            output: job.output_path,
            message: SUCCESS_MESSAGE.to_string(),
            options: job.options,
        })
    }

    /// Runs [`convert`](Self::convert) on the current tokio runtime and hands
    /// the outcome to `callback`.
    ///
    /// The callback runs exactly once, with either the result or the error.
    /// The returned handle completes after the callback has returned.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn convert_with_callback<F>(&self, request: ConversionRequest, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<ConversionResult, ConverterError>) + Send + 'static,
    {
        let handler = self.clone();

        tokio::spawn(async move {
            let result = handler.convert(request).await;
            callback(result);
        })
    }
}

/// Converts `input_path` to Opus with the default ffmpeg transcoder.
///
/// When `output_path` is `None` the output is written next to the input with
/// an `.opus` extension.
pub async fn convert_mp3_to_opus(
    input_path: impl Into<PathBuf>,
    output_path: Option<PathBuf>,
    options: OptionOverrides,
) -> Result<ConversionResult, ConverterError> {
    let request = ConversionRequest {
        input_path: input_path.into(),
        output_path,
        options,
    };

    ConversionRequestHandler::ffmpeg(TranscoderConfig::default())
        .convert(request)
        .await
}

//! Trait definitions for the converter module.

use async_trait::async_trait;

use super::error::ConverterError;
use super::types::TranscodeJob;

/// Something that can turn a validated job into an Opus file.
///
/// Implementations run exactly once per call and never retry. A failure is
/// reported as [`ConverterError::TranscodeFailed`].
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Returns the name of this transcoder implementation.
    fn name(&self) -> &str;

    /// Runs the transcode to completion.
    async fn transcode(&self, job: &TranscodeJob) -> Result<(), ConverterError>;
}

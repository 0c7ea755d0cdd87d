//! Mock transcoder for testing.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::converter::{ConverterError, TranscodeJob, Transcoder};

/// A recorded transcode for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedTranscode {
    /// The job that was submitted.
    pub job: TranscodeJob,
    /// Whether the transcode succeeded.
    pub success: bool,
}

/// Mock implementation of the Transcoder trait.
///
/// Never spawns a process. Provides controllable behavior for testing:
/// - Track submitted jobs for assertions
/// - Simulate failure of the next call
/// - Simulate a slow transcoder
///
/// # Example
///
/// ```rust,ignore
/// use mp3_to_opus_core::testing::MockTranscoder;
///
/// let transcoder = Arc::new(MockTranscoder::new());
/// let handler = ConversionRequestHandler::from_shared(Arc::clone(&transcoder));
///
/// handler.convert(request).await?;
/// assert_eq!(transcoder.transcode_count().await, 1);
/// ```
#[derive(Debug, Default)]
pub struct MockTranscoder {
    /// Recorded transcodes.
    transcodes: Arc<RwLock<Vec<RecordedTranscode>>>,
    /// If set, the next transcode will fail with this error.
    next_error: Arc<RwLock<Option<ConverterError>>>,
    /// Simulated transcode duration in milliseconds.
    delay_ms: Arc<RwLock<u64>>,
}

impl MockTranscoder {
    /// Create a new mock transcoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded transcodes.
    pub async fn recorded_transcodes(&self) -> Vec<RecordedTranscode> {
        self.transcodes.read().await.clone()
    }

    /// Get the number of transcodes attempted.
    pub async fn transcode_count(&self) -> usize {
        self.transcodes.read().await.len()
    }

    /// Configure the next transcode to fail with the given error.
    pub async fn set_next_error(&self, error: ConverterError) {
        *self.next_error.write().await = Some(error);
    }

    /// Set the simulated transcode duration.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay_ms.write().await = delay.as_millis() as u64;
    }
}

#[async_trait]
impl Transcoder for MockTranscoder {
    fn name(&self) -> &str {
        "mock"
    }

    async fn transcode(&self, job: &TranscodeJob) -> Result<(), ConverterError> {
        let delay_ms = *self.delay_ms.read().await;
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        let error = self.next_error.write().await.take();

        self.transcodes.write().await.push(RecordedTranscode {
            job: job.clone(),
            success: error.is_none(),
        });

        match error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

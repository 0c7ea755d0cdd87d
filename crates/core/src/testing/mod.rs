//! Testing utilities.
//!
//! [`MockTranscoder`] stands in for the external ffmpeg process so callers can
//! exercise [`ConversionRequestHandler`](crate::converter::ConversionRequestHandler)
//! without any binary installed.

mod mock_transcoder;

pub use mock_transcoder::{MockTranscoder, RecordedTranscode};

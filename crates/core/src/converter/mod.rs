//! Converter module for turning MP3 files into Opus.
//!
//! All encoding is delegated to an external ffmpeg process. This module
//! validates requests, builds the ffmpeg invocation, runs it and maps the
//! outcome to a [`ConversionResult`] or a [`ConverterError`].
//!
//! # Example
//!
//! ```ignore
//! use mp3_to_opus_core::converter::{
//!     ConversionRequest, ConversionRequestHandler, OptionOverrides, TranscoderConfig,
//! };
//!
//! let handler = ConversionRequestHandler::ffmpeg(TranscoderConfig::default());
//!
//! let request = ConversionRequest::new("/music/song.mp3").with_options(
//!     OptionOverrides::default()
//!         .with_bitrate(96)
//!         .with_channels(1),
//! );
//!
//! // Awaitable delivery
//! let result = handler.convert(request.clone()).await?;
//! println!("Wrote {}", result.output.display());
//!
//! // Callback delivery
//! handler.convert_with_callback(request, |result| match result {
//!     Ok(result) => println!("{}", result.message),
//!     Err(e) => eprintln!("Error: {}", e),
//! });
//! ```

mod config;
mod error;
mod ffmpeg;
mod handler;
mod traits;
mod types;
mod validate;

pub use config::TranscoderConfig;
pub use error::ConverterError;
pub use ffmpeg::FfmpegTranscoder;
pub use handler::{convert_mp3_to_opus, ConversionRequestHandler};
pub use traits::Transcoder;
pub use types::{
    ConversionOptions, ConversionRequest, ConversionResult, OptionOverrides, TranscodeCommand,
    TranscodeJob, VbrMode, DEFAULT_BITRATE, DEFAULT_CHANNELS, DEFAULT_VBR, SUCCESS_MESSAGE,
};
pub use validate::{derive_output_path, validate_request, BITRATE_RANGE};

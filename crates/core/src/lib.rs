//! Core library for converting MP3 files to Opus through ffmpeg.

pub mod config;
pub mod converter;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, load_config_or_default, validate_config, Config,
    ConfigError,
};
pub use converter::{
    convert_mp3_to_opus, ConversionOptions, ConversionRequest, ConversionRequestHandler,
    ConversionResult, ConverterError, FfmpegTranscoder, OptionOverrides, TranscodeCommand,
    TranscodeJob, Transcoder, TranscoderConfig, VbrMode,
};

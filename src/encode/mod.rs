//! Frame encoders for capture: streamed video through `ffmpeg` and palette-quantized GIF.

pub mod ffmpeg;
pub mod gif;
pub mod quantize;
pub mod sink;

pub use ffmpeg::{FfmpegSink, VideoContainer};
pub use gif::GifSink;
pub use quantize::Palette;
pub use sink::FrameSink;

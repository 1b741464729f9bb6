//! External engines: stream retrieval and muxing

pub mod ffmpeg;
pub mod ytdlp;

pub use ffmpeg::*;
pub use ytdlp::*;

//! Core functionality for ytmerge

pub mod combiner;
pub mod formats;
pub mod pipeline;
pub mod video_info;

pub use combiner::*;
pub use formats::*;
pub use pipeline::*;
pub use video_info::*;

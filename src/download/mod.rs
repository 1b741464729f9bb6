//! Download system for ytmerge

pub mod downloader;

pub use downloader::*;

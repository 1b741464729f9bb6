//! Command line interface

pub mod args;
pub mod output;
pub mod prompt;

pub use args::{Args, VerbosityLevel};
pub use output::OutputFormatter;
pub use prompt::Prompt;

//! CLI argument parsing for the procargs binary

pub mod args;

// Re-exports
pub use args::{Args, LogFormat, OutputFormat};

//! procargs library interface
//!
//! Normalizes process startup arguments into one owned, ordered container
//! that argument parsers can consume as a count, a C-style argv array, or a
//! vector of strings.
//!
//! # Module Organization
//!
//! - [`args`] - Argument capture (ArgumentHolder, RawArgv, tokenizers)
//! - [`errors`] - Error types (ArgsError, Result)
//! - [`config`] - Default options from config.toml
//! - [`core`] - The procargs binary's execution logic

pub mod args;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod logging;
pub mod status;

pub use args::{ArgSource, ArgumentHolder, CommandLineTokenizer, RawArgv, WindowsRules};
pub use errors::{ArgsError, Result};

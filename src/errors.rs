//! Error types for procargs

use thiserror::Error;

/// Message carried by [`ArgsError::ArgumentRetrieval`] when the command-line
/// tokenizer reports failure
pub const TOKENIZER_FAILED: &str = "CommandLineToArgvW failed";

/// Main error type for procargs
#[derive(Error, Debug)]
pub enum ArgsError {
    /// The command-line tokenizer could not produce an argument vector
    #[error("Argument retrieval failed: {0}")]
    ArgumentRetrieval(String),

    #[error("Negative argument count: {0}")]
    NegativeCount(i32),

    #[error("Null argument array with non-zero count")]
    NullArgv,

    #[error("Null pointer at argv[{index}]")]
    NullArgument { index: usize },

    #[error("argv[{index}] contains an interior NUL byte")]
    InteriorNul { index: usize },

    #[error("argv[{index}] is not valid Unicode")]
    NotUnicode { index: usize },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ArgsError>;

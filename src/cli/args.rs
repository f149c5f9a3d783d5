//! CLI argument definitions using clap
//!
//! The `procargs` binary reports how an argument list is normalized: either
//! its own process arguments or a raw command line given with
//! `--command-line`.

use clap::{ArgAction, Parser, ValueEnum};

/// procargs - show the normalized argc/argv of a process or command line
#[derive(Parser, Debug, Clone)]
#[command(name = "procargs", version, about, long_about = None)]
pub struct Args {
    /// Report format
    #[arg(long = "format", value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Output format for structured logging: json (JSON Lines) or text (default)
    #[arg(long = "log-format", value_name = "FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Tokenize this raw command line instead of reporting our own arguments
    #[arg(short = 'c', long = "command-line", value_name = "CMDLINE")]
    pub command_line: Option<String>,

    /// Don't merge default options from config.toml
    #[arg(long = "no-defaults", action = ArgAction::SetTrue)]
    pub no_defaults: bool,

    /// Extra arguments, reported as-is
    #[arg(value_name = "ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub rest: Vec<String>,
}

/// Report format written to stdout
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `argc=N` followed by one `argv[i]=VALUE` line per argument
    #[default]
    Text,
    /// A single JSON object
    Json,
}

/// Log format for structured output
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Plain text output (default)
    #[default]
    Text,
    /// JSON Lines format for parsing
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["procargs"]).unwrap();
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.log_format, LogFormat::Text);
        assert!(args.command_line.is_none());
        assert!(!args.no_defaults);
        assert!(args.rest.is_empty());
    }

    #[test]
    fn test_trailing_args_keep_hyphens() {
        let args = Args::try_parse_from(["procargs", "--format", "json", "--", "-x", "y"]).unwrap();
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.rest, vec!["-x", "y"]);
    }

    #[test]
    fn test_command_line_short_flag() {
        let args = Args::try_parse_from(["procargs", "-c", "prog a b"]).unwrap();
        assert_eq!(args.command_line.as_deref(), Some("prog a b"));
    }
}

use std::io::Write;

use serde::Serialize;
use tracing::{debug, warn};

use crate::args::{ArgSource, ArgumentHolder};
use crate::cli::{Args, OutputFormat};
use crate::config::Config;
use crate::errors::{ArgsError, Result};
use crate::logging;
use crate::status::ExitStatus;

/// JSON report of a normalized argument list
#[derive(Debug, Serialize)]
pub struct ArgsReport {
    pub source: ArgSource,
    pub argc: usize,
    pub argv: Vec<String>,
}

impl From<&ArgumentHolder> for ArgsReport {
    fn from(holder: &ArgumentHolder) -> Self {
        Self {
            source: holder.source(),
            argc: holder.count(),
            argv: holder.to_strings_lossy(),
        }
    }
}

/// Main entry point for the CLI.
///
/// Merges configured default options in front of the process arguments,
/// parses the result and writes the report for either the arguments as the
/// process received them or the requested raw command line.
pub fn run(holder: ArgumentHolder) -> ExitStatus {
    let no_defaults = holder.iter().any(|a| a == "--no-defaults");

    let (default_options, config_error) = if no_defaults {
        (Vec::new(), None)
    } else {
        match Config::load() {
            Ok(config) => (config.default_options, None),
            Err(e) => (Vec::new(), Some(e)),
        }
    };

    let parsed: Args = match holder.with_default_options(&default_options).try_parse() {
        Ok(args) => args,
        Err(e) => {
            e.print().ok();
            return if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion {
                ExitStatus::Success
            } else {
                ExitStatus::Error
            };
        }
    };

    logging::init(parsed.log_format);

    if let Some(e) = config_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }
    if !default_options.is_empty() {
        debug!(?default_options, "Default options applied");
    }

    let stdout = std::io::stdout();
    match program(&parsed, holder, &mut stdout.lock()) {
        Ok(status) => status,
        Err(e) => handle_error(e),
    }
}

pub fn program<W: Write>(args: &Args, holder: ArgumentHolder, out: &mut W) -> Result<ExitStatus> {
    let target = match &args.command_line {
        Some(cmdline) => ArgumentHolder::from_raw_command_line(cmdline)?,
        None => holder,
    };

    debug!(argc = target.count(), source = ?target.source(), "Writing report");

    match args.format {
        OutputFormat::Text => write_text(&target, out)?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &ArgsReport::from(&target))?;
            writeln!(out)?;
        }
    }

    Ok(ExitStatus::Success)
}

/// Write the report through the C-style argv view
fn write_text<W: Write>(holder: &ArgumentHolder, out: &mut W) -> Result<()> {
    let raw = holder.raw_array()?;

    writeln!(out, "argc={}", raw.argc())?;
    for (i, arg) in raw.as_c_strs().iter().enumerate() {
        writeln!(out, "argv[{}]={}", i, arg.to_string_lossy())?;
    }

    Ok(())
}

fn handle_error(error: ArgsError) -> ExitStatus {
    eprintln!("Error: {}", error);
    ExitStatus::Error
}

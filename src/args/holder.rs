//! The argument holder
//!
//! [`ArgumentHolder`] copies a process's startup arguments into owned storage
//! once, then hands them out as a count, an argv view, or a fresh vector.

use std::ffi::{c_char, c_int, CStr, OsStr, OsString};

use tracing::debug;

use super::cmdline::CommandLineTokenizer;
#[cfg(not(windows))]
use super::cmdline::WindowsRules;
use super::raw::RawArgv;
use crate::errors::{ArgsError, Result, TOKENIZER_FAILED};

/// Where the arguments of a holder came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArgSource {
    /// argc/argv or an argument iterator such as `std::env::args_os`
    EntryPoint,
    /// A raw command-line string split by a tokenizer
    CommandLine,
}

/// Owned, ordered process arguments, program name first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentHolder {
    arguments: Vec<OsString>,
    source: ArgSource,
}

impl ArgumentHolder {
    /// Copy the arguments handed to a C-style `main`.
    ///
    /// A zero count gives an empty holder, whatever `argv` is.
    ///
    /// # Safety
    /// When `argc > 0`, `argv` must point to at least `argc` readable entries,
    /// and every non-null entry must be a valid NUL-terminated string.
    pub unsafe fn from_argc_argv(argc: c_int, argv: *const *const c_char) -> Result<Self> {
        let count = checked_count(argc, argv.is_null())?;

        let mut arguments = Vec::with_capacity(count);
        for index in 0..count {
            // SAFETY: caller guarantees argv has argc readable entries
            let ptr = unsafe { *argv.add(index) };
            if ptr.is_null() {
                return Err(ArgsError::NullArgument { index });
            }
            // SAFETY: caller guarantees non-null entries are C strings
            let arg = unsafe { CStr::from_ptr(ptr) };
            arguments.push(os_string_from_narrow(arg));
        }

        Ok(Self::build(arguments, ArgSource::EntryPoint))
    }

    /// Copy the arguments handed to a `wmain`-style entry point.
    ///
    /// # Safety
    /// Same as [`from_argc_argv`](Self::from_argc_argv), with NUL-terminated
    /// UTF-16 strings.
    #[cfg(windows)]
    pub unsafe fn from_argc_argv_wide(argc: c_int, argv: *const *const u16) -> Result<Self> {
        use std::os::windows::ffi::OsStringExt;

        let count = checked_count(argc, argv.is_null())?;

        let mut arguments = Vec::with_capacity(count);
        for index in 0..count {
            // SAFETY: caller guarantees argv has argc readable entries
            let ptr = unsafe { *argv.add(index) };
            if ptr.is_null() {
                return Err(ArgsError::NullArgument { index });
            }
            let mut len = 0;
            // SAFETY: caller guarantees non-null entries are NUL-terminated
            while unsafe { *ptr.add(len) } != 0 {
                len += 1;
            }
            let wide = unsafe { std::slice::from_raw_parts(ptr, len) };
            arguments.push(OsString::from_wide(wide));
        }

        Ok(Self::build(arguments, ArgSource::EntryPoint))
    }

    /// Build a holder from any argument iterator
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self::build(args.into_iter().map(Into::into).collect(), ArgSource::EntryPoint)
    }

    /// Build a holder from this process's own arguments
    pub fn from_env() -> Self {
        Self::from_args(std::env::args_os())
    }

    /// Split a raw command-line string using the Windows quoting rules.
    ///
    /// On Windows this calls `CommandLineToArgvW`; elsewhere
    /// [`WindowsRules`](crate::args::WindowsRules)
    /// applies the same rules.
    pub fn from_raw_command_line(cmdline: &str) -> Result<Self> {
        #[cfg(windows)]
        return Self::from_raw_command_line_with(cmdline, &super::win32::Shell32);

        #[cfg(not(windows))]
        return Self::from_raw_command_line_with(cmdline, &WindowsRules);
    }

    /// Read this process's command line with `GetCommandLineW` and split it
    /// with `CommandLineToArgvW`
    #[cfg(windows)]
    pub fn from_process_command_line() -> Result<Self> {
        let cmdline = super::win32::process_command_line();
        let arguments = super::win32::command_line_to_argv(&cmdline)
            .ok_or_else(|| ArgsError::ArgumentRetrieval(TOKENIZER_FAILED.to_string()))?;

        Ok(Self::build(arguments, ArgSource::CommandLine))
    }

    /// Split a raw command-line string with an explicit tokenizer.
    ///
    /// Fails with [`ArgsError::ArgumentRetrieval`] when the tokenizer does.
    pub fn from_raw_command_line_with<T>(cmdline: &str, tokenizer: &T) -> Result<Self>
    where
        T: CommandLineTokenizer + ?Sized,
    {
        let tokens = tokenizer
            .tokenize(cmdline)
            .ok_or_else(|| ArgsError::ArgumentRetrieval(TOKENIZER_FAILED.to_string()))?;

        Ok(Self::build(
            tokens.into_iter().map(OsString::from).collect(),
            ArgSource::CommandLine,
        ))
    }

    fn build(arguments: Vec<OsString>, source: ArgSource) -> Self {
        debug!(argc = arguments.len(), ?source, "Arguments captured");
        Self { arguments, source }
    }

    /// Number of stored arguments
    pub fn count(&self) -> usize {
        self.arguments.len()
    }

    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    pub fn source(&self) -> ArgSource {
        self.source
    }

    pub fn get(&self, index: usize) -> Option<&OsStr> {
        self.arguments.get(index).map(OsString::as_os_str)
    }

    /// argv[0], if there is one
    pub fn program_name(&self) -> Option<&OsStr> {
        self.get(0)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &OsStr> + '_ {
        self.arguments.iter().map(OsString::as_os_str)
    }

    /// Build a C-style argv view of the arguments.
    ///
    /// An empty holder gives an empty view whose pointer is null.
    pub fn raw_array(&self) -> Result<RawArgv> {
        RawArgv::new(self.iter())
    }

    /// Build a UTF-16 argv view of the arguments
    #[cfg(windows)]
    pub fn raw_array_wide(&self) -> Result<super::raw::RawArgvW> {
        super::raw::RawArgvW::new(self.iter())
    }

    /// A fresh copy of the arguments, in order
    pub fn to_sequence(&self) -> Vec<OsString> {
        self.arguments.clone()
    }

    /// A fresh copy of the arguments as `String`s.
    ///
    /// Fails on the first argument that is not valid Unicode.
    pub fn to_strings(&self) -> Result<Vec<String>> {
        self.arguments
            .iter()
            .enumerate()
            .map(|(index, arg)| {
                arg.to_str()
                    .map(str::to_owned)
                    .ok_or(ArgsError::NotUnicode { index })
            })
            .collect()
    }

    pub fn to_strings_lossy(&self) -> Vec<String> {
        self.arguments
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    /// Hand the arguments to a clap parser
    pub fn try_parse<P: clap::Parser>(&self) -> std::result::Result<P, clap::Error> {
        P::try_parse_from(self.to_sequence())
    }

    /// Return a new holder with `options` inserted, as written, right after
    /// the program name.
    ///
    /// An empty holder has no program name to anchor on and is returned
    /// unchanged.
    pub fn with_default_options(&self, options: &[String]) -> Self {
        let Some((program, rest)) = self.arguments.split_first() else {
            return self.clone();
        };
        if options.is_empty() {
            return self.clone();
        }

        let mut merged = Vec::with_capacity(self.arguments.len() + options.len());
        merged.push(program.clone());
        merged.extend(options.iter().map(OsString::from));
        merged.extend(rest.iter().cloned());

        debug!(added = options.len(), "Default options merged");
        Self {
            arguments: merged,
            source: self.source,
        }
    }
}

impl<'a> IntoIterator for &'a ArgumentHolder {
    type Item = &'a OsStr;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, OsString>, fn(&'a OsString) -> &'a OsStr>;

    fn into_iter(self) -> Self::IntoIter {
        self.arguments.iter().map(OsString::as_os_str as fn(&'a OsString) -> &'a OsStr)
    }
}

fn checked_count(argc: c_int, argv_is_null: bool) -> Result<usize> {
    if argc < 0 {
        return Err(ArgsError::NegativeCount(argc));
    }
    if argc > 0 && argv_is_null {
        return Err(ArgsError::NullArgv);
    }
    usize::try_from(argc).map_err(|_| ArgsError::NegativeCount(argc))
}

#[cfg(unix)]
fn os_string_from_narrow(arg: &CStr) -> OsString {
    use std::os::unix::ffi::OsStrExt;
    OsStr::from_bytes(arg.to_bytes()).to_os_string()
}

#[cfg(not(unix))]
fn os_string_from_narrow(arg: &CStr) -> OsString {
    OsString::from(arg.to_string_lossy().into_owned())
}

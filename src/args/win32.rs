//! shell32 command-line splitting
//!
//! Only built on Windows. The buffer returned by `CommandLineToArgvW` is owned
//! by [`LocalBuffer`] and released with `LocalFree` when it goes out of scope.

use std::ffi::{c_int, OsStr, OsString};
use std::os::windows::ffi::{OsStrExt, OsStringExt};

use winapi::um::{processenv, shellapi, winbase};

use super::cmdline::CommandLineTokenizer;

/// Tokenizer calling `CommandLineToArgvW` itself
#[derive(Debug, Clone, Copy, Default)]
pub struct Shell32;

impl CommandLineTokenizer for Shell32 {
    fn tokenize(&self, cmdline: &str) -> Option<Vec<String>> {
        let wide = to_wide(OsStr::new(cmdline))?;
        let args = command_line_to_argv(&wide)?;
        Some(args.into_iter().map(|a| a.to_string_lossy().into_owned()).collect())
    }
}

struct LocalBuffer(*mut *mut u16);

impl Drop for LocalBuffer {
    fn drop(&mut self) {
        if !self.0.is_null() {
            // SAFETY: the pointer came from CommandLineToArgvW and is freed once
            unsafe {
                winbase::LocalFree(self.0 as *mut _);
            }
        }
    }
}

/// The raw command line of the current process
pub fn process_command_line() -> Vec<u16> {
    // SAFETY: GetCommandLineW returns a NUL-terminated string owned by the
    // process that lives as long as the process
    unsafe {
        let ptr = processenv::GetCommandLineW();
        let mut wide = wide_slice(ptr).to_vec();
        wide.push(0);
        wide
    }
}

/// Split a NUL-terminated UTF-16 command line; `None` when shell32 fails
pub fn command_line_to_argv(cmdline: &[u16]) -> Option<Vec<OsString>> {
    debug_assert_eq!(cmdline.last(), Some(&0));

    let mut count: c_int = 0;
    // SAFETY: cmdline is NUL-terminated and count is a valid out pointer
    let buffer = LocalBuffer(unsafe { shellapi::CommandLineToArgvW(cmdline.as_ptr(), &mut count) });
    if buffer.0.is_null() {
        return None;
    }

    let count = usize::try_from(count).ok()?;
    let args = (0..count)
        .map(|i| {
            // SAFETY: shell32 returned `count` NUL-terminated entries
            let arg = unsafe { wide_slice(*buffer.0.add(i)) };
            OsString::from_wide(arg)
        })
        .collect();

    Some(args)
}

fn to_wide(s: &OsStr) -> Option<Vec<u16>> {
    let mut wide: Vec<u16> = s.encode_wide().collect();
    if wide.contains(&0) {
        return None;
    }
    wide.push(0);
    Some(wide)
}

/// # Safety
/// `ptr` must be a valid NUL-terminated UTF-16 string.
unsafe fn wide_slice<'a>(ptr: *const u16) -> &'a [u16] {
    let mut len = 0;
    while unsafe { *ptr.add(len) } != 0 {
        len += 1;
    }
    unsafe { std::slice::from_raw_parts(ptr, len) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::cmdline::WindowsRules;

    #[test]
    fn test_shell32_matches_windows_rules() {
        for cmdline in [
            r#"prog --flag "quoted value""#,
            r#""C:\a b\x.exe"foo bar"#,
            r#"prog "a""b c" d"#,
            r#"prog a\\\"b "c d\\" e"#,
        ] {
            assert_eq!(
                Shell32.tokenize(cmdline),
                WindowsRules.tokenize(cmdline),
                "{cmdline}"
            );
        }
    }

    #[test]
    fn test_process_command_line_splits() {
        let args = command_line_to_argv(&process_command_line()).unwrap();
        assert_eq!(args.len(), std::env::args_os().count());
    }

    #[test]
    fn test_interior_nul_fails() {
        assert!(Shell32.tokenize("prog\0a").is_none());
    }
}

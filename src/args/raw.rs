//! argc/argv views for APIs that expect an array of C strings

use std::ffi::{c_char, c_int, CString, OsStr};
use std::ptr;

use crate::errors::{ArgsError, Result};

/// Narrow argv view built on demand from an [`ArgumentHolder`](super::ArgumentHolder)
///
/// Owns the C strings and a NULL-terminated pointer array into them, so the
/// pointers stay valid for as long as the view is alive.
#[derive(Debug)]
pub struct RawArgv {
    strings: Vec<CString>,
    pointers: Vec<*const c_char>,
}

impl RawArgv {
    pub(crate) fn new<'a, I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a OsStr>,
    {
        let strings = args
            .into_iter()
            .enumerate()
            .map(|(index, arg)| {
                CString::new(narrow_bytes(arg)).map_err(|_| ArgsError::InteriorNul { index })
            })
            .collect::<Result<Vec<_>>>()?;

        let pointers = strings
            .iter()
            .map(|s| s.as_ptr())
            .chain(std::iter::once(ptr::null()))
            .collect();

        Ok(Self { strings, pointers })
    }

    /// Argument count, as `main` would receive it
    pub fn argc(&self) -> c_int {
        c_int::try_from(self.strings.len()).unwrap_or(c_int::MAX)
    }

    /// Pointer to the first element of the argv array.
    ///
    /// The array holds `argc()` entries followed by a NULL terminator. For an
    /// empty view this is a null pointer rather than a pointer to the
    /// terminator, so callers must check `argc()` before dereferencing.
    pub fn as_ptr(&self) -> *const *const c_char {
        if self.strings.is_empty() {
            ptr::null()
        } else {
            self.pointers.as_ptr()
        }
    }

    pub fn as_c_strs(&self) -> &[CString] {
        &self.strings
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

#[cfg(unix)]
fn narrow_bytes(arg: &OsStr) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    arg.as_bytes().to_vec()
}

#[cfg(not(unix))]
fn narrow_bytes(arg: &OsStr) -> Vec<u8> {
    arg.to_string_lossy().into_owned().into_bytes()
}

/// Wide (UTF-16) argv view, the `wchar_t**` form Windows APIs take
#[cfg(windows)]
#[derive(Debug)]
pub struct RawArgvW {
    strings: Vec<Vec<u16>>,
    pointers: Vec<*const u16>,
}

#[cfg(windows)]
impl RawArgvW {
    pub(crate) fn new<'a, I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a OsStr>,
    {
        use std::os::windows::ffi::OsStrExt;

        let strings = args
            .into_iter()
            .enumerate()
            .map(|(index, arg)| {
                let mut wide: Vec<u16> = arg.encode_wide().collect();
                if wide.contains(&0) {
                    return Err(ArgsError::InteriorNul { index });
                }
                wide.push(0);
                Ok(wide)
            })
            .collect::<Result<Vec<_>>>()?;

        let pointers = strings
            .iter()
            .map(|s| s.as_ptr())
            .chain(std::iter::once(ptr::null()))
            .collect();

        Ok(Self { strings, pointers })
    }

    pub fn argc(&self) -> c_int {
        c_int::try_from(self.strings.len()).unwrap_or(c_int::MAX)
    }

    /// Same contract as [`RawArgv::as_ptr`]
    pub fn as_ptr(&self) -> *const *const u16 {
        if self.strings.is_empty() {
            ptr::null()
        } else {
            self.pointers.as_ptr()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

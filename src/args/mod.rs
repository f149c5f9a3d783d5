//! Process argument capture and normalization

pub mod cmdline;
pub mod holder;
pub mod raw;
#[cfg(windows)]
pub mod win32;

// Re-exports
pub use cmdline::{CommandLineTokenizer, WindowsRules};
pub use holder::{ArgSource, ArgumentHolder};
pub use raw::RawArgv;
#[cfg(windows)]
pub use raw::RawArgvW;
#[cfg(windows)]
pub use win32::Shell32;

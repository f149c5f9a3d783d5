//! Raw command-line tokenization
//!
//! Some hosts hand a process one unparsed command-line string instead of an
//! argument vector. [`CommandLineTokenizer`] is the seam for the service that
//! splits such a string. [`WindowsRules`] reproduces the quoting conventions
//! of `CommandLineToArgvW` on every platform; on Windows `Shell32` calls the
//! real function.

/// Splits a raw command line into arguments.
///
/// Returning `None` signals that the tokenizer failed; callers turn that into
/// [`ArgsError::ArgumentRetrieval`](crate::errors::ArgsError::ArgumentRetrieval).
pub trait CommandLineTokenizer {
    fn tokenize(&self, cmdline: &str) -> Option<Vec<String>>;
}

impl<F> CommandLineTokenizer for F
where
    F: Fn(&str) -> Option<Vec<String>>,
{
    fn tokenize(&self, cmdline: &str) -> Option<Vec<String>> {
        self(cmdline)
    }
}

/// Tokenizer implementing the shell32 `CommandLineToArgvW` rules in Rust
///
/// - argv[0] is taken verbatim: up to the closing quote if it starts with
///   `"`, otherwise up to the first space or tab
/// - `2n` backslashes before `"` become `n` backslashes and the quote toggles
///   quoted mode; `2n+1` backslashes before `"` become `n` backslashes and a
///   literal quote
/// - in a run of quotes every third one is literal, so `""` inside quoted
///   mode is a literal quote that also ends quoted mode
/// - an empty command line yields the current executable path
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsRules;

impl CommandLineTokenizer for WindowsRules {
    fn tokenize(&self, cmdline: &str) -> Option<Vec<String>> {
        if cmdline.is_empty() {
            let exe = std::env::current_exe().ok()?;
            return Some(vec![exe.to_string_lossy().into_owned()]);
        }

        let mut chars = cmdline.chars().peekable();
        let mut tokens = vec![program_name(&mut chars)];

        let mut current = String::new();
        let mut started = false;
        // 1 while inside quotes, 0 outside
        let mut quotes = 0u8;
        let mut backslashes = 0usize;

        while let Some(c) = chars.next() {
            match c {
                c if is_separator(c) && quotes == 0 => {
                    push_backslashes(&mut current, std::mem::take(&mut backslashes));
                    if started {
                        tokens.push(std::mem::take(&mut current));
                        started = false;
                    }
                }
                '\\' => {
                    backslashes += 1;
                    started = true;
                }
                '"' => {
                    started = true;
                    push_backslashes(&mut current, backslashes / 2);
                    if backslashes % 2 == 1 {
                        current.push('"');
                    } else {
                        quotes += 1;
                    }
                    backslashes = 0;

                    while chars.peek() == Some(&'"') {
                        chars.next();
                        quotes += 1;
                        if quotes == 3 {
                            current.push('"');
                            quotes = 0;
                        }
                    }
                    if quotes == 2 {
                        quotes = 0;
                    }
                }
                _ => {
                    push_backslashes(&mut current, std::mem::take(&mut backslashes));
                    current.push(c);
                    started = true;
                }
            }
        }

        push_backslashes(&mut current, backslashes);
        if started {
            tokens.push(current);
        }

        Some(tokens)
    }
}

/// Consume argv[0] and the separators after it
fn program_name(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut name = String::new();

    if chars.peek() == Some(&'"') {
        chars.next();
        for c in chars.by_ref() {
            if c == '"' {
                break;
            }
            name.push(c);
        }
    } else {
        while let Some(&c) = chars.peek() {
            if is_separator(c) {
                break;
            }
            name.push(c);
            chars.next();
        }
    }

    while chars.peek().is_some_and(|&c| is_separator(c)) {
        chars.next();
    }

    name
}

fn push_backslashes(out: &mut String, count: usize) {
    out.extend(std::iter::repeat_n('\\', count));
}

fn is_separator(c: char) -> bool {
    c == ' ' || c == '\t'
}

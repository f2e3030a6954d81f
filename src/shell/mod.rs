//! Shell command execution and environment helpers.

pub mod command;

pub use command::{execute, CommandOptions, CommandResult};

/// Quote an argument for inclusion in a shell command line.
///
/// Requirement specifiers like `pytest>=6` contain shell metacharacters
/// and must not be passed bare.
pub fn quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg.bytes().all(|b| {
            b.is_ascii_alphanumeric()
                || matches!(
                    b,
                    b'_' | b'-' | b'.' | b'/' | b':' | b'=' | b'@' | b'%' | b'+' | b','
                )
        });

    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', "'\\''"))
    }
}

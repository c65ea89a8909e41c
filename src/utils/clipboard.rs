use std::io::Write;
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("no clipboard command found (install wl-copy, xclip, or xsel)")]
    Unavailable,
    #[error("clipboard command `{0}` failed")]
    Failed(String),
}

/// A program that accepts clipboard contents on stdin.
struct ClipboardProgram<'a> {
    command: &'a str,
    args: &'a [&'a str],
}

#[cfg(target_os = "macos")]
const PROGRAMS: &[ClipboardProgram<'static>] = &[ClipboardProgram {
    command: "pbcopy",
    args: &[],
}];

#[cfg(target_os = "windows")]
const PROGRAMS: &[ClipboardProgram<'static>] = &[ClipboardProgram {
    command: "cmd",
    args: &["/C", "clip"],
}];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const PROGRAMS: &[ClipboardProgram<'static>] = &[
    ClipboardProgram {
        command: "wl-copy",
        args: &[],
    },
    ClipboardProgram {
        command: "xclip",
        args: &["-selection", "clipboard"],
    },
    ClipboardProgram {
        command: "xsel",
        args: &["--clipboard", "--input"],
    },
];

pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    copy_with(PROGRAMS, text)
}

/// Try each program in turn until one succeeds. When none does, the first
/// program that started and failed is reported.
fn copy_with(programs: &[ClipboardProgram<'_>], text: &str) -> Result<(), ClipboardError> {
    let mut first_failure = None;
    for program in programs {
        match pipe_to(program, text) {
            Some(true) => return Ok(()),
            Some(false) => {
                first_failure.get_or_insert_with(|| program.command.to_string());
            }
            None => {}
        }
    }
    Err(first_failure.map_or(ClipboardError::Unavailable, ClipboardError::Failed))
}

/// `None` when the program could not be started.
fn pipe_to(program: &ClipboardProgram<'_>, input: &str) -> Option<bool> {
    let mut child = Command::new(program.command)
        .args(program.args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .ok()?;

    let wrote = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(input.as_bytes()).is_ok(),
        None => false,
    };
    let status = child.wait().ok()?;
    Some(wrote && status.success())
}

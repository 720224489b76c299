//! Copy-to-clipboard with a legacy fallback.
//!
//! Primary path is the platform clipboard via arboard. When that is
//! unavailable (headless session, missing display server) we fall back to
//! spawning the platform copy utility and writing the text to its stdin.
//! When both paths fail the failure is logged and the caller shows no
//! confirmation — copying is a convenience, never an error the user must
//! deal with.

use std::io::Write;
use std::process::{Command, Stdio};

/// Copy `text` to the system clipboard. Returns `true` when either path
/// succeeded. Empty input copies nothing.
pub fn copy(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }

    match copy_primary(text) {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!("platform clipboard unavailable, trying fallback: {err}");
            let copied = copy_fallback(text);
            if !copied {
                tracing::warn!("failed to copy to clipboard on both paths");
            }
            copied
        }
    }
}

fn copy_primary(text: &str) -> Result<(), arboard::Error> {
    arboard::Clipboard::new()?.set_text(text)
}

/// Copy utilities to try, in order, for the current platform.
fn fallback_candidates() -> &'static [(&'static str, &'static [&'static str])] {
    #[cfg(target_os = "macos")]
    {
        &[("pbcopy", &[])]
    }
    #[cfg(target_os = "windows")]
    {
        &[("clip", &[])]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        &[
            ("wl-copy", &[]),
            ("xclip", &["-selection", "clipboard"]),
            ("xsel", &["--clipboard", "--input"]),
        ]
    }
}

fn copy_fallback(text: &str) -> bool {
    for (program, args) in fallback_candidates() {
        if pipe_to(program, args, text) {
            return true;
        }
    }
    false
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> bool {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();

    let Ok(mut child) = child else {
        return false;
    };

    if let Some(stdin) = child.stdin.as_mut() {
        if stdin.write_all(text.as_bytes()).is_err() {
            let _ = child.kill();
            return false;
        }
    }

    child.wait().map(|status| status.success()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_never_copied() {
        assert!(!copy(""));
    }

    #[test]
    fn fallback_candidates_exist_for_this_platform() {
        assert!(!fallback_candidates().is_empty());
    }

    #[test]
    fn pipe_to_missing_program_fails_cleanly() {
        assert!(!pipe_to("definitely-not-a-copy-utility", &[], "x"));
    }
}

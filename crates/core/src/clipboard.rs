//! Clipboard access.
//!
//! On X11 and Wayland the clipboard is served by the process that owns it, so
//! a short-lived CLI would take the copied text with it when it exits. There,
//! [`SystemClipboard`] re-runs the current executable as a detached holder
//! that owns the selection until something else replaces it.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};

use log::debug;

use crate::error::{Error, Result};

/// Environment variable that turns an invocation into a clipboard holder.
pub const CLIPBOARD_HOLDER_ENV: &str = "COMMAND_SEARCH_CLIPBOARD_HOLDER";

/// Something that can place text on a clipboard.
pub trait ClipboardWriter {
    /// # Errors
    ///
    /// Returns [`Error::Clipboard`] if the text could not be stored.
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// The operating system clipboard, backed by `arboard`.
#[derive(Default)]
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    #[cfg(target_os = "linux")]
    fn write_text(&mut self, text: &str) -> Result<()> {
        // Fail here, in the foreground, when there is no display to copy to
        arboard::Clipboard::new().map_err(clipboard_error)?;

        let executable = std::env::current_exe().map_err(Error::Stdio)?;
        spawn_holder(&executable, text)
    }

    #[cfg(not(target_os = "linux"))]
    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().map_err(clipboard_error)?;
        clipboard.set_text(text).map_err(clipboard_error)?;

        debug!("Wrote {} bytes to the system clipboard", text.len());
        Ok(())
    }
}

fn clipboard_error(e: arboard::Error) -> Error {
    Error::Clipboard(e.to_string())
}

/// True when this process was started by [`SystemClipboard`] to hold the selection.
pub fn is_clipboard_holder() -> bool {
    std::env::var_os(CLIPBOARD_HOLDER_ENV).is_some()
}

/// Builds the command that re-runs `executable` as a clipboard holder.
///
/// The text arrives on stdin; stdout and stderr are discarded so the holder
/// never writes to the terminal after the parent has exited.
pub fn holder_command(executable: &Path) -> Command {
    let mut command = Command::new(executable);
    command
        .env(CLIPBOARD_HOLDER_ENV, "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    command
}

/// Starts a holder and hands it `text`. Does not wait for it to exit.
///
/// # Errors
///
/// Returns [`Error::Clipboard`] if the holder cannot be started or fed.
pub fn spawn_holder(executable: &Path, text: &str) -> Result<()> {
    let mut child = holder_command(executable)
        .spawn()
        .map_err(|e| Error::Clipboard(format!("could not start clipboard holder: {e}")))?;

    {
        use std::io::Write;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Clipboard("clipboard holder has no stdin".to_string()))?;
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| Error::Clipboard(format!("could not hand text to clipboard holder: {e}")))?;
    }

    debug!(
        "Clipboard holder {} now serves {} bytes",
        child.id(),
        text.len()
    );
    Ok(())
}

/// Body of a holder process: reads the text from stdin, takes the clipboard
/// and blocks until another application replaces the contents.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or the clipboard cannot be set.
pub fn hold_clipboard_from_stdin() -> Result<()> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;

    let mut clipboard = arboard::Clipboard::new().map_err(clipboard_error)?;
    set_and_wait(&mut clipboard, &text)
}

#[cfg(target_os = "linux")]
fn set_and_wait(clipboard: &mut arboard::Clipboard, text: &str) -> Result<()> {
    use arboard::SetExtLinux;

    clipboard
        .set()
        .wait()
        .text(text.to_owned())
        .map_err(clipboard_error)
}

#[cfg(not(target_os = "linux"))]
fn set_and_wait(clipboard: &mut arboard::Clipboard, text: &str) -> Result<()> {
    clipboard.set_text(text).map_err(clipboard_error)
}

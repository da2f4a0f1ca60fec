//! Injecting the chosen command into the foreground application.
//!
//! The platform is detected once at start-up and mapped to a [`PasteInjector`].
//! Keystrokes go to whichever window has input focus at that moment, which
//! is not necessarily the terminal that ran the search.

use std::fmt::{Display, Formatter};
use std::io::ErrorKind;
use std::process::{Command, Stdio};

use log::{debug, info};

use crate::config::XDOTOOL_TYPE_DELAY_MS;
use crate::error::{Error, Result};

const XDOTOOL: &str = "xdotool";
const OSASCRIPT: &str = "osascript";
const PASTE_KEYSTROKE_SCRIPT: &str =
    r#"tell application "System Events" to keystroke "v" using {command down}"#;

/// Operating system families the paste bridge knows about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Other(String),
}

impl Platform {
    /// Detects the platform this binary was built for.
    #[must_use]
    pub fn detect() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Maps an OS identifier as found in `std::env::consts::OS`.
    #[must_use]
    pub fn from_os_name(os_name: &str) -> Self {
        match os_name {
            "linux" => Self::Linux,
            "macos" => Self::MacOs,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Display for Platform {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Linux => formatter.write_str("linux"),
            Platform::MacOs => formatter.write_str("macos"),
            Platform::Other(name) => formatter.write_str(name),
        }
    }
}

/// Sends the copied text to the foreground application.
pub trait PasteInjector {
    /// # Errors
    ///
    /// Returns an error if the platform is unsupported, the helper tool is
    /// missing, or the helper exits unsuccessfully.
    fn paste(&self, text: &str) -> Result<()>;
}

/// Types the text with `xdotool`, one synthetic key event per character.
pub struct LinuxKeystrokeInjector {
    program: String,
    delay_ms: u32,
}

impl Default for LinuxKeystrokeInjector {
    fn default() -> Self {
        Self {
            program: XDOTOOL.to_string(),
            delay_ms: XDOTOOL_TYPE_DELAY_MS,
        }
    }
}

impl LinuxKeystrokeInjector {
    /// Uses `program` in place of `xdotool`; it must accept the same arguments.
    pub fn with_program<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// `--` keeps text starting with `-` from being read as an option.
    fn type_command(&self, text: &str) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("type")
            .arg("--delay")
            .arg(self.delay_ms.to_string())
            .arg("--")
            .arg(text);
        command
    }
}

impl PasteInjector for LinuxKeystrokeInjector {
    fn paste(&self, text: &str) -> Result<()> {
        run_tool(self.type_command(text), &self.program)
    }
}

/// Asks System Events to press Cmd+V in the frontmost application.
pub struct MacAutomationInjector {
    program: String,
}

impl Default for MacAutomationInjector {
    fn default() -> Self {
        Self {
            program: OSASCRIPT.to_string(),
        }
    }
}

impl PasteInjector for MacAutomationInjector {
    fn paste(&self, _text: &str) -> Result<()> {
        // The text is already on the clipboard, only the keystroke is needed
        let mut command = Command::new(&self.program);
        command.arg("-e").arg(PASTE_KEYSTROKE_SCRIPT);

        run_tool(command, &self.program)
    }
}

/// Stand-in for platforms without a paste mechanism. Always fails.
pub struct UnsupportedInjector {
    platform: Platform,
}

impl PasteInjector for UnsupportedInjector {
    fn paste(&self, _text: &str) -> Result<()> {
        Err(Error::UnsupportedPlatform(self.platform.to_string()))
    }
}

/// Picks the injector for `platform`.
#[must_use]
pub fn injector_for(platform: Platform) -> Box<dyn PasteInjector> {
    match platform {
        Platform::Linux => Box::new(LinuxKeystrokeInjector::default()),
        Platform::MacOs => Box::new(MacAutomationInjector::default()),
        other => Box::new(UnsupportedInjector { platform: other }),
    }
}

/// Runs a helper tool to completion without a terminal attached.
///
/// # Errors
///
/// Returns [`Error::ToolNotFound`] if the program cannot be found, or
/// [`Error::ToolFailed`] if it exits with a non-success status.
fn run_tool(mut command: Command, tool: &str) -> Result<()> {
    let command = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::inherit());

    debug!("Running paste helper: {:?}", command);

    let status = command.status().map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            Error::ToolNotFound {
                tool: tool.to_string(),
            }
        } else {
            Error::Stdio(e)
        }
    })?;

    if status.success() {
        info!("Pasted with `{tool}`");
        Ok(())
    } else {
        Err(Error::ToolFailed {
            tool: tool.to_string(),
            status: status.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_from_os_name() {
        assert_eq!(Platform::from_os_name("linux"), Platform::Linux);
        assert_eq!(Platform::from_os_name("macos"), Platform::MacOs);
        assert_eq!(
            Platform::from_os_name("freebsd"),
            Platform::Other("freebsd".to_string())
        );
    }

    #[test]
    fn test_platform_display() {
        assert_eq!(Platform::MacOs.to_string(), "macos");
        assert_eq!(Platform::Other("haiku".to_string()).to_string(), "haiku");
    }

    #[test]
    fn test_unsupported_platform_fails() {
        let injector = injector_for(Platform::from_os_name("plan9"));
        let result = injector.paste("ls -la");
        assert!(matches!(result, Err(Error::UnsupportedPlatform(ref os)) if os == "plan9"));
    }

    #[test]
    fn test_type_command_ends_options_before_text() {
        let command = LinuxKeystrokeInjector::default().type_command("--help");
        let args: Vec<_> = command.get_args().collect();

        assert_eq!(command.get_program(), "xdotool");
        assert_eq!(args, ["type", "--delay", "1", "--", "--help"]);
    }

    #[test]
    fn test_missing_tool_is_reported() {
        let injector = LinuxKeystrokeInjector::with_program("command-search-no-such-tool");
        let result = injector.paste("ls");
        assert!(matches!(
            result,
            Err(Error::ToolNotFound { ref tool }) if tool == "command-search-no-such-tool"
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_tool_is_reported() {
        // `false` ignores its arguments and exits with status 1
        let injector = LinuxKeystrokeInjector::with_program("false");
        let result = injector.paste("ls");
        assert!(matches!(result, Err(Error::ToolFailed { ref tool, .. }) if tool == "false"));
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_tool() {
        let injector = LinuxKeystrokeInjector::with_program("true");
        assert!(injector.paste("ls").is_ok());
    }
}

//! Configuration values and path utilities.
//!
//! Everything here is resolved once at start-up; nothing is mutated afterwards.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const APP_NAME: &str = "Command Search Tool";

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Location of the commands file, relative to the directory holding the executable
pub const DEFAULT_COMMANDS_FILE: &str = "../commands.yml";

/// Per-character delay handed to `xdotool type`
pub const XDOTOOL_TYPE_DELAY_MS: u32 = 1;

/// The preview pane fits two wrapped fields, so each gets this fraction of the terminal width.
pub const PREVIEW_WIDTH_DIVISOR: u16 = 3;

/// Resolves the commands file path.
///
/// If a custom path is provided, uses that path with `~` expanded. Otherwise
/// the path is [`DEFAULT_COMMANDS_FILE`] joined onto the executable's own
/// directory, independent of the current working directory.
///
/// # Errors
///
/// Returns an error if the path of the running executable cannot be determined.
///
/// # Examples
///
/// ```
/// use command_search_core::config::get_commands_path;
///
/// let custom_path = get_commands_path(&Some("/path/to/commands.yml".to_string()))?;
/// assert_eq!(custom_path, std::path::PathBuf::from("/path/to/commands.yml"));
/// # Ok::<(), command_search_core::error::Error>(())
/// ```
pub fn get_commands_path(commands_path_arg: &Option<String>) -> Result<PathBuf> {
    if let Some(commands_path) = commands_path_arg {
        return Ok(PathBuf::from(shellexpand::tilde(commands_path).to_string()));
    }

    let executable = std::env::current_exe()
        .map_err(|e| Error::io_error("locating executable for", Path::new(DEFAULT_COMMANDS_FILE), e))?;

    Ok(commands_path_beside(&executable))
}

/// Joins [`DEFAULT_COMMANDS_FILE`] onto the directory containing `executable`.
pub fn commands_path_beside(executable: &Path) -> PathBuf {
    executable
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(DEFAULT_COMMANDS_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_commands_path_with_custom_path() {
        let custom_path = Some("/custom/path/commands.yml".to_string());
        let result = get_commands_path(&custom_path).unwrap();
        assert_eq!(result, PathBuf::from("/custom/path/commands.yml"));
    }

    #[test]
    fn test_get_commands_path_with_tilde() {
        let tilde_path = Some("~/my-commands.yml".to_string());
        let result = get_commands_path(&tilde_path).unwrap();
        let result = result.to_string_lossy();
        assert!(!result.starts_with('~'));
        assert!(result.ends_with("my-commands.yml"));
    }

    #[test]
    fn test_get_commands_path_default_is_next_to_executable() {
        let result = get_commands_path(&None).unwrap();
        let executable = std::env::current_exe().unwrap();

        assert!(result.ends_with("../commands.yml"));
        assert_eq!(result.parent().unwrap().parent(), executable.parent());
    }

    #[test]
    fn test_commands_path_beside() {
        let result = commands_path_beside(Path::new("/opt/cs/bin/cs"));
        assert_eq!(result, PathBuf::from("/opt/cs/bin/../commands.yml"));
    }
}

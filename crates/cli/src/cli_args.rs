//! Command-line argument parsing and validation.
//!
//! This module defines the command-line interface structure using the `clap`
//! crate and turns the positional arguments into a [`Mode`].

use clap::Parser;
use command_search_core::config::APP_NAME;
use command_search_core::error::{Error, Result};

const ADD_KEYWORD: &str = "add";
const ADD_USAGE: &str = r#"add "<command>" "<description>""#;

/// Command-line arguments for the `cs` binary.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use command_search_cli::cli_args::{Args, Mode};
///
/// let args = Args::parse_from(["cs", "add", "ls -la", "List files"]);
/// assert!(matches!(args.mode(), Ok(Mode::Add { .. })));
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(name = "cs", version, about = APP_NAME)]
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the commands YAML file.
    ///
    /// If not provided, defaults to `../commands.yml` next to the executable.
    #[arg(long, short = 'c')]
    pub commands_path: Option<String>,

    /// Only copy the selected command to the clipboard, never paste it.
    #[arg(long, short = 'n', action)]
    pub no_paste: bool,

    /// Leave empty to search interactively, or `add "<command>" "<description>"`.
    #[arg(trailing_var_arg = true)]
    pub arguments: Vec<String>,
}

/// What a single invocation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Interactive,
    Add {
        command: String,
        description: String,
    },
}

impl Args {
    /// Determines the mode from the positional arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Usage`] if arguments are given that are not exactly
    /// `add <command> <description>`, or if the command is empty.
    pub fn mode(&self) -> Result<Mode> {
        determine_mode(&self.arguments)
    }
}

/// See [`Args::mode`].
pub fn determine_mode(arguments: &[String]) -> Result<Mode> {
    match arguments {
        [] => Ok(Mode::Interactive),
        [keyword, command, description] if keyword == ADD_KEYWORD => {
            let command = strip_quotes(command);
            if command.trim().is_empty() {
                return Err(Error::usage(format!("{ADD_USAGE} (command may not be empty)")));
            }

            Ok(Mode::Add {
                command: command.to_string(),
                description: strip_quotes(description).to_string(),
            })
        }
        _ => Err(Error::usage(ADD_USAGE)),
    }
}

/// Trims one literal double quote from each end, if present. No unescaping is done.
fn strip_quotes(argument: &str) -> &str {
    let argument = argument.strip_prefix('"').unwrap_or(argument);
    argument.strip_suffix('"').unwrap_or(argument)
}

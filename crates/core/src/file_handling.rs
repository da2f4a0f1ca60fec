//! Reading and writing the commands file.
//!
//! The whole collection is read into memory at start-up and written back in
//! full after every mutation. There is no locking; the last writer wins.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::command_definitions::CommandList;
use crate::error::{Error, Result};

fn get_reader(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| Error::read_error(path, e))
}

/// Loads and validates the command collection.
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist ([`Error::FileNotFound`])
/// - The file cannot be read
/// - The YAML is malformed or doesn't match the expected structure
/// - An entry has an empty command
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use command_search_core::file_handling::load_commands;
///
/// let commands = load_commands(Path::new("commands.yml"))?;
/// println!("Loaded {} commands", commands.len());
/// # Ok::<(), command_search_core::error::Error>(())
/// ```
pub fn load_commands(path: &Path) -> Result<CommandList> {
    let reader = get_reader(path)?;

    let command_list: CommandList =
        serde_yaml::from_reader(reader).map_err(|e| Error::yaml_error("reading", path, e))?;

    command_list.validate()?;

    debug!(
        "Loaded {} commands from `{}`",
        command_list.len(),
        path.display()
    );

    Ok(command_list)
}

/// Like [`load_commands`], but a missing file yields an empty collection.
///
/// Used when appending, where the first `add` creates the file.
pub fn load_commands_or_empty(path: &Path) -> Result<CommandList> {
    match load_commands(path) {
        Err(Error::FileNotFound { .. }) => {
            debug!(
                "No commands file at `{}`, starting a new one",
                path.display()
            );
            Ok(CommandList::default())
        }
        result => result,
    }
}

/// Serializes the full collection and overwrites the commands file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be created or written to
/// - Serialization to YAML fails
pub fn save_commands(path: &Path, command_list: &CommandList) -> Result<()> {
    let serialized =
        serde_yaml::to_string(command_list).map_err(|e| Error::yaml_error("writing", path, e))?;

    let file = File::create(path).map_err(|e| Error::io_error("writing", path, e))?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(serialized.as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|e| Error::io_error("writing", path, e))?;

    debug!(
        "Saved {} commands to `{}`",
        command_list.len(),
        path.display()
    );

    Ok(())
}

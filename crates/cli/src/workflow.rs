//! Orchestration of a single invocation: load, select, act, persist.
//!
//! The selector, clipboard, paste injector and prompt streams are all passed
//! in, so the same code runs against the real terminal and against test doubles.

use std::io::{BufRead, Write};
use std::path::Path;

use log::{debug, info, warn};

use command_search_core::clipboard::ClipboardWriter;
use command_search_core::command_definitions::{CommandEntry, CommandList};
use command_search_core::error::{Error, Result};
use command_search_core::file_handling;
use command_search_core::paste::PasteInjector;

use crate::command_selection::{
    build_preview, prompt_edit, prompt_post_selection_choice, PostSelectionChoice, Selection,
    Selector,
};

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// There was nothing to search
    Empty,
    Aborted,
    /// Copied to the clipboard; `pasted` is false if pasting was skipped or failed
    Copied {
        pasted: bool,
    },
    Deleted,
    Edited,
}

/// Collaborators for an interactive session.
pub struct Interaction<'a, R, W> {
    pub selector: &'a mut dyn Selector,
    pub clipboard: &'a mut dyn ClipboardWriter,
    /// `None` copies without pasting
    pub injector: Option<&'a dyn PasteInjector>,
    pub input: R,
    pub output: W,
}

/// Appends one entry and persists the collection.
///
/// A missing commands file is created. A malformed one is left untouched.
///
/// # Errors
///
/// Returns an error if the existing file cannot be read or parsed, or the
/// collection cannot be written back.
pub fn run_add<W: Write>(
    commands_path: &Path,
    command: &str,
    description: &str,
    output: &mut W,
) -> Result<()> {
    let mut commands = file_handling::load_commands_or_empty(commands_path)?;
    commands.push(CommandEntry::new(command, description));
    file_handling::save_commands(commands_path, &commands)?;

    info!("Added `{command}` as entry {}", commands.len() - 1);
    writeln!(output, "Command added.")?;
    Ok(())
}

/// Runs the search and then the action the user picks for the selection.
///
/// A failed paste after a successful copy is reported but is not an error.
///
/// # Errors
///
/// Returns an error if the commands file cannot be loaded, the selector or
/// prompts fail, the clipboard cannot be written, or a delete/edit cannot be
/// persisted.
pub fn run_interactive<R: BufRead, W: Write>(
    commands_path: &Path,
    interaction: &mut Interaction<'_, R, W>,
) -> Result<Outcome> {
    let mut commands = file_handling::load_commands(commands_path)?;

    if commands.is_empty() {
        writeln!(
            interaction.output,
            "No commands saved yet. Add one with: add \"<command>\" \"<description>\""
        )?;
        return Ok(Outcome::Empty);
    }

    let index = match select_entry(&commands, interaction.selector)? {
        Selection::Index(index) => index,
        Selection::Aborted => {
            writeln!(interaction.output, "Search aborted")?;
            return Ok(Outcome::Aborted);
        }
    };

    let selected = commands.get(index)?.clone();
    debug!("Selected entry {index}: {selected:?}");

    writeln!(
        interaction.output,
        "\nSelected:\n{} - {}",
        selected.command, selected.description
    )?;

    match prompt_post_selection_choice(&mut interaction.input, &mut interaction.output)? {
        PostSelectionChoice::Delete => {
            commands.remove(index)?;
            persist(commands_path, &commands, "Delete")?;
            writeln!(interaction.output, "Deleted successfully.")?;
            Ok(Outcome::Deleted)
        }
        PostSelectionChoice::Edit => {
            let (new_command, new_description) =
                prompt_edit(&selected, &mut interaction.input, &mut interaction.output)?;
            commands.edit(index, &new_command, &new_description)?;
            persist(commands_path, &commands, "Edit")?;
            writeln!(interaction.output, "Edited and saved.")?;
            Ok(Outcome::Edited)
        }
        PostSelectionChoice::CopyAndPaste => copy_and_paste(
            &selected.command,
            interaction.clipboard,
            interaction.injector,
            &mut interaction.output,
        ),
    }
}

fn select_entry(commands: &CommandList, selector: &mut dyn Selector) -> Result<Selection> {
    let label = |index: usize| {
        commands
            .commands
            .get(index)
            .map(|entry| entry.command.clone())
            .unwrap_or_default()
    };
    let preview = |index: Option<usize>, width: u16, height: u16| {
        build_preview(
            index.and_then(|index| commands.commands.get(index)),
            width,
            height,
        )
    };

    selector.select(commands.len(), &label, &preview)
}

fn persist(commands_path: &Path, commands: &CommandList, operation: &str) -> Result<()> {
    file_handling::save_commands(commands_path, commands)
        .map_err(|e| Error::persist_error(operation, e))
}

/// Copies `text` to the clipboard, then tries to paste it into the foreground window.
fn copy_and_paste<W: Write>(
    text: &str,
    clipboard: &mut dyn ClipboardWriter,
    injector: Option<&dyn PasteInjector>,
    output: &mut W,
) -> Result<Outcome> {
    clipboard.write_text(text)?;
    writeln!(output, "Copied to clipboard: {text}")?;

    let Some(injector) = injector else {
        info!("Pasting disabled, leaving the command on the clipboard");
        return Ok(Outcome::Copied { pasted: false });
    };

    match injector.paste(text) {
        Ok(()) => Ok(Outcome::Copied { pasted: true }),
        Err(e) => {
            warn!("Paste failed after copying to clipboard: {e}");
            writeln!(output, "Copied to clipboard only: {e}")?;
            Ok(Outcome::Copied { pasted: false })
        }
    }
}

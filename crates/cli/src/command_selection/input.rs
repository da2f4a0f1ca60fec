use std::io::{BufRead, Write};

use command_search_core::command_definitions::CommandEntry;
use command_search_core::error::Result;

use super::types::PostSelectionChoice;

/// Reads one line and trims it. End of input reads as an empty line.
fn read_trimmed_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Asks what to do with the selected command
pub fn prompt_post_selection_choice<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<PostSelectionChoice> {
    write!(output, "Press [Enter] to copy/paste, [d] to delete, [e] to edit: ")?;
    output.flush()?;

    Ok(PostSelectionChoice::from_input(&read_trimmed_line(input)?))
}

/// Prompts for a replacement command and description, showing the current values.
///
/// Returns the raw (trimmed) answers; an empty answer means "keep the current value".
pub fn prompt_edit<R: BufRead, W: Write>(
    entry: &CommandEntry,
    input: &mut R,
    output: &mut W,
) -> Result<(String, String)> {
    write!(output, "Edit command [{}]: ", entry.command)?;
    output.flush()?;
    let new_command = read_trimmed_line(input)?;

    write!(output, "Edit description [{}]: ", entry.description)?;
    output.flush()?;
    let new_description = read_trimmed_line(input)?;

    Ok((new_command, new_description))
}

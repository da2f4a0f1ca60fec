use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single saved shell command and its human-readable description.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CommandEntry {
    pub command: String,
    #[serde(default)]
    pub description: String,
}

impl CommandEntry {
    pub fn new<C: Into<String>, D: Into<String>>(command: C, description: D) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
        }
    }

    /// Replaces each field with its new value, unless that value is blank.
    pub fn apply_edit(&mut self, new_command: &str, new_description: &str) {
        let new_command = new_command.trim();
        if !new_command.is_empty() {
            self.command = new_command.to_string();
        }

        let new_description = new_description.trim();
        if !new_description.is_empty() {
            self.description = new_description.to_string();
        }
    }
}

impl Display for CommandEntry {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if self.description.is_empty() {
            formatter.write_str(&self.command)
        } else {
            write!(formatter, "{} - {}", self.command, self.description)
        }
    }
}

/// The persisted unit: every entry in insertion order.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandList {
    #[serde(default)]
    pub commands: Vec<CommandEntry>,
}

impl CommandList {
    pub fn new(commands: Vec<CommandEntry>) -> Self {
        Self { commands }
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&CommandEntry> {
        self.commands.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.commands.len(),
        })
    }

    pub fn push(&mut self, entry: CommandEntry) {
        self.commands.push(entry);
    }

    pub fn remove(&mut self, index: usize) -> Result<CommandEntry> {
        self.check_index(index)?;
        Ok(self.commands.remove(index))
    }

    /// Applies [`CommandEntry::apply_edit`] to the entry at `index`, keeping its position.
    pub fn edit(&mut self, index: usize, new_command: &str, new_description: &str) -> Result<()> {
        self.check_index(index)?;
        self.commands[index].apply_edit(new_command, new_description);
        Ok(())
    }

    /// Checks that every entry has a non-empty command.
    pub fn validate(&self) -> Result<()> {
        match self
            .commands
            .iter()
            .position(|entry| entry.command.trim().is_empty())
        {
            Some(index) => Err(Error::EmptyCommand { index }),
            None => Ok(()),
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.commands.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.commands.len(),
            });
        }

        Ok(())
    }
}

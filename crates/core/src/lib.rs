//! Command Search Core Library
//!
//! This crate provides the core functionality for command-search, a personal
//! snippet manager that keeps shell commands with descriptions in a YAML file,
//! and hands the chosen one to the clipboard and the foreground terminal.
//!
//! # Key Features
//!
//! - **Command Collection**: Ordered, serde-backed list of commands and descriptions
//! - **Store**: Load and persist the whole collection next to the executable
//! - **Text Wrapping**: Greedy column wrapping for the preview pane
//! - **Clipboard/Paste Bridge**: System clipboard plus per-OS keystroke injection
//! - **Error Handling**: One error type covering every failure mode
//!
//! # Examples
//!
//! Loading, appending and saving:
//!
//! ```no_run
//! use command_search_core::command_definitions::CommandEntry;
//! use command_search_core::config::get_commands_path;
//! use command_search_core::file_handling::{load_commands, save_commands};
//!
//! let path = get_commands_path(&None)?;
//! let mut commands = load_commands(&path)?;
//! commands.push(CommandEntry::new("pwd", "Print working directory"));
//! save_commands(&path, &commands)?;
//! # Ok::<(), command_search_core::error::Error>(())
//! ```

pub mod clipboard;
pub mod command_definitions;
pub mod config;
pub mod error;
pub mod file_handling;
pub mod formatting;
pub mod paste;

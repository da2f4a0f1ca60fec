//! Command Search CLI Library
//!
//! This crate provides the command-line interface for command-search. It
//! parses the arguments, runs the interactive fuzzy search, and performs the
//! chosen action on the selected command.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing and mode detection
//! - [`command_selection`]: Fuzzy selector UI, preview pane and prompts
//! - [`workflow`]: Add and interactive flows tying the store, selector and paste bridge together
//!
//! # Examples
//!
//! The CLI binary (`cs`) can be used in two ways:
//!
//! ```bash
//! # Interactive mode - search, then copy/paste, delete or edit
//! cs
//!
//! # Append a command
//! cs add "ls -la" "List all files"
//!
//! # Copy only, never paste
//! cs --no-paste
//! ```

pub mod cli_args;
pub mod command_selection;
pub mod workflow;

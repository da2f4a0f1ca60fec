//! Interactive command selection and user input handling.
//!
//! This module provides the terminal-based fuzzy search over the saved
//! commands, the preview shown beside it, and the prompts that follow a
//! selection.
//!
//! # User Interface
//!
//! The interface supports:
//! - Typing to narrow the list (fuzzy match on the command text)
//! - Arrow keys, Ctrl-P/Ctrl-N or the mouse wheel to move
//! - Enter to select the highlighted command
//! - Escape, Ctrl-C or Ctrl-D to abort

// Export public items from submodules
pub mod input;
pub mod preview;
pub mod types;
pub mod ui;

// Re-exports for convenience
pub use input::{prompt_edit, prompt_post_selection_choice};
pub use preview::build_preview;
pub use types::{PostSelectionChoice, Selection};
pub use ui::TerminalSelector;

use command_search_core::error::Result;

/// Interactive narrowing of a candidate list down to one entry.
pub trait Selector {
    /// Lets the user pick one of `candidate_count` candidates.
    ///
    /// `label` gives the text listed (and matched) for a candidate. `preview`
    /// gives the preview pane text for the highlighted candidate, or for no
    /// candidate, given the terminal width and height.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be driven. A user cancelling
    /// the search is not an error, it is [`Selection::Aborted`].
    fn select(
        &mut self,
        candidate_count: usize,
        label: &dyn Fn(usize) -> String,
        preview: &dyn Fn(Option<usize>, u16, u16) -> String,
    ) -> Result<Selection>;
}

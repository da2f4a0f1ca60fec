//! Type definitions for command selection and UI state.
//!
//! This module defines the outcomes of the selection step, the post-selection
//! choices, and the state the selection interface keeps between redraws.

/// Outcome of the interactive search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Index into the candidate list handed to the selector
    Index(usize),
    /// The user cancelled the search
    Aborted,
}

/// What to do with the selected command, chosen after the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSelectionChoice {
    CopyAndPaste,
    Delete,
    Edit,
}

impl PostSelectionChoice {
    /// Maps a line of user input; anything but `d` or `e` is the default action.
    #[must_use]
    pub fn from_input(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "d" => Self::Delete,
            "e" => Self::Edit,
            _ => Self::CopyAndPaste,
        }
    }
}

/// Direction to cycle through candidates in the selection UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleDirection {
    Up,
    Down,
}

/// State for the UI viewport.
///
/// Tracks the visible portion of the candidate list when there are more
/// matches than can fit on screen.
#[derive(Clone, PartialEq, Debug)]
pub struct ViewportState {
    pub offset: usize,
    pub height: u16,
    pub width: u16,
}

/// Complete UI state for the selection interface.
#[derive(Clone, PartialEq, Debug)]
pub struct UiState {
    /// Position of the highlighted row within the current matches
    pub selected_index: usize,
    /// Viewport state for scrolling
    pub viewport: ViewportState,
    /// Current search query
    pub query: String,
}

impl UiState {
    /// Builds the initial state for a terminal of the given size.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            selected_index: 0,
            viewport: ViewportState {
                offset: 0,
                height: height.saturating_sub(2), // Subtract 2 for header and query line
                width,
            },
            query: String::new(),
        }
    }
}

use std::io::{stdout, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEvent, MouseEventKind,
};
use crossterm::style::Color::{DarkBlue, DarkGreen, Reset, Yellow};
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{event, execute, queue, terminal, ExecutableCommand};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use itertools::Itertools;
use log::debug;

use super::types::CycleDirection::{Down, Up};
use super::types::{CycleDirection, Selection, UiState, ViewportState};
use super::Selector;
use command_search_core::config::APP_NAME;
use command_search_core::error::Result;

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Disable raw mode on drop
        let _ = disable_raw_mode();
        let mut stdout = stdout();
        let _ = stdout.execute(DisableMouseCapture);
        let _ = stdout.execute(LeaveAlternateScreen);
    }
}

/// What a single input event asks the selection loop to do.
#[derive(Debug, PartialEq)]
enum Action {
    Select(usize),
    Abort,
    Move(CycleDirection),
    Update(UiState),
    Bell,
    Nothing,
}

/// Fuzzy selector drawn on the terminal's alternate screen.
///
/// Candidates are listed on the left and the preview of the highlighted one
/// on the right. Typing narrows the list; Enter selects; Esc, Ctrl-C or
/// Ctrl-D abort.
#[derive(Default)]
pub struct TerminalSelector;

impl Selector for TerminalSelector {
    fn select(
        &mut self,
        candidate_count: usize,
        label: &dyn Fn(usize) -> String,
        preview: &dyn Fn(Option<usize>, u16, u16) -> String,
    ) -> Result<Selection> {
        let labels: Vec<String> = (0..candidate_count).map(label).collect();

        let mut stdout = stdout();
        // Restores the terminal on every exit path, including a failed setup step below
        let _raw_mode_guard = RawModeGuard;
        stdout.execute(EnterAlternateScreen)?;
        enable_raw_mode()?;
        stdout.execute(EnableMouseCapture)?;

        let (width, height) = terminal::size()?;
        let mut ui_state = UiState::new(width, height);
        let mut matches = filter_indexes(&labels, &ui_state.query);
        let mut should_redraw = true;

        loop {
            if should_redraw {
                redraw_ui(&ui_state, &matches, &labels, preview)?;
                should_redraw = false;
            }

            if !event::poll(Duration::from_millis(500))? {
                continue;
            }

            let action = match event::read()? {
                Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                    handle_key_event(key_event, &ui_state, &matches)
                }
                Event::Mouse(MouseEvent { kind, .. }) => match kind {
                    MouseEventKind::ScrollDown => Action::Move(Down),
                    MouseEventKind::ScrollUp => Action::Move(Up),
                    _ => Action::Nothing,
                },
                Event::Resize(width, height) => {
                    Action::Update(handle_resize(width, height, &ui_state, matches.len()))
                }
                _ => Action::Nothing,
            };

            match action {
                Action::Select(index) => {
                    debug!("Selected candidate {index}");
                    return Ok(Selection::Index(index));
                }
                Action::Abort => return Ok(Selection::Aborted),
                Action::Move(direction) => {
                    let new_ui_state = move_selected_index(&ui_state, matches.len(), direction);
                    should_redraw = new_ui_state != ui_state;
                    ui_state = new_ui_state;
                }
                Action::Update(new_ui_state) => {
                    if new_ui_state.query != ui_state.query {
                        matches = filter_indexes(&labels, &new_ui_state.query);
                    }
                    should_redraw = new_ui_state != ui_state;
                    ui_state = new_ui_state;
                }
                Action::Bell => execute!(stdout, Print("\x07"))?,
                Action::Nothing => {}
            }
        }
    }
}

fn redraw_ui(
    ui_state: &UiState,
    matches: &[usize],
    labels: &[String],
    preview: &dyn Fn(Option<usize>, u16, u16) -> String,
) -> Result<()> {
    let mut stdout = stdout();

    queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

    print_header(ui_state, matches.len(), labels.len())?;

    let list_width = ui_state.viewport.width / 2;

    if matches.is_empty() {
        queue!(
            stdout,
            MoveTo(0, 1),
            SetForegroundColor(Color::Red),
            Print("No matching commands!".to_string()),
            SetAttribute(Attribute::Reset),
        )?;
    } else {
        print_candidates_with_selection(ui_state, matches, labels, list_width)?;
    }

    let highlighted = matches.get(ui_state.selected_index).copied();
    let preview_text = preview(highlighted, ui_state.viewport.width, ui_state.viewport.height + 2);
    print_preview(ui_state, &preview_text, list_width)?;

    queue!(
        stdout,
        MoveTo(0, ui_state.viewport.height + 1),
        SetAttribute(Attribute::Bold),
        Print(format!("> {}", ui_state.query)),
        SetAttribute(Attribute::Reset)
    )?;

    stdout.flush()?;
    Ok(())
}

/// Handle keyboard events in the selection UI
fn handle_key_event(key_event: KeyEvent, ui_state: &UiState, matches: &[usize]) -> Action {
    let control = key_event.modifiers.contains(KeyModifiers::CONTROL);

    match key_event.code {
        KeyCode::Esc => Action::Abort,
        KeyCode::Char('c' | 'd') if control => Action::Abort,
        KeyCode::Up => Action::Move(Up),
        KeyCode::Char('p' | 'k') if control => Action::Move(Up),
        KeyCode::Down => Action::Move(Down),
        KeyCode::Char('n' | 'j') if control => Action::Move(Down),
        KeyCode::Enter => match matches.get(ui_state.selected_index) {
            Some(index) => Action::Select(*index),
            None => Action::Bell,
        },
        KeyCode::Backspace => {
            if ui_state.query.is_empty() {
                return Action::Nothing;
            }
            let mut query = ui_state.query.clone();
            query.pop();
            Action::Update(with_query(ui_state, query))
        }
        KeyCode::Char('u') if control => Action::Update(with_query(ui_state, String::new())),
        KeyCode::Char(c) if !control => {
            let mut query = ui_state.query.clone();
            query.push(c);
            Action::Update(with_query(ui_state, query))
        }
        _ => Action::Nothing,
    }
}

/// A new query changes the match list, so the selection goes back to the top
fn with_query(ui_state: &UiState, query: String) -> UiState {
    let mut updated_state = ui_state.clone();
    updated_state.query = query;
    updated_state.selected_index = 0;
    updated_state.viewport.offset = 0;
    updated_state
}

/// Handle window resize events
fn handle_resize(width: u16, height: u16, ui_state: &UiState, match_count: usize) -> UiState {
    let new_height = height.saturating_sub(2);
    let mut ui_state = ui_state.clone();
    let mut new_viewport = ViewportState {
        width,
        height: new_height,
        offset: ui_state.viewport.offset,
    };

    // If growing taller, try to show more items above current selection
    match new_height.cmp(&ui_state.viewport.height) {
        std::cmp::Ordering::Greater if new_viewport.offset > 0 => {
            let height_increase = new_height - ui_state.viewport.height;
            new_viewport.offset = new_viewport.offset.saturating_sub(height_increase as usize);
        }
        std::cmp::Ordering::Less
            if new_height > 0 && ui_state.selected_index >= new_viewport.offset + new_height as usize =>
        {
            new_viewport.offset = ui_state.selected_index.saturating_sub(new_height as usize - 1);

            if new_viewport.offset + new_height as usize > match_count {
                new_viewport.offset = match_count.saturating_sub(new_height as usize);
            }
        }
        _ => {}
    }

    ui_state.viewport = new_viewport;
    ui_state
}

/// Print the header for the selection UI
fn print_header(ui_state: &UiState, match_count: usize, candidate_count: usize) -> Result<()> {
    let mut stdout = stdout();

    let left_padding = "  ";
    let position = if match_count == 0 { 0 } else { ui_state.selected_index + 1 };

    let instructions = format!(
        "{APP_NAME}   |   {position}/{match_count} of {candidate_count}   |   <enter>: Select   <esc>: Abort"
    );
    let content: String = format!("{left_padding}{instructions}")
        .chars()
        .take(ui_state.viewport.width as usize)
        .collect();

    let right_padding = " ".repeat((ui_state.viewport.width as usize).saturating_sub(content.chars().count()));

    queue!(
        stdout,
        MoveTo(0, 0),
        SetBackgroundColor(DarkGreen),
        Print(content),
        Print(right_padding),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )?;

    Ok(())
}

/// Print the visible candidates with the selected one highlighted
fn print_candidates_with_selection(
    ui_state: &UiState,
    matches: &[usize],
    labels: &[String],
    list_width: u16,
) -> Result<()> {
    let mut stdout = stdout();
    let viewport = &ui_state.viewport;

    let visible = matches
        .iter()
        .skip(viewport.offset)
        .take(viewport.height as usize);

    for (row, index) in visible.enumerate() {
        let is_selected = row + viewport.offset == ui_state.selected_index;
        let content = fit_to_width(&labels[*index], list_width as usize);

        queue!(stdout, MoveTo(0, row as u16 + 1))?;

        if is_selected {
            queue!(
                stdout,
                SetAttribute(Attribute::Bold),
                SetBackgroundColor(DarkBlue),
                SetForegroundColor(Yellow),
            )?;
        }

        queue!(
            stdout,
            Print(content),
            SetAttribute(Attribute::Reset),
            SetBackgroundColor(Reset),
            SetForegroundColor(Reset),
        )?;
    }

    Ok(())
}

/// Print the preview pane to the right of the candidate list
fn print_preview(ui_state: &UiState, preview_text: &str, list_width: u16) -> Result<()> {
    let mut stdout = stdout();
    let pane_column = list_width + 1;
    let pane_width = ui_state.viewport.width.saturating_sub(pane_column + 1) as usize;
    let mut preview_rows = pane_rows(preview_text, pane_width).into_iter();

    for row in 1..=ui_state.viewport.height {
        queue!(stdout, MoveTo(list_width, row), Print("│"))?;

        if let Some(line) = preview_rows.next() {
            queue!(stdout, MoveTo(pane_column + 1, row), Print(line))?;
        }
    }

    Ok(())
}

/// Splits preview text into rows no wider than the pane.
///
/// Lines that still overflow (a field label plus its wrapped first line) are
/// continued on the next row rather than cut off.
fn pane_rows(text: &str, pane_width: usize) -> Vec<String> {
    if pane_width == 0 {
        return Vec::new();
    }

    text.lines()
        .flat_map(|line| {
            let chars: Vec<char> = line.chars().collect();
            if chars.is_empty() {
                return vec![String::new()];
            }
            chars
                .chunks(pane_width)
                .map(|chunk| chunk.iter().collect())
                .collect()
        })
        .collect()
}

/// Truncates or pads `text` to exactly `width` characters
fn fit_to_width(text: &str, width: usize) -> String {
    // Labels may contain newlines, which would break the row layout
    let single_line = text.replace(['\n', '\r'], " ");
    let truncated: String = single_line.chars().take(width).collect();
    let padding = width.saturating_sub(truncated.chars().count());
    format!("{truncated}{}", " ".repeat(padding))
}

/// Move the selected index in the given direction, wrapping at either end
fn move_selected_index(ui_state: &UiState, match_count: usize, direction: CycleDirection) -> UiState {
    if match_count == 0 {
        return ui_state.clone();
    }

    let mut new_index = ui_state.selected_index;
    let mut ui_state = ui_state.clone();
    let viewport_height = (ui_state.viewport.height as usize).max(1);

    match direction {
        Up => {
            if new_index == 0 {
                new_index = match_count - 1;
                ui_state.viewport.offset = new_index.saturating_sub(viewport_height - 1);
            } else {
                new_index -= 1;
                if new_index < ui_state.viewport.offset {
                    ui_state.viewport.offset = new_index;
                }
            }
        }
        Down => {
            new_index = (new_index + 1) % match_count;
            if new_index < ui_state.selected_index {
                ui_state.viewport.offset = 0;
            } else if new_index >= ui_state.viewport.offset + viewport_height {
                ui_state.viewport.offset = new_index + 1 - viewport_height;
            }
        }
    }

    ui_state.selected_index = new_index;
    ui_state
}

/// Fuzzy-filters the candidate labels against `query`.
///
/// Returns candidate indexes ordered by descending match score, ties broken
/// by insertion order. An empty query matches everything in insertion order.
fn filter_indexes(labels: &[String], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..labels.len()).collect();
    }

    let matcher = SkimMatcherV2::default();

    labels
        .iter()
        .enumerate()
        .filter_map(|(index, label)| {
            matcher
                .fuzzy_match(label, query)
                .map(|score| (index, score))
        })
        .sorted_by(|(index_1, score_1), (index_2, score_2)| {
            score_2.cmp(score_1).then(index_1.cmp(index_2))
        })
        .map(|(index, _)| index)
        .collect()
}

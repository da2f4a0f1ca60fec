use command_search_core::command_definitions::CommandEntry;
use command_search_core::config::PREVIEW_WIDTH_DIVISOR;
use command_search_core::formatting::wrap_text;

/// Builds the preview pane text for the highlighted entry.
///
/// `width` is the width of the whole terminal; each field is wrapped to a
/// third of it so both fit inside the preview pane. Returns an empty string
/// when nothing is highlighted.
#[must_use]
pub fn build_preview(entry: Option<&CommandEntry>, width: u16, _height: u16) -> String {
    let Some(entry) = entry else {
        return String::new();
    };

    let wrap_width = usize::from(width / PREVIEW_WIDTH_DIVISOR);

    format!(
        "Command: {}\n\nDescription: {}",
        wrap_text(&entry.command, wrap_width),
        wrap_text(&entry.description, wrap_width)
    )
}

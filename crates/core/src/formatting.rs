/// Greedily wraps `text` so no produced line exceeds `width` characters.
///
/// Each line breaks at the last space at or before the limit. A run of more
/// than `width` characters with no space is hard-broken at exactly `width`.
/// Text that already fits is returned unchanged, and a `width` of zero
/// disables wrapping.
///
/// # Examples
///
/// ```
/// use command_search_core::formatting::wrap_text;
///
/// assert_eq!(wrap_text("list all files", 9), "list all\nfiles");
/// assert_eq!(wrap_text("abcdefgh", 3), "abc\ndef\ngh");
/// ```
pub fn wrap_text(text: &str, width: usize) -> String {
    if width == 0 || text.chars().count() <= width {
        return text.to_string();
    }

    let mut lines: Vec<&str> = Vec::new();
    let mut remaining = text;

    while remaining.chars().count() > width {
        let limit = byte_offset(remaining, width);
        // A space directly after the limit still yields a line of `width` characters
        let search_end = byte_offset(remaining, width + 1);

        let soft_break = remaining[..search_end]
            .rfind(' ')
            .map(|position| (position, remaining[..position].trim_end_matches(' ')))
            .filter(|(_, line)| !line.is_empty());

        let (split_at, line) = soft_break.unwrap_or((limit, &remaining[..limit]));

        lines.push(line);
        remaining = remaining[split_at..].trim_start_matches(' ');
    }

    if !remaining.is_empty() {
        lines.push(remaining);
    }

    lines.join("\n")
}

fn byte_offset(text: &str, char_count: usize) -> usize {
    text.char_indices()
        .nth(char_count)
        .map_or(text.len(), |(offset, _)| offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(wrap_text("ls -la", 10), "ls -la");
        assert_eq!(wrap_text("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn test_breaks_on_spaces() {
        let wrapped = wrap_text("a very long description that exceeds width", 10);
        assert_eq!(wrapped, "a very\nlong\ndescriptio\nn that\nexceeds\nwidth");

        for line in wrapped.lines() {
            assert!(line.chars().count() <= 10, "line too long: {line:?}");
        }
    }

    #[test]
    fn test_hard_breaks_long_token() {
        assert_eq!(
            wrap_text("supercalifragilistic", 10),
            "supercalif\nragilistic"
        );
    }

    #[test]
    fn test_space_right_after_limit() {
        assert_eq!(wrap_text("abcde fgh", 5), "abcde\nfgh");
    }

    #[test]
    fn test_collapses_spaces_at_break() {
        assert_eq!(wrap_text("one    two", 4), "one\ntwo");
    }

    #[test]
    fn test_leading_space_is_not_a_break_point() {
        assert_eq!(wrap_text(" abcdef", 3), " ab\ncde\nf");
    }

    #[test]
    fn test_multibyte_characters() {
        assert_eq!(wrap_text("ééééé ééé", 5), "ééééé\nééé");
        assert_eq!(wrap_text("日本語テキスト", 3), "日本語\nテキス\nト");
    }

    #[test]
    fn test_zero_width_disables_wrapping() {
        assert_eq!(wrap_text("no wrap here", 0), "no wrap here");
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(wrap_text("", 5), "");
    }
}

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Format a header with text and an underline of the same display width
///
/// # Arguments
/// * `text` - The header text to display
/// * `double_line` - If true, uses a double-line underline (═), otherwise single-line (─)
pub fn format_header(text: &str, double_line: bool) -> String {
    let separator_char = if double_line { "═" } else { "─" };
    format!("{}\n{}\n", text, separator_char.repeat(text.width()))
}

/// Pad text with spaces to a display width, truncating with `…` if it is wider
pub fn pad_to_width(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width <= width {
        return format!("{}{}", text, " ".repeat(width - text_width));
    }
    if width == 0 {
        return String::new();
    }

    let mut truncated = String::new();
    let mut used = 0;
    for c in text.chars() {
        let char_width = c.width().unwrap_or(0);
        if used + char_width > width - 1 {
            break;
        }
        truncated.push(c);
        used += char_width;
    }
    truncated.push('…');
    used += 1;
    format!("{}{}", truncated, " ".repeat(width - used))
}

/// Right-align text to a display width
pub fn align_right(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat(width - text_width), text)
}

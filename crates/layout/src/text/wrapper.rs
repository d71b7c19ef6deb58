use crate::style::TextStyle;

/// Breaks `text` into lines no wider than `max_width` when set in `style`.
///
/// Lines break at whitespace; explicit newlines always start a new line and a
/// blank source line is kept as an empty line. A single word wider than the
/// line is split at character boundaries. Whitespace-only input yields no lines.
pub fn wrap_text(text: &str, style: &TextStyle, max_width: f32) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let face = style.face;
    let size = style.size;
    let space_width = face.text_width(" ", size);
    let mut lines = Vec::new();

    for segment in text.trim_end().split('\n') {
        let mut line = String::new();
        let mut line_width = 0.0f32;
        let mut has_words = false;

        for word in segment.split_whitespace() {
            has_words = true;
            let word_width = face.text_width(word, size);

            if !line.is_empty() && line_width + space_width + word_width > max_width {
                lines.push(std::mem::take(&mut line));
                line_width = 0.0;
            }

            if word_width > max_width {
                // Hard break: flush any partial line, then chop the word.
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0.0;
                }
                for c in word.chars() {
                    let w = face.char_units(c) as f32 * size / 1000.0;
                    if !line.is_empty() && line_width + w > max_width {
                        lines.push(std::mem::take(&mut line));
                        line_width = 0.0;
                    }
                    line.push(c);
                    line_width += w;
                }
                continue;
            }

            if !line.is_empty() {
                line.push(' ');
                line_width += space_width;
            }
            line.push_str(word);
            line_width += word_width;
        }

        if !line.is_empty() || !has_words {
            lines.push(line);
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::FontFace;

    fn body() -> TextStyle {
        TextStyle::new(FontFace::Regular, 10.0)
    }

    #[test]
    fn blank_text_has_no_lines() {
        assert!(wrap_text("", &body(), 100.0).is_empty());
        assert!(wrap_text("  \n ", &body(), 100.0).is_empty());
    }

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(wrap_text("Sales rose", &body(), 500.0), vec!["Sales rose"]);
    }

    #[test]
    fn lines_respect_max_width() {
        let style = body();
        let text = "The quick brown fox jumps over the lazy dog and keeps running through the field";
        let lines = wrap_text(text, &style, 120.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(style.face.text_width(line, style.size) <= 120.0 + 1e-3, "{line}");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn newlines_force_breaks_and_blank_lines_survive() {
        let lines = wrap_text("first\n\nsecond", &body(), 500.0);
        assert_eq!(lines, vec!["first", "", "second"]);
    }

    #[test]
    fn overlong_word_is_split() {
        let style = body();
        let word = "x".repeat(60);
        let lines = wrap_text(&word, &style, 50.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(style.face.text_width(line, style.size) <= 50.0 + 1e-3);
        }
    }
}

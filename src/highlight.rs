use inksac::prelude::*;

/// Terminal colouring for the input line and for error messages.
/// Everything degrades to plain text when colour is unsupported.
#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    fn enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Colours the command word (cyan if known, red otherwise) and flags
    /// (yellow). Whitespace is preserved byte for byte so the cursor stays
    /// in place.
    pub fn highlight_command(&self, input: &str, is_known: impl Fn(&str) -> bool) -> String {
        if !self.enabled() {
            return input.to_string();
        }

        let mut out = String::with_capacity(input.len());
        let mut first = true;
        for piece in input.split_inclusive(char::is_whitespace) {
            let word = piece.trim_end();
            let gap = &piece[word.len()..];
            if word.is_empty() {
                out.push_str(piece);
                continue;
            }

            let styled = if first {
                let color = if is_known(word) { Color::Cyan } else { Color::Red };
                word.style(Style::builder().foreground(color).bold().build())
                    .to_string()
            } else if word.starts_with('-') {
                word.style(Style::builder().foreground(Color::Yellow).build())
                    .to_string()
            } else {
                word.to_string()
            };
            first = false;
            out.push_str(&styled);
            out.push_str(gap);
        }
        out
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if !self.enabled() {
            return error.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();
        error.style(error_style).to_string()
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        if !self.enabled() {
            return hint.to_string();
        }

        let hint_style = Style::builder().foreground(Color::RGB(128, 128, 128)).build();
        hint.style(hint_style).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_when_colour_is_off() {
        let highlighter = SyntaxHighlighter {
            color_support: ColorSupport::NoColor,
        };
        assert_eq!(highlighter.highlight_command("ls  -l data", |_| true), "ls  -l data");
        assert_eq!(highlighter.highlight_error("boom"), "boom");
    }

    #[test]
    fn test_keeps_words_in_place() {
        let highlighter = SyntaxHighlighter::new();
        let highlighted = highlighter.highlight_command("cp  -r data", |_| true);
        assert!(highlighted.contains("cp"));
        assert!(highlighted.contains("-r"));
        assert!(highlighted.ends_with(" data"));
    }
}

//! html2text converter

use clap::Parser;

use crate::domain::communication::plaintext::HtmlToText;

/// Plaintext rendering configuration
#[derive(Clone, Debug, Parser)]
pub struct PlaintextConfig {
    /// Column at which plaintext bodies are wrapped
    #[clap(long, env = "PLAINTEXT_WIDTH", default_value = "80")]
    pub plaintext_width: usize,
}

/// Converts HTML to plaintext with html2text
#[derive(Clone, Debug)]
pub struct Html2TextConverter {
    width: usize,
}

impl Html2TextConverter {
    /// Create a converter that wraps lines at `width` columns
    pub fn new(width: usize) -> Self {
        Self { width }
    }
}

impl Default for Html2TextConverter {
    fn default() -> Self {
        Self::new(80)
    }
}

impl From<&PlaintextConfig> for Html2TextConverter {
    fn from(config: &PlaintextConfig) -> Self {
        Self::new(config.plaintext_width)
    }
}

impl HtmlToText for Html2TextConverter {
    fn convert(&self, html: &str) -> String {
        html2text::from_read(html.as_bytes(), self.width)
            .trim_end()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_becomes_plain_line() {
        let converter = Html2TextConverter::default();

        assert_eq!(converter.convert("<p>Hi Alice</p>"), "Hi Alice");
    }

    #[test]
    fn test_markup_is_stripped() {
        let text = Html2TextConverter::default().convert("<p>Hello <span>there</span></p>");

        assert_eq!(text, "Hello there");
    }

    #[test]
    fn test_long_lines_wrap_at_width() {
        let converter = Html2TextConverter::new(20);

        let text = converter.convert("<p>one two three four five six seven eight nine ten</p>");

        assert!(text.lines().count() > 1);
        assert!(text.lines().all(|line| line.chars().count() <= 20));
    }
}

//! syntect-backed highlighter

use syntect::easy::HighlightLines;
use syntect::highlighting::{Color, FontStyle, Style, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};

use super::{
    container_class, plain_line, split_lines, strip_line_ending, Highlighted, HighlightedLine,
    HighlightedToken, Highlighter, StyleProps, LINE_CLASS, PLAIN_TOKEN_CLASS,
};

const CONTAINER_CLASS: &str = "highlight";
const TOKEN_CLASS: &str = "token";

/// Names of the bundled highlight themes
pub fn available_themes() -> Vec<String> {
    ThemeSet::load_defaults().themes.into_keys().collect()
}

/// Highlighter using syntect grammars and themes
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl SyntectHighlighter {
    /// Create a highlighter with one of the bundled themes
    ///
    /// Unknown theme names fall back to the first bundled theme.
    pub fn new(theme_name: &str) -> Self {
        let mut theme_set = ThemeSet::load_defaults();
        let theme = match theme_set.themes.remove(theme_name) {
            Some(theme) => theme,
            None => {
                tracing::warn!("Unknown highlight theme {:?}, using default", theme_name);
                theme_set
                    .themes
                    .into_values()
                    .next()
                    .unwrap_or_default()
            }
        };

        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        }
    }

    /// Look up a grammar by fence token, then by file extension
    fn find_syntax(&self, language: &str) -> Option<&SyntaxReference> {
        self.syntax_set
            .find_syntax_by_token(language)
            .or_else(|| self.syntax_set.find_syntax_by_extension(language))
    }

    fn container_props(&self, language: Option<&str>) -> StyleProps {
        let settings = &self.theme.settings;
        let declarations: Vec<String> = [
            settings.foreground.map(|c| format!("color:{}", hex(c))),
            settings.background.map(|c| format!("background-color:{}", hex(c))),
        ]
        .into_iter()
        .flatten()
        .collect();

        StyleProps {
            class_name: container_class(CONTAINER_CLASS, language),
            style: (!declarations.is_empty()).then(|| declarations.join(";")),
        }
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new("base16-ocean.dark")
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight<'a>(&'a self, source: &'a str, language: Option<&'a str>) -> Highlighted<'a> {
        let props = self.container_props(language);

        let Some(syntax) = language.and_then(|lang| self.find_syntax(lang)) else {
            if let Some(lang) = language {
                tracing::debug!("No grammar for {:?}, rendering as plain text", lang);
            }
            return Highlighted {
                props,
                lines: Box::new(split_lines(source).map(plain_line)),
            };
        };

        let mut state = HighlightLines::new(syntax, &self.theme);
        let syntax_set = &self.syntax_set;
        let lines = split_lines(source).map(move |line| {
            match state.highlight_line(line, syntax_set) {
                Ok(ranges) => styled_line(&ranges),
                Err(e) => {
                    tracing::warn!("Highlighting failed, using plain text: {}", e);
                    plain_line(line)
                }
            }
        });

        Highlighted {
            props,
            lines: Box::new(lines),
        }
    }
}

fn styled_line(ranges: &[(Style, &str)]) -> HighlightedLine {
    let mut tokens: Vec<HighlightedToken> = ranges
        .iter()
        .filter_map(|(style, text)| {
            let content = strip_line_ending(text);
            (!content.is_empty()).then(|| HighlightedToken {
                content: content.to_string(),
                props: StyleProps {
                    class_name: TOKEN_CLASS.to_string(),
                    style: Some(token_style(style)),
                },
            })
        })
        .collect();

    // Blank lines still carry one token so every line renders alike
    if tokens.is_empty() {
        tokens.push(HighlightedToken {
            content: String::new(),
            props: StyleProps::class(PLAIN_TOKEN_CLASS),
        });
    }

    HighlightedLine {
        props: StyleProps::class(LINE_CLASS),
        tokens,
    }
}

fn token_style(style: &Style) -> String {
    let mut css = format!("color:{}", hex(style.foreground));
    if style.font_style.contains(FontStyle::BOLD) {
        css.push_str(";font-weight:bold");
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        css.push_str(";font-style:italic");
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        css.push_str(";text-decoration:underline");
    }
    css
}

fn hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_language_is_tokenized() {
        let highlighter = SyntectHighlighter::default();
        let out = highlighter.highlight("fn main() {}\nlet x = 1;", Some("rust"));
        assert_eq!(out.props.class_name, "highlight language-rust");
        assert!(out.props.style.as_deref().unwrap().contains("background-color:#"));

        let lines: Vec<_> = out.lines.collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].tokens.len() > 1);

        let text: String = lines[0].tokens.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(text, "fn main() {}");
        assert!(lines[0]
            .tokens
            .iter()
            .all(|t| t.props.style.as_deref().unwrap().starts_with("color:#")));
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain() {
        let highlighter = SyntectHighlighter::default();
        let lines: Vec<_> = highlighter
            .highlight("a b c\nd", Some("no-such-language"))
            .lines
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].tokens.len(), 1);
        assert_eq!(lines[0].tokens[0].content, "a b c");
        assert_eq!(lines[1].tokens[0].content, "d");
    }

    #[test]
    fn test_absent_language_single_token() {
        let highlighter = SyntectHighlighter::default();
        let out = highlighter.highlight("const x = 1;", None);
        assert_eq!(out.props.class_name, "highlight");

        let lines: Vec<_> = out.lines.collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].tokens.len(), 1);
        assert_eq!(lines[0].tokens[0].content, "const x = 1;");
    }

    #[test]
    fn test_blank_line_keeps_a_token() {
        let highlighter = SyntectHighlighter::default();
        let lines: Vec<_> = highlighter
            .highlight("let a = 1;\n\nlet b = 2;", Some("rs"))
            .lines
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].tokens.len(), 1);
        assert_eq!(lines[1].tokens[0].content, "");
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let highlighter = SyntectHighlighter::new("does-not-exist");
        let lines: Vec<_> = highlighter.highlight("x", Some("rust")).lines.collect();
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_available_themes() {
        assert!(available_themes().contains(&"base16-ocean.dark".to_string()));
    }
}

//! Token highlighting
//!
//! A [`Highlighter`] turns source text into lines of styled tokens. The code
//! block renderer only copies the style metadata it receives onto elements,
//! so any highlighter can be swapped in.

mod syntax;

pub use syntax::{available_themes, SyntectHighlighter};

/// Presentation attributes for a container, line or token
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleProps {
    pub class_name: String,
    /// Inline CSS declarations
    pub style: Option<String>,
}

impl StyleProps {
    /// Props carrying only a class
    pub fn class(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            style: None,
        }
    }
}

/// A lexical unit with its style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedToken {
    pub content: String,
    pub props: StyleProps,
}

/// One source line; tokens never contain the line terminator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedLine {
    pub props: StyleProps,
    pub tokens: Vec<HighlightedToken>,
}

/// Output of a highlighter: container props and a lazy sequence of lines
pub struct Highlighted<'a> {
    pub props: StyleProps,
    pub lines: Box<dyn Iterator<Item = HighlightedLine> + 'a>,
}

/// Produces highlighted lines for a piece of source text
pub trait Highlighter {
    /// Tokenize `source`. Absent or unknown languages must still yield one
    /// plain token per line.
    fn highlight<'a>(&'a self, source: &'a str, language: Option<&'a str>) -> Highlighted<'a>;
}

const LINE_CLASS: &str = "token-line";
const PLAIN_TOKEN_CLASS: &str = "token plain";

/// Container class for a block in the given language
pub(crate) fn container_class(base: &str, language: Option<&str>) -> String {
    match language {
        Some(lang) => format!("{} language-{}", base, lang),
        None => base.to_string(),
    }
}

/// One unstyled token per line
pub(crate) fn plain_line(line: &str) -> HighlightedLine {
    HighlightedLine {
        props: StyleProps::class(LINE_CLASS),
        tokens: vec![HighlightedToken {
            content: strip_line_ending(line).to_string(),
            props: StyleProps::class(PLAIN_TOKEN_CLASS),
        }],
    }
}

/// Split source into lines keeping their endings; an empty source is
/// still one (empty) line
pub(crate) fn split_lines(source: &str) -> impl Iterator<Item = &str> {
    source
        .split_inclusive('\n')
        .chain(source.is_empty().then_some(""))
}

pub(crate) fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Highlighter that performs no lexing at all
#[derive(Debug, Clone, Default)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight<'a>(&'a self, source: &'a str, language: Option<&'a str>) -> Highlighted<'a> {
        Highlighted {
            props: StyleProps::class(container_class("highlight", language)),
            lines: Box::new(split_lines(source).map(plain_line)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_single_line() {
        let out = PlainHighlighter.highlight("const x = 1;", None);
        assert_eq!(out.props.class_name, "highlight");

        let lines: Vec<_> = out.lines.collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].tokens.len(), 1);
        assert_eq!(lines[0].tokens[0].content, "const x = 1;");
    }

    #[test]
    fn test_plain_one_token_per_line() {
        let out = PlainHighlighter.highlight("a\r\nb\n\nc", Some("text"));
        assert_eq!(out.props.class_name, "highlight language-text");

        let contents: Vec<_> = out
            .lines
            .map(|line| {
                assert_eq!(line.tokens.len(), 1);
                line.tokens[0].content.clone()
            })
            .collect();
        assert_eq!(contents, vec!["a", "b", "", "c"]);
    }
}

use std::sync::OnceLock;

use syntect::{
    easy::HighlightLines,
    highlighting::ThemeSet,
    parsing::{SyntaxReference, SyntaxSet},
    util::{as_24_bit_terminal_escaped, LinesWithEndings},
};

static HIGHLIGHTER: OnceLock<(SyntaxSet, ThemeSet)> = OnceLock::new();

/// Highlights script content for the given script type. Returns `None` if
/// the type has no known syntax.
pub fn highlight(script_type: &str, content: &str) -> Option<String> {
    let (syntaxes, themes) = HIGHLIGHTER.get_or_init(|| {
        (
            SyntaxSet::load_defaults_newlines(),
            ThemeSet::load_defaults(),
        )
    });

    let syntax = resolve_syntax(syntaxes, script_type)?;
    tracing::debug!("syntax: {:?}", syntax.name);

    let theme = themes.themes.get("base16-ocean.dark")?;
    let mut highlighter = HighlightLines::new(syntax, theme);

    let mut result = String::new();
    for line in LinesWithEndings::from(content) {
        let ranges = match highlighter.highlight_line(line, syntaxes) {
            Ok(it) => it,
            Err(err) => {
                tracing::error!("highlighting script failed: {:?}", err);
                return None;
            }
        };

        result.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
    }
    result.push_str("\x1b[0m");

    Some(result)
}

fn resolve_syntax<'a>(syntaxes: &'a SyntaxSet, script_type: &str) -> Option<&'a SyntaxReference> {
    let script_type = script_type.to_lowercase();
    let extension = match script_type.as_str() {
        "bash" | "shell" | "zsh" => "sh",
        "python" => "py",
        "javascript" => "js",
        "ruby" => "rb",
        other => other,
    };

    syntaxes
        .find_syntax_by_extension(extension)
        .or_else(|| syntaxes.find_syntax_by_token(&script_type))
}

#[cfg(test)]
mod test {
    #[test]
    fn bash_is_highlighted() {
        let highlighted = super::highlight("bash", "echo hello\n");

        assert!(highlighted.is_some());
        assert!(highlighted.unwrap_or_default().contains("\x1b["));
    }

    #[test]
    fn unknown_script_type_is_not_highlighted() {
        assert_eq!(super::highlight("brainfuck", "+++"), None);
    }
}

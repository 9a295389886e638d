use insight_core::{AppViewModel, RenderRules, ResourceLink, SessionState, Tone};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};

use super::constants::*;
use super::markdown::{render_markdown, RenderNode, Span};

const CODE_THEME: &str = "base16-ocean.dark";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const ITALIC: &str = "\x1b[3m";
const DIM: &str = "\x1b[2m";
const UNDERLINE: &str = "\x1b[4m";

pub struct CodeHighlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl CodeHighlighter {
    pub fn load() -> Option<Self> {
        let theme = ThemeSet::load_defaults().themes.remove(CODE_THEME)?;
        Some(Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }

    fn highlight(&self, language: &str, code: &str) -> Option<String> {
        let syntax = self.syntax_set.find_syntax_by_token(language)?;
        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        let mut out = String::with_capacity(code.len() * 2);
        for line in LinesWithEndings::from(code) {
            let ranges = highlighter.highlight_line(line, &self.syntax_set).ok()?;
            out.push_str(&as_24_bit_terminal_escaped(&ranges, false));
        }
        out.push_str(RESET);
        Some(out)
    }
}

/// How the view is drawn: plain text, or ANSI colours with optional highlighting.
pub struct TerminalStyle {
    color: bool,
    highlighter: Option<CodeHighlighter>,
}

impl TerminalStyle {
    pub fn plain() -> Self {
        Self {
            color: false,
            highlighter: None,
        }
    }

    pub fn colored() -> Self {
        Self {
            color: true,
            highlighter: CodeHighlighter::load(),
        }
    }

    fn paint(&self, codes: &str, text: &str) -> String {
        if self.color && !codes.is_empty() {
            format!("{codes}{text}{RESET}")
        } else {
            text.to_owned()
        }
    }

    fn tone(&self, tone: Option<Tone>) -> &'static str {
        match tone {
            Some(Tone::Warning) => "\x1b[33m",
            Some(Tone::Info) => "\x1b[36m",
            Some(Tone::Success) => "\x1b[32m",
            None => "",
        }
    }
}

/// Draws the whole screen for `view`.
pub fn render(view: &AppViewModel, style: &TerminalStyle) -> String {
    let mut out = String::new();
    if style.color {
        out.push_str(CLEAR_SCREEN);
    }

    let input = if view.query_input.is_empty() {
        style.paint(DIM, INPUT_PLACEHOLDER)
    } else {
        view.query_input.clone()
    };
    out.push_str(&format!("{LABEL_SEARCH}: {input}\n{SEPARATOR}\n"));

    match view.session {
        SessionState::Idle => {
            out.push_str(&format!(
                "Type a problem number and press Enter. `{CMD_QUIT}` exits.\n"
            ));
        }
        SessionState::Loading => {
            let query = view.loading_query.as_deref().unwrap_or_default();
            out.push_str(&style.paint(style.tone(Some(Tone::Info)), &format!("⏳ {LABEL_LOADING}")));
            out.push_str(&format!(" (#{query})\n"));
        }
        SessionState::Displaying => render_insight(view, style, &mut out),
    }
    out
}

fn render_insight(view: &AppViewModel, style: &TerminalStyle, out: &mut String) {
    let query = view.insight_query.as_deref().unwrap_or_default();
    let title = format!("{LABEL_INSIGHTS_FOR}{query}");
    out.push_str(&style.paint(style.tone(Some(Tone::Warning)), &title));
    out.push('\n');

    if let Some(primary) = view.primary.as_deref() {
        write_nodes(&render_markdown(primary, &RenderRules::insights()), style, out);
    }

    if view.show_reveal_button {
        out.push_str(&format!("\n[ {BUTTON_SHOW_APPROACH} ]  type `{CMD_REVEAL}`\n"));
    }

    if let Some(approach) = view.approach.as_deref() {
        out.push('\n');
        out.push_str(SEPARATOR);
        out.push('\n');
        write_nodes(&render_markdown(approach, &RenderRules::approach()), style, out);
    }

    if !view.resources.is_empty() {
        write_resources(&view.resources, style, out);
    }
}

fn write_resources(links: &[ResourceLink], style: &TerminalStyle, out: &mut String) {
    out.push('\n');
    out.push_str(&style.paint(style.tone(Some(Tone::Info)), LABEL_LEARN_MORE));
    out.push('\n');
    for link in links {
        out.push_str(&format!("  {}\n", style.paint(style.tone(Some(Tone::Info)), &link.title)));
        out.push_str(&format!(
            "    {LABEL_VISIT_RESOURCE}: {}\n",
            style.paint(UNDERLINE, &link.url)
        ));
    }
}

fn write_nodes(nodes: &[RenderNode], style: &TerminalStyle, out: &mut String) {
    for node in nodes {
        match node {
            RenderNode::Heading {
                level,
                prefix,
                tone,
                text,
            } => {
                let text = match prefix {
                    Some(prefix) => format!("{prefix} {text}"),
                    None => text.clone(),
                };
                // Only the three top levels stand out; deeper ones read like body text.
                let weight = if *level <= 3 { BOLD } else { "" };
                out.push('\n');
                out.push_str(&style.paint(&format!("{weight}{}", style.tone(*tone)), &text));
                out.push('\n');
            }
            RenderNode::Paragraph { spaced, spans } => {
                if *spaced {
                    out.push('\n');
                }
                out.push_str(&write_spans(spans, style));
                out.push('\n');
            }
            RenderNode::ListItem {
                depth,
                marker,
                spaced,
                spans,
            } => {
                let indent = "  ".repeat(*depth + 1);
                let body = write_spans(spans, style).replace('\n', &format!("\n{indent}  "));
                out.push_str(&format!("{indent}{marker} {body}\n"));
                if *spaced && *depth == 0 {
                    out.push('\n');
                }
            }
            RenderNode::CodeBlock {
                language,
                highlight,
                code,
            } => {
                out.push('\n');
                let highlighted = match (language, highlight, &style.highlighter) {
                    (Some(language), true, Some(highlighter)) if style.color => {
                        highlighter.highlight(language, code)
                    }
                    _ => None,
                };
                match highlighted {
                    Some(text) => out.push_str(&text),
                    None => {
                        for line in code.lines() {
                            out.push_str("    ");
                            out.push_str(&style.paint(style.tone(Some(Tone::Warning)), line));
                            out.push('\n');
                        }
                    }
                }
                if !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            RenderNode::Rule => {
                out.push_str(SEPARATOR);
                out.push('\n');
            }
        }
    }
}

fn write_spans(spans: &[Span], style: &TerminalStyle) -> String {
    spans
        .iter()
        .map(|span| match span {
            Span::Text(text) => text.clone(),
            Span::Strong { text, tone } => {
                style.paint(&format!("{BOLD}{}", style.tone(*tone)), text)
            }
            Span::Emphasis(text) => style.paint(ITALIC, text),
            Span::Code { text, tone } => match tone {
                Some(_) => style.paint(style.tone(*tone), &format!("`{text}`")),
                None => format!("`{text}`"),
            },
            Span::Link { text, url } => format!("{} ({url})", style.paint(UNDERLINE, text)),
        })
        .collect()
}

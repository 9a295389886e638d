//! Per-element rendering rules handed to the markdown renderer.
//!
//! The renderer owns parsing and layout; these rules only say how each element
//! kind of an insight document should be decorated.

/// Colour role of a decorated element; the front-end maps it to a concrete style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Warning,
    Info,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingRule {
    /// Emoji put in front of the heading text.
    pub prefix: &'static str,
    pub tone: Tone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRules {
    /// Rules for heading levels 1 to 3; deeper levels and `None` entries render plainly.
    pub headings: [Option<HeadingRule>; 3],
    /// Blank line before each paragraph.
    pub spaced_paragraphs: bool,
    pub strong_tone: Option<Tone>,
    /// Blank line after each list item.
    pub spaced_list_items: bool,
    pub inline_code_tone: Option<Tone>,
    /// Fenced blocks with a language tag go through the syntax highlighter.
    pub highlight_code_blocks: bool,
}

impl RenderRules {
    /// Rules for the primary overview section.
    pub const fn insights() -> Self {
        Self {
            headings: [
                Some(HeadingRule {
                    prefix: "📌",
                    tone: Tone::Warning,
                }),
                Some(HeadingRule {
                    prefix: "🔧",
                    tone: Tone::Info,
                }),
                Some(HeadingRule {
                    prefix: "💡",
                    tone: Tone::Success,
                }),
            ],
            spaced_paragraphs: true,
            strong_tone: Some(Tone::Warning),
            spaced_list_items: true,
            inline_code_tone: Some(Tone::Warning),
            highlight_code_blocks: true,
        }
    }

    /// Rules for the revealed efficient approach section.
    pub const fn approach() -> Self {
        Self {
            headings: [
                None,
                Some(HeadingRule {
                    prefix: "🚀",
                    tone: Tone::Info,
                }),
                None,
            ],
            spaced_paragraphs: true,
            strong_tone: None,
            spaced_list_items: false,
            inline_code_tone: None,
            highlight_code_blocks: false,
        }
    }

    /// Rule for a heading of `level` (1-based).
    pub fn heading(&self, level: usize) -> Option<HeadingRule> {
        level
            .checked_sub(1)
            .and_then(|idx| self.headings.get(idx).copied().flatten())
    }
}

/// Language tag of a fenced code block, taken from its info string.
///
/// Only the leading ASCII word characters of the first token count, so
/// `rust,ignore` yields `rust` and `{python}` yields nothing.
pub fn code_language(info_string: &str) -> Option<&str> {
    let token = info_string.split_whitespace().next()?;
    let end = token
        .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
        .unwrap_or(token.len());
    let lang = &token[..end];
    if lang.is_empty() {
        None
    } else {
        Some(lang)
    }
}

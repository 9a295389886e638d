//! Markdown to render nodes, decorated with the core's element rules.

use insight_core::{code_language, RenderRules, Tone};
use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Strong { text: String, tone: Option<Tone> },
    Emphasis(String),
    Code { text: String, tone: Option<Tone> },
    Link { text: String, url: String },
}

impl Span {
    fn text(&self) -> &str {
        match self {
            Span::Text(text)
            | Span::Strong { text, .. }
            | Span::Emphasis(text)
            | Span::Code { text, .. }
            | Span::Link { text, .. } => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderNode {
    Heading {
        level: usize,
        prefix: Option<&'static str>,
        tone: Option<Tone>,
        text: String,
    },
    Paragraph {
        spaced: bool,
        spans: Vec<Span>,
    },
    ListItem {
        depth: usize,
        marker: String,
        spaced: bool,
        spans: Vec<Span>,
    },
    CodeBlock {
        language: Option<String>,
        highlight: bool,
        code: String,
    },
    Rule,
}

/// Parses `markdown` into render nodes following `rules`.
pub fn render_markdown(markdown: &str, rules: &RenderRules) -> Vec<RenderNode> {
    let mut builder = NodeBuilder::new(rules);
    for event in Parser::new(markdown) {
        builder.handle(event);
    }
    builder.finish()
}

struct CodeBuffer {
    language: Option<String>,
    code: String,
}

struct NodeBuilder<'r> {
    rules: &'r RenderRules,
    nodes: Vec<RenderNode>,
    spans: Vec<Span>,
    strong_depth: usize,
    emphasis_depth: usize,
    link: Option<(String, String)>,
    heading: Option<usize>,
    code: Option<CodeBuffer>,
    /// Next ordinal per open list; `None` for bullet lists.
    lists: Vec<Option<u64>>,
    item_marker: Option<String>,
}

impl<'r> NodeBuilder<'r> {
    fn new(rules: &'r RenderRules) -> Self {
        Self {
            rules,
            nodes: Vec::new(),
            spans: Vec::new(),
            strong_depth: 0,
            emphasis_depth: 0,
            link: None,
            heading: None,
            code: None,
            lists: Vec::new(),
            item_marker: None,
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => self.spans.push(Span::Code {
                text: code.to_string(),
                tone: self.rules.inline_code_tone,
            }),
            Event::Html(html) | Event::InlineHtml(html) => self.push_text(&html),
            Event::SoftBreak => self.push_text(" "),
            Event::HardBreak => self.push_text("\n"),
            Event::Rule => {
                self.flush();
                self.nodes.push(RenderNode::Rule);
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush();
                self.heading = Some(level as usize);
            }
            Tag::CodeBlock(kind) => {
                self.flush();
                let language = match kind {
                    CodeBlockKind::Fenced(info) => code_language(&info).map(str::to_owned),
                    CodeBlockKind::Indented => None,
                };
                self.code = Some(CodeBuffer {
                    language,
                    code: String::new(),
                });
            }
            Tag::List(start) => {
                // Text of the enclosing item comes before its nested list.
                self.flush();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                self.item_marker = Some(self.next_marker());
            }
            Tag::Strong => self.strong_depth += 1,
            Tag::Emphasis => self.emphasis_depth += 1,
            Tag::Link { dest_url, .. } => self.link = Some((dest_url.to_string(), String::new())),
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) => {
                if let Some(level) = self.heading.take() {
                    let text: String = self.spans.drain(..).map(|span| span.text().to_owned()).collect();
                    let rule = self.rules.heading(level);
                    self.nodes.push(RenderNode::Heading {
                        level,
                        prefix: rule.map(|r| r.prefix),
                        tone: rule.map(|r| r.tone),
                        text,
                    });
                }
            }
            TagEnd::CodeBlock => {
                if let Some(buffer) = self.code.take() {
                    let code = buffer.code.strip_suffix('\n').unwrap_or(&buffer.code).to_owned();
                    self.nodes.push(RenderNode::CodeBlock {
                        highlight: self.rules.highlight_code_blocks && buffer.language.is_some(),
                        language: buffer.language,
                        code,
                    });
                }
            }
            TagEnd::Paragraph => {
                // Loose list items wrap their text in paragraphs; keep it in the item.
                if self.item_marker.is_none() {
                    self.flush();
                } else if !self.spans.is_empty() {
                    self.push_text("\n");
                }
            }
            TagEnd::Item => {
                if let Some(Span::Text(text)) = self.spans.last_mut() {
                    if text.ends_with('\n') {
                        text.pop();
                    }
                }
                self.flush();
                self.item_marker = None;
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
            }
            TagEnd::Strong => self.strong_depth = self.strong_depth.saturating_sub(1),
            TagEnd::Emphasis => self.emphasis_depth = self.emphasis_depth.saturating_sub(1),
            TagEnd::Link => {
                if let Some((url, text)) = self.link.take() {
                    self.spans.push(Span::Link { text, url });
                }
            }
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(buffer) = self.code.as_mut() {
            buffer.code.push_str(text);
            return;
        }
        if let Some((_, link_text)) = self.link.as_mut() {
            link_text.push_str(text);
            return;
        }
        if self.strong_depth > 0 {
            self.spans.push(Span::Strong {
                text: text.to_owned(),
                tone: self.rules.strong_tone,
            });
        } else if self.emphasis_depth > 0 {
            self.spans.push(Span::Emphasis(text.to_owned()));
        } else if let Some(Span::Text(last)) = self.spans.last_mut() {
            last.push_str(text);
        } else {
            self.spans.push(Span::Text(text.to_owned()));
        }
    }

    fn next_marker(&mut self) -> String {
        match self.lists.last_mut() {
            Some(Some(ordinal)) => {
                let marker = format!("{ordinal}.");
                *ordinal += 1;
                marker
            }
            _ => "•".to_string(),
        }
    }

    /// Emits pending inline content as a paragraph or as the open list item.
    fn flush(&mut self) {
        if self.spans.is_empty() {
            return;
        }
        let spans = std::mem::take(&mut self.spans);
        let node = match self.item_marker.take() {
            Some(marker) => RenderNode::ListItem {
                depth: self.lists.len().saturating_sub(1),
                marker,
                spaced: self.rules.spaced_list_items,
                spans,
            },
            None => RenderNode::Paragraph {
                spaced: self.rules.spaced_paragraphs,
                spans,
            },
        };
        self.nodes.push(node);
    }

    fn finish(mut self) -> Vec<RenderNode> {
        self.flush();
        self.nodes
    }
}

//! Markdown fragments as ratatui `Text`.
//!
//! Block structure (paragraphs, headings, quotes, lists, fenced code) is
//! tracked with a container stack; inline emphasis with a style stack. Fenced
//! code is buffered whole and highlighted with syntect when its block closes.
//! Raw HTML, tables and images are dropped.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::tui::palette::Palette;

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEMES: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

pub fn render(content: &str, palette: &Palette) -> Text<'static> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

    let mut renderer = Renderer::new(*palette);
    for event in Parser::new_ext(content, options) {
        renderer.event(event);
    }
    Text::from(renderer.lines)
}

enum Container {
    Quote,
    /// `next` is the number of the next ordered item, `None` for bullets.
    List { next: Option<u64> },
}

struct FencedCode {
    lang: String,
    body: String,
}

struct Renderer {
    palette: Palette,
    lines: Vec<Line<'static>>,
    containers: Vec<Container>,
    styles: Vec<Style>,
    code: Option<FencedCode>,
    /// Target of the external link being written; printed after its text.
    link: Option<String>,
    /// A block ended; the next one starts after a blank line.
    gap: bool,
}

impl Renderer {
    fn new(palette: Palette) -> Self {
        Self {
            palette,
            lines: Vec::new(),
            containers: Vec::new(),
            styles: Vec::new(),
            code: None,
            link: None,
            gap: false,
        }
    }

    fn current_style(&self) -> Style {
        match self.styles.last() {
            Some(style) => *style,
            None => Style::default().fg(self.palette.fg),
        }
    }

    fn muted(&self) -> Style {
        Style::default().fg(self.palette.muted)
    }

    fn push_style(&mut self, overlay: Style) {
        let style = self.current_style().patch(overlay);
        self.styles.push(style);
    }

    /// New line carrying the quote bars of every enclosing quote.
    fn new_line(&mut self) {
        let bar = Style::default().fg(self.palette.accent);
        let spans = self
            .containers
            .iter()
            .filter(|c| matches!(c, Container::Quote))
            .map(|_| Span::styled("│ ", bar))
            .collect::<Vec<_>>();
        self.lines.push(Line::from(spans));
    }

    fn append(&mut self, span: Span<'static>) {
        if self.lines.is_empty() {
            self.new_line();
        }
        if let Some(line) = self.lines.last_mut() {
            line.push_span(span);
        }
    }

    fn begin_block(&mut self) {
        if self.gap && !self.lines.is_empty() {
            self.new_line();
        }
        self.gap = false;
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                let text = text.replace('\t', "    ");
                match self.code.as_mut() {
                    Some(code) => code.body.push_str(&text),
                    None => {
                        let style = self.current_style();
                        self.append(Span::styled(text, style));
                    }
                }
            }
            Event::Code(code) => {
                let style = Style::default().fg(self.palette.fg).bg(self.palette.code_bg);
                self.append(Span::styled(format!(" {code} "), style));
            }
            Event::SoftBreak => self.append(Span::raw(" ")),
            Event::HardBreak => self.new_line(),
            Event::Rule => {
                self.begin_block();
                self.new_line();
                let rule = Span::styled("─".repeat(40), self.muted());
                self.append(rule);
                self.gap = true;
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                self.begin_block();
                self.new_line();
            }
            Tag::Heading { level, .. } => {
                self.begin_block();
                self.new_line();
                self.push_style(heading_style(&self.palette, level));
            }
            Tag::BlockQuote(_) => {
                self.begin_block();
                self.containers.push(Container::Quote);
                self.push_style(Style::default().add_modifier(Modifier::ITALIC));
            }
            Tag::CodeBlock(kind) => {
                self.begin_block();
                let lang = match kind {
                    CodeBlockKind::Fenced(lang) => lang.trim().to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                self.code = Some(FencedCode {
                    lang,
                    body: String::new(),
                });
            }
            Tag::List(start) => {
                if !self.containers.iter().any(|c| matches!(c, Container::List { .. })) {
                    self.begin_block();
                }
                self.containers.push(Container::List { next: start });
            }
            Tag::Item => self.list_item(),
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT));
            }
            Tag::Link { dest_url, .. } => {
                // In-page anchors are reached with the focus keys; only external targets are printed.
                if !dest_url.starts_with('#') {
                    self.link = Some(dest_url.to_string());
                }
                self.push_style(
                    Style::default()
                        .fg(self.palette.accent)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.gap = true,
            TagEnd::Heading(_) => {
                self.styles.pop();
                self.gap = true;
            }
            TagEnd::BlockQuote(_) => {
                self.containers.pop();
                self.styles.pop();
                self.gap = true;
            }
            TagEnd::CodeBlock => {
                if let Some(code) = self.code.take() {
                    self.fenced_code(code);
                }
                self.gap = true;
            }
            TagEnd::List(_) => {
                self.containers.pop();
                self.gap = true;
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.styles.pop();
            }
            TagEnd::Link => {
                self.styles.pop();
                if let Some(url) = self.link.take() {
                    let suffix = Span::styled(format!(" ↗ {url}"), self.muted());
                    self.append(suffix);
                }
            }
            _ => {}
        }
    }

    fn list_item(&mut self) {
        self.new_line();
        let depth = self
            .containers
            .iter()
            .filter(|c| matches!(c, Container::List { .. }))
            .count()
            .saturating_sub(1);
        let indent = "  ".repeat(depth);
        let marker = match self.containers.last_mut() {
            Some(Container::List { next: Some(n) }) => {
                let marker = format!("{indent}{n}. ");
                *n += 1;
                marker
            }
            _ => format!("{indent}• "),
        };
        let style = Style::default().fg(self.palette.accent);
        self.append(Span::styled(marker, style));
    }

    /// ```text
    /// ╭── rust
    /// │ fn main() {}
    /// ╰──
    /// ```
    fn fenced_code(&mut self, code: FencedCode) {
        let border = self.muted();
        self.new_line();
        self.append(Span::styled("╭──", border));
        if !code.lang.is_empty() {
            self.append(Span::styled(
                format!(" {}", code.lang),
                border.add_modifier(Modifier::BOLD),
            ));
        }
        for spans in highlight(&code.lang, &code.body, &self.palette) {
            self.new_line();
            self.append(Span::styled("│ ", border));
            for span in spans {
                self.append(span);
            }
        }
        self.new_line();
        self.append(Span::styled("╰──", border));
    }
}

/// One span list per source line. Unknown languages are shown unhighlighted.
fn highlight(lang: &str, body: &str, palette: &Palette) -> Vec<Vec<Span<'static>>> {
    let syntax = if lang.is_empty() {
        None
    } else {
        SYNTAXES.find_syntax_by_token(lang)
    };
    let (Some(syntax), Some(theme)) = (syntax, THEMES.themes.get(palette.code_theme)) else {
        let plain = Style::default().fg(palette.fg);
        return body
            .lines()
            .map(|line| vec![Span::styled(line.to_string(), plain)])
            .collect();
    };

    let mut highlighter = HighlightLines::new(syntax, theme);
    LinesWithEndings::from(body)
        .map(|line| match highlighter.highlight_line(line, &SYNTAXES) {
            Ok(ranges) => ranges
                .into_iter()
                .filter_map(|(style, piece)| {
                    let piece = piece.trim_end_matches('\n');
                    if piece.is_empty() {
                        return None;
                    }
                    let fg = style.foreground;
                    Some(Span::styled(
                        piece.to_string(),
                        Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b)),
                    ))
                })
                .collect(),
            Err(_) => vec![Span::raw(line.trim_end_matches('\n').to_string())],
        })
        .collect()
}

fn heading_style(palette: &Palette, level: HeadingLevel) -> Style {
    match level {
        HeadingLevel::H1 => Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        HeadingLevel::H2 => Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
        _ => Style::default()
            .fg(palette.fg)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
    }
}

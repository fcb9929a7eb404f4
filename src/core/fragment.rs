//! # Fragments
//!
//! A fragment is one page's content, fetched on demand and swapped into the
//! content region. It is markdown with two block directives:
//!
//! ```text
//! ::: bar 85 Rust          skill bar (value 0-100, then label)
//! ::: details Header       disclosure, body runs until a bare `:::`
//! …markdown…
//! :::
//! ```
//!
//! Parsing never fails. Unknown directives stay as markdown text, a bar value
//! that does not parse counts as 0, and an unclosed disclosure ends at EOF.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

const DIRECTIVE: &str = ":::";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillBar {
    pub label: String,
    /// Target fill, percent.
    pub value: u8,
    /// Currently displayed fill, percent. Page hooks animate this toward `value`.
    pub width: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disclosure {
    pub header: String,
    pub body: String,
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Markdown(String),
    Bar(SkillBar),
    Disclosure(Disclosure),
}

/// Something in the content the user can focus and activate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interactive {
    /// Block index of a disclosure.
    Disclosure(usize),
    /// In-page link, `target` without the leading `#`.
    AnchorLink { label: String, target: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub blocks: Vec<Block>,
    /// Set by page hooks: disclosures can be opened and closed.
    pub disclosures_interactive: bool,
    /// Set by page hooks: in-page anchor links scroll to their target.
    pub anchor_scroll: bool,
}

impl Fragment {
    pub fn parse(source: &str) -> Fragment {
        let mut blocks = Vec::new();
        let mut markdown = String::new();
        let mut open_disclosure: Option<Disclosure> = None;

        for line in source.lines() {
            let trimmed = line.trim();

            if let Some(disclosure) = open_disclosure.as_mut() {
                if trimmed == DIRECTIVE {
                    if let Some(done) = open_disclosure.take() {
                        blocks.push(Block::Disclosure(done));
                    }
                } else {
                    disclosure.body.push_str(line);
                    disclosure.body.push('\n');
                }
                continue;
            }

            match parse_directive(trimmed) {
                Some(Directive::Bar(bar)) => {
                    flush_markdown(&mut markdown, &mut blocks);
                    blocks.push(Block::Bar(bar));
                }
                Some(Directive::Details(header)) => {
                    flush_markdown(&mut markdown, &mut blocks);
                    open_disclosure = Some(Disclosure {
                        header,
                        body: String::new(),
                        open: true,
                    });
                }
                None => {
                    markdown.push_str(line);
                    markdown.push('\n');
                }
            }
        }

        if let Some(done) = open_disclosure {
            blocks.push(Block::Disclosure(done));
        }
        flush_markdown(&mut markdown, &mut blocks);

        Fragment {
            blocks,
            disclosures_interactive: false,
            anchor_scroll: false,
        }
    }

    pub fn bars(&self) -> impl Iterator<Item = &SkillBar> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Bar(bar) => Some(bar),
            _ => None,
        })
    }

    pub fn bars_mut(&mut self) -> impl Iterator<Item = &mut SkillBar> {
        self.blocks.iter_mut().filter_map(|b| match b {
            Block::Bar(bar) => Some(bar),
            _ => None,
        })
    }

    pub fn disclosures_mut(&mut self) -> impl Iterator<Item = &mut Disclosure> {
        self.blocks.iter_mut().filter_map(|b| match b {
            Block::Disclosure(d) => Some(d),
            _ => None,
        })
    }

    /// Flips the disclosure at `block`. Returns false if there is none or
    /// disclosures are not interactive on this page.
    pub fn toggle_disclosure(&mut self, block: usize) -> bool {
        if !self.disclosures_interactive {
            return false;
        }
        match self.blocks.get_mut(block) {
            Some(Block::Disclosure(d)) => {
                d.open = !d.open;
                true
            }
            _ => false,
        }
    }

    /// Block index holding the heading or disclosure named by `id`.
    pub fn anchor_target(&self, id: &str) -> Option<usize> {
        let id = id.trim_start_matches('#');
        self.blocks.iter().position(|block| match block {
            Block::Markdown(text) => heading_ids(text).iter().any(|h| h == id),
            Block::Disclosure(d) => slugify(&d.header) == id,
            Block::Bar(_) => false,
        })
    }

    /// Focusable items, in document order. Empty unless a page hook enabled them.
    pub fn interactives(&self) -> Vec<Interactive> {
        let mut items = Vec::new();
        for (index, block) in self.blocks.iter().enumerate() {
            match block {
                Block::Disclosure(d) => {
                    if self.disclosures_interactive {
                        items.push(Interactive::Disclosure(index));
                    }
                    if self.anchor_scroll && d.open {
                        items.extend(anchor_links(&d.body));
                    }
                }
                Block::Markdown(text) if self.anchor_scroll => items.extend(anchor_links(text)),
                _ => {}
            }
        }
        items
    }
}

enum Directive {
    Bar(SkillBar),
    Details(String),
}

fn parse_directive(line: &str) -> Option<Directive> {
    let rest = line.strip_prefix(DIRECTIVE)?.trim_start();
    let (name, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let args = args.trim();

    match name {
        "bar" => {
            let (value, label) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
            let value = value
                .trim_end_matches('%')
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(|v| v.clamp(0.0, 100.0).round() as u8)
                .unwrap_or(0);
            Some(Directive::Bar(SkillBar {
                label: label.trim().to_string(),
                value,
                width: value,
            }))
        }
        "details" => Some(Directive::Details(args.to_string())),
        _ => None,
    }
}

fn flush_markdown(markdown: &mut String, blocks: &mut Vec<Block>) {
    if !markdown.trim().is_empty() {
        blocks.push(Block::Markdown(std::mem::take(markdown)));
    }
    markdown.clear();
}

/// Lowercases and joins alphanumeric runs with `-`, e.g. `"Open Source!"` → `"open-source"`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

fn markdown_options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_HEADING_ATTRIBUTES);
    opts
}

/// Anchor ids of the headings in `text`: the `{#id}` attribute, or the slug.
fn heading_ids(text: &str) -> Vec<String> {
    let mut ids = Vec::new();
    let mut current: Option<(Option<String>, String)> = None;

    for event in Parser::new_ext(text, markdown_options()) {
        match event {
            Event::Start(Tag::Heading { id, .. }) => {
                current = Some((id.map(|i| i.to_string()), String::new()));
            }
            Event::Text(t) | Event::Code(t) => {
                if let Some((_, buf)) = current.as_mut() {
                    buf.push_str(&t);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((explicit, buf)) = current.take() {
                    ids.push(explicit.unwrap_or_else(|| slugify(&buf)));
                }
            }
            _ => {}
        }
    }
    ids
}

fn anchor_links(text: &str) -> Vec<Interactive> {
    let mut links = Vec::new();
    let mut current: Option<(String, String)> = None;

    for event in Parser::new_ext(text, markdown_options()) {
        match event {
            Event::Start(Tag::Link { dest_url, .. }) if dest_url.starts_with('#') => {
                current = Some((dest_url.trim_start_matches('#').to_string(), String::new()));
            }
            Event::Text(t) | Event::Code(t) => {
                if let Some((_, label)) = current.as_mut() {
                    label.push_str(&t);
                }
            }
            Event::End(TagEnd::Link) => {
                if let Some((target, label)) = current.take() {
                    links.push(Interactive::AnchorLink { label, target });
                }
            }
            _ => {}
        }
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENGAGEMENTS: &str = "\
# Engagements

Jump to [mentoring](#mentoring).

::: details Mentoring
Weekly sessions.
:::

::: details Open Source
Maintainer of a few crates.
";

    #[test]
    fn plain_markdown_is_one_block() {
        let fragment = Fragment::parse("# Hello\n\nSome text.\n");
        assert_eq!(fragment.blocks.len(), 1);
        assert!(matches!(&fragment.blocks[0], Block::Markdown(t) if t.contains("Some text.")));
    }

    #[test]
    fn bars_are_parsed_with_values_and_labels() {
        let fragment = Fragment::parse("## Skills\n::: bar 85 Rust\n::: bar 60% Type Script\n");
        let bars: Vec<&SkillBar> = fragment.bars().collect();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].label, "Rust");
        assert_eq!(bars[0].value, 85);
        assert_eq!(bars[1].label, "Type Script");
        assert_eq!(bars[1].value, 60);
    }

    #[test]
    fn bad_bar_values_count_as_zero_and_large_ones_clamp() {
        let fragment = Fragment::parse("::: bar lots Go\n::: bar 250 Zig\n::: bar\n");
        let values: Vec<u8> = fragment.bars().map(|b| b.value).collect();
        assert_eq!(values, vec![0, 100, 0]);
    }

    #[test]
    fn disclosures_collect_their_body() {
        let fragment = Fragment::parse(ENGAGEMENTS);
        assert_eq!(fragment.blocks.len(), 3);
        match &fragment.blocks[1] {
            Block::Disclosure(d) => {
                assert_eq!(d.header, "Mentoring");
                assert_eq!(d.body, "Weekly sessions.\n");
            }
            other => panic!("expected disclosure, got {other:?}"),
        }
        // Unclosed at EOF still becomes a disclosure.
        assert!(matches!(&fragment.blocks[2], Block::Disclosure(d) if d.header == "Open Source"));
    }

    #[test]
    fn unknown_directive_stays_markdown() {
        let fragment = Fragment::parse("::: warning careful\n");
        assert!(matches!(&fragment.blocks[0], Block::Markdown(t) if t.contains("warning")));
    }

    #[test]
    fn toggle_requires_interactive_disclosures() {
        let mut fragment = Fragment::parse(ENGAGEMENTS);
        assert!(!fragment.toggle_disclosure(1));

        fragment.disclosures_interactive = true;
        assert!(fragment.toggle_disclosure(1));
        assert!(matches!(&fragment.blocks[1], Block::Disclosure(d) if !d.open));
        assert!(!fragment.toggle_disclosure(0), "markdown block is not a disclosure");
    }

    #[test]
    fn anchors_resolve_headings_and_disclosures() {
        let fragment = Fragment::parse("# Intro\n\n## Side Projects {#side}\n\n::: bar 10 X\n::: details Open Source\nbody\n:::\n");
        assert_eq!(fragment.anchor_target("intro"), Some(0));
        assert_eq!(fragment.anchor_target("#side"), Some(0));
        assert_eq!(fragment.anchor_target("open-source"), Some(2));
        assert_eq!(fragment.anchor_target("missing"), None);
    }

    #[test]
    fn interactives_follow_hook_flags() {
        let mut fragment = Fragment::parse(ENGAGEMENTS);
        assert!(fragment.interactives().is_empty());

        fragment.disclosures_interactive = true;
        fragment.anchor_scroll = true;
        let items = fragment.interactives();
        assert_eq!(
            items,
            vec![
                Interactive::AnchorLink {
                    label: "mentoring".to_string(),
                    target: "mentoring".to_string()
                },
                Interactive::Disclosure(1),
                Interactive::Disclosure(2),
            ]
        );
    }

    #[test]
    fn slugify_collapses_punctuation() {
        assert_eq!(slugify("Open Source!"), "open-source");
        assert_eq!(slugify("  Écoles & Associations "), "écoles-associations");
        assert_eq!(slugify("---"), "");
    }
}
